//! Bearer-token identity and the admin gate.
//!
//! Tokens are opaque: a [`TokenVerifier`] resolves them to an [`Identity`].
//! The raw token is also forwarded to the sheet endpoint, which runs its own
//! check before applying a write.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use tracing::warn;

use crate::config::AuthConfig;
use crate::error::{BookingError, BookingResult};

/// Who a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User id.
    pub uid: String,
    /// Whether the token carries the admin claim.
    pub is_admin: bool,
}

/// Resolves bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// The identity behind `token`, or `Unauthorized` when it is not recognized.
    async fn verify(&self, token: &str) -> BookingResult<Identity>;
}

/// Verifier backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenVerifier {
    /// Builds the table from `auth.yaml`.
    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|entry| {
                (
                    entry.token.clone(),
                    Identity {
                        uid: entry.uid.clone(),
                        is_admin: entry.admin,
                    },
                )
            })
            .collect();
        Self { tokens }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> BookingResult<Identity> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| BookingError::Unauthorized {
                message: "unknown token".to_string(),
            })
    }
}

/// The token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Admits only admin callers. Returns the identity and the raw token.
///
/// A missing or unknown token is `Unauthorized`; a valid token without the
/// admin claim is `Forbidden`.
pub async fn require_admin(
    verifier: &dyn TokenVerifier,
    headers: &HeaderMap,
) -> BookingResult<(Identity, String)> {
    let token = bearer_token(headers).ok_or_else(|| BookingError::Unauthorized {
        message: "missing bearer token".to_string(),
    })?;

    let identity = verifier.verify(token).await?;
    if !identity.is_admin {
        warn!(uid = %identity.uid, "Admin route refused");
        return Err(BookingError::Forbidden { uid: identity.uid });
    }

    Ok((identity, token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenEntry;
    use axum::http::HeaderValue;

    fn verifier() -> StaticTokenVerifier {
        StaticTokenVerifier::from_config(&AuthConfig {
            tokens: vec![
                TokenEntry {
                    token: "admin-tok".to_string(),
                    uid: "owner".to_string(),
                    admin: true,
                },
                TokenEntry {
                    token: "user-tok".to_string(),
                    uid: "client".to_string(),
                    admin: false,
                },
            ],
        })
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("bearer  abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_admin_token_passes() {
        let (identity, token) = require_admin(&verifier(), &headers("Bearer admin-tok"))
            .await
            .unwrap();
        assert_eq!(identity.uid, "owner");
        assert_eq!(token, "admin-tok");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert!(matches!(
            require_admin(&verifier(), &HeaderMap::new()).await,
            Err(BookingError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        assert!(matches!(
            require_admin(&verifier(), &headers("Bearer forged")).await,
            Err(BookingError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        match require_admin(&verifier(), &headers("Bearer user-tok")).await {
            Err(BookingError::Forbidden { uid }) => assert_eq!(uid, "client"),
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }
}
