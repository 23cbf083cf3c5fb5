//! Configuration types for the booking service.
//!
//! These are deserialized from the YAML files of a configuration directory.

use serde::Deserialize;
use std::time::Duration;

/// Service identity and listener settings (`service.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Name reported by the health endpoint.
    pub name: String,
    /// Socket address the HTTP server binds to, e.g. `0.0.0.0:8080`.
    pub bind_address: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    180
}

/// Remote sheet endpoint settings (`sheet.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// The endpoint URL; the sheet name is appended as a `sheet` query parameter.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long fetched records stay cached, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl SheetConfig {
    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The cache time-to-live as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// A bearer token accepted by the static verifier.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    /// The opaque token value.
    pub token: String,
    /// The user id the token resolves to.
    pub uid: String,
    /// Whether the token carries the admin claim.
    #[serde(default)]
    pub admin: bool,
}

/// Token table for the static verifier (`auth.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Accepted tokens.
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// The complete service configuration.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    service: ServiceConfig,
    sheet: SheetConfig,
    auth: AuthConfig,
}

impl BookingConfig {
    /// Assembles a configuration from its parts.
    pub fn new(service: ServiceConfig, sheet: SheetConfig, auth: AuthConfig) -> Self {
        Self {
            service,
            sheet,
            auth,
        }
    }

    /// Service settings.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Sheet endpoint settings.
    pub fn sheet(&self) -> &SheetConfig {
        &self.sheet
    }

    /// Token table.
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_config_defaults() {
        let sheet: SheetConfig = serde_yaml::from_str("base_url: http://localhost:9000/exec").unwrap();
        assert_eq!(sheet.timeout(), Duration::from_secs(10));
        assert_eq!(sheet.cache_ttl(), Duration::from_secs(180));
    }

    #[test]
    fn test_token_admin_defaults_false() {
        let auth: AuthConfig = serde_yaml::from_str(
            r#"
tokens:
  - token: abc
    uid: staff
  - token: def
    uid: owner
    admin: true
"#,
        )
        .unwrap();
        assert_eq!(auth.tokens.len(), 2);
        assert!(!auth.tokens[0].admin);
        assert!(auth.tokens[1].admin);
    }

    #[test]
    fn test_empty_auth_config() {
        let auth: AuthConfig = serde_yaml::from_str("{}").unwrap();
        assert!(auth.tokens.is_empty());
    }
}
