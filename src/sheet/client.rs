//! Sheet endpoint clients.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::SheetConfig;
use crate::error::{BookingError, BookingResult};

use super::{SheetName, WriteRequest, WriteResponse};

/// Transport to the sheet endpoint.
#[async_trait]
pub trait SheetClient: Send + Sync {
    /// Every raw row of `sheet`, in sheet order.
    async fn fetch_rows(&self, sheet: SheetName) -> BookingResult<Vec<Value>>;

    /// Sends one write and returns the endpoint's answer as-is.
    async fn submit(&self, sheet: SheetName, request: WriteRequest) -> BookingResult<WriteResponse>;
}

/// [`SheetClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSheetClient {
    http: Client,
    base_url: String,
}

impl HttpSheetClient {
    /// Builds a client with the configured request timeout.
    pub fn new(config: &SheetConfig) -> BookingResult<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl SheetClient for HttpSheetClient {
    async fn fetch_rows(&self, sheet: SheetName) -> BookingResult<Vec<Value>> {
        debug!(sheet = %sheet, "Fetching sheet rows");

        let body: Value = self
            .http
            .get(&self.base_url)
            .query(&[("sheet", sheet.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body {
            Value::Array(rows) => Ok(rows),
            // Script errors come back as an object instead of a row array.
            other => {
                let response: WriteResponse =
                    serde_json::from_value(other).unwrap_or_default();
                Err(BookingError::Upstream {
                    message: response.merged_error(),
                })
            }
        }
    }

    async fn submit(&self, sheet: SheetName, request: WriteRequest) -> BookingResult<WriteResponse> {
        debug!(sheet = %sheet, mode = request.mode.as_str(), "Submitting sheet write");

        let response = self
            .http
            .post(&self.base_url)
            .query(&[("sheet", sheet.as_str())])
            .form(&request.form_pairs())
            .send()
            .await?
            .error_for_status()?
            .json::<WriteResponse>()
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_builds_from_config() {
        let config = SheetConfig {
            base_url: "http://127.0.0.1:9/exec".to_string(),
            timeout_secs: 1,
            cache_ttl_secs: 180,
        };
        let client = HttpSheetClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9/exec");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        // Port 9 (discard) is not expected to serve HTTP on the test host.
        let config = SheetConfig {
            base_url: "http://127.0.0.1:9/exec".to_string(),
            timeout_secs: 1,
            cache_ttl_secs: 180,
        };
        let client = HttpSheetClient::new(&config).unwrap();

        match client.fetch_rows(SheetName::Notices).await {
            Err(BookingError::Upstream { message }) => assert!(!message.is_empty()),
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }
}
