//! Request/response transport.
//!
//! The node client needs exactly one thing from the network: send a GET or
//! a POST with a JSON body, hand back the response text. Error statuses are
//! not errors here. The node puts useful JSON in its 4xx bodies, and
//! [`super::Blockchain`] decides what they mean. Only failures that leave
//! no body at all (connect errors, timeouts) become [`ApiError::Transport`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::TransportConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Something that can carry a request to a node.
///
/// Implement this to plug in a different HTTP stack, add authentication,
/// or replay canned responses in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` (if any) to `url` and returns the raw response text,
    /// whatever the status code.
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<String, ApiError>;
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client, keeping whatever settings it was built with.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<String, ApiError> {
        let builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self
                .client
                .post(url)
                .header("Content-Type", "application/json"),
        };
        let builder = match body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            debug!(url, error = %e, "node request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(?method, url, %status, len = text.len(), "node responded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(&TransportConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blocks/height"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"height": 42})))
            .mount(&mock_server)
            .await;

        let url = format!("{}/blocks/height", mock_server.uri());
        let body = transport()
            .request(HttpMethod::Get, &url, None)
            .await
            .unwrap();
        assert_eq!(body, r#"{"height":42}"#);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/leasing/broadcast/lease"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"amount": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/leasing/broadcast/lease", mock_server.uri());
        let body = transport()
            .request(HttpMethod::Post, &url, Some(r#"{"amount":1}"#.to_string()))
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/info/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": "error",
                "details": "Transaction is not in blockchain"
            })))
            .mount(&mock_server)
            .await;

        let url = format!("{}/transactions/info/missing", mock_server.uri());
        let body = transport()
            .request(HttpMethod::Get, &url, None)
            .await
            .unwrap();
        assert!(body.contains("Transaction is not in blockchain"));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let config = TransportConfig {
            timeout: Duration::from_millis(100),
            ..TransportConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        let result = transport
            .request(HttpMethod::Get, &mock_server.uri(), None)
            .await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
