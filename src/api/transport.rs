//! Wire transport for GraphQL operations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::auth::build_auth_header;
use super::documents::Document;
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::storage::TokenStorage;

/// Body of a GraphQL request.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    #[serde(skip)]
    pub operation: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn new(document: &Document, variables: Value) -> Self {
        let variables = match variables {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        Self {
            operation: document.name,
            query: document.source,
            variables,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// Decode a GraphQL response body into its `data` object.
///
/// Any entry in `errors` fails the whole operation, even when partial data is
/// present.
pub fn decode_response(body: &[u8]) -> Result<Value, ApiError> {
    let response: GraphqlResponse = serde_json::from_slice(body)?;
    if !response.errors.is_empty() {
        return Err(ApiError::GraphQl {
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        });
    }
    match response.data {
        Some(Value::Null) | None => Err(ApiError::MissingData),
        Some(data) => Ok(data),
    }
}

/// Sends one GraphQL operation and returns its `data` object.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, ApiError>;
}

/// GraphQL over HTTP POST.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout: Duration,
    storage: Arc<dyn TokenStorage>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig, storage: Arc<dyn TokenStorage>) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(config.timeout_seconds as u64);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout,
            storage,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                duration: self.timeout.as_secs(),
            }
        } else {
            ApiError::Network(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, ApiError> {
        let mut builder = self.client.post(&self.endpoint).json(request);

        if let Some((name, value)) = build_auth_header(self.storage.as_ref()) {
            builder = builder.header(name, value.expose());
        }

        tracing::debug!(operation = request.operation, "Sending GraphQL request");

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // GraphQL servers report validation and resolver failures with a
            // 4xx status and a regular `errors` body.
            if let Err(err @ ApiError::GraphQl { .. }) = decode_response(&body) {
                return Err(err);
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).chars().take(200).collect(),
            });
        }

        decode_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::documents::GET_POSTS;
    use serde_json::json;

    #[test]
    fn request_serializes_query_and_variables_only() {
        let request = GraphqlRequest::new(&GET_POSTS, Value::Null);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["query"], GET_POSTS.source);
        assert_eq!(body["variables"], json!({}));
        assert!(body.get("operation").is_none());
    }

    #[test]
    fn decode_returns_data() {
        let data = decode_response(br#"{"data": {"getPosts": []}}"#).unwrap();
        assert_eq!(data, json!({"getPosts": []}));
    }

    #[test]
    fn decode_errors_win_over_partial_data() {
        let err = decode_response(
            br#"{"data": {"getPosts": null}, "errors": [{"message": "boom"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::GraphQl { ref messages } if messages == &["boom"]));
    }

    #[test]
    fn decode_null_data_is_missing() {
        assert!(matches!(
            decode_response(br#"{"data": null}"#),
            Err(ApiError::MissingData)
        ));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        assert!(matches!(decode_response(b"<html>"), Err(ApiError::Decode(_))));
    }
}
