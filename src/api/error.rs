//! Error types for the GraphQL client.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the server
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered with a non-success HTTP status
    #[error("Server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Server answered with GraphQL errors
    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// Response carried neither data nor errors
    #[error("Response contained no data")]
    MissingData,

    /// Response data lacks the operation's root field
    #[error("Response is missing field '{field}'")]
    MissingField { field: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An update hook could not apply the result to the cache
    #[error("Cache update failed: {0}")]
    Cache(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Short error type string for log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network_error",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Status { .. } => "http_status",
            ApiError::GraphQl { .. } => "graphql_error",
            ApiError::MissingData => "missing_data",
            ApiError::MissingField { .. } => "missing_field",
            ApiError::Decode(_) => "decode_error",
            ApiError::Cache(_) => "cache_error",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_error_joins_messages() {
        let err = ApiError::GraphQl {
            messages: vec!["User not found".to_string(), "Invalid password".to_string()],
        };
        assert_eq!(err.to_string(), "GraphQL error: User not found; Invalid password");
        assert_eq!(err.error_type(), "graphql_error");
    }

    #[test]
    fn missing_field_names_field() {
        let err = ApiError::MissingField {
            field: "getPosts".to_string(),
        };
        assert_eq!(err.to_string(), "Response is missing field 'getPosts'");
    }
}
