//! GraphQL API boundary.
//!
//! The store only sees [`ApiClient`]. [`GraphqlClient`] implements it over a
//! [`Transport`] with a query cache that mutation update hooks can edit.

pub mod auth;
pub mod cache;
pub mod client;
pub mod documents;
pub mod error;
pub mod transport;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use cache::{CacheKey, CacheTransaction, QueryCache};
pub use client::{FetchPolicy, GraphqlClient};
pub use documents::Document;
pub use error::ApiError;
pub use transport::{decode_response, GraphqlRequest, HttpTransport, Transport};

/// Hook run against the cache with a mutation's data: once with the
/// optimistic response (into a provisional layer) and once with the
/// confirmed result.
pub type CacheUpdate =
    Arc<dyn Fn(&mut CacheTransaction<'_>, &Value) -> Result<(), ApiError> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub document: Document,
    pub variables: Value,
}

impl QueryRequest {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            variables: Value::Null,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }
}

#[derive(Clone)]
pub struct MutationRequest {
    pub document: Document,
    pub variables: Value,
    pub update: Option<CacheUpdate>,
    pub optimistic_response: Option<Value>,
}

impl MutationRequest {
    pub fn new(document: Document, variables: Value) -> Self {
        Self {
            document,
            variables,
            update: None,
            optimistic_response: None,
        }
    }

    pub fn with_update(mut self, update: CacheUpdate) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_optimistic_response(mut self, response: Value) -> Self {
        self.optimistic_response = Some(response);
        self
    }
}

impl std::fmt::Debug for MutationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationRequest")
            .field("document", &self.document.name)
            .field("variables", &self.variables)
            .field("update", &self.update.is_some())
            .field("optimistic_response", &self.optimistic_response)
            .finish()
    }
}

/// The operations the store needs from an API client.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn query(&self, request: QueryRequest) -> Result<Value, ApiError>;

    async fn mutate(&self, request: MutationRequest) -> Result<Value, ApiError>;

    /// Discard every cached result.
    async fn reset_store(&self) -> Result<(), ApiError>;
}
