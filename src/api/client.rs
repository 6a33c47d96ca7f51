//! Caching GraphQL client.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::cache::QueryCache;
use super::documents::Document;
use super::error::ApiError;
use super::transport::{GraphqlRequest, Transport};
use super::{ApiClient, CacheUpdate, MutationRequest, QueryRequest};

/// Where queries look first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Answer from the cache when possible, otherwise fetch and cache.
    #[default]
    CacheFirst,
    /// Always fetch; the result still refreshes the cache.
    NetworkOnly,
}

pub struct GraphqlClient {
    transport: Arc<dyn Transport>,
    cache: Mutex<QueryCache>,
    fetch_policy: FetchPolicy,
}

impl GraphqlClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: Mutex::new(QueryCache::new()),
            fetch_policy: FetchPolicy::default(),
        }
    }

    pub fn with_fetch_policy(mut self, fetch_policy: FetchPolicy) -> Self {
        self.fetch_policy = fetch_policy;
        self
    }

    /// Read a cached result, including optimistic data.
    pub fn read_query(&self, document: &Document, variables: &Value) -> Option<Value> {
        self.cache.lock().read_query(document, variables)
    }

    /// Seed or overwrite a confirmed cached result.
    pub fn write_query(&self, document: &Document, variables: &Value, data: Value) {
        self.cache.lock().write_query(document, variables, data);
    }

    /// Number of optimistic results currently awaiting confirmation.
    pub fn pending_optimistic(&self) -> usize {
        self.cache.lock().optimistic_layers()
    }

    fn apply_optimistic(&self, update: &CacheUpdate, optimistic: &Value) -> Option<Uuid> {
        let id = Uuid::new_v4();
        let outcome = self
            .cache
            .lock()
            .add_optimistic(id, update.clone(), optimistic.clone());
        match outcome {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::warn!("Optimistic update skipped: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ApiClient for GraphqlClient {
    async fn query(&self, request: QueryRequest) -> Result<Value, ApiError> {
        if self.fetch_policy == FetchPolicy::CacheFirst {
            let cached = self.read_query(&request.document, &request.variables);
            if let Some(data) = cached {
                tracing::trace!(operation = request.document.name, "Cache hit");
                return Ok(data);
            }
        }

        let wire = GraphqlRequest::new(&request.document, request.variables.clone());
        let data = self.transport.execute(&wire).await?;
        self.write_query(&request.document, &request.variables, data.clone());
        Ok(data)
    }

    async fn mutate(&self, request: MutationRequest) -> Result<Value, ApiError> {
        let MutationRequest {
            document,
            variables,
            update,
            optimistic_response,
        } = request;

        let layer = match (&update, &optimistic_response) {
            (Some(update), Some(optimistic)) => self.apply_optimistic(update, optimistic),
            _ => None,
        };

        let result = self
            .transport
            .execute(&GraphqlRequest::new(&document, variables))
            .await;

        let mut cache = self.cache.lock();
        if let Some(id) = layer {
            cache.remove_optimistic(id);
        }
        let data = result?;
        if let Some(update) = update {
            cache.update_root(&update, &data)?;
        }
        Ok(data)
    }

    async fn reset_store(&self) -> Result<(), ApiError> {
        self.cache.lock().reset();
        tracing::info!("Query cache reset");
        Ok(())
    }
}
