//! Query result cache with optimistic layers.
//!
//! Results are keyed by operation name and the canonical JSON encoding of the
//! variables. Optimistic layers sit on top of the root layer; reads go from the
//! newest layer down to the root, so a provisional result shadows the
//! confirmed one until its layer is removed.
//!
//! A layer keeps the hook and response that produced it. Whenever the root
//! changes or a layer is removed, the remaining layers are rebuilt by replaying
//! their hooks in order, so no layer carries a stale copy of data beneath it.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use super::documents::Document;
use super::error::ApiError;
use super::CacheUpdate;

/// Cache key: operation name plus canonical variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: &'static str,
    variables: String,
}

impl CacheKey {
    pub fn new(document: &Document, variables: &Value) -> Self {
        // Map keys are sorted, so equal variables encode identically.
        let variables = match variables {
            Value::Null => "{}".to_string(),
            other => other.to_string(),
        };
        Self {
            operation: document.name,
            variables,
        }
    }

    pub fn operation(&self) -> &str {
        self.operation
    }
}

struct OptimisticLayer {
    id: Uuid,
    update: CacheUpdate,
    response: Value,
    entries: HashMap<CacheKey, Value>,
}

#[derive(Default)]
pub struct QueryCache {
    root: HashMap<CacheKey, Value>,
    layers: Vec<OptimisticLayer>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a result, letting optimistic layers shadow the root.
    pub fn read_query(&self, document: &Document, variables: &Value) -> Option<Value> {
        self.read_key(&CacheKey::new(document, variables), self.layers.len())
    }

    /// Write a confirmed result into the root layer.
    pub fn write_query(&mut self, document: &Document, variables: &Value, data: Value) {
        self.root.insert(CacheKey::new(document, variables), data);
        self.rebase_layers();
    }

    /// Run `update` against confirmed data only.
    pub fn update_root(&mut self, update: &CacheUpdate, data: &Value) -> Result<(), ApiError> {
        let outcome = update(
            &mut CacheTransaction {
                cache: self,
                target: Target::Root,
            },
            data,
        );
        self.rebase_layers();
        outcome
    }

    /// Push an optimistic layer built by running `update` with `response`.
    ///
    /// If the hook fails, no layer is kept.
    pub fn add_optimistic(
        &mut self,
        id: Uuid,
        update: CacheUpdate,
        response: Value,
    ) -> Result<(), ApiError> {
        self.layers.push(OptimisticLayer {
            id,
            update,
            response,
            entries: HashMap::new(),
        });
        let index = self.layers.len() - 1;
        let outcome = self.replay_layer(index);
        if outcome.is_err() {
            self.layers.pop();
        }
        outcome
    }

    /// Drop the optimistic layer with `id`. Unknown ids are ignored.
    pub fn remove_optimistic(&mut self, id: Uuid) {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        if self.layers.len() != before {
            self.rebase_layers();
        }
    }

    pub fn optimistic_layers(&self) -> usize {
        self.layers.len()
    }

    /// Discard every cached result, confirmed or optimistic.
    pub fn reset(&mut self) {
        self.root.clear();
        self.layers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.layers.is_empty()
    }

    /// Read through the first `depth` layers (newest first) then the root.
    fn read_key(&self, key: &CacheKey, depth: usize) -> Option<Value> {
        self.layers[..depth]
            .iter()
            .rev()
            .find_map(|layer| layer.entries.get(key))
            .or_else(|| self.root.get(key))
            .cloned()
    }

    /// Rebuild the layer at `index` from whatever lies beneath it.
    fn replay_layer(&mut self, index: usize) -> Result<(), ApiError> {
        let layer = &mut self.layers[index];
        layer.entries.clear();
        let update = layer.update.clone();
        let response = layer.response.clone();
        update(
            &mut CacheTransaction {
                cache: self,
                target: Target::Layer(index),
            },
            &response,
        )
    }

    fn rebase_layers(&mut self) {
        for index in 0..self.layers.len() {
            if let Err(e) = self.replay_layer(index) {
                tracing::warn!(
                    layer = %self.layers[index].id,
                    "Optimistic update no longer applies: {}",
                    e
                );
            }
        }
    }
}

enum Target {
    Root,
    Layer(usize),
}

/// Read/write handle passed to mutation update hooks.
pub struct CacheTransaction<'a> {
    cache: &'a mut QueryCache,
    target: Target,
}

impl CacheTransaction<'_> {
    pub fn read_query(&self, document: &Document, variables: &Value) -> Option<Value> {
        let key = CacheKey::new(document, variables);
        match self.target {
            Target::Root => self.cache.root.get(&key).cloned(),
            Target::Layer(index) => self.cache.read_key(&key, index + 1),
        }
    }

    pub fn write_query(&mut self, document: &Document, variables: &Value, data: Value) {
        let key = CacheKey::new(document, variables);
        match self.target {
            Target::Root => {
                self.cache.root.insert(key, data);
            }
            Target::Layer(index) => {
                self.cache.layers[index].entries.insert(key, data);
            }
        }
    }

    pub fn is_optimistic(&self) -> bool {
        matches!(self.target, Target::Layer(_))
    }
}
