//! Scripted transport for driving the store without a server.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use postboard::api::{ApiError, Document, GraphqlRequest, Transport};
use serde_json::{Map, Value};
use tokio::sync::Notify;

/// A captured request for assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub operation: String,
    pub variables: Value,
}

/// A scripted reply to one operation.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Resolve with `{ <operation>: value }`.
    Field(Value),
    /// Reject with GraphQL error messages.
    Errors(Vec<String>),
    /// Hold the reply until the gate is notified.
    Gated(Arc<Notify>, Box<MockReply>),
}

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, document: &Document, reply: MockReply) {
        self.replies
            .lock()
            .entry(document.name.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queue a successful reply whose root field is `value`.
    pub fn reply(&self, document: &Document, value: Value) {
        self.push(document, MockReply::Field(value));
    }

    /// Queue a GraphQL error reply.
    pub fn fail(&self, document: &Document, message: &str) {
        self.push(document, MockReply::Errors(vec![message.to_string()]));
    }

    /// Queue a successful reply that waits for the returned gate.
    pub fn gated_reply(&self, document: &Document, value: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(
            document,
            MockReply::Gated(gate.clone(), Box::new(MockReply::Field(value))),
        );
        gate
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self, document: &Document) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.operation == document.name)
            .count()
    }

    /// Yield until `count` requests for `document` have arrived.
    pub async fn wait_for(&self, document: &Document, count: usize) {
        while self.request_count(document) < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, ApiError> {
        self.requests.lock().push(CapturedRequest {
            operation: request.operation.to_string(),
            variables: request.variables.clone(),
        });

        let next = self
            .replies
            .lock()
            .get_mut(request.operation)
            .and_then(VecDeque::pop_front);

        let mut reply = next.ok_or_else(|| ApiError::Status {
            status: 500,
            message: format!("no scripted reply for {}", request.operation),
        })?;

        loop {
            match reply {
                MockReply::Field(value) => {
                    let mut data = Map::new();
                    data.insert(request.operation.to_string(), value);
                    return Ok(Value::Object(data));
                }
                MockReply::Errors(messages) => return Err(ApiError::GraphQl { messages }),
                MockReply::Gated(gate, inner) => {
                    gate.notified().await;
                    reply = *inner;
                }
            }
        }
    }
}
