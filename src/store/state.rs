use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::ApiError;
use crate::store::mvi::StateTree;

/// Identifier used by the optimistic echo of a post that the server has not
/// confirmed yet.
pub const PROVISIONAL_POST_ID: &str = "-1";

/// A post as returned by the API.
///
/// Only the identifier is interpreted by the store; every other field is kept
/// as-is so views can render whatever the server selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Post {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            typename: None,
            fields: Map::new(),
        }
    }

    /// Builder-style helper to attach an opaque field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// True for the optimistic echo inserted before the server responds.
    pub fn is_provisional(&self) -> bool {
        self.id == PROVISIONAL_POST_ID
    }
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub favorites: Vec<Post>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Broad classification of a failure surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Server,
    Response,
    Storage,
}

/// Error value held in state.
///
/// A detached summary of an [`ApiError`] so the state tree stays `Clone`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ApiError> for StoreError {
    fn from(err: &ApiError) -> Self {
        let kind = match err {
            ApiError::Network(_) | ApiError::Timeout { .. } => ErrorKind::Network,
            ApiError::Status { .. } | ApiError::GraphQl { .. } => ErrorKind::Server,
            ApiError::MissingData
            | ApiError::MissingField { .. }
            | ApiError::Decode(_)
            | ApiError::Cache(_) => ErrorKind::Response,
            ApiError::Storage(_) => ErrorKind::Storage,
        };
        Self::new(kind, err.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The single state tree of the application session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) posts: Vec<Post>,
    pub(crate) user_posts: Vec<Post>,
    pub(crate) search_results: Vec<Post>,
    pub(crate) user: Option<User>,
    pub(crate) loading: bool,
    pub(crate) error: Option<StoreError>,
    /// Never written by an action; kept for views that display it.
    pub(crate) auth_error: Option<StoreError>,
}

impl StateTree for AppState {}
