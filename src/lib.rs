//! Client-side state container for the post-sharing API.
//!
//! The [`store::Store`] mediates between views and a GraphQL endpoint: views
//! dispatch [`store::Action`]s and read [`store::Getters`]; actions talk to an
//! [`api::ApiClient`], persist the session token through
//! [`storage::TokenStorage`] and move between routes through
//! [`navigation::Navigator`].

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod storage;
pub mod store;
