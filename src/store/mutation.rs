//! Mutations and the reducer that applies them to [`AppState`].

use crate::store::mvi::{Message, Reducer};
use crate::store::state::{AppState, Post, StoreError, User};

/// Every synchronous transition the store can apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetPosts(Vec<Post>),
    /// `None` mirrors an API that answers `null` when there is nothing to
    /// search for; it leaves the previous results in place.
    SetSearchResults(Option<Vec<Post>>),
    SetUser(Option<User>),
    SetUserPosts(Vec<Post>),
    SetLoading(bool),
    SetError(StoreError),
    ClearError,
    SetAuthError(StoreError),
    ClearSearchResults,
}

impl Mutation {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetPosts(_) => "setPosts",
            Mutation::SetSearchResults(_) => "setSearchResults",
            Mutation::SetUser(_) => "setUser",
            Mutation::SetUserPosts(_) => "setUserPosts",
            Mutation::SetLoading(_) => "setLoading",
            Mutation::SetError(_) => "setError",
            Mutation::ClearError => "clearError",
            Mutation::SetAuthError(_) => "setAuthError",
            Mutation::ClearSearchResults => "clearSearchResults",
        }
    }
}

impl Message for Mutation {}

pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Message = Mutation;

    fn reduce(mut state: Self::State, message: Self::Message) -> Self::State {
        match message {
            Mutation::SetPosts(posts) => state.posts = posts,
            Mutation::SetSearchResults(Some(results)) => state.search_results = results,
            Mutation::SetSearchResults(None) => {}
            Mutation::SetUser(user) => state.user = user,
            Mutation::SetUserPosts(posts) => state.user_posts = posts,
            Mutation::SetLoading(loading) => state.loading = loading,
            Mutation::SetError(error) => state.error = Some(error),
            Mutation::ClearError => state.error = None,
            Mutation::SetAuthError(error) => state.auth_error = Some(error),
            Mutation::ClearSearchResults => state.search_results = Vec::new(),
        }
        state
    }
}

/// Replaces the post with the same id, keeping its position.
///
/// Returns `None` when no post carries that id.
pub fn replace_post(posts: &[Post], updated: Post) -> Option<Vec<Post>> {
    let index = posts.iter().position(|post| post.id == updated.id)?;
    let mut next = posts.to_vec();
    next[index] = updated;
    Some(next)
}

/// Removes the post with the given id, keeping the order of the rest.
///
/// Returns `None` when no post carries that id.
pub fn remove_post(posts: &[Post], id: &str) -> Option<Vec<Post>> {
    let index = posts.iter().position(|post| post.id == id)?;
    let mut next = posts.to_vec();
    next.remove(index);
    Some(next)
}
