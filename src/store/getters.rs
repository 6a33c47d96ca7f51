//! Read-only views over [`AppState`].

use crate::store::state::{AppState, Post, StoreError, User};

/// The values views are allowed to read.
pub trait Getters {
    fn posts(&self) -> &[Post];
    fn user_posts(&self) -> &[Post];
    fn search_results(&self) -> &[Post];
    fn user(&self) -> Option<&User>;
    /// The current user's favorites, absent when signed out.
    fn user_favorites(&self) -> Option<&[Post]>;
    fn loading(&self) -> bool;
    fn error(&self) -> Option<&StoreError>;
    fn auth_error(&self) -> Option<&StoreError>;
}

impl Getters for AppState {
    fn posts(&self) -> &[Post] {
        &self.posts
    }

    fn user_posts(&self) -> &[Post] {
        &self.user_posts
    }

    fn search_results(&self) -> &[Post] {
        &self.search_results
    }

    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn user_favorites(&self) -> Option<&[Post]> {
        self.user.as_ref().map(|user| user.favorites.as_slice())
    }

    fn loading(&self) -> bool {
        self.loading
    }

    fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    fn auth_error(&self) -> Option<&StoreError> {
        self.auth_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn defaults_are_empty() {
        let state = AppState::default();
        assert!(state.posts().is_empty());
        assert!(state.user_posts().is_empty());
        assert!(state.search_results().is_empty());
        assert!(state.user().is_none());
        assert!(!state.loading());
        assert!(state.error().is_none());
        assert!(state.auth_error().is_none());
    }

    #[test]
    fn user_favorites_follows_user() {
        let mut state = AppState::default();
        assert!(state.user_favorites().is_none());

        state.user = Some(User {
            id: "u1".to_string(),
            favorites: vec![Post::new("p1")],
            profile: Map::new(),
        });
        let favorites = state.user_favorites().expect("signed in");
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "p1");
    }
}
