//! Application state container.
//!
//! [`Store`] owns the [`AppState`] tree. State changes only through
//! [`Mutation`]s applied by [`AppReducer`]; [`Action`]s orchestrate one API
//! call each and commit mutations based on the outcome. Views read through
//! [`Getters`] on a snapshot.
//!
//! Failures never escape an action. Read-only fetches are logged; write
//! operations with a user-facing outcome (add post, sign in, sign up) are
//! logged and also committed to `error`.

pub mod action;
pub mod getters;
pub mod mutation;
pub mod mvi;
pub mod state;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::documents::{
    ADD_POST, DELETE_USER_POST, GET_CURRENT_USER, GET_POSTS, GET_USER_POSTS, SEARCH_POSTS,
    SIGNIN_USER, SIGNUP_USER, UPDATE_USER_POST,
};
use crate::api::{ApiClient, ApiError, CacheTransaction, Document, MutationRequest, QueryRequest};
use crate::navigation::{Navigator, HOME_PATH};
use crate::storage::{TokenStorage, TOKEN_KEY};
use self::mvi::Reducer;

pub use action::{
    Action, Credentials, NewPost, PostRef, PostUpdate, Registration, SearchQuery, UserPostsFilter,
};
pub use getters::Getters;
pub use mutation::{remove_post, replace_post, AppReducer, Mutation};
pub use state::{AppState, ErrorKind, Post, StoreError, User, PROVISIONAL_POST_ID};

#[derive(Debug, Deserialize)]
struct SessionToken {
    token: String,
}

/// Handle to the application state and its collaborators.
///
/// Cloning is cheap and every clone shares the same state. Construct one at
/// the application root and hand clones to consumers.
#[derive(Clone)]
pub struct Store {
    state: Arc<parking_lot::Mutex<AppState>>,
    api: Arc<dyn ApiClient>,
    storage: Arc<dyn TokenStorage>,
    navigator: Arc<dyn Navigator>,
}

impl Store {
    pub fn new(
        api: Arc<dyn ApiClient>,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            state: Arc::new(parking_lot::Mutex::new(AppState::default())),
            api,
            storage,
            navigator,
        }
    }

    /// Apply one mutation synchronously.
    pub fn commit(&self, mutation: Mutation) {
        tracing::trace!(mutation = mutation.name(), "Commit");
        let mut state = self.state.lock();
        *state = AppReducer::reduce(std::mem::take(&mut *state), mutation);
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    /// Read from the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Run an action to completion.
    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.name(), "Dispatch");
        match action {
            Action::GetCurrentUser => self.get_current_user().await,
            Action::GetPosts => self.get_posts().await,
            Action::GetUserPosts(filter) => self.get_user_posts(filter).await,
            Action::SearchPosts(query) => self.search_posts(query).await,
            Action::AddPost(post) => self.add_post(post).await,
            Action::UpdateUserPost(update) => self.update_user_post(update).await,
            Action::DeleteUserPost(post) => self.delete_user_post(post).await,
            Action::SigninUser(credentials) => {
                self.authenticate("signinUser", SIGNIN_USER, &credentials)
                    .await
            }
            Action::SignupUser(registration) => {
                self.authenticate("signupUser", SIGNUP_USER, &registration)
                    .await
            }
            Action::SignoutUser => self.signout_user().await,
        }
    }

    /// Sets `loading` and resets it when the returned guard drops.
    fn begin_loading(&self) -> scopeguard::ScopeGuard<Store, impl FnOnce(Store)> {
        self.commit(Mutation::SetLoading(true));
        scopeguard::guard(self.clone(), |store| {
            store.commit(Mutation::SetLoading(false))
        })
    }

    async fn get_current_user(&self) {
        let _loading = self.begin_loading();
        match self
            .query_with::<Option<User>, _>(GET_CURRENT_USER, &Value::Null)
            .await
        {
            Ok(user) => self.commit(Mutation::SetUser(user)),
            Err(e) => report_failure("getCurrentUser", &e),
        }
    }

    async fn get_posts(&self) {
        let _loading = self.begin_loading();
        match self.query_with::<Vec<Post>, _>(GET_POSTS, &Value::Null).await {
            Ok(posts) => self.commit(Mutation::SetPosts(posts)),
            Err(e) => report_failure("getPosts", &e),
        }
    }

    async fn get_user_posts(&self, filter: UserPostsFilter) {
        match self.query_with::<Vec<Post>, _>(GET_USER_POSTS, &filter).await {
            Ok(posts) => self.commit(Mutation::SetUserPosts(posts)),
            Err(e) => report_failure("getUserPosts", &e),
        }
    }

    async fn search_posts(&self, query: SearchQuery) {
        match self
            .query_with::<Option<Vec<Post>>, _>(SEARCH_POSTS, &query)
            .await
        {
            Ok(results) => self.commit(Mutation::SetSearchResults(results)),
            Err(e) => report_failure("searchPosts", &e),
        }
    }

    async fn add_post(&self, post: NewPost) {
        self.commit(Mutation::ClearError);
        let _loading = self.begin_loading();
        if let Err(e) = self.try_add_post(&post).await {
            self.fail_mutation("addPost", &e);
        }
    }

    async fn try_add_post(&self, post: &NewPost) -> Result<(), ApiError> {
        let variables = serde_json::to_value(post)?;
        let request = MutationRequest::new(ADD_POST, variables.clone())
            .with_update(Arc::new(prepend_to_feed))
            .with_optimistic_response(optimistic_post(&variables));
        self.api.mutate(request).await?;
        Ok(())
    }

    async fn update_user_post(&self, update: PostUpdate) {
        let updated = match self.mutate_with::<Post, _>(UPDATE_USER_POST, &update).await {
            Ok(updated) => updated,
            Err(e) => return report_failure("updateUserPost", &e),
        };

        let id = updated.id.clone();
        match self.read(|state| replace_post(&state.user_posts, updated)) {
            Some(next) => self.commit(Mutation::SetUserPosts(next)),
            None => tracing::warn!(post_id = %id, "Updated post is not among the user's posts"),
        }
    }

    async fn delete_user_post(&self, post: PostRef) {
        let deleted = match self.mutate_with::<Post, _>(DELETE_USER_POST, &post).await {
            Ok(deleted) => deleted,
            Err(e) => return report_failure("deleteUserPost", &e),
        };

        match self.read(|state| remove_post(&state.user_posts, &deleted.id)) {
            Some(next) => self.commit(Mutation::SetUserPosts(next)),
            None => {
                tracing::warn!(post_id = %deleted.id, "Deleted post is not among the user's posts")
            }
        }
    }

    /// Shared flow of sign-in and sign-up: both answer with a session token.
    async fn authenticate<V: Serialize + Sync>(
        &self,
        action: &'static str,
        document: Document,
        variables: &V,
    ) {
        self.commit(Mutation::ClearError);
        let loading = self.begin_loading();
        let result = self.mutate_with::<SessionToken, _>(document, variables).await;
        drop(loading);

        let persisted = result.and_then(|session| {
            self.storage
                .set_item(TOKEN_KEY, &session.token)
                .map_err(ApiError::from)
        });
        if let Err(e) = persisted {
            return self.fail_mutation(action, &e);
        }

        // The reload starts from an empty cache so the reloaded view re-fetches
        // session-dependent data with the new token.
        if let Err(e) = self.api.reset_store().await {
            report_failure(action, &e);
        }
        self.navigator.go();
    }

    async fn signout_user(&self) {
        self.commit(Mutation::SetUser(None));
        if let Err(e) = self.storage.set_item(TOKEN_KEY, "") {
            tracing::warn!("Failed to clear session token: {}", e);
        }
        if let Err(e) = self.api.reset_store().await {
            report_failure("signoutUser", &e);
        }
        self.navigator.push(HOME_PATH);
    }

    async fn query_with<T: DeserializeOwned, V: Serialize + Sync>(
        &self,
        document: Document,
        variables: &V,
    ) -> Result<T, ApiError> {
        let request = QueryRequest::new(document).with_variables(serde_json::to_value(variables)?);
        let data = self.api.query(request).await?;
        take_field(data, &document)
    }

    async fn mutate_with<T: DeserializeOwned, V: Serialize + Sync>(
        &self,
        document: Document,
        variables: &V,
    ) -> Result<T, ApiError> {
        let request = MutationRequest::new(document, serde_json::to_value(variables)?);
        let data = self.api.mutate(request).await?;
        take_field(data, &document)
    }

    fn fail_mutation(&self, action: &'static str, err: &ApiError) {
        report_failure(action, err);
        self.commit(Mutation::SetError(StoreError::from(err)));
    }
}

fn report_failure(action: &'static str, err: &ApiError) {
    tracing::error!(action, error_type = err.error_type(), "{}", err);
}

/// Extract and decode the operation's root field from response data.
fn take_field<T: DeserializeOwned>(mut data: Value, document: &Document) -> Result<T, ApiError> {
    let field = data
        .get_mut(document.name)
        .map(Value::take)
        .ok_or_else(|| ApiError::MissingField {
            field: document.name.to_string(),
        })?;
    Ok(serde_json::from_value(field)?)
}

/// Provisional response for `addPost`: the submitted fields tagged as a post
/// with the sentinel id.
fn optimistic_post(variables: &Value) -> Value {
    let mut post = variables.as_object().cloned().unwrap_or_default();
    post.insert("__typename".to_string(), Value::from("Post"));
    post.insert("_id".to_string(), Value::from(PROVISIONAL_POST_ID));

    let mut response = Map::new();
    response.insert("__typename".to_string(), Value::from("Mutation"));
    response.insert(ADD_POST.name.to_string(), Value::Object(post));
    Value::Object(response)
}

/// Cache hook for `addPost`: prepend the new post to the cached feed.
fn prepend_to_feed(tx: &mut CacheTransaction<'_>, data: &Value) -> Result<(), ApiError> {
    let added = data
        .get(ADD_POST.name)
        .cloned()
        .ok_or_else(|| ApiError::MissingField {
            field: ADD_POST.name.to_string(),
        })?;

    let Some(mut feed) = tx.read_query(&GET_POSTS, &Value::Null) else {
        tracing::debug!("Feed not cached yet, nothing to prepend");
        return Ok(());
    };

    let posts = feed
        .get_mut(GET_POSTS.name)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| ApiError::Cache(format!("cached {} is not a list", GET_POSTS.name)))?;
    posts.insert(0, added);
    tx.write_query(&GET_POSTS, &Value::Null, feed);
    Ok(())
}
