//! Typed actions and their payloads.
//!
//! Payloads serialize to the GraphQL variables of the operation the action
//! issues, so field names follow the API's camelCase.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPostsFilter {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_term: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub image_url: String,
    pub categories: Vec<String>,
    pub description: String,
    pub creator_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub post_id: String,
    pub user_id: String,
    pub title: String,
    pub image_url: String,
    pub categories: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRef {
    pub post_id: String,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"••••••••")
            .finish()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"••••••••")
            .finish()
    }
}

/// Everything a view can ask the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GetCurrentUser,
    GetPosts,
    GetUserPosts(UserPostsFilter),
    SearchPosts(SearchQuery),
    AddPost(NewPost),
    UpdateUserPost(PostUpdate),
    DeleteUserPost(PostRef),
    SigninUser(Credentials),
    SignupUser(Registration),
    SignoutUser,
}

impl Action {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::GetCurrentUser => "getCurrentUser",
            Action::GetPosts => "getPosts",
            Action::GetUserPosts(_) => "getUserPosts",
            Action::SearchPosts(_) => "searchPosts",
            Action::AddPost(_) => "addPost",
            Action::UpdateUserPost(_) => "updateUserPost",
            Action::DeleteUserPost(_) => "deleteUserPost",
            Action::SigninUser(_) => "signinUser",
            Action::SignupUser(_) => "signupUser",
            Action::SignoutUser => "signoutUser",
        }
    }
}
