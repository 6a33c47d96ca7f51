//! Command-line front end over the store.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::store::{
    Action, AppState, Credentials, Getters, NewPost, PostRef, PostUpdate, Registration,
    SearchQuery, UserPostsFilter,
};

#[derive(Debug, Parser)]
#[command(name = "postboard", version, about = "Browse and share posts from the terminal")]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the GraphQL endpoint from config
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct PostFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub image_url: String,
    /// May be repeated
    #[arg(long = "category", required = true)]
    pub categories: Vec<String>,
    #[arg(long)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Show the signed-in user
    Whoami,
    /// List the post feed
    Posts,
    /// List the posts created by a user
    UserPosts { user_id: String },
    /// Search posts
    Search { term: String },
    /// Share a new post
    Add {
        #[command(flatten)]
        fields: PostFields,
        #[arg(long)]
        creator_id: String,
    },
    /// Edit one of a user's posts
    Update {
        post_id: String,
        #[arg(long)]
        user_id: String,
        #[command(flatten)]
        fields: PostFields,
    },
    /// Delete one of a user's posts
    Delete {
        post_id: String,
        #[arg(long)]
        user_id: String,
    },
    /// Sign in and store the session token
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the session token
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the session token
    Signout,
}

impl Command {
    /// Actions to dispatch, in order.
    ///
    /// Edits load the user's posts first so the result can be spliced into
    /// them; `add` reads the feed before and after so the new post shows up
    /// through the cache.
    pub fn actions(&self) -> Vec<Action> {
        match self {
            Command::Whoami => vec![Action::GetCurrentUser],
            Command::Posts => vec![Action::GetPosts],
            Command::UserPosts { user_id } => vec![user_posts(user_id)],
            Command::Search { term } => vec![Action::SearchPosts(SearchQuery {
                search_term: term.clone(),
            })],
            Command::Add { fields, creator_id } => vec![
                Action::GetPosts,
                Action::AddPost(NewPost {
                    title: fields.title.clone(),
                    image_url: fields.image_url.clone(),
                    categories: fields.categories.clone(),
                    description: fields.description.clone(),
                    creator_id: creator_id.clone(),
                }),
                Action::GetPosts,
            ],
            Command::Update {
                post_id,
                user_id,
                fields,
            } => vec![
                user_posts(user_id),
                Action::UpdateUserPost(PostUpdate {
                    post_id: post_id.clone(),
                    user_id: user_id.clone(),
                    title: fields.title.clone(),
                    image_url: fields.image_url.clone(),
                    categories: fields.categories.clone(),
                    description: fields.description.clone(),
                }),
            ],
            Command::Delete { post_id, user_id } => vec![
                user_posts(user_id),
                Action::DeleteUserPost(PostRef {
                    post_id: post_id.clone(),
                }),
            ],
            Command::Signin { email, password } => vec![Action::SigninUser(Credentials {
                email: email.clone(),
                password: password.clone(),
            })],
            Command::Signup {
                username,
                email,
                password,
            } => vec![Action::SignupUser(Registration {
                username: username.clone(),
                email: email.clone(),
                password: password.clone(),
            })],
            Command::Signout => vec![Action::SignoutUser],
        }
    }

    /// The part of the state this command prints.
    pub fn view(&self, state: &AppState) -> Result<Value, serde_json::Error> {
        match self {
            Command::Posts | Command::Add { .. } => serde_json::to_value(state.posts()),
            Command::UserPosts { .. } | Command::Update { .. } | Command::Delete { .. } => {
                serde_json::to_value(state.user_posts())
            }
            Command::Search { .. } => serde_json::to_value(state.search_results()),
            Command::Whoami | Command::Signin { .. } | Command::Signup { .. } | Command::Signout => {
                serde_json::to_value(state.user())
            }
        }
    }
}

fn user_posts(user_id: &str) -> Action {
    Action::GetUserPosts(UserPostsFilter {
        user_id: user_id.to_string(),
    })
}
