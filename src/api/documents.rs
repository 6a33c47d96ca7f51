//! GraphQL operations used by the store.

/// A named GraphQL operation.
///
/// The name doubles as the response's root field and as the cache key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Document {
    pub name: &'static str,
    pub source: &'static str,
}

pub const GET_CURRENT_USER: Document = Document {
    name: "getCurrentUser",
    source: r#"query {
  getCurrentUser {
    _id
    username
    email
    password
    avatar
    joinDate
    favorites {
      _id
      title
      imageUrl
    }
  }
}"#,
};

pub const GET_POSTS: Document = Document {
    name: "getPosts",
    source: r#"query {
  getPosts {
    _id
    title
    imageUrl
    description
    likes
  }
}"#,
};

pub const GET_USER_POSTS: Document = Document {
    name: "getUserPosts",
    source: r#"query($userId: ID!) {
  getUserPosts(userId: $userId) {
    _id
    title
    imageUrl
    description
    categories
    createdDate
    likes
  }
}"#,
};

pub const SEARCH_POSTS: Document = Document {
    name: "searchPosts",
    source: r#"query($searchTerm: String) {
  searchPosts(searchTerm: $searchTerm) {
    _id
    title
    description
    imageUrl
    likes
  }
}"#,
};

pub const ADD_POST: Document = Document {
    name: "addPost",
    source: r#"mutation(
  $title: String!
  $imageUrl: String!
  $categories: [String]!
  $description: String!
  $creatorId: ID!
) {
  addPost(
    title: $title
    imageUrl: $imageUrl
    categories: $categories
    description: $description
    creatorId: $creatorId
  ) {
    _id
    title
    imageUrl
    categories
    description
  }
}"#,
};

pub const UPDATE_USER_POST: Document = Document {
    name: "updateUserPost",
    source: r#"mutation(
  $postId: ID!
  $userId: ID!
  $title: String!
  $imageUrl: String!
  $categories: [String]!
  $description: String!
) {
  updateUserPost(
    postId: $postId
    userId: $userId
    title: $title
    imageUrl: $imageUrl
    categories: $categories
    description: $description
  ) {
    _id
    title
    imageUrl
    description
    categories
    createdDate
    likes
    createdBy {
      _id
      avatar
    }
  }
}"#,
};

pub const DELETE_USER_POST: Document = Document {
    name: "deleteUserPost",
    source: r#"mutation($postId: ID!) {
  deleteUserPost(postId: $postId) {
    _id
  }
}"#,
};

pub const SIGNIN_USER: Document = Document {
    name: "signinUser",
    source: r#"mutation($email: String!, $password: String!) {
  signinUser(email: $email, password: $password) {
    token
  }
}"#,
};

pub const SIGNUP_USER: Document = Document {
    name: "signupUser",
    source: r#"mutation($username: String!, $email: String!, $password: String!) {
  signupUser(username: $username, email: $email, password: $password) {
    token
  }
}"#,
};
