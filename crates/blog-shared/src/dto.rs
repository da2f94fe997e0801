//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are `Option`s so that a missing field can be reported by
//! name instead of as a generic deserialization failure.

use serde::{Deserialize, Serialize};

/// Author fields as they appear in request bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request to create a post.
///
/// `POST /posts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
}

/// Request to update a post. Only the supplied fields are changed.
///
/// `PUT /posts/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    /// Must match the path id when present.
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub first_name: String,
    pub last_name: String,
}

/// Public representation of a stored post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: AuthorResponse,
    pub created_at: String,
}

/// Confirmation payload for a deleted post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPost {
    pub id: String,
}
