use serde::{Deserialize, Serialize};

/// A post as seen by the frontend. `id` is absent until the store assigns
/// one; `message` is a transient server acknowledgment, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub title: String,
    pub content: String,
}

/// Client-side post value without an assigned id, pending creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraftPost {
    pub title: String,
    pub content: String,
}
