use tracing::warn;

use crate::client::PostClient;
use crate::types::{DraftPost, Post};

/// Typed submission event emitted by the form component.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    DraftSubmitted(DraftPost),
}

/// In-memory post list, rebuilt from the server on every program start.
#[derive(Debug, Default)]
pub struct PostBoard {
    posts: Vec<Post>,
}

impl PostBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Initial fetch. A failed fetch leaves the current list untouched.
    pub async fn load(&mut self, client: &PostClient) {
        if let Some(posts) = client.fetch_posts().await {
            self.posts = posts;
        }
    }

    /// Successful creates are prepended (newest-first at the UI layer,
    /// independent of store order); failed ones are dropped with a log line.
    pub async fn handle(&mut self, client: &PostClient, event: BoardEvent) {
        match event {
            BoardEvent::DraftSubmitted(draft) => match client.create_post(&draft).await {
                Some(post) => self.posts.insert(0, post),
                None => warn!(title = %draft.title, "no response received; draft dropped"),
            },
        }
    }
}
