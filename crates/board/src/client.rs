use reqwest::header::ACCEPT;
use tracing::warn;

use crate::types::{DraftPost, Post};

/// Thin wrapper over the two API endpoints. Failures never propagate to the
/// caller: they are logged and collapse into `None`.
#[derive(Clone, Debug)]
pub struct PostClient {
    base_url: String,
    http: reqwest::Client,
}

impl PostClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn fetch_posts(&self) -> Option<Vec<Post>> {
        match self.get_posts().await {
            Ok(posts) => Some(posts),
            Err(e) => {
                warn!(error = %e, "error fetching posts");
                None
            }
        }
    }

    pub async fn create_post(&self, draft: &DraftPost) -> Option<Post> {
        match self.post_draft(draft).await {
            Ok(post) => Some(post),
            Err(e) => {
                warn!(error = %e, "error creating post");
                None
            }
        }
    }

    async fn get_posts(&self) -> Result<Vec<Post>, reqwest::Error> {
        self.http
            .get(format!("{}/api/posts", self.base_url))
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn post_draft(&self, draft: &DraftPost) -> Result<Post, reqwest::Error> {
        self.http
            .post(format!("{}/api/posts", self.base_url))
            .header(ACCEPT, "application/json")
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
