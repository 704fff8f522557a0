//! Persistence boundary for posts.
//!
//! The API service depends on the `PostStore` trait rather than a concrete
//! database handle, so tests can inject a fake store. `SeaOrmPostStore` is
//! the production implementation.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use thiserror::Error;

use models::post;

/// Single opaque error kind: connectivity and constraint violations are not
/// distinguished to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(String),
}

impl From<models::errors::ModelError> for StoreError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<post::Model>, StoreError>;

    /// Fields arrive unvalidated; a missing one surfaces as a store error
    /// from the NOT NULL constraint.
    async fn create(
        &self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<post::Model, StoreError>;
}

/// SeaORM-backed store implementation.
pub struct SeaOrmPostStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PostStore for SeaOrmPostStore {
    async fn find_all(&self) -> Result<Vec<post::Model>, StoreError> {
        Ok(post::find_all(&self.db).await?)
    }

    async fn create(
        &self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<post::Model, StoreError> {
        Ok(post::create(&self.db, title, content).await?)
    }
}
