use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Generic repository trait defining the entity-agnostic storage operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Return every stored entity. Order is unspecified.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Return any single stored entity.
    async fn find_one(&self) -> Result<Option<T>, RepoError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;

    /// Remove every entity from the collection.
    async fn drop_all(&self) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Persist a new post. Storage assigns `id` and `created_at`.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update to an existing post and return the result.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;
}
