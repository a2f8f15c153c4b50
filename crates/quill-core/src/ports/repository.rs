use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostFilter};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` if no row matched.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// All posts matching `filter`, newest first.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// One page (1-based) of posts matching `filter`, plus the total number of
    /// matching posts across all pages.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Post>, u64), RepoError>;

    /// Remove every post, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}
