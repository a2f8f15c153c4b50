//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostFilter, listing_order};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Enforces the same id and slug uniqueness as the `posts` table.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn slug_taken(store: &HashMap<Uuid, Post>, slug: &str, except: Option<Uuid>) -> bool {
        store
            .values()
            .any(|p| p.slug == slug && Some(p.id) != except)
    }

    fn matching(store: &HashMap<Uuid, Post>, filter: &PostFilter) -> Vec<Post> {
        let mut posts: Vec<Post> = store
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        posts.sort_by(listing_order);
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!(
                "duplicate post id {}",
                post.id
            )));
        }
        if Self::slug_taken(&store, &post.slug, None) {
            return Err(RepoError::Constraint(format!(
                "unique slug '{}' already exists",
                post.slug
            )));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        if Self::slug_taken(&store, &post.slug, Some(post.id)) {
            return Err(RepoError::Constraint(format!(
                "unique slug '{}' already exists",
                post.slug
            )));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|p| p.slug == slug).cloned())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(Self::matching(&store, filter))
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let store = self.store.read().await;
        let matching = Self::matching(&store, filter);
        let total = matching.len() as u64;

        let offset = page.saturating_sub(1).saturating_mul(limit);
        let posts = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();

        Ok((posts, total))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let deleted = store.len() as u64;
        store.clear();
        Ok(deleted)
    }
}
