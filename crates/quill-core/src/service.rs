//! Post model - the operations callers use to manage posts.
//!
//! Applies creation defaults (draft status, derived slug), validates input
//! before any write, and turns storage misses into `DomainError::NotFound`.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::slug::{derive_slug, validate_slug, with_suffix};
use crate::domain::{FindPageOptions, NewPost, Post, PostFilter, PostKey, PostPage, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Post operations over any [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn PostRepository> {
        &self.repo
    }

    /// List every post matching `filter`, newest first.
    pub async fn browse(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        tracing::debug!(?filter, "Browsing posts");
        Ok(self.repo.list(filter).await?)
    }

    /// Fetch exactly one post by id or slug.
    pub async fn read(&self, key: &PostKey) -> Result<Post, DomainError> {
        let found = match key {
            PostKey::Id(id) => self.repo.find_by_id(*id).await?,
            PostKey::Slug(slug) => self.repo.find_by_slug(slug).await?,
        };

        found.ok_or_else(|| DomainError::post_not_found(key))
    }

    /// Apply `patch` to the post with `id` and return the stored result.
    pub async fn edit(&self, id: Uuid, patch: PostPatch) -> Result<Post, DomainError> {
        patch.validate()?;

        let mut post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        if let Some(slug) = patch.slug.as_deref() {
            if slug != post.slug && self.repo.slug_exists(slug).await? {
                return Err(DomainError::Duplicate(format!(
                    "slug '{}' is already taken",
                    slug
                )));
            }
        }

        patch.apply(&mut post);

        let updated = self.repo.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %updated.id, "Post updated");
        Ok(updated)
    }

    /// Create a post, defaulting to a draft with a slug derived from the title.
    pub async fn add(&self, mut new: NewPost) -> Result<Post, DomainError> {
        new.validate()?;

        let slug = match new.slug.take() {
            Some(slug) => {
                validate_slug(&slug)?;
                if self.repo.slug_exists(&slug).await? {
                    return Err(DomainError::Duplicate(format!(
                        "slug '{}' is already taken",
                        slug
                    )));
                }
                slug
            }
            None => self.unique_slug(&derive_slug(&new.title)).await?,
        };

        let created = self.repo.insert(Post::create(new, slug)).await?;

        tracing::info!(
            post_id = %created.id,
            slug = %created.slug,
            status = %created.status,
            "Post created"
        );
        Ok(created)
    }

    /// Remove the post with `id`. Removing it again fails with `NotFound`.
    pub async fn destroy(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, "Post destroyed");
        Ok(())
    }

    /// Fetch one page of a filtered listing.
    pub async fn find_page(&self, options: &FindPageOptions) -> Result<PostPage, DomainError> {
        options.validate()?;

        let filter = options.effective_filter();

        if options.checked_offset().is_none() {
            let total = self.repo.count(&filter).await?;
            tracing::debug!(
                page = options.page,
                limit = options.limit,
                total,
                "Requested page lies past any result set"
            );
            return Ok(PostPage::new(Vec::new(), options.page, options.limit, total));
        }

        let (posts, total) = self
            .repo
            .find_page(&filter, options.page, options.limit)
            .await?;

        tracing::debug!(
            page = options.page,
            limit = options.limit,
            total,
            returned = posts.len(),
            "Fetched post page"
        );

        Ok(PostPage::new(posts, options.page, options.limit, total))
    }

    /// First free slug among `base`, `base-2`, `base-3`, ...
    async fn unique_slug(&self, base: &str) -> Result<String, DomainError> {
        if !self.repo.slug_exists(base).await? {
            return Ok(base.to_string());
        }

        let mut n = 2;
        loop {
            let candidate = with_suffix(base, n);
            if !self.repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::ports::BaseRepository;

    /// Repository that holds nothing and counts every call made to it.
    #[derive(Default)]
    struct EmptyRepo {
        calls: AtomicUsize,
    }

    impl EmptyRepo {
        fn touch(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for EmptyRepo {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            self.touch();
            Ok(None)
        }

        async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
            self.touch();
            Ok(entity)
        }

        async fn update(&self, _entity: Post) -> Result<Post, RepoError> {
            self.touch();
            Err(RepoError::NotFound)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            self.touch();
            Err(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepository for EmptyRepo {
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
            self.touch();
            Ok(None)
        }

        async fn count(&self, _filter: &PostFilter) -> Result<u64, RepoError> {
            self.touch();
            Ok(0)
        }

        async fn list(&self, _filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
            self.touch();
            Ok(Vec::new())
        }

        async fn find_page(
            &self,
            _filter: &PostFilter,
            _page: u64,
            _limit: u64,
        ) -> Result<(Vec<Post>, u64), RepoError> {
            self.touch();
            Ok((Vec::new(), 0))
        }

        async fn delete_all(&self) -> Result<u64, RepoError> {
            self.touch();
            Ok(0)
        }
    }

    fn service() -> (PostService, Arc<EmptyRepo>) {
        let repo = Arc::new(EmptyRepo::default());
        (PostService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_add_without_title_touches_nothing() {
        let (service, repo) = service();

        let err = service.add(NewPost::default()).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_defaults() {
        let (service, _) = service();

        let post = service
            .add(NewPost::new("Test Title 1", "Test Content 1"))
            .await
            .unwrap();

        assert_eq!(post.status, crate::domain::PostStatus::Draft);
        assert_eq!(post.slug, "test-title-1");
        assert_eq!(post.content, "Test Content 1");
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_explicit_slug() {
        let (service, repo) = service();

        let err = service
            .add(NewPost::new("Title", "").with_slug("Not Valid"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let (service, _) = service();
        let id = Uuid::new_v4();

        assert!(service.read(&PostKey::Id(id)).await.unwrap_err().is_not_found());
        assert!(
            service
                .read(&PostKey::Slug("nope".to_string()))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            service
                .edit(id, PostPatch::default().title("x"))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(service.destroy(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_page_rejects_zero_limit() {
        let (service, repo) = service();

        let err = service
            .find_page(&FindPageOptions::default().limit(0))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_find_page_unbindable_offset_only_counts() {
        let (service, repo) = service();

        let page = service
            .find_page(&FindPageOptions::default().page(u64::MAX))
            .await
            .unwrap();

        assert_eq!(page.page, u64::MAX);
        assert!(page.is_empty());
        // one count query, no page fetch
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_page_beyond_empty_store() {
        let (service, _) = service();

        let page = service
            .find_page(&FindPageOptions::default().page(3))
            .await
            .unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 15);
        assert_eq!(page.pages, 0);
        assert!(page.is_empty());
    }
}
