//! SeaORM post repository.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use quill_core::domain::{Post, PostFilter};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::sea_orm_base::{SeaOrmBaseRepository, read_error, write_error};

/// SeaORM post repository (PostgreSQL in production, any SeaORM backend works).
pub type SeaOrmPostRepository = SeaOrmBaseRepository<PostEntity>;

fn filter_condition(filter: &PostFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = filter.status {
        cond = cond.add(post::Column::Status.eq(post::Status::from(status)));
    }
    if let Some(language) = &filter.language {
        cond = cond.add(post::Column::Language.eq(language.as_str()));
    }
    if let Some(featured) = filter.featured {
        cond = cond.add(post::Column::Featured.eq(featured));
    }
    cond
}

/// Filtered select in listing order: newest first, ties broken by id.
fn listing(filter: &PostFilter) -> Select<PostEntity> {
    PostEntity::find()
        .filter(filter_condition(filter))
        .order_by_desc(post::Column::CreatedAt)
        .order_by_asc(post::Column::Id)
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(result.map(Into::into))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .map_err(read_error)?;

        Ok(count > 0)
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .map_err(read_error)
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let result = listing(filter).all(&self.db).await.map_err(read_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let paginator = listing(filter).paginate(&self.db, limit);
        let total = paginator.num_items().await.map_err(read_error)?;
        let posts = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(read_error)?;

        Ok((posts.into_iter().map(Into::into).collect(), total))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        tracing::info!(deleted = result.rows_affected, "Deleted all posts");
        Ok(result.rows_affected)
    }
}
