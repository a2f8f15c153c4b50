use crate::database::entity::post;
use crate::database::post_repo::SeaOrmPostRepository;
use quill_core::domain::{NewPost, Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

fn model(title: &str, slug: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: uuid::Uuid::new_v4(),
        title: title.to_owned(),
        slug: slug.to_owned(),
        content: "Content".to_owned(),
        status: post::Status::Published,
        language: "en".to_owned(),
        featured: false,
        created_at: now.into(),
        updated_at: now.into(),
        published_at: Some(now.into()),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post", "test-post");
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_find_post_by_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("Hello World", "hello-world")]])
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let found = repo.find_by_slug("hello-world").await.unwrap();
    assert_eq!(found.map(|p| p.title).as_deref(), Some("Hello World"));

    let missing = repo.find_by_slug("nope").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_insert_returns_stored_post() {
    let new = Post::create(NewPost::new("Fresh", "Body"), "fresh".to_string());
    let mut row = model("Fresh", "fresh");
    row.id = new.id;
    row.status = post::Status::Draft;
    row.published_at = None;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);
    let saved = repo.insert(new.clone()).await.unwrap();

    assert_eq!(saved.id, new.id);
    assert_eq!(saved.slug, "fresh");
    assert_eq!(saved.status, PostStatus::Draft);
}

#[tokio::test]
async fn test_delete_reports_missing_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);
    let id = uuid::Uuid::new_v4();

    BaseRepository::<Post, uuid::Uuid>::delete(&repo, id).await.unwrap();
    assert!(matches!(BaseRepository::<Post, uuid::Uuid>::delete(&repo, id).await, Err(RepoError::NotFound)));
}
