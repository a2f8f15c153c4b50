use std::sync::Arc;

use quill_core::PostService;
use quill_infra::database::entity::post;
use quill_infra::{InMemoryPostRepository, SeaOrmPostRepository, fixtures};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, Schema};

/// SeaORM over a private in-memory SQLite database with the `posts` table.
pub async fn sqlite_posts() -> PostService {
    // A single connection keeps every query on the same in-memory database.
    let opts = ConnectOptions::new("sqlite::memory:")
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false)
        .to_owned();
    let db = Database::connect(opts).await.expect("sqlite connects");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(post::Entity)))
        .await
        .expect("posts table created");

    PostService::new(Arc::new(SeaOrmPostRepository::new(db)))
}

pub fn memory_posts() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

/// Both stores, each reset to the two reference posts.
pub async fn seeded() -> Vec<(&'static str, PostService)> {
    let stores = vec![("memory", memory_posts()), ("sqlite", sqlite_posts().await)];

    for (name, posts) in &stores {
        fixtures::reset(posts)
            .await
            .unwrap_or_else(|e| panic!("{name}: fixture reset failed: {e}"));
    }
    stores
}
