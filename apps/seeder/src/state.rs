//! Application state - the post model wired to its store.

use std::sync::Arc;

use quill_core::PostService;
use quill_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::SeaOrmPostRepository;
#[cfg(feature = "postgres")]
use quill_infra::database::connect;

/// Shared application state.
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<sea_orm::DbConn>,
}

impl AppState {
    /// Connect to the configured database, or fall back to the in-memory store.
    #[cfg(feature = "postgres")]
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        let conn = connect(config).await?;
        let posts = PostService::new(Arc::new(SeaOrmPostRepository::new(conn.clone())));

        tracing::info!("Application state initialized");
        Ok(Self {
            posts,
            db: Some(conn),
        })
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        if db_config.is_some() {
            tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Self::in_memory())
    }

    fn in_memory() -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostRepository::new())),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        #[cfg(feature = "postgres")]
        {
            self.db.is_some()
        }
        #[cfg(not(feature = "postgres"))]
        {
            false
        }
    }
}
