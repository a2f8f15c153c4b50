//! `migration` binary: SeaORM's migrator CLI over the `posts` schema.
//!
//! `migration up`, `migration down`, `migration status`, ... against the
//! database named by `DATABASE_URL` (read from the environment or `.env`).

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if std::env::var_os("DATABASE_URL").is_none() {
        tracing::warn!("DATABASE_URL is not set; pass --database-url to target the posts database");
    }

    cli::run_cli(migration::Migrator).await;
}
