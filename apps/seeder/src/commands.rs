//! Command implementations. Results are printed to stdout as JSON.

use anyhow::Context;
use serde::Serialize;

use quill_core::domain::{FindPageOptions, NewPost, PostFilter, PostKey, PostPatch};
use quill_infra::fixtures;

use crate::args::{AddArgs, Commands, EditArgs, FilterArgs, PageArgs};
use crate::state::AppState;

/// Run a single command against the application state.
pub async fn execute(command: Commands, state: &AppState) -> anyhow::Result<()> {
    if !state.is_persistent() {
        tracing::warn!("In-memory store: changes are discarded when the command exits");
    }

    let posts = &state.posts;

    match command {
        Commands::Migrate => migrate(state).await,
        Commands::Reset { more } => {
            let created = fixtures::reset(posts).await?;
            let mut count = created.len();
            if more {
                count += fixtures::insert_more_posts(posts).await?;
            }
            print_json(&serde_json::json!({ "inserted": count }))
        }
        Commands::SeedMore => {
            let count = fixtures::insert_more_posts(posts).await?;
            print_json(&serde_json::json!({ "inserted": count }))
        }
        Commands::Browse(filter) => {
            let results = posts.browse(&filter_from(filter)).await?;
            print_json(&results)
        }
        Commands::Read { slug, id } => {
            let key = match (slug, id) {
                (Some(slug), _) => PostKey::Slug(slug),
                (None, Some(id)) => PostKey::Id(id),
                (None, None) => anyhow::bail!("either --slug or --id is required"),
            };
            print_json(&posts.read(&key).await?)
        }
        Commands::Add(args) => print_json(&posts.add(new_post_from(args)).await?),
        Commands::Edit(args) => {
            let id = args.id;
            let patch = patch_from(args);
            if patch.is_empty() {
                anyhow::bail!("nothing to change for post {}", id);
            }
            print_json(&posts.edit(id, patch).await?)
        }
        Commands::Destroy { id } => {
            posts.destroy(id).await?;
            print_json(&serde_json::json!({ "destroyed": id }))
        }
        Commands::Page(args) => print_json(&posts.find_page(&page_options_from(args)).await?),
    }
}

#[cfg(feature = "postgres")]
async fn migrate(state: &AppState) -> anyhow::Result<()> {
    use migration::{Migrator, MigratorTrait};

    let db = state
        .db
        .as_ref()
        .context("DATABASE_URL must be set to run migrations")?;

    Migrator::up(db, None)
        .await
        .context("applying migrations")?;
    tracing::info!("Migrations applied");
    Ok(())
}

#[cfg(not(feature = "postgres"))]
async fn migrate(_state: &AppState) -> anyhow::Result<()> {
    anyhow::bail!("built without the postgres feature; nothing to migrate")
}

fn filter_from(args: FilterArgs) -> PostFilter {
    PostFilter {
        status: args.status,
        language: args.language,
        featured: args.featured,
    }
}

fn new_post_from(args: AddArgs) -> NewPost {
    NewPost {
        title: args.title,
        content: args.content,
        slug: args.slug,
        status: args.status,
        language: args.language,
        featured: args.featured,
    }
}

fn patch_from(args: EditArgs) -> PostPatch {
    PostPatch {
        title: args.title,
        content: args.content,
        slug: args.slug,
        status: args.status,
        language: args.language,
        featured: args.featured,
    }
}

fn page_options_from(args: PageArgs) -> FindPageOptions {
    FindPageOptions {
        page: args.page,
        limit: args.limit,
        filter: PostFilter {
            status: None,
            language: args.language,
            featured: args.featured,
        },
        status: args.status,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("rendering output")?;
    println!("{}", rendered);
    Ok(())
}
