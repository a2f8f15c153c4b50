//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use quill_core::domain::{PostStatus, StatusFilter};

/// Quill post store operator CLI
#[derive(Parser, Debug)]
#[command(name = "seeder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run pending database migrations
    Migrate,

    /// Delete every post and load the two reference posts
    Reset {
        /// Also insert the hundred generated posts
        #[arg(long)]
        more: bool,
    },

    /// Insert the hundred generated posts
    SeedMore,

    /// List every post matching the filters
    Browse(FilterArgs),

    /// Show a single post
    Read {
        /// Post slug
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        slug: Option<String>,

        /// Post id
        #[arg(long)]
        id: Option<Uuid>,
    },

    /// Create a post (drafts unless --status is given)
    Add(AddArgs),

    /// Update fields of an existing post
    Edit(EditArgs),

    /// Delete a post
    Destroy {
        /// Post id
        id: Uuid,
    },

    /// Show one page of a listing
    Page(PageArgs),
}

/// Equality filters shared by listing commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only posts in this language
    #[arg(long)]
    pub language: Option<String>,

    /// Only featured (true) or non-featured (false) posts
    #[arg(long)]
    pub featured: Option<bool>,

    /// Only posts with this status
    #[arg(long, value_parser = parse_status)]
    pub status: Option<PostStatus>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Post title
    pub title: String,

    /// Post body
    #[arg(long)]
    pub content: Option<String>,

    /// Explicit slug; derived from the title when omitted
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<PostStatus>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub featured: Option<bool>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Post id
    pub id: Uuid,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<PostStatus>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub featured: Option<bool>,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = quill_core::domain::DEFAULT_PAGE)]
    pub page: u64,

    /// Posts per page
    #[arg(long, default_value_t = quill_core::domain::DEFAULT_LIMIT)]
    pub limit: u64,

    /// Only posts in this language
    #[arg(long)]
    pub language: Option<String>,

    /// Only featured (true) or non-featured (false) posts
    #[arg(long)]
    pub featured: Option<bool>,

    /// Status restriction: "published" (default), "draft" or "all"
    #[arg(long, default_value = "published", value_parser = parse_status_filter)]
    pub status: StatusFilter,
}

fn parse_status(s: &str) -> Result<PostStatus, String> {
    s.parse().map_err(|e: quill_core::DomainError| e.to_string())
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    s.parse().map_err(|e: quill_core::DomainError| e.to_string())
}
