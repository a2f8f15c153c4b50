use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Language assigned to posts created without one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 150;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!(
                "unknown post status '{}'",
                other
            ))),
        }
    }
}

/// Post entity - a blog post with its publication metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: PostStatus,
    pub language: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Build a new post from a validated creation request and its final slug.
    pub fn create(new: NewPost, slug: String) -> Self {
        let now = Utc::now();
        let status = new.status.unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            slug,
            content: new.content.unwrap_or_default(),
            status,
            language: new
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            featured: new.featured.unwrap_or(false),
            created_at: now,
            updated_at: now,
            published_at: status.is_published().then_some(now),
        }
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }
}

/// Unique keys a single post can be read by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostKey {
    Id(Uuid),
    Slug(String),
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostKey::Id(id) => write!(f, "id {}", id),
            PostKey::Slug(slug) => write!(f, "slug '{}'", slug),
        }
    }
}

/// Request to create a post. Only `title` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub status: Option<PostStatus>,
    pub language: Option<String>,
    pub featured: Option<bool>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Check required fields and formats before anything is written.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)?;
        if let Some(language) = &self.language {
            validate_language(language)?;
        }
        Ok(())
    }
}

/// Partial update of a post. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub status: Option<PostStatus>,
    pub language: Option<String>,
    pub featured: Option<bool>,
}

impl PostPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.slug.is_none()
            && self.status.is_none()
            && self.language.is_none()
            && self.featured.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(slug) = &self.slug {
            super::slug::validate_slug(slug)?;
        }
        if let Some(language) = &self.language {
            validate_language(language)?;
        }
        Ok(())
    }

    /// Apply the patch in place and bump `updated_at`.
    ///
    /// The slug is only replaced when the patch carries one; a new title never
    /// re-derives it.
    pub fn apply(self, post: &mut Post) {
        let now = Utc::now();

        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(status) = self.status {
            if status.is_published() && post.published_at.is_none() {
                post.published_at = Some(now);
            }
            post.status = status;
        }
        if let Some(language) = self.language {
            post.language = language;
        }
        if let Some(featured) = self.featured {
            post.featured = featured;
        }

        post.updated_at = now;
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_language(language: &str) -> Result<(), DomainError> {
    let valid = !language.is_empty()
        && language.len() <= 10
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "invalid language tag '{}'",
            language
        )))
    }
}
