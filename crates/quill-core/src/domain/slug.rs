//! Slug derivation and validation.
//!
//! A default slug is the post title, trimmed, lowercased, with every whitespace
//! character and `/` replaced by `-` and `?`/`#` dropped. It is derived once,
//! when the post is created, and always passes [`validate_slug`].

use crate::error::DomainError;

/// Longest accepted slug, in characters.
pub const MAX_SLUG_LEN: usize = 191;

/// Slug used when a title has nothing left after derivation.
pub const FALLBACK_SLUG: &str = "post";

// Headroom kept below MAX_SLUG_LEN for a `-n` collision suffix.
const SUFFIX_ROOM: usize = 12;

/// Derive the default slug for a title.
pub fn derive_slug(title: &str) -> String {
    let slug: String = title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            '?' | '#' => None,
            '/' => Some('-'),
            c if c.is_whitespace() => Some('-'),
            c if c.is_uppercase() => None,
            c => Some(c),
        })
        .take(MAX_SLUG_LEN - SUFFIX_ROOM)
        .collect();

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Candidate slug for the `n`th collision of `base` (`n >= 2`).
pub fn with_suffix(base: &str, n: u32) -> String {
    format!("{}-{}", base, n)
}

pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::Validation("slug must not be empty".to_string()));
    }
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(DomainError::Validation(format!(
            "slug must be at most {} characters",
            MAX_SLUG_LEN
        )));
    }
    if slug
        .chars()
        .any(|c| c.is_whitespace() || c.is_uppercase() || matches!(c, '/' | '?' | '#'))
    {
        return Err(DomainError::Validation(format!(
            "slug '{}' must be lowercase and URL-safe",
            slug
        )));
    }
    Ok(())
}
