//! Reference data set for local development and behavioral tests.
//!
//! [`reset`] leaves exactly two published English posts. [`insert_more_posts`]
//! adds a hundred generated posts on top, alternating English and French, half
//! of them published.

use quill_core::domain::{NewPost, Post, PostStatus};
use quill_core::{DomainError, PostService};

/// Number of posts added by [`insert_more_posts`].
pub const MORE_POSTS: usize = 100;

fn reference_posts() -> Vec<NewPost> {
    vec![
        NewPost::new(
            "Welcome to Quill",
            "You're live! Nice. This is your first published post.",
        )
        .with_status(PostStatus::Published)
        .with_featured(true),
        NewPost::new(
            "Writing Your First Post",
            "Posts start as drafts. Publish them when they are ready.",
        )
        .with_status(PostStatus::Published),
    ]
}

/// Delete every post and insert the two reference posts.
pub async fn reset(posts: &PostService) -> Result<Vec<Post>, DomainError> {
    let deleted = posts.repository().delete_all().await?;
    tracing::info!(deleted, "Post store cleared");

    let mut created = Vec::new();
    for new in reference_posts() {
        created.push(posts.add(new).await?);
    }
    Ok(created)
}

/// Language and status of the `i`th generated post.
pub fn generated_attributes(i: usize) -> (&'static str, PostStatus) {
    let language = if i % 2 == 1 { "fr" } else { "en" };
    let status = if i % 4 < 2 {
        PostStatus::Published
    } else {
        PostStatus::Draft
    };
    (language, status)
}

/// Insert [`MORE_POSTS`] generated posts, returning how many were created.
pub async fn insert_more_posts(posts: &PostService) -> Result<usize, DomainError> {
    for i in 0..MORE_POSTS {
        let (language, status) = generated_attributes(i);
        let new = NewPost::new(
            format!("Generated Post {}", i + 1),
            format!("Body of generated post number {}.", i + 1),
        )
        .with_language(language)
        .with_status(status);

        posts.add(new).await?;
    }

    tracing::info!(count = MORE_POSTS, "Inserted generated posts");
    Ok(MORE_POSTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_mix() {
        let attrs: Vec<_> = (0..MORE_POSTS).map(generated_attributes).collect();

        let published = attrs.iter().filter(|(_, s)| s.is_published()).count();
        let published_fr = attrs
            .iter()
            .filter(|(l, s)| *l == "fr" && s.is_published())
            .count();
        let fr = attrs.iter().filter(|(l, _)| *l == "fr").count();

        assert_eq!(published, 50);
        assert_eq!(published_fr, 25);
        assert_eq!(fr, 50);
    }
}
