//! Domain entities - the post model and its query types.

mod page;
mod post;
pub mod slug;

pub use page::{
    DEFAULT_LIMIT, DEFAULT_PAGE, FindPageOptions, MAX_LIMIT, PostFilter, PostPage, StatusFilter,
    listing_order,
};
pub use post::{DEFAULT_LANGUAGE, MAX_TITLE_LEN, NewPost, Post, PostKey, PostPatch, PostStatus};
