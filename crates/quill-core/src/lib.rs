//! # Quill Core
//!
//! The domain layer of the Quill post store.
//! This crate contains the post model, its defaults and pagination rules, with
//! zero infrastructure dependencies. Storage is reached through the traits in
//! [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
