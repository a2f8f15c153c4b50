//! Post storage - SeaORM-backed and in-memory repositories.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod sea_orm_base;
#[cfg(feature = "postgres")]
pub mod post_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use post_repo::SeaOrmPostRepository;
#[cfg(feature = "postgres")]
pub use sea_orm_base::SeaOrmBaseRepository;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
