//! Repository Layer
//!
//! Data access abstractions and implementations.

mod blob_store;
mod db;
mod food_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use blob_store::BlobStore;
pub use db::{init_db, DbConn};
pub use food_repo::FoodRepository;
pub use traits::Repository;
