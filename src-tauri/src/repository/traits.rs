//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; fails with Conflict if the id is taken
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities in arrival order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace an existing entity; fails with NotFound if it is gone
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID; fails with NotFound if it is gone
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}
