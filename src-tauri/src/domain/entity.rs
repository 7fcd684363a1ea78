//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(format!("Bad document: {}", e))
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
