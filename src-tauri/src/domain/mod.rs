//! Domain Layer
//!
//! Contains all domain entities and core abstractions.

mod entity;
mod food;

pub use entity::{DomainError, DomainResult, Entity};
pub use food::Food;
#[cfg(test)]
pub use food::{Category, Ingredient};
