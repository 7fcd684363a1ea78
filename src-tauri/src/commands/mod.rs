//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod food_cmd;
mod image_cmd;

pub use food_cmd::*;
pub use image_cmd::*;
