//! Menu Backend
//!
//! The capability the UI needs from persistence: mutate foods, store
//! photos, and push full-collection snapshots to a subscriber.

mod local;
mod tauri;

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::image::EncodedImage;
use crate::models::FoodItem;

pub use local::LocalBackend;
pub use tauri::TauriBackend;

/// Receives the complete food collection after every change
pub type SnapshotHandler = Arc<dyn Fn(Vec<FoodItem>) + Send + Sync>;

/// Receives failures of a subscription's initial load
pub type ErrorHandler = Arc<dyn Fn(AppError) + Send + Sync>;

pub trait MenuBackend {
    async fn create(&self, item: &FoodItem) -> AppResult<()>;
    async fn update(&self, item: &FoodItem) -> AppResult<()>;
    async fn set_availability(&self, id: &str, available: bool) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    /// Store a photo and return a URI usable directly as an image source
    async fn upload_image(&self, image: &EncodedImage) -> AppResult<String>;
    /// Start delivering snapshots. Delivery stops when the returned
    /// subscription is dropped.
    fn subscribe(&self, on_snapshot: SnapshotHandler, on_error: ErrorHandler) -> Subscription;
}

/// Live snapshot registration; releases itself exactly once on drop
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Backend chosen at startup
#[derive(Clone)]
pub enum Backend {
    Tauri(TauriBackend),
    Local(LocalBackend),
}

impl Backend {
    /// Tauri IPC when running inside the desktop shell, in-memory otherwise
    pub fn detect() -> Self {
        if tauri::is_available() {
            Backend::Tauri(TauriBackend)
        } else {
            Backend::Local(LocalBackend::new())
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Backend::Local(_))
    }
}

impl MenuBackend for Backend {
    async fn create(&self, item: &FoodItem) -> AppResult<()> {
        match self {
            Backend::Tauri(b) => b.create(item).await,
            Backend::Local(b) => b.create(item).await,
        }
    }

    async fn update(&self, item: &FoodItem) -> AppResult<()> {
        match self {
            Backend::Tauri(b) => b.update(item).await,
            Backend::Local(b) => b.update(item).await,
        }
    }

    async fn set_availability(&self, id: &str, available: bool) -> AppResult<()> {
        match self {
            Backend::Tauri(b) => b.set_availability(id, available).await,
            Backend::Local(b) => b.set_availability(id, available).await,
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        match self {
            Backend::Tauri(b) => b.delete(id).await,
            Backend::Local(b) => b.delete(id).await,
        }
    }

    async fn upload_image(&self, image: &EncodedImage) -> AppResult<String> {
        match self {
            Backend::Tauri(b) => b.upload_image(image).await,
            Backend::Local(b) => b.upload_image(image).await,
        }
    }

    fn subscribe(&self, on_snapshot: SnapshotHandler, on_error: ErrorHandler) -> Subscription {
        match self {
            Backend::Tauri(b) => b.subscribe(on_snapshot, on_error),
            Backend::Local(b) => b.subscribe(on_snapshot, on_error),
        }
    }
}
