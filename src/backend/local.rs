//! In-memory backend
//!
//! Used when the app runs outside the desktop shell and as the backend for
//! controller tests. Photos stay as data URLs.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{ErrorHandler, MenuBackend, SnapshotHandler, Subscription};
use crate::error::{AppError, AppResult};
use crate::image::EncodedImage;
use crate::models::FoodItem;

#[derive(Default)]
struct LocalState {
    foods: Vec<FoodItem>,
    listeners: Vec<(u64, SnapshotHandler)>,
    next_listener: u64,
}

#[derive(Clone, Default)]
pub struct LocalBackend {
    state: Arc<Mutex<LocalState>>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection
    pub fn with_foods(foods: Vec<FoodItem>) -> Self {
        let backend = Self::new();
        backend.lock().foods = foods;
        backend
    }

    #[cfg(test)]
    pub fn foods(&self) -> Vec<FoodItem> {
        self.lock().foods.clone()
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply a change, then deliver the new snapshot outside the lock
    fn mutate(&self, change: impl FnOnce(&mut Vec<FoodItem>) -> AppResult<()>) -> AppResult<()> {
        let (snapshot, listeners) = {
            let mut state = self.lock();
            change(&mut state.foods)?;
            let listeners: Vec<SnapshotHandler> =
                state.listeners.iter().map(|(_, l)| l.clone()).collect();
            (state.foods.clone(), listeners)
        };
        for listener in listeners {
            listener(snapshot.clone());
        }
        Ok(())
    }
}

fn not_found(id: &str) -> AppError {
    AppError::Store(format!("prato {} não encontrado", id))
}

impl MenuBackend for LocalBackend {
    async fn create(&self, item: &FoodItem) -> AppResult<()> {
        self.mutate(|foods| {
            if foods.iter().any(|f| f.id == item.id) {
                return Err(AppError::Store(format!("prato {} já existe", item.id)));
            }
            foods.push(item.clone());
            Ok(())
        })
    }

    async fn update(&self, item: &FoodItem) -> AppResult<()> {
        self.mutate(|foods| {
            let slot = foods
                .iter_mut()
                .find(|f| f.id == item.id)
                .ok_or_else(|| not_found(&item.id))?;
            *slot = item.clone();
            Ok(())
        })
    }

    async fn set_availability(&self, id: &str, available: bool) -> AppResult<()> {
        self.mutate(|foods| {
            let slot = foods
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| not_found(id))?;
            slot.available = available;
            Ok(())
        })
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.mutate(|foods| {
            let before = foods.len();
            foods.retain(|f| f.id != id);
            if foods.len() == before {
                return Err(not_found(id));
            }
            Ok(())
        })
    }

    async fn upload_image(&self, image: &EncodedImage) -> AppResult<String> {
        Ok(image.data_url.clone())
    }

    fn subscribe(&self, on_snapshot: SnapshotHandler, _on_error: ErrorHandler) -> Subscription {
        let (key, snapshot) = {
            let mut state = self.lock();
            let key = state.next_listener;
            state.next_listener += 1;
            state.listeners.push((key, on_snapshot.clone()));
            (key, state.foods.clone())
        };
        on_snapshot(snapshot);

        let state = self.state.clone();
        Subscription::new(move || {
            let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            state.listeners.retain(|(k, _)| *k != key);
        })
    }
}
