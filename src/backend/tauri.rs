//! Tauri IPC backend

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use super::{ErrorHandler, MenuBackend, SnapshotHandler, Subscription};
use crate::commands;
use crate::error::{AppError, AppResult};
use crate::image::EncodedImage;
use crate::models::FoodItem;

/// Whether the desktop shell injected its global API
pub fn is_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__"))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

/// Decides whether the one-off initial listing may still be delivered.
/// Any live event is newer than it, and nothing reaches a released view.
#[derive(Clone, Default)]
struct InitialLoadGate {
    event_seen: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl InitialLoadGate {
    /// Wrap the live handler so events close the gate
    fn live(&self, on_snapshot: SnapshotHandler) -> SnapshotHandler {
        let gate = self.clone();
        Arc::new(move |snapshot| {
            gate.event_seen.store(true, Ordering::SeqCst);
            if !gate.released.load(Ordering::SeqCst) {
                on_snapshot(snapshot);
            }
        })
    }

    fn accepts_initial(&self) -> bool {
        !self.event_seen.load(Ordering::SeqCst) && !self.released.load(Ordering::SeqCst)
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[derive(Clone, Copy, Default)]
pub struct TauriBackend;

impl MenuBackend for TauriBackend {
    async fn create(&self, item: &FoodItem) -> AppResult<()> {
        commands::create_food(item).await.map_err(AppError::Store)
    }

    async fn update(&self, item: &FoodItem) -> AppResult<()> {
        commands::update_food(item).await.map_err(AppError::Store)
    }

    async fn set_availability(&self, id: &str, available: bool) -> AppResult<()> {
        commands::set_food_availability(id, available)
            .await
            .map_err(AppError::Store)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        commands::delete_food(id).await.map_err(AppError::Store)
    }

    async fn upload_image(&self, image: &EncodedImage) -> AppResult<String> {
        commands::upload_image(&image.name, &image.data_url)
            .await
            .map_err(AppError::Storage)
    }

    fn subscribe(&self, on_snapshot: SnapshotHandler, on_error: ErrorHandler) -> Subscription {
        let gate = InitialLoadGate::default();
        let listener = commands::listen_foods_changed(gate.live(on_snapshot.clone()));

        // Events only fire on change; fetch the current collection once
        {
            let gate = gate.clone();
            spawn_local(async move {
                let result = commands::list_foods().await;
                if !gate.accepts_initial() {
                    web_sys::console::log_1(&"[Backend] Dropping superseded initial listing".into());
                    return;
                }
                match result {
                    Ok(foods) => on_snapshot(foods),
                    Err(e) => on_error(AppError::Store(e)),
                }
            });
        }

        Subscription::new(move || {
            gate.release();
            drop(listener);
        })
    }
}
