//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::controller::FoodList;
use crate::editor::FoodEditor;
use crate::models::FoodItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient message shown in the corner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Visible foods, pending writes and modal state
    pub menu: FoodList,
    /// Draft behind the create/edit modal
    pub editor: FoodEditor,
    pub toast: Option<Toast>,
    /// Last toast id handed out
    pub toast_seq: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Replace the collection with a backend snapshot
pub fn store_apply_snapshot(store: &AppStore, snapshot: Vec<FoodItem>) {
    store.menu().write().apply_snapshot(snapshot);
}

/// Show a toast, replacing any current one. Returns its id.
pub fn store_show_toast(store: &AppStore, kind: ToastKind, message: String) -> u64 {
    let id = {
        let field = store.toast_seq();
        let mut seq = field.write();
        *seq += 1;
        *seq
    };
    *store.toast().write() = Some(Toast { id, kind, message });
    id
}

/// Dismiss a toast if it is still the one showing
pub fn store_dismiss_toast(store: &AppStore, id: u64) {
    let showing = store.toast().read().as_ref().map(|t| t.id);
    if showing == Some(id) {
        *store.toast().write() = None;
    }
}
