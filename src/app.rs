//! Menu Admin Frontend App
//!
//! Wires the backend subscription into the store and lays out the page.

use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::backend::{Backend, ErrorHandler, MenuBackend, SnapshotHandler};
use crate::components::{FoodGrid, FoodModal, Navbar, ToastHost};
use crate::context::AppContext;
use crate::store::{store_apply_snapshot, AppState, AppStateStoreFields};

/// Longest the offline variant shows the loading state
const LOADING_TIMEOUT_MS: u32 = 1500;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    let backend = Backend::detect();
    let offline = backend.is_local();

    let ctx = AppContext::new(store, backend.clone());
    provide_context(ctx);

    web_sys::console::log_1(
        &format!("[APP] Starting with {} backend", if offline { "local" } else { "tauri" }).into(),
    );

    let on_snapshot: SnapshotHandler = Arc::new(move |snapshot| {
        web_sys::console::log_1(&format!("[APP] Snapshot with {} foods", snapshot.len()).into());
        store_apply_snapshot(&store, snapshot);
    });
    // Initial load failed: stop showing the spinner and say why
    let on_error: ErrorHandler = Arc::new(move |err| {
        store.menu().write().expire_loading();
        ctx.report(err);
    });
    let subscription = StoredValue::new_local(Some(backend.subscribe(on_snapshot, on_error)));
    on_cleanup(move || {
        subscription.update_value(|sub| {
            sub.take();
        });
    });

    if offline {
        spawn_local(async move {
            TimeoutFuture::new(LOADING_TIMEOUT_MS).await;
            store.menu().write().expire_loading();
        });
    }

    view! {
        <div class="app-layout">
            <Navbar />
            <main class="main-content">
                <FoodGrid />
            </main>
            <FoodModal />
            <ToastHost />
        </div>
    }
}
