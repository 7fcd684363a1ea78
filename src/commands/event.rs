//! Event Bindings
//!
//! Subscription to the backend's `foods-changed` broadcast.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::task::spawn_local;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::backend::{SnapshotHandler, Subscription};
use crate::models::FoodItem;

/// Emitted by the backend with the full collection after every mutation
pub const FOODS_CHANGED: &str = "foods-changed";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], catch)]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Register for snapshot events. The listener is removed when the returned
/// subscription drops, even if registration is still in flight.
pub fn listen_foods_changed(on_snapshot: SnapshotHandler) -> Subscription {
    let handler = Rc::new(Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<Vec<FoodItem>>>(event) {
            Ok(envelope) => on_snapshot(envelope.payload),
            Err(e) => web_sys::console::error_1(
                &format!("[Event] Bad {} payload: {}", FOODS_CHANGED, e).into(),
            ),
        }
    }));
    let unlisten: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));
    let released = Rc::new(Cell::new(false));

    {
        let handler = handler.clone();
        let unlisten = unlisten.clone();
        let released = released.clone();
        spawn_local(async move {
            match listen(FOODS_CHANGED, &handler).await {
                Ok(f) => match f.dyn_into::<js_sys::Function>() {
                    Ok(f) if released.get() => {
                        let _ = f.call0(&JsValue::NULL);
                    }
                    Ok(f) => *unlisten.borrow_mut() = Some(f),
                    Err(_) => web_sys::console::error_1(&"[Event] listen returned no unlisten fn".into()),
                },
                Err(e) => web_sys::console::error_1(&format!("[Event] listen failed: {:?}", e).into()),
            }
        });
    }

    Subscription::new(move || {
        released.set(true);
        if let Some(f) = unlisten.borrow_mut().take() {
            let _ = f.call0(&JsValue::NULL);
        }
        drop(handler);
    })
}
