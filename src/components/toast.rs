//! Toast Component

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, AppStateStoreFields, ToastKind};
use crate::context::use_app_context;

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_context().store;

    move || {
        store.toast().get().map(|toast| {
            let class = match toast.kind {
                ToastKind::Success => "toast toast-success",
                ToastKind::Error => "toast toast-error",
            };
            let id = toast.id;
            view! {
                <div class=class role="status" on:click=move |_| store_dismiss_toast(&store, id)>
                    {toast.message}
                </div>
            }
        })
    }
}
