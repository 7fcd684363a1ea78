//! Food Grid Component
//!
//! Loading / empty / populated views of the menu.

use leptos::prelude::*;

use crate::components::{ConfirmDialog, FoodCard};
use crate::context::use_app_context;
use crate::controller::LoadPhase;
use crate::store::AppStateStoreFields;

#[component]
pub fn FoodGrid() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let phase = Memo::new(move |_| store.menu().read().phase());
    let ids = Memo::new(move |_| {
        store
            .menu()
            .read()
            .items()
            .iter()
            .map(|f| f.id.clone())
            .collect::<Vec<_>>()
    });
    let pending_delete = Signal::derive(move || store.menu().read().pending_delete().map(str::to_string));

    view! {
        <section class="food-grid-section">
            {move || match phase.get() {
                LoadPhase::Loading => view! {
                    <p class="food-grid-status">"Carregando..."</p>
                }.into_any(),
                LoadPhase::Empty => view! {
                    <p class="food-grid-status">"Nenhum prato cadastrado"</p>
                }.into_any(),
                LoadPhase::Populated => view! {
                    <div class="food-grid">
                        <For
                            each=move || ids.get()
                            key=|id| id.clone()
                            children=move |id: String| view! { <FoodCard id=id /> }
                        />
                    </div>
                }.into_any(),
            }}
            <ConfirmDialog
                message=pending_delete
                on_confirm=move |_| ctx.confirm_delete()
                on_cancel=move |_| ctx.cancel_delete()
            />
        </section>
    }
}
