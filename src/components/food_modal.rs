//! Food Modal Component
//!
//! Create/edit form. The draft is seeded from the controller's modal
//! session exactly once per session.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::{CategorySelector, ImageUploader, IngredientsTable, PriceInput};
use crate::context::use_app_context;
use crate::controller::ModalState;
use crate::editor::DraftSync;
use crate::models::Category;
use crate::store::AppStateStoreFields;

fn input_value(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    target
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

#[component]
pub fn FoodModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    // Seed the draft when the modal session changes
    Effect::new(move |_| {
        let (key, source) = {
            let field = store.menu();
            let menu = field.read();
            (menu.draft_key(), menu.editing().cloned())
        };
        if !store.editor().read_untracked().needs_sync(key.as_ref()) {
            return;
        }
        let sync = store.editor().write().sync(key.as_ref(), source.as_ref());
        if let DraftSync::Reset { released_preview: Some(url) } = sync {
            let _ = web_sys::Url::revoke_object_url(&url);
        }
    });

    let open = Memo::new(move |_| *store.menu().read().modal() != ModalState::Closed);
    let title = Memo::new(move |_| match store.menu().read().editing() {
        Some(food) => format!("Editar prato {}", food.name),
        None => "Novo prato".to_string(),
    });
    let name = Memo::new(move |_| store.editor().read().draft().name.clone());
    let description = Memo::new(move |_| store.editor().read().draft().description.clone());
    let price = Signal::derive(move || store.editor().read().draft().price);
    let category = Signal::derive(move || store.editor().read().draft().category);
    let submitting = Memo::new(move |_| store.editor().read().is_submitting());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.submit();
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| ctx.close_modal()>
                <form class="modal" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
                    <header class="modal-header">
                        <h2>{move || title.get()}</h2>
                        <button type="button" class="cancel-btn" on:click=move |_| ctx.close_modal()>"✗"</button>
                    </header>

                    <ImageUploader />

                    <CategorySelector
                        current=category
                        on_change=move |c: Category| store.editor().write().draft_mut().category = Some(c)
                    />

                    <input
                        type="text"
                        placeholder="Nome do prato"
                        prop:value=move || name.get()
                        on:input=move |ev| {
                            if let Some(value) = input_value(&ev) {
                                store.editor().write().draft_mut().name = value;
                            }
                        }
                    />

                    <PriceInput
                        value=price
                        placeholder="Preço"
                        on_change=move |p: i64| store.editor().write().draft_mut().price = p
                    />

                    <textarea
                        placeholder="Descrição"
                        prop:value=move || description.get()
                        on:input=move |ev| {
                            if let Some(value) = input_value(&ev) {
                                store.editor().write().draft_mut().description = value;
                            }
                        }
                    />

                    <IngredientsTable />

                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Salvando..." } else { "Salvar" }}
                    </button>
                </form>
            </div>
        </Show>
    }
}
