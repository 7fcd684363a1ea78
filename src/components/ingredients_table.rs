//! Ingredients Table Component
//!
//! Lists the draft's ingredients with an add/edit entry dialog.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::{ConfirmDialog, PriceInput};
use crate::context::use_app_context;
use crate::format::format_price;
use crate::ingredients::{EntryMode, IngredientEditor};
use crate::models::IngredientItem;
use crate::store::{AppStateStoreFields, AppStore};

/// Apply an ingredient-editor operation to the draft's list
fn update_list(
    store: AppStore,
    op: impl FnOnce(&mut IngredientEditor, &[IngredientItem]) -> Option<Vec<IngredientItem>>,
) {
    let field = store.editor();
    let mut editor = field.write();
    let list = editor.draft().ingredients.clone();
    if let Some(next) = op(&mut editor.ingredients, &list) {
        editor.draft_mut().ingredients = next;
    }
}

#[component]
pub fn IngredientsTable() -> impl IntoView {
    let store = use_app_context().store;

    let rows = Memo::new(move |_| store.editor().read().draft().ingredients.clone());
    let entry_open = Memo::new(move |_| store.editor().read().ingredients.is_open());
    let entry_name = Memo::new(move |_| store.editor().read().ingredients.name().to_string());
    let entry_price = Signal::derive(move || store.editor().read().ingredients.price());
    let editing = Memo::new(move |_| matches!(store.editor().read().ingredients.mode(), EntryMode::Edit(_)));
    let pending_delete = Signal::derive(move || {
        store.editor().read().ingredients.pending_delete().map(str::to_string)
    });

    view! {
        <div class="ingredients">
            <div class="ingredients-header">
                <h3>"Ingredientes"</h3>
                <button type="button" class="small-btn" on:click=move |_| store.editor().write().ingredients.open_add()>
                    "+ Adicionar"
                </button>
            </div>
            <Show when=move || rows.with(|r| !r.is_empty())>
            <table class="ingredients-table">
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|row| (row.id.clone(), row.name.clone(), row.price)
                        children=move |row: IngredientItem| {
                            let edit_id = row.id.clone();
                            let delete_id = row.id.clone();
                            view! {
                                <tr>
                                    <td>{row.name.clone()}</td>
                                    <td class="price">{format_price(row.price)}</td>
                                    <td class="row-actions">
                                        <button type="button" class="icon-btn" on:click=move |_| {
                                            let field = store.editor();
                                            let mut editor = field.write();
                                            let list = editor.draft().ingredients.clone();
                                            editor.ingredients.edit(&list, &edit_id);
                                        }>"✎"</button>
                                        <button type="button" class="delete-btn" on:click=move |_| {
                                            let field = store.editor();
                                            let mut editor = field.write();
                                            let list = editor.draft().ingredients.clone();
                                            editor.ingredients.request_delete(&list, &delete_id);
                                        }>"×"</button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            </Show>

            <Show when=move || entry_open.get()>
                <div class="ingredient-entry">
                    <input
                        type="text"
                        placeholder="Nome"
                        prop:value=move || entry_name.get()
                        on:input=move |ev| {
                            if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                                store.editor().write().ingredients.set_name(input.value());
                            }
                        }
                    />
                    <PriceInput
                        value=entry_price
                        on_change=move |price: i64| {
                            store.editor().write().ingredients.set_price(price);
                        }
                    />
                    <button type="button" class="small-btn" on:click=move |_| update_list(store, |ed, list| ed.save(list))>
                        {move || if editing.get() { "Salvar" } else { "Adicionar" }}
                    </button>
                    <button type="button" class="cancel-btn" on:click=move |_| store.editor().write().ingredients.close()>
                        "Cancelar"
                    </button>
                </div>
            </Show>

            <ConfirmDialog
                message=pending_delete
                on_confirm=move |_| update_list(store, |ed, list| ed.confirm_delete(list))
                on_cancel=move |_| store.editor().write().ingredients.cancel_delete()
            />
        </div>
    }
}
