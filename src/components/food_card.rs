//! Food Card Component
//!
//! One food in the grid: photo, details, availability switch, edit/delete.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::format::format_price;
use crate::store::AppStateStoreFields;

#[component]
pub fn FoodCard(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let food = {
        let id = id.clone();
        Memo::new(move |_| store.menu().read().find(&id).cloned())
    };
    let id = StoredValue::new(id);

    move || {
        food.get().map(|food| {
            let available = food.available;
            let card_class = if available { "food-card" } else { "food-card unavailable" };
            view! {
                <article class=card_class>
                    <img class="food-card-image" src=food.image.clone() alt=food.name.clone() />
                    <div class="food-card-body">
                        <header class="food-card-header">
                            <h2>{food.name.clone()}</h2>
                            <span class="food-card-category">{food.category.label()}</span>
                        </header>
                        <p class="food-card-description">{food.description.clone()}</p>
                        <strong class="food-card-price">{format_price(food.price)}</strong>
                    </div>
                    <footer class="food-card-actions">
                        <label class="switch">
                            <input
                                type="checkbox"
                                prop:checked=available
                                on:change=move |_| id.with_value(|id| ctx.toggle_availability(id))
                            />
                            <span>{if available { "Disponível" } else { "Indisponível" }}</span>
                        </label>
                        <button class="icon-btn" title="Editar" on:click=move |_| id.with_value(|id| ctx.open_edit(id))>
                            "✎"
                        </button>
                        <button class="delete-btn" title="Apagar" on:click=move |_| id.with_value(|id| ctx.request_delete(id))>
                            "×"
                        </button>
                    </footer>
                </article>
            }
        })
    }
}
