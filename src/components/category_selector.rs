//! Category Selector Component

use leptos::prelude::*;

use crate::models::Category;

/// One button per menu category; exactly one may be active
#[component]
pub fn CategorySelector(
    #[prop(into)] current: Signal<Option<Category>>,
    #[prop(into)] on_change: Callback<Category>,
) -> impl IntoView {
    view! {
        <div class="type-selector">
            <Show when=move || current.get().is_none()>
                <span class="type-selector-hint">"Selecione"</span>
            </Show>
            {Category::ALL.iter().map(|category| {
                let category = *category;
                let is_selected = move || current.get() == Some(category);
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "type-btn active" } else { "type-btn" }
                        on:click=move |_| on_change.run(category)
                    >
                        {category.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
