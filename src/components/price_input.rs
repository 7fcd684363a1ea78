//! Price Input Component
//!
//! Text field that always shows the formatted amount and hands back minor units.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::format::{format_price, parse_price_input};

#[component]
pub fn PriceInput(
    #[prop(into)] value: Signal<i64>,
    #[prop(into)] on_change: Callback<i64>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <input
            type="text"
            inputmode="numeric"
            class="price-input"
            placeholder=placeholder
            prop:value=move || format_price(value.get())
            on:input=move |ev| {
                let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                    return;
                };
                let parsed = parse_price_input(&input.value(), value.get_untracked());
                on_change.run(parsed);
                // Re-render even when the amount did not change (e.g. a letter was typed)
                input.set_value(&format_price(parsed));
            }
        />
    }
}
