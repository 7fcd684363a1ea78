//! Navbar Component

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let offline = ctx.backend().is_local();

    view! {
        <header class="navbar">
            <h1 class="navbar-title">"Cardápio"</h1>
            <Show when=move || offline>
                <span class="navbar-badge">"offline"</span>
            </Show>
            <button class="primary-btn" on:click=move |_| ctx.open_create()>
                "+ Novo prato"
            </button>
        </header>
    }
}
