//! Confirm Dialog Component
//!
//! Second phase of every delete: shows the pending description with ✓/✗.
//! It is also rendered inside the food form, so its buttons must never submit.

use leptos::prelude::*;

/// Inline confirmation for a pending destructive action
///
/// # Arguments
/// * `message` - Description of the pending action; hidden while None
/// * `on_confirm` - Runs the action
/// * `on_cancel` - Discards the request
#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.with(|m| m.is_some())>
            <div class="confirm-backdrop">
                <div class="delete-confirm" role="alertdialog">
                    <span class="delete-confirm-text">{move || message.get().unwrap_or_default()}</span>
                    <button
                        type="button"
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button
                        type="button"
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_cancel.run(());
                        }
                    >
                        "✗"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::tachys::view::RenderHtml;

    fn render(message: Option<&str>) -> String {
        let owner = Owner::new();
        owner.with(|| {
            let message = Signal::stored(message.map(str::to_string));
            view! {
                <form>
                    <ConfirmDialog message=message on_confirm=|_| {} on_cancel=|_| {} />
                </form>
            }
            .to_html()
        })
    }

    #[test]
    fn test_buttons_do_not_submit_enclosing_form() {
        let html = render(Some("Apagar ingrediente?"));
        assert!(html.contains("Apagar ingrediente?"));
        assert_eq!(html.matches("<button").count(), 2);
        assert_eq!(html.matches(r#"type="button""#).count(), 2);
    }

    #[test]
    fn test_hidden_without_pending_action() {
        let html = render(None);
        assert!(!html.contains("<button"));
    }
}
