//! Remove Component Button
//!
//! Trash control of a component row. The first click asks for confirmation
//! inline; only ✓ removes the component from the process.

use leptos::prelude::*;

use crate::models::Weight;

/// Question shown before a component is removed
fn confirm_label(name: &str, position: Weight) -> String {
    if name.is_empty() {
        format!("Remove position {}?", position)
    } else {
        format!("Remove {} (position {})?", name, position)
    }
}

#[component]
pub fn RemoveComponentButton(
    /// Weight of the row, also its position label
    position: Weight,
    #[prop(into)] name: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let label = confirm_label(&name, position);

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class="trash-btn"
                    title="Remove component"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    "🗑"
                </button>
            }
        >
            <span class="remove-confirm">
                <span class="remove-confirm-text">{label.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_label_names_the_component() {
        assert_eq!(confirm_label("CRM", Weight(2.0)), "Remove CRM (position 2)?");
        assert_eq!(confirm_label("", Weight(1.5)), "Remove position 1.5?");
    }
}
