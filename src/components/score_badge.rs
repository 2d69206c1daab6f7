//! Score Indicators
//!
//! Whole-process score and the small per-metric fulfillment circle.

use leptos::prelude::*;

use crate::metrics::fulfillment_class;
use crate::store::{use_editor_store, EditorStateStoreFields};

#[component]
pub fn ScoreBadge() -> impl IntoView {
    let store = use_editor_store();
    let score = move || store.process().with(|p| p.as_ref().and_then(|v| v.score));

    view! {
        <Show when=move || score().is_some()>
            <div id="whole-process-score" class="score-circle">
                {move || score().map(|s| format!("{}%", s)).unwrap_or_default()}
            </div>
        </Show>
    }
}

#[component]
pub fn SmallCircle(fulfillment: Option<bool>) -> impl IntoView {
    view! { <div class=fulfillment_class(fulfillment)></div> }
}
