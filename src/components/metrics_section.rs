//! Metrics Section Component
//!
//! One collapsible table per feature with actual values, targets and
//! fulfillment of every metric. Target averages are editable.

use std::collections::HashSet;

use leptos::prelude::*;

use crate::components::SmallCircle;
use crate::context::AppContext;
use crate::metrics::{build_sections, FeatureSection, MetricRow};
use crate::store::{store_set_target_input, use_editor_store, EditorStateStoreFields};

#[component]
pub fn MetricsSection() -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_editor_store();

    // Expanded feature keys survive reloads
    let expanded = RwSignal::new(HashSet::<String>::new());

    let sections = move || {
        let existing = app.request.with(|r| r.is_existing_process());
        store.definition().with(|definition| {
            store
                .process()
                .with(|p| build_sections(definition, p.as_ref().filter(|_| existing)))
        })
    };

    view! {
        <div id="metrics-input-processes">
            {move || {
                sections()
                    .into_iter()
                    .map(|section| view! { <FeatureBlock section=section expanded=expanded /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn FeatureBlock(section: FeatureSection, expanded: RwSignal<HashSet<String>>) -> impl IntoView {
    let FeatureSection { key, title, fulfillment, rows, .. } = section;

    let toggle_key = key.clone();
    let open_key = key.clone();
    let is_open = move || expanded.with(|set| set.contains(&open_key));
    let icon = {
        let is_open = is_open.clone();
        move || if is_open() { "▼" } else { "▶" }
    };
    let on_toggle = move |_| {
        expanded.update(|set| {
            if !set.remove(&toggle_key) {
                set.insert(toggle_key.clone());
            }
        });
    };

    view! {
        <div class="feature-section" id=key>
            <div class="accordion-toggle" on:click=on_toggle>
                <span class="accordion-icon">{icon}</span>
                <span class="features-label">{title}</span>
                <SmallCircle fulfillment=fulfillment />
            </div>
            <Show when=is_open>
                <table class="process-feature-table">
                    <tr>
                        <th>"Metric"</th>
                        <th>"Average"</th>
                        <th>"Std. Dev."</th>
                        <th>"Sum"</th>
                        <th>"Min"</th>
                        <th>"Max"</th>
                        <th>"Target Average"</th>
                        <th>"Target Sum"</th>
                        <th>"Check"</th>
                    </tr>
                    {rows.iter().cloned().map(|row| view! { <MetricRowView row=row /> }).collect_view()}
                </table>
            </Show>
        </div>
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
fn MetricRowView(row: MetricRow) -> impl IntoView {
    let store = use_editor_store();
    let actual = row.actual.clone().unwrap_or_default();

    let slug = row.slug.clone();
    let value = move || store.target_inputs().with(|inputs| inputs.get(&slug).cloned().unwrap_or_default());
    let input_slug = row.slug.clone();

    view! {
        <tr>
            <td>{row.name}</td>
            <td>{cell(actual.average)}</td>
            <td>{cell(actual.standard_deviation)}</td>
            <td>{cell(actual.total)}</td>
            <td>{cell(actual.min)}</td>
            <td>{cell(actual.max)}</td>
            <td>
                <input
                    type="text"
                    class="target-average"
                    name=row.slug
                    prop:value=value
                    on:input=move |ev| store_set_target_input(&store, &input_slug, event_target_value(&ev))
                />
            </td>
            <td>{cell(row.target_total)}</td>
            <td><SmallCircle fulfillment=row.fulfillment /></td>
        </tr>
    }
}
