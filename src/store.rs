//! Editor State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::HashMap;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::metrics::initial_target_inputs;
use crate::models::{ComponentOption, MetricsDefinition, ProcessView};
use crate::reorder::OrderedRowList;

/// Everything loaded from the backend plus local edits
#[derive(Clone, Debug, Default, Store)]
pub struct EditorState {
    /// Features, metrics and categories
    pub definition: MetricsDefinition,
    /// Loaded process (None while creating a new one)
    pub process: Option<ProcessView>,
    /// Component rows of the process, ordered by weight
    pub rows: OrderedRowList,
    /// Components selectable in the picker
    pub component_options: Vec<ComponentOption>,
    /// Raw target-average inputs by metric slug
    pub target_inputs: HashMap<String, String>,
}

/// Type alias for the store
pub type EditorStore = Store<EditorState>;

/// Get the editor store from context
pub fn use_editor_store() -> EditorStore {
    expect_context::<EditorStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the process snapshot and everything derived from it
pub fn store_set_process(store: &EditorStore, process: Option<ProcessView>) {
    let rows = process
        .as_ref()
        .map(|p| OrderedRowList::from_snapshot(p.process.components.clone()))
        .unwrap_or_default();
    store.target_inputs().set(initial_target_inputs(process.as_ref()));
    store.rows().set(rows);
    store.process().set(process);
}

/// Set one target-average input
pub fn store_set_target_input(store: &EditorStore, slug: &str, value: String) {
    store.target_inputs().update(|inputs| {
        inputs.insert(slug.to_string(), value);
    });
}

/// Clear the inputs that could not be sent
pub fn store_clear_target_inputs(store: &EditorStore, slugs: &[String]) {
    store.target_inputs().update(|inputs| {
        for slug in slugs {
            inputs.insert(slug.clone(), String::new());
        }
    });
}
