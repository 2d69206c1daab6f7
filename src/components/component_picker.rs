//! Component Picker Component
//!
//! Select box of all known components with an Add button.

use leptos::prelude::*;

use crate::actions::dispatch;
use crate::context::AppContext;
use crate::editor::EditorEvent;
use crate::store::{use_editor_store, EditorStateStoreFields};

/// Value of the placeholder option
const NO_SELECTION: &str = "default";

#[component]
pub fn ComponentPicker() -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_editor_store();

    let (selected, set_selected) = signal(NO_SELECTION.to_string());

    let add_component = move |_| {
        let component_uid = selected.get_untracked();
        let name = store
            .component_options()
            .with_untracked(|options| {
                options
                    .iter()
                    .find(|o| o.uid == component_uid)
                    .map(|o| o.name.clone())
            })
            .unwrap_or_default();
        dispatch(store, app, EditorEvent::AddRequested { component_uid, name });
    };

    view! {
        <div id="add-component" class="control-area">
            <select
                id="addposition"
                prop:value=move || selected.get()
                on:change=move |ev| set_selected.set(event_target_value(&ev))
            >
                <option value=NO_SELECTION>"Select"</option>
                <For
                    each=move || store.component_options().get()
                    key=|option| option.uid.clone()
                    children=move |option| view! { <option value=option.uid>{option.name}</option> }
                />
            </select>
            <button type="button" class="add-button" on:click=add_component>
                "Add"
            </button>
        </div>
    }
}
