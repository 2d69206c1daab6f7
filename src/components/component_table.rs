//! Component Table Component
//!
//! Ordered component rows of the process. Rows are reordered by dragging
//! them onto another row (drop after it) or onto the head (drop in front).

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::actions::dispatch;
use crate::components::RemoveComponentButton;
use crate::context::AppContext;
use crate::editor::EditorEvent;
use crate::models::{ComponentRow, Weight};
use crate::store::{use_editor_store, EditorStateStoreFields};

#[component]
pub fn ComponentTable() -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_editor_store();

    let dnd = create_dnd_signals::<Weight>();
    bind_global_mouseup(dnd, move |dragged, target| {
        tracing::debug!("[DND] drop: dragged={} target={:?}", dragged, target);
        dispatch(store, app, EditorEvent::Dropped { dragged, target });
    });

    let on_head_enter = make_on_front_mouseenter(dnd);
    let on_head_leave = make_on_mouseleave(dnd);
    let head_class = move || {
        if dnd.is_target(DropTarget::Front) {
            "component-head drop-target"
        } else {
            "component-head"
        }
    };

    view! {
        <table id="component-overview-table" class=move || if dnd.dragging().is_some() { "dnd-active" } else { "" }>
            <tr class=head_class on:mouseenter=on_head_enter on:mouseleave=on_head_leave>
                <th>"Position"</th>
                <th>"Component"</th>
                <th>"Category"</th>
                <th></th>
            </tr>
            <For
                each=move || store.rows().with(|rows| rows.rows().to_vec())
                key=|row| (row.weight.value().to_bits(), row.name.clone())
                children=move |row| view! { <ComponentRowView row=row dnd=dnd /> }
            />
        </table>
    }
}

/// Element id of a row: its weight as shown in the position column
fn row_id(weight: Weight) -> String {
    weight.to_string()
}

#[component]
fn ComponentRowView(row: ComponentRow, dnd: DndSignals<Weight>) -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_editor_store();

    let weight = row.weight;
    let category_key = row.category.clone();
    let category = move || store.definition().with(|d| d.category_name(&category_key).to_string());

    let row_class = move || {
        let mut class = String::from("component-row");
        if dnd.is_dragging(weight) {
            class.push_str(" dragging");
        }
        if dnd.is_target(DropTarget::After(weight)) {
            class.push_str(" drop-target");
        }
        class
    };

    let on_delete = Callback::new(move |_| {
        dispatch(store, app, EditorEvent::DeleteRequested { weight });
    });

    view! {
        <tr
            id=row_id(weight)
            class=row_class
            on:mousedown=make_on_mousedown(dnd, weight)
            on:mouseenter=make_on_row_mouseenter(dnd, weight)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <td class="component-weight">{weight.to_string()}</td>
            <td class="component-name">{row.name.clone()}</td>
            <td class="component-category">{category}</td>
            <td class="component-actions">
                <RemoveComponentButton position=weight name=row.name.clone() on_confirm=on_delete />
            </td>
        </tr>
    }
}
