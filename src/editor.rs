//! Editor Events
//!
//! Typed user actions on the component table. Each handler applies the
//! change to the local row list and returns the step request to submit;
//! the caller reloads from the backend once the request succeeds.

use leptos_dragdrop::DropTarget;

use crate::commands::{CreateStepArgs, DeleteStepArgs, EditStepArgs, StepRequest};
use crate::models::{ComponentRow, Weight};
use crate::reorder::OrderedRowList;
use crate::request::{RequestContext, UID_LEN};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A row was dragged and released over a drop target
    Dropped {
        dragged: Weight,
        target: DropTarget<Weight>,
    },
    /// "Add" clicked with the picker's current value
    AddRequested {
        component_uid: String,
        name: String,
    },
    /// Trash icon of a row confirmed
    DeleteRequested { weight: Weight },
}

/// Apply `event` to `rows` and build the request that persists it.
///
/// Returns `None` when the event changes nothing or cannot be sent.
pub fn handle_event(rows: &mut OrderedRowList, ctx: &RequestContext, event: EditorEvent) -> Option<StepRequest> {
    match event {
        EditorEvent::Dropped { dragged, target } => on_drop(rows, ctx, dragged, target),
        EditorEvent::AddRequested { component_uid, name } => on_add(rows, ctx, component_uid, name),
        EditorEvent::DeleteRequested { weight } => on_delete(rows, ctx, weight),
    }
}

fn on_drop(
    rows: &mut OrderedRowList,
    ctx: &RequestContext,
    dragged: Weight,
    target: DropTarget<Weight>,
) -> Option<StepRequest> {
    let uid = ctx.process_uid.clone()?;
    let change = rows.move_row(dragged, target)?;
    tracing::debug!("[DND] {} -> {} ({:?})", change.old_weight, change.new_weight, target);
    if !rows.is_strictly_ordered() {
        tracing::warn!("[DND] weights out of order after move: {:?}", rows.weights());
    }
    Some(StepRequest::Edit(EditStepArgs {
        uid,
        old_weight: change.old_weight,
        new_weight: change.new_weight,
    }))
}

fn on_add(
    rows: &mut OrderedRowList,
    ctx: &RequestContext,
    component_uid: String,
    name: String,
) -> Option<StepRequest> {
    // The picker's placeholder option is not a component
    if component_uid.len() != UID_LEN {
        return None;
    }
    let Some(process_uid) = ctx.process_uid.clone() else {
        tracing::warn!("[APP] cannot add components before the process is created");
        return None;
    };

    let weight = rows.insert(ComponentRow {
        weight: Weight(0.0),
        uid: Some(component_uid.clone()),
        name,
        category: String::new(),
    });
    Some(StepRequest::Create(CreateStepArgs {
        process_uid,
        component_uid,
        weight,
    }))
}

fn on_delete(rows: &mut OrderedRowList, ctx: &RequestContext, weight: Weight) -> Option<StepRequest> {
    let uid = ctx.process_uid.clone()?;
    rows.delete(weight)?;
    Some(StepRequest::Delete(DeleteStepArgs { uid, weight }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROCESS: &str = "b141f94973a43cf8ee972e9dffc1b004";
    const COMPONENT: &str = "0123456789abcdef0123456789abcdef";

    fn ctx() -> RequestContext {
        RequestContext::new("http://h", Some(PROCESS.to_string()))
    }

    fn rows(weights: &[f64]) -> OrderedRowList {
        OrderedRowList::from_snapshot(
            weights
                .iter()
                .map(|w| ComponentRow {
                    weight: Weight(*w),
                    uid: None,
                    name: format!("C{}", w),
                    category: "saas".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_drop_builds_edit_step() {
        let mut list = rows(&[1.0, 2.0, 3.0]);
        let event = EditorEvent::Dropped { dragged: Weight(3.0), target: DropTarget::After(Weight(1.0)) };
        let step = handle_event(&mut list, &ctx(), event);
        assert_eq!(
            step,
            Some(StepRequest::Edit(EditStepArgs {
                uid: PROCESS.to_string(),
                old_weight: Weight(3.0),
                new_weight: Weight(1.5),
            }))
        );
        assert_eq!(list.weights(), vec![Weight(1.0), Weight(1.5), Weight(2.0)]);
    }

    #[test]
    fn test_drop_in_place_sends_nothing() {
        let mut list = rows(&[1.0, 2.0]);
        let event = EditorEvent::Dropped { dragged: Weight(2.0), target: DropTarget::After(Weight(1.0)) };
        assert_eq!(handle_event(&mut list, &ctx(), event), None);
    }

    #[test]
    fn test_add_appends_after_last_row() {
        let mut list = rows(&[1.0, 4.0]);
        let event = EditorEvent::AddRequested { component_uid: COMPONENT.to_string(), name: "CRM".to_string() };
        let step = handle_event(&mut list, &ctx(), event);
        assert_eq!(
            step,
            Some(StepRequest::Create(CreateStepArgs {
                process_uid: PROCESS.to_string(),
                component_uid: COMPONENT.to_string(),
                weight: Weight(5.0),
            }))
        );
        assert_eq!(list.rows().len(), 3);
    }

    #[test]
    fn test_add_to_empty_process_uses_weight_one() {
        let mut list = OrderedRowList::default();
        let event = EditorEvent::AddRequested { component_uid: COMPONENT.to_string(), name: "CRM".to_string() };
        match handle_event(&mut list, &ctx(), event) {
            Some(StepRequest::Create(args)) => assert_eq!(args.weight, Weight(1.0)),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_add_ignores_placeholder_and_unsaved_process() {
        let mut list = rows(&[1.0]);
        let placeholder = EditorEvent::AddRequested { component_uid: "default".to_string(), name: "Select".to_string() };
        assert_eq!(handle_event(&mut list, &ctx(), placeholder), None);

        let unsaved = RequestContext::new("http://h", None);
        let event = EditorEvent::AddRequested { component_uid: COMPONENT.to_string(), name: "CRM".to_string() };
        assert_eq!(handle_event(&mut list, &unsaved, event), None);
        assert_eq!(list.rows().len(), 1);
    }

    #[test]
    fn test_delete_builds_delete_step() {
        let mut list = rows(&[1.0, 2.0, 3.0]);
        let step = handle_event(&mut list, &ctx(), EditorEvent::DeleteRequested { weight: Weight(2.0) });
        assert_eq!(
            step,
            Some(StepRequest::Delete(DeleteStepArgs { uid: PROCESS.to_string(), weight: Weight(2.0) }))
        );
        assert_eq!(list.weights(), vec![Weight(1.0), Weight(3.0)]);

        let missing = handle_event(&mut list, &ctx(), EditorEvent::DeleteRequested { weight: Weight(2.0) });
        assert_eq!(missing, None);
    }
}
