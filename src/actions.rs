//! Async Actions
//!
//! Loading the view and submitting component steps. Every successful step
//! triggers a full reload; failures alert and leave the local view as is.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::AppContext;
use crate::editor::{handle_event, EditorEvent};
use crate::notify::{self, LOAD_FAILED, SAVE_FAILED};
use crate::request::RequestContext;
use crate::store::{store_set_process, EditorStateStoreFields, EditorStore};

/// Fetch definitions, the process snapshot and the component catalogue
pub async fn load_view(store: EditorStore, ctx: RequestContext) {
    match commands::get_metrics_definition(&ctx).await {
        Ok(definition) => store.definition().set(definition),
        Err(e) => tracing::error!("[APP] metrics definition: {}", e),
    }

    let uid = match ctx.process_uid.as_deref() {
        Some(uid) if ctx.is_existing_process() => uid,
        _ => {
            tracing::debug!("[APP] entering new process");
            store_set_process(&store, None);
            return;
        }
    };

    match commands::view_process(&ctx, uid).await {
        Ok(view) => {
            tracing::info!("[APP] loaded process {} with {} components", uid, view.process.components.len());
            store_set_process(&store, Some(view));
        }
        Err(e) => {
            tracing::error!("[APP] process {}: {}", uid, e);
            notify::dump_recent_logs("process load failed");
            notify::alert(LOAD_FAILED);
        }
    }

    match commands::get_component_overview(&ctx).await {
        Ok(overview) => store.component_options().set(overview.components),
        Err(e) => tracing::error!("[APP] component overview: {}", e),
    }
}

/// Apply an editor event locally and submit the resulting step
pub fn dispatch(store: EditorStore, app: AppContext, event: EditorEvent) {
    let ctx = app.request();
    let mut step = None;
    store.rows().update(|rows| step = handle_event(rows, &ctx, event));

    let Some(step) = step else {
        return;
    };

    spawn_local(async move {
        match commands::submit_step(&ctx, &step).await {
            Ok(()) => app.reload(),
            Err(e) => {
                // No rollback: the optimistic order stays until the next reload
                tracing::error!("[APP] {} failed: {}", step.path(), e);
                notify::dump_recent_logs("step failed");
                notify::alert(SAVE_FAILED);
            }
        }
    });
}
