//! Process Form Component
//!
//! Name and description of the process with the Save/Create button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, ProcessFields, SaveProcessArgs};
use crate::components::ScoreBadge;
use crate::context::AppContext;
use crate::metrics::collect_targets;
use crate::notify;
use crate::store::{store_clear_target_inputs, use_editor_store, EditorStateStoreFields};

#[component]
pub fn ProcessForm() -> impl IntoView {
    let app = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_editor_store();

    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (saving, set_saving) = signal(false);

    // Refill fields whenever a process snapshot arrives
    Effect::new(move |_| {
        let fields = store.process().with(|p| {
            p.as_ref()
                .map(|v| (v.process.name.clone(), v.process.description.clone()))
        });
        if let Some((n, d)) = fields {
            set_name.set(n);
            set_description.set(d);
        }
    });

    let on_save = move |_| {
        set_saving.set(true);
        let ctx = app.request();

        let inputs = store.target_inputs().get_untracked();
        let (target_metrics, discarded) = collect_targets(inputs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if !discarded.is_empty() {
            tracing::warn!("[APP] discarded non-numeric targets: {:?}", discarded);
            store_clear_target_inputs(&store, &discarded);
        }

        let args = SaveProcessArgs {
            process: ProcessFields {
                uid: ctx.uid_for_save(),
                name: name.get_untracked(),
                description: description.get_untracked(),
            },
            target_metrics,
        };

        spawn_local(async move {
            match commands::save_process(&ctx, &args).await {
                Ok(status) => {
                    if !ctx.is_existing_process() {
                        if let Some(uid) = status.process_uid {
                            tracing::info!("[APP] created process {}", uid);
                            app.adopt_process_uid(uid);
                        }
                    }
                    notify::alert(&notify::save_message(true, !discarded.is_empty()));
                    app.reload();
                }
                Err(e) => {
                    tracing::error!("[APP] save failed: {}", e);
                    notify::dump_recent_logs("save failed");
                    notify::alert(&notify::save_message(false, !discarded.is_empty()));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="process-form">
            <div class="process-header">
                <input
                    id="process-name"
                    type="text"
                    placeholder="Process name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <ScoreBadge />
            </div>
            <textarea
                id="process-description"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
            <div id="buttons" class="control-area">
                <button
                    id="save-button"
                    class="create-button"
                    type="button"
                    disabled=move || saving.get()
                    on:click=on_save
                >
                    {move || app.request.with(|r| r.save_label())}
                </button>
            </div>
        </div>
    }
}
