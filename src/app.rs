//! Process Editor App
//!
//! Main application component: process form, metric tables and, for a
//! saved process, its ordered components.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::actions::load_view;
use crate::components::{ComponentPicker, ComponentTable, MetricsSection, ProcessForm};
use crate::context::AppContext;
use crate::request::RequestContext;
use crate::store::{EditorState, EditorStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let request = RequestContext::from_window();
    tracing::info!(
        "[APP] base={} process={}",
        request.base_url,
        request.process_uid.as_deref().unwrap_or("new")
    );

    // Provide context to all children
    let app = AppContext::new((reload_trigger, set_reload_trigger), request);
    provide_context(app);

    let store = Store::new(EditorState::default());
    provide_context(store);

    // Load everything on mount and after every change
    Effect::new(move |_| {
        let trigger = app.reload_trigger.get();
        let ctx = app.request();
        tracing::debug!("[APP] loading view, trigger={}", trigger);
        spawn_local(load_view(store, ctx));
    });

    let has_process = move || store.process().with(|p| p.is_some());

    view! {
        <main class="process-editor">
            <ProcessForm />
            <MetricsSection />
            <Show when=has_process>
                <section class="process-components">
                    <ComponentTable />
                    <ComponentPicker />
                </section>
            </Show>
        </main>
    }
}
