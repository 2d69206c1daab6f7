//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::request::RequestContext;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the whole view from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the whole view from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Base URL and edited process
    pub request: RwSignal<RequestContext>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), request: RequestContext) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            request: RwSignal::new(request),
        }
    }

    /// Trigger a reload from backend
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Snapshot of the request context for an async call
    pub fn request(&self) -> RequestContext {
        self.request.get_untracked()
    }

    /// Remember the uid of a process the backend just created
    pub fn adopt_process_uid(&self, uid: String) {
        self.request.update(|r| r.adopt_process_uid(uid));
    }
}
