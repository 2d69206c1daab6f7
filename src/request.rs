//! Request Context
//!
//! Where to send requests and which process is being edited, derived once
//! from the page location and passed explicitly to every command.

use percent_encoding::percent_decode_str;

/// Length of a backend uid (uuid4 hex) for processes and components
pub const UID_LEN: usize = 32;

/// uid sent when creating a new process
pub const NEW_PROCESS_UID: &str = "-1";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Origin of the page, e.g. `https://host:8080`
    pub base_url: String,
    /// `uid` query parameter, if any
    pub process_uid: Option<String>,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>, process_uid: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            process_uid: process_uid.filter(|uid| !uid.is_empty()),
        }
    }

    /// Build from `window.location` parts
    pub fn from_location(origin: &str, href: &str) -> Self {
        Self::new(origin, query_param(href, "uid"))
    }

    /// Read the current page location
    pub fn from_window() -> Self {
        let location = web_sys::window().map(|w| w.location());
        let origin = location.as_ref().and_then(|l| l.origin().ok()).unwrap_or_default();
        let href = location.as_ref().and_then(|l| l.href().ok()).unwrap_or_default();
        Self::from_location(&origin, &href)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// True when the page addresses a stored process
    pub fn is_existing_process(&self) -> bool {
        self.process_uid
            .as_deref()
            .map_or(false, |uid| uid.len() == UID_LEN)
    }

    /// uid to send with a create/edit request
    pub fn uid_for_save(&self) -> String {
        self.process_uid
            .clone()
            .unwrap_or_else(|| NEW_PROCESS_UID.to_string())
    }

    /// Label of the save button
    pub fn save_label(&self) -> &'static str {
        if self.process_uid.is_some() { "Save" } else { "Create" }
    }

    /// Adopt the uid the backend assigned to a newly created process
    pub fn adopt_process_uid(&mut self, uid: String) {
        if !uid.is_empty() {
            self.process_uid = Some(uid);
        }
    }
}

/// First value of `name` in the query string of `href`, percent-decoded
pub fn query_param(href: &str, name: &str) -> Option<String> {
    let query = href.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key) == name).then(|| decode(value))
        })
        .next()
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().to_string()
}
