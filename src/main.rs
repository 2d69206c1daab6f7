//! Process Editor Frontend Entry Point

mod models;
mod reorder;
mod request;
mod metrics;
mod editor;
mod commands;
mod context;
mod store;
mod notify;
mod actions;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    notify::init_logging();
    mount_to_body(App);
}
