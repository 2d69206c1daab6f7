//! UI Components
//!
//! Leptos components of the process editor.

mod process_form;
mod score_badge;
mod metrics_section;
mod component_table;
mod component_picker;
mod remove_component_button;

pub use process_form::ProcessForm;
pub use score_badge::{ScoreBadge, SmallCircle};
pub use metrics_section::MetricsSection;
pub use component_table::ComponentTable;
pub use component_picker::ComponentPicker;
pub use remove_component_button::RemoveComponentButton;
