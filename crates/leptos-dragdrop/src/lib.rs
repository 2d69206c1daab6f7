//! Leptos DragDrop Utilities
//!
//! Simple row drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! All gesture bookkeeping lives in [`DragTracker`], which knows nothing about
//! the DOM. The `make_on_*` / `bind_global_*` helpers only translate browser
//! events into tracker calls.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget<K> {
    /// Drop after a row (row key)
    After(K),
    /// Drop on the table head, i.e. before the first row
    Front,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// State of a single press-move-release gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragTracker<K> {
    /// Pressed row (mousedown but not yet dragging)
    pending: Option<K>,
    /// Start position for movement detection
    start: (i32, i32),
    dragging: Option<K>,
    target: Option<DropTarget<K>>,
}

impl<K> Default for DragTracker<K> {
    fn default() -> Self {
        Self {
            pending: None,
            start: (0, 0),
            dragging: None,
            target: None,
        }
    }
}

impl<K: Copy + PartialEq> DragTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending drag with its start position
    pub fn press(&mut self, key: K, x: i32, y: i32) {
        self.pending = Some(key);
        self.start = (x, y);
    }

    /// Start dragging once the pointer moved beyond the threshold.
    /// Returns true only for the movement that started the drag.
    pub fn pointer_moved(&mut self, x: i32, y: i32) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if self.dragging.is_some() {
            return false;
        }

        let dx = (x - self.start.0).abs();
        let dy = (y - self.start.1).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            self.dragging = Some(pending);
            return true;
        }
        false
    }

    /// Pointer entered a row: it becomes the drop target (never the dragged row itself)
    pub fn enter_row(&mut self, key: K) {
        if let Some(dragging) = self.dragging {
            if dragging != key {
                self.target = Some(DropTarget::After(key));
            }
        }
    }

    /// Pointer entered the table head
    pub fn enter_front(&mut self) {
        if self.dragging.is_some() {
            self.target = Some(DropTarget::Front);
        }
    }

    pub fn leave(&mut self) {
        if self.dragging.is_some() {
            self.target = None;
        }
    }

    /// End the gesture and reset. Yields `(dragged, target)` only when a
    /// real drag ended over a target.
    pub fn release(&mut self) -> Option<(K, DropTarget<K>)> {
        let dropped = match (self.dragging, self.target) {
            (Some(dragged), Some(target)) => Some((dragged, target)),
            _ => None,
        };
        *self = Self::default();
        dropped
    }

    pub fn dragging(&self) -> Option<K> {
        self.dragging
    }

    pub fn target(&self) -> Option<DropTarget<K>> {
        self.target
    }

    /// Either pressed or dragging
    pub fn is_active(&self) -> bool {
        self.pending.is_some() || self.dragging.is_some()
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<K> {
    pub tracker: RwSignal<DragTracker<K>>,
}

impl<K> DndSignals<K>
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    /// Row currently being dragged (tracked)
    pub fn dragging(&self) -> Option<K> {
        self.tracker.with(|t| t.dragging())
    }

    /// Current drop target (tracked)
    pub fn target(&self) -> Option<DropTarget<K>> {
        self.tracker.with(|t| t.target())
    }

    pub fn is_dragging(&self, key: K) -> bool {
        self.dragging() == Some(key)
    }

    pub fn is_target(&self, target: DropTarget<K>) -> bool {
        self.target() == Some(target)
    }
}

pub fn create_dnd_signals<K>() -> DndSignals<K>
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    DndSignals {
        tracker: RwSignal::new(DragTracker::new()),
    }
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is a form control
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
        }
        dnd.tracker.update(|t| t.press(key, ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for rows
pub fn make_on_row_mouseenter<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        dnd.tracker.maybe_update(|t| {
            let before = t.target();
            t.enter_row(key);
            before != t.target()
        });
    }
}

/// Create mouseenter handler for the table head
pub fn make_on_front_mouseenter<K>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        dnd.tracker.maybe_update(|t| {
            let before = t.target();
            t.enter_front();
            before != t.target()
        });
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        dnd.tracker.maybe_update(|t| {
            let before = t.target();
            t.leave();
            before != t.target()
        });
    }
}

/// Bind document mousemove handler - starts drag if moved enough
pub fn bind_global_mousemove<K>(dnd: DndSignals<K>)
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // Only notify subscribers when the drag actually starts
        dnd.tracker.maybe_update(|t| t.pointer_moved(ev.client_x(), ev.client_y()));
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<K, F>(dnd: DndSignals<K>, on_drop: F)
where
    K: Copy + PartialEq + Send + Sync + 'static,
    F: Fn(K, DropTarget<K>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let mut dropped = None;
        dnd.tracker.maybe_update(|t| {
            let was_active = t.is_active();
            dropped = t.release();
            was_active
        });

        // A plain click falls through to the element's click handler
        if let Some((dragged, target)) = dropped {
            on_drop(dragged, target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}
