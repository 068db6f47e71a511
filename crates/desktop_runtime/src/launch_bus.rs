//! Single-slot mailboxes that let any part of the UI ask for a window to open or close.
//!
//! The bus is created by [`crate::DesktopProvider`] and lives exactly as long as the provider's
//! reactive owner. Panes reach it through [`use_launch_bus`] instead of holding the window
//! manager.

use desktop_app_contract::AppItem;
use leptos::*;

use crate::model::{ClosedWindowNotice, WindowId};

#[derive(Clone, Copy)]
pub struct LaunchRequestBus {
    open_request: RwSignal<Option<AppItem>>,
    close_request: RwSignal<Option<WindowId>>,
    last_closed: RwSignal<Option<ClosedWindowNotice>>,
}

impl LaunchRequestBus {
    /// Creates empty slots owned by the current reactive owner.
    pub fn new() -> Self {
        Self {
            open_request: create_rw_signal(None),
            close_request: create_rw_signal(None),
            last_closed: create_rw_signal(None),
        }
    }

    /// Asks the window manager to open (or focus) `item`. A pending request is replaced.
    pub fn request_open(&self, item: AppItem) {
        self.open_request.set(Some(item));
    }

    /// Asks the window manager to close `window_id`. A pending request is replaced.
    pub fn request_close(&self, window_id: WindowId) {
        self.close_request.set(Some(window_id));
    }

    pub fn open_request(&self) -> ReadSignal<Option<AppItem>> {
        self.open_request.read_only()
    }

    pub fn close_request(&self) -> ReadSignal<Option<WindowId>> {
        self.close_request.read_only()
    }

    pub fn last_closed(&self) -> ReadSignal<Option<ClosedWindowNotice>> {
        self.last_closed.read_only()
    }

    /// Reads (tracked) and clears the pending open request.
    pub fn take_open_request(&self) -> Option<AppItem> {
        let item = self.open_request.get();
        if item.is_some() {
            self.open_request.set(None);
        }
        item
    }

    /// Reads (tracked) and clears the pending close request.
    pub fn take_close_request(&self) -> Option<WindowId> {
        let window_id = self.close_request.get();
        if window_id.is_some() {
            self.close_request.set(None);
        }
        window_id
    }

    /// Records that `window_id` closed at `closed_at_unix_ms`.
    pub fn notify_window_closed(&self, window_id: WindowId, closed_at_unix_ms: u64) {
        self.last_closed.set(Some(ClosedWindowNotice {
            window_id,
            closed_at_unix_ms,
        }));
    }
}

impl Default for LaunchRequestBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a bus and provides it as context to descendants.
pub fn provide_launch_bus() -> LaunchRequestBus {
    let bus = LaunchRequestBus::new();
    provide_context(bus);
    bus
}

/// Returns the bus provided by [`crate::DesktopProvider`].
///
/// # Panics
///
/// Panics if called outside [`crate::DesktopProvider`].
pub fn use_launch_bus() -> LaunchRequestBus {
    use_context::<LaunchRequestBus>().expect("LaunchRequestBus not provided")
}

/// Runs `on_closed` each time `window_id` closes after this call.
///
/// Used by panes that hold a lock keyed by a window id (for example an edit lock) and must
/// release it when that window goes away.
pub fn on_window_closed(
    bus: LaunchRequestBus,
    window_id: WindowId,
    on_closed: impl Fn(ClosedWindowNotice) + 'static,
) {
    create_effect(move |seen: Option<Option<ClosedWindowNotice>>| {
        let current = bus.last_closed.get();
        let Some(previous) = seen else {
            return current;
        };
        if current != previous {
            if let Some(notice) = current.as_ref().filter(|n| n.window_id == window_id) {
                on_closed(notice.clone());
            }
        }
        current
    });
}
