//! Browser boundary for the desktop runtime: canvas measurement, session teardown, and effect
//! execution.

use leptos::logging;
use platform_host::{next_monotonic_timestamp_ms, SessionGate};

use crate::{
    model::{DesktopCanvas, WindowId},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

/// Route the shell navigates to after logout.
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone)]
pub struct DesktopHostContext {
    session: SessionGate,
}

impl DesktopHostContext {
    pub fn new(session: SessionGate) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    /// Measures the desktop canvas (the document's client area).
    pub fn desktop_canvas(&self) -> DesktopCanvas {
        #[cfg(target_arch = "wasm32")]
        {
            let measured = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.document_element())
                .map(|root| DesktopCanvas {
                    width: root.client_width(),
                    height: root.client_height(),
                });
            if let Some(canvas) = measured {
                return canvas;
            }
        }
        DesktopCanvas::default()
    }

    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::WindowClosed(window_id) => publish_window_closed(runtime, window_id),
            RuntimeEffect::EndSession => self.end_session(),
        }
    }

    fn end_session(&self) {
        if !self.session.logout() {
            logging::debug_warn!("logout requested without an active session");
        }
        navigate_to(LOGIN_ROUTE);
    }
}

fn publish_window_closed(runtime: DesktopRuntimeContext, window_id: WindowId) {
    runtime
        .bus
        .notify_window_closed(window_id, next_monotonic_timestamp_ms());
}

fn navigate_to(route: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().set_href(route) {
            logging::warn!("navigation to {route} failed: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = route;
}
