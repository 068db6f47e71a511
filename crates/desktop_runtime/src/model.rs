use desktop_app_contract::{ContentModule, ItemId};
use serde::{Deserialize, Serialize};

use crate::config::{ClockSettings, ShellMetrics, ThemeSettings};

pub const DEFAULT_CANVAS_WIDTH: i32 = 1280;
pub const DEFAULT_CANVAS_HEIGHT: i32 = 800;

/// Windows are keyed by the id of the catalog item that launched them.
pub type WindowId = ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn with_origin(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

/// Size of the desktop canvas the windows live on (taskbar included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopCanvas {
    pub width: i32,
    pub height: i32,
}

impl Default for DesktopCanvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub content: ContentModule,
    pub rect: WindowRect,
    /// Rectangle to return to when leaving maximized state.
    pub restore_rect: WindowRect,
    pub z_order: u64,
    pub minimized: bool,
    pub maximized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartMenuState {
    pub open: bool,
    /// At most one expanded group.
    pub active_submenu: Option<ItemId>,
}

impl StartMenuState {
    pub fn close(&mut self) {
        self.open = false;
        self.active_submenu = None;
    }
}

/// Right-click menu anchored to a taskbar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarMenu {
    pub window_id: WindowId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    /// Open windows in launch order; stacking is carried by `z_order`.
    pub windows: Vec<WindowRecord>,
    pub canvas: DesktopCanvas,
    pub metrics: ShellMetrics,
    pub clock: ClockSettings,
    pub theme: ThemeSettings,
    pub start_menu: StartMenuState,
    pub taskbar_menu: Option<TaskbarMenu>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(ShellMetrics::default(), DesktopCanvas::default())
    }
}

impl DesktopState {
    pub fn new(metrics: ShellMetrics, canvas: DesktopCanvas) -> Self {
        Self {
            windows: Vec::new(),
            canvas,
            metrics,
            clock: ClockSettings::default(),
            theme: ThemeSettings::default(),
            start_menu: StartMenuState::default(),
            taskbar_menu: None,
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    /// Window with the highest `z_order`, minimized or not.
    pub fn topmost_window_id(&self) -> Option<&WindowId> {
        self.windows.iter().max_by_key(|w| w.z_order).map(|w| &w.id)
    }

    /// Highest visible window; this is the one the taskbar highlights.
    pub fn focused_window_id(&self) -> Option<&WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_order)
            .map(|w| &w.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// Pointer gesture state. At most one of the two sessions is armed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.dragging.is_none() && self.resizing.is_none()
    }
}

/// Published on the launch bus whenever a window closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedWindowNotice {
    pub window_id: WindowId,
    pub closed_at_unix_ms: u64,
}
