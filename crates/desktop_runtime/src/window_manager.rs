//! Geometry and stacking helpers shared by the desktop reducer.

use desktop_app_contract::AppItem;

use crate::{
    config::ShellMetrics,
    model::{DesktopCanvas, DesktopState, WindowId, WindowRect},
};

/// Rectangle a new window gets when `open_count` windows are already open.
///
/// Declared sizes are raised to the minimum; undeclared (or zero) sizes use the fallback.
pub fn cascade_rect(metrics: &ShellMetrics, open_count: usize, item: &AppItem) -> WindowRect {
    let step = metrics.cascade_step.saturating_mul(open_count as i32);
    let declared = |value: Option<i32>, fallback: i32| value.filter(|v| *v > 0).unwrap_or(fallback);
    WindowRect {
        x: metrics.cascade_origin_x.saturating_add(step),
        y: metrics.cascade_origin_y.saturating_add(step),
        w: declared(item.default_width, metrics.fallback_width),
        h: declared(item.default_height, metrics.fallback_height),
    }
    .clamped_min(metrics.min_width, metrics.min_height)
}

/// Full-canvas rectangle above the taskbar.
pub fn maximized_rect(metrics: &ShellMetrics, canvas: DesktopCanvas) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: canvas.width,
        h: canvas.height - metrics.taskbar_height,
    }
    .clamped_min(metrics.min_width, metrics.min_height)
}

/// Moves `rect` to the raw origin, clamped so the title bar stays reachable.
///
/// `y` stays within `[0, canvas.height - taskbar - title_bar]` and `x` within
/// `[-(w - grip), canvas.width - grip]`. The lower bound wins on a canvas too small for both.
pub fn clamp_drag_origin(
    metrics: &ShellMetrics,
    canvas: DesktopCanvas,
    rect: WindowRect,
    raw_x: i32,
    raw_y: i32,
) -> WindowRect {
    let min_x = -(rect.w - metrics.drag_grip);
    let max_x = canvas.width - metrics.drag_grip;
    let max_y = canvas.height - metrics.taskbar_height - metrics.title_bar_height;
    rect.with_origin(raw_x.min(max_x).max(min_x), raw_y.min(max_y).max(0))
}

/// Bottom-right corner resize from `start`; origin is untouched and there is no upper bound.
pub fn resize_extent(metrics: &ShellMetrics, start: WindowRect, dx: i32, dy: i32) -> WindowRect {
    WindowRect {
        w: start.w.saturating_add(dx),
        h: start.h.saturating_add(dy),
        ..start
    }
    .clamped_min(metrics.min_width, metrics.min_height)
}

/// Highest allocated stacking value among open windows.
pub fn top_z_order(state: &DesktopState) -> Option<u64> {
    state.windows.iter().map(|w| w.z_order).max()
}

/// Next stacking value: one past the current maximum, `0` on an empty desktop.
pub fn next_z_order(state: &DesktopState) -> u64 {
    top_z_order(state).map_or(0, |top| top.saturating_add(1))
}

/// Raises `window_id` above every other window.
///
/// Returns `false` when the window is missing. Raising the current top is a no-op.
pub fn focus_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let next = next_z_order(state);
    let top = top_z_order(state);
    let Some(window) = state.windows.iter_mut().find(|w| &w.id == window_id) else {
        return false;
    };
    if Some(window.z_order) != top {
        window.z_order = next;
    }
    true
}

/// Re-fits every maximized window to the current canvas.
pub fn refit_maximized_windows(state: &mut DesktopState) {
    let full = maximized_rect(&state.metrics, state.canvas);
    for window in state.windows.iter_mut().filter(|w| w.maximized) {
        window.rect = full;
    }
}
