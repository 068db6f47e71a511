//! Browser desktop shell: a window manager with a start menu, taskbar, and launch request bus.
//!
//! State transitions live in [`reducer`] and are pure; [`DesktopProvider`] owns the reactive
//! container and [`DesktopShell`] renders it.

pub mod catalog;
pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod launch_bus;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ClockSettings, ConfigError, ShellMetrics, ThemeSettings};
pub use launch_bus::{on_window_closed, use_launch_bus, LaunchRequestBus};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
