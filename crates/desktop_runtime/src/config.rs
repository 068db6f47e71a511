//! Shell metrics, clock, and theme settings consumed read-only by the window manager.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while loading [`ShellMetrics`].
pub enum ConfigError {
    /// The document was not valid JSON or had a field of the wrong type.
    #[error("shell metrics parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field was parsed but its value is unusable.
    #[error("invalid shell metric `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Human-readable rejection reason.
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Pixel metrics that drive window placement and clamping.
pub struct ShellMetrics {
    /// Height of the taskbar strip at the bottom of the canvas.
    pub taskbar_height: i32,
    /// Height of a window title bar; drag keeps it above the taskbar.
    pub title_bar_height: i32,
    /// Minimum window width.
    pub min_width: i32,
    /// Minimum window height.
    pub min_height: i32,
    /// Horizontal title-bar span that must stay reachable while dragging.
    pub drag_grip: i32,
    /// Width used when an item declares none.
    pub fallback_width: i32,
    /// Height used when an item declares none.
    pub fallback_height: i32,
    /// Origin of the first cascaded window.
    pub cascade_origin_x: i32,
    /// Origin of the first cascaded window.
    pub cascade_origin_y: i32,
    /// Offset added per already-open window.
    pub cascade_step: i32,
}

impl Default for ShellMetrics {
    fn default() -> Self {
        Self {
            taskbar_height: 48,
            title_bar_height: 36,
            min_width: 300,
            min_height: 200,
            drag_grip: 120,
            fallback_width: 800,
            fallback_height: 500,
            cascade_origin_x: 80,
            cascade_origin_y: 60,
            cascade_step: 30,
        }
    }
}

impl ShellMetrics {
    /// Parses metrics from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`] when a
    /// value breaks [`ShellMetrics::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let metrics: Self = serde_json::from_str(raw)?;
        metrics.validate()?;
        Ok(metrics)
    }

    /// Checks that the metrics can uphold the size and clamp invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first unusable field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("taskbar_height", self.taskbar_height),
            ("title_bar_height", self.title_bar_height),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }
        if self.drag_grip < 0 || self.cascade_step < 0 {
            return Err(ConfigError::Invalid {
                field: if self.drag_grip < 0 {
                    "drag_grip"
                } else {
                    "cascade_step"
                },
                reason: "must not be negative",
            });
        }
        if self.drag_grip > self.min_width {
            return Err(ConfigError::Invalid {
                field: "drag_grip",
                reason: "must not exceed min_width",
            });
        }
        if self.fallback_width < self.min_width || self.fallback_height < self.min_height {
            return Err(ConfigError::Invalid {
                field: "fallback_width",
                reason: "fallback size must respect the minimum size",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Taskbar clock formatting, mirrored from the external settings store.
pub struct ClockSettings {
    /// Use a 12-hour clock with AM/PM.
    pub twelve_hour: bool,
    /// Append seconds.
    pub show_seconds: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Desktop colours, mirrored from the external settings store. Values are CSS colours.
pub struct ThemeSettings {
    pub background_color: String,
    pub text_color: String,
    /// Drop shadow under desktop text.
    pub text_shadow: bool,
    /// Drop shadow under desktop icons.
    pub icon_shadow: bool,
    pub window_bg_color: String,
    pub window_text_color: String,
    pub taskbar_bg_color: String,
    pub taskbar_text_color: String,
    pub start_button_bg_color: String,
    pub start_button_text_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background_color: "#1a3a5c".to_string(),
            text_color: "#ffffff".to_string(),
            text_shadow: true,
            icon_shadow: true,
            window_bg_color: "#ffffff".to_string(),
            window_text_color: "#222222".to_string(),
            taskbar_bg_color: "#1f2937".to_string(),
            taskbar_text_color: "#f9fafb".to_string(),
            start_button_bg_color: "#2563eb".to_string(),
            start_button_text_color: "#ffffff".to_string(),
        }
    }
}
