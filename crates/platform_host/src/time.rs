//! Wall-clock helpers for close notifications and the taskbar clock.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_ISSUED_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp strictly greater than any previously issued one.
///
/// Two windows closed within the same millisecond still get distinct notification stamps.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_ISSUED_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Local time-of-day reading shown by the taskbar clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Hour in `0..24`.
    pub hour: u32,
    /// Minute in `0..60`.
    pub minute: u32,
    /// Second in `0..60`.
    pub second: u32,
}

impl ClockReading {
    /// Reads the local time of day.
    ///
    /// Native targets have no timezone database here and report UTC.
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
                second: date.get_seconds(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::from_unix_ms_utc(unix_time_ms_now())
        }
    }

    /// Converts a unix millisecond timestamp to a UTC time of day.
    pub fn from_unix_ms_utc(unix_ms: u64) -> Self {
        let seconds_of_day = (unix_ms / 1000) % 86_400;
        Self {
            hour: (seconds_of_day / 3600) as u32,
            minute: ((seconds_of_day % 3600) / 60) as u32,
            second: (seconds_of_day % 60) as u32,
        }
    }

    /// Formats the reading as `HH:MM[:SS]`, or `hh:MM[:SS] AM/PM` when `twelve_hour` is set.
    pub fn format(self, twelve_hour: bool, show_seconds: bool) -> String {
        let (hour, suffix) = if twelve_hour {
            let suffix = if self.hour < 12 { " AM" } else { " PM" };
            let hour = match self.hour % 12 {
                0 => 12,
                h => h,
            };
            (hour, suffix)
        } else {
            (self.hour, "")
        };

        if show_seconds {
            format!("{hour:02}:{:02}:{:02}{suffix}", self.minute, self.second)
        } else {
            format!("{hour:02}:{:02}{suffix}", self.minute)
        }
    }
}
