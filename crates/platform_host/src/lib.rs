//! Host-side helpers consumed by the desktop runtime.
//!
//! This crate is the boundary for things the window manager only reads from its environment:
//! wall-clock time for the taskbar clock and close notifications, and the session gate that
//! logout clears.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod session;
pub mod time;

pub use session::{session_store, MemorySessionStore, SessionGate, SessionUser, SESSION_USER_KEY};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now, ClockReading};
