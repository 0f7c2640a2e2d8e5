#![forbid(unsafe_code)]
//! Tickd wire-faithful data model.
//!
//! Everything a timer looks like on disk and over HTTP lives here; no I/O.

mod elapsed;
mod timer;

pub use elapsed::ElapsedTime;
pub use timer::{epoch_ms_to_rfc3339, Timer, TimerId, TimerStatus, DEFAULT_LABEL};

pub const CRATE_NAME: &str = "tickd-model";
