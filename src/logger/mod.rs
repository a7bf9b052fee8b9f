//! Tracing subscriber setup and the log macros used across the crate.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
