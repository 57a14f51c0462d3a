//! Terminal reporting.
//!
//! All user-facing formatting lives here so the selection/classification code
//! stays clean and output changes are localized.

pub mod format;

pub use format::*;
