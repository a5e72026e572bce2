//! Utility modules
//!
//! - `logging`: tracing subscriber setup

pub mod logging;
