//! External services integration
//!
//! - Genius API client and the `GeniusApi` trait the adapter is written against
//! - Raw response shapes

pub mod genius;
pub mod raw;

#[cfg(test)]
pub mod stub;

pub use genius::{GeniusApi, GeniusClient};
