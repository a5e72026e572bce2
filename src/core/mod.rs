//! Core functionality modules
//!
//! - `services`: Genius API client and raw response shapes
//! - `normalize`: raw payloads to typed records
//! - `lyrics`: lyrics text extraction from song pages
//! - `adapter`: the lookup operations exposed over MCP and the CLI
//! - `infrastructure`: cross-cutting concerns (prompt templates)

pub mod adapter;
pub mod infrastructure;
pub mod lyrics;
pub mod models;
pub mod normalize;
pub mod services;

pub use adapter::{LookupAdapter, LookupOptions};
