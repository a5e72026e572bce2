//! Service wiring: builds the Genius client and lookup adapter from `Config`

pub mod simple_container;

pub use simple_container::SimpleServices;
