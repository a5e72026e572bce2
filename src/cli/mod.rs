//! Command Line Interface module
//!
//! - `lookup`: one-shot Genius lookups (search, lyrics, song, artist, albums, tracks)
//! - `prompt`: render the analysis prompts
//! - `config`: inspect configuration
//! - `output`: JSON and markdown rendering of results

pub mod config;
pub mod lookup;
pub mod output;
pub mod prompt;
