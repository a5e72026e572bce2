//! Cross-cutting pieces of the core
//!
//! - `templates`: Handlebars prompt templates

pub mod templates;

pub use templates::PromptTemplates;
