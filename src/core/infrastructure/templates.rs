use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::config::PromptConfig;
use crate::error::TemplateError;

pub const ANALYZE_LYRICS: &str = "analyze_lyrics";
pub const COMPARE_SONGS: &str = "compare_songs";

const DEFAULT_ANALYZE_LYRICS: &str = "Please analyze the lyrics of the song '{{song}}' by {{artist}}.\n\
Consider the themes, literary devices, cultural context, and meaning.\n\n\
First, I'll help you access the lyrics using the Genius MCP server.";

const DEFAULT_COMPARE_SONGS: &str = "Please compare and contrast the lyrics and themes of '{{song1}}' and '{{song2}}' by {{artist}}.\n\
Consider how these songs relate to each other, evolution in style, recurring themes, and differences.\n\n\
First, I'll help you access the lyrics of both songs using the Genius MCP server.";

#[derive(Debug, Serialize)]
pub struct AnalyzeContext<'a> {
    pub artist: &'a str,
    pub song: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CompareContext<'a> {
    pub artist: &'a str,
    pub song1: &'a str,
    pub song2: &'a str,
}

/// Prompt templates, registered once at startup.
///
/// Output is plain text, so HTML escaping is switched off.
pub struct PromptTemplates {
    handlebars: Handlebars<'static>,
}

impl PromptTemplates {
    pub fn new(overrides: &PromptConfig) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        let analyze = overrides.analyze_lyrics.as_deref().unwrap_or(DEFAULT_ANALYZE_LYRICS);
        let compare = overrides.compare_songs.as_deref().unwrap_or(DEFAULT_COMPARE_SONGS);

        for (name, template) in [(ANALYZE_LYRICS, analyze), (COMPARE_SONGS, compare)] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| TemplateError::Parse {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;
            debug!("Registered prompt template: {}", name);
        }

        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, TemplateError> {
        self.handlebars
            .render(name, context)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
impl Default for PromptTemplates {
    fn default() -> Self {
        Self::new(&PromptConfig::default()).expect("built-in prompt templates are valid")
    }
}
