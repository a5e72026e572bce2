use clap::{Args, Subcommand};

use crate::core::infrastructure::templates::{
    AnalyzeContext, CompareContext, ANALYZE_LYRICS, COMPARE_SONGS,
};
use crate::error::{GeniusMcpError, Result};
use crate::services::SimpleServices;

#[derive(Args)]
pub struct PromptArgs {
    #[command(subcommand)]
    command: PromptCommands,
}

#[derive(Subcommand)]
enum PromptCommands {
    /// Render the lyrics analysis prompt
    Analyze {
        /// Artist name
        artist: String,

        /// Song title
        song: String,
    },

    /// Render the song comparison prompt
    Compare {
        /// Artist name
        artist: String,

        /// First song title
        song1: String,

        /// Second song title
        song2: String,
    },
}

fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GeniusMcpError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

/// Prompts are rendered locally; no Genius token is needed.
pub async fn execute(args: PromptArgs, services: &SimpleServices) -> Result<()> {
    let templates = services.create_prompt_templates()?;

    let text = match args.command {
        PromptCommands::Analyze { artist, song } => templates.render(
            ANALYZE_LYRICS,
            &AnalyzeContext {
                artist: non_empty(&artist, "artist")?,
                song: non_empty(&song, "song")?,
            },
        )?,
        PromptCommands::Compare { artist, song1, song2 } => templates.render(
            COMPARE_SONGS,
            &CompareContext {
                artist: non_empty(&artist, "artist")?,
                song1: non_empty(&song1, "song1")?,
                song2: non_empty(&song2, "song2")?,
            },
        )?,
    };

    println!("{}", text);
    Ok(())
}
