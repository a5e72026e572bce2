use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

use crate::core::models::{
    AlbumSummary, AlbumTracks, ArtistInfo, SearchDetails, SearchResult, SongDetails, SongLyrics,
    SongSummary,
};
use crate::error::{GeniusMcpError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, same shape as the MCP tool results
    #[default]
    Json,
    /// Markdown for reading in a terminal
    Text,
}

/// Human-readable markdown rendering of a lookup result.
pub trait Markdown {
    fn to_markdown(&self) -> String;
}

pub fn print<T: Serialize + Markdown>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| GeniusMcpError::Internal(e.into()))?,
        OutputFormat::Text => value.to_markdown(),
    };
    println!("{}", rendered);
    Ok(())
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("Unknown")
}

impl Markdown for Vec<SearchResult> {
    fn to_markdown(&self) -> String {
        if self.is_empty() {
            return "No results.".to_string();
        }

        let mut out = String::from("# Search results\n\n");
        for result in self {
            let line = match &result.details {
                SearchDetails::Song { artist, .. } => format!("**{}** by {}", result.title, artist),
                SearchDetails::Album { artist, release_year } => {
                    let year = release_year.map(|y| format!(" ({})", y)).unwrap_or_default();
                    format!("**{}** by {}{}", result.title, or_unknown(artist.as_deref()), year)
                }
                SearchDetails::Artist { .. } => format!("**{}**", result.title),
                SearchDetails::Other { hit_type } => format!("**{}** [{}]", result.title, hit_type),
            };
            let _ = writeln!(out, "- {} (#{})", line, result.id);
        }
        out
    }
}

impl Markdown for SongLyrics {
    fn to_markdown(&self) -> String {
        format!(
            "# {} by {}\n\n{}\n\n## Lyrics\n\n{}",
            self.title, self.artist, self.url, self.lyrics
        )
    }
}

impl Markdown for SongDetails {
    fn to_markdown(&self) -> String {
        format!(
            "# {} by {}\n\n**Album**: {}\n**Release date**: {}\n**Genius id**: {}",
            self.title,
            self.artist,
            or_unknown(self.album.as_deref()),
            or_unknown(self.release_date.as_deref()),
            self.id
        )
    }
}

impl Markdown for ArtistInfo {
    fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.name);

        let alternate = if self.alternate_names.is_empty() {
            "None".to_string()
        } else {
            self.alternate_names.join(", ")
        };
        let _ = writeln!(out, "**Alternate names**: {}\n", alternate);
        let _ = writeln!(
            out,
            "**Description**:\n{}\n",
            self.description.as_deref().unwrap_or("No description available")
        );
        if let Some(followers) = self.followers_count {
            let _ = writeln!(out, "**Followers count**: {}", followers);
        }

        if !self.top_songs.is_empty() {
            let _ = writeln!(out, "\n**Top {} songs**:", self.top_songs.len());
            for song in &self.top_songs {
                let _ = writeln!(out, "- {}", song.title);
            }
        }
        out
    }
}

impl Markdown for Vec<SongSummary> {
    fn to_markdown(&self) -> String {
        if self.is_empty() {
            return "No songs.".to_string();
        }

        let mut out = String::from("# Songs\n\n");
        for (i, song) in self.iter().enumerate() {
            let date = song.release_date.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default();
            let _ = writeln!(out, "{}. **{}** - {}{}", i + 1, song.title, song.artist, date);
        }
        out
    }
}

impl Markdown for Vec<AlbumSummary> {
    fn to_markdown(&self) -> String {
        if self.is_empty() {
            return "No albums.".to_string();
        }

        let mut out = String::from("# Albums\n\n");
        for album in self {
            let year = album
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let _ = writeln!(out, "- **{}** ({})", album.name, year);
        }
        let _ = write!(out, "\nTotal: {} albums", self.len());
        out
    }
}

impl Markdown for AlbumTracks {
    fn to_markdown(&self) -> String {
        let mut out = match &self.artist {
            Some(artist) => format!("# {} by {}\n\n", self.title, artist),
            None => format!("# {}\n\n", self.title),
        };
        for track in &self.tracks {
            let _ = writeln!(out, "{}. {}", track.number, track.title);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AlbumTrack;

    #[test]
    fn test_album_list_markdown() {
        let albums = vec![
            AlbumSummary {
                id: 1,
                name: "Thriller".to_string(),
                url: None,
                release_year: Some(1982),
                cover_art_url: None,
            },
            AlbumSummary {
                id: 2,
                name: "Bad".to_string(),
                url: None,
                release_year: None,
                cover_art_url: None,
            },
        ];

        let text = albums.to_markdown();
        assert!(text.contains("- **Thriller** (1982)"));
        assert!(text.contains("- **Bad** (Unknown)"));
        assert!(text.ends_with("Total: 2 albums"));
    }

    #[test]
    fn test_album_tracks_markdown() {
        let album = AlbumTracks {
            album_id: 9,
            title: "Innuendo".to_string(),
            artist: Some("Queen".to_string()),
            tracks: vec![
                AlbumTrack { number: 1, title: "Innuendo".to_string(), song_id: Some(1) },
                AlbumTrack { number: 2, title: "I'm Going Slightly Mad".to_string(), song_id: None },
            ],
        };

        assert_eq!(
            album.to_markdown(),
            "# Innuendo by Queen\n\n1. Innuendo\n2. I'm Going Slightly Mad\n"
        );
    }

    #[test]
    fn test_empty_search_markdown() {
        assert_eq!(Vec::<SearchResult>::new().to_markdown(), "No results.");
    }
}
