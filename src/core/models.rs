//! Typed records returned by the lookup adapter
//!
//! Everything here is built from a single upstream interaction and thrown
//! away once the response is sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;

/// Kind filter for `search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Song,
    Artist,
    Album,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Song => "song",
            SearchType::Artist => "artist",
            SearchType::Album => "album",
        }
    }
}

impl FromStr for SearchType {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "song" => Ok(SearchType::Song),
            "artist" => Ok(SearchType::Artist),
            "album" => Ok(SearchType::Album),
            other => Err(LookupError::invalid(format!(
                "unknown search type '{}', expected song, artist or album",
                other
            ))),
        }
    }
}

/// Ordering of an artist's song list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SongSort {
    #[default]
    Popularity,
    Title,
    ReleaseDate,
}

impl SongSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongSort::Popularity => "popularity",
            SongSort::Title => "title",
            SongSort::ReleaseDate => "release_date",
        }
    }
}

impl FromStr for SongSort {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "popularity" => Ok(SongSort::Popularity),
            "title" => Ok(SongSort::Title),
            "release_date" => Ok(SongSort::ReleaseDate),
            other => Err(LookupError::invalid(format!(
                "unknown sort '{}', expected popularity, title or release_date",
                other
            ))),
        }
    }
}

/// A Genius id or a free-text name that still needs resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Id(u64),
    Name(String),
}

impl Identifier {
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LookupError::invalid("identifier must not be empty"));
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse::<u64>() {
                return Ok(Identifier::Id(id));
            }
        }

        Ok(Identifier::Name(trimmed.to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "#{}", id),
            Identifier::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Artist,
    Song,
    Album,
    Other,
}

impl From<SearchType> for ResultKind {
    fn from(kind: SearchType) -> Self {
        match kind {
            SearchType::Artist => ResultKind::Artist,
            SearchType::Song => ResultKind::Song,
            SearchType::Album => ResultKind::Album,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    #[serde(flatten)]
    pub details: SearchDetails,
}

/// Fields that only make sense for one kind of hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchDetails {
    Artist {
        image_url: Option<String>,
    },
    Song {
        artist: String,
        release_date: Option<String>,
    },
    Album {
        artist: Option<String>,
        release_year: Option<i32>,
    },
    Other {
        hit_type: String,
    },
}

impl SearchResult {
    pub fn kind(&self) -> ResultKind {
        match self.details {
            SearchDetails::Artist { .. } => ResultKind::Artist,
            SearchDetails::Song { .. } => ResultKind::Song,
            SearchDetails::Album { .. } => ResultKind::Album,
            SearchDetails::Other { .. } => ResultKind::Other,
        }
    }

    pub fn artist_name(&self) -> Option<&str> {
        match &self.details {
            SearchDetails::Song { artist, .. } => Some(artist),
            SearchDetails::Album { artist, .. } => artist.as_deref(),
            SearchDetails::Artist { .. } => Some(&self.title),
            SearchDetails::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongSummary {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub url: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongDetails {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub release_date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongLyrics {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistInfo {
    pub id: u64,
    pub name: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub alternate_names: Vec<String>,
    pub followers_count: Option<u64>,
    pub description: Option<String>,
    pub top_songs: Vec<SongSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumSummary {
    pub id: u64,
    pub name: String,
    pub url: Option<String>,
    pub release_year: Option<i32>,
    pub cover_art_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumTrack {
    pub number: u32,
    pub title: String,
    pub song_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumTracks {
    pub album_id: u64,
    pub title: String,
    pub artist: Option<String>,
    pub tracks: Vec<AlbumTrack>,
}

/// Rendered prompt. Plain text, never checked against Genius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PromptText(String);

impl PromptText {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
