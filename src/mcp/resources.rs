//! `artist://{artist_name}/info` and `song://{artist_name}/{song_title}`
//! resources, rendered as markdown.

use rmcp::model::ResourceTemplate;
use serde_json::json;

use crate::cli::output::Markdown;
use crate::core::LookupAdapter;
use crate::error::LookupError;

pub const ARTIST_INFO_TEMPLATE: &str = "artist://{artist_name}/info";
pub const SONG_LYRICS_TEMPLATE: &str = "song://{artist_name}/{song_title}";

const MARKDOWN: &str = "text/markdown";
const ARTIST_TOP_SONGS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    ArtistInfo { artist: String },
    SongLyrics { artist: String, title: String },
}

impl ResourceUri {
    /// Path segments are percent-decoded after splitting, so `%2F` may
    /// appear inside a name.
    pub fn parse(uri: &str) -> Result<Self, LookupError> {
        if let Some(rest) = uri.strip_prefix("artist://") {
            let artist = rest.strip_suffix("/info").ok_or_else(|| malformed(uri))?;
            return Ok(ResourceUri::ArtistInfo {
                artist: decode_segment(artist, uri)?,
            });
        }

        if let Some(rest) = uri.strip_prefix("song://") {
            let (artist, title) = rest.split_once('/').ok_or_else(|| malformed(uri))?;
            return Ok(ResourceUri::SongLyrics {
                artist: decode_segment(artist, uri)?,
                title: decode_segment(title, uri)?,
            });
        }

        Err(LookupError::invalid(format!("Unsupported resource URI: {}", uri)))
    }

    pub async fn read(&self, adapter: &LookupAdapter) -> Result<String, LookupError> {
        match self {
            ResourceUri::ArtistInfo { artist } => adapter
                .get_artist(artist, ARTIST_TOP_SONGS)
                .await
                .map(|info| info.to_markdown()),
            ResourceUri::SongLyrics { artist, title } => adapter
                .get_lyrics(title, Some(artist))
                .await
                .map(|lyrics| lyrics.to_markdown()),
        }
    }
}

fn malformed(uri: &str) -> LookupError {
    LookupError::invalid(format!(
        "Malformed resource URI '{}', expected {} or {}",
        uri, ARTIST_INFO_TEMPLATE, SONG_LYRICS_TEMPLATE
    ))
}

fn decode_segment(segment: &str, uri: &str) -> Result<String, LookupError> {
    if segment.contains('/') {
        return Err(malformed(uri));
    }

    let decoded = urlencoding::decode(segment).map_err(|_| malformed(uri))?;
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        return Err(malformed(uri));
    }

    Ok(trimmed.to_string())
}

pub fn templates() -> Result<Vec<ResourceTemplate>, serde_json::Error> {
    [
        json!({
            "uriTemplate": ARTIST_INFO_TEMPLATE,
            "name": "artist_info",
            "description": "Artist name, alternate names, description and followers",
            "mimeType": MARKDOWN,
        }),
        json!({
            "uriTemplate": SONG_LYRICS_TEMPLATE,
            "name": "song_lyrics",
            "description": "Lyrics of a song by an artist",
            "mimeType": MARKDOWN,
        }),
    ]
    .into_iter()
    .map(serde_json::from_value)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_artist_uri() {
        assert_eq!(
            ResourceUri::parse("artist://Queen/info").unwrap(),
            ResourceUri::ArtistInfo {
                artist: "Queen".to_string()
            }
        );
        assert_eq!(
            ResourceUri::parse("artist://Earth%2C%20Wind%20%26%20Fire/info").unwrap(),
            ResourceUri::ArtistInfo {
                artist: "Earth, Wind & Fire".to_string()
            }
        );
    }

    #[test]
    fn test_parse_song_uri() {
        assert_eq!(
            ResourceUri::parse("song://Queen/Bohemian%20Rhapsody").unwrap(),
            ResourceUri::SongLyrics {
                artist: "Queen".to_string(),
                title: "Bohemian Rhapsody".to_string(),
            }
        );
        assert_eq!(
            ResourceUri::parse("song://AC%2FDC/Thunderstruck").unwrap(),
            ResourceUri::SongLyrics {
                artist: "AC/DC".to_string(),
                title: "Thunderstruck".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_uris_are_invalid() {
        for uri in [
            "artist://Queen",
            "artist:///info",
            "artist://Queen/songs",
            "song://Queen",
            "song://Queen/",
            "song://%20/Hello",
            "song://Queen/A/B",
            "album://Thriller",
            "",
        ] {
            assert!(
                matches!(ResourceUri::parse(uri), Err(LookupError::InvalidArgument(_))),
                "{uri} should be rejected"
            );
        }
    }

    #[test]
    fn test_templates_are_listed() {
        let templates = templates().unwrap();
        let uris: Vec<&str> = templates.iter().map(|t| t.uri_template.as_str()).collect();
        assert_eq!(uris, vec![ARTIST_INFO_TEMPLATE, SONG_LYRICS_TEMPLATE]);
    }
}
