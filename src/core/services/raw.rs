//! Response shapes of the Genius API as they come off the wire
//!
//! Every field is optional; `core::normalize` decides what is required.

use serde::Deserialize;

/// `{"meta": {...}, "response": {...}}`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HitsResponse {
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SectionsResponse {
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSection {
    #[serde(rename = "type")]
    pub section_type: String,
    pub hits: Vec<RawHit>,
}

/// A search hit. `result` is kept as JSON until the hit type is known, so a
/// single odd hit cannot fail the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHit {
    #[serde(rename = "type")]
    pub hit_type: String,
    pub result: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistResponse {
    pub artist: Option<RawArtist>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SongResponse {
    pub song: Option<RawSong>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlbumResponse {
    pub album: Option<RawAlbum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SongsResponse {
    pub songs: Vec<RawSong>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlbumsResponse {
    pub albums: Vec<RawAlbum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TracksResponse {
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawArtist {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub alternate_names: Option<Vec<String>>,
    pub followers_count: Option<u64>,
    pub description: Option<RawDescription>,
}

/// Only present with `text_format=plain`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDescription {
    pub plain: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSong {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub artist_names: Option<String>,
    pub primary_artist: Option<RawArtist>,
    pub album: Option<RawAlbum>,
    pub release_date: Option<String>,
    pub release_date_for_display: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAlbum {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub cover_art_url: Option<String>,
    pub artist: Option<RawArtist>,
    pub release_date_components: Option<RawDateComponents>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDateComponents {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTrack {
    pub number: Option<u32>,
    pub song: Option<RawSong>,
}

/// Fields shared by hits of unknown type (lyric, video, article, user).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOther {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub full_title: Option<String>,
    pub url: Option<String>,
}
