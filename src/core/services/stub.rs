//! Scripted `GeniusApi` for tests

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::models::{SearchType, SongSort};
use crate::core::services::genius::GeniusApi;
use crate::core::services::raw::{RawAlbum, RawArtist, RawHit, RawSong, RawTrack};
use crate::error::UpstreamError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StubMode {
    #[default]
    Scripted,
    /// Every call times out
    Timeout,
    /// Any call fails the test
    Unreachable,
}

#[derive(Default)]
pub struct StubGenius {
    pub mode: StubMode,
    pub hits: Vec<RawHit>,
    pub artists: HashMap<u64, RawArtist>,
    pub artist_songs: HashMap<u64, Vec<RawSong>>,
    pub artist_albums: HashMap<u64, Vec<RawAlbum>>,
    pub songs: HashMap<u64, RawSong>,
    pub albums: HashMap<u64, RawAlbum>,
    pub album_tracks: HashMap<u64, Vec<RawTrack>>,
    pub pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StubGenius {
    pub fn with_mode(mode: StubMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), UpstreamError> {
        match self.mode {
            StubMode::Unreachable => panic!("unexpected call to Genius: {}", call),
            StubMode::Timeout => {
                self.calls.lock().unwrap().push(call.clone());
                Err(UpstreamError::Timeout { endpoint: call })
            }
            StubMode::Scripted => {
                self.calls.lock().unwrap().push(call);
                Ok(())
            }
        }
    }
}

pub fn song_hit(id: u64, title: &str, artist: &str) -> RawHit {
    serde_json::from_value(json!({
        "type": "song",
        "result": {
            "id": id,
            "title": title,
            "url": format!("https://genius.com/song-{}", id),
            "primary_artist": {"id": id * 10, "name": artist}
        }
    }))
    .unwrap()
}

pub fn artist_hit(id: u64, name: &str) -> RawHit {
    serde_json::from_value(json!({
        "type": "artist",
        "result": {"id": id, "name": name, "url": format!("https://genius.com/artists/{}", id)}
    }))
    .unwrap()
}

pub fn album_hit(id: u64, name: &str, artist: &str) -> RawHit {
    serde_json::from_value(json!({
        "type": "album",
        "result": {"id": id, "name": name, "artist": {"id": 1, "name": artist}}
    }))
    .unwrap()
}

pub fn raw<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[async_trait]
impl GeniusApi for StubGenius {
    async fn search(
        &self,
        query: &str,
        kind: Option<SearchType>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<RawHit>, UpstreamError> {
        let label = kind.map(|k| k.as_str()).unwrap_or("multi");
        self.record(format!("search:{}:{}:{}:{}", label, query, per_page, page))?;
        Ok(self
            .hits
            .iter()
            .filter(|hit| kind.map_or(true, |k| hit.hit_type == k.as_str()))
            .cloned()
            .collect())
    }

    async fn artist(&self, id: u64) -> Result<Option<RawArtist>, UpstreamError> {
        self.record(format!("artist:{}", id))?;
        Ok(self.artists.get(&id).cloned())
    }

    async fn artist_songs(
        &self,
        id: u64,
        sort: SongSort,
        per_page: u32,
        _page: u32,
    ) -> Result<Option<Vec<RawSong>>, UpstreamError> {
        self.record(format!("artist_songs:{}:{}:{}", id, sort.as_str(), per_page))?;
        Ok(self.artist_songs.get(&id).cloned())
    }

    async fn artist_albums(
        &self,
        id: u64,
        per_page: u32,
        _page: u32,
    ) -> Result<Option<Vec<RawAlbum>>, UpstreamError> {
        self.record(format!("artist_albums:{}:{}", id, per_page))?;
        Ok(self.artist_albums.get(&id).cloned())
    }

    async fn song(&self, id: u64) -> Result<Option<RawSong>, UpstreamError> {
        self.record(format!("song:{}", id))?;
        Ok(self.songs.get(&id).cloned())
    }

    async fn album(&self, id: u64) -> Result<Option<RawAlbum>, UpstreamError> {
        self.record(format!("album:{}", id))?;
        Ok(self.albums.get(&id).cloned())
    }

    async fn album_tracks(
        &self,
        id: u64,
        per_page: u32,
        _page: u32,
    ) -> Result<Option<Vec<RawTrack>>, UpstreamError> {
        self.record(format!("album_tracks:{}:{}", id, per_page))?;
        Ok(self.album_tracks.get(&id).cloned())
    }

    async fn song_page(&self, url: &str) -> Result<Option<String>, UpstreamError> {
        self.record(format!("song_page:{}", url))?;
        Ok(self.pages.get(url).cloned())
    }
}
