//! Lookup adapter: typed requests in, typed records out
//!
//! Each operation is one short, stateless exchange with Genius. Identifiers
//! are parsed once up front; names are resolved with a single search call and
//! the first hit of the right kind wins.

use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

use crate::config::{Config, MAX_PAGE_SIZE};
use crate::core::infrastructure::templates::{
    AnalyzeContext, CompareContext, PromptTemplates, ANALYZE_LYRICS, COMPARE_SONGS,
};
use crate::core::lyrics::LyricsExtractor;
use crate::core::models::{
    AlbumSummary, AlbumTracks, ArtistInfo, Identifier, PromptText, ResultKind, SearchResult,
    SearchType, SongDetails, SongLyrics, SongSort, SongSummary,
};
use crate::core::normalize;
use crate::core::services::GeniusApi;
use crate::error::{LookupError, UpstreamError};

/// Hits fetched when resolving a name to an id.
const RESOLVE_PAGE_SIZE: u32 = 5;
/// Hits considered when picking the song for `get_lyrics`.
const LYRICS_SEARCH_PAGE_SIZE: u32 = 10;

fn non_song_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(track\s?list|album art(work)?|liner notes|booklet|credits|interview|skit|instrumental|setlist)",
        )
        .expect("valid non-song regex")
    })
}

#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub remove_section_headers: bool,
    pub skip_non_songs: bool,
    pub excluded_terms: Vec<String>,
    pub default_page_size: u32,
}

#[cfg(test)]
impl Default for LookupOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl LookupOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            remove_section_headers: config.remove_section_headers,
            skip_non_songs: config.skip_non_songs,
            excluded_terms: config.excluded_terms.clone(),
            default_page_size: config.default_page_size.min(MAX_PAGE_SIZE) as u32,
        }
    }
}

pub struct LookupAdapter {
    api: Arc<dyn GeniusApi>,
    prompts: PromptTemplates,
    extractor: LyricsExtractor,
    options: LookupOptions,
}

/// Album and track listings read a single page of `MAX_PAGE_SIZE` entries.
fn log_full_page(what: &str, identifier: &Identifier, count: usize) {
    if count as u64 >= MAX_PAGE_SIZE {
        debug!(
            "{} {} returned a full page of {}; later entries are not fetched",
            identifier, what, count
        );
    }
}

fn required_text<'a>(value: &'a str, field: &str) -> Result<&'a str, LookupError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LookupError::invalid(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

fn page_size_param(value: i64, field: &str) -> Result<u32, LookupError> {
    if value <= 0 {
        return Err(LookupError::invalid(format!("{} must be positive, got {}", field, value)));
    }
    if value as u64 > MAX_PAGE_SIZE {
        return Err(LookupError::invalid(format!(
            "{} must be at most {}, got {}",
            field, MAX_PAGE_SIZE, value
        )));
    }
    Ok(value as u32)
}

fn page_number_param(value: i64) -> Result<u32, LookupError> {
    if value <= 0 {
        return Err(LookupError::invalid(format!("page must be positive, got {}", value)));
    }
    u32::try_from(value).map_err(|_| LookupError::invalid(format!("page {} is too large", value)))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl LookupAdapter {
    pub fn new(api: Arc<dyn GeniusApi>, prompts: PromptTemplates, options: LookupOptions) -> Self {
        let extractor = LyricsExtractor::new(options.remove_section_headers);
        Self {
            api,
            prompts,
            extractor,
            options,
        }
    }

    pub fn default_page_size(&self) -> u32 {
        self.options.default_page_size
    }

    /// First search hit of `kind` for a free-text name.
    async fn resolve_name(&self, name: &str, kind: SearchType) -> Result<SearchResult, LookupError> {
        debug!("Resolving {} name '{}'", kind.as_str(), name);
        let hits = self.api.search(name, Some(kind), RESOLVE_PAGE_SIZE, 1).await?;
        hits.into_iter()
            .filter_map(normalize::search_result)
            .find(|result| result.kind() == ResultKind::from(kind))
            .ok_or_else(|| LookupError::not_found(format!("no {} matching '{}'", kind.as_str(), name)))
    }

    async fn resolve_id(&self, identifier: &Identifier, kind: SearchType) -> Result<u64, LookupError> {
        match identifier {
            Identifier::Id(id) => Ok(*id),
            Identifier::Name(name) => Ok(self.resolve_name(name, kind).await?.id),
        }
    }

    pub async fn search(
        &self,
        query: &str,
        kind: Option<SearchType>,
        page_size: i64,
        page: i64,
    ) -> Result<Vec<SearchResult>, LookupError> {
        let query = required_text(query, "query")?;
        let per_page = page_size_param(page_size, "page_size")?;
        let page = page_number_param(page)?;

        info!(
            "Searching Genius for '{}' (type: {}, page {} of size {})",
            query,
            kind.map(|k| k.as_str()).unwrap_or("any"),
            page,
            per_page
        );

        let hits = self.api.search(query, kind, per_page, page).await?;
        let mut results: Vec<SearchResult> = hits
            .into_iter()
            .filter_map(normalize::search_result)
            .filter(|result| kind.map_or(true, |k| result.kind() == ResultKind::from(k)))
            .collect();

        // The multi-section search ignores per_page
        results.truncate(per_page as usize);
        debug!("Search returned {} result(s)", results.len());
        Ok(results)
    }

    fn is_lyrics_candidate(&self, requested_title: &str, candidate: &SearchResult) -> bool {
        let title = candidate.title.to_lowercase();
        let requested = requested_title.to_lowercase();

        for term in &self.options.excluded_terms {
            let term = term.to_lowercase();
            if !term.is_empty() && title.contains(&term) && !requested.contains(&term) {
                debug!("Skipping '{}': excluded term '{}'", candidate.title, term);
                return false;
            }
        }

        if self.options.skip_non_songs && non_song_re().is_match(&candidate.title) {
            debug!("Skipping '{}': not a song", candidate.title);
            return false;
        }

        true
    }

    pub async fn get_lyrics(&self, title: &str, artist: Option<&str>) -> Result<SongLyrics, LookupError> {
        let title = required_text(title, "title")?;
        let artist = artist.map(str::trim).filter(|a| !a.is_empty());

        let query = match artist {
            Some(artist) => format!("{} {}", title, artist),
            None => title.to_string(),
        };
        info!("Looking up lyrics for '{}'", query);

        let hits = self
            .api
            .search(&query, Some(SearchType::Song), LYRICS_SEARCH_PAGE_SIZE, 1)
            .await?;
        let candidates: Vec<SearchResult> = hits
            .into_iter()
            .filter_map(normalize::search_result)
            .filter(|result| result.kind() == ResultKind::Song)
            .filter(|result| self.is_lyrics_candidate(title, result))
            .collect();

        let preferred = artist.and_then(|wanted| {
            candidates
                .iter()
                .find(|c| c.artist_name().is_some_and(|name| same_name(name, wanted)))
        });
        let chosen = preferred.or_else(|| candidates.first()).ok_or_else(|| {
            let by = artist.map(|a| format!(" by {}", a)).unwrap_or_default();
            LookupError::not_found(format!("could not find song '{}'{}", title, by))
        })?;

        let url = chosen
            .url
            .clone()
            .ok_or_else(|| LookupError::not_found(format!("'{}' has no song page", chosen.title)))?;
        let html = self
            .api
            .song_page(&url)
            .await?
            .ok_or_else(|| LookupError::not_found(format!("song page for '{}' is gone", chosen.title)))?;

        let lyrics = self.extractor.extract(&html);
        if lyrics.is_empty() {
            return Err(LookupError::not_found(format!(
                "no lyrics published for '{}'",
                chosen.title
            )));
        }

        Ok(SongLyrics {
            id: chosen.id,
            title: chosen.title.clone(),
            artist: chosen.artist_name().unwrap_or_default().to_string(),
            lyrics,
            url,
        })
    }

    pub async fn get_song(&self, song_identifier: &str) -> Result<SongDetails, LookupError> {
        let identifier = Identifier::parse(song_identifier)?;
        info!("Fetching song {}", identifier);

        let id = self.resolve_id(&identifier, SearchType::Song).await?;
        self.api
            .song(id)
            .await?
            .and_then(normalize::song_details)
            .ok_or_else(|| LookupError::not_found(format!("song {}", identifier)))
    }

    pub async fn get_artist(&self, artist_identifier: &str, max_songs: i64) -> Result<ArtistInfo, LookupError> {
        let identifier = Identifier::parse(artist_identifier)?;
        let max_songs = match max_songs {
            0 => 0,
            n => page_size_param(n, "max_songs")?,
        };
        info!("Fetching artist {}", identifier);

        let id = self.resolve_id(&identifier, SearchType::Artist).await?;
        let artist = self
            .api
            .artist(id)
            .await?
            .ok_or_else(|| LookupError::not_found(format!("artist {}", identifier)))?;

        let top_songs = if max_songs > 0 {
            let mut songs: Vec<SongSummary> = self
                .api
                .artist_songs(id, SongSort::Popularity, max_songs, 1)
                .await?
                .unwrap_or_default()
                .into_iter()
                .filter_map(normalize::song_summary)
                .collect();
            songs.truncate(max_songs as usize);
            songs
        } else {
            Vec::new()
        };

        normalize::artist_info(artist, top_songs).ok_or_else(|| {
            LookupError::Upstream(UpstreamError::InvalidResponse {
                endpoint: format!("/artists/{}", id),
                reason: "artist without id or name".to_string(),
            })
        })
    }

    pub async fn get_artist_songs(
        &self,
        artist_identifier: &str,
        page_size: i64,
        sort: SongSort,
    ) -> Result<Vec<SongSummary>, LookupError> {
        let identifier = Identifier::parse(artist_identifier)?;
        let per_page = page_size_param(page_size, "page_size")?;
        info!("Fetching songs of artist {} by {}", identifier, sort.as_str());

        let id = self.resolve_id(&identifier, SearchType::Artist).await?;
        let mut songs: Vec<SongSummary> = self
            .api
            .artist_songs(id, sort, per_page, 1)
            .await?
            .ok_or_else(|| LookupError::not_found(format!("artist {}", identifier)))?
            .into_iter()
            .filter_map(normalize::song_summary)
            .collect();

        songs.truncate(per_page as usize);
        Ok(songs)
    }

    pub async fn get_artist_albums(&self, artist_identifier: &str) -> Result<Vec<AlbumSummary>, LookupError> {
        let identifier = Identifier::parse(artist_identifier)?;
        info!("Fetching albums of artist {}", identifier);

        let id = self.resolve_id(&identifier, SearchType::Artist).await?;
        let raw_albums = self
            .api
            .artist_albums(id, MAX_PAGE_SIZE as u32, 1)
            .await?
            .ok_or_else(|| LookupError::not_found(format!("artist {}", identifier)))?;
        log_full_page("albums", &identifier, raw_albums.len());

        Ok(raw_albums.into_iter().filter_map(normalize::album_summary).collect())
    }

    pub async fn get_album_tracks(&self, album_identifier: &str) -> Result<AlbumTracks, LookupError> {
        let identifier = Identifier::parse(album_identifier)?;
        info!("Fetching tracks of album {}", identifier);

        let (album_id, title, artist) = match &identifier {
            Identifier::Id(id) => {
                let album = self
                    .api
                    .album(*id)
                    .await?
                    .ok_or_else(|| LookupError::not_found(format!("album {}", identifier)))?;
                let title = album
                    .name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| format!("Album {}", id));
                let artist = album.artist.and_then(|a| a.name);
                (*id, title, artist)
            }
            Identifier::Name(name) => {
                let hit = self.resolve_name(name, SearchType::Album).await?;
                let artist = hit.artist_name().map(str::to_string);
                (hit.id, hit.title, artist)
            }
        };

        let raw_tracks = self
            .api
            .album_tracks(album_id, MAX_PAGE_SIZE as u32, 1)
            .await?
            .ok_or_else(|| LookupError::not_found(format!("album {}", identifier)))?;
        log_full_page("tracks", &identifier, raw_tracks.len());

        Ok(normalize::album_tracks(album_id, title, artist, raw_tracks))
    }

    pub fn analyze_lyrics(&self, artist: &str, song: &str) -> Result<PromptText, LookupError> {
        let context = AnalyzeContext {
            artist: required_text(artist, "artist")?,
            song: required_text(song, "song")?,
        };
        Ok(PromptText::new(self.prompts.render(ANALYZE_LYRICS, &context)?))
    }

    pub fn compare_songs(&self, artist: &str, song1: &str, song2: &str) -> Result<PromptText, LookupError> {
        let context = CompareContext {
            artist: required_text(artist, "artist")?,
            song1: required_text(song1, "song1")?,
            song2: required_text(song2, "song2")?,
        };
        Ok(PromptText::new(self.prompts.render(COMPARE_SONGS, &context)?))
    }
}
