use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{AccessToken, Config};
use crate::core::models::{SearchType, SongSort};
use crate::core::services::raw::{
    AlbumResponse, AlbumsResponse, ArtistResponse, Envelope, HitsResponse, RawAlbum, RawArtist,
    RawHit, RawSong, RawTrack, SectionsResponse, SongResponse, SongsResponse, TracksResponse,
};
use crate::error::{ConfigError, UpstreamError};

/// Read-only view of the Genius service used by the lookup adapter.
///
/// Methods keyed by an id return `Ok(None)` when Genius answers 404.
#[async_trait]
pub trait GeniusApi: Send + Sync {
    /// Search hits. Without a type, hits of every type are returned.
    async fn search(
        &self,
        query: &str,
        kind: Option<SearchType>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<RawHit>, UpstreamError>;

    async fn artist(&self, id: u64) -> Result<Option<RawArtist>, UpstreamError>;

    async fn artist_songs(
        &self,
        id: u64,
        sort: SongSort,
        per_page: u32,
        page: u32,
    ) -> Result<Option<Vec<RawSong>>, UpstreamError>;

    async fn artist_albums(
        &self,
        id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<Option<Vec<RawAlbum>>, UpstreamError>;

    async fn song(&self, id: u64) -> Result<Option<RawSong>, UpstreamError>;

    async fn album(&self, id: u64) -> Result<Option<RawAlbum>, UpstreamError>;

    async fn album_tracks(
        &self,
        id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<Option<Vec<RawTrack>>, UpstreamError>;

    /// HTML of a song page on genius.com.
    async fn song_page(&self, url: &str) -> Result<Option<String>, UpstreamError>;
}

/// HTTP client for the Genius REST and public APIs.
///
/// The token is attached per request to API calls only; song page fetches go
/// out unauthenticated.
#[derive(Clone)]
pub struct GeniusClient {
    client: reqwest::Client,
    token: AccessToken,
    api_base_url: String,
    public_api_base_url: String,
}

impl GeniusClient {
    pub fn new(config: &Config, token: AccessToken) -> Result<Self, ConfigError> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("genius-mcp/{}", version);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(user_agent)
            .build()
            .map_err(ConfigError::HttpClient)?;

        info!(
            "Genius client ready (api: {}, timeout: {}s)",
            config.api_base_url, config.request_timeout_seconds
        );

        Ok(Self {
            client,
            token,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            public_api_base_url: config.public_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_api<T: DeserializeOwned>(
        &self,
        base_url: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, UpstreamError> {
        let url = format!("{}{}", base_url, endpoint);
        debug!("GET {} {:?}", endpoint, params);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose())
            .query(params)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(endpoint, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} answered 404", endpoint);
            return Ok(None);
        }
        check_status(endpoint, status)?;

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(endpoint, e))?;
        decode_envelope(endpoint, &body).map(Some)
    }
}

fn check_status(endpoint: &str, status: StatusCode) -> Result<(), UpstreamError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(UpstreamError::Authentication),
        StatusCode::TOO_MANY_REQUESTS => Err(UpstreamError::RateLimit),
        s => Err(UpstreamError::Status {
            endpoint: endpoint.to_string(),
            status: s.as_u16(),
        }),
    }
}

fn decode_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, UpstreamError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.response)
        .map_err(|e| UpstreamError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
}

/// Flattens a sectioned search. `top_hit` repeats a hit from another section.
fn flatten_sections(response: SectionsResponse) -> Vec<RawHit> {
    response
        .sections
        .into_iter()
        .filter(|section| section.section_type != "top_hit")
        .flat_map(|section| section.hits)
        .collect()
}

fn paging(per_page: u32, page: u32) -> Vec<(&'static str, String)> {
    vec![("per_page", per_page.to_string()), ("page", page.to_string())]
}

#[async_trait]
impl GeniusApi for GeniusClient {
    async fn search(
        &self,
        query: &str,
        kind: Option<SearchType>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<RawHit>, UpstreamError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(paging(per_page, page));

        match kind {
            // Song search is the one the authenticated API offers
            Some(SearchType::Song) => {
                let response: Option<HitsResponse> =
                    self.get_api(&self.api_base_url, "/search", &params).await?;
                Ok(response.map(|r| r.hits).unwrap_or_default())
            }
            Some(kind) => {
                let endpoint = format!("/search/{}", kind.as_str());
                let response: Option<SectionsResponse> =
                    self.get_api(&self.public_api_base_url, &endpoint, &params).await?;
                Ok(response.map(flatten_sections).unwrap_or_default())
            }
            None => {
                let response: Option<SectionsResponse> = self
                    .get_api(&self.public_api_base_url, "/search/multi", &params)
                    .await?;
                Ok(response.map(flatten_sections).unwrap_or_default())
            }
        }
    }

    async fn artist(&self, id: u64) -> Result<Option<RawArtist>, UpstreamError> {
        let params = vec![("text_format", "plain".to_string())];
        let response: Option<ArtistResponse> = self
            .get_api(&self.api_base_url, &format!("/artists/{}", id), &params)
            .await?;
        Ok(response.and_then(|r| r.artist))
    }

    async fn artist_songs(
        &self,
        id: u64,
        sort: SongSort,
        per_page: u32,
        page: u32,
    ) -> Result<Option<Vec<RawSong>>, UpstreamError> {
        let mut params = vec![("sort", sort.as_str().to_string())];
        params.extend(paging(per_page, page));
        let response: Option<SongsResponse> = self
            .get_api(&self.api_base_url, &format!("/artists/{}/songs", id), &params)
            .await?;
        Ok(response.map(|r| r.songs))
    }

    async fn artist_albums(
        &self,
        id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<Option<Vec<RawAlbum>>, UpstreamError> {
        let response: Option<AlbumsResponse> = self
            .get_api(
                &self.public_api_base_url,
                &format!("/artists/{}/albums", id),
                &paging(per_page, page),
            )
            .await?;
        Ok(response.map(|r| r.albums))
    }

    async fn song(&self, id: u64) -> Result<Option<RawSong>, UpstreamError> {
        let params = vec![("text_format", "plain".to_string())];
        let response: Option<SongResponse> = self
            .get_api(&self.api_base_url, &format!("/songs/{}", id), &params)
            .await?;
        Ok(response.and_then(|r| r.song))
    }

    async fn album(&self, id: u64) -> Result<Option<RawAlbum>, UpstreamError> {
        let response: Option<AlbumResponse> = self
            .get_api(&self.public_api_base_url, &format!("/albums/{}", id), &[])
            .await?;
        Ok(response.and_then(|r| r.album))
    }

    async fn album_tracks(
        &self,
        id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<Option<Vec<RawTrack>>, UpstreamError> {
        let response: Option<TracksResponse> = self
            .get_api(
                &self.public_api_base_url,
                &format!("/albums/{}/tracks", id),
                &paging(per_page, page),
            )
            .await?;
        Ok(response.map(|r| r.tracks))
    }

    async fn song_page(&self, url: &str) -> Result<Option<String>, UpstreamError> {
        let parsed = url::Url::parse(url).map_err(|e| UpstreamError::InvalidResponse {
            endpoint: "song page".to_string(),
            reason: format!("bad song url '{}': {}", url, e),
        })?;
        let endpoint = parsed.path().to_string();
        debug!("Fetching song page {}", endpoint);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(&endpoint, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        check_status(&endpoint, status)?;

        let html = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_reqwest(&endpoint, e))?;
        Ok(Some(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(check_status("/search", StatusCode::OK).is_ok());
        assert!(matches!(
            check_status("/search", StatusCode::UNAUTHORIZED),
            Err(UpstreamError::Authentication)
        ));
        assert!(matches!(
            check_status("/search", StatusCode::TOO_MANY_REQUESTS),
            Err(UpstreamError::RateLimit)
        ));
        assert!(matches!(
            check_status("/songs/1", StatusCode::BAD_GATEWAY),
            Err(UpstreamError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn test_decode_envelope() {
        let body = r#"{"meta":{"status":200},"response":{"hits":[
            {"index":"song","type":"song","result":{"id":1063,"title":"Bohemian Rhapsody"}}
        ]}}"#;
        let hits: HitsResponse = decode_envelope("/search", body).unwrap();
        assert_eq!(hits.hits.len(), 1);
        assert_eq!(hits.hits[0].result["id"], 1063);

        let err = decode_envelope::<HitsResponse>("/search", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidResponse { .. }));
    }

    #[test]
    fn test_flatten_sections_skips_top_hit() {
        let body = r#"{"response":{"sections":[
            {"type":"top_hit","hits":[{"type":"song","result":{"id":1}}]},
            {"type":"song","hits":[{"type":"song","result":{"id":1}},{"type":"song","result":{"id":2}}]},
            {"type":"artist","hits":[{"type":"artist","result":{"id":3}}]}
        ]}}"#;
        let sections: SectionsResponse = decode_envelope("/search/multi", body).unwrap();
        let hits = flatten_sections(sections);
        let ids: Vec<u64> = hits.iter().filter_map(|h| h.result["id"].as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_client_trims_base_urls() {
        let mut config = Config::default();
        config.api_base_url = "https://api.genius.com/".to_string();
        let client = GeniusClient::new(&config, AccessToken::new("token")).unwrap();
        assert_eq!(client.api_base_url, "https://api.genius.com");
        assert_eq!(client.public_api_base_url, "https://genius.com/api");
    }
}
