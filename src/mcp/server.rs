use std::sync::Arc;

use rmcp::handler::server::router::{prompt::PromptRouter, tool::ToolRouter};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult, ListResourceTemplatesResult, PaginatedRequestParam,
    PromptMessage, PromptMessageRole, ReadResourceRequestParam, ReadResourceResult, ResourceContents,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{
    prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router, ErrorData as McpError,
    RoleServer, ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::core::models::{PromptText, SearchType, SongSort};
use crate::core::LookupAdapter;
use crate::error::LookupError;
use crate::mcp::resources::{self, ResourceUri};

/// MCP server exposing Genius lookups as tools and two analysis prompts.
#[derive(Clone)]
pub struct GeniusServer {
    adapter: Arc<LookupAdapter>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

// --- Tool parameter types ---

/// A Genius id or a free-text name.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IdentifierParam {
    Id(u64),
    Text(String),
}

impl IdentifierParam {
    fn into_text(self) -> String {
        match self {
            IdentifierParam::Id(id) => id.to_string(),
            IdentifierParam::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Search query")]
    pub query: String,
    #[serde(rename = "type")]
    #[schemars(description = "Restrict results to song, artist or album")]
    pub search_type: Option<SearchType>,
    #[schemars(description = "Results per page (1-50, server default when omitted)")]
    pub page_size: Option<i64>,
    #[schemars(description = "Page number, starting at 1")]
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetLyricsParams {
    #[schemars(description = "Song title")]
    pub title: String,
    #[schemars(description = "Artist name, preferred when several songs match")]
    pub artist: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSongParams {
    #[schemars(description = "Genius song id or song name")]
    pub song: IdentifierParam,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetArtistParams {
    #[schemars(description = "Genius artist id or artist name")]
    pub artist: IdentifierParam,
    #[schemars(description = "Number of popular songs to include (0-50, default 5)")]
    pub max_songs: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetArtistSongsParams {
    #[schemars(description = "Genius artist id or artist name")]
    pub artist: IdentifierParam,
    #[schemars(description = "Songs to return (1-50, server default when omitted)")]
    pub page_size: Option<i64>,
    #[schemars(description = "Ordering: popularity, title or release_date")]
    pub sort: Option<SongSort>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetArtistAlbumsParams {
    #[schemars(description = "Genius artist id or artist name")]
    pub artist: IdentifierParam,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAlbumTracksParams {
    #[schemars(description = "Genius album id or album name")]
    pub album: IdentifierParam,
}

// --- Prompt argument types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeLyricsArgs {
    #[schemars(description = "Artist name")]
    pub artist: String,
    #[schemars(description = "Song title")]
    pub song: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompareSongsArgs {
    #[schemars(description = "Artist name")]
    pub artist: String,
    #[schemars(description = "First song title")]
    pub song1: String,
    #[schemars(description = "Second song title")]
    pub song2: String,
}

const DEFAULT_MAX_SONGS: i64 = 5;

/// Invalid arguments are protocol errors; every other failure is reported
/// inside the tool result so the client can show it.
fn respond<T: Serialize>(tool: &str, result: Result<T, LookupError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value)
                .map_err(|e| McpError::internal_error(format!("Failed to encode result: {e}"), None))?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(LookupError::InvalidArgument(message)) => {
            debug!("{} rejected arguments: {}", tool, message);
            Err(McpError::invalid_params(message, None))
        }
        Err(err) => {
            warn!("{} failed: {}", tool, err);
            let payload = json!({
                "error": err.kind().as_str(),
                "message": err.to_string(),
            });
            Ok(CallToolResult::error(vec![Content::text(payload.to_string())]))
        }
    }
}

fn prompt_result(description: &str, result: Result<PromptText, LookupError>) -> Result<GetPromptResult, McpError> {
    match result {
        Ok(text) => Ok(GetPromptResult {
            description: Some(description.to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text.into_string())],
        }),
        Err(LookupError::InvalidArgument(message)) => Err(McpError::invalid_params(message, None)),
        Err(err) => Err(McpError::internal_error(err.to_string(), None)),
    }
}

fn resource_error(uri: &str, err: LookupError) -> McpError {
    match err {
        LookupError::InvalidArgument(message) => McpError::invalid_params(message, None),
        err @ LookupError::NotFound(_) => {
            McpError::resource_not_found(err.to_string(), Some(json!({ "uri": uri })))
        }
        other => {
            warn!("Resource {} failed: {}", uri, other);
            McpError::internal_error(other.to_string(), Some(json!({ "uri": uri })))
        }
    }
}

#[tool_router]
impl GeniusServer {
    pub fn new(adapter: Arc<LookupAdapter>) -> Self {
        Self {
            adapter,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    fn page_size_or_default(&self, page_size: Option<i64>) -> i64 {
        page_size.unwrap_or_else(|| i64::from(self.adapter.default_page_size()))
    }

    #[tool(description = "Search Genius for songs, artists or albums")]
    async fn search(&self, Parameters(params): Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        let page_size = self.page_size_or_default(params.page_size);
        let result = self
            .adapter
            .search(&params.query, params.search_type, page_size, params.page.unwrap_or(1))
            .await;
        respond("search", result)
    }

    #[tool(description = "Get the lyrics of a song by title, optionally narrowed by artist")]
    async fn get_lyrics(&self, Parameters(params): Parameters<GetLyricsParams>) -> Result<CallToolResult, McpError> {
        let result = self
            .adapter
            .get_lyrics(&params.title, params.artist.as_deref())
            .await;
        respond("get_lyrics", result)
    }

    #[tool(description = "Get song details (artist, album, release date) by id or name")]
    async fn get_song(&self, Parameters(params): Parameters<GetSongParams>) -> Result<CallToolResult, McpError> {
        let result = self.adapter.get_song(&params.song.into_text()).await;
        respond("get_song", result)
    }

    #[tool(description = "Get artist information and their most popular songs")]
    async fn get_artist(&self, Parameters(params): Parameters<GetArtistParams>) -> Result<CallToolResult, McpError> {
        let max_songs = params.max_songs.unwrap_or(DEFAULT_MAX_SONGS);
        let result = self
            .adapter
            .get_artist(&params.artist.into_text(), max_songs)
            .await;
        respond("get_artist", result)
    }

    #[tool(description = "List songs by an artist")]
    async fn get_artist_songs(
        &self,
        Parameters(params): Parameters<GetArtistSongsParams>,
    ) -> Result<CallToolResult, McpError> {
        let page_size = self.page_size_or_default(params.page_size);
        let result = self
            .adapter
            .get_artist_songs(&params.artist.into_text(), page_size, params.sort.unwrap_or_default())
            .await;
        respond("get_artist_songs", result)
    }

    #[tool(description = "List albums by an artist (first 50 albums)")]
    async fn get_artist_albums(
        &self,
        Parameters(params): Parameters<GetArtistAlbumsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.adapter.get_artist_albums(&params.artist.into_text()).await;
        respond("get_artist_albums", result)
    }

    #[tool(description = "List the tracks of an album in track-number order (first 50 tracks)")]
    async fn get_album_tracks(
        &self,
        Parameters(params): Parameters<GetAlbumTracksParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.adapter.get_album_tracks(&params.album.into_text()).await;
        respond("get_album_tracks", result)
    }
}

#[prompt_router]
impl GeniusServer {
    #[prompt(name = "analyze_lyrics", description = "Analyze the lyrics of a song")]
    async fn analyze_lyrics(
        &self,
        Parameters(args): Parameters<AnalyzeLyricsArgs>,
    ) -> Result<GetPromptResult, McpError> {
        prompt_result(
            "Analyze the lyrics of a song",
            self.adapter.analyze_lyrics(&args.artist, &args.song),
        )
    }

    #[prompt(name = "compare_songs", description = "Compare two songs by the same artist")]
    async fn compare_songs(
        &self,
        Parameters(args): Parameters<CompareSongsArgs>,
    ) -> Result<GetPromptResult, McpError> {
        prompt_result(
            "Compare two songs by the same artist",
            self.adapter.compare_songs(&args.artist, &args.song1, &args.song2),
        )
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for GeniusServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Access song lyrics and artist information from Genius.com. Search songs, \
                 artists and albums, fetch lyrics, list an artist's songs and albums, \
                 and list album tracks. Read artist://{artist_name}/info or \
                 song://{artist_name}/{song_title} for markdown pages."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = resources::templates()
            .map_err(|e| McpError::internal_error(format!("Failed to build resource templates: {e}"), None))?;
        Ok(ListResourceTemplatesResult::with_all_items(templates))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_resource_uri(&request.uri).await
    }
}

impl GeniusServer {
    async fn read_resource_uri(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        debug!("Reading resource {}", uri);
        let resource = ResourceUri::parse(uri).map_err(|e| resource_error(uri, e))?;
        let text = resource
            .read(&self.adapter)
            .await
            .map_err(|e| resource_error(uri, e))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::infrastructure::PromptTemplates;
    use crate::core::services::stub::{album_hit, artist_hit, raw, song_hit, StubGenius, StubMode};
    use crate::core::LookupOptions;
    use rmcp::model::{ErrorCode, PromptMessageContent};

    fn server(stub: StubGenius) -> GeniusServer {
        let adapter = LookupAdapter::new(Arc::new(stub), PromptTemplates::default(), LookupOptions::default());
        GeniusServer::new(Arc::new(adapter))
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = result
            .content
            .first()
            .and_then(|content| content.as_text())
            .map(|text| text.text.as_str())
            .expect("tool result should include text content");

        serde_json::from_str(text).expect("tool text content should be valid JSON")
    }

    fn prompt_text(result: &GetPromptResult) -> &str {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text,
            other => panic!("unexpected prompt content {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_uses_default_page_size() {
        let mut stub = StubGenius::default();
        stub.hits = (1..=30).map(|i| song_hit(i, &format!("Song {i}"), "Artist")).collect();
        let server = server(stub);

        let result = server
            .search(Parameters(SearchParams {
                query: "song".to_string(),
                search_type: None,
                page_size: None,
                page: None,
            }))
            .await
            .expect("search should succeed");

        let payload = extract_json(&result);
        let hits = payload.as_array().expect("search returns an array");
        assert_eq!(hits.len(), 10);
        assert_eq!(hits[0]["kind"], "song");
        assert_eq!(hits[0]["artist"], "Artist");
    }

    #[tokio::test]
    async fn test_invalid_page_size_is_invalid_params() {
        let server = server(StubGenius::with_mode(StubMode::Unreachable));

        let err = server
            .search(Parameters(SearchParams {
                query: "queen".to_string(),
                search_type: Some(SearchType::Artist),
                page_size: Some(0),
                page: Some(1),
            }))
            .await
            .expect_err("page_size 0 is rejected");

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_not_found_is_an_error_result() {
        let server = server(StubGenius::default());

        let result = server
            .get_lyrics(Parameters(GetLyricsParams {
                title: "xyzzy-nonexistent-title-12345".to_string(),
                artist: None,
            }))
            .await
            .expect("not found is reported inside the result");

        assert_eq!(result.is_error, Some(true));
        let payload = extract_json(&result);
        assert_eq!(payload["error"], "not_found");
        assert!(payload["message"].as_str().is_some_and(|m| m.contains("xyzzy")));
    }

    #[tokio::test]
    async fn test_upstream_timeout_is_an_error_result() {
        let server = server(StubGenius::with_mode(StubMode::Timeout));

        let result = server
            .get_artist_albums(Parameters(GetArtistAlbumsParams {
                artist: IdentifierParam::Id(563),
            }))
            .await
            .expect("timeouts are reported inside the result");

        assert_eq!(result.is_error, Some(true));
        assert_eq!(extract_json(&result)["error"], "upstream_error");
    }

    #[tokio::test]
    async fn test_identifiers_accept_numbers_and_names() {
        let mut stub = StubGenius::default();
        stub.hits = vec![artist_hit(563, "Queen"), album_hit(9, "Innuendo", "Queen")];
        stub.artist_songs.insert(563, raw(json!([{"id": 1063, "title": "Bohemian Rhapsody"}])));
        stub.album_tracks.insert(9, raw(json!([{"number": 1, "song": {"id": 1, "title": "Innuendo"}}])));
        let server = server(stub);

        let by_name = server
            .get_artist_songs(Parameters(GetArtistSongsParams {
                artist: IdentifierParam::Text("Queen".to_string()),
                page_size: Some(5),
                sort: None,
            }))
            .await
            .unwrap();
        let by_id = server
            .get_artist_songs(Parameters(GetArtistSongsParams {
                artist: IdentifierParam::Id(563),
                page_size: Some(5),
                sort: Some(SongSort::Popularity),
            }))
            .await
            .unwrap();
        assert_eq!(extract_json(&by_name), extract_json(&by_id));

        let album = server
            .get_album_tracks(Parameters(GetAlbumTracksParams {
                album: IdentifierParam::Text("Innuendo".to_string()),
            }))
            .await
            .unwrap();
        let payload = extract_json(&album);
        assert_eq!(payload["album_id"], 9);
        assert_eq!(payload["tracks"][0]["number"], 1);
    }

    #[test]
    fn test_identifier_param_deserializes_untagged() {
        let id: IdentifierParam = serde_json::from_value(json!(563)).unwrap();
        assert!(matches!(id, IdentifierParam::Id(563)));
        let name: IdentifierParam = serde_json::from_value(json!("Queen")).unwrap();
        assert_eq!(name.into_text(), "Queen");
    }

    #[tokio::test]
    async fn test_prompts_render_without_network() {
        let server = server(StubGenius::with_mode(StubMode::Unreachable));

        let result = server
            .compare_songs(Parameters(CompareSongsArgs {
                artist: "Adele".to_string(),
                song1: "Hello".to_string(),
                song2: "Someone Like You".to_string(),
            }))
            .await
            .expect("prompt renders");

        assert_eq!(result.messages.len(), 1);
        assert!(prompt_text(&result).contains("'Hello' and 'Someone Like You' by Adele"));

        let err = server
            .analyze_lyrics(Parameters(AnalyzeLyricsArgs {
                artist: " ".to_string(),
                song: "Hello".to_string(),
            }))
            .await
            .expect_err("blank artist is rejected");
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    fn resource_text(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("unexpected resource contents {:?}", other),
        }
    }

    #[test]
    fn test_server_advertises_tools_prompts_and_resources() {
        let info = server(StubGenius::default()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[tokio::test]
    async fn test_artist_resource_renders_markdown() {
        let mut stub = StubGenius::default();
        stub.hits = vec![artist_hit(563, "Queen")];
        stub.artists.insert(
            563,
            raw(json!({
                "id": 563,
                "name": "Queen",
                "alternate_names": ["Queen (band)"],
                "followers_count": 4200,
                "description": {"plain": "British rock band."}
            })),
        );
        stub.artist_songs.insert(563, raw(json!([{"id": 1063, "title": "Bohemian Rhapsody"}])));
        let server = server(stub);

        let result = server
            .read_resource_uri("artist://Queen/info")
            .await
            .expect("artist resource reads");

        let text = resource_text(&result);
        assert!(text.starts_with("# Queen\n"));
        assert!(text.contains("**Alternate names**: Queen (band)"));
        assert!(text.contains("British rock band."));
        assert!(text.contains("**Followers count**: 4200"));
    }

    #[tokio::test]
    async fn test_song_resource_renders_lyrics() {
        let mut stub = StubGenius::default();
        stub.hits = vec![song_hit(1063, "Bohemian Rhapsody", "Queen")];
        stub.pages.insert(
            "https://genius.com/song-1063".to_string(),
            r#"<div data-lyrics-container="true">[Intro]<br>Is this the real life?</div>"#.to_string(),
        );
        let server = server(stub);

        let result = server
            .read_resource_uri("song://Queen/Bohemian%20Rhapsody")
            .await
            .expect("song resource reads");

        let text = resource_text(&result);
        assert!(text.starts_with("# Bohemian Rhapsody by Queen"));
        assert!(text.contains("## Lyrics\n\nIs this the real life?"));
    }

    #[tokio::test]
    async fn test_malformed_resource_uri_is_invalid_params() {
        let server = server(StubGenius::with_mode(StubMode::Unreachable));

        let err = server
            .read_resource_uri("song://Queen")
            .await
            .expect_err("a song URI needs a title");
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = server
            .read_resource_uri("album://Thriller")
            .await
            .expect_err("unknown scheme");
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_artist_resource_is_not_found() {
        let server = server(StubGenius::default());

        let err = server
            .read_resource_uri("artist://Nobody%20At%20All/info")
            .await
            .expect_err("no artist hit");
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
    }
}
