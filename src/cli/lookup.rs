//! One-shot lookups from the command line, sharing the adapter used by the MCP server

use clap::Args;
use tracing::info;

use crate::cli::output::{self, OutputFormat};
use crate::core::models::{SearchType, SongSort};
use crate::error::{LookupError, Result};
use crate::services::SimpleServices;

fn parse_search_type(value: &str) -> std::result::Result<SearchType, String> {
    value.parse().map_err(|e: LookupError| e.to_string())
}

fn parse_sort(value: &str) -> std::result::Result<SongSort, String> {
    value.parse().map_err(|e: LookupError| e.to_string())
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    query: String,

    /// Restrict to song, artist or album
    #[arg(short = 't', long = "type", value_parser = parse_search_type)]
    search_type: Option<SearchType>,

    /// Results per page (1-50)
    #[arg(short = 'n', long)]
    page_size: Option<i64>,

    /// Page number
    #[arg(short, long, default_value = "1")]
    page: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct LyricsArgs {
    /// Song title
    #[arg(value_name = "TITLE")]
    title: String,

    /// Artist name
    #[arg(short, long)]
    artist: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct SongArgs {
    /// Genius song id or song name
    #[arg(value_name = "SONG")]
    song: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct ArtistArgs {
    /// Genius artist id or artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Number of popular songs to include
    #[arg(short, long, default_value = "5")]
    max_songs: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct ArtistSongsArgs {
    /// Genius artist id or artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Songs to return (1-50)
    #[arg(short = 'n', long)]
    page_size: Option<i64>,

    /// popularity, title or release_date
    #[arg(short, long, default_value = "popularity", value_parser = parse_sort)]
    sort: SongSort,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct ArtistAlbumsArgs {
    /// Genius artist id or artist name
    #[arg(value_name = "ARTIST")]
    artist: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct AlbumTracksArgs {
    /// Genius album id or album name
    #[arg(value_name = "ALBUM")]
    album: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub async fn search(args: SearchArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let page_size = args
        .page_size
        .unwrap_or_else(|| i64::from(adapter.default_page_size()));

    let results = adapter
        .search(&args.query, args.search_type, page_size, args.page)
        .await?;
    info!("Found {} result(s)", results.len());
    output::print(&results, args.format)
}

pub async fn lyrics(args: LyricsArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let song = adapter.get_lyrics(&args.title, args.artist.as_deref()).await?;
    output::print(&song, args.format)
}

pub async fn song(args: SongArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let song = adapter.get_song(&args.song).await?;
    output::print(&song, args.format)
}

pub async fn artist(args: ArtistArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let artist = adapter.get_artist(&args.artist, args.max_songs).await?;
    output::print(&artist, args.format)
}

pub async fn artist_songs(args: ArtistSongsArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let page_size = args
        .page_size
        .unwrap_or_else(|| i64::from(adapter.default_page_size()));

    let songs = adapter
        .get_artist_songs(&args.artist, page_size, args.sort)
        .await?;
    output::print(&songs, args.format)
}

pub async fn artist_albums(args: ArtistAlbumsArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let albums = adapter.get_artist_albums(&args.artist).await?;
    if albums.is_empty() {
        info!("No albums found for {}", args.artist);
    }
    output::print(&albums, args.format)
}

pub async fn album_tracks(args: AlbumTracksArgs, services: &SimpleServices) -> Result<()> {
    let adapter = services.create_adapter()?;
    let album = adapter.get_album_tracks(&args.album).await?;
    output::print(&album, args.format)
}
