use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod mcp;
mod services;
mod utils;

use cli::lookup;
use config::Config;
use error::Result;
use services::SimpleServices;

#[derive(Parser)]
#[command(name = "genius-mcp")]
#[command(about = "Model Context Protocol server for Genius lyrics, artists, songs and albums")]
#[command(version)]
struct Cli {
    /// Enable verbose logging (to stderr unless MCP_LOG_FILE is set)
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (default)
    Serve,

    /// Search Genius for songs, artists or albums
    Search(lookup::SearchArgs),

    /// Fetch the lyrics of a song
    Lyrics(lookup::LyricsArgs),

    /// Show song details
    Song(lookup::SongArgs),

    /// Show artist information and popular songs
    Artist(lookup::ArtistArgs),

    /// List songs by an artist
    ArtistSongs(lookup::ArtistSongsArgs),

    /// List albums by an artist
    ArtistAlbums(lookup::ArtistAlbumsArgs),

    /// List the tracks of an album
    AlbumTracks(lookup::AlbumTracksArgs),

    /// Render an analysis prompt
    Prompt(cli::prompt::PromptArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first: it decides where logs go
    let config = Config::load(cli.config.as_deref())?;

    utils::logging::init_logging(cli.verbose, &config.log)
        .map_err(error::GeniusMcpError::Internal)?;

    let services = SimpleServices::new(config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            // A missing token is fatal before the session starts
            let adapter = services.create_adapter()?;
            mcp::serve_stdio(adapter)
                .await
                .map_err(error::GeniusMcpError::Internal)
        }
        Commands::Search(args) => lookup::search(args, &services).await,
        Commands::Lyrics(args) => lookup::lyrics(args, &services).await,
        Commands::Song(args) => lookup::song(args, &services).await,
        Commands::Artist(args) => lookup::artist(args, &services).await,
        Commands::ArtistSongs(args) => lookup::artist_songs(args, &services).await,
        Commands::ArtistAlbums(args) => lookup::artist_albums(args, &services).await,
        Commands::AlbumTracks(args) => lookup::album_tracks(args, &services).await,
        Commands::Prompt(args) => cli::prompt::execute(args, &services).await,
        Commands::Config(args) => cli::config::execute(args, &services.config()).await,
    }
}
