/// Nebula Player - command-line client
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use nebula_cli::{AppContext, LoggingOutput, NebulaConfig};
use nebula_core::{PlaylistId, Track, TrackId};
use nebula_library::default_themes;
use nebula_playback::PlayOutcome;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nebula")]
#[command(about = "Nebula Player command-line client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search songs
    Search {
        /// Free-text query
        query: String,
    },
    /// Play a song and show what is queued after it
    Play {
        /// Video id of the song
        video_id: String,
        /// Queue the results of this search instead of autoplay
        #[arg(long)]
        context_search: Option<String>,
    },
    /// List liked songs
    Liked,
    /// Toggle the like flag on a song
    Like {
        video_id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        artist: String,
    },
    /// Remove a song from the liked list
    Unlike { video_id: String },
    /// List playlists
    Playlists,
    /// Create an empty playlist
    CreatePlaylist { name: String },
    /// Add a song to a playlist
    AddToPlaylist {
        playlist_id: String,
        video_id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        artist: String,
    },
    /// Delete a playlist
    DeletePlaylist { playlist_id: String },
    /// Show recently played songs
    Recent,
    /// Show the "made for you" mixes
    Mixes {
        /// Rebuild instead of using the cached mixes
        #[arg(long)]
        refresh: bool,
    },
    /// Show the current top tracks
    TopTracks,
    /// Search a random mood (or the given one)
    Discover {
        #[arg(long)]
        mood: Option<String>,
        /// Play the first result with the whole list queued
        #[arg(long)]
        play: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "nebula_cli=info,nebula_playback=info,nebula_library=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = NebulaConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let ctx = AppContext::new(config, Box::new(LoggingOutput::new()))?;

    match cli.command {
        Commands::Search { query } => {
            let results = ctx.backend.search(&query).await?;
            print_tracks(&results);
        }
        Commands::Play {
            video_id,
            context_search,
        } => {
            play(&ctx, &video_id, context_search.as_deref()).await?;
        }
        Commands::Liked => {
            let liked = ctx.liked.refresh().await?;
            print_tracks(&liked);
        }
        Commands::Like {
            video_id,
            title,
            artist,
        } => {
            let track = Track::new(video_id, title, artist);
            let liked = ctx.liked.toggle(&track).await?;
            println!("{} is {}", track.id, if liked { "liked" } else { "not liked" });
        }
        Commands::Unlike { video_id } => {
            ctx.liked.unlike(&TrackId::new(video_id)).await?;
            println!("Removed from liked songs");
        }
        Commands::Playlists => {
            for playlist in ctx.playlists.list_all().await? {
                println!("{:>6}  {} ({} songs)", playlist.id, playlist.name, playlist.len());
            }
        }
        Commands::CreatePlaylist { name } => {
            let id = ctx.playlists.create(&name).await?;
            println!("Created playlist {id}");
        }
        Commands::AddToPlaylist {
            playlist_id,
            video_id,
            title,
            artist,
        } => {
            let track = Track::new(video_id, title, artist);
            ctx.playlists
                .add_track(&PlaylistId::new(playlist_id), &track)
                .await?;
            println!("Added {} to playlist", track.id);
        }
        Commands::DeletePlaylist { playlist_id } => {
            ctx.playlists.delete(&PlaylistId::new(playlist_id)).await?;
            println!("Deleted playlist");
        }
        Commands::Recent => {
            print_tracks(&ctx.player.recent());
        }
        Commands::Mixes { refresh } => {
            if refresh {
                ctx.mixes.clear()?;
            }
            for mix in ctx.mixes.load_or_build(&default_themes()).await {
                println!("== {} ==", mix.name);
                print_tracks(&mix.tracks);
            }
        }
        Commands::TopTracks => {
            print_tracks(&ctx.discover.top_tracks().await?);
        }
        Commands::Discover { mood, play } => {
            let discovery = match mood {
                Some(mood) => ctx.discover.discover_mood(&mood).await?,
                None => ctx.discover.discover().await?,
            };
            println!("== {} ==", discovery.mood);
            print_tracks(&discovery.tracks);

            if play {
                let Some(first) = discovery.tracks.first().cloned() else {
                    anyhow::bail!("nothing to play for mood {:?}", discovery.mood);
                };
                let video_id = first.id.to_string();
                let outcome = ctx.player.play_track(first, Some(discovery.tracks)).await;
                report_outcome(&ctx, outcome, &video_id).await?;
            }
        }
    }

    Ok(())
}

async fn play(
    ctx: &AppContext,
    video_id: &str,
    context_search: Option<&str>,
) -> anyhow::Result<()> {
    let id = TrackId::new(video_id);

    let context = match context_search {
        Some(query) => Some(ctx.backend.search(query).await?),
        None => None,
    };
    let Some(track) = ctx.lookup_track(&id, context.as_deref()).await? else {
        match context_search {
            Some(query) => anyhow::bail!("{video_id} is not among the results for {query:?}"),
            None => anyhow::bail!(
                "could not find {video_id}; pass --context-search with a query that returns it"
            ),
        }
    };

    let outcome = ctx.player.play_track(track, context).await;
    report_outcome(ctx, outcome, video_id).await
}

async fn report_outcome(
    ctx: &AppContext,
    outcome: PlayOutcome,
    video_id: &str,
) -> anyhow::Result<()> {
    match outcome {
        PlayOutcome::Started => {
            if let Some(current) = ctx.player.current_track().await {
                println!("Now playing: {} - {}", current.artist, current.title);
                if let Some(url) = &current.stream_url {
                    println!("Stream: {url}");
                }
            }
            let upcoming = ctx.player.upcoming().await;
            if !upcoming.is_empty() {
                println!("Up next:");
                print_tracks(&upcoming);
            }
        }
        PlayOutcome::Unresolved => anyhow::bail!("could not resolve a stream for {video_id}"),
        PlayOutcome::Superseded => {}
    }

    Ok(())
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("(none)");
    }
    for track in tracks {
        println!("{:<12} {} - {}", track.id, track.title, track.artist);
    }
}
