/// Melody - terminal music player
use clap::{Parser, Subcommand};
use melody_catalog::{CatalogClient, CatalogQuery, TrackCatalog};
use melody_cli::{
    config::AppConfig,
    shell::{print_genres, print_tracks},
    FileStore, Shell,
};
use melody_core::{KeyValueStore, Track};
use melody_playback::PlaybackQueueManager;
use melody_session::UserSession;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melody")]
#[command(about = "Browse the Jamendo catalog and manage a play queue", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./melody.toml)
    #[arg(short, long, global = true, env = "MELODY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive player (default)
    Shell,
    /// List featured tracks
    Featured {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List new releases
    New {
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Search tracks
    Search {
        /// Search text
        query: Vec<String>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List genres
    Genres,
    /// List tracks of a genre
    Genre {
        /// Genre id (see `genres`)
        id: String,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show recently played tracks
    Recent,
    /// Show favorite tracks
    Favorites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "melody_cli=warn,melody_playback=warn,melody_catalog=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::info!(
        base_url = %config.catalog.base_url,
        store = %config.storage.path.display(),
        "Starting Melody"
    );
    if config.catalog.client_id.is_empty() {
        tracing::warn!("No catalog client id configured (set MELODY_CATALOG__CLIENT_ID)");
    }

    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::open(&config.storage.path)?);
    let session = Rc::new(UserSession::load(Rc::clone(&store)));
    let catalog = CatalogClient::new(config.catalog_config())?;
    let default_limit = config.catalog.default_limit;

    let player = PlaybackQueueManager::with_config(
        config.playback_config(),
        Rc::clone(&store),
        session.clone(),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            writeln!(out, "Melody Player - type 'help' for commands")?;
            let mut shell = Shell::new(player, session, &catalog, default_limit);
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(input, &mut out).await?;
        }
        Commands::Featured { limit } => {
            list(&catalog, CatalogQuery::Featured, limit.unwrap_or(default_limit), &mut out).await?;
        }
        Commands::New { limit } => {
            list(&catalog, CatalogQuery::NewReleases, limit.unwrap_or(default_limit), &mut out)
                .await?;
        }
        Commands::Search { query, limit } => {
            if query.is_empty() {
                anyhow::bail!("search needs a query");
            }
            let query = CatalogQuery::Search(query.join(" "));
            list(&catalog, query, limit.unwrap_or(default_limit), &mut out).await?;
        }
        Commands::Genres => {
            print_genres(&mut out, &catalog.fetch_genres().await)?;
        }
        Commands::Genre { id, limit } => {
            let limit = limit.unwrap_or(melody_catalog::DEFAULT_GENRE_LIMIT);
            list(&catalog, CatalogQuery::Genre(id), limit, &mut out).await?;
        }
        Commands::Recent => {
            let recent: Vec<Track> = player.recently_played().into_iter().cloned().collect();
            print_tracks(&mut out, &recent)?;
        }
        Commands::Favorites => {
            print_tracks(&mut out, player.favorites())?;
        }
    }

    Ok(())
}

async fn list<W: Write>(
    catalog: &dyn TrackCatalog,
    query: CatalogQuery,
    limit: u32,
    out: &mut W,
) -> anyhow::Result<()> {
    let tracks = catalog.fetch_tracks(&query, limit).await;
    print_tracks(out, &tracks)?;
    Ok(())
}
