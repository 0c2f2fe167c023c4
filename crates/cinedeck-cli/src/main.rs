//! cinedeck - terminal movie browser backed by the TMDB catalog.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use crate::tui::listing::state::Slot;
use crate::tui::{BrowseOptions, player, run_browser};
use cinedeck_api::tmdb::{
    SearchMovieParams, TmdbApi, TmdbClient, TmdbMovieSummary, find_trailer, poster_url,
    release_year, youtube_watch_url,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log file used while the browser owns the terminal
    /// (default: `{config dir}/cinedeck.log`).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse listings, search and view details in the terminal UI.
    Browse,
    /// Print one movie listing.
    List(ListArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Print metadata and trailer for one movie.
    Details(MovieIdArgs),
    /// Print (and optionally play) the trailer for one movie.
    Trailer(TrailerArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Listing to print.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    /// Movies in theaters now.
    NowPlaying,
    /// Upcoming releases.
    Upcoming,
    /// All time hits.
    Popular,
    /// Best rated movies.
    TopRated,
    /// New movies.
    New,
}

impl CategoryArg {
    /// Listing slot this argument selects.
    const fn slot(self) -> Slot {
        match self {
            Self::NowPlaying => Slot::NowPlaying,
            Self::Upcoming => Slot::Upcoming,
            Self::Popular => Slot::Popular,
            Self::TopRated => Slot::TopRated,
            Self::New => Slot::New,
        }
    }
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Listing to fetch.
    #[arg(long, value_enum)]
    category: CategoryArg,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    #[arg(long)]
    query: String,

    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Filter by primary release year.
    #[arg(long)]
    year: Option<u32>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// TMDB movie ID.
    #[arg(long)]
    id: String,
}

/// Arguments for the `trailer` subcommand.
#[derive(clap::Args)]
struct TrailerArgs {
    /// TMDB movie ID.
    #[arg(long)]
    id: String,

    /// Start playback with the configured player.
    #[arg(long)]
    play: bool,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective config with secrets masked.
    Show,
    /// Write a default config file if none exists.
    Init,
}

/// Loads the config file from the resolved location.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Builds a `TmdbClient` from config and environment.
///
/// # Errors
///
/// Returns an error if no credential is available or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let credential = config
        .tmdb
        .resolve_credential(|name| std::env::var(name).ok())?;

    TmdbClient::builder()
        .credential(credential)
        .language(&config.tmdb.language)
        .timeout(config.tmdb.timeout())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Logs one line per movie.
fn log_movies(movies: &[TmdbMovieSummary]) {
    tracing::info!("ID\tYear\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}",
            movie.id,
            tui::detail::state::year_label(movie.release_year()),
            movie.title,
        );
    }
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the terminal fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = Arc::new(build_tmdb_client(&config)?);
    let options = BrowseOptions {
        image_size: config.tmdb.image_size.clone(),
        player_command: config.player.command.clone(),
    };

    tracing::info!("starting browser");
    let runtime = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || run_browser(client, runtime, options))
        .await
        .context("browser thread panicked")??;
    tracing::info!("browser closed");

    Ok(())
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let slot = args.category.slot();
    let Some(category) = slot.category() else {
        anyhow::bail!("{} has no listing endpoint", slot.title());
    };

    let response = client
        .movie_list(category)
        .await
        .with_context(|| format!("failed to fetch {} movies", slot.title()))?;

    tracing::info!("{} (page {}/{})", slot.title(), response.page, response.total_pages);
    log_movies(&response.results);

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, the client fails to build, or the
/// API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let query = args.query.trim();
    anyhow::ensure!(!query.is_empty(), "search query must not be empty");

    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let mut params = SearchMovieParams::new(query).page(args.page);
    if let Some(year) = args.year {
        params = params.primary_release_year(year);
    }

    let response = client
        .search_movie(&params)
        .await
        .context("failed to search movies")?;

    tracing::info!("Total results: {}", response.total_results);
    log_movies(&response.results);

    Ok(())
}

/// Runs the `details` subcommand.
///
/// Metadata and videos are fetched concurrently; a videos failure only
/// drops the trailer line.
///
/// # Errors
///
/// Returns an error if the client fails to build or the metadata request fails.
#[instrument(skip_all)]
async fn run_details(args: &MovieIdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let (details, videos) =
        futures::future::join(client.movie_details(&args.id), client.movie_videos(&args.id))
            .await;
    let details = details.context("TMDB movie request failed")?;

    tracing::info!("ID:       {}", details.id);
    tracing::info!("Title:    {}", details.title);
    tracing::info!(
        "Year:     {}",
        tui::detail::state::year_label(release_year(details.release_date.as_deref()))
    );
    if let Some(runtime) = details.runtime {
        tracing::info!("Runtime:  {runtime} min");
    }
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        tracing::info!("Genres:   {}", genres.join(", "));
    }
    tracing::info!(
        "Poster:   {}",
        poster_url(details.poster_path.as_deref(), &config.tmdb.image_size)
            .unwrap_or_else(|| String::from("-"))
    );
    match videos {
        Ok(videos) => match find_trailer(&videos.results) {
            Some(trailer) => tracing::info!("Trailer:  {}", youtube_watch_url(&trailer.key)),
            None => tracing::info!("Trailer:  -"),
        },
        Err(e) => tracing::warn!("failed to fetch videos: {e:#}"),
    }
    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        tracing::info!("Overview: {overview}");
    }

    Ok(())
}

/// Runs the `trailer` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails, no trailer exists, or the player
/// cannot be started.
#[instrument(skip_all)]
async fn run_trailer(args: &TrailerArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let videos = client
        .movie_videos(&args.id)
        .await
        .context("TMDB videos request failed")?;
    let trailer = find_trailer(&videos.results)
        .with_context(|| format!("no YouTube trailer for movie {}", args.id))?;
    let url = youtube_watch_url(&trailer.key);

    tracing::info!(
        "{}\t{}",
        trailer.name.as_deref().unwrap_or(&trailer.key),
        url
    );
    if args.play {
        player::play(&url, config.player.command.as_deref())?;
    }

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;
    let rendered =
        toml::to_string_pretty(&config.redacted()).context("failed to serialize config")?;

    tracing::info!("# {}", path.display());
    for line in rendered.lines() {
        tracing::info!("{line}");
    }

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
fn run_config_init(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() {
        tracing::info!("Config already exists: {}", path.display());
        return Ok(());
    }

    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());

    Ok(())
}

/// Opens the log file the browser writes to.
fn open_log_file(cli: &Cli) -> Result<File> {
    let path = match &cli.log_file {
        Some(path) => path.clone(),
        None => resolve_log_path(cli.dir.as_ref())?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Installs the global tracing subscriber.
///
/// Logs go to stdout, or to `log_file` when given.
fn init_tracing(log_file: Option<File>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = log_file.is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(std::io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match cli.command {
        Commands::Browse => Some(open_log_file(&cli)?),
        _ => None,
    };
    init_tracing(log_file);

    let dir = cli.dir.as_ref();
    match &cli.command {
        Commands::Browse => run_browse(dir).await,
        Commands::List(args) => run_list(args, dir).await,
        Commands::Search(args) => run_search(args, dir).await,
        Commands::Details(args) => run_details(args, dir).await,
        Commands::Trailer(args) => run_trailer(args, dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::Init => run_config_init(dir),
        },
    }
}
