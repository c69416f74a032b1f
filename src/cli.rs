// Command dispatcher - flags, batch files and routing to the session

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, CommandFactory, Parser};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, ConfigStore};
use crate::downloader::errors::DownloadError;
use crate::downloader::models::NetworkConfig;
use crate::downloader::tools::{ToolManager, ToolType};
use crate::downloader::utils::looks_like_url;
use crate::downloader::YtDlpCli;
use crate::intent::{DownloadPrefs, FlagStrategy};
use crate::interactive::{search_and_select, DialoguerPrompter, InteractiveStrategy};
use crate::presenter::Presenter;
use crate::session::{RunOutcome, Session};
use crate::ytdlp::DEFAULT_SEARCH_RESULTS;

/// A user-friendly YouTube downloader.
#[derive(Debug, Clone, Parser)]
#[command(name = "ytdl", version, about)]
pub struct Args {
    /// YouTube URL(s) (video, playlist, channel)
    pub urls: Vec<String>,

    /// List available formats
    #[arg(short, long)]
    pub info: bool,

    /// Download video/audio
    #[arg(short, long)]
    pub download: bool,

    /// The format ID to download
    #[arg(short, long)]
    pub format_id: Option<String>,

    /// Download audio only (mp3)
    #[arg(short, long)]
    pub audio_only: bool,

    /// Directory to save downloads in
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// File with a list of URLs to download, one per line
    #[arg(long)]
    pub batch_file: Option<PathBuf>,

    /// Search YouTube
    #[arg(short, long)]
    pub search: Option<String>,

    /// Set a default config value, e.g. --config output_path=/path/to/dir
    #[arg(long, value_name = "KEY=VALUE")]
    pub config: Option<String>,

    /// Number of search results to list
    #[arg(long, default_value_t = DEFAULT_SEARCH_RESULTS)]
    pub max_results: usize,

    /// Proxy URL for yt-dlp (overrides the `proxy` config key)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Netscape-format cookies file for yt-dlp
    #[arg(long)]
    pub cookies: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn prefs(&self) -> DownloadPrefs {
        DownloadPrefs {
            format_id: self.format_id.clone(),
            audio_only: self.audio_only,
            output_path: self.output_path.clone(),
        }
    }

    /// `--proxy` wins over the configured proxy
    pub fn network(&self, config_proxy: Option<String>) -> NetworkConfig {
        NetworkConfig {
            proxy: self.proxy.clone().or(config_proxy),
            cookies: self.cookies.clone(),
            ..NetworkConfig::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] DownloadError),

    #[error("Failed to read batch file {path}: {source}")]
    BatchFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Trimmed, non-blank lines of a batch file, in file order
pub fn read_batch_file(path: &Path) -> Result<Vec<String>, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::BatchFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Positional URLs first, then the batch file's
pub fn collect_urls(args: &Args) -> Result<Vec<String>, CliError> {
    let mut urls = args.urls.clone();
    if let Some(path) = &args.batch_file {
        let batch = read_batch_file(path)?;
        debug!("[Cli] {} URL(s) from {}", batch.len(), path.display());
        urls.extend(batch);
    }
    Ok(urls)
}

/// What this invocation is going to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SetConfig(String),
    Search(String),
    Prompt,
    Usage,
    Targets(Vec<String>),
}

/// `--config` beats `--search`, which beats everything else
pub fn route(args: &Args, interactive: bool) -> Result<Route, CliError> {
    if let Some(assignment) = &args.config {
        return Ok(Route::SetConfig(assignment.clone()));
    }
    if let Some(query) = &args.search {
        return Ok(Route::Search(query.clone()));
    }

    let urls = collect_urls(args)?;
    Ok(if !urls.is_empty() {
        Route::Targets(urls)
    } else if interactive {
        Route::Prompt
    } else {
        Route::Usage
    })
}

/// Run a route that needs the engine
pub async fn dispatch(session: &Session, route: Route, args: &Args) -> RunOutcome {
    let prefs = args.prefs();

    match route {
        Route::Search(query) => search_and_select(session, &query, &prefs).await,
        Route::Targets(urls) => {
            let strategy = FlagStrategy::new(args.info, args.download, prefs);
            session.handle_targets(&urls, &strategy).await
        }
        Route::Prompt => {
            let Some(query) = session.prompter().input("Enter a YouTube URL or a search query:") else {
                session.presenter().warn("Exiting.");
                return RunOutcome::default();
            };

            let query = query.trim();
            if query.is_empty() {
                RunOutcome::default()
            } else if looks_like_url(query) {
                let strategy = InteractiveStrategy::new(session.prompter(), prefs);
                session.handle_target(query, &strategy).await
            } else {
                search_and_select(session, query, &prefs).await
            }
        }
        Route::SetConfig(_) | Route::Usage => RunOutcome::default(),
    }
}

fn warn_if_ffmpeg_missing() {
    let ffmpeg = ToolManager::new().get_tool_info(ToolType::Ffmpeg);
    if !ffmpeg.is_available {
        warn!(
            "[Tools] ffmpeg not found: merging formats and audio extraction will fail. {}",
            ToolType::Ffmpeg.install_hint()
        );
    }
}

/// Routes that finish without yt-dlp; `None` means the engine is needed.
/// The config location is only resolved when the route touches the store.
pub fn run_without_engine<L>(
    route: &Route,
    presenter: &Presenter,
    locate: L,
) -> Result<Option<RunOutcome>, CliError>
where
    L: FnOnce() -> Result<PathBuf, ConfigError>,
{
    match route {
        Route::SetConfig(assignment) => {
            let store = ConfigStore::new(locate()?);
            let (key, value) = store.apply_assignment(assignment)?;
            presenter.success(&format!("Configuration updated: {} = {}", key, value));
            Ok(Some(RunOutcome::default()))
        }
        Route::Usage => {
            let _ = Args::command().print_help();
            Ok(Some(RunOutcome::default()))
        }
        _ => Ok(None),
    }
}

/// Full invocation against the real terminal and yt-dlp
pub async fn run(args: Args) -> Result<RunOutcome, CliError> {
    let presenter = Presenter::terminal();
    let interactive = presenter.is_terminal();

    let route = route(&args, interactive)?;
    debug!("[Cli] route {:?} (interactive: {})", route, interactive);

    if let Some(outcome) = run_without_engine(&route, &presenter, ConfigStore::default_location)? {
        return Ok(outcome);
    }

    let config = ConfigStore::new(ConfigStore::default_location()?).load()?;
    let engine = YtDlpCli::locate()?;
    if args.download || args.audio_only || interactive {
        warn_if_ffmpeg_missing();
    }

    let network = args.network(config.proxy());
    let session = Session::new(config, Arc::new(engine), presenter, Box::new(DialoguerPrompter::new()))
        .with_interactive(interactive)
        .with_network(network)
        .with_search_limit(args.max_results);

    Ok(dispatch(&session, route, &args).await)
}
