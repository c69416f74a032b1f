// Media engine trait definition

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::errors::DownloadError;
use super::format_selector::{FormatSelector, PostProcess};
use super::models::{MediaInfo, NetworkConfig, ProgressEvent};
use crate::ytdlp::search_directive;

/// Callback invoked for every progress update; must return immediately
pub type ProgressHook = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Trait for the external extraction engine
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Name of the engine (for logging)
    fn name(&self) -> &'static str;

    /// Fetch metadata for a URL or search directive without downloading
    async fn probe(&self, query: &str, options: &ProbeOptions) -> Result<MediaInfo, DownloadError>;

    /// Download one URL, reporting progress through `options.progress`
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<(), DownloadError>;

    /// Top `limit` results for a free-text phrase, listed without resolving
    async fn search(
        &self,
        phrase: &str,
        limit: usize,
        options: &ProbeOptions,
    ) -> Result<MediaInfo, DownloadError> {
        let options = options.clone().with_flat_entries(true);
        self.probe(&search_directive(phrase, limit), &options).await
    }
}

/// Options for a metadata probe
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    /// List playlist/search entries without resolving each one
    pub flat_entries: bool,
    pub network: NetworkConfig,
}

impl ProbeOptions {
    pub fn with_flat_entries(mut self, flat: bool) -> Self {
        self.flat_entries = flat;
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }
}

/// Everything the engine needs for one download
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub format: FormatSelector,
    /// Output path template, e.g. `downloads/%(title)s.%(ext)s`
    pub output_template: PathBuf,
    pub post_process: Option<PostProcess>,
    pub network: NetworkConfig,
    pub progress: ProgressEmitter,
}

/// Progress emitter helper
#[derive(Clone)]
pub struct ProgressEmitter {
    hook: ProgressHook,
}

impl ProgressEmitter {
    pub fn new(hook: ProgressHook) -> Self {
        Self { hook }
    }

    /// Emitter that drops every event
    pub fn silent() -> Self {
        Self {
            hook: Arc::new(|_: &ProgressEvent| {}),
        }
    }

    pub fn emit(&self, event: &ProgressEvent) {
        (self.hook)(event);
    }
}

impl fmt::Debug for ProgressEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressEmitter").finish_non_exhaustive()
    }
}
