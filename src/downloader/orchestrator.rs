// Download orchestrator - one engine call per URL, strictly in order

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use super::format_selector::FormatSelector;
use super::models::{DownloadReport, DownloadRequest, NetworkConfig, ProgressEvent, UrlOutcome};
use super::traits::{FetchOptions, MediaEngine, ProgressEmitter};
use super::utils::output_template;
use crate::presenter::Presenter;

pub struct Downloader<'a> {
    engine: &'a dyn MediaEngine,
    presenter: &'a Presenter,
    /// `output_path` from the user config
    default_output: Option<PathBuf>,
    network: NetworkConfig,
}

impl<'a> Downloader<'a> {
    pub fn new(engine: &'a dyn MediaEngine, presenter: &'a Presenter) -> Self {
        Self {
            engine,
            presenter,
            default_output: None,
            network: NetworkConfig::default(),
        }
    }

    pub fn with_default_output(mut self, path: Option<PathBuf>) -> Self {
        self.default_output = path;
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Explicit path, else the configured default, else the current directory
    pub fn resolve_output_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.default_output.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Engine options for a request
    pub fn build_options(&self, request: &DownloadRequest, progress: ProgressEmitter) -> FetchOptions {
        let format = FormatSelector::for_request(request.format_id.as_deref(), request.audio_only);
        let output_dir = self.resolve_output_path(request.output_path());

        FetchOptions {
            post_process: format.post_process(),
            format,
            output_template: output_template(&output_dir),
            network: self.network.clone(),
            progress,
        }
    }

    /// Download every URL of the request; a failing URL never stops the batch
    pub async fn download(&self, request: &DownloadRequest) -> DownloadReport {
        let mut report = DownloadReport::default();

        for url in request.urls() {
            self.presenter.starting(url);

            let display = self.presenter.progress("Downloading...");
            let hook = display.clone();
            let options = self.build_options(
                request,
                ProgressEmitter::new(Arc::new(move |event: &ProgressEvent| hook.update(event))),
            );
            debug!(
                "[Downloader] {} -> {} (format {})",
                url,
                options.output_template.display(),
                options.format.spec()
            );

            match self.engine.fetch(url, &options).await {
                Ok(()) => {
                    display.finish();
                    self.presenter.finished();
                    report.push(url.as_str(), UrlOutcome::Succeeded);
                }
                Err(e) => {
                    display.abandon();
                    warn!("[Downloader] {} failed: {}", url, e);
                    self.presenter.download_failed(url, &e);
                    report.push(url.as_str(), UrlOutcome::Failed(e));
                }
            }
        }

        report
    }
}
