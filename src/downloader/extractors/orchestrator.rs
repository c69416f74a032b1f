// Media info client - probes URLs and search phrases for display
//
// A failed probe is reported on the console and turned into `None`: the
// caller has nothing to show for that target, the process carries on.

use tracing::{debug, warn};

use crate::downloader::errors::DownloadError;
use crate::downloader::models::{MediaInfo, NetworkConfig};
use crate::downloader::traits::{MediaEngine, ProbeOptions};
use crate::presenter::Presenter;

pub struct InfoClient<'a> {
    engine: &'a dyn MediaEngine,
    presenter: &'a Presenter,
    network: NetworkConfig,
}

impl<'a> InfoClient<'a> {
    pub fn new(engine: &'a dyn MediaEngine, presenter: &'a Presenter) -> Self {
        Self {
            engine,
            presenter,
            network: NetworkConfig::default(),
        }
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    fn probe_options(&self) -> ProbeOptions {
        ProbeOptions::default()
            .with_flat_entries(true)
            .with_network(self.network.clone())
    }

    /// Metadata for a URL; `None` when the engine could not extract it
    pub async fn probe(&self, url: &str) -> Option<MediaInfo> {
        debug!("[InfoClient] probing {} via {}", url, self.engine.name());

        match self.engine.probe(url, &self.probe_options()).await {
            Ok(info) => Some(info),
            Err(e) => {
                self.report_failure(&e);
                None
            }
        }
    }

    /// Run a search; `None` when the engine failed
    pub async fn search(&self, phrase: &str, limit: usize) -> Option<MediaInfo> {
        debug!("[InfoClient] searching {:?} (top {})", phrase, limit);

        match self.engine.search(phrase, limit, &self.probe_options()).await {
            Ok(info) => Some(info),
            Err(e) => {
                self.report_failure(&e);
                None
            }
        }
    }

    fn report_failure(&self, error: &DownloadError) {
        if let Some(reason) = error.reason() {
            warn!("[InfoClient] extraction failed: {}", reason);
        }
        self.presenter.error(&format!("Error: {}", error));
        if let Some(hint) = error.hint() {
            self.presenter.hint(hint);
        }
    }
}
