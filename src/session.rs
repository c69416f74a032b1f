// Session - the context shared by every command path
//
// Holds the loaded config, the engine, the presenter and the prompter, and
// runs the probe -> resolve -> act cycle for one target at a time.

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::downloader::models::{DownloadReport, NetworkConfig};
use crate::downloader::{Downloader, InfoClient, MediaEngine};
use crate::intent::{Action, IntentStrategy};
use crate::interactive::Prompter;
use crate::presenter::Presenter;
use crate::ytdlp::DEFAULT_SEARCH_RESULTS;

/// Aggregate counts used for the process exit code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub attempted: usize,
    pub failed: usize,
}

impl RunOutcome {
    pub fn succeeded() -> Self {
        Self {
            attempted: 1,
            failed: 0,
        }
    }

    pub fn failed() -> Self {
        Self {
            attempted: 1,
            failed: 1,
        }
    }

    pub fn from_report(report: &DownloadReport) -> Self {
        Self {
            attempted: report.results.len(),
            failed: report.failed(),
        }
    }

    pub fn merge(&mut self, other: RunOutcome) {
        self.attempted += other.attempted;
        self.failed += other.failed;
    }

    /// 0 when nothing failed, 2 on partial failure, 3 when everything failed
    pub fn exit_code(&self) -> u8 {
        if self.failed == 0 {
            0
        } else if self.failed >= self.attempted {
            3
        } else {
            2
        }
    }
}

pub struct Session {
    config: Config,
    engine: Arc<dyn MediaEngine>,
    presenter: Presenter,
    prompter: Box<dyn Prompter>,
    interactive: bool,
    network: NetworkConfig,
    search_limit: usize,
}

impl Session {
    pub fn new(
        config: Config,
        engine: Arc<dyn MediaEngine>,
        presenter: Presenter,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        let network = NetworkConfig {
            proxy: config.proxy(),
            ..NetworkConfig::default()
        };

        Self {
            config,
            engine,
            presenter,
            prompter,
            interactive: false,
            network,
            search_limit: DEFAULT_SEARCH_RESULTS,
        }
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    pub fn info_client(&self) -> InfoClient<'_> {
        InfoClient::new(self.engine.as_ref(), &self.presenter).with_network(self.network.clone())
    }

    pub fn downloader(&self) -> Downloader<'_> {
        Downloader::new(self.engine.as_ref(), &self.presenter)
            .with_default_output(self.config.output_path())
            .with_network(self.network.clone())
    }

    /// Probe one target, let the strategy decide, then carry the actions out
    pub async fn handle_target(&self, target: &str, strategy: &dyn IntentStrategy) -> RunOutcome {
        let Some(info) = self.info_client().probe(target).await else {
            return RunOutcome::failed();
        };

        let actions = strategy.resolve(target, &info, &self.presenter);
        debug!("[Session] {} -> {} action(s)", target, actions.len());

        let mut outcome = RunOutcome::default();
        let mut downloaded = false;
        for action in actions {
            match action {
                Action::ShowFormats => self.presenter.render_formats(Some(&info)),
                Action::Download(request) => {
                    let report = self.downloader().download(&request).await;
                    outcome.merge(RunOutcome::from_report(&report));
                    downloaded = true;
                }
            }
        }

        if !downloaded {
            // The probe itself was the work
            outcome.merge(RunOutcome::succeeded());
        }
        outcome
    }

    /// Targets one after another, each independently
    pub async fn handle_targets(&self, targets: &[String], strategy: &dyn IntentStrategy) -> RunOutcome {
        let mut outcome = RunOutcome::default();
        for target in targets {
            outcome.merge(self.handle_target(target, strategy).await);
        }
        outcome
    }
}
