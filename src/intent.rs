// Intent strategies - turn a probed target into the actions to perform
//
// The flag strategy reads what the user passed on the command line; the
// interactive strategy (see `interactive::selector`) asks through menus.

use std::path::PathBuf;

use tracing::info;

use crate::downloader::models::{DownloadRequest, MediaInfo};
use crate::presenter::Presenter;

/// Something to do with a probed target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowFormats,
    Download(DownloadRequest),
}

/// Download preferences given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadPrefs {
    pub format_id: Option<String>,
    pub audio_only: bool,
    pub output_path: Option<PathBuf>,
}

impl DownloadPrefs {
    /// Request for one URL carrying every preference
    pub fn request(&self, url: &str) -> DownloadRequest {
        DownloadRequest::single(url)
            .with_format_id(self.format_id.clone())
            .with_audio_only(self.audio_only)
            .with_output_path(self.output_path.clone())
    }
}

pub trait IntentStrategy {
    fn resolve(&self, target: &str, info: &MediaInfo, presenter: &Presenter) -> Vec<Action>;
}

/// `--info` / `--download` driven resolution
#[derive(Debug, Clone, Default)]
pub struct FlagStrategy {
    pub show_info: bool,
    pub download: bool,
    pub prefs: DownloadPrefs,
}

impl FlagStrategy {
    pub fn new(show_info: bool, download: bool, prefs: DownloadPrefs) -> Self {
        Self {
            show_info,
            download,
            prefs,
        }
    }
}

impl IntentStrategy for FlagStrategy {
    fn resolve(&self, target: &str, _info: &MediaInfo, _presenter: &Presenter) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.show_info {
            actions.push(Action::ShowFormats);
        }
        if self.download {
            actions.push(Action::Download(self.prefs.request(target)));
        }
        if actions.is_empty() {
            info!("[Flags] nothing to do for {} (pass --info or --download)", target);
        }

        actions
    }
}
