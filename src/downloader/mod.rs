// Downloader module - engine abstraction, request model and orchestration

pub mod errors;
pub mod extractors;
pub mod format_selector;
pub mod models;
pub mod orchestrator;
pub mod tools;
pub mod traits;
pub mod utils;

#[cfg(test)]
pub mod testing;

pub use errors::DownloadError;
pub use extractors::{InfoClient, YtDlpCli};
pub use format_selector::FormatSelector;
pub use models::{DownloadReport, DownloadRequest, Format, MediaInfo, NetworkConfig, ProgressEvent};
pub use orchestrator::Downloader;
pub use traits::{MediaEngine, ProgressEmitter};
