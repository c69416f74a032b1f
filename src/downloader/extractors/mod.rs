// Extractors module - the yt-dlp engine and everything around probing
//
// - cli: `MediaEngine` implementation over the yt-dlp binary
// - orchestrator: console-facing info client (probe/search, failure reporting)
// - diagnostics: classification of yt-dlp error output

pub mod cli;
pub mod diagnostics;
pub mod orchestrator;

pub use cli::YtDlpCli;
pub use diagnostics::{diagnose_error, FailureReason};
pub use orchestrator::InfoClient;
