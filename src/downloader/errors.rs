// Error types for the media engine and download pipeline

use thiserror::Error;

use super::extractors::diagnostics::{diagnose_error, FailureReason};

#[derive(Debug, Clone, Error)]
pub enum DownloadError {
    /// yt-dlp could not be found or started
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Failed to parse yt-dlp JSON output
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Process plumbing failed (spawn, pipes, wait)
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// yt-dlp ran and reported a failure for this target
    #[error("{message}")]
    Extraction {
        reason: FailureReason,
        message: String,
    },

    /// A download request was built without any URL
    #[error("No URLs to download")]
    EmptyRequest,
}

impl DownloadError {
    /// Classified reason, when yt-dlp itself reported the failure
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Extraction { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Short advice for the user, if the reason has any
    pub fn hint(&self) -> Option<&'static str> {
        self.reason().and_then(|r| r.hint())
    }
}

// yt-dlp stderr -> classified extraction failure
impl From<String> for DownloadError {
    fn from(stderr: String) -> Self {
        let reason = diagnose_error(&stderr).unwrap_or(FailureReason::Unknown);
        Self::Extraction {
            reason,
            message: summarize_stderr(&stderr),
        }
    }
}

/// Pick the most useful line out of yt-dlp's stderr.
///
/// `ERROR:` lines win; otherwise the last non-empty line is used.
pub fn summarize_stderr(stderr: &str) -> String {
    let error_line = stderr
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("ERROR:"))
        .map(|l| l.trim_start_matches("ERROR:").trim());

    let line = error_line.or_else(|| stderr.lines().map(str::trim).rev().find(|l| !l.is_empty()));

    match line {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => "yt-dlp exited with an error".to_string(),
    }
}
