// Common data models for downloader

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::DownloadError;

/// Base URL used when a flat search entry only carries a video id
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Metadata snapshot returned by a probe.
///
/// The same shape describes a single video, a playlist and a search result
/// list; the latter two carry `entries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub formats: Vec<Format>,
    #[serde(default, deserialize_with = "entries_without_holes")]
    pub entries: Option<Vec<MediaInfo>>,
    pub webpage_url: Option<String>,
    /// Flat playlist entries carry their link here instead of `webpage_url`
    pub url: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Preformatted duration, e.g. "3:25"
    pub duration_string: Option<String>,
}

impl MediaInfo {
    /// Playlist, channel or search result list
    pub fn is_collection(&self) -> bool {
        self.entries.is_some()
    }

    pub fn entries(&self) -> &[MediaInfo] {
        self.entries.as_deref().unwrap_or(&[])
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("N/A")
    }

    /// Link that can be handed back to the engine for this item
    pub fn page_url(&self) -> Option<String> {
        self.webpage_url
            .clone()
            .or_else(|| self.url.clone())
            .or_else(|| self.id.as_ref().map(|id| format!("{}{}", WATCH_URL_PREFIX, id)))
    }
}

/// One retrievable stream variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    pub ext: Option<String>,
    /// Video codec, "none" for audio-only streams
    pub vcodec: Option<String>,
    /// e.g. "1920x1080" or "audio only"
    pub resolution: Option<String>,
    /// Average audio bitrate in kbps
    pub abr: Option<f64>,
    /// Exact size in bytes, when the server reports it
    pub filesize: Option<u64>,
}

impl Format {
    pub fn is_audio_only(&self) -> bool {
        match self.resolution.as_deref() {
            Some(res) => res == "audio only",
            None => !self.has_video(),
        }
    }

    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref().map_or(false, |v| v != "none")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Format>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Format>>::deserialize(deserializer)?.unwrap_or_default())
}

// Unavailable playlist items come back as `null`
fn entries_without_holes<'de, D>(deserializer: D) -> Result<Option<Vec<MediaInfo>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Option<MediaInfo>>>::deserialize(deserializer)?;
    Ok(entries.map(|list| list.into_iter().flatten().collect()))
}

/// What the user asked to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    urls: Vec<String>,
    pub format_id: Option<String>,
    pub audio_only: bool,
    pub output_path: Option<PathBuf>,
}

impl DownloadRequest {
    /// Build a request; an empty URL list is rejected
    pub fn new(urls: Vec<String>) -> Result<Self, DownloadError> {
        if urls.is_empty() {
            return Err(DownloadError::EmptyRequest);
        }
        Ok(Self {
            urls,
            format_id: None,
            audio_only: false,
            output_path: None,
        })
    }

    pub fn single(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            format_id: None,
            audio_only: false,
            output_path: None,
        }
    }

    pub fn with_format_id(mut self, format_id: Option<String>) -> Self {
        self.format_id = format_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn with_audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn with_output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }
}

/// Engine-reported state of a running download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    Finished,
}

/// Progress update pushed by the engine while a download runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
}

impl ProgressEvent {
    pub fn downloading(downloaded_bytes: Option<u64>, total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes,
        }
    }

    pub fn finished() -> Self {
        Self {
            status: ProgressStatus::Finished,
            downloaded_bytes: None,
            total_bytes: None,
        }
    }

    /// Completion in percent; `None` while the total is unknown
    pub fn percent(&self) -> Option<f64> {
        match self.status {
            ProgressStatus::Finished => Some(100.0),
            ProgressStatus::Downloading => match (self.downloaded_bytes, self.total_bytes) {
                (Some(done), Some(total)) if total > 0 && done > 0 => {
                    Some((done as f64 / total as f64 * 100.0).min(100.0))
                }
                _ => None,
            },
        }
    }
}

/// Network configuration forwarded to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Socket timeout in seconds
    pub timeout: Option<u32>,

    /// Netscape-format cookies file
    pub cookies: Option<PathBuf>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
            cookies: None,
        }
    }
}

/// Result of one URL inside a batch
#[derive(Debug, Clone)]
pub enum UrlOutcome {
    Succeeded,
    Failed(DownloadError),
}

#[derive(Debug, Clone)]
pub struct UrlResult {
    pub url: String,
    pub outcome: UrlOutcome,
}

impl UrlResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, UrlOutcome::Succeeded)
    }
}

/// Per-URL results of a download batch, in input order
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub results: Vec<UrlResult>,
}

impl DownloadReport {
    pub fn push(&mut self, url: impl Into<String>, outcome: UrlOutcome) {
        self.results.push(UrlResult {
            url: url.into(),
            outcome,
        });
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
