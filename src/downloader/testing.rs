// Test doubles for the media engine

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{MediaInfo, ProgressEvent};
use super::traits::{FetchOptions, MediaEngine, ProbeOptions};

/// A recorded `fetch` call
#[derive(Debug, Clone)]
pub struct FetchCall {
    pub url: String,
    pub format: String,
    pub output_template: String,
    pub post_process: bool,
}

/// Scripted engine: probes answer from a map, fetches fail for chosen URLs
#[derive(Default)]
pub struct FakeEngine {
    probes: HashMap<String, MediaInfo>,
    failing: HashSet<String>,
    pub probe_calls: Mutex<Vec<String>>,
    pub fetch_calls: Mutex<Vec<FetchCall>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_probe(mut self, query: &str, info: MediaInfo) -> Self {
        self.probes.insert(query.to_string(), info);
        self
    }

    pub fn failing_on(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<FetchCall> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched().into_iter().map(|c| c.url).collect()
    }

    pub fn probed(&self) -> Vec<String> {
        self.probe_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn probe(&self, query: &str, _options: &ProbeOptions) -> Result<MediaInfo, DownloadError> {
        self.probe_calls.lock().unwrap().push(query.to_string());
        self.probes.get(query).cloned().ok_or_else(|| {
            DownloadError::from(format!("ERROR: [generic] {}: Video unavailable", query))
        })
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<(), DownloadError> {
        self.fetch_calls.lock().unwrap().push(FetchCall {
            url: url.to_string(),
            format: options.format.spec().to_string(),
            output_template: options.output_template.to_string_lossy().into_owned(),
            post_process: options.post_process.is_some(),
        });

        if self.failing.contains(url) {
            return Err(DownloadError::from(format!(
                "ERROR: [youtube] {}: Video unavailable",
                url
            )));
        }

        options.progress.emit(&ProgressEvent::downloading(Some(1), Some(2)));
        options.progress.emit(&ProgressEvent::finished());
        Ok(())
    }
}

/// A single video with one audio and one video format
pub fn video(id: &str, title: &str) -> MediaInfo {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "webpage_url": format!("https://www.youtube.com/watch?v={}", id),
        "duration": 65,
        "formats": [
            {"format_id": "140", "ext": "m4a", "vcodec": "none", "resolution": "audio only", "abr": 128.0, "filesize": 1048576},
            {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028", "resolution": "1920x1080"}
        ]
    }))
    .unwrap()
}

/// A flat playlist of the given (id, title) pairs
pub fn playlist(title: &str, items: &[(&str, &str)]) -> MediaInfo {
    let entries: Vec<serde_json::Value> = items
        .iter()
        .map(|(id, t)| {
            serde_json::json!({
                "id": id,
                "title": t,
                "url": format!("https://www.youtube.com/watch?v={}", id),
                "duration": 3725
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "title": title,
        "entries": entries
    }))
    .unwrap()
}
