// CLI engine - drives the native `yt-dlp` binary
//
// Probes run `yt-dlp --dump-single-json` and deserialize the result.
// Downloads stream stdout line by line so progress reaches the hook while
// the process is still running; stderr is collected for diagnostics.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

use crate::downloader::errors::DownloadError;
use crate::downloader::models::{MediaInfo, ProgressEvent};
use crate::downloader::tools::{ToolManager, ToolType};
use crate::downloader::traits::{FetchOptions, MediaEngine, ProbeOptions};
use crate::downloader::utils::{network_args, run_output, spawn_error};
use crate::ytdlp::{parse_notice, parse_progress_line, EngineNotice, PROGRESS_TEMPLATE};

/// Engine backed by the yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlpCli {
    ytdlp_path: String,
}

impl YtDlpCli {
    pub fn new(ytdlp_path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Locate yt-dlp; fails with an install hint when it cannot run
    pub fn locate() -> Result<Self, DownloadError> {
        let tool = ToolManager::new().get_tool_info(ToolType::YtDlp);
        match (tool.is_available, tool.path) {
            (true, Some(path)) => {
                debug!(
                    "[YtDlpCli] using {} ({})",
                    path,
                    tool.version.as_deref().unwrap_or("unknown version")
                );
                Ok(Self::new(path))
            }
            _ => Err(DownloadError::ToolNotFound(format!(
                "yt-dlp is not installed or not runnable. {}",
                ToolType::YtDlp.install_hint()
            ))),
        }
    }

    /// Build probe arguments
    pub fn build_probe_args(&self, query: &str, options: &ProbeOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--no-warnings".to_string(),
        ];

        if options.flat_entries {
            args.push("--flat-playlist".to_string());
        }

        args.extend(network_args(&options.network));
        args.push("--".to_string());
        args.push(query.to_string());
        args
    }

    /// Build download arguments
    pub fn build_fetch_args(&self, url: &str, options: &FetchOptions) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            options.format.spec().to_string(),
            "-o".to_string(),
            options.output_template.to_string_lossy().into_owned(),
            "--newline".to_string(),
            "--no-warnings".to_string(),
            "--progress-template".to_string(),
            PROGRESS_TEMPLATE.to_string(),
        ];

        if let Some(post) = &options.post_process {
            args.extend(post.to_args());
        }

        args.extend(network_args(&options.network));
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    fn parse_json(stdout: &[u8]) -> Result<MediaInfo, DownloadError> {
        serde_json::from_slice(stdout)
            .map_err(|e| DownloadError::ParseError(format!("Invalid JSON from yt-dlp: {}", e)))
    }
}

#[async_trait]
impl MediaEngine for YtDlpCli {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    async fn probe(&self, query: &str, options: &ProbeOptions) -> Result<MediaInfo, DownloadError> {
        let args = self.build_probe_args(query, options);
        debug!("[YtDlpCli] probe: {} {}", self.ytdlp_path, args.join(" "));

        let output = run_output(&self.ytdlp_path, &args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("[YtDlpCli] probe failed: {}", stderr.trim());
            return Err(DownloadError::from(stderr.into_owned()));
        }

        Self::parse_json(&output.stdout)
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<(), DownloadError> {
        let args = self.build_fetch_args(url, options);
        debug!("[YtDlpCli] fetch: {} {}", self.ytdlp_path, args.join(" "));

        let mut child = TokioCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&self.ytdlp_path, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DownloadError::ExecutionError("Failed to capture stdout".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| DownloadError::ExecutionError("Failed to capture stderr".to_string()))?;

        // Drain stderr concurrently so a full pipe cannot stall yt-dlp
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            String::from_utf8_lossy(&buf).into_owned()
        });

        // Titles are not guaranteed to be valid UTF-8, so read raw lines
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(|e| DownloadError::ExecutionError(format!("Failed to read stdout: {}", e)))?;
            if read == 0 {
                break;
            }

            let text = String::from_utf8_lossy(&line);
            if let Some(event) = parse_progress_line(&text) {
                options.progress.emit(&event);
                continue;
            }

            match parse_notice(&text) {
                Some(EngineNotice::Destination(path)) => info!("[yt-dlp] saving to {}", path),
                Some(EngineNotice::Merging(path)) => info!("[yt-dlp] merging into {}", path),
                Some(EngineNotice::ExtractingAudio(path)) => {
                    info!("[yt-dlp] extracting audio to {}", path)
                }
                Some(EngineNotice::AlreadyDownloaded) => {
                    info!("[yt-dlp] file already downloaded");
                    options.progress.emit(&ProgressEvent::finished());
                }
                None => debug!("[yt-dlp] {}", text.trim_end()),
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| DownloadError::ExecutionError(format!("Process error: {}", e)))?;
        let stderr_output = stderr_task.await.unwrap_or_default();

        if status.success() {
            return Ok(());
        }

        Err(DownloadError::from(stderr_output))
    }
}
