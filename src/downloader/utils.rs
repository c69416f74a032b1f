// Helper functions shared by the engine and the orchestrator

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use tokio::process::Command as TokioCommand;

use crate::downloader::errors::DownloadError;
use crate::downloader::models::NetworkConfig;

/// File name template handed to yt-dlp
pub const OUTPUT_NAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Run a command to completion and capture its output
pub async fn run_output(program: &str, args: &[String]) -> Result<Output, DownloadError> {
    TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| spawn_error(program, e))
}

/// Map a spawn failure to the matching error variant
pub fn spawn_error(program: &str, e: std::io::Error) -> DownloadError {
    if e.kind() == std::io::ErrorKind::NotFound {
        DownloadError::ToolNotFound(format!("{}: {}", program, e))
    } else {
        DownloadError::ExecutionError(format!("Failed to start {}: {}", program, e))
    }
}

/// Output template inside the given directory
pub fn output_template(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_NAME_TEMPLATE)
}

/// Anything starting with "http" is treated as a URL, the rest as a search
pub fn looks_like_url(input: &str) -> bool {
    input.trim_start().starts_with("http")
}

/// Build proxy arguments for yt-dlp
pub fn get_proxy_args(config: &NetworkConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(proxy) = &config.proxy {
        args.push("--proxy".to_string());
        args.push(proxy.clone());
    }

    args
}

/// Build timeout arguments for yt-dlp
pub fn get_timeout_args(config: &NetworkConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(timeout) = config.timeout {
        args.push("--socket-timeout".to_string());
        args.push(timeout.to_string());
    }

    args
}

/// Build cookie arguments for yt-dlp
pub fn get_cookie_args(config: &NetworkConfig) -> Vec<String> {
    match &config.cookies {
        Some(path) => vec!["--cookies".to_string(), path.to_string_lossy().into_owned()],
        None => Vec::new(),
    }
}

/// All network-related arguments
pub fn network_args(config: &NetworkConfig) -> Vec<String> {
    let mut args = get_proxy_args(config);
    args.extend(get_timeout_args(config));
    args.extend(get_cookie_args(config));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_template() {
        let template = output_template(Path::new("/tmp/x"));
        assert_eq!(template, PathBuf::from("/tmp/x/%(title)s.%(ext)s"));
    }

    #[test]
    fn test_looks_like_url() {
        assert!(looks_like_url("https://youtu.be/abc"));
        assert!(looks_like_url("http://example.com"));
        assert!(!looks_like_url("lofi hip hop"));
    }

    #[test]
    fn test_network_args() {
        let config = NetworkConfig {
            proxy: Some("socks5://127.0.0.1:1080".into()),
            timeout: Some(15),
            cookies: Some(PathBuf::from("cookies.txt")),
        };
        assert_eq!(
            network_args(&config),
            vec![
                "--proxy",
                "socks5://127.0.0.1:1080",
                "--socket-timeout",
                "15",
                "--cookies",
                "cookies.txt"
            ]
        );
        assert!(network_args(&NetworkConfig {
            timeout: None,
            ..NetworkConfig::default()
        })
        .is_empty());
    }
}
