// yt-dlp output conventions: progress lines, status notices, search directives

use regex::Regex;

use crate::downloader::models::{ProgressEvent, ProgressStatus};

/// Progress template passed with `--progress-template`.
///
/// Produces lines like `[progress] downloading 1048576 5242880`; yt-dlp prints
/// `NA` for fields it does not know.
pub const PROGRESS_TEMPLATE: &str =
    "download:[progress] %(progress.status)s %(progress.downloaded_bytes)s %(progress.total_bytes)s";

/// Search results requested when no count is given
pub const DEFAULT_SEARCH_RESULTS: usize = 10;

lazy_static::lazy_static! {
    static ref PROGRESS_RE: Regex =
        Regex::new(r"^\[progress\]\s+(\w+)\s+(\S+)\s+(\S+)\s*$").unwrap();
    static ref DEST_RE: Regex = Regex::new(r"^\[download\]\s+Destination:\s+(.+)$").unwrap();
    static ref MERGE_RE: Regex = Regex::new(r"^\[Merger\]\s+Merging formats into\s+(.+)$").unwrap();
    static ref EXTRACT_RE: Regex = Regex::new(r"^\[ExtractAudio\]\s+Destination:\s+(.+)$").unwrap();
    static ref ALREADY_RE: Regex = Regex::new(r"has already been downloaded").unwrap();
}

/// Search directive for the engine, e.g. `ytsearch10:lofi beats`
pub fn search_directive(phrase: &str, limit: usize) -> String {
    format!("ytsearch{}:{}", limit.max(1), phrase.trim())
}

/// Parse one line produced by [`PROGRESS_TEMPLATE`]
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let caps = PROGRESS_RE.captures(line.trim_end())?;

    let status = match caps.get(1)?.as_str() {
        "downloading" => ProgressStatus::Downloading,
        "finished" => ProgressStatus::Finished,
        _ => return None,
    };

    Some(ProgressEvent {
        status,
        downloaded_bytes: parse_bytes(caps.get(2)?.as_str()),
        total_bytes: parse_bytes(caps.get(3)?.as_str()),
    })
}

// "NA" and "None" mean unknown; sizes may be printed as floats
fn parse_bytes(field: &str) -> Option<u64> {
    if let Ok(n) = field.parse::<u64>() {
        return Some(n);
    }
    field
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u64)
}

/// Other yt-dlp status lines worth surfacing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineNotice {
    Destination(String),
    Merging(String),
    ExtractingAudio(String),
    AlreadyDownloaded,
}

pub fn parse_notice(line: &str) -> Option<EngineNotice> {
    let line = line.trim_end();

    if let Some(caps) = EXTRACT_RE.captures(line) {
        return Some(EngineNotice::ExtractingAudio(caps[1].trim().to_string()));
    }
    if let Some(caps) = DEST_RE.captures(line) {
        return Some(EngineNotice::Destination(caps[1].trim().to_string()));
    }
    if let Some(caps) = MERGE_RE.captures(line) {
        return Some(EngineNotice::Merging(caps[1].trim().trim_matches('"').to_string()));
    }
    if ALREADY_RE.is_match(line) {
        return Some(EngineNotice::AlreadyDownloaded);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_with_known_total() {
        let event = parse_progress_line("[progress] downloading 1048576 4194304").unwrap();
        assert_eq!(event.status, ProgressStatus::Downloading);
        assert_eq!(event.downloaded_bytes, Some(1_048_576));
        assert_eq!(event.total_bytes, Some(4_194_304));
        assert_eq!(event.percent(), Some(25.0));
    }

    #[test]
    fn test_progress_with_unknown_total() {
        let event = parse_progress_line("[progress] downloading 2048 NA").unwrap();
        assert_eq!(event.total_bytes, None);
        assert_eq!(event.percent(), None);
    }

    #[test]
    fn test_progress_finished() {
        let event = parse_progress_line("[progress] finished 4194304 4194304\n").unwrap();
        assert_eq!(event.status, ProgressStatus::Finished);
        assert_eq!(event.percent(), Some(100.0));
    }

    #[test]
    fn test_progress_ignores_other_lines() {
        assert!(parse_progress_line("[youtube] abc: Downloading webpage").is_none());
        assert!(parse_progress_line("[progress] error NA NA").is_none());
    }

    #[test]
    fn test_float_sizes() {
        let event = parse_progress_line("[progress] downloading 10.0 40.0").unwrap();
        assert_eq!(event.downloaded_bytes, Some(10));
        assert_eq!(event.total_bytes, Some(40));
    }

    #[test]
    fn test_notices() {
        assert_eq!(
            parse_notice("[download] Destination: out/Song.f137.mp4"),
            Some(EngineNotice::Destination("out/Song.f137.mp4".into()))
        );
        assert_eq!(
            parse_notice("[Merger] Merging formats into \"out/Song.mp4\""),
            Some(EngineNotice::Merging("out/Song.mp4".into()))
        );
        assert_eq!(
            parse_notice("[ExtractAudio] Destination: out/Song.mp3"),
            Some(EngineNotice::ExtractingAudio("out/Song.mp3".into()))
        );
        assert_eq!(
            parse_notice("[download] out/Song.mp4 has already been downloaded"),
            Some(EngineNotice::AlreadyDownloaded)
        );
        assert_eq!(parse_notice("[info] something"), None);
    }

    #[test]
    fn test_search_directive() {
        assert_eq!(search_directive(" lofi beats ", 5), "ytsearch5:lofi beats");
        assert_eq!(search_directive("x", 0), "ytsearch1:x");
    }
}
