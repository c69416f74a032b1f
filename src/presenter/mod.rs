// Presenter - everything the user sees on stdout
//
// Tables, status lines and progress bars. Output goes either to the terminal
// or, for tests, to an in-memory buffer with styling stripped.

mod progress;
mod table;

use std::sync::{Arc, Mutex};

use console::{style, Color, Term};

use crate::downloader::errors::DownloadError;
use crate::downloader::models::{Format, MediaInfo};

pub use progress::ProgressDisplay;
pub use table::Table;

/// One selectable row of a search result table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchChoice {
    pub title: String,
    pub url: String,
}

enum Sink {
    Terminal(Term),
    Memory(Arc<Mutex<Vec<String>>>),
}

pub struct Presenter {
    sink: Sink,
}

impl Presenter {
    pub fn terminal() -> Self {
        Self {
            sink: Sink::Terminal(Term::stdout()),
        }
    }

    /// Presenter that records plain lines instead of printing them
    pub fn capture() -> Self {
        Self {
            sink: Sink::Memory(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Lines recorded by a capturing presenter
    pub fn captured(&self) -> Vec<String> {
        match &self.sink {
            Sink::Memory(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            Sink::Terminal(_) => Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(&self.sink, Sink::Terminal(term) if term.is_term())
    }

    fn line(&self, text: &str) {
        match &self.sink {
            Sink::Terminal(term) => {
                let _ = term.write_line(text);
            }
            Sink::Memory(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(console::strip_ansi_codes(text).trim_end().to_string());
                }
            }
        }
    }

    pub fn success(&self, message: &str) {
        self.line(&style(message).green().to_string());
    }

    pub fn warn(&self, message: &str) {
        self.line(&style(message).yellow().to_string());
    }

    pub fn error(&self, message: &str) {
        self.line(&style(message).red().to_string());
    }

    pub fn hint(&self, hint: &str) {
        self.line(&format!("  {} {}", style("hint:").dim(), hint));
    }

    pub fn starting(&self, url: &str) {
        self.line(&format!("{} {}", style("Starting download for:").yellow(), url));
    }

    pub fn finished(&self) {
        self.success("Download finished.");
    }

    pub fn download_failed(&self, url: &str, error: &DownloadError) {
        self.error(&format!("Error downloading {}: {}", url, error));
        if let Some(hint) = error.hint() {
            self.hint(hint);
        }
    }

    /// Progress bar for one download; never drawn when capturing
    pub fn progress(&self, label: &str) -> ProgressDisplay {
        match &self.sink {
            Sink::Terminal(term) if term.is_term() => ProgressDisplay::new(label),
            _ => ProgressDisplay::hidden(label),
        }
    }

    /// Format table for a probed item; nothing when there is no info
    pub fn render_formats(&self, info: Option<&MediaInfo>) {
        let Some(info) = info else {
            return;
        };

        let mut table = Table::new()
            .with_title("Available Formats")
            .column("ID", Color::Cyan)
            .column("Ext", Color::Magenta)
            .column("Type", Color::Green)
            .column("Resolution", Color::Yellow)
            .column("Size (MB)", Color::Blue);

        for row in format_rows(&info.formats) {
            table.add_row(row);
        }

        for line in table.render() {
            self.line(&line);
        }
    }

    /// Numbered search result table; returns the rows as selectable choices
    pub fn render_search_results(&self, query: &str, entries: &[MediaInfo]) -> Vec<SearchChoice> {
        let mut table = Table::new()
            .with_title(format!("Search Results for \"{}\"", query))
            .column("#", Color::Cyan)
            .column("Title", Color::Green)
            .column("Duration", Color::Yellow)
            .column("URL", Color::Blue);

        let mut choices = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let title = entry.display_title().to_string();
            let url = entry.page_url().unwrap_or_default();
            table.add_row(vec![
                (i + 1).to_string(),
                title.clone(),
                entry_duration(entry),
                url.clone(),
            ]);
            choices.push(SearchChoice { title, url });
        }

        for line in table.render() {
            self.line(&line);
        }
        choices
    }
}

/// Table cells for each format, in engine order
pub fn format_rows(formats: &[Format]) -> Vec<Vec<String>> {
    formats
        .iter()
        .map(|f| {
            vec![
                f.format_id.clone(),
                f.ext.clone().unwrap_or_else(|| "N/A".to_string()),
                type_label(f),
                resolution_label(f),
                format_size_mib(f.filesize),
            ]
        })
        .collect()
}

fn type_label(format: &Format) -> String {
    match format.vcodec.as_deref() {
        Some("none") => "audio".to_string(),
        Some(codec) => codec.to_string(),
        None => "N/A".to_string(),
    }
}

/// Engine resolution, or the audio bitrate for audio-only streams
pub fn resolution_label(format: &Format) -> String {
    if format.is_audio_only() {
        return match format.abr {
            Some(abr) => format!("{}k", abr),
            None => "audio only".to_string(),
        };
    }
    format.resolution.clone().unwrap_or_else(|| "N/A".to_string())
}

/// Bytes as MiB with two decimals; unknown or zero sizes are "N/A"
pub fn format_size_mib(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) if b > 0 => format!("{:.2}", b as f64 / (1024.0 * 1024.0)),
        _ => "N/A".to_string(),
    }
}

/// `H:MM:SS` from an hour up, `MM:SS` below; "N/A" when unknown or zero.
/// Fractions of a second are truncated.
pub fn format_duration(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(s) if s > 0.0 => s as u64,
        _ => return "N/A".to_string(),
    };

    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

fn entry_duration(entry: &MediaInfo) -> String {
    match entry.duration_string.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => format_duration(entry.duration),
    }
}
