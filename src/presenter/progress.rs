// Progress display - maps engine progress events onto a 0-100 bar

use indicatif::{ProgressBar, ProgressStyle};

use crate::downloader::models::ProgressEvent;

const BAR_TEMPLATE: &str = "{msg:.cyan} [{bar:40.cyan/blue}] {pos:>3}%";

/// Cloneable handle; all clones drive the same bar
#[derive(Clone)]
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    pub fn new(label: &str) -> Self {
        Self::from_bar(ProgressBar::new(100), label)
    }

    /// Tracks position without drawing anything
    pub fn hidden(label: &str) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(100);
        Self::from_bar(bar, label)
    }

    fn from_bar(bar: ProgressBar, label: &str) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_message(label.to_string());
        Self { bar }
    }

    /// Events without a known total leave the bar where it is
    pub fn update(&self, event: &ProgressEvent) {
        if let Some(percent) = event.percent() {
            self.bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.set_position(100);
        self.bar.finish();
    }

    /// Stop drawing and keep the bar at its last position
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_total_does_not_advance() {
        let display = ProgressDisplay::hidden("Downloading...");
        display.update(&ProgressEvent::downloading(Some(10), Some(40)));
        assert_eq!(display.position(), 25);

        display.update(&ProgressEvent::downloading(Some(30), None));
        assert_eq!(display.position(), 25);

        display.update(&ProgressEvent::downloading(None, None));
        assert_eq!(display.position(), 25);
    }

    #[test]
    fn test_finished_event_sets_full() {
        let display = ProgressDisplay::hidden("Downloading...");
        display.update(&ProgressEvent::finished());
        assert_eq!(display.position(), 100);
    }

    #[test]
    fn test_clones_share_state() {
        let display = ProgressDisplay::hidden("x");
        let hook = display.clone();
        hook.update(&ProgressEvent::downloading(Some(1), Some(2)));
        assert_eq!(display.position(), 50);
        display.finish();
        assert_eq!(hook.position(), 100);
    }
}
