// Interactive selector - menu-driven choices for playlists, videos and searches

use tracing::debug;

use crate::downloader::models::{DownloadRequest, MediaInfo};
use crate::intent::{Action, DownloadPrefs, IntentStrategy};
use crate::presenter::Presenter;
use crate::session::{RunOutcome, Session};

use super::Prompter;

const PLAYLIST_MENU: [&str; 3] = ["Download all", "Select videos to download", "Cancel"];
const SINGLE_MENU: [&str; 4] = ["Best quality", "Audio only", "Specific format", "Cancel"];

fn menu(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// "1. First title", "2. Second title", ...
fn numbered(titles: impl IntoIterator<Item = String>) -> Vec<String> {
    titles
        .into_iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {}", i + 1, title))
        .collect()
}

/// Asks the user what to do with each probed target
pub struct InteractiveStrategy<'a> {
    prompter: &'a dyn Prompter,
    prefs: DownloadPrefs,
}

impl<'a> InteractiveStrategy<'a> {
    pub fn new(prompter: &'a dyn Prompter, prefs: DownloadPrefs) -> Self {
        Self { prompter, prefs }
    }

    /// Collection flow. Downloads keep the audio-only flag and output path
    /// from the command line; a format id is never applied to a whole list.
    fn resolve_collection(&self, target: &str, info: &MediaInfo) -> Vec<Action> {
        let entries = info.entries();
        let prompt = format!(
            "This is a playlist with {} videos. What would you like to do?",
            entries.len()
        );

        match self.prompter.select(&prompt, &menu(&PLAYLIST_MENU)) {
            Some(0) => self.collection_download(vec![target.to_string()]),
            Some(1) => {
                let items = numbered(entries.iter().map(|e| e.display_title().to_string()));
                let picked = self.prompter.multi_select("Select videos:", &items).unwrap_or_default();

                // Selection is by position, so duplicate titles stay distinct
                let urls: Vec<String> = picked
                    .into_iter()
                    .filter_map(|i| entries.get(i))
                    .filter_map(MediaInfo::page_url)
                    .collect();

                if urls.is_empty() {
                    debug!("[Selector] nothing selected");
                }
                self.collection_download(urls)
            }
            _ => Vec::new(),
        }
    }

    /// One batch for all URLs; no action at all when the list is empty
    fn collection_download(&self, urls: Vec<String>) -> Vec<Action> {
        DownloadRequest::new(urls)
            .map(|request| {
                request
                    .with_audio_only(self.prefs.audio_only)
                    .with_output_path(self.prefs.output_path.clone())
            })
            .map(Action::Download)
            .into_iter()
            .collect()
    }

    /// Single item flow; only the output path carries over from the flags
    fn resolve_single(&self, target: &str, info: &MediaInfo, presenter: &Presenter) -> Vec<Action> {
        presenter.render_formats(Some(info));

        let base = DownloadRequest::single(target).with_output_path(self.prefs.output_path.clone());
        let request = match self.prompter.select("Select download option:", &menu(&SINGLE_MENU)) {
            Some(0) => base,
            Some(1) => base.with_audio_only(true),
            Some(2) => {
                let format_id = self
                    .prompter
                    .input("Enter the format ID:")
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty());
                match format_id {
                    Some(id) => base.with_format_id(Some(id)),
                    None => return Vec::new(),
                }
            }
            _ => return Vec::new(),
        };

        vec![Action::Download(request)]
    }
}

impl IntentStrategy for InteractiveStrategy<'_> {
    fn resolve(&self, target: &str, info: &MediaInfo, presenter: &Presenter) -> Vec<Action> {
        if info.is_collection() {
            self.resolve_collection(target, info)
        } else {
            self.resolve_single(target, info, presenter)
        }
    }
}

/// Search, show the results, and in an interactive session let the user pick
/// one to continue with
pub async fn search_and_select(session: &Session, phrase: &str, prefs: &DownloadPrefs) -> RunOutcome {
    let presenter = session.presenter();

    let Some(results) = session.info_client().search(phrase, session.search_limit()).await else {
        return RunOutcome::failed();
    };

    if results.entries().is_empty() {
        presenter.error("No search results found.");
        return RunOutcome::default();
    }

    let choices = presenter.render_search_results(phrase, results.entries());
    if !session.is_interactive() {
        return RunOutcome::succeeded();
    }

    let mut items = numbered(choices.iter().map(|c| c.title.clone()));
    items.push("Cancel".to_string());

    match session.prompter().select("Select a video to download:", &items) {
        Some(i) if i < choices.len() => {
            let choice = &choices[i];
            if choice.url.is_empty() {
                presenter.error(&format!("No URL for \"{}\"", choice.title));
                return RunOutcome::failed();
            }
            let strategy = InteractiveStrategy::new(session.prompter(), prefs.clone());
            session.handle_target(&choice.url, &strategy).await
        }
        _ => RunOutcome::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::downloader::testing::{playlist, video, FakeEngine};
    use crate::interactive::testing::{Reply, ScriptedPrompter};

    const URL: &str = "https://www.youtube.com/watch?v=a";
    const LIST: &str = "https://www.youtube.com/playlist?list=PL1";

    fn list() -> MediaInfo {
        playlist("Mix", &[("x", "Same"), ("y", "Same"), ("z", "Other")])
    }

    fn session(engine: Arc<FakeEngine>, replies: Vec<Reply>) -> Session {
        Session::new(
            Config::default(),
            engine,
            Presenter::capture(),
            Box::new(ScriptedPrompter::new(replies)),
        )
        .with_interactive(true)
    }

    async fn run_target(engine: FakeEngine, target: &str, replies: Vec<Reply>, prefs: DownloadPrefs) -> Arc<FakeEngine> {
        let engine = Arc::new(engine);
        let session = session(engine.clone(), replies);
        let strategy = InteractiveStrategy::new(session.prompter(), prefs);
        session.handle_target(target, &strategy).await;
        engine
    }

    #[tokio::test]
    async fn test_cancel_downloads_nothing() {
        let cases = vec![
            (LIST, vec![Reply::Select(Some(2))]),
            (LIST, vec![Reply::Select(None)]),
            (LIST, vec![Reply::Select(Some(1)), Reply::MultiSelect(None)]),
            (LIST, vec![Reply::Select(Some(1)), Reply::MultiSelect(Some(vec![]))]),
            (URL, vec![Reply::Select(Some(3))]),
            (URL, vec![Reply::Select(None)]),
            (URL, vec![Reply::Select(Some(2)), Reply::Input(Some("  ".into()))]),
            (URL, vec![Reply::Select(Some(2)), Reply::Input(None)]),
        ];

        for (target, replies) in cases {
            let engine = FakeEngine::new()
                .with_probe(LIST, list())
                .with_probe(URL, video("a", "A"));
            let engine = run_target(engine, target, replies, DownloadPrefs::default()).await;
            assert!(engine.fetched().is_empty(), "{} downloaded something", target);
        }
    }

    #[tokio::test]
    async fn test_download_all_keeps_flags() {
        let prefs = DownloadPrefs {
            format_id: Some("22".into()),
            audio_only: true,
            output_path: Some("/music".into()),
        };
        let engine = run_target(
            FakeEngine::new().with_probe(LIST, list()),
            LIST,
            vec![Reply::Select(Some(0))],
            prefs,
        )
        .await;

        let calls = engine.fetched();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, LIST);
        assert_eq!(calls[0].format, "bestaudio/best");
        assert_eq!(calls[0].output_template, "/music/%(title)s.%(ext)s");
    }

    #[tokio::test]
    async fn test_subset_selection_is_by_position() {
        let engine = run_target(
            FakeEngine::new().with_probe(LIST, list()),
            LIST,
            vec![Reply::Select(Some(1)), Reply::MultiSelect(Some(vec![1, 2]))],
            DownloadPrefs::default(),
        )
        .await;

        assert_eq!(
            engine.fetched_urls(),
            vec![
                "https://www.youtube.com/watch?v=y",
                "https://www.youtube.com/watch?v=z"
            ]
        );
    }

    #[tokio::test]
    async fn test_single_item_menu_choices() {
        let prefs = DownloadPrefs {
            format_id: Some("22".into()),
            audio_only: false,
            output_path: Some("/out".into()),
        };

        let best = run_target(
            FakeEngine::new().with_probe(URL, video("a", "A")),
            URL,
            vec![Reply::Select(Some(0))],
            prefs.clone(),
        )
        .await;
        assert_eq!(best.fetched()[0].format, "bestvideo+bestaudio/best");
        assert_eq!(best.fetched()[0].output_template, "/out/%(title)s.%(ext)s");

        let audio = run_target(
            FakeEngine::new().with_probe(URL, video("a", "A")),
            URL,
            vec![Reply::Select(Some(1))],
            prefs.clone(),
        )
        .await;
        assert!(audio.fetched()[0].post_process);

        let exact = run_target(
            FakeEngine::new().with_probe(URL, video("a", "A")),
            URL,
            vec![Reply::Select(Some(2)), Reply::Input(Some(" 137 ".into()))],
            prefs,
        )
        .await;
        assert_eq!(exact.fetched()[0].format, "137");
    }

    #[tokio::test]
    async fn test_playlist_prompt_lists_numbered_titles() {
        let engine = Arc::new(FakeEngine::new().with_probe(LIST, list()));
        let prompter = ScriptedPrompter::new(vec![Reply::Select(Some(1)), Reply::MultiSelect(None)]);
        let session = Session::new(
            Config::default(),
            engine,
            Presenter::capture(),
            Box::new(ScriptedPrompter::default()),
        );
        let strategy = InteractiveStrategy::new(&prompter, DownloadPrefs::default());

        session.handle_target(LIST, &strategy).await;

        let asked = prompter.asked();
        assert_eq!(
            asked[0].0,
            "This is a playlist with 3 videos. What would you like to do?"
        );
        assert_eq!(asked[1].1, vec!["1. Same", "2. Same", "3. Other"]);
    }

    #[tokio::test]
    async fn test_search_selection_enters_single_item_flow() {
        let results = playlist("lofi", &[("a", "First"), ("b", "Second")]);
        let engine = Arc::new(
            FakeEngine::new()
                .with_probe("ytsearch10:lofi", results)
                .with_probe("https://www.youtube.com/watch?v=b", video("b", "Second")),
        );
        let session = session(
            engine.clone(),
            vec![Reply::Select(Some(1)), Reply::Select(Some(0))],
        );

        let outcome = search_and_select(&session, "lofi", &DownloadPrefs::default()).await;

        assert_eq!(outcome, RunOutcome { attempted: 1, failed: 0 });
        assert_eq!(engine.fetched_urls(), vec!["https://www.youtube.com/watch?v=b"]);
    }

    #[tokio::test]
    async fn test_search_cancel_downloads_nothing() {
        let results = playlist("lofi", &[("a", "First"), ("b", "Second")]);
        let engine = Arc::new(FakeEngine::new().with_probe("ytsearch10:lofi", results));
        // Index 2 is the trailing "Cancel" item
        let session = session(engine.clone(), vec![Reply::Select(Some(2))]);

        search_and_select(&session, "lofi", &DownloadPrefs::default()).await;

        assert!(engine.fetched().is_empty());
        assert_eq!(engine.probed(), vec!["ytsearch10:lofi"]);
    }

    #[tokio::test]
    async fn test_non_interactive_search_prints_table_only() {
        let results = playlist("lofi", &[("a", "First")]);
        let engine = Arc::new(FakeEngine::new().with_probe("ytsearch10:lofi", results));
        let session = session(engine.clone(), vec![Reply::Select(Some(0))]).with_interactive(false);

        search_and_select(&session, "lofi", &DownloadPrefs::default()).await;

        assert!(engine.fetched().is_empty());
        assert!(session
            .presenter()
            .captured()
            .iter()
            .any(|l| l.contains("First")));
    }

    #[tokio::test]
    async fn test_empty_search_reports_no_results() {
        let engine = Arc::new(FakeEngine::new().with_probe("ytsearch10:nothing", playlist("x", &[])));
        let session = session(engine, Vec::new());

        search_and_select(&session, "nothing", &DownloadPrefs::default()).await;

        assert!(session
            .presenter()
            .captured()
            .contains(&"No search results found.".to_string()));
    }
}
