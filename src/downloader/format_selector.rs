// FormatSelector - which stream yt-dlp should fetch
//
// Three cases:
// - Audio only: best audio stream, then extract to MP3
// - Explicit format id: pin that exact stream
// - Default: best video + best audio merged, falling back to best single file

/// Default selection when nothing is specified
pub const BEST_VIDEO_AUDIO: &str = "bestvideo+bestaudio/best";

/// Selection used for audio-only downloads
pub const BEST_AUDIO: &str = "bestaudio/best";

/// Codec audio-only downloads are converted to
pub const AUDIO_CODEC: &str = "mp3";

/// Target bitrate (kbps) of the audio conversion
pub const AUDIO_QUALITY_KBPS: u32 = 192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSelector {
    BestVideoAudio,
    BestAudio,
    Exact(String),
}

impl FormatSelector {
    /// Audio-only wins over an explicit id; blank ids fall back to the default
    pub fn for_request(format_id: Option<&str>, audio_only: bool) -> Self {
        if audio_only {
            return Self::BestAudio;
        }
        match format_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Exact(id.to_string()),
            _ => Self::BestVideoAudio,
        }
    }

    /// yt-dlp `-f` expression
    pub fn spec(&self) -> &str {
        match self {
            Self::BestVideoAudio => BEST_VIDEO_AUDIO,
            Self::BestAudio => BEST_AUDIO,
            Self::Exact(id) => id,
        }
    }

    /// Post-processing this selection implies
    pub fn post_process(&self) -> Option<PostProcess> {
        match self {
            Self::BestAudio => Some(PostProcess::extract_audio()),
            Self::BestVideoAudio | Self::Exact(_) => None,
        }
    }
}

/// Post-processing step run by the engine after the download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcess {
    /// Convert to an audio-only file (needs ffmpeg)
    ExtractAudio { codec: String, quality_kbps: u32 },
}

impl PostProcess {
    pub fn extract_audio() -> Self {
        Self::ExtractAudio {
            codec: AUDIO_CODEC.to_string(),
            quality_kbps: AUDIO_QUALITY_KBPS,
        }
    }

    /// yt-dlp arguments for this step
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Self::ExtractAudio {
                codec,
                quality_kbps,
            } => vec![
                "-x".to_string(),
                "--audio-format".to_string(),
                codec.clone(),
                "--audio-quality".to_string(),
                format!("{}K", quality_kbps),
            ],
        }
    }
}
