// Failure diagnostics - classifies yt-dlp error output
//
// Maps the free-form stderr of a failed probe or download onto a small set of
// reasons so the console can print one actionable hint per URL.

use std::fmt;

/// Reasons why yt-dlp may fail for a single target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Not available in the caller's country
    GeoBlocked,

    /// Deleted, removed or otherwise gone
    VideoUnavailable,

    /// Private video requiring authorization
    PrivateVideo,

    /// Age-restricted content requiring login
    AgeRestricted,

    /// DRM-protected or paid content
    DrmProtected,

    /// Requires channel membership
    MembersOnly,

    /// yt-dlp has no extractor for the URL, or it is not a URL at all
    UnsupportedUrl,

    /// The requested format id does not exist for this media
    FormatUnavailable,

    /// 429 / too many requests
    RateLimited,

    /// Bot check or captcha
    BotDetection,

    /// HTTP 403 without a more specific cause
    Http403Forbidden,

    /// Timeouts, refused connections, DNS failures
    Network,

    /// Anything else
    Unknown,
}

impl FailureReason {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::GeoBlocked => "Geographic restriction",
            Self::VideoUnavailable => "Video unavailable",
            Self::PrivateVideo => "Private video",
            Self::AgeRestricted => "Age-restricted content",
            Self::DrmProtected => "DRM-protected content",
            Self::MembersOnly => "Members-only content",
            Self::UnsupportedUrl => "Unsupported URL",
            Self::FormatUnavailable => "Requested format not available",
            Self::RateLimited => "Rate limited",
            Self::BotDetection => "Bot detection triggered",
            Self::Http403Forbidden => "Access denied (HTTP 403)",
            Self::Network => "Network error",
            Self::Unknown => "Extraction failed",
        }
    }

    /// One-line suggestion for the user
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::GeoBlocked => Some("Try a proxy in an allowed region (--proxy)."),
            Self::PrivateVideo | Self::AgeRestricted | Self::MembersOnly => {
                Some("Pass cookies from an account with access (--cookies).")
            }
            Self::FormatUnavailable => Some("List the available formats with --info."),
            Self::RateLimited | Self::BotDetection | Self::Http403Forbidden => {
                Some("Wait a few minutes or switch network/proxy, then retry.")
            }
            Self::Network => Some("Check your connection or proxy settings."),
            Self::UnsupportedUrl => Some("Check the URL; search phrases go through --search."),
            Self::VideoUnavailable | Self::DrmProtected | Self::Unknown => None,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Analyze error message and return the failure reason
pub fn diagnose_error(error: &str) -> Option<FailureReason> {
    if error.trim().is_empty() {
        return None;
    }

    let lower = error.to_lowercase();

    // Checked in order of specificity
    if lower.contains("drm")
        || lower.contains("widevine")
        || lower.contains("requires purchase")
        || lower.contains("requires payment")
    {
        return Some(FailureReason::DrmProtected);
    }

    if lower.contains("members only")
        || lower.contains("members-only")
        || lower.contains("join this channel")
        || lower.contains("available to members")
    {
        return Some(FailureReason::MembersOnly);
    }

    if lower.contains("age-restricted")
        || lower.contains("sign in to confirm your age")
        || lower.contains("age_verification")
    {
        return Some(FailureReason::AgeRestricted);
    }

    if lower.contains("private video")
        || lower.contains("video is private")
        || lower.contains("sign in if you've been granted access")
    {
        return Some(FailureReason::PrivateVideo);
    }

    if lower.contains("available in your country")
        || lower.contains("blocked in your country")
        || lower.contains("geo restrict")
        || lower.contains("geo-restrict")
    {
        return Some(FailureReason::GeoBlocked);
    }

    if lower.contains("video unavailable")
        || lower.contains("video has been removed")
        || lower.contains("no longer available")
        || lower.contains("video is unavailable")
    {
        return Some(FailureReason::VideoUnavailable);
    }

    if lower.contains("unsupported url") || lower.contains("is not a valid url") {
        return Some(FailureReason::UnsupportedUrl);
    }

    if lower.contains("requested format is not available") {
        return Some(FailureReason::FormatUnavailable);
    }

    if lower.contains("429") || lower.contains("rate limit") || lower.contains("too many requests")
    {
        return Some(FailureReason::RateLimited);
    }

    if lower.contains("not a bot") || lower.contains("captcha") || lower.contains("unusual traffic")
    {
        return Some(FailureReason::BotDetection);
    }

    if lower.contains("403") || lower.contains("forbidden") {
        return Some(FailureReason::Http403Forbidden);
    }

    if lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connection refused")
        || lower.contains("network is unreachable")
        || lower.contains("name or service not known")
        || lower.contains("getaddrinfo failed")
    {
        return Some(FailureReason::Network);
    }

    Some(FailureReason::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_error_has_no_reason() {
        assert_eq!(diagnose_error(""), None);
        assert_eq!(diagnose_error("  \n"), None);
    }

    #[test]
    fn test_geo_detection() {
        let error = "ERROR: [youtube] abc: Video not available in your country";
        assert_eq!(diagnose_error(error), Some(FailureReason::GeoBlocked));
    }

    #[test]
    fn test_unavailable_detection() {
        let error = "ERROR: [youtube] abc: Video unavailable. This video has been removed by the uploader";
        assert_eq!(diagnose_error(error), Some(FailureReason::VideoUnavailable));
    }

    #[test]
    fn test_unsupported_url_detection() {
        assert_eq!(
            diagnose_error("ERROR: Unsupported URL: https://example.com/"),
            Some(FailureReason::UnsupportedUrl)
        );
        assert_eq!(
            diagnose_error("ERROR: 'foo' is not a valid URL. Set --default-search"),
            Some(FailureReason::UnsupportedUrl)
        );
    }

    #[test]
    fn test_format_detection() {
        let error = "ERROR: [youtube] abc: Requested format is not available. Use --list-formats";
        assert_eq!(diagnose_error(error), Some(FailureReason::FormatUnavailable));
    }

    #[test]
    fn test_age_restricted_detection() {
        let error = "Sign in to confirm your age. This video may be inappropriate";
        assert_eq!(diagnose_error(error), Some(FailureReason::AgeRestricted));
    }

    #[test]
    fn test_network_detection() {
        let error = "ERROR: Unable to download webpage: <urlopen error timed out>";
        assert_eq!(diagnose_error(error), Some(FailureReason::Network));
    }

    #[test]
    fn test_fallback_is_unknown() {
        assert_eq!(diagnose_error("something odd"), Some(FailureReason::Unknown));
    }
}
