// External tool detection (yt-dlp, ffmpeg)

use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolType {
    YtDlp,
    Ffmpeg,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "yt-dlp",
            ToolType::Ffmpeg => "ffmpeg",
        }
    }

    /// Environment variable that overrides the binary location
    pub fn env_override(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "YTDLP_PATH",
            ToolType::Ffmpeg => "FFMPEG_PATH",
        }
    }

    pub fn install_hint(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "Install yt-dlp: brew install yt-dlp OR pip3 install yt-dlp",
            ToolType::Ffmpeg => "Install ffmpeg: brew install ffmpeg OR apt install ffmpeg",
        }
    }

    fn version_arg(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "--version",
            ToolType::Ffmpeg => "-version",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub version: Option<String>,
    pub path: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Default)]
pub struct ToolManager;

impl ToolManager {
    pub fn new() -> Self {
        Self
    }

    pub fn get_tool_info(&self, tool_type: ToolType) -> ToolInfo {
        let path = self.detect_tool(tool_type);
        let version = path
            .as_deref()
            .and_then(|p| self.get_version(p, tool_type));

        ToolInfo {
            // A binary that cannot report its version is treated as broken
            is_available: version.is_some(),
            version,
            path,
        }
    }

    fn detect_tool(&self, tool_type: ToolType) -> Option<String> {
        if let Ok(path) = std::env::var(tool_type.env_override()) {
            if !path.trim().is_empty() {
                return Some(path);
            }
        }

        let binary_name = tool_type.as_str();

        // 1. Try common paths first
        let common_paths = [
            format!("/opt/homebrew/bin/{}", binary_name),
            format!("/usr/local/bin/{}", binary_name),
            format!("/usr/bin/{}", binary_name),
        ];

        for path in common_paths {
            if Path::new(&path).exists() {
                return Some(path);
            }
        }

        // 2. Try PATH
        if let Ok(output) = Command::new("which").arg(binary_name).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Some(path);
                }
            }
        }

        // 3. Bare name, resolved by the OS at spawn time
        Some(binary_name.to_string())
    }

    fn get_version(&self, path: &str, tool_type: ToolType) -> Option<String> {
        match Command::new(path).arg(tool_type.version_arg()).output() {
            Ok(output) if output.status.success() => {
                let out = String::from_utf8_lossy(&output.stdout);
                first_line(&out)
            }
            _ => None,
        }
    }
}

fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(
            first_line("\nffmpeg version 6.1 Copyright\nbuilt with gcc\n").as_deref(),
            Some("ffmpeg version 6.1 Copyright")
        );
        assert_eq!(first_line("   \n"), None);
    }

    #[test]
    fn test_unrunnable_binary_has_no_version() {
        let manager = ToolManager::new();
        let info = manager.get_version("/definitely/not/here/yt-dlp", ToolType::YtDlp);
        assert!(info.is_none());
    }

    #[test]
    fn test_env_override_to_missing_binary_is_unavailable() {
        std::env::set_var("FFMPEG_PATH", "/definitely/not/here/ffmpeg");
        let info = ToolManager::new().get_tool_info(ToolType::Ffmpeg);
        std::env::remove_var("FFMPEG_PATH");

        assert_eq!(info.path.as_deref(), Some("/definitely/not/here/ffmpeg"));
        assert!(info.version.is_none());
        assert!(!info.is_available);
    }
}
