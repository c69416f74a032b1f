// Config store - per-user defaults in a flat JSON object of strings

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name under the home directory
pub const CONFIG_FILE_NAME: &str = ".youtube_downloader_config.json";

/// Environment variable that overrides the config location
pub const CONFIG_ENV: &str = "YTDL_CONFIG";

/// Keys the tool reads; others are stored but have no effect
pub const KNOWN_KEYS: &[&str] = &["output_path", "proxy"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file {path} is not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid config assignment {0:?}: expected key=value")]
    InvalidAssignment(String),

    #[error("Cannot determine the home directory; set YTDL_CONFIG")]
    NoHome,
}

/// Flat string-to-string mapping, serialized as a plain JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Config {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Default download directory
    pub fn output_path(&self) -> Option<PathBuf> {
        self.get("output_path")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Default proxy URL
    pub fn proxy(&self) -> Option<String> {
        self.get("proxy")
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split `key=value` on the first `=`; the value may itself contain `=`
pub fn parse_assignment(assignment: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidAssignment(assignment.to_string()))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::InvalidAssignment(assignment.to_string()));
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// Reads and writes the config file at one location
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$YTDL_CONFIG`, else the file in the user's home directory
    pub fn default_location() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoHome)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the mapping; a missing file is an empty config
    pub fn load(&self) -> Result<Config, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("[Config] {} not found, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!("[Config] loaded {} key(s) from {}", config.len(), self.path.display());
        Ok(config)
    }

    /// Overwrite the whole file with 4-space indented JSON
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut serializer)?;

        fs::write(&self.path, buf).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Parse `key=value`, store it and save immediately
    pub fn apply_assignment(&self, assignment: &str) -> Result<(String, String), ConfigError> {
        let (key, value) = parse_assignment(assignment)?;
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn!("[Config] unknown key {:?} stored but not used", key);
        }

        let mut config = self.load()?;
        config.set(key.clone(), value.clone());
        self.save(&config)?;
        Ok((key, value))
    }
}
