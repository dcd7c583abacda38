//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default tRPC endpoint root.
pub const DEFAULT_API_BASE_URL: &str = "https://civitai.com/api/trpc";

/// Default host serving media files for relative URLs.
pub const DEFAULT_MEDIA_BASE_URL: &str = "https://image.civitai.com";

/// Main configuration structure.
///
/// Built once at startup and passed by reference to everything that needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CivitAI API key, sent as a bearer token and embedded in media URLs.
    #[serde(default)]
    pub api_key: String,

    /// Root directory for downloads.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Seconds to wait between consecutive API requests.
    #[serde(default = "default_request_delay")]
    pub request_delay: f64,

    /// Retries per file download after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Console log level (error, warn, info, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the log file.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_media_base_url")]
    pub media_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            download_dir: default_download_dir(),
            request_delay: default_request_delay(),
            max_retries: default_max_retries(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            api_base_url: default_api_base_url(),
            media_base_url: default_media_base_url(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "civitai", "civitai-downloader")
}

/// `~/Pictures/CivitAI`, or `./CivitAI` when no home directory is known.
pub fn default_download_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| {
            dirs.picture_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dirs.home_dir().join("Pictures"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
        .join("CivitAI")
}

fn default_request_delay() -> f64 {
    0.5
}

fn default_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_media_base_url() -> String {
    DEFAULT_MEDIA_BASE_URL.to_string()
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Delay applied between consecutive API requests.
    pub fn request_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.request_delay).unwrap_or(Duration::ZERO)
    }

    /// API key safe for logging: first and last four characters only.
    pub fn masked_api_key(&self) -> String {
        let key = &self.api_key;
        let chars: Vec<char> = key.chars().collect();
        if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        } else {
            "***".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = \"abc\"\nmax_retries = 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.request_delay, 0.5);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.media_base_url, DEFAULT_MEDIA_BASE_URL);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_key: "0123456789abcdef".into(),
            download_dir: PathBuf::from("/tmp/civitai"),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.api_key, config.api_key);
        assert_eq!(loaded.download_dir, config.download_dir);
    }

    #[test]
    fn test_request_delay() {
        let mut config = Config::default();
        assert_eq!(config.request_delay(), Duration::from_millis(500));
        config.request_delay = -1.0;
        assert_eq!(config.request_delay(), Duration::ZERO);
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = Config::default();
        config.api_key = "15e227dd841ce90e".into();
        assert_eq!(config.masked_api_key(), "15e2***e90e");
        config.api_key = "short".into();
        assert_eq!(config.masked_api_key(), "***");
    }
}
