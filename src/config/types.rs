// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    pub http: String,
    /// Worker thread count (CPU cores when unset)
    pub workers: Option<usize>,
}

/// Site layout configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Parent directory of `static/`, `content/`, and `tmpl/`
    pub root: PathBuf,
}

impl SiteConfig {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Directory of documents served through the templating pipeline
    pub fn content_dir(&self) -> PathBuf {
        self.root.join("content")
    }

    /// Directory of assets served byte-for-byte
    pub fn static_dir(&self) -> PathBuf {
        self.root.join("static")
    }

    /// Directory holding `page.html` and `error.html`
    pub fn tmpl_dir(&self) -> PathBuf {
        self.root.join("tmpl")
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Write one access log line per handled request
    pub access_log: bool,
    /// Access log format (combined, common, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
