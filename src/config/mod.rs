// Configuration module entry point
// Layers: defaults < optional server.toml < SITE_* environment < CLI flags

mod types;

use clap::Parser;

// Re-export public types
pub use types::{Config, LoggingConfig, ServerConfig, SiteConfig};

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address when neither configuration nor flags set one
pub const DEFAULT_ADDR: &str = "0.0.0.0:31798";

/// Command-line flags. Both override the file/environment configuration.
#[derive(Debug, Parser, Default)]
#[command(name = "siteserve", about = "Serve a content tree through an HTML page template")]
pub struct Cli {
    /// HTTP service address (e.g. '0.0.0.0:31798')
    #[arg(long)]
    pub http: Option<String>,

    /// Site root (parent of 'static', 'content', and 'tmpl')
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the optional `server.toml`, the `SITE_`
    /// environment, and built-in defaults, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("SITE"))
            .set_default("server.http", DEFAULT_ADDR)?
            .set_default("site.root", "site")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.apply_cli(cli);
        Ok(cfg)
    }

    /// Apply command-line overrides on top of the loaded configuration
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref http) = cli.http {
            self.server.http.clone_from(http);
        }
        if let Some(ref root) = cli.root {
            self.site = SiteConfig::new(root);
        }
    }

    /// The listen address as a `SocketAddr`
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .http
            .parse()
            .map_err(|e| format!("Invalid address '{}': {e}", self.server.http))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                http: DEFAULT_ADDR.to_string(),
                workers: None,
            },
            site: SiteConfig::new(std::path::Path::new("site")),
            logging: LoggingConfig {
                access_log: true,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        }
    }

    #[test]
    fn test_cli_overrides_address_and_root() {
        let mut cfg = base_config();
        let cli = Cli {
            http: Some("127.0.0.1:8080".to_string()),
            root: Some(PathBuf::from("/srv/www")),
        };
        cfg.apply_cli(&cli);
        assert_eq!(cfg.server.http, "127.0.0.1:8080");
        assert_eq!(cfg.site.root, PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_empty_cli_keeps_config() {
        let mut cfg = base_config();
        cfg.apply_cli(&Cli::default());
        assert_eq!(cfg.server.http, DEFAULT_ADDR);
        assert_eq!(cfg.site.root, PathBuf::from("site"));
    }

    #[test]
    fn test_site_layout_subdirectories() {
        let site = SiteConfig::new(std::path::Path::new("/srv/www"));
        assert_eq!(site.content_dir(), PathBuf::from("/srv/www/content"));
        assert_eq!(site.static_dir(), PathBuf::from("/srv/www/static"));
        assert_eq!(site.tmpl_dir(), PathBuf::from("/srv/www/tmpl"));
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let mut cfg = base_config();
        cfg.server.http = "not-an-address".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
