//! Site state and page rendering
//!
//! [`Site`] is the immutable bundle built once at startup: resolved
//! content/static directories and the two parsed templates. Request
//! handlers share it behind an `Arc` and never mutate it, so no locking
//! is involved.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::logger;
use crate::template::{FormatterRegistry, Record, Template, TemplateParseError, Value};

/// Loading or parsing a template failed. Fatal at startup; the process
/// must not begin serving.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("read template {}: {source}", path.display())]
    ReadTemplate { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Parse(#[from] TemplateParseError),
}

/// Immutable per-process site state
#[derive(Debug)]
pub struct Site {
    /// Documents served through the templating pipeline
    pub content_dir: PathBuf,
    /// Assets served byte-for-byte
    pub static_dir: PathBuf,
    /// Write an access log line per handled request
    pub access_log: bool,
    /// Access log format name or pattern
    pub access_log_format: String,
    page: Template,
    error: Template,
}

/// Record backing the page shell: title/subtitle/content slots
struct PageData<'a> {
    title: &'a str,
    subtitle: &'a str,
    content: &'a [u8],
}

impl Record for PageData<'_> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match name {
            "title" => Some(Value::Text(self.title.into())),
            "subtitle" => Some(Value::Text(self.subtitle.into())),
            "content" => Some(Value::Bytes(self.content)),
            _ => None,
        }
    }
}

/// Record exposing a bare error value to the error shell as `@`
struct ErrorRecord<'a>(&'a io::Error);

impl Record for ErrorRecord<'_> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        if name == "@" {
            Some(Value::Other(Box::new(self.0)))
        } else {
            None
        }
    }
}

impl Site {
    /// Build the site state: resolve directories and parse both templates.
    ///
    /// Any failure here is fatal; the caller logs it and exits before the
    /// listener binds.
    pub fn load(config: &Config) -> Result<Self, SiteError> {
        let registry = FormatterRegistry::with_defaults();
        let tmpl_dir = config.site.tmpl_dir();
        let page = load_template(&tmpl_dir, "page.html", &registry)?;
        let error = load_template(&tmpl_dir, "error.html", &registry)?;

        Ok(Self {
            content_dir: config.site.content_dir(),
            static_dir: config.site.static_dir(),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
            page,
            error,
        })
    }

    /// Render the page shell around `content`.
    ///
    /// Best effort: an execution failure is logged and whatever bytes the
    /// template produced up to that point are returned. The serving path
    /// never fails on a broken template.
    pub fn render_page(&self, title: &str, subtitle: &str, content: &[u8]) -> Vec<u8> {
        let data = PageData {
            title,
            subtitle,
            content,
        };
        let (bytes, err) = self.page.execute(&data);
        if let Some(e) = err {
            logger::log_render_error(&e);
        }
        bytes
    }

    /// Render `err` through the error shell, then wrap it in the page
    /// shell titled after the path that failed to resolve.
    ///
    /// The error text is interpolated as-is and may embed an absolute
    /// file-system path.
    pub fn render_error(&self, err: &io::Error, rel_path: &str) -> Vec<u8> {
        let (contents, exec_err) = self.error.execute(&ErrorRecord(err));
        if let Some(e) = exec_err {
            logger::log_render_error(&e);
        }
        self.render_page(&format!("File {rel_path}"), "", &contents)
    }
}

/// Read and parse one template file. The template keeps the file name for
/// error messages.
fn load_template(
    dir: &Path,
    name: &str,
    registry: &FormatterRegistry,
) -> Result<Template, SiteError> {
    let path = dir.join(name);
    let source = std::fs::read_to_string(&path).map_err(|source| SiteError::ReadTemplate {
        path: path.clone(),
        source,
    })?;
    Ok(Template::parse(name, &source, registry)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, ServerConfig, SiteConfig};
    use std::fs;

    const PAGE: &str = "<title>{title|html-esc}</title><h2>{subtitle|html-esc}</h2>\n{content}";
    const ERROR: &str = "<p class=\"error\">{@|html-esc}</p>";

    fn temp_root(tag: &str, page: &str, error: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("siteserve-site-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("tmpl")).unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("tmpl").join("page.html"), page).unwrap();
        fs::write(root.join("tmpl").join("error.html"), error).unwrap();
        root
    }

    fn config_for(root: &Path) -> Config {
        Config {
            server: ServerConfig {
                http: crate::config::DEFAULT_ADDR.to_string(),
                workers: None,
            },
            site: SiteConfig::new(root),
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        }
    }

    #[test]
    fn test_render_page_fills_slots() {
        let root = temp_root("page", PAGE, ERROR);
        let site = Site::load(&config_for(&root)).unwrap();

        let out = site.render_page("a < b", "sub", b"<b>kept raw</b>");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<title>a &lt; b</title>"));
        assert!(text.contains("<h2>sub</h2>"));
        // The content slot uses the default formatter: literal HTML.
        assert!(text.contains("<b>kept raw</b>"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_render_error_wraps_page_shell() {
        let root = temp_root("error", PAGE, ERROR);
        let site = Site::load(&config_for(&root)).unwrap();

        let err = io::Error::new(io::ErrorKind::NotFound, "stat /srv/www/content/x: not found");
        let out = site.render_error(&err, "x.html");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("File x.html"));
        assert!(text.contains("not found"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_unknown_formatter_fails_load() {
        let root = temp_root("badfmt", "{title|markdown}", ERROR);
        let err = Site::load(&config_for(&root)).unwrap_err();
        assert!(matches!(err, SiteError::Parse(_)));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_template_fails_load() {
        let root = temp_root("missing", PAGE, ERROR);
        fs::remove_file(root.join("tmpl").join("error.html")).unwrap();
        let err = Site::load(&config_for(&root)).unwrap_err();
        assert!(matches!(err, SiteError::ReadTemplate { .. }));

        let _ = fs::remove_dir_all(&root);
    }
}
