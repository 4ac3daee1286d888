//! Output formatter registry
//!
//! Maps format names appearing in template directives to the functions
//! that serialize a value into the rendered output.

use std::collections::HashMap;

use crate::template::value::{escape_html, write_value, Value};

/// A formatter writes one resolved value into the output buffer.
///
/// Formatters have no error return; failure can only come from the
/// underlying buffer, which is infallible.
pub type FormatterFn = fn(&mut Vec<u8>, &Value<'_>);

/// Registry of named formatters, populated once at startup and read-only
/// afterwards.
pub struct FormatterRegistry {
    formatters: HashMap<&'static str, FormatterFn>,
}

impl FormatterRegistry {
    /// Build the registry with the three standard formatters:
    /// `""` (plain text), `html`, and `html-esc`.
    pub fn with_defaults() -> Self {
        let mut formatters: HashMap<&'static str, FormatterFn> = HashMap::new();
        formatters.insert("", text_fmt);
        formatters.insert("html", html_fmt);
        formatters.insert("html-esc", html_esc_fmt);
        Self { formatters }
    }

    /// Look up a formatter by name. The empty string is the default
    /// formatter.
    pub fn get(&self, name: &str) -> Option<FormatterFn> {
        self.formatters.get(name).copied()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// `""`: plain text, no escaping.
fn text_fmt(out: &mut Vec<u8>, value: &Value<'_>) {
    write_value(out, false, value);
}

/// `html`: escape reserved characters.
fn html_fmt(out: &mut Vec<u8>, value: &Value<'_>) {
    write_value(out, true, value);
}

/// `html-esc`: always escape, regardless of the value's native form.
///
/// The value is first serialized unescaped into a scratch buffer, then the
/// whole buffer is entity-encoded. Pre-rendered HTML fragments therefore
/// come out shown literally.
fn html_esc_fmt(out: &mut Vec<u8>, value: &Value<'_>) {
    let mut buf = Vec::new();
    write_value(&mut buf, false, value);
    escape_html(out, &buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_names() {
        let registry = FormatterRegistry::with_defaults();
        assert!(registry.get("").is_some());
        assert!(registry.get("html").is_some());
        assert!(registry.get("html-esc").is_some());
        assert!(registry.get("markdown").is_none());
    }

    #[test]
    fn test_text_fmt_writes_raw() {
        let registry = FormatterRegistry::with_defaults();
        let fmt = registry.get("").unwrap();
        let mut out = Vec::new();
        fmt(&mut out, &Value::Bytes(b"<p>raw</p>"));
        assert_eq!(out, b"<p>raw</p>");
    }

    #[test]
    fn test_html_fmt_escapes() {
        let registry = FormatterRegistry::with_defaults();
        let fmt = registry.get("html").unwrap();
        let mut out = Vec::new();
        fmt(&mut out, &Value::Text("a < b".into()));
        assert_eq!(out, b"a &lt; b");
    }

    #[test]
    fn test_html_esc_fmt_escapes_rendered_fragment() {
        let registry = FormatterRegistry::with_defaults();
        let fmt = registry.get("html-esc").unwrap();
        let mut out = Vec::new();
        fmt(&mut out, &Value::Bytes(b"<em>shown literally</em>"));
        assert_eq!(out, b"&lt;em&gt;shown literally&lt;/em&gt;");
    }

    #[test]
    fn test_html_esc_fmt_on_other_equals_escaped_display() {
        // For non-byte, non-string values the output must equal
        // escape(display(value)).
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied: \"/etc\"");
        let registry = FormatterRegistry::with_defaults();
        let fmt = registry.get("html-esc").unwrap();

        let mut out = Vec::new();
        fmt(&mut out, &Value::Other(Box::new(&err)));

        let mut expected = Vec::new();
        escape_html(&mut expected, err.to_string().as_bytes());
        assert_eq!(out, expected);
    }
}
