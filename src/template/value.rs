//! Value serialization module
//!
//! Writes dynamic values into a rendered output buffer, with optional
//! HTML escaping.

use std::borrow::Cow;
use std::fmt;

/// A value resolvable from a data record.
///
/// The three shapes are handled differently by [`write_value`]: byte and
/// text values are escaped in place, while `Other` values are stringified
/// first and the escape decision is applied to that representation.
pub enum Value<'a> {
    /// Raw bytes, written as-is (escaped per flag).
    Bytes(&'a [u8]),
    /// Text, written as its UTF-8 bytes (escaped per flag).
    Text(Cow<'a, str>),
    /// Anything else; rendered via its `Display` representation.
    Other(Box<dyn fmt::Display + 'a>),
}

/// A data record a template executes against.
///
/// `field` resolves a directive's field name to a value, or `None` when the
/// record does not carry that field. The conventional name `@` refers to the
/// record itself, for templates executed against a single bare value.
pub trait Record {
    fn field(&self, name: &str) -> Option<Value<'_>>;
}

/// Write `value` to `out`, HTML-escaping when `escape` is set.
///
/// `Other` values are always stringified before the escape decision is
/// applied: escaping never changes the chosen textual representation, only
/// whether reserved characters are encoded afterward.
pub fn write_value(out: &mut Vec<u8>, escape: bool, value: &Value<'_>) {
    match value {
        Value::Bytes(bytes) => write_text(out, bytes, escape),
        Value::Text(text) => write_text(out, text.as_bytes(), escape),
        Value::Other(display) => {
            let repr = display.to_string();
            if escape {
                write_text(out, repr.as_bytes(), true);
            } else {
                out.extend_from_slice(repr.as_bytes());
            }
        }
    }
}

/// Write text to `out`, HTML-escaping when `escape` is set.
fn write_text(out: &mut Vec<u8>, text: &[u8], escape: bool) {
    if escape {
        escape_html(out, text);
    } else {
        out.extend_from_slice(text);
    }
}

/// Append `text` to `out` with `&`, `<`, `>` and `"` replaced by their
/// entity equivalents. All other bytes pass through unchanged.
///
/// The input is scanned exactly once, so running the escaper over its own
/// output double-encodes entity sequences.
pub fn escape_html(out: &mut Vec<u8>, text: &[u8]) {
    for &byte in text {
        match byte {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'"' => out.extend_from_slice(b"&quot;"),
            _ => out.push(byte),
        }
    }
}
