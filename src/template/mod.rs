//! Template rendering pipeline
//!
//! Formatter registry, value serialization, and the directive parser and
//! executor. Business data shapes (page and error records) live with the
//! page renderer in `crate::site`.

pub mod engine;
pub mod format;
pub mod value;

// Re-export the types the rest of the crate works with
pub use engine::{Template, TemplateExecError, TemplateParseError};
pub use format::FormatterRegistry;
pub use value::{Record, Value};
