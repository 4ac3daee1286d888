//! Template parsing and execution
//!
//! A template source is plain text interspersed with substitution
//! directives of the form `{field}` or `{field|formatter}`. Parsing
//! resolves every formatter name against the registry up front, so a
//! parsed template can be executed without further lookups.

use thiserror::Error;

use crate::template::format::{FormatterFn, FormatterRegistry};
use crate::template::value::Record;

/// Template source is malformed. Carries the template name and the
/// 1-based line the offending directive starts on.
#[derive(Debug, Error)]
pub enum TemplateParseError {
    #[error("{name}:{line}: unterminated directive")]
    Unterminated { name: String, line: usize },
    #[error("{name}:{line}: empty field reference")]
    EmptyField { name: String, line: usize },
    #[error("{name}:{line}: malformed directive {{{directive}}}")]
    Malformed {
        name: String,
        line: usize,
        directive: String,
    },
    #[error("{name}:{line}: unknown formatter `{formatter}`")]
    UnknownFormatter {
        name: String,
        line: usize,
        formatter: String,
    },
}

/// The supplied data record does not carry a field the template
/// references. Execution stops at the failing directive; output produced
/// up to that point is kept.
#[derive(Debug, Error)]
#[error("{template}: no field `{field}` in data record")]
pub struct TemplateExecError {
    pub template: String,
    pub field: String,
}

/// One parsed segment of a template.
#[derive(Debug)]
enum Node {
    /// Literal text, copied through verbatim.
    Text(String),
    /// A substitution directive with its formatter resolved at parse time.
    Field { name: String, formatter: FormatterFn },
}

/// An immutable, parsed template. Created once at startup and shared
/// read-only across request handlers.
#[derive(Debug)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source` against `registry`. `name` identifies the template
    /// in error messages (by convention the source file name).
    pub fn parse(
        name: &str,
        source: &str,
        registry: &FormatterRegistry,
    ) -> Result<Self, TemplateParseError> {
        let mut nodes = Vec::new();
        let mut rest = source;
        let mut line = 1;

        while let Some(open) = rest.find('{') {
            let (text, directive_on) = rest.split_at(open);
            if !text.is_empty() {
                line += text.matches('\n').count();
                nodes.push(Node::Text(text.to_string()));
            }

            let body_on = &directive_on[1..];
            let Some(close) = body_on.find('}') else {
                return Err(TemplateParseError::Unterminated {
                    name: name.to_string(),
                    line,
                });
            };
            let directive = &body_on[..close];
            nodes.push(parse_directive(name, line, directive, registry)?);

            line += directive.matches('\n').count();
            rest = &body_on[close + 1..];
        }

        if !rest.is_empty() {
            nodes.push(Node::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            nodes,
        })
    }

    /// Execute the template against `record`.
    ///
    /// Always returns the bytes produced so far. When a referenced field is
    /// missing from the record the error slot is filled and the output is
    /// partial; there is no rollback.
    pub fn execute(&self, record: &dyn Record) -> (Vec<u8>, Option<TemplateExecError>) {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.extend_from_slice(text.as_bytes()),
                Node::Field { name, formatter } => match record.field(name) {
                    Some(value) => formatter(&mut out, &value),
                    None => {
                        let err = TemplateExecError {
                            template: self.name.clone(),
                            field: name.clone(),
                        };
                        return (out, Some(err));
                    }
                },
            }
        }
        (out, None)
    }
}

/// Parse one directive body (the text between `{` and `}`).
fn parse_directive(
    name: &str,
    line: usize,
    directive: &str,
    registry: &FormatterRegistry,
) -> Result<Node, TemplateParseError> {
    let mut parts = directive.split('|');
    let field = parts.next().unwrap_or_default().trim();
    let formatter_name = parts.next().map(str::trim);

    // A second `|` or an embedded `{` is not a directive we recognize.
    if parts.next().is_some() || directive.contains('{') {
        return Err(TemplateParseError::Malformed {
            name: name.to_string(),
            line,
            directive: directive.to_string(),
        });
    }

    if field.is_empty() {
        return Err(TemplateParseError::EmptyField {
            name: name.to_string(),
            line,
        });
    }
    if !is_field_name(field) {
        return Err(TemplateParseError::Malformed {
            name: name.to_string(),
            line,
            directive: directive.to_string(),
        });
    }

    let formatter_name = formatter_name.unwrap_or("");
    let Some(formatter) = registry.get(formatter_name) else {
        return Err(TemplateParseError::UnknownFormatter {
            name: name.to_string(),
            line,
            formatter: formatter_name.to_string(),
        });
    };

    Ok(Node::Field {
        name: field.to_string(),
        formatter,
    })
}

/// Field names are identifiers, or the single `@` referring to the record
/// itself.
fn is_field_name(field: &str) -> bool {
    field == "@" || field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
