//! Message rendering: template selection, placeholder binding, verbosity.
//!
//! Rendering is pure: identical `(rule, level, params)` always yields the
//! identical `Rendered`. A message that exceeds the verbosity limit is
//! truncated and flagged, never failed, since message formatting must not
//! abort the pipeline it reports on.

mod params;

pub use params::{ParamValue, Params};

use std::collections::BTreeSet;

use crate::diagnostic::Level;
use crate::error::DiagnosticError;
use crate::rules::RuleDescriptor;

pub const DEFAULT_MAX_MESSAGE_LEN: usize = 2000;

/// Rendering knobs shared by every diagnostic raised through an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Verbosity limit in characters; longer messages are truncated.
    pub max_message_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

/// A rendered message plus its verbosity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub truncated: bool,
}

/// Select the template for `level` (falling back to `default`), check that
/// every placeholder is bound, substitute, and apply the verbosity limit.
pub fn render(
    rule: &RuleDescriptor,
    level: Level,
    params: &Params,
    options: RenderOptions,
) -> Result<Rendered, DiagnosticError> {
    let template = rule
        .template_for(level)
        .ok_or_else(|| DiagnosticError::MissingTemplate {
            rule_id: rule.id.clone(),
            level,
        })?;

    let required = placeholders(template);
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !params.contains(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        // No partial rendering: report every absent name at once.
        return Err(DiagnosticError::MissingParameters {
            rule_id: rule.id.clone(),
            names: missing,
        });
    }

    let text = substitute(template, params);
    Ok(truncate_to_limit(text, options.max_message_len))
}

/// Named placeholders referenced by a template, sorted. Extra keys a caller
/// binds beyond these are ignored at render time.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    scan(template, |piece| {
        if let Piece::Placeholder(name) = piece {
            names.insert(name.to_string());
        }
    });
    names
}

fn substitute(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    scan(template, |piece| match piece {
        Piece::Literal(text) => out.push_str(text),
        Piece::Placeholder(name) => {
            // Coverage was checked up front; the value is present.
            if let Some(value) = params.get(name) {
                out.push_str(&value.to_string());
            }
        }
    });
    out
}

enum Piece<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

// Walks a template, yielding literal runs and `{name}` placeholders.
// `{{`/`}}` are escapes; a brace that does not open a well-formed
// placeholder is ordinary text.
fn scan<'a>(template: &'a str, mut visit: impl FnMut(Piece<'a>)) {
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'{' if bytes.get(index + 1) == Some(&b'{') => {
                visit(Piece::Literal(&template[literal_start..=index]));
                index += 2;
                literal_start = index;
            }
            b'}' if bytes.get(index + 1) == Some(&b'}') => {
                visit(Piece::Literal(&template[literal_start..=index]));
                index += 2;
                literal_start = index;
            }
            b'{' => {
                if let Some(name) = placeholder_name(&template[index + 1..]) {
                    visit(Piece::Literal(&template[literal_start..index]));
                    visit(Piece::Placeholder(name));
                    index += name.len() + 2;
                    literal_start = index;
                } else {
                    index += 1;
                }
            }
            _ => index += 1,
        }
    }

    if literal_start < template.len() {
        visit(Piece::Literal(&template[literal_start..]));
    }
}

// A placeholder name is a non-empty ASCII identifier directly followed by `}`.
fn placeholder_name(rest: &str) -> Option<&str> {
    let end = rest
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len());
    if end > 0 && rest[end..].starts_with('}') {
        Some(&rest[..end])
    } else {
        None
    }
}

fn truncate_to_limit(text: String, limit: usize) -> Rendered {
    if text.chars().count() <= limit {
        return Rendered {
            text,
            truncated: false,
        };
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    Rendered {
        text: truncated,
        truncated: true,
    }
}
