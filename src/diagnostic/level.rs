//! Diagnostic severity levels

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic, ordered from least to most severe.
///
/// The ordering drives the abort policy: `None < Note < Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Recorded but carries no severity of its own
    #[default]
    None,
    /// Provides additional context or information
    Note,
    /// Indicates a potential problem that doesn't stop the export
    Warning,
    /// Indicates a problem that should stop the current pipeline stage
    Error,
}

impl Level {
    /// Tag string used for template selection and in the structured dump.
    pub fn tag(&self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Note => "note",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
