//! Engine-internal error taxonomy.
//!
//! Every variant here is a programmer-facing integrity error: a defect in rule
//! authoring or call-site usage, surfaced synchronously to the immediate
//! caller and never retried or swallowed. End users of the exporter only see
//! rendered diagnostics, not these kinds.

use std::fmt;

use crate::diagnostic::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    /// A descriptor with this id is already registered.
    DuplicateRuleId { id: String },
    /// A descriptor with this name is already registered.
    DuplicateRuleName { name: String },
    /// No descriptor is registered under this id.
    UnknownRule { id: String },
    /// The rule has no template for the requested level and no `default`.
    MissingTemplate { rule_id: String, level: Level },
    /// The template references placeholders the caller did not bind.
    /// Carries every missing name, sorted.
    MissingParameters {
        rule_id: String,
        names: Vec<String>,
    },
    /// `set_location` was called twice on the same diagnostic.
    LocationAlreadySet { rule_id: String },
    /// The diagnostic was mutated after `finalize`.
    DiagnosticFinalized { rule_id: String },
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticError::DuplicateRuleId { id } => {
                write!(f, "a rule with id `{id}` is already registered")
            }
            DiagnosticError::DuplicateRuleName { name } => {
                write!(f, "a rule with name `{name}` is already registered")
            }
            DiagnosticError::UnknownRule { id } => {
                write!(f, "no rule registered under id `{id}`")
            }
            DiagnosticError::MissingTemplate { rule_id, level } => {
                write!(
                    f,
                    "rule `{rule_id}` has no `{level}` message template and no `default` fallback"
                )
            }
            DiagnosticError::MissingParameters { rule_id, names } => {
                write!(
                    f,
                    "rule `{rule_id}` template placeholders not bound: {}",
                    names.join(", ")
                )
            }
            DiagnosticError::LocationAlreadySet { rule_id } => {
                write!(f, "location already set on diagnostic for rule `{rule_id}`")
            }
            DiagnosticError::DiagnosticFinalized { rule_id } => {
                write!(
                    f,
                    "diagnostic for rule `{rule_id}` is finalized and can no longer be mutated"
                )
            }
        }
    }
}

impl std::error::Error for DiagnosticError {}
