//! Severity resolution and abort signaling.
//!
//! The policy classifies and signals; it never unwinds the caller. A stage
//! that receives `should_abort == true` decides for itself how to stop,
//! which keeps the engine embeddable in collect-everything dry runs.

use std::collections::HashMap;

use crate::diagnostic::Level;
use crate::rules::RuleDescriptor;

/// Tagged runtime outcome a pipeline stage reports when raising a rule whose
/// severity is decided at runtime (e.g. exact vs. nearest opschema match).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeveritySignal {
    /// Use this level as-is; the rule's severity is statically known.
    Fixed(Level),
    /// A lookup found exactly the candidate it wanted.
    ExactMatch,
    /// A lookup settled for the nearest candidate.
    NearestMatch,
    /// The reported operation failed outright.
    Failure,
}

#[derive(Debug, Clone)]
pub struct SeverityPolicy {
    // Rules pinned to a level regardless of the signal.
    pinned: HashMap<String, Level>,
    // None = never signal abort (dry-run / collect-all mode).
    abort_threshold: Option<Level>,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SeverityPolicy {
    pub fn new() -> Self {
        Self {
            pinned: HashMap::new(),
            abort_threshold: Some(Level::Error),
        }
    }

    /// Collect every diagnostic, never signal abort.
    pub fn no_abort() -> Self {
        Self {
            pinned: HashMap::new(),
            abort_threshold: None,
        }
    }

    pub fn with_abort_threshold(mut self, level: Level) -> Self {
        self.abort_threshold = Some(level);
        self
    }

    /// Pin a rule to a fixed level, overriding any runtime signal.
    pub fn pin_level(mut self, rule_id: impl Into<String>, level: Level) -> Self {
        self.pinned.insert(rule_id.into(), level);
        self
    }

    pub fn level_for(&self, rule: &RuleDescriptor, signal: SeveritySignal) -> Level {
        if let Some(&level) = self.pinned.get(&rule.id) {
            return level;
        }
        match signal {
            SeveritySignal::Fixed(level) => level,
            SeveritySignal::ExactMatch => Level::Note,
            SeveritySignal::NearestMatch => Level::Warning,
            SeveritySignal::Failure => Level::Error,
        }
    }

    /// Whether a diagnostic at `level` should stop the calling stage.
    pub fn should_abort(&self, level: Level) -> bool {
        self.abort_threshold
            .is_some_and(|threshold| level >= threshold)
    }
}
