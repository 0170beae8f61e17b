//! Diagnostic records.
//!
//! A `Diagnostic` is one runtime emission bound to a rule with concrete
//! parameters. It stays open for incremental context (extra messages, a
//! location, nested children) until `finalize`, after which any mutation is
//! an API-misuse error.

mod level;
mod location;

pub use level::Level;
pub use location::{Frame, Location};

use std::sync::Arc;

use crate::error::DiagnosticError;
use crate::render::{Params, Rendered};
use crate::rules::RuleDescriptor;

#[derive(Debug, Clone)]
pub struct Diagnostic {
    rule: Arc<RuleDescriptor>,
    level: Level,
    message: String,
    truncated: bool,
    params: Params,
    additional_messages: Vec<String>,
    location: Option<Location>,
    children: Vec<Diagnostic>,
    finalized: bool,
}

impl Diagnostic {
    pub(crate) fn new(
        rule: Arc<RuleDescriptor>,
        level: Level,
        rendered: Rendered,
        params: Params,
    ) -> Self {
        Self {
            rule,
            level,
            message: rendered.text,
            truncated: rendered.truncated,
            params,
            additional_messages: Vec::new(),
            location: None,
            children: Vec::new(),
            finalized: false,
        }
    }

    pub fn rule(&self) -> &RuleDescriptor {
        &self.rule
    }

    pub fn rule_id(&self) -> &str {
        &self.rule.id
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the rendered message hit the verbosity limit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn additional_messages(&self) -> &[String] {
        &self.additional_messages
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn children(&self) -> &[Diagnostic] {
        &self.children
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Append freeform supplementary context. Ordered, never deduplicated.
    pub fn add_message(&mut self, text: impl Into<String>) -> Result<(), DiagnosticError> {
        self.guard_open()?;
        self.additional_messages.push(text.into());
        Ok(())
    }

    /// Attach source-location metadata. Single-assignment; a second call is
    /// a programming error.
    pub fn set_location(&mut self, location: Location) -> Result<(), DiagnosticError> {
        self.guard_open()?;
        if self.location.is_some() {
            return Err(DiagnosticError::LocationAlreadySet {
                rule_id: self.rule.id.clone(),
            });
        }
        self.location = Some(location);
        Ok(())
    }

    /// Attach a nested child diagnostic.
    pub fn add_child(&mut self, child: Diagnostic) -> Result<(), DiagnosticError> {
        self.guard_open()?;
        self.children.push(child);
        Ok(())
    }

    /// Freeze the diagnostic (and its children) for emission. Idempotent.
    pub fn finalize(&mut self) {
        self.finalized = true;
        for child in &mut self.children {
            child.finalize();
        }
    }

    fn guard_open(&self) -> Result<(), DiagnosticError> {
        if self.finalized {
            return Err(DiagnosticError::DiagnosticFinalized {
                rule_id: self.rule.id.clone(),
            });
        }
        Ok(())
    }
}
