//! Structured run log, serialized in a SARIF-like shape: one top-level run
//! object holding tool metadata and an ordered list of result records.

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Level, Location};
use crate::render::Params;

/// Run-level metadata recorded in the dump header.
///
/// `started_at` is caller-supplied so that re-runs with identical inputs
/// produce byte-identical dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    pub tool_name: String,
    pub tool_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

impl RunMetadata {
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
            started_at: None,
        }
    }

    pub fn with_started_at(mut self, timestamp: impl Into<String>) -> Self {
        self.started_at = Some(timestamp.into());
        self
    }
}

/// One emitted diagnostic, frozen into the run log.
///
/// Top-level records carry the emission sequence number; nested records do
/// not (they are ordered by their parent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    pub rule_id: String,
    pub rule_name: String,
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Record>,
}

impl Record {
    pub(super) fn from_diagnostic(sequence: Option<u64>, diagnostic: &Diagnostic) -> Self {
        Self {
            sequence,
            rule_id: diagnostic.rule().id.clone(),
            rule_name: diagnostic.rule().name.clone(),
            level: diagnostic.level(),
            message: diagnostic.message().to_string(),
            truncated: diagnostic.truncated(),
            params: diagnostic.params().clone(),
            additional_messages: diagnostic.additional_messages().to_vec(),
            location: diagnostic.location().cloned(),
            nested: diagnostic
                .children()
                .iter()
                .map(|child| Record::from_diagnostic(None, child))
                .collect(),
        }
    }
}

/// The full run: metadata, catalog fingerprint, ordered results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLog {
    #[serde(flatten)]
    pub metadata: RunMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_fingerprint: Option<String>,
    pub results: Vec<Record>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
