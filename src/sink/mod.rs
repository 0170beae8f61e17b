//! Emission sink.
//!
//! Appends finalized diagnostics to an ordered run log and fans each record
//! out to registered observers. The append path is exclusive so the sequence
//! number and the append happen atomically; dump order is sequence-number
//! order, deterministic under concurrent emitters.

mod sarif;

pub use sarif::{Record, RunLog, RunMetadata};

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::diagnostic::{Diagnostic, Level};

/// Error surfaced by a failing observer. Isolated from the emit path: one
/// observer failing never blocks other observers or the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverError(pub String);

impl fmt::Display for ObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer failed: {}", self.0)
    }
}

impl std::error::Error for ObserverError {}

/// Receives every emitted diagnostic record.
pub trait Observer: Send + Sync {
    fn notify(&self, record: &Record) -> Result<(), ObserverError>;
}

impl<T: Observer> Observer for Arc<T> {
    fn notify(&self, record: &Record) -> Result<(), ObserverError> {
        (**self).notify(record)
    }
}

/// Per-level totals for the records emitted so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticCounts {
    pub errors: usize,
    pub warnings: usize,
    pub notes: usize,
    pub silent: usize,
}

impl DiagnosticCounts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.notes + self.silent
    }
}

#[derive(Debug, Default)]
struct SinkState {
    records: Vec<Record>,
    next_sequence: u64,
    observer_failures: u64,
}

pub struct DiagnosticSink {
    metadata: RunMetadata,
    catalog_fingerprint: Option<String>,
    observers: Vec<Box<dyn Observer>>,
    state: Mutex<SinkState>,
}

impl DiagnosticSink {
    pub fn new(metadata: RunMetadata) -> Self {
        Self {
            metadata,
            catalog_fingerprint: None,
            observers: Vec::new(),
            state: Mutex::new(SinkState::default()),
        }
    }

    pub fn with_catalog_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.catalog_fingerprint = Some(fingerprint.into());
        self
    }

    /// Register an observer. Observers are fixed before emission begins.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Finalize and append a diagnostic, assign its sequence number, and fan
    /// the record out to every observer. Returns the sequence number.
    pub fn emit(&self, mut diagnostic: Diagnostic) -> u64 {
        diagnostic.finalize();

        let mut state = self.state.lock().expect("sink lock poisoned");
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        let record = Record::from_diagnostic(Some(sequence), &diagnostic);
        for observer in &self.observers {
            if let Err(error) = observer.notify(&record) {
                state.observer_failures += 1;
                tracing::warn!(rule = %record.rule_id, %error, "diagnostic observer failed");
            }
        }
        state.records.push(record);
        sequence
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("sink lock poisoned").records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of observer notifications that failed so far.
    pub fn observer_failures(&self) -> u64 {
        self.state
            .lock()
            .expect("sink lock poisoned")
            .observer_failures
    }

    pub fn counts(&self) -> DiagnosticCounts {
        let state = self.state.lock().expect("sink lock poisoned");
        let mut counts = DiagnosticCounts::default();
        for record in &state.records {
            match record.level {
                Level::Error => counts.errors += 1,
                Level::Warning => counts.warnings += 1,
                Level::Note => counts.notes += 1,
                Level::None => counts.silent += 1,
            }
        }
        counts
    }

    /// Snapshot the run in emission (sequence) order.
    pub fn run_log(&self) -> RunLog {
        let state = self.state.lock().expect("sink lock poisoned");
        let mut results = state.records.clone();
        // Appends happen under the same lock that assigns sequence numbers,
        // so this is already sorted; keep the invariant explicit anyway.
        results.sort_by_key(|record| record.sequence);
        RunLog {
            metadata: self.metadata.clone(),
            catalog_fingerprint: self.catalog_fingerprint.clone(),
            results,
        }
    }

    /// Serialize the run log as pretty JSON. Deterministic for identical
    /// emission sequences.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.run_log())
    }

    /// Write the serialized run log. The only blocking I/O in the engine.
    pub fn dump_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticSink")
            .field("metadata", &self.metadata)
            .field("observers", &self.observers.len())
            .field("records", &self.len())
            .finish()
    }
}

/// In-memory observer for assertions in tests and dry runs.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    records: Mutex<Vec<Record>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().expect("collector lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("collector lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Observer for CollectingObserver {
    fn notify(&self, record: &Record) -> Result<(), ObserverError> {
        self.records
            .lock()
            .expect("collector lock poisoned")
            .push(record.clone());
        Ok(())
    }
}

/// Forwards each record as a tracing event at its mapped level. No
/// subscriber is installed here; the host application picks one.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for TracingObserver {
    fn notify(&self, record: &Record) -> Result<(), ObserverError> {
        match record.level {
            Level::Error => {
                tracing::error!(rule = %record.rule_id, "{}", record.message);
            }
            Level::Warning => {
                tracing::warn!(rule = %record.rule_id, "{}", record.message);
            }
            Level::Note => {
                tracing::info!(rule = %record.rule_id, "{}", record.message);
            }
            Level::None => {
                tracing::debug!(rule = %record.rule_id, "{}", record.message);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod sink_test;
