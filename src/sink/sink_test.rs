use std::sync::Arc;

use crate::diagnostic::{Diagnostic, Level, Location};
use crate::render::{Params, Rendered};
use crate::rules::RuleDescriptor;

use super::{
    CollectingObserver, DiagnosticSink, Observer, ObserverError, Record, RunMetadata,
};

fn diagnostic(id: &str, level: Level, message: &str) -> Diagnostic {
    let rule = Arc::new(
        RuleDescriptor::new(id, format!("{id}-slug"), "test rule")
            .with_default_template("{message}"),
    );
    Diagnostic::new(
        rule,
        level,
        Rendered {
            text: message.to_string(),
            truncated: false,
        },
        Params::new().set("message", message),
    )
}

fn sink() -> DiagnosticSink {
    DiagnosticSink::new(RunMetadata::new("test-exporter", "0.0.0"))
}

struct FailingObserver;

impl Observer for FailingObserver {
    fn notify(&self, _record: &Record) -> Result<(), ObserverError> {
        Err(ObserverError("deliberate failure".to_string()))
    }
}

#[test]
fn emit_assigns_increasing_sequence_numbers() {
    let sink = sink();
    let first = sink.emit(diagnostic("TST0001", Level::Note, "one"));
    let second = sink.emit(diagnostic("TST0002", Level::Note, "two"));

    assert_eq!(first, 0);
    assert_eq!(second, 1);
    assert_eq!(sink.len(), 2);
}

#[test]
fn run_log_preserves_emission_order() {
    let sink = sink();
    sink.emit(diagnostic("TST0001", Level::Error, "first"));
    sink.emit(diagnostic("TST0002", Level::Note, "second"));
    sink.emit(diagnostic("TST0003", Level::Warning, "third"));

    let log = sink.run_log();
    let messages: Vec<&str> = log.results.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, ["first", "second", "third"]);
    let sequences: Vec<u64> = log.results.iter().filter_map(|r| r.sequence).collect();
    assert_eq!(sequences, [0, 1, 2]);
}

#[test]
fn emit_finalizes_the_diagnostic_record() {
    let sink = sink();
    let mut diag = diagnostic("TST0001", Level::Warning, "open");
    diag.add_message("still open").unwrap();
    sink.emit(diag);

    let record = &sink.run_log().results[0];
    assert_eq!(record.additional_messages, ["still open"]);
}

#[test]
fn counts_group_by_level() {
    let sink = sink();
    sink.emit(diagnostic("TST0001", Level::Error, "e"));
    sink.emit(diagnostic("TST0002", Level::Error, "e"));
    sink.emit(diagnostic("TST0003", Level::Warning, "w"));
    sink.emit(diagnostic("TST0004", Level::None, "n"));

    let counts = sink.counts();
    assert_eq!(counts.errors, 2);
    assert_eq!(counts.warnings, 1);
    assert_eq!(counts.notes, 0);
    assert_eq!(counts.silent, 1);
    assert_eq!(counts.total(), 4);
}

#[test]
fn collecting_observer_sees_every_record() {
    let collector = Arc::new(CollectingObserver::new());
    let mut sink = sink();
    sink.add_observer(Box::new(Arc::clone(&collector)));

    sink.emit(diagnostic("TST0001", Level::Note, "one"));
    sink.emit(diagnostic("TST0002", Level::Note, "two"));

    let seen = collector.records();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].rule_id, "TST0001");
    assert_eq!(seen[1].rule_id, "TST0002");
}

#[test]
fn failing_observer_is_isolated_from_others_and_the_caller() {
    let collector = Arc::new(CollectingObserver::new());
    let mut sink = sink();
    sink.add_observer(Box::new(FailingObserver));
    sink.add_observer(Box::new(Arc::clone(&collector)));

    let sequence = sink.emit(diagnostic("TST0001", Level::Error, "still emitted"));

    assert_eq!(sequence, 0);
    assert_eq!(sink.len(), 1);
    assert_eq!(collector.len(), 1);
    assert_eq!(sink.observer_failures(), 1);
}

#[test]
fn dump_is_deterministic_for_identical_emissions() {
    let sink = sink();
    sink.emit(diagnostic("TST0001", Level::Warning, "alpha"));
    sink.emit(diagnostic("TST0002", Level::Error, "beta"));

    let first = sink.to_json().unwrap();
    let second = sink.to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn dump_carries_run_metadata_and_locations() {
    let sink = DiagnosticSink::new(
        RunMetadata::new("test-exporter", "1.2.3").with_started_at("2026-08-27T00:00:00Z"),
    )
    .with_catalog_fingerprint("abc123");

    let mut diag = diagnostic("TST0001", Level::Note, "located");
    diag.set_location(Location::new().with_graph_node("node_3"))
        .unwrap();
    sink.emit(diag);

    let json: serde_json::Value = serde_json::from_str(&sink.to_json().unwrap()).unwrap();
    assert_eq!(json["tool_name"], "test-exporter");
    assert_eq!(json["tool_version"], "1.2.3");
    assert_eq!(json["started_at"], "2026-08-27T00:00:00Z");
    assert_eq!(json["catalog_fingerprint"], "abc123");
    assert_eq!(json["results"][0]["location"]["graph_node"], "node_3");
    assert_eq!(json["results"][0]["level"], "note");
}

#[test]
fn nested_children_appear_without_sequence_numbers() {
    let sink = sink();
    let mut parent = diagnostic("TST0001", Level::Warning, "parent");
    parent
        .add_child(diagnostic("TST0002", Level::Note, "child"))
        .unwrap();
    sink.emit(parent);

    let log = sink.run_log();
    let nested = &log.results[0].nested;
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].rule_id, "TST0002");
    assert_eq!(nested[0].sequence, None);
}

#[test]
fn tracing_observer_accepts_every_level() {
    // No subscriber installed; events are dropped, notify must still succeed.
    let observer = super::TracingObserver::new();
    for level in [Level::None, Level::Note, Level::Warning, Level::Error] {
        let record = Record::from_diagnostic(Some(0), &diagnostic("TST0001", level, "msg"));
        assert!(observer.notify(&record).is_ok());
    }
}

#[test]
fn dump_to_writes_trailing_newline() {
    let sink = sink();
    sink.emit(diagnostic("TST0001", Level::Note, "one"));

    let mut out = Vec::new();
    sink.dump_to(&mut out).unwrap();
    assert!(out.ends_with(b"\n"));
}
