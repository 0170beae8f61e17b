use beacon::{
    DiagnosticEngine, Level, Params, RuleDescriptor, RuleRegistry, RunMetadata,
};

fn demo_registry() -> RuleRegistry {
    RuleRegistry::from_rules([
        RuleDescriptor::new("DEMO0001", "demo-warning", "Demo warning rule.")
            .with_default_template("Operator {op_name} fell back to a reference kernel."),
        RuleDescriptor::new("DEMO0002", "demo-note", "Demo note rule.")
            .with_default_template("Visited {count} nodes."),
    ])
    .unwrap()
}

#[test]
fn run_log_snapshot() {
    let engine = DiagnosticEngine::new(
        demo_registry(),
        RunMetadata::new("beacon-tests", "0.1.0").with_started_at("2026-08-27T00:00:00Z"),
    );

    let mut diag = engine
        .raise(
            "DEMO0001",
            Level::Warning,
            Params::new().set("op_name", "aten::relu"),
        )
        .unwrap();
    diag.add_message("fallback kernel used").unwrap();
    engine.emit(diag);

    let diag = engine
        .raise("DEMO0002", Level::Note, Params::new().set("count", 3))
        .unwrap();
    engine.emit(diag);

    let json = engine.sink().to_json().unwrap();
    insta::with_settings!({
        snapshot_path => "snapshots",
        prepend_module_to_snapshot => false,
        omit_expression => true,
    }, {
        insta::assert_snapshot!("run_log", json);
    });
}
