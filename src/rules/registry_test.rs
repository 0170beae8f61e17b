use std::sync::Arc;

use crate::diagnostic::Level;
use crate::error::DiagnosticError;

use super::catalog::{builtin_rules, ids};
use super::descriptor::RuleDescriptor;
use super::registry::RuleRegistry;

fn rule(id: &str, name: &str) -> RuleDescriptor {
    RuleDescriptor::new(id, name, "a test rule").with_default_template("message about {subject}")
}

#[test]
fn lookup_returns_registered_descriptor() {
    let mut registry = RuleRegistry::new();
    registry.register(rule("TST0001", "first-rule")).unwrap();

    let found = registry.lookup("TST0001").unwrap();
    assert_eq!(found.id, "TST0001");
    assert_eq!(found.name, "first-rule");
}

#[test]
fn lookup_shares_the_descriptor_rather_than_copying() {
    let mut registry = RuleRegistry::new();
    registry.register(rule("TST0001", "first-rule")).unwrap();

    let a = registry.lookup("TST0001").unwrap();
    let b = registry.lookup("TST0001").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn duplicate_id_is_rejected() {
    let mut registry = RuleRegistry::new();
    registry.register(rule("TST0001", "first-rule")).unwrap();

    let err = registry.register(rule("TST0001", "other-name")).unwrap_err();
    assert_eq!(
        err,
        DiagnosticError::DuplicateRuleId {
            id: "TST0001".to_string()
        }
    );
}

#[test]
fn duplicate_name_is_rejected() {
    let mut registry = RuleRegistry::new();
    registry.register(rule("TST0001", "first-rule")).unwrap();

    let err = registry.register(rule("TST0002", "first-rule")).unwrap_err();
    assert_eq!(
        err,
        DiagnosticError::DuplicateRuleName {
            name: "first-rule".to_string()
        }
    );
}

#[test]
fn rejected_registration_leaves_both_indexes_untouched() {
    let mut registry = RuleRegistry::new();
    registry.register(rule("TST0001", "first-rule")).unwrap();
    // Fails on id, but the name is new; it must not leak into the name index.
    registry
        .register(rule("TST0001", "second-rule"))
        .unwrap_err();

    assert_eq!(registry.len(), 1);
    assert!(registry.lookup_by_name("second-rule").is_none());
    registry.register(rule("TST0003", "second-rule")).unwrap();
}

#[test]
fn unknown_id_fails_lookup() {
    let registry = RuleRegistry::new();
    let err = registry.lookup("POE9999").unwrap_err();
    assert_eq!(
        err,
        DiagnosticError::UnknownRule {
            id: "POE9999".to_string()
        }
    );
}

#[test]
fn descriptor_without_default_template_is_rejected() {
    let mut registry = RuleRegistry::new();
    let bare = RuleDescriptor::new("TST0001", "no-template", "rule without templates");

    let err = registry.register(bare).unwrap_err();
    assert!(matches!(err, DiagnosticError::MissingTemplate { .. }));
}

#[test]
fn rules_iterates_in_registration_order_and_restarts() {
    let mut registry = RuleRegistry::new();
    registry.register(rule("TST0002", "second")).unwrap();
    registry.register(rule("TST0001", "first")).unwrap();
    registry.register(rule("TST0003", "third")).unwrap();

    let ids: Vec<&str> = registry.rules().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["TST0002", "TST0001", "TST0003"]);

    // Restartable: a fresh iterator sees the same sequence.
    let again: Vec<&str> = registry.rules().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, again);
}

#[test]
fn fingerprint_is_stable_and_order_sensitive() {
    let forward = RuleRegistry::from_rules([rule("TST0001", "first"), rule("TST0002", "second")])
        .unwrap();
    let forward_again =
        RuleRegistry::from_rules([rule("TST0001", "first"), rule("TST0002", "second")]).unwrap();
    let reversed =
        RuleRegistry::from_rules([rule("TST0002", "second"), rule("TST0001", "first")]).unwrap();

    assert_eq!(forward.fingerprint(), forward_again.fingerprint());
    assert_ne!(forward.fingerprint(), reversed.fingerprint());
    assert_eq!(forward.fingerprint().len(), 64);
}

#[test]
fn builtin_catalog_registers_cleanly() {
    let registry = RuleRegistry::from_rules(builtin_rules()).unwrap();
    assert_eq!(registry.len(), builtin_rules().len());

    let poe3 = registry
        .lookup(ids::MISSING_STANDARD_SYMBOLIC_FUNCTION)
        .unwrap();
    assert_eq!(poe3.name, "missing-standard-symbolic-function");
    assert!(poe3.has_default_template());
}

#[test]
fn descriptors_serialize_for_catalog_docs() {
    let descriptor = RuleDescriptor::new("TST0001", "doc-rule", "Short text.")
        .with_full_description("Long text.")
        .with_markdown("**Long** text.")
        .with_default_template("msg {x}")
        .with_help_uri("https://example.invalid/rules/TST0001")
        .with_tag("docs");

    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["id"], "TST0001");
    assert_eq!(json["name"], "doc-rule");
    assert_eq!(json["full_description"]["markdown"], "**Long** text.");
    assert_eq!(json["message_templates"]["default"], "msg {x}");
    assert_eq!(json["deprecated"], false);
    assert_eq!(json["tags"][0], "docs");
}

#[test]
fn builtin_placeholder_entries_are_ordinary_rules() {
    let registry = RuleRegistry::from_rules(builtin_rules()).unwrap();
    let todo = registry.lookup(ids::FX_FRONTEND_AOTAUTOGRAD).unwrap();
    assert!(todo.template_for(Level::Warning).is_some());
}
