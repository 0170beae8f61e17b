use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::diagnostic::Level;
use crate::error::DiagnosticError;

use super::descriptor::RuleDescriptor;

/// Registry of rule descriptors, built once at startup and read-only after.
///
/// Uniqueness is enforced on two independent indexes (id and name), populated
/// atomically per registration: a duplicate on either index leaves both
/// untouched. Lookups hand out shared `Arc` handles, so concurrent readers
/// never need a lock.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    // Registration order, preserved for `rules()` and `fingerprint()`.
    rules: Vec<Arc<RuleDescriptor>>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an ordered sequence of loader-supplied records.
    pub fn from_rules(
        rules: impl IntoIterator<Item = RuleDescriptor>,
    ) -> Result<Self, DiagnosticError> {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    /// Register a descriptor. Fails on a duplicate id or name, or when the
    /// descriptor is missing the required `default` message template.
    pub fn register(&mut self, descriptor: RuleDescriptor) -> Result<(), DiagnosticError> {
        if !descriptor.has_default_template() {
            return Err(DiagnosticError::MissingTemplate {
                rule_id: descriptor.id,
                level: Level::None,
            });
        }
        if self.by_id.contains_key(&descriptor.id) {
            return Err(DiagnosticError::DuplicateRuleId { id: descriptor.id });
        }
        if self.by_name.contains_key(&descriptor.name) {
            return Err(DiagnosticError::DuplicateRuleName {
                name: descriptor.name,
            });
        }

        let index = self.rules.len();
        self.by_id.insert(descriptor.id.clone(), index);
        self.by_name.insert(descriptor.name.clone(), index);
        self.rules.push(Arc::new(descriptor));
        Ok(())
    }

    /// Resolve a rule by id. An unknown id is a programming error in the
    /// calling code; ids are compile-time constants there.
    pub fn lookup(&self, id: &str) -> Result<Arc<RuleDescriptor>, DiagnosticError> {
        self.by_id
            .get(id)
            .map(|&index| Arc::clone(&self.rules[index]))
            .ok_or_else(|| DiagnosticError::UnknownRule { id: id.to_string() })
    }

    /// Resolve a rule by its human-readable slug.
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<RuleDescriptor>> {
        self.by_name
            .get(name)
            .map(|&index| Arc::clone(&self.rules[index]))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Descriptors in registration order. Restartable; used for catalog
    /// documentation, not hot-path lookup.
    pub fn rules(&self) -> impl Iterator<Item = &Arc<RuleDescriptor>> {
        self.rules.iter()
    }

    /// Hex SHA-256 digest over `(id, name)` pairs in registration order, so a
    /// dumped run names the exact catalog that produced it.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for rule in &self.rules {
            hasher.update(rule.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(rule.name.as_bytes());
            hasher.update([0u8]);
        }
        let digest = hasher.finalize();
        digest.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}
