//! Engine entry points consumed by the export pipeline.
//!
//! A caller raises a diagnostic by rule id: the registry resolves the rule,
//! the renderer binds parameters into its template, and the result is an open
//! `Diagnostic` the caller may enrich before emission. The engine is safe to
//! share across concurrent per-node workers.

use crate::diagnostic::{Diagnostic, Level};
use crate::error::DiagnosticError;
use crate::policy::{SeverityPolicy, SeveritySignal};
use crate::render::{self, Params, RenderOptions};
use crate::rules::RuleRegistry;
use crate::sink::{DiagnosticSink, Observer, RunMetadata};

#[derive(Debug)]
pub struct DiagnosticEngine {
    registry: RuleRegistry,
    options: RenderOptions,
    policy: SeverityPolicy,
    sink: DiagnosticSink,
}

impl DiagnosticEngine {
    pub fn new(registry: RuleRegistry, metadata: RunMetadata) -> Self {
        let fingerprint = registry.fingerprint();
        Self {
            registry,
            options: RenderOptions::default(),
            policy: SeverityPolicy::new(),
            sink: DiagnosticSink::new(metadata).with_catalog_fingerprint(fingerprint),
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: SeverityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.sink.add_observer(observer);
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &SeverityPolicy {
        &self.policy
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Resolve the rule, render its message, and return an open diagnostic
    /// the caller can enrich before emitting.
    pub fn raise(
        &self,
        rule_id: &str,
        level: Level,
        params: Params,
    ) -> Result<Diagnostic, DiagnosticError> {
        let rule = self.registry.lookup(rule_id)?;
        let rendered = render::render(&rule, level, &params, self.options)?;
        Ok(Diagnostic::new(rule, level, rendered, params))
    }

    /// Finalize and append to the sink. Returns the emission sequence number.
    pub fn emit(&self, diagnostic: Diagnostic) -> u64 {
        self.sink.emit(diagnostic)
    }

    /// Raise with a policy-resolved level, emit, and report whether the
    /// calling stage should abort. The engine only signals; aborting is the
    /// caller's decision.
    pub fn raise_and_maybe_abort(
        &self,
        rule_id: &str,
        signal: SeveritySignal,
        params: Params,
    ) -> Result<bool, DiagnosticError> {
        let rule = self.registry.lookup(rule_id)?;
        let level = self.policy.level_for(&rule, signal);
        let rendered = render::render(&rule, level, &params, self.options)?;
        self.emit(Diagnostic::new(rule, level, rendered, params));
        Ok(self.policy.should_abort(level))
    }
}
