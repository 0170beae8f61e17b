pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod policy;
pub mod render;
pub mod rules;
pub mod sink;

pub use diagnostic::{Diagnostic, Frame, Level, Location};
pub use engine::DiagnosticEngine;
pub use error::DiagnosticError;
pub use policy::{SeverityPolicy, SeveritySignal};
pub use render::{ParamValue, Params, RenderOptions, Rendered};
pub use rules::{RuleDescriptor, RuleRegistry, builtin_rules};
pub use sink::{CollectingObserver, Observer, Record, RunMetadata, TracingObserver};
