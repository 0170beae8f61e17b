//! Rule descriptors and the registry that owns them.

pub mod catalog;
mod descriptor;
mod registry;

pub use catalog::{builtin_rules, ids};
pub use descriptor::{DEFAULT_TEMPLATE_KEY, Description, RuleDescriptor};
pub use registry::RuleRegistry;

#[cfg(test)]
mod registry_test;
