use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::diagnostic::Level;

/// Template key every rule must provide; used when no level-specific
/// template exists.
pub const DEFAULT_TEMPLATE_KEY: &str = "default";

/// Plain and markdown variants of a rule description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Static metadata describing one diagnostic category.
///
/// Descriptors are immutable once registered. The registry hands out shared
/// handles; in-flight diagnostics keep the descriptor alive through them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// Stable identifier, scheme `PREFIX####` (e.g. "POE0003").
    pub id: String,
    /// Human-readable slug, unique per registry.
    pub name: String,
    pub short_description: String,
    pub full_description: Description,
    /// Message templates keyed by level tag. Templates use `{named}`
    /// placeholders; `{{` and `}}` are literal braces.
    pub message_templates: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_uri: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl RuleDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_description: impl Into<String>,
    ) -> Self {
        let short_description = short_description.into();
        Self {
            id: id.into(),
            name: name.into(),
            full_description: Description {
                text: short_description.clone(),
                markdown: None,
            },
            short_description,
            message_templates: BTreeMap::new(),
            help_uri: None,
            deprecated: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_full_description(mut self, text: impl Into<String>) -> Self {
        self.full_description.text = text.into();
        self
    }

    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.full_description.markdown = Some(markdown.into());
        self
    }

    /// Set the fallback template used when no level-specific one exists.
    pub fn with_default_template(self, template: impl Into<String>) -> Self {
        self.with_template(DEFAULT_TEMPLATE_KEY, template)
    }

    pub fn with_template(mut self, level_tag: impl Into<String>, template: impl Into<String>) -> Self {
        self.message_templates.insert(level_tag.into(), template.into());
        self
    }

    pub fn with_help_uri(mut self, uri: impl Into<String>) -> Self {
        self.help_uri = Some(uri.into());
        self
    }

    pub fn with_deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Template for `level`, falling back to `default`.
    pub fn template_for(&self, level: Level) -> Option<&str> {
        self.message_templates
            .get(level.tag())
            .or_else(|| self.message_templates.get(DEFAULT_TEMPLATE_KEY))
            .map(String::as_str)
    }

    pub fn has_default_template(&self) -> bool {
        self.message_templates.contains_key(DEFAULT_TEMPLATE_KEY)
    }
}
