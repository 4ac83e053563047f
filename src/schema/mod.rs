//! Template and variable configuration, loaded once and immutable for the session.
//!
//! The schema describes which templates exist, which fields each template adds,
//! and how the shared "common" fields are split between the coordinates and
//! sender groups of the form.

mod loader;

pub use loader::SchemaLoader;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the schema document. Fatal: the application
/// stays non-functional until the schema is available.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse schema configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to fetch schema configuration: {0}")]
    Fetch(#[source] reqwest::Error),
}

/// Kind of a declared form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Select,
    #[serde(rename = "textarea")]
    TextArea,
    /// Computed server-side, never rendered as an input.
    Auto,
}

/// Declarative description of one form control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Row count for `textarea` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Pre-populated value for text/email fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One selectable document template and its additional fields.
///
/// `specific_variables` keeps declaration order; template fields render in the
/// order the schema declares them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSpec {
    pub display_name: String,
    #[serde(default)]
    pub specific_variables: IndexMap<String, FieldSpec>,
}

/// Which common-variable keys render in the coordinates group and which in the
/// sender group. Keys in neither list (and not template-specific) never render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldOrder {
    #[serde(default)]
    pub coordinates: Vec<String>,
    #[serde(default)]
    pub sender: Vec<String>,
}

/// The full configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(default)]
    pub common_variables: IndexMap<String, FieldSpec>,
    #[serde(default)]
    pub templates: IndexMap<String, TemplateSpec>,
    #[serde(default)]
    pub field_order: FieldOrder,
}

impl FormSchema {
    /// Parse a schema from its JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse a schema from any reader.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, SchemaError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn template(&self, key: &str) -> Option<&TemplateSpec> {
        self.templates.get(key)
    }

    pub fn common(&self, key: &str) -> Option<&FieldSpec> {
        self.common_variables.get(key)
    }

    /// `(key, display name)` pairs for the template selector, declaration order.
    pub fn template_options(&self) -> Vec<(&str, &str)> {
        self.templates
            .iter()
            .map(|(key, template)| (key.as_str(), template.display_name.as_str()))
            .collect()
    }

    /// Human-readable name of a template, falling back to the raw key when the
    /// template is unknown. Total: never fails.
    pub fn display_name(&self, key: &str) -> String {
        match self.templates.get(key) {
            Some(template) => template.display_name.clone(),
            None => key.to_string(),
        }
    }

    /// Resolve the display label for a field key: common variables first, then
    /// the given template's specific variables, then the key verbatim.
    pub fn resolve_label(&self, template_key: &str, field_key: &str) -> String {
        if let Some(spec) = self.common_variables.get(field_key) {
            return spec.label.clone();
        }
        if let Some(template) = self.templates.get(template_key) {
            if let Some(spec) = template.specific_variables.get(field_key) {
                return spec.label.clone();
            }
        }
        field_key.to_string()
    }
}
