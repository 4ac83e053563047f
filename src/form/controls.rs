//! Live form controls synthesised from field specs.

use crate::schema::{FieldSpec, FieldType};

/// Text shown for the prepended empty choice of select controls.
pub const SELECT_PLACEHOLDER: &str = "Choisir...";

/// Row count applied to textarea controls that do not declare one.
pub const DEFAULT_TEXTAREA_ROWS: u32 = 3;

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// Concrete rendering kind of a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Email,
    /// Placeholder choice first, then the spec's options in source order.
    Select { options: Vec<SelectOption> },
    TextArea { rows: u32 },
}

/// A single rendered input with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub key: String,
    pub label: String,
    pub kind: ControlKind,
    pub required: bool,
    pub placeholder: Option<String>,
    value: String,
}

impl Control {
    /// Build a control from its declarative spec. `Auto` specs are the
    /// caller's responsibility to filter; they fall back to a text control
    /// when template-specific schemas declare them as user-entered.
    pub fn from_spec(key: &str, spec: &FieldSpec) -> Self {
        let kind = match spec.field_type {
            FieldType::Email => ControlKind::Email,
            FieldType::Select => {
                let mut options = Vec::with_capacity(spec.options.len() + 1);
                options.push(SelectOption {
                    value: String::new(),
                    text: SELECT_PLACEHOLDER.to_string(),
                });
                options.extend(spec.options.iter().map(|opt| SelectOption {
                    value: opt.clone(),
                    text: opt.clone(),
                }));
                ControlKind::Select { options }
            }
            FieldType::TextArea => ControlKind::TextArea {
                rows: spec.rows.unwrap_or(DEFAULT_TEXTAREA_ROWS),
            },
            FieldType::Text | FieldType::Auto => ControlKind::Text,
        };

        // Only single-line inputs pre-populate from the declared default.
        let value = match spec.field_type {
            FieldType::Text | FieldType::Email => spec.default.clone().unwrap_or_default(),
            _ => String::new(),
        };

        // Typed controls fall back to the label as placeholder text; selects
        // already carry the placeholder choice.
        let placeholder = match kind {
            ControlKind::Select { .. } => spec.placeholder.clone(),
            _ => spec
                .placeholder
                .clone()
                .or_else(|| Some(spec.label.clone())),
        };

        Self {
            key: key.to_string(),
            label: spec.label.clone(),
            kind,
            required: spec.required,
            placeholder,
            value,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Empty or whitespace-only value.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// The three logical groups of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Coordinates,
    Content,
    Sender,
}

/// The rendering surface: three regions of live controls.
#[derive(Debug, Clone, Default)]
pub struct FormRegions {
    pub coordinates: Vec<Control>,
    pub content: Vec<Control>,
    pub sender: Vec<Control>,
}

impl FormRegions {
    pub fn clear(&mut self) {
        self.coordinates.clear();
        self.content.clear();
        self.sender.clear();
    }

    pub fn push(&mut self, group: FieldGroup, control: Control) {
        match group {
            FieldGroup::Coordinates => self.coordinates.push(control),
            FieldGroup::Content => self.content.push(control),
            FieldGroup::Sender => self.sender.push(control),
        }
    }

    /// All controls, coordinates first, then content, then sender.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.coordinates
            .iter()
            .chain(self.content.iter())
            .chain(self.sender.iter())
    }

    pub fn control_mut(&mut self, key: &str) -> Option<&mut Control> {
        self.coordinates
            .iter_mut()
            .chain(self.content.iter_mut())
            .chain(self.sender.iter_mut())
            .find(|control| control.key == key)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len() + self.content.len() + self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
