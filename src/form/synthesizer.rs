//! Rebuilds the live control regions when the template selection changes.

use std::sync::Arc;

use crate::schema::{FieldType, FormSchema};
use crate::session::SessionContext;

use super::controls::{Control, FieldGroup, FormRegions};

/// What a synthesis call did to the regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// Regions were rebuilt for the given template.
    Rebuilt,
    /// Empty selection: regions cleared, submission disabled.
    Cleared,
    /// Template not in the schema: regions untouched (silent skip).
    UnknownTemplate,
}

/// Builds the three control regions from the schema for a template selection.
pub struct FormSynthesizer {
    schema: Arc<FormSchema>,
    session: Arc<SessionContext>,
}

impl FormSynthesizer {
    pub fn new(schema: Arc<FormSchema>, session: Arc<SessionContext>) -> Self {
        Self { schema, session }
    }

    /// Replace the contents of the three regions for `template_key`.
    ///
    /// Idempotent: synthesising the same key twice leaves the same control
    /// set, never an accumulation. Returning is the completion signal;
    /// callers recompute validity immediately after.
    pub fn synthesize(&self, regions: &mut FormRegions, template_key: &str) -> SynthesisOutcome {
        if template_key.is_empty() {
            regions.clear();
            self.session.clear_template_selection();
            log::debug!("template deselected, form regions cleared");
            return SynthesisOutcome::Cleared;
        }

        let Some(template) = self.schema.template(template_key) else {
            // Selection events are not guaranteed to be in sync with the
            // schema; a stale key must not crash or clobber the form.
            log::warn!("synthesis skipped: unknown template '{template_key}'");
            return SynthesisOutcome::UnknownTemplate;
        };

        regions.clear();

        for key in &self.schema.field_order.coordinates {
            if let Some(control) = self.common_control(key) {
                regions.push(FieldGroup::Coordinates, control);
            }
        }

        // Template-specific fields are always user-entered: no Auto filter.
        for (key, spec) in &template.specific_variables {
            regions.push(FieldGroup::Content, Control::from_spec(key, spec));
        }

        for key in &self.schema.field_order.sender {
            if let Some(control) = self.common_control(key) {
                regions.push(FieldGroup::Sender, control);
            }
        }

        self.session.set_active_template(template_key);
        log::info!(
            "synthesised {} controls for template '{template_key}'",
            regions.len()
        );
        SynthesisOutcome::Rebuilt
    }

    /// Common-variable control for `key`; missing keys and `Auto` fields
    /// synthesise nothing.
    fn common_control(&self, key: &str) -> Option<Control> {
        let spec = self.schema.common(key)?;
        if spec.field_type == FieldType::Auto {
            return None;
        }
        Some(Control::from_spec(key, spec))
    }
}
