//! The dynamic form: control synthesis, validity tracking, payload collection.

pub mod controls;
pub mod payload;
pub mod synthesizer;
pub mod validity;

pub use controls::{
    Control, ControlKind, FieldGroup, FormRegions, SelectOption, DEFAULT_TEXTAREA_ROWS,
    SELECT_PLACEHOLDER,
};
pub use payload::{Payload, PayloadCollector};
pub use synthesizer::{FormSynthesizer, SynthesisOutcome};
pub use validity::{RecipientsPolicy, ValidityTracker};

use std::sync::Arc;

use parking_lot::RwLock;

use crate::schema::FormSchema;
use crate::session::SessionContext;

/// Facade over the live form: owns the control regions and wires the
/// synthesizer, validity tracker, and payload collector together.
pub struct FormState {
    regions: RwLock<FormRegions>,
    synthesizer: FormSynthesizer,
    validity: ValidityTracker,
    collector: PayloadCollector,
    session: Arc<SessionContext>,
}

impl FormState {
    pub fn new(
        schema: Arc<FormSchema>,
        session: Arc<SessionContext>,
        policy: RecipientsPolicy,
    ) -> Self {
        Self {
            regions: RwLock::new(FormRegions::default()),
            synthesizer: FormSynthesizer::new(schema.clone(), session.clone()),
            validity: ValidityTracker::new(session.clone(), policy),
            collector: PayloadCollector::new(schema, session.clone()),
            session,
        }
    }

    /// Select a template (or clear with an empty key): resynthesise the
    /// regions and recompute validity once the controls exist.
    pub fn select_template(&self, template_key: &str) -> SynthesisOutcome {
        let outcome = {
            let mut regions = self.regions.write();
            self.synthesizer.synthesize(&mut regions, template_key)
        };
        self.validity.recompute(&self.regions.read());
        outcome
    }

    /// Apply an edit to one control and recompute validity. Edits against
    /// keys that are not rendered are ignored. Returns the new submit signal.
    pub fn edit(&self, key: &str, value: &str) -> bool {
        {
            let mut regions = self.regions.write();
            match regions.control_mut(key) {
                Some(control) => control.set_value(value),
                None => log::debug!("edit ignored: no rendered control for '{key}'"),
            }
        }
        self.validity.recompute(&self.regions.read())
    }

    /// Update the hidden recipients value and recompute validity.
    pub fn set_recipients(&self, value: &str) -> bool {
        self.session.set_recipients(value);
        self.validity.recompute(&self.regions.read())
    }

    /// Recomputed (never stale-cached) submit/preview-enabled signal.
    pub fn submit_enabled(&self) -> bool {
        self.validity.recompute(&self.regions.read())
    }

    /// Collect whatever exists now into a submission payload.
    pub fn collect(&self) -> Payload {
        self.collector.collect(&self.regions.read())
    }

    /// Read access to the rendered controls for the embedding shell.
    pub fn with_regions<R>(&self, read: impl FnOnce(&FormRegions) -> R) -> R {
        read(&self.regions.read())
    }
}
