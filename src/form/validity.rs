//! Derived "submit enabled" signal, recomputed from the live controls.

use std::sync::Arc;

use crate::helpers::{is_valid_email, split_recipients};
use crate::session::SessionContext;

use super::controls::FormRegions;

/// Whether the hidden recipients value takes part in the required check.
///
/// Observed variants of this form disagree; the policy is explicit here.
/// `Exempt` is the default: recipients may be supplied later through the
/// separate sharing step. `Required` demands at least one entry and every
/// entry syntactically valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipientsPolicy {
    #[default]
    Exempt,
    Required,
}

/// Recomputes the single submit/preview-enabled boolean.
pub struct ValidityTracker {
    session: Arc<SessionContext>,
    policy: RecipientsPolicy,
}

impl ValidityTracker {
    pub fn new(session: Arc<SessionContext>, policy: RecipientsPolicy) -> Self {
        Self { session, policy }
    }

    /// Pure function of the current control state and selection; stores the
    /// result in the session and returns it. Never mutates field values.
    pub fn recompute(&self, regions: &FormRegions) -> bool {
        let enabled = self.compute(regions);
        self.session.set_submit_enabled(enabled);
        enabled
    }

    fn compute(&self, regions: &FormRegions) -> bool {
        match self.session.active_template() {
            Some(key) if !key.is_empty() => {}
            _ => return false,
        }

        if regions
            .controls()
            .any(|control| control.required && control.is_blank())
        {
            return false;
        }

        if self.policy == RecipientsPolicy::Required {
            let recipients = split_recipients(&self.session.recipients());
            if recipients.is_empty() || !recipients.iter().all(|entry| is_valid_email(entry)) {
                return false;
            }
        }

        true
    }
}
