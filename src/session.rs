//! Mutable per-page session context, shared by reference across components.
//!
//! Constructed once by the application root and threaded into each component,
//! rather than living as an ambient global; tests get a fresh context each.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::service::WordArtifact;

/// Session-lifetime state: the active template selection, the hidden
/// recipients value, and the last generated Word artifact.
#[derive(Debug, Default)]
pub struct SessionContext {
    active_template: RwLock<Option<String>>,
    recipients: RwLock<String>,
    custom_email_message: RwLock<Option<String>>,
    generated_word: Mutex<Option<WordArtifact>>,
    submit_enabled: AtomicBool,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_template(&self) -> Option<String> {
        self.active_template.read().clone()
    }

    pub fn set_active_template(&self, key: &str) {
        *self.active_template.write() = Some(key.to_string());
    }

    pub fn clear_template_selection(&self) {
        *self.active_template.write() = None;
        self.submit_enabled.store(false, Ordering::SeqCst);
    }

    /// The hidden recipients value, supplied through the separate sharing step.
    pub fn recipients(&self) -> String {
        self.recipients.read().clone()
    }

    pub fn set_recipients(&self, value: &str) {
        *self.recipients.write() = value.to_string();
    }

    pub fn custom_email_message(&self) -> Option<String> {
        self.custom_email_message.read().clone()
    }

    pub fn set_custom_email_message(&self, message: Option<String>) {
        *self.custom_email_message.write() = message;
    }

    /// Retain a generated Word artifact for a later download; overwrites any
    /// previously retained artifact.
    pub fn store_generated_word(&self, artifact: WordArtifact) {
        *self.generated_word.lock() = Some(artifact);
    }

    pub fn generated_word(&self) -> Option<WordArtifact> {
        self.generated_word.lock().clone()
    }

    /// Consume the retained Word artifact for download.
    pub fn take_generated_word(&self) -> Option<WordArtifact> {
        self.generated_word.lock().take()
    }

    /// Derived "submit enabled" signal. Callers that can reach the live
    /// controls should recompute instead of trusting this cached value.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.load(Ordering::SeqCst)
    }

    pub(crate) fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.store(enabled, Ordering::SeqCst);
    }
}
