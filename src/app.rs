//! Application root: owns the session and wires the components together.

use std::sync::Arc;

use crate::form::{FormState, Payload, RecipientsPolicy, SynthesisOutcome};
use crate::preview::{render_summary, PreviewCapabilities, PreviewOrchestrator, PreviewOutcome, PreviewSurface};
use crate::schema::{FormSchema, SchemaError, SchemaLoader};
use crate::service::{DocumentService, WordArtifact};
use crate::session::SessionContext;

/// The assembled form application.
///
/// Built once at startup; a failed schema load is fatal and leaves the
/// application non-functional until reload.
pub struct FormApp {
    schema: Arc<FormSchema>,
    session: Arc<SessionContext>,
    form: FormState,
    orchestrator: PreviewOrchestrator,
}

impl FormApp {
    /// Assemble the application from already-fetched schema JSON.
    pub fn bootstrap(
        schema_json: &str,
        service: Arc<dyn DocumentService>,
        surface: Arc<dyn PreviewSurface>,
        capabilities: PreviewCapabilities,
        policy: RecipientsPolicy,
    ) -> Result<Self, SchemaError> {
        let schema = Arc::new(FormSchema::from_json_str(schema_json)?);
        Ok(Self::assemble(schema, service, surface, capabilities, policy))
    }

    /// Assemble the application after fetching the schema remotely.
    pub async fn bootstrap_remote(
        loader: &SchemaLoader,
        service: Arc<dyn DocumentService>,
        surface: Arc<dyn PreviewSurface>,
        capabilities: PreviewCapabilities,
        policy: RecipientsPolicy,
    ) -> Result<Self, SchemaError> {
        let schema = Arc::new(loader.load().await?);
        Ok(Self::assemble(schema, service, surface, capabilities, policy))
    }

    fn assemble(
        schema: Arc<FormSchema>,
        service: Arc<dyn DocumentService>,
        surface: Arc<dyn PreviewSurface>,
        capabilities: PreviewCapabilities,
        policy: RecipientsPolicy,
    ) -> Self {
        let session = Arc::new(SessionContext::new());
        let form = FormState::new(schema.clone(), session.clone(), policy);
        let orchestrator = PreviewOrchestrator::new(
            service,
            surface,
            session.clone(),
            schema.clone(),
            capabilities,
        );
        log::info!(
            "application initialised with {} templates",
            schema.templates.len()
        );
        Self {
            schema,
            session,
            form,
            orchestrator,
        }
    }

    /// `(key, display name)` pairs for the template selector.
    pub fn template_options(&self) -> Vec<(&str, &str)> {
        self.schema.template_options()
    }

    pub fn select_template(&self, key: &str) -> SynthesisOutcome {
        self.form.select_template(key)
    }

    pub fn edit(&self, key: &str, value: &str) -> bool {
        self.form.edit(key, value)
    }

    pub fn set_recipients(&self, value: &str) -> bool {
        self.form.set_recipients(value)
    }

    pub fn submit_enabled(&self) -> bool {
        self.form.submit_enabled()
    }

    /// Collect the current form values and run the preview pipeline.
    pub async fn preview(&self) -> PreviewOutcome {
        let payload = self.form.collect();
        self.orchestrator.preview(payload).await
    }

    /// Collect the current form values for submission.
    pub fn collect(&self) -> Payload {
        self.form.collect()
    }

    /// No-network HTML approximation of the letter from the current values.
    pub fn local_summary(&self) -> String {
        render_summary(&self.schema, &self.form.collect())
    }

    /// Suggested filename for downloading the retained Word artifact.
    pub fn download_filename(&self) -> String {
        let name = match self.session.active_template() {
            Some(key) if !key.is_empty() => self.schema.display_name(&key),
            _ => "Document".to_string(),
        };
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("{}_{}.docx", sanitize_filename::sanitize(&name), timestamp)
    }

    /// Consume the retained Word artifact for download.
    pub fn take_generated_word(&self) -> Option<WordArtifact> {
        self.session.take_generated_word()
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }
}
