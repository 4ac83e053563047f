//! Schema-driven letter form engine with a fallback-chained document preview.
//!
//! The crate is split into the components of the pipeline:
//! - `schema` - immutable template/variable configuration loaded once at startup
//! - `session` - mutable per-page session context threaded into every component
//! - `form` - control synthesis, validity tracking, and payload collection
//! - `service` - contract with the external document-generation service
//! - `preview` - fallback-chained preview orchestration and render models
//! - `app` - application root wiring everything together

pub mod app;
pub mod form;
pub mod helpers;
pub mod preview;
pub mod schema;
pub mod service;
pub mod session;

pub use app::FormApp;
pub use form::{FormState, Payload, RecipientsPolicy};
pub use preview::{PreviewCapabilities, PreviewOrchestrator, PreviewOutcome};
pub use schema::{FormSchema, SchemaError};
pub use service::{DocumentService, ServiceError};
pub use session::SessionContext;

/// Initialise env_logger once for the embedding application.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
