//! Collection of control values into the flat submission payload.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::FormSchema;
use crate::session::SessionContext;

use super::controls::FormRegions;

/// Flat key/value submission payload.
///
/// The wire shape is one flat string map: the fixed keys `templateType`,
/// `emailEnvoi` (recipients), `templateName`, optional `customEmailMessage`,
/// then one entry per rendered control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub template_type: String,
    #[serde(rename = "emailEnvoi")]
    pub recipients: String,
    pub template_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_email_message: Option<String>,
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl Payload {
    /// Field value by key, fixed keys excluded.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Reads current control values into a `Payload` on demand.
///
/// No validation happens here; collection reflects whatever exists now and
/// must be safe to call with required fields still empty.
pub struct PayloadCollector {
    schema: Arc<FormSchema>,
    session: Arc<SessionContext>,
}

impl PayloadCollector {
    pub fn new(schema: Arc<FormSchema>, session: Arc<SessionContext>) -> Self {
        Self { schema, session }
    }

    pub fn collect(&self, regions: &FormRegions) -> Payload {
        let template_type = self.session.active_template().unwrap_or_default();
        let template_name = self.schema.display_name(&template_type);

        let mut fields = IndexMap::with_capacity(regions.len());
        for control in regions.controls() {
            fields.insert(control.key.clone(), control.value().to_string());
        }

        Payload {
            template_type,
            recipients: self.session.recipients(),
            template_name,
            custom_email_message: self.session.custom_email_message(),
            fields,
        }
    }
}
