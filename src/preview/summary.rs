//! Local HTML approximation of the letter, built straight from the payload.
//!
//! Used as a lightweight, no-network preview: a date line, the template
//! display name, and three sections mirroring the form groups. Field labels
//! resolve through the schema; unknown keys show verbatim.

use crate::form::Payload;
use crate::helpers::{escape_html, split_recipients, today_french};
use crate::schema::FormSchema;

/// Fixed payload keys that never belong to the content section.
const FIXED_KEYS: &[&str] = &[
    "templateType",
    "templateName",
    "customEmailMessage",
    "emailEnvoi",
];

/// Render the three-section summary HTML for the collected payload.
pub fn render_summary(schema: &FormSchema, payload: &Payload) -> String {
    let template_key = payload.template_type.as_str();
    let title = escape_html(&schema.display_name(template_key));
    let date = today_french();

    let coordinates = section_lines(schema, payload, &schema.field_order.coordinates);
    let content = content_lines(schema, payload);
    let sender = section_lines(schema, payload, &schema.field_order.sender);
    let recipients = recipients_lines(&payload.recipients);

    format!(
        r#"<div class="letter-summary">
  <div class="letter-summary-header">
    <div>Paris, le <strong>{date}</strong></div>
    <div class="letter-summary-title">{title}</div>
  </div>
  <section class="letter-summary-coordinates">
    <h3>Coordonnées</h3>
{coordinates}  </section>
  <section class="letter-summary-content">
    <h3>Contenu de la demande</h3>
{content}  </section>
  <section class="letter-summary-sender">
    <h3>Signataire</h3>
{sender}    <h4>Destinataires email</h4>
{recipients}  </section>
</div>"#
    )
}

/// Lines for a field-order driven section; empty values are skipped.
fn section_lines(schema: &FormSchema, payload: &Payload, keys: &[String]) -> String {
    let mut lines = String::new();
    for key in keys {
        let Some(value) = payload.field(key) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        push_line(&mut lines, &schema.resolve_label(&payload.template_type, key), value);
    }
    if lines.is_empty() {
        lines.push_str("    <div class=\"empty\">Aucune donnée</div>\n");
    }
    lines
}

/// Content section: every non-empty field that is neither a fixed key nor
/// part of the coordinates/sender groups.
fn content_lines(schema: &FormSchema, payload: &Payload) -> String {
    let mut lines = String::new();
    for (key, value) in &payload.fields {
        if value.trim().is_empty() {
            continue;
        }
        if FIXED_KEYS.contains(&key.as_str())
            || schema.field_order.coordinates.contains(key)
            || schema.field_order.sender.contains(key)
        {
            continue;
        }
        push_line(&mut lines, &schema.resolve_label(&payload.template_type, key), value);
    }
    if lines.is_empty() {
        lines.push_str("    <div class=\"empty\">Aucune donnée spécifique</div>\n");
    }
    lines
}

fn recipients_lines(raw: &str) -> String {
    let recipients = split_recipients(raw);
    if recipients.is_empty() {
        return "    <div class=\"empty\">Aucun destinataire</div>\n".to_string();
    }
    let mut lines = String::new();
    for email in recipients {
        lines.push_str(&format!(
            "    <div class=\"recipient\">{}</div>\n",
            escape_html(&email)
        ));
    }
    lines
}

fn push_line(lines: &mut String, label: &str, value: &str) {
    lines.push_str(&format!(
        "    <div><span>{}:</span> <strong>{}</strong></div>\n",
        escape_html(label),
        escape_html(value)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn schema() -> FormSchema {
        let json = r#"{
            "commonVariables": {
                "entreprise": { "label": "Entreprise", "type": "text" },
                "signatureExp": { "label": "Signature de l'expéditeur", "type": "text" }
            },
            "templates": {
                "attestation": {
                    "displayName": "Attestation de travail",
                    "specificVariables": {
                        "motif": { "label": "Motif de la demande", "type": "textarea" }
                    }
                }
            },
            "fieldOrder": { "coordinates": ["entreprise"], "sender": ["signatureExp"] }
        }"#;
        FormSchema::from_json_str(json).unwrap()
    }

    fn payload() -> Payload {
        let mut fields = IndexMap::new();
        fields.insert("entreprise".to_string(), "FO Métaux".to_string());
        fields.insert("motif".to_string(), "Départ <en> retraite".to_string());
        fields.insert("signatureExp".to_string(), "Le secrétariat".to_string());
        fields.insert("vide".to_string(), String::new());
        Payload {
            template_type: "attestation".to_string(),
            recipients: "a@b.fr, c@d.fr".to_string(),
            template_name: "Attestation de travail".to_string(),
            custom_email_message: None,
            fields,
        }
    }

    #[test]
    fn test_summary_sections_and_labels() {
        let html = render_summary(&schema(), &payload());
        assert!(html.contains("Attestation de travail"));
        assert!(html.contains("Entreprise:"));
        assert!(html.contains("Motif de la demande:"));
        assert!(html.contains("Signature de l&#39;expéditeur:"));
        assert!(html.contains("a@b.fr"));
        assert!(html.contains("c@d.fr"));
    }

    #[test]
    fn test_values_are_html_escaped() {
        let html = render_summary(&schema(), &payload());
        assert!(html.contains("Départ &lt;en&gt; retraite"));
        assert!(!html.contains("<en>"));
    }

    #[test]
    fn test_group_fields_stay_out_of_content_section() {
        let html = render_summary(&schema(), &payload());
        let content_start = html.find("Contenu de la demande").unwrap();
        let content_end = html.find("Signataire").unwrap();
        let content = &html[content_start..content_end];
        assert!(content.contains("Motif de la demande"));
        assert!(!content.contains("Entreprise"));
        assert!(!content.contains("Signature"));
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let html = render_summary(&schema(), &payload());
        assert!(!html.contains("vide"));
    }

    #[test]
    fn test_empty_payload_shows_placeholders() {
        let empty = Payload {
            template_type: String::new(),
            recipients: String::new(),
            template_name: String::new(),
            custom_email_message: None,
            fields: IndexMap::new(),
        };
        let html = render_summary(&schema(), &empty);
        assert!(html.contains("Aucune donnée spécifique"));
        assert!(html.contains("Aucun destinataire"));
    }
}
