//! End-to-end webhook processing.
//!
//! classify → eligibility filter → normalize → map → upsert. Every code path
//! terminates in one of three structured reports; no fault escapes to the
//! caller unhandled.

use crate::contact::Contact;
use crate::directory::ClientDirectory;
use crate::eligibility::{self, Eligibility};
use crate::event::RawEvent;
use crate::mapping::{self, FieldMappingTable};
use crate::models::ClientId;
use crate::upsert;
use serde::Serialize;
use serde_json::Value;

/// The caller-facing result of processing one inbound event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProcessReport {
    /// The contact was upserted into the target platform.
    Success {
        gohighlevel_contact_id: String,
        intakeq_client_id: Option<ClientId>,
        glp1_fields_mapped: usize,
    },
    /// The event did not qualify for processing. Not an error.
    Ignored { reason: String },
    /// The event qualified but processing failed; nothing was retried.
    Error { reason: String },
}

/// Process one raw webhook body against the target platform.
pub async fn process_event<D>(
    directory: &D,
    table: &FieldMappingTable,
    body: &Value,
) -> ProcessReport
where
    D: ClientDirectory + ?Sized,
{
    tracing::info!("Processing webhook event");

    let event = match RawEvent::classify(body) {
        Ok(event) => event,
        Err(error) => {
            tracing::warn!(error = %error, "Rejecting unclassifiable event");
            return ProcessReport::Error {
                reason: error.to_string(),
            };
        }
    };

    // The filter runs before any mapping work; rejection performs zero
    // outbound calls.
    if let Eligibility::Ineligible { reason } = eligibility::check(&event) {
        tracing::info!(reason, "Ignoring event");
        return ProcessReport::Ignored {
            reason: reason.to_string(),
        };
    }

    let contact = Contact::from_event(&event);
    let views = contact.views();

    let mut record = mapping::map_contact(&contact, &views, table);
    let form = mapping::build_form(&views.intake);
    let fields_mapped = form.as_ref().map(|form| form.fields.len()).unwrap_or(0);
    record.form = form;

    let tags = event.tags();

    match upsert::upsert_client(directory, &record, &tags).await {
        Ok(outcome) => {
            tracing::info!(
                contact_id = %contact.id,
                action = ?outcome.action,
                "Upsert completed"
            );
            ProcessReport::Success {
                gohighlevel_contact_id: contact.id.clone(),
                intakeq_client_id: outcome.client_id,
                glp1_fields_mapped: fields_mapped,
            }
        }
        Err(error) => {
            tracing::error!(error = %error, contact_id = %contact.id, "Upsert failed");
            ProcessReport::Error {
                reason: error.to_string(),
            }
        }
    }
}
