//! Email-keyed upsert against the target platform.
//!
//! Protocol: search by (lowercased) email, then create on no match or update
//! the first match. Tag attachment branches off the success path and can
//! never turn a completed upsert into a failure. Nothing here retries; a
//! transport failure is terminal for the event.

use crate::directory::ClientDirectory;
use crate::error::{Error, Result};
use crate::models::{ClientId, ClientRecord};

/// How the orchestrator resolved the upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
}

/// Result of a completed upsert.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// Identifier of the created or updated client, when the platform
    /// reported one.
    pub client_id: Option<ClientId>,
    pub action: UpsertAction,
}

/// Drive one upsert. Fails fast with [`Error::MissingEmail`] before any
/// outbound call when the record carries no email.
pub async fn upsert_client<D>(
    directory: &D,
    record: &ClientRecord,
    tags: &[String],
) -> Result<UpsertOutcome>
where
    D: ClientDirectory + ?Sized,
{
    if record.email.trim().is_empty() {
        return Err(Error::MissingEmail);
    }

    let email = record.email.trim().to_lowercase();

    // A failed search falls through to create; if the platform is genuinely
    // unreachable the create call surfaces the real error.
    let existing = match directory.search_by_email(&email).await {
        Ok(matches) => matches.into_iter().find_map(|found| found.client_id),
        Err(error) => {
            tracing::warn!(error = %error, "Client search failed, falling back to create");
            None
        }
    };

    let outcome = match existing {
        Some(id) => {
            let updated = directory.update_client(&id, record).await?;
            tracing::info!(client_id = %id, "Updated existing client");
            UpsertOutcome {
                client_id: updated.client_id.or(Some(id)),
                action: UpsertAction::Updated,
            }
        }
        None => {
            let created = directory.create_client(record).await?;
            match &created.client_id {
                Some(id) => tracing::info!(client_id = %id, "Created new client"),
                None => tracing::info!("Created new client (no identifier reported)"),
            }
            UpsertOutcome {
                client_id: created.client_id,
                action: UpsertAction::Created,
            }
        }
    };

    if let Some(client_id) = &outcome.client_id {
        for tag in tags {
            if let Err(error) = directory.attach_tag(client_id, tag).await {
                tracing::warn!(tag = %tag, error = %error, "Failed to attach tag to client");
            }
        }
    }

    Ok(outcome)
}
