//! Seam to the target platform's client store.
//!
//! The pipeline talks to the target platform exclusively through this trait,
//! so transports can be swapped; the production implementation lives in the
//! `bridge-intakeq` crate and tests substitute an in-memory directory.

use crate::error::Result;
use crate::models::{ClientId, ClientRecord};
use async_trait::async_trait;
use serde::Deserialize;

/// Minimal view of a client record as the target platform reports it.
///
/// The identifier is optional because some API revisions omit it from write
/// responses; matches without one are unusable for updates and are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientMatch {
    #[serde(rename = "ClientId", alias = "Id", default)]
    pub client_id: Option<ClientId>,
}

/// Operations the upsert protocol needs from the target platform.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Search clients by email. An empty list means no match.
    async fn search_by_email(&self, email: &str) -> Result<Vec<ClientMatch>>;

    /// Create a new client from the record.
    async fn create_client(&self, record: &ClientRecord) -> Result<ClientMatch>;

    /// Update an existing client with partial-merge semantics: fields absent
    /// from the record keep their stored values.
    async fn update_client(&self, id: &ClientId, record: &ClientRecord) -> Result<ClientMatch>;

    /// Attach one tag to a client.
    async fn attach_tag(&self, id: &ClientId, tag: &str) -> Result<()>;
}
