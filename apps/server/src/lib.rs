//! Webhook bridge server: GoHighLevel contact events in, IntakeQ client
//! upserts out.
//!
//! The binary wires configuration, logging, and the HTTP surface around the
//! `bridge-core` pipeline; no mapping or upsert decision logic lives here.

pub mod api;
pub mod config;
pub mod logging;
pub mod state;
