//! Reqwest-backed IntakeQ implementation of the bridge's
//! [`ClientDirectory`](bridge_core::directory::ClientDirectory) trait.
//!
//! The crate supplies transport, authentication, and response decoding; all
//! upsert decision logic stays in `bridge-core`.

mod client;

pub use client::{IntakeQClient, DEFAULT_BASE_URL};
