//! Normalization and field-mapping pipeline for the GoHighLevel → IntakeQ
//! bridge.
//!
//! One inbound contact event flows through the crate in five steps:
//!
//! 1. [`event::RawEvent::classify`] — shape dispatch over the two known
//!    webhook layouts, rejecting anything else explicitly.
//! 2. [`eligibility::check`] — the paid-tag filter, short-circuiting before
//!    any transformation work.
//! 3. [`contact::Contact::from_event`] — normalization into the canonical,
//!    shape-independent contact, plus one-pass classification of the
//!    custom-field bag into typed views.
//! 4. [`mapping`] — projection onto the target client schema (with the
//!    derived BMI) and the medical-intake form submission.
//! 5. [`upsert::upsert_client`] — the email-keyed search-then-write protocol
//!    against a [`directory::ClientDirectory`] implementation.
//!
//! [`pipeline::process_event`] composes all five and always answers with a
//! structured [`pipeline::ProcessReport`]. The crate holds no state between
//! events beyond the read-only [`mapping::FieldMappingTable`].

pub mod biometrics;
pub mod contact;
pub mod directory;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod mapping;
pub mod models;
pub mod pipeline;
pub mod upsert;

pub use error::{Error, Result};
