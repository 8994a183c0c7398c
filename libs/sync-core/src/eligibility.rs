//! Paid-tag eligibility filter.
//!
//! Runs against the classified event before any normalization or mapping
//! work. Rejection is a pure short-circuit: the pipeline answers `ignored`
//! and performs zero outbound calls.

use crate::event::RawEvent;
use serde_json::Value;

const QUALIFYING_TAG: &str = "paid";

/// Reason string reported when an event does not qualify.
pub const INELIGIBLE_REASON: &str = "Not a paid tag";

/// Outcome of the eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible { reason: &'static str },
}

/// Decide whether an event qualifies for processing.
///
/// Tag events qualify when `payload.tagName` equals `paid` (case-insensitive);
/// direct contacts qualify when the comma-joined `tags` string contains `paid`
/// as one of its trimmed tokens.
pub fn check(event: &RawEvent) -> Eligibility {
    let eligible = match event {
        RawEvent::Tag { payload } => payload
            .get("tagName")
            .and_then(Value::as_str)
            .is_some_and(|tag| tag.trim().eq_ignore_ascii_case(QUALIFYING_TAG)),
        RawEvent::Direct { fields } => fields
            .get("tags")
            .and_then(Value::as_str)
            .is_some_and(|tags| {
                tags.split(',')
                    .any(|tag| tag.trim().eq_ignore_ascii_case(QUALIFYING_TAG))
            }),
    };

    if eligible {
        Eligibility::Eligible
    } else {
        Eligibility::Ineligible {
            reason: INELIGIBLE_REASON,
        }
    }
}
