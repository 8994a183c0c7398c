//! Inbound webhook event classification.
//!
//! GoHighLevel delivers contact data in two layouts: tag-automation events
//! nest everything under a `payload` object, while form submissions and
//! direct exports arrive as one flat object. Both are classified into a
//! tagged representation by a single discriminant check before any other
//! work happens; anything else is rejected explicitly instead of being
//! normalized into an all-empty contact.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Direct-shape keys that carry identity or tag data rather than free-form
/// custom fields.
pub(crate) const DIRECT_RESERVED_KEYS: &[&str] = &[
    "contact_id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "tags",
    "city",
    "state",
    "country",
    "postal_code",
];

/// An inbound event, classified by shape.
#[derive(Debug, Clone)]
pub enum RawEvent {
    /// Tag-automation shape: `{event, locationId, payload: {contactId,
    /// tagName, customFields: [...], ...}}`.
    Tag { payload: Map<String, Value> },
    /// Flat contact shape: `{contact_id, first_name, ..., tags, ...}` plus
    /// arbitrary extra keys treated as custom fields.
    Direct { fields: Map<String, Value> },
}

impl RawEvent {
    /// Classify a raw JSON body by its shape discriminant: the presence of a
    /// `payload` object marks the tag-event shape, a flat object carrying at
    /// least one reserved contact key marks the direct shape.
    pub fn classify(body: &Value) -> Result<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| Error::UnrecognizedShape("event body is not a JSON object".into()))?;

        if let Some(payload) = object.get("payload") {
            let payload = payload.as_object().ok_or_else(|| {
                Error::UnrecognizedShape("payload key is present but not an object".into())
            })?;
            return Ok(RawEvent::Tag {
                payload: payload.clone(),
            });
        }

        if DIRECT_RESERVED_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Ok(RawEvent::Direct {
                fields: object.clone(),
            });
        }

        Err(Error::UnrecognizedShape(
            "flat object carries none of the known contact keys".into(),
        ))
    }

    /// Tags carried by the event: the single `tagName` for tag events, the
    /// comma-joined `tags` string split and trimmed for direct contacts.
    pub fn tags(&self) -> Vec<String> {
        match self {
            RawEvent::Tag { payload } => payload
                .get("tagName")
                .and_then(Value::as_str)
                .map(|tag| vec![tag.trim().to_string()])
                .unwrap_or_default(),
            RawEvent::Direct { fields } => fields
                .get("tags")
                .and_then(Value::as_str)
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
