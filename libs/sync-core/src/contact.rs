//! Canonical contact representation and normalization.
//!
//! Both webhook shapes collapse into one `Contact`: identity fields default
//! to the empty string (never omitted, so downstream emptiness checks stay
//! uniform) and every custom field is carried as a string-coerced key/value
//! pair in arrival order. Immediately after normalization the custom-field
//! bag is classified once into three disjoint typed views, so later
//! components consume those views instead of re-scanning key strings.

use crate::event::{RawEvent, DIRECT_RESERVED_KEYS};
use crate::mapping::intake;
use serde::Serialize;
use serde_json::{Map, Value};

/// One custom field as delivered by the source platform.
///
/// `field_value` is the wire name GoHighLevel uses for the value slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomField {
    pub key: String,
    #[serde(rename = "field_value")]
    pub value: String,
}

/// The normalized, shape-independent contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub custom_fields: Vec<CustomField>,
}

/// Biometric inputs promoted out of the custom-field bag for numeric access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiometricInputs {
    pub height_feet: String,
    pub height_inches: String,
    pub bmi: String,
    pub current_weight: String,
    pub target_weight: String,
}

/// Identity-named custom fields used as fallbacks when the corresponding
/// canonical identity field is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityOverrides {
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// The three disjoint views over a contact's custom fields.
#[derive(Debug, Clone)]
pub struct FieldViews<'a> {
    pub biometrics: BiometricInputs,
    pub identity: IdentityOverrides,
    pub intake: Vec<&'a CustomField>,
}

impl Contact {
    /// Normalize a classified event. Never fails: missing optional fields
    /// default to the empty string.
    pub fn from_event(event: &RawEvent) -> Self {
        match event {
            RawEvent::Tag { payload } => Self::from_tag_payload(payload),
            RawEvent::Direct { fields } => Self::from_direct_fields(fields),
        }
    }

    fn from_tag_payload(payload: &Map<String, Value>) -> Self {
        let custom_fields = payload
            .get("customFields")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|entry| CustomField {
                        key: entry.get("key").map(coerce_string).unwrap_or_default(),
                        value: entry
                            .get("field_value")
                            .map(coerce_string)
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: string_at(payload, "contactId"),
            first_name: string_at(payload, "firstName"),
            last_name: string_at(payload, "lastName"),
            email: string_at(payload, "email"),
            phone: string_at(payload, "phone"),
            city: string_at(payload, "city"),
            state: string_at(payload, "state"),
            country: string_at(payload, "country"),
            postal_code: string_at(payload, "postalCode"),
            custom_fields,
        }
    }

    fn from_direct_fields(fields: &Map<String, Value>) -> Self {
        // Every key outside the reserved identity/tag set becomes a custom
        // field, in arrival order.
        let custom_fields = fields
            .iter()
            .filter(|(key, _)| !DIRECT_RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| CustomField {
                key: key.clone(),
                value: coerce_string(value),
            })
            .collect();

        Self {
            id: string_at(fields, "contact_id"),
            first_name: string_at(fields, "first_name"),
            last_name: string_at(fields, "last_name"),
            email: string_at(fields, "email"),
            phone: string_at(fields, "phone"),
            city: string_at(fields, "city"),
            state: string_at(fields, "state"),
            country: string_at(fields, "country"),
            postal_code: string_at(fields, "postal_code"),
            custom_fields,
        }
    }

    /// First value stored under `key`, if any.
    pub fn custom_field(&self, key: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    /// Classify the custom-field bag into its three typed views.
    pub fn views(&self) -> FieldViews<'_> {
        let mut biometrics = BiometricInputs::default();
        let mut identity = IdentityOverrides::default();
        let mut intake = Vec::new();

        for field in &self.custom_fields {
            match field.key.as_str() {
                "Height Feet" => fill(&mut biometrics.height_feet, &field.value),
                "Height Inches" => fill(&mut biometrics.height_inches, &field.value),
                "BMI" => fill(&mut biometrics.bmi, &field.value),
                "Current Weight?" => fill(&mut biometrics.current_weight, &field.value),
                "Target Weight" => fill(&mut biometrics.target_weight, &field.value),
                key if intake::is_intake_question(key) => intake.push(field),
                key => {
                    if let Some(slot) = identity_slot(&mut identity, key) {
                        fill(slot, &field.value);
                    }
                }
            }
        }

        FieldViews {
            biometrics,
            identity,
            intake,
        }
    }
}

/// First non-empty value wins when a key appears more than once.
fn fill(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

fn identity_slot<'a>(overrides: &'a mut IdentityOverrides, key: &str) -> Option<&'a mut String> {
    if key.eq_ignore_ascii_case("email") {
        Some(&mut overrides.email)
    } else if key.eq_ignore_ascii_case("phone") {
        Some(&mut overrides.phone)
    } else if key.eq_ignore_ascii_case("city") {
        Some(&mut overrides.city)
    } else if key.eq_ignore_ascii_case("state") {
        Some(&mut overrides.state)
    } else if key.eq_ignore_ascii_case("country") {
        Some(&mut overrides.country)
    } else if key.eq_ignore_ascii_case("postalcode") || key.eq_ignore_ascii_case("postal_code") {
        Some(&mut overrides.postal_code)
    } else {
        None
    }
}

fn string_at(map: &Map<String, Value>, key: &str) -> String {
    map.get(key).map(coerce_string).unwrap_or_default()
}

/// String-coerce a JSON value the way the source platform's consumers expect:
/// null becomes the empty string, scalars render bare, structures render as
/// JSON text.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}
