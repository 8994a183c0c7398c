//! Wire-level payloads exchanged with the target platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Client identifier as the target platform reports it. Observed as both a
/// JSON number and a string across API revisions; both are accepted and
/// echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientId::Number(id) => write!(f, "{id}"),
            ClientId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// The client record sent to the target platform on create and update.
///
/// Every field skips serialization when empty: a blank must never reach the
/// target platform, where it would overwrite populated data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientRecord {
    #[serde(rename = "FirstName", skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(rename = "LastName", skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(rename = "Name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "Email", skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(rename = "Phone", skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(rename = "City", skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(rename = "StateShort", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(rename = "PostalCode", skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(rename = "Country", skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(rename = "CustomFields", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomFieldValue>,
    /// Intake form bundled with the record when any recognized medical
    /// question carried an answer.
    #[serde(rename = "form_data", skip_serializing_if = "Option::is_none")]
    pub form: Option<FormSubmission>,
}

/// One mapped custom field on the client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomFieldValue {
    #[serde(rename = "FieldId")]
    pub field_id: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// A named bundle of medical-intake answers sent as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    #[serde(rename = "formName")]
    pub form_name: String,
    pub fields: Vec<FormAnswer>,
}

/// One answered intake question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormAnswer {
    pub id: String,
    pub value: String,
}
