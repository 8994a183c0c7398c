//! Projection of a canonical contact onto the target client schema.

use crate::biometrics;
use crate::contact::{Contact, FieldViews};
use crate::mapping::table::{FieldMappingTable, BMI_SOURCE_KEY};
use crate::models::{ClientRecord, CustomFieldValue};

/// Territory code used when the contact carries no country at all.
const DEFAULT_COUNTRY: &str = "USA";

/// Map a canonical contact onto a target-bound client record.
///
/// Identity fields are trimmed, with identity-override custom fields filling
/// empty canonical slots. Custom fields follow the mapping table's declared
/// order, and a derived BMI overrides any directly supplied BMI value.
/// Empty values are dropped at serialization, never sent as blanks.
pub fn map_contact(
    contact: &Contact,
    views: &FieldViews<'_>,
    table: &FieldMappingTable,
) -> ClientRecord {
    tracing::debug!(contact_id = %contact.id, "Mapping contact to client record");

    let first_name = contact.first_name.trim().to_string();
    let last_name = contact.last_name.trim().to_string();
    let name = format!("{first_name} {last_name}").trim().to_string();

    let identity = &views.identity;
    let country = {
        let country = pick(&contact.country, &identity.country);
        if country.is_empty() {
            DEFAULT_COUNTRY.to_string()
        } else {
            country
        }
    };

    // Target platform rejects the leading + on phone numbers.
    let phone = pick(&contact.phone, &identity.phone).replace('+', "");

    let derived_bmi = biometrics::body_mass_index(
        &views.biometrics.height_feet,
        &views.biometrics.height_inches,
        &views.biometrics.current_weight,
    );
    if let Some(bmi) = &derived_bmi {
        tracing::info!(contact_id = %contact.id, bmi = %bmi, "Calculated BMI");
    }

    let mut custom_fields = Vec::new();
    for row in table.rows() {
        let value = if row.source_key == BMI_SOURCE_KEY {
            derived_bmi
                .clone()
                .or_else(|| non_empty(contact.custom_field(&row.source_key)))
        } else {
            non_empty(contact.custom_field(&row.source_key))
        };
        if let Some(value) = value {
            custom_fields.push(CustomFieldValue {
                field_id: row.field_id.clone(),
                value,
            });
        }
    }

    ClientRecord {
        first_name,
        last_name,
        name,
        email: pick(&contact.email, &identity.email),
        phone,
        city: pick(&contact.city, &identity.city),
        state: pick(&contact.state, &identity.state),
        postal_code: pick(&contact.postal_code, &identity.postal_code),
        country,
        custom_fields,
        form: None,
    }
}

/// Trimmed primary value, falling back to the trimmed override when the
/// primary is empty.
fn pick(primary: &str, fallback: &str) -> String {
    let primary = primary.trim();
    if primary.is_empty() {
        fallback.trim().to_string()
    } else {
        primary.to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
