//! The source-to-target field correspondence table.
//!
//! The table is loaded once per process from configuration and shared
//! read-only by the mappers. A mapping pass never mutates the table; each
//! pass builds its own accumulator.

use serde::Deserialize;

/// Source key whose mapped value the biometric deriver may override.
pub const BMI_SOURCE_KEY: &str = "BMI";

/// One row of the correspondence table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldMapping {
    /// Custom-field key as the source platform spells it.
    pub source_key: String,
    /// Target platform custom-field identifier.
    pub field_id: String,
    /// Human-readable label, kept for operator-facing configuration review.
    pub label: String,
}

/// Immutable lookup table, ordered. The order of rows dictates the order of
/// mapped custom fields in the client record, so output is stable for
/// identical input regardless of the arrival order of source fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappingTable {
    rows: Vec<FieldMapping>,
}

impl FieldMappingTable {
    pub fn new(rows: Vec<FieldMapping>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FieldMapping] {
        &self.rows
    }

    /// Target field id mapped to `source_key`, if the table carries it.
    pub fn field_id(&self, source_key: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.source_key == source_key)
            .map(|row| row.field_id.as_str())
    }
}

impl Default for FieldMappingTable {
    /// The shipped correspondence rows for the weight-loss program's custom
    /// fields on the target platform.
    fn default() -> Self {
        let row = |source_key: &str, field_id: &str| FieldMapping {
            source_key: source_key.to_string(),
            field_id: field_id.to_string(),
            label: source_key.to_string(),
        };
        Self::new(vec![
            row("Height Feet", "sotc"),
            row("Height Inches", "o0a0"),
            row("BMI", "gcf3"),
            row("Current Weight?", "n0dx"),
            row("Target Weight", "fovf"),
            row("Currently Taking", "fudl"),
            row("State_options", "8fjy"),
        ])
    }
}
