//! Field mapping between source contacts and the target client schema.

pub mod client;
pub mod intake;
pub mod table;

pub use client::map_contact;
pub use intake::build_form;
pub use table::{FieldMapping, FieldMappingTable};
