use crate::core::lookup::unit_classes;
use crate::domain::model::{
    AboutInfo, DataFileInfo, DocumentMetadata, EnrichedUnit, UnitsDocument,
};
use crate::utils::error::Result;
use indexmap::IndexMap;
use serde::Serialize;

pub const FORMAT_VERSION: u32 = 2;

pub fn build_units_document(
    units: IndexMap<String, EnrichedUnit>,
    metadata: &DocumentMetadata,
) -> UnitsDocument {
    let total_units = units.len();

    UnitsDocument {
        datafile: DataFileInfo {
            description: metadata.description.clone(),
            options: metadata.options.clone(),
            format_version: FORMAT_VERSION,
        },
        about: AboutInfo {
            name: metadata.name.clone(),
            summary: format!(
                "All {} unit types from {} with exact stats, classes, roles, flags, and technology requirements",
                total_units, metadata.ruleset_label
            ),
            source: metadata.source.clone(),
            total_units,
        },
        unit_classes: unit_classes(),
        units,
    }
}

/// Pretty JSON with two-space indent. Non-ASCII text is written as-is.
pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}
