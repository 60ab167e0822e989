pub mod raw_pipeline;
pub mod techs_pipeline;
pub mod units_pipeline;

use crate::core::record_parser::parse_ruleset;
use crate::core::{RawUnits, Storage};
use crate::utils::error::{Result, RulesetError};
use std::path::Path;

/// `<output_path>/<file_name>` as a storage path.
pub(crate) fn output_file(output_path: &str, file_name: &str) -> String {
    Path::new(output_path)
        .join(file_name)
        .to_string_lossy()
        .into_owned()
}

pub(crate) fn read_text<S: Storage>(storage: &S, path: &str) -> Result<String> {
    let bytes = storage.read_file(path)?;
    String::from_utf8(bytes).map_err(|e| RulesetError::ProcessingError {
        message: format!("{} is not valid UTF-8: {}", path, e),
    })
}

pub(crate) fn load_ruleset<S: Storage>(storage: &S, path: &str) -> Result<RawUnits> {
    tracing::info!("📖 Reading ruleset: {}", path);
    let text = read_text(storage, path)?;
    let units = parse_ruleset(&text);
    tracing::info!("📊 Parsed {} unit sections", units.len());
    Ok(units)
}
