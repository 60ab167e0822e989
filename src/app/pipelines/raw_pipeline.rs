use super::{load_ruleset, output_file};
use crate::core::serializer::to_json_bytes;
use crate::core::{ConfigProvider, Pipeline, RawUnits, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// Ruleset text to the intermediate per-unit JSON, no enrichment.
pub struct RawPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RawPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for RawPipeline<S, C> {
    type Extracted = RawUnits;
    type Transformed = RawUnits;

    fn name(&self) -> &'static str {
        "parse"
    }

    fn extract(&self) -> Result<RawUnits> {
        let ruleset = validate_required_field("input.ruleset", self.config.ruleset_path())?;
        load_ruleset(&self.storage, ruleset)
    }

    fn transform(&self, data: RawUnits) -> Result<RawUnits> {
        if data.is_empty() {
            tracing::warn!("⚠️ No [unit_*] sections found in ruleset");
        }
        Ok(data)
    }

    fn load(&self, result: RawUnits) -> Result<String> {
        let path = output_file(self.config.output_path(), self.config.raw_file());
        self.storage.write_file(&path, &to_json_bytes(&result)?)?;
        tracing::info!("💾 Extracted {} units to {}", result.len(), path);
        Ok(path)
    }
}
