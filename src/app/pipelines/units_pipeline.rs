use super::{load_ruleset, output_file, read_text};
use crate::core::normalizer::enrich_unit;
use crate::core::serializer::{build_units_document, to_json_bytes};
use crate::core::{ConfigProvider, Pipeline, RawUnits, Storage};
use crate::domain::model::{EnrichedUnit, UnitsDocument};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Ruleset (or intermediate JSON) to the enriched units document.
pub struct UnitsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> UnitsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn write_intermediate(&self, units: &RawUnits) -> Result<()> {
        let path = output_file(self.config.output_path(), self.config.raw_file());
        self.storage.write_file(&path, &to_json_bytes(units)?)?;
        tracing::info!("📝 Intermediate records saved: {}", path);
        Ok(())
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for UnitsPipeline<S, C> {
    type Extracted = RawUnits;
    type Transformed = UnitsDocument;

    fn name(&self) -> &'static str {
        "units"
    }

    fn extract(&self) -> Result<RawUnits> {
        // A ruleset path wins over an intermediate file when both are set.
        if let (None, Some(intermediate)) =
            (self.config.ruleset_path(), self.config.intermediate_path())
        {
            tracing::info!("📖 Reading intermediate records: {}", intermediate);
            let text = read_text(&self.storage, intermediate)?;
            let units: RawUnits = serde_json::from_str(&text)?;
            tracing::info!("📊 Loaded {} unit records", units.len());
            return Ok(units);
        }

        let ruleset = validate_required_field("input.ruleset", self.config.ruleset_path())?;
        let units = load_ruleset(&self.storage, ruleset)?;
        if self.config.write_intermediate() {
            self.write_intermediate(&units)?;
        }
        Ok(units)
    }

    fn transform(&self, data: RawUnits) -> Result<UnitsDocument> {
        tracing::info!("🔧 Enriching {} units", data.len());

        let units: IndexMap<String, EnrichedUnit> = data
            .iter()
            .map(|(id, record)| (id.clone(), enrich_unit(id, record)))
            .collect();

        log_summary(&units);
        Ok(build_units_document(units, self.config.metadata()))
    }

    fn load(&self, result: UnitsDocument) -> Result<String> {
        let path = output_file(self.config.output_path(), self.config.units_file());
        let bytes = to_json_bytes(&result)?;

        tracing::debug!("Writing units document ({} bytes)", bytes.len());
        self.storage.write_file(&path, &bytes)?;

        tracing::info!("💾 {} units saved: {}", result.about.total_units, path);
        Ok(path)
    }
}

fn log_summary(units: &IndexMap<String, EnrichedUnit>) {
    let mut by_class: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut by_tech: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (id, unit) in units {
        by_class.entry(&unit.unit_class).or_default().push(id);
        if let Some(tech) = &unit.required_tech {
            by_tech.entry(tech).or_default().push(id);
        }
    }

    for (class, ids) in &by_class {
        tracing::info!("  {} ({} units)", class, ids.len());
    }
    for (tech, ids) in &by_tech {
        tracing::debug!("  {}: {}", tech, ids.join(", "));
    }
}
