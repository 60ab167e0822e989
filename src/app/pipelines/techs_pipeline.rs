use super::{output_file, read_text};
use crate::core::catalog::TechCatalog;
use crate::core::serializer::to_json_bytes;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::TechDocument;
use crate::utils::error::Result;

/// Tech catalog to the technology document with derived costs.
pub struct TechsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TechsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for TechsPipeline<S, C> {
    type Extracted = TechCatalog;
    type Transformed = TechDocument;

    fn name(&self) -> &'static str {
        "techs"
    }

    fn extract(&self) -> Result<TechCatalog> {
        let catalog = match self.config.tech_catalog_path() {
            Some(path) => {
                tracing::info!("📖 Reading tech catalog: {}", path);
                TechCatalog::from_toml_str(&read_text(&self.storage, path)?)?
            }
            None => TechCatalog::embedded()?,
        };
        tracing::info!("📊 Loaded {} technologies", catalog.tech_count());
        Ok(catalog)
    }

    fn transform(&self, data: TechCatalog) -> Result<TechDocument> {
        let document = data.build_document();
        for entry in document.values() {
            tracing::debug!(
                "  {} ({} reqs) -> cost {}",
                entry.id,
                entry.requirements.len(),
                entry.cost
            );
        }
        Ok(document)
    }

    fn load(&self, result: TechDocument) -> Result<String> {
        let path = output_file(self.config.output_path(), self.config.techs_file());
        self.storage.write_file(&path, &to_json_bytes(&result)?)?;
        tracing::info!("💾 Saved {} technologies to {}", result.len(), path);
        Ok(path)
    }
}
