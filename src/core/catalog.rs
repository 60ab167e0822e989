use crate::core::cost::tech_cost;
use crate::domain::model::{TechDefinition, TechDocument, TechEntry};
use crate::utils::error::{Result, RulesetError};
use serde::Deserialize;
use std::collections::HashSet;

const CLASSIC_TECHS: &str = include_str!("../../data/classic_techs.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tech: Vec<TechDefinition>,
}

/// Technology tree in catalog order.
#[derive(Debug, Clone)]
pub struct TechCatalog {
    techs: Vec<TechDefinition>,
}

impl TechCatalog {
    /// The classic tree bundled with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(CLASSIC_TECHS)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| RulesetError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })?;

        let catalog = Self { techs: file.tech };
        catalog.check()?;
        Ok(catalog)
    }

    fn check(&self) -> Result<()> {
        if self.techs.is_empty() {
            return Err(RulesetError::CatalogError {
                message: "catalog contains no [[tech]] entries".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for tech in &self.techs {
            if tech.id.trim().is_empty() || tech.name.trim().is_empty() {
                return Err(RulesetError::CatalogError {
                    message: format!("tech #{} has an empty id or name", tech.catalog_id),
                });
            }
            if !seen.insert(tech.id.as_str()) {
                return Err(RulesetError::CatalogError {
                    message: format!("duplicate tech id '{}'", tech.id),
                });
            }
        }
        Ok(())
    }

    pub fn tech_count(&self) -> usize {
        self.techs.len()
    }

    pub fn build_document(&self) -> TechDocument {
        self.techs
            .iter()
            .enumerate()
            .map(|(index, def)| (def.id.clone(), build_tech_entry(def, index as u32 + 1)))
            .collect()
    }
}

pub fn build_tech_entry(def: &TechDefinition, order: u32) -> TechEntry {
    let requirements = def.requirements();
    let name = def
        .name
        .strip_prefix("?tech:")
        .unwrap_or(&def.name)
        .to_string();

    TechEntry {
        id: def.id.clone(),
        freeciv_id: def.catalog_id,
        name,
        internal_name: def.name.clone(),
        cost: tech_cost(requirements.len()),
        req1: def.req1.clone(),
        req2: def.req2.clone(),
        requirements,
        root_req: def.root_req.clone(),
        flags: def.flags.clone(),
        graphic: def.graphic.clone(),
        position: def.position.unwrap_or_default(),
        helptext: def.helptext.clone(),
        bonus_message: def.bonus_message.clone(),
        order,
    }
}
