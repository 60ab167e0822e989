pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::DocumentMetadata;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, Validate,
};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ruleset-etl")]
#[command(about = "Convert a civ ruleset and tech tree into web client JSON")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Optional TOML configuration file; command line values win over it
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory the JSON documents are written to
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse a units ruleset into the intermediate JSON
    Parse {
        #[arg(long)]
        ruleset: Option<String>,
    },
    /// Build the enriched units document
    Units {
        #[arg(long, conflicts_with = "intermediate")]
        ruleset: Option<String>,

        /// Start from a previously written intermediate JSON instead of a ruleset
        #[arg(long)]
        intermediate: Option<String>,

        /// Also write the intermediate JSON next to the units document
        #[arg(long)]
        write_intermediate: bool,
    },
    /// Build the technology document from the tech catalog
    Techs {
        /// Catalog TOML replacing the bundled classic tree
        #[arg(long)]
        catalog: Option<String>,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the optional config file with command line overrides.
    pub fn resolve(&self) -> Result<RunSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                RunSettings::from_toml(&file_config)
            }
            None => RunSettings::default(),
        };

        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }

        match &self.command {
            Command::Parse { ruleset } => {
                if ruleset.is_some() {
                    settings.ruleset = ruleset.clone();
                }
            }
            Command::Units {
                ruleset,
                intermediate,
                write_intermediate,
            } => {
                if ruleset.is_some() {
                    settings.ruleset = ruleset.clone();
                    settings.intermediate = None;
                }
                if intermediate.is_some() {
                    settings.intermediate = intermediate.clone();
                    settings.ruleset = None;
                }
                settings.write_intermediate |= *write_intermediate;
            }
            Command::Techs { catalog } => {
                if catalog.is_some() {
                    settings.tech_catalog = catalog.clone();
                }
            }
        }

        Ok(settings)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub output_path: String,
    pub ruleset: Option<String>,
    pub intermediate: Option<String>,
    pub tech_catalog: Option<String>,
    pub units_file: String,
    pub raw_file: String,
    pub techs_file: String,
    pub write_intermediate: bool,
    pub metadata: DocumentMetadata,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            ruleset: None,
            intermediate: None,
            tech_catalog: None,
            units_file: "units_enhanced.json".to_string(),
            raw_file: "units_raw.json".to_string(),
            techs_file: "techs.json".to_string(),
            write_intermediate: false,
            metadata: DocumentMetadata::default(),
        }
    }
}

impl RunSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        let output = &config.output;

        Self {
            output_path: output.path.clone().unwrap_or(defaults.output_path),
            ruleset: config.input.ruleset.clone(),
            intermediate: config.input.intermediate.clone(),
            tech_catalog: config.input.tech_catalog.clone(),
            units_file: output.units_file.clone().unwrap_or(defaults.units_file),
            raw_file: output.raw_file.clone().unwrap_or(defaults.raw_file),
            techs_file: output.techs_file.clone().unwrap_or(defaults.techs_file),
            write_intermediate: output.write_intermediate.unwrap_or(false),
            metadata: config.metadata.clone(),
        }
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_path("output.path", &self.output_path)?;
        validate_file_extensions(
            "output files",
            &[
                self.units_file.clone(),
                self.raw_file.clone(),
                self.techs_file.clone(),
            ],
            &["json"],
        )?;
        if let Some(ruleset) = &self.ruleset {
            validate_path("input.ruleset", ruleset)?;
        }
        if let Some(intermediate) = &self.intermediate {
            validate_path("input.intermediate", intermediate)?;
        }
        validate_non_empty_string("metadata.name", &self.metadata.name)?;
        Ok(())
    }
}

impl ConfigProvider for RunSettings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn ruleset_path(&self) -> Option<&str> {
        self.ruleset.as_deref()
    }

    fn intermediate_path(&self) -> Option<&str> {
        self.intermediate.as_deref()
    }

    fn tech_catalog_path(&self) -> Option<&str> {
        self.tech_catalog.as_deref()
    }

    fn units_file(&self) -> &str {
        &self.units_file
    }

    fn raw_file(&self) -> &str {
        &self.raw_file
    }

    fn techs_file(&self) -> &str {
        &self.techs_file
    }

    fn write_intermediate(&self) -> bool {
        self.write_intermediate
    }

    fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }
}
