pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::pipelines::{
    raw_pipeline::RawPipeline, techs_pipeline::TechsPipeline, units_pipeline::UnitsPipeline,
};
pub use config::{cli::LocalStorage, toml_config::TomlConfig, RunSettings};
pub use core::etl::EtlEngine;
pub use utils::error::{Result, RulesetError};
