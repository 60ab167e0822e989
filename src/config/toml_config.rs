use crate::domain::model::DocumentMetadata;
use crate::utils::error::{Result, RulesetError};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub ruleset: Option<String>,
    pub intermediate: Option<String>,
    pub tech_catalog: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub units_file: Option<String>,
    pub raw_file: Option<String>,
    pub techs_file: Option<String>,
    pub write_intermediate: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RulesetError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RulesetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }
        for (field, value) in [
            ("input.ruleset", &self.input.ruleset),
            ("input.intermediate", &self.input.intermediate),
            ("input.tech_catalog", &self.input.tech_catalog),
        ] {
            if let Some(path) = value {
                validate_path(field, path)?;
            }
        }
        validate_non_empty_string("metadata.name", &self.metadata.name)?;
        validate_non_empty_string("metadata.source", &self.metadata.source)?;
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
