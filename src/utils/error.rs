use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Tech catalog error: {message}")]
    CatalogError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RulesetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RulesetError::IoError(_) => ErrorCategory::Io,
            RulesetError::SerializationError(_)
            | RulesetError::CatalogError { .. }
            | RulesetError::ProcessingError { .. } => ErrorCategory::Data,
            RulesetError::ConfigError { .. }
            | RulesetError::InvalidConfigValueError { .. }
            | RulesetError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RulesetError::IoError(_) | RulesetError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for this error when it ends a CLI run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RulesetError::IoError(e) => format!("Could not read or write a file: {}", e),
            RulesetError::SerializationError(e) => format!("Could not encode JSON: {}", e),
            RulesetError::ConfigError { message } => format!("Configuration problem: {}", message),
            RulesetError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            RulesetError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            RulesetError::CatalogError { message } => {
                format!("Technology catalog is malformed: {}", message)
            }
            RulesetError::ProcessingError { message } => {
                format!("Ruleset could not be processed: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RulesetError::IoError(_) => "Check that the input file exists and the output directory is writable",
            RulesetError::SerializationError(_) => "Re-run with --verbose to see which record failed",
            RulesetError::ConfigError { .. } => "Check the TOML syntax of the configuration file",
            RulesetError::InvalidConfigValueError { .. } => "Fix the value named above and run again",
            RulesetError::MissingConfigError { .. } => "Pass the value on the command line or in the [input] section",
            RulesetError::CatalogError { .. } => "Compare the catalog file against data/classic_techs.toml",
            RulesetError::ProcessingError { .. } => "Inspect the intermediate JSON with `parse` first",
        }
    }
}

pub type Result<T> = std::result::Result<T, RulesetError>;
