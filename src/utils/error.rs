use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Could not open file: {path}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl PlannerError {
    /// Whether the error aborted a catalog load.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            PlannerError::SourceUnavailable { .. } | PlannerError::Csv(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::SourceUnavailable { path, .. } => {
                format!("Could not open file: {}", path)
            }
            PlannerError::Csv(e) => format!("The course file could not be read: {}", e),
            PlannerError::Io(e) => format!("Input/output failure: {}", e),
            PlannerError::Serialization(e) => format!("Could not render output: {}", e),
            PlannerError::ConfigError { message } => message.clone(),
            PlannerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            PlannerError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::SourceUnavailable { .. } => {
                "Check that the path exists and is readable"
            }
            PlannerError::Csv(_) => "Make sure the file is plain text with one course per line",
            PlannerError::Io(_) => "Retry the operation",
            PlannerError::Serialization(_) => "Try the text output format instead",
            PlannerError::ConfigError { .. } | PlannerError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            PlannerError::MissingConfigError { .. } => {
                "Pass --file or set catalog.path in the configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
