use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Could not render {format} export: {message}")]
    ExportError { format: String, message: String },

    #[error("Storage error for key '{key}': {message}")]
    StorageError { key: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GroupError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::NotFound { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::StorageError { .. } => {
                ErrorCategory::Storage
            }
            Self::CsvError(_) | Self::ZipError(_) | Self::ExportError { .. } => {
                ErrorCategory::Export
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } => ErrorSeverity::Low,
            Self::InvalidArgument { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ExportError { .. }
            | Self::CsvError(_)
            | Self::ZipError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::StorageError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidArgument { .. } => {
                "Add at least one participant and use a group count or size of 1 or more".to_string()
            }
            Self::NotFound { kind, .. } => {
                format!("List the stored {} entries to find a valid id", kind.to_lowercase())
            }
            Self::IoError(_) => "Check that the data directory exists and is writable".to_string(),
            Self::SerializationError(_) => {
                "The stored data could not be encoded; try clearing it".to_string()
            }
            Self::CsvError(_) | Self::ZipError(_) | Self::ExportError { .. } => {
                "Check the output path and try a different export format".to_string()
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Fix the configuration file syntax and try again".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            Self::StorageError { .. } => "Check the storage backend and the data directory".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => format!("Cannot create groups: {}", message),
            Self::NotFound { kind, id } => format!("No {} with id {}", kind.to_lowercase(), id),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::StorageError { key, .. } => format!("Could not access stored data '{}'", key),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GroupError>;
