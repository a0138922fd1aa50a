use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Cannot access directory '{}': {source}", .path.display())]
    DirectoryAccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine delimiter for '{file}': {reason}")]
    DialectDetectionError { file: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write export '{}': {source}", .path.display())]
    ExportError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Dialect,
    Configuration,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PriceError::DirectoryAccessError { .. } | PriceError::IoError(_) => ErrorCategory::Io,
            PriceError::DialectDetectionError { .. } => ErrorCategory::Dialect,
            PriceError::ExportError { .. } => ErrorCategory::Export,
            PriceError::ConfigValidationError { .. }
            | PriceError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a single file is dropped, the run goes on
            PriceError::DialectDetectionError { .. } => ErrorSeverity::Low,
            PriceError::ConfigValidationError { .. } => ErrorSeverity::Medium,
            PriceError::ExportError { .. } | PriceError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            PriceError::DirectoryAccessError { .. } | PriceError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PriceError::DirectoryAccessError { .. } => {
                "Check that the prices directory exists and is readable (--prices-dir)"
            }
            PriceError::DialectDetectionError { .. } => {
                "Make sure the file is comma, semicolon or tab separated with a header row"
            }
            PriceError::IoError(_) => "Check file permissions and available disk space",
            PriceError::ExportError { .. } => {
                "Make sure the output directory exists and is writable (--output)"
            }
            PriceError::ConfigValidationError { .. }
            | PriceError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PriceError::DirectoryAccessError { path, .. } => {
                format!("Price directory '{}' is not accessible", path.display())
            }
            PriceError::DialectDetectionError { file, .. } => {
                format!("File '{}' does not look like a delimited price list", file)
            }
            PriceError::ExportError { path, .. } => {
                format!("Could not save the HTML report to '{}'", path.display())
            }
            PriceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
