use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("No {entity} found with {key} '{value}'")]
    NotFound {
        entity: &'static str,
        key: &'static str,
        value: String,
    },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Requirements not met: {message}")]
    Incomplete { message: String },

    #[error("Invalid option '{value}': {reason}")]
    InvalidOption { value: String, reason: String },

    #[error("Not eligible: {message}")]
    NotEligible { message: String },

    #[error("Student '{faculty_number}' is not enrolled in {discipline}")]
    NotEnrolled {
        faculty_number: String,
        discipline: String,
    },

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("No file is currently open")]
    NoOpenFile,

    #[error("Insufficient parameters. Usage: {usage}")]
    Usage { usage: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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
    Lookup,
    Rule,
    Input,
    Session,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RecordsError {
    pub fn not_found(entity: &'static str, key: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key,
            value: value.into(),
        }
    }

    pub fn no_rights() -> Self {
        Self::Forbidden {
            message: "The student doesn't have rights.".to_string(),
        }
    }

    pub fn invalid_number(value: &str) -> Self {
        Self::InvalidOption {
            value: value.to_string(),
            reason: "expected a number".to_string(),
        }
    }

    pub fn usage(usage: &str) -> Self {
        Self::Usage {
            usage: usage.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::Forbidden { .. }
            | Self::Incomplete { .. }
            | Self::NotEligible { .. }
            | Self::NotEnrolled { .. } => ErrorCategory::Rule,
            Self::InvalidOption { .. } | Self::Usage { .. } | Self::UnknownCommand { .. } => {
                ErrorCategory::Input
            }
            Self::NoOpenFile => ErrorCategory::Session,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Rule | ErrorCategory::Input => {
                ErrorSeverity::Low
            }
            ErrorCategory::Session => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person at the prompt.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { entity, key, .. } => {
                format!("No {} found with this {}.", entity, key)
            }
            Self::Forbidden { message }
            | Self::Incomplete { message }
            | Self::NotEligible { message } => message.clone(),
            Self::NotEnrolled { .. } => {
                "The student is not enrolled in this discipline.".to_string()
            }
            Self::InvalidOption { value, reason } => {
                format!("Invalid option '{}': {}.", value, reason)
            }
            Self::UnknownCommand { .. } => "Unknown command.".to_string(),
            Self::NoOpenFile => "No file is currently open.".to_string(),
            Self::Usage { usage } => format!("Insufficient parameters. Usage: {}", usage),
            Self::IoError(e) => format!("An error occurred while accessing the file: {}", e),
            Self::SerializationError(e) => format!("The file is not valid JSON: {}", e),
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Check the spelling of the faculty number, program or discipline",
            Self::Forbidden { .. } => "Resume the student before changing their record",
            Self::Incomplete { .. } => "Grade the outstanding mandatory disciplines first",
            Self::InvalidOption { .. } => "Check the option name and that numeric values are numbers",
            Self::NotEligible { .. } => "Only disciplines of the student's program and current year can be taken",
            Self::NotEnrolled { .. } => "Enroll the student in the discipline before grading",
            Self::UnknownCommand { .. } => "Type 'help' to list the supported commands",
            Self::NoOpenFile => "Open a file with 'open <file>' first",
            Self::Usage { .. } => "Type 'help' to list commands and their parameters",
            Self::IoError(_) => "Check that the path exists and is writable",
            Self::SerializationError(_) => "Fix the JSON document or open a different file",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;
