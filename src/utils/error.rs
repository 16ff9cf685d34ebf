use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid input at row {row}: {message}")]
    InvalidInputError { row: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NameError::ConfigError { .. }
            | NameError::ConfigValidationError { .. }
            | NameError::InvalidConfigValueError { .. }
            | NameError::MissingConfigError { .. } => ErrorCategory::Configuration,
            NameError::CsvError(_) | NameError::InvalidInputError { .. } => ErrorCategory::Input,
            NameError::IoError(_) | NameError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆資料錯誤，可修正後重跑
            NameError::InvalidInputError { .. } => ErrorSeverity::Medium,
            NameError::CsvError(_) => ErrorSeverity::Medium,
            NameError::ConfigError { .. }
            | NameError::ConfigValidationError { .. }
            | NameError::InvalidConfigValueError { .. }
            | NameError::MissingConfigError { .. } => ErrorSeverity::High,
            NameError::IoError(_) | NameError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            NameError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            NameError::CsvError(_) => {
                "Make sure the input CSV has a 'first_name,last_name' header row".to_string()
            }
            NameError::SerializationError(_) => {
                "Make sure the input JSON is an array of objects with 'first_name' and 'last_name'"
                    .to_string()
            }
            NameError::ConfigError { .. } | NameError::ConfigValidationError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            NameError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            NameError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
            NameError::InvalidInputError { row, .. } => {
                format!("Fix row {} of the input file", row)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read the names: {}", self),
            ErrorCategory::Output => format!("Could not write the results: {}", self),
        }
    }

    /// 依嚴重程度決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, NameError>;
