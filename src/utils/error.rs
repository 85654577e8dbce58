use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("{path} is missing required columns: {}", .columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },

    #[error("Invalid record in {path} at line {line}: {reason}")]
    InvalidRecord {
        path: String,
        line: u64,
        reason: String,
    },

    #[error("Roster {path} contains no participants")]
    EmptyRoster { path: String },

    #[error("Participant {email} appears more than once in the roster")]
    DuplicateParticipant { email: String },

    #[error("Employee {email} from previous assignments not found in current list")]
    UnknownParticipant { email: String },

    #[error("No valid Secret Santa assignment possible for {participants} participants")]
    NoValidAssignment { participants: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 輸入檔案不存在或欄位缺漏
    Input,
    /// 名單資料彼此矛盾
    Data,
    /// 限制條件下無解
    Constraint,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that ended with an error of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SantaError::InputNotFound { .. }
            | SantaError::MissingColumns { .. }
            | SantaError::InvalidRecord { .. }
            | SantaError::CsvError(_) => ErrorCategory::Input,
            SantaError::EmptyRoster { .. }
            | SantaError::DuplicateParticipant { .. }
            | SantaError::UnknownParticipant { .. } => ErrorCategory::Data,
            SantaError::NoValidAssignment { .. } => ErrorCategory::Constraint,
            SantaError::ConfigError { .. }
            | SantaError::InvalidConfigValueError { .. }
            | SantaError::ConfigValidationError { .. } => ErrorCategory::Config,
            SantaError::IoError(_) | SantaError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Constraint => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Config => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SantaError::InputNotFound { path } => format!("Employee file {} not found.", path),
            SantaError::MissingColumns { path, columns } => format!(
                "{} must contain the columns: {}",
                path,
                columns.join(", ")
            ),
            SantaError::NoValidAssignment { .. } => {
                "No valid Secret Santa assignment possible.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the file path and that the CSV headers are spelled exactly",
            ErrorCategory::Data => "Fix the roster or the previous-round file so every email is unique and known",
            ErrorCategory::Constraint => {
                "Add participants or drop the previous-round file; the current group cannot be paired without repeats"
            }
            ErrorCategory::Config => "Review the command-line flags or the TOML configuration file",
            ErrorCategory::System => "Check file permissions and free disk space, then retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;
