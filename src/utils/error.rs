use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status} for {url}")]
    HttpStatus {
        service: String,
        status: u16,
        url: String,
    },

    #[error("Malformed {service} response: {message}")]
    MalformedResponse { service: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Collection task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::ApiError(_) | StatsError::HttpStatus { .. } => ErrorCategory::Network,
            StatsError::MalformedResponse { .. } | StatsError::SerializationError(_) => {
                ErrorCategory::Data
            }
            StatsError::ConfigError { .. }
            | StatsError::MissingConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            StatsError::IoError(_) | StatsError::TaskError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Transient on the remote side; rerunning may succeed.
            StatsError::ApiError(_) => ErrorSeverity::Medium,
            StatsError::HttpStatus { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            StatsError::HttpStatus { .. }
            | StatsError::MalformedResponse { .. }
            | StatsError::SerializationError(_) => ErrorSeverity::High,
            StatsError::ConfigError { .. }
            | StatsError::MissingConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::ConfigValidationError { .. } => ErrorSeverity::High,
            StatsError::IoError(_) | StatsError::TaskError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::ApiError(e) if e.is_timeout() => {
                "The job service did not answer in time".to_string()
            }
            StatsError::ApiError(_) => "Could not reach the job service".to_string(),
            StatsError::HttpStatus {
                service, status, ..
            } => format!("{} rejected the request (HTTP {})", service, status),
            StatsError::MalformedResponse { service, .. } => {
                format!("{} answered with data in an unexpected format", service)
            }
            StatsError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StatsError::ApiError(_) => {
                "Check the network connection or raise --timeout-seconds"
            }
            StatsError::HttpStatus { status: 401, .. } | StatsError::HttpStatus { status: 403, .. } => {
                "Check that SJ_SECRET_KEY holds a valid SuperJob application key"
            }
            StatsError::HttpStatus { .. } => "Retry later; the service may be overloaded",
            StatsError::MalformedResponse { .. } => {
                "Check the service base URL; it must point at the vacancies API"
            }
            StatsError::MissingConfigError { .. } => {
                "Export SJ_SECRET_KEY or pass --sj-secret-key, or skip SuperJob with --services headhunter"
            }
            StatsError::ConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::ConfigValidationError { .. } => "Fix the configuration and run again",
            StatsError::SerializationError(_) => "Use --format table instead",
            StatsError::IoError(_) => "Check that the config file exists and is readable",
            StatsError::TaskError(_) => "Run again with --concurrent-requests 1",
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
