use thiserror::Error;

#[derive(Error, Debug)]
pub enum WordleError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serial port error: {0}")]
    SerialError(#[from] serialport::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read replay capture '{path}': {source}")]
    ReplayError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("No serial device found with VID {vid:#06x} / PID {pid:#06x}")]
    DeviceNotFound { vid: u16, pid: u16 },

    #[error("Stream request failed with status {status}: {message}")]
    StreamError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Device,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WordleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WordleError::HttpError(_) | WordleError::StreamError { .. } => ErrorCategory::Network,
            WordleError::SerialError(_)
            | WordleError::IoError(_)
            | WordleError::DeviceNotFound { .. } => ErrorCategory::Device,
            WordleError::ConfigError { .. }
            | WordleError::MissingConfigError { .. }
            | WordleError::InvalidConfigValueError { .. }
            | WordleError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            WordleError::ReplayError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常重試即可
            WordleError::HttpError(_) => ErrorSeverity::Medium,
            WordleError::StreamError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            WordleError::StreamError { .. } | WordleError::ReplayError { .. } => {
                ErrorSeverity::High
            }
            WordleError::ConfigError { .. }
            | WordleError::MissingConfigError { .. }
            | WordleError::InvalidConfigValueError { .. }
            | WordleError::ConfigValidationError { .. } => ErrorSeverity::High,
            WordleError::SerialError(_)
            | WordleError::IoError(_)
            | WordleError::DeviceNotFound { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            WordleError::HttpError(_) => {
                "Check your network connection and the stream endpoint URL".to_string()
            }
            WordleError::StreamError { status: 401, .. } | WordleError::StreamError { status: 403, .. } => {
                "Check that the bearer token is valid and has filtered stream access".to_string()
            }
            WordleError::StreamError { status: 429, .. } => {
                "Too many connections; wait a few minutes before reconnecting".to_string()
            }
            WordleError::StreamError { .. } => "Retry later or check the API status".to_string(),
            WordleError::SerialError(_) | WordleError::IoError(_) => {
                "Check that the LED matrix is plugged in and not in use by another program"
                    .to_string()
            }
            WordleError::DeviceNotFound { .. } => {
                "Plug in the LED matrix, pass --port explicitly, or use --dry-run".to_string()
            }
            WordleError::MissingConfigError { field } => {
                format!("Set `{}` in the config file or on the command line", field)
            }
            WordleError::InvalidConfigValueError { field, .. }
            | WordleError::ConfigValidationError { field, .. } => {
                format!("Fix the value of `{}` and try again", field)
            }
            WordleError::ConfigError { .. } => "Review the configuration file".to_string(),
            WordleError::ReplayError { .. } => {
                "Check that the replay file exists and holds UTF-8, newline-delimited JSON"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not read the message stream: {}", self),
            ErrorCategory::Device => format!("LED matrix unavailable: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WordleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_not_found_is_critical() {
        let err = WordleError::DeviceNotFound {
            vid: 0x303a,
            pid: 0x1001,
        };
        assert_eq!(err.category(), ErrorCategory::Device);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            err.to_string(),
            "No serial device found with VID 0x303a / PID 0x1001"
        );
    }

    #[test]
    fn test_stream_error_severity_by_status() {
        let throttled = WordleError::StreamError {
            status: 429,
            message: String::new(),
        };
        let unauthorized = WordleError::StreamError {
            status: 401,
            message: String::new(),
        };
        assert_eq!(throttled.severity(), ErrorSeverity::Medium);
        assert_eq!(unauthorized.severity(), ErrorSeverity::High);
        assert!(unauthorized.recovery_suggestion().contains("bearer token"));
    }

    #[test]
    fn test_replay_error_is_data_not_device() {
        let err = WordleError::ReplayError {
            path: "capture.ndjson".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("capture.ndjson"));
        assert!(err.user_friendly_message().starts_with("Unexpected data"));
    }
}
