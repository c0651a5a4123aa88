use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Generation service returned HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Malformed response from generation service: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Service,
    Output,
}

impl ErrorCategory {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Output => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Transport => 3,
            ErrorCategory::Service => 4,
        }
    }
}

impl GenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::ApiError(e) if e.is_builder() => ErrorCategory::Configuration,
            GenError::ApiError(_) => ErrorCategory::Transport,
            GenError::ServiceError { .. } | GenError::MalformedResponse { .. } => {
                ErrorCategory::Service
            }
            GenError::TomlError(_) | GenError::ConfigError { .. } => ErrorCategory::Configuration,
            GenError::IoError(_) | GenError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GenError::ServiceError { status: 400, .. } => {
                "Check the model name and the request; the service rejected it as malformed"
            }
            GenError::ServiceError { status: 401, .. } | GenError::ServiceError { status: 403, .. } => {
                "Check GEMINI_API_KEY; the key is missing, invalid or expired"
            }
            GenError::ServiceError { status: 429, .. } => {
                "Quota exceeded; wait before running again"
            }
            GenError::ServiceError { .. } => "The generation service failed; run again later",
            GenError::MalformedResponse { .. } => {
                "The model returned no text; the prompt may have been blocked"
            }
            GenError::ApiError(_) => "Check network connectivity and --base-url",
            GenError::TomlError(_) | GenError::ConfigError { .. } => {
                "Check the configuration file and command-line flags"
            }
            GenError::IoError(_) | GenError::SerializationError(_) => {
                "Check that the output and pattern paths are readable and writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
