//! Error handling for zipforce

use thiserror::Error;

/// Main error type for zipforce
#[derive(Error, Debug, Clone)]
pub enum ZipForceError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Archive error ({path}): {message}")]
    Archive { path: String, message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("CLI error: {message}")]
    Cli { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ZipForceError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an archive error
    pub fn archive(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Archive {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when the error was raised before any candidate was tested
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your flags, .env file and target path", message)
            }
            Self::Archive { path, message } => {
                format!("❌ Could not test archive '{}': {}\n💡 The archive may be damaged or use an unsupported format", path, message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<std::io::Error> for ZipForceError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<serde_json::Error> for ZipForceError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("Failed to serialize report: {}", err))
    }
}

impl From<inquire::InquireError> for ZipForceError {
    fn from(err: inquire::InquireError) -> Self {
        Self::cli(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ZipForceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Attack task failed: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ZipForceError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::ZipForceError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ZipForceError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::ZipForceError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ZipForceError::internal(format!($fmt, $($arg)*))
    };
}
