//! Errors shared by every portal crate
//!
//! Each [`Error`] carries an [`ErrorCode`] (grouped by thousands into
//! categories), an optional context line and an optional hint telling the
//! user what to do next. The CLI turns the category into its exit status.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable error codes, grouped by category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Local files (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // Configuration (3xxx)
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    InvalidConfigValue = 3004,

    // Session (4xxx)
    SessionStoreUnavailable = 4001,
    NotAuthenticated = 4002,

    // Backend (5xxx)
    BackendRejected = 5001,

    // User input (6xxx)
    ValidationError = 6000,
    InvalidInput = 6001,
}

impl ErrorCode {
    /// Numeric value
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Category name shown in reports
    #[must_use]
    pub fn category(self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            4 => "Session",
            5 => "Backend",
            6 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with a code, context and a hint for the user
#[derive(Error, Debug)]
pub struct Error {
    /// What went wrong, for programs
    pub code: ErrorCode,
    /// What went wrong, for people
    pub message: String,
    /// Where it happened (e.g. which file was being read)
    pub context: Option<String>,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  while: {context}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Error with just a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Set the context line
    #[must_use]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Set the hint
    #[must_use]
    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    /// Keep the underlying cause
    #[must_use]
    pub fn with_source(self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    /// Input that failed a form or argument rule
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// A configuration value that cannot be used
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfigValue, message)
    }

    /// An explicitly requested config file is missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create eventmart.toml or pass --config with an existing file")
    }

    /// No stored session for a role that requires one
    pub fn not_authenticated(role: &str) -> Self {
        Self::new(ErrorCode::NotAuthenticated, format!("No {role} session found"))
            .with_suggestion(format!("Run `eventmart login --role {role}` first"))
    }

    /// Process exit status for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ErrorCode::ConfigNotFound | ErrorCode::ConfigParseError | ErrorCode::InvalidConfigValue => {
                exit_codes::CONFIG_ERROR
            }
            ErrorCode::NotAuthenticated => exit_codes::NOT_AUTHENTICATED,
            ErrorCode::BackendRejected => exit_codes::BACKEND_ERROR,
            ErrorCode::ValidationError | ErrorCode::InvalidInput => exit_codes::VALIDATION_ERROR,
            ErrorCode::IoError
            | ErrorCode::FileNotFound
            | ErrorCode::PermissionDenied
            | ErrorCode::SessionStoreUnavailable => exit_codes::FAILURE,
        }
    }

    /// Machine-readable form for `--format json`
    #[must_use]
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code.to_string(),
            category: self.code.category(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
        }
    }
}

/// Serializable view of an [`Error`]
#[derive(Debug, Clone, Serialize)]
#[allow(missing_docs)]
pub struct ErrorReport {
    pub code: String,
    pub category: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// CLI exit statuses
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const NOT_AUTHENTICATED: i32 = 4;
    pub const BACKEND_ERROR: i32 = 5;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Self::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::new(ErrorCode::ConfigParseError, format!("Invalid TOML: {}", err.message())).with_source(err)
    }
}

/// Attach context to a failing [`Result`]
pub trait ResultExt<T> {
    /// Set the error's context line
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display_and_category() {
        assert_eq!(ErrorCode::NotAuthenticated.to_string(), "E4002");
        assert_eq!(ErrorCode::FileNotFound.category(), "IO");
        assert_eq!(ErrorCode::BackendRejected.category(), "Backend");
    }

    #[test]
    fn test_not_authenticated_names_the_login_command() {
        let err = Error::not_authenticated("vendor").with_context("listing events");

        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        let shown = err.to_string();
        assert!(shown.starts_with("[E4002] No vendor session found"));
        assert!(shown.contains("while: listing events"));
        assert!(shown.contains("eventmart login --role vendor"));
    }

    #[test]
    fn test_exit_codes_follow_category() {
        assert_eq!(Error::not_authenticated("admin").exit_code(), exit_codes::NOT_AUTHENTICATED);
        assert_eq!(Error::validation("bad email").exit_code(), exit_codes::VALIDATION_ERROR);
        assert_eq!(Error::config_not_found("x.toml").exit_code(), exit_codes::CONFIG_ERROR);
        assert_eq!(
            Error::new(ErrorCode::BackendRejected, "Login failed").exit_code(),
            exit_codes::BACKEND_ERROR
        );
        assert_eq!(
            Error::new(ErrorCode::SessionStoreUnavailable, "locked").exit_code(),
            exit_codes::FAILURE
        );
    }

    #[test]
    fn test_report_omits_empty_fields() {
        let report = Error::invalid_config("base_url cannot be empty").to_report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["code"], "E3004");
        assert_eq!(json["category"], "Configuration");
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_io_error_codes() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(std::error::Error::source(&err).is_some());
    }
}
