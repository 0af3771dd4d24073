//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use shelf_config::ConfigError;
use shelf_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the data API at {url}")]
    #[diagnostic(
        code(shelf::connection_failed),
        help(
            "Check that the API server is running.\n\
             Set the address with --api-url or SHELF_API_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(shelf::timeout),
        help("Increase the timeout with --timeout or check the API server.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(shelf::auth_failed), help("Check the email and password and try again."))]
    AuthFailed { message: String },

    #[error("Not signed in; redirected to {redirect}")]
    #[diagnostic(code(shelf::not_signed_in), help("Run: shelf login"))]
    NotSignedIn { redirect: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(shelf::not_found),
        help("Run: shelf {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(shelf::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shelf::validation))]
    Validation { field: String, reason: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Session storage failed: {message}")]
    #[diagnostic(
        code(shelf::storage),
        help("Check permissions on the storage file, or set SHELF_STORAGE_PATH.")
    )]
    Storage { message: String },

    #[error(transparent)]
    #[diagnostic(code(shelf::config), help("Inspect the file with: shelf config show"))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(shelf::io))]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(shelf::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotSignedIn { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { kind, identifier } => CliError::NotFound {
                list_command: format!("{kind}s list"),
                resource_type: kind,
                identifier,
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::InvalidCredentials => CliError::AuthFailed {
                message: CoreError::InvalidCredentials.to_string(),
            },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Storage { message } => CliError::Storage { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
