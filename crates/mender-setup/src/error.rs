//! CLI error types with miette diagnostics.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use mender_setup_config::ConfigError;
use mender_setup_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("--{first} and --{second} cannot be used together")]
    #[diagnostic(
        code(mender_setup::conflicting_flags),
        help("Pass --server-url for a server reached by name, or --server-ip for a demo server.")
    )]
    ConflictingFlags {
        first: &'static str,
        second: &'static str,
    },

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(mender_setup::validation))]
    Validation { field: &'static str, reason: String },

    // ── Hosted Mender ────────────────────────────────────────────────
    #[error("Authentication with hosted Mender failed: {message}")]
    #[diagnostic(
        code(mender_setup::auth_failed),
        help("Check the email and password of your hosted.mender.io account.")
    )]
    AuthFailed { message: String },

    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(mender_setup::connection_failed),
        help("Check the network connection of the device.\nReason: {reason}")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Hosted Mender request failed")]
    #[diagnostic(code(mender_setup::hosted))]
    Hosted(#[source] CoreError),

    // ── Input ────────────────────────────────────────────────────────
    #[error("Failed to read answer from standard input")]
    #[diagnostic(
        code(mender_setup::input),
        help("Run interactively, or pass every answer as a flag.")
    )]
    Input(#[source] std::io::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file {} is invalid", .path.display())]
    #[diagnostic(
        code(mender_setup::conflicting_verify_keys),
        help("Set either ArtifactVerifyKey or ArtifactVerifyKeys, not both.")
    )]
    ConflictingVerifyKeys { path: PathBuf },

    #[error("Cannot write to {}", .path.display())]
    #[diagnostic(
        code(mender_setup::permission_denied),
        help("mender-setup usually has to run as root.")
    )]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(mender_setup::config))]
    Config(ConfigError),

    #[error(transparent)]
    #[diagnostic(code(mender_setup::internal))]
    Internal(CoreError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConflictingFlags { .. }
            | Self::Validation { .. }
            | Self::ConflictingVerifyKeys { .. } => exit_code::USAGE,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConflictingArguments { first, second } => {
                Self::ConflictingFlags { first, second }
            }
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::Input(source) => Self::Input(source),
            CoreError::InvalidCredentials { message } => Self::AuthFailed { message },
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            err @ (CoreError::UnexpectedStatus { .. }
            | CoreError::Protocol { .. }
            | CoreError::Transport { .. }) => Self::Hosted(err),
            err @ (CoreError::Pattern { .. } | CoreError::Config { .. }) => Self::Internal(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ConflictingVerifyKeys { path } => Self::ConflictingVerifyKeys { path },
            ConfigError::NotWritable { path, source } => Self::NotWritable { path, source },
            other => Self::Config(other),
        }
    }
}
