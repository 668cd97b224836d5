// ── Core error types ──
//
// Errors surfaced by the setup wizard. Invalid answers never show up
// here: they are re-prompted inside the state that asked for them. What
// remains is either fatal or, for the two credential variants, handled
// by the credentials state with a fresh prompt.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Failed to read user input")]
    Input(#[source] std::io::Error),

    #[error("Conflicting arguments: --{first} and --{second} cannot be used together")]
    ConflictingArguments {
        first: &'static str,
        second: &'static str,
    },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Unable to compile {name} pattern")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    // ── Hosted service errors ────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    InvalidCredentials { message: String },

    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Unexpected status code {status} from {operation} request")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    #[error("Malformed response from hosted service: {message}")]
    Protocol { message: String },

    #[error("HTTP transport error: {message}")]
    Transport { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether the credentials state should ask again instead of failing.
    pub fn is_retryable_login(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::ConnectionFailed { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<mender_setup_api::Error> for CoreError {
    fn from(err: mender_setup_api::Error) -> Self {
        use mender_setup_api::Error as Api;

        match err {
            Api::Authentication { message } => CoreError::InvalidCredentials { message },
            Api::Transport(ref e) if e.is_connect() => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            Api::Transport(e) => CoreError::Transport {
                message: e.to_string(),
            },
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::ClientBuild(message) => CoreError::Config { message },
            Api::UnexpectedStatus { operation, status } => {
                CoreError::UnexpectedStatus { operation, status }
            }
            Api::Deserialization { message, body } => {
                tracing::debug!(body = %body, "unparseable tenant token response");
                CoreError::Protocol { message }
            }
        }
    }
}
