//! Clap derive structures for the `mender-setup` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mender-setup -- create a working Mender client configuration
#[derive(Debug, Parser)]
#[command(
    name = "mender-setup",
    version,
    about = "Run to create a working mender-configuration file",
    long_about = "Create a working Mender client configuration.\n\n\
        Every setting can be given as a flag; anything left open is asked\n\
        for interactively."
)]
pub struct Cli {
    /// PATH to configuration file [default: $MENDER_CONF_DIR/mender.conf]
    #[arg(long, short = 'c', value_name = "PATH", value_parser = non_empty_path)]
    pub config: Option<PathBuf>,

    /// PATH to a configuration file loaded before the main one
    #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
    pub fallback_config: Option<PathBuf>,

    /// Mender state data DIRECTORY path [default: $MENDER_DATASTORE_DIR]
    #[arg(long, short = 'd', value_name = "DIR", value_parser = non_empty_path)]
    pub data: Option<PathBuf>,

    #[command(flatten)]
    pub setup: SetupArgs,

    /// Suppress informative prompts
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Set logging level
    #[arg(long, short = 'l', value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

// ── Setup Answers ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Name of the device type
    #[arg(long, value_name = "TYPE", value_parser = non_empty)]
    pub device_type: Option<String>,

    /// User E-Mail at hosted.mender.io
    #[arg(long, value_name = "E-MAIL", value_parser = non_empty)]
    pub username: Option<String>,

    /// User PASSWORD at hosted.mender.io
    #[arg(long, value_name = "PASSWORD", value_parser = non_empty)]
    pub password: Option<String>,

    /// URL to Mender server
    #[arg(long, visible_alias = "url", value_name = "URL", value_parser = non_empty)]
    pub server_url: Option<String>,

    /// Server ip address
    #[arg(long, value_name = "IP", value_parser = non_empty)]
    pub server_ip: Option<String>,

    /// PATH to trusted server certificates (empty for none)
    #[arg(long, short = 'E', value_name = "PATH", allow_hyphen_values = true)]
    pub server_cert: Option<String>,

    /// Hosted Mender tenant token
    #[arg(long, value_name = "TOKEN", value_parser = non_empty)]
    pub tenant_token: Option<String>,

    /// Inventory poll interval in seconds
    #[arg(long, value_name = "SEC", allow_negative_numbers = true)]
    pub inventory_poll: Option<i64>,

    /// Retry poll interval in seconds
    #[arg(long, value_name = "SEC", allow_negative_numbers = true)]
    pub retry_poll: Option<i64>,

    /// Update poll interval in seconds
    #[arg(long, value_name = "SEC", allow_negative_numbers = true)]
    pub update_poll: Option<i64>,

    /// Setup device towards Hosted Mender
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub hosted_mender: Option<bool>,

    /// Use demo configuration. DEPRECATED: use --demo-server and/or --demo-polling instead
    #[arg(long)]
    pub demo: bool,

    /// Use demo server configuration
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub demo_server: Option<bool>,

    /// Use demo polling intervals
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub demo_polling: Option<bool>,
}

// ── Logging ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Reject empty values and values that look like another flag.
fn non_empty(value: &str) -> Result<String, String> {
    if value.is_empty() || value.starts_with('-') {
        return Err("requires a non-empty value".into());
    }
    Ok(value.to_owned())
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    non_empty(value).map(PathBuf::from)
}
