//! Mender client configuration for `mender-setup`.
//!
//! The `mender.conf` JSON model with its fallback/main loading rules, the
//! default on-device paths, and the small side files a setup run touches:
//! the device manifest and identity file, the hosts-file route for a demo
//! server, and the demo certificate trust store entries.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

mod fsutil;
pub mod hosts;
pub mod identity;
pub mod load;
pub mod manifest;
pub mod model;
pub mod paths;
pub mod permissions;
pub mod trust;

pub use hosts::add_demo_route;
pub use identity::{default_device_type, write_device_type};
pub use load::{load_config, save_config};
pub use manifest::read_manifest_value;
pub use model::{Connectivity, HttpsClient, MenderConfig, MenderServer, Security};
pub use paths::Paths;
pub use permissions::check_write_permissions;
pub use trust::install_demo_certificates;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration from {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("both ArtifactVerifyKey and ArtifactVerifyKeys are set in {}", .path.display())]
    ConflictingVerifyKeys { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("broken device manifest file {}: {line:?}", .path.display())]
    BrokenManifest { path: PathBuf, line: String },

    #[error("more than one instance of {key} found in manifest file {}", .path.display())]
    DuplicateManifestKey { key: String, path: PathBuf },

    #[error("invalid server URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: Option<url::ParseError>,
    },

    #[error("no permission to write to directory {}", .path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub(crate) fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> ConfigError {
    let path = path.to_path_buf();
    move |source| ConfigError::Io {
        action,
        path,
        source,
    }
}
