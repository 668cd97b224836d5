// ── Loading and saving mender.conf ──

use std::io::Write as _;
use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Json, Serialized};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::fsutil::create_with_mode;
use crate::model::MenderConfig;
use crate::{ConfigError, io_error};

const CONTROL_MAP_BOOT_EXPIRATION_DEFAULT: i64 = 600;

/// Load the configuration from the fallback file, then the main file.
///
/// Either file may be missing. Fields present in the main file override
/// the same fields from the fallback file. A single `ArtifactVerifyKey`
/// is folded into `ArtifactVerifyKeys`; setting both is an error.
pub fn load_config(main: &Path, fallback: Option<&Path>) -> Result<MenderConfig, ConfigError> {
    let mut config = MenderConfig::default();
    let mut loaded = 0_usize;

    for path in fallback.into_iter().chain([main]) {
        if !path.exists() {
            debug!(path = %path.display(), "configuration file does not exist");
            continue;
        }

        debug!(path = %path.display(), "reading Mender configuration");
        let merged: MenderConfig = Figment::from(Serialized::defaults(&config))
            .merge(Json::file(path))
            .extract()
            .map_err(|e| ConfigError::Load {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        config = merged;

        if !config.artifact_verify_key.is_empty() {
            if !config.artifact_verify_keys.is_empty() {
                return Err(ConfigError::ConflictingVerifyKeys {
                    path: path.to_path_buf(),
                });
            }
            let key = std::mem::take(&mut config.artifact_verify_key);
            config.artifact_verify_keys.push(key);
        }

        loaded += 1;
        info!(path = %path.display(), "loaded configuration file");
    }

    debug!("loaded {loaded} configuration file(s)");
    log_control_map_defaults(&config);
    if loaded == 0 {
        info!("no configuration files present, using defaults");
    }

    Ok(config)
}

fn log_control_map_defaults(config: &MenderConfig) {
    if config.update_control_map_expiration_time_seconds == 0 {
        info!(
            "UpdateControlMapExpirationTimeSeconds is not set, \
             the client falls back to 2*UpdatePollIntervalSeconds"
        );
    }
    if config.update_control_map_boot_expiration_time_seconds == 0 {
        info!(
            "UpdateControlMapBootExpirationTimeSeconds is not set, \
             the client falls back to {CONTROL_MAP_BOOT_EXPIRATION_DEFAULT} seconds"
        );
    }
}

/// Write the configuration as 4-space indented JSON, readable by the
/// owner only.
pub fn save_config(config: &MenderConfig, path: &Path) -> Result<(), ConfigError> {
    let mut json = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
    config.serialize(&mut serializer)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }

    let mut file = create_with_mode(path, 0o600, false).map_err(io_error("open", path))?;
    file.write_all(&json).map_err(io_error("write", path))?;
    debug!(path = %path.display(), "saved configuration");
    Ok(())
}
