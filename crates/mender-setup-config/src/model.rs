// ── mender.conf model ──
//
// Field names and order follow the JSON keys the Mender client reads.
// Empty strings, zero numbers, false flags, empty lists and all-default
// sections are left out when writing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use mender_setup_core::ClientSettings;

use crate::paths::Paths;

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Client-side mTLS settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HttpsClient {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub certificate: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "SSLEngine", skip_serializing_if = "String::is_empty")]
    pub ssl_engine: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Security {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_private_key: String,
    #[serde(rename = "SSLEngine", skip_serializing_if = "String::is_empty")]
    pub ssl_engine: String,
}

/// Keep-alive and idle-connection handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Connectivity {
    #[serde(skip_serializing_if = "is_false")]
    pub disable_keep_alive: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub idle_conn_timeout_seconds: i64,
}

/// One entry of the `Servers` fail-over list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenderServer {
    #[serde(rename = "ServerURL")]
    pub server_url: String,
}

macro_rules! is_default {
    ($ty:ty) => {
        impl $ty {
            pub fn is_empty(&self) -> bool {
                *self == Self::default()
            }
        }
    };
}

is_default!(HttpsClient);
is_default!(Security);
is_default!(Connectivity);

/// The contents of `mender.conf`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MenderConfig {
    /// Only one of `ArtifactVerifyKey` and `ArtifactVerifyKeys` may be set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artifact_verify_key: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifact_verify_keys: Vec<String>,

    #[serde(skip_serializing_if = "HttpsClient::is_empty")]
    pub https_client: HttpsClient,
    #[serde(skip_serializing_if = "Security::is_empty")]
    pub security: Security,
    #[serde(skip_serializing_if = "Connectivity::is_empty")]
    pub connectivity: Connectivity,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub rootfs_part_a: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rootfs_part_b: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub boot_utilities_set_active_part: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub boot_utilities_get_next_active_part: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_type_file: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub update_control_map_expiration_time_seconds: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub update_control_map_boot_expiration_time_seconds: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub update_poll_interval_seconds: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub inventory_poll_interval_seconds: i64,

    #[serde(skip_serializing_if = "is_false")]
    pub skip_verify: bool,

    #[serde(skip_serializing_if = "is_zero")]
    pub retry_poll_interval_seconds: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub retry_poll_count: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub state_script_timeout_seconds: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub state_script_retry_timeout_seconds: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub state_script_retry_interval_seconds: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub module_timeout_seconds: i64,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_certificate: String,
    /// Legacy single-server URL, superseded by `Servers`.
    #[serde(rename = "ServerURL", skip_serializing_if = "String::is_empty")]
    pub server_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub update_log_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tenant_token: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<MenderServer>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub daemon_log_level: String,
}

impl MenderConfig {
    /// Merge the result of a setup run into this configuration.
    ///
    /// Returns the path of the device type file, which defaults to
    /// `device_type` inside `data_store` when the configuration names none.
    pub fn apply_settings(&mut self, settings: &ClientSettings, data_store: &Path) -> PathBuf {
        self.update_poll_interval_seconds = settings.poll.update;
        self.inventory_poll_interval_seconds = settings.poll.inventory;
        self.retry_poll_interval_seconds = settings.poll.retry;
        if let Some(control_map) = settings.control_map {
            self.update_control_map_expiration_time_seconds = control_map.expiration;
            self.update_control_map_boot_expiration_time_seconds = control_map.boot_expiration;
        }

        self.server_certificate = settings.server_certificate.clone().unwrap_or_default();
        self.tenant_token = settings.tenant_token.clone().unwrap_or_default();

        if self.device_type_file.is_empty() {
            self.device_type_file = Paths::device_type_file(data_store)
                .to_string_lossy()
                .into_owned();
        }

        self.servers = vec![MenderServer {
            server_url: settings.server_url.clone(),
        }];
        self.server_url.clear();

        PathBuf::from(&self.device_type_file)
    }
}
