// ── Default on-device paths ──

use std::path::{Path, PathBuf};

const CONF_DIR_ENV: &str = "MENDER_CONF_DIR";
const DATA_STORE_ENV: &str = "MENDER_DATASTORE_DIR";

const DEFAULT_CONF_DIR: &str = "/etc/mender";
const DEFAULT_DATA_STORE: &str = "/var/lib/mender";

const CONFIG_FILE_NAME: &str = "mender.conf";

/// Filesystem locations used by a setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Configuration directory holding `mender.conf`.
    pub conf_dir: PathBuf,
    /// Persistent state directory (device type file, etc.)
    pub data_store: PathBuf,
    /// Self-signed certificate of the demo server.
    pub demo_cert: PathBuf,
    /// Directory that receives the split demo certificates.
    pub local_trust_dir: PathBuf,
    pub hosts_file: PathBuf,
    pub hostname_file: PathBuf,
}

impl Paths {
    /// Resolve paths from the `MENDER_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_env(|key| std::env::var(key).ok())
    }

    /// Resolve paths with a custom variable lookup. Empty values count
    /// as unset.
    pub fn with_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map_or_else(|| PathBuf::from(default), PathBuf::from)
        };

        Self {
            conf_dir: dir(CONF_DIR_ENV, DEFAULT_CONF_DIR),
            data_store: dir(DATA_STORE_ENV, DEFAULT_DATA_STORE),
            demo_cert: PathBuf::from("/usr/share/doc/mender-auth/examples/demo.crt"),
            local_trust_dir: PathBuf::from("/usr/local/share/ca-certificates/mender"),
            hosts_file: PathBuf::from("/etc/hosts"),
            hostname_file: PathBuf::from("/etc/hostname"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.conf_dir.join(CONFIG_FILE_NAME)
    }

    /// Device manifest inside a data store directory.
    pub fn device_type_file(data_store: &Path) -> PathBuf {
        data_store.join("device_type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let paths = Paths::with_env(|_| None);
        assert_eq!(paths.config_file(), PathBuf::from("/etc/mender/mender.conf"));
        assert_eq!(paths.data_store, PathBuf::from("/var/lib/mender"));
    }

    #[test]
    fn env_overrides() {
        let paths = Paths::with_env(|key| match key {
            "MENDER_CONF_DIR" => Some("/tmp/conf".into()),
            "MENDER_DATASTORE_DIR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/conf/mender.conf"));
        assert_eq!(paths.data_store, PathBuf::from("/var/lib/mender"));
    }
}
