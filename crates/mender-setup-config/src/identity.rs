// Device identity file: the device type the client reports.

use std::path::Path;

use tracing::{debug, warn};

use mender_setup_core::DEFAULT_DEVICE_TYPE;

use crate::manifest::read_manifest_value;
use crate::{ConfigError, io_error};

const DEVICE_TYPE_KEY: &str = "device_type";

/// Write `device_type=<value>` to the identity file.
pub fn write_device_type(path: &Path, device_type: &str) -> Result<(), ConfigError> {
    std::fs::write(path, format!("{DEVICE_TYPE_KEY}={device_type}\n"))
        .map_err(io_error("write device type file", path))?;
    debug!(path = %path.display(), device_type, "wrote device type");
    Ok(())
}

/// Device type offered as the default answer.
///
/// Taken from the existing identity file, then the host name, then
/// `"unknown"`.
pub fn default_device_type(device_type_file: &Path, hostname_file: &Path) -> String {
    match read_manifest_value(device_type_file, DEVICE_TYPE_KEY) {
        Ok(Some(device_type)) if !device_type.is_empty() => return device_type,
        Ok(_) => debug!("no device type in {}", device_type_file.display()),
        Err(ConfigError::Io { .. }) => {
            debug!("no device type file at {}", device_type_file.display());
        }
        Err(e) => warn!("ignoring device type file: {e}"),
    }

    match std::fs::read_to_string(hostname_file) {
        Ok(hostname) => {
            let hostname = hostname.trim_end_matches('\n');
            if hostname.is_empty() {
                DEFAULT_DEVICE_TYPE.to_owned()
            } else {
                hostname.to_owned()
            }
        }
        Err(_) => DEFAULT_DEVICE_TYPE.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn writes_identity_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device_type");
        write_device_type(&path, "rpi3").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "device_type=rpi3\n");
    }

    #[test]
    fn default_prefers_existing_identity() {
        let dir = tempfile::tempdir().unwrap();
        let identity = dir.path().join("device_type");
        let hostname = dir.path().join("hostname");
        std::fs::write(&identity, "device_type=beaglebone\n").unwrap();
        std::fs::write(&hostname, "myhost\n").unwrap();
        assert_eq!(default_device_type(&identity, &hostname), "beaglebone");
    }

    #[test]
    fn default_falls_back_to_hostname() {
        let dir = tempfile::tempdir().unwrap();
        let hostname = dir.path().join("hostname");
        std::fs::write(&hostname, "myhost\n").unwrap();
        assert_eq!(
            default_device_type(&dir.path().join("device_type"), &hostname),
            "myhost"
        );
    }

    #[test]
    fn broken_identity_falls_back_to_hostname() {
        let dir = tempfile::tempdir().unwrap();
        let identity = dir.path().join("device_type");
        let hostname = dir.path().join("hostname");
        std::fs::write(&identity, "garbage\n").unwrap();
        std::fs::write(&hostname, "myhost\n").unwrap();
        assert_eq!(default_device_type(&identity, &hostname), "myhost");
    }

    #[test]
    fn default_is_unknown_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            default_device_type(&dir.path().join("device_type"), &dir.path().join("hostname")),
            "unknown"
        );
    }
}
