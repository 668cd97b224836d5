use std::io;
use std::path::Path;

use tracing::debug;

use crate::{ConfigError, io_error};

/// Make sure `dir` exists and the current user can create entries in it.
///
/// Runs before any question is asked, so a missing permission fails the
/// setup up front instead of after the last answer.
pub fn check_write_permissions(dir: &Path) -> Result<(), ConfigError> {
    debug!(dir = %dir.display(), "checking write permissions");

    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(io_error("create directory", dir))?;
    }

    let probe = tempfile::Builder::new()
        .prefix(".mender-setup-")
        .tempdir_in(dir)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::PermissionDenied {
                ConfigError::NotWritable {
                    path: dir.to_path_buf(),
                    source,
                }
            } else {
                ConfigError::Io {
                    action: "check write permissions of",
                    path: dir.to_path_buf(),
                    source,
                }
            }
        })?;
    probe
        .close()
        .map_err(io_error("remove probe directory in", dir))
}
