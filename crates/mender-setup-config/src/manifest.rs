// Device manifest reader.
//
// The manifest is a list of `key=value` lines as written by the build
// system. Lines starting with `#` are comments; blank lines are skipped.

use std::path::Path;

use tracing::debug;

use crate::{ConfigError, io_error};

/// Look up `key` in the manifest at `path`.
///
/// Returns `Ok(None)` when the key is absent. A line without `=` or a
/// key that appears twice makes the whole manifest invalid.
pub fn read_manifest_value(path: &Path, key: &str) -> Result<Option<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(io_error("read", path))?;
    debug!(path = %path.display(), "reading device manifest");

    let mut found = None;
    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, value)) = line.split_once('=') else {
            return Err(ConfigError::BrokenManifest {
                path: path.to_path_buf(),
                line: line.to_owned(),
            });
        };

        if name == key {
            if found.is_some() {
                return Err(ConfigError::DuplicateManifestKey {
                    key: key.to_owned(),
                    path: path.to_path_buf(),
                });
            }
            found = Some(value.trim().to_owned());
        }
    }

    Ok(found)
}
