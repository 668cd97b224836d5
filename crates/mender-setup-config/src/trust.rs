// Demo certificate installation into the local trust store.
//
// The demo certificate bundle is split into one file per PEM block so
// that `update-ca-certificates` picks each of them up.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fsutil::create_with_mode;
use crate::{ConfigError, io_error};

const PEM_END_MARKER: &str = "END CERTIFICATE";

/// Copy every certificate in `bundle` to `mender-demo-<n>.crt` inside
/// `trust_dir`, creating the directory if needed.
///
/// Existing files are never overwritten. Returns the files written.
pub fn install_demo_certificates(bundle: &Path, trust_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let contents = std::fs::read_to_string(bundle).map_err(io_error("read", bundle))?;
    std::fs::create_dir_all(trust_dir).map_err(io_error("create directory", trust_dir))?;

    let mut blocks = Vec::new();
    let mut current = String::new();
    for line in contents.split_inclusive('\n') {
        current.push_str(line);
        if line.contains(PEM_END_MARKER) {
            blocks.push(std::mem::take(&mut current));
        }
    }
    if !current.trim().is_empty() {
        blocks.push(current);
    }

    let mut written = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let path = trust_dir.join(format!("mender-demo-{}.crt", index + 1));
        let mut file = create_with_mode(&path, 0o444, true).map_err(io_error("create", &path))?;
        file.write_all(block.as_bytes()).map_err(io_error("write", &path))?;
        file.sync_all().map_err(io_error("sync", &path))?;
        debug!(path = %path.display(), "installed demo certificate");
        written.push(path);
    }

    Ok(written)
}
