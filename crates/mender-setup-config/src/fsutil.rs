use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Open `path` for writing with the given permission bits.
///
/// An existing file opened without `exclusive` is truncated and has its
/// permissions reset to `mode`.
pub(crate) fn create_with_mode(path: &Path, mode: u32, exclusive: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if exclusive {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if !exclusive {
            file.set_permissions(std::fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(file)
}
