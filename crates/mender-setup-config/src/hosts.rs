// Local name resolution for a demo server reached by IP address.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use tracing::debug;
use url::Url;

use crate::{ConfigError, io_error};

/// Route the server host and its `s3.` sibling to `ip` in the hosts file.
///
/// Nothing is written when the host already appears in the file. Returns
/// whether a line was appended.
pub fn add_demo_route(hosts_file: &Path, ip: &str, server_url: &str) -> Result<bool, ConfigError> {
    let url = Url::parse(server_url).map_err(|e| ConfigError::InvalidUrl {
        url: server_url.to_owned(),
        source: Some(e),
    })?;
    let host = url.host_str().ok_or_else(|| ConfigError::InvalidUrl {
        url: server_url.to_owned(),
        source: None,
    })?;
    // The hosts file has no port column.
    let address = ip.split(':').next().unwrap_or(ip);

    let contents = std::fs::read_to_string(hosts_file).map_err(io_error("read", hosts_file))?;
    if contents.lines().any(|line| line.contains(host)) {
        debug!(host, "hosts file already routes the server");
        return Ok(false);
    }

    let mut line = format!("{address:<15} {host} s3.{host}\n");
    if !contents.is_empty() && !contents.ends_with('\n') {
        line.insert(0, '\n');
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(hosts_file)
        .map_err(io_error("open", hosts_file))?;
    file.write_all(line.as_bytes())
        .map_err(io_error("append route to", hosts_file))?;

    debug!(host, address, "added demo server route");
    Ok(true)
}
