// Builds the reqwest::Client used against the hosted service.
//
// Requests carry no timeout: a hung connection blocks the wizard, the same
// as a hung terminal does.

use crate::error::Error;

const USER_AGENT: &str = concat!("mender-setup/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by both hosted requests.
pub fn build_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::ClientBuild(e.to_string()))
}
