// mender-setup-api: Async client for the hosted Mender management API.
//
// Only the two endpoints the setup wizard needs are covered: the useradm
// login exchange and the tenantadm tenant-token lookup.

pub mod error;
pub mod hosted;
pub mod transport;

pub use error::Error;
pub use hosted::{HOSTED_MENDER_URL, HostedClient};
