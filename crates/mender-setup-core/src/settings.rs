// ── Client settings ──
//
// The resolved result of a wizard run, ready to be merged into the
// client configuration file and the side files around it.

/// Poll intervals in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub update: i64,
    pub inventory: i64,
    pub retry: i64,
}

/// Update control map expirations, written only with demo polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMapExpiration {
    pub expiration: i64,
    pub boot_expiration: i64,
}

/// Local name resolution for a self-hosted demo server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRoute {
    pub ip: String,
    pub server_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub device_type: String,
    pub server_url: String,
    pub server_certificate: Option<String>,
    pub tenant_token: Option<String>,
    pub poll: PollIntervals,
    pub control_map: Option<ControlMapExpiration>,
    /// Present only for a demo server that is not the hosted service.
    pub demo_route: Option<DemoRoute>,
    /// Whether the demo certificate should be added to the local trust store.
    pub install_demo_cert: bool,
}
