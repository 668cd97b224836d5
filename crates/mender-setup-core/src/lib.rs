//! Setup logic for the Mender client configuration wizard.
//!
//! The flow through this crate is linear:
//!
//! - **[`SetupFlags`]** is the immutable snapshot of what the user passed on
//!   the command line. [`SetupFlags::normalize`] resolves implied and
//!   conflicting flags.
//! - **[`SetupOptions`]** is seeded from the normalized flags and owned by a
//!   single [`Wizard`] run, which walks the [`State`] machine and fills in
//!   every answer the flags left open.
//! - **[`ClientSettings`]** is what the finished options translate into, in
//!   the shape the persistence layer writes to disk.
//!
//! Terminal I/O and the hosted credential check sit behind the
//! [`Prompter`] and [`TenantTokenSource`] traits.

pub mod auth;
pub mod error;
pub mod flags;
pub mod options;
pub mod settings;
pub mod validate;
pub mod wizard;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::TenantTokenSource;
pub use error::CoreError;
pub use flags::SetupFlags;
pub use options::SetupOptions;
pub use settings::{ClientSettings, ControlMapExpiration, DemoRoute, PollIntervals};
pub use validate::{IntervalError, Validators};
pub use wizard::{Echo, Prompter, State, Wizard, WizardDefaults};

// ── Defaults ────────────────────────────────────────────────────────
pub use mender_setup_api::HOSTED_MENDER_URL;

pub const DEFAULT_SERVER_URL: &str = "https://docker.mender.io";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1";
pub const DEFAULT_DEVICE_TYPE: &str = "unknown";

pub const MIN_POLL_INTERVAL: i64 = 5;
pub const DEFAULT_UPDATE_POLL: i64 = 1800;
pub const DEFAULT_INVENTORY_POLL: i64 = 28800;
pub const DEFAULT_RETRY_POLL: i64 = 300;

pub const DEMO_UPDATE_POLL: i64 = 5;
pub const DEMO_INVENTORY_POLL: i64 = 5;
pub const DEMO_RETRY_POLL: i64 = 30;
pub const DEMO_CONTROL_MAP_EXPIRATION: i64 = 90;
pub const DEMO_CONTROL_MAP_BOOT_EXPIRATION: i64 = 45;
