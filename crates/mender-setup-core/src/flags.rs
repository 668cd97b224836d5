// ── Command-line flag snapshot ──
//
// What the user supplied on the command line, before any prompting.
// `Some` means "given on the command line" and gates whether the wizard
// asks for that value; an explicit `Some(false)` is distinct from `None`.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::DEFAULT_SERVER_URL;
use crate::error::CoreError;

/// Immutable snapshot of the setup flags.
#[derive(Clone, Default)]
pub struct SetupFlags {
    pub device_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub server_url: Option<String>,
    pub server_ip: Option<String>,
    /// `Some("")` explicitly requests "no certificate".
    pub server_cert: Option<String>,
    pub tenant_token: Option<String>,
    pub update_poll: Option<i64>,
    pub inventory_poll: Option<i64>,
    pub retry_poll: Option<i64>,
    pub hosted_mender: Option<bool>,
    pub demo_server: Option<bool>,
    pub demo_polling: Option<bool>,
    /// Deprecated shorthand for `demo_server` plus `demo_polling`.
    pub demo: bool,
}

impl SetupFlags {
    fn any_poll_interval(&self) -> bool {
        self.update_poll.is_some() || self.inventory_poll.is_some() || self.retry_poll.is_some()
    }

    /// Resolve implied flags and reject contradictory ones.
    ///
    /// Returns a new snapshot; normalizing an already normalized snapshot
    /// yields an equal value.
    pub fn normalize(&self) -> Result<Self, CoreError> {
        if self.server_url.is_some() && self.server_ip.is_some() {
            return Err(CoreError::ConflictingArguments {
                first: "server-url",
                second: "server-ip",
            });
        }

        let mut flags = self.clone();

        if flags.demo {
            debug!("--demo implies --demo-server and --demo-polling");
            flags.demo_server = Some(true);
            flags.demo_polling = Some(true);
            flags.demo = false;
        }

        if flags.any_poll_interval() {
            flags.demo_polling = Some(false);
        }

        if flags.server_ip.is_some() {
            flags.demo_server = Some(true);
            flags.hosted_mender = Some(false);
        } else if let Some(url) = flags.server_url.as_deref() {
            if url != DEFAULT_SERVER_URL {
                flags.demo_server = Some(false);
            }
            flags.hosted_mender = Some(false);
        }

        Ok(flags)
    }
}

impl PartialEq for SetupFlags {
    fn eq(&self, other: &Self) -> bool {
        let same_password = match (&self.password, &other.password) {
            (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
            (None, None) => true,
            _ => false,
        };
        same_password
            && self.device_type == other.device_type
            && self.username == other.username
            && self.server_url == other.server_url
            && self.server_ip == other.server_ip
            && self.server_cert == other.server_cert
            && self.tenant_token == other.tenant_token
            && self.update_poll == other.update_poll
            && self.inventory_poll == other.inventory_poll
            && self.retry_poll == other.retry_poll
            && self.hosted_mender == other.hosted_mender
            && self.demo_server == other.demo_server
            && self.demo_polling == other.demo_polling
            && self.demo == other.demo
    }
}

impl fmt::Debug for SetupFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupFlags")
            .field("device_type", &self.device_type)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("server_url", &self.server_url)
            .field("server_ip", &self.server_ip)
            .field("server_cert", &self.server_cert)
            .field("tenant_token", &self.tenant_token.as_ref().map(|_| "[REDACTED]"))
            .field("update_poll", &self.update_poll)
            .field("inventory_poll", &self.inventory_poll)
            .field("retry_poll", &self.retry_poll)
            .field("hosted_mender", &self.hosted_mender)
            .field("demo_server", &self.demo_server)
            .field("demo_polling", &self.demo_polling)
            .field("demo", &self.demo)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn url_and_ip_conflict() {
        let flags = SetupFlags {
            server_url: Some("https://acme.io".into()),
            server_ip: Some("10.0.0.1".into()),
            ..Default::default()
        };
        let err = flags.normalize().unwrap_err();
        assert!(matches!(
            err,
            CoreError::ConflictingArguments {
                first: "server-url",
                second: "server-ip"
            }
        ));
    }

    #[test]
    fn demo_expands_and_is_consumed() {
        let flags = SetupFlags {
            demo: true,
            demo_server: Some(false),
            ..Default::default()
        };
        let normalized = flags.normalize().unwrap();
        assert!(!normalized.demo);
        assert_eq!(normalized.demo_server, Some(true));
        assert_eq!(normalized.demo_polling, Some(true));
    }

    #[test]
    fn poll_flag_disables_demo_polling() {
        let flags = SetupFlags {
            demo: true,
            retry_poll: Some(60),
            ..Default::default()
        };
        let normalized = flags.normalize().unwrap();
        assert_eq!(normalized.demo_polling, Some(false));
        assert_eq!(normalized.demo_server, Some(true));
        assert_eq!(normalized.retry_poll, Some(60));
    }

    #[test]
    fn server_ip_forces_demo_server() {
        let flags = SetupFlags {
            server_ip: Some("192.168.1.10".into()),
            hosted_mender: Some(true),
            demo_server: Some(false),
            ..Default::default()
        };
        let normalized = flags.normalize().unwrap();
        assert_eq!(normalized.hosted_mender, Some(false));
        assert_eq!(normalized.demo_server, Some(true));
    }

    #[test]
    fn custom_url_disables_demo_server() {
        let flags = SetupFlags {
            server_url: Some("https://acme.io".into()),
            ..Default::default()
        };
        let normalized = flags.normalize().unwrap();
        assert_eq!(normalized.hosted_mender, Some(false));
        assert_eq!(normalized.demo_server, Some(false));
    }

    #[test]
    fn default_url_leaves_demo_server_open() {
        let flags = SetupFlags {
            server_url: Some(DEFAULT_SERVER_URL.into()),
            ..Default::default()
        };
        let normalized = flags.normalize().unwrap();
        assert_eq!(normalized.hosted_mender, Some(false));
        assert_eq!(normalized.demo_server, None);
    }

    #[test]
    fn normalize_is_idempotent() {
        let flags = SetupFlags {
            demo: true,
            update_poll: Some(10),
            server_url: Some("https://acme.io".into()),
            password: Some(SecretString::from("pw".to_owned())),
            ..Default::default()
        };
        let once = flags.normalize().unwrap();
        let twice = once.normalize().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn debug_redacts_secrets() {
        let flags = SetupFlags {
            password: Some(SecretString::from("hunter22".to_owned())),
            tenant_token: Some("tt-secret".into()),
            ..Default::default()
        };
        let rendered = format!("{flags:?}");
        assert!(!rendered.contains("hunter22"));
        assert!(!rendered.contains("tt-secret"));
    }
}
