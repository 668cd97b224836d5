// ── Option model ──
//
// Every answer collected so far. Seeded from the normalized flags,
// mutated by the wizard, and consumed once by `finalize`.

use tracing::debug;

use crate::error::CoreError;
use crate::flags::SetupFlags;
use crate::settings::{ClientSettings, ControlMapExpiration, DemoRoute, PollIntervals};
use crate::validate::Validators;
use crate::{
    DEFAULT_INVENTORY_POLL, DEFAULT_RETRY_POLL, DEFAULT_SERVER_URL, DEFAULT_UPDATE_POLL,
    DEMO_CONTROL_MAP_BOOT_EXPIRATION, DEMO_CONTROL_MAP_EXPIRATION, DEMO_INVENTORY_POLL,
    DEMO_RETRY_POLL, DEMO_UPDATE_POLL, HOSTED_MENDER_URL, MIN_POLL_INTERVAL,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SetupOptions {
    flags: SetupFlags,
    pub device_type: String,
    pub hosted_mender: bool,
    pub demo_server: bool,
    pub demo_intervals: bool,
    pub server_url: String,
    pub server_ip: String,
    /// `None` until a certificate answer exists; `Some("")` means none.
    pub server_cert: Option<String>,
    pub tenant_token: String,
    pub update_poll: i64,
    pub inventory_poll: i64,
    pub retry_poll: i64,
}

impl SetupOptions {
    /// Normalize `flags` and seed the option model from the result.
    pub fn from_flags(flags: &SetupFlags) -> Result<Self, CoreError> {
        let flags = flags.normalize()?;
        debug!(?flags, "normalized setup flags");

        Ok(Self {
            device_type: flags.device_type.clone().unwrap_or_default(),
            hosted_mender: flags.hosted_mender.unwrap_or(false),
            demo_server: flags.demo_server.unwrap_or(false),
            demo_intervals: flags.demo_polling.unwrap_or(false),
            server_url: flags
                .server_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned()),
            server_ip: flags.server_ip.clone().unwrap_or_default(),
            server_cert: flags.server_cert.clone(),
            tenant_token: flags.tenant_token.clone().unwrap_or_default(),
            update_poll: flags.update_poll.unwrap_or(DEFAULT_UPDATE_POLL),
            inventory_poll: flags.inventory_poll.unwrap_or(DEFAULT_INVENTORY_POLL),
            retry_poll: flags.retry_poll.unwrap_or(DEFAULT_RETRY_POLL),
            flags,
        })
    }

    /// The normalized flag snapshot these options were seeded from.
    pub fn flags(&self) -> &SetupFlags {
        &self.flags
    }

    fn demo_self_hosted(&self) -> bool {
        self.demo_server && !self.hosted_mender
    }

    /// Translate the finished answers into client settings.
    ///
    /// `demo_cert` is the certificate shipped for the demo server; it is
    /// used whenever a self-hosted demo server is configured without an
    /// explicit certificate.
    pub fn finalize(
        self,
        validators: &Validators,
        demo_cert: &str,
    ) -> Result<ClientSettings, CoreError> {
        if !validators.device_type(&self.device_type) {
            return Err(CoreError::Validation {
                field: "device type",
                reason: format!(
                    "{:?} must be non-empty and contain only letters, digits, '-' or '_'",
                    self.device_type
                ),
            });
        }

        let (poll, control_map) = if self.demo_intervals {
            (
                PollIntervals {
                    update: DEMO_UPDATE_POLL,
                    inventory: DEMO_INVENTORY_POLL,
                    retry: DEMO_RETRY_POLL,
                },
                Some(ControlMapExpiration {
                    expiration: DEMO_CONTROL_MAP_EXPIRATION,
                    boot_expiration: DEMO_CONTROL_MAP_BOOT_EXPIRATION,
                }),
            )
        } else {
            for (field, value) in [
                ("update poll interval", self.update_poll),
                ("inventory poll interval", self.inventory_poll),
                ("retry poll interval", self.retry_poll),
            ] {
                if value < MIN_POLL_INTERVAL {
                    return Err(CoreError::Validation {
                        field,
                        reason: format!("{value} is below the {MIN_POLL_INTERVAL} second minimum"),
                    });
                }
            }
            (
                PollIntervals {
                    update: self.update_poll,
                    inventory: self.inventory_poll,
                    retry: self.retry_poll,
                },
                None,
            )
        };

        let explicit_cert = self.server_cert.clone().filter(|c| !c.is_empty());
        let server_certificate = if self.hosted_mender {
            None
        } else if self.demo_server {
            Some(explicit_cert.unwrap_or_else(|| demo_cert.to_owned()))
        } else {
            explicit_cert
        };

        let install_demo_cert =
            self.demo_server && server_certificate.as_deref() == Some(demo_cert);

        let demo_route = self.demo_self_hosted().then(|| DemoRoute {
            ip: self.server_ip.clone(),
            server_url: self.server_url.clone(),
        });

        let server_url = if self.hosted_mender {
            HOSTED_MENDER_URL.to_owned()
        } else {
            self.server_url
        };

        Ok(ClientSettings {
            device_type: self.device_type,
            server_url,
            server_certificate,
            tenant_token: Some(self.tenant_token).filter(|t| !t.is_empty()),
            poll,
            control_map,
            demo_route,
            install_demo_cert,
        })
    }
}
