//! The setup wizard state machine.
//!
//! Each [`State`] has one handler. A handler adopts the value the flags
//! supplied when it is present and valid, and otherwise prompts until it
//! gets an acceptable answer. Invalid flag values fall through to the
//! prompt; only input errors and fatal credential-check errors end a run
//! early.

pub mod messages;
mod prompt;
mod state;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub use prompt::{Echo, Prompter, prompt_yes_no};
pub use state::State;

use crate::auth::TenantTokenSource;
use crate::error::CoreError;
use crate::options::SetupOptions;
use crate::validate::{IntervalError, Validators, parse_poll_interval};
use crate::{
    DEFAULT_DEVICE_TYPE, DEFAULT_INVENTORY_POLL, DEFAULT_RETRY_POLL, DEFAULT_SERVER_IP,
    DEFAULT_SERVER_URL, DEFAULT_UPDATE_POLL, DEMO_INVENTORY_POLL, DEMO_RETRY_POLL,
    DEMO_UPDATE_POLL, HOSTED_MENDER_URL, MIN_POLL_INTERVAL,
};

/// Values offered when the user accepts a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardDefaults {
    device_type: String,
}

impl WizardDefaults {
    /// An empty device type falls back to `"unknown"`.
    pub fn new(device_type: impl Into<String>) -> Self {
        let device_type = device_type.into();
        let device_type = if device_type.trim().is_empty() {
            DEFAULT_DEVICE_TYPE.to_owned()
        } else {
            device_type
        };
        Self { device_type }
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }
}

/// One run of the setup wizard.
pub struct Wizard<'a, P: ?Sized, A> {
    options: SetupOptions,
    prompter: &'a mut P,
    auth: &'a A,
    validators: &'a Validators,
    defaults: WizardDefaults,
}

impl<'a, P, A> Wizard<'a, P, A>
where
    P: Prompter + ?Sized,
    A: TenantTokenSource,
{
    pub fn new(
        options: SetupOptions,
        prompter: &'a mut P,
        auth: &'a A,
        validators: &'a Validators,
        defaults: WizardDefaults,
    ) -> Self {
        Self {
            options,
            prompter,
            auth,
            validators,
            defaults,
        }
    }

    /// Walk the states from [`State::DeviceType`] to [`State::Done`].
    pub async fn run(mut self) -> Result<SetupOptions, CoreError> {
        let mut state = State::DeviceType;
        loop {
            debug!(%state, "setup state");
            state = match state {
                State::DeviceType => self.device_type()?,
                State::HostedMender => self.hosted_mender()?,
                State::DemoServer => self.demo_server()?,
                State::ServerUrl => self.server_url()?,
                State::ServerIp => self.server_ip()?,
                State::ServerCert => self.server_cert()?,
                State::Credentials => self.credentials().await?,
                State::Polling => self.polling()?,
                State::Done => return Ok(self.options),
            };
        }
    }

    // ── Input helpers ───────────────────────────────────────────────

    fn ask(&mut self, prompt: &str) -> Result<String, CoreError> {
        self.prompter
            .prompt_line(prompt, Echo::On)
            .map_err(CoreError::Input)
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, CoreError> {
        prompt_yes_no(&mut *self.prompter, prompt, true).map_err(CoreError::Input)
    }

    // ── State handlers ──────────────────────────────────────────────

    fn device_type(&mut self) -> Result<State, CoreError> {
        let flagged = self
            .options
            .flags()
            .device_type
            .clone()
            .filter(|d| self.validators.device_type(d));
        if let Some(device_type) = flagged {
            self.options.device_type = device_type;
            return Ok(State::HostedMender);
        }

        let default = self.defaults.device_type.clone();
        let mut answer = self.ask(&messages::device_type(&default))?;
        loop {
            if answer.is_empty() {
                answer.clone_from(&default);
            } else if self.validators.device_type(&answer) {
                break;
            } else {
                answer = self.ask(&messages::invalid_device_type(&answer, &default))?;
            }
        }
        self.options.device_type = answer;
        Ok(State::HostedMender)
    }

    fn hosted_mender(&mut self) -> Result<State, CoreError> {
        let hosted = match self.options.flags().hosted_mender {
            Some(hosted) => hosted,
            None => self.ask_yes_no(messages::HOSTED_MENDER)?,
        };
        self.options.hosted_mender = hosted;

        if hosted {
            self.options.server_url = HOSTED_MENDER_URL.to_owned();
            Ok(State::Credentials)
        } else {
            Ok(State::DemoServer)
        }
    }

    fn demo_server(&mut self) -> Result<State, CoreError> {
        let demo = match self.options.flags().demo_server {
            Some(demo) => demo,
            None => self.ask_yes_no(messages::DEMO_SERVER)?,
        };
        self.options.demo_server = demo;

        Ok(State::after_demo_server(
            self.options.hosted_mender,
            demo,
            self.options.demo_intervals,
        ))
    }

    fn server_url(&mut self) -> Result<State, CoreError> {
        let mut answer = match self.options.flags().server_url.clone() {
            Some(url) => url,
            None => self.ask(&messages::server_url())?,
        };
        loop {
            if answer.is_empty() {
                answer = DEFAULT_SERVER_URL.to_owned();
            }
            if self.validators.url(&answer) {
                break;
            }
            answer = self.ask(messages::INVALID_URL)?;
        }
        self.options.server_url = answer;
        Ok(State::ServerCert)
    }

    fn server_ip(&mut self) -> Result<State, CoreError> {
        if self.options.flags().server_url.is_none() {
            self.options.server_url = DEFAULT_SERVER_URL.to_owned();
        }
        if !self.validators.ip(&self.options.server_ip) {
            let mut answer = self.ask(&messages::server_ip())?;
            loop {
                if answer.is_empty() {
                    answer = DEFAULT_SERVER_IP.to_owned();
                }
                if self.validators.ip(&answer) {
                    break;
                }
                answer = self.ask(messages::INVALID_IP)?;
            }
            self.options.server_ip = answer;
        }

        // The certificate state is skipped here, but a flagged path still
        // has to exist.
        if let Some(cert) = self.options.flags().server_cert.clone() {
            self.options.server_cert = Some(self.existing_cert(cert)?);
        }
        Ok(State::Polling)
    }

    fn server_cert(&mut self) -> Result<State, CoreError> {
        let answer = match self.options.flags().server_cert.clone() {
            Some(cert) => cert,
            None => self.ask(messages::SERVER_CERT)?,
        };
        self.options.server_cert = Some(self.existing_cert(answer)?);
        Ok(State::Polling)
    }

    /// Ask again until `answer` is empty or names an existing file.
    fn existing_cert(&mut self, mut answer: String) -> Result<String, CoreError> {
        while !self.validators.server_cert(&answer) {
            answer = self.ask(&messages::file_not_found(&answer))?;
        }
        Ok(answer)
    }

    async fn credentials(&mut self) -> Result<State, CoreError> {
        if self.options.flags().tenant_token.is_some() {
            return Ok(State::Polling);
        }

        let flags = self.options.flags();
        let flagged = (flags.username.clone(), flags.password.clone());
        let (mut username, mut password) = match flagged {
            (Some(username), Some(password)) if self.validators.email(&username) => {
                (username, password)
            }
            (Some(username), Some(_)) => {
                self.prompter.message(&messages::invalid_email(&username));
                self.ask_credentials()?
            }
            _ => {
                self.prompter.message(messages::CREDENTIALS);
                self.ask_credentials()?
            }
        };

        loop {
            match self.auth.request_tenant_token(&username, &password).await {
                Ok(token) => {
                    self.options.tenant_token = token;
                    return Ok(State::Polling);
                }
                Err(e) if e.is_retryable_login() => {
                    debug!(error = %e, "hosted login not accepted");
                    if matches!(e, CoreError::ConnectionFailed { .. }) {
                        self.prompter.message(&messages::connection_error());
                    } else {
                        self.prompter.message(messages::HOSTED_LOGIN_FAILED);
                    }
                }
                Err(e) => return Err(e),
            }
            (username, password) = self.ask_credentials()?;
        }
    }

    fn ask_credentials(&mut self) -> Result<(String, SecretString), CoreError> {
        let mut username = self.ask(messages::EMAIL)?;
        while !self.validators.email(&username) {
            username = self.ask(&messages::invalid_email(&username))?;
        }

        let mut password = self.ask_password()?;
        while password.expose_secret().is_empty() {
            self.prompter.message(messages::PASSWORD_BLANK);
            password = self.ask_password()?;
        }
        Ok((username, password))
    }

    fn ask_password(&mut self) -> Result<SecretString, CoreError> {
        self.prompter
            .prompt_line(messages::PASSWORD, Echo::Off)
            .map(SecretString::from)
            .map_err(CoreError::Input)
    }

    fn polling(&mut self) -> Result<State, CoreError> {
        let demo = match self.options.flags().demo_polling {
            Some(demo) => demo,
            None => self.ask_yes_no(messages::DEMO_INTERVALS)?,
        };
        self.options.demo_intervals = demo;

        if demo {
            self.options.update_poll = DEMO_UPDATE_POLL;
            self.options.inventory_poll = DEMO_INVENTORY_POLL;
            self.options.retry_poll = DEMO_RETRY_POLL;
        } else {
            let flags = self.options.flags();
            let (update, inventory, retry) =
                (flags.update_poll, flags.inventory_poll, flags.retry_poll);
            self.options.update_poll =
                self.interval(update, messages::UPDATE_POLL, DEFAULT_UPDATE_POLL)?;
            self.options.inventory_poll =
                self.interval(inventory, messages::INVENTORY_POLL, DEFAULT_INVENTORY_POLL)?;
            self.options.retry_poll =
                self.interval(retry, messages::RETRY_POLL, DEFAULT_RETRY_POLL)?;
        }
        Ok(State::Done)
    }

    fn interval(
        &mut self,
        flagged: Option<i64>,
        prompt: &str,
        default: i64,
    ) -> Result<i64, CoreError> {
        if let Some(seconds) = flagged.filter(|s| *s >= MIN_POLL_INTERVAL) {
            return Ok(seconds);
        }

        let mut answer = self.ask(prompt)?;
        loop {
            if answer.is_empty() {
                return Ok(default);
            }
            answer = match parse_poll_interval(&answer) {
                Ok(seconds) => return Ok(seconds),
                Err(IntervalError::NotANumber) => self.ask(messages::NOT_SECONDS)?,
                Err(IntervalError::TooShort(_)) => self.ask(&messages::interval_too_short())?,
            };
        }
    }
}
