#![allow(dead_code)]
// Shared fakes for driving the wizard without a terminal or network.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use secrecy::{ExposeSecret, SecretString};

use mender_setup_core::{
    CoreError, Echo, Prompter, SetupFlags, SetupOptions, TenantTokenSource, Validators, Wizard,
    WizardDefaults,
};

pub const DEMO_CERT: &str = "/usr/share/doc/mender-auth/examples/demo.crt";

// ── Prompter ────────────────────────────────────────────────────────

/// Answers prompts from a fixed script and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub prompts: Vec<(String, Echo)>,
    pub messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_owned()).collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn prompted(&self, needle: &str) -> usize {
        self.prompts.iter().filter(|(p, _)| p.contains(needle)).count()
    }

    pub fn said(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_line(&mut self, prompt: &str, echo: Echo) -> io::Result<String> {
        self.prompts.push((prompt.to_owned(), echo));
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_owned());
    }
}

// ── Credential check ────────────────────────────────────────────────

/// Replays scripted login outcomes and records the credentials tried.
#[derive(Debug, Default)]
pub struct FakeAuth {
    outcomes: RefCell<VecDeque<Result<String, CoreError>>>,
    pub attempts: RefCell<Vec<(String, String)>>,
}

impl FakeAuth {
    pub fn new(outcomes: Vec<Result<String, CoreError>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            attempts: RefCell::default(),
        }
    }

    pub fn accepting(token: &str) -> Self {
        Self::new(vec![Ok(token.to_owned())])
    }

    pub fn usernames(&self) -> Vec<String> {
        self.attempts.borrow().iter().map(|(u, _)| u.clone()).collect()
    }
}

impl TenantTokenSource for FakeAuth {
    async fn request_tenant_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, CoreError> {
        self.attempts
            .borrow_mut()
            .push((username.to_owned(), password.expose_secret().to_owned()));
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CoreError::Config {
                    message: "no scripted login outcome left".into(),
                })
            })
    }
}

pub fn invalid_credentials() -> CoreError {
    CoreError::InvalidCredentials {
        message: "invalid username or password".into(),
    }
}

pub fn connection_failed() -> CoreError {
    CoreError::ConnectionFailed {
        url: "https://hosted.mender.io/api/management/v1/useradm/auth/login".into(),
        reason: "dns error".into(),
    }
}

// ── Runner ──────────────────────────────────────────────────────────

pub async fn run_wizard(
    flags: &SetupFlags,
    prompter: &mut ScriptedPrompter,
    auth: &FakeAuth,
) -> Result<SetupOptions, CoreError> {
    let validators = Validators::new()?;
    let options = SetupOptions::from_flags(flags)?;
    Wizard::new(
        options,
        prompter,
        auth,
        &validators,
        WizardDefaults::new("qemux86-64"),
    )
    .run()
    .await
}

/// Flags that answer everything except what a test wants to exercise.
pub fn self_hosted_flags() -> SetupFlags {
    SetupFlags {
        device_type: Some("x1".into()),
        server_url: Some("https://acme.io".into()),
        server_cert: Some(String::new()),
        update_poll: Some(60),
        inventory_poll: Some(600),
        retry_poll: Some(30),
        ..Default::default()
    }
}

pub fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_owned())
}
