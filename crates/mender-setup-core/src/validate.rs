// ── Answer validators ──
//
// Pure predicates over user-supplied strings. The patterns are compiled
// once per run; a pattern that fails to compile is a fatal error rather
// than a silently permissive validator.

use std::path::Path;

use regex::Regex;

use crate::MIN_POLL_INTERVAL;
use crate::error::CoreError;

const DEVICE_TYPE_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

// Unanchored: the answer only has to contain a URL.
const URL_PATTERN: &str = r"(http|https)://(\w+:{0,1}\w*@)?(\S+)(:[0-9]+)?((/\S+?/)*)(/|/([\w#!:.?+=&%@!\-/]))?";

const IP_PATTERN: &str = r"^([0-9]{1,3}\.){3}[0-9]{1,3}(:[0-9]{1,5})?$";

// RFC 5322, lowercase only, unanchored.
const EMAIL_PATTERN: &str = r#"(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#;

/// Why a typed poll interval was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    #[error("not an integer number")]
    NotANumber,
    #[error("polling interval of {0} seconds is too short")]
    TooShort(i64),
}

/// Compiled validation patterns.
#[derive(Debug, Clone)]
pub struct Validators {
    device_type: Regex,
    url: Regex,
    ip: Regex,
    email: Regex,
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|source| CoreError::Pattern { name, source })
}

impl Validators {
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            device_type: compile("device type", DEVICE_TYPE_PATTERN)?,
            url: compile("server URL", URL_PATTERN)?,
            ip: compile("server IP", IP_PATTERN)?,
            email: compile("email", EMAIL_PATTERN)?,
        })
    }

    /// Letters, digits, `-` and `_` only; never empty.
    pub fn device_type(&self, value: &str) -> bool {
        self.device_type.is_match(value)
    }

    pub fn url(&self, value: &str) -> bool {
        self.url.is_match(value)
    }

    /// Dotted quad with an optional port.
    pub fn ip(&self, value: &str) -> bool {
        self.ip.is_match(value)
    }

    pub fn email(&self, value: &str) -> bool {
        self.email.is_match(value)
    }

    /// An empty path means "no certificate" and is always accepted.
    pub fn server_cert(&self, value: &str) -> bool {
        value.is_empty() || Path::new(value).exists()
    }
}

/// Parse a typed poll interval in seconds.
pub fn parse_poll_interval(answer: &str) -> Result<i64, IntervalError> {
    let seconds: i64 = answer.parse().map_err(|_| IntervalError::NotANumber)?;
    if seconds < MIN_POLL_INTERVAL {
        return Err(IntervalError::TooShort(seconds));
    }
    Ok(seconds)
}
