// Hosted Mender client
//
// Basic-auth login against useradm, then a bearer-authenticated lookup
// of the organization's tenant token through tenantadm. Both requests
// are one-shot: retry policy belongs to the caller.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport;

/// Base URL of the hosted Mender service.
pub const HOSTED_MENDER_URL: &str = "https://hosted.mender.io";

const LOGIN_PATH: &str = "/api/management/v1/useradm/auth/login";
const TENANT_PATH: &str = "/api/management/v1/tenantadm/user/tenant";

#[derive(Debug, Deserialize)]
struct TenantResponse {
    tenant_token: String,
}

/// Client for the hosted Mender management API.
#[derive(Debug, Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HostedClient {
    /// Create a client for `base_url` with a fresh HTTP client.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = transport::build_client()?;
        Self::with_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Log in with email and password.
    ///
    /// Returns the user's bearer token, which the endpoint sends back as
    /// the raw response body.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.base_url.join(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let resp = self
            .http
            .post(url)
            .basic_auth(username, Some(password.expose_secret()))
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "invalid username or password".into(),
            });
        }
        if status != reqwest::StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                operation: "login",
                status: status.as_u16(),
            });
        }

        let token = resp.text().await?;
        debug!("login successful");
        Ok(SecretString::from(token.trim().to_owned()))
    }

    /// Fetch the tenant token of the organization the user belongs to.
    pub async fn fetch_tenant_token(&self, user_token: &SecretString) -> Result<String, Error> {
        let url = self.base_url.join(TENANT_PATH)?;
        debug!("requesting tenant token at {}", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(user_token.expose_secret())
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                operation: "tenant token",
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let tenant: TenantResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;
        Ok(tenant.tenant_token)
    }

    /// Log in and fetch the tenant token in one go.
    pub async fn tenant_token(&self, username: &str, password: &SecretString) -> Result<String, Error> {
        let user_token = self.login(username, password).await?;
        self.fetch_tenant_token(&user_token).await
    }
}
