// ── Hosted credential check ──

use std::future::Future;

use mender_setup_api::HostedClient;
use secrecy::SecretString;
use tracing::info;

use crate::error::CoreError;

/// Exchanges hosted account credentials for a tenant token.
///
/// Implementations report rejected credentials as
/// [`CoreError::InvalidCredentials`] and unreachable servers as
/// [`CoreError::ConnectionFailed`]; the wizard asks for new credentials
/// on both and treats anything else as fatal.
pub trait TenantTokenSource {
    fn request_tenant_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<String, CoreError>>;
}

impl TenantTokenSource for HostedClient {
    async fn request_tenant_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, CoreError> {
        let token = self.tenant_token(username, password).await?;
        info!("successfully requested tenant token");
        Ok(token)
    }
}
