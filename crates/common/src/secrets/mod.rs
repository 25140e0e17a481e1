//! Secret provider abstraction
//!
//! The generation client needs a project/tenant identifier that may live in
//! a secrets vault or be supplied as plain configuration. The trait keeps
//! the pipelines independent of where the value comes from.

use crate::config::GenAiConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;

/// Named secret lookup
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String>;
}

/// Reads secrets from process environment variables.
///
/// Deployment mounts vault secrets as env vars, so this covers both the
/// local and the managed case.
pub struct EnvSecretProvider;

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get_secret(&self, name: &str) -> Result<String> {
        std::env::var(name).map_err(|_| AppError::Configuration {
            message: format!("Secret {} is not set", name),
        })
    }
}

/// Resolve the generation project id: a static config value short-circuits
/// the secret lookup.
pub async fn resolve_project_id(
    config: &GenAiConfig,
    provider: &dyn SecretProvider,
) -> Result<String> {
    if let Some(ref project_id) = config.project_id {
        return Ok(project_id.clone());
    }
    provider.get_secret(&config.project_id_secret).await
}
