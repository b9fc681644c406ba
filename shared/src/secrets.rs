//! AWS Secrets Manager integration.
//!
//! Secrets are fetched by name, latest version, once per invocation and
//! never cached: the credential is used to build an authenticated client
//! and dropped when the invocation ends.

use aws_sdk_secretsmanager::Client as SecretsClient;

use crate::{Error, Result};

/// Get a secret value from Secrets Manager.
pub async fn get_secret(client: &SecretsClient, name: &str) -> Result<String> {
    let response = client
        .get_secret_value()
        .secret_id(name)
        .send()
        .await
        .map_err(|e| Error::Secrets(format!("failed to get secret '{name}': {e}")))?;

    response
        .secret_string()
        .map(str::to_string)
        .ok_or_else(|| Error::Secrets(format!("secret '{name}' has no string value")))
}
