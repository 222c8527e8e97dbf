use crate::{constants::*, Credential};
use async_trait::async_trait;
use cloudsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads atmos credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `CLOUDSIGN_ATMOS_UID`: The atmos uid
/// - `CLOUDSIGN_ATMOS_SECRET_KEY`: The base64 encoded shared secret
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let uid = ctx.env_var(CLOUDSIGN_ATMOS_UID);
        let secret_key = ctx.env_var(CLOUDSIGN_ATMOS_SECRET_KEY);

        match (uid, secret_key) {
            (Some(uid), Some(sk)) => Credential::from_base64_secret(uid, &sk).map(Some),
            _ => Ok(None),
        }
    }
}
