use std::fmt::{Debug, Formatter};

use crate::constants::*;
use cloudsign_core::{utils::Redact, Context};

/// Config carries all the configuration for EMC Atmos services.
#[derive(Clone, Default)]
pub struct Config {
    /// `uid` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSIGN_ATMOS_UID`]
    pub uid: Option<String>,
    /// `secret_key` (base64 encoded, as handed out by atmos) will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSIGN_ATMOS_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `endpoint` (like `https://atmos.example.com`) will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSIGN_ATMOS_ENDPOINT`]
    pub endpoint: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set uid
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Set base64 encoded secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(CLOUDSIGN_ATMOS_UID) {
            self.uid.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSIGN_ATMOS_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSIGN_ATMOS_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("uid", &self.uid)
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
