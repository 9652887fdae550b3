use std::fmt::{Debug, Formatter};

use blobgate_core::utils::Redact;
use blobgate_core::{Context, Error, Result};

use crate::constants::*;
use crate::Credentials;

/// Config carries all the configuration for the Azure Blob Storage adapter.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_NAME`]
    pub account_name: Option<String>,
    /// `container` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_CONTAINER`]
    pub container: Option<String>,
    /// `tenant_id` value will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_TENANT_ID`]
    pub tenant_id: Option<String>,
    /// `client_id` value will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_CLIENT_ID`]
    pub client_id: Option<String>,
    /// `client_secret` value will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_CLIENT_SECRET`]
    pub client_secret: Option<String>,
    /// `authority_host` value will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_AUTHORITY_HOST`]
    /// - default: `https://login.microsoftonline.com`
    pub authority_host: Option<String>,
    /// Blob service endpoint, without the container.
    ///
    /// Defaults to `https://{account_name}.blob.core.windows.net`. Override it
    /// to talk to an emulator.
    ///
    /// - env value: [`AZURE_STORAGE_ENDPOINT`]
    pub endpoint: Option<String>,
    /// Reuse bearer tokens until they expire instead of fetching one per call.
    ///
    /// - env value: [`AZURE_STORAGE_CACHE_TOKEN`], `true` or `1` to enable
    pub cache_token: bool,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("container", &self.container)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("authority_host", &self.authority_host)
            .field("endpoint", &self.endpoint)
            .field("cache_token", &self.cache_token)
            .finish()
    }
}

impl Config {
    /// Load config from the env of `ctx`.
    ///
    /// Fields that are already set win over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        let fields = [
            (&mut self.account_name, AZURE_STORAGE_ACCOUNT_NAME),
            (&mut self.container, AZURE_STORAGE_CONTAINER),
            (&mut self.tenant_id, AZURE_TENANT_ID),
            (&mut self.client_id, AZURE_CLIENT_ID),
            (&mut self.client_secret, AZURE_CLIENT_SECRET),
            (&mut self.authority_host, AZURE_AUTHORITY_HOST),
            (&mut self.endpoint, AZURE_STORAGE_ENDPOINT),
        ];
        for (field, key) in fields {
            if field.is_none() {
                *field = envs.get(key).filter(|v| !v.is_empty()).cloned();
            }
        }

        if self.authority_host.is_none() {
            self.authority_host = Some(AZURE_PUBLIC_CLOUD.to_string());
        }

        if let Some(v) = envs.get(AZURE_STORAGE_CACHE_TOKEN) {
            self.cache_token = matches!(v.to_ascii_lowercase().as_str(), "true" | "1");
        }

        self
    }

    /// Client credentials for the token endpoint.
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::new(
            required(&self.tenant_id, "tenant_id")?,
            required(&self.client_id, "client_id")?,
            required(&self.client_secret, "client_secret")?,
        ))
    }

    pub(crate) fn account_name(&self) -> Result<&str> {
        required(&self.account_name, "account_name")
    }

    pub(crate) fn container(&self) -> Result<&str> {
        required(&self.container, "container")
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config_invalid(format!("{name} is required"))),
    }
}
