use crate::time::{now, DateTime};
use crate::utils::Redact;
use crate::{Context, Result};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

/// AccessToken is a bearer token presented in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Option<DateTime>,
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &Redact::from(&self.value))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    /// Create a token without a known expiry.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Set the time this token expires at.
    pub fn with_expires_at(mut self, expires_at: DateTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The raw token string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The expiry of this token, if the issuer reported one.
    pub fn expires_at(&self) -> Option<DateTime> {
        self.expires_at
    }

    /// Check if the token can still be presented.
    ///
    /// Tokens expiring within the next 20 seconds are treated as expired.
    pub fn is_valid(&self) -> bool {
        if self.value.is_empty() {
            return false;
        }

        match self.expires_at {
            Some(expires_at) => {
                expires_at > now() + chrono::TimeDelta::try_seconds(20).expect("in bounds")
            }
            None => true,
        }
    }
}

/// ProvideToken is the trait used to obtain a bearer token for outgoing requests.
///
/// Failures are reported with [`crate::ErrorKind::Auth`].
#[async_trait::async_trait]
pub trait ProvideToken: Debug + Send + Sync + 'static {
    /// Obtain a token authorizing the next request.
    async fn provide_token(&self, ctx: &Context) -> Result<AccessToken>;
}

/// TokenCache reuses the last token of the wrapped provider until it expires.
///
/// A provider without caching fetches a token on every call. Wrapping it in a
/// `TokenCache` turns that into a lazy refresh: the inner provider is only asked
/// again once the cached token is no longer valid. Tokens without an expiry are
/// kept until the cache is dropped.
#[derive(Clone, Debug)]
pub struct TokenCache<P> {
    inner: P,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl<P: ProvideToken> TokenCache<P> {
    /// Wrap a token provider.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            token: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait::async_trait]
impl<P: ProvideToken> ProvideToken for TokenCache<P> {
    async fn provide_token(&self, ctx: &Context) -> Result<AccessToken> {
        let cached = self.token.lock().expect("lock poisoned").clone();
        if let Some(token) = cached.filter(|t| t.is_valid()) {
            return Ok(token);
        }

        log::debug!("cached token missing or expired, fetching a new one");
        let token = self.inner.provide_token(ctx).await?;
        *self.token.lock().expect("lock poisoned") = Some(token.clone());
        Ok(token)
    }
}
