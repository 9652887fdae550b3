//! Reqwest-based HTTP transport for blobgate.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `blobgate_core` on top of
//! a `reqwest::Client`. Pass a preconfigured client to control timeouts or
//! connection pooling, blobgate itself sets neither.
//!
//! ## Example
//!
//! ```no_run
//! use blobgate_core::{Context, OsEnv};
//! use blobgate_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # fn main() -> anyhow::Result<()> {
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::new(client))
//!     .with_env(OsEnv);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use blobgate_core::HttpSend;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// HttpSend implementation over `reqwest`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> anyhow::Result<http::Response<Bytes>> {
        let req = Request::try_from(req)?;
        let resp: http::Response<_> = self.client.execute(req).await?.into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body).await.map(|buf| buf.to_bytes())?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
