use anyhow::Result;
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is used to send http request to the token endpoint and the storage service.
///
/// Implementations only move bytes. Status codes are left for the caller to interpret,
/// so a `4xx` or `5xx` response is still returned as `Ok`.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}
