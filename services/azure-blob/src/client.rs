use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use blobgate_core::time::{format_http_date, now};
use blobgate_core::{
    Context, Error, ErrorKind, Metadata, ProvideToken, ReadOutput, ReadStreamOutput, Result,
    Storage, TokenCache, WriteOutput,
};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constants::*;
use crate::{ClientSecretTokenProvider, Config};

/// BlobClient maps storage operations onto the Azure Blob Service REST API.
///
/// Account and container are fixed for the lifetime of the client, the blob path
/// is given per call. Every request carries a bearer token freshly obtained from
/// the configured [`ProvideToken`], so the client holds no mutable state and can
/// be shared between tasks.
///
/// - [Blob service REST API](https://learn.microsoft.com/en-us/rest/api/storageservices/blob-service-rest-api)
#[derive(Debug, Clone)]
pub struct BlobClient {
    ctx: Context,
    endpoint: String,
    container: String,
    provider: Arc<dyn ProvideToken>,
}

impl BlobClient {
    /// Create a client for `container` in `account_name`.
    pub fn new(
        ctx: Context,
        account_name: &str,
        container: &str,
        provider: impl ProvideToken,
    ) -> Self {
        Self {
            ctx,
            endpoint: format!("https://{account_name}.blob.core.windows.net"),
            container: container.to_string(),
            provider: Arc::new(provider),
        }
    }

    /// Replace the blob service endpoint, for example to use an emulator.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a client and its token provider from `config`.
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if a required value is missing.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let account_name = config.account_name()?;
        let container = config.container()?;

        let mut provider = ClientSecretTokenProvider::new(config.credentials()?);
        if let Some(authority_host) = &config.authority_host {
            provider = provider.with_authority_host(authority_host);
        }

        let client = if config.cache_token {
            Self::new(ctx, account_name, container, TokenCache::new(provider))
        } else {
            Self::new(ctx, account_name, container, provider)
        };

        Ok(match &config.endpoint {
            Some(endpoint) => client.with_endpoint(endpoint),
            None => client,
        })
    }

    /// The URI every blob path is appended to: `{endpoint}/{container}`.
    pub fn base_uri(&self) -> String {
        format!("{}/{}", self.endpoint, self.container)
    }

    fn blob_url(&self, path: &str) -> Option<String> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return None;
        }

        Some(format!(
            "{}/{}",
            self.base_uri(),
            utf8_percent_encode(path, &AZURE_PATH_ENCODE_SET)
        ))
    }

    async fn authorization(&self) -> Result<HeaderValue> {
        let token = self.provider.provide_token(&self.ctx).await?;

        let mut value: HeaderValue = format!("Bearer {}", token.value())
            .parse()
            .map_err(|e| Error::auth("failed to parse authorization header").with_source(e))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Send one request for `op` and return the successful response.
    ///
    /// Token, transport and status failures are all reported with the kind of `op`.
    async fn send(
        &self,
        op: Operation,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<http::Response<Bytes>> {
        let url = self
            .blob_url(path)
            .ok_or_else(|| op.error("path must not be empty"))?;

        let authorization = self.authorization().await.map_err(|e| {
            op.error(format!(
                "Error generating authorization header: {}",
                e.message()
            ))
            .with_source(e)
        })?;

        let mut req = http::Request::builder()
            .method(method.clone())
            .uri(&url)
            .body(body)
            .map_err(|e| op.error(format!("invalid request: {e}")).with_source(e))?;

        let hs = req.headers_mut();
        hs.extend(headers);
        hs.insert(X_MS_VERSION, HeaderValue::from_static(AZURE_VERSION));
        hs.insert(AUTHORIZATION, authorization);
        // Generated last so the service sees the smallest possible clock skew.
        hs.insert(
            X_MS_DATE,
            format_http_date(now())
                .parse()
                .map_err(|e| op.error("failed to parse date header").with_source(e))?,
        );

        debug!("sending {method} {url}");
        let resp = self
            .ctx
            .http_send(req)
            .await
            .map_err(|e| op.error(format!("{e}")).with_source(e))?;
        debug!("{method} {url} responded with {}", resp.status());

        if !resp.status().is_success() {
            let body = String::from_utf8_lossy(resp.body());
            return Err(op.error(format!("{}: {body}", op.failed())));
        }

        Ok(resp)
    }
}

#[async_trait]
impl Storage for BlobClient {
    async fn write(&self, path: &str, contents: Bytes) -> Result<WriteOutput> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
        headers.insert(X_MS_BLOB_TYPE, HeaderValue::from_static(BLOCK_BLOB));

        self.send(
            Operation::Write,
            Method::PUT,
            path,
            headers,
            contents.clone(),
        )
        .await?;

        Ok(WriteOutput {
            path: path.to_string(),
            contents,
        })
    }

    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<WriteOutput> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.map_err(|e| {
            Error::write(format!("Error writing stream: {e}")).with_source(e)
        })?;

        self.write(path, Bytes::from(buf))
            .await
            .map_err(|e| e.with_context("Error writing stream"))
    }

    async fn read(&self, path: &str) -> Result<ReadOutput> {
        let resp = self
            .send(Operation::Read, Method::GET, path, HeaderMap::new(), Bytes::new())
            .await?;

        Ok(ReadOutput {
            contents: resp.into_body(),
        })
    }

    async fn read_stream(&self, path: &str) -> Result<ReadStreamOutput> {
        let output = self
            .read(path)
            .await
            .map_err(|e| e.with_context("Error reading stream"))?;

        Ok(ReadStreamOutput {
            stream: Cursor::new(output.contents),
        })
    }

    async fn delete(&self, path: &str) -> Result<bool> {
        self.send(
            Operation::Delete,
            Method::DELETE,
            path,
            HeaderMap::new(),
            Bytes::new(),
        )
        .await?;

        Ok(true)
    }

    async fn set_metadata(&self, path: &str, metadata: &Metadata) -> Result<bool> {
        let op = Operation::SetMetadata;

        let mut headers = HeaderMap::new();
        headers.insert(X_MS_BLOB_TYPE, HeaderValue::from_static(BLOCK_BLOB));
        for (key, value) in metadata {
            let name = HeaderName::from_bytes(format!("{X_MS_META_PREFIX}{key}").as_bytes())
                .map_err(|e| {
                    op.error(format!("invalid metadata key {key:?}"))
                        .with_source(e)
                })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                op.error(format!("invalid metadata value for key {key:?}"))
                    .with_source(e)
            })?;
            headers.insert(name, value);
        }

        let resp = self
            .send(op, Method::PUT, path, headers, Bytes::new())
            .await?;

        Ok(resp.status().is_success())
    }
}

/// The blob operations that issue a request.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Write,
    Read,
    Delete,
    SetMetadata,
}

impl Operation {
    fn kind(self) -> ErrorKind {
        match self {
            Operation::Write => ErrorKind::Write,
            Operation::Read => ErrorKind::Read,
            Operation::Delete => ErrorKind::Delete,
            Operation::SetMetadata => ErrorKind::Metadata,
        }
    }

    /// Prefix for a non-2xx response.
    fn failed(self) -> &'static str {
        match self {
            Operation::Write => "Failed to write file",
            Operation::Read => "Failed to read file",
            Operation::Delete => "Failed to delete file",
            Operation::SetMetadata => "Failed to set metadata",
        }
    }

    /// Prefix for every failure the client reports.
    fn errored(self) -> &'static str {
        match self {
            Operation::Write => "Error writing file",
            Operation::Read => "Error reading file",
            Operation::Delete => "Error deleting file",
            Operation::SetMetadata => "Error setting metadata",
        }
    }

    fn error(self, message: impl std::fmt::Display) -> Error {
        Error::new(self.kind(), format!("{}: {message}", self.errored()))
    }
}
