//! Azure Blob Storage backend for blobgate
//!
//! This crate reads, writes, deletes and tags blobs in one Azure Storage
//! container, authenticating with an Azure AD application through the OAuth 2.0
//! client-credentials grant:
//!
//! - [`ClientSecretTokenProvider`] exchanges tenant/client credentials for a bearer token
//! - [`BlobClient`] builds the REST call for each operation and attaches the token
//!
//! `BlobClient` implements [`blobgate_core::Storage`], so it can be handed to a
//! [`blobgate_core::StorageService`] like any other backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use anyhow::Result;
//! use blobgate_azure_blob::{BlobClient, Config};
//! use blobgate_core::{Context, OsEnv, Storage};
//! use blobgate_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Reads AZURE_STORAGE_ACCOUNT_NAME, AZURE_STORAGE_CONTAINER, AZURE_TENANT_ID,
//!     // AZURE_CLIENT_ID and AZURE_CLIENT_SECRET.
//!     let config = Config::default().from_env(&ctx);
//!     let client = BlobClient::from_config(ctx, &config)?;
//!
//!     client.write("hello.txt", "Hello, World!".into()).await?;
//!     let output = client.read("hello.txt").await?;
//!     println!("read {} bytes", output.contents.len());
//!
//!     Ok(())
//! }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credentials;

mod provide_token;
pub use provide_token::ClientSecretTokenProvider;

mod client;
pub use client::BlobClient;
