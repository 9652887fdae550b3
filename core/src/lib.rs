//! Core components for talking to blob storage backends.
//!
//! This crate provides the foundational types and traits for the blobgate ecosystem.
//! It defines the abstractions a backend implements and the pieces a host application
//! composes them with.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **Traits**: Abstract interfaces for token acquisition (`ProvideToken`) and storage access (`Storage`)
//! - **StorageService**: The facade a host application talks to, which forwards to any `Storage`
//!
//! ## Example
//!
//! ```no_run
//! use blobgate_core::{AccessToken, Context, ProvideToken, Result, TokenCache};
//! use async_trait::async_trait;
//!
//! // Implement a token provider
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideToken for MyProvider {
//!     async fn provide_token(&self, _: &Context) -> Result<AccessToken> {
//!         Ok(AccessToken::new("my-token"))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//!
//! // Fetch a fresh token on every call
//! let token = MyProvider.provide_token(&ctx).await?;
//!
//! // Or reuse it until it expires
//! let cached = TokenCache::new(MyProvider);
//! let token = cached.provide_token(&ctx).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`ProvideToken`]: For obtaining bearer tokens
//! - [`Storage`]: The six operations every storage backend exposes
//!
//! ## Utilities
//!
//! - [`time`]: Time helpers, including the HTTP date format
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
mod http;
pub use http::HttpSend;
mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod token;
pub use token::{AccessToken, ProvideToken, TokenCache};

mod storage;
pub use storage::{Metadata, ReadOutput, ReadStreamOutput, Storage, WriteOutput};

mod service;
pub use service::StorageService;
