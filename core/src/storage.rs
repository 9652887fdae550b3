use crate::Result;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::Cursor;
use tokio::io::AsyncRead;

/// Metadata attached to a blob, key to value.
///
/// Values are passed through as-is, no size or character validation happens here.
pub type Metadata = BTreeMap<String, String>;

/// Output of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutput {
    /// Path the contents were written to.
    pub path: String,
    /// The written contents.
    pub contents: Bytes,
}

/// Output of a successful read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutput {
    /// Contents of the blob.
    pub contents: Bytes,
}

/// Output of a successful streaming read.
///
/// The stream is fully buffered and positioned at the start. It implements
/// `std::io::Read + Seek` as well as tokio's `AsyncRead + AsyncSeek`.
#[derive(Debug)]
pub struct ReadStreamOutput {
    /// Rewindable reader over the blob contents.
    pub stream: Cursor<Bytes>,
}

/// Storage is the capability every storage backend exposes to the host application.
///
/// Paths are relative to the backend's root (for blob storage: the container).
#[async_trait::async_trait]
pub trait Storage: Debug + Send + Sync + 'static {
    /// Create or replace the object at `path`.
    async fn write(&self, path: &str, contents: Bytes) -> Result<WriteOutput>;

    /// Drain `reader` and write everything it yields to `path`.
    async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<WriteOutput>;

    /// Read the whole object at `path`.
    async fn read(&self, path: &str) -> Result<ReadOutput>;

    /// Read the object at `path` as a rewindable stream.
    async fn read_stream(&self, path: &str) -> Result<ReadStreamOutput>;

    /// Delete the object at `path`.
    async fn delete(&self, path: &str) -> Result<bool>;

    /// Attach `metadata` to the object at `path`.
    async fn set_metadata(&self, path: &str, metadata: &Metadata) -> Result<bool>;
}
