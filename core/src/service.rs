use crate::{Metadata, ReadOutput, ReadStreamOutput, Result, Storage, WriteOutput};
use bytes::Bytes;
use tokio::io::AsyncRead;

/// StorageService is the entry point a host application holds on to.
///
/// It forwards every call to the configured backend and prefixes failures with
/// the operation that failed. Build one at start-up and pass it to whatever
/// needs storage access.
#[derive(Debug, Clone)]
pub struct StorageService<S> {
    backend: S,
}

impl<S: Storage> StorageService<S> {
    /// Create a new service over `backend`.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Get the underlying backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Write a new file.
    pub async fn write(&self, path: &str, contents: impl Into<Bytes>) -> Result<WriteOutput> {
        self.backend
            .write(path, contents.into())
            .await
            .map_err(|e| e.with_context("Failed to write file"))
    }

    /// Write a new file from a stream.
    pub async fn write_stream(
        &self,
        path: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<WriteOutput> {
        self.backend
            .write_stream(path, reader)
            .await
            .map_err(|e| e.with_context("Failed to write stream"))
    }

    /// Read a file.
    pub async fn read(&self, path: &str) -> Result<ReadOutput> {
        self.backend
            .read(path)
            .await
            .map_err(|e| e.with_context("Failed to read file"))
    }

    /// Read a file as a stream.
    pub async fn read_stream(&self, path: &str) -> Result<ReadStreamOutput> {
        self.backend
            .read_stream(path)
            .await
            .map_err(|e| e.with_context("Failed to read stream"))
    }

    /// Delete a file.
    pub async fn delete(&self, path: &str) -> Result<bool> {
        self.backend
            .delete(path)
            .await
            .map_err(|e| e.with_context("Failed to delete file"))
    }

    /// Set metadata for a file.
    pub async fn set_metadata(&self, path: &str, metadata: &Metadata) -> Result<bool> {
        self.backend
            .set_metadata(path, metadata)
            .await
            .map_err(|e| e.with_context("Failed to set metadata"))
    }
}
