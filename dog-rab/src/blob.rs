use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::reader::file::FileReader;
use crate::{FileReaderOptions, RabResult, ResolvedWindow};

/// Capabilities a blob must offer to be read through a random access adapter
#[async_trait]
pub trait Blob: Send + Sync {
    /// Total size of the blob in bytes
    fn size(&self) -> u64;

    /// Sub-range view over `window`.
    ///
    /// Bounds past the end of the blob are clamped, so a view is always valid.
    /// Callers wanting strict bounds resolve the window first.
    fn slice(&self, window: ResolvedWindow) -> Self
    where
        Self: Sized;

    /// Materialize the blob's bytes
    async fn bytes(&self) -> RabResult<Bytes>;
}

fn clamp(window: ResolvedWindow, size: u64) -> ResolvedWindow {
    let start = window.start.min(size);
    let end = window.end.min(size).max(start);
    ResolvedWindow { start, end }
}

/// Blob held entirely in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBlob(Bytes);

impl MemoryBlob {
    /// Create a blob from anything convertible into `Bytes`
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// The blob's content
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }
}

impl From<Bytes> for MemoryBlob {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for MemoryBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

impl From<&'static [u8]> for MemoryBlob {
    fn from(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }
}

#[async_trait]
impl Blob for MemoryBlob {
    fn size(&self) -> u64 {
        self.0.len() as u64
    }

    fn slice(&self, window: ResolvedWindow) -> Self {
        // `clamp` keeps both bounds within `len()`, which always fits in usize.
        let window = clamp(window, self.size());
        Self(self.0.slice(window.start as usize..window.end as usize))
    }

    async fn bytes(&self) -> RabResult<Bytes> {
        Ok(self.0.clone())
    }
}

/// File on disk surfaced as a lazily read blob.
///
/// Only the size is known up front; content is read on demand through
/// [`FileReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    path: Arc<Path>,
    start: u64,
    len: u64,
}

impl FileBlob {
    /// Open the file at `path`, reading its size from metadata
    pub async fn open(path: impl AsRef<Path>) -> RabResult<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::other(format!("{} is not a file", path.display())).into());
        }

        Ok(Self::from_parts(path, metadata.len()))
    }

    /// Describe a file whose size is already known
    pub fn from_parts(path: impl Into<PathBuf>, size: u64) -> Self {
        let path: PathBuf = path.into();
        Self {
            path: Arc::from(path),
            start: 0,
            len: size,
        }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Position of this view's first byte within the file
    pub fn file_offset(&self) -> u64 {
        self.start
    }
}

#[async_trait]
impl Blob for FileBlob {
    fn size(&self) -> u64 {
        self.len
    }

    fn slice(&self, window: ResolvedWindow) -> Self {
        let window = clamp(window, self.len);
        Self {
            path: Arc::clone(&self.path),
            start: self.start + window.start,
            len: window.len(),
        }
    }

    async fn bytes(&self) -> RabResult<Bytes> {
        FileReader::start(self, &FileReaderOptions::default())
            .finish()
            .await
    }
}
