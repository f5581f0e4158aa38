use crate::{RabError, RabResult};

/// Default capacity of each chunk pulled from a file read stream (64KB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Construction options for a random access blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobOptions {
    /// Byte displacement added to every requested offset.
    ///
    /// Signed so that a negative value can be expressed and rejected when the
    /// adapter is created.
    pub offset: i64,
}

impl BlobOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base offset
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Validate and return the base offset
    pub fn base_offset(&self) -> RabResult<u64> {
        u64::try_from(self.offset).map_err(|_| RabError::OffsetOutOfRange)
    }
}

/// Tuning for the file read primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReaderOptions {
    chunk_size: usize,
}

impl Default for FileReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FileReaderOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stream chunk capacity (a zero value falls back to 1 byte)
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    /// Capacity of each chunk pulled from the read stream, never zero
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}
