use thiserror::Error;

/// Result type for random access blob operations
pub type RabResult<T> = Result<T, RabError>;

/// Errors that can occur while constructing or reading from a blob adapter
#[derive(Error, Debug)]
pub enum RabError {
    #[error("Missing blob in storage.")]
    BlobMissing,

    #[error("Offset out of range.")]
    OffsetOutOfRange,

    /// The platform read primitive failed or was aborted. The message is fixed,
    /// the cause is reachable through `source()`.
    #[error("An error occurred during a file read operation.")]
    PlatformRead {
        #[source]
        source: std::io::Error,
    },

    #[error("Blob extraction failed: {source}")]
    Extract {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RabError {
    /// Create a platform read error from the underlying I/O failure
    pub fn platform_read(source: std::io::Error) -> Self {
        Self::PlatformRead { source }
    }

    /// Create an extraction error from any error type
    pub fn extract<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Extract {
            source: Box::new(error),
        }
    }

    /// Stable machine readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlobMissing => "BLOB_MISSING_ERR",
            Self::OffsetOutOfRange => "OFFSET_RANGE_ERR",
            Self::PlatformRead { .. } => "FILE_READER_ERR",
            Self::Extract { .. } => "EXTRACT_ERR",
            Self::Io { .. } => "IO_ERR",
        }
    }

    /// Check if no blob was configured
    pub fn is_blob_missing(&self) -> bool {
        matches!(self, Self::BlobMissing)
    }

    /// Check if the request fell outside the blob
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OffsetOutOfRange)
    }

    /// Check if the platform read primitive failed
    pub fn is_platform_read(&self) -> bool {
        matches!(self, Self::PlatformRead { .. })
    }
}
