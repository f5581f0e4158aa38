use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{Blob, BlobReader, RabError, RabResult, RangeResolver, ResolvedWindow};

/// Reads windows through the blob's own extraction primitive
#[derive(Debug, Clone)]
pub struct BlobBackedReader<B> {
    blob: Option<B>,
    resolver: RangeResolver,
}

impl<B: Blob> BlobBackedReader<B> {
    /// Create a reader over `blob`, applying `base_offset` to every request
    pub fn new(blob: Option<B>, base_offset: u64) -> Self {
        Self {
            blob,
            resolver: RangeResolver::new(base_offset),
        }
    }

    /// The blob being read, if any
    pub fn blob(&self) -> Option<&B> {
        self.blob.as_ref()
    }
}

#[async_trait]
impl<B: Blob> BlobReader for BlobBackedReader<B> {
    fn resolver(&self) -> &RangeResolver {
        &self.resolver
    }

    fn blob_size(&self) -> Option<u64> {
        self.blob.as_ref().map(Blob::size)
    }

    async fn fetch(&self, window: ResolvedWindow) -> RabResult<Bytes> {
        let blob = self.blob.as_ref().ok_or(RabError::BlobMissing)?;
        debug!(start = window.start, end = window.end, "extracting blob window");
        blob.slice(window).bytes().await
    }
}
