use async_trait::async_trait;
use bytes::Bytes;

use crate::{RabResult, RangeResolver, ResolvedWindow};

pub mod file;
pub mod memory;

/// A reader backend: a blob plus the primitive used to fetch windows from it.
///
/// Implementations only provide the fetch. Range validation lives in the
/// provided [`read`](BlobReader::read) so every backend rejects the same
/// requests.
#[async_trait]
pub trait BlobReader: Send + Sync {
    /// Resolver carrying this reader's base offset
    fn resolver(&self) -> &RangeResolver;

    /// Size of the underlying blob, `None` when no blob is configured
    fn blob_size(&self) -> Option<u64>;

    /// Fetch an already validated window
    async fn fetch(&self, window: ResolvedWindow) -> RabResult<Bytes>;

    /// Validate `(offset, size)` and fetch the resulting window.
    ///
    /// The fetch primitive is never invoked for a rejected request.
    async fn read(&self, offset: i64, size: i64) -> RabResult<Bytes> {
        let window = self.resolver().resolve(self.blob_size(), offset, size)?;
        self.fetch(window).await
    }
}
