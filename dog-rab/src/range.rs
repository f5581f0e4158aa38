//! Byte range resolution shared by every reader backend.
//!
//! Requests are never clamped: a window that would cross the end of the blob
//! is rejected with [`RabError::OffsetOutOfRange`] instead of returning a
//! short buffer.

use tracing::debug;

use crate::{RabError, RabResult, ResolvedWindow};

/// Maps requested `(offset, size)` pairs onto absolute blob windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeResolver {
    base_offset: u64,
}

impl RangeResolver {
    /// Create a resolver applying `base_offset` to every request
    pub fn new(base_offset: u64) -> Self {
        Self { base_offset }
    }

    /// The displacement added to requested offsets
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// Resolve a request against a blob of `blob_size` bytes.
    ///
    /// `blob_size` is `None` when no blob is configured.
    pub fn resolve(
        &self,
        blob_size: Option<u64>,
        offset: i64,
        size: i64,
    ) -> RabResult<ResolvedWindow> {
        let blob_size = blob_size.ok_or(RabError::BlobMissing)?;

        let (Ok(offset), Ok(size)) = (u64::try_from(offset), u64::try_from(size)) else {
            debug!(offset, size, "rejected negative read request");
            return Err(RabError::OffsetOutOfRange);
        };

        let window = self
            .base_offset
            .checked_add(offset)
            .and_then(|start| start.checked_add(size).map(|end| ResolvedWindow { start, end }));

        match window {
            Some(window) if window.start <= blob_size && window.end <= blob_size => Ok(window),
            _ => {
                debug!(
                    base_offset = self.base_offset,
                    offset,
                    size,
                    blob_size,
                    "rejected read outside blob bounds"
                );
                Err(RabError::OffsetOutOfRange)
            }
        }
    }
}
