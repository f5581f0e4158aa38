use tracing::warn;

use crate::BlobStat;

/// Size visible to callers once the base offset is applied.
///
/// An absent blob reports zero. A base offset past the end of the blob also
/// reports zero rather than a negative size.
pub fn stat_size(base_offset: u64, blob_size: Option<u64>) -> u64 {
    let Some(blob_size) = blob_size else {
        return 0;
    };

    if base_offset > blob_size {
        warn!(base_offset, blob_size, "base offset is past the end of the blob");
    }

    blob_size.saturating_sub(base_offset)
}

/// [`stat_size`] wrapped as a [`BlobStat`]
pub fn stat(base_offset: u64, blob_size: Option<u64>) -> BlobStat {
    BlobStat::new(stat_size(base_offset, blob_size))
}
