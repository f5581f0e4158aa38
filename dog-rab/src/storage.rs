use async_trait::async_trait;
use bytes::Bytes;
use tracing::instrument;

use crate::reader::file::FileBackedReader;
use crate::reader::memory::BlobBackedReader;
use crate::{
    stat, Blob, BlobOptions, BlobReader, BlobStat, FileBlob, FileReaderOptions, RabError, RabResult,
};

/// Uniform read-only random access surface
#[async_trait]
pub trait RandomAccess: Send + Sync {
    /// Bytes visible past the base offset
    async fn stat(&self) -> RabResult<BlobStat>;

    /// Read exactly `size` bytes starting at `offset`
    async fn read(&self, offset: i64, size: i64) -> RabResult<Bytes>;
}

/// Read-only random access storage over a blob.
///
/// The reader decides how bytes are fetched; range validation and stat are
/// the same for every backend.
#[derive(Debug, Clone)]
pub struct RandomAccessBlob<R> {
    reader: R,
}

impl<R: BlobReader> RandomAccessBlob<R> {
    /// Wrap an already configured reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// The backend fetching bytes
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Validated displacement applied to every read
    pub fn base_offset(&self) -> u64 {
        self.reader.resolver().base_offset()
    }
}

impl<B: Blob> RandomAccessBlob<BlobBackedReader<B>> {
    /// Create storage reading through the blob's own extraction primitive
    pub fn memory(blob: Option<B>, options: Option<BlobOptions>) -> RabResult<Self> {
        let (blob, base_offset) = validate(blob, options)?;
        Ok(Self::new(BlobBackedReader::new(Some(blob), base_offset)))
    }
}

impl RandomAccessBlob<FileBackedReader> {
    /// Create storage reading a file through the platform read primitive
    pub fn file(file: Option<FileBlob>, options: Option<BlobOptions>) -> RabResult<Self> {
        Self::file_with_reader_options(file, options, FileReaderOptions::default())
    }

    /// Create file storage with custom stream options
    pub fn file_with_reader_options(
        file: Option<FileBlob>,
        options: Option<BlobOptions>,
        reader_options: FileReaderOptions,
    ) -> RabResult<Self> {
        let (file, base_offset) = validate(file, options)?;
        Ok(Self::new(FileBackedReader::with_options(
            Some(file),
            base_offset,
            reader_options,
        )))
    }
}

fn validate<B>(blob: Option<B>, options: Option<BlobOptions>) -> RabResult<(B, u64)> {
    let blob = blob.ok_or(RabError::BlobMissing)?;
    let base_offset = options.unwrap_or_default().base_offset()?;
    Ok((blob, base_offset))
}

#[async_trait]
impl<R: BlobReader> RandomAccess for RandomAccessBlob<R> {
    #[instrument(level = "debug", skip(self))]
    async fn stat(&self) -> RabResult<BlobStat> {
        Ok(stat::stat(self.base_offset(), self.reader.blob_size()))
    }

    #[instrument(level = "debug", skip(self))]
    async fn read(&self, offset: i64, size: i64) -> RabResult<Bytes> {
        self.reader.read(offset, size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBlob;

    #[test]
    fn construction_requires_a_blob() {
        let err = RandomAccessBlob::<BlobBackedReader<MemoryBlob>>::memory(None, None).unwrap_err();
        assert!(err.is_blob_missing());

        let options = Some(BlobOptions::new().with_offset(4));
        let err = RandomAccessBlob::file(None, options).unwrap_err();
        assert!(err.is_blob_missing());
    }

    #[test]
    fn construction_rejects_negative_offsets() {
        let blob = MemoryBlob::from(vec![0u8; 8]);
        let err = RandomAccessBlob::memory(Some(blob), Some(BlobOptions::new().with_offset(-1)))
            .unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn options_default_to_zero_offset() {
        let storage = RandomAccessBlob::memory(Some(MemoryBlob::from(vec![0u8; 8])), None).unwrap();
        assert_eq!(storage.base_offset(), 0);

        let storage = RandomAccessBlob::file(
            Some(FileBlob::from_parts("/tmp/blob", 8)),
            Some(BlobOptions::new().with_offset(3)),
        )
        .unwrap();
        assert_eq!(storage.base_offset(), 3);
    }

    #[test]
    fn file_storage_keeps_reader_options() {
        let storage = RandomAccessBlob::file_with_reader_options(
            Some(FileBlob::from_parts("/tmp/blob", 8)),
            None,
            FileReaderOptions::new().with_chunk_size(512),
        )
        .unwrap();
        assert_eq!(storage.reader().options().chunk_size(), 512);
        assert_eq!(storage.reader().path(), Some(std::path::Path::new("/tmp/blob")));
    }

    #[tokio::test]
    async fn stat_reports_remaining_size() {
        let storage = RandomAccessBlob::memory(
            Some(MemoryBlob::from(vec![0u8; 64])),
            Some(BlobOptions::new().with_offset(32)),
        )
        .unwrap();
        assert_eq!(storage.stat().await.unwrap(), BlobStat::new(32));
    }

    #[tokio::test]
    async fn stat_of_absent_blob_is_zero() {
        let storage = RandomAccessBlob::new(BlobBackedReader::<MemoryBlob>::new(None, 0));
        assert_eq!(storage.stat().await.unwrap().size, 0);
        assert!(storage.read(0, 0).await.unwrap_err().is_blob_missing());
    }

    #[test]
    fn usable_as_trait_object() {
        fn _check(_: &dyn RandomAccess) {}
    }
}
