//! File-backed reading.
//!
//! [`FileReader`] is the platform read primitive: a tokio task that opens the
//! file, seeks to the window and drains a byte stream into one buffer. Any
//! failure surfaces as [`RabError::PlatformRead`]. A reader dropped in flight
//! aborts its task.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use std::future::Future;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::task::JoinHandle;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::{
    Blob, BlobReader, FileBlob, FileReaderOptions, RabError, RabResult, RangeResolver,
    ResolvedWindow,
};

/// In-flight read of a [`FileBlob`] view.
///
/// Dropping the reader before it finishes aborts the read.
#[derive(Debug)]
pub struct FileReader {
    task: JoinHandle<io::Result<Bytes>>,
}

impl FileReader {
    /// Start reading every byte of `blob` on the current tokio runtime
    pub fn start(blob: &FileBlob, options: &FileReaderOptions) -> Self {
        let path = blob.path().to_path_buf();
        let start = blob.file_offset();
        let len = blob.size();
        let chunk_size = options.chunk_size();

        Self::spawn(read_range(path, start, len, chunk_size))
    }

    fn spawn<F>(read: F) -> Self
    where
        F: Future<Output = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(read),
        }
    }

    /// Wait for the read to complete.
    ///
    /// A failed read has already ended its task. Dropping the returned future
    /// before it resolves drops the reader, which aborts the task.
    pub async fn finish(mut self) -> RabResult<Bytes> {
        let outcome = match (&mut self.task).await {
            Ok(result) => result,
            Err(join_error) => Err(io::Error::other(join_error)),
        };

        outcome.map_err(|source| {
            warn!(error = %source, "file read failed");
            RabError::platform_read(source)
        })
    }

    /// Cancel the read. A subsequent [`finish`](Self::finish) fails.
    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Drop for FileReader {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_range(path: PathBuf, start: u64, len: u64, chunk_size: usize) -> io::Result<Bytes> {
    let mut file = tokio::fs::File::open(&path).await?;
    file.seek(SeekFrom::Start(start)).await?;

    let mut stream = ReaderStream::with_capacity(file.take(len), chunk_size);
    let mut buf = BytesMut::with_capacity(usize::try_from(len).map_err(io::Error::other)?);
    while let Some(chunk) = stream.next().await {
        buf.extend_from_slice(&chunk?);
    }

    if (buf.len() as u64) < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "expected {} bytes at offset {} of {}, got {}",
                len,
                start,
                path.display(),
                buf.len()
            ),
        ));
    }

    Ok(buf.freeze())
}

/// Reads windows of a file through [`FileReader`]
#[derive(Debug, Clone)]
pub struct FileBackedReader {
    file: Option<FileBlob>,
    resolver: RangeResolver,
    options: FileReaderOptions,
}

impl FileBackedReader {
    /// Create a reader with default stream options
    pub fn new(file: Option<FileBlob>, base_offset: u64) -> Self {
        Self::with_options(file, base_offset, FileReaderOptions::default())
    }

    /// Create a reader with custom stream options
    pub fn with_options(
        file: Option<FileBlob>,
        base_offset: u64,
        options: FileReaderOptions,
    ) -> Self {
        Self {
            file,
            resolver: RangeResolver::new(base_offset),
            options,
        }
    }

    /// The file being read, if any
    pub fn file(&self) -> Option<&FileBlob> {
        self.file.as_ref()
    }

    /// Path of the file being read, if any
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(FileBlob::path)
    }

    /// Stream options used for every read
    pub fn options(&self) -> &FileReaderOptions {
        &self.options
    }
}

#[async_trait]
impl BlobReader for FileBackedReader {
    fn resolver(&self) -> &RangeResolver {
        &self.resolver
    }

    fn blob_size(&self) -> Option<u64> {
        self.file.as_ref().map(Blob::size)
    }

    async fn fetch(&self, window: ResolvedWindow) -> RabResult<Bytes> {
        let file = self.file.as_ref().ok_or(RabError::BlobMissing)?;
        if window.is_empty() {
            return Ok(Bytes::new());
        }

        debug!(
            start = window.start,
            end = window.end,
            path = %file.path().display(),
            "reading file window"
        );
        FileReader::start(&file.slice(window), &self.options)
            .finish()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;
    use tokio::task::AbortHandle;

    fn fixture(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn counting(len: u8) -> Vec<u8> {
        (0..len).collect()
    }

    #[tokio::test]
    async fn reads_window_across_many_chunks() {
        let data = counting(200);
        let fixture = fixture(&data);
        let blob = FileBlob::open(fixture.path()).await.unwrap();
        let reader = FileBackedReader::with_options(
            Some(blob),
            10,
            FileReaderOptions::new().with_chunk_size(7),
        );

        let bytes = reader.read(5, 150).await.unwrap();
        assert_eq!(bytes.as_ref(), &data[15..165]);
    }

    #[tokio::test]
    async fn empty_window_skips_the_file() {
        // The path does not exist, so touching the file system would fail.
        let blob = FileBlob::from_parts("/nonexistent/blob", 8);
        let reader = FileBackedReader::new(Some(blob), 0);
        assert!(reader.read(8, 0).await.unwrap().is_empty());
        assert!(reader.read(4, 1).await.unwrap_err().is_platform_read());
    }

    #[tokio::test]
    async fn absent_file_is_missing() {
        let reader = FileBackedReader::new(None, 0);
        assert!(reader.read(0, 0).await.unwrap_err().is_blob_missing());
        assert_eq!(reader.path(), None);
    }

    #[tokio::test]
    async fn truncated_file_is_a_platform_error() {
        let fixture = fixture(&counting(32));
        let blob = FileBlob::open(fixture.path()).await.unwrap();
        let reader = FileBackedReader::new(Some(blob), 0);

        fixture.as_file().set_len(8).unwrap();

        let err = reader.read(0, 32).await.unwrap_err();
        assert!(err.is_platform_read());
        assert_eq!(err.to_string(), "An error occurred during a file read operation.");

        let source = std::error::Error::source(&err)
            .and_then(|s| s.downcast_ref::<io::Error>())
            .unwrap();
        assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn deleted_file_is_a_platform_error() {
        let fixture = fixture(&counting(16));
        let blob = FileBlob::open(fixture.path()).await.unwrap();
        drop(fixture);

        let reader = FileBackedReader::new(Some(blob), 0);
        assert!(reader.read(0, 1).await.unwrap_err().is_platform_read());
    }

    #[tokio::test]
    async fn aborted_reader_fails() {
        let fixture = fixture(&counting(16));
        let blob = FileBlob::open(fixture.path()).await.unwrap();

        // The current-thread runtime has not polled the task yet.
        let reader = FileReader::start(&blob, &FileReaderOptions::default());
        reader.abort();

        assert!(reader.finish().await.unwrap_err().is_platform_read());
    }

    /// Give the runtime a chance to run the task, returning whether it ended
    async fn settle(handle: &AbortHandle) -> bool {
        for _ in 0..16 {
            if handle.is_finished() {
                return true;
            }
            tokio::task::yield_now().await;
        }
        handle.is_finished()
    }

    #[tokio::test]
    async fn dropped_reader_aborts_its_task() {
        let reader = FileReader::spawn(std::future::pending());
        let handle = reader.task.abort_handle();
        assert!(!settle(&handle).await);

        drop(reader);
        assert!(settle(&handle).await);
    }

    #[tokio::test]
    async fn dropped_finish_aborts_its_task() {
        let reader = FileReader::spawn(std::future::pending());
        let handle = reader.task.abort_handle();

        let mut finish = tokio_test::task::spawn(reader.finish());
        tokio_test::assert_pending!(finish.poll());
        assert!(!settle(&handle).await);

        drop(finish);
        assert!(settle(&handle).await);
    }
}
