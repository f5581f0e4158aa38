//! # dog-rab: Read-only random access over blobs
//!
//! `dog-rab` turns an immutable blob of known size into offset-addressable,
//! read-only storage. Callers get a uniform `stat` / `read` surface and never
//! need to know whether bytes come straight out of memory or from a file read
//! on a background task.
//!
//! ## Key Features
//!
//! - **Strict ranges**: a read crossing the end of the blob is rejected, never
//!   truncated into a short buffer
//! - **Base offsets**: expose only the tail of a blob, e.g. past a header
//! - **Two backends**: in-memory blobs and lazily read files share one resolver
//! - **Callback friendly**: completion-style access on top of the async API
//!
//! ## Quick Start
//!
//! ```rust
//! use dog_rab::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> RabResult<()> {
//! let blob = MemoryBlob::from(b"header:payload".to_vec());
//! let storage = dog_rab::memory(Some(blob), Some(BlobOptions::new().with_offset(7)))?;
//!
//! assert_eq!(storage.stat().await?.size, 7);
//! assert_eq!(storage.read(0, 3).await?.as_ref(), b"pay");
//! assert!(storage.read(5, 3).await.unwrap_err().is_out_of_range());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │  RandomAccessBlob  │  ← stat / read facade
//! ├────────────────────┤
//! │     BlobReader     │  ← memory or file fetch
//! ├────────────────────┤
//! │   RangeResolver    │  ← bounds validation
//! └────────────────────┘
//! ```

mod blob;
pub mod completion;
mod config;
mod error;
pub mod range;
pub mod reader;
pub mod stat;
pub mod storage;
mod types;

pub use blob::{Blob, FileBlob, MemoryBlob};
pub use completion::CompletionExt;
pub use config::{BlobOptions, FileReaderOptions, DEFAULT_CHUNK_SIZE};
pub use error::{RabError, RabResult};
pub use range::RangeResolver;
pub use reader::file::{FileBackedReader, FileReader};
pub use reader::memory::BlobBackedReader;
pub use reader::BlobReader;
pub use storage::{RandomAccess, RandomAccessBlob};
pub use types::{BlobStat, ResolvedWindow};

/// Create random access storage over an in-memory blob
pub fn memory<B: Blob>(
    blob: Option<B>,
    options: Option<BlobOptions>,
) -> RabResult<RandomAccessBlob<BlobBackedReader<B>>> {
    RandomAccessBlob::memory(blob, options)
}

/// Create random access storage over a file
pub fn file(
    file: Option<FileBlob>,
    options: Option<BlobOptions>,
) -> RabResult<RandomAccessBlob<FileBackedReader>> {
    RandomAccessBlob::file(file, options)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Blob, BlobOptions, BlobStat, CompletionExt, FileBlob, MemoryBlob, RabError, RabResult,
        RandomAccess, RandomAccessBlob,
    };
}
