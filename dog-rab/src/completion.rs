//! Completion-callback access for callers that are not written as futures.
//!
//! Each call spawns the operation on the current tokio runtime and hands the
//! outcome to an `FnOnce`, so the completion runs exactly once.

use bytes::Bytes;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{BlobStat, RabResult, RandomAccess};

/// Callback-style `stat`/`read` for shared storage
pub trait CompletionExt {
    fn stat_with<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(RabResult<BlobStat>) + Send + 'static;

    fn read_with<F>(&self, offset: i64, size: i64, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(RabResult<Bytes>) + Send + 'static;
}

impl<S> CompletionExt for Arc<S>
where
    S: RandomAccess + ?Sized + 'static,
{
    fn stat_with<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(RabResult<BlobStat>) + Send + 'static,
    {
        let storage = Arc::clone(self);
        tokio::spawn(async move { completion(storage.stat().await) })
    }

    fn read_with<F>(&self, offset: i64, size: i64, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(RabResult<Bytes>) + Send + 'static,
    {
        let storage = Arc::clone(self);
        tokio::spawn(async move { completion(storage.read(offset, size).await) })
    }
}
