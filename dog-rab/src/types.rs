use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Validated absolute `[start, end)` window within a blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub start: u64,
    pub end: u64,
}

impl ResolvedWindow {
    /// Number of bytes in the window
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the window covers no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The window as a half-open range
    pub fn as_range(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Result of a stat call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobStat {
    /// Bytes visible past the base offset
    pub size: u64,
}

impl BlobStat {
    /// Create a stat result
    pub fn new(size: u64) -> Self {
        Self { size }
    }
}
