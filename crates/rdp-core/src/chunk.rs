//! Chunk type and range predicates.

use serde::Serialize;

use crate::error::InputError;

/// A retrievable byte range [start, end) (half-open). Always non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Chunk {
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl Chunk {
    /// Validates raw input bounds: `0 <= start < end`.
    ///
    /// `line` is only used for the error.
    pub fn from_raw(start: i64, end: i64, line: usize) -> Result<Self, InputError> {
        if start < 0 || start >= end {
            return Err(InputError::InvalidChunkRange { line, start, end });
        }
        Ok(Chunk {
            start: start as u64,
            end: end as u64,
        })
    }

    /// Length of this chunk in bytes.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// This chunk ends exactly where `other` begins.
    pub fn is_contiguous(&self, other: &Chunk) -> bool {
        self.end == other.start
    }

    /// The two ranges share at least one byte or touch.
    pub fn overlaps(&self, other: &Chunk) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn has_same_start(&self, other: &Chunk) -> bool {
        self.start == other.start
    }

    pub fn has_same_end(&self, other: &Chunk) -> bool {
        self.end == other.end
    }

    pub fn contains_byte(&self, pos: u64) -> bool {
        pos >= self.start && pos < self.end
    }

    /// `other` lies entirely within this chunk.
    pub fn contains(&self, other: &Chunk) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn is_start_chunk(&self) -> bool {
        self.start == 0
    }

    pub fn is_end_chunk(&self, image_size: u64) -> bool {
        self.end == image_size
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
