//! Connection parameters and the per-chunk download cost.

use serde::Serialize;

use crate::chunk::Chunk;

/// Parameters of the link to the image source, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    /// Target total bytes.
    pub image_size: u64,
    /// Seconds per request leg; every chunk pays it twice (request + response).
    pub latency: u64,
    /// Bytes per second. Always positive once read through a provider.
    pub bandwidth: u64,
    /// Number of chunk lines that follow.
    pub num_chunks: u64,
}

impl ConnectionInfo {
    /// Seconds to fetch `chunk`: `2 * latency + len / bandwidth`.
    pub fn download_time(&self, chunk: &Chunk) -> f64 {
        self.download_time_for_len(chunk.len())
    }

    /// A zero bandwidth has no finite cost; providers reject it before a catalog is built.
    pub fn download_time_for_len(&self, len: u64) -> f64 {
        debug_assert!(self.bandwidth > 0, "bandwidth must be positive");
        2.0 * self.latency as f64 + len as f64 / self.bandwidth as f64
    }
}
