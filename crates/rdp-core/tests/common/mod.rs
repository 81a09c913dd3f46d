//! Shared helpers: problem generation and an independent dynamic-programming oracle.

use std::collections::BTreeMap;

use rdp_core::chunk::Chunk;
use rdp_core::connection::ConnectionInfo;

/// Problem text in the line format read by `LineReader`.
pub fn problem_text(conn: &ConnectionInfo, chunks: &[Chunk]) -> String {
    let mut out = format!(
        "{}\n{}\n{}\n{}\n",
        conn.image_size,
        conn.latency,
        conn.bandwidth,
        chunks.len()
    );
    for c in chunks {
        out.push_str(&format!("{},{}\n", c.start, c.end));
    }
    out
}

/// Deterministic pseudo-random chunks over `[0, image_size + 5)`, plus a chain
/// of coarse chunks so that a cover always exists.
pub fn generated_chunks(seed: u64, count: usize, image_size: u64) -> Vec<Chunk> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 33
    };
    let mut chunks = Vec::with_capacity(count + 4);
    for _ in 0..count {
        let start = next() % image_size;
        let len = 1 + next() % (image_size / 4).max(1);
        chunks.push(Chunk {
            start,
            end: start + len,
        });
    }
    let step = (image_size / 4).max(1);
    let mut start = 0;
    while start < image_size {
        let end = (start + step + step / 2).min(image_size);
        chunks.push(Chunk { start, end });
        start += step;
    }
    chunks
}

/// Cheapest cost to cover `[0, image_size)` exactly: coverage ends only grow,
/// so states are settled in increasing order of covered end.
pub fn dp_min_cost(conn: &ConnectionInfo, chunks: &[Chunk]) -> Option<f64> {
    let mut best: BTreeMap<u64, f64> = BTreeMap::new();
    best.insert(0, 0.0);
    let mut ends: Vec<u64> = chunks.iter().map(|c| c.end).collect();
    ends.push(0);
    ends.sort_unstable();
    ends.dedup();
    for &end in &ends {
        let Some(&cost) = best.get(&end) else {
            continue;
        };
        if end == conn.image_size {
            continue;
        }
        for c in chunks {
            if c.start <= end && c.end > end && c.end <= conn.image_size {
                let candidate = cost + conn.download_time(c);
                let slot = best.entry(c.end).or_insert(f64::INFINITY);
                if candidate < *slot {
                    *slot = candidate;
                }
            }
        }
    }
    best.get(&conn.image_size).copied()
}
