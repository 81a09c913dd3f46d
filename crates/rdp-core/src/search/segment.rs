//! Immutable segment values: a covered prefix plus the chunks that built it.

use std::rc::Rc;

use crate::chunk::Chunk;

/// One link of a segment's chunk trail. Children of the same parent share the
/// parent's links, so extending a segment never copies its history.
#[derive(Debug)]
struct Link {
    chunk: Chunk,
    prev: Option<Rc<Link>>,
}

impl Drop for Link {
    // Unlink iteratively; long trails would otherwise recurse once per chunk.
    fn drop(&mut self) {
        let mut next = self.prev.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut link) => next = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// A candidate partial or complete cover of `[covered_start, covered_end)`.
///
/// `covered_end` is the furthest byte reached, not a sum of chunk sizes:
/// overlapping bytes count once.
#[derive(Debug, Clone)]
pub struct Segment {
    covered_start: u64,
    covered_end: u64,
    total_cost: f64,
    chunk_count: usize,
    trail: Option<Rc<Link>>,
}

impl Segment {
    /// The empty segment `[0, 0)` with cost 0 that every search starts from.
    pub fn root() -> Self {
        Segment {
            covered_start: 0,
            covered_end: 0,
            total_cost: 0.0,
            chunk_count: 0,
            trail: None,
        }
    }

    /// New segment with `chunk` appended. `self` is left untouched.
    pub fn extend(&self, chunk: Chunk, cost: f64) -> Self {
        Segment {
            covered_start: self.covered_start,
            covered_end: self.covered_end.max(chunk.end),
            total_cost: self.total_cost + cost,
            chunk_count: self.chunk_count + 1,
            trail: Some(Rc::new(Link {
                chunk,
                prev: self.trail.clone(),
            })),
        }
    }

    pub fn covered_start(&self) -> u64 {
        self.covered_start
    }

    pub fn covered_end(&self) -> u64 {
        self.covered_end
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Bytes covered; at most the sum of the chunk sizes.
    pub fn covered_len(&self) -> u64 {
        self.covered_end - self.covered_start
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Chunks in the order they were chosen.
    pub fn chunks(&self) -> Vec<Chunk> {
        let mut out = Vec::with_capacity(self.chunk_count);
        let mut link = self.trail.as_deref();
        while let Some(l) = link {
            out.push(l.chunk);
            link = l.prev.as_deref();
        }
        out.reverse();
        out
    }
}
