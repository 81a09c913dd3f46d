//! Cheapest-segment queries over a frontier kept one segment per `covered_end`.

use super::segment::Segment;

/// Read-only index over frontier segments sorted by strictly ascending
/// `covered_end`. Answers "cheapest segment ending in `[from, to)`" in
/// constant time after an `n log n` build.
pub(super) struct FrontierIndex<'a> {
    segments: &'a [Segment],
    ends: Vec<u64>,
    /// `levels[k][i]`: cheapest of `segments[i..i + 2^k]`, lowest index on ties.
    levels: Vec<Vec<usize>>,
}

impl<'a> FrontierIndex<'a> {
    pub(super) fn new(segments: &'a [Segment]) -> Self {
        debug_assert!(segments
            .windows(2)
            .all(|w| w[0].covered_end() < w[1].covered_end()));
        let ends = segments.iter().map(Segment::covered_end).collect();
        let mut levels = vec![(0..segments.len()).collect::<Vec<_>>()];
        let mut width = 1;
        while width * 2 <= segments.len() {
            let prev = &levels[levels.len() - 1];
            let next: Vec<usize> = (0..=segments.len() - width * 2)
                .map(|i| cheaper(segments, prev[i], prev[i + width]))
                .collect();
            levels.push(next);
            width *= 2;
        }
        Self {
            segments,
            ends,
            levels,
        }
    }

    /// For segments with `from <= covered_end < to`: the index of the cheapest
    /// (lowest index on ties) and how many there are. `None` when there are none.
    pub(super) fn cheapest_in(&self, from: u64, to: u64) -> Option<(usize, usize)> {
        let lo = self.ends.partition_point(|&e| e < from);
        let hi = self.ends.partition_point(|&e| e < to);
        if lo >= hi {
            return None;
        }
        let count = hi - lo;
        let k = (usize::BITS - 1 - count.leading_zeros()) as usize;
        let level = &self.levels[k];
        let index = cheaper(self.segments, level[lo], level[hi - (1 << k)]);
        Some((index, count))
    }
}

fn cheaper(segments: &[Segment], a: usize, b: usize) -> usize {
    let (cost_a, cost_b) = (segments[a].total_cost(), segments[b].total_cost());
    if cost_b < cost_a || (cost_b == cost_a && b < a) {
        b
    } else {
        a
    }
}
