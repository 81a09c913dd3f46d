//! Chunk catalog: the sorted candidate set, each chunk annotated with its cost.
//!
//! Built once from input and never mutated. The search only ever asks one
//! question of it: which chunks extend a covered prefix `[0, covered_end)`
//! without leaving a gap.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::connection::ConnectionInfo;
use crate::error::InputError;

/// How `discoverable_from` finds candidates. Results are identical; only the
/// amount of the catalog scanned differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    /// Scan every entry.
    Linear,
    /// Binary-search the start-sorted entries for a window: entries starting
    /// after `covered_end` are cut off, as are entries starting so early that
    /// even the longest chunk in the catalog ends by `covered_end`. Entries
    /// inside the window are still filtered one by one.
    #[default]
    Indexed,
}

impl FromStr for Lookup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Lookup::Linear),
            "indexed" => Ok(Lookup::Indexed),
            other => Err(format!("unknown lookup {other:?} (expected linear or indexed)")),
        }
    }
}

/// A catalog chunk with its precomputed download time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub chunk: Chunk,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct ChunkCatalog {
    entries: Vec<CatalogEntry>,
    /// Longest chunk length, bounding how far back an extending chunk can start.
    max_len: u64,
    lookup: Lookup,
}

impl ChunkCatalog {
    /// Annotates every chunk with its download time and sorts by `(start, end)`.
    ///
    /// Contained and duplicate chunks are kept: a chunk inside another may still
    /// be part of a cheaper cover. `conn.bandwidth` must be positive.
    pub fn build(chunks: impl IntoIterator<Item = Chunk>, conn: &ConnectionInfo) -> Self {
        let mut entries: Vec<CatalogEntry> = chunks
            .into_iter()
            .map(|chunk| CatalogEntry {
                chunk,
                cost: conn.download_time(&chunk),
            })
            .collect();
        entries.sort_by_key(|e| e.chunk);
        let max_len = entries.iter().map(|e| e.chunk.len()).max().unwrap_or(0);
        tracing::debug!(
            "built chunk catalog with {} entries, longest chunk {}",
            entries.len(),
            max_len
        );
        Self {
            entries,
            max_len,
            lookup: Lookup::default(),
        }
    }

    /// Like `build`, from raw `(start, end)` pairs. The error's `line` is the
    /// 0-based index of the offending pair.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (i64, i64)>,
        conn: &ConnectionInfo,
    ) -> Result<Self, InputError> {
        let chunks = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (start, end))| Chunk::from_raw(start, end, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::build(chunks, conn))
    }

    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn lookup(&self) -> Lookup {
        self.lookup
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in `(start, end)` order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn start_chunks(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter().take_while(|e| e.chunk.is_start_chunk())
    }

    pub fn end_chunks(&self, image_size: u64) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.chunk.is_end_chunk(image_size))
    }

    /// Entries with `start <= covered_end < end`: each adds at least one new
    /// byte to a prefix ending at `covered_end` without leaving a gap.
    ///
    /// The iterator is lazy and can be re-created at will; the catalog is never touched.
    pub fn discoverable_from(
        &self,
        covered_end: u64,
    ) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.discoverable_within(covered_end, covered_end)
    }

    /// Entries discoverable from at least one `covered_end` in
    /// `[first_end, last_end]`, i.e. `start <= last_end && end > first_end`,
    /// in catalog order.
    pub fn discoverable_within(
        &self,
        first_end: u64,
        last_end: u64,
    ) -> impl Iterator<Item = &CatalogEntry> + '_ {
        let candidates = match self.lookup {
            Lookup::Linear => &self.entries[..],
            Lookup::Indexed => {
                let lo = self
                    .entries
                    .partition_point(|e| e.chunk.start.saturating_add(self.max_len) <= first_end);
                let hi = self.entries.partition_point(|e| e.chunk.start <= last_end);
                &self.entries[lo.min(hi)..hi]
            }
        };
        candidates
            .iter()
            .filter(move |e| e.chunk.start <= last_end && e.chunk.end > first_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> ConnectionInfo {
        ConnectionInfo {
            image_size: 10,
            latency: 1,
            bandwidth: 1,
            num_chunks: 0,
        }
    }

    fn catalog(pairs: &[(i64, i64)]) -> ChunkCatalog {
        ChunkCatalog::from_pairs(pairs.iter().copied(), &conn()).unwrap()
    }

    fn spans<'a>(it: impl Iterator<Item = &'a CatalogEntry>) -> Vec<(u64, u64)> {
        it.map(|e| (e.chunk.start, e.chunk.end)).collect()
    }

    #[test]
    fn build_sorts_and_keeps_everything() {
        let cat = catalog(&[(5, 10), (0, 10), (0, 5), (3, 4), (0, 5)]);
        assert_eq!(cat.len(), 5);
        assert_eq!(
            spans(cat.entries().iter()),
            vec![(0, 5), (0, 5), (0, 10), (3, 4), (5, 10)]
        );
        // 2 * latency + len / bandwidth
        assert_eq!(cat.entries()[0].cost, 7.0);
        assert_eq!(cat.entries()[2].cost, 12.0);
    }

    #[test]
    fn from_pairs_rejects_bad_range() {
        let err = ChunkCatalog::from_pairs([(0, 5), (7, 7)], &conn()).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidChunkRange { line: 1, start: 7, end: 7 }
        ));
    }

    #[test]
    fn discoverable_excludes_gaps_and_non_extending() {
        let cat = catalog(&[(0, 5), (3, 4), (3, 8), (5, 10), (6, 10)]);
        assert_eq!(spans(cat.discoverable_from(0)), vec![(0, 5)]);
        assert_eq!(spans(cat.discoverable_from(5)), vec![(3, 8), (5, 10)]);
        assert_eq!(spans(cat.discoverable_from(8)), vec![(5, 10), (6, 10)]);
        assert!(cat.discoverable_from(10).next().is_none());
    }

    #[test]
    fn lookups_agree() {
        let pairs = [(0, 3), (0, 7), (1, 2), (2, 9), (4, 5), (4, 10), (7, 8), (9, 10)];
        let linear = catalog(&pairs).with_lookup(Lookup::Linear);
        let indexed = catalog(&pairs).with_lookup(Lookup::Indexed);
        for end in 0..=11 {
            assert_eq!(
                spans(linear.discoverable_from(end)),
                spans(indexed.discoverable_from(end)),
                "covered_end = {end}"
            );
        }
    }

    #[test]
    fn discoverable_within_spans_several_ends() {
        let cat = catalog(&[(0, 2), (0, 5), (1, 3), (4, 6), (6, 9), (8, 10)]);
        assert_eq!(
            spans(cat.discoverable_within(2, 5)),
            vec![(0, 5), (1, 3), (4, 6)]
        );
        assert_eq!(
            spans(cat.discoverable_within(7, 7)),
            spans(cat.discoverable_from(7))
        );
    }

    #[test]
    fn indexed_window_skips_chunks_ending_early() {
        // Longest chunk is 3 bytes, so nothing starting before 7 reaches past 9.
        let pairs: Vec<(i64, i64)> = (0..10).map(|s| (s, s + 1)).chain([(6, 9)]).collect();
        let linear = catalog(&pairs).with_lookup(Lookup::Linear);
        let indexed = catalog(&pairs).with_lookup(Lookup::Indexed);
        for (first, last) in [(0, 0), (3, 6), (9, 9), (8, 12)] {
            assert_eq!(
                spans(linear.discoverable_within(first, last)),
                spans(indexed.discoverable_within(first, last)),
                "[{first}, {last}]"
            );
        }
        assert_eq!(spans(indexed.discoverable_from(9)), vec![(9, 10)]);
        assert_eq!(spans(indexed.discoverable_from(8)), vec![(6, 9), (8, 9)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bandwidth must be positive")]
    fn zero_bandwidth_catalog_is_rejected() {
        let conn = ConnectionInfo {
            bandwidth: 0,
            ..conn()
        };
        ChunkCatalog::build([Chunk { start: 0, end: 4 }], &conn);
    }

    #[test]
    fn start_and_end_chunks() {
        let cat = catalog(&[(0, 4), (2, 10), (0, 10), (5, 9)]);
        assert_eq!(spans(cat.start_chunks()), vec![(0, 4), (0, 10)]);
        assert_eq!(spans(cat.end_chunks(10)), vec![(0, 10), (2, 10)]);
    }

    #[test]
    fn lookup_from_str() {
        assert_eq!("linear".parse::<Lookup>().unwrap(), Lookup::Linear);
        assert_eq!("Indexed".parse::<Lookup>().unwrap(), Lookup::Indexed);
        assert!("tree".parse::<Lookup>().is_err());
    }
}
