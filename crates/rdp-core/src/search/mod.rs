//! Optimal cover search.
//!
//! Expands a frontier of segments one generation at a time. Every segment of
//! a round is extended by each chunk discoverable from its `covered_end`;
//! candidates reaching the image size compete for the best complete cover,
//! the rest survive into the next round only while they are no more expensive
//! than that cover. Costs never decrease under extension, so the best
//! complete cost is a sound bound that only tightens.
//!
//! The bound is applied after the whole round has been produced, so every
//! complete cover found in a round is already folded into the bound that
//! prunes that round's provisional candidates.
//!
//! With dominance on, a candidate's covered end is the end of its chunk, so a
//! round is driven by chunks: each chunk is paired with the cheapest frontier
//! segment it can extend, and only the cheapest candidate per covered end is
//! turned into a segment. Memory per round is bounded by the number of
//! distinct chunk ends rather than by frontier size times catalog size.

mod frontier;
mod segment;

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, ChunkCatalog};

use frontier::FrontierIndex;
pub use segment::Segment;

/// Pruning switches. Turning either off never changes the optimal cost, only
/// how many segments are explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Drop provisional segments costing more than the best complete cover.
    pub bound: bool,
    /// Keep only the cheapest segment per `covered_end`.
    pub dominance: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            bound: true,
            dominance: true,
        }
    }
}

/// Counters collected over one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub rounds: usize,
    /// (segment, chunk) extensions considered, before any pruning.
    pub candidates: u64,
    pub complete_covers: u64,
    pub pruned_by_bound: u64,
    pub pruned_by_dominance: u64,
    /// Segments that ran past the image size and can never complete.
    pub overshoot: u64,
    pub peak_frontier: usize,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Cheapest complete cover, or `None` when no chunk combination reaches the image size.
    pub cover: Option<Segment>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn cost(&self) -> Option<f64> {
        self.cover.as_ref().map(Segment::total_cost)
    }
}

/// Finds the minimum-cost set of catalog chunks covering exactly `[0, image_size)`.
///
/// Never fails: absence of a cover is `SearchOutcome::cover == None`. The
/// catalog is only read, so repeated searches return the same cost.
pub fn find_optimal_cover(
    catalog: &ChunkCatalog,
    image_size: u64,
    options: &SearchOptions,
) -> SearchOutcome {
    if image_size == 0 {
        tracing::debug!("image size is 0; empty cover is complete");
        return SearchOutcome {
            cover: Some(Segment::root()),
            stats: SearchStats::default(),
        };
    }

    if catalog.start_chunks().next().is_none() {
        tracing::debug!("no chunk starts at byte 0; no cover possible");
        return SearchOutcome {
            cover: None,
            stats: SearchStats::default(),
        };
    }

    let mut search = Search {
        catalog,
        image_size,
        options: *options,
        stats: SearchStats::default(),
        best: None,
        settled: HashMap::new(),
    };
    let mut frontier = vec![Segment::root()];

    while !frontier.is_empty() {
        search.stats.rounds += 1;
        search.stats.peak_frontier = search.stats.peak_frontier.max(frontier.len());

        let next_frontier = if options.dominance {
            search.expand_dominant(&frontier)
        } else {
            search.expand_all(&frontier)
        };

        tracing::trace!(
            "round {}: frontier {} -> {}, best {:?}",
            search.stats.rounds,
            frontier.len(),
            next_frontier.len(),
            search.best.as_ref().map(Segment::total_cost)
        );

        // The previous generation is released here.
        frontier = next_frontier;
    }

    let Search { best, stats, .. } = search;
    tracing::debug!(
        "search finished after {} rounds: cost={:?}, candidates={}, pruned bound={} dominance={}",
        stats.rounds,
        best.as_ref().map(Segment::total_cost),
        stats.candidates,
        stats.pruned_by_bound,
        stats.pruned_by_dominance
    );

    SearchOutcome { cover: best, stats }
}

struct Search<'c> {
    catalog: &'c ChunkCatalog,
    image_size: u64,
    options: SearchOptions,
    stats: SearchStats,
    best: Option<Segment>,
    /// Cheapest cost already carried forward for each covered_end in an earlier round.
    settled: HashMap<u64, f64>,
}

/// A candidate that has not been turned into a segment yet.
#[derive(Clone, Copy)]
struct Pending<'c> {
    cost: f64,
    /// Index of the frontier segment being extended.
    parent: usize,
    entry: &'c CatalogEntry,
}

impl Pending<'_> {
    /// Cheaper, or as cheap and produced earlier (frontier order, then catalog order).
    fn beats(&self, other: &Pending<'_>) -> bool {
        self.cost < other.cost || (self.cost == other.cost && self.parent < other.parent)
    }

    fn into_segment(self, frontier: &[Segment]) -> Segment {
        frontier[self.parent].extend(self.entry.chunk, self.entry.cost)
    }
}

impl<'c> Search<'c> {
    fn bound(&self) -> Option<f64> {
        if self.options.bound {
            self.best.as_ref().map(Segment::total_cost)
        } else {
            None
        }
    }

    /// Ties keep the cover found first.
    fn offer_complete(&mut self, cover: Segment) {
        let cheaper = self
            .best
            .as_ref()
            .map_or(true, |b| cover.total_cost() < b.total_cost());
        if cheaper {
            self.best = Some(cover);
        }
    }

    /// One round keeping only the cheapest segment per `covered_end`, dropping
    /// any that do not beat the cost already carried for that end in an
    /// earlier round. Two segments with the same `covered_end` have the same
    /// extensions, so the dearer one can never lead to a cheaper cover.
    ///
    /// `frontier` must be sorted by strictly ascending `covered_end`; the
    /// returned frontier is too.
    fn expand_dominant(&mut self, frontier: &[Segment]) -> Vec<Segment> {
        let (Some(first), Some(last)) = (frontier.first(), frontier.last()) else {
            return Vec::new();
        };
        let catalog = self.catalog;
        let index = FrontierIndex::new(frontier);
        let mut complete: Option<Pending<'c>> = None;
        let mut by_end: BTreeMap<u64, Pending<'c>> = BTreeMap::new();

        for entry in catalog.discoverable_within(first.covered_end(), last.covered_end()) {
            // Every segment ending in [start, end) can take this chunk and
            // then ends exactly at its end.
            let Some((parent, count)) = index.cheapest_in(entry.chunk.start, entry.chunk.end)
            else {
                continue;
            };
            let count = count as u64;
            self.stats.candidates += count;
            let candidate = Pending {
                cost: frontier[parent].total_cost() + entry.cost,
                parent,
                entry,
            };
            let end = entry.chunk.end;
            match end.cmp(&self.image_size) {
                Ordering::Equal => {
                    self.stats.complete_covers += count;
                    if complete.as_ref().map_or(true, |c| candidate.beats(c)) {
                        complete = Some(candidate);
                    }
                }
                Ordering::Less => {
                    self.stats.pruned_by_dominance += count - 1;
                    if self
                        .settled
                        .get(&end)
                        .is_some_and(|&cost| candidate.cost >= cost)
                    {
                        self.stats.pruned_by_dominance += 1;
                        continue;
                    }
                    match by_end.entry(end) {
                        Entry::Occupied(mut kept) => {
                            self.stats.pruned_by_dominance += 1;
                            if candidate.beats(kept.get()) {
                                kept.insert(candidate);
                            }
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(candidate);
                        }
                    }
                }
                Ordering::Greater => self.stats.overshoot += count,
            }
        }

        if let Some(cover) = complete {
            self.offer_complete(cover.into_segment(frontier));
        }

        let bound = self.bound();
        let mut next = Vec::with_capacity(by_end.len());
        for (end, pending) in by_end {
            if bound.is_some_and(|b| pending.cost > b) {
                self.stats.pruned_by_bound += 1;
                continue;
            }
            self.settled.insert(end, pending.cost);
            next.push(pending.into_segment(frontier));
        }
        next
    }

    /// One round keeping every surviving candidate. Memory grows with the
    /// unpruned frontier; used to check that dominance never changes the cost.
    fn expand_all(&mut self, frontier: &[Segment]) -> Vec<Segment> {
        let catalog = self.catalog;
        let mut provisional = Vec::new();
        for segment in frontier {
            for entry in catalog.discoverable_from(segment.covered_end()) {
                self.stats.candidates += 1;
                let next = segment.extend(entry.chunk, entry.cost);
                match next.covered_end().cmp(&self.image_size) {
                    Ordering::Equal => {
                        self.stats.complete_covers += 1;
                        self.offer_complete(next);
                    }
                    Ordering::Less => provisional.push(next),
                    Ordering::Greater => self.stats.overshoot += 1,
                }
            }
        }

        let bound = self.bound();
        let mut survivors = Vec::with_capacity(provisional.len());
        for segment in provisional {
            match bound {
                Some(b) if segment.total_cost() > b => self.stats.pruned_by_bound += 1,
                _ => survivors.push(segment),
            }
        }
        survivors
    }
}
