//! End-to-end planning: read a problem from the providers, build the catalog,
//! search, and hand a `Solution` to the output layer.

use serde::Serialize;

use crate::catalog::{ChunkCatalog, Lookup};
use crate::chunk::Chunk;
use crate::error::InputError;
use crate::input::{ChunkListProvider, ConnectionInfoProvider};
use crate::search::{self, SearchOptions, SearchOutcome, SearchStats};

/// Result of one plan. No solution is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Solution {
    Found {
        download_time: f64,
        chunks: Vec<Chunk>,
    },
    NoSolution,
}

impl Solution {
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        match &outcome.cover {
            Some(cover) => Solution::Found {
                download_time: cover.total_cost(),
                chunks: cover.chunks(),
            },
            None => Solution::NoSolution,
        }
    }

    pub fn download_time(&self) -> Option<f64> {
        match self {
            Solution::Found { download_time, .. } => Some(*download_time),
            Solution::NoSolution => None,
        }
    }

    /// Download time with `precision` decimal places; `None` when there is no solution.
    pub fn format_time(&self, precision: usize) -> Option<String> {
        self.download_time()
            .map(|t| format!("{:.*}", precision, t))
    }
}

/// A solution together with the search counters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub image_size: u64,
    pub catalog_size: usize,
    pub solution: Solution,
    pub stats: SearchStats,
}

impl PlanReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Search settings applied to every problem it plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    pub search: SearchOptions,
    pub lookup: Lookup,
}

impl Planner {
    pub fn new(search: SearchOptions, lookup: Lookup) -> Self {
        Self { search, lookup }
    }

    /// Reads connection parameters then exactly `num_chunks` chunks from `input`
    /// and finds the cheapest cover. Any input error aborts with no partial result.
    pub fn plan<P>(&self, input: &mut P) -> Result<PlanReport, InputError>
    where
        P: ConnectionInfoProvider + ChunkListProvider,
    {
        let conn = input.connection_info()?;
        tracing::debug!(
            "connection: image_size={} latency={} bandwidth={} num_chunks={}",
            conn.image_size,
            conn.latency,
            conn.bandwidth,
            conn.num_chunks
        );
        let chunks = input.chunks(conn.num_chunks)?;
        let catalog = ChunkCatalog::build(chunks, &conn).with_lookup(self.lookup);
        Ok(self.plan_catalog(&catalog, conn.image_size))
    }

    pub fn plan_catalog(&self, catalog: &ChunkCatalog, image_size: u64) -> PlanReport {
        let outcome = search::find_optimal_cover(catalog, image_size, &self.search);
        PlanReport {
            image_size,
            catalog_size: catalog.len(),
            solution: Solution::from_outcome(&outcome),
            stats: outcome.stats,
        }
    }
}
