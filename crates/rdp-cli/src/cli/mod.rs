//! CLI for the RDP chunk cover planner.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rdp_core::catalog::Lookup;
use rdp_core::config::{self, RdpConfig};
use rdp_core::planner::Planner;
use std::path::PathBuf;

use commands::{run_batch, run_config, run_solve};

/// Top-level CLI for the RDP planner.
#[derive(Debug, Parser)]
#[command(name = "rdp")]
#[command(about = "RDP: minimum download time for an image from overlapping chunks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Download time only (nothing when there is no solution).
    #[default]
    Text,
    /// Full report with chosen chunks and search counters.
    Json,
}

/// Search overrides shared by `solve` and `batch`; unset flags fall back to config.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Do not prune segments against the best complete cover.
    #[arg(long)]
    pub no_bound: bool,
    /// Keep every segment instead of the cheapest per covered end.
    #[arg(long)]
    pub no_dominance: bool,
    /// Catalog lookup strategy: linear or indexed.
    #[arg(long, value_name = "STRATEGY")]
    pub lookup: Option<Lookup>,
}

impl SearchArgs {
    pub fn planner(&self, cfg: &RdpConfig) -> Planner {
        let mut planner = cfg.planner();
        if self.no_bound {
            planner.search.bound = false;
        }
        if self.no_dominance {
            planner.search.dominance = false;
        }
        if let Some(lookup) = self.lookup {
            planner.lookup = lookup;
        }
        planner
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Solve one problem read from a file (or stdin) and print the minimum download time.
    Solve {
        /// Problem file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also list the chosen chunks (text format).
        #[arg(long)]
        show_chunks: bool,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Solve every problem file in a directory.
    Batch {
        /// Directory holding `*.input` files (extension set in config).
        dir: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Show the config path and effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Solve {
                input,
                format,
                show_chunks,
                search,
            } => run_solve(&cfg, input.as_deref(), format, show_chunks, &search)?,
            CliCommand::Batch { dir, search } => run_batch(&cfg, &dir, &search)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
