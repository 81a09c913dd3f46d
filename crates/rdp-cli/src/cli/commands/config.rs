//! `rdp config` – show where the config and log live and what is in effect.

use anyhow::Result;
use rdp_core::config::{self, RdpConfig};
use rdp_core::logging;

pub fn run_config(cfg: &RdpConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    println!("# log: {}", logging::log_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    let planner = cfg.planner();
    println!(
        "# effective: lookup={:?} bound={} dominance={}",
        planner.lookup, planner.search.bound, planner.search.dominance
    );
    Ok(())
}
