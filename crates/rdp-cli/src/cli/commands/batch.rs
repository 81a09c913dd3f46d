//! `rdp batch <dir>` – solve every problem file in a directory.

use anyhow::{Context, Result};
use rdp_core::config::RdpConfig;
use std::fs;
use std::path::{Path, PathBuf};

use super::solve::plan_file;
use crate::cli::SearchArgs;

/// Files in `dir` with the given extension, sorted by path.
pub(crate) fn discover_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir: {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn run_batch(cfg: &RdpConfig, dir: &Path, search: &SearchArgs) -> Result<()> {
    let files = discover_inputs(dir, &cfg.input_extension)?;
    if files.is_empty() {
        eprintln!("No .{} files in {}", cfg.input_extension, dir.display());
        return Ok(());
    }

    let planner = search.planner(cfg);
    let mut failed = 0usize;
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match plan_file(&planner, path) {
            Ok(report) => {
                let time = report
                    .solution
                    .format_time(cfg.precision)
                    .unwrap_or_else(|| "-".to_string());
                println!("{name}: {time}");
            }
            Err(err) => {
                failed += 1;
                tracing::warn!("batch input {} failed: {:#}", path.display(), err);
                eprintln!("{name}: error: {err:#}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} input files failed", failed, files.len());
    }
    Ok(())
}
