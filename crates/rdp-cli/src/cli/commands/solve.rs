//! `rdp solve [path]` – plan one problem and print the result.

use anyhow::{Context, Result};
use rdp_core::config::RdpConfig;
use rdp_core::input::LineReader;
use rdp_core::planner::{PlanReport, Planner, Solution};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::cli::{OutputFormat, SearchArgs};

/// Reads and plans one problem file.
pub(crate) fn plan_file(planner: &Planner, path: &Path) -> Result<PlanReport> {
    let file = File::open(path).with_context(|| format!("open input: {}", path.display()))?;
    let report = planner
        .plan(&mut LineReader::new(BufReader::new(file)))
        .with_context(|| format!("read problem: {}", path.display()))?;
    Ok(report)
}

/// Text: the time (plus chunks when asked), or nothing without a solution.
pub(crate) fn render(
    report: &PlanReport,
    format: OutputFormat,
    show_chunks: bool,
    precision: usize,
) -> Result<String> {
    if format == OutputFormat::Json {
        let mut json = report.to_json().context("serialize report")?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = String::new();
    if let Solution::Found { chunks, .. } = &report.solution {
        if let Some(time) = report.solution.format_time(precision) {
            writeln!(out, "{time}")?;
        }
        if show_chunks {
            for chunk in chunks {
                writeln!(out, "  {chunk}")?;
            }
        }
    }
    Ok(out)
}

pub fn run_solve(
    cfg: &RdpConfig,
    input: Option<&Path>,
    format: OutputFormat,
    show_chunks: bool,
    search: &SearchArgs,
) -> Result<()> {
    let planner = search.planner(cfg);
    let report = match input {
        Some(path) => plan_file(&planner, path)?,
        None => {
            let stdin = io::stdin();
            planner
                .plan(&mut LineReader::new(stdin.lock()))
                .context("read problem from stdin")?
        }
    };
    tracing::info!(
        "solved image_size={} chunks={} time={:?} rounds={}",
        report.image_size,
        report.catalog_size,
        report.solution.download_time(),
        report.stats.rounds
    );
    print!("{}", render(&report, format, show_chunks, cfg.precision)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str) -> PlanReport {
        Planner::default()
            .plan(&mut LineReader::new(text.as_bytes()))
            .unwrap()
    }

    #[test]
    fn text_prints_three_decimals() {
        let r = report("10\n1\n1\n2\n0,5\n3,10\n");
        assert_eq!(render(&r, OutputFormat::Text, false, 3).unwrap(), "16.000\n");
    }

    #[test]
    fn text_lists_chunks_on_request() {
        let r = report("10\n1\n1\n2\n0,5\n3,10\n");
        assert_eq!(
            render(&r, OutputFormat::Text, true, 1).unwrap(),
            "16.0\n  [0, 5)\n  [3, 10)\n"
        );
    }

    #[test]
    fn no_solution_prints_nothing() {
        let r = report("10\n1\n1\n1\n1,10\n");
        assert_eq!(render(&r, OutputFormat::Text, true, 3).unwrap(), "");
    }

    #[test]
    fn json_is_a_full_report() {
        let r = report("10\n1\n1\n1\n1,10\n");
        let out = render(&r, OutputFormat::Json, false, 3).unwrap();
        assert!(out.contains("\"no_solution\""));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn plan_file_names_the_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.input");
        std::fs::write(&path, "10\nx\n").unwrap();
        let err = plan_file(&Planner::default(), &path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("bad.input"), "{msg}");
        assert!(msg.contains("line 2"), "{msg}");
    }
}
