//! Tracing setup. Events are appended to `$XDG_STATE_HOME/rdp/rdp.log`; when
//! that file cannot be opened the CLI installs a stderr subscriber instead.
//! Stdout carries results only.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// `rdp` prefix-matches both the library (`rdp_core::…`) and the binary (`rdp::…`).
const DEFAULT_FILTER: &str = "info,rdp=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Location of the log file. Nothing is created.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rdp")?;
    Ok(xdg_dirs.get_state_home().join("rdp").join("rdp.log"))
}

/// Per-event destination handed out by [`AppendLog`].
enum LogTarget {
    File(fs::File),
    Stderr(io::Stderr),
}

impl io::Write for LogTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogTarget::File(f) => f.write(buf),
            LogTarget::Stderr(e) => e.lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogTarget::File(f) => f.flush(),
            LogTarget::Stderr(e) => e.lock().flush(),
        }
    }
}

/// An append-mode log file shared by every event. If the handle cannot be
/// duplicated the event goes to stderr rather than being lost.
struct AppendLog(fs::File);

impl<'a> MakeWriter<'a> for AppendLog {
    type Writer = LogTarget;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(file) => LogTarget::File(file),
            Err(_) => LogTarget::Stderr(io::stderr()),
        }
    }
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))
}

/// Log to the XDG state file. Errors (unwritable dir, subscriber already set)
/// are returned so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log dir {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    install(AppendLog(file))?;
    tracing::info!("rdp logging to {}", path.display());
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = install(io::stderr);
}
