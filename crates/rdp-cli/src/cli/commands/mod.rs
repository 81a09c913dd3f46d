//! CLI command handlers, one per file.

mod batch;
mod config;
mod solve;

pub use batch::run_batch;
pub use config::run_config;
pub use solve::run_solve;
