pub mod config;
pub mod logging;

pub mod catalog;
pub mod chunk;
pub mod connection;
pub mod error;
pub mod input;
pub mod planner;
pub mod search;
