//! pagekit Library
//!
//! Headless host for the pagekit engine: loads a page fixture, drives it
//! with line commands and reports page changes as NDJSON.

pub mod headless;

// Re-export main entry points
pub use headless::runner::run_headless;
