//! depscan - outdated npm dependency scanner library
//!
//! Walks a directory tree, finds every `package.json` outside excluded
//! directories, and reports how many of its dependencies have a newer
//! version published:
//! - walker: bounded concurrent depth-first traversal
//! - check: registry-backed update counting
//! - output: text and JSON report lines

pub mod cancel;
pub mod check;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod version;
pub mod walker;
