//! Common utilities for the Wren HTML toolkit.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - colored, deduplicated terminal output for diagnostics

pub mod warning;
