//! Cali Transform
//!
//! Transforms Caliper performance-profiling traces into two derived
//! forms consumed by downstream analytics and visualization:
//!
//! - a flat long-format table with the fixed schema
//!   `path, annotation, dim1, dim2, value`, written as CSV
//! - a combined flamegraph tree (JSON) merged across any number of
//!   trace files
//!
//! This crate provides the core implementation for the
//! `cali-transform` CLI tool.

pub mod commands;
pub mod flamegraph;
pub mod graph;
pub mod output;
pub mod reader;
pub mod table;
pub mod utils;
