//! Merge flamegraph trees from a glob of trace files.
//!
//! Files are processed strictly in sequence: each one is fully parsed
//! and folded into the shared combined root before the next is opened.
//! Any failure aborts the whole aggregation; no partial combined tree
//! survives.

use super::tree::{CallTreeBuilder, FlameNode};
use crate::graph::model::CallGraph;
use crate::graph::resolve::MetricSelector;
use crate::reader::cali::CaliperReader;
use crate::utils::error::AggregateError;
use globset::GlobBuilder;
use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Aggregate every trace file matching `pattern` into one combined
/// flamegraph tree.
///
/// The active metric per file is `metric_override` when given, else
/// that file's own default metric, so it may legitimately differ file
/// to file. `rank` and `thread` select the dataset slice (default 0).
pub fn aggregate_flamegraph(
    pattern: &str,
    metric_override: Option<&str>,
    rank: u32,
    thread: u32,
) -> Result<FlameNode, AggregateError> {
    let files = expand_glob(pattern)?;
    info!("Aggregating {} trace file(s) matching {}", files.len(), pattern);

    let mut builder = CallTreeBuilder::new();
    for file in files {
        debug!("Processing trace file: {}", file.display());
        let reader = CaliperReader::read(&file)?;
        let graph = CallGraph::from_reader(&reader)?;

        let metric = match metric_override {
            Some(metric) => metric.to_string(),
            None => graph
                .default_metric()
                .map(str::to_string)
                .ok_or_else(|| AggregateError::NoDefaultMetric { file: file.clone() })?,
        };

        let selector = MetricSelector::with_slice(metric, rank, thread);
        builder
            .add_graph(&graph, &selector)
            .map_err(|source| AggregateError::Lookup {
                file: file.clone(),
                source,
            })?;
    }

    Ok(builder.finish())
}

/// Expand a glob pattern to the files it matches, in natural walk
/// order (deliberately not sorted).
///
/// `*` never crosses a path separator; only `**` descends into
/// subdirectories, matching shell glob semantics.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, AggregateError> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| AggregateError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let root = walk_root(pattern);
    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            // Walking a nonexistent root means the glob matches nothing.
            Err(error) if error.io_error().map(std::io::Error::kind)
                == Some(std::io::ErrorKind::NotFound) => continue,
            Err(error) => return Err(error.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let candidate = path.strip_prefix("./").unwrap_or(path);
        if matcher.is_match(candidate) {
            files.push(candidate.to_path_buf());
        }
    }

    debug!("Glob {} matched {} file(s)", pattern, files.len());
    Ok(files)
}

/// The longest literal directory prefix of a glob pattern; walking
/// starts there instead of the whole tree.
fn walk_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for component in Path::new(pattern).iter() {
        let literal = component
            .to_str()
            .is_some_and(|c| !c.contains(['*', '?', '[', '{']));
        if !literal {
            break;
        }
        root.push(component);
    }
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}
