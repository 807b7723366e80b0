//! File loading and pipeline execution behind the `buildplan` binary.

use plan_core::{Catalog, Fragment, PipelineOutput, Result, pipeline};
use plan_gradle::{KotlinDslParser, parse_version_catalog};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Reads descriptor fragments from disk, oldest first.
pub fn load_fragments(paths: &[PathBuf]) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(path)?;
        fragments.push(Fragment::new(path.display().to_string(), content));
    }
    Ok(fragments)
}

/// Reads and parses the version catalog, or returns an empty one when
/// no path was given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::new());
    };
    let content = fs::read_to_string(path)?;
    parse_version_catalog(&content).map_err(|e| e.into_malformed(&path.display().to_string()))
}

/// Loads everything and runs the pipeline. Warnings are logged, not
/// returned as errors; a rejected plan surfaces as
/// [`plan_core::PlanError::Rejected`].
pub fn execute(fragment_paths: &[PathBuf], catalog_path: Option<&Path>) -> Result<PipelineOutput> {
    let fragments = load_fragments(fragment_paths)?;
    let catalog = load_catalog(catalog_path)?;

    let output = pipeline::run(&KotlinDslParser, &fragments, &catalog)?;
    for warning in &output.parse_warnings {
        warn!(%warning, "fragment warning");
    }
    for warning in &output.plan_warnings {
        warn!(%warning, "plan warning");
    }
    Ok(output)
}
