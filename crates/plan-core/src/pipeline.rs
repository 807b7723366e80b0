//! The full resolution pipeline: parse → resolve → merge → validate →
//! emit.
//!
//! Single-threaded by design: each stage is a pure function over
//! immutable inputs, and the merge fold must run in fragment order to
//! preserve the last-writer-wins guarantee.

use crate::emit::emit;
use crate::error::{PlanError, Result};
use crate::merge::merge;
use crate::model::{BuildPlan, Catalog};
use crate::parser::{FragmentParser, ParseWarning};
use crate::resolve::resolve;
use crate::validate::{PlanWarning, validate};
use tracing::debug;

/// One raw configuration fragment, oldest-first in the pipeline input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub origin: String,
    pub content: String,
}

impl Fragment {
    pub fn new(origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            content: content.into(),
        }
    }
}

/// A validated plan plus its canonical serialization and everything the
/// run tolerated along the way.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub plan: BuildPlan,
    pub canonical: String,
    pub parse_warnings: Vec<ParseWarning>,
    pub plan_warnings: Vec<PlanWarning>,
}

/// Runs the whole pipeline over `fragments`, oldest to newest.
///
/// Parser and resolver errors abort immediately for the offending
/// fragment. A plan with validation issues is rejected whole via
/// [`PlanError::Rejected`]; a plan is never returned alongside issues.
pub fn run<P: FragmentParser>(
    parser: &P,
    fragments: &[Fragment],
    catalog: &Catalog,
) -> Result<PipelineOutput> {
    let mut resolved = Vec::with_capacity(fragments.len());
    let mut parse_warnings = Vec::new();

    for fragment in fragments {
        let parsed = parser.parse(&fragment.content, &fragment.origin)?;
        debug!(
            origin = %fragment.origin,
            dependencies = parsed.descriptor.dependencies.len(),
            warnings = parsed.warnings.len(),
            "parsed fragment"
        );
        parse_warnings.extend(parsed.warnings);
        resolved.push(resolve(parsed.descriptor, catalog)?);
    }

    let plan = merge(&resolved);
    let report = validate(&plan);
    if !report.is_valid() {
        return Err(PlanError::Rejected {
            issues: report.issues,
        });
    }

    let canonical = emit(&plan);
    debug!(bytes = canonical.len(), "emitted canonical plan");

    Ok(PipelineOutput {
        plan,
        canonical,
        parse_warnings,
        plan_warnings: report.warnings,
    })
}
