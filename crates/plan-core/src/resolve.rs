//! Catalog resolution: symbolic aliases → concrete coordinates.

use crate::error::{PlanError, Result};
use crate::model::{Catalog, DependencyRequest, ProjectDescriptor, ResolvedDescriptor};
use tracing::debug;

/// Resolves every alias in `descriptor` against `catalog`.
///
/// Total and order-preserving: the output sequence has the same length
/// and order as the input; direct coordinates pass through untouched.
/// An alias with no catalog entry is [`PlanError::UnresolvedAlias`],
/// never a silent default.
pub fn resolve(descriptor: ProjectDescriptor, catalog: &Catalog) -> Result<ResolvedDescriptor> {
    let ProjectDescriptor {
        origin,
        group,
        version,
        language,
        junit_platform,
        dependencies,
    } = descriptor;

    let mut resolved = Vec::with_capacity(dependencies.len());
    let mut aliases = 0usize;
    for request in dependencies {
        match request {
            DependencyRequest::Direct(coordinate) => resolved.push(coordinate),
            DependencyRequest::Alias { name, scope } => {
                let entry = catalog
                    .get(&name)
                    .ok_or(PlanError::UnresolvedAlias(name))?;
                resolved.push(entry.coordinate(scope));
                aliases += 1;
            }
        }
    }

    debug!(
        origin = %origin,
        dependencies = resolved.len(),
        aliases,
        "resolved descriptor against catalog"
    );

    Ok(ResolvedDescriptor {
        origin,
        group,
        version,
        language,
        junit_platform,
        dependencies: resolved,
    })
}
