//! Merge engine: folds resolved descriptors, oldest to newest, into one
//! [`BuildPlan`].
//!
//! Precedence rules:
//! - `group`, `version`, `junit_platform`: last writer wins; a later
//!   `None` does not erase an earlier value.
//! - language level: last writer wins per field independently.
//! - dependencies: set union keyed by `(group, artifact, scope)`; on
//!   collision the later entry's version wins when it states one, and
//!   iteration order keeps the key's first-seen position.

use crate::model::{BuildPlan, CoordinateKey, ResolvedDescriptor};
use std::collections::HashMap;
use tracing::debug;

pub fn merge(descriptors: &[ResolvedDescriptor]) -> BuildPlan {
    let mut plan = BuildPlan::default();
    let mut positions: HashMap<CoordinateKey, usize> = HashMap::new();

    for descriptor in descriptors {
        if let Some(group) = &descriptor.group {
            plan.group = Some(group.clone());
        }
        if let Some(version) = &descriptor.version {
            plan.version = Some(version.clone());
        }
        if descriptor.junit_platform.is_some() {
            plan.junit_platform = descriptor.junit_platform;
        }
        plan.language.override_with(&descriptor.language);

        for coordinate in &descriptor.dependencies {
            let key = coordinate.key();
            if let Some(&position) = positions.get(&key) {
                // A later versionless declaration keeps the earlier pin.
                if coordinate.version.is_some() {
                    plan.dependencies[position].version = coordinate.version.clone();
                }
            } else {
                positions.insert(key, plan.dependencies.len());
                plan.dependencies.push(coordinate.clone());
            }
        }
    }

    debug!(
        descriptors = descriptors.len(),
        dependencies = plan.dependencies.len(),
        "merged descriptors into plan"
    );

    plan
}
