//! Plan validation: internal-consistency checks over a merged plan.
//!
//! Every check runs on every call; issues are collected, not
//! short-circuited, so one pass surfaces all inconsistencies. Issues
//! reject the plan as a whole; warnings never do.

use crate::model::BuildPlan;
use crate::version;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    IncompatibleLanguageLevels { source: u32, target: u32 },
    PreviewWithoutLevel,
    DuplicateCoordinate { key: String },
    MalformedVersion { coordinate: String, version: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleLanguageLevels { source, target } => write!(
                f,
                "target compatibility {target} is below source compatibility {source}"
            ),
            Self::PreviewWithoutLevel => {
                write!(f, "preview features enabled without a source compatibility level")
            }
            Self::DuplicateCoordinate { key } => {
                write!(f, "duplicate dependency coordinate {key}")
            }
            Self::MalformedVersion {
                coordinate,
                version,
            } => write!(f, "malformed version '{version}' for {coordinate}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanWarning {
    UnpairedLanguageLevel {
        present: &'static str,
        missing: &'static str,
    },
    MissingVersion {
        coordinate: String,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnpairedLanguageLevel { present, missing } => write!(
                f,
                "{present} compatibility is set but {missing} compatibility is not"
            ),
            Self::MissingVersion { coordinate } => {
                write!(f, "no version declared for {coordinate}")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<PlanWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn validate(plan: &BuildPlan) -> ValidationReport {
    let mut report = ValidationReport::default();

    match (plan.language.source, plan.language.target) {
        (Some(source), Some(target)) => {
            if target < source {
                report
                    .issues
                    .push(ValidationIssue::IncompatibleLanguageLevels { source, target });
            }
        }
        (Some(_), None) => report.warnings.push(PlanWarning::UnpairedLanguageLevel {
            present: "source",
            missing: "target",
        }),
        (None, Some(_)) => report.warnings.push(PlanWarning::UnpairedLanguageLevel {
            present: "target",
            missing: "source",
        }),
        (None, None) => {}
    }

    if plan.language.preview == Some(true) && plan.language.source.is_none() {
        report.issues.push(ValidationIssue::PreviewWithoutLevel);
    }

    // The merge engine dedupes by key; re-checking here guards that
    // invariant when a plan was assembled some other way.
    let mut seen = HashSet::new();
    for coordinate in &plan.dependencies {
        if !seen.insert(coordinate.key()) {
            report.issues.push(ValidationIssue::DuplicateCoordinate {
                key: coordinate.key().to_string(),
            });
        }
    }

    for coordinate in &plan.dependencies {
        match &coordinate.version {
            Some(version) if !version::is_well_formed(version) => {
                report.issues.push(ValidationIssue::MalformedVersion {
                    coordinate: coordinate.name(),
                    version: version.clone(),
                });
            }
            Some(_) => {}
            None => report.warnings.push(PlanWarning::MissingVersion {
                coordinate: coordinate.name(),
            }),
        }
    }

    report
}
