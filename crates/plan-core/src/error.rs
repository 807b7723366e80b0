//! Error taxonomy for the plan pipeline.
//!
//! Parser and resolver failures abort the run for the offending fragment;
//! validation issues are collected exhaustively and surface together in
//! [`PlanError::Rejected`].

use crate::validate::ValidationIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("malformed descriptor {origin}: {message}")]
    MalformedDescriptor { origin: String, message: String },

    #[error("no catalog entry for alias '{0}'")]
    UnresolvedAlias(String),

    #[error("build plan rejected with {} validation issue(s)", .issues.len())]
    Rejected { issues: Vec<ValidationIssue> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
