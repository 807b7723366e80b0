//! Descriptor parser seam.
//!
//! Format crates (e.g. the Gradle Kotlin DSL parser) implement
//! [`FragmentParser`]; the pipeline only sees this interface.

use crate::error::Result;
use crate::model::ProjectDescriptor;
use std::fmt;

/// Parses one raw configuration fragment into a [`ProjectDescriptor`].
///
/// A pure transform: no I/O, no shared state. Uninterpretable input
/// fails with [`crate::PlanError::MalformedDescriptor`]; tolerated
/// oddities are reported as warnings instead of aborting the run.
pub trait FragmentParser {
    fn parse(&self, content: &str, origin: &str) -> Result<ParsedFragment>;
}

/// A parsed descriptor plus everything the parser tolerated but did not
/// understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFragment {
    pub descriptor: ProjectDescriptor,
    pub warnings: Vec<ParseWarning>,
}

/// A non-fatal oddity in a fragment, with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub origin: String,
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.origin, self.line, self.message)
    }
}
