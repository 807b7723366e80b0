//! Version-token grammar for Maven-style version strings.
//!
//! Accepted shape: one or more dotted numeric segments, then any number
//! of `.`- or `-`-separated alphanumeric qualifier segments. Covers
//! `5.10.0`, `1.0-SNAPSHOT`, `32.1.2-jre`, `1.2.3.Final`, `2.0.0-M1`.

use regex::Regex;
use std::sync::OnceLock;

static VERSION_TOKEN: OnceLock<Regex> = OnceLock::new();

fn version_token() -> &'static Regex {
    VERSION_TOKEN
        .get_or_init(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)*(?:[.-][0-9A-Za-z]+)*$").unwrap())
}

/// Whether `version` matches the recognized version-token grammar.
pub fn is_well_formed(version: &str) -> bool {
    version_token().is_match(version)
}
