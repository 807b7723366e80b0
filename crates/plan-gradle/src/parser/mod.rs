//! Gradle manifest parsing: Kotlin DSL fragments and version catalogs.

pub mod catalog;
pub mod kotlin;

pub use catalog::parse_version_catalog;
pub use kotlin::KotlinDslParser;

use crate::error::{GradleError, Result};
use plan_core::Scope;

/// Plugins this engine understands as declaring a Java build.
pub(crate) const KNOWN_PLUGINS: &[&str] = &["java", "java-library", "application"];

/// Maps a Gradle configuration name onto a plan scope. `None` for
/// configurations outside the modeled compile/test split.
pub(crate) fn scope_for_configuration(configuration: &str) -> Option<Scope> {
    match configuration {
        "implementation" | "api" | "compileOnly" | "runtimeOnly" => Some(Scope::Compile),
        "testImplementation" | "testCompileOnly" | "testRuntimeOnly" => Some(Scope::Test),
        _ => None,
    }
}

/// Parses a Java language-level token: `JavaVersion.VERSION_20`,
/// `JavaVersion.VERSION_1_8`, or a bare integer.
pub(crate) fn parse_java_version(token: &str) -> Result<u32> {
    let trimmed = token.trim();
    if let Ok(level) = trimmed.parse::<u32>() {
        return Ok(level);
    }
    if let Some(suffix) = trimmed.strip_prefix("JavaVersion.VERSION_") {
        // VERSION_1_8 and friends name the pre-9 scheme.
        let digits = suffix.strip_prefix("1_").unwrap_or(suffix);
        if let Ok(level) = digits.parse::<u32>() {
            return Ok(level);
        }
    }
    Err(GradleError::InvalidJavaVersion {
        token: trimmed.to_string(),
    })
}

/// Gradle exposes catalog alias `junit-jupiter` as the typed accessor
/// `libs.junit.jupiter`; this inverts that mapping.
pub(crate) fn normalize_alias(accessor: &str) -> String {
    accessor.replace('.', "-")
}
