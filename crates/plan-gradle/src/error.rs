//! Errors specific to Gradle descriptor ingestion.

use plan_core::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradleError {
    #[error("failed to parse Gradle file: {message}")]
    ParseError { message: String },

    #[error("unknown plugin '{id}'")]
    UnknownPlugin { id: String },

    #[error("invalid dependency coordinates '{coordinates}': expected 'group:artifact' or 'group:artifact:version'")]
    InvalidCoordinates { coordinates: String },

    #[error("unrecognized Java version token '{token}'")]
    InvalidJavaVersion { token: String },
}

pub type Result<T> = std::result::Result<T, GradleError>;

impl GradleError {
    /// Crosses into the core error surface, attaching the fragment
    /// origin.
    pub fn into_malformed(self, origin: &str) -> PlanError {
        PlanError::MalformedDescriptor {
            origin: origin.to_string(),
            message: self.to_string(),
        }
    }

    /// Like [`Self::into_malformed`], with the offending 1-based line.
    pub fn into_malformed_at(self, origin: &str, line: usize) -> PlanError {
        PlanError::MalformedDescriptor {
            origin: origin.to_string(),
            message: format!("line {line}: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_plugin_display() {
        let err = GradleError::UnknownPlugin { id: "scala".into() };
        assert_eq!(err.to_string(), "unknown plugin 'scala'");
    }

    #[test]
    fn test_invalid_coordinates_display() {
        let err = GradleError::InvalidCoordinates {
            coordinates: "junit".into(),
        };
        assert!(err.to_string().contains("expected 'group:artifact'"));
    }

    #[test]
    fn test_conversion_attaches_origin_and_line() {
        let err = GradleError::InvalidJavaVersion {
            token: "JavaVersion.VERSION_X".into(),
        };
        let plan_err = err.into_malformed_at("build.gradle.kts", 9);
        let PlanError::MalformedDescriptor { origin, message } = plan_err else {
            panic!("expected MalformedDescriptor");
        };
        assert_eq!(origin, "build.gradle.kts");
        assert_eq!(
            message,
            "line 9: unrecognized Java version token 'JavaVersion.VERSION_X'"
        );
    }
}
