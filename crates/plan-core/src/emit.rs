//! Canonical plan emission.
//!
//! Fixed field order, absent fields omitted, dependencies sorted by
//! group, then artifact, then scope. Two semantically equal plans emit
//! byte-identical text regardless of the fragment order that built them.

use crate::model::{BuildPlan, Coordinate};
use std::fmt::Write;

pub fn emit(plan: &BuildPlan) -> String {
    let mut out = String::new();

    if let Some(group) = &plan.group {
        let _ = writeln!(out, "group {group}");
    }
    if let Some(version) = &plan.version {
        let _ = writeln!(out, "version {version}");
    }
    if let Some(source) = plan.language.source {
        let _ = writeln!(out, "source-compatibility {source}");
    }
    if let Some(target) = plan.language.target {
        let _ = writeln!(out, "target-compatibility {target}");
    }
    if plan.language.preview == Some(true) {
        out.push_str("preview enabled\n");
    }
    if plan.junit_platform == Some(true) {
        out.push_str("test-platform junit\n");
    }

    let mut dependencies: Vec<&Coordinate> = plan.dependencies.iter().collect();
    dependencies.sort_by(|a, b| {
        (&a.group, &a.artifact, a.scope).cmp(&(&b.group, &b.artifact, b.scope))
    });
    for coordinate in dependencies {
        let _ = writeln!(out, "dependency {coordinate} {}", coordinate.scope);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LanguageLevel, Scope};

    fn coordinate(group: &str, artifact: &str, version: Option<&str>, scope: Scope) -> Coordinate {
        Coordinate {
            group: group.into(),
            artifact: artifact.into(),
            version: version.map(Into::into),
            scope,
        }
    }

    #[test]
    fn test_emit_full_plan() {
        let plan = BuildPlan {
            group: Some("cn.sabercon".into()),
            version: Some("1.0.0-SNAPSHOT".into()),
            language: LanguageLevel {
                source: Some(21),
                target: Some(21),
                preview: Some(true),
            },
            junit_platform: Some(true),
            dependencies: vec![
                coordinate("org.junit.jupiter", "junit-jupiter", None, Scope::Test),
                coordinate("com.google.guava", "guava", Some("32.1.2-jre"), Scope::Compile),
            ],
        };

        assert_eq!(
            emit(&plan),
            "group cn.sabercon\n\
             version 1.0.0-SNAPSHOT\n\
             source-compatibility 21\n\
             target-compatibility 21\n\
             preview enabled\n\
             test-platform junit\n\
             dependency com.google.guava:guava:32.1.2-jre compile\n\
             dependency org.junit.jupiter:junit-jupiter test\n"
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let plan = BuildPlan {
            group: Some("cn.sabercon".into()),
            ..BuildPlan::default()
        };
        assert_eq!(emit(&plan), "group cn.sabercon\n");
        assert_eq!(emit(&BuildPlan::default()), "");
    }

    #[test]
    fn test_disabled_preview_emits_like_unset() {
        let explicit = BuildPlan {
            language: LanguageLevel {
                source: Some(21),
                target: None,
                preview: Some(false),
            },
            ..BuildPlan::default()
        };
        let unset = BuildPlan {
            language: LanguageLevel {
                source: Some(21),
                target: None,
                preview: None,
            },
            ..BuildPlan::default()
        };
        assert_eq!(emit(&explicit), emit(&unset));
    }

    #[test]
    fn test_dependency_order_is_canonical() {
        let forward = BuildPlan {
            dependencies: vec![
                coordinate("b.group", "lib", Some("1.0"), Scope::Compile),
                coordinate("a.group", "lib", Some("1.0"), Scope::Test),
                coordinate("a.group", "lib", Some("1.0"), Scope::Compile),
            ],
            ..BuildPlan::default()
        };
        let reversed = BuildPlan {
            dependencies: forward.dependencies.iter().rev().cloned().collect(),
            ..BuildPlan::default()
        };

        // Insertion order differs, emission must not.
        assert_eq!(emit(&forward), emit(&reversed));
        assert_eq!(
            emit(&forward),
            "dependency a.group:lib:1.0 compile\n\
             dependency a.group:lib:1.0 test\n\
             dependency b.group:lib:1.0 compile\n"
        );
    }

    #[test]
    fn test_dependency_line_shape() {
        let plan = BuildPlan {
            dependencies: vec![coordinate("junit", "junit", Some("4.13.2"), Scope::Test)],
            ..BuildPlan::default()
        };
        insta::assert_snapshot!(emit(&plan), @"dependency junit:junit:4.13.2 test");
    }
}
