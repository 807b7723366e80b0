//! End-to-end tests over fixture descriptors: four successive variants
//! of the same project plus its version catalog.

use plan_core::{Catalog, Fragment, ParsedFragment, PlanError, Scope, pipeline};
use plan_gradle::parser::kotlin::parse_kotlin_dsl;
use plan_gradle::parser::{KotlinDslParser, parse_version_catalog};

const V1: &str = include_str!("fixtures/v1.gradle.kts");
const V2: &str = include_str!("fixtures/v2.gradle.kts");
const V3: &str = include_str!("fixtures/v3.gradle.kts");
const V4: &str = include_str!("fixtures/v4.gradle.kts");
const CATALOG: &str = include_str!("fixtures/libs.versions.toml");

fn fragments() -> Vec<Fragment> {
    vec![
        Fragment::new("v1.gradle.kts", V1),
        Fragment::new("v2.gradle.kts", V2),
        Fragment::new("v3.gradle.kts", V3),
        Fragment::new("v4.gradle.kts", V4),
    ]
}

fn catalog() -> Catalog {
    parse_version_catalog(CATALOG).unwrap()
}

fn parse(content: &str, origin: &str) -> ParsedFragment {
    parse_kotlin_dsl(content, origin).unwrap()
}

#[test]
fn test_v1_parses_completely() {
    let parsed = parse(V1, "v1.gradle.kts");
    let descriptor = &parsed.descriptor;
    assert_eq!(descriptor.group.as_deref(), Some("cn.sabercon"));
    assert_eq!(descriptor.version.as_deref(), Some("1.0-SNAPSHOT"));
    assert_eq!(descriptor.language.source, Some(20));
    assert_eq!(descriptor.language.target, Some(20));
    assert_eq!(descriptor.language.preview, None);
    assert_eq!(descriptor.junit_platform, Some(true));
    assert_eq!(descriptor.dependencies.len(), 2);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_v2_sets_level_and_preview_only() {
    let parsed = parse(V2, "v2.gradle.kts");
    let descriptor = &parsed.descriptor;
    assert_eq!(descriptor.language.source, Some(21));
    assert_eq!(descriptor.language.target, None);
    assert_eq!(descriptor.language.preview, Some(true));
    assert!(descriptor.dependencies.is_empty());
    // Preview reaches compile, run, and test: no propagation warning.
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_v4_uses_catalog_accessors() {
    let parsed = parse(V4, "v4.gradle.kts");
    let descriptor = &parsed.descriptor;
    assert_eq!(descriptor.dependencies.len(), 3);

    let names: Vec<(&str, Scope)> = descriptor
        .dependencies
        .iter()
        .map(|request| match request {
            plan_core::DependencyRequest::Alias { name, scope } => (name.as_str(), *scope),
            plan_core::DependencyRequest::Direct(_) => panic!("expected only aliases in v4"),
        })
        .collect();
    assert_eq!(
        names,
        vec![
            ("guava", Scope::Compile),
            ("junit-bom", Scope::Test),
            ("junit-jupiter", Scope::Test),
        ]
    );
}

#[test]
fn test_catalog_fixture() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.get("guava").unwrap().version.as_deref(),
        Some("32.1.2-jre")
    );
    assert!(catalog.get("junit-jupiter").unwrap().version.is_none());
}

#[test]
fn test_full_history_merges_to_canonical_plan() {
    let output = pipeline::run(&KotlinDslParser, &fragments(), &catalog()).unwrap();

    let plan = &output.plan;
    assert_eq!(plan.group.as_deref(), Some("cn.sabercon"));
    assert_eq!(plan.version.as_deref(), Some("1.0.0-SNAPSHOT"));
    assert_eq!(plan.language.source, Some(21));
    assert_eq!(plan.language.target, Some(21));
    assert_eq!(plan.language.preview, Some(true));
    assert_eq!(plan.junit_platform, Some(true));

    // First-seen key order survives the merge; the v4 alias collisions
    // fold into the entries v1/v3 introduced.
    assert_eq!(plan.dependencies.len(), 3);
    assert_eq!(plan.dependencies[0].name(), "org.junit:junit-bom");
    assert_eq!(plan.dependencies[1].name(), "org.junit.jupiter:junit-jupiter");
    assert_eq!(plan.dependencies[2].name(), "com.google.guava:guava");

    assert_eq!(
        output.canonical,
        "group cn.sabercon\n\
         version 1.0.0-SNAPSHOT\n\
         source-compatibility 21\n\
         target-compatibility 21\n\
         preview enabled\n\
         test-platform junit\n\
         dependency com.google.guava:guava:32.1.2-jre compile\n\
         dependency org.junit:junit-bom:5.10.0 test\n\
         dependency org.junit.jupiter:junit-jupiter test\n"
    );

    // junit-jupiter stays BOM-managed: warned, never rejected.
    assert!(output.parse_warnings.is_empty());
    assert_eq!(output.plan_warnings.len(), 1);
    assert!(
        output.plan_warnings[0]
            .to_string()
            .contains("org.junit.jupiter:junit-jupiter")
    );
}

#[test]
fn test_equivalent_orderings_emit_identical_bytes() {
    // v3 and v4 touch disjoint scalar fields and collide only on equal
    // dependency versions, so swapping them converges to the same state.
    let swapped = vec![
        Fragment::new("v1.gradle.kts", V1),
        Fragment::new("v2.gradle.kts", V2),
        Fragment::new("v4.gradle.kts", V4),
        Fragment::new("v3.gradle.kts", V3),
    ];

    let in_order = pipeline::run(&KotlinDslParser, &fragments(), &catalog()).unwrap();
    let reordered = pipeline::run(&KotlinDslParser, &swapped, &catalog()).unwrap();
    assert_eq!(in_order.canonical, reordered.canonical);
}

#[test]
fn test_missing_catalog_fails_on_first_alias() {
    let err = pipeline::run(&KotlinDslParser, &fragments(), &Catalog::new()).unwrap_err();
    assert!(matches!(err, PlanError::UnresolvedAlias(name) if name == "guava"));
}

#[test]
fn test_incremental_refinement_merge() {
    let older = Fragment::new(
        "older.gradle.kts",
        "group = \"cn.sabercon\"\nversion = \"1.0-SNAPSHOT\"\nsourceCompatibility = JavaVersion.VERSION_20\n",
    );
    let newer = Fragment::new(
        "newer.gradle.kts",
        "version = \"1.0.0-SNAPSHOT\"\nsourceCompatibility = JavaVersion.VERSION_21\ndependencies {\n    implementation(\"com.google.guava:guava:32.1.2-jre\")\n}\n",
    );

    let output = pipeline::run(&KotlinDslParser, &[older, newer], &Catalog::new()).unwrap();
    assert_eq!(output.plan.group.as_deref(), Some("cn.sabercon"));
    assert_eq!(output.plan.version.as_deref(), Some("1.0.0-SNAPSHOT"));
    assert_eq!(output.plan.language.source, Some(21));
    assert_eq!(output.plan.dependencies.len(), 1);
    assert_eq!(
        output.plan.dependencies[0].to_string(),
        "com.google.guava:guava:32.1.2-jre"
    );
}
