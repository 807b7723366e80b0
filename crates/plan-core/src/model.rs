//! Domain types for descriptor fragments, catalogs, and merged build plans.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dependency scope. `Compile` sorts before `Test` so canonical emission
/// has a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Compile,
    Test,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-qualified dependency coordinate.
///
/// `(group, artifact, scope)` identifies an entry within a plan; merging
/// may override `version` but never `scope`. `version` is absent for
/// BOM-managed declarations such as `"org.junit.jupiter:junit-jupiter"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
    pub scope: Scope,
}

impl Coordinate {
    pub fn key(&self) -> CoordinateKey {
        CoordinateKey {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            scope: self.scope,
        }
    }

    /// Canonical identifier: "{group}:{artifact}".
    pub fn name(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}

/// Identity of a dependency entry within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    pub group: String,
    pub artifact: String,
    pub scope: Scope,
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.group, self.artifact, self.scope)
    }
}

/// A dependency as declared in a fragment: either a literal coordinate or
/// a catalog alias. The alias scope comes from the declaring
/// configuration, not from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyRequest {
    Direct(Coordinate),
    Alias { name: String, scope: Scope },
}

/// Java language-level settings. Fields are independent: later fragments
/// may set `target` without restating `source`, or flip `preview` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageLevel {
    pub source: Option<u32>,
    pub target: Option<u32>,
    pub preview: Option<bool>,
}

impl LanguageLevel {
    /// Field-level last-writer-wins: each field of `later` overrides
    /// independently when present.
    pub fn override_with(&mut self, later: &Self) {
        if later.source.is_some() {
            self.source = later.source;
        }
        if later.target.is_some() {
            self.target = later.target;
        }
        if later.preview.is_some() {
            self.preview = later.preview;
        }
    }
}

/// One parsed descriptor fragment. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Where the fragment came from, for diagnostics (path or label).
    pub origin: String,
    pub group: Option<String>,
    pub version: Option<String>,
    pub language: LanguageLevel,
    /// `tasks.test { useJUnitPlatform() }` wiring.
    pub junit_platform: Option<bool>,
    pub dependencies: Vec<DependencyRequest>,
}

impl ProjectDescriptor {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            group: None,
            version: None,
            language: LanguageLevel::default(),
            junit_platform: None,
            dependencies: Vec::new(),
        }
    }
}

/// A descriptor whose aliases have all been resolved against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDescriptor {
    pub origin: String,
    pub group: Option<String>,
    pub version: Option<String>,
    pub language: LanguageLevel,
    pub junit_platform: Option<bool>,
    pub dependencies: Vec<Coordinate>,
}

/// A version-catalog entry: the coordinate an alias stands for. The
/// version may be absent when the catalog leaves it to a BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl CatalogEntry {
    /// Materializes the entry at a use site with the declaring scope.
    pub fn coordinate(&self, scope: Scope) -> Coordinate {
        Coordinate {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            version: self.version.clone(),
            scope,
        }
    }
}

/// Alias name → coordinate lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(alias.into(), entry);
    }

    pub fn get(&self, alias: &str) -> Option<&CatalogEntry> {
        self.entries.get(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The merged, fully-resolved output of the pipeline. `dependencies` is
/// deduplicated by [`CoordinateKey`] and iterates in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub group: Option<String>,
    pub version: Option<String>,
    pub language: LanguageLevel,
    pub junit_platform: Option<bool>,
    pub dependencies: Vec<Coordinate>,
}
