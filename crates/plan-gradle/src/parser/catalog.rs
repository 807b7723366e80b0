//! Parser for Gradle version catalogs (gradle/libs.versions.toml).
//!
//! Reads the \[versions\] and \[libraries\] sections into a
//! [`Catalog`]. Library entries come in `module = "g:a"` or
//! `group`/`name` split form, with a literal `version` or a
//! `version.ref` into \[versions\].

use crate::error::{GradleError, Result};
use plan_core::{Catalog, CatalogEntry};
use std::collections::HashMap;
use toml_edit::{DocumentMut, Item, TableLike};
use tracing::{debug, warn};

pub fn parse_version_catalog(content: &str) -> Result<Catalog> {
    let doc: DocumentMut =
        content
            .parse()
            .map_err(|e: toml_edit::TomlError| GradleError::ParseError {
                message: e.to_string(),
            })?;

    let mut versions: HashMap<String, String> = HashMap::new();
    if let Some(table) = doc.get("versions").and_then(Item::as_table) {
        for (key, item) in table {
            if let Some(value) = item.as_str() {
                versions.insert(key.to_string(), value.to_string());
            }
        }
    }

    let mut catalog = Catalog::new();
    let Some(libraries) = doc.get("libraries").and_then(Item::as_table) else {
        return Ok(catalog);
    };

    for (alias, item) in libraries {
        match library_entry(item, &versions)? {
            Some(entry) => catalog.insert(alias, entry),
            None => warn!(alias, "skipping library entry with no coordinates"),
        }
    }

    debug!(aliases = catalog.len(), "parsed version catalog");
    Ok(catalog)
}

fn library_entry(
    item: &Item,
    versions: &HashMap<String, String>,
) -> Result<Option<CatalogEntry>> {
    let Some(table) = item.as_table_like() else {
        return Ok(None);
    };

    let (group, artifact) = if let Some(module) = table.get("module").and_then(Item::as_str) {
        let Some((group, artifact)) = module.split_once(':') else {
            return Err(GradleError::InvalidCoordinates {
                coordinates: module.to_string(),
            });
        };
        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            return Err(GradleError::InvalidCoordinates {
                coordinates: module.to_string(),
            });
        }
        (group.to_string(), artifact.to_string())
    } else if let (Some(group), Some(name)) = (
        table.get("group").and_then(Item::as_str),
        table.get("name").and_then(Item::as_str),
    ) {
        (group.to_string(), name.to_string())
    } else {
        return Ok(None);
    };

    Ok(Some(CatalogEntry {
        group,
        artifact,
        version: entry_version(table, versions),
    }))
}

fn entry_version(table: &dyn TableLike, versions: &HashMap<String, String>) -> Option<String> {
    let version_item = table.get("version")?;

    if let Some(value) = version_item.as_str() {
        return Some(value.to_string());
    }

    // version.ref = "key", in dotted or inline-table spelling.
    if let Some(ref_key) = version_item
        .as_table_like()
        .and_then(|t| t.get("ref"))
        .and_then(Item::as_str)
    {
        let resolved = versions.get(ref_key).cloned();
        if resolved.is_none() {
            warn!(reference = ref_key, "version.ref points at no [versions] entry");
        }
        return resolved;
    }

    None
}
