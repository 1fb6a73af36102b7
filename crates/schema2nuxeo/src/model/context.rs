//! Per-run lookup tables read from local configuration files.
//!
//! A [`GenerationContext`] is built once per run and handed to every
//! emitter that needs it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::vocabulary::ResolvedType;

pub const ICON_FILE: &str = "icon_mappings.txt";
pub const MULTIPLES_FILE: &str = "valid_multiples.txt";
pub const SKIPPED_FILE: &str = "skip_fields.txt";

/// Errors raised while reading the configuration files.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: expected {expected} fields, found {found}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Small and large icon paths for a document type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Icons {
    pub small: String,
    pub large: String,
}

/// A `(type, property)` pair.
pub type FieldKey = (String, String);

#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    icons: BTreeMap<String, Icons>,
    multiples: BTreeSet<FieldKey>,
    skipped: BTreeSet<FieldKey>,
}

impl GenerationContext {
    pub fn new(
        icons: BTreeMap<String, Icons>,
        multiples: BTreeSet<FieldKey>,
        skipped: BTreeSet<FieldKey>,
    ) -> Self {
        Self {
            icons,
            multiples,
            skipped,
        }
    }

    /// Load the three configuration files from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ContextError> {
        let icons = parse_icons(&dir.join(ICON_FILE))?;
        let multiples = parse_pairs(&dir.join(MULTIPLES_FILE))?;
        let skipped = parse_pairs(&dir.join(SKIPPED_FILE))?;
        tracing::debug!(
            icons = icons.len(),
            multiples = multiples.len(),
            skipped = skipped.len(),
            "loaded generation context from {}",
            dir.display()
        );
        Ok(Self::new(icons, multiples, skipped))
    }

    pub fn is_multiple(&self, type_id: &str, property_id: &str) -> bool {
        self.multiples
            .contains(&(type_id.to_string(), property_id.to_string()))
    }

    pub fn is_skipped(&self, type_id: &str, property_id: &str) -> bool {
        self.skipped
            .contains(&(type_id.to_string(), property_id.to_string()))
    }

    pub fn icons_for(&self, type_id: &str) -> Option<&Icons> {
        self.icons.get(type_id)
    }

    /// Icons for a type: its own mapping, else the nearest ancestor's
    /// (walking the declared ancestor list from its most specific end),
    /// else empty paths.
    pub fn resolve_icons(&self, ty: &ResolvedType) -> Icons {
        self.icons_for(&ty.id)
            .or_else(|| ty.ancestor_ids().rev().find_map(|a| self.icons_for(a)))
            .cloned()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split a configuration file into whitespace-separated records.
///
/// Blank lines and `#` comments are skipped. Every record must have exactly
/// `N` fields.
fn records<const N: usize>(path: &Path, content: &str) -> Result<Vec<[String; N]>, ContextError> {
    let mut out = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
        let record = <[String; N]>::try_from(fields).map_err(|fields| ContextError::Malformed {
            path: path.to_path_buf(),
            line: index + 1,
            expected: N,
            found: fields.len(),
        })?;
        out.push(record);
    }
    Ok(out)
}

fn read(path: &Path) -> Result<String, ContextError> {
    std::fs::read_to_string(path).map_err(|source| ContextError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an icon mapping file: `type small-icon large-icon` per line.
pub fn parse_icons(path: &Path) -> Result<BTreeMap<String, Icons>, ContextError> {
    let content = read(path)?;
    parse_icons_str(path, &content)
}

pub fn parse_icons_str(
    path: &Path,
    content: &str,
) -> Result<BTreeMap<String, Icons>, ContextError> {
    Ok(records::<3>(path, content)?
        .into_iter()
        .map(|[name, small, large]| (name, Icons { small, large }))
        .collect())
}

/// Parse a `type property` pair file (multiples or skipped fields).
pub fn parse_pairs(path: &Path) -> Result<BTreeSet<FieldKey>, ContextError> {
    let content = read(path)?;
    parse_pairs_str(path, &content)
}

pub fn parse_pairs_str(path: &Path, content: &str) -> Result<BTreeSet<FieldKey>, ContextError> {
    Ok(records::<2>(path, content)?
        .into_iter()
        .map(|[type_id, property]| (type_id, property))
        .collect())
}
