//! Serde model for the schema.org vocabulary JSON (`all.json`).
//!
//! Only the fields needed for generation are modelled. Unknown fields
//! (`label`, `subtypes`, `supertypes`, `properties`, ...) are ignored, but
//! every modelled field is required: a document missing one of them is
//! rejected rather than generated from.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Top-level vocabulary document.
///
/// Both tables are keyed by id in a `BTreeMap` so that every walk over them
/// is ordered by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    pub types: BTreeMap<String, VocabularyType>,
    pub properties: BTreeMap<String, VocabularyProperty>,
}

/// A schema.org type such as `CreativeWork`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyType {
    pub id: String,
    /// Canonical namespace URI, used as the XSD target namespace.
    pub url: String,
    /// Ancestor ids as declared. schema.org lists them root-first.
    pub ancestors: Vec<String>,
    /// Properties declared directly on this type, excluding inherited ones.
    pub specific_properties: Vec<String>,
    pub comment_plain: String,
}

/// A schema.org property such as `headline`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabularyProperty {
    pub id: String,
    pub ranges: Vec<String>,
    pub comment_plain: String,
}

// ---------------------------------------------------------------------------
// Scalar types
// ---------------------------------------------------------------------------

/// XML Schema built-in type a property is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Float,
    Date,
    DateTime,
    Boolean,
    Time,
    AnyUri,
    String,
}

/// Exact-match range rules, checked in order. Anything else is a string.
const RANGE_RULES: &[(&str, ScalarType)] = &[
    ("Number", ScalarType::Float),
    ("Date", ScalarType::Date),
    ("DateTime", ScalarType::DateTime),
    ("Boolean", ScalarType::Boolean),
    ("Time", ScalarType::Time),
    ("URL", ScalarType::AnyUri),
];

impl ScalarType {
    /// Infer the scalar type of a property from its declared ranges.
    ///
    /// The ranges are compared as a set: `["Number", "Number"]` is `{Number}`
    /// and maps to `Float`, while `["Number", "Text"]` falls back to `String`.
    pub fn from_ranges<S: AsRef<str>>(ranges: &[S]) -> Self {
        let set: BTreeSet<&str> = ranges.iter().map(AsRef::as_ref).collect();
        if set.len() != 1 {
            return ScalarType::String;
        }
        RANGE_RULES
            .iter()
            .find(|(name, _)| set.contains(name))
            .map(|(_, scalar)| *scalar)
            .unwrap_or(ScalarType::String)
    }

    /// Qualified name using the `xs` prefix, e.g. `xs:dateTime`.
    pub fn xsd_name(self) -> &'static str {
        match self {
            ScalarType::Float => "xs:float",
            ScalarType::Date => "xs:date",
            ScalarType::DateTime => "xs:dateTime",
            ScalarType::Boolean => "xs:boolean",
            ScalarType::Time => "xs:time",
            ScalarType::AnyUri => "xs:anyURI",
            ScalarType::String => "xs:string",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xsd_name())
    }
}

// ---------------------------------------------------------------------------
// Resolved records
// ---------------------------------------------------------------------------

/// A property paired with its inferred type and documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
    pub id: String,
    pub scalar: ScalarType,
    pub doc: String,
}

/// An ancestor reference: the ancestor's id and namespace URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorRef {
    pub id: String,
    pub url: String,
}

/// A type with its ancestors and specific properties resolved against the
/// vocabulary tables. Ancestors and properties keep their declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub id: String,
    pub url: String,
    pub ancestors: Vec<AncestorRef>,
    pub properties: Vec<ResolvedProperty>,
    pub comment: String,
}

impl ResolvedType {
    pub fn ancestor_ids(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.ancestors.iter().map(|a| a.id.as_str())
    }

    pub fn has_ancestor(&self, id: &str) -> bool {
        self.ancestor_ids().any(|a| a == id)
    }
}
