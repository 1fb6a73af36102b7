//! Nuxeo component contributions registering the generated types.
//!
//! Each emitter takes the selected types in generation order and writes one
//! `<component>` document:
//! - [`CoreTypesEmitter`] registers the schemas with the type service,
//! - [`DocTypesEmitter`] declares a document type per schema,
//! - [`UiTypesEmitter`] adds UI metadata and container subtypes.

use std::io::{self, Write};

use quick_xml::Writer;

use super::{empty, end, start, text_element, XmlEmitter};
use crate::model::context::{GenerationContext, Icons};
use crate::model::nuxeo::{self, core_types, doc_types, list_types, ui_types};
use crate::model::vocabulary::ResolvedType;

fn start_extension<W: Write>(writer: &mut Writer<W>, target: &str, point: &str) -> io::Result<()> {
    start(writer, "extension", &[("target", target), ("point", point)])
}

// ---------------------------------------------------------------------------
// Schema registry
// ---------------------------------------------------------------------------

pub struct CoreTypesEmitter<'a> {
    types: &'a [&'a ResolvedType],
}

impl<'a> CoreTypesEmitter<'a> {
    pub fn new(types: &'a [&'a ResolvedType]) -> Self {
        Self { types }
    }
}

impl XmlEmitter for CoreTypesEmitter<'_> {
    fn emit<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start(writer, "component", &[("name", core_types::COMPONENT)])?;
        start_extension(writer, core_types::TARGET, core_types::POINT)?;

        let list_src = nuxeo::schema_src(list_types::FILE);
        empty(
            writer,
            "schema",
            &[
                ("name", list_types::SCHEMA_NAME),
                ("src", list_src.as_str()),
            ],
        )?;
        for ty in self.types {
            let src = nuxeo::schema_src(&nuxeo::schema_file(&ty.id));
            let prefix = ty.id.to_lowercase();
            empty(
                writer,
                "schema",
                &[
                    ("name", ty.id.as_str()),
                    ("src", src.as_str()),
                    ("prefix", prefix.as_str()),
                ],
            )?;
        }

        end(writer, "extension")?;
        end(writer, "component")
    }
}

// ---------------------------------------------------------------------------
// Document type registry
// ---------------------------------------------------------------------------

pub struct DocTypesEmitter<'a> {
    types: &'a [&'a ResolvedType],
}

impl<'a> DocTypesEmitter<'a> {
    pub fn new(types: &'a [&'a ResolvedType]) -> Self {
        Self { types }
    }
}

/// Schemas of a document type: the baseline schemas, the ancestors in
/// declared order, then the type's own schema.
pub fn doctype_schemas(ty: &ResolvedType) -> Vec<&str> {
    doc_types::BASELINE_SCHEMAS
        .iter()
        .copied()
        .chain(ty.ancestor_ids())
        .chain(std::iter::once(ty.id.as_str()))
        .collect()
}

impl XmlEmitter for DocTypesEmitter<'_> {
    fn emit<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start(writer, "component", &[("name", doc_types::COMPONENT)])?;
        text_element(writer, "require", &[], core_types::COMPONENT)?;
        start_extension(writer, doc_types::TARGET, doc_types::POINT)?;

        for ty in self.types {
            start(
                writer,
                "doctype",
                &[("name", ty.id.as_str()), ("extends", doc_types::EXTENDS)],
            )?;
            for schema in doctype_schemas(ty) {
                empty(writer, "schema", &[("name", schema)])?;
            }
            end(writer, "doctype")?;
        }

        end(writer, "extension")?;
        end(writer, "component")
    }
}

// ---------------------------------------------------------------------------
// UI metadata
// ---------------------------------------------------------------------------

pub struct UiTypesEmitter<'a> {
    entries: Vec<(&'a ResolvedType, Icons)>,
}

impl<'a> UiTypesEmitter<'a> {
    /// Keep only the types with an icon mapping of their own, in the given
    /// order. Ancestor mappings never register a type.
    pub fn new(types: &[&'a ResolvedType], context: &GenerationContext) -> Self {
        let entries = types
            .iter()
            .filter(|ty| context.icons_for(&ty.id).is_some())
            .map(|ty| (*ty, context.resolve_icons(ty)))
            .collect();
        Self { entries }
    }

    /// Ids of the types registered in the UI, in order.
    pub fn type_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(ty, _)| ty.id.as_str()).collect()
    }
}

impl XmlEmitter for UiTypesEmitter<'_> {
    fn emit<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start(writer, "component", &[("name", ui_types::COMPONENT)])?;
        text_element(writer, "require", &[], ui_types::REQUIRE)?;
        start_extension(writer, ui_types::TARGET, ui_types::POINT)?;

        for (ty, icons) in &self.entries {
            start(writer, "type", &[("id", ty.id.as_str())])?;
            text_element(writer, "icon", &[], &icons.small)?;
            text_element(writer, "bigIcon", &[], &icons.large)?;
            text_element(writer, "label", &[], &ty.id)?;
            text_element(writer, "description", &[], &ty.comment)?;
            text_element(writer, "category", &[], ui_types::CATEGORY)?;
            text_element(writer, "default-view", &[], ui_types::DEFAULT_VIEW)?;
            start(writer, "layouts", &[("mode", ui_types::LAYOUT_MODE)])?;
            text_element(writer, "layout", &[], ui_types::LAYOUT)?;
            end(writer, "layouts")?;
            end(writer, "type")?;
        }

        for container in ui_types::CONTAINERS {
            start(writer, "type", &[("id", container)])?;
            start(writer, "subtypes", &[])?;
            for id in self.type_ids() {
                text_element(writer, "type", &[], id)?;
            }
            end(writer, "subtypes")?;
            end(writer, "type")?;
        }

        end(writer, "extension")?;
        end(writer, "component")
    }
}
