//! XSD documents: one per vocabulary type, plus the shared list types.

use std::io::{self, Write};

use quick_xml::Writer;

use super::{empty, end, start, text_element, XmlEmitter};
use crate::model::context::GenerationContext;
use crate::model::nuxeo::{self, list_types, XS_NS, XS_PREFIX};
use crate::model::vocabulary::ResolvedType;

/// An element declaration in a type schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl<'a> {
    pub name: String,
    pub type_name: &'static str,
    pub doc: &'a str,
}

/// Schema for a single vocabulary type.
pub struct SchemaEmitter<'a> {
    ty: &'a ResolvedType,
    context: &'a GenerationContext,
}

impl<'a> SchemaEmitter<'a> {
    pub fn new(ty: &'a ResolvedType, context: &'a GenerationContext) -> Self {
        Self { ty, context }
    }

    pub fn file_name(&self) -> String {
        nuxeo::schema_file(&self.ty.id)
    }

    /// Element declarations in declared property order, skipped fields
    /// removed and multi-valued fields typed as text lists.
    pub fn elements(&self) -> Vec<ElementDecl<'a>> {
        let type_id = self.ty.id.as_str();
        self.ty
            .properties
            .iter()
            .filter(|prop| !self.context.is_skipped(type_id, &prop.id))
            .map(|prop| {
                let type_name = if self.context.is_multiple(type_id, &prop.id) {
                    list_types::TEXT_LIST_QNAME
                } else {
                    prop.scalar.xsd_name()
                };
                ElementDecl {
                    name: nuxeo::element_name(&prop.id),
                    type_name,
                    doc: prop.doc.as_str(),
                }
            })
            .collect()
    }
}

fn xs(local: &str) -> String {
    format!("{XS_PREFIX}:{local}")
}

impl XmlEmitter for SchemaEmitter<'_> {
    fn emit<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let schema = xs("schema");
        let xmlns_xs = format!("xmlns:{XS_PREFIX}");
        let xmlns_lt = format!("xmlns:{}", list_types::PREFIX);
        start(
            writer,
            &schema,
            &[
                (xmlns_xs.as_str(), XS_NS),
                (xmlns_lt.as_str(), list_types::NS),
                ("targetNamespace", self.ty.url.as_str()),
            ],
        )?;

        let import = xs("import");
        empty(
            writer,
            &import,
            &[
                ("namespace", list_types::NS),
                ("schemaLocation", list_types::FILE),
            ],
        )?;
        for ancestor in &self.ty.ancestors {
            let location = nuxeo::schema_file(&ancestor.id);
            empty(
                writer,
                &import,
                &[
                    ("namespace", ancestor.url.as_str()),
                    ("schemaLocation", location.as_str()),
                ],
            )?;
        }

        let element = xs("element");
        let annotation = xs("annotation");
        let documentation = xs("documentation");
        for decl in self.elements() {
            start(
                writer,
                &element,
                &[("name", decl.name.as_str()), ("type", decl.type_name)],
            )?;
            start(writer, &annotation, &[])?;
            text_element(writer, &documentation, &[], decl.doc)?;
            end(writer, &annotation)?;
            end(writer, &element)?;
        }

        end(writer, &schema)
    }
}

/// The shared `listTypes.xsd` that multi-valued elements refer to.
pub struct ListTypesEmitter;

impl ListTypesEmitter {
    pub fn file_name(&self) -> &'static str {
        list_types::FILE
    }
}

impl XmlEmitter for ListTypesEmitter {
    fn emit<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let schema = xs("schema");
        let simple_type = xs("simpleType");
        let item_type = xs("string");
        let xmlns_xs = format!("xmlns:{XS_PREFIX}");
        start(
            writer,
            &schema,
            &[
                (xmlns_xs.as_str(), XS_NS),
                ("targetNamespace", list_types::NS),
            ],
        )?;
        start(writer, &simple_type, &[("name", list_types::TEXT_LIST)])?;
        empty(writer, &xs("list"), &[("itemType", item_type.as_str())])?;
        end(writer, &simple_type)?;
        end(writer, &schema)
    }
}
