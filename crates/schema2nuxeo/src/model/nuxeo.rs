//! Names, namespaces and file layout of the generated Nuxeo bundle.

/// XML Schema namespace, bound to the `xs` prefix.
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const XS_PREFIX: &str = "xs";

/// Shared list types schema (`lt:` prefix).
pub mod list_types {
    pub const PREFIX: &str = "lt";
    pub const NS: &str = "http://courseload.com/nuxeo/listTypes";
    pub const SCHEMA_NAME: &str = "listTypes";
    pub const FILE: &str = "listTypes.xsd";
    /// Local name of the multi-valued text type.
    pub const TEXT_LIST: &str = "textList";
    /// Qualified name used as an element type.
    pub const TEXT_LIST_QNAME: &str = "lt:textList";
}

/// Output directory layout, relative to the target directory.
pub mod layout {
    pub const SCHEMA_DIR: &str = "schema";
    pub const TYPES_DIR: &str = "osgi";
}

/// Schema registration contribution.
pub mod core_types {
    pub const COMPONENT: &str = "com.courseload.nuxeo.schemadotorg.coreTypes";
    pub const FILE: &str = "core-types-contrib.xml";
    pub const TARGET: &str = "org.nuxeo.ecm.core.schema.TypeService";
    pub const POINT: &str = "schema";
}

/// Document type contribution.
pub mod doc_types {
    pub const COMPONENT: &str = "com.courseload.nuxeo.schemadotorg.types";
    pub const FILE: &str = "ecm-types-contrib.xml";
    pub const TARGET: &str = "org.nuxeo.ecm.core.schema.TypeService";
    pub const POINT: &str = "doctype";
    pub const EXTENDS: &str = "File";
    /// Schemas every generated document type carries before its own.
    pub const BASELINE_SCHEMAS: [&str; 2] = ["common", "dublincore"];
}

/// UI type contribution.
pub mod ui_types {
    pub const COMPONENT: &str = "com.courseload.nuxeo.schemadotorg.ecm.types";
    pub const FILE: &str = "ui-types-contrib.xml";
    pub const REQUIRE: &str = "org.nuxeo.ecm.platform.types";
    pub const TARGET: &str = "org.nuxeo.ecm.platform.types.TypeService";
    pub const POINT: &str = "types";
    pub const CATEGORY: &str = "SimpleDocument";
    pub const DEFAULT_VIEW: &str = "view_documents";
    pub const LAYOUT_MODE: &str = "any";
    pub const LAYOUT: &str = "creative_work";
    /// Container types that may hold every generated type.
    pub const CONTAINERS: [&str; 2] = ["Folder", "Workspace"];
}

/// Suffix Nuxeo Studio reserves for its own generated names.
const RESERVED_SUFFIX: &str = "Type";

/// Element name for a property id.
///
/// Ids ending in `Type` would collide with names Nuxeo generates internally,
/// so they get a trailing underscore.
pub fn element_name(property_id: &str) -> String {
    if property_id.ends_with(RESERVED_SUFFIX) {
        format!("{property_id}_")
    } else {
        property_id.to_string()
    }
}

/// File name of the generated schema for a type id.
pub fn schema_file(type_id: &str) -> String {
    format!("{type_id}.xsd")
}

/// Bundle-relative location of a schema file, as registered in the
/// schema contribution.
pub fn schema_src(file: &str) -> String {
    format!("{}/{file}", layout::SCHEMA_DIR)
}
