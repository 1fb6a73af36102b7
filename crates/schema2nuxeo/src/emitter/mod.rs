pub mod contrib;
pub mod xsd;

use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Indentation of generated documents.
const INDENT: usize = 2;

/// Trait for documents written as a standalone XML file.
pub trait XmlEmitter {
    /// Write the root element and its content. The prolog is written by
    /// [`render`].
    fn emit<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Render a document with a UTF-8 prolog, indented.
pub fn render<E: XmlEmitter + ?Sized>(emitter: &E) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emitter.emit(&mut writer)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Writer helpers
// ---------------------------------------------------------------------------

pub(crate) fn start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> io::Result<()> {
    let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
    writer.write_event(Event::Start(tag))
}

pub(crate) fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

pub(crate) fn empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> io::Result<()> {
    let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
    writer.write_event(Event::Empty(tag))
}

/// `<name attrs>text</name>`, with `text` escaped.
pub(crate) fn text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> io::Result<()> {
    start(writer, name, attrs)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}
