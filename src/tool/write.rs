use std::borrow::Cow;
use std::io::Write as _;
use std::path::Path;

use ego_tree::{NodeId, NodeRef, Tree};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;

use super::node::XmlNode;
use crate::error::{Error, Result};

/// Indentation unit used when writing documents.
const INDENT_WIDTH: usize = 4;

/// What: Drop whitespace-only text between elements.
///
/// Inputs:
/// - `tree`: Document arena, mutated in place.
///
/// Output:
/// - Number of text nodes removed.
///
/// Details:
/// - Only elements that contain child elements are touched, so leaf text such
///   as `<A>  </A>` survives. Non-blank text, comments and elements are kept.
/// - The writer re-indents, which makes load → canonicalize → write a fixed point.
pub(crate) fn canonicalize(tree: &mut Tree<XmlNode>) -> usize {
    let blank: Vec<NodeId> = tree
        .root()
        .descendants()
        .filter(|n| n.value().as_element().is_some())
        .filter(|n| n.children().any(|c| c.value().as_element().is_some()))
        .flat_map(|n| {
            n.children()
                .filter(|c| c.value().is_blank_text())
                .map(|c| c.id())
                .collect::<Vec<_>>()
        })
        .collect();
    for id in &blank {
        if let Some(mut node) = tree.get_mut(*id) {
            node.detach();
        }
    }
    blank.len()
}

/// What: Escape an attribute value for output.
///
/// Inputs:
/// - `value`: Unescaped attribute value.
///
/// Output:
/// - Markup characters as entities, and tab, line feed and carriage return as
///   character references so readers do not normalize them to spaces.
fn escape_attr_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            other => out.push(other),
        }
    }
    out
}

/// Write one event, normalising the writer's error type.
fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> std::io::Result<()> {
    writer
        .write_event(event)
        .map_err(|e| std::io::Error::other(e.to_string()))
}

/// Recursively write `node` and its subtree.
fn write_node(writer: &mut Writer<Vec<u8>>, node: NodeRef<'_, XmlNode>) -> std::io::Result<()> {
    match node.value() {
        XmlNode::Document => {
            for child in node.children() {
                write_node(writer, child)?;
            }
        }
        XmlNode::Element(element) => {
            let mut start = BytesStart::new(element.name());
            for (key, value) in element.attributes() {
                start.push_attribute(Attribute {
                    key: QName(key.as_bytes()),
                    value: Cow::Owned(escape_attr_value(value).into_bytes()),
                });
            }
            if node.has_children() {
                emit(writer, Event::Start(start))?;
                for child in node.children() {
                    write_node(writer, child)?;
                }
                emit(writer, Event::End(BytesEnd::new(element.name())))?;
            } else {
                emit(writer, Event::Empty(start))?;
            }
        }
        XmlNode::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
        XmlNode::CData(body) => emit(writer, Event::CData(BytesCData::new(body.as_str())))?,
        XmlNode::Comment(body) => {
            emit(writer, Event::Comment(BytesText::from_escaped(body.as_str())))?;
        }
        XmlNode::ProcessingInstruction(body) => {
            emit(writer, Event::PI(BytesPI::new(body.as_str())))?;
        }
        XmlNode::DocType(body) => {
            emit(writer, Event::DocType(BytesText::from_escaped(body.as_str())))?;
        }
        XmlNode::EntityRef(name) => {
            emit(writer, Event::Text(BytesText::from_escaped(format!("&{name};"))))?;
        }
    }
    Ok(())
}

/// What: Serialize a document arena to UTF-8 XML.
///
/// Inputs:
/// - `tree`: Document arena.
///
/// Output:
/// - `<?xml version="1.0" encoding="UTF-8"?>` followed by the tree indented
///   with four spaces and a trailing newline.
pub(crate) fn serialize(tree: &Tree<XmlNode>) -> std::io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_node(&mut writer, tree.root())?;
    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

/// What: Replace `path` with `bytes` without leaving a half-written file.
///
/// Inputs:
/// - `path`: Destination file.
/// - `bytes`: Full new contents.
///
/// Output:
/// - `Ok(())` once the temporary file has been renamed over `path`.
///
/// Details:
/// - The temporary file lives in the destination directory so the final
///   rename never crosses filesystems. Permissions of an existing file are kept.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    if let Ok(meta) = std::fs::metadata(path)
        && let Err(e) = tmp.as_file().set_permissions(meta.permissions())
    {
        tracing::debug!(path = %path.display(), error = %e, "could not carry over file permissions");
    }
    tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
