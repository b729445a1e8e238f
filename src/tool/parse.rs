use std::path::Path;

use ego_tree::{NodeId, Tree};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::node::{Element, XmlNode};
use crate::error::{Error, Result};

/// Build a parse error at `position`.
fn parse_error(path: &Path, position: u64, message: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        position,
        message: message.into(),
    }
}

/// Current reader offset as `u64`.
fn offset(reader: &Reader<&[u8]>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}

/// What: Decode a start tag into an [`Element`].
///
/// Inputs:
/// - `start`: Tag as produced by the reader.
/// - `path`, `position`: Context for error messages.
///
/// Output:
/// - Element with unescaped attribute values, or a parse error for
///   malformed or badly escaped attributes.
fn element_from(start: &BytesStart<'_>, path: &Path, position: u64) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(|e| parse_error(path, position, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map_err(|e| parse_error(path, position, format!("attribute {key}: {e}")))?
            .into_owned();
        element.push_parsed_attr(key, value);
    }
    Ok(element)
}

/// Expansion of a predefined or numeric character entity.
fn resolve_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// Append text to `parent`, extending a trailing text node when there is one.
fn push_text(tree: &mut Tree<XmlNode>, parent: NodeId, text: &str) {
    let Some(mut node) = tree.get_mut(parent) else {
        return;
    };
    if let Some(mut last) = node.last_child()
        && let XmlNode::Text(existing) = last.value()
    {
        existing.push_str(text);
        return;
    }
    node.append(XmlNode::Text(text.to_string()));
}

/// Append `value` under `parent` and return the new node's id.
fn append(tree: &mut Tree<XmlNode>, parent: NodeId, value: XmlNode) -> Option<NodeId> {
    tree.get_mut(parent).map(|mut p| p.append(value).id())
}

/// What: Parse XML text into an arena tree rooted at [`XmlNode::Document`].
///
/// Inputs:
/// - `text`: Whole document.
/// - `path`: Source file, used in error messages.
///
/// Output:
/// - Tree whose document node holds prolog nodes and exactly one root element.
///
/// Details:
/// - Fails with `Error::Parse` on reader errors, stray end tags, unclosed
///   elements, non-whitespace text outside the root, or zero/multiple roots.
/// - Whitespace between top-level nodes is dropped; the XML declaration is
///   regenerated on write and not kept.
pub(crate) fn parse_tree(text: &str, path: &Path) -> Result<Tree<XmlNode>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);
    let mut tree = Tree::new(XmlNode::Document);
    let document = tree.root().id();
    let mut stack: Vec<NodeId> = vec![document];
    let mut roots = 0usize;

    loop {
        let position = offset(&reader);
        let event = reader
            .read_event()
            .map_err(|e| parse_error(path, position, e.to_string()))?;
        let parent = stack.last().copied().unwrap_or(document);
        let at_top = stack.len() == 1;
        match event {
            Event::Start(start) => {
                let element = element_from(&start, path, position)?;
                if at_top {
                    roots += 1;
                }
                if let Some(id) = append(&mut tree, parent, XmlNode::Element(element)) {
                    stack.push(id);
                }
            }
            Event::Empty(start) => {
                let element = element_from(&start, path, position)?;
                if at_top {
                    roots += 1;
                }
                append(&mut tree, parent, XmlNode::Element(element));
            }
            Event::End(_) => {
                if at_top {
                    return Err(parse_error(path, position, "unexpected closing tag"));
                }
                stack.pop();
            }
            Event::Text(t) => {
                let raw = String::from_utf8_lossy(t.as_ref());
                let value = unescape(&raw).map_err(|e| parse_error(path, position, e.to_string()))?;
                if at_top {
                    if !value.trim().is_empty() {
                        return Err(parse_error(path, position, "text outside the root element"));
                    }
                } else {
                    push_text(&mut tree, parent, &value);
                }
            }
            Event::GeneralRef(r) => {
                let name = String::from_utf8_lossy(&r).into_owned();
                if at_top {
                    return Err(parse_error(path, position, "entity reference outside the root element"));
                }
                match resolve_entity(&name) {
                    Some(c) => push_text(&mut tree, parent, c.encode_utf8(&mut [0u8; 4])),
                    None => {
                        append(&mut tree, parent, XmlNode::EntityRef(name));
                    }
                }
            }
            Event::CData(c) => {
                let body = String::from_utf8_lossy(&c).into_owned();
                append(&mut tree, parent, XmlNode::CData(body));
            }
            Event::Comment(c) => {
                let body = String::from_utf8_lossy(&c).into_owned();
                append(&mut tree, parent, XmlNode::Comment(body));
            }
            Event::PI(pi) => {
                let body = String::from_utf8_lossy(&pi).into_owned();
                append(&mut tree, parent, XmlNode::ProcessingInstruction(body));
            }
            Event::DocType(d) => {
                let body = String::from_utf8_lossy(&d).into_owned();
                append(&mut tree, parent, XmlNode::DocType(body));
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    let end = offset(&reader);
    if stack.len() > 1 {
        return Err(parse_error(path, end, "unclosed element at end of input"));
    }
    match roots {
        1 => Ok(tree),
        0 => Err(parse_error(path, end, "no root element")),
        n => Err(parse_error(path, end, format!("{n} root elements"))),
    }
}
