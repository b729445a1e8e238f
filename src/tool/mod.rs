//! Tool configuration documents (`*.tcd`, `*.tool`).
//!
//! A document is parsed into an `ego_tree` arena so the merge engine can look
//! nodes up by id and append new structure without re-walking the file.

/// Node payloads.
mod node;
/// XML reader.
mod parse;
/// Canonicalization, serialization and atomic writes.
mod write;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ego_tree::{NodeId, Tree};

pub use node::{Element, XmlNode};
pub(crate) use write::write_atomic;

use crate::error::{Error, Result};

/// Tag of the element owning the option categories.
pub const TOOL_TAG: &str = "TOOL";
/// Tag of the option container inside `TOOL`.
pub const OPTIONS_TAG: &str = "OPTIONS";
/// Tag of one option category.
pub const CATEGORY_TAG: &str = "CATEGORY";

/// Located `TOOL` and `OPTIONS` elements of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchors {
    /// The single `TOOL` element.
    pub tool: NodeId,
    /// The single `OPTIONS` child of `TOOL`.
    pub options: NodeId,
}

/// One tool's persisted configuration, loaded for a single merge pass.
#[derive(Clone, Debug)]
pub struct ToolDocument {
    /// File the document was read from and is written back to.
    path: PathBuf,
    /// Arena rooted at [`XmlNode::Document`].
    tree: Tree<XmlNode>,
}

impl ToolDocument {
    /// What: Read and parse a tool file.
    ///
    /// Inputs:
    /// - `path`: Tool file.
    ///
    /// Output:
    /// - Parsed document; `Error::NotFound` for a missing path, `Error::Parse`
    ///   for malformed XML or invalid UTF-8.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            position: u64::try_from(e.utf8_error().valid_up_to()).unwrap_or(u64::MAX),
            message: "invalid UTF-8".to_string(),
        })?;
        let doc = Self::parse(&text, path)?;
        tracing::debug!(path = %path.display(), nodes = doc.tree.nodes().count(), "loaded tool document");
        Ok(doc)
    }

    /// What: Parse XML text as if it had been read from `path`.
    ///
    /// Inputs:
    /// - `text`: Document contents.
    /// - `path`: Path recorded for error messages and [`ToolDocument::save`].
    ///
    /// Output:
    /// - Parsed document or `Error::Parse`.
    pub fn parse(text: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tree = parse::parse_tree(text, &path)?;
        Ok(Self { path, tree })
    }

    /// Source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only access to the arena.
    #[must_use]
    pub const fn tree(&self) -> &Tree<XmlNode> {
        &self.tree
    }

    /// Element stored at `id`, if the node is an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.get(id).and_then(|n| n.value().as_element())
    }

    /// What: Set an attribute on the element at `id`.
    ///
    /// Inputs:
    /// - `id`: Element node.
    /// - `key`, `value`: Attribute to write.
    ///
    /// Output:
    /// - `true` when the stored value changed; `false` when it already matched
    ///   or `id` is not an element.
    pub fn set_attr(&mut self, id: NodeId, key: &str, value: &str) -> bool {
        let Some(mut node) = self.tree.get_mut(id) else {
            return false;
        };
        node.value()
            .as_element_mut()
            .is_some_and(|e| e.set_attr(key, value))
    }

    /// Ids of the element children of `id`, in document order.
    #[must_use]
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.get(id).map_or_else(Vec::new, |n| {
            n.children()
                .filter(|c| c.value().as_element().is_some())
                .map(|c| c.id())
                .collect()
        })
    }

    /// What: Index the element children of `id` by their `NAME` attribute.
    ///
    /// Inputs:
    /// - `id`: Parent node.
    /// - `tag`: Only index children with this tag when set.
    ///
    /// Output:
    /// - Map from `NAME` to child id. When a name repeats, the first child wins.
    #[must_use]
    pub fn index_by_name(&self, id: NodeId, tag: Option<&str>) -> HashMap<String, NodeId> {
        let mut index = HashMap::new();
        for child in self.child_elements(id) {
            let Some(element) = self.element(child) else {
                continue;
            };
            if tag.is_some_and(|t| t != element.name()) {
                continue;
            }
            if let Some(name) = element.name_attr() {
                index.entry(name.to_string()).or_insert(child);
            }
        }
        index
    }

    /// What: Append an element as the last child of `parent`.
    ///
    /// Inputs:
    /// - `parent`: Existing node.
    /// - `element`: New element.
    ///
    /// Output:
    /// - Id of the new node, `None` if `parent` is not in the arena.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        self.tree
            .get_mut(parent)
            .map(|mut p| p.append(XmlNode::Element(element)).id())
    }

    /// What: Locate the `TOOL` element and its `OPTIONS` child.
    ///
    /// Inputs:
    /// - None.
    ///
    /// Output:
    /// - The anchors, or `Error::Structure` naming the first anchor that is
    ///   missing or ambiguous.
    ///
    /// Details:
    /// - `TOOL` is searched across the whole document; `OPTIONS` must be a
    ///   direct child of `TOOL`. `OPTIONS` elements nested deeper belong to
    ///   plugins and are ignored.
    pub fn anchors(&self) -> Result<Anchors> {
        let tools: Vec<NodeId> = self
            .tree
            .root()
            .descendants()
            .filter(|n| n.value().as_element().is_some_and(|e| e.name() == TOOL_TAG))
            .map(|n| n.id())
            .collect();
        let [tool] = tools[..] else {
            return Err(Error::Structure {
                anchor: TOOL_TAG,
                found: tools.len(),
            });
        };
        let options: Vec<NodeId> = self
            .child_elements(tool)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|e| e.name() == OPTIONS_TAG))
            .collect();
        let [options] = options[..] else {
            return Err(Error::Structure {
                anchor: OPTIONS_TAG,
                found: options.len(),
            });
        };
        Ok(Anchors { tool, options })
    }

    /// What: Normalize whitespace ahead of serialization.
    ///
    /// Inputs:
    /// - None.
    ///
    /// Output:
    /// - Number of whitespace-only text nodes dropped.
    pub fn canonicalize(&mut self) -> usize {
        write::canonicalize(&mut self.tree)
    }

    /// What: Serialize the current tree.
    ///
    /// Inputs:
    /// - None.
    ///
    /// Output:
    /// - UTF-8 XML with declaration, four-space indentation, no blank lines.
    ///
    /// Details:
    /// - Does not canonicalize; call [`ToolDocument::canonicalize`] first for
    ///   stable layout.
    pub fn to_xml_string(&self) -> Result<String> {
        let bytes = write::serialize(&self.tree).map_err(|e| Error::io(&self.path, e))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::io(&self.path, std::io::Error::other(e.to_string())))
    }

    /// What: Canonicalize and write the document back to its source path.
    ///
    /// Inputs:
    /// - None.
    ///
    /// Output:
    /// - `Ok(())` after an atomic replace of the file.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone();
        self.save_to(&path)
    }

    /// Canonicalize and write the document to `path`.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        self.canonicalize();
        let text = self.to_xml_string()?;
        write::write_atomic(path, text.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "wrote tool document");
        Ok(())
    }
}
