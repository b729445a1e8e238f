/// One node of a tool document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlNode {
    /// Arena root; holds the prolog nodes and the single root element.
    Document,
    /// Element with ordered attributes.
    Element(Element),
    /// Character data, stored unescaped.
    Text(String),
    /// `<![CDATA[...]]>` content.
    CData(String),
    /// Comment body.
    Comment(String),
    /// Processing instruction body (target and content).
    ProcessingInstruction(String),
    /// `<!DOCTYPE ...>` body.
    DocType(String),
    /// Entity reference without a predefined expansion, kept verbatim.
    EntityRef(String),
}

impl XmlNode {
    /// Element payload, if this is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Mutable element payload, if this is an element.
    pub const fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// `true` for text nodes made only of whitespace.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(t) if t.trim().is_empty())
    }
}

/// An element tag with its attributes in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    name: String,
    /// `(key, value)` pairs, values unescaped.
    attributes: Vec<(String, String)>,
}

impl Element {
    /// Element with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`].
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by key.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `NAME` attribute.
    #[must_use]
    pub fn name_attr(&self) -> Option<&str> {
        self.attr("NAME")
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// What: Set an attribute in place, appending it when absent.
    ///
    /// Inputs:
    /// - `key`: Attribute name.
    /// - `value`: New unescaped value.
    ///
    /// Output:
    /// - `true` when the stored value changed.
    ///
    /// Details:
    /// - Existing attributes keep their position so rewrites do not reorder them.
    pub fn set_attr(&mut self, key: &str, value: &str) -> bool {
        if let Some((_, v)) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            if v == value {
                return false;
            }
            value.clone_into(v);
        } else {
            self.attributes.push((key.to_string(), value.to_string()));
        }
        true
    }

    /// Append an attribute while parsing, keeping duplicates out.
    pub(crate) fn push_parsed_attr(&mut self, key: String, value: String) {
        if self.attr(&key).is_none() {
            self.attributes.push((key, value));
        }
    }
}
