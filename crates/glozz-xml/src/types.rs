//! Source-tracked element trees.
//!
//! Glozz files never mix text and markup inside one element, so an
//! [`XmlElement`] holds either child elements or text, never both.

use glozz_source_map::SourceInfo;

/// A parsed document: its root element and the span of the whole input.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    pub root: XmlElement,
    pub source_info: SourceInfo,
}

/// An element with its attributes, content and source range.
///
/// Elements built in memory carry the default (empty) source info.
#[derive(Debug, Clone)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<XmlAttribute>,
    /// Child elements; empty when the element holds text.
    pub children: Vec<XmlElement>,
    /// Text content; `None` when the element has children or nothing at all.
    pub text: Option<XmlText>,
    /// From the `<` of the start tag to the `>` of the end tag.
    pub source_info: SourceInfo,
}

/// An attribute value, unescaped.
#[derive(Debug, Clone)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
    /// Where the raw value sits in the source, quotes excluded.
    pub value_source: SourceInfo,
}

/// The text of a text-only element, unescaped.
#[derive(Debug, Clone)]
pub struct XmlText {
    pub value: String,
    pub source_info: SourceInfo,
}

impl XmlElement {
    /// Start building an in-memory element.
    pub fn build(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
            source_info: SourceInfo::default(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(XmlAttribute {
            name: name.into(),
            value: value.into(),
            value_source: SourceInfo::default(),
        });
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push_child(child);
        self
    }

    /// Set the text content. Writing fails if the element also has children.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(XmlText {
            value: text.into(),
            source_info: SourceInfo::default(),
        });
        self
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attribute_node(name).map(|a| a.value.as_str())
    }

    /// The attribute itself, for its source location.
    pub fn attribute_node(&self, name: &str) -> Option<&XmlAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|e| e.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |e| e.name == name)
    }

    /// The element's text; an element with no content reads as `""`.
    ///
    /// `None` if the element has child elements.
    pub fn text(&self) -> Option<&str> {
        match &self.text {
            Some(text) => Some(&text.value),
            None if self.children.is_empty() => Some(""),
            None => None,
        }
    }

    /// No attributes-independent content at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}
