//! Building [`XmlDocument`] trees from quick-xml events.

use std::borrow::Cow;

use glozz_source_map::{FileId, SourceInfo};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::{Error, Result, XmlAttribute, XmlDocument, XmlElement, XmlText};

/// Parse an annotation file.
///
/// ```rust
/// use glozz_xml::parse;
///
/// let xml = parse("<annotations><unit/></annotations>").unwrap();
/// assert_eq!(xml.root.name, "annotations");
/// ```
pub fn parse(content: &str) -> Result<XmlDocument> {
    parse_with_file_id(content, FileId(0))
}

/// Parse, tagging every source range with `file_id`.
pub fn parse_with_file_id(content: &str, file_id: FileId) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(content);
    let mut tree = TreeBuilder {
        content,
        file_id,
        open: Vec::new(),
        root: None,
    };

    loop {
        // No text trimming, so this is the `<` of a tag or the first character of a text run
        let at = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(Error::Syntax {
                    message: err.to_string(),
                    position: Some(reader.error_position()),
                });
            }
        };
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(tag) => {
                let element = tree.element(&tag, at, end)?;
                tree.open.push(Open {
                    element,
                    text: None,
                });
            }
            Event::Empty(tag) => {
                let element = tree.element(&tag, at, end)?;
                tree.attach(element)?;
            }
            Event::End(_) => tree.close(end)?,
            Event::Text(text) => tree.text(text.unescape()?, at, end),
            Event::CData(data) => tree.text(String::from_utf8_lossy(&data.into_inner()), at, end),
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = tree.open.pop() {
        return Err(Error::Unclosed {
            name: open.element.name,
            location: Some(open.element.source_info),
        });
    }

    let root = tree.root.ok_or(Error::NoRoot)?;
    Ok(XmlDocument {
        root,
        source_info: SourceInfo::original(file_id, 0, content.len()),
    })
}

/// An element whose end tag has not been seen yet.
struct Open {
    element: XmlElement,
    text: Option<XmlText>,
}

struct TreeBuilder<'a> {
    content: &'a str,
    file_id: FileId,
    open: Vec<Open>,
    root: Option<XmlElement>,
}

impl TreeBuilder<'_> {
    fn span(&self, start: usize, end: usize) -> SourceInfo {
        SourceInfo::original(self.file_id, start, end)
    }

    /// A fresh element for a start or empty tag spanning `[at, end)`.
    fn element(&self, tag: &BytesStart<'_>, at: usize, end: usize) -> Result<XmlElement> {
        let mut attributes = Vec::new();
        for attr in tag.attributes() {
            let attr = attr?;
            let value_source = match &attr.value {
                Cow::Borrowed(raw) => self.locate(raw).unwrap_or_else(|| self.span(at, at)),
                Cow::Owned(_) => self.span(at, at),
            };
            attributes.push(XmlAttribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value: attr.unescape_value()?.into_owned(),
                value_source,
            });
        }

        Ok(XmlElement {
            name: String::from_utf8_lossy(tag.name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
            text: None,
            source_info: self.span(at, end),
        })
    }

    /// Source range of a slice borrowed from the input.
    fn locate(&self, raw: &[u8]) -> Option<SourceInfo> {
        let base = self.content.as_ptr() as usize;
        let start = (raw.as_ptr() as usize).checked_sub(base)?;
        let end = start + raw.len();
        (end <= self.content.len()).then(|| self.span(start, end))
    }

    fn text(&mut self, value: Cow<'_, str>, at: usize, end: usize) {
        let source_info = self.span(at, end);
        // Text outside the root is whitespace or a syntax error quick-xml already reported
        let Some(open) = self.open.last_mut() else {
            return;
        };
        match &mut open.text {
            Some(text) => {
                text.value.push_str(&value);
                text.source_info.end = end;
            }
            None => {
                open.text = Some(XmlText {
                    value: value.into_owned(),
                    source_info,
                })
            }
        }
    }

    /// Finish the innermost open element at its end tag.
    fn close(&mut self, end: usize) -> Result<()> {
        // quick-xml checks that end tags match, so there is always one open
        let Some(Open { mut element, text }) = self.open.pop() else {
            return Ok(());
        };
        element.source_info.end = end;

        match text {
            // Indentation between child elements
            Some(text) if !element.children.is_empty() => {
                if !text.value.trim().is_empty() {
                    return Err(Error::MixedContent {
                        name: element.name,
                        location: Some(text.source_info),
                    });
                }
            }
            text => element.text = text,
        }

        self.attach(element)
    }

    /// Hand a finished element to its parent, or make it the root.
    fn attach(&mut self, element: XmlElement) -> Result<()> {
        if let Some(parent) = self.open.last_mut() {
            parent.element.children.push(element);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(Error::MultipleRoots {
                location: Some(element.source_info),
            });
        }
        self.root = Some(element);
        Ok(())
    }
}
