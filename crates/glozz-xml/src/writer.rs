//! Serialization of element trees back to indented XML.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::{Error, Result, XmlElement};

/// Write an element tree as a UTF-8 XML document with a declaration and
/// two-space indentation.
///
/// Text-only elements are written on one line (`<author>stac</author>`);
/// elements without content are written as empty tags.
pub fn write_xml(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| Error::Write(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    match (&element.text, element.children.as_slice()) {
        (None, []) => emit(writer, Event::Empty(start)),
        (Some(text), []) => {
            emit(writer, Event::Start(start))?;
            emit(writer, Event::Text(BytesText::new(&text.value)))?;
            emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
        }
        (None, children) => {
            emit(writer, Event::Start(start))?;
            for child in children {
                write_element(writer, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
        }
        (Some(_), _) => Err(Error::MixedContent {
            name: element.name.clone(),
            location: None,
        }),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_declaration_and_empty_root() {
        let out = write_xml(&XmlElement::build("annotations")).unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(out.contains("<annotations/>"));
    }

    #[test]
    fn test_write_text_element_inline() {
        let root = XmlElement::build("metadata")
            .with_child(XmlElement::build("author").with_text("stac"))
            .with_child(XmlElement::build("creation-date").with_text("-4"));
        let out = write_xml(&root).unwrap();

        assert!(out.contains("<author>stac</author>"));
        assert!(out.contains("<creation-date>-4</creation-date>"));
    }

    #[test]
    fn test_write_escapes_markup() {
        let root = XmlElement::build("feature")
            .with_attribute("name", "a<b")
            .with_text("x & y");
        let out = write_xml(&root).unwrap();

        let reparsed = parse(&out).unwrap();
        assert_eq!(reparsed.root.attribute("name"), Some("a<b"));
        assert_eq!(reparsed.root.text(), Some("x & y"));
    }

    #[test]
    fn test_written_tree_reparses_to_same_shape() {
        let root = XmlElement::build("annotations").with_child(
            XmlElement::build("unit")
                .with_attribute("id", "stac_1")
                .with_child(
                    XmlElement::build("positioning")
                        .with_child(
                            XmlElement::build("start").with_child(
                                XmlElement::build("singlePosition").with_attribute("index", "3"),
                            ),
                        )
                        .with_child(
                            XmlElement::build("end").with_child(
                                XmlElement::build("singlePosition").with_attribute("index", "9"),
                            ),
                        ),
                ),
        );

        let out = write_xml(&root).unwrap();
        let reparsed = parse(&out).unwrap();

        let unit = reparsed.root.child("unit").unwrap();
        assert_eq!(unit.attribute("id"), Some("stac_1"));
        let end_index = unit
            .child("positioning")
            .and_then(|p| p.child("end"))
            .and_then(|e| e.child("singlePosition"))
            .and_then(|s| s.attribute("index"));
        assert_eq!(end_index, Some("9"));
    }

    #[test]
    fn test_text_with_children_is_rejected() {
        let root = XmlElement::build("metadata")
            .with_text("oops")
            .with_child(XmlElement::build("author"));
        assert!(matches!(write_xml(&root), Err(Error::MixedContent { .. })));
    }
}
