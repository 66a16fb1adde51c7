//! Writing [`Document`]s back to Glozz `.aa` XML.

use glozz_xml::{XmlElement, write_xml};

use crate::document::{Document, Metadata, Relation, Schema, Unit};
use crate::error::Result;

/// Serialize a document as a Glozz annotation file.
///
/// Units, relations and schemas are written in document order; the text is
/// not part of the annotation file and is ignored.
pub fn write_document(document: &Document) -> Result<String> {
    let mut root = XmlElement::build("annotations");

    if let Some(hashcode) = &document.hashcode {
        root.push_child(XmlElement::build("metadata").with_attribute("corpusHashcode", hashcode));
    }
    for unit in &document.units {
        root.push_child(unit_element(unit));
    }
    for relation in &document.relations {
        root.push_child(relation_element(relation));
    }
    for schema in &document.schemas {
        root.push_child(schema_element(schema));
    }

    Ok(write_xml(&root)?)
}

fn unit_element(unit: &Unit) -> XmlElement {
    let position = |name: &str, index: i64| {
        XmlElement::build(name).with_child(
            XmlElement::build("singlePosition").with_attribute("index", index.to_string()),
        )
    };

    annotation_element("unit", &unit.id, &unit.metadata, &unit.kind, &unit.features).with_child(
        XmlElement::build("positioning")
            .with_child(position("start", unit.span.start))
            .with_child(position("end", unit.span.end)),
    )
}

fn relation_element(relation: &Relation) -> XmlElement {
    let term = |id: &str| XmlElement::build("term").with_attribute("id", id);

    annotation_element(
        "relation",
        &relation.id,
        &relation.metadata,
        &relation.kind,
        &relation.features,
    )
    .with_child(
        XmlElement::build("positioning")
            .with_child(term(&relation.source))
            .with_child(term(&relation.target)),
    )
}

fn schema_element(schema: &Schema) -> XmlElement {
    let mut positioning = XmlElement::build("positioning");
    let groups = [
        ("embedded-unit", &schema.units),
        ("embedded-relation", &schema.relations),
        ("embedded-schema", &schema.schemas),
    ];
    for (tag, ids) in groups {
        for id in ids {
            positioning.push_child(XmlElement::build(tag).with_attribute("id", id));
        }
    }

    annotation_element(
        "schema",
        &schema.id,
        &schema.metadata,
        &schema.kind,
        &schema.features,
    )
    .with_child(positioning)
}

fn annotation_element(
    tag: &str,
    id: &str,
    metadata: &Metadata,
    kind: &str,
    features: &[(String, String)],
) -> XmlElement {
    let mut meta = XmlElement::build("metadata");
    for (name, value) in metadata.iter() {
        meta.push_child(text_element(name, value));
    }

    let mut feature_set = XmlElement::build("featureSet");
    for (name, value) in features {
        feature_set.push_child(text_element("feature", value).with_attribute("name", name));
    }

    XmlElement::build(tag)
        .with_attribute("id", id)
        .with_child(meta)
        .with_child(
            XmlElement::build("characterisation")
                .with_child(text_element("type", kind))
                .with_child(feature_set),
        )
}

/// Empty values become empty tags, which read back as the empty string.
fn text_element(name: &str, value: &str) -> XmlElement {
    let element = XmlElement::build(name);
    if value.is_empty() {
        element
    } else {
        element.with_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AUTHOR, CREATION_DATE};
    use crate::reader::read_document;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        let mut unit = Unit::new("stac_1", "Segment", Span::new(0, 7));
        unit.metadata = Metadata::new()
            .with(AUTHOR, "stac")
            .with(CREATION_DATE, "1")
            .with("lastModifier", "");
        unit.features.push(("Addressee".to_string(), "A & B".to_string()));

        let mut relation = Relation::new("stac_2", "Q-Elab", "stac_1", "stac_1");
        relation.metadata = Metadata::new().with(CREATION_DATE, "2");

        let mut schema = Schema::new("stac_3", "Complex_discourse_unit");
        schema.units.push("stac_1".to_string());
        schema.relations.push("stac_2".to_string());

        Document {
            hashcode: Some("feedbeef".to_string()),
            units: vec![unit],
            relations: vec![relation],
            schemas: vec![schema],
            text: None,
        }
    }

    #[test]
    fn test_written_document_reads_back_equal() {
        let doc = sample();
        let xml = write_document(&doc).unwrap();
        assert_eq!(read_document(&xml).unwrap(), doc);
    }

    #[test]
    fn test_written_layout() {
        let xml = write_document(&sample()).unwrap();

        assert!(xml.contains(r#"<metadata corpusHashcode="feedbeef"/>"#));
        assert!(xml.contains(r#"<singlePosition index="7"/>"#));
        assert!(xml.contains(r#"<term id="stac_1"/>"#));
        assert!(xml.contains(r#"<embedded-relation id="stac_2"/>"#));
        assert!(xml.contains("<creation-date>1</creation-date>"));
        assert!(xml.contains("<lastModifier/>"));

        // units come before relations, relations before schemas
        let unit_at = xml.find("<unit ").unwrap();
        let relation_at = xml.find("<relation ").unwrap();
        let schema_at = xml.find("<schema ").unwrap();
        assert!(unit_at < relation_at && relation_at < schema_at);
    }

    #[test]
    fn test_text_is_not_written() {
        let doc = sample().with_text("Hello, world");
        let xml = write_document(&doc).unwrap();
        assert!(!xml.contains("Hello, world"));
    }
}
