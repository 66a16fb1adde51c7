//! Reading Glozz `.aa` annotation files into [`Document`]s.
//!
//! The expected layout is:
//!
//! ```text
//! <annotations>
//!   <metadata corpusHashcode="..."/>
//!   <unit id="author_date">
//!     <metadata>...<creation-date>date</creation-date>...</metadata>
//!     <characterisation><type>T</type><featureSet><feature name="n">v</feature></featureSet></characterisation>
//!     <positioning><start><singlePosition index="i"/></start><end><singlePosition index="j"/></end></positioning>
//!   </unit>
//!   <relation id="..."> ... <positioning><term id="a"/><term id="b"/></positioning></relation>
//!   <schema id="..."> ... <positioning><embedded-unit id="a"/>...</positioning></schema>
//! </annotations>
//! ```

use std::collections::HashSet;

use glozz_source_map::FileId;
use glozz_xml::{XmlElement, parse_with_file_id};
use tracing::debug;

use crate::document::{Document, Metadata, Relation, Schema, Unit};
use crate::error::{GlozzError, Result};
use crate::span::Span;

/// Read an annotation file from its XML content.
pub fn read_document(xml: &str) -> Result<Document> {
    read_document_with_file_id(xml, FileId(0))
}

/// Read an annotation file, tagging source locations with `file_id` so
/// errors can be resolved against a [`glozz_source_map::SourceContext`].
pub fn read_document_with_file_id(xml: &str, file_id: FileId) -> Result<Document> {
    let parsed = parse_with_file_id(xml, file_id)?;
    let root = &parsed.root;

    if root.name != "annotations" {
        return Err(structure(
            root,
            format!("expected <annotations> root element, found <{}>", root.name),
        ));
    }

    let mut document = Document::new();
    let mut seen = HashSet::new();

    for child in &root.children {
        match child.name.as_str() {
            "metadata" => {
                document.hashcode = child.attribute("corpusHashcode").map(str::to_string);
            }
            "unit" => {
                let unit = read_unit(child)?;
                claim_id(&mut seen, &unit.id)?;
                document.units.push(unit);
            }
            "relation" => {
                let relation = read_relation(child)?;
                claim_id(&mut seen, &relation.id)?;
                document.relations.push(relation);
            }
            "schema" => {
                let schema = read_schema(child)?;
                claim_id(&mut seen, &schema.id)?;
                document.schemas.push(schema);
            }
            other => debug!("ignoring unexpected <{}> element", other),
        }
    }

    debug!(
        units = document.units.len(),
        relations = document.relations.len(),
        schemas = document.schemas.len(),
        "read annotation document"
    );
    Ok(document)
}

fn claim_id(seen: &mut HashSet<String>, id: &str) -> Result<()> {
    if !seen.insert(id.to_string()) {
        return Err(GlozzError::DuplicateId(id.to_string()));
    }
    Ok(())
}

/// Fields shared by every annotation kind.
struct Header {
    id: String,
    metadata: Metadata,
    kind: String,
    features: Vec<(String, String)>,
}

fn read_header(element: &XmlElement) -> Result<Header> {
    let id = element
        .attribute("id")
        .ok_or_else(|| structure(element, format!("<{}> without an id", element.name)))?
        .to_string();

    let mut metadata = Metadata::new();
    if let Some(block) = element.child("metadata") {
        for entry in &block.children {
            metadata.set(&entry.name, read_text(entry)?);
        }
    }

    let mut kind = String::new();
    let mut features = Vec::new();
    if let Some(characterisation) = element.child("characterisation") {
        if let Some(ty) = characterisation.child("type") {
            kind = read_text(ty)?;
        }
        if let Some(set) = characterisation.child("featureSet") {
            for feature in set.children_named("feature") {
                let name = feature
                    .attribute("name")
                    .ok_or_else(|| structure(feature, "<feature> without a name"))?;
                features.push((name.to_string(), read_text(feature)?));
            }
        }
    }

    Ok(Header {
        id,
        metadata,
        kind,
        features,
    })
}

fn read_unit(element: &XmlElement) -> Result<Unit> {
    let header = read_header(element)?;
    let positioning = positioning(element)?;

    let start = read_position(positioning, "start")?;
    let end = read_position(positioning, "end")?;

    Ok(Unit {
        id: header.id,
        metadata: header.metadata,
        kind: header.kind,
        features: header.features,
        span: Span::new(start, end),
    })
}

fn read_relation(element: &XmlElement) -> Result<Relation> {
    let header = read_header(element)?;
    let terms = positioning(element)?
        .children_named("term")
        .map(reference_id)
        .collect::<Result<Vec<_>>>()?;

    let [source, target]: [String; 2] = terms.try_into().map_err(|terms: Vec<String>| {
        structure(
            element,
            format!(
                "relation {} has {} terms, expected 2",
                header.id,
                terms.len()
            ),
        )
    })?;

    Ok(Relation {
        id: header.id,
        metadata: header.metadata,
        kind: header.kind,
        features: header.features,
        source,
        target,
    })
}

fn read_schema(element: &XmlElement) -> Result<Schema> {
    let header = read_header(element)?;
    let mut schema = Schema {
        id: header.id,
        metadata: header.metadata,
        kind: header.kind,
        features: header.features,
        units: Vec::new(),
        relations: Vec::new(),
        schemas: Vec::new(),
    };

    for member in &positioning(element)?.children {
        let id = reference_id(member)?;
        match member.name.as_str() {
            "embedded-unit" => schema.units.push(id),
            "embedded-relation" => schema.relations.push(id),
            "embedded-schema" => schema.schemas.push(id),
            other => {
                return Err(structure(
                    member,
                    format!("unexpected <{}> in schema {}", other, schema.id),
                ));
            }
        }
    }

    Ok(schema)
}

fn positioning(element: &XmlElement) -> Result<&XmlElement> {
    element.child("positioning").ok_or_else(|| {
        structure(
            element,
            format!(
                "<{}> {} has no <positioning>",
                element.name,
                element.attribute("id").unwrap_or("?")
            ),
        )
    })
}

fn read_position(positioning: &XmlElement, which: &str) -> Result<i64> {
    let single = positioning
        .child(which)
        .and_then(|bound| bound.child("singlePosition"))
        .ok_or_else(|| structure(positioning, format!("missing <{}> position", which)))?;

    let index = single
        .attribute_node("index")
        .ok_or_else(|| structure(single, "<singlePosition> without an index"))?;

    index
        .value
        .trim()
        .parse::<i64>()
        .map_err(|_| GlozzError::Structure {
            message: format!("position index {:?} is not an integer", index.value),
            location: Some(index.value_source.clone()),
        })
}

fn reference_id(element: &XmlElement) -> Result<String> {
    element
        .attribute("id")
        .map(str::to_string)
        .ok_or_else(|| structure(element, format!("<{}> without an id", element.name)))
}

fn read_text(element: &XmlElement) -> Result<String> {
    element
        .text()
        .map(str::to_string)
        .ok_or_else(|| structure(element, format!("<{}> should only contain text", element.name)))
}

fn structure(element: &XmlElement, message: impl Into<String>) -> GlozzError {
    GlozzError::Structure {
        message: message.into(),
        location: Some(element.source_info.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<annotations>
  <metadata corpusHashcode="abc123"/>
  <unit id="stac_10">
    <metadata>
      <author>stac</author>
      <creation-date>10</creation-date>
      <lastModifier>n/a</lastModifier>
      <lastModificationDate>0</lastModificationDate>
    </metadata>
    <characterisation>
      <type>Segment</type>
      <featureSet>
        <feature name="Addressee">Bob</feature>
        <feature name="Surface_act"/>
      </featureSet>
    </characterisation>
    <positioning>
      <start><singlePosition index="4"/></start>
      <end><singlePosition index="12"/></end>
    </positioning>
  </unit>
  <unit id="stac_-3">
    <metadata><creation-date>-3</creation-date></metadata>
    <characterisation><type>Segment</type><featureSet/></characterisation>
    <positioning>
      <start><singlePosition index="13"/></start>
      <end><singlePosition index="20"/></end>
    </positioning>
  </unit>
  <relation id="stac_11">
    <metadata><creation-date>11</creation-date></metadata>
    <characterisation><type>Elaboration</type><featureSet/></characterisation>
    <positioning>
      <term id="stac_10"/>
      <term id="stac_-3"/>
    </positioning>
  </relation>
  <schema id="stac_12">
    <metadata><creation-date>12</creation-date></metadata>
    <characterisation><type>Complex_discourse_unit</type><featureSet/></characterisation>
    <positioning>
      <embedded-unit id="stac_10"/>
      <embedded-relation id="stac_11"/>
    </positioning>
  </schema>
</annotations>
"#;

    #[test]
    fn test_read_sample() {
        let doc = read_document(SAMPLE).unwrap();

        assert_eq!(doc.hashcode.as_deref(), Some("abc123"));
        assert_eq!(doc.units.len(), 2);
        assert_eq!(doc.relations.len(), 1);
        assert_eq!(doc.schemas.len(), 1);

        let unit = &doc.units[0];
        assert_eq!(unit.id, "stac_10");
        assert_eq!(unit.kind, "Segment");
        assert_eq!(unit.span, Span::new(4, 12));
        assert_eq!(unit.metadata.author(), Some("stac"));
        assert_eq!(unit.metadata.creation_date(), Some("10"));
        assert_eq!(unit.metadata.get("lastModifier"), Some("n/a"));
        assert_eq!(
            unit.features,
            vec![
                ("Addressee".to_string(), "Bob".to_string()),
                ("Surface_act".to_string(), String::new()),
            ]
        );

        let relation = &doc.relations[0];
        assert_eq!(relation.kind, "Elaboration");
        assert_eq!((relation.source.as_str(), relation.target.as_str()), ("stac_10", "stac_-3"));

        let schema = &doc.schemas[0];
        assert_eq!(schema.units, vec!["stac_10"]);
        assert_eq!(schema.relations, vec!["stac_11"]);
        assert!(schema.schemas.is_empty());
    }

    #[test]
    fn test_wrong_root_is_structure_error() {
        let err = read_document("<corpus/>").unwrap_err();
        assert!(matches!(err, GlozzError::Structure { .. }));
        assert!(err.to_string().contains("<annotations>"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let xml = r#"<annotations>
  <unit id="a_1"><positioning><start><singlePosition index="0"/></start><end><singlePosition index="1"/></end></positioning></unit>
  <unit id="a_1"><positioning><start><singlePosition index="2"/></start><end><singlePosition index="3"/></end></positioning></unit>
</annotations>"#;
        assert!(matches!(
            read_document(xml),
            Err(GlozzError::DuplicateId(id)) if id == "a_1"
        ));
    }

    #[test]
    fn test_bad_position_index_points_at_value() {
        let xml = r#"<annotations><unit id="a_1"><positioning><start><singlePosition index="x"/></start><end><singlePosition index="1"/></end></positioning></unit></annotations>"#;
        let err = read_document(xml).unwrap_err();

        assert!(err.to_string().contains("\"x\""));
        let location = err.location().expect("structure errors carry a location");
        assert_eq!(&xml[location.start_offset()..location.end_offset()], "x");
    }

    #[test]
    fn test_relation_needs_two_terms() {
        let xml = r#"<annotations><relation id="r_1"><positioning><term id="a_1"/></positioning></relation></annotations>"#;
        let err = read_document(xml).unwrap_err();
        assert!(err.to_string().contains("has 1 terms, expected 2"));
    }

    #[test]
    fn test_missing_id_rejected() {
        let xml = r#"<annotations><unit><positioning/></unit></annotations>"#;
        let err = read_document(xml).unwrap_err();
        assert!(err.to_string().contains("without an id"));
    }

    #[test]
    fn test_xml_errors_pass_through() {
        assert!(matches!(read_document(""), Err(GlozzError::Xml(_))));
    }
}
