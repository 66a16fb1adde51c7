//! The Glozz document model.
//!
//! A [`Document`] owns three ordered collections (units, relations, schemas)
//! plus an optional read-only handle on the text the units point into.
//! Relations and schemas refer to other annotations by id.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{GlozzError, Result};
use crate::span::Span;

/// Metadata field holding the annotation's creation date.
pub const CREATION_DATE: &str = "creation-date";
/// Metadata field holding the annotation's author.
pub const AUTHOR: &str = "author";

/// Ordered `(name, value)` entries of an annotation's `<metadata>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of an existing entry in place, or append a new one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Builder form of [`Metadata::set`].
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn author(&self) -> Option<&str> {
        self.get(AUTHOR)
    }

    pub fn creation_date(&self) -> Option<&str> {
        self.get(CREATION_DATE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An annotated span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub metadata: Metadata,
    pub kind: String,
    pub features: Vec<(String, String)>,
    pub span: Span,
}

/// A typed link between two annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub id: String,
    pub metadata: Metadata,
    pub kind: String,
    pub features: Vec<(String, String)>,
    pub source: String,
    pub target: String,
}

/// A named group of units, relations and other schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub id: String,
    pub metadata: Metadata,
    pub kind: String,
    pub features: Vec<(String, String)>,
    pub units: Vec<String>,
    pub relations: Vec<String>,
    pub schemas: Vec<String>,
}

impl Unit {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, span: Span) -> Self {
        Unit {
            id: id.into(),
            metadata: Metadata::new(),
            kind: kind.into(),
            features: Vec::new(),
            span,
        }
    }
}

impl Relation {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Relation {
            id: id.into(),
            metadata: Metadata::new(),
            kind: kind.into(),
            features: Vec::new(),
            source: source.into(),
            target: target.into(),
        }
    }
}

impl Schema {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Schema {
            id: id.into(),
            metadata: Metadata::new(),
            kind: kind.into(),
            features: Vec::new(),
            units: Vec::new(),
            relations: Vec::new(),
            schemas: Vec::new(),
        }
    }

    /// Every member id, units first, then relations, then schemas.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.units
            .iter()
            .chain(&self.relations)
            .chain(&self.schemas)
            .map(String::as_str)
    }
}

/// Borrowed view over any of the three annotation kinds.
#[derive(Debug, Clone, Copy)]
pub enum AnnotationItem<'a> {
    Unit(&'a Unit),
    Relation(&'a Relation),
    Schema(&'a Schema),
}

impl<'a> AnnotationItem<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            AnnotationItem::Unit(u) => &u.id,
            AnnotationItem::Relation(r) => &r.id,
            AnnotationItem::Schema(s) => &s.id,
        }
    }

    pub fn metadata(&self) -> &'a Metadata {
        match *self {
            AnnotationItem::Unit(u) => &u.metadata,
            AnnotationItem::Relation(r) => &r.metadata,
            AnnotationItem::Schema(s) => &s.metadata,
        }
    }

    /// The item's own span. Relations and schemas have none.
    pub fn span(&self) -> Option<Span> {
        match self {
            AnnotationItem::Unit(u) => Some(u.span),
            AnnotationItem::Relation(_) | AnnotationItem::Schema(_) => None,
        }
    }

    /// Ids of the annotations this item points at.
    pub fn references(&self) -> Vec<&'a str> {
        match *self {
            AnnotationItem::Unit(_) => Vec::new(),
            AnnotationItem::Relation(r) => vec![r.source.as_str(), r.target.as_str()],
            AnnotationItem::Schema(s) => s.members().collect(),
        }
    }
}

/// An annotation document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `corpusHashcode` recorded in the annotation file, if any.
    pub hashcode: Option<String>,
    pub units: Vec<Unit>,
    pub relations: Vec<Relation>,
    pub schemas: Vec<Schema>,
    /// The companion text, shared read-only.
    pub text: Option<Arc<str>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// All annotations in declared order: units, then relations, then schemas.
    pub fn annotations(&self) -> impl Iterator<Item = AnnotationItem<'_>> {
        self.units
            .iter()
            .map(AnnotationItem::Unit)
            .chain(self.relations.iter().map(AnnotationItem::Relation))
            .chain(self.schemas.iter().map(AnnotationItem::Schema))
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.annotations().map(|a| a.id()).collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.annotations().any(|a| a.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<AnnotationItem<'_>> {
        self.annotations().find(|a| a.id() == id)
    }

    /// Minimal span enclosing every unit.
    pub fn unit_extent(&self) -> Option<Span> {
        Span::covering(self.units.iter().map(|u| u.span))
    }

    /// The text covered by a span, when the text is attached and the span fits.
    pub fn text_of(&self, span: Span) -> Option<String> {
        let text = self.text.as_deref()?;
        if span.start < 0 || span.is_inverted() {
            return None;
        }
        let start = usize::try_from(span.start).ok()?;
        let len = usize::try_from(span.len()).ok()?;
        let slice: String = text.chars().skip(start).take(len).collect();
        (slice.chars().count() == len).then_some(slice)
    }

    /// Number of characters in the attached text.
    pub fn text_len(&self) -> Option<usize> {
        self.text.as_deref().map(|t| t.chars().count())
    }
}

/// Split an identifier of the form `<prefix>_<date>` on its last underscore.
pub fn split_anno_id(id: &str) -> Result<(&str, i64)> {
    let (prefix, token) = id
        .rsplit_once('_')
        .ok_or_else(|| GlozzError::malformed_id(id))?;
    let date = token
        .parse::<i64>()
        .map_err(|_| GlozzError::malformed_id(id))?;
    Ok((prefix, date))
}

pub fn join_anno_id(prefix: &str, date: &str) -> String {
    format!("{}_{}", prefix, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut schema = Schema::new("stac_4", "Complex_discourse_unit");
        schema.units.push("stac_1".to_string());
        schema.relations.push("stac_3".to_string());

        Document {
            units: vec![
                Unit::new("stac_1", "Segment", Span::new(0, 5)),
                Unit::new("stac_2", "Segment", Span::new(6, 12)),
            ],
            relations: vec![Relation::new("stac_3", "Elaboration", "stac_1", "stac_2")],
            schemas: vec![schema],
            ..Document::default()
        }
        .with_text("Hello there world")
    }

    #[test]
    fn test_split_anno_id() {
        assert_eq!(split_anno_id("stac_1234").unwrap(), ("stac", 1234));
        assert_eq!(split_anno_id("kowey_-398190").unwrap(), ("kowey", -398_190));
        assert_eq!(split_anno_id("a_b_7").unwrap(), ("a_b", 7));
    }

    #[test]
    fn test_split_anno_id_rejects_malformed() {
        for bad in ["nounderscore", "stac_", "stac_x1", "stac_1.5"] {
            assert!(
                matches!(split_anno_id(bad), Err(GlozzError::MalformedId { ref id }) if id == bad),
                "{} should be malformed",
                bad
            );
        }
    }

    #[test]
    fn test_annotations_in_declared_order() {
        let doc = sample();
        let ids: Vec<&str> = doc.annotations().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["stac_1", "stac_2", "stac_3", "stac_4"]);
    }

    #[test]
    fn test_item_views() {
        let doc = sample();
        let relation = doc.get("stac_3").unwrap();
        assert_eq!(relation.span(), None);
        assert_eq!(relation.references(), vec!["stac_1", "stac_2"]);

        let unit = doc.get("stac_2").unwrap();
        assert_eq!(unit.span(), Some(Span::new(6, 12)));
        assert!(unit.references().is_empty());

        let schema = doc.get("stac_4").unwrap();
        assert_eq!(schema.references(), vec!["stac_1", "stac_3"]);
    }

    #[test]
    fn test_unit_extent() {
        assert_eq!(sample().unit_extent(), Some(Span::new(0, 12)));
        assert_eq!(Document::new().unit_extent(), None);
    }

    #[test]
    fn test_text_of() {
        let doc = sample();
        assert_eq!(doc.text_of(Span::new(0, 5)).as_deref(), Some("Hello"));
        assert_eq!(doc.text_of(Span::new(6, 11)).as_deref(), Some("there"));
        assert_eq!(doc.text_of(Span::new(10, 40)), None);
        assert_eq!(doc.text_len(), Some(17));
    }

    #[test]
    fn test_metadata_set_replaces_in_place() {
        let mut metadata = Metadata::new()
            .with(AUTHOR, "stac")
            .with(CREATION_DATE, "5")
            .with("lastModifier", "n/a");
        metadata.set(CREATION_DATE, "0");

        let names: Vec<&str> = metadata.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["author", "creation-date", "lastModifier"]);
        assert_eq!(metadata.creation_date(), Some("0"));
        assert_eq!(metadata.author(), Some("stac"));
    }
}
