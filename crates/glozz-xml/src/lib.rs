//! Source-tracked XML for Glozz annotation files.
//!
//! [`parse`] turns an `.aa` file into a tree of [`XmlElement`]s, each of
//! which remembers the byte range it came from (attribute values too), so
//! that a malformed unit can be reported at its line and column.
//! [`write_xml`] turns a tree back into indented XML.
//!
//! Glozz files keep text and markup apart: an element holds either child
//! elements or text. Indentation between elements is dropped; any other
//! text next to child elements is an [`Error::MixedContent`].
//!
//! # Example
//!
//! ```rust
//! use glozz_xml::parse;
//!
//! let xml = parse(r#"<annotations>
//!   <unit id="stac_1">
//!     <metadata><creation-date>1</creation-date></metadata>
//!   </unit>
//! </annotations>"#).unwrap();
//!
//! let unit = xml.root.child("unit").unwrap();
//! assert_eq!(unit.attribute("id"), Some("stac_1"));
//!
//! let date = unit.child("metadata").and_then(|m| m.child("creation-date"));
//! assert_eq!(date.and_then(|d| d.text()), Some("1"));
//! ```
//!
//! # Writing
//!
//! ```rust
//! use glozz_xml::{XmlElement, write_xml};
//!
//! let root = XmlElement::build("annotations")
//!     .with_child(XmlElement::build("unit").with_attribute("id", "stac_1"));
//! let out = write_xml(&root).unwrap();
//! assert!(out.contains(r#"<unit id="stac_1"/>"#));
//! ```

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use glozz_source_map::SourceInfo;
pub use parser::{parse, parse_with_file_id};
pub use types::{XmlAttribute, XmlDocument, XmlElement, XmlText};
pub use writer::write_xml;
