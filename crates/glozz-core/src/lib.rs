//! Core operations on Glozz annotation documents.
//!
//! A Glozz document is a pair of files: the raw text (`.ac`) and an XML
//! annotation file (`.aa`) whose units point into the text by character
//! offset. This crate reads and writes the annotation file and provides the
//! transformations the `glozz` CLI exposes:
//!
//! - [`cut`] keeps the units inside a window and re-anchors their offsets
//! - [`shift`] moves every unit bound at or past a threshold
//! - [`normalize`] renumbers creation dates and identifiers deterministically
//! - [`rename`] gives one annotation a new identifier everywhere it is used
//! - [`prune_dangling`] and [`ReferenceValidator`] keep relations and schemas
//!   consistent with the units that survive
//! - [`hashcode`] fingerprints the companion text file
//!
//! All transformations take the input document by reference and return a
//! new one; on error nothing is returned.
//!
//! # Example
//!
//! ```rust
//! use glozz_core::{Span, cut, read_document};
//!
//! let doc = read_document(r#"<annotations>
//!   <unit id="stac_1">
//!     <metadata><creation-date>1</creation-date></metadata>
//!     <positioning>
//!       <start><singlePosition index="10"/></start>
//!       <end><singlePosition index="15"/></end>
//!     </positioning>
//!   </unit>
//! </annotations>"#).unwrap();
//!
//! // Without an explicit offset the window start becomes position 1
//! let slice = cut(&doc, Span::new(10, 20), None).unwrap();
//! assert_eq!(slice.units[0].span, Span::new(1, 6));
//! ```

pub mod document;
pub mod error;
pub mod hashcode;
pub mod normalize;
pub mod reader;
pub mod rename;
pub mod span;
pub mod transform;
pub mod validate;
pub mod writer;

pub use document::{
    AnnotationItem, Document, Metadata, Relation, Schema, Unit, join_anno_id, split_anno_id,
};
pub use error::{GlozzError, Result};
pub use hashcode::{check_hashcode, hashcode, hashcode_reader};
pub use normalize::{DateMapping, NormalizeMode, compute_date_mapping, normalize};
pub use reader::{read_document, read_document_with_file_id};
pub use rename::rename;
pub use span::Span;
pub use transform::{cut, default_cut_offset, shift};
pub use validate::{Problem, ReferenceValidator, ValidationReport, Validator, prune_dangling};
pub use writer::write_document;
