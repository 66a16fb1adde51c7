//! Error types for glozz-core

use glozz_source_map::SourceInfo;
use thiserror::Error;

use crate::span::Span;
use crate::validate::ValidationReport;

#[derive(Error, Debug)]
pub enum GlozzError {
    #[error("malformed identifier {id:?}: expected <author>_<integer date>")]
    MalformedId { id: String },

    #[error("malformed creation date {value:?} on {id}")]
    MalformedDate { id: String, value: String },

    #[error("unmapped date {date} in identifier {id}")]
    UnmappedDate { id: String, date: String },

    #[error("date collision: {first} and {second} would both be renumbered to {date}")]
    DateCollision { date: String, first: i64, second: i64 },

    #[error("invalid span {0}: start is after end")]
    InvalidSpan(Span),

    #[error("integer overflow {0}")]
    Overflow(String),

    #[error("duplicate annotation id {0}")]
    DuplicateId(String),

    #[error("no annotation with id {0}")]
    UnknownId(String),

    #[error("annotation id {0} already exists")]
    IdCollision(String),

    #[error("hashcode mismatch: annotations record {expected}, text hashes to {actual}")]
    HashcodeMismatch { expected: String, actual: String },

    #[error("{message}")]
    Structure {
        message: String,
        location: Option<SourceInfo>,
    },

    #[error(transparent)]
    Xml(#[from] glozz_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationReport),
}

impl GlozzError {
    pub fn malformed_id(id: impl Into<String>) -> Self {
        Self::MalformedId { id: id.into() }
    }

    /// Source location of the error, when it came from a parsed file.
    pub fn location(&self) -> Option<&SourceInfo> {
        match self {
            Self::Structure { location, .. } => location.as_ref(),
            Self::Xml(err) => err.location(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GlozzError>;
