//! Consistency checks over a [`Document`].
//!
//! A [`Validator`] inspects a document and reports every [`Problem`] it finds.
//! [`prune_dangling`] is the matching repair for reference problems: it drops
//! relations and schemas that point at annotations no longer present, as left
//! behind by [`crate::cut`].

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::document::Document;
use crate::span::Span;

/// A single consistency problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// `from` refers to `to`, which is not in the document.
    DanglingReference { from: String, to: String },
    InvertedSpan { id: String, span: Span },
    /// The unit reaches past the end of the attached text.
    SpanOutOfText { id: String, span: Span, text_len: usize },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::DanglingReference { from, to } => {
                write!(f, "{} refers to missing annotation {}", from, to)
            }
            Problem::InvertedSpan { id, span } => {
                write!(f, "{} has inverted span {}", id, span)
            }
            Problem::SpanOutOfText { id, span, text_len } => {
                write!(
                    f,
                    "{} has span {} outside the text ({} characters)",
                    id, span, text_len
                )
            }
        }
    }
}

/// Every problem a validator found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub problems: Vec<Problem>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} consistency problem(s)", self.problems.len())?;
        for problem in &self.problems {
            write!(f, "\n  - {}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// A consistency check over a document.
pub trait Validator {
    fn validate(&self, document: &Document) -> Result<(), ValidationReport>;
}

/// Checks references between annotations and the shape of unit spans.
///
/// Reports dangling relation terms and schema members, inverted spans and,
/// when the text is attached, spans reaching past its end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceValidator;

impl Validator for ReferenceValidator {
    fn validate(&self, document: &Document) -> Result<(), ValidationReport> {
        let ids = document.ids();
        let text_len = document.text_len();
        let mut report = ValidationReport::default();

        for item in document.annotations() {
            for to in item.references() {
                if !ids.contains(to) {
                    report.problems.push(Problem::DanglingReference {
                        from: item.id().to_string(),
                        to: to.to_string(),
                    });
                }
            }
        }

        for unit in &document.units {
            if unit.span.is_inverted() {
                report.problems.push(Problem::InvertedSpan {
                    id: unit.id.clone(),
                    span: unit.span,
                });
            } else if let Some(text_len) = text_len
                && (unit.span.start < 0 || unit.span.end > text_len as i64)
            {
                report.problems.push(Problem::SpanOutOfText {
                    id: unit.id.clone(),
                    span: unit.span,
                    text_len,
                });
            }
        }

        report.into_result()
    }
}

/// Drop relations and schemas with dangling references until none remain.
///
/// Dropping a relation can leave a schema that contained it dangling, and so
/// on up the schema nesting, hence the fixed point.
pub fn prune_dangling(document: &Document) -> Document {
    let mut out = document.clone();

    loop {
        let ids: HashSet<String> = out.ids().into_iter().map(str::to_string).collect();
        let present = |id: &String| ids.contains(id);

        let before = out.relations.len() + out.schemas.len();
        out.relations
            .retain(|r| present(&r.source) && present(&r.target));
        out.schemas
            .retain(|s| s.units.iter().chain(&s.relations).chain(&s.schemas).all(present));
        let after = out.relations.len() + out.schemas.len();

        if before == after {
            break;
        }
        debug!(dropped = before - after, "pruned dangling annotations");
    }

    out
}
