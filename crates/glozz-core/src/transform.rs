//! Span transformations: cutting a document down to a window and shifting
//! offsets past a threshold.
//!
//! Both operations build a new [`Document`] by value. Relations and schemas
//! are carried over untouched; references to units dropped by [`cut`] are
//! left dangling for [`crate::prune_dangling`] to resolve.

use tracing::debug;

use crate::document::{Document, Unit};
use crate::error::{GlozzError, Result};
use crate::span::Span;

/// Offset that re-anchors a cut so the window's first character lands on 1.
///
/// Fails when `1 - window.start` does not fit in an `i64`.
pub fn default_cut_offset(window: Span) -> Result<i64> {
    1i64.checked_sub(window.start)
        .ok_or_else(|| GlozzError::Overflow(format!("re-anchoring window {} at 1", window)))
}

/// Keep the units enclosed by `window` and shift them by `offset`.
///
/// The filter always runs on the original coordinates. `None` applies
/// [`default_cut_offset`]; `Some(0)` leaves the survivors where they are.
///
/// Any other offset re-anchors the spans to a slice of the text, so the
/// recorded hashcode and any attached text no longer describe the result
/// and are dropped.
pub fn cut(document: &Document, window: Span, offset: Option<i64>) -> Result<Document> {
    if window.is_inverted() {
        return Err(GlozzError::InvalidSpan(window));
    }
    let offset = match offset {
        Some(offset) => offset,
        None => default_cut_offset(window)?,
    };

    let units = document
        .units
        .iter()
        .filter(|unit| window.encloses(&unit.span))
        .map(|unit| {
            Ok(Unit {
                span: unit.span.shift(offset)?,
                ..unit.clone()
            })
        })
        .collect::<Result<Vec<Unit>>>()?;

    debug!(
        %window,
        offset,
        kept = units.len(),
        dropped = document.units.len() - units.len(),
        "cut document"
    );

    let mut out = Document {
        units,
        ..document.clone()
    };
    if offset != 0 {
        out.hashcode = None;
        out.text = None;
    }
    Ok(out)
}

/// Move every unit bound at or past `threshold` by `delta`.
///
/// Bounds are tested independently, so a unit straddling the threshold only
/// has its end moved and may come out inverted when `delta` is negative.
/// A bound pushed outside the `i64` range fails the whole shift.
pub fn shift(document: &Document, threshold: i64, delta: i64) -> Result<Document> {
    let units = document
        .units
        .iter()
        .map(|unit| {
            Ok(Unit {
                span: unit.span.shift_past(threshold, delta)?,
                ..unit.clone()
            })
        })
        .collect::<Result<Vec<Unit>>>()?;

    debug!(threshold, delta, "shifted document");

    Ok(Document {
        units,
        ..document.clone()
    })
}
