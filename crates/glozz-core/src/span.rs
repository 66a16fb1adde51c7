//! Character spans over a document's text.

use std::fmt;

use crate::error::{GlozzError, Result};

/// A character-offset interval `[start, end]` over a document's text.
///
/// Containment is closed on both ends. A span produced by [`Span::shift_past`]
/// may end up inverted (`start > end`); only [`Span::checked`] rejects that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub const fn new(start: i64, end: i64) -> Self {
        Span { start, end }
    }

    /// Build a span, rejecting `start > end`.
    pub fn checked(start: i64, end: i64) -> Result<Self> {
        let span = Span::new(start, end);
        if span.is_inverted() {
            return Err(GlozzError::InvalidSpan(span));
        }
        Ok(span)
    }

    /// Both ends advanced by `offset`.
    pub fn shift(self, offset: i64) -> Result<Span> {
        match (self.start.checked_add(offset), self.end.checked_add(offset)) {
            (Some(start), Some(end)) => Ok(Span::new(start, end)),
            _ => Err(GlozzError::Overflow(format!("shifting {} by {}", self, offset))),
        }
    }

    /// Advance each bound by `delta` independently, if it is at or past `threshold`.
    pub fn shift_past(self, threshold: i64, delta: i64) -> Result<Span> {
        let bump = |pos: i64| {
            if pos < threshold {
                return Ok(pos);
            }
            pos.checked_add(delta)
                .ok_or_else(|| GlozzError::Overflow(format!("shifting {} by {}", self, delta)))
        };
        Ok(Span::new(bump(self.start)?, bump(self.end)?))
    }

    /// True iff `other` lies within this span, bounds included.
    pub fn encloses(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// `end - start`, saturating for spans wider than `i64` can hold.
    pub fn len(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span enclosing every given span, or `None` if there are none.
    pub fn covering<I>(spans: I) -> Option<Span>
    where
        I: IntoIterator<Item = Span>,
    {
        spans.into_iter().fold(None, |acc, span| {
            Some(match acc {
                None => span,
                Some(Span { start, end }) => Span::new(start.min(span.start), end.max(span.end)),
            })
        })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_moves_both_ends() {
        assert_eq!(Span::new(3, 8).shift(5).unwrap(), Span::new(8, 13));
        assert_eq!(Span::new(3, 8).shift(-3).unwrap(), Span::new(0, 5));
    }

    #[test]
    fn test_shift_overflow_is_an_error() {
        assert!(matches!(
            Span::new(1, i64::MAX).shift(1),
            Err(GlozzError::Overflow(_))
        ));
        assert!(matches!(
            Span::new(i64::MIN, 0).shift(-1),
            Err(GlozzError::Overflow(_))
        ));
        assert!(matches!(
            Span::new(5, i64::MAX).shift_past(10, 1),
            Err(GlozzError::Overflow(_))
        ));
        // Bounds before the threshold never move, so they cannot overflow
        assert_eq!(
            Span::new(i64::MIN, 0).shift_past(10, -1).unwrap(),
            Span::new(i64::MIN, 0)
        );
    }

    #[test]
    fn test_len_saturates() {
        assert_eq!(Span::new(3, 8).len(), 5);
        assert_eq!(Span::new(i64::MIN, i64::MAX).len(), i64::MAX);
        assert!(Span::new(4, 4).is_empty());
    }

    #[test]
    fn test_encloses_is_closed() {
        let window = Span::new(10, 20);
        assert!(window.encloses(&Span::new(10, 20)));
        assert!(window.encloses(&Span::new(12, 15)));
        assert!(!window.encloses(&Span::new(9, 15)));
        assert!(!window.encloses(&Span::new(15, 21)));
    }

    #[test]
    fn test_shift_past_checks_bounds_independently() {
        // Straddles the threshold: only the end moves
        assert_eq!(Span::new(5, 15).shift_past(10, 3).unwrap(), Span::new(5, 18));
        // Fully past
        assert_eq!(Span::new(10, 15).shift_past(10, 3).unwrap(), Span::new(13, 18));
        // Fully before
        assert_eq!(Span::new(1, 9).shift_past(10, 3).unwrap(), Span::new(1, 9));
        // Negative delta can invert a straddling span
        let inverted = Span::new(8, 12).shift_past(10, -6).unwrap();
        assert_eq!(inverted, Span::new(8, 6));
        assert!(inverted.is_inverted());
    }

    #[test]
    fn test_checked_rejects_inverted() {
        assert!(Span::checked(4, 4).is_ok());
        assert!(matches!(
            Span::checked(5, 4),
            Err(GlozzError::InvalidSpan(span)) if span == Span::new(5, 4)
        ));
    }

    #[test]
    fn test_covering() {
        let spans = vec![Span::new(5, 9), Span::new(2, 4), Span::new(7, 12)];
        assert_eq!(Span::covering(spans), Some(Span::new(2, 12)));
        assert_eq!(Span::covering(Vec::new()), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(-1, 7).to_string(), "(-1,7)");
    }
}
