//! Byte-offset spans into document text.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into a document's text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Empty span at `pos`.
    #[inline]
    pub const fn at(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `pos` falls inside the span (end exclusive).
    #[inline]
    pub const fn contains(&self, pos: u32) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Whether `other` lies entirely inside this span.
    #[inline]
    pub const fn contains_span(&self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether the two spans share at least one byte, or an empty span sits
    /// inside the other.
    pub const fn intersects(&self, other: Span) -> bool {
        if other.is_empty() {
            return other.start >= self.start && other.start <= self.end;
        }
        if self.is_empty() {
            return self.start >= other.start && self.start <= other.end;
        }
        self.start < other.end && other.start < self.end
    }

    /// Get the text covered by the span, or `""` when out of bounds.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.start as usize;
        let end = self.end as usize;
        if start <= end && end <= source.len() {
            source.get(start..end).unwrap_or("")
        } else {
            ""
        }
    }
}
