//! Offset ranges and the two annotation span kinds laid over a text snapshot.

use std::fmt;

use crate::status::LearningStatus;

/// Half-open codepoint interval `[start, end)` into one text snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if `other` lies entirely within this range.
    pub fn contains(&self, other: &OffsetRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if the two ranges share at least one codepoint.
    pub fn overlaps(&self, other: &OffsetRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move the range by `delta` codepoints towards the start, stopping at 0.
    pub fn shifted_back(&self, delta: usize) -> Self {
        Self::new(
            self.start.saturating_sub(delta),
            self.end.saturating_sub(delta),
        )
    }
}

impl fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A pronunciation guide recovered from ruby markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubySpan {
    pub range: OffsetRange,
    /// Text that stays inline.
    pub base: String,
    /// Pronunciation rendered alongside the base.
    pub annotation: String,
}

impl RubySpan {
    pub fn new(range: OffsetRange, base: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            range,
            base: base.into(),
            annotation: annotation.into(),
        }
    }
}

/// A text region tagged with a lexical unit's learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSpan {
    pub range: OffsetRange,
    pub status: LearningStatus,
}

impl StatusSpan {
    pub fn new(range: OffsetRange, status: LearningStatus) -> Self {
        Self { range, status }
    }
}

/// How a ruby range sits relative to a status range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// No shared codepoints.
    Disjoint,
    /// Same start and end.
    Identical,
    /// The status range contains the ruby range.
    RubyInsideStatus,
    /// The ruby range contains the status range.
    StatusInsideRuby,
    /// Ruby starts first and ends inside the status.
    RubyLeads,
    /// Status starts first and ends inside the ruby.
    StatusLeads,
}

impl Relation {
    /// Classify `ruby` against `status`.
    ///
    /// Returns `None` when either range is empty or inverted; every pair of
    /// non-empty ranges falls into exactly one variant.
    pub fn classify(ruby: &OffsetRange, status: &OffsetRange) -> Option<Self> {
        if ruby.is_empty() || status.is_empty() {
            return None;
        }

        let relation = if !ruby.overlaps(status) {
            Relation::Disjoint
        } else if ruby == status {
            Relation::Identical
        } else if status.contains(ruby) {
            Relation::RubyInsideStatus
        } else if ruby.contains(status) {
            Relation::StatusInsideRuby
        } else if ruby.start < status.start {
            Relation::RubyLeads
        } else {
            Relation::StatusLeads
        };

        Some(relation)
    }
}
