//! Error types for composing and highlighting.

use std::fmt;

use thiserror::Error;

use crate::span::OffsetRange;

/// Which annotation layer a span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Ruby,
    Status,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::Ruby => f.write_str("ruby"),
            SpanKind::Status => f.write_str("status"),
        }
    }
}

/// Failure to merge ruby and status spans onto a text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A span reaches past the end of the text.
    #[error("{kind} span {range} lies outside text of {len} codepoints")]
    OutOfBounds {
        kind: SpanKind,
        range: OffsetRange,
        len: usize,
    },

    /// A span is empty or its end precedes its start.
    #[error("{kind} span {range} is empty or inverted")]
    Degenerate { kind: SpanKind, range: OffsetRange },

    /// Two spans of the same layer share text.
    #[error("{kind} spans {first} and {second} overlap")]
    Overlapping {
        kind: SpanKind,
        first: OffsetRange,
        second: OffsetRange,
    },

    /// A ruby/status pair matched no known geometry. Indicates a bug.
    #[error("no relation between ruby span {ruby} and status span {status}")]
    Unclassified {
        ruby: OffsetRange,
        status: OffsetRange,
    },
}

/// Top-level error for the highlighting pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("failed to compose highlighted text: {0}")]
    Compose(#[from] ComposeError),
}
