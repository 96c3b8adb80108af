//! Span types and codepoint utilities.
//!
//! This module provides:
//! - `OffsetRange`, `RubySpan` and `StatusSpan` over a shared text snapshot
//! - `Relation` for classifying a ruby range against a status range
//! - `CharIndex` and `fold_case` for codepoint-aligned offsets

mod range;
mod text;

pub use range::{OffsetRange, Relation, RubySpan, StatusSpan};
pub use text::{fold_case, CharIndex};
