//! Layer ruby pronunciation guides and learning-status markup onto text.
//!
//! The pipeline behind [`highlight`] runs in four steps:
//! - [`ruby::extract`] strips ruby markup and records where each base sits
//! - lexical units are classified into a [`LearningStatus`]
//! - [`scan`] places the units onto the case-folded text, longest first
//! - [`compose`] merges both span layers into well-nested markup

use std::collections::HashSet;

use log::debug;

mod compose;
mod error;
mod intervals;
pub mod ruby;
mod scan;
mod settings;
mod span;
mod status;

pub use compose::{compose, MarkupBuffer};
pub use error::{ComposeError, HighlightError, SpanKind};
pub use intervals::{resolve_intervals, CachedIntervals, IntervalStore};
pub use ruby::{extract, RubyExtraction, RubySyntax};
pub use scan::scan;
pub use settings::{discover_settings, load_settings, HighlightSettings, Settings};
pub use span::{fold_case, CharIndex, OffsetRange, Relation, RubySpan, StatusSpan};
pub use status::{classify, LearningStatus, LexicalUnit, StatusTally, UnitStatus};

/// Render `raw_text` with ruby markup preserved and every occurrence of
/// `units` wrapped in a status span.
///
/// Units should already carry their intervals (see [`resolve_intervals`]).
/// Matching ignores case; the output keeps the text's original casing.
pub fn highlight(
    settings: &HighlightSettings,
    units: &[LexicalUnit],
    raw_text: &str,
) -> Result<String, HighlightError> {
    let RubyExtraction { text, rubies } = ruby::extract(raw_text, settings.ruby_syntax);
    if text.is_empty() {
        return Ok(text);
    }

    let entries = unit_statuses(settings, units);
    let statuses = scan::scan(&fold_case(&text), &entries);
    debug!(
        "highlighting {} codepoints: {} rubies, {} status spans",
        text.chars().count(),
        rubies.len(),
        statuses.len()
    );

    Ok(compose::compose(&text, rubies, statuses)?)
}

/// Scanner entries for `units`, minus empty surfaces and repeats.
fn unit_statuses(settings: &HighlightSettings, units: &[LexicalUnit]) -> Vec<UnitStatus> {
    let mut seen = HashSet::new();
    units
        .iter()
        .map(|unit| unit.to_unit_status(settings))
        .filter(|entry| !entry.surface.is_empty())
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}
