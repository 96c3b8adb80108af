//! Longest-match placement of lexical units onto text.

use std::cmp::Reverse;

use log::debug;

use crate::span::{OffsetRange, StatusSpan};
use crate::status::UnitStatus;

/// Locate every occurrence of each unit in `folded_text`.
///
/// Units are tried longest first, and every hit is masked out of the working
/// copy, so a shorter unit can never claim text already covered by a longer
/// one. The returned spans never overlap and are sorted by start offset.
pub fn scan(folded_text: &str, units: &[UnitStatus]) -> Vec<StatusSpan> {
    // `None` marks a codepoint already claimed by an earlier match.
    let mut working: Vec<Option<char>> = folded_text.chars().map(Some).collect();
    let mut spans = Vec::new();

    let mut ordered: Vec<&UnitStatus> = units.iter().collect();
    ordered.sort_by_key(|unit| Reverse(unit.surface.chars().count()));

    for unit in ordered {
        let needle: Vec<char> = unit.surface.chars().collect();
        if needle.is_empty() {
            continue;
        }

        let mut from = 0;
        while let Some(start) = find_from(&working, &needle, from) {
            let end = start + needle.len();
            spans.push(StatusSpan::new(OffsetRange::new(start, end), unit.status));
            working[start..end].fill(None);
            from = end;
        }
    }

    spans.sort_by_key(|span| span.range.start);
    debug!(
        "scan placed {} status spans from {} units",
        spans.len(),
        units.len()
    );
    spans
}

fn find_from(haystack: &[Option<char>], needle: &[char], from: usize) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(slot, c)| *slot == Some(*c))
    })
}
