//! Ruby (pronunciation guide) extraction.
//!
//! This module provides:
//! - `extract` for pulling ruby spans out of raw text
//! - `RubySyntax` for choosing between HTML ruby and bracket shorthand
//! - `markup` helpers that prepare text before and after highlighting

pub mod markup;

use std::ops::Range;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::span::{CharIndex, OffsetRange, RubySpan};

/// Ruby markup flavour recognised by `extract`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RubySyntax {
    /// `<ruby>base<rt>annotation</rt>trailing</ruby>`, with optional `<rb>`.
    #[default]
    Html,
    /// ` base[annotation]`, consuming one leading space.
    Bracket,
}

impl RubySyntax {
    fn pattern(&self) -> &'static Regex {
        match self {
            RubySyntax::Html => &HTML_RUBY,
            RubySyntax::Bracket => &BRACKET_RUBY,
        }
    }
}

/// HTML ruby. The annotation must be non-empty; trailing text before
/// `</ruby>` stays inline after the base.
static HTML_RUBY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<ruby(?:\s[^>]*)?>(?:<rb(?:\s[^>]*)?>)?(?P<base>[^<]+)(?:</rb>)?<rt(?:\s[^>]*)?>(?P<annotation>[^<]+)</rt>(?P<trailing>[^<]*)</ruby>",
    )
    .unwrap()
});

/// Flashcard shorthand: the base runs back to the previous space.
static BRACKET_RUBY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?(?P<base>\S+?)\[(?P<annotation>[^\]]+)\]").unwrap());

/// Clean text plus the ruby spans recovered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubyExtraction {
    /// Text with ruby markup reduced to its inline-visible content.
    pub text: String,
    /// Ruby spans in ascending order, as codepoint offsets into `text`.
    pub rubies: Vec<RubySpan>,
}

/// Strip ruby markup from `raw`, recording where each base ended up.
///
/// Each match is replaced by its base followed by any trailing text, and the
/// span is recorded against the text as rewritten so far. Once at least one
/// match was rewritten, surrounding whitespace is trimmed and the spans are
/// moved to match. Text without ruby markup is returned unchanged.
pub fn extract(raw: &str, syntax: RubySyntax) -> RubyExtraction {
    let pattern = syntax.pattern();
    let mut text = raw.to_string();
    let mut rubies = Vec::new();
    let mut pos = 0;

    while let Some(found) = find_ruby(pattern, &text, pos) {
        let start = text[..found.matched.start].chars().count();
        let end = start + found.base.chars().count();
        let replacement = format!("{}{}", found.base, found.trailing);
        pos = found.matched.start + replacement.len();
        text.replace_range(found.matched, &replacement);
        rubies.push(RubySpan::new(
            OffsetRange::new(start, end),
            found.base,
            found.annotation,
        ));
    }

    if rubies.is_empty() {
        return RubyExtraction { text, rubies };
    }

    let index = CharIndex::new(&text);
    let trimmed_from = text.len() - text.trim_start().len();
    let trimmed = text.trim();
    let leading = index.char_offset(trimmed_from);
    let char_len = index.char_offset(trimmed_from + trimmed.len()) - leading;
    let rubies = rubies
        .into_iter()
        .filter_map(|mut ruby| {
            let range = ruby.range.shifted_back(leading);
            ruby.range = OffsetRange::new(range.start, range.end.min(char_len));
            (!ruby.range.is_empty()).then_some(ruby)
        })
        .collect::<Vec<_>>();

    debug!("extracted {} ruby spans ({:?})", rubies.len(), syntax);
    RubyExtraction {
        text: trimmed.to_string(),
        rubies,
    }
}

/// One ruby match, owned so the text can be rewritten afterwards.
struct FoundRuby {
    matched: Range<usize>,
    base: String,
    annotation: String,
    trailing: String,
}

fn find_ruby(pattern: &Regex, text: &str, pos: usize) -> Option<FoundRuby> {
    let caps = pattern.captures_at(text, pos)?;
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str()).to_string();
    Some(FoundRuby {
        matched: caps.get(0)?.range(),
        base: group("base"),
        annotation: group("annotation"),
        trailing: group("trailing"),
    })
}
