//! Conversions between HTML ruby, bracket shorthand and plain text.
//!
//! Card templates may hand us text that already went through a furigana
//! filter (HTML ruby) or raw field text (bracket shorthand). The analyser
//! wants plain text, and some outputs want HTML ruby back.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `<rt>` element with any attributes; captures the reading.
static RT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<rt[^>]*>(?P<reading>.+?)</rt>").unwrap());

/// Any angle-bracketed tag.
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Bracket shorthand preceded by a space.
static BRACKET_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (?P<base>[^ ]+)\[(?P<reading>.+?)\]").unwrap());

/// Remove every tag, keeping the text between them.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    ANY_TAG.replace_all(text, "")
}

/// Turn HTML ruby readings into `[reading]` and drop all other markup.
///
/// `<ruby>漢字<rt>かんじ</rt></ruby>` becomes `漢字[かんじ]`.
pub fn dehtml(text: &str) -> String {
    let bracketed = RT_ELEMENT.replace_all(text, "[$reading]");
    strip_tags(&bracketed).into_owned()
}

/// Turn space-separated bracket shorthand into HTML ruby.
///
/// ` 漢字[かんじ]` becomes `<ruby><rb>漢字</rb><rt>かんじ</rt></ruby>`. Shorthand
/// at the very start of the text has no leading space and is left alone.
pub fn rubify(text: &str) -> Cow<'_, str> {
    BRACKET_SHORTHAND.replace_all(text, "<ruby><rb>$base</rb><rt>$reading</rt></ruby>")
}
