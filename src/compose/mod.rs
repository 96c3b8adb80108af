//! Merging ruby spans and status spans into one well-nested markup string.
//!
//! This module provides:
//! - `compose` for laying both span layers over a clean text
//! - `MarkupBuffer` for recording tag insertions against the clean text
//!
//! Rubies render as `<ruby>base<rt>annotation</rt></ruby>` and statuses as
//! `<span morph-status="…">…</span>`. When a status span crosses a ruby
//! boundary it is split at that boundary, so the output never interleaves
//! tags and never nests a span inside another span.

mod buffer;

pub use buffer::MarkupBuffer;

use log::{debug, warn};

use crate::error::{ComposeError, SpanKind};
use crate::span::{OffsetRange, Relation, RubySpan, StatusSpan};

const RUBY_OPEN: &str = "<ruby>";
const RUBY_CLOSE: &str = "</ruby>";
const SPAN_CLOSE: &str = "</span>";

fn span_open(status: &StatusSpan) -> String {
    format!("<span morph-status=\"{}\">", status.status)
}

fn annotation(ruby: &RubySpan) -> String {
    format!("<rt>{}</rt>", ruby.annotation)
}

/// Lay `rubies` and `statuses` over `text`.
///
/// Offsets are codepoint offsets into `text`. Spans within one layer must be
/// non-empty, inside the text, and must not overlap each other; they may
/// arrive in any order.
pub fn compose(
    text: &str,
    mut rubies: Vec<RubySpan>,
    mut statuses: Vec<StatusSpan>,
) -> Result<String, ComposeError> {
    let buffer = MarkupBuffer::new(text);
    let len = buffer.char_len();

    rubies.sort_by_key(|ruby| ruby.range);
    statuses.sort_by_key(|status| status.range);
    validate(SpanKind::Ruby, rubies.iter().map(|r| r.range), len)?;
    validate(SpanKind::Status, statuses.iter().map(|s| s.range), len)?;

    debug!(
        "composing {} rubies and {} statuses over {} codepoints",
        rubies.len(),
        statuses.len(),
        len
    );

    let mut compositor = Compositor {
        buffer,
        rubies,
        statuses,
    };
    compositor.run()?;
    Ok(compositor.buffer.render())
}

/// Check one sorted layer for empty, out-of-bounds or overlapping spans.
fn validate(
    kind: SpanKind,
    ranges: impl Iterator<Item = OffsetRange>,
    len: usize,
) -> Result<(), ComposeError> {
    let mut previous: Option<OffsetRange> = None;
    for range in ranges {
        if range.is_empty() {
            return Err(ComposeError::Degenerate { kind, range });
        }
        if range.end > len {
            return Err(ComposeError::OutOfBounds { kind, range, len });
        }
        if let Some(first) = previous.filter(|prev| prev.overlaps(&range)) {
            return Err(ComposeError::Overlapping {
                kind,
                first,
                second: range,
            });
        }
        previous = Some(range);
    }
    Ok(())
}

/// Drains both layers from the back of the text towards the front.
///
/// Each stack is sorted ascending, so `pop` yields the span with the
/// greatest start. Work always happens at or after the start of the current
/// pair, which keeps every pending span's offsets unaffected.
struct Compositor {
    buffer: MarkupBuffer,
    rubies: Vec<RubySpan>,
    statuses: Vec<StatusSpan>,
}

impl Compositor {
    fn run(&mut self) -> Result<(), ComposeError> {
        let mut held_ruby: Option<RubySpan> = None;
        let mut held_status: Option<StatusSpan> = None;

        loop {
            if held_ruby.is_none() {
                held_ruby = self.rubies.pop();
            }
            if held_status.is_none() {
                held_status = self.statuses.pop();
            }

            let (ruby, status) = match (held_ruby.take(), held_status.take()) {
                (None, None) => break,
                (None, Some(status)) => {
                    self.inject_status(&status);
                    continue;
                }
                (Some(ruby), None) => {
                    self.inject_ruby(&ruby);
                    continue;
                }
                (Some(ruby), Some(status)) => (ruby, status),
            };

            let Some(relation) = Relation::classify(&ruby.range, &status.range) else {
                warn!(
                    "unclassifiable ruby {} against status {}",
                    ruby.range, status.range
                );
                return Err(ComposeError::Unclassified {
                    ruby: ruby.range,
                    status: status.range,
                });
            };
            debug!("ruby {} / status {}: {:?}", ruby.range, status.range, relation);

            match relation {
                Relation::Disjoint => {
                    // Only the later of the two is injected; the other waits
                    // for the next round.
                    if ruby.range.start > status.range.start {
                        self.inject_ruby(&ruby);
                        held_status = Some(status);
                    } else {
                        self.inject_status(&status);
                        held_ruby = Some(ruby);
                    }
                }
                Relation::Identical => {
                    let close = format!("{}{RUBY_CLOSE}{SPAN_CLOSE}", annotation(&ruby));
                    let open = format!("{}{RUBY_OPEN}", span_open(&status));
                    self.buffer.close(ruby.range.end, close);
                    self.buffer.open(ruby.range.start, open);
                }
                Relation::RubyInsideStatus => {
                    self.inject_status(&status);
                    self.inject_ruby(&ruby);
                    self.absorb_rubies(&status);
                }
                Relation::StatusInsideRuby => {
                    self.inject_ruby(&ruby);
                    self.inject_status(&status);
                    self.absorb_statuses(&ruby);
                }
                Relation::RubyLeads => {
                    // <ruby>…<span>…</span><rt/></ruby><span>…</span>
                    let open = span_open(&status);
                    self.buffer.close(status.range.end, SPAN_CLOSE);
                    self.buffer.close(
                        ruby.range.end,
                        format!("{SPAN_CLOSE}{}{RUBY_CLOSE}{open}", annotation(&ruby)),
                    );
                    self.buffer.open(status.range.start, open);
                    self.buffer.open(ruby.range.start, RUBY_OPEN);
                    self.absorb_statuses(&ruby);
                }
                Relation::StatusLeads => {
                    // <span>…</span><ruby><span>…</span>…<rt/></ruby>
                    let open = span_open(&status);
                    self.buffer
                        .close(ruby.range.end, format!("{}{RUBY_CLOSE}", annotation(&ruby)));
                    self.buffer.close(status.range.end, SPAN_CLOSE);
                    self.buffer.close(ruby.range.start, SPAN_CLOSE);
                    self.buffer
                        .open(ruby.range.start, format!("{RUBY_OPEN}{open}"));
                    self.buffer.open(status.range.start, open);
                    self.absorb_rubies(&status);
                }
            }
        }

        Ok(())
    }

    fn inject_status(&mut self, status: &StatusSpan) {
        self.buffer.close(status.range.end, SPAN_CLOSE);
        self.buffer.open(status.range.start, span_open(status));
    }

    fn inject_ruby(&mut self, ruby: &RubySpan) {
        self.buffer
            .close(ruby.range.end, format!("{}{RUBY_CLOSE}", annotation(ruby)));
        self.buffer.open(ruby.range.start, RUBY_OPEN);
    }

    /// Inject the remaining statuses that reach into `ruby`.
    ///
    /// Statuses fully inside the ruby are plain injections. One that starts
    /// before the ruby is split at the ruby's start, and its outer half may
    /// in turn pull in earlier rubies.
    fn absorb_statuses(&mut self, ruby: &RubySpan) {
        while self
            .statuses
            .last()
            .is_some_and(|status| status.range.end > ruby.range.start)
        {
            let Some(status) = self.statuses.pop() else {
                break;
            };
            if status.range.start >= ruby.range.start {
                self.inject_status(&status);
                continue;
            }

            debug!("status {} split at ruby {}", status.range, ruby.range);
            let open = span_open(&status);
            self.buffer.close(status.range.end, SPAN_CLOSE);
            self.buffer.open(ruby.range.start, open.clone());
            self.buffer.close(ruby.range.start, SPAN_CLOSE);
            self.buffer.open(status.range.start, open);
            self.absorb_rubies(&status);
            break;
        }
    }

    /// Inject the remaining rubies that reach into `status`.
    ///
    /// Rubies fully inside the status are plain injections. One that starts
    /// before the status wraps the status's head, and may in turn pull in
    /// earlier statuses.
    fn absorb_rubies(&mut self, status: &StatusSpan) {
        while self
            .rubies
            .last()
            .is_some_and(|ruby| ruby.range.end > status.range.start)
        {
            let Some(ruby) = self.rubies.pop() else {
                break;
            };
            if ruby.range.start >= status.range.start {
                self.inject_ruby(&ruby);
                continue;
            }

            debug!("ruby {} wraps head of status {}", ruby.range, status.range);
            self.buffer.close(
                ruby.range.end,
                format!(
                    "{SPAN_CLOSE}{}{RUBY_CLOSE}{}",
                    annotation(&ruby),
                    span_open(status)
                ),
            );
            self.buffer.open(ruby.range.start, RUBY_OPEN);
            self.absorb_statuses(&ruby);
            break;
        }
    }
}
