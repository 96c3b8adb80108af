//! Markup buffer that records tag insertions against a fixed text snapshot.

/// A text snapshot plus the markup fragments inserted into it.
///
/// Insertions are addressed in snapshot codepoint offsets, so offsets of
/// spans that have not been injected yet stay valid no matter how much markup
/// went in before them. Fragments sharing an offset are ordered on arrival:
/// closing fragments go in front of what is already there, opening fragments
/// go behind it.
#[derive(Debug, Clone)]
pub struct MarkupBuffer {
    chars: Vec<char>,
    /// Fragments to emit before the codepoint at each offset; the last slot
    /// holds fragments emitted after the final codepoint.
    slots: Vec<Vec<String>>,
}

impl MarkupBuffer {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let slots = vec![Vec::new(); chars.len() + 1];
        Self { chars, slots }
    }

    /// Length of the snapshot in codepoints.
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Insert an opening fragment at `offset`, inside anything already
    /// opened there.
    pub fn open(&mut self, offset: usize, fragment: impl Into<String>) {
        self.slots[offset].push(fragment.into());
    }

    /// Insert a closing fragment at `offset`, before anything already
    /// placed there.
    pub fn close(&mut self, offset: usize, fragment: impl Into<String>) {
        self.slots[offset].insert(0, fragment.into());
    }

    /// Render the snapshot with every fragment in place.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.chars.len() * 4);
        for (offset, slot) in self.slots.iter().enumerate() {
            for fragment in slot {
                out.push_str(fragment);
            }
            if let Some(c) = self.chars.get(offset) {
                out.push(*c);
            }
        }
        out
    }
}
