//! Learning-status classification for lexical units.

use std::fmt;

use crate::settings::HighlightSettings;
use crate::span::fold_case;

/// How well a lexical unit is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LearningStatus {
    Unknown,
    Learning,
    Known,
}

impl LearningStatus {
    /// Attribute value used in status markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStatus::Unknown => "unknown",
            LearningStatus::Learning => "learning",
            LearningStatus::Known => "known",
        }
    }
}

impl fmt::Display for LearningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a learning interval onto a status.
///
/// `0` is unknown, anything below `threshold` is learning, the rest is known.
pub fn classify(interval: u32, threshold: u32) -> LearningStatus {
    if interval == 0 {
        LearningStatus::Unknown
    } else if interval < threshold {
        LearningStatus::Learning
    } else {
        LearningStatus::Known
    }
}

/// A lexical unit found by the analyser, with its resolved learning intervals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexicalUnit {
    /// Dictionary form.
    pub lemma: String,
    /// Surface form as it appears in the text.
    pub inflection: String,
    /// Highest learning interval recorded for this exact inflection.
    pub inflection_interval: u32,
    /// Highest learning interval recorded for any inflection of the lemma.
    pub lemma_interval: u32,
}

impl LexicalUnit {
    /// Create a unit with no learning history.
    pub fn new(lemma: impl Into<String>, inflection: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            inflection: inflection.into(),
            inflection_interval: 0,
            lemma_interval: 0,
        }
    }

    pub fn with_inflection_interval(mut self, interval: u32) -> Self {
        self.inflection_interval = interval;
        self
    }

    pub fn with_lemma_interval(mut self, interval: u32) -> Self {
        self.lemma_interval = interval;
        self
    }

    /// The interval to judge this unit by.
    pub fn interval(&self, evaluate_inflection: bool) -> u32 {
        if evaluate_inflection {
            self.inflection_interval
        } else {
            self.lemma_interval
        }
    }

    pub fn status(&self, settings: &HighlightSettings) -> LearningStatus {
        classify(
            self.interval(settings.evaluate_inflection),
            settings.interval_for_known,
        )
    }

    /// Scanner input for this unit: lower-cased surface text and status.
    pub fn to_unit_status(&self, settings: &HighlightSettings) -> UnitStatus {
        UnitStatus::new(fold_case(&self.inflection), self.status(settings))
    }
}

/// Surface text paired with a resolved status. Carries no position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitStatus {
    pub surface: String,
    pub status: LearningStatus,
}

impl UnitStatus {
    pub fn new(surface: impl Into<String>, status: LearningStatus) -> Self {
        Self {
            surface: surface.into(),
            status,
        }
    }
}

/// Occurrence counts per status, as shown in readability summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub known: usize,
    pub learning: usize,
    pub unknown: usize,
}

impl StatusTally {
    pub fn record(&mut self, status: LearningStatus, occurrences: usize) {
        match status {
            LearningStatus::Known => self.known += occurrences,
            LearningStatus::Learning => self.learning += occurrences,
            LearningStatus::Unknown => self.unknown += occurrences,
        }
    }

    pub fn total(&self) -> usize {
        self.known + self.learning + self.unknown
    }

    /// Share of `status` in percent, or 0.0 for an empty tally.
    pub fn percent(&self, status: LearningStatus) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match status {
            LearningStatus::Known => self.known,
            LearningStatus::Learning => self.learning,
            LearningStatus::Unknown => self.unknown,
        };
        count as f64 / total as f64 * 100.0
    }
}

impl FromIterator<LearningStatus> for StatusTally {
    fn from_iter<I: IntoIterator<Item = LearningStatus>>(iter: I) -> Self {
        let mut tally = StatusTally::default();
        for status in iter {
            tally.record(status, 1);
        }
        tally
    }
}
