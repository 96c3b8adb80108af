//! Settings infrastructure for morphlight.
//!
//! This module provides support for loading and parsing settings.toml files
//! that control how learning status is judged and which ruby markup is read.

use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::ruby::RubySyntax;

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Highlighting configuration.
    pub highlight: Option<HighlightSettings>,
}

impl Settings {
    /// The `[highlight]` table, or defaults when it is absent.
    pub fn highlight(&self) -> HighlightSettings {
        self.highlight.clone().unwrap_or_default()
    }
}

/// Settings for judging units and reading ruby markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    /// Judge a unit by its inflection's interval (default: true).
    /// When false, the lemma's interval is used instead.
    pub evaluate_inflection: bool,

    /// Interval in days at or above which a unit counts as known.
    pub interval_for_known: u32,

    /// Ruby markup in the raw text: "html" or "bracket".
    pub ruby_syntax: RubySyntax,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            evaluate_inflection: true,
            interval_for_known: 21,
            ruby_syntax: RubySyntax::default(),
        }
    }
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml.
/// If not found, returns `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    // Phase 1: Walk up from start_dir
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join("settings.toml");
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    // Phase 2: Check immediate child directories
    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join("settings.toml");
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}
