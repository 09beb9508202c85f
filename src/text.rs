//! Original text of a bound element, split into animation units.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// How a text buffer is split into positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextUnit {
    /// One position per Unicode scalar value.
    #[default]
    CodePoint,
    /// One position per extended grapheme cluster.
    Grapheme,
}

/// Immutable text plus the byte range of every unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    bounds: Vec<Range<usize>>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>, unit: TextUnit) -> Self {
        let text = text.into();
        let bounds = match unit {
            TextUnit::CodePoint => text
                .char_indices()
                .map(|(start, ch)| start..start + ch.len_utf8())
                .collect(),
            TextUnit::Grapheme => text
                .grapheme_indices(true)
                .map(|(start, g)| start..start + g.len())
                .collect(),
        };
        Self { text, bounds }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of units (not bytes).
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn unit(&self, index: usize) -> Option<&str> {
        self.bounds.get(index).map(|r| &self.text[r.clone()])
    }

    pub fn units(&self) -> impl Iterator<Item = &str> + '_ {
        self.bounds.iter().map(|r| &self.text[r.clone()])
    }

    /// True when the text has nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A unit counts as whitespace when every scalar value in it does.
pub fn is_whitespace_unit(unit: &str) -> bool {
    !unit.is_empty() && unit.chars().all(char::is_whitespace)
}
