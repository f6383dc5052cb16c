//! Name normalization
//!
//! Turns a free-form person name into uppercase ASCII word tokens: accents
//! are decomposed and dropped, anything that is not a letter, digit or
//! whitespace is deleted (without inserting a space), whitespace is collapsed.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// A cleaned name: uppercase `[A-Z0-9]` words separated by single spaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str { &self.0 }

    pub fn tokens(&self) -> Vec<&str> {
        self.0.split(' ').filter(|t| !t.is_empty()).collect()
    }

    /// The cleaned name with its spaces removed.
    pub fn compact(&self) -> String {
        self.0.chars().filter(|c| *c != ' ').collect()
    }
}

pub fn normalize_name(input: &str) -> NormalizedName {
    let stripped: String = input
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    NormalizedName(collapsed.to_ascii_uppercase())
}
