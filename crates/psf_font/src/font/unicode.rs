//! Unicode descriptions attached to glyphs.

use std::fmt;

use crate::{FontError, Result};

/// A single codepoint a glyph renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeValue(char);

impl UnicodeValue {
    pub fn new(value: char) -> Self {
        UnicodeValue(value)
    }

    /// Validates a raw codepoint (surrogates and out-of-range values
    /// are rejected).
    pub fn from_u32(value: u32) -> Result<Self> {
        char::from_u32(value)
            .map(UnicodeValue)
            .ok_or(FontError::InvalidCodepoint { value })
    }

    pub fn codepoint(&self) -> u32 {
        self.0 as u32
    }

    pub fn char(&self) -> char {
        self.0
    }

    /// The character, unless it is a control character.
    pub fn printable(&self) -> Option<char> {
        if self.0.is_control() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl fmt::Display for UnicodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for UnicodeValue {
    fn from(value: char) -> Self {
        UnicodeValue(value)
    }
}

/// A combining sequence: at least two codepoints that together form one
/// grapheme the glyph renders.
///
/// Two sequences compare equal when they contain the same codepoints,
/// regardless of order.
#[derive(Debug, Clone)]
pub struct UnicodeSequence {
    values: Vec<UnicodeValue>,
}

impl UnicodeSequence {
    pub fn from_values(values: Vec<UnicodeValue>) -> Result<Self> {
        if values.len() < 2 {
            return Err(FontError::SequenceTooShort { length: values.len() });
        }
        Ok(UnicodeSequence { values })
    }

    pub fn from_codepoints(codepoints: &[u32]) -> Result<Self> {
        let values = codepoints
            .iter()
            .map(|&cp| UnicodeValue::from_u32(cp))
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(values)
    }

    pub fn values(&self) -> &[UnicodeValue] {
        &self.values
    }

    pub fn codepoints(&self) -> Vec<u32> {
        self.values.iter().map(UnicodeValue::codepoint).collect()
    }

    pub fn printable(&self) -> String {
        self.values.iter().map(UnicodeValue::char).collect()
    }
}

impl PartialEq for UnicodeSequence {
    fn eq(&self, other: &Self) -> bool {
        let mut lhs = self.codepoints();
        let mut rhs = other.codepoints();
        lhs.sort_unstable();
        rhs.sort_unstable();
        lhs == rhs
    }
}

impl Eq for UnicodeSequence {}

/// Everything the unicode table knows about one glyph: the codepoints
/// it renders and the combining sequences it stands in for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnicodeDescription {
    values: Vec<UnicodeValue>,
    sequences: Vec<UnicodeSequence>,
}

impl UnicodeDescription {
    pub fn new() -> Self {
        UnicodeDescription::default()
    }

    /// Appends a codepoint, ignoring duplicates.
    pub fn add_value(&mut self, value: UnicodeValue) {
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    pub fn remove_value(&mut self, value: UnicodeValue) {
        self.values.retain(|v| *v != value);
    }

    /// Appends a sequence, ignoring duplicates. Sequence equality is
    /// order-insensitive, so a reordering of an existing sequence
    /// counts as a duplicate.
    pub fn add_sequence(&mut self, sequence: UnicodeSequence) {
        if !self.sequences.contains(&sequence) {
            self.sequences.push(sequence);
        }
    }

    pub fn remove_sequence(&mut self, sequence: &UnicodeSequence) {
        self.sequences.retain(|s| s != sequence);
    }

    pub fn values(&self) -> &[UnicodeValue] {
        &self.values
    }

    pub fn sequences(&self) -> &[UnicodeSequence] {
        &self.sequences
    }

    pub fn codepoints(&self) -> Vec<u32> {
        self.values.iter().map(UnicodeValue::codepoint).collect()
    }

    pub fn has_sequences(&self) -> bool {
        !self.sequences.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.sequences.is_empty()
    }
}
