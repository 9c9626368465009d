//! Parser for the nasm data-declaration subset the assembly font format
//! uses: labels followed by `db`/`dw`/`dd` lists of integer literals.
//!
//! Only initialized-data declarations are understood, see
//! <http://www.nasm.us/doc/nasmdoc3.html#section-3.2.1> for the syntax
//! and section 3.4.1 for the numeral notations.

use lazy_static::lazy_static;
use regex::Regex;

use crate::byte_array::{Byte, ByteArray};
use crate::{FontError, Result};

lazy_static! {
    static ref LABEL_EXPR: Regex = Regex::new("[a-zA-Z0-9_]+:").unwrap();
    static ref DECLARATOR_EXPR: Regex = Regex::new(r"\b(?i:db|dw|dd)\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declarator {
    /// `db`, one byte per value
    Bytes,
    /// `dw`, two bytes per value, little endian
    Words,
    /// `dd`, four bytes per value, little endian
    DoubleWords,
}

impl Declarator {
    fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "db" => Declarator::Bytes,
            "dw" => Declarator::Words,
            _ => Declarator::DoubleWords,
        }
    }

    fn append(&self, value: u64, out: &mut ByteArray) {
        match self {
            Declarator::Bytes => out.push(Byte::from_int(value as i64)),
            Declarator::Words => *out += ByteArray::from_int(value, 2),
            Declarator::DoubleWords => *out += ByteArray::from_int(value, 4),
        }
    }
}

/// Parsed nasm data declarations, one [`ByteArray`] per label in source
/// order. Consecutive labels in front of a single data block all map to
/// that block's data.
#[derive(Debug, Clone, Default)]
pub struct AsmParser {
    labels: Vec<(String, ByteArray)>,
}

impl AsmParser {
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = AsmParser::default();
        let mut pending: Vec<String> = Vec::new();

        for segment in split_on_labels(source) {
            match segment {
                Segment::Label(name) => pending.push(name.to_string()),
                Segment::Data(text) => {
                    let data = parse_data(text)?;
                    for name in pending.drain(..) {
                        parser.insert(name, data.clone());
                    }
                }
            }
        }
        Ok(parser)
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|(label, _)| label == name)
    }

    pub fn get(&self, name: &str) -> Option<&ByteArray> {
        self.labels
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, data)| data)
    }

    /// Labels and their data in source order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &ByteArray)> {
        self.labels.iter().map(|(label, data)| (label.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn insert(&mut self, name: String, data: ByteArray) {
        // a redeclared label keeps its original position
        if let Some(slot) = self.labels.iter_mut().find(|(label, _)| *label == name) {
            slot.1 = data;
        } else {
            self.labels.push((name, data));
        }
    }
}

enum Segment<'a> {
    Label(&'a str),
    Data(&'a str),
}

/// Splits the source before and after every label, dropping segments
/// that hold nothing but whitespace.
fn split_on_labels(source: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;
    for m in LABEL_EXPR.find_iter(source) {
        let before = source[last_end..m.start()].trim();
        if !before.is_empty() {
            segments.push(Segment::Data(before));
        }
        segments.push(Segment::Label(&source[m.start()..m.end() - 1]));
        last_end = m.end();
    }
    let tail = source[last_end..].trim();
    if !tail.is_empty() {
        segments.push(Segment::Data(tail));
    }
    segments
}

/// Parses one data block (everything between two labels) into bytes.
/// Multiple declarations concatenate in source order.
fn parse_data(text: &str) -> Result<ByteArray> {
    let mut out = ByteArray::new();
    let mut declarator: Option<Declarator> = None;
    let mut last_end = 0;

    let mut handle_values = |chunk: &str, declarator: &mut Option<Declarator>| -> Result<()> {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return Ok(());
        }
        let Some(decl) = declarator.take() else {
            return Err(FontError::bad_literal(chunk));
        };
        for token in chunk.split(',') {
            let token: String = token.chars().filter(|c| !c.is_whitespace()).collect();
            decl.append(parse_numeral(&token)?, &mut out);
        }
        Ok(())
    };

    for m in DECLARATOR_EXPR.find_iter(text) {
        handle_values(&text[last_end..m.start()], &mut declarator)?;
        declarator = Some(Declarator::from_str(m.as_str()));
        last_end = m.end();
    }
    handle_values(&text[last_end..], &mut declarator)?;
    Ok(out)
}

/// Classifies a numeral token binary, then octal, then hexadecimal, then
/// decimal; the first class that matches the whole token wins.
fn parse_numeral(token: &str) -> Result<u64> {
    if let Some(value) = match_binary(token) {
        return Ok(value);
    }
    if let Some(value) = match_octal(token) {
        return Ok(value);
    }
    if let Some(value) = match_hexadecimal(token) {
        return Ok(value);
    }
    if let Some(value) = match_decimal(token) {
        return Ok(value);
    }
    Err(FontError::bad_literal(token))
}

/// `0b`/`0y` prefix or `b`/`y` suffix, digits 0/1 with interior
/// underscores allowed.
fn match_binary(token: &str) -> Option<u64> {
    let digits = strip_affix(token, &["0b", "0y"], &['b', 'y'])?;
    if digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }
    if !digits.chars().all(|c| matches!(c, '0' | '1' | '_')) {
        return None;
    }
    u64::from_str_radix(&digits.replace('_', ""), 2).ok()
}

/// `0o`/`0q` prefix or `o`/`q` suffix.
fn match_octal(token: &str) -> Option<u64> {
    let digits = strip_affix(token, &["0o", "0q"], &['o', 'q'])?;
    if !digits.chars().all(|c| matches!(c, '0'..='7')) {
        return None;
    }
    u64::from_str_radix(digits, 8).ok()
}

/// `0x`/`0h` prefix or `h` suffix, digits in either case.
fn match_hexadecimal(token: &str) -> Option<u64> {
    let digits = strip_affix(token, &["0x", "0h"], &['h'])?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// `0d` prefix, `d` suffix, or plain digits.
fn match_decimal(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0d")
        .or_else(|| token.strip_suffix('d'))
        .unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn strip_affix<'a>(token: &'a str, prefixes: &[&str], suffixes: &[char]) -> Option<&'a str> {
    for prefix in prefixes {
        if let Some(rest) = token.strip_prefix(prefix) {
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    for &suffix in suffixes {
        if let Some(rest) = token.strip_suffix(suffix) {
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    None
}
