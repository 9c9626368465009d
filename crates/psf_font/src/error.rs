//! Unified error types for psf_font

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for psf_font operations
#[derive(Debug, Error)]
pub enum FontError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    // === Byte / Bit Errors ===
    #[error("Invalid bit value: {value} (expected 0 or 1)")]
    InvalidBitValue { value: u8 },

    #[error("A byte consists of exactly 8 bits, got {count}")]
    InvalidBitCount { count: usize },

    #[error("Bit index {index} out of range (0..8)")]
    BitIndexOutOfRange { index: usize },

    #[error("Bit array length must be a multiple of 8, got {length}")]
    InvalidBitArrayLength { length: usize },

    #[error("Byte array length {length} is not divisible into groups of {group}")]
    GroupSizeMismatch { length: usize, group: usize },

    #[error("Line length {line_length} too short for label '{label}'")]
    AsmLineTooShort { label: String, line_length: usize },

    // === Header Errors ===
    #[error("Undefined bits in PSF1 mode value {mode:#04x}")]
    UndefinedModeBits { mode: u8 },

    #[error("Undefined bits in PSF2 flags value {flags:#010x}")]
    UndefinedFlagBits { flags: u32 },

    // === Glyph Errors ===
    #[error("Bitmap dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Glyph data too short: expected {expected} bytes, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    // === Unicode Table Errors ===
    #[error("Unicode sequence needs at least 2 codepoints, got {length}")]
    SequenceTooShort { length: usize },

    #[error("Value {value:#x} is not a Unicode codepoint")]
    InvalidCodepoint { value: u32 },

    #[error("Unicode description count mismatch: expected {expected}, got {actual}")]
    UnicodeDescriptionCountMismatch { expected: usize, actual: usize },

    #[error("Malformed unicode table: {message}")]
    MalformedUnicodeTable { message: String },

    // === Import Errors ===
    #[error("Invalid file ID or magic number mismatch")]
    UnknownMagicBytes,

    #[error("Missing required label '{label}'")]
    MissingRequiredLabel { label: String },

    #[error("Could not parse '{token}' as an integer")]
    NumericLiteralParse { token: String },

    #[error("Cannot detect the font format of '{path}'")]
    UnknownFileFormat { path: PathBuf },
}

/// Result type alias for psf_font operations
pub type Result<T> = std::result::Result<T, FontError>;

// === Convenience constructors ===
impl FontError {
    /// Create a missing label error
    pub fn missing_label(label: impl Into<String>) -> Self {
        Self::MissingRequiredLabel { label: label.into() }
    }

    /// Create a malformed unicode table error
    pub fn malformed_table(msg: impl Into<String>) -> Self {
        Self::MalformedUnicodeTable { message: msg.into() }
    }

    /// Create a numeric literal error
    pub fn bad_literal(token: impl Into<String>) -> Self {
        Self::NumericLiteralParse { token: token.into() }
    }
}
