//! Byte-level primitives shared by the binary and assembly codecs.
//!
//! [`Byte`] is a single octet with addressable bits (index 0 is the most
//! significant bit), [`ByteArray`] an ordered run of them with
//! little-endian integer conversions and a nasm `db` renderer.

use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, BitOr, BitXor, Index};

use crate::{FontError, Result};

/// A single byte with bit-level access. Bit index 0 is the most
/// significant bit, index 7 the least significant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Byte(u8);

impl Byte {
    pub const fn new(value: u8) -> Self {
        Byte(value)
    }

    /// Reduces the value into the byte range with a Euclidean remainder,
    /// so negative inputs map onto `0..=255` as well.
    pub fn from_int(value: i64) -> Self {
        Byte(value.rem_euclid(256) as u8)
    }

    /// Builds a byte from exactly 8 bits, most significant first.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        if bits.len() != 8 {
            return Err(FontError::InvalidBitCount { count: bits.len() });
        }
        let mut value = 0u8;
        for &bit in bits {
            if bit > 1 {
                return Err(FontError::InvalidBitValue { value: bit });
            }
            value = (value << 1) | bit;
        }
        Ok(Byte(value))
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    pub fn bit(&self, index: usize) -> Result<u8> {
        if index >= 8 {
            return Err(FontError::BitIndexOutOfRange { index });
        }
        Ok((self.0 >> (7 - index)) & 1)
    }

    pub fn with_bit(self, index: usize, value: u8) -> Result<Self> {
        if index >= 8 {
            return Err(FontError::BitIndexOutOfRange { index });
        }
        if value > 1 {
            return Err(FontError::InvalidBitValue { value });
        }
        let mask = 0x80 >> index;
        Ok(Byte(if value == 1 { self.0 | mask } else { self.0 & !mask }))
    }

    pub fn bits(&self) -> [u8; 8] {
        let mut bits = [0u8; 8];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (self.0 >> (7 - i)) & 1;
        }
        bits
    }

    pub fn hex(&self) -> String {
        format!("0x{:02x}", self.0)
    }
}

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Byte(value)
    }
}

impl BitAnd for Byte {
    type Output = Byte;
    fn bitand(self, rhs: Byte) -> Byte {
        Byte(self.0 & rhs.0)
    }
}

impl BitOr for Byte {
    type Output = Byte;
    fn bitor(self, rhs: Byte) -> Byte {
        Byte(self.0 | rhs.0)
    }
}

impl BitXor for Byte {
    type Output = Byte;
    fn bitxor(self, rhs: Byte) -> Byte {
        Byte(self.0 ^ rhs.0)
    }
}

/// Layout options for [`ByteArray::to_asm`].
#[derive(Debug, Clone)]
pub struct AsmFormat {
    /// Maximum number of characters per line.
    pub line_length: usize,
    /// Tab levels the whole block is indented by.
    pub indent: usize,
    /// Spaces per tab level.
    pub tab_size: usize,
    /// Terminate the output with a linebreak.
    pub end_with_linebreak: bool,
}

impl Default for AsmFormat {
    fn default() -> Self {
        AsmFormat {
            line_length: 80,
            indent: 0,
            tab_size: 4,
            end_with_linebreak: true,
        }
    }
}

/// An ordered run of [`Byte`]s. Integer conversions in both directions
/// are little endian.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteArray {
    bytes: Vec<Byte>,
}

impl ByteArray {
    pub fn new() -> Self {
        ByteArray::default()
    }

    /// Little-endian encoding of `value`. With `fixed_len == 0` the
    /// natural length is used (zero encodes to an empty array),
    /// otherwise the result is truncated or zero-padded to exactly
    /// `fixed_len` bytes.
    pub fn from_int(value: u64, fixed_len: usize) -> Self {
        let mut bytes = Vec::new();
        let mut value = value;
        while value != 0 {
            bytes.push(Byte::new((value % 256) as u8));
            value /= 256;
        }
        if fixed_len != 0 {
            bytes.truncate(fixed_len);
            bytes.resize(fixed_len, Byte::new(0));
        }
        ByteArray { bytes }
    }

    /// Packs a run of bits (most significant first per byte). The bit
    /// count must be a multiple of 8.
    pub fn from_bit_array(bits: &[u8]) -> Result<Self> {
        if bits.len() % 8 != 0 {
            return Err(FontError::InvalidBitArrayLength { length: bits.len() });
        }
        let mut bytes = Vec::with_capacity(bits.len() / 8);
        for chunk in bits.chunks_exact(8) {
            bytes.push(Byte::from_bits(chunk)?);
        }
        Ok(ByteArray { bytes })
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        ByteArray {
            bytes: data.iter().map(|&b| Byte::new(b)).collect(),
        }
    }

    pub fn push(&mut self, byte: Byte) {
        self.bytes.push(byte);
    }

    pub fn add_bytes(&mut self, bytes: &[Byte]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn get(&self, index: usize) -> Option<Byte> {
        self.bytes.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Byte> {
        self.bytes.iter()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.iter().map(|b| b.value()).collect()
    }

    /// Little-endian integer value of the whole array. Bytes beyond the
    /// eighth are ignored.
    pub fn to_int(&self) -> u64 {
        let mut value = 0u64;
        for (i, byte) in self.bytes.iter().take(8).enumerate() {
            value |= (byte.value() as u64) << (8 * i);
        }
        value
    }

    /// Splits the array into little-endian groups of `bytes_per_int`
    /// bytes. The array length must be divisible by the group size.
    pub fn to_ints(&self, bytes_per_int: usize) -> Result<Vec<u64>> {
        if bytes_per_int == 0 || self.bytes.len() % bytes_per_int != 0 {
            return Err(FontError::GroupSizeMismatch {
                length: self.bytes.len(),
                group: bytes_per_int,
            });
        }
        let mut ints = Vec::with_capacity(self.bytes.len() / bytes_per_int);
        for group in self.bytes.chunks_exact(bytes_per_int) {
            let mut value = 0u64;
            for (i, byte) in group.iter().take(8).enumerate() {
                value |= (byte.value() as u64) << (8 * i);
            }
            ints.push(value);
        }
        Ok(ints)
    }

    /// Renders the array as a nasm `db` declaration.
    ///
    /// The first line carries the label, continuation lines are indented
    /// one extra tab level and re-prefixed with `db `. A value that
    /// would push a line past `line_length` starts a new line and the
    /// wrapped line loses its trailing `", "`. An empty label renders
    /// the plain value list without a declarator.
    pub fn to_asm(&self, label: &str, format: &AsmFormat) -> Result<String> {
        if label.len() + 5 + format.indent * format.tab_size > format.line_length {
            return Err(FontError::AsmLineTooShort {
                label: label.to_string(),
                line_length: format.line_length,
            });
        }

        let mut indent = format.indent;
        let mut line = " ".repeat(indent * format.tab_size);
        let mut declarator = "";
        if !label.is_empty() {
            declarator = "db ";
            line.push_str(label);
            line.push_str(": ");
            line.push_str(declarator);
            indent += 1;
        }

        let mut lines = Vec::new();
        for (i, byte) in self.bytes.iter().enumerate() {
            let mut to_add = byte.hex();
            if i + 1 < self.bytes.len() {
                to_add.push_str(", ");
            }
            if line.len() + to_add.len() > format.line_length {
                // the running line always ends with ", " at this point
                line.truncate(line.len() - 2);
                lines.push(line);
                line = " ".repeat(indent * format.tab_size);
                line.push_str(declarator);
                line.push_str(&to_add);
            } else {
                line.push_str(&to_add);
            }
        }
        lines.push(line);

        let mut out = String::new();
        for line in &lines {
            out.push_str(line);
            out.push('\n');
        }
        if !format.end_with_linebreak {
            out.pop();
        }
        Ok(out)
    }
}

impl Index<usize> for ByteArray {
    type Output = Byte;
    fn index(&self, index: usize) -> &Byte {
        &self.bytes[index]
    }
}

impl Add for ByteArray {
    type Output = ByteArray;
    fn add(mut self, rhs: ByteArray) -> ByteArray {
        self.bytes.extend(rhs.bytes);
        self
    }
}

impl AddAssign for ByteArray {
    fn add_assign(&mut self, rhs: ByteArray) {
        self.bytes.extend(rhs.bytes);
    }
}

impl FromIterator<Byte> for ByteArray {
    fn from_iter<T: IntoIterator<Item = Byte>>(iter: T) -> Self {
        ByteArray {
            bytes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ByteArray {
    type Item = &'a Byte;
    type IntoIter = std::slice::Iter<'a, Byte>;
    fn into_iter(self) -> Self::IntoIter {
        self.bytes.iter()
    }
}
