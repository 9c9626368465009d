//! PSF headers for both format versions.
//!
//! Format reference: <https://www.win.tue.nl/~aeb/linux/kbd/font-formats-1.html>

use bitflags::bitflags;

use crate::{FontError, Result};

/// Magic bytes of a PSF1 file.
pub const PSF1_MAGIC: [u8; 2] = [0x36, 0x04];
/// Magic bytes of a PSF2 file.
pub const PSF2_MAGIC: [u8; 4] = [0x72, 0xb5, 0x4a, 0x86];

/// Terminates a unicode description in a PSF1 table.
pub const PSF1_SEPARATOR: u16 = 0xFFFF;
/// Introduces a combining sequence in a PSF1 table.
pub const PSF1_START_SEQ: u16 = 0xFFFE;
/// Terminates a unicode description in a PSF2 table.
pub const PSF2_SEPARATOR: u8 = 0xFF;
/// Introduces a combining sequence in a PSF2 table.
pub const PSF2_START_SEQ: u8 = 0xFE;

/// Size of a PSF2 header in bytes.
pub const PSF2_HEADER_SIZE: u32 = 32;

bitflags! {
    /// Mode bits of a PSF1 header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Psf1Mode: u8 {
        /// 512 glyphs instead of 256.
        const MODE_512 = 0x01;
        /// A unicode table follows the bitmaps.
        const HAS_TAB = 0x02;
        /// The unicode table contains combining sequences.
        const HAS_SEQ = 0x04;
    }
}

bitflags! {
    /// Flag bits of a PSF2 header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Psf2Flags: u32 {
        const HAS_UNICODE_TABLE = 0x01;
    }
}

/// Header of a PSF1 font. The glyph width is fixed at 8 pixels, the
/// charsize doubles as the glyph height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsfHeaderV1 {
    mode: Psf1Mode,
    charsize: u8,
}

impl PsfHeaderV1 {
    pub fn new(charsize: u8) -> Self {
        PsfHeaderV1 {
            mode: Psf1Mode::empty(),
            charsize,
        }
    }

    pub fn mode(&self) -> Psf1Mode {
        self.mode
    }

    /// Sets the given mode bits. Bits the format does not define are
    /// rejected.
    pub fn set_mode(&mut self, bits: u8) -> Result<()> {
        let mode = Psf1Mode::from_bits(bits).ok_or(FontError::UndefinedModeBits { mode: bits })?;
        self.mode |= mode;
        Ok(())
    }

    /// Clears the given mode bits.
    pub fn unset_mode(&mut self, bits: u8) -> Result<()> {
        let mode = Psf1Mode::from_bits(bits).ok_or(FontError::UndefinedModeBits { mode: bits })?;
        self.mode &= !mode;
        Ok(())
    }

    pub fn charsize(&self) -> u8 {
        self.charsize
    }

    pub fn width(&self) -> u32 {
        8
    }

    pub fn height(&self) -> u32 {
        self.charsize as u32
    }

    /// Glyph count, derived from the mode bits.
    pub fn length(&self) -> usize {
        if self.mode.contains(Psf1Mode::MODE_512) {
            512
        } else {
            256
        }
    }

    pub fn has_unicode_table(&self) -> bool {
        self.mode.intersects(Psf1Mode::HAS_TAB | Psf1Mode::HAS_SEQ)
    }
}

/// Header of a PSF2 font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsfHeaderV2 {
    version: u32,
    flags: Psf2Flags,
    length: u32,
    width: u32,
    height: u32,
}

impl PsfHeaderV2 {
    pub fn new(width: u32, height: u32) -> Self {
        PsfHeaderV2 {
            version: 0,
            flags: Psf2Flags::empty(),
            length: 0,
            width,
            height,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn flags(&self) -> Psf2Flags {
        self.flags
    }

    /// Sets the given flag bits. Bits the format does not define are
    /// rejected.
    pub fn set_flags(&mut self, bits: u32) -> Result<()> {
        let flags = Psf2Flags::from_bits(bits).ok_or(FontError::UndefinedFlagBits { flags: bits })?;
        self.flags |= flags;
        Ok(())
    }

    /// Clears the given flag bits.
    pub fn unset_flags(&mut self, bits: u32) -> Result<()> {
        let flags = Psf2Flags::from_bits(bits).ok_or(FontError::UndefinedFlagBits { flags: bits })?;
        self.flags &= !flags;
        Ok(())
    }

    pub fn length(&self) -> usize {
        self.length as usize
    }

    pub(crate) fn set_length(&mut self, length: u32) {
        self.length = length;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per glyph: one row is padded to a whole number of bytes.
    /// Saturates for dimensions no real font reaches.
    pub fn charsize(&self) -> u32 {
        self.height.saturating_mul(self.width.div_ceil(8))
    }

    pub fn has_unicode_table(&self) -> bool {
        self.flags.contains(Psf2Flags::HAS_UNICODE_TABLE)
    }
}

/// A PSF header of either format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsfHeader {
    V1(PsfHeaderV1),
    V2(PsfHeaderV2),
}

impl PsfHeader {
    pub fn magic_bytes(&self) -> &'static [u8] {
        match self {
            PsfHeader::V1(_) => &PSF1_MAGIC,
            PsfHeader::V2(_) => &PSF2_MAGIC,
        }
    }

    /// Size of the encoded header in bytes.
    pub fn size(&self) -> usize {
        match self {
            PsfHeader::V1(_) => 4,
            PsfHeader::V2(_) => PSF2_HEADER_SIZE as usize,
        }
    }

    /// Glyph dimensions as `(width, height)`.
    pub fn glyph_size(&self) -> (u32, u32) {
        match self {
            PsfHeader::V1(header) => (header.width(), header.height()),
            PsfHeader::V2(header) => (header.width(), header.height()),
        }
    }

    /// Bytes per glyph bitmap.
    pub fn charsize(&self) -> usize {
        match self {
            PsfHeader::V1(header) => header.charsize() as usize,
            PsfHeader::V2(header) => header.charsize() as usize,
        }
    }

    /// Number of glyphs the font holds.
    pub fn length(&self) -> usize {
        match self {
            PsfHeader::V1(header) => header.length(),
            PsfHeader::V2(header) => header.length(),
        }
    }

    pub fn has_unicode_table(&self) -> bool {
        match self {
            PsfHeader::V1(header) => header.has_unicode_table(),
            PsfHeader::V2(header) => header.has_unicode_table(),
        }
    }
}

impl From<PsfHeaderV1> for PsfHeader {
    fn from(header: PsfHeaderV1) -> Self {
        PsfHeader::V1(header)
    }
}

impl From<PsfHeaderV2> for PsfHeader {
    fn from(header: PsfHeaderV2) -> Self {
        PsfHeader::V2(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_length_follows_mode_bit() {
        let mut header = PsfHeaderV1::new(8);
        assert_eq!(header.length(), 256);
        header.set_mode(0x01).unwrap();
        assert_eq!(header.length(), 512);
        header.unset_mode(0x01).unwrap();
        assert_eq!(header.length(), 256);
    }

    #[test]
    fn v1_unicode_table_from_tab_or_seq() {
        let mut header = PsfHeaderV1::new(8);
        assert!(!header.has_unicode_table());
        header.set_mode(Psf1Mode::HAS_TAB.bits()).unwrap();
        assert!(header.has_unicode_table());

        let mut header = PsfHeaderV1::new(8);
        header.set_mode(Psf1Mode::HAS_SEQ.bits()).unwrap();
        assert!(header.has_unicode_table());
    }

    #[test]
    fn v1_rejects_undefined_mode_bits() {
        let mut header = PsfHeaderV1::new(8);
        assert!(matches!(
            header.set_mode(0x08),
            Err(FontError::UndefinedModeBits { mode: 0x08 })
        ));
        // all defined bits at once are fine
        header.set_mode(0x07).unwrap();
        assert_eq!(header.mode().bits(), 0x07);
    }

    #[test]
    fn v2_charsize_pads_rows_to_bytes() {
        let header = PsfHeaderV2::new(10, 8);
        assert_eq!(header.charsize(), 16);
        let header = PsfHeaderV2::new(8, 16);
        assert_eq!(header.charsize(), 16);
        let header = PsfHeaderV2::new(17, 4);
        assert_eq!(header.charsize(), 12);
    }

    #[test]
    fn v2_rejects_undefined_flag_bits() {
        let mut header = PsfHeaderV2::new(8, 8);
        assert!(matches!(
            header.set_flags(0x02),
            Err(FontError::UndefinedFlagBits { flags: 0x02 })
        ));
        header.set_flags(0x01).unwrap();
        assert!(header.has_unicode_table());
        header.unset_flags(0x01).unwrap();
        assert!(!header.has_unicode_table());
    }

    #[test]
    fn header_enum_accessors() {
        let header = PsfHeader::from(PsfHeaderV1::new(16));
        assert_eq!(header.magic_bytes(), &PSF1_MAGIC);
        assert_eq!(header.size(), 4);
        assert_eq!(header.glyph_size(), (8, 16));
        assert_eq!(header.charsize(), 16);

        let header = PsfHeader::from(PsfHeaderV2::new(10, 8));
        assert_eq!(header.magic_bytes(), &PSF2_MAGIC);
        assert_eq!(header.size(), 32);
        assert_eq!(header.glyph_size(), (10, 8));
        assert_eq!(header.charsize(), 16);
        assert_eq!(header.length(), 0);
    }
}
