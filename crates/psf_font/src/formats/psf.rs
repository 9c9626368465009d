//! The binary PSF representation.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::warn;

use crate::byte_array::ByteArray;
use crate::font::header::{PsfHeader, PsfHeaderV1, PsfHeaderV2, Psf1Mode, PSF1_MAGIC, PSF1_SEPARATOR, PSF2_HEADER_SIZE, PSF2_MAGIC, PSF2_SEPARATOR};
use crate::font::PcScreenFont;
use crate::formats::{decode_v1_entries, decode_v2_entries, encode_description, Exporter, Importer, ParsedDescription};
use crate::{FontError, Result};

pub struct PsfExporter<'a> {
    font: &'a PcScreenFont,
}

impl<'a> PsfExporter<'a> {
    pub fn new(font: &'a PcScreenFont) -> Self {
        PsfExporter { font }
    }
}

impl Exporter for PsfExporter<'_> {
    type Data = Vec<u8>;

    fn font(&self) -> &PcScreenFont {
        self.font
    }

    fn build_header(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(self.font.header().magic_bytes());
        match self.font.header() {
            PsfHeader::V1(header) => {
                let mut mode = header.mode();
                if self.font.has_sequences() {
                    mode |= Psf1Mode::HAS_SEQ;
                }
                out.push(mode.bits());
                out.push(header.charsize());
            }
            PsfHeader::V2(header) => {
                out.write_u32::<LittleEndian>(header.version())?;
                out.write_u32::<LittleEndian>(PSF2_HEADER_SIZE)?;
                out.write_u32::<LittleEndian>(header.flags().bits())?;
                out.write_u32::<LittleEndian>(header.length() as u32)?;
                out.write_u32::<LittleEndian>(header.charsize())?;
                out.write_u32::<LittleEndian>(header.height())?;
                out.write_u32::<LittleEndian>(header.width())?;
            }
        }
        Ok(out)
    }

    fn build_bitmaps(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for slot in self.font.slots() {
            out.extend_from_slice(&slot.bitmap().to_byte_array().to_vec());
        }
        Ok(out)
    }

    fn build_unicode_table(&self) -> Result<Vec<u8>> {
        let v1 = matches!(self.font.header(), PsfHeader::V1(_));
        let mut out = Vec::new();
        for slot in self.font.slots() {
            let description = slot.description().cloned().unwrap_or_default();
            out.extend_from_slice(&encode_description(v1, &description));
        }
        Ok(out)
    }
}

pub struct PsfImporter {
    data: Vec<u8>,
}

impl PsfImporter {
    /// A header announcing more bitmap data than the file carries is
    /// rejected before any glyph storage is allocated.
    fn check_declared_size(&self, header: &PsfHeader) -> Result<()> {
        let (width, height) = header.glyph_size();
        let charsize = (height as u64).saturating_mul((width as u64).div_ceil(8));
        let needed = (header.size() as u64).saturating_add((header.length() as u64).saturating_mul(charsize));
        if (self.data.len() as u64) < needed {
            return Err(FontError::TruncatedData {
                expected: usize::try_from(needed).unwrap_or(usize::MAX),
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

impl Importer for PsfImporter {
    fn from_data(data: &[u8]) -> Result<Self> {
        Ok(PsfImporter { data: data.to_vec() })
    }

    fn header(&self) -> Result<PsfHeader> {
        if self.data.starts_with(&PSF1_MAGIC) {
            if self.data.len() < 4 {
                return Err(FontError::TruncatedData {
                    expected: 4,
                    actual: self.data.len(),
                });
            }
            let mut header = PsfHeaderV1::new(self.data[3]);
            header.set_mode(self.data[2])?;
            let header = header.into();
            self.check_declared_size(&header)?;
            Ok(header)
        } else if self.data.starts_with(&PSF2_MAGIC) {
            if self.data.len() < PSF2_HEADER_SIZE as usize {
                return Err(FontError::TruncatedData {
                    expected: PSF2_HEADER_SIZE as usize,
                    actual: self.data.len(),
                });
            }
            let mut fields = &self.data[4..PSF2_HEADER_SIZE as usize];
            let version = fields.read_u32::<LittleEndian>()?;
            if version != 0 {
                warn!("nonzero PSF2 version {version}, reading as version 0");
            }
            let headersize = fields.read_u32::<LittleEndian>()?;
            if headersize != PSF2_HEADER_SIZE {
                warn!("ignoring stored header size {headersize}, using {PSF2_HEADER_SIZE}");
            }
            let flags = fields.read_u32::<LittleEndian>()?;
            let length = fields.read_u32::<LittleEndian>()?;
            // the stored charsize is redundant, it is recomputed from
            // the glyph dimensions
            let _charsize = fields.read_u32::<LittleEndian>()?;
            let height = fields.read_u32::<LittleEndian>()?;
            let width = fields.read_u32::<LittleEndian>()?;
            let mut header = PsfHeaderV2::new(width, height);
            header.set_flags(flags)?;
            header.set_length(length);
            let header = header.into();
            self.check_declared_size(&header)?;
            Ok(header)
        } else {
            Err(FontError::UnknownMagicBytes)
        }
    }

    fn build_glyph(&self, font: &mut PcScreenFont, index: usize) -> Result<()> {
        let charsize = font.header().charsize();
        let start = font.header().size() + index * charsize;
        let end = start + charsize;
        let slice = self
            .data
            .get(start..end)
            .ok_or(FontError::TruncatedData {
                expected: end,
                actual: self.data.len(),
            })?;
        if let Some(bitmap) = font.glyph_mut(index) {
            bitmap.set_data_from_bytes(&ByteArray::from_bytes(slice))?;
        }
        Ok(())
    }

    fn parse_unicode_descriptions(&self) -> Result<Vec<ParsedDescription>> {
        let header = self.header()?;
        let table_start = header.size() + header.length() * header.charsize();
        let table = self.data.get(table_start..).unwrap_or(&[]);

        let mut descriptions = Vec::new();
        match header {
            PsfHeader::V1(_) => {
                if table.len() % 2 != 0 {
                    return Err(FontError::malformed_table("PSF1 unicode table has odd length"));
                }
                let values: Vec<u16> = table
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                // data after the final separator forms no description
                // and is dropped
                let mut current = Vec::new();
                for value in values {
                    if value == PSF1_SEPARATOR {
                        descriptions.push(Some(decode_v1_entries(&current)));
                        current.clear();
                    } else {
                        current.push(value);
                    }
                }
            }
            PsfHeader::V2(_) => {
                let mut current = Vec::new();
                for &byte in table {
                    if byte == PSF2_SEPARATOR {
                        descriptions.push(Some(decode_v2_entries(&current)?));
                        current.clear();
                    } else {
                        current.push(byte);
                    }
                }
            }
        }
        Ok(descriptions)
    }
}
