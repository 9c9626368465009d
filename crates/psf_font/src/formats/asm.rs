//! The nasm assembly representation of a font.
//!
//! The layout mirrors what a kernel would include at build time: a
//! `font_header:` section (the magic bytes plus the header fields), a
//! `font_bitmaps:` section with one `glyph_<n>` label per glyph, and an
//! optional `unicode_table:` section with one `Unicodedescription<n>`
//! label per glyph.

use log::warn;

use crate::asm_parser::AsmParser;
use crate::byte_array::{AsmFormat, ByteArray};
use crate::font::header::{Psf1Mode, PsfHeader, PsfHeaderV1, PsfHeaderV2, PSF1_MAGIC, PSF2_HEADER_SIZE, PSF2_MAGIC};
use crate::font::PcScreenFont;
use crate::formats::{
    decode_v1_entries, decode_v2_entries, encode_description, DescriptionEntry, Exporter, Importer, ParsedDescription,
};
use crate::{FontError, Result};

pub struct AsmExporter<'a> {
    font: &'a PcScreenFont,
    format: AsmFormat,
}

impl<'a> AsmExporter<'a> {
    pub fn new(font: &'a PcScreenFont) -> Self {
        AsmExporter {
            font,
            format: AsmFormat::default(),
        }
    }

    pub fn with_format(font: &'a PcScreenFont, format: AsmFormat) -> Self {
        AsmExporter { font, format }
    }
}

impl Exporter for AsmExporter<'_> {
    type Data = String;

    fn font(&self) -> &PcScreenFont {
        self.font
    }

    fn build_header(&self) -> Result<String> {
        let mut out = String::from("font_header:\n");
        out.push_str(&ByteArray::from_bytes(self.font.header().magic_bytes()).to_asm("magic_bytes", &self.format)?);
        match self.font.header() {
            PsfHeader::V1(header) => {
                let mut mode = header.mode();
                if self.font.has_sequences() {
                    mode |= Psf1Mode::HAS_SEQ;
                }
                out.push_str(&format!("mode: db {:#x}\n", mode.bits()));
                out.push_str(&format!("charsize: db {:#x}\n", header.charsize()));
            }
            PsfHeader::V2(header) => {
                let fields: [(&str, u32); 7] = [
                    ("version", header.version()),
                    ("headersize", PSF2_HEADER_SIZE),
                    ("flags", header.flags().bits()),
                    ("length", header.length() as u32),
                    ("charsize", header.charsize()),
                    ("height", header.height()),
                    ("width", header.width()),
                ];
                for (label, value) in fields {
                    out.push_str(&format!("{label}: dd {value:#x}\n"));
                }
            }
        }
        out.push('\n');
        Ok(out)
    }

    fn build_bitmaps(&self) -> Result<String> {
        let mut out = String::from("font_bitmaps:\n");
        for (index, slot) in self.font.slots().enumerate() {
            let bytes = slot.bitmap().to_byte_array();
            out.push_str(&bytes.to_asm(&format!("glyph_{index}"), &self.format)?);
        }
        Ok(out)
    }

    fn build_unicode_table(&self) -> Result<String> {
        let v1 = matches!(self.font.header(), PsfHeader::V1(_));
        let mut out = String::from("unicode_table:\n");
        for (index, slot) in self.font.slots().enumerate() {
            let description = slot.description().cloned().unwrap_or_default();
            let bytes = ByteArray::from_bytes(&encode_description(v1, &description));
            out.push_str(&bytes.to_asm(&format!("Unicodedescription{index}"), &self.format)?);
        }
        Ok(out)
    }
}

pub struct AsmImporter {
    parser: AsmParser,
}

impl AsmImporter {
    fn label_int(&self, name: &str) -> Result<u64> {
        self.parser
            .get(name)
            .map(ByteArray::to_int)
            .ok_or_else(|| FontError::missing_label(name))
    }
}

impl Importer for AsmImporter {
    fn from_data(data: &[u8]) -> Result<Self> {
        let source = std::str::from_utf8(data)?;
        Ok(AsmImporter {
            parser: AsmParser::parse(source)?,
        })
    }

    fn header(&self) -> Result<PsfHeader> {
        let magic = self
            .parser
            .get("magic_bytes")
            .ok_or_else(|| FontError::missing_label("magic_bytes"))?
            .to_vec();
        if magic == PSF1_MAGIC {
            let mode = self.label_int("mode")? as u8;
            let charsize = self.label_int("charsize")? as u8;
            let mut header = PsfHeaderV1::new(charsize);
            header.set_mode(mode)?;
            Ok(header.into())
        } else if magic == PSF2_MAGIC {
            let version = self.label_int("version")? as u32;
            if version != 0 {
                warn!("nonzero PSF2 version {version}, reading as version 0");
            }
            let flags = self.label_int("flags")? as u32;
            let length = self.label_int("length")? as u32;
            let height = self.label_int("height")? as u32;
            let width = self.label_int("width")? as u32;
            // the headersize and charsize labels are redundant and ignored
            let mut header = PsfHeaderV2::new(width, height);
            header.set_flags(flags)?;
            header.set_length(length);
            Ok(header.into())
        } else {
            Err(FontError::UnknownMagicBytes)
        }
    }

    fn build_glyph(&self, font: &mut PcScreenFont, index: usize) -> Result<()> {
        let label = format!("glyph_{index}");
        let data = self.parser.get(&label).ok_or_else(|| FontError::missing_label(&label))?;
        if let Some(bitmap) = font.glyph_mut(index) {
            bitmap.set_data_from_bytes(data)?;
        }
        Ok(())
    }

    fn parse_unicode_descriptions(&self) -> Result<Vec<ParsedDescription>> {
        let v1 = self
            .parser
            .get("magic_bytes")
            .map(|magic| magic.to_vec() == PSF1_MAGIC)
            .unwrap_or(false);

        let mut descriptions = Vec::new();
        for (name, data) in self.parser.labels() {
            if name.starts_with("Placeholder") {
                descriptions.push(None);
            } else if name.starts_with("Unicodedescription") {
                let entries: Vec<DescriptionEntry> = if v1 {
                    let values: Vec<u16> = data.to_ints(2)?.into_iter().map(|v| v as u16).collect();
                    decode_v1_entries(&values)
                } else {
                    decode_v2_entries(&data.to_vec())?
                };
                descriptions.push(Some(entries));
            }
        }
        Ok(descriptions)
    }
}
