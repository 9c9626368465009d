//! Import and export of the supported font representations.

pub mod asm;
pub mod psf;
pub mod psf_gz;

pub use asm::{AsmExporter, AsmImporter};
pub use psf::{PsfExporter, PsfImporter};
pub use psf_gz::{PsfGzExporter, PsfGzImporter};

use std::fs;
use std::path::Path;

use log::debug;

use crate::font::unicode::{UnicodeDescription, UnicodeSequence, UnicodeValue};
use crate::font::PcScreenFont;
use crate::{FontError, Result};

/// Output buffer of an exporter, either text or raw bytes.
pub trait ExportData: Default {
    fn append(&mut self, other: Self);
    fn as_bytes(&self) -> &[u8];
}

impl ExportData for String {
    fn append(&mut self, other: Self) {
        self.push_str(&other);
    }

    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl ExportData for Vec<u8> {
    fn append(&mut self, mut other: Self) {
        self.extend(other.drain(..));
    }

    fn as_bytes(&self) -> &[u8] {
        self
    }
}

/// Writes a font as header, bitmaps and (when the header declares one)
/// unicode table.
pub trait Exporter {
    type Data: ExportData;

    fn font(&self) -> &PcScreenFont;

    fn build_header(&self) -> Result<Self::Data>;
    fn build_bitmaps(&self) -> Result<Self::Data>;
    fn build_unicode_table(&self) -> Result<Self::Data>;

    fn export_to_data(&self) -> Result<Self::Data> {
        let mut data = self.build_header()?;
        data.append(self.build_bitmaps()?);
        if self.font().has_unicode_table() {
            data.append(self.build_unicode_table()?);
        }
        Ok(data)
    }

    /// Assembles the complete artifact in memory, then writes it with a
    /// single call; a failed export leaves no partial file behind.
    fn export_to_file(&self, path: &Path) -> Result<()> {
        let data = self.export_to_data()?;
        fs::write(path, data.as_bytes())?;
        Ok(())
    }
}

/// One entry of a glyph's parsed unicode description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionEntry {
    Value(u32),
    Sequence(Vec<u32>),
}

/// Parsed unicode description of one glyph; `None` stands for a glyph
/// the source marks as having no description.
pub type ParsedDescription = Option<Vec<DescriptionEntry>>;

/// Reads a font as header, bitmaps and (when the header declares one)
/// unicode table.
pub trait Importer: Sized {
    fn from_data(data: &[u8]) -> Result<Self>;

    fn header(&self) -> Result<crate::font::PsfHeader>;
    fn build_glyph(&self, font: &mut PcScreenFont, index: usize) -> Result<()>;
    fn parse_unicode_descriptions(&self) -> Result<Vec<ParsedDescription>>;

    fn import_from_data(data: &[u8]) -> Result<PcScreenFont> {
        let importer = Self::from_data(data)?;
        let header = importer.header()?;
        let mut font = PcScreenFont::new(header);
        for index in 0..font.len() {
            importer.build_glyph(&mut font, index)?;
        }
        if font.has_unicode_table() {
            let descriptions = importer.parse_unicode_descriptions()?;
            if descriptions.len() != font.len() {
                return Err(FontError::UnicodeDescriptionCountMismatch {
                    expected: font.len(),
                    actual: descriptions.len(),
                });
            }
            for (index, entries) in descriptions.into_iter().enumerate() {
                let Some(entries) = entries else {
                    continue;
                };
                let description = font
                    .unicode_description_mut(index)
                    .ok_or_else(|| FontError::malformed_table("description slot missing"))?;
                for entry in entries {
                    match entry {
                        DescriptionEntry::Value(cp) => {
                            description.add_value(UnicodeValue::from_u32(cp)?);
                        }
                        DescriptionEntry::Sequence(cps) => {
                            description.add_sequence(UnicodeSequence::from_codepoints(&cps)?);
                        }
                    }
                }
            }
        }
        debug!(
            "imported font: {} glyphs, {}x{}, unicode table: {}",
            font.len(),
            font.glyph_size().0,
            font.glyph_size().1,
            font.has_unicode_table()
        );
        Ok(font)
    }

    fn import_from_file(path: &Path) -> Result<PcScreenFont> {
        let data = fs::read(path)?;
        Self::import_from_data(&data)
    }
}

/// Encodes one glyph's unicode description as table bytes, including
/// the trailing separator. PSF1 writes 2-byte little-endian values,
/// PSF2 a UTF-8 stream.
pub(crate) fn encode_description(v1: bool, description: &UnicodeDescription) -> Vec<u8> {
    use crate::font::header::{PSF1_SEPARATOR, PSF1_START_SEQ, PSF2_SEPARATOR, PSF2_START_SEQ};

    let mut out = Vec::new();
    if v1 {
        for value in description.values() {
            out.extend_from_slice(&(value.codepoint() as u16).to_le_bytes());
        }
        for sequence in description.sequences() {
            out.extend_from_slice(&PSF1_START_SEQ.to_le_bytes());
            for value in sequence.values() {
                out.extend_from_slice(&(value.codepoint() as u16).to_le_bytes());
            }
        }
        out.extend_from_slice(&PSF1_SEPARATOR.to_le_bytes());
    } else {
        let mut buf = [0u8; 4];
        for value in description.values() {
            out.extend_from_slice(value.char().encode_utf8(&mut buf).as_bytes());
        }
        for sequence in description.sequences() {
            out.push(PSF2_START_SEQ);
            for value in sequence.values() {
                out.extend_from_slice(value.char().encode_utf8(&mut buf).as_bytes());
            }
        }
        out.push(PSF2_SEPARATOR);
    }
    out
}

/// Decodes one PSF1 description from a u16 stream. Parsing stops at a
/// separator; a stream without one simply ends.
pub(crate) fn decode_v1_entries(values: &[u16]) -> Vec<DescriptionEntry> {
    use crate::font::header::{PSF1_SEPARATOR, PSF1_START_SEQ};

    let mut entries = Vec::new();
    let mut current_sequence: Option<Vec<u32>> = None;
    for &value in values {
        match value {
            PSF1_SEPARATOR => break,
            PSF1_START_SEQ => {
                if let Some(sequence) = current_sequence.take() {
                    entries.push(DescriptionEntry::Sequence(sequence));
                }
                current_sequence = Some(Vec::new());
            }
            cp => match current_sequence.as_mut() {
                Some(sequence) => sequence.push(cp as u32),
                None => entries.push(DescriptionEntry::Value(cp as u32)),
            },
        }
    }
    if let Some(sequence) = current_sequence {
        entries.push(DescriptionEntry::Sequence(sequence));
    }
    entries
}

/// Decodes one PSF2 description from a UTF-8 stream with start-seq and
/// separator marker bytes.
pub(crate) fn decode_v2_entries(bytes: &[u8]) -> Result<Vec<DescriptionEntry>> {
    use crate::font::header::{PSF2_SEPARATOR, PSF2_START_SEQ};

    fn push_run(run: &[u8], in_sequence: bool, entries: &mut Vec<DescriptionEntry>) -> Result<()> {
        if run.is_empty() && !in_sequence {
            return Ok(());
        }
        let text = std::str::from_utf8(run)?;
        if in_sequence {
            entries.push(DescriptionEntry::Sequence(text.chars().map(|c| c as u32).collect()));
        } else {
            for c in text.chars() {
                entries.push(DescriptionEntry::Value(c as u32));
            }
        }
        Ok(())
    }

    let mut entries = Vec::new();
    let mut run_start = 0;
    let mut in_sequence = false;
    for (i, &byte) in bytes.iter().enumerate() {
        if byte == PSF2_SEPARATOR || byte == PSF2_START_SEQ {
            push_run(&bytes[run_start..i], in_sequence, &mut entries)?;
            if byte == PSF2_SEPARATOR {
                return Ok(entries);
            }
            in_sequence = true;
            run_start = i + 1;
        }
    }
    push_run(&bytes[run_start..], in_sequence, &mut entries)?;
    Ok(entries)
}

/// The known on-disk representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// nasm assembly source
    Asm,
    /// raw PSF binary
    Psf,
    /// gzip-compressed PSF binary
    PsfGz,
}

impl FontFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FontFormat::Asm => "asm",
            FontFormat::Psf => "psf",
            FontFormat::PsfGz => "psf.gz",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FontFormat::Asm => "Assembly",
            FontFormat::Psf => "PSF",
            FontFormat::PsfGz => "PSF (gzip)",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "asm" => Some(FontFormat::Asm),
            "psf" => Some(FontFormat::Psf),
            "gz" => Some(FontFormat::PsfGz),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Imports a file of this format.
    pub fn import(&self, path: &Path) -> Result<PcScreenFont> {
        match self {
            FontFormat::Asm => AsmImporter::import_from_file(path),
            FontFormat::Psf => PsfImporter::import_from_file(path),
            FontFormat::PsfGz => PsfGzImporter::import_from_file(path),
        }
    }

    /// Exports a font to a file of this format.
    pub fn export(&self, font: &PcScreenFont, path: &Path) -> Result<()> {
        match self {
            FontFormat::Asm => AsmExporter::new(font).export_to_file(path),
            FontFormat::Psf => PsfExporter::new(font).export_to_file(path),
            FontFormat::PsfGz => PsfGzExporter::new(font).export_to_file(path),
        }
    }
}

impl std::fmt::Display for FontFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_path() {
        assert_eq!(FontFormat::from_path(&PathBuf::from("font.asm")), Some(FontFormat::Asm));
        assert_eq!(FontFormat::from_path(&PathBuf::from("font.PSF")), Some(FontFormat::Psf));
        assert_eq!(FontFormat::from_path(&PathBuf::from("font.psf.gz")), Some(FontFormat::PsfGz));
        assert_eq!(FontFormat::from_path(&PathBuf::from("font.txt")), None);
        assert_eq!(FontFormat::from_path(&PathBuf::from("font")), None);
    }

    #[test]
    fn format_extensions() {
        assert_eq!(FontFormat::Asm.extension(), "asm");
        assert_eq!(FontFormat::Psf.extension(), "psf");
        assert_eq!(FontFormat::PsfGz.extension(), "psf.gz");
    }
}
