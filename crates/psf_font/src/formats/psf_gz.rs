//! The gzip-compressed binary representation. Thin wrappers around the
//! raw PSF codec.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::font::PcScreenFont;
use crate::formats::{Exporter, Importer, PsfExporter, PsfImporter};
use crate::Result;

pub struct PsfGzExporter<'a> {
    font: &'a PcScreenFont,
}

impl<'a> PsfGzExporter<'a> {
    pub fn new(font: &'a PcScreenFont) -> Self {
        PsfGzExporter { font }
    }

    pub fn export_to_data(&self) -> Result<Vec<u8>> {
        let raw = PsfExporter::new(self.font).export_to_data()?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw)?;
        Ok(encoder.finish()?)
    }

    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let data = self.export_to_data()?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub struct PsfGzImporter;

impl PsfGzImporter {
    pub fn import_from_data(data: &[u8]) -> Result<PcScreenFont> {
        let mut decoder = GzDecoder::new(data);
        let mut raw = Vec::new();
        decoder.read_to_end(&mut raw)?;
        PsfImporter::import_from_data(&raw)
    }

    pub fn import_from_file(path: &Path) -> Result<PcScreenFont> {
        let data = fs::read(path)?;
        Self::import_from_data(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::header::{Psf2Flags, PsfHeaderV2};
    use crate::font::unicode::UnicodeValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn gzip_round_trip() {
        let mut header = PsfHeaderV2::new(8, 8);
        header.set_flags(Psf2Flags::HAS_UNICODE_TABLE.bits()).unwrap();
        let mut font = PcScreenFont::new(header.into());
        font.add_glyph(None);
        font.glyph_mut(0).unwrap().set_pixel(3, 3, 1).unwrap();
        font.unicode_description_mut(0).unwrap().add_value(UnicodeValue::new('A'));

        let compressed = PsfGzExporter::new(&font).export_to_data().unwrap();
        // a gzip stream starts with the two ID bytes
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let imported = PsfGzImporter::import_from_data(&compressed).unwrap();
        assert_eq!(imported, font);
    }

    #[test]
    fn compressed_and_raw_agree() {
        let header = PsfHeaderV2::new(8, 8);
        let mut font = PcScreenFont::new(header.into());
        font.add_glyph(None);

        let raw = PsfExporter::new(&font).export_to_data().unwrap();
        let compressed = PsfGzExporter::new(&font).export_to_data().unwrap();
        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, raw);
    }
}
