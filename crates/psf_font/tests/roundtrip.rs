//! Round trips between the binary, compressed and assembly
//! representations.

use pretty_assertions::assert_eq;
use psf_font::{
    AsmExporter, AsmImporter, Exporter, Importer, PcScreenFont, Psf2Flags, PsfExporter, PsfGzExporter, PsfGzImporter,
    PsfHeaderV2, PsfImporter, UnicodeSequence, UnicodeValue,
};

const GLYPH_A: [u8; 8] = [0x00, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00];

fn psf1_512_simple_binary() -> Vec<u8> {
    let mut data = vec![0x36, 0x04, 0x01, 0x08];
    data.extend_from_slice(&[0x00; 8 * 512]);
    let start = 4 + 0x41 * 8;
    data[start..start + 8].copy_from_slice(&GLYPH_A);
    data
}

#[test]
fn psf1_simple_binary_round_trip() {
    let data = psf1_512_simple_binary();
    let font = PsfImporter::import_from_data(&data).unwrap();

    assert_eq!(font.len(), 512);
    assert_eq!(font.glyph_size(), (8, 8));
    assert!(!font.has_unicode_table());
    assert_eq!(font.glyph(0x41).unwrap().to_byte_array().to_vec(), GLYPH_A.to_vec());
    // without a table the codepoint doubles as the index
    assert_eq!(font.glyph_for_unicode_value('A'), Some(0x41));

    assert_eq!(PsfExporter::new(&font).export_to_data().unwrap(), data);
}

#[test]
fn psf1_unicode_binary_round_trip() {
    let mut data = vec![0x36, 0x04, 0x02, 0x08];
    data.extend_from_slice(&GLYPH_A);
    data.extend_from_slice(&[0x00; 8 * 255]);
    data.extend_from_slice(&[0x41, 0x00, 0xFF, 0xFF]);
    data.extend_from_slice(&[0xFF; 255 * 2]);

    let font = PsfImporter::import_from_data(&data).unwrap();
    assert!(font.has_unicode_table());
    assert_eq!(font.unicode_description(0).unwrap().codepoints(), vec![0x41]);
    assert!(font.unicode_description(1).unwrap().is_empty());
    assert_eq!(font.glyph_for_unicode_value('A'), Some(0));

    assert_eq!(PsfExporter::new(&font).export_to_data().unwrap(), data);
}

fn psf2_font_with_sequences() -> PcScreenFont {
    let mut header = PsfHeaderV2::new(10, 8);
    header.set_flags(Psf2Flags::HAS_UNICODE_TABLE.bits()).unwrap();
    let mut font = PcScreenFont::new(header.into());

    font.add_glyph(None);
    for y in 1..7 {
        font.glyph_mut(0).unwrap().set_pixel(7, y, 1).unwrap();
    }
    let description = font.unicode_description_mut(0).unwrap();
    description.add_value(UnicodeValue::new('Å'));
    description.add_sequence(UnicodeSequence::from_codepoints(&[0x41, 0x30A]).unwrap());

    font.add_glyph(None);
    font.unicode_description_mut(1).unwrap().add_value(UnicodeValue::new('B'));

    font
}

#[test]
fn all_representations_agree() {
    let font = psf2_font_with_sequences();

    let asm = AsmExporter::new(&font).export_to_data().unwrap();
    let psf = PsfExporter::new(&font).export_to_data().unwrap();
    let gz = PsfGzExporter::new(&font).export_to_data().unwrap();

    assert_eq!(AsmImporter::import_from_data(asm.as_bytes()).unwrap(), font);
    assert_eq!(PsfImporter::import_from_data(&psf).unwrap(), font);
    assert_eq!(PsfGzImporter::import_from_data(&gz).unwrap(), font);
}

#[test]
fn psf2_sequence_encoding() {
    let font = psf2_font_with_sequences();
    let data = PsfExporter::new(&font).export_to_data().unwrap();

    // table follows 32 header bytes and two 16-byte bitmaps
    let table = &data[32 + 2 * 16..];
    let mut expected = Vec::new();
    expected.extend_from_slice("Å".as_bytes());
    expected.push(0xFE);
    expected.extend_from_slice("A\u{30A}".as_bytes());
    expected.push(0xFF);
    expected.extend_from_slice(b"B");
    expected.push(0xFF);
    assert_eq!(table, expected.as_slice());
}

#[test]
fn table_lookup_after_import() {
    let font = psf2_font_with_sequences();
    let data = PsfExporter::new(&font).export_to_data().unwrap();
    let imported = PsfImporter::import_from_data(&data).unwrap();

    assert_eq!(imported.glyph_for_unicode_value('Å'), Some(0));
    assert_eq!(imported.glyph_for_unicode_value('B'), Some(1));
    // sequences never satisfy a value lookup
    assert_eq!(imported.glyph_for_unicode_value('\u{30A}'), None);
}
