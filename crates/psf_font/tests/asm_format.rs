//! Golden tests for the assembly representation.

use pretty_assertions::assert_eq;
use psf_font::{AsmExporter, AsmImporter, Exporter, Importer, PsfImporter};

const GLYPH_A: [u8; 8] = [0x00, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00];

/// PSF1, 512 glyphs, no unicode table, the glyph for 'A' at its
/// codepoint index.
fn psf1_512_simple_binary() -> Vec<u8> {
    let mut data = vec![0x36, 0x04, 0x01, 0x08];
    data.extend_from_slice(&[0x00; 8 * 512]);
    let start = 4 + 0x41 * 8;
    data[start..start + 8].copy_from_slice(&GLYPH_A);
    data
}

fn psf1_512_simple_asm() -> String {
    let mut text = String::from(
        "font_header:\n\
         magic_bytes: db 0x36, 0x04\n\
         mode: db 0x1\n\
         charsize: db 0x8\n\
         \n\
         font_bitmaps:\n",
    );
    for i in 0..512 {
        if i == 0x41 {
            text.push_str(&format!(
                "glyph_{i}: db 0x00, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00\n"
            ));
        } else {
            text.push_str(&format!(
                "glyph_{i}: db 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00\n"
            ));
        }
    }
    text
}

#[test]
fn psf1_asm_export_matches_golden() {
    let font = PsfImporter::import_from_data(&psf1_512_simple_binary()).unwrap();
    let text = AsmExporter::new(&font).export_to_data().unwrap();
    assert_eq!(text, psf1_512_simple_asm());
}

#[test]
fn psf1_asm_import_matches_binary_import() {
    let from_binary = PsfImporter::import_from_data(&psf1_512_simple_binary()).unwrap();
    let from_asm = AsmImporter::import_from_data(psf1_512_simple_asm().as_bytes()).unwrap();
    assert_eq!(from_asm, from_binary);
}

#[test]
fn psf1_unicode_asm_golden() {
    let mut data = vec![0x36, 0x04, 0x02, 0x08];
    data.extend_from_slice(&GLYPH_A);
    data.extend_from_slice(&[0x00; 8 * 255]);
    data.extend_from_slice(&[0x41, 0x00, 0xFF, 0xFF]);
    data.extend_from_slice(&[0xFF; 255 * 2]);

    let font = PsfImporter::import_from_data(&data).unwrap();
    let text = AsmExporter::new(&font).export_to_data().unwrap();

    assert!(text.contains("mode: db 0x2\n"));
    assert!(text.contains("unicode_table:\nUnicodedescription0: db 0x41, 0x00, 0xff, 0xff\n"));
    assert!(text.ends_with("Unicodedescription255: db 0xff, 0xff\n"));

    let reimported = AsmImporter::import_from_data(text.as_bytes()).unwrap();
    assert_eq!(reimported, font);
}
