//! Codec for PC Screen Fonts, the bitmap console font format of the
//! Linux kbd tools.
//!
//! Both format versions are supported: PSF1 (fixed 8 pixel width, 256
//! or 512 glyphs) and PSF2 (arbitrary dimensions). A font can be read
//! from and written to three representations: the raw binary format, a
//! gzip-compressed binary, and nasm assembly source suitable for
//! including in a kernel build.
//!
//! ```no_run
//! use std::path::Path;
//! use psf_font::{AsmExporter, Exporter, Importer, PsfImporter};
//!
//! # fn main() -> psf_font::Result<()> {
//! let font = PsfImporter::import_from_file(Path::new("console.psf"))?;
//! AsmExporter::new(&font).export_to_file(Path::new("console.asm"))?;
//! # Ok(())
//! # }
//! ```

pub mod asm_parser;
pub mod byte_array;
pub mod error;
pub mod font;
pub mod formats;

pub use asm_parser::AsmParser;
pub use byte_array::{AsmFormat, Byte, ByteArray};
pub use error::{FontError, Result};
pub use font::{
    GlyphBitmap, GlyphSlot, PcScreenFont, Psf1Mode, Psf2Flags, PsfHeader, PsfHeaderV1, PsfHeaderV2, UnicodeDescription,
    UnicodeSequence, UnicodeValue,
};
pub use formats::{
    AsmExporter, AsmImporter, Exporter, FontFormat, Importer, PsfExporter, PsfGzExporter, PsfGzImporter, PsfImporter,
};
