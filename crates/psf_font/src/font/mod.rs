//! The in-memory font model.

pub mod glyph;
pub mod header;
pub mod unicode;

pub use glyph::GlyphBitmap;
pub use header::{PsfHeader, PsfHeaderV1, PsfHeaderV2, Psf1Mode, Psf2Flags};
pub use unicode::{UnicodeDescription, UnicodeSequence, UnicodeValue};

/// One glyph of a font: its bitmap and, when the font carries a
/// unicode table, its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSlot {
    bitmap: GlyphBitmap,
    description: Option<UnicodeDescription>,
}

impl GlyphSlot {
    fn new(width: usize, height: usize, with_description: bool) -> Self {
        GlyphSlot {
            bitmap: GlyphBitmap::new(width, height),
            description: with_description.then(UnicodeDescription::new),
        }
    }

    pub fn bitmap(&self) -> &GlyphBitmap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut GlyphBitmap {
        &mut self.bitmap
    }

    pub fn description(&self) -> Option<&UnicodeDescription> {
        self.description.as_ref()
    }

    pub fn description_mut(&mut self) -> Option<&mut UnicodeDescription> {
        self.description.as_mut()
    }
}

/// A PC Screen Font: a header and one slot per glyph.
///
/// `font.len() == font.header().length()` holds between any two public
/// calls; operations that change the glyph count update the header in
/// the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcScreenFont {
    header: PsfHeader,
    slots: Vec<GlyphSlot>,
}

impl PcScreenFont {
    /// Creates a font with `header.length()` empty glyphs. Slots get a
    /// description exactly when the header declares a unicode table.
    pub fn new(header: PsfHeader) -> Self {
        let (width, height) = header.glyph_size();
        let with_description = header.has_unicode_table();
        let slots = (0..header.length())
            .map(|_| GlyphSlot::new(width as usize, height as usize, with_description))
            .collect();
        PcScreenFont { header, slots }
    }

    pub fn header(&self) -> &PsfHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn glyph_size(&self) -> (u32, u32) {
        self.header.glyph_size()
    }

    pub fn has_unicode_table(&self) -> bool {
        self.header.has_unicode_table()
    }

    /// Whether any glyph carries a combining sequence.
    pub fn has_sequences(&self) -> bool {
        self.slots
            .iter()
            .filter_map(GlyphSlot::description)
            .any(UnicodeDescription::has_sequences)
    }

    pub fn slot(&self, index: usize) -> Option<&GlyphSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> impl Iterator<Item = &GlyphSlot> {
        self.slots.iter()
    }

    pub fn glyph(&self, index: usize) -> Option<&GlyphBitmap> {
        self.slots.get(index).map(GlyphSlot::bitmap)
    }

    pub fn glyph_mut(&mut self, index: usize) -> Option<&mut GlyphBitmap> {
        self.slots.get_mut(index).map(GlyphSlot::bitmap_mut)
    }

    pub fn unicode_description(&self, index: usize) -> Option<&UnicodeDescription> {
        self.slots.get(index).and_then(GlyphSlot::description)
    }

    pub fn unicode_description_mut(&mut self, index: usize) -> Option<&mut UnicodeDescription> {
        self.slots.get_mut(index).and_then(GlyphSlot::description_mut)
    }

    /// Inserts an empty glyph at `index` (or appends) and returns its
    /// index.
    ///
    /// A PSF1 font has a fixed glyph count; the call is a no-op there
    /// and returns `None`.
    pub fn add_glyph(&mut self, index: Option<usize>) -> Option<usize> {
        let PsfHeader::V2(ref mut header) = self.header else {
            return None;
        };
        let index = index.unwrap_or(self.slots.len()).min(self.slots.len());
        let (width, height) = (header.width() as usize, header.height() as usize);
        let with_description = header.has_unicode_table();
        self.slots.insert(index, GlyphSlot::new(width, height, with_description));
        header.set_length(self.slots.len() as u32);
        Some(index)
    }

    /// Removes the glyph at `index`. A no-op for PSF1 fonts and for
    /// out-of-range indices.
    pub fn remove_glyph(&mut self, index: usize) {
        let PsfHeader::V2(ref mut header) = self.header else {
            return;
        };
        if index >= self.slots.len() {
            return;
        }
        self.slots.remove(index);
        header.set_length(self.slots.len() as u32);
    }

    /// Moves the glyph at `old_index` to `new_index`, bitmap and
    /// description together. Out-of-range source indices are a no-op.
    pub fn move_glyph(&mut self, old_index: usize, new_index: usize) {
        if old_index >= self.slots.len() {
            return;
        }
        let slot = self.slots.remove(old_index);
        let new_index = new_index.min(self.slots.len());
        self.slots.insert(new_index, slot);
    }

    /// Finds the glyph rendering `value`.
    ///
    /// Without a unicode table the codepoint doubles as the glyph
    /// index. With one, the glyphs are scanned in index order over
    /// their single values; sequences never match.
    pub fn glyph_for_unicode_value(&self, value: char) -> Option<usize> {
        if !self.has_unicode_table() {
            let index = value as usize;
            return (index < self.slots.len()).then_some(index);
        }
        self.slots.iter().position(|slot| {
            slot.description()
                .is_some_and(|desc| desc.values().contains(&UnicodeValue::new(value)))
        })
    }

    pub fn has_glyph_for_unicode_value(&self, value: char) -> bool {
        self.glyph_for_unicode_value(value).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v2_font(with_table: bool) -> PcScreenFont {
        let mut header = PsfHeaderV2::new(8, 8);
        if with_table {
            header.set_flags(Psf2Flags::HAS_UNICODE_TABLE.bits()).unwrap();
        }
        PcScreenFont::new(header.into())
    }

    #[test]
    fn psf1_glyph_count_is_fixed() {
        let mut header = PsfHeaderV1::new(8);
        header.set_mode(Psf1Mode::MODE_512.bits()).unwrap();
        let mut font = PcScreenFont::new(header.into());
        assert_eq!(font.len(), 512);

        assert_eq!(font.add_glyph(None), None);
        font.remove_glyph(0);
        assert_eq!(font.len(), 512);
        assert_eq!(font.header().length(), 512);
    }

    #[test]
    fn psf2_add_then_remove_restores_font() {
        let mut font = v2_font(false);
        assert_eq!(font.len(), 0);

        assert_eq!(font.add_glyph(None), Some(0));
        assert_eq!(font.add_glyph(None), Some(1));
        assert_eq!(font.header().length(), 2);

        let index = font.add_glyph(Some(1)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(font.len(), 3);

        font.remove_glyph(1);
        assert_eq!(font.len(), 2);
        assert_eq!(font.header().length(), 2);

        // out of range is silently ignored
        font.remove_glyph(99);
        assert_eq!(font.len(), 2);
    }

    #[test]
    fn psf2_insert_then_remove_restores_glyph_sequence() {
        let mut font = v2_font(true);
        for i in 0..3 {
            let index = font.add_glyph(None).unwrap();
            font.glyph_mut(index).unwrap().set_pixel(i, 0, 1).unwrap();
            font.unicode_description_mut(index)
                .unwrap()
                .add_value(char::from(b'a' + i as u8).into());
        }
        let original = font.clone();

        let index = font.add_glyph(Some(1)).unwrap();
        assert_eq!(index, 1);
        font.glyph_mut(1).unwrap().set_pixel(7, 7, 1).unwrap();
        font.unicode_description_mut(1).unwrap().add_value('z'.into());
        assert_ne!(font, original);
        // the populated slots moved up by one
        assert_eq!(font.unicode_description(2).unwrap().codepoints(), vec![b'b' as u32]);

        font.remove_glyph(1);
        assert_eq!(font, original);
    }

    #[test]
    fn slots_follow_table_flag() {
        let mut font = v2_font(true);
        font.add_glyph(None);
        assert!(font.unicode_description(0).is_some());

        let mut font = v2_font(false);
        font.add_glyph(None);
        assert!(font.unicode_description(0).is_none());
    }

    #[test]
    fn move_glyph_carries_description() {
        let mut font = v2_font(true);
        font.add_glyph(None);
        font.add_glyph(None);
        font.unicode_description_mut(0).unwrap().add_value('A'.into());
        font.glyph_mut(0).unwrap().set_pixel(0, 0, 1).unwrap();

        font.move_glyph(0, 1);
        assert_eq!(font.unicode_description(1).unwrap().codepoints(), vec![0x41]);
        assert_eq!(font.glyph(1).unwrap().pixel(0, 0), Some(1));
        assert!(font.unicode_description(0).unwrap().is_empty());
    }

    #[test]
    fn lookup_without_table_uses_index() {
        let header = PsfHeaderV1::new(8);
        let font = PcScreenFont::new(header.into());
        assert_eq!(font.glyph_for_unicode_value('A'), Some(0x41));
        assert_eq!(font.glyph_for_unicode_value('\u{1234}'), None);
    }

    #[test]
    fn lookup_with_table_scans_values_only() {
        let mut font = v2_font(true);
        font.add_glyph(None);
        font.add_glyph(None);
        font.unicode_description_mut(1).unwrap().add_value('A'.into());
        font.unicode_description_mut(0)
            .unwrap()
            .add_sequence(UnicodeSequence::from_codepoints(&[0x42, 0x30A]).unwrap());

        assert_eq!(font.glyph_for_unicode_value('A'), Some(1));
        // sequences never satisfy a value lookup
        assert_eq!(font.glyph_for_unicode_value('B'), None);
        assert!(!font.has_glyph_for_unicode_value('B'));
    }
}
