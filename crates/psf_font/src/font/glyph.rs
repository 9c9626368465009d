//! Glyph bitmaps.

use crate::byte_array::ByteArray;
use crate::{FontError, Result};

/// A fixed-size grid of 0/1 pixels.
///
/// The packed representation stores each row most significant bit
/// first, padded to a whole number of bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    rows: Vec<Vec<u8>>,
}

impl GlyphBitmap {
    pub fn new(width: usize, height: usize) -> Self {
        GlyphBitmap {
            width,
            height,
            rows: vec![vec![0; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Replaces the whole grid. The new data must have exactly the
    /// bitmap's dimensions.
    pub fn set_data(&mut self, rows: &[Vec<u8>]) -> Result<()> {
        let actual_height = rows.len();
        let actual_width = rows.first().map_or(0, |row| row.len());
        if actual_height != self.height || rows.iter().any(|row| row.len() != self.width) {
            return Err(FontError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width,
                actual_height,
            });
        }
        self.rows = rows.to_vec();
        Ok(())
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.rows.get(y)?.get(x).copied()
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        if value > 1 {
            return Err(FontError::InvalidBitValue { value });
        }
        if x >= self.width || y >= self.height {
            return Err(FontError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: x + 1,
                actual_height: y + 1,
            });
        }
        self.rows[y][x] = value;
        Ok(())
    }

    /// Number of bits one packed row occupies, including padding.
    fn bits_per_line(&self) -> usize {
        self.width.div_ceil(8) * 8
    }

    /// Unpacks row-padded bitmap bytes into the grid.
    pub fn set_data_from_bytes(&mut self, data: &ByteArray) -> Result<()> {
        let bits_per_line = self.bits_per_line();
        let expected = self.height * bits_per_line / 8;
        if data.len() < expected {
            return Err(FontError::TruncatedData {
                expected,
                actual: data.len(),
            });
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let bit_index = y * bits_per_line + x;
                self.rows[y][x] = data[bit_index / 8].bit(bit_index % 8)?;
            }
        }
        Ok(())
    }

    /// Packs the grid into row-padded bitmap bytes.
    pub fn to_byte_array(&self) -> ByteArray {
        let bits_per_line = self.bits_per_line();
        let mut bits = Vec::with_capacity(self.height * bits_per_line);
        for row in &self.rows {
            bits.extend_from_slice(row);
            bits.resize(bits.len() + bits_per_line - self.width, 0);
        }
        // the row padding keeps the bit count a multiple of 8
        ByteArray::from_bit_array(&bits).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn packs_rows_msb_first() {
        let mut bitmap = GlyphBitmap::new(8, 2);
        bitmap.set_pixel(0, 0, 1).unwrap();
        bitmap.set_pixel(7, 1, 1).unwrap();
        assert_eq!(bitmap.to_byte_array().to_vec(), vec![0x80, 0x01]);
    }

    #[test]
    fn pads_narrow_and_wide_rows() {
        let mut bitmap = GlyphBitmap::new(10, 1);
        bitmap.set_pixel(9, 0, 1).unwrap();
        assert_eq!(bitmap.to_byte_array().to_vec(), vec![0x00, 0x40]);

        let mut bitmap = GlyphBitmap::new(4, 1);
        bitmap.set_pixel(0, 0, 1).unwrap();
        assert_eq!(bitmap.to_byte_array().to_vec(), vec![0x80]);
    }

    #[test]
    fn byte_round_trip() {
        let data = ByteArray::from_bytes(&[0x00, 0x38, 0x44, 0x44, 0x44, 0x44, 0x38, 0x00]);
        let mut bitmap = GlyphBitmap::new(8, 8);
        bitmap.set_data_from_bytes(&data).unwrap();
        assert_eq!(bitmap.pixel(2, 1), Some(1));
        assert_eq!(bitmap.pixel(0, 0), Some(0));
        assert_eq!(bitmap.to_byte_array(), data);
    }

    #[test]
    fn truncated_input_is_rejected() {
        let mut bitmap = GlyphBitmap::new(8, 8);
        let err = bitmap.set_data_from_bytes(&ByteArray::from_bytes(&[0x00; 4]));
        assert!(matches!(
            err,
            Err(FontError::TruncatedData { expected: 8, actual: 4 })
        ));
    }

    #[test]
    fn set_data_checks_dimensions() {
        let mut bitmap = GlyphBitmap::new(2, 2);
        bitmap.set_data(&[vec![1, 0], vec![0, 1]]).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some(1));
        assert!(bitmap.set_data(&[vec![1, 0]]).is_err());
        assert!(bitmap.set_data(&[vec![1], vec![0]]).is_err());
    }
}
