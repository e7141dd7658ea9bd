//! Palette derivation.
//!
//! A [`Palette`] is the set of distinct pixels present in a grid, in the
//! order they are first met while walking the scanlines. It is always built
//! from the current grid contents and never stored on the grid.

use std::collections::HashMap;

use crate::grid::PixelGrid;
use crate::pixel::Pixel;

/// Largest palette an indexed image can reference.
pub const MAX_INDEXED_COLORS: usize = 256;

/// Distinct colors of a grid in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Pixel>,
    index: HashMap<u32, usize>,
}

impl Palette {
    /// Collect the distinct pixels of `grid`.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        let mut palette = Palette::default();
        for &packed in grid.packed_pixels() {
            palette.insert(packed);
        }
        palette
    }

    /// Collect the distinct values of an arbitrary pixel sequence.
    pub fn from_pixels<I: IntoIterator<Item = Pixel>>(pixels: I) -> Self {
        let mut palette = Palette::default();
        for pixel in pixels {
            palette.insert(pixel.to_packed());
        }
        palette
    }

    fn insert(&mut self, packed: u32) {
        if let std::collections::hash_map::Entry::Vacant(slot) = self.index.entry(packed) {
            slot.insert(self.entries.len());
            self.entries.push(Pixel::from_packed(packed));
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, pixel: Pixel) -> bool {
        self.index.contains_key(&pixel.to_packed())
    }

    /// Position of `pixel` in the palette.
    pub fn index_of(&self, pixel: Pixel) -> Option<usize> {
        self.index.get(&pixel.to_packed()).copied()
    }

    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.entries.get(index).copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Pixel> + '_ {
        self.entries.iter().copied()
    }

    /// True when no entry carries transparency.
    pub fn is_opaque(&self) -> bool {
        self.entries.iter().all(|p| p.is_opaque())
    }

    /// True when the palette fits an indexed image.
    pub fn can_encode_indexed(&self) -> bool {
        self.len() <= MAX_INDEXED_COLORS
    }

    /// Smallest indexed bit depth (1, 2, 4 or 8) able to address every entry.
    ///
    /// Returns `None` when the palette is too large for indexed encoding.
    pub fn bit_depth(&self) -> Option<u8> {
        match self.len() {
            0..=2 => Some(1),
            3..=4 => Some(2),
            5..=16 => Some(4),
            17..=MAX_INDEXED_COLORS => Some(8),
            _ => None,
        }
    }

    /// RGB triples for every entry, in palette order.
    pub fn to_palette_table(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|p| p.to_rgb_bytes()).collect()
    }

    /// Alpha values up to and including the last non-opaque entry.
    ///
    /// Empty when every entry is opaque.
    pub fn to_transparency_table(&self) -> Vec<u8> {
        let used = self
            .entries
            .iter()
            .rposition(|p| !p.is_opaque())
            .map_or(0, |last| last + 1);
        self.entries[..used].iter().map(|p| p.a).collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Pixel = Pixel::rgb(255, 0, 0);
    const GREEN: Pixel = Pixel::rgb(0, 255, 0);
    const BLUE: Pixel = Pixel::rgb(0, 0, 255);

    fn grid_of(pixels: Vec<Pixel>) -> PixelGrid {
        let width = pixels.len() as u32;
        PixelGrid::new(width, 1, pixels).unwrap()
    }

    #[test]
    fn test_empty_grid() {
        let grid = PixelGrid::new(0, 0, RED).unwrap();
        let palette = grid.palette();
        assert!(palette.is_empty());
        assert!(palette.is_opaque());
        assert_eq!(palette.bit_depth(), Some(1));
    }

    #[test]
    fn test_first_occurrence_order() {
        let palette = grid_of(vec![GREEN, RED, GREEN, BLUE, RED]).palette();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.iter().collect::<Vec<_>>(), vec![GREEN, RED, BLUE]);
        assert_eq!(palette.index_of(RED), Some(1));
        assert_eq!(palette.get(2), Some(BLUE));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_from_pixels_matches_from_grid() {
        let pixels = vec![BLUE, BLUE, RED, GREEN, RED];
        let from_grid = grid_of(pixels.clone()).palette();
        assert_eq!(Palette::from_pixels(pixels), from_grid);
    }

    #[test]
    fn test_contains() {
        let palette = grid_of(vec![RED, GREEN]).palette();
        assert!(palette.contains(RED));
        assert!(!palette.contains(BLUE));
        assert_eq!(palette.index_of(BLUE), None);
    }

    #[test]
    fn test_alpha_makes_distinct_entries() {
        let palette = grid_of(vec![RED, Pixel::rgba(255, 0, 0, 128)]).palette();
        assert_eq!(palette.len(), 2);
        assert!(!palette.is_opaque());
    }

    #[test]
    fn test_bit_depth() {
        let depth_for = |count: u32| {
            let pixels = (0..count).map(|i| Pixel::from_packed((i << 8) | 0xFF)).collect();
            grid_of(pixels).palette().bit_depth()
        };
        assert_eq!(depth_for(1), Some(1));
        assert_eq!(depth_for(2), Some(1));
        assert_eq!(depth_for(3), Some(2));
        assert_eq!(depth_for(4), Some(2));
        assert_eq!(depth_for(5), Some(4));
        assert_eq!(depth_for(16), Some(4));
        assert_eq!(depth_for(17), Some(8));
        assert_eq!(depth_for(256), Some(8));
        assert_eq!(depth_for(257), None);
    }

    #[test]
    fn test_can_encode_indexed() {
        let pixels: Vec<Pixel> = (0..257u32).map(|i| Pixel::from_packed((i << 8) | 0xFF)).collect();
        let palette = grid_of(pixels[..256].to_vec()).palette();
        assert!(palette.can_encode_indexed());
        let palette = grid_of(pixels).palette();
        assert!(!palette.can_encode_indexed());
    }

    #[test]
    fn test_palette_table() {
        let palette = grid_of(vec![RED, Pixel::rgba(1, 2, 3, 4)]).palette();
        assert_eq!(palette.to_palette_table(), vec![255, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_transparency_table_trimmed() {
        let palette = grid_of(vec![
            Pixel::rgba(0, 0, 0, 0),
            RED,
            Pixel::rgba(1, 1, 1, 100),
            GREEN,
            BLUE,
        ])
        .palette();
        assert_eq!(palette.to_transparency_table(), vec![0, 255, 100]);
    }

    #[test]
    fn test_transparency_table_opaque() {
        let palette = grid_of(vec![RED, GREEN]).palette();
        assert!(palette.to_transparency_table().is_empty());
    }

    #[test]
    fn test_into_iterator() {
        let palette = grid_of(vec![RED, GREEN]).palette();
        let mut seen = Vec::new();
        for pixel in &palette {
            seen.push(*pixel);
        }
        assert_eq!(seen, vec![RED, GREEN]);
    }
}
