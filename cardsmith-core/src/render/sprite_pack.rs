//! Fixed-grid sprite atlas packing.
//!
//! Cell `(row, col)` holds image `row * cols + col`. The 12x9 grid of 70x95
//! cells is what the game client indexes into; changing it breaks the atlas
//! format.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::deck::DECK_SIZE;

/// Grid shape the game client indexes into; only the cell size may vary.
pub const ATLAS_COLS: u32 = 12;
pub const ATLAS_ROWS: u32 = 9;
const _: () = assert!((ATLAS_COLS * ATLAS_ROWS) as usize == DECK_SIZE);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self { Self { cols: ATLAS_COLS, rows: ATLAS_ROWS, cell_width: 70, cell_height: 95 } }
}

impl AtlasConfig {
    pub fn capacity(&self) -> usize { (self.cols * self.rows) as usize }
    pub fn width(&self) -> u32 { self.cols * self.cell_width }
    pub fn height(&self) -> u32 { self.rows * self.cell_height }
}

/// Pixel origin of the cell holding image `index`, if the grid has one.
pub fn cell_origin(index: usize, config: &AtlasConfig) -> Option<(u32, u32)> {
    if index >= config.capacity() || config.cols == 0 {
        return None;
    }
    let row = index as u32 / config.cols;
    let col = index as u32 % config.cols;
    Some((col * config.cell_width, row * config.cell_height))
}

/// Downscale each image into its cell and composite it over a transparent sheet.
///
/// Images past the grid capacity are dropped; cells without an image stay
/// fully transparent.
pub fn pack<'a, I>(images: I, config: &AtlasConfig) -> RgbaImage
where
    I: IntoIterator<Item = &'a RgbaImage>,
{
    let mut sheet = RgbaImage::new(config.width(), config.height());
    let mut placed = 0usize;
    let mut dropped = 0usize;
    for (index, image) in images.into_iter().enumerate() {
        let Some((x, y)) = cell_origin(index, config) else {
            dropped += 1;
            continue;
        };
        let scaled = if image.dimensions() == (config.cell_width, config.cell_height) {
            image.clone()
        } else {
            imageops::resize(image, config.cell_width, config.cell_height, FilterType::Lanczos3)
        };
        imageops::overlay(&mut sheet, &scaled, x as i64, y as i64);
        placed += 1;
    }
    if dropped > 0 {
        warn!(dropped, capacity = config.capacity(), "atlas full, extra images ignored");
    } else if placed < config.capacity() {
        warn!(placed, capacity = config.capacity(), "atlas partially filled");
    }
    debug!(placed, width = sheet.width(), height = sheet.height(), "packed atlas");
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(i: usize, w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([i as u8, 255 - i as u8, 7, 255]))
    }

    fn close(a: Rgba<u8>, b: Rgba<u8>) -> bool {
        a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
    }

    #[test]
    fn test_cell_origin_mapping() {
        let cfg = AtlasConfig::default();
        assert_eq!(cell_origin(0, &cfg), Some((0, 0)));
        assert_eq!(cell_origin(11, &cfg), Some((11 * 70, 0)));
        assert_eq!(cell_origin(12, &cfg), Some((0, 95)));
        assert_eq!(cell_origin(107, &cfg), Some((11 * 70, 8 * 95)));
        assert_eq!(cell_origin(108, &cfg), None);
    }

    #[test]
    fn test_default_sheet_dimensions() {
        let cfg = AtlasConfig::default();
        assert_eq!((cfg.width(), cfg.height()), (840, 855));
        assert_eq!(cfg.capacity(), 108);
    }

    #[test]
    fn test_pack_places_each_index_in_its_cell() {
        let cfg = AtlasConfig { cols: 12, rows: 9, cell_width: 6, cell_height: 8 };
        let images: Vec<_> = (0..108).map(|i| solid(i, 12, 16)).collect();
        let sheet = pack(&images, &cfg);
        assert_eq!(sheet.dimensions(), (72, 72));
        for i in 0..108 {
            let (x, y) = cell_origin(i, &cfg).unwrap();
            let px = *sheet.get_pixel(x + 3, y + 4);
            assert!(close(px, *images[i].get_pixel(0, 0)), "cell {i} got {px:?}");
        }
    }

    #[test]
    fn test_pack_ignores_overflow() {
        let cfg = AtlasConfig { cols: 2, rows: 2, cell_width: 4, cell_height: 4 };
        let images: Vec<_> = (0..7).map(|i| solid(i, 4, 4)).collect();
        let sheet = pack(&images, &cfg);
        assert_eq!(sheet.dimensions(), (8, 8));
        assert_eq!(*sheet.get_pixel(5, 5), *images[3].get_pixel(0, 0));
    }

    #[test]
    fn test_pack_leaves_missing_cells_transparent() {
        let cfg = AtlasConfig { cols: 12, rows: 9, cell_width: 3, cell_height: 3 };
        let images: Vec<_> = (0..100).map(|i| solid(i, 3, 3)).collect();
        let sheet = pack(&images, &cfg);
        for i in 100..108 {
            let (x, y) = cell_origin(i, &cfg).unwrap();
            for dy in 0..3 {
                for dx in 0..3 {
                    assert_eq!(sheet.get_pixel(x + dx, y + dy)[3], 0, "cell {i}");
                }
            }
        }
        assert_eq!(sheet.get_pixel(1, 1)[3], 255);
    }
}
