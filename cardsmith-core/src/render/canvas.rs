//! Pixel-level helpers shared by every drawing operation.

use image::{Rgba, RgbaImage};

use crate::style::Color;

pub type Canvas = RgbaImage;

pub fn new_canvas(width: u32, height: u32) -> Canvas { RgbaImage::new(width, height) }

/// Source-over blend of `color` into one pixel, weighted by `coverage` in [0, 1].
pub fn blend(canvas: &mut Canvas, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let sa = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    *dst = blend_over(*dst, color, sa);
}

fn blend_over(dst: Rgba<u8>, src: Color, sa: f32) -> Rgba<u8> {
    let da = dst[3] as f32 / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |s: u8, d: u8| ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa).round() as u8;
    Rgba([
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (oa * 255.0).round() as u8,
    ])
}

/// Color of row `y` in a `height`-row linear ramp from `top` to `bottom`.
///
/// `channel = top * (1 - y/H) + bottom * (y/H)`, truncated, fully opaque.
pub fn gradient_row(top: Color, bottom: Color, y: u32, height: u32) -> Color {
    let t = if height == 0 { 0.0 } else { y as f64 / height as f64 };
    let lerp = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t) as u8;
    Color::rgb(lerp(top.r, bottom.r), lerp(top.g, bottom.g), lerp(top.b, bottom.b))
}

/// Overwrite the whole canvas with a vertical gradient, one slice fill per row.
pub fn vertical_gradient(canvas: &mut Canvas, top: Color, bottom: Color) {
    let (width, height) = canvas.dimensions();
    if width == 0 {
        return;
    }
    let stride = width as usize * 4;
    for (y, row) in canvas.chunks_exact_mut(stride).enumerate() {
        let px = gradient_row(top, bottom, y as u32, height).to_array();
        bytemuck::cast_slice_mut::<u8, [u8; 4]>(row).fill(px);
    }
}

/// Composite `top` onto `canvas` at integer offset, honouring source alpha.
pub fn overlay(canvas: &mut Canvas, top: &Canvas, x: i64, y: i64) {
    image::imageops::overlay(canvas, top, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_rows_truncate() {
        let top = Color::rgb(0, 100, 255);
        let bottom = Color::rgb(255, 0, 0);
        assert_eq!(gradient_row(top, bottom, 0, 4), top);
        // t = 0.25: 63.75, 75.0, 191.25
        assert_eq!(gradient_row(top, bottom, 1, 4), Color::rgb(63, 75, 191));
        assert_eq!(gradient_row(top, bottom, 3, 4), Color::rgb(191, 25, 63));
    }

    #[test]
    fn test_vertical_gradient_fills_every_pixel() {
        let mut c = new_canvas(5, 10);
        vertical_gradient(&mut c, Color::rgb(10, 10, 10), Color::rgb(110, 110, 110));
        for y in 0..10 {
            let expect = gradient_row(Color::rgb(10, 10, 10), Color::rgb(110, 110, 110), y, 10);
            for x in 0..5 {
                assert_eq!(c.get_pixel(x, y).0, expect.to_array());
            }
        }
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let mut c = new_canvas(2, 2);
        blend(&mut c, 1, 1, Color::rgb(9, 8, 7), 1.0);
        assert_eq!(c.get_pixel(1, 1).0, [9, 8, 7, 255]);
        assert_eq!(c.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_blend_half_coverage_over_white() {
        let mut c = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        blend(&mut c, 0, 0, Color::rgb(0, 0, 0), 0.5);
        let px = c.get_pixel(0, 0);
        assert_eq!(px[3], 255);
        assert!((127..=128).contains(&px[0]));
    }

    #[test]
    fn test_blend_out_of_bounds_is_noop() {
        let mut c = new_canvas(2, 2);
        blend(&mut c, -1, 0, Color::rgb(1, 1, 1), 1.0);
        blend(&mut c, 2, 0, Color::rgb(1, 1, 1), 1.0);
        assert!(c.pixels().all(|p| p[3] == 0));
    }
}
