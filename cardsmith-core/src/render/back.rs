//! Shared card back.

use glam::Vec2;

use super::canvas::{new_canvas, vertical_gradient};
use super::card::{CardImage, CardRenderer};
use super::glyph::{centered_glyph, FontWeight, TextStyle};
use super::primitives::{diamond_points, ellipse_outline, polygon, rounded_rect, Paint, Rect, Stroke};

const FRAME_INSET: f32 = 8.0;
const RING_COUNT: u8 = 5;
const DIAMOND_ROWS: i32 = 4;
const DIAMOND_COLS: i32 = 3;
const DIAMOND_DX: f32 = 34.0;
const DIAMOND_DY: f32 = 28.0;
const DIAMOND_SIZE: f32 = 14.0;
const PLAQUE: Vec2 = Vec2::new(110.0, 54.0);

/// Render the back at the card working size. Deterministic: same style, same bytes.
pub fn render_back(renderer: &CardRenderer) -> CardImage {
    let style = renderer.style();
    let palette = &style.palette;
    let s = renderer.scale();
    let (w, h) = renderer.dimensions();
    let center = Vec2::new(w as f32 / 2.0, h as f32 / 2.0);

    let mut canvas = new_canvas(w, h);
    vertical_gradient(&mut canvas, palette.back_primary, palette.back_secondary);

    let frame = Rect::from_size(w, h).inset(FRAME_INSET * s);
    let radius = (style.card.corner_radius - FRAME_INSET).max(4.0) * s;
    rounded_rect(&mut canvas, frame, radius, None, Some(Stroke::new(palette.back_accent, 4.0 * s)));

    // Concentric rings fading outward.
    for i in 0..RING_COUNT {
        let r = (28.0 + 17.0 * i as f32) * s;
        let ring = palette.back_accent.with_alpha(100 - 15 * i);
        ellipse_outline(&mut canvas, center, Vec2::splat(r), Stroke::new(ring, (2.0 * s).max(1.0)));
    }

    let edge = Stroke::new(palette.back_accent, s.max(1.0));
    for row in -DIAMOND_ROWS..=DIAMOND_ROWS {
        for col in -DIAMOND_COLS..=DIAMOND_COLS {
            if (row + col).rem_euclid(2) != 0 {
                continue;
            }
            let at = center + Vec2::new(col as f32 * DIAMOND_DX, row as f32 * DIAMOND_DY) * s;
            polygon(&mut canvas, &diamond_points(at, DIAMOND_SIZE * s), Some(palette.back_pattern), Some(edge));
        }
    }

    let plaque = Rect::centered(center, PLAQUE * s);
    let fill = Paint::Solid(palette.back_accent.with_alpha(180));
    rounded_rect(&mut canvas, plaque, 10.0 * s, Some(fill), Some(Stroke::new(palette.white, (2.0 * s).max(1.0))));
    let logo = TextStyle::new(24.0 * s, FontWeight::Bold, palette.white).with_shadow(renderer.shadow());
    centered_glyph(&mut canvas, renderer.glyphs(), center, &style.labels.logo, &logo);

    canvas
}
