//! Anti-aliased shape primitives drawn straight onto a [`Canvas`].
//!
//! Coordinates are in pixel-edge space: pixel `(x, y)` covers
//! `[x, x + 1) x [y, y + 1)` and is sampled at its center. Outlines are
//! stroked inward from the shape boundary.

use std::ops::Range;

use glam::Vec2;

use super::canvas::{blend, gradient_row, Canvas};
use crate::style::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { min: Vec2::new(x0, y0), max: Vec2::new(x1, y1) }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self { min: center - size * 0.5, max: center + size * 0.5 }
    }

    pub fn inset(self, by: f32) -> Self {
        Self { min: self.min + Vec2::splat(by), max: self.max - Vec2::splat(by) }
    }

    pub fn center(&self) -> Vec2 { (self.min + self.max) * 0.5 }
    pub fn size(&self) -> Vec2 { self.max - self.min }
}

/// How the interior of a shape is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear ramp over the shape's own vertical extent.
    VerticalGradient { top: Color, bottom: Color },
}

impl Paint {
    fn color_at(&self, y: i32, rect: &Rect) -> Color {
        match *self {
            Paint::Solid(c) => c,
            Paint::VerticalGradient { top, bottom } => {
                let height = rect.size().y.max(0.0) as u32;
                let row = (y as f32 - rect.min.y).max(0.0) as u32;
                gradient_row(top, bottom, row.min(height), height)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self { Self { color, width } }
}

fn coverage(d: f32) -> f32 { (0.5 - d).clamp(0.0, 1.0) }

fn pixel_span(canvas: &Canvas, min: Vec2, max: Vec2) -> (Range<i32>, Range<i32>) {
    let x0 = (min.x.floor() as i32 - 1).max(0);
    let y0 = (min.y.floor() as i32 - 1).max(0);
    let x1 = (max.x.ceil() as i32 + 1).min(canvas.width() as i32);
    let y1 = (max.y.ceil() as i32 + 1).min(canvas.height() as i32);
    (x0..x1.max(x0), y0..y1.max(y0))
}

fn sample(x: i32, y: i32) -> Vec2 { Vec2::new(x as f32 + 0.5, y as f32 + 0.5) }

fn rounded_rect_sdf(p: Vec2, rect: &Rect, radius: f32) -> f32 {
    let half = rect.size() * 0.5;
    let r = radius.clamp(0.0, half.min_element().max(0.0));
    let q = (p - rect.center()).abs() - half + Vec2::splat(r);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - r
}

/// Filled and/or outlined rounded rectangle.
pub fn rounded_rect(
    canvas: &mut Canvas,
    rect: Rect,
    radius: f32,
    fill: Option<Paint>,
    outline: Option<Stroke>,
) {
    let (xs, ys) = pixel_span(canvas, rect.min, rect.max);
    for y in ys {
        let fill_color = fill.map(|p| p.color_at(y, &rect));
        for x in xs.clone() {
            let d = rounded_rect_sdf(sample(x, y), &rect, radius);
            let outer = coverage(d);
            if outer <= 0.0 {
                continue;
            }
            if let Some(color) = fill_color {
                blend(canvas, x, y, color, outer);
            }
            if let Some(stroke) = outline {
                let ring = outer - coverage(d + stroke.width);
                blend(canvas, x, y, stroke.color, ring);
            }
        }
    }
}

fn ellipse_sdf(p: Vec2, center: Vec2, radii: Vec2) -> f32 {
    let r = radii.max(Vec2::splat(f32::EPSILON));
    (((p - center) / r).length() - 1.0) * r.min_element()
}

pub fn ellipse_fill(canvas: &mut Canvas, center: Vec2, radii: Vec2, color: Color) {
    let (xs, ys) = pixel_span(canvas, center - radii, center + radii);
    for y in ys {
        for x in xs.clone() {
            let c = coverage(ellipse_sdf(sample(x, y), center, radii));
            if c > 0.0 {
                blend(canvas, x, y, color, c);
            }
        }
    }
}

pub fn ellipse_outline(canvas: &mut Canvas, center: Vec2, radii: Vec2, stroke: Stroke) {
    let (xs, ys) = pixel_span(canvas, center - radii, center + radii);
    for y in ys {
        for x in xs.clone() {
            let d = ellipse_sdf(sample(x, y), center, radii);
            let ring = coverage(d) - coverage(d + stroke.width);
            if ring > 0.0 {
                blend(canvas, x, y, stroke.color, ring);
            }
        }
    }
}

fn contains(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 { ((p - a).dot(ab) / len2).clamp(0.0, 1.0) } else { 0.0 };
    p.distance(a + ab * t)
}

const POLYGON_SAMPLES: i32 = 4;

/// Even-odd polygon with supersampled fill and a centered outline.
pub fn polygon(canvas: &mut Canvas, points: &[Vec2], fill: Option<Color>, outline: Option<Stroke>) {
    if points.len() < 3 {
        return;
    }
    let min = points.iter().copied().fold(Vec2::splat(f32::MAX), Vec2::min);
    let max = points.iter().copied().fold(Vec2::splat(f32::MIN), Vec2::max);
    let pad = outline.map_or(0.0, |s| s.width);
    let (xs, ys) = pixel_span(canvas, min - Vec2::splat(pad), max + Vec2::splat(pad));
    let step = 1.0 / POLYGON_SAMPLES as f32;
    let total = (POLYGON_SAMPLES * POLYGON_SAMPLES) as f32;
    for y in ys {
        for x in xs.clone() {
            if let Some(color) = fill {
                let mut hits = 0;
                for sy in 0..POLYGON_SAMPLES {
                    for sx in 0..POLYGON_SAMPLES {
                        let p = Vec2::new(
                            x as f32 + (sx as f32 + 0.5) * step,
                            y as f32 + (sy as f32 + 0.5) * step,
                        );
                        if contains(points, p) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    blend(canvas, x, y, color, hits as f32 / total);
                }
            }
            if let Some(stroke) = outline {
                let p = sample(x, y);
                let d = points
                    .iter()
                    .zip(points.iter().cycle().skip(1))
                    .map(|(a, b)| segment_distance(p, *a, *b))
                    .fold(f32::MAX, f32::min);
                let c = (stroke.width * 0.5 + 0.5 - d).clamp(0.0, 1.0);
                if c > 0.0 {
                    blend(canvas, x, y, stroke.color, c);
                }
            }
        }
    }
}

/// Vertices of a `spikes`-pointed star with its first point straight up.
pub fn star_points(center: Vec2, outer: f32, inner: f32, spikes: u32) -> Vec<Vec2> {
    let n = spikes.max(2) * 2;
    (0..n)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / spikes.max(2) as f32;
            let r = if i % 2 == 0 { outer } else { inner };
            center + Vec2::new(angle.cos(), angle.sin()) * r
        })
        .collect()
}

/// Four vertices of an axis-aligned diamond of the given width/height.
pub fn diamond_points(center: Vec2, size: f32) -> [Vec2; 4] {
    let h = size * 0.5;
    [
        center + Vec2::new(0.0, -h),
        center + Vec2::new(h, 0.0),
        center + Vec2::new(0.0, h),
        center + Vec2::new(-h, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::new_canvas;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_rounded_rect_fill_leaves_corners_clear() {
        let mut c = new_canvas(40, 40);
        rounded_rect(&mut c, Rect::from_size(40, 40), 12.0, Some(Paint::Solid(RED)), None);
        assert_eq!(c.get_pixel(20, 20).0, [255, 0, 0, 255]);
        assert_eq!(c.get_pixel(0, 0)[3], 0);
        assert_eq!(c.get_pixel(39, 39)[3], 0);
        assert_eq!(c.get_pixel(20, 0)[3], 255);
    }

    #[test]
    fn test_rounded_rect_outline_only_touches_border() {
        let mut c = new_canvas(40, 40);
        rounded_rect(&mut c, Rect::from_size(40, 40), 8.0, None, Some(Stroke::new(RED, 3.0)));
        assert_eq!(c.get_pixel(20, 1).0, [255, 0, 0, 255]);
        assert_eq!(c.get_pixel(20, 20)[3], 0);
        assert_eq!(c.get_pixel(20, 6)[3], 0);
    }

    #[test]
    fn test_gradient_paint_varies_by_row() {
        let mut c = new_canvas(10, 20);
        let paint = Paint::VerticalGradient { top: Color::rgb(0, 0, 0), bottom: Color::rgb(200, 200, 200) };
        rounded_rect(&mut c, Rect::from_size(10, 20), 0.0, Some(paint), None);
        assert!(c.get_pixel(5, 2)[0] < c.get_pixel(5, 17)[0]);
    }

    #[test]
    fn test_ellipse_outline_is_hollow() {
        let mut c = new_canvas(50, 50);
        ellipse_outline(&mut c, Vec2::splat(25.0), Vec2::splat(20.0), Stroke::new(RED, 3.0));
        assert_eq!(c.get_pixel(25, 25)[3], 0);
        assert_eq!(c.get_pixel(25, 6)[3], 255);
        assert_eq!(c.get_pixel(25, 0)[3], 0);
    }

    #[test]
    fn test_ellipse_fill_covers_center() {
        let mut c = new_canvas(20, 20);
        ellipse_fill(&mut c, Vec2::splat(10.0), Vec2::new(6.0, 4.0), RED);
        assert_eq!(c.get_pixel(10, 10)[3], 255);
        assert_eq!(c.get_pixel(10, 16)[3], 0);
    }

    #[test]
    fn test_polygon_fill_and_outline() {
        let mut c = new_canvas(30, 30);
        let pts = diamond_points(Vec2::splat(15.0), 20.0);
        polygon(&mut c, &pts, Some(RED), Some(Stroke::new(Color::rgb(0, 0, 255), 1.0)));
        assert_eq!(c.get_pixel(15, 15).0, [255, 0, 0, 255]);
        assert_eq!(c.get_pixel(1, 1)[3], 0);
        let edge = c.get_pixel(15, 5);
        assert!(edge[2] > 0, "outline should tint the top vertex");
    }

    #[test]
    fn test_star_has_alternating_radii() {
        let pts = star_points(Vec2::ZERO, 10.0, 4.0, 5);
        assert_eq!(pts.len(), 10);
        assert!((pts[0] - Vec2::new(0.0, -10.0)).length() < 1e-4);
        assert!((pts[1].length() - 4.0).abs() < 1e-4);
    }
}
