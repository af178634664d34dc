//! Text rasterization: a pluggable glyph source with a built-in fallback.
//!
//! Card text is drawn from a [`GlyphRasterizer`]. It asks an optional
//! font-backed [`GlyphSource`] first and falls back per character to a small
//! built-in bitmap set, so a missing font (or a font lacking suit symbols)
//! degrades the look but never aborts generation.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use tracing::{debug, info, warn};

use super::canvas::{blend, Canvas};
use crate::error::{CardError, Result};
use crate::style::{Color, FontPaths};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Coverage bitmap of one character, positioned relative to the pen and baseline.
#[derive(Debug, Clone, Default)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Left edge relative to the pen position.
    pub xmin: i32,
    /// Bottom edge above the baseline.
    pub ymin: i32,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// Tight-bounds coverage of a laid-out string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphRun {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphRun {
    pub fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }
}

pub trait GlyphSource: Send + Sync {
    /// `None` when this source has no glyph for `ch`.
    fn glyph(&self, ch: char, px: f32, weight: FontWeight) -> Option<GlyphBitmap>;
}

/// TrueType/OpenType faces rasterized with fontdue.
pub struct FontGlyphs {
    regular: fontdue::Font,
    bold: Option<fontdue::Font>,
}

fn load_font(path: &Path) -> Result<fontdue::Font> {
    let fail = |reason: String| CardError::FontLoad { path: path.to_path_buf(), reason };
    let bytes = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|e| fail(e.to_string()))
}

impl FontGlyphs {
    pub fn load(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        let regular = load_font(regular)?;
        let bold = bold.map(load_font).transpose()?;
        Ok(Self { regular, bold })
    }

    fn face(&self, weight: FontWeight) -> &fontdue::Font {
        match (weight, &self.bold) {
            (FontWeight::Bold, Some(bold)) => bold,
            _ => &self.regular,
        }
    }
}

impl GlyphSource for FontGlyphs {
    fn glyph(&self, ch: char, px: f32, weight: FontWeight) -> Option<GlyphBitmap> {
        let font = self.face(weight);
        if font.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (m, coverage) = font.rasterize(ch, px);
        Some(GlyphBitmap {
            width: m.width,
            height: m.height,
            xmin: m.xmin,
            ymin: m.ymin,
            advance: m.advance_width,
            coverage,
        })
    }
}

fn first_loadable(candidates: &[PathBuf]) -> Option<(PathBuf, fontdue::Font)> {
    candidates.iter().find_map(|path| match load_font(path) {
        Ok(font) => Some((path.clone(), font)),
        Err(err) => {
            debug!(%err, "font candidate skipped");
            None
        }
    })
}

const ROWS: usize = 7;

const TOFU: [&str; ROWS] = ["#####", "#...#", "#...#", "#...#", "#...#", "#...#", "#####"];

fn pattern(ch: char) -> Option<[&'static str; ROWS]> {
    Some(match ch.to_ascii_uppercase() {
        '0' => [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."],
        '1' => ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."],
        '2' => [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"],
        '3' => ["####.", "....#", "....#", ".###.", "....#", "....#", "####."],
        '4' => ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."],
        '5' => ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
        '6' => ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."],
        '7' => ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
        '8' => [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
        '9' => [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."],
        'A' => [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'B' => ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."],
        'C' => [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."],
        'D' => ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."],
        'E' => ["#####", "#....", "#....", "####.", "#....", "#....", "#####"],
        'F' => ["#####", "#....", "#....", "####.", "#....", "#....", "#...."],
        'G' => [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"],
        'H' => ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'I' => [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."],
        'J' => ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."],
        'K' => ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"],
        'L' => ["#....", "#....", "#....", "#....", "#....", "#....", "#####"],
        'M' => ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"],
        'N' => ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"],
        'O' => [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'P' => ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."],
        'Q' => [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"],
        'R' => ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
        'S' => [".####", "#....", "#....", ".###.", "....#", "....#", "####."],
        'T' => ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
        'U' => ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'V' => ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."],
        'W' => ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."],
        'X' => ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"],
        'Y' => ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."],
        'Z' => ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"],
        '-' => [".....", ".....", ".....", "#####", ".....", ".....", "....."],
        '♠' => ["...#...", "..###..", ".#####.", "#######", "#######", "...#...", "..###.."],
        '♥' => [".##.##.", "#######", "#######", "#######", ".#####.", "..###..", "...#..."],
        '♦' => ["...#...", "..###..", ".#####.", "#######", ".#####.", "..###..", "...#..."],
        '♣' => ["..###..", "..###..", "#######", "#######", "##.#.##", "...#...", "..###.."],
        '★' => ["...#...", "...#...", "#######", ".#####.", "..###..", ".##.##.", "##...##"],
        '☆' => ["...#...", "..#.#..", "##...##", "#.....#", ".#...#.", ".#.#.#.", "##...##"],
        _ => return None,
    })
}

/// Block bitmaps scaled to roughly 70% of the requested pixel size.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGlyphs;

impl BuiltinGlyphs {
    fn scale(px: f32) -> usize { ((px * 0.7) / ROWS as f32).round().max(1.0) as usize }
}

impl GlyphSource for BuiltinGlyphs {
    fn glyph(&self, ch: char, px: f32, weight: FontWeight) -> Option<GlyphBitmap> {
        let k = Self::scale(px);
        if ch.is_whitespace() {
            return Some(GlyphBitmap { advance: (4 * k) as f32, ..GlyphBitmap::default() });
        }
        let rows = pattern(ch).unwrap_or(TOFU);
        let cols = rows[0].chars().count();
        let embolden = if weight == FontWeight::Bold { (k / 3).max(1) } else { 0 };
        let width = cols * k + embolden;
        let height = ROWS * k;
        let mut coverage = vec![0u8; width * height];
        for (ry, row) in rows.iter().enumerate() {
            for (rx, cell) in row.chars().enumerate() {
                if cell != '#' {
                    continue;
                }
                for y in ry * k..(ry + 1) * k {
                    let line = &mut coverage[y * width..(y + 1) * width];
                    line[rx * k..(rx + 1) * k + embolden].fill(255);
                }
            }
        }
        Some(GlyphBitmap {
            width,
            height,
            xmin: 0,
            ymin: 0,
            advance: ((cols + 1) * k + embolden) as f32,
            coverage,
        })
    }
}

pub struct GlyphRasterizer {
    source: Option<Box<dyn GlyphSource>>,
    builtin: BuiltinGlyphs,
}

impl fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphRasterizer").field("font", &self.source.is_some()).finish()
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self { Self::builtin() }
}

impl GlyphRasterizer {
    /// Only the built-in bitmap set.
    pub fn builtin() -> Self { Self { source: None, builtin: BuiltinGlyphs } }

    pub fn with_source(source: impl GlyphSource + 'static) -> Self {
        Self { source: Some(Box::new(source)), builtin: BuiltinGlyphs }
    }

    /// Load the first readable regular and bold faces; fall back to the
    /// built-in set when no candidate can be loaded.
    pub fn resolve(paths: &FontPaths) -> Self {
        let regular = first_loadable(&paths.regular);
        let bold = first_loadable(&paths.bold);
        match (regular, bold) {
            (Some((path, regular)), bold) => {
                info!(font = %path.display(), bold = bold.is_some(), "using font");
                Self::with_source(FontGlyphs { regular, bold: bold.map(|(_, f)| f) })
            }
            (None, Some((path, bold))) => {
                info!(font = %path.display(), "using bold face for all text");
                Self::with_source(FontGlyphs { regular: bold, bold: None })
            }
            (None, None) => {
                if !paths.is_empty() {
                    warn!("no font candidate could be loaded, using built-in glyphs");
                }
                Self::builtin()
            }
        }
    }

    pub fn has_font(&self) -> bool { self.source.is_some() }

    fn glyph(&self, ch: char, px: f32, weight: FontWeight) -> GlyphBitmap {
        self.source
            .as_ref()
            .and_then(|s| s.glyph(ch, px, weight))
            .or_else(|| self.builtin.glyph(ch, px, weight))
            .unwrap_or_default()
    }

    /// Lay `text` out on a single baseline and crop to its ink bounds.
    pub fn rasterize(&self, text: &str, px: f32, weight: FontWeight) -> GlyphRun {
        let mut placed = Vec::new();
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let g = self.glyph(ch, px, weight);
            let left = pen.round() as i32 + g.xmin;
            let top = -(g.ymin + g.height as i32);
            pen += g.advance;
            if g.width > 0 && g.height > 0 {
                placed.push((left, top, g));
            }
        }
        if placed.is_empty() {
            return GlyphRun::default();
        }
        let min_x = placed.iter().map(|(l, _, _)| *l).min().unwrap_or(0);
        let min_y = placed.iter().map(|(_, t, _)| *t).min().unwrap_or(0);
        let max_x = placed.iter().map(|(l, _, g)| l + g.width as i32).max().unwrap_or(0);
        let max_y = placed.iter().map(|(_, t, g)| t + g.height as i32).max().unwrap_or(0);
        let width = (max_x - min_x) as usize;
        let height = (max_y - min_y) as usize;
        let mut coverage = vec![0u8; width * height];
        for (left, top, g) in &placed {
            let ox = (left - min_x) as usize;
            let oy = (top - min_y) as usize;
            for y in 0..g.height {
                let src = &g.coverage[y * g.width..(y + 1) * g.width];
                let dst = &mut coverage[(oy + y) * width + ox..(oy + y) * width + ox + g.width];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = (*d).max(*s);
                }
            }
        }
        GlyphRun { width: width as u32, height: height as u32, coverage }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    /// Drop-shadow color drawn beneath the glyph, offset by `max(1, size / 40)`.
    pub shadow: Option<Color>,
}

impl TextStyle {
    pub fn new(size: f32, weight: FontWeight, color: Color) -> Self {
        Self { size, weight, color, shadow: None }
    }

    pub fn with_shadow(self, shadow: Option<Color>) -> Self { Self { shadow, ..self } }
}

pub fn draw_run(canvas: &mut Canvas, run: &GlyphRun, x: i32, y: i32, color: Color) {
    for row in 0..run.height as i32 {
        for col in 0..run.width as i32 {
            let c = run.coverage[(row * run.width as i32 + col) as usize];
            if c > 0 {
                blend(canvas, x + col, y + row, color, c as f32 / 255.0);
            }
        }
    }
}

pub fn shadow_offset(size: f32) -> i32 { ((size / 40.0) as i32).max(1) }

/// Draw `text` so the center of its ink bounds lands on `center`.
pub fn centered_glyph(
    canvas: &mut Canvas,
    glyphs: &GlyphRasterizer,
    center: Vec2,
    text: &str,
    style: &TextStyle,
) {
    let run = glyphs.rasterize(text, style.size, style.weight);
    if run.is_empty() {
        return;
    }
    let x = center.x.round() as i32 - (run.width / 2) as i32;
    let y = center.y.round() as i32 - (run.height / 2) as i32;
    if let Some(shadow) = style.shadow {
        let off = shadow_offset(style.size);
        draw_run(canvas, &run, x + off, y + off, shadow);
    }
    draw_run(canvas, &run, x, y, style.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::new_canvas;

    fn ink_bounds(c: &Canvas) -> Option<(u32, u32, u32, u32)> {
        let mut b: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in c.enumerate_pixels() {
            if p[3] > 0 {
                b = Some(match b {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        b
    }

    #[test]
    fn test_builtin_glyph_dimensions() {
        let g = BuiltinGlyphs.glyph('7', 40.0, FontWeight::Regular).unwrap();
        assert_eq!((g.width, g.height), (20, 28));
        assert_eq!(g.coverage.len(), 20 * 28);
        let suit = BuiltinGlyphs.glyph('♥', 40.0, FontWeight::Regular).unwrap();
        assert_eq!(suit.width, 28);
    }

    #[test]
    fn test_bold_is_wider() {
        let r = BuiltinGlyphs.glyph('K', 60.0, FontWeight::Regular).unwrap();
        let b = BuiltinGlyphs.glyph('K', 60.0, FontWeight::Bold).unwrap();
        assert!(b.width > r.width);
        assert!(b.coverage.iter().filter(|c| **c > 0).count() > r.coverage.iter().filter(|c| **c > 0).count());
    }

    #[test]
    fn test_unknown_char_renders_box() {
        let run = GlyphRasterizer::builtin().rasterize("大", 40.0, FontWeight::Regular);
        assert_eq!((run.width, run.height), (20, 28));
        assert_eq!(run.coverage[0], 255);
        assert_eq!(run.coverage[(14 * 20 + 10) as usize], 0);
    }

    #[test]
    fn test_run_spans_multiple_glyphs() {
        let g = GlyphRasterizer::builtin();
        let one = g.rasterize("1", 40.0, FontWeight::Regular);
        let ten = g.rasterize("10", 40.0, FontWeight::Regular);
        assert!(ten.width > one.width);
        assert_eq!(ten.height, one.height);
        assert!(g.rasterize("   ", 40.0, FontWeight::Regular).is_empty());
    }

    #[test]
    fn test_resolve_without_fonts_falls_back() {
        let paths = FontPaths {
            regular: vec![PathBuf::from("/no/such/font.ttf")],
            bold: vec![PathBuf::from("/no/such/font-bold.ttf")],
        };
        let g = GlyphRasterizer::resolve(&paths);
        assert!(!g.has_font());
        assert!(!g.rasterize("A♠", 30.0, FontWeight::Bold).is_empty());
    }

    #[test]
    fn test_first_loadable_skips_bad_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.ttf");
        std::fs::write(&garbage, b"not a font").unwrap();
        let candidates = vec![PathBuf::from("/no/such/font.ttf"), garbage];
        assert!(first_loadable(&candidates).is_none());
        assert!(first_loadable(&[]).is_none());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = FontGlyphs::load(Path::new("/no/such/font.ttf"), None).err();
        assert!(matches!(err, Some(CardError::FontLoad { .. })));
    }

    #[test]
    fn test_centered_glyph_is_centered() {
        let mut c = new_canvas(100, 100);
        let style = TextStyle::new(40.0, FontWeight::Regular, Color::rgb(0, 0, 0));
        centered_glyph(&mut c, &GlyphRasterizer::builtin(), Vec2::new(50.0, 50.0), "A", &style);
        let (x0, y0, x1, y1) = ink_bounds(&c).unwrap();
        let cx = (x0 + x1 + 1) as f32 / 2.0;
        let cy = (y0 + y1 + 1) as f32 / 2.0;
        assert!((cx - 50.0).abs() <= 1.0, "cx {cx}");
        assert!((cy - 50.0).abs() <= 1.0, "cy {cy}");
    }

    #[test]
    fn test_shadow_offsets_down_right() {
        let g = GlyphRasterizer::builtin();
        let plain = TextStyle::new(80.0, FontWeight::Regular, Color::rgb(255, 255, 255));
        let shadowed = plain.with_shadow(Some(Color::rgba(0, 0, 0, 120)));
        let mut a = new_canvas(120, 120);
        let mut b = new_canvas(120, 120);
        centered_glyph(&mut a, &g, Vec2::splat(60.0), "L", &plain);
        centered_glyph(&mut b, &g, Vec2::splat(60.0), "L", &shadowed);
        let (_, _, ax1, ay1) = ink_bounds(&a).unwrap();
        let (_, _, bx1, by1) = ink_bounds(&b).unwrap();
        assert_eq!((bx1, by1), (ax1 + 2, ay1 + 2));
        assert_eq!(shadow_offset(10.0), 1);
        assert_eq!(shadow_offset(120.0), 3);
    }
}
