//! Card compositor: one identity in, one fixed-size RGBA card out.
//!
//! Layout constants are expressed for a 280px-wide reference card and scaled
//! linearly with the configured working width. Every card goes through the
//! same layers in order: backdrop, corner indices, center content.

use glam::Vec2;
use image::{imageops, RgbaImage};

use super::canvas::{new_canvas, overlay, Canvas};
use super::glyph::{centered_glyph, FontWeight, GlyphRasterizer, TextStyle};
use super::pips::pip_positions;
use super::primitives::{ellipse_outline, polygon, rounded_rect, star_points, Paint, Rect, Stroke};
use crate::deck::{CardIdentity, Face, JokerVariant, Suit};
use crate::error::Result;
use crate::style::{CardStyle, Color};

/// A composited card at the working resolution.
pub type CardImage = RgbaImage;

const REFERENCE_WIDTH: f32 = 280.0;

// Corner index buffer, drawn once and stamped twice (the second copy rotated).
const CORNER_SIZE: Vec2 = Vec2::new(72.0, 112.0);
const CORNER_INSET: f32 = 6.0;
const CORNER_RANK: (Vec2, f32) = (Vec2::new(36.0, 40.0), 40.0);
const CORNER_SUIT: (Vec2, f32) = (Vec2::new(36.0, 84.0), 30.0);

const PIP_SIZE: f32 = 40.0;
const ACE_SIZE: f32 = 120.0;
const FACE_SUIT_SIZE: f32 = 80.0;
const FACE_RANK_SIZE: f32 = 64.0;
const FACE_NAME_SIZE: f32 = 16.0;

const JOKER_LABEL_SIZE: f32 = 36.0;
const JOKER_SUBLABEL_SIZE: f32 = 18.0;

#[derive(Debug)]
pub struct CardRenderer {
    style: CardStyle,
    glyphs: GlyphRasterizer,
}

impl CardRenderer {
    pub fn new(style: CardStyle, glyphs: GlyphRasterizer) -> Self { Self { style, glyphs } }

    /// Resolve the style's font candidates, falling back to built-in glyphs.
    pub fn from_style(style: CardStyle) -> Self {
        let glyphs = GlyphRasterizer::resolve(&style.fonts);
        Self::new(style, glyphs)
    }

    pub fn style(&self) -> &CardStyle { &self.style }
    pub fn glyphs(&self) -> &GlyphRasterizer { &self.glyphs }

    /// Ratio between the working width and the reference layout width.
    pub fn scale(&self) -> f32 { self.style.card.width as f32 / REFERENCE_WIDTH }

    pub fn dimensions(&self) -> (u32, u32) { (self.style.card.width, self.style.card.height) }

    fn center(&self) -> Vec2 {
        let (w, h) = self.dimensions();
        Vec2::new(w as f32 / 2.0, h as f32 / 2.0)
    }

    /// Point offset from the card center by reference-unit `(dx, dy)`.
    fn at(&self, dx: f32, dy: f32) -> Vec2 { self.center() + Vec2::new(dx, dy) * self.scale() }

    pub(crate) fn shadow(&self) -> Option<Color> {
        self.style.effects.glyph_shadow.then_some(self.style.palette.glyph_shadow)
    }

    /// Text style at a reference-unit size.
    pub(crate) fn text(&self, size: f32, weight: FontWeight, color: Color) -> TextStyle {
        TextStyle::new(size * self.scale(), weight, color).with_shadow(self.shadow())
    }

    pub fn suit_color(&self, suit: Suit) -> Color {
        if suit.is_red() { self.style.palette.card_red } else { self.style.palette.card_black }
    }

    pub fn render_card(&self, identity: &CardIdentity) -> Result<CardImage> {
        let (w, h) = self.dimensions();
        let mut canvas = new_canvas(w, h);
        let palette = &self.style.palette;
        match *identity {
            CardIdentity::Joker(variant) => {
                self.backdrop(&mut canvas, palette.joker_bg_top, palette.joker_bg_bottom, palette.gold);
                self.joker(&mut canvas, variant);
            }
            CardIdentity::Number { rank, suit } => {
                self.standard_frame(&mut canvas, &rank.to_string(), suit);
                self.pips(&mut canvas, rank, suit)?;
            }
            CardIdentity::Face { face, suit } => {
                self.standard_frame(&mut canvas, face.letter(), suit);
                self.face(&mut canvas, face, suit);
            }
            CardIdentity::Ace { suit } => {
                self.standard_frame(&mut canvas, "A", suit);
                let style = self.text(ACE_SIZE, FontWeight::Regular, self.suit_color(suit));
                centered_glyph(&mut canvas, &self.glyphs, self.center(), &suit.symbol().to_string(), &style);
            }
        }
        Ok(canvas)
    }

    fn standard_frame(&self, canvas: &mut Canvas, rank: &str, suit: Suit) {
        let palette = &self.style.palette;
        self.backdrop(canvas, palette.card_bg_top, palette.card_bg_bottom, palette.card_border);
        self.corners(canvas, rank, suit);
    }

    fn backdrop(&self, canvas: &mut Canvas, top: Color, bottom: Color, border: Color) {
        let s = self.scale();
        let card = &self.style.card;
        let (w, h) = self.dimensions();
        let rect = Rect::from_size(w, h).inset(2.0 * s);
        let radius = card.corner_radius * s;
        let fill = if self.style.effects.gradient_background {
            Paint::VerticalGradient { top, bottom }
        } else {
            Paint::Solid(top)
        };
        let outer = (card.border_width as f32 * s).max(1.0);
        rounded_rect(canvas, rect, radius, Some(fill), Some(Stroke::new(border, outer)));

        if self.style.effects.inner_border {
            let inset = (card.border_width as f32 + 4.0) * s;
            let inner = Stroke::new(border, (2.0 * s).max(1.0));
            rounded_rect(canvas, rect.inset(inset), (radius - inset).max(0.0), None, Some(inner));
        }
    }

    fn corners(&self, canvas: &mut Canvas, rank: &str, suit: Suit) {
        let s = self.scale();
        let color = self.suit_color(suit);
        let size = (CORNER_SIZE * s).round().max(Vec2::ONE);
        let mut index = new_canvas(size.x as u32, size.y as u32);

        let (pos, px) = CORNER_RANK;
        centered_glyph(&mut index, &self.glyphs, pos * s, rank, &self.text(px, FontWeight::Bold, color));
        let (pos, px) = CORNER_SUIT;
        let symbol = suit.symbol().to_string();
        centered_glyph(&mut index, &self.glyphs, pos * s, &symbol, &self.text(px, FontWeight::Regular, color));

        let (w, h) = self.dimensions();
        let inset = (CORNER_INSET * s).round() as i64;
        overlay(canvas, &index, inset, inset);
        let flipped = imageops::rotate180(&index);
        let x = w as i64 - inset - index.width() as i64;
        let y = h as i64 - inset - index.height() as i64;
        overlay(canvas, &flipped, x, y);
    }

    fn pips(&self, canvas: &mut Canvas, rank: u8, suit: Suit) -> Result<()> {
        let style = self.text(PIP_SIZE, FontWeight::Regular, self.suit_color(suit));
        let symbol = suit.symbol().to_string();
        for offset in pip_positions(rank)? {
            centered_glyph(canvas, &self.glyphs, self.at(offset.x, offset.y), &symbol, &style);
        }
        Ok(())
    }

    fn face(&self, canvas: &mut Canvas, face: Face, suit: Suit) {
        let color = self.suit_color(suit);
        let symbol = suit.symbol().to_string();
        let suit_style = self.text(FACE_SUIT_SIZE, FontWeight::Regular, color);
        centered_glyph(canvas, &self.glyphs, self.at(0.0, -20.0), &symbol, &suit_style);
        let rank_style = self.text(FACE_RANK_SIZE, FontWeight::Bold, color);
        centered_glyph(canvas, &self.glyphs, self.at(0.0, 60.0), face.letter(), &rank_style);
        if self.style.effects.face_names {
            let name_style = self.text(FACE_NAME_SIZE, FontWeight::Regular, color);
            centered_glyph(canvas, &self.glyphs, self.at(0.0, 104.0), face.name(), &name_style);
        }
    }

    fn joker(&self, canvas: &mut Canvas, variant: JokerVariant) {
        let s = self.scale();
        let palette = &self.style.palette;
        let (primary, secondary, labels) = match variant {
            JokerVariant::Big => (palette.gold, palette.card_red, &self.style.labels.big_joker),
            JokerVariant::Small => (palette.silver, palette.white, &self.style.labels.small_joker),
        };

        if self.style.effects.joker_rings {
            let ring_center = self.at(0.0, -20.0);
            ellipse_outline(canvas, ring_center, Vec2::splat(80.0 * s), Stroke::new(primary, 6.0 * s));
            ellipse_outline(canvas, ring_center, Vec2::splat(70.0 * s), Stroke::new(secondary, 3.0 * s));
        }

        let star = star_points(self.at(0.0, -30.0), 48.0 * s, 20.0 * s, 5);
        match variant {
            JokerVariant::Big => polygon(canvas, &star, Some(primary), Some(Stroke::new(secondary, 2.0 * s))),
            JokerVariant::Small => polygon(canvas, &star, None, Some(Stroke::new(primary, 3.0 * s))),
        }

        let label = self.text(JOKER_LABEL_SIZE, FontWeight::Bold, primary);
        centered_glyph(canvas, &self.glyphs, self.at(0.0, 85.0), &labels.primary, &label);
        if let Some(secondary_label) = &labels.secondary {
            let sub = self.text(JOKER_SUBLABEL_SIZE, FontWeight::Regular, secondary);
            centered_glyph(canvas, &self.glyphs, self.at(0.0, 120.0), secondary_label, &sub);
        }
    }
}
