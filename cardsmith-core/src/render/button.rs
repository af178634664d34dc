//! Table UI buttons. Text is drawn by the client, so these are plain plates.

use image::RgbaImage;

use super::canvas::new_canvas;
use super::card::CardRenderer;
use super::primitives::{rounded_rect, Paint, Rect, Stroke};
use crate::style::{Color, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Play,
    Pass,
    Tribute,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 3] = [ButtonKind::Play, ButtonKind::Pass, ButtonKind::Tribute];

    pub fn file_name(self) -> &'static str {
        match self {
            ButtonKind::Play => "play_button.png",
            ButtonKind::Pass => "pass_button.png",
            ButtonKind::Tribute => "tribute_button.png",
        }
    }

    pub fn base_color(self, palette: &Palette) -> Color {
        match self {
            ButtonKind::Play => palette.button_green,
            ButtonKind::Pass => palette.button_red,
            ButtonKind::Tribute => palette.button_blue,
        }
    }
}

/// Darkening factor at the bottom edge of a gradient button.
const GRADIENT_FLOOR: f32 = 0.7;
const HIGHLIGHT_ALPHA: u8 = 30;

pub fn render_button(kind: ButtonKind, renderer: &CardRenderer) -> RgbaImage {
    let style = renderer.style();
    let dims = style.buttons;
    let base = kind.base_color(&style.palette);
    let white = style.palette.white;

    let mut canvas = new_canvas(dims.width, dims.height);
    let rect = Rect::from_size(dims.width, dims.height);
    let fill = if style.effects.gradient_background {
        Paint::VerticalGradient { top: base, bottom: base.scaled(GRADIENT_FLOOR) }
    } else {
        Paint::Solid(base)
    };
    rounded_rect(&mut canvas, rect, dims.radius, Some(fill), Some(Stroke::new(white, 2.0)));

    if style.effects.button_highlight {
        let w = dims.width as f32;
        let top_half = Rect::new(2.0, 2.0, w - 2.0, (dims.height / 2) as f32);
        let gloss = Paint::Solid(white.with_alpha(HIGHLIGHT_ALPHA));
        rounded_rect(&mut canvas, top_half, (dims.radius - 2.0).max(0.0), Some(gloss), None);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::glyph::GlyphRasterizer;
    use crate::style::CardStyle;

    #[test]
    fn test_button_size_and_color() {
        let r = CardRenderer::new(CardStyle::basic(), GlyphRasterizer::builtin());
        for kind in ButtonKind::ALL {
            let img = render_button(kind, &r);
            assert_eq!(img.dimensions(), (120, 40));
            let base = kind.base_color(&r.style().palette);
            assert_eq!(img.get_pixel(60, 20).0, base.to_array(), "{kind:?}");
            assert_eq!(img.get_pixel(0, 0)[3], 0, "corners stay transparent");
        }
    }

    #[test]
    fn test_premium_button_darkens_downward() {
        let r = CardRenderer::new(CardStyle::premium(), GlyphRasterizer::builtin());
        let img = render_button(ButtonKind::Tribute, &r);
        let top = img.get_pixel(60, 24);
        let bottom = img.get_pixel(60, 36);
        assert!(bottom[2] < top[2]);
    }

    #[test]
    fn test_file_names_are_distinct() {
        let names: Vec<_> = ButtonKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names, ["play_button.png", "pass_button.png", "tribute_button.png"]);
    }
}
