use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};
use crate::render::sprite_pack::{AtlasConfig, ATLAS_COLS, ATLAS_ROWS};

/// 8-bit RGBA color, written as `#rrggbb` or `#rrggbbaa` in style files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    pub fn with_alpha(self, a: u8) -> Self { Self { a, ..self } }

    /// Multiply the color channels by `factor`, truncating.
    pub fn scaled(self, factor: f32) -> Self {
        let f = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self { r: f(self.r), g: f(self.g), b: f(self.b), a: self.a }
    }

    pub fn to_array(self) -> [u8; 4] { [self.r, self.g, self.b, self.a] }
}

impl TryFrom<String> for Color {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(&s);
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(CardError::InvalidColor(s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| CardError::InvalidColor(s.clone()))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    pub card: CardDims,
    pub palette: Palette,
    pub effects: Effects,
    pub labels: Labels,
    pub atlas: AtlasConfig,
    pub buttons: ButtonDims,
    pub fonts: FontPaths,
}

impl Default for CardStyle {
    fn default() -> Self { Self::premium() }
}

impl CardStyle {
    /// Flat cream cards with thin dark borders and no effects.
    pub fn basic() -> Self {
        Self {
            card: CardDims { border_width: 3, ..CardDims::default() },
            palette: Palette::basic(),
            effects: Effects::none(),
            labels: Labels::default(),
            atlas: AtlasConfig::default(),
            buttons: ButtonDims::default(),
            fonts: FontPaths::default(),
        }
    }

    /// Gradient backdrops, glyph shadows, double borders and ornaments.
    pub fn premium() -> Self {
        Self {
            card: CardDims::default(),
            palette: Palette::default(),
            effects: Effects::default(),
            labels: Labels::default(),
            atlas: AtlasConfig::default(),
            buttons: ButtonDims::default(),
            fonts: FontPaths::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(CardError::InvalidStyle(msg));
        if self.card.width < 32 || self.card.height < 32 {
            return bad(format!("card size {}x{} is too small", self.card.width, self.card.height));
        }
        if self.atlas.cell_width == 0 || self.atlas.cell_height == 0 {
            return bad("atlas cells must be non-empty".into());
        }
        if (self.atlas.cols, self.atlas.rows) != (ATLAS_COLS, ATLAS_ROWS) {
            return bad(format!(
                "atlas grid {}x{} is not the fixed {}x{} layout",
                self.atlas.cols, self.atlas.rows, ATLAS_COLS, ATLAS_ROWS
            ));
        }
        if self.buttons.width == 0 || self.buttons.height == 0 {
            return bad("button size must be non-zero".into());
        }
        Ok(())
    }
}

/// Working resolution of every composited card, independent of atlas cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDims {
    pub width: u32,
    pub height: u32,
    pub corner_radius: f32,
    pub border_width: u32,
}

impl Default for CardDims {
    fn default() -> Self { Self { width: 280, height: 380, corner_radius: 40.0, border_width: 5 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub card_red: Color,
    pub card_black: Color,
    pub card_bg_top: Color,
    pub card_bg_bottom: Color,
    pub card_border: Color,
    pub joker_bg_top: Color,
    pub joker_bg_bottom: Color,
    pub gold: Color,
    pub silver: Color,
    pub white: Color,
    pub back_primary: Color,
    pub back_secondary: Color,
    pub back_accent: Color,
    pub back_pattern: Color,
    pub button_green: Color,
    pub button_red: Color,
    pub button_blue: Color,
    pub glyph_shadow: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            card_red: Color::rgb(220, 20, 60),
            card_black: Color::rgb(28, 28, 30),
            card_bg_top: Color::rgb(248, 248, 248),
            card_bg_bottom: Color::rgb(238, 238, 238),
            card_border: Color::rgb(200, 200, 200),
            joker_bg_top: Color::rgb(25, 25, 35),
            joker_bg_bottom: Color::rgb(35, 35, 45),
            gold: Color::rgb(255, 215, 0),
            silver: Color::rgb(192, 192, 192),
            white: Color::rgb(255, 255, 255),
            back_primary: Color::rgb(30, 60, 120),
            back_secondary: Color::rgb(50, 80, 140),
            back_accent: Color::rgb(220, 180, 50),
            back_pattern: Color::rgb(40, 70, 130),
            button_green: Color::rgb(76, 175, 80),
            button_red: Color::rgb(244, 67, 54),
            button_blue: Color::rgb(33, 150, 243),
            glyph_shadow: Color::rgba(0, 0, 0, 60),
        }
    }
}

impl Palette {
    pub fn basic() -> Self {
        let cream = Color::rgb(255, 248, 220);
        let navy = Color::rgb(25, 25, 112);
        Self {
            card_black: Color::rgb(40, 40, 40),
            card_bg_top: cream,
            card_bg_bottom: cream,
            card_border: Color::rgb(40, 40, 40),
            joker_bg_top: Color::rgb(50, 50, 50),
            joker_bg_bottom: Color::rgb(50, 50, 50),
            back_primary: navy,
            back_secondary: navy,
            back_accent: Color::rgb(255, 215, 0),
            back_pattern: navy,
            button_green: Color::rgb(0, 150, 0),
            button_red: Color::rgb(150, 0, 0),
            button_blue: Color::rgb(0, 0, 150),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    pub gradient_background: bool,
    pub glyph_shadow: bool,
    pub inner_border: bool,
    pub face_names: bool,
    pub joker_rings: bool,
    pub button_highlight: bool,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            gradient_background: true,
            glyph_shadow: true,
            inner_border: true,
            face_names: true,
            joker_rings: true,
            button_highlight: true,
        }
    }
}

impl Effects {
    pub fn none() -> Self {
        Self {
            gradient_background: false,
            glyph_shadow: false,
            inner_border: false,
            face_names: false,
            joker_rings: false,
            button_highlight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokerLabels {
    pub primary: String,
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub small_joker: JokerLabels,
    pub big_joker: JokerLabels,
    pub logo: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            small_joker: JokerLabels { primary: "小王".into(), secondary: Some("SMALL JOKER".into()) },
            big_joker: JokerLabels { primary: "大王".into(), secondary: Some("BIG JOKER".into()) },
            logo: "掼蛋".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonDims {
    pub width: u32,
    pub height: u32,
    pub radius: f32,
}

impl Default for ButtonDims {
    fn default() -> Self { Self { width: 120, height: 40, radius: 10.0 } }
}

/// Ordered font file candidates; the first readable one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontPaths {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
}

impl FontPaths {
    pub fn is_empty(&self) -> bool { self.regular.is_empty() && self.bold.is_empty() }
}
