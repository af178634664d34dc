//! Rasterization: shape primitives, glyphs and the card, back, button and
//! atlas compositors built on them.

pub mod canvas;
pub mod primitives;
pub mod glyph;
pub mod pips;
pub mod card;
pub mod back;
pub mod button;
pub mod sprite_pack;

pub use back::render_back;
pub use button::{render_button, ButtonKind};
pub use card::{CardImage, CardRenderer};
pub use glyph::{FontWeight, GlyphRasterizer, GlyphSource};
pub use sprite_pack::{cell_origin, pack, AtlasConfig};
