//! Full asset build: deck, atlas, back and buttons from one renderer.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::info;

use crate::deck::generate_deck;
use crate::error::Result;
use crate::export::AtlasMeta;
use crate::render::{pack, render_back, render_button, ButtonKind, CardRenderer};

/// Everything a game client loads, still in memory.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub atlas: RgbaImage,
    pub meta: AtlasMeta,
    /// Back texture at atlas cell size.
    pub back: RgbaImage,
    pub buttons: Vec<(ButtonKind, RgbaImage)>,
}

pub fn build_assets(renderer: &CardRenderer) -> Result<AssetBundle> {
    let style = renderer.style();
    style.validate()?;
    let grid = &style.atlas;

    let deck = generate_deck(renderer)?;
    info!(cols = grid.cols, rows = grid.rows, "packing atlas");
    let atlas = pack(deck.images(), grid);
    let meta = AtlasMeta::describe(grid, deck.cards().iter().map(|c| &c.identity));

    info!("rendering card back and buttons");
    let back = imageops::resize(&render_back(renderer), grid.cell_width, grid.cell_height, FilterType::Lanczos3);
    let buttons = ButtonKind::ALL.into_iter().map(|kind| (kind, render_button(kind, renderer))).collect();

    Ok(AssetBundle { atlas, meta, back, buttons })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardError;
    use crate::render::GlyphRasterizer;
    use crate::style::CardStyle;

    #[test]
    fn test_invalid_style_is_rejected_before_rendering() {
        let mut style = CardStyle::basic();
        style.atlas.rows = 8;
        let r = CardRenderer::new(style, GlyphRasterizer::builtin());
        assert!(matches!(build_assets(&r), Err(CardError::InvalidStyle(_))));
    }
}
