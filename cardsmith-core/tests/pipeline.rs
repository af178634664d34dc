use cardsmith_core::deck::{canonical_sequence, generate_deck, identity_at, DECK_SIZE};
use cardsmith_core::export::{read_meta, write_bundle, ATLAS_FILE, BACK_FILE, META_FILE};
use cardsmith_core::pipeline::build_assets;
use cardsmith_core::render::{cell_origin, ButtonKind, CardRenderer, GlyphRasterizer};
use cardsmith_core::style::CardStyle;
use image::RgbaImage;

/// Half-size premium cards keep the full-deck tests quick.
fn renderer() -> CardRenderer {
    let mut style = CardStyle::premium();
    style.card.width = 140;
    style.card.height = 190;
    CardRenderer::new(style, GlyphRasterizer::builtin())
}

fn cell(atlas: &RgbaImage, index: usize) -> Vec<u8> {
    let cfg = Default::default();
    let (x, y) = cell_origin(index, &cfg).unwrap();
    image::imageops::crop_imm(atlas, x, y, 70, 95).to_image().into_raw()
}

#[test]
fn test_deck_order_is_stable() {
    let r = renderer();
    let deck = generate_deck(&r).unwrap();
    assert_eq!(deck.len(), DECK_SIZE);
    let ids: Vec<_> = deck.cards().iter().map(|c| c.identity).collect();
    assert_eq!(ids, canonical_sequence());
    for (i, card) in deck.cards().iter().enumerate() {
        assert_eq!(identity_at(i), Some(card.identity));
        assert_eq!(card.image.dimensions(), (140, 190));
    }
    // Both decks render identically card for card.
    assert_eq!(deck.get(0).unwrap().image, deck.get(52).unwrap().image);
}

#[test]
fn test_bundle_shapes_and_atlas_cells() {
    let bundle = build_assets(&renderer()).unwrap();
    assert_eq!(bundle.atlas.dimensions(), (840, 855));
    assert_eq!(bundle.back.dimensions(), (70, 95));
    assert_eq!(bundle.buttons.len(), 3);
    for (_, button) in &bundle.buttons {
        assert_eq!(button.dimensions(), (120, 40));
    }
    assert_eq!(bundle.meta.frames.len(), DECK_SIZE);

    for index in 0..DECK_SIZE {
        let (x, y) = cell_origin(index, &Default::default()).unwrap();
        assert_eq!(bundle.atlas.get_pixel(x + 35, y + 47)[3], 255, "cell {index} is empty");
    }
    assert_eq!(cell(&bundle.atlas, 13), cell(&bundle.atlas, 65));
    assert_ne!(cell(&bundle.atlas, 104), cell(&bundle.atlas, 105));
    assert_eq!(cell(&bundle.atlas, 104), cell(&bundle.atlas, 106));
}

#[test]
fn test_write_bundle_to_disk() {
    let bundle = build_assets(&renderer()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("assets");
    let written = write_bundle(&bundle, &out).unwrap();
    assert_eq!(written.len(), 6);

    assert_eq!(image::image_dimensions(out.join(ATLAS_FILE)).unwrap(), (840, 855));
    assert_eq!(image::image_dimensions(out.join(BACK_FILE)).unwrap(), (70, 95));
    for kind in ButtonKind::ALL {
        assert_eq!(image::image_dimensions(out.join(kind.file_name())).unwrap(), (120, 40));
    }

    let decoded = image::open(out.join(ATLAS_FILE)).unwrap().to_rgba8();
    assert_eq!(decoded, bundle.atlas);

    let meta = read_meta(&out.join(META_FILE)).unwrap();
    assert_eq!(meta, bundle.meta);
    let keys: Vec<_> = meta.frames.iter().map(|f| f.key.clone()).collect();
    let expected: Vec<_> = canonical_sequence().iter().map(|id| id.key()).collect();
    assert_eq!(keys, expected);

    let leftovers = std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}
