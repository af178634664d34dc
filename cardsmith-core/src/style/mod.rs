pub mod schema;

use anyhow::{Context, Result};

pub use schema::{ButtonDims, CardDims, CardStyle, Color, Effects, FontPaths, JokerLabels, Labels, Palette};

pub fn load_from_yaml_str(s: &str) -> Result<CardStyle> {
    let style: CardStyle = serde_yaml::from_str(s)?;
    style.validate()?;
    Ok(style)
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<CardStyle> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read style {}", path.display()))?;
    load_from_yaml_str(&data).with_context(|| format!("invalid style {}", path.display()))
}
