//! Export: PNG textures and the atlas metadata sidecar.
//!
//! Every file is written to a `.tmp` sibling first and renamed into place, so
//! an interrupted run never leaves a truncated texture under its final name.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::deck::CardIdentity;
use crate::error::{CardError, Result};
use crate::pipeline::AssetBundle;
use crate::render::sprite_pack::{cell_origin, AtlasConfig};

pub const ATLAS_FILE: &str = "cards.png";
pub const BACK_FILE: &str = "card_back.png";
pub const META_FILE: &str = "cards.json";

/// One occupied atlas cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMeta {
    pub index: usize,
    pub key: String,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasMeta {
    pub image: String,
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub frames: Vec<FrameMeta>,
}

impl AtlasMeta {
    /// Describe the cells `identities` occupy, in order; overflow is skipped like the packer does.
    pub fn describe<'a, I>(config: &AtlasConfig, identities: I) -> Self
    where
        I: IntoIterator<Item = &'a CardIdentity>,
    {
        let frames = identities
            .into_iter()
            .enumerate()
            .filter_map(|(index, id)| {
                cell_origin(index, config).map(|(x, y)| FrameMeta { index, key: id.key(), x, y })
            })
            .collect();
        Self {
            image: ATLAS_FILE.to_string(),
            cols: config.cols,
            rows: config.rows,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            frames,
        }
    }

    pub fn grid(&self) -> AtlasConfig {
        AtlasConfig { cols: self.cols, rows: self.rows, cell_width: self.cell_width, cell_height: self.cell_height }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Run `write` against the staging sibling of `path`, then rename it into place.
/// The staging file is removed if either step fails.
fn staged<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let tmp = staging_path(path);
    let result = write(&tmp).and_then(|()| {
        fs::rename(&tmp, path).map_err(|source| CardError::Io { path: path.to_path_buf(), source })
    });
    match result {
        Ok(()) => {
            debug!(path = %path.display(), "wrote");
            Ok(())
        }
        Err(err) => {
            if tmp.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp) {
                    warn!(path = %tmp.display(), %cleanup, "could not remove staging file");
                }
            }
            Err(err)
        }
    }
}

pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    staged(path, |tmp| {
        image
            .save_with_format(tmp, ImageFormat::Png)
            .map_err(|source| CardError::Encode { path: path.to_path_buf(), source })
    })
}

pub fn write_meta(meta: &AtlasMeta, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(meta)
        .map_err(|source| CardError::Metadata { path: path.to_path_buf(), source })?;
    staged(path, |tmp| fs::write(tmp, json).map_err(|source| CardError::Io { path: tmp.to_path_buf(), source }))
}

pub fn read_meta(path: &Path) -> Result<AtlasMeta> {
    let data = fs::read(path).map_err(|source| CardError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_slice(&data).map_err(|source| CardError::Metadata { path: path.to_path_buf(), source })
}

/// Write every texture of `bundle` plus `cards.json` into `out_dir`.
pub fn write_bundle(bundle: &AssetBundle, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| CardError::Io { path: out_dir.to_path_buf(), source })?;
    let mut written = Vec::new();

    let mut png = |image: &RgbaImage, name: &str| -> Result<()> {
        let path = out_dir.join(name);
        write_png(image, &path)?;
        written.push(path);
        Ok(())
    };
    png(&bundle.atlas, ATLAS_FILE)?;
    png(&bundle.back, BACK_FILE)?;
    for (kind, image) in &bundle.buttons {
        png(image, kind.file_name())?;
    }

    let meta_path = out_dir.join(META_FILE);
    write_meta(&bundle.meta, &meta_path)?;
    written.push(meta_path);

    info!(files = written.len(), dir = %out_dir.display(), "assets written");
    Ok(written)
}
