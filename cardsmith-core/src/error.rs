use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    /// Pip layouts only exist for the numbered ranks.
    #[error("no pip layout for rank {0}; numbered cards run from 2 to 10")]
    UnsupportedRank(u8),

    #[error("failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("invalid color {0:?}; expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("invalid style: {0}")]
    InvalidStyle(String),

    #[error("deck produced {actual} cards, expected {expected}")]
    DeckSize { expected: usize, actual: usize },

    #[error("I/O failure at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed atlas metadata {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CardError>;
