pub mod deck;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod style;

pub use error::{CardError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
