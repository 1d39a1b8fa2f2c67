//! # SDF Texture Tools
//!
//! File and settings plumbing around
//! [sdf_texture_renderer](sdf_texture_renderer): decoding source images, writing generated
//! distance field textures as PNG, and persisting generator settings.
//!
//! Everything that touches the disk has a blocking flavour (handy for worker threads) and an
//! async flavour that runs the blocking work on tokio's blocking pool.
//!
//! ## References
//!   * [Improved Alpha-Tested Magnification](https://steamcdn-a.akamaihd.net/apps/valve/2007/SIGGRAPH2007_AlphaTestedMagnification.pdf)
//!   * [TinySDF](https://github.com/mapbox/tiny-sdf)

mod error;
mod generate;
mod settings;
mod tools;

// Re-export the renderer
pub use sdf_texture_renderer;

pub use crate::error::TextureToolsError;
pub use crate::generate::*;
pub use crate::settings::*;
pub use crate::tools::*;
