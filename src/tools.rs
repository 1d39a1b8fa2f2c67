use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use sdf_texture_renderer::{PixelBuffer, SdfConfig};
use tokio::task::spawn_blocking;

use crate::{read_texture, render_texture_file, write_texture, OutputKind, TextureToolsError};

/// Loads and decodes a single image from disk.
pub async fn load_texture<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, TextureToolsError> {
    let path = path.as_ref().to_path_buf();

    // Note: decoding blocks, so it is much cheaper to do the (blocking) file I/O on the same
    // blocking thread than to read the file asynchronously first.
    spawn_blocking(move || read_texture(path)).await?
}

/// Encodes a texture as PNG and writes it to disk.
pub async fn save_texture<P: AsRef<Path>>(
    path: P,
    texture: PixelBuffer,
) -> Result<(), TextureToolsError> {
    let path = path.as_ref().to_path_buf();
    spawn_blocking(move || write_texture(path, &texture)).await?
}

/// Generates a texture from `source` into `out_dir`, returning the path written.
///
/// See [`crate::output_path`] for the naming of the output file.
pub async fn generate_texture_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    out_dir: Q,
    config: SdfConfig,
    kind: OutputKind,
) -> Result<PathBuf, TextureToolsError> {
    let source = source.as_ref().to_path_buf();
    let out_dir = out_dir.as_ref().to_path_buf();

    // Distance field generation is compute heavy, so mark it blocking.
    spawn_blocking(move || render_texture_file(source, out_dir, &config, kind)).await?
}

/// Generates textures for every source image concurrently.
///
/// The returned paths are in the same order as `sources`. On failure the first error is
/// returned straight away, but renders that are already running still finish and may write
/// their outputs.
pub async fn generate_texture_files<P: AsRef<Path>, Q: AsRef<Path>>(
    sources: &[P],
    out_dir: Q,
    config: SdfConfig,
    kind: OutputKind,
) -> Result<Vec<PathBuf>, TextureToolsError> {
    try_join_all(
        sources
            .iter()
            .map(|source| generate_texture_file(source, out_dir.as_ref(), config, kind)),
    )
    .await
}
