use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat};
use sdf_texture_renderer::{generate, generate_alpha_mask, PixelBuffer, SdfConfig};
use tracing::info;

use crate::TextureToolsError;

/// Which texture to produce from a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// The field in the alpha channel, colour channels filled per [`SdfConfig::fill_mode`].
    Sdf,

    /// The source colour with the field as its alpha channel.
    SdfAlpha,
}

impl OutputKind {
    fn suffix(self) -> &'static str {
        match self {
            OutputKind::Sdf => "_SDF",
            OutputKind::SdfAlpha => "_SDF_Alpha",
        }
    }
}

/// Decodes the image at `path` into a [`PixelBuffer`].
///
/// Any format supported by the `image` crate works; the image is converted to 8-bit RGBA first.
pub fn read_texture<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, TextureToolsError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PixelBuffer::from_rgba8(
        rgba.as_raw(),
        width as usize,
        height as usize,
    )?)
}

/// Encodes `texture` as an RGBA PNG at `path`, creating parent directories as needed.
pub fn write_texture<P: AsRef<Path>>(
    path: P,
    texture: &PixelBuffer,
) -> Result<(), TextureToolsError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    image::save_buffer_with_format(
        path,
        &texture.to_rgba8(),
        texture.width() as u32,
        texture.height() as u32,
        ColorType::Rgba8,
        ImageFormat::Png,
    )?;

    Ok(())
}

/// The path a generated texture for `source` is written to.
///
/// Outputs are named `<out_dir>/<stem>_SDF.png` or `<out_dir>/<stem>_SDF_Alpha.png`.
pub fn output_path<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    out_dir: Q,
    kind: OutputKind,
) -> Result<PathBuf, TextureToolsError> {
    let source = source.as_ref();
    let stem = source
        .file_stem()
        .ok_or_else(|| TextureToolsError::InvalidPath(source.to_path_buf()))?;

    let mut file_name = stem.to_os_string();
    file_name.push(kind.suffix());
    file_name.push(".png");

    Ok(out_dir.as_ref().join(file_name))
}

/// Renders a single texture from `source` into `out_dir`, returning the path written.
pub fn render_texture_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    out_dir: Q,
    config: &SdfConfig,
    kind: OutputKind,
) -> Result<PathBuf, TextureToolsError> {
    let source = source.as_ref();
    let out_path = output_path(source, out_dir, kind)?;

    let texture = read_texture(source)?;
    let output = match kind {
        OutputKind::Sdf => generate(&texture, config)?,
        OutputKind::SdfAlpha => generate_alpha_mask(&texture, config)?,
    };
    write_texture(&out_path, &output)?;

    info!(
        source = %source.display(),
        output = %out_path.display(),
        "wrote SDF texture"
    );

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{output_path, OutputKind};
    use crate::TextureToolsError;

    #[test]
    fn test_output_path() {
        let out_dir = Path::new("out");
        assert_eq!(
            output_path("icons/star.png", out_dir, OutputKind::Sdf).unwrap(),
            out_dir.join("star_SDF.png")
        );
        assert_eq!(
            output_path("star.tga", out_dir, OutputKind::SdfAlpha).unwrap(),
            out_dir.join("star_SDF_Alpha.png")
        );
        assert!(matches!(
            output_path("", out_dir, OutputKind::Sdf),
            Err(TextureToolsError::InvalidPath(_))
        ));
    }
}
