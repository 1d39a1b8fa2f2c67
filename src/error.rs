use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum TextureToolsError {
    #[error("Sub-process error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
    #[error("SDF texture error: {0}")]
    SdfTextureError(#[from] sdf_texture_renderer::SdfTextureError),
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    SettingsError(#[from] serde_json::Error),
    #[error("Path has no file name: {0}")]
    InvalidPath(PathBuf),
}
