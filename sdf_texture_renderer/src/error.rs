use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdfTextureError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid bitmap dimensions: The data length must be equal to {0} = {1}, but is equal to {2}.")]
    InvalidDataDimensions(&'static str, usize, usize),
}

impl SdfTextureError {
    pub(crate) fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
