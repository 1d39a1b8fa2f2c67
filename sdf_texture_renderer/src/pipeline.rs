use tracing::debug;

use crate::{
    compute_sdf, compute_sdf_transform, extract_alpha, refine_edges, DistanceStrategy, FillMode,
    PixelBuffer, Rgba, ScalarField, SdfTextureError,
};

/// Everything needed to turn an alpha mask into a distance field texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SdfConfig {
    /// What to put in the colour channels of the output.
    pub fill_mode: FillMode,

    /// How far (in px) inside the outline the field keeps rising before it saturates at 1.
    pub inside_distance: f32,

    /// How far (in px) outside the outline the field keeps falling before it saturates at 0.
    pub outside_distance: f32,

    /// Search radius (in px) of the edge refinement pass. Zero disables the pass.
    pub post_process_radius: f32,

    pub strategy: DistanceStrategy,
}

impl Default for SdfConfig {
    fn default() -> Self {
        SdfConfig {
            fill_mode: FillMode::SolidWhite,
            inside_distance: 8.0,
            outside_distance: 8.0,
            post_process_radius: 0.0,
            strategy: DistanceStrategy::Exhaustive,
        }
    }
}

impl SdfConfig {
    /// Checks that the configuration describes a usable field.
    ///
    /// Both distances are divisors when normalising the field, so they must be strictly
    /// positive.
    pub fn validate(&self) -> Result<(), SdfTextureError> {
        // Written as negated comparisons so that NaN fails as well.
        if !(self.inside_distance > 0.0) {
            return Err(SdfTextureError::invalid_configuration(format!(
                "inside distance must be greater than 0, but {} was provided",
                self.inside_distance
            )));
        }
        if !(self.outside_distance > 0.0) {
            return Err(SdfTextureError::invalid_configuration(format!(
                "outside distance must be greater than 0, but {} was provided",
                self.outside_distance
            )));
        }
        if !(self.post_process_radius >= 0.0 && self.post_process_radius.is_finite()) {
            return Err(SdfTextureError::invalid_configuration(format!(
                "post-process radius must be a finite value of at least 0, but {} was provided",
                self.post_process_radius
            )));
        }

        Ok(())
    }
}

/// Validates `config` and computes the distance field for `source`, including the optional
/// refinement pass.
///
/// This is the shared front half of [`generate`] and [`generate_alpha_mask`]. The returned
/// field has the same dimensions as `source`, with every value in [0, 1]. Empty images have no
/// field to compute and are rejected.
pub fn render_sdf_field(
    source: &PixelBuffer,
    config: &SdfConfig,
) -> Result<ScalarField, SdfTextureError> {
    config.validate()?;
    if source.width() == 0 || source.height() == 0 {
        return Err(SdfTextureError::invalid_configuration(format!(
            "image must not be empty, but is {}x{} px",
            source.width(),
            source.height()
        )));
    }

    let alpha = extract_alpha(source);

    debug!(strategy = ?config.strategy, "computing distance field");
    let mut sdf = match config.strategy {
        DistanceStrategy::Exhaustive => {
            compute_sdf(&alpha, config.inside_distance, config.outside_distance)
        }
        DistanceStrategy::Transform => {
            compute_sdf_transform(&alpha, config.inside_distance, config.outside_distance)
        }
    };

    if config.post_process_radius > 0.0 {
        debug!(radius = config.post_process_radius, "refining edges");
        refine_edges(
            &mut sdf,
            &alpha,
            config.inside_distance,
            config.outside_distance,
            config.post_process_radius,
        );
    }

    Ok(sdf)
}

/// Generates a distance field texture for `source`.
///
/// The field is written to the alpha channel of the output, and the colour channels are filled
/// according to `config.fill_mode`.
#[tracing::instrument(skip_all, fields(width = source.width(), height = source.height()))]
pub fn generate(source: &PixelBuffer, config: &SdfConfig) -> Result<PixelBuffer, SdfTextureError> {
    let sdf = render_sdf_field(source, config)?;

    let pixels = source
        .pixels()
        .iter()
        .zip(sdf.as_slice())
        .map(|(px, sdf)| config.fill_mode.color_for(*sdf, *px).with_alpha(*sdf))
        .collect();

    PixelBuffer::new(pixels, source.width(), source.height())
}

/// Generates a texture that keeps the colour of `source` and replaces its alpha channel with the
/// distance field. `config.fill_mode` is ignored.
#[tracing::instrument(skip_all, fields(width = source.width(), height = source.height()))]
pub fn generate_alpha_mask(
    source: &PixelBuffer,
    config: &SdfConfig,
) -> Result<PixelBuffer, SdfTextureError> {
    let sdf = render_sdf_field(source, config)?;

    let pixels = source
        .pixels()
        .iter()
        .zip(sdf.as_slice())
        .map(|(px, sdf)| Rgba { a: *sdf, ..*px })
        .collect();

    PixelBuffer::new(pixels, source.width(), source.height())
}
