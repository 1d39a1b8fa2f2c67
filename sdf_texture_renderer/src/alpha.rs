use crate::{PixelBuffer, ScalarField};

/// Pulls the alpha channel out of `source` into a field of the same dimensions.
///
/// The alpha channel is the shape mask: everything else the SDF pipeline computes is derived
/// from this field.
#[must_use]
pub fn extract_alpha(source: &PixelBuffer) -> ScalarField {
    ScalarField {
        values: source.pixels().iter().map(|px| px.a).collect(),
        width: source.width(),
        height: source.height(),
    }
}
