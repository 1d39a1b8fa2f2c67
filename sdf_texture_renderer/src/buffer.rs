use crate::SdfTextureError;

/// A single RGBA pixel with every channel in the range [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// The colour channels of this pixel, without alpha.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// The colour channels of an output pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    #[must_use]
    pub const fn gray(value: f32) -> Self {
        Rgb::new(value, value, value)
    }

    /// Combines these colour channels with an alpha value into a full pixel.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// A decoded raster image, flattened row by row into a 1D array of pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<Rgba>,

    /// The width of the image in px.
    width: usize,

    /// The height of the image in px.
    height: usize,
}

impl PixelBuffer {
    /// Creates a new buffer from a row-major pixel array.
    ///
    /// The dimensions provided are expected to describe the input data.
    pub fn new(pixels: Vec<Rgba>, width: usize, height: usize) -> Result<Self, SdfTextureError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(SdfTextureError::InvalidDataDimensions(
                "width * height",
                expected,
                pixels.len(),
            ));
        }

        Ok(PixelBuffer {
            pixels,
            width,
            height,
        })
    }

    /// Creates a new buffer from interleaved 8-bit RGBA data, which is what most image
    /// decoders hand back.
    pub fn from_rgba8(data: &[u8], width: usize, height: usize) -> Result<Self, SdfTextureError> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(SdfTextureError::InvalidDataDimensions(
                "width * height * 4",
                expected,
                data.len(),
            ));
        }

        let pixels = data
            .chunks_exact(4)
            .map(|px| {
                Rgba::new(
                    f32::from(px[0]) / 255.0,
                    f32::from(px[1]) / 255.0,
                    f32::from(px[2]) / 255.0,
                    f32::from(px[3]) / 255.0,
                )
            })
            .collect();

        Ok(PixelBuffer {
            pixels,
            width,
            height,
        })
    }

    /// Quantises the buffer back into interleaved 8-bit RGBA.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            data.extend_from_slice(&[
                channel_to_u8(px.r),
                channel_to_u8(px.g),
                channel_to_u8(px.b),
                channel_to_u8(px.a),
            ]);
        }
        data
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }
}

fn channel_to_u8(value: f32) -> u8 {
    // Casting from a float to an integer saturates, and NaN becomes zero.
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A grid of single precision values sharing the dimensions of the image it was derived from.
///
/// Values are stored row by row, so the value for `(x, y)` lives at `y * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    pub(crate) values: Vec<f32>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl ScalarField {
    pub fn new(values: Vec<f32>, width: usize, height: usize) -> Result<Self, SdfTextureError> {
        let expected = width * height;
        if values.len() != expected {
            return Err(SdfTextureError::InvalidDataDimensions(
                "width * height",
                expected,
                values.len(),
            ));
        }

        Ok(ScalarField {
            values,
            width,
            height,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelBuffer, Rgba, ScalarField};
    use crate::SdfTextureError;

    #[test]
    fn test_rejects_mismatched_dimensions() {
        let result = PixelBuffer::new(vec![Rgba::default(); 5], 2, 3);
        assert!(matches!(
            result,
            Err(SdfTextureError::InvalidDataDimensions(_, 6, 5))
        ));

        let result = PixelBuffer::from_rgba8(&[0; 7], 1, 2);
        assert!(matches!(
            result,
            Err(SdfTextureError::InvalidDataDimensions(_, 8, 7))
        ));

        assert!(ScalarField::new(vec![0.0; 3], 2, 2).is_err());
    }

    #[test]
    fn test_rgba8_conversion() {
        let data = [255, 0, 51, 128, 0, 255, 255, 255];
        let buffer = PixelBuffer::from_rgba8(&data, 2, 1).unwrap();

        assert_eq!(buffer.get(0, 0), Rgba::new(1.0, 0.0, 0.2, 128.0 / 255.0));
        assert_eq!(buffer.get(1, 0).a, 1.0);
        assert_eq!(buffer.to_rgba8(), data);
    }

    #[test]
    fn test_to_rgba8_clamps_out_of_range_channels() {
        let buffer = PixelBuffer::new(vec![Rgba::new(-0.5, 1.5, f32::NAN, 0.5)], 1, 1).unwrap();
        assert_eq!(buffer.to_rgba8(), vec![0, 255, 0, 128]);
    }
}
