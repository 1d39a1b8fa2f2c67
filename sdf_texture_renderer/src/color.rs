use std::fmt;
use std::str::FromStr;

use crate::{Rgb, Rgba, SdfTextureError};

/// Controls how the colour channels of the output texture are filled.
///
/// The distance itself always ends up in the alpha channel; the fill mode only decides what
/// travels alongside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Grayscale field: 0 is black, 1 is white.
    #[default]
    SolidWhite,

    /// Inverted grayscale field: 0 is white, 1 is black.
    SolidBlack,

    /// The field as grayscale. Same output as [`FillMode::SolidWhite`].
    SdfGrayscale,

    /// The source texture's colour, untouched.
    SourceRgb,
}

impl FillMode {
    pub const ALL: [FillMode; 4] = [
        FillMode::SolidWhite,
        FillMode::SolidBlack,
        FillMode::SdfGrayscale,
        FillMode::SourceRgb,
    ];

    /// The stable integer code used when persisting the mode.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            FillMode::SolidWhite => 0,
            FillMode::SolidBlack => 1,
            FillMode::SdfGrayscale => 2,
            FillMode::SourceRgb => 3,
        }
    }

    /// Looks up a mode by its integer code. Unknown codes fall back to [`FillMode::SolidWhite`].
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => FillMode::SolidBlack,
            2 => FillMode::SdfGrayscale,
            3 => FillMode::SourceRgb,
            _ => FillMode::SolidWhite,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FillMode::SolidWhite => "solid-white",
            FillMode::SolidBlack => "solid-black",
            FillMode::SdfGrayscale => "sdf",
            FillMode::SourceRgb => "source-rgb",
        }
    }

    #[must_use]
    pub fn color_for(self, sdf: f32, source: Rgba) -> Rgb {
        match self {
            FillMode::SolidWhite | FillMode::SdfGrayscale => Rgb::gray(sdf),
            FillMode::SolidBlack => Rgb::gray(1.0 - sdf),
            FillMode::SourceRgb => source.rgb(),
        }
    }
}

/// Computes the colour channels of an output pixel from its field value and source colour.
#[must_use]
pub fn color_for(fill_mode: FillMode, sdf: f32, source: Rgba) -> Rgb {
    fill_mode.color_for(sdf, source)
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FillMode {
    type Err = SdfTextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FillMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                SdfTextureError::invalid_configuration(format!(
                    "unknown fill mode {s:?}; expected one of solid-white, solid-black, sdf, source-rgb"
                ))
            })
    }
}
