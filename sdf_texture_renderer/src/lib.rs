//! This crate turns the alpha channel of a raster image into a signed distance field texture,
//! in the spirit of the alpha-tested magnification technique described by
//! [Valve](https://steamcdn-a.akamaihd.net/apps/valve/2007/SIGGRAPH2007_AlphaTestedMagnification.pdf).
//! The resulting texture can be rendered at any scale with a simple threshold or `smoothstep`
//! in a fragment shader.
//!
//! Every pixel is classified by its alpha value. Fully transparent pixels are outside the shape,
//! fully opaque pixels are inside, and anything in between sits on the outline. The field value
//! of an inside or outside pixel comes from the Euclidean distance to the nearest pixel on the
//! other side of the 0.5 alpha threshold, scaled by a configurable distance so that:
//!
//!   * 0 is at least `outside_distance` px outside the shape,
//!   * 0.5 is on the outline,
//!   * 1 is at least `inside_distance` px inside the shape.
//!
//! The field is stored in the alpha channel of the output, and the colour channels are filled
//! according to a [`FillMode`].
//!
//! By default the nearest boundary pixel is found with an exhaustive search over the whole image,
//! which is exact but quadratic in the number of pixels. For anything larger than an icon, use
//! [`DistanceStrategy::Transform`], which produces the same field using the distance transform
//! described in [this paper](http://cs.brown.edu/people/pfelzens/papers/dt-final.pdf)
//! by Felzenszwalb & Huttenlocher.
//!
//! ```
//! use sdf_texture_renderer::{generate, PixelBuffer, SdfConfig};
//!
//! let mask = PixelBuffer::from_rgba8(&[255, 255, 255, 0, 255, 255, 255, 255], 2, 1).unwrap();
//! let sdf = generate(&mask, &SdfConfig::default()).unwrap();
//! assert_eq!(sdf.to_rgba8(), vec![112, 112, 112, 112, 143, 143, 143, 143]);
//! ```

mod alpha;
pub use crate::alpha::extract_alpha;

mod buffer;
pub use crate::buffer::{PixelBuffer, Rgb, Rgba, ScalarField};

mod color;
pub use crate::color::{color_for, FillMode};

mod core;
pub use crate::core::{
    compute_sdf, compute_sdf_transform, crosses_boundary, DistanceStrategy, ALPHA_THRESHOLD,
    EDGE_VALUE,
};

mod error;
pub use crate::error::SdfTextureError;

mod pipeline;
pub use crate::pipeline::{generate, generate_alpha_mask, render_sdf_field, SdfConfig};

mod refine;
pub use crate::refine::{refine_edges, EDGE_BAND};
