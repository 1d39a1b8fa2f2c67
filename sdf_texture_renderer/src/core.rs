use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::{ScalarField, SdfTextureError};

/// Alpha values at or above this threshold are inside the shape.
pub const ALPHA_THRESHOLD: f32 = 0.5;

/// The field value of a pixel sitting exactly on the shape outline.
pub const EDGE_VALUE: f32 = 0.5;

/// Selects how [`crate::render_sdf_field`] finds the nearest boundary pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceStrategy {
    /// Compares every pixel against every pixel of the opposite class. Exact, but O(n²) in the
    /// number of pixels, so only suitable for small textures.
    #[default]
    Exhaustive,

    /// Runs an exact Euclidean distance transform over each class. Produces the same field as
    /// [`DistanceStrategy::Exhaustive`] in linear time.
    Transform,
}

impl DistanceStrategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DistanceStrategy::Exhaustive => "exhaustive",
            DistanceStrategy::Transform => "transform",
        }
    }
}

impl fmt::Display for DistanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceStrategy {
    type Err = SdfTextureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [DistanceStrategy::Exhaustive, DistanceStrategy::Transform]
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                SdfTextureError::invalid_configuration(format!(
                    "unknown distance strategy {s:?}; expected exhaustive or transform"
                ))
            })
    }
}

/// How a pixel's own alpha value places it relative to the shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Coverage {
    Outside,
    Inside,
    /// Partially covered pixels sit on the outline by definition.
    Edge,
}

impl Coverage {
    pub(crate) fn of(alpha: f32) -> Self {
        if alpha <= 0.0 {
            Coverage::Outside
        } else if alpha >= 1.0 {
            Coverage::Inside
        } else {
            Coverage::Edge
        }
    }
}

/// Returns true when the two alpha values lie on opposite sides of [`ALPHA_THRESHOLD`].
#[must_use]
pub fn crosses_boundary(center_alpha: f32, neighbor_alpha: f32) -> bool {
    (center_alpha < ALPHA_THRESHOLD && neighbor_alpha >= ALPHA_THRESHOLD)
        || (center_alpha >= ALPHA_THRESHOLD && neighbor_alpha < ALPHA_THRESHOLD)
}

/// Maps a distance (in px) to the nearest boundary pixel onto the [0, 1] field range.
///
/// Outside pixels fall from 0.5 towards 0 over `outside_distance` px, inside pixels rise from 0.5
/// towards 1 over `inside_distance` px. Edge pixels are always 0.5.
pub(crate) fn normalize(
    coverage: Coverage,
    distance: f32,
    inside_distance: f32,
    outside_distance: f32,
) -> f32 {
    match coverage {
        Coverage::Outside => (EDGE_VALUE - (distance / outside_distance) * 0.5).clamp(0.0, 1.0),
        Coverage::Inside => (EDGE_VALUE + (distance / inside_distance) * 0.5).clamp(0.0, 1.0),
        Coverage::Edge => EDGE_VALUE,
    }
}

/// Renders a signed distance field for the given alpha mask by searching the entire image for
/// the nearest pixel on the other side of the outline.
///
/// Fully transparent pixels map into [0, 0.5] and fully opaque pixels into [0.5, 1], scaled by
/// `outside_distance` and `inside_distance` respectively. Partially covered pixels are 0.5. If
/// the whole mask sits on one side of the outline there is nothing to measure against, and every
/// pixel is 0.5.
///
/// Both distances must be strictly positive; [`crate::SdfConfig::validate`] checks this.
#[must_use]
pub fn compute_sdf(alpha: &ScalarField, inside_distance: f32, outside_distance: f32) -> ScalarField {
    let width = alpha.width;
    let height = alpha.height;
    let mut values = vec![EDGE_VALUE; width * height];

    if values.is_empty() {
        return ScalarField {
            values,
            width,
            height,
        };
    }

    // Pixels at or above the threshold cross the boundary for every pixel below it, and
    // vice versa.
    let mut above = Vec::new();
    let mut below = Vec::new();
    for (index, a) in alpha.values.iter().enumerate() {
        let point = ((index % width) as f32, (index / width) as f32);
        if *a >= ALPHA_THRESHOLD {
            above.push(point);
        } else if *a < ALPHA_THRESHOLD {
            below.push(point);
        }
    }

    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate() {
                let center = alpha.values[y * width + x];
                let coverage = Coverage::of(center);
                if coverage == Coverage::Edge {
                    continue;
                }

                let candidates = if center < ALPHA_THRESHOLD {
                    &above
                } else {
                    &below
                };
                let distance = nearest_distance(candidates, x as f32, y as f32);
                *value = normalize(coverage, distance, inside_distance, outside_distance);
            }
        });

    ScalarField {
        values,
        width,
        height,
    }
}

/// The Euclidean distance from `(x, y)` to the closest candidate, or 0 when there are none.
fn nearest_distance(candidates: &[(f32, f32)], x: f32, y: f32) -> f32 {
    candidates
        .iter()
        .map(|(nx, ny)| {
            let dx = nx - x;
            let dy = ny - y;
            dx * dx + dy * dy
        })
        .reduce(f32::min)
        .map_or(0.0, f32::sqrt)
}

/// Renders the same field as [`compute_sdf`] using a distance transform instead of an
/// exhaustive search.
///
/// The squared distances produced by the transform are exact integers, so the output matches
/// [`compute_sdf`] bit for bit as long as the squared image diagonal fits in an `f32` mantissa
/// (roughly 2900 px on a side).
#[must_use]
pub fn compute_sdf_transform(
    alpha: &ScalarField,
    inside_distance: f32,
    outside_distance: f32,
) -> ScalarField {
    let width = alpha.width;
    let height = alpha.height;

    // Outside pixels measure against everything at or above the threshold, inside pixels
    // against everything below it.
    let to_above = squared_distances(alpha, |a| a >= ALPHA_THRESHOLD);
    let to_below = squared_distances(alpha, |a| a < ALPHA_THRESHOLD);

    let values = alpha
        .values
        .iter()
        .enumerate()
        .map(|(index, a)| {
            let coverage = Coverage::of(*a);
            let grid = match coverage {
                Coverage::Outside => &to_above,
                Coverage::Inside => &to_below,
                Coverage::Edge => return EDGE_VALUE,
            };
            let distance = grid
                .as_ref()
                .map_or(0.0, |grid| (grid[index] as f32).sqrt());
            normalize(coverage, distance, inside_distance, outside_distance)
        })
        .collect();

    ScalarField {
        values,
        width,
        height,
    }
}

/// Squared Euclidean distance from every pixel to the nearest pixel matching `is_feature`, or
/// `None` if no pixel matches.
fn squared_distances(alpha: &ScalarField, is_feature: impl Fn(f32) -> bool) -> Option<Vec<f64>> {
    let width = alpha.width;
    let height = alpha.height;

    let mut grid: Vec<f64> = alpha
        .values
        .iter()
        .map(|a| if is_feature(*a) { 0.0 } else { f64::MAX })
        .collect();

    if !grid.iter().any(|d| *d == 0.0) {
        return None;
    }

    // Per page 8 (422) of the paper, the 2D distance transform can be obtained by computing the
    // one-dimensional distance transform along each column first and then computing the
    // transform along each row of the result.
    for col in 0..width {
        dt(&mut grid, col, width, height);
    }

    for row in 0..height {
        dt(&mut grid, row * width, 1, width);
    }

    Some(grid)
}

/// An O(n) Euclidean Distance Transform algorithm.
/// See page 6 (420) of [paper](http://cs.brown.edu/people/pfelzens/papers/dt-final.pdf) for details and
/// further discussion of the math behind this.
fn dt(grid: &mut [f64], offset: usize, step_by: usize, size: usize) {
    // f is a one-dimensional slice of the grid
    let f: Vec<f64> = (0..size).map(|i| grid[offset + i * step_by]).collect();

    let mut k = 0;
    let mut v = vec![0; size];
    let mut z = vec![0f64; size + 1];
    let mut s: f64;

    z[0] = f64::MIN;
    z[1] = f64::MAX;

    for q in 1..size {
        loop {
            let q2 = (q * q) as f64;
            let vk2 = (v[k] * v[k]) as f64;
            let denom = (2 * q - 2 * v[k]) as f64;
            s = ((f[q] + q2) - (f[v[k]] + vk2)) / denom;

            if s <= z[k] {
                k -= 1;
            } else {
                k += 1;
                v[k] = q;
                z[k] = s;
                z[k + 1] = f64::MAX;

                break;
            }
        }
    }

    k = 0;
    for q in 0..size {
        let qf64 = q as f64;
        while z[k + 1] < qf64 {
            k += 1;
        }
        let vkf64 = v[k] as f64;
        grid[offset + q * step_by] = (qf64 - vkf64) * (qf64 - vkf64) + f[v[k]];
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_sdf, compute_sdf_transform, crosses_boundary, EDGE_VALUE};
    use crate::ScalarField;

    fn field(values: Vec<f32>, width: usize, height: usize) -> ScalarField {
        ScalarField::new(values, width, height).unwrap()
    }

    /// A filled disc of radius `r` centred in a `size` x `size` image, with a ring of partially
    /// covered pixels around the outline.
    fn disc(size: usize, r: f32) -> ScalarField {
        let c = (size as f32 - 1.0) / 2.0;
        let values = (0..size * size)
            .map(|i| {
                let dx = (i % size) as f32 - c;
                let dy = (i / size) as f32 - c;
                let d = (dx * dx + dy * dy).sqrt();
                if d < r - 0.5 {
                    1.0
                } else if d > r + 0.5 {
                    0.0
                } else {
                    0.6
                }
            })
            .collect();
        field(values, size, size)
    }

    #[test]
    fn test_single_row_fixture() {
        let alpha = field(vec![0.0, 0.0, 1.0, 1.0], 4, 1);
        let sdf = compute_sdf(&alpha, 2.0, 2.0);

        assert_eq!(sdf.as_slice(), &[0.0, 0.25, 0.75, 1.0]);
    }

    #[test]
    fn test_uniform_masks_are_on_the_edge() {
        for value in [0.0, 1.0] {
            let alpha = field(vec![value; 20], 5, 4);
            let sdf = compute_sdf(&alpha, 8.0, 8.0);
            assert!(sdf.as_slice().iter().all(|v| *v == EDGE_VALUE));

            let sdf = compute_sdf_transform(&alpha, 8.0, 8.0);
            assert!(sdf.as_slice().iter().all(|v| *v == EDGE_VALUE));
        }
    }

    #[test]
    fn test_partial_coverage_short_circuits() {
        let alpha = field(vec![0.0, 0.5, 0.999, 0.001, 1.0, 0.5], 3, 2);
        let sdf = compute_sdf(&alpha, 0.1, 100.0);

        assert_eq!(sdf.get(1, 0), EDGE_VALUE);
        assert_eq!(sdf.get(2, 0), EDGE_VALUE);
        assert_eq!(sdf.get(0, 1), EDGE_VALUE);
        assert_eq!(sdf.get(2, 1), EDGE_VALUE);
    }

    #[test]
    fn test_distances_are_euclidean() {
        // A single opaque pixel in the corner of a transparent 4x4 image.
        let mut values = vec![0.0; 16];
        values[0] = 1.0;
        let alpha = field(values, 4, 4);
        let sdf = compute_sdf(&alpha, 1.0, 10.0);

        // The opaque pixel is one px away from its nearest transparent neighbour.
        assert_eq!(sdf.get(0, 0), 1.0);
        assert_eq!(sdf.get(1, 0), 0.5 - 0.05);
        assert_eq!(sdf.get(3, 3), 0.5 - (18f32.sqrt() / 10.0) * 0.5);
    }

    #[test]
    fn test_values_are_clamped() {
        let mut values = vec![0.0; 64 * 2];
        values[0] = 1.0;
        values[64] = 1.0;
        let alpha = field(values, 64, 2);
        let sdf = compute_sdf(&alpha, 0.5, 2.0);

        assert!(sdf.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(sdf.get(63, 0), 0.0);
        assert_eq!(sdf.get(0, 1), 1.0);
    }

    #[test]
    fn test_boundary_predicate() {
        assert!(crosses_boundary(0.0, 0.5));
        assert!(crosses_boundary(0.49, 1.0));
        assert!(crosses_boundary(0.5, 0.49));
        assert!(!crosses_boundary(0.5, 1.0));
        assert!(!crosses_boundary(0.0, 0.49));
        assert!(!crosses_boundary(0.0, f32::NAN));
    }

    #[test]
    fn test_transform_matches_exhaustive_search() {
        let alpha = disc(33, 9.0);
        let exhaustive = compute_sdf(&alpha, 4.0, 12.0);
        let transform = compute_sdf_transform(&alpha, 4.0, 12.0);
        assert_eq!(exhaustive, transform);

        let alpha = field(vec![0.0, 0.0, 1.0, 1.0], 4, 1);
        assert_eq!(
            compute_sdf_transform(&alpha, 2.0, 2.0).as_slice(),
            &[0.0, 0.25, 0.75, 1.0]
        );
    }

    #[test]
    fn test_deterministic() {
        let alpha = disc(24, 7.0);
        assert_eq!(compute_sdf(&alpha, 3.0, 5.0), compute_sdf(&alpha, 3.0, 5.0));
    }

    #[test]
    fn test_empty_field() {
        let alpha = field(Vec::new(), 0, 0);
        assert!(compute_sdf(&alpha, 8.0, 8.0).as_slice().is_empty());
        assert!(compute_sdf_transform(&alpha, 8.0, 8.0).as_slice().is_empty());
    }
}
