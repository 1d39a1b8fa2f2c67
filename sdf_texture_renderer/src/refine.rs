use rayon::prelude::*;

use crate::core::{crosses_boundary, normalize, Coverage, EDGE_VALUE};
use crate::ScalarField;

/// Field values closer than this to [`EDGE_VALUE`] are considered part of the outline band.
pub const EDGE_BAND: f32 = 0.1;

/// Re-measures the distance of every pixel in the outline band, searching only the disc of
/// pixels within `ceil(radius)` px of it.
///
/// Pixels in the band are within a few px of the outline, so a small disc is enough to find
/// the crossing that determines their value. If the disc holds no crossing the pixel keeps its
/// current value, as do partially covered pixels, which sit on the outline by definition.
pub fn refine_edges(
    sdf: &mut ScalarField,
    alpha: &ScalarField,
    inside_distance: f32,
    outside_distance: f32,
    radius: f32,
) {
    let width = sdf.width;
    let height = sdf.height;
    if width == 0 || height == 0 || radius <= 0.0 {
        return;
    }

    // No two pixels are further apart than width + height.
    let radius = (radius.ceil() as usize).min(width + height);

    sdf.values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate() {
                if (*value - EDGE_VALUE).abs() >= EDGE_BAND {
                    continue;
                }

                let coverage = Coverage::of(alpha.get(x, y));
                if coverage == Coverage::Edge {
                    continue;
                }

                if let Some(distance) = windowed_distance(alpha, x, y, radius) {
                    *value = normalize(coverage, distance, inside_distance, outside_distance);
                }
            }
        });
}

/// The distance to the nearest crossing at most `radius` px away from `(x, y)`.
///
/// Only candidates inside the disc of `radius` px count, so any distance found is the true
/// nearest distance.
fn windowed_distance(alpha: &ScalarField, x: usize, y: usize, radius: usize) -> Option<f32> {
    let center = alpha.get(x, y);
    let max_d2 = (radius * radius) as f32;
    let x_range = x.saturating_sub(radius)..=(x + radius).min(alpha.width - 1);
    let y_range = y.saturating_sub(radius)..=(y + radius).min(alpha.height - 1);

    let mut nearest: Option<f32> = None;
    for ny in y_range {
        for nx in x_range.clone() {
            if (nx, ny) == (x, y) || !crosses_boundary(center, alpha.get(nx, ny)) {
                continue;
            }

            let dx = nx as f32 - x as f32;
            let dy = ny as f32 - y as f32;
            let d2 = dx * dx + dy * dy;
            if d2 > max_d2 {
                continue;
            }
            nearest = Some(nearest.map_or(d2, |n| n.min(d2)));
        }
    }

    nearest.map(f32::sqrt)
}

#[cfg(test)]
mod tests {
    use super::refine_edges;
    use crate::{compute_sdf, ScalarField};

    fn field(values: Vec<f32>, width: usize, height: usize) -> ScalarField {
        ScalarField::new(values, width, height).unwrap()
    }

    #[test]
    fn test_refinement_agrees_with_exhaustive_search() {
        let size = 16;
        let values = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if (4..11).contains(&x) && (3..9).contains(&y) {
                    1.0
                } else if x == 11 {
                    0.3
                } else {
                    0.0
                }
            })
            .collect();
        let alpha = field(values, size, size);

        // Wide ranges put many pixels in the outline band.
        let sdf = compute_sdf(&alpha, 30.0, 30.0);
        let mut refined = sdf.clone();
        refine_edges(&mut refined, &alpha, 30.0, 30.0, 2.5);

        assert_eq!(refined, sdf);
    }

    #[test]
    fn test_refinement_rewrites_band_pixels() {
        // A stale field that disagrees with the mask: the refiner should correct the pixels that
        // fall within the band and leave the rest alone.
        let alpha = field(vec![0.0, 0.0, 1.0, 1.0, 0.5], 5, 1);
        let mut sdf = field(vec![0.45, 0.55, 0.45, 0.9, 0.45], 5, 1);
        refine_edges(&mut sdf, &alpha, 10.0, 10.0, 1.0);

        // Pixel 0 has no crossing within one px, so it keeps its stale value.
        assert_eq!(sdf.get(0, 0), 0.45);
        assert_eq!(sdf.get(1, 0), 0.5 - (1.0f32 / 10.0) * 0.5);
        assert_eq!(sdf.get(2, 0), 0.5 + (1.0f32 / 10.0) * 0.5);
        assert_eq!(sdf.get(3, 0), 0.9);
        assert_eq!(sdf.get(4, 0), 0.45);
    }

    #[test]
    fn test_radius_larger_than_image() {
        let alpha = field(vec![0.0, 1.0], 2, 1);
        let sdf = compute_sdf(&alpha, 1.0, 1.0);
        let mut refined = sdf.clone();
        refine_edges(&mut refined, &alpha, 1.0, 1.0, 1e10);
        assert_eq!(refined, sdf);

        // The only crossing for the top left pixel is the opposite corner.
        let mut values = vec![0.0; 9];
        values[8] = 1.0;
        let alpha = field(values, 3, 3);
        let mut sdf = field(vec![0.45; 9], 3, 3);
        refine_edges(&mut sdf, &alpha, 100.0, 100.0, 1e10);
        assert_eq!(sdf.get(0, 0), 0.5 - (8f32.sqrt() / 100.0) * 0.5);
    }

    #[test]
    fn test_zero_radius_is_a_no_op() {
        let alpha = field(vec![0.0, 1.0], 2, 1);
        let mut sdf = field(vec![0.45, 0.55], 2, 1);
        refine_edges(&mut sdf, &alpha, 1.0, 1.0, 0.0);
        assert_eq!(sdf.as_slice(), &[0.45, 0.55]);
    }
}
