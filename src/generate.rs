//! Distance-field generator entry points: `generate_sdf`/`generate_psdf`/
//! `generate_msdf`/`generate_mtsdf`, per spec.md §4.6/§6.
//!
//! Each is a thin instantiation of the same generic pixel loop over a
//! different [`EdgeSelector`]. The loop itself mirrors the teacher's
//! `msdf::gen::generate_msdf` row/column structure, generalized to the
//! selector/combiner abstraction and gated on the optional `rayon` feature
//! for row-level parallelism (spec.md §5).

use crate::bitmap::Bitmap;
use crate::contour_combiner::{ContourCombiner, ResolvableDistance};
use crate::edge_color::{MultiAndTrueDistance, MultiDistance};
use crate::edge_selector::{
    EdgeSelector, MultiAndTrueDistanceSelector, MultiDistanceSelector, PseudoDistanceSelector,
    TrueDistanceSelector,
};
use crate::generator_config::GeneratorConfig;
use crate::projection::Projection;
use crate::shape::Shape;
use crate::vector::Vector2;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

fn convert(d: f64, range: f64) -> f32 {
    (d / range + 0.5) as f32
}

/// One pixel's worth of the generic loop body from spec.md §4.6: reset the
/// combiner at the unprojected sample point, feed every contour's edges
/// (with one-edge look-around) through a fresh selector, and merge.
fn sample<S: EdgeSelector>(
    shape: &Shape,
    combiner: &mut ContourCombiner<S>,
    p: Vector2,
) -> S::Distance
where
    S::Distance: ResolvableDistance,
{
    combiner.reset(p);
    for (i, contour) in shape.contours.iter().enumerate() {
        if contour.edges.is_empty() {
            continue;
        }
        let mut selector = S::default();
        selector.reset(p);
        let n = contour.edges.len();
        let mut prev_edge = &contour.edges[if n >= 2 { n - 2 } else { n - 1 }];
        let mut cur_edge = &contour.edges[n - 1];
        for edge in contour.edges.iter() {
            selector.add_edge(prev_edge, cur_edge, edge);
            prev_edge = cur_edge;
            cur_edge = edge;
        }
        combiner.set_contour_edge_selection(i, &selector);
    }
    combiner.distance()
}

/// Maps a pixel row index to the bitmap row it's written to, respecting
/// `shape.inverse_y_axis` (spec.md §4.6: "row order respects inverseYAxis").
fn output_row(y: usize, height: usize, inverse_y_axis: bool) -> usize {
    if inverse_y_axis {
        height - 1 - y
    } else {
        y
    }
}

fn generate_rows<S, F>(
    bitmap: &mut Bitmap<1>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &GeneratorConfig,
    to_pixel: F,
) where
    S: EdgeSelector + Send + Sync,
    S::Distance: ResolvableDistance,
    F: Fn(S::Distance, f64) -> [f32; 1] + Send + Sync,
{
    let width = bitmap.width();
    let height = bitmap.height();
    let overlap_support = config.overlap_support;

    #[cfg(feature = "rayon")]
    {
        let rows: Vec<Vec<[f32; 1]>> = (0..height)
            .into_par_iter()
            .map(|y| {
                let mut combiner: ContourCombiner<S> = ContourCombiner::new(shape, overlap_support);
                let mut row = Vec::with_capacity(width);
                for x in 0..width {
                    let p = projection.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5));
                    let d = sample(shape, &mut combiner, p);
                    row.push(to_pixel(d, range));
                }
                row
            })
            .collect();
        for (y, row) in rows.into_iter().enumerate() {
            let out_y = output_row(y, height, shape.inverse_y_axis);
            for (x, px) in row.into_iter().enumerate() {
                bitmap.set_pixel(x, out_y, px);
            }
        }
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut combiner: ContourCombiner<S> = ContourCombiner::new(shape, overlap_support);
        for y in 0..height {
            let out_y = output_row(y, height, shape.inverse_y_axis);
            for x in 0..width {
                let p = projection.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5));
                let d = sample(shape, &mut combiner, p);
                bitmap.set_pixel(x, out_y, to_pixel(d, range));
            }
        }
    }
}

/// Single-channel true-distance SDF.
pub fn generate_sdf(
    bitmap: &mut Bitmap<1>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &GeneratorConfig,
) {
    generate_rows::<TrueDistanceSelector, _>(bitmap, shape, projection, range, config, |d, r| {
        [convert(d, r)]
    });
}

/// Single-channel pseudo-distance SDF (sharper corners than `generate_sdf`).
pub fn generate_psdf(
    bitmap: &mut Bitmap<1>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &GeneratorConfig,
) {
    generate_rows::<PseudoDistanceSelector, _>(bitmap, shape, projection, range, config, |d, r| {
        [convert(d, r)]
    });
}

/// Three-channel multi-channel SDF.
pub fn generate_msdf(
    bitmap: &mut Bitmap<3>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &GeneratorConfig,
) {
    let width = bitmap.width();
    let height = bitmap.height();
    let overlap_support = config.overlap_support;

    let write = |out_y: usize, x: usize, d: MultiDistance, bitmap: &mut Bitmap<3>| {
        bitmap.set_pixel(
            x,
            out_y,
            [convert(d.r, range), convert(d.g, range), convert(d.b, range)],
        );
    };

    #[cfg(feature = "rayon")]
    {
        let rows: Vec<Vec<MultiDistance>> = (0..height)
            .into_par_iter()
            .map(|y| {
                let mut combiner: ContourCombiner<MultiDistanceSelector> =
                    ContourCombiner::new(shape, overlap_support);
                let mut row = Vec::with_capacity(width);
                for x in 0..width {
                    let p = projection.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5));
                    row.push(sample(shape, &mut combiner, p));
                }
                row
            })
            .collect();
        for (y, row) in rows.into_iter().enumerate() {
            let out_y = output_row(y, height, shape.inverse_y_axis);
            for (x, d) in row.into_iter().enumerate() {
                write(out_y, x, d, bitmap);
            }
        }
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut combiner: ContourCombiner<MultiDistanceSelector> =
            ContourCombiner::new(shape, overlap_support);
        for y in 0..height {
            let out_y = output_row(y, height, shape.inverse_y_axis);
            for x in 0..width {
                let p = projection.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5));
                let d = sample(shape, &mut combiner, p);
                write(out_y, x, d, bitmap);
            }
        }
    }
}

/// Four-channel MSDF + true-distance alpha.
pub fn generate_mtsdf(
    bitmap: &mut Bitmap<4>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &GeneratorConfig,
) {
    let width = bitmap.width();
    let height = bitmap.height();
    let overlap_support = config.overlap_support;

    let write = |out_y: usize, x: usize, d: MultiAndTrueDistance, bitmap: &mut Bitmap<4>| {
        bitmap.set_pixel(
            x,
            out_y,
            [
                convert(d.r, range),
                convert(d.g, range),
                convert(d.b, range),
                convert(d.a, range),
            ],
        );
    };

    #[cfg(feature = "rayon")]
    {
        let rows: Vec<Vec<MultiAndTrueDistance>> = (0..height)
            .into_par_iter()
            .map(|y| {
                let mut combiner: ContourCombiner<MultiAndTrueDistanceSelector> =
                    ContourCombiner::new(shape, overlap_support);
                let mut row = Vec::with_capacity(width);
                for x in 0..width {
                    let p = projection.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5));
                    row.push(sample(shape, &mut combiner, p));
                }
                row
            })
            .collect();
        for (y, row) in rows.into_iter().enumerate() {
            let out_y = output_row(y, height, shape.inverse_y_axis);
            for (x, d) in row.into_iter().enumerate() {
                write(out_y, x, d, bitmap);
            }
        }
    }

    #[cfg(not(feature = "rayon"))]
    {
        let mut combiner: ContourCombiner<MultiAndTrueDistanceSelector> =
            ContourCombiner::new(shape, overlap_support);
        for y in 0..height {
            let out_y = output_row(y, height, shape.inverse_y_axis);
            for x in 0..width {
                let p = projection.unproject(Vector2::new(x as f64 + 0.5, y as f64 + 0.5));
                let d = sample(shape, &mut combiner, p);
                write(out_y, x, d, bitmap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_coloring;

    fn unit_square() -> Shape {
        let mut shape = Shape::new();
        let c = shape.add_contour();
        c.add_line(0.0, 0.0, 1.0, 0.0);
        c.add_line(1.0, 0.0, 1.0, 1.0);
        c.add_line(1.0, 1.0, 0.0, 1.0);
        c.add_line(0.0, 1.0, 0.0, 0.0);
        shape
    }

    #[test]
    fn generate_sdf_is_positive_inside_and_negative_outside() {
        let shape = unit_square();
        let projection = Projection::new(Vector2::new(16.0, 16.0), Vector2::new(0.0, 0.0));
        let mut bitmap: Bitmap<1> = Bitmap::new(16, 16);
        generate_sdf(
            &mut bitmap,
            &shape,
            &projection,
            0.125,
            &GeneratorConfig::default(),
        );
        // Pixel (8,8) center is well inside the square: value clips to ~1.0.
        assert!(bitmap.get_pixel(8, 8)[0] > 0.9);
        // No pixel in this bitmap lies outside the unit square's bounding
        // box scaled to the 16x16 grid, so check a near-corner pixel is
        // still closer to 0.5 than the deep interior.
        assert!(bitmap.get_pixel(8, 8)[0] > bitmap.get_pixel(0, 0)[0]);
    }

    #[test]
    fn generate_msdf_assigns_distinct_channels_near_corner() {
        let mut shape = unit_square();
        edge_coloring::simple(&mut shape, 3.0, 0);
        let projection = Projection::new(Vector2::new(16.0, 16.0), Vector2::new(0.0, 0.0));
        let mut bitmap: Bitmap<3> = Bitmap::new(16, 16);
        generate_msdf(
            &mut bitmap,
            &shape,
            &projection,
            0.125,
            &GeneratorConfig::default(),
        );
        let px = bitmap.get_pixel(0, 15);
        assert!(px[0] != px[1] || px[1] != px[2]);
    }
}
