//! Flips pixel signs where the generated SDF/MSDF disagrees with the
//! rasterized scanline fill, per spec.md §4.8. Ported from
//! `original_source/core/rasterization.cpp`'s `distanceSignCorrection`
//! overloads.

use crate::bitmap::Bitmap;
use crate::edge_color::median3;
use crate::projection::Projection;
use crate::scanline::{interpret_fill_rule, FillRule};
use crate::shape::Shape;
use crate::vector::Vector2;

fn output_row(y: usize, height: usize, inverse_y_axis: bool) -> usize {
    if inverse_y_axis {
        height - 1 - y
    } else {
        y
    }
}

/// Single-channel SDF sign correction: where `(sd > 0.5) != fill`, mirrors
/// the distance as `sd <- 1 - sd`.
pub fn distance_sign_correction_sdf(
    bitmap: &mut Bitmap<1>,
    shape: &Shape,
    projection: &Projection,
    fill_rule: FillRule,
) {
    let width = bitmap.width();
    let height = bitmap.height();
    for y in 0..height {
        let row = output_row(y, height, shape.inverse_y_axis);
        let py = projection.unproject_y(y as f64 + 0.5);
        let scanline = shape.scanline(py);
        for x in 0..width {
            let px = projection.unproject_x(x as f64 + 0.5);
            let intersections = scanline.sum_intersections(px);
            let fill = interpret_fill_rule(intersections, fill_rule);
            let mut pixel = bitmap.get_pixel(x, row);
            let sd = pixel[0];
            if (sd > 0.5) != fill {
                pixel[0] = 1.0 - sd;
                bitmap.set_pixel(x, row, pixel);
            }
        }
    }
}

/// Multi-channel sign correction, including the ambiguity-resolution
/// neighbor-voting pass for pixels whose median lands exactly on 0.5 (the
/// signature of a fully-inverted shape). `match_map` is indexed by the
/// plain `(y, x)` traversal order — *not* the row-remapped index used for
/// `inverse_y_axis` — so that neighbor adjacency in the voting pass stays
/// physically meaningful regardless of how rows are written to the bitmap.
pub fn distance_sign_correction_msdf<const N: usize>(
    bitmap: &mut Bitmap<N>,
    shape: &Shape,
    projection: &Projection,
    fill_rule: FillRule,
) {
    let width = bitmap.width();
    let height = bitmap.height();
    if width == 0 || height == 0 {
        return;
    }

    let mut ambiguous = false;
    let mut match_map = vec![0i8; width * height];

    for y in 0..height {
        let row = output_row(y, height, shape.inverse_y_axis);
        let py = projection.unproject_y(y as f64 + 0.5);
        let scanline = shape.scanline(py);
        for x in 0..width {
            let px = projection.unproject_x(x as f64 + 0.5);
            let intersections = scanline.sum_intersections(px);
            let fill = interpret_fill_rule(intersections, fill_rule);
            let mut pixel = bitmap.get_pixel(x, row);
            let sd = median3(pixel[0] as f64, pixel[1] as f64, pixel[2] as f64) as f32;
            let idx = y * width + x;
            if sd == 0.5 {
                ambiguous = true;
            } else if (sd > 0.5) != fill {
                pixel[0] = 1.0 - pixel[0];
                pixel[1] = 1.0 - pixel[1];
                pixel[2] = 1.0 - pixel[2];
                bitmap.set_pixel(x, row, pixel);
                match_map[idx] = -1;
            } else {
                match_map[idx] = 1;
            }
        }
    }

    if ambiguous {
        for y in 0..height {
            let row = output_row(y, height, shape.inverse_y_axis);
            for x in 0..width {
                let idx = y * width + x;
                if match_map[idx] != 0 {
                    continue;
                }
                let mut neighbor_match = 0i32;
                if x > 0 {
                    neighbor_match += match_map[idx - 1] as i32;
                }
                if x + 1 < width {
                    neighbor_match += match_map[idx + 1] as i32;
                }
                if y > 0 {
                    neighbor_match += match_map[idx - width] as i32;
                }
                if y + 1 < height {
                    neighbor_match += match_map[idx + width] as i32;
                }
                if neighbor_match < 0 {
                    let mut pixel = bitmap.get_pixel(x, row);
                    pixel[0] = 1.0 - pixel[0];
                    pixel[1] = 1.0 - pixel[1];
                    pixel[2] = 1.0 - pixel[2];
                    bitmap.set_pixel(x, row, pixel);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn flips_fully_inverted_sdf() {
        let shape = unit_square();
        let projection = Projection::new(Vector2::new(8.0, 8.0), Vector2::new(0.0, 0.0));
        let mut bitmap: Bitmap<1> = Bitmap::new(8, 8);
        // Every pixel wrongly marked "outside" (0.0) regardless of position.
        for y in 0..8 {
            for x in 0..8 {
                bitmap.set_pixel(x, y, [0.0]);
            }
        }
        distance_sign_correction_sdf(&mut bitmap, &shape, &projection, FillRule::NonZero);
        // Interior pixel (3,3) should now read as filled (> 0.5).
        assert!(bitmap.get_pixel(3, 3)[0] > 0.5);
    }

    #[test]
    fn msdf_ambiguity_pass_runs_without_panicking() {
        let shape = unit_square();
        let projection = Projection::new(Vector2::new(8.0, 8.0), Vector2::new(0.0, 0.0));
        let mut bitmap: Bitmap<3> = Bitmap::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                bitmap.set_pixel(x, y, [0.5, 0.5, 0.5]);
            }
        }
        distance_sign_correction_msdf(&mut bitmap, &shape, &projection, FillRule::NonZero);
    }
}
