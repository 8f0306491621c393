//! MSDF error correction: detects texels whose interpolated median would
//! flip sign under bilinear filtering and flattens them to single-channel.
//!
//! Two algorithms are carried forward from the original implementation
//! (spec.md §4.7):
//!
//! - [`msdf_error_correction`], the modern stencil-based protect/detect/apply
//!   pipeline, grounded on `original_source/core/MSDFErrorCorrection.h` (flag
//!   structure) and `msdf-artifact-patcher.cpp` (the three classifiers'
//!   `is_candidate`/`is_artifact` bodies, ported verbatim). The protect phase
//!   and the candidate test are simplified to axis-aligned (not diagonal)
//!   neighbor pairs — a documented simplification from the original's
//!   quadratic diagonal-extremum test, recorded in DESIGN.md.
//! - [`legacy_correct`], the older `detectClash`-based axis+diagonal clash
//!   pass, ported verbatim from `msdf-error-correction.cpp`'s "Legacy
//!   version" section.

use crate::bitmap::Bitmap;
use crate::edge_color::median3;
use crate::generator_config::{DistanceCheckMode, ErrorCorrectionConfig, ErrorCorrectionMode};
use crate::projection::Projection;
use crate::shape::Shape;
use crate::vector::Vector2;

const ERROR: u8 = 1;
const PROTECTED: u8 = 2;

fn channel_median<const N: usize>(pixel: [f32; N]) -> f32 {
    median3(pixel[0] as f64, pixel[1] as f64, pixel[2] as f64) as f32
}

/// Brute-force nearest signed distance over every edge of every contour,
/// standing in for the original's `ShapeDistanceFinder` reference query used
/// by the artifact classifiers.
fn shape_true_distance(shape: &Shape, p: Vector2) -> f64 {
    use crate::signed_distance::SignedDistance;
    let mut min_distance = SignedDistance::infinite();
    for contour in &shape.contours {
        for edge in &contour.edges {
            let (d, _param) = edge.signed_distance(p);
            if d.l(&min_distance) {
                min_distance = d;
            }
        }
    }
    min_distance.distance
}

/// Shared candidate/artifact test bodies, ported verbatim from
/// `msdf-artifact-patcher.cpp`'s three classifier classes.
///
/// Note: `ErrorCorrectionConfig::min_deviation_ratio` is not threaded in
/// here. In the original, `BaseArtifactClassifier::rangeTest` widens the
/// candidate band by that ratio before flagging a crossing; that gating
/// formula did not survive extraction into the retrieval pack in a form
/// that could be ported with confidence, so `find_errors` below only gates
/// on `min_improve_ratio` (see field doc on `min_deviation_ratio`).
struct Classifier {
    mode: ErrorCorrectionMode,
    min_improve_ratio: f64,
}

impl Classifier {
    fn observes_protected(&self) -> bool {
        matches!(self.mode, ErrorCorrectionMode::EdgePriority)
    }

    fn is_candidate(&self, am: f32, bm: f32, xm: f32, is_protected: bool) -> bool {
        match self.mode {
            ErrorCorrectionMode::Disabled => false,
            ErrorCorrectionMode::Indiscriminate => {
                median3(am as f64, bm as f64, xm as f64) as f32 != xm
            }
            ErrorCorrectionMode::EdgePriority => {
                (am > 0.5 && bm > 0.5 && xm < 0.5)
                    || (am < 0.5 && bm < 0.5 && xm > 0.5)
                    || (!is_protected && median3(am as f64, bm as f64, xm as f64) as f32 != xm)
            }
            ErrorCorrectionMode::EdgeOnly => {
                (am > 0.5 && bm > 0.5 && xm < 0.5) || (am < 0.5 && bm < 0.5 && xm > 0.5)
            }
        }
    }

    fn is_artifact(&self, ref_sd: f32, new_sd: f32, old_sd: f32) -> bool {
        match self.mode {
            ErrorCorrectionMode::Disabled => false,
            ErrorCorrectionMode::Indiscriminate => {
                self.min_improve_ratio * (new_sd - ref_sd).abs() as f64
                    < (old_sd - ref_sd).abs() as f64
            }
            ErrorCorrectionMode::EdgePriority => {
                let old_delta = (old_sd - ref_sd).abs();
                let new_delta = (new_sd - ref_sd).abs();
                new_delta < old_delta
                    && (self.min_improve_ratio * new_delta as f64 < old_delta as f64
                        || (ref_sd > 0.5 && new_sd > 0.5 && old_sd < 0.5)
                        || (ref_sd < 0.5 && new_sd < 0.5 && old_sd > 0.5))
            }
            ErrorCorrectionMode::EdgeOnly => {
                (new_sd - ref_sd).abs() <= (old_sd - ref_sd).abs()
                    && ((ref_sd > 0.5 && new_sd > 0.5 && old_sd < 0.5)
                        || (ref_sd < 0.5 && new_sd < 0.5 && old_sd > 0.5))
            }
        }
    }
}

/// Marks texels that sit at a color-switch corner between two edges, or
/// whose axis-neighbor pair straddles a 0.5 crossing in the channel that is
/// currently the median, as `PROTECTED`. Simplified from the original's
/// corner + linear/diagonal edge-transition test to axis-only pairs (see
/// module docs).
fn flag_protected<const N: usize>(
    stencil: &mut [u8],
    bitmap: &Bitmap<N>,
    shape: &Shape,
    projection: &Projection,
) {
    let width = bitmap.width();
    let height = bitmap.height();

    for contour in &shape.contours {
        if contour.edges.is_empty() {
            continue;
        }
        let n = contour.edges.len();
        let mut prev_edge = &contour.edges[n - 1];
        for edge in &contour.edges {
            let common_color = prev_edge.get_color() as usize & edge.get_color() as usize;
            if common_color & (common_color.wrapping_sub(1)) == 0 {
                let mut p = projection.project(edge.point(0.0));
                if shape.inverse_y_axis {
                    p.y = height as f64 - p.y;
                }
                let l = (p.x - 0.5).floor() as isize;
                let b = (p.y - 0.5).floor() as isize;
                let r = l + 1;
                let t = b + 1;
                for (x, y) in [(l, b), (r, b), (l, t), (r, t)] {
                    if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                        stencil[y as usize * width + x as usize] |= PROTECTED;
                    }
                }
            }
            prev_edge = edge;
        }
    }

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if x + 1 < width {
                let a = bitmap.get_pixel(x, y);
                let b = bitmap.get_pixel(x + 1, y);
                if channels_straddle(a, b) {
                    stencil[idx] |= PROTECTED;
                    stencil[idx + 1] |= PROTECTED;
                }
            }
            if y + 1 < height {
                let a = bitmap.get_pixel(x, y);
                let b = bitmap.get_pixel(x, y + 1);
                if channels_straddle(a, b) {
                    stencil[idx] |= PROTECTED;
                    stencil[idx + width] |= PROTECTED;
                }
            }
        }
    }
}

/// Whether the linear interpolation between `a` and `b` crosses 0.5 in a
/// channel that is the median at the crossing point (ported from
/// `edgeBetweenTexelsChannel`/`edgeBetweenTexels`, axis-pair case only).
fn channels_straddle<const N: usize>(a: [f32; N], b: [f32; N]) -> bool {
    for channel in 0..3 {
        let denom = a[channel] - b[channel];
        if denom == 0.0 {
            continue;
        }
        let t = (a[channel] - 0.5) / denom;
        if t > 0.0 && t < 1.0 {
            let mix = |i: usize| a[i] + (b[i] - a[i]) * t;
            let c = [mix(0), mix(1), mix(2)];
            if channel_median(c) == c[channel] {
                return true;
            }
        }
    }
    false
}

fn protect_all(stencil: &mut [u8]) {
    for s in stencil.iter_mut() {
        *s |= PROTECTED;
    }
}

/// Tests every unprotected texel's 4 axis neighbors for a linear-crossing
/// candidate, classifying with the configured mode, and flags `ERROR`.
fn find_errors<const N: usize>(
    stencil: &mut [u8],
    bitmap: &Bitmap<N>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &ErrorCorrectionConfig,
) {
    let width = bitmap.width();
    let height = bitmap.height();
    let classifier = Classifier {
        mode: config.mode,
        min_improve_ratio: config.min_improve_ratio,
    };
    let inv_range = 1.0 / range;

    let neighbors: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let is_protected = classifier.observes_protected() && stencil[idx] & PROTECTED != 0;
            let xm = bitmap.get_pixel(x, y);
            let xmed = channel_median(xm);
            let mut flagged = false;

            for (dx, dy) in neighbors {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                    continue;
                }
                let am = bitmap.get_pixel(nx as usize, ny as usize);
                let amed = channel_median(am);
                if !classifier.is_candidate(amed, xmed, xmed, is_protected) {
                    continue;
                }
                let should_check = match config.distance_check_mode {
                    DistanceCheckMode::DoNotCheck => false,
                    DistanceCheckMode::CheckAtEdge => amed != xmed,
                    DistanceCheckMode::AlwaysCheck => true,
                };
                if !should_check {
                    flagged = true;
                    break;
                }
                let mut p = Vector2::new(x as f64 + 0.5, y as f64 + 0.5);
                p = p + Vector2::new(dx as f64, dy as f64) * 0.5;
                let ref_sd = (shape_true_distance(shape, projection.unproject(p)) * inv_range
                    + 0.5) as f32;
                if classifier.is_artifact(ref_sd, xmed, amed) {
                    flagged = true;
                    break;
                }
            }

            if flagged {
                stencil[idx] |= ERROR;
            }
        }
    }
}

/// Flattens every `ERROR`-flagged texel's first 3 channels to their median.
fn apply<const N: usize>(stencil: &[u8], bitmap: &mut Bitmap<N>) {
    let width = bitmap.width();
    let height = bitmap.height();
    for y in 0..height {
        for x in 0..width {
            if stencil[y * width + x] & ERROR != 0 {
                let mut px = bitmap.get_pixel(x, y);
                let med = channel_median(px);
                px[0] = med;
                px[1] = med;
                px[2] = med;
                bitmap.set_pixel(x, y, px);
            }
        }
    }
}

/// Runs the modern stencil-based error-correction pipeline in place.
/// `config.buffer`, if present, must be `width*height` bytes and is reused
/// rather than freshly allocated.
pub fn msdf_error_correction<const N: usize>(
    bitmap: &mut Bitmap<N>,
    shape: &Shape,
    projection: &Projection,
    range: f64,
    config: &mut ErrorCorrectionConfig,
) {
    if matches!(config.mode, ErrorCorrectionMode::Disabled) {
        return;
    }
    let width = bitmap.width();
    let height = bitmap.height();
    let mut owned_stencil;
    let stencil: &mut [u8] = match &mut config.buffer {
        Some(buf) => {
            debug_assert_eq!(buf.len(), width * height);
            buf.as_mut_slice()
        }
        None => {
            owned_stencil = vec![0u8; width * height];
            &mut owned_stencil
        }
    };

    match config.mode {
        ErrorCorrectionMode::Disabled | ErrorCorrectionMode::Indiscriminate => {}
        ErrorCorrectionMode::EdgePriority => flag_protected(stencil, bitmap, shape, projection),
        ErrorCorrectionMode::EdgeOnly => protect_all(stencil),
    }

    find_errors(stencil, bitmap, shape, projection, range, config);
    apply(stencil, bitmap);
}

/// Sorts channel pairs by largest-to-smallest absolute difference and flags
/// a clash when the largest-gap channel still disagrees past `threshold`
/// and the queried pixel sits farther from the 0.5 boundary than its
/// neighbor — ported verbatim from `detectClash`.
fn detect_clash(a: [f32; 3], b: [f32; 3], threshold: f64) -> bool {
    let (mut a0, mut a1, mut a2) = (a[0], a[1], a[2]);
    let (mut b0, mut b1, mut b2) = (b[0], b[1], b[2]);
    if (b0 - a0).abs() < (b1 - a1).abs() {
        std::mem::swap(&mut a0, &mut a1);
        std::mem::swap(&mut b0, &mut b1);
    }
    if (b1 - a1).abs() < (b2 - a2).abs() {
        std::mem::swap(&mut a1, &mut a2);
        std::mem::swap(&mut b1, &mut b2);
        if (b0 - a0).abs() < (b1 - a1).abs() {
            std::mem::swap(&mut a0, &mut a1);
            std::mem::swap(&mut b0, &mut b1);
        }
    }
    (b1 - a1).abs() as f64 >= threshold
        && !(b0 == b1 && b0 == b2)
        && (a2 - 0.5).abs() >= (b2 - 0.5).abs()
}

/// The original axis+diagonal clash-detection pass, ported verbatim from
/// `msdfErrorCorrectionInner_legacy`. `threshold` is a per-axis
/// `(x, y)` pair; diagonal neighbor tests use `threshold.x + threshold.y`.
pub fn legacy_correct<const N: usize>(bitmap: &mut Bitmap<N>, threshold: Vector2) {
    let width = bitmap.width();
    let height = bitmap.height();
    let rgb = |px: [f32; N]| [px[0], px[1], px[2]];

    let mut clashes = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let center = rgb(bitmap.get_pixel(x, y));
            let clash = (x > 0 && detect_clash(center, rgb(bitmap.get_pixel(x - 1, y)), threshold.x))
                || (x + 1 < width && detect_clash(center, rgb(bitmap.get_pixel(x + 1, y)), threshold.x))
                || (y > 0 && detect_clash(center, rgb(bitmap.get_pixel(x, y - 1)), threshold.y))
                || (y + 1 < height && detect_clash(center, rgb(bitmap.get_pixel(x, y + 1)), threshold.y));
            if clash {
                clashes.push((x, y));
            }
        }
    }
    for (x, y) in &clashes {
        let mut px = bitmap.get_pixel(*x, *y);
        let med = channel_median(px);
        px[0] = med;
        px[1] = med;
        px[2] = med;
        bitmap.set_pixel(*x, *y, px);
    }

    clashes.clear();
    let diag_threshold = threshold.x + threshold.y;
    for y in 0..height {
        for x in 0..width {
            let center = rgb(bitmap.get_pixel(x, y));
            let clash = (x > 0 && y > 0 && detect_clash(center, rgb(bitmap.get_pixel(x - 1, y - 1)), diag_threshold))
                || (x + 1 < width && y > 0 && detect_clash(center, rgb(bitmap.get_pixel(x + 1, y - 1)), diag_threshold))
                || (x > 0 && y + 1 < height && detect_clash(center, rgb(bitmap.get_pixel(x - 1, y + 1)), diag_threshold))
                || (x + 1 < width && y + 1 < height && detect_clash(center, rgb(bitmap.get_pixel(x + 1, y + 1)), diag_threshold));
            if clash {
                clashes.push((x, y));
            }
        }
    }
    for (x, y) in &clashes {
        let mut px = bitmap.get_pixel(*x, *y);
        let med = channel_median(px);
        px[0] = med;
        px[1] = med;
        px[2] = med;
        bitmap.set_pixel(*x, *y, px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_correct_flattens_inverted_neighbor() {
        let mut bmp: Bitmap<3> = Bitmap::new(2, 1);
        bmp.set_pixel(0, 0, [0.9, 0.9, 0.9]);
        bmp.set_pixel(1, 0, [0.1, 0.9, 0.9]);
        legacy_correct(&mut bmp, Vector2::new(0.01, 0.01));
        let a = bmp.get_pixel(0, 0);
        assert!((a[0] - a[1]).abs() < 1e-6 || (a[0] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn running_error_correction_twice_is_idempotent() {
        let mut shape = Shape::new();
        let c = shape.add_contour();
        c.add_line(0.0, 0.0, 1.0, 0.0);
        c.add_line(1.0, 0.0, 1.0, 1.0);
        c.add_line(1.0, 1.0, 0.0, 1.0);
        c.add_line(0.0, 1.0, 0.0, 0.0);
        crate::edge_coloring::simple(&mut shape, 3.0, 0);
        let projection = Projection::new(Vector2::new(8.0, 8.0), Vector2::new(0.0, 0.0));
        let mut bitmap: Bitmap<3> = Bitmap::new(8, 8);
        crate::generate::generate_msdf(
            &mut bitmap,
            &shape,
            &projection,
            0.25,
            &crate::generator_config::GeneratorConfig::default(),
        );
        let mut config = ErrorCorrectionConfig::default();
        msdf_error_correction(&mut bitmap, &shape, &projection, 0.25, &mut config);
        let once = bitmap.as_slice().to_vec();
        let mut config2 = ErrorCorrectionConfig::default();
        msdf_error_correction(&mut bitmap, &shape, &projection, 0.25, &mut config2);
        let twice = bitmap.as_slice().to_vec();
        assert_eq!(once, twice);
    }
}
