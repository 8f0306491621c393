use crate::edge_color::EdgeColor;
use crate::signed_distance::SignedDistance;
use crate::vector::Vector2;

use super::{mix, non_zero_sign, EdgeSegment};

pub fn direction(p0: Vector2, p1: Vector2, _param: f64) -> Vector2 {
    p1 - p0
}

pub fn direction_change(_p0: Vector2, _p1: Vector2, _param: f64) -> Vector2 {
    Vector2::new(0.0, 0.0)
}

pub fn point(p0: Vector2, p1: Vector2, param: f64) -> Vector2 {
    mix(p0, p1, param)
}

pub fn is_degenerate(p0: Vector2, p1: Vector2) -> bool {
    p0 == p1
}

pub fn find_bounds(p0: Vector2, p1: Vector2, l: &mut f64, b: &mut f64, r: &mut f64, t: &mut f64) {
    Vector2::point_bounds(p0, l, b, r, t);
    Vector2::point_bounds(p1, l, b, r, t);
}

pub fn split_in_thirds(
    p0: Vector2,
    p1: Vector2,
    color: EdgeColor,
) -> (EdgeSegment, EdgeSegment, EdgeSegment) {
    (
        EdgeSegment::new_linear(p0, point(p0, p1, 1.0 / 3.0), color),
        EdgeSegment::new_linear(point(p0, p1, 1.0 / 3.0), point(p0, p1, 2.0 / 3.0), color),
        EdgeSegment::new_linear(point(p0, p1, 2.0 / 3.0), p1, color),
    )
}

pub fn signed_distance(p0: Vector2, p1: Vector2, origin: Vector2) -> (SignedDistance, f64) {
    let aq = origin - p0;
    let ab = p1 - p0;
    let param = Vector2::dot_product(aq, ab) / Vector2::dot_product(ab, ab);

    let eq = (if param > 0.5 { p1 } else { p0 }) - origin;
    let endpoint_distance = eq.length();
    if param > 0.0 && param < 1.0 {
        let ortho_distance = Vector2::dot_product(ab.get_ortho_normal(false, false), aq);
        if ortho_distance.abs() < endpoint_distance {
            return (SignedDistance::new(ortho_distance, 0.0), param);
        }
    }
    (
        SignedDistance::new(
            non_zero_sign(Vector2::cross_product(aq, ab)) as f64 * endpoint_distance,
            Vector2::dot_product(ab.normalize(false), eq.normalize(false)).abs(),
        ),
        param,
    )
}

/// Up to one x-crossing of the horizontal line `y` with this segment, with its
/// winding direction (+1 for downward-to-upward scan direction, -1 otherwise).
pub fn scanline_intersections(p0: Vector2, p1: Vector2, y: f64) -> (i32, [f64; 3], [i32; 3]) {
    let mut x = [0.0; 3];
    let mut dy = [0; 3];
    if (y >= p0.y && y < p1.y) || (y >= p1.y && y < p0.y) {
        let param = (y - p0.y) / (p1.y - p0.y);
        x[0] = p0.x + param * (p1.x - p0.x);
        dy[0] = if p1.y > p0.y { 1 } else { -1 };
        return (1, x, dy);
    }
    (0, x, dy)
}

pub fn move_start_point(p0: &mut Vector2, _p1: Vector2, to: Vector2) {
    *p0 = to;
}

pub fn move_end_point(_p0: Vector2, p1: &mut Vector2, to: Vector2) {
    *p1 = to;
}
