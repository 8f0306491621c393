use crate::edge_color::EdgeColor;
use crate::equation_solver::{self, fabs};
use crate::signed_distance::SignedDistance;
use crate::vector::Vector2;

use super::{mix, non_zero_sign, EdgeSegment};

pub const MSDFGEN_CUBIC_SEARCH_STARTS: usize = 4;
pub const MSDFGEN_CUBIC_SEARCH_STEPS: usize = 4;

pub fn direction(p0: Vector2, p1: Vector2, p2: Vector2, p3: Vector2, param: f64) -> Vector2 {
    let tangent = mix(
        mix(p1 - p0, p2 - p1, param),
        mix(p2 - p1, p3 - p2, param),
        param,
    );
    if !tangent.is_zero() {
        if param == 0.0 {
            return p2 - p0;
        }
        if param == 1.0 {
            return p3 - p1;
        }
    }
    tangent
}

pub fn direction_change(p0: Vector2, p1: Vector2, p2: Vector2, p3: Vector2, param: f64) -> Vector2 {
    let ab = p1 - p0;
    let br = p2 - p1 - ab;
    let as_ = (p3 - p2) - (p2 - p1) - br;
    mix(br, as_, param) * 2.0
}

pub fn point(p0: Vector2, p1: Vector2, p2: Vector2, p3: Vector2, param: f64) -> Vector2 {
    let p12 = mix(p1, p2, param);
    mix(
        mix(mix(p0, p1, param), p12, param),
        mix(p12, mix(p2, p3, param), param),
        param,
    )
}

pub fn is_degenerate(p0: Vector2, p1: Vector2, p2: Vector2, p3: Vector2) -> bool {
    let d0 = direction(p0, p1, p2, p3, 0.0);
    let d1 = direction(p0, p1, p2, p3, 1.0);
    d0.is_zero() && d1.is_zero()
}

pub fn find_bounds(
    p0: Vector2,
    p1: Vector2,
    p2: Vector2,
    p3: Vector2,
    l: &mut f64,
    b: &mut f64,
    r: &mut f64,
    t: &mut f64,
) {
    Vector2::point_bounds(p0, l, b, r, t);
    Vector2::point_bounds(p3, l, b, r, t);

    let a0 = p1 - p0;
    let a1 = 2.0 * (p2 - p1 - a0);
    let a2 = p3 - 3.0 * p2 + 3.0 * p1 - p0;

    let (solutions, result) = equation_solver::solve_quadratic(a2.x, a1.x, a0.x);
    for i in 0..solutions {
        let par = result[i as usize];
        if par > 0.0 && par < 1.0 {
            Vector2::point_bounds(point(p0, p1, p2, p3, par), l, b, r, t);
        }
    }

    let (solutions, result) = equation_solver::solve_quadratic(a2.y, a1.y, a0.y);
    for i in 0..solutions {
        let par = result[i as usize];
        if par > 0.0 && par < 1.0 {
            Vector2::point_bounds(point(p0, p1, p2, p3, par), l, b, r, t);
        }
    }
}

pub fn split_in_thirds(
    p0: Vector2,
    p1: Vector2,
    p2: Vector2,
    p3: Vector2,
    color: EdgeColor,
) -> (EdgeSegment, EdgeSegment, EdgeSegment) {
    (
        EdgeSegment::new_cubic(
            p0,
            if p0 == p1 { p0 } else { mix(p0, p1, 1.0 / 3.0) },
            mix(mix(p0, p1, 1.0 / 3.0), mix(p1, p2, 1.0 / 3.0), 1.0 / 3.0),
            point(p0, p1, p2, p3, 1.0 / 3.0),
            color,
        ),
        EdgeSegment::new_cubic(
            point(p0, p1, p2, p3, 1.0 / 3.0),
            mix(
                mix(mix(p0, p1, 1.0 / 3.0), mix(p1, p2, 1.0 / 3.0), 1.0 / 3.0),
                mix(mix(p1, p2, 1.0 / 3.0), mix(p2, p3, 1.0 / 3.0), 1.0 / 3.0),
                2.0 / 3.0,
            ),
            mix(
                mix(mix(p0, p1, 2.0 / 3.0), mix(p1, p2, 2.0 / 3.0), 2.0 / 3.0),
                mix(mix(p1, p2, 2.0 / 3.0), mix(p2, p3, 2.0 / 3.0), 2.0 / 3.0),
                1.0 / 3.0,
            ),
            point(p0, p1, p2, p3, 2.0 / 3.0),
            color,
        ),
        EdgeSegment::new_cubic(
            point(p0, p1, p2, p3, 2.0 / 3.0),
            mix(mix(p1, p2, 2.0 / 3.0), mix(p2, p3, 2.0 / 3.0), 2.0 / 3.0),
            if p2 == p3 { p3 } else { mix(p2, p3, 2.0 / 3.0) },
            p3,
            color,
        ),
    )
}

pub fn signed_distance(
    p0: Vector2,
    p1: Vector2,
    p2: Vector2,
    p3: Vector2,
    origin: Vector2,
) -> (SignedDistance, f64) {
    let qa = p0 - origin;
    let ab = p1 - p0;
    let br = p2 - p1 - ab;
    let as_ = (p3 - p2) - (p2 - p1) - br;
    let mut ep_dir = direction(p0, p1, p2, p3, 0.0);

    let mut min_distance = non_zero_sign(Vector2::cross_product(ep_dir, qa)) as f64 * qa.length();
    let mut param = -Vector2::dot_product(qa, ep_dir) / Vector2::dot_product(ep_dir, ep_dir);
    {
        ep_dir = direction(p0, p1, p2, p3, 1.0);
        let distance = (p3 - origin).length();
        if distance.abs() < min_distance.abs() {
            min_distance =
                non_zero_sign(Vector2::cross_product(ep_dir, p3 - origin)) as f64 * distance;
            param = Vector2::dot_product(ep_dir - (p3 - origin), ep_dir)
                / Vector2::dot_product(ep_dir, ep_dir);
        }
    }

    // Evenly-spaced starting points in [0, 1] (including both endpoints)
    // refined by a few Newton-Raphson steps each; the exact count/spacing is
    // part of the generator's output determinism (spec §9), so
    // MSDFGEN_CUBIC_SEARCH_STARTS/STEPS must not change.
    for i in 0..=MSDFGEN_CUBIC_SEARCH_STARTS {
        let mut t = i as f64 / MSDFGEN_CUBIC_SEARCH_STARTS as f64;
        let mut qe = qa + 3.0 * t * ab + 3.0 * t * t * br + t * t * t * as_;
        for _ in 0..MSDFGEN_CUBIC_SEARCH_STEPS {
            let d1 = 3.0 * ab + 6.0 * t * br + 3.0 * t * t * as_;
            let d2 = 6.0 * br + 6.0 * t * as_;
            t -= Vector2::dot_product(qe, d1)
                / (Vector2::dot_product(d1, d1) + Vector2::dot_product(qe, d2));

            if !(0.0..=1.0).contains(&t) {
                break;
            }

            qe = qa + 3.0 * t * ab + 3.0 * t * t * br + t * t * t * as_;
            let distance = qe.length();
            if distance < min_distance.abs() {
                min_distance = non_zero_sign(Vector2::cross_product(d1, qe)) as f64 * distance;
                param = t;
            }
        }
    }

    if (0.0..=1.0).contains(&param) {
        (SignedDistance::new(min_distance, 0.0), param)
    } else if param < 0.5 {
        (
            SignedDistance::new(
                min_distance,
                fabs(Vector2::dot_product(
                    direction(p0, p1, p2, p3, 0.0).normalize(false),
                    qa.normalize(false),
                )),
            ),
            param,
        )
    } else {
        (
            SignedDistance::new(
                min_distance,
                fabs(Vector2::dot_product(
                    direction(p0, p1, p2, p3, 1.0).normalize(false),
                    (p3 - origin).normalize(false),
                )),
            ),
            param,
        )
    }
}

pub fn scanline_intersections(
    p0: Vector2,
    p1: Vector2,
    p2: Vector2,
    p3: Vector2,
    y: f64,
) -> (i32, [f64; 3], [i32; 3]) {
    let mut x = [0.0; 3];
    let mut dy = [0; 3];
    let mut total = 0usize;
    let mut next_dy = if y > p0.y { 1 } else { -1 };
    x[total] = p0.x;
    if p0.y == y {
        if p0.y < p1.y || (p0.y == p1.y && (p0.y < p2.y || (p0.y == p2.y && p0.y < p3.y))) {
            dy[total] = 1;
            total += 1;
        } else {
            next_dy = 1;
        }
    }
    {
        let ab = p1 - p0;
        let br = p2 - p1 - ab;
        let as_ = (p3 - p2) - (p2 - p1) - br;
        let (solutions, mut t) =
            equation_solver::solve_cubic(as_.y, 3.0 * br.y, 3.0 * ab.y, p0.y - y);
        // sort up to 3 roots ascending
        if solutions >= 2 {
            if t[0] > t[1] {
                t.swap(0, 1);
            }
            if solutions >= 3 {
                if t[1] > t[2] {
                    t.swap(1, 2);
                }
                if t[0] > t[1] {
                    t.swap(0, 1);
                }
            }
        }
        for i in 0..solutions {
            if total >= 3 {
                break;
            }
            let ti = t[i as usize];
            if (0.0..=1.0).contains(&ti) {
                x[total] = p0.x + 3.0 * ti * ab.x + 3.0 * ti * ti * br.x + ti * ti * ti * as_.x;
                if next_dy as f64 * (ab.y + 2.0 * ti * br.y + ti * ti * as_.y) >= 0.0 {
                    dy[total] = next_dy;
                    total += 1;
                    next_dy = -next_dy;
                }
            }
        }
    }
    if p3.y == y {
        if next_dy > 0 && total > 0 {
            total -= 1;
            next_dy = -1;
        }
        if (p3.y < p2.y || (p3.y == p2.y && (p3.y < p1.y || (p3.y == p1.y && p3.y < p0.y))))
            && total < 3
        {
            x[total] = p3.x;
            if next_dy < 0 {
                dy[total] = -1;
                total += 1;
                next_dy = 1;
            }
        }
    }
    if next_dy != (if y >= p3.y { 1 } else { -1 }) {
        if total > 0 {
            total -= 1;
        } else {
            if (p3.y - y).abs() < (p0.y - y).abs() {
                x[total] = p3.x;
            }
            dy[total] = next_dy;
            total += 1;
        }
    }
    (total as i32, x, dy)
}

pub fn move_start_point(p0: &mut Vector2, p1: &mut Vector2, to: Vector2) {
    *p1 = *p1 + (to - *p0);
    *p0 = to;
}

pub fn move_end_point(p2: &mut Vector2, p3: &mut Vector2, to: Vector2) {
    *p2 = *p2 + (to - *p3);
    *p3 = to;
}
