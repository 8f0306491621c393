//! Bézier edge segments: the tagged-variant shape primitive.
//!
//! A tagged enum is used instead of trait-object dispatch (spec §9): there are
//! exactly three concrete shapes (linear/quadratic/cubic), callers need to
//! copy segments freely while building contours, and a closed `match` lets
//! the compiler check every call site handles all three — none of which a
//! `Box<dyn EdgeSegment>` buys here.

use crate::edge_color::EdgeColor;
use crate::signed_distance::SignedDistance;
use crate::vector::Vector2;

mod cubic;
mod line;
mod quadratic;

pub use cubic::{MSDFGEN_CUBIC_SEARCH_STARTS, MSDFGEN_CUBIC_SEARCH_STEPS};

pub fn non_zero_sign(n: f64) -> i32 {
    2 * (if n > 0.0 { 1 } else { 0 }) - 1
}

pub fn mix(a: Vector2, b: Vector2, weight: f64) -> Vector2 {
    Vector2::new(
        (1.0 - weight) * a.x + (weight * b.x),
        (1.0 - weight) * a.y + (weight * b.y),
    )
}

#[derive(Debug, Clone, Copy)]
pub enum EdgeSegment {
    LineSegment {
        color: EdgeColor,
        p0: Vector2,
        p1: Vector2,
    },
    QuadraticSegment {
        color: EdgeColor,
        p0: Vector2,
        p1: Vector2,
        p2: Vector2,
    },
    CubicSegment {
        color: EdgeColor,
        p0: Vector2,
        p1: Vector2,
        p2: Vector2,
        p3: Vector2,
    },
}

impl Default for EdgeSegment {
    fn default() -> Self {
        EdgeSegment::LineSegment {
            color: EdgeColor::WHITE,
            p0: Vector2::default(),
            p1: Vector2::default(),
        }
    }
}

impl EdgeSegment {
    pub fn new_linear(p0: Vector2, p1: Vector2, color: EdgeColor) -> Self {
        Self::LineSegment { p0, p1, color }
    }

    pub fn new_quadratic(p0: Vector2, mut p1: Vector2, p2: Vector2, color: EdgeColor) -> Self {
        if p1 == p0 || p1 == p2 {
            p1 = 0.5 * (p0 + p2);
        }
        Self::QuadraticSegment { p0, p1, p2, color }
    }

    pub fn new_cubic(p0: Vector2, mut p1: Vector2, mut p2: Vector2, p3: Vector2, color: EdgeColor) -> Self {
        if (p1 == p0 || p1 == p3) && (p2 == p0 || p2 == p3) {
            p1 = mix(p0, p3, 1.0 / 3.0);
            p2 = mix(p0, p3, 2.0 / 3.0);
        }
        Self::CubicSegment {
            p0,
            p1,
            p2,
            p3,
            color,
        }
    }

    pub fn distance_to_pseudo_distance(
        &self,
        distance: &mut SignedDistance,
        origin: Vector2,
        param: f64,
    ) {
        if param < 0.0 {
            let dir = self.direction(0.0).normalize(false);
            let aq = origin - self.point(0.0);
            let ts = Vector2::dot_product(aq, dir);
            if ts < 0.0 {
                let pseudo_distance = Vector2::cross_product(aq, dir);
                if pseudo_distance.abs() <= distance.distance.abs() {
                    *distance = SignedDistance::new(pseudo_distance, 0.0);
                }
            }
        } else if param > 1.0 {
            let dir = self.direction(1.0).normalize(false);
            let bq = origin - self.point(1.0);
            let ts = Vector2::dot_product(bq, dir);
            if ts > 0.0 {
                let pseudo_distance = Vector2::cross_product(bq, dir);
                if pseudo_distance.abs() <= distance.distance.abs() {
                    *distance = SignedDistance::new(pseudo_distance, 0.0);
                }
            }
        }
    }

    pub fn direction(&self, param: f64) -> Vector2 {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::direction(p0, p1, param),
            Self::QuadraticSegment { p0, p1, p2, .. } => quadratic::direction(p0, p1, p2, param),
            Self::CubicSegment { p0, p1, p2, p3, .. } => cubic::direction(p0, p1, p2, p3, param),
        }
    }

    /// Second derivative of the position curve at `param` (rate of tangent change).
    pub fn direction_change(&self, param: f64) -> Vector2 {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::direction_change(p0, p1, param),
            Self::QuadraticSegment { p0, p1, p2, .. } => {
                quadratic::direction_change(p0, p1, p2, param)
            }
            Self::CubicSegment { p0, p1, p2, p3, .. } => {
                cubic::direction_change(p0, p1, p2, p3, param)
            }
        }
    }

    pub fn point(&self, param: f64) -> Vector2 {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::point(p0, p1, param),
            Self::QuadraticSegment { p0, p1, p2, .. } => quadratic::point(p0, p1, p2, param),
            Self::CubicSegment { p0, p1, p2, p3, .. } => cubic::point(p0, p1, p2, p3, param),
        }
    }

    /// Whether this segment has zero geometric extent (spec §3). The
    /// original implementation's concrete bodies were not recovered from the
    /// retrieval pack (only the pure-virtual declaration survived); this
    /// tests zero tangent at both endpoints, matching the spec's behavioral
    /// description. See DESIGN.md for the grounding note.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::is_degenerate(p0, p1),
            Self::QuadraticSegment { p0, p1, p2, .. } => quadratic::is_degenerate(p0, p1, p2),
            Self::CubicSegment { p0, p1, p2, p3, .. } => cubic::is_degenerate(p0, p1, p2, p3),
        }
    }

    pub fn find_bounds(&self, l: &mut f64, b: &mut f64, r: &mut f64, t: &mut f64) {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::find_bounds(p0, p1, l, b, r, t),
            Self::QuadraticSegment { p0, p1, p2, .. } => {
                quadratic::find_bounds(p0, p1, p2, l, b, r, t)
            }
            Self::CubicSegment { p0, p1, p2, p3, .. } => {
                cubic::find_bounds(p0, p1, p2, p3, l, b, r, t)
            }
        }
    }

    pub fn split_in_thirds(&self) -> (EdgeSegment, EdgeSegment, EdgeSegment) {
        match *self {
            Self::LineSegment { p0, p1, color } => line::split_in_thirds(p0, p1, color),
            Self::QuadraticSegment { p0, p1, p2, color } => {
                quadratic::split_in_thirds(p0, p1, p2, color)
            }
            Self::CubicSegment {
                p0,
                p1,
                p2,
                p3,
                color,
            } => cubic::split_in_thirds(p0, p1, p2, p3, color),
        }
    }

    pub fn signed_distance(&self, origin: Vector2) -> (SignedDistance, f64) {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::signed_distance(p0, p1, origin),
            Self::QuadraticSegment { p0, p1, p2, .. } => {
                quadratic::signed_distance(p0, p1, p2, origin)
            }
            Self::CubicSegment { p0, p1, p2, p3, .. } => {
                cubic::signed_distance(p0, p1, p2, p3, origin)
            }
        }
    }

    /// Up to 3 x-crossings of the horizontal line `y` with this segment,
    /// each paired with its winding direction (+1/-1), used by `Scanline`.
    pub fn scanline_intersections(&self, y: f64) -> (i32, [f64; 3], [i32; 3]) {
        match *self {
            Self::LineSegment { p0, p1, .. } => line::scanline_intersections(p0, p1, y),
            Self::QuadraticSegment { p0, p1, p2, .. } => {
                quadratic::scanline_intersections(p0, p1, p2, y)
            }
            Self::CubicSegment { p0, p1, p2, p3, .. } => {
                cubic::scanline_intersections(p0, p1, p2, p3, y)
            }
        }
    }

    pub fn move_start_point(&mut self, to: Vector2) {
        match self {
            Self::LineSegment { p0, p1, .. } => line::move_start_point(p0, *p1, to),
            Self::QuadraticSegment { p0, p1, p2, .. } => {
                quadratic::move_start_point(p0, p1, *p2, to)
            }
            Self::CubicSegment { p0, p1, .. } => cubic::move_start_point(p0, p1, to),
        }
    }

    pub fn move_end_point(&mut self, to: Vector2) {
        match self {
            Self::LineSegment { p0, p1, .. } => line::move_end_point(*p0, p1, to),
            Self::QuadraticSegment { p0, p1, p2, .. } => {
                quadratic::move_end_point(*p0, p1, p2, to)
            }
            Self::CubicSegment { p2, p3, .. } => cubic::move_end_point(p2, p3, to),
        }
    }

    pub fn has_color(&self, c: EdgeColor) -> bool {
        self.get_color() as usize & c as usize != 0
    }

    pub fn get_color(&self) -> EdgeColor {
        match self {
            Self::LineSegment { color, .. } => *color,
            Self::QuadraticSegment { color, .. } => *color,
            Self::CubicSegment { color, .. } => *color,
        }
    }

    pub fn set_color(&mut self, c: EdgeColor) {
        match self {
            Self::LineSegment { color, .. } => *color = c,
            Self::QuadraticSegment { color, .. } => *color = c,
            Self::CubicSegment { color, .. } => *color = c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_degenerate_detects_coincident_endpoints() {
        let e = EdgeSegment::new_linear(Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0), EdgeColor::WHITE);
        assert!(e.is_degenerate());
        let e = EdgeSegment::new_linear(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), EdgeColor::WHITE);
        assert!(!e.is_degenerate());
    }

    #[test]
    fn split_in_thirds_preserves_endpoints() {
        let e = EdgeSegment::new_linear(Vector2::new(0.0, 0.0), Vector2::new(3.0, 0.0), EdgeColor::WHITE);
        let (a, _b, c) = e.split_in_thirds();
        assert_eq!(a.point(0.0), Vector2::new(0.0, 0.0));
        assert_eq!(c.point(1.0), Vector2::new(3.0, 0.0));
    }

    #[test]
    fn linear_scanline_intersection_at_midheight() {
        let e = EdgeSegment::new_linear(Vector2::new(0.0, 0.0), Vector2::new(0.0, 2.0), EdgeColor::WHITE);
        let (n, x, dy) = e.scanline_intersections(1.0);
        assert_eq!(n, 1);
        assert_eq!(x[0], 0.0);
        assert_eq!(dy[0], 1);
    }
}
