//! Per-pixel edge selectors: given a query point and a contour's edges (with
//! one-edge look-around context), accumulate the nearest signed distance(s).
//!
//! Ported from `original_source/core/edge-selectors.h/.cpp`, which targets a
//! newer squared-distance `SignedDistance` variant; this crate's
//! [`SignedDistance`] instead carries `distance`+`dot` (matching the classic
//! `SignedDistance.hpp`, already used by [`crate::edge_segment`]), so the
//! comparisons below use [`SignedDistance::l`] in place of the original's
//! `operator<` over `sqDistance`. The algorithmic structure — which distance
//! to keep, when to accept a pseudo-distance, how per-channel selectors
//! merge — is carried over unchanged.

use crate::edge_color::{EdgeColor, MultiAndTrueDistance, MultiDistance};
use crate::edge_segment::EdgeSegment;
use crate::signed_distance::SignedDistance;
use crate::vector::Vector2;

/// Common protocol every per-pixel selector implements, so
/// [`crate::contour_combiner`] can drive any of them generically.
pub trait EdgeSelector: Default + Clone {
    type Distance: Copy;

    fn reset(&mut self, p: Vector2);
    fn add_edge(
        &mut self,
        prev_edge: &EdgeSegment,
        edge: &EdgeSegment,
        next_edge: &EdgeSegment,
    );
    fn merge(&mut self, other: &Self);
    fn distance(&self) -> Self::Distance;
}

/// True whether the query is "facing" `edge` rather than being better
/// explained by the adjacent edge across the corner at `param`'s endpoint,
/// ported verbatim from `PseudoDistanceSelectorBase::pointFacingEdge`.
fn point_facing_edge(
    prev_edge: &EdgeSegment,
    edge: &EdgeSegment,
    next_edge: &EdgeSegment,
    p: Vector2,
    param: f64,
) -> bool {
    if param < 0.0 {
        let prev_edge_dir = -prev_edge.direction(1.0).normalize(true);
        let edge_dir = edge.direction(0.0).normalize(true);
        let point_dir = p - edge.point(0.0);
        Vector2::dot_product(point_dir, edge_dir) >= Vector2::dot_product(point_dir, prev_edge_dir)
    } else if param > 1.0 {
        let edge_dir = -edge.direction(1.0).normalize(true);
        let next_edge_dir = next_edge.direction(0.0).normalize(true);
        let point_dir = p - edge.point(1.0);
        Vector2::dot_product(point_dir, edge_dir) >= Vector2::dot_product(point_dir, next_edge_dir)
    } else {
        true
    }
}

/// Selects the nearest edge by true (non-pseudo) distance only.
#[derive(Debug, Clone)]
pub struct TrueDistanceSelector {
    p: Vector2,
    min_distance: SignedDistance,
}

impl Default for TrueDistanceSelector {
    fn default() -> Self {
        Self {
            p: Vector2::default(),
            min_distance: SignedDistance::infinite(),
        }
    }
}

impl EdgeSelector for TrueDistanceSelector {
    type Distance = f64;

    fn reset(&mut self, p: Vector2) {
        self.p = p;
        self.min_distance = SignedDistance::infinite();
    }

    fn add_edge(&mut self, _prev_edge: &EdgeSegment, edge: &EdgeSegment, _next_edge: &EdgeSegment) {
        let (distance, _param) = edge.signed_distance(self.p);
        if distance.l(&self.min_distance) {
            self.min_distance = distance;
        }
    }

    fn merge(&mut self, other: &Self) {
        if other.min_distance.l(&self.min_distance) {
            self.min_distance = other.min_distance;
        }
    }

    fn distance(&self) -> f64 {
        self.min_distance.distance
    }
}

/// Shared accumulation logic behind [`PseudoDistanceSelector`] and the
/// per-channel slots of [`MultiDistanceSelector`], ported from
/// `PseudoDistanceSelectorBase`.
#[derive(Debug, Clone, Copy)]
pub struct PseudoDistanceSelectorBase {
    min_true_distance: SignedDistance,
    min_negative_pseudo_distance: f64,
    min_positive_pseudo_distance: f64,
    near_edge: Option<EdgeSegment>,
    near_edge_param: f64,
}

impl Default for PseudoDistanceSelectorBase {
    fn default() -> Self {
        Self {
            min_true_distance: SignedDistance::infinite(),
            min_negative_pseudo_distance: SignedDistance::infinite().distance,
            min_positive_pseudo_distance: SignedDistance::infinite().distance,
            near_edge: None,
            near_edge_param: 0.0,
        }
    }
}

impl PseudoDistanceSelectorBase {
    pub fn add_edge_true_distance(&mut self, edge: &EdgeSegment, distance: SignedDistance, param: f64) {
        if distance.l(&self.min_true_distance) {
            self.min_true_distance = distance;
            self.near_edge = Some(*edge);
            self.near_edge_param = param;
        }
    }

    pub fn add_edge_pseudo_distance(&mut self, distance: f64) {
        if distance < 0.0 {
            if distance.abs() < self.min_negative_pseudo_distance.abs() {
                self.min_negative_pseudo_distance = distance;
            }
        } else if distance.abs() < self.min_positive_pseudo_distance.abs() {
            self.min_positive_pseudo_distance = distance;
        }
    }

    pub fn merge(&mut self, other: &Self) {
        if other.min_true_distance.l(&self.min_true_distance) {
            self.min_true_distance = other.min_true_distance;
            self.near_edge = other.near_edge;
            self.near_edge_param = other.near_edge_param;
        }
        if other.min_negative_pseudo_distance.abs() < self.min_negative_pseudo_distance.abs() {
            self.min_negative_pseudo_distance = other.min_negative_pseudo_distance;
        }
        if other.min_positive_pseudo_distance.abs() < self.min_positive_pseudo_distance.abs() {
            self.min_positive_pseudo_distance = other.min_positive_pseudo_distance;
        }
    }

    pub fn compute_distance(&self, p: Vector2) -> f64 {
        let mut min_distance = if self.min_true_distance.distance < 0.0 {
            self.min_negative_pseudo_distance
        } else {
            self.min_positive_pseudo_distance
        };
        if let Some(near_edge) = &self.near_edge {
            let mut distance = self.min_true_distance;
            near_edge.distance_to_pseudo_distance(&mut distance, p, self.near_edge_param);
            if distance.distance.abs() < min_distance.abs() {
                min_distance = distance.distance;
            }
        }
        min_distance
    }

    pub fn true_distance(&self) -> SignedDistance {
        self.min_true_distance
    }
}

/// Selects the nearest edge by pseudo-distance (tangent-extended beyond the
/// segment's parameter range at corners), the usual single-channel choice
/// for plain SDFs.
#[derive(Debug, Clone, Default)]
pub struct PseudoDistanceSelector {
    base: PseudoDistanceSelectorBase,
    p: Vector2,
}

impl EdgeSelector for PseudoDistanceSelector {
    type Distance = f64;

    fn reset(&mut self, p: Vector2) {
        self.p = p;
        self.base = PseudoDistanceSelectorBase::default();
    }

    fn add_edge(&mut self, prev_edge: &EdgeSegment, edge: &EdgeSegment, next_edge: &EdgeSegment) {
        let (distance, param) = edge.signed_distance(self.p);
        self.base.add_edge_true_distance(edge, distance, param);
        if point_facing_edge(prev_edge, edge, next_edge, self.p, param) {
            let mut distance = distance;
            edge.distance_to_pseudo_distance(&mut distance, self.p, param);
            self.base.add_edge_pseudo_distance(distance.distance);
        }
    }

    fn merge(&mut self, other: &Self) {
        self.base.merge(&other.base);
    }

    fn distance(&self) -> f64 {
        self.base.compute_distance(self.p)
    }
}

/// Selects the nearest edge independently for each of the R/G/B channels,
/// the multi-channel core of MSDF generation.
#[derive(Debug, Clone, Default)]
pub struct MultiDistanceSelector {
    p: Vector2,
    r: PseudoDistanceSelectorBase,
    g: PseudoDistanceSelectorBase,
    b: PseudoDistanceSelectorBase,
}

impl MultiDistanceSelector {
    pub fn true_distance(&self) -> SignedDistance {
        let rt = self.r.true_distance();
        let gt = self.g.true_distance();
        let bt = self.b.true_distance();
        let mut min = rt;
        if gt.l(&min) {
            min = gt;
        }
        if bt.l(&min) {
            min = bt;
        }
        min
    }
}

impl EdgeSelector for MultiDistanceSelector {
    type Distance = MultiDistance;

    fn reset(&mut self, p: Vector2) {
        self.p = p;
        self.r = PseudoDistanceSelectorBase::default();
        self.g = PseudoDistanceSelectorBase::default();
        self.b = PseudoDistanceSelectorBase::default();
    }

    fn add_edge(&mut self, prev_edge: &EdgeSegment, edge: &EdgeSegment, next_edge: &EdgeSegment) {
        let (distance, param) = edge.signed_distance(self.p);
        if edge.has_color(EdgeColor::RED) {
            self.r.add_edge_true_distance(edge, distance, param);
        }
        if edge.has_color(EdgeColor::GREEN) {
            self.g.add_edge_true_distance(edge, distance, param);
        }
        if edge.has_color(EdgeColor::BLUE) {
            self.b.add_edge_true_distance(edge, distance, param);
        }
        if point_facing_edge(prev_edge, edge, next_edge, self.p, param) {
            let mut pseudo = distance;
            edge.distance_to_pseudo_distance(&mut pseudo, self.p, param);
            if edge.has_color(EdgeColor::RED) {
                self.r.add_edge_pseudo_distance(pseudo.distance);
            }
            if edge.has_color(EdgeColor::GREEN) {
                self.g.add_edge_pseudo_distance(pseudo.distance);
            }
            if edge.has_color(EdgeColor::BLUE) {
                self.b.add_edge_pseudo_distance(pseudo.distance);
            }
        }
    }

    fn merge(&mut self, other: &Self) {
        self.r.merge(&other.r);
        self.g.merge(&other.g);
        self.b.merge(&other.b);
    }

    fn distance(&self) -> MultiDistance {
        MultiDistance {
            r: self.r.compute_distance(self.p),
            g: self.g.compute_distance(self.p),
            b: self.b.compute_distance(self.p),
            med: 0.0,
        }
    }
}

/// As [`MultiDistanceSelector`], plus a 4th alpha channel carrying the true
/// (not pseudo) distance, for MTSDF output.
#[derive(Debug, Clone, Default)]
pub struct MultiAndTrueDistanceSelector {
    inner: MultiDistanceSelector,
}

impl EdgeSelector for MultiAndTrueDistanceSelector {
    type Distance = MultiAndTrueDistance;

    fn reset(&mut self, p: Vector2) {
        self.inner.reset(p);
    }

    fn add_edge(&mut self, prev_edge: &EdgeSegment, edge: &EdgeSegment, next_edge: &EdgeSegment) {
        self.inner.add_edge(prev_edge, edge, next_edge);
    }

    fn merge(&mut self, other: &Self) {
        self.inner.merge(&other.inner);
    }

    fn distance(&self) -> MultiAndTrueDistance {
        let multi = EdgeSelector::distance(&self.inner);
        MultiAndTrueDistance {
            r: multi.r,
            g: multi.g,
            b: multi.b,
            med: 0.0,
            a: self.inner.true_distance().distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_color::EdgeColor;

    fn unit_square_edges() -> Vec<EdgeSegment> {
        vec![
            EdgeSegment::new_linear(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), EdgeColor::WHITE),
            EdgeSegment::new_linear(Vector2::new(1.0, 0.0), Vector2::new(1.0, 1.0), EdgeColor::WHITE),
            EdgeSegment::new_linear(Vector2::new(1.0, 1.0), Vector2::new(0.0, 1.0), EdgeColor::WHITE),
            EdgeSegment::new_linear(Vector2::new(0.0, 1.0), Vector2::new(0.0, 0.0), EdgeColor::WHITE),
        ]
    }

    #[test]
    fn true_distance_selector_finds_nearest_edge() {
        let edges = unit_square_edges();
        let mut sel = TrueDistanceSelector::default();
        sel.reset(Vector2::new(0.5, -0.25));
        let n = edges.len();
        for i in 0..n {
            let prev = &edges[(i + n - 1) % n];
            let next = &edges[(i + 1) % n];
            sel.add_edge(prev, &edges[i], next);
        }
        assert!((sel.distance().abs() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn pseudo_distance_selector_extends_past_corner() {
        let edges = unit_square_edges();
        let mut sel = PseudoDistanceSelector::default();
        sel.reset(Vector2::new(1.25, 1.25));
        let n = edges.len();
        for i in 0..n {
            let prev = &edges[(i + n - 1) % n];
            let next = &edges[(i + 1) % n];
            sel.add_edge(prev, &edges[i], next);
        }
        // Outside a convex corner, pseudo-distance degrades to plain
        // Euclidean distance from the corner point.
        let expected = (0.25f64 * 0.25 + 0.25 * 0.25).sqrt();
        assert!((sel.distance() - expected).abs() < 1e-6);
    }
}
