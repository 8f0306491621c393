//! Combines the per-edge-selector results of every contour in a [`Shape`]
//! into the single distance value stored at one pixel.
//!
//! Ported from `original_source/core/contour-combiners.h/.cpp`, generalized
//! from its C++ templates to Rust generics over [`EdgeSelector`]. The
//! teacher's `msdf::gen::generate_msdf` inlines the `OverlappingContourCombiner`
//! algorithm directly in its pixel loop; this module promotes it to a
//! reusable type selected at generation time by
//! [`crate::generator_config::GeneratorConfig::overlap_support`].

use crate::edge_color::{MultiAndTrueDistance, MultiDistance};
use crate::edge_selector::EdgeSelector;
use crate::shape::Shape;
use crate::vector::Vector2;

/// A selector's distance output collapsed to a single scalar for comparison
/// purposes, ported from the original's free-function `resolveDistance`
/// overloads.
pub trait ResolvableDistance: Copy {
    fn resolve(&self) -> f64;
}

impl ResolvableDistance for f64 {
    fn resolve(&self) -> f64 {
        *self
    }
}

impl ResolvableDistance for MultiDistance {
    fn resolve(&self) -> f64 {
        MultiDistance::resolve(self)
    }
}

impl ResolvableDistance for MultiAndTrueDistance {
    fn resolve(&self) -> f64 {
        MultiAndTrueDistance::resolve(self)
    }
}

/// Naive combiner: merges every contour's edge selector into one, assuming
/// contours don't overlap (no winding-aware resolution).
#[derive(Debug, Clone)]
pub struct SimpleContourCombiner<S: EdgeSelector> {
    shape_edge_selector: S,
}

impl<S: EdgeSelector> SimpleContourCombiner<S> {
    pub fn new(_shape: &Shape) -> Self {
        Self {
            shape_edge_selector: S::default(),
        }
    }

    pub fn reset(&mut self, p: Vector2) {
        self.shape_edge_selector = S::default();
        self.shape_edge_selector.reset(p);
    }

    pub fn set_contour_edge_selection(&mut self, _i: usize, edge_selector: &S) {
        self.shape_edge_selector.merge(edge_selector);
    }

    pub fn distance(&self) -> S::Distance {
        self.shape_edge_selector.distance()
    }
}

/// Winding-aware combiner: resolves which contour actually forms the
/// filled/unfilled border at this pixel when multiple same-winding contours
/// overlap, ported from `OverlappingContourCombiner`.
#[derive(Debug, Clone)]
pub struct OverlappingContourCombiner<S: EdgeSelector>
where
    S::Distance: ResolvableDistance,
{
    windings: Vec<i32>,
    edge_selectors: Vec<S>,
    shape_edge_selector: S,
    inner_edge_selector: S,
    outer_edge_selector: S,
}

impl<S: EdgeSelector> OverlappingContourCombiner<S>
where
    S::Distance: ResolvableDistance,
{
    pub fn new(shape: &Shape) -> Self {
        let windings: Vec<i32> = shape.contours.iter().map(|c| c.winding()).collect();
        let n = windings.len();
        Self {
            windings,
            edge_selectors: vec![S::default(); n],
            shape_edge_selector: S::default(),
            inner_edge_selector: S::default(),
            outer_edge_selector: S::default(),
        }
    }

    pub fn reset(&mut self, p: Vector2) {
        self.shape_edge_selector = S::default();
        self.shape_edge_selector.reset(p);
        self.inner_edge_selector = S::default();
        self.inner_edge_selector.reset(p);
        self.outer_edge_selector = S::default();
        self.outer_edge_selector.reset(p);
    }

    pub fn set_contour_edge_selection(&mut self, i: usize, edge_selector: &S) {
        let edge_distance = edge_selector.distance();
        self.edge_selectors[i] = edge_selector.clone();
        self.shape_edge_selector.merge(edge_selector);
        if self.windings[i] > 0 && edge_distance.resolve() >= 0.0 {
            self.inner_edge_selector.merge(edge_selector);
        }
        if self.windings[i] < 0 && edge_distance.resolve() <= 0.0 {
            self.outer_edge_selector.merge(edge_selector);
        }
    }

    pub fn distance(&self) -> S::Distance {
        let shape_distance = self.shape_edge_selector.distance();
        let inner_distance = self.inner_edge_selector.distance();
        let outer_distance = self.outer_edge_selector.distance();
        let inner_scalar = inner_distance.resolve();
        let outer_scalar = outer_distance.resolve();
        let contour_count = self.windings.len();

        let mut distance;
        let winding;
        if inner_scalar >= 0.0 && inner_scalar.abs() <= outer_scalar.abs() {
            distance = inner_distance;
            winding = 1;
            for i in 0..contour_count {
                if self.windings[i] > 0 {
                    let contour_distance = self.edge_selectors[i].distance();
                    if contour_distance.resolve().abs() < outer_scalar.abs()
                        && contour_distance.resolve() > distance.resolve()
                    {
                        distance = contour_distance;
                    }
                }
            }
        } else if outer_scalar <= 0.0 && outer_scalar.abs() < inner_scalar.abs() {
            distance = outer_distance;
            winding = -1;
            for i in 0..contour_count {
                if self.windings[i] < 0 {
                    let contour_distance = self.edge_selectors[i].distance();
                    if contour_distance.resolve().abs() < inner_scalar.abs()
                        && contour_distance.resolve() < distance.resolve()
                    {
                        distance = contour_distance;
                    }
                }
            }
        } else {
            return shape_distance;
        }

        for i in 0..contour_count {
            if self.windings[i] != winding {
                let contour_distance = self.edge_selectors[i].distance();
                if contour_distance.resolve() * distance.resolve() >= 0.0
                    && contour_distance.resolve().abs() < distance.resolve().abs()
                {
                    distance = contour_distance;
                }
            }
        }
        if distance.resolve() == shape_distance.resolve() {
            distance = shape_distance;
        }
        distance
    }
}

/// Selects between the two combiner strategies at runtime per
/// `GeneratorConfig::overlap_support`, without paying for dynamic dispatch
/// inside the hot per-pixel accumulation methods.
#[derive(Debug, Clone)]
pub enum ContourCombiner<S: EdgeSelector>
where
    S::Distance: ResolvableDistance,
{
    Simple(SimpleContourCombiner<S>),
    Overlapping(OverlappingContourCombiner<S>),
}

impl<S: EdgeSelector> ContourCombiner<S>
where
    S::Distance: ResolvableDistance,
{
    pub fn new(shape: &Shape, overlap_support: bool) -> Self {
        if overlap_support {
            ContourCombiner::Overlapping(OverlappingContourCombiner::new(shape))
        } else {
            ContourCombiner::Simple(SimpleContourCombiner::new(shape))
        }
    }

    pub fn reset(&mut self, p: Vector2) {
        match self {
            ContourCombiner::Simple(c) => c.reset(p),
            ContourCombiner::Overlapping(c) => c.reset(p),
        }
    }

    pub fn set_contour_edge_selection(&mut self, i: usize, edge_selector: &S) {
        match self {
            ContourCombiner::Simple(c) => c.set_contour_edge_selection(i, edge_selector),
            ContourCombiner::Overlapping(c) => c.set_contour_edge_selection(i, edge_selector),
        }
    }

    pub fn distance(&self) -> S::Distance {
        match self {
            ContourCombiner::Simple(c) => c.distance(),
            ContourCombiner::Overlapping(c) => c.distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_color::EdgeColor;
    use crate::edge_selector::PseudoDistanceSelector;

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
    fn simple_combiner_merges_all_contours() {
        let shape = unit_square();
        let mut combiner: SimpleContourCombiner<PseudoDistanceSelector> =
            SimpleContourCombiner::new(&shape);
        combiner.reset(Vector2::new(0.5, -0.25));
        for (i, contour) in shape.contours.iter().enumerate() {
            let mut sel = PseudoDistanceSelector::default();
            sel.reset(Vector2::new(0.5, -0.25));
            let n = contour.edges.len();
            for j in 0..n {
                let prev = &contour.edges[(j + n - 1) % n];
                let next = &contour.edges[(j + 1) % n];
                sel.add_edge(prev, &contour.edges[j], next);
            }
            combiner.set_contour_edge_selection(i, &sel);
        }
        assert!((combiner.distance().abs() - 0.25).abs() < 1e-9);
        let _ = EdgeColor::WHITE;
    }
}
