//! A closed chain of [`crate::edge_segment::EdgeSegment`]s.

use crate::edge_color::EdgeColor;
use crate::edge_segment::EdgeSegment;
use crate::vector::Vector2;

#[derive(Debug, Default, Clone)]
pub struct Contour {
    pub edges: Vec<EdgeSegment>,
}

impl Contour {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub fn add_edge(&mut self, edge: EdgeSegment) -> &EdgeSegment {
        self.edges.push(edge);
        self.edges.last().unwrap()
    }

    pub fn add_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> &EdgeSegment {
        self.add_edge(EdgeSegment::new_linear(
            Vector2::new(x0, y0),
            Vector2::new(x1, y1),
            EdgeColor::WHITE,
        ))
    }

    pub fn add_quadratic_segment(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> &EdgeSegment {
        self.add_edge(EdgeSegment::new_quadratic(
            Vector2::new(x0, y0),
            Vector2::new(x1, y1),
            Vector2::new(x2, y2),
            EdgeColor::WHITE,
        ))
    }

    pub fn add_cubic_segment(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    ) -> &EdgeSegment {
        self.add_edge(EdgeSegment::new_cubic(
            Vector2::new(x0, y0),
            Vector2::new(x1, y1),
            Vector2::new(x2, y2),
            Vector2::new(x3, y3),
            EdgeColor::WHITE,
        ))
    }

    pub fn find_bounds(&self, left: &mut f64, bottom: &mut f64, right: &mut f64, top: &mut f64) {
        for edge in self.edges.iter() {
            edge.find_bounds(left, bottom, right, top);
        }
    }

    /// +1 for counter-clockwise (filled), -1 for clockwise (hole), 0 for a
    /// contour with no edges. Matches `Contour::winding` in the original,
    /// including its 1-edge and 2-edge special cases (a single- or
    /// two-segment loop doesn't enclose any area at its own sampled
    /// endpoints, so it is sampled at interior parameter values instead).
    pub fn winding(&self) -> i32 {
        let mut total: f64 = 0.0;
        match self.edges.len() {
            0 => return 0,
            1 => {
                let a = self.edges[0].point(0.0);
                let b = self.edges[0].point(1.0 / 3.0);
                let c = self.edges[0].point(2.0 / 3.0);
                total += Vector2::shoelace(a, b);
                total += Vector2::shoelace(b, c);
                total += Vector2::shoelace(c, a);
            }
            2 => {
                let a = self.edges[0].point(0.0);
                let b = self.edges[0].point(0.5);
                let c = self.edges[1].point(0.0);
                let d = self.edges[1].point(0.5);
                total += Vector2::shoelace(a, b);
                total += Vector2::shoelace(b, c);
                total += Vector2::shoelace(c, d);
                total += Vector2::shoelace(d, a);
            }
            _ => {
                let mut prev = self.edges.last().unwrap().point(0.0);
                for edge in self.edges.iter() {
                    let cur = edge.point(0.0);
                    total += Vector2::shoelace(prev, cur);
                    prev = cur;
                }
            }
        }
        Vector2::sign(total) as i32
    }

    pub fn bound_miters(
        &self,
        l: &mut f64,
        b: &mut f64,
        r: &mut f64,
        t: &mut f64,
        border: f64,
        miter_limit: f64,
        polarity: i32,
    ) {
        if self.edges.is_empty() {
            return;
        }

        let mut prev_dir = self.edges.last().unwrap().direction(1.0).normalize(true);

        for edge in self.edges.iter() {
            let mut dir = edge.direction(0.0).normalize(true);
            dir = Vector2::new(-dir.x, -dir.y);

            if polarity as f64 * Vector2::cross_product(prev_dir, dir) >= 0.0 {
                let q = 0.5 * (1.0 - Vector2::dot_product(prev_dir, dir));
                if q > 0.0 {
                    let miter_length = (1.0 / q.sqrt()).min(miter_limit);
                    let miter =
                        edge.point(0.0) + border * miter_length * (prev_dir + dir).normalize(true);
                    Vector2::point_bounds(miter, l, b, r, t);
                }
            }
            prev_dir = edge.direction(1.0).normalize(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_winds_counter_clockwise() {
        let mut c = Contour::new();
        c.add_line(0.0, 0.0, 1.0, 0.0);
        c.add_line(1.0, 0.0, 1.0, 1.0);
        c.add_line(1.0, 1.0, 0.0, 1.0);
        c.add_line(0.0, 1.0, 0.0, 0.0);
        assert_eq!(c.winding(), 1);
    }

    #[test]
    fn reversed_square_winds_clockwise() {
        let mut c = Contour::new();
        c.add_line(0.0, 0.0, 0.0, 1.0);
        c.add_line(0.0, 1.0, 1.0, 1.0);
        c.add_line(1.0, 1.0, 1.0, 0.0);
        c.add_line(1.0, 0.0, 0.0, 0.0);
        assert_eq!(c.winding(), -1);
    }
}
