//! Optional `ttf-parser` boundary adapter: a thin `OutlineBuilder` that
//! records outline events directly into a [`Shape`]. Grounded on the
//! teacher's `ttf_parser.rs` (`impl ttf_parser::OutlineBuilder for
//! PathCollector`), retargeted from the teacher's `lyon`-based
//! `PathCollector`/`ColorFlags` pair onto this crate's `Shape`/`Contour`/
//! `EdgeSegment` types. This stays in scope per spec.md §1: it only turns
//! already-decoded outline events into `Shape` geometry, it does not parse
//! font files itself.

use crate::shape::Shape;
use crate::vector::Vector2;

/// Builds a [`Shape`] from a sequence of `ttf_parser::OutlineBuilder` events,
/// scaling every coordinate by `scale` as it is received (the teacher's
/// `PathCollector::scale`, typically `1.0 / units_per_em`).
pub struct ShapeBuilder {
    shape: Shape,
    contour_start: Vector2,
    pen: Vector2,
    pub scale: f64,
}

impl ShapeBuilder {
    pub fn new(scale: f64) -> Self {
        Self {
            shape: Shape::new(),
            contour_start: Vector2::default(),
            pen: Vector2::default(),
            scale,
        }
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }
}

impl Default for ShapeBuilder {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ttf_parser::OutlineBuilder for ShapeBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let to = Vector2::new(x as f64, y as f64) * self.scale;
        self.pen = to;
        self.contour_start = to;
        self.shape.add_contour();
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = Vector2::new(x as f64, y as f64) * self.scale;
        let pen = self.pen;
        self.current_contour()
            .add_line(pen.x, pen.y, to.x, to.y);
        self.pen = to;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = Vector2::new(x1 as f64, y1 as f64) * self.scale;
        let to = Vector2::new(x as f64, y as f64) * self.scale;
        let pen = self.pen;
        self.current_contour()
            .add_quadratic_segment(pen.x, pen.y, ctrl.x, ctrl.y, to.x, to.y);
        self.pen = to;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ctrl1 = Vector2::new(x1 as f64, y1 as f64) * self.scale;
        let ctrl2 = Vector2::new(x2 as f64, y2 as f64) * self.scale;
        let to = Vector2::new(x as f64, y as f64) * self.scale;
        let pen = self.pen;
        self.current_contour()
            .add_cubic_segment(pen.x, pen.y, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
        self.pen = to;
    }

    fn close(&mut self) {
        if (self.pen - self.contour_start).length() > 1e-14 {
            let pen = self.pen;
            let start = self.contour_start;
            self.current_contour()
                .add_line(pen.x, pen.y, start.x, start.y);
        }
        self.pen = self.contour_start;
    }
}

impl ShapeBuilder {
    fn current_contour(&mut self) -> &mut crate::contour::Contour {
        if self.shape.contours.is_empty() {
            self.shape.add_contour();
        }
        self.shape.contours.last_mut().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    #[test]
    fn builds_closed_triangle_contour() {
        let mut builder = ShapeBuilder::new(1.0);
        builder.move_to(0.0, 0.0);
        builder.line_to(1.0, 0.0);
        builder.line_to(0.5, 1.0);
        builder.close();
        let shape = builder.into_shape();
        assert_eq!(shape.contours.len(), 1);
        assert!(shape.validate());
    }
}
