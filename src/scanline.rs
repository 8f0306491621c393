//! Horizontal-line intersection list used for fill-rule evaluation and the
//! sign-correction pass. Grounded on `original_source/core/Scanline.h/.cpp`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
    Positive,
    Negative,
}

pub fn interpret_fill_rule(intersections: i32, fill_rule: FillRule) -> bool {
    match fill_rule {
        FillRule::NonZero => intersections != 0,
        FillRule::EvenOdd => intersections & 1 != 0,
        FillRule::Positive => intersections > 0,
        FillRule::Negative => intersections < 0,
    }
}

#[derive(Debug, Clone, Copy)]
struct Intersection {
    x: f64,
    direction: i32,
}

/// All x-crossings of one horizontal scan line with a shape, with their
/// cumulative winding direction precomputed so repeated queries along the
/// line are O(1) amortized (`last_index` caches the previous query's
/// position, since callers scan `x` left-to-right across a row).
#[derive(Debug, Clone)]
pub struct Scanline {
    intersections: Vec<Intersection>,
    last_index: std::cell::Cell<i32>,
}

impl Scanline {
    pub fn new(mut raw: Vec<(f64, i32)>) -> Self {
        raw.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        let mut total_direction = 0;
        let intersections = raw
            .into_iter()
            .map(|(x, dir)| {
                total_direction += dir;
                Intersection {
                    x,
                    direction: total_direction,
                }
            })
            .collect();
        Self {
            intersections,
            last_index: std::cell::Cell::new(0),
        }
    }

    fn move_to(&self, x: f64) -> i32 {
        let n = self.intersections.len() as i32;
        if n == 0 {
            return -1;
        }
        let mut index = self.last_index.get().clamp(0, n - 1);
        if x < self.intersections[index as usize].x {
            loop {
                if index == 0 {
                    self.last_index.set(0);
                    return -1;
                }
                index -= 1;
                if x >= self.intersections[index as usize].x {
                    break;
                }
            }
        } else {
            while index < n - 1 && x >= self.intersections[index as usize + 1].x {
                index += 1;
            }
        }
        self.last_index.set(index);
        index
    }

    pub fn count_intersections(&self, x: f64) -> i32 {
        self.move_to(x) + 1
    }

    pub fn sum_intersections(&self, x: f64) -> i32 {
        let index = self.move_to(x);
        if index >= 0 {
            self.intersections[index as usize].direction
        } else {
            0
        }
    }

    pub fn filled(&self, x: f64, fill_rule: FillRule) -> bool {
        interpret_fill_rule(self.sum_intersections(x), fill_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_fill_inside_simple_span() {
        // A single left-to-right edge pair: enters at x=0 (+1), exits at x=1 (-1).
        let sl = Scanline::new(vec![(0.0, 1), (1.0, -1)]);
        assert!(sl.filled(0.5, FillRule::NonZero));
        assert!(!sl.filled(1.5, FillRule::NonZero));
        assert!(!sl.filled(-0.5, FillRule::NonZero));
    }

    #[test]
    fn evenodd_matches_nonzero_for_simple_shapes() {
        let sl = Scanline::new(vec![(0.0, 1), (1.0, -1)]);
        assert_eq!(
            sl.filled(0.5, FillRule::NonZero),
            sl.filled(0.5, FillRule::EvenOdd)
        );
    }
}
