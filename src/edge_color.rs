//! The 3-bit RGB channel mask carried by every [`crate::edge_segment::EdgeSegment`].

use num_derive::FromPrimitive;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum EdgeColor {
    BLACK = 0,
    RED = 1,
    GREEN = 2,
    YELLOW = 3,
    BLUE = 4,
    MAGENTA = 5,
    CYAN = 6,
    WHITE = 7,
}

/// Per-channel pseudo-distance result accumulated by [`crate::edge_selector::MultiDistanceSelector`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MultiDistance {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub med: f64,
}

/// As [`MultiDistance`] plus a 4th true-distance channel, for MTSDF output.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MultiAndTrueDistance {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub med: f64,
    pub a: f64,
}

/// Median of three values, the channel-collapse used throughout the MSDF
/// pipeline (pixel resolve, error-correction `apply`, sign correction).
pub fn median3(a: f64, b: f64, c: f64) -> f64 {
    a.max(b.min(c)).min(b.max(c))
}

impl MultiDistance {
    pub fn resolve(&self) -> f64 {
        median3(self.r, self.g, self.b)
    }
}

impl MultiAndTrueDistance {
    pub fn resolve(&self) -> f64 {
        median3(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median3_picks_middle_value() {
        assert_eq!(median3(1.0, 2.0, 3.0), 2.0);
        assert_eq!(median3(3.0, 1.0, 2.0), 2.0);
        assert_eq!(median3(-1.0, -1.0, 5.0), -1.0);
    }
}
