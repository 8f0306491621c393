//! Signed and multi-channel signed distance field generation for vector
//! shapes: build a [`Shape`] out of line/quadratic/cubic contours, color its
//! edges, then generate an SDF, PSDF, MSDF, or MTSDF bitmap from it.
//!
//! The crate is split the way the algorithm itself is staged:
//! - [`vector`], [`equation_solver`], [`edge_segment`], [`edge_color`],
//!   [`signed_distance`] — geometry primitives.
//! - [`contour`], [`shape`], [`scanline`] — the shape representation and its
//!   scanline fill-rule query.
//! - [`edge_coloring`] — assigns per-edge RGB channel masks ahead of MSDF
//!   generation.
//! - [`edge_selector`], [`contour_combiner`] — the per-pixel nearest-edge
//!   accumulation protocol.
//! - [`generator_config`], [`projection`], [`generate`] — configuration and
//!   the generator entry points themselves.
//! - [`error_correction`], [`sign_correction`] — post-processing passes run
//!   after generation.
//! - [`bitmap`] — the output pixel buffer.
//! - [`error`] — the handful of fallible boundary operations.

#![allow(dead_code)]

pub mod bitmap;
pub mod contour;
pub mod contour_combiner;
pub mod edge_color;
pub mod edge_coloring;
pub mod edge_segment;
pub mod edge_selector;
pub mod equation_solver;
pub mod error;
pub mod error_correction;
pub mod generate;
pub mod generator_config;
pub mod projection;
pub mod scanline;
pub mod shape;
pub mod sign_correction;
pub mod signed_distance;
pub mod vector;

#[cfg(feature = "ttf-parser")]
pub mod ttf_adapter;

pub use bitmap::{Bitmap, MsdfBitmap, MtsdfBitmap, SdfBitmap};
pub use contour::Contour;
pub use contour_combiner::{ContourCombiner, ResolvableDistance, SimpleContourCombiner};
pub use edge_color::{EdgeColor, MultiAndTrueDistance, MultiDistance};
pub use edge_segment::EdgeSegment;
pub use edge_selector::{
    EdgeSelector, MultiAndTrueDistanceSelector, MultiDistanceSelector, PseudoDistanceSelector,
    TrueDistanceSelector,
};
pub use error::Error;
pub use error_correction::{legacy_correct, msdf_error_correction};
pub use generate::{generate_mtsdf, generate_msdf, generate_psdf, generate_sdf};
pub use generator_config::{
    DistanceCheckMode, ErrorCorrectionConfig, ErrorCorrectionMode, GeneratorConfig,
};
pub use projection::Projection;
pub use scanline::{FillRule, Scanline};
pub use shape::Shape;
pub use sign_correction::{distance_sign_correction_msdf, distance_sign_correction_sdf};
pub use signed_distance::SignedDistance;
pub use vector::Vector2;

#[cfg(feature = "ttf-parser")]
pub use ttf_adapter::ShapeBuilder;
