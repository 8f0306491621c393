//! Error types for the few entry points that can reject their input.
//!
//! The per-pixel generation loops stay infallible by construction (spec §4.10):
//! an invalid [`crate::shape::Shape`] produces garbage distances, not a panic.
//! `Error` exists for the boundary calls that *can* meaningfully fail.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("shape failed validation: contours are not closed or an edge endpoint does not chain to the next edge's start")]
    InvalidShape,

    #[error("degenerate geometry encountered; a local substitution was used instead")]
    DegenerateGeometry,

    #[error("numerical solver failed to converge; falling back to endpoint distance")]
    NumericalFailure,

    #[error("requested configuration is not supported here and was silently downgraded: {0}")]
    ConfigMismatch(&'static str),
}
