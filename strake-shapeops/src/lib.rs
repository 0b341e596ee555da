//! Intersection queries over curves, surfaces, and analytic elements.
//!
//! Closed forms handle the plane/line family; curve-curve and curve-plane
//! queries prune candidates with the lazy subdivision trees and refine them
//! with the quasi-Newton minimizer.

#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

/// Intersection records and queries
pub mod intersection;
/// Lazy subdivision trees over curves and surfaces
pub mod subdivision;

pub use intersection::*;
pub use subdivision::*;
