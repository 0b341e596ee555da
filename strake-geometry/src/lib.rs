//! # Overview
//! `strake_geometry` is a crate for describing geometrical information:
//! knot vectors, B-spline and NURBS curves and surfaces, and the sampling
//! and division routines over them.

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

/// re-export `strake_base`
pub mod base {
    pub use strake_base::bounding_box::*;
    pub use strake_base::cgmath64::*;
    pub use strake_base::ders::*;
    pub use strake_base::geom_traits::*;
    pub use strake_base::interval::Interval;
    pub use strake_base::minimizer::{MinimizeResult, Minimizer, Termination};
    pub use strake_base::prng::{default_rng, DEFAULT_SEED};
    pub use strake_base::tolerance::*;
    pub use strake_base::{assert_near, assert_near2, prop_assert_near, prop_assert_near2};
}
pub use base::*;

/// Sampling, division, arc length, and search algorithms
pub mod algo;
/// Enumerates `Error`.
pub mod errors;
/// knot vector
pub mod knot_vec;
/// B-spline and NURBS curves and surfaces
pub mod nurbs;
/// Analytic geometric elements: lines, planes, polylines
pub mod specifieds;

pub use errors::Error;
pub use knot_vec::KnotVec;
pub use nurbs::*;
pub use specifieds::*;

/// Error handler for [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// re-exports all the public names of the crate
pub mod prelude {
    pub use crate::base::*;
    pub use crate::errors::Error;
    pub use crate::knot_vec::KnotVec;
    pub use crate::nurbs::*;
    pub use crate::specifieds::*;
    pub use crate::Result;
}

#[doc(hidden)]
#[inline(always)]
pub fn inv_or_zero(delta: f64) -> f64 {
    if delta.so_small() {
        0.0
    } else {
        1.0 / delta
    }
}
