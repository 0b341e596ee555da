//! Basic structs and traits: importing cgmath, geometry traits, tolerance, minimizer

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]
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

/// Defines bounding box
pub mod bounding_box;
/// Redefines vectors, matrices or points with scalar = f64.
pub mod cgmath64;
/// Additional traits for cgmath
pub mod cgmath_extend_traits;
/// Fixed-capacity stacks of curve and surface derivatives
pub mod ders;
/// Traits of parametric curves and surfaces
pub mod geom_traits;
/// Closed parameter interval
pub mod interval;
/// Quasi-Newton unconstrained minimizer
pub mod minimizer;
/// Seedable pseudo-random source
pub mod prng;
/// Setting Tolerance
pub mod tolerance;
