use crate::*;
use serde::{Deserialize, Serialize};

/// B-spline curve
/// # Examples
/// ```
/// use strake_geometry::prelude::*;
///
/// // a quadratic Bezier segment
/// let knot_vec = KnotVec::bezier_knot(2);
/// let ctrl_pts = vec![
///     Vector2::new(0.0, 0.0),
///     Vector2::new(1.0, 0.0),
///     Vector2::new(2.0, 2.0),
/// ];
/// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
///
/// // the curve coincides with (2t, 2t^2)
/// const N: usize = 50; // sample size in test
/// for i in 0..=N {
///     let t = i as f64 / N as f64;
///     assert_near2!(bspcurve.subs(t), Vector2::new(2.0 * t, 2.0 * t * t));
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BSplineCurve<V> {
    pub(super) knot_vec: KnotVec,      // the knot vector
    pub(super) control_points: Vec<V>, // the vector of control points
}

/// B-spline surface
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BSplineSurface<V> {
    pub(super) knot_vecs: (KnotVec, KnotVec),
    pub(super) control_points: Vec<Vec<V>>,
}

/// NURBS curve
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct NurbsCurve<V>(pub(super) BSplineCurve<V>);

/// NURBS surface
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct NurbsSurface<V>(pub(super) BSplineSurface<V>);

/// The parameter direction of a surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SurfaceDirection {
    /// the first parameter
    U,
    /// the second parameter
    V,
}

/// The direction of a surface split.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SplitDirection {
    /// split across the first parameter
    U,
    /// split across the second parameter
    V,
    /// split across both parameters
    Both,
}

/// What a surface evaluation returns.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EvaluateSurfaceDirection {
    /// the evaluated point
    Point,
    /// the unitized tangent along the first parameter
    U,
    /// the unitized tangent along the second parameter
    V,
    /// the unit normal
    Normal,
}

mod bspcurve;
mod bspsurface;
mod nurbscurve;
mod nurbssurface;
