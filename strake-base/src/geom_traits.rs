use crate::cgmath64::*;

/// Parametric curves
pub trait ParametricCurve: Clone {
    /// The curve is in the space of `Self::Point`.
    type Point;
    /// The derivation vector of the curve.
    type Vector;
    /// Substitutes the parameter `t`.
    fn subs(&self, t: f64) -> Self::Point;
    /// Returns the derivation.
    fn der(&self, t: f64) -> Self::Vector;
    /// Returns the 2nd-order derivation.
    fn der2(&self, t: f64) -> Self::Vector;
    /// The range of the parameter of the curve.
    fn parameter_range(&self) -> (f64, f64);
    /// The front end point of the curve.
    fn front(&self) -> Self::Point {
        let (t, _) = self.parameter_range();
        self.subs(t)
    }
    /// The back end point of the curve.
    fn back(&self) -> Self::Point {
        let (_, t) = self.parameter_range();
        self.subs(t)
    }
}

/// 3-dimensional parametric curves
pub trait ParametricCurve3D: ParametricCurve<Point = Point3, Vector = Vector3> {}
impl<C: ParametricCurve<Point = Point3, Vector = Vector3>> ParametricCurve3D for C {}

/// Parametric surfaces
pub trait ParametricSurface: Clone {
    /// The surface is in the space of `Self::Point`.
    type Point;
    /// The derivation vector of the surface.
    type Vector;
    /// Substitutes the parameters `(u, v)`.
    fn subs(&self, u: f64, v: f64) -> Self::Point;
    /// Returns the derivation by `u`.
    fn uder(&self, u: f64, v: f64) -> Self::Vector;
    /// Returns the derivation by `v`.
    fn vder(&self, u: f64, v: f64) -> Self::Vector;
    /// Returns the 2nd-order derivation by `u`.
    fn uuder(&self, u: f64, v: f64) -> Self::Vector;
    /// Returns the 2nd-order derivation by both `u` and `v`.
    fn uvder(&self, u: f64, v: f64) -> Self::Vector;
    /// Returns the 2nd-order derivation by `v`.
    fn vvder(&self, u: f64, v: f64) -> Self::Vector;
    /// The range of the parameters of the surface.
    fn parameter_range(&self) -> ((f64, f64), (f64, f64));
}

/// 3-dimensional parametric surfaces
pub trait ParametricSurface3D: ParametricSurface<Point = Point3, Vector = Vector3> {
    /// Returns the normal vector at `(u, v)`.
    #[inline(always)]
    fn normal(&self, u: f64, v: f64) -> Vector3 {
        self.uder(u, v).cross(self.vder(u, v)).normalize()
    }
}

/// Cuts one curve into two curves.
pub trait Cut: ParametricCurve {
    /// Cuts one curve into two curves. Assigns the former curve to `self` and returns the later curve.
    fn cut(&mut self, t: f64) -> Self;
}

/// Inverts a curve
pub trait Invertible: Clone {
    /// Inverts `self`.
    fn invert(&mut self);
    /// Returns the inverse.
    fn inverse(&self) -> Self {
        let mut inverse = self.clone();
        inverse.invert();
        inverse
    }
}

/// Dividable curve
pub trait ParameterDivision1D {
    /// The curve is in the space of `Self::Point`.
    type Point;
    /// Creates the curve division, whose chord deviates from the curve by
    /// no more than `tol`.
    fn parameter_division(&self, range: (f64, f64), tol: f64) -> (Vec<f64>, Vec<Self::Point>);
}

/// Search the nearest parameter to the given point
pub trait SearchNearestParameter {
    /// point
    type Point;
    /// parameter, `f64` for curves and `(f64, f64)` for surfaces
    type Parameter;
    /// Searches the parameter nearest to `point`, starting from `hint` if
    /// one is given. Returns `None` if the search did not converge within
    /// `trials` refinement steps.
    fn search_nearest_parameter(
        &self,
        point: Self::Point,
        hint: Option<Self::Parameter>,
        trials: usize,
    ) -> Option<Self::Parameter>;
}
