use crate::errors::Error;
use crate::*;

impl<V> NurbsCurve<V> {
    /// Constructs the rationalized B-spline curve.
    #[inline(always)]
    pub const fn new(curve: BSplineCurve<V>) -> Self { NurbsCurve(curve) }

    /// Returns the BSpline curve before rationalized.
    #[inline(always)]
    pub fn non_rationalized(&self) -> &BSplineCurve<V> { &self.0 }

    /// Returns the BSpline curve before rationalized.
    #[inline(always)]
    pub fn into_non_rationalized(self) -> BSplineCurve<V> { self.0 }

    /// Returns the reference of the knot vector.
    #[inline(always)]
    pub fn knot_vec(&self) -> &KnotVec { &self.0.knot_vec }

    /// Returns the `idx`th knot.
    #[inline(always)]
    pub fn knot(&self, idx: usize) -> f64 { self.0.knot_vec[idx] }

    /// Returns the reference of the control points.
    #[inline(always)]
    pub fn control_points(&self) -> &Vec<V> { &self.0.control_points }

    /// Returns the reference of the control point corresponding to the index `idx`.
    #[inline(always)]
    pub fn control_point(&self, idx: usize) -> &V { &self.0.control_points[idx] }

    /// Returns the mutable reference of the control point corresponding to index `idx`.
    #[inline(always)]
    pub fn control_point_mut(&mut self, idx: usize) -> &mut V { &mut self.0.control_points[idx] }

    /// Returns the iterator on all control points
    #[inline(always)]
    pub fn control_points_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.0.control_points.iter_mut()
    }

    /// Apply the given transformation to all control points.
    #[inline(always)]
    pub fn transform_control_points<F: FnMut(&mut V)>(&mut self, f: F) {
        self.0.transform_control_points(f)
    }

    /// Returns the degree of NURBS curve.
    #[inline(always)]
    pub fn degree(&self) -> usize { self.0.degree() }

    /// Inverts a curve.
    #[inline(always)]
    pub fn invert(&mut self) -> &mut Self {
        self.0.invert();
        self
    }

    /// Returns whether the knot vector is clamped or not.
    #[inline(always)]
    pub fn is_clamped(&self) -> bool { self.0.knot_vec.is_clamped(self.0.degree()) }

    /// Normalizes the knot vector.
    #[inline(always)]
    pub fn knot_normalize(&mut self) -> &mut Self {
        self.0.knot_vec.try_normalize().unwrap();
        self
    }

    /// Translates the knot vector.
    #[inline(always)]
    pub fn knot_translate(&mut self, x: f64) -> &mut Self {
        self.0.knot_vec.translate(x);
        self
    }

    /// Returns the parameter range as an interval.
    #[inline(always)]
    pub fn parameter_interval(&self) -> Interval {
        let n = self.0.knot_vec.len();
        Interval::new(self.0.knot_vec[0], self.0.knot_vec[n - 1])
    }
}

impl NurbsCurve<Vector4> {
    /// Constructs a rational curve from the separated elements: degree, knot
    /// vector, Euclidean control points and their weights. `None` weights
    /// construct a non-rational (polynomial) curve.
    /// # Failures
    /// * If `degree` is zero, returns [`Error::ZeroDegree`].
    /// * If `knot_vec.len() != points.len() + degree + 1`, returns [`Error::TooShortKnotVector`].
    /// * If the knot vector is not clamped, returns [`Error::NotClampedKnotVector`].
    /// * If the numbers of points and weights mismatch, returns [`Error::IrregularControlPoints`].
    /// * If some weight is not positive, returns [`Error::NonPositiveWeight`].
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let curve = NurbsCurve::try_from_elements(
    ///     2,
    ///     KnotVec::bezier_knot(2),
    ///     &[
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(1.0, 1.0, 0.0),
    ///         Point3::new(0.0, 2.0, 0.0),
    ///     ],
    ///     Some(&[1.0, 1.0, 2.0]),
    /// )
    /// .unwrap();
    /// assert_eq!(curve.degree(), 2);
    /// assert_near!(curve.front(), Point3::new(1.0, 0.0, 0.0));
    /// assert_near!(curve.back(), Point3::new(0.0, 2.0, 0.0));
    /// ```
    pub fn try_from_elements(
        degree: usize,
        knot_vec: KnotVec,
        points: &[Point3],
        weights: Option<&[f64]>,
    ) -> Result<Self> {
        if degree == 0 {
            return Err(Error::ZeroDegree);
        }
        if knot_vec.len() != points.len() + degree + 1 {
            return Err(Error::TooShortKnotVector(knot_vec.len(), points.len()));
        }
        if !knot_vec.is_clamped(degree) {
            return Err(Error::NotClampedKnotVector);
        }
        let weights = match weights {
            Some(weights) => {
                if weights.len() != points.len() {
                    return Err(Error::IrregularControlPoints);
                }
                weights.to_vec()
            }
            None => vec![1.0; points.len()],
        };
        if let Some(weight) = weights.iter().find(|weight| **weight <= 0.0) {
            return Err(Error::NonPositiveWeight(*weight));
        }
        let ctrl_pts = points
            .iter()
            .zip(&weights)
            .map(|(pt, weight)| Vector4::from_point_weight(*pt, *weight))
            .collect();
        Ok(NurbsCurve(BSplineCurve::try_new(knot_vec, ctrl_pts)?))
    }
}

impl<V: Homogeneous<f64>> NurbsCurve<V> {
    /// Returns the weights of the control points.
    #[inline(always)]
    pub fn weights(&self) -> Vec<f64> {
        self.0.control_points.iter().map(|pt| pt.weight()).collect()
    }

    /// Returns the closure of substitution.
    #[inline(always)]
    pub fn get_closure(&self) -> impl Fn(f64) -> V::Point + '_ { move |t| self.subs(t) }
}

impl<V: Homogeneous<f64>> NurbsCurve<V>
where V::Point: Tolerance
{
    /// Returns whether all control points are the same or not.
    /// If the knot vector is clamped, it means whether the curve is constant or not.
    pub fn is_const(&self) -> bool {
        let pt = self.0.control_points[0].to_point();
        self.0
            .control_points
            .iter()
            .all(move |vec| vec.to_point().near(&pt))
    }

    /// Determine whether `self` and `other` is near as the NURBS curves or not.
    ///
    /// Divides each knot interval into the number of degree equal parts,
    /// and check `|self(t) - other(t)| < TOLERANCE` for each end points `t`.
    #[inline(always)]
    pub fn near_as_curve(&self, other: &Self) -> bool {
        self.0
            .sub_near_as_curve(&other.0, 2, move |x, y| x.to_point().near(&y.to_point()))
    }

    /// Determines `self` and `other` is near in square order as the NURBS curves or not.
    #[inline(always)]
    pub fn near2_as_curve(&self, other: &Self) -> bool {
        self.0
            .sub_near_as_curve(&other.0, 2, move |x, y| x.to_point().near2(&y.to_point()))
    }
}

impl<V: Homogeneous<f64> + Tolerance> NurbsCurve<V> {
    /// Adds a knot `x`, and do not change `self` as a curve.
    pub fn add_knot(&mut self, x: f64) -> &mut Self {
        self.0.add_knot(x);
        self
    }

    /// Inserts the given knots in turn, and does not change `self` as a curve.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let curve = NurbsCurve::try_from_elements(
    ///     2,
    ///     KnotVec::bezier_knot(2),
    ///     &[
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(1.0, 1.0, 0.0),
    ///         Point3::new(0.0, 2.0, 0.0),
    ///     ],
    ///     Some(&[1.0, 1.0, 2.0]),
    /// )
    /// .unwrap();
    /// let mut refined = curve.clone();
    /// refined.knot_refine(&[0.25, 0.5, 0.75]);
    /// assert_eq!(refined.knot_vec().len(), curve.knot_vec().len() + 3);
    /// assert!(refined.near2_as_curve(&curve));
    /// ```
    pub fn knot_refine(&mut self, knots: &[f64]) -> &mut Self {
        self.0.knot_refine(knots);
        self
    }

    /// Removes a knot corresponding to the index `idx`, and do not change `self` as a curve.
    /// If cannot remove the knot, do not change `self` and return `self`.
    pub fn remove_knot(&mut self, idx: usize) -> &mut Self {
        let _ = self.try_remove_knot(idx);
        self
    }

    /// Removes a knot corresponding to the index `idx`, and do not change `self` as a curve.
    /// If the knot cannot be removed, returns [`Error::CannotRemoveKnot`].
    pub fn try_remove_knot(&mut self, idx: usize) -> Result<&mut Self> {
        self.0.try_remove_knot(idx)?;
        Ok(self)
    }

    /// Elevates the degree up to `degree`. If `degree` is not more than the
    /// current degree, the curve is left unchanged.
    pub fn elevate_degree_to(&mut self, degree: usize) -> &mut Self {
        self.0.elevate_degree_to(degree);
        self
    }

    /// Makes the curve clamped.
    #[inline(always)]
    pub fn clamp(&mut self) -> &mut Self {
        self.0.clamp();
        self
    }

    /// Cuts the curve to two curves at the parameter `t`.
    #[inline(always)]
    pub fn cut(&mut self, t: f64) -> Self { NurbsCurve(self.0.cut(t)) }

    /// Splits the curve at the parameter `t`.
    /// # Failures
    /// Returns [`Error::OutOfDomain`] if `t` is not in the open interior of
    /// the parameter range, i.e. if one of the halves would have no interior
    /// domain.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let curve = NurbsCurve::try_from_elements(
    ///     2,
    ///     KnotVec::bezier_knot(2),
    ///     &[
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 2.0, 0.0),
    ///         Point3::new(2.0, 0.0, 0.0),
    ///     ],
    ///     None,
    /// )
    /// .unwrap();
    /// let (left, right) = curve.try_split_at(0.4).unwrap();
    /// assert_near!(left.back(), right.front());
    /// assert_near!(left.back(), curve.subs(0.4));
    /// assert_eq!(curve.try_split_at(1.0), Err(Error::OutOfDomain(1.0)));
    /// ```
    pub fn try_split_at(&self, t: f64) -> Result<(Self, Self)> {
        let range = self.parameter_interval();
        if t <= range.t0() || range.t1() <= t {
            return Err(Error::OutOfDomain(t));
        }
        let mut former = self.clone();
        let latter = former.cut(t);
        Ok((former, latter))
    }

    /// Splits the curve at the parameter `t`.
    /// # Panics
    /// Panic occurs if `t` is not in the open interior of the parameter range.
    #[inline(always)]
    pub fn split_at(&self, t: f64) -> (Self, Self) {
        self.try_split_at(t)
            .unwrap_or_else(|error| panic!("{}", error))
    }

    /// Separates `self` into Bezier curves by each knots. If `normalize` is
    /// true, the knot vector of each segment is normalized to `[0, 1]`.
    pub fn bezier_decomposition(&self, normalize: bool) -> Vec<Self> {
        let mut beziers: Vec<_> = self
            .0
            .bezier_decomposition()
            .into_iter()
            .map(NurbsCurve)
            .collect();
        if normalize {
            beziers.iter_mut().for_each(|bezier| {
                bezier.knot_normalize();
            });
        }
        beziers
    }

    /// Concats two NURBS curves.
    pub fn try_concat(&mut self, other: &mut Self) -> Result<&mut Self> {
        self.0.try_concat(&mut other.0)?;
        Ok(self)
    }
}

impl<V: Homogeneous<f64>> ParametricCurve for NurbsCurve<V> {
    type Point = V::Point;
    type Vector = V::Vector;
    #[inline(always)]
    fn subs(&self, t: f64) -> Self::Point { self.0.subs(t).to_point() }
    #[inline(always)]
    fn der(&self, t: f64) -> Self::Vector { self.0.subs(t).rat_der(self.0.der(t)) }
    #[inline(always)]
    fn der2(&self, t: f64) -> Self::Vector {
        let pt = self.0.subs(t);
        pt.rat_der2(self.0.der(t), self.0.der2(t))
    }
    #[inline(always)]
    fn parameter_range(&self) -> (f64, f64) {
        (
            self.0.knot_vec[0],
            self.0.knot_vec[self.0.knot_vec.len() - 1],
        )
    }
}

impl<V: Homogeneous<f64> + Tolerance> Cut for NurbsCurve<V> {
    #[inline(always)]
    fn cut(&mut self, t: f64) -> Self { self.cut(t) }
}

impl<V: Clone> Invertible for NurbsCurve<V> {
    #[inline(always)]
    fn invert(&mut self) { self.0.invert(); }
}

impl NurbsCurve<Vector4> {
    /// Substitutes to all derived rational curves up to the order `order`
    /// in Euclidean space.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// // a quarter of the unit circle
    /// let curve = NurbsCurve::try_from_elements(
    ///     2,
    ///     KnotVec::bezier_knot(2),
    ///     &[
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(1.0, 1.0, 0.0),
    ///         Point3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     Some(&[1.0, f64::sqrt(2.0) / 2.0, 1.0]),
    /// )
    /// .unwrap();
    /// let ders = curve.ders(0.5, 1);
    /// // the point lies on the unit circle, the tangent is orthogonal to it
    /// assert_near!(ders[0].magnitude(), 1.0);
    /// assert!(ders[0].dot(ders[1]).abs() < 1.0e-6);
    /// ```
    #[inline(always)]
    pub fn ders(&self, t: f64, order: usize) -> CurveDers<Vector3> {
        self.0.ders(t, order).rat_ders()
    }

    /// Substitutes to the `n`th derived rational curve in Euclidean space.
    #[inline(always)]
    pub fn der_n(&self, t: f64, n: usize) -> Vector3 { self.ders(t, n)[n] }

    /// Returns the unitized tangent vector at `t`.
    #[inline(always)]
    pub fn tangent_at(&self, t: f64) -> Vector3 { ParametricCurve::der(self, t).normalize() }

    /// Returns the bounding box including all dehomogenized control points.
    /// By the convex-hull property the curve lies inside.
    #[inline(always)]
    pub fn roughly_bounding_box(&self) -> BoundingBox<Point3> {
        self.0
            .control_points
            .iter()
            .map(|pt| pt.to_point())
            .collect()
    }

    /// Returns the total arc length of the curve.
    #[inline(always)]
    pub fn length(&self) -> f64 { algo::curve::length(self) }

    /// Returns the arc length of the part of the curve from the front to `t`.
    #[inline(always)]
    pub fn length_at(&self, t: f64) -> f64 { algo::curve::length_at(self, t) }

    /// Returns the parameter `t` such that `self.length_at(t) == length`.
    /// Lengths outside `[0, length()]` clamp to the corresponding end.
    #[inline(always)]
    pub fn parameter_at_length(&self, length: f64) -> f64 {
        algo::curve::parameter_at_length(self, length)
    }

    /// Divides the curve into `n` parts of equal arc length. Returns the
    /// parallel lists of the `n + 1` division parameters and their arc
    /// lengths, both monotone non-decreasing and including the endpoints.
    #[inline(always)]
    pub fn divide_by_count(&self, n: usize) -> (Vec<f64>, Vec<f64>) {
        algo::curve::divide_by_count(self, n)
    }

    /// Divides the curve by the arc length `length`. The endpoints are
    /// always included; a length longer than the whole curve returns only
    /// the endpoints.
    #[inline(always)]
    pub fn divide_by_length(&self, length: f64) -> (Vec<f64>, Vec<f64>) {
        algo::curve::divide_by_length(self, length)
    }

    /// Samples `n` points at parameters uniform in the raw knot domain.
    #[inline(always)]
    pub fn regular_sample(&self, n: usize) -> (Vec<f64>, Vec<Point3>) {
        algo::curve::regular_sample(self, n)
    }

    /// Adaptively samples the curve with the injected random probe. A
    /// degree-one curve returns its knots and control points directly.
    /// Tolerances not more than zero are replaced by [`MAX_TOLERANCE`].
    pub fn adaptive_sample_with(
        &self,
        tol: f64,
        rng: &mut impl rand::Rng,
    ) -> (Vec<f64>, Vec<Point3>) {
        if self.degree() == 1 {
            let (knots, _) = self.knot_vec().to_single_multi();
            let points = self.0.control_points.iter().map(|pt| pt.to_point()).collect();
            (knots, points)
        } else {
            algo::curve::parameter_division(self, self.parameter_range(), tol, rng)
        }
    }

    /// Adaptively samples the curve with the default deterministic probe.
    #[inline(always)]
    pub fn adaptive_sample(&self, tol: f64) -> (Vec<f64>, Vec<Point3>) {
        self.adaptive_sample_with(tol, &mut default_rng())
    }

    /// Returns the parameter of the point of the curve nearest to `point`.
    ///
    /// The coarse phase samples the curve regularly; the refinement drives
    /// the minimizer on the squared distance.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let curve = NurbsCurve::try_from_elements(
    ///     2,
    ///     KnotVec::bezier_knot(2),
    ///     &[
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 2.0, 0.0),
    ///         Point3::new(2.0, 0.0, 0.0),
    ///     ],
    ///     None,
    /// )
    /// .unwrap();
    /// let pt = curve.subs(0.4);
    /// let t = curve.closest_parameter(pt).unwrap();
    /// assert_near!(t, 0.4);
    /// ```
    #[inline(always)]
    pub fn closest_parameter(&self, point: Point3) -> Option<f64> {
        let hint = algo::curve::presearch(self, point, self.parameter_range(), 50);
        algo::curve::search_nearest_parameter(self, point, hint, 100)
    }

    /// Returns the point of the curve nearest to `point`.
    #[inline(always)]
    pub fn closest_point(&self, point: Point3) -> Option<Point3> {
        self.closest_parameter(point).map(|t| self.subs(t))
    }
}

impl ParameterDivision1D for NurbsCurve<Vector4> {
    type Point = Point3;
    #[inline(always)]
    fn parameter_division(&self, range: (f64, f64), tol: f64) -> (Vec<f64>, Vec<Point3>) {
        algo::curve::parameter_division(self, range, tol, &mut default_rng())
    }
}

impl SearchNearestParameter for NurbsCurve<Vector4> {
    type Point = Point3;
    type Parameter = f64;
    #[inline(always)]
    fn search_nearest_parameter(
        &self,
        point: Point3,
        hint: Option<f64>,
        trials: usize,
    ) -> Option<f64> {
        let hint = hint
            .unwrap_or_else(|| algo::curve::presearch(self, point, self.parameter_range(), 50));
        algo::curve::search_nearest_parameter(self, point, hint, trials)
    }
}
