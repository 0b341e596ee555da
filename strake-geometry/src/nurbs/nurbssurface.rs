use crate::errors::Error;
use crate::*;

impl<V> NurbsSurface<V> {
    /// Constructs the rationalized B-spline surface.
    #[inline(always)]
    pub const fn new(surface: BSplineSurface<V>) -> Self { NurbsSurface(surface) }

    /// Returns the BSpline surface before rationalized.
    #[inline(always)]
    pub fn non_rationalized(&self) -> &BSplineSurface<V> { &self.0 }

    /// Returns the BSpline surface before rationalized.
    #[inline(always)]
    pub fn into_non_rationalized(self) -> BSplineSurface<V> { self.0 }

    /// Returns the reference of the knot vectors.
    #[inline(always)]
    pub fn knot_vecs(&self) -> &(KnotVec, KnotVec) { &self.0.knot_vecs }

    /// Returns the u knot vector.
    #[inline(always)]
    pub fn uknot_vec(&self) -> &KnotVec { &self.0.knot_vecs.0 }

    /// Returns the v knot vector.
    #[inline(always)]
    pub fn vknot_vec(&self) -> &KnotVec { &self.0.knot_vecs.1 }

    /// Returns the reference of the control points.
    #[inline(always)]
    pub fn control_points(&self) -> &Vec<Vec<V>> { &self.0.control_points }

    /// Returns the reference of the control point corresponding to the index `(idx0, idx1)`.
    #[inline(always)]
    pub fn control_point(&self, idx0: usize, idx1: usize) -> &V {
        &self.0.control_points[idx0][idx1]
    }

    /// Returns the mutable reference of the control point corresponding to index `(idx0, idx1)`.
    #[inline(always)]
    pub fn control_point_mut(&mut self, idx0: usize, idx1: usize) -> &mut V {
        &mut self.0.control_points[idx0][idx1]
    }

    /// Returns the degrees of the surface.
    #[inline(always)]
    pub fn degrees(&self) -> (usize, usize) { self.0.degrees() }

    /// Returns the degree of the surface in the u direction.
    #[inline(always)]
    pub fn udegree(&self) -> usize { self.0.udegree() }

    /// Returns the degree of the surface in the v direction.
    #[inline(always)]
    pub fn vdegree(&self) -> usize { self.0.vdegree() }

    /// Returns whether the knot vectors are clamped or not.
    #[inline(always)]
    pub fn is_clamped(&self) -> bool { self.0.is_clamped() }

    /// Swaps the two parameter directions.
    #[inline(always)]
    pub fn swap_axes(&mut self) -> &mut Self
    where V: Clone {
        self.0.swap_axes();
        self
    }

    /// Returns the parameter range of the surface.
    #[inline(always)]
    pub fn parameter_range(&self) -> ((f64, f64), (f64, f64)) { self.0.parameter_range() }
}

impl NurbsSurface<Vector4> {
    /// Constructs a rational surface from the separated elements: degrees,
    /// knot vectors, the grid of Euclidean control points and the grid of
    /// weights. `None` weights construct a non-rational surface.
    /// # Failures
    /// * If a degree is zero, returns [`Error::ZeroDegree`].
    /// * If the grids are irregular or mismatched, returns [`Error::IrregularControlPoints`].
    /// * If a knot count is inconsistent, returns [`Error::TooShortKnotVector`].
    /// * If a knot vector is not clamped, returns [`Error::NotClampedKnotVector`].
    /// * If some weight is not positive, returns [`Error::NonPositiveWeight`].
    pub fn try_from_elements(
        degrees: (usize, usize),
        knot_vecs: (KnotVec, KnotVec),
        points: &[Vec<Point3>],
        weights: Option<&[Vec<f64>]>,
    ) -> Result<Self> {
        if degrees.0 == 0 || degrees.1 == 0 {
            return Err(Error::ZeroDegree);
        }
        if points.is_empty() || points[0].is_empty() {
            return Err(Error::EmptyControlPoints);
        }
        let (ulen, vlen) = (points.len(), points[0].len());
        if points.iter().any(|row| row.len() != vlen) {
            return Err(Error::IrregularControlPoints);
        }
        if knot_vecs.0.len() != ulen + degrees.0 + 1 {
            return Err(Error::TooShortKnotVector(knot_vecs.0.len(), ulen));
        }
        if knot_vecs.1.len() != vlen + degrees.1 + 1 {
            return Err(Error::TooShortKnotVector(knot_vecs.1.len(), vlen));
        }
        if !knot_vecs.0.is_clamped(degrees.0) || !knot_vecs.1.is_clamped(degrees.1) {
            return Err(Error::NotClampedKnotVector);
        }
        let weights = match weights {
            Some(weights) => {
                if weights.len() != ulen || weights.iter().any(|row| row.len() != vlen) {
                    return Err(Error::IrregularControlPoints);
                }
                weights.to_vec()
            }
            None => vec![vec![1.0; vlen]; ulen],
        };
        for row in &weights {
            if let Some(weight) = row.iter().find(|weight| **weight <= 0.0) {
                return Err(Error::NonPositiveWeight(*weight));
            }
        }
        let ctrl_pts = points
            .iter()
            .zip(&weights)
            .map(|(points_row, weights_row)| {
                points_row
                    .iter()
                    .zip(weights_row)
                    .map(|(pt, weight)| Vector4::from_point_weight(*pt, *weight))
                    .collect()
            })
            .collect();
        Ok(NurbsSurface(BSplineSurface::try_new(knot_vecs, ctrl_pts)?))
    }
}

impl<V: Homogeneous<f64>> NurbsSurface<V> {
    /// Returns the weights of the control points.
    #[inline(always)]
    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.0
            .control_points
            .iter()
            .map(|row| row.iter().map(|pt| pt.weight()).collect())
            .collect()
    }

    /// Returns the closure of substitution.
    #[inline(always)]
    pub fn get_closure(&self) -> impl Fn(f64, f64) -> V::Point + '_ {
        move |u, v| self.subs(u, v)
    }
}

impl<V: Homogeneous<f64>> NurbsSurface<V>
where V::Point: Tolerance
{
    /// Determine whether `self` and `other` is near as the NURBS surfaces or not.
    #[inline(always)]
    pub fn near_as_surface(&self, other: &Self) -> bool {
        self.0
            .sub_near_as_surface(&other.0, 2, move |x, y| x.to_point().near(&y.to_point()))
    }

    /// Determines `self` and `other` is near in square order as the NURBS surfaces or not.
    #[inline(always)]
    pub fn near2_as_surface(&self, other: &Self) -> bool {
        self.0
            .sub_near_as_surface(&other.0, 2, move |x, y| x.to_point().near2(&y.to_point()))
    }
}

impl<V: Homogeneous<f64> + Tolerance> NurbsSurface<V> {
    /// Adds a u knot `x`, and do not change `self` as a surface.
    #[inline(always)]
    pub fn add_uknot(&mut self, x: f64) -> &mut Self {
        self.0.add_uknot(x);
        self
    }

    /// Adds a v knot `x`, and do not change `self` as a surface.
    #[inline(always)]
    pub fn add_vknot(&mut self, x: f64) -> &mut Self {
        self.0.add_vknot(x);
        self
    }

    /// Inserts the given knots in the given direction in turn, and does not
    /// change `self` as a surface.
    #[inline(always)]
    pub fn knot_refine(&mut self, direction: SurfaceDirection, knots: &[f64]) -> &mut Self {
        self.0.knot_refine(direction, knots);
        self
    }

    /// Cuts the surface into two surfaces at the parameter `u`.
    #[inline(always)]
    pub fn ucut(&mut self, u: f64) -> Self { NurbsSurface(self.0.ucut(u)) }

    /// Cuts the surface into two surfaces at the parameter `v`.
    #[inline(always)]
    pub fn vcut(&mut self, v: f64) -> Self { NurbsSurface(self.0.vcut(v)) }

    /// Splits the surface at the parameter `t` across the given direction.
    /// Splitting across both directions splits across `V` first and then
    /// across `U` on each half, so four quadrants are returned in the order
    /// (u-, v-), (u-, v+), (u+, v-), (u+, v+).
    /// # Failures
    /// Returns [`Error::OutOfDomain`] if `t` is not in the open interior of
    /// the parameter range of every direction the split crosses.
    pub fn try_split_at(&self, t: f64, direction: SplitDirection) -> Result<Vec<Self>> {
        let ((u0, u1), (v0, v1)) = self.parameter_range();
        let in_urange = u0 < t && t < u1;
        let in_vrange = v0 < t && t < v1;
        match direction {
            SplitDirection::U => {
                if !in_urange {
                    return Err(Error::OutOfDomain(t));
                }
                let mut former = self.clone();
                let latter = former.ucut(t);
                Ok(vec![former, latter])
            }
            SplitDirection::V => {
                if !in_vrange {
                    return Err(Error::OutOfDomain(t));
                }
                let mut former = self.clone();
                let latter = former.vcut(t);
                Ok(vec![former, latter])
            }
            SplitDirection::Both => {
                if !in_urange || !in_vrange {
                    return Err(Error::OutOfDomain(t));
                }
                let mut former = self.clone();
                let latter = former.vcut(t);
                let mut res = Vec::with_capacity(4);
                for mut half in [former, latter] {
                    let ulatter = half.ucut(t);
                    res.push(half);
                    res.push(ulatter);
                }
                res.swap(1, 2);
                Ok(res)
            }
        }
    }

    /// Splits the surface at the parameter `t` across the given direction.
    /// # Panics
    /// Panic occurs if `t` is out of the domain.
    #[inline(always)]
    pub fn split_at(&self, t: f64, direction: SplitDirection) -> Vec<Self> {
        self.try_split_at(t, direction)
            .unwrap_or_else(|error| panic!("{}", error))
    }

    /// Returns the iso-parametric curve of the surface: the direction names
    /// the fixed parameter, so fixing `u` produces a curve in `v`, and vice
    /// versa.
    #[inline(always)]
    pub fn iso_curve(&self, direction: SurfaceDirection, t: f64) -> NurbsCurve<V> {
        NurbsCurve::new(self.0.iso_curve(direction, t))
    }
}

impl<V: Homogeneous<f64>> ParametricSurface for NurbsSurface<V> {
    type Point = V::Point;
    type Vector = V::Vector;
    #[inline(always)]
    fn subs(&self, u: f64, v: f64) -> Self::Point { self.0.subs(u, v).to_point() }
    #[inline(always)]
    fn uder(&self, u: f64, v: f64) -> Self::Vector {
        self.0.subs(u, v).rat_der(self.0.uder(u, v))
    }
    #[inline(always)]
    fn vder(&self, u: f64, v: f64) -> Self::Vector {
        self.0.subs(u, v).rat_der(self.0.vder(u, v))
    }
    #[inline(always)]
    fn uuder(&self, u: f64, v: f64) -> Self::Vector {
        let ders = self.0.ders(u, v, 2).rat_ders();
        ders[2][0]
    }
    #[inline(always)]
    fn uvder(&self, u: f64, v: f64) -> Self::Vector {
        let ders = self.0.ders(u, v, 2).rat_ders();
        ders[1][1]
    }
    #[inline(always)]
    fn vvder(&self, u: f64, v: f64) -> Self::Vector {
        let ders = self.0.ders(u, v, 2).rat_ders();
        ders[0][2]
    }
    #[inline(always)]
    fn parameter_range(&self) -> ((f64, f64), (f64, f64)) { self.0.parameter_range() }
}

impl ParametricSurface3D for NurbsSurface<Vector4> {}

impl NurbsSurface<Vector4> {
    /// Substitutes to the block of all mixed partial derivatives of the
    /// rational surface up to the total order `order` in Euclidean space.
    #[inline(always)]
    pub fn ders(&self, u: f64, v: f64, order: usize) -> SurfaceDers<Vector3> {
        self.0.ders(u, v, order).rat_ders()
    }

    /// Evaluates the surface at `(u, v)`. The point mode returns the
    /// position vector; the direction modes return unit vectors.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let surface = NurbsSurface::try_from_elements(
    ///     (1, 1),
    ///     (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1)),
    ///     &[
    ///         vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)],
    ///         vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 2.0, 0.0)],
    ///     ],
    ///     None,
    /// )
    /// .unwrap();
    /// let pt = surface.evaluate_at(0.5, 0.5, EvaluateSurfaceDirection::Point);
    /// assert_near!(pt, Vector3::new(0.5, 1.0, 0.0));
    /// let normal = surface.evaluate_at(0.5, 0.5, EvaluateSurfaceDirection::Normal);
    /// assert_near!(normal, Vector3::new(0.0, 0.0, 1.0));
    /// ```
    pub fn evaluate_at(&self, u: f64, v: f64, mode: EvaluateSurfaceDirection) -> Vector3 {
        match mode {
            EvaluateSurfaceDirection::Point => self.subs(u, v).to_vec(),
            EvaluateSurfaceDirection::U => self.uder(u, v).normalize(),
            EvaluateSurfaceDirection::V => self.vder(u, v).normalize(),
            EvaluateSurfaceDirection::Normal => self.normal(u, v),
        }
    }

    /// Returns the bounding box including all dehomogenized control points.
    #[inline(always)]
    pub fn roughly_bounding_box(&self) -> BoundingBox<Point3> {
        self.0
            .control_points
            .iter()
            .flatten()
            .map(|pt| pt.to_point())
            .collect()
    }

    /// Returns the parameters of the point of the surface nearest to `point`.
    ///
    /// The coarse phase samples the surface on a regular grid; the
    /// refinement drives the minimizer on the squared distance.
    #[inline(always)]
    pub fn closest_parameter(&self, point: Point3) -> Option<(f64, f64)> {
        let hint = algo::surface::presearch(self, point, self.parameter_range(), 32);
        algo::surface::search_nearest_parameter(self, point, hint, 100)
    }

    /// Returns the point of the surface nearest to `point`.
    #[inline(always)]
    pub fn closest_point(&self, point: Point3) -> Option<Point3> {
        self.closest_parameter(point).map(|(u, v)| self.subs(u, v))
    }
}

impl SearchNearestParameter for NurbsSurface<Vector4> {
    type Point = Point3;
    type Parameter = (f64, f64);
    #[inline(always)]
    fn search_nearest_parameter(
        &self,
        point: Point3,
        hint: Option<(f64, f64)>,
        trials: usize,
    ) -> Option<(f64, f64)> {
        let hint = hint.unwrap_or_else(|| {
            algo::surface::presearch(self, point, self.parameter_range(), 32)
        });
        algo::surface::search_nearest_parameter(self, point, hint, trials)
    }
}
