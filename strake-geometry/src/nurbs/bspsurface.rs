use crate::errors::Error;
use crate::*;

impl<V> BSplineSurface<V> {
    /// constructor.
    /// # Arguments
    /// * `knot_vecs` - the knot vectors of the u and v directions
    /// * `control_points` - the rectangular grid of control points,
    ///   `control_points[i][j]` corresponding to `(u, v) = (i, j)`
    /// # Panics
    /// Panics occurs if:
    /// * The grid of control points is empty or not rectangular.
    /// * The numbers of knots are not consistent with the grid.
    /// * The range of a knot vector is zero.
    pub fn new(knot_vecs: (KnotVec, KnotVec), control_points: Vec<Vec<V>>) -> BSplineSurface<V> {
        BSplineSurface::try_new(knot_vecs, control_points).unwrap_or_else(|e| panic!("{}", e))
    }

    /// constructor.
    /// # Failures
    /// * If the grid of control points is empty, returns [`Error::EmptyControlPoints`].
    /// * If the grid is not rectangular, returns [`Error::IrregularControlPoints`].
    /// * If the numbers of knots are not consistent with the grid, returns [`Error::TooShortKnotVector`].
    /// * If the range of a knot vector is zero, returns [`Error::ZeroRange`].
    pub fn try_new(
        knot_vecs: (KnotVec, KnotVec),
        control_points: Vec<Vec<V>>,
    ) -> Result<BSplineSurface<V>> {
        if control_points.is_empty() || control_points[0].is_empty() {
            return Err(Error::EmptyControlPoints);
        }
        let ulen = control_points.len();
        let vlen = control_points[0].len();
        if control_points.iter().any(|row| row.len() != vlen) {
            return Err(Error::IrregularControlPoints);
        }
        if knot_vecs.0.len() <= ulen {
            return Err(Error::TooShortKnotVector(knot_vecs.0.len(), ulen));
        }
        if knot_vecs.1.len() <= vlen {
            return Err(Error::TooShortKnotVector(knot_vecs.1.len(), vlen));
        }
        if knot_vecs.0.range_length().so_small() || knot_vecs.1.range_length().so_small() {
            return Err(Error::ZeroRange);
        }
        Ok(BSplineSurface::new_unchecked(knot_vecs, control_points))
    }

    /// constructor.
    /// # Remarks
    /// This method does NOT check the rules for constructing B-spline surface.
    /// The programmer must guarantee these conditions before using this method.
    #[inline(always)]
    pub const fn new_unchecked(
        knot_vecs: (KnotVec, KnotVec),
        control_points: Vec<Vec<V>>,
    ) -> BSplineSurface<V> {
        BSplineSurface {
            knot_vecs,
            control_points,
        }
    }

    /// constructor.
    /// # Remarks
    /// This method checks the rules for constructing B-spline surface in the debug mode.
    /// The programmer must guarantee these conditions before using this method.
    #[inline(always)]
    pub fn debug_new(
        knot_vecs: (KnotVec, KnotVec),
        control_points: Vec<Vec<V>>,
    ) -> BSplineSurface<V> {
        match cfg!(debug_assertions) {
            true => Self::new(knot_vecs, control_points),
            false => Self::new_unchecked(knot_vecs, control_points),
        }
    }

    /// Returns the reference of the knot vectors
    #[inline(always)]
    pub fn knot_vecs(&self) -> &(KnotVec, KnotVec) { &self.knot_vecs }

    /// Returns the u knot vector.
    #[inline(always)]
    pub fn uknot_vec(&self) -> &KnotVec { &self.knot_vecs.0 }

    /// Returns the v knot vector.
    #[inline(always)]
    pub fn vknot_vec(&self) -> &KnotVec { &self.knot_vecs.1 }

    /// Returns the `idx`th u knot.
    #[inline(always)]
    pub fn uknot(&self, idx: usize) -> f64 { self.knot_vecs.0[idx] }

    /// Returns the `idx`th v knot.
    #[inline(always)]
    pub fn vknot(&self, idx: usize) -> f64 { self.knot_vecs.1[idx] }

    /// Returns the reference of the control points.
    #[inline(always)]
    pub fn control_points(&self) -> &Vec<Vec<V>> { &self.control_points }

    /// Returns the reference of the control point corresponding to the index `(idx0, idx1)`.
    #[inline(always)]
    pub fn control_point(&self, idx0: usize, idx1: usize) -> &V { &self.control_points[idx0][idx1] }

    /// Returns the mutable reference of the control point corresponding to index `(idx0, idx1)`.
    #[inline(always)]
    pub fn control_point_mut(&mut self, idx0: usize, idx1: usize) -> &mut V {
        &mut self.control_points[idx0][idx1]
    }

    /// Apply the given transformation to all control points.
    #[inline(always)]
    pub fn transform_control_points<F: FnMut(&mut V)>(&mut self, f: F) {
        self.control_points.iter_mut().flatten().for_each(f)
    }

    /// Returns the degree of B-spline surface in the u direction.
    #[inline(always)]
    pub fn udegree(&self) -> usize { self.knot_vecs.0.len() - self.control_points.len() - 1 }

    /// Returns the degree of B-spline surface in the v direction.
    #[inline(always)]
    pub fn vdegree(&self) -> usize { self.knot_vecs.1.len() - self.control_points[0].len() - 1 }

    /// Returns the degrees of B-spline surface.
    #[inline(always)]
    pub fn degrees(&self) -> (usize, usize) { (self.udegree(), self.vdegree()) }

    /// Returns whether the knot vectors are clamped or not.
    #[inline(always)]
    pub fn is_clamped(&self) -> bool {
        self.knot_vecs.0.is_clamped(self.udegree()) && self.knot_vecs.1.is_clamped(self.vdegree())
    }

    /// Swaps the two parameter directions.
    pub fn swap_axes(&mut self) -> &mut Self
    where V: Clone {
        std::mem::swap(&mut self.knot_vecs.0, &mut self.knot_vecs.1);
        let vlen = self.control_points[0].len();
        let mut transposed = vec![Vec::with_capacity(self.control_points.len()); vlen];
        for row in &self.control_points {
            for (column, pt) in transposed.iter_mut().zip(row) {
                column.push(pt.clone());
            }
        }
        self.control_points = transposed;
        self
    }

    /// Returns the parameter range of the surface.
    #[inline(always)]
    pub fn parameter_range(&self) -> ((f64, f64), (f64, f64)) {
        (
            (
                self.knot_vecs.0[0],
                self.knot_vecs.0[self.knot_vecs.0.len() - 1],
            ),
            (
                self.knot_vecs.1[0],
                self.knot_vecs.1[self.knot_vecs.1.len() - 1],
            ),
        )
    }
}

impl<V: VectorSpace<Scalar = f64>> BSplineSurface<V> {
    /// Substitutes to a B-spline surface.
    ///
    /// Both spans are looked up and the tensor product of the non-vanishing
    /// basis functions is accumulated over the local control window.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vecs = (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1));
    /// let ctrl_pts = vec![
    ///     vec![Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0)],
    ///     vec![Vector2::new(1.0, 0.0), Vector2::new(1.0, 2.0)],
    /// ];
    /// let bspsurface = BSplineSurface::new(knot_vecs, ctrl_pts);
    ///
    /// // bspsurface: (u, v(1 + u))
    /// const N: usize = 50; // sample size
    /// for i in 0..=N {
    ///     let u = (i as f64) / (N as f64);
    ///     for j in 0..=N {
    ///         let v = (j as f64) / (N as f64);
    ///         assert_near2!(bspsurface.subs(u, v), Vector2::new(u, v * (1.0 + u)));
    ///     }
    /// }
    /// ```
    pub fn subs(&self, u: f64, v: f64) -> V {
        let (udegree, vdegree) = self.degrees();
        let uspan = self.knot_vecs.0.span(udegree, u);
        let vspan = self.knot_vecs.1.span(vdegree, v);
        let ubasis = self.knot_vecs.0.basis_functions(udegree, uspan, u);
        let vbasis = self.knot_vecs.1.basis_functions(vdegree, vspan, v);
        let mut sum = V::zero();
        for (i, ub) in ubasis.iter().enumerate() {
            let row = &self.control_points[uspan - udegree + i];
            for (j, vb) in vbasis.iter().enumerate() {
                sum = sum + row[vspan - vdegree + j] * (*ub * *vb);
            }
        }
        sum
    }

    /// Substitutes derived B-spline surface by the first parameter `u`.
    #[inline(always)]
    pub fn uder(&self, u: f64, v: f64) -> V { self.ders(u, v, 1)[1][0] }

    /// Substitutes derived B-spline surface by the second parameter `v`.
    #[inline(always)]
    pub fn vder(&self, u: f64, v: f64) -> V { self.ders(u, v, 1)[0][1] }

    /// Substitutes to the block of all mixed partial derivatives of the
    /// surface up to the total order `order`.
    ///
    /// The entry `[k][l]` is the derivative by `u` of order `k` and by `v`
    /// of order `l`; entries with `k + l > order` are not computed.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vecs = (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1));
    /// let ctrl_pts = vec![
    ///     vec![Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0)],
    ///     vec![Vector2::new(1.0, 0.0), Vector2::new(1.0, 2.0)],
    /// ];
    /// let bspsurface = BSplineSurface::new(knot_vecs, ctrl_pts);
    ///
    /// // bspsurface: (u, v(1 + u))
    /// let (u, v) = (0.25, 0.75);
    /// let ders = bspsurface.ders(u, v, 2);
    /// assert_near2!(ders[0][0], bspsurface.subs(u, v));
    /// assert_near2!(ders[1][0], Vector2::new(1.0, v));
    /// assert_near2!(ders[0][1], Vector2::new(0.0, 1.0 + u));
    /// assert_near2!(ders[1][1], Vector2::new(0.0, 1.0));
    /// assert_near2!(ders[0][2], Vector2::new(0.0, 0.0));
    /// ```
    pub fn ders(&self, u: f64, v: f64, order: usize) -> SurfaceDers<V> {
        let (udegree, vdegree) = self.degrees();
        let (uknot_vec, vknot_vec) = (&self.knot_vecs.0, &self.knot_vecs.1);
        let uspan = uknot_vec.span(udegree, u);
        let vspan = vknot_vec.span(vdegree, v);
        let uders = uknot_vec.basis_ders(udegree, uspan, u, order);
        let vders = vknot_vec.basis_ders(vdegree, vspan, v, order);
        let mut ders = SurfaceDers::new(order);
        for k in 0..=order {
            for l in 0..=(order - k) {
                let mut sum = V::zero();
                for (i, ubasis) in uders[k].iter().enumerate() {
                    for (j, vbasis) in vders[l].iter().enumerate() {
                        let pt = self.control_points[uspan - udegree + i][vspan - vdegree + j];
                        sum = sum + pt * (*ubasis * *vbasis);
                    }
                }
                ders[k][l] = sum;
            }
        }
        ders
    }

    /// Returns the iso-parametric curve of the surface: the direction names
    /// the fixed parameter, so fixing `u` produces a curve in `v` whose
    /// degree and knot vector are those of the v direction, and vice versa.
    ///
    /// The control points of the iso-curve are the opposite-direction rows
    /// contracted against the non-vanishing basis functions at `t`.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vecs = (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1));
    /// let ctrl_pts = vec![
    ///     vec![Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0)],
    ///     vec![Vector2::new(1.0, 0.0), Vector2::new(1.0, 2.0)],
    /// ];
    /// let bspsurface = BSplineSurface::new(knot_vecs, ctrl_pts);
    ///
    /// // the surface is (u, v(1 + u)); fixing u = 0.5 leaves (0.5, 1.5 v)
    /// let curve = bspsurface.iso_curve(SurfaceDirection::U, 0.5);
    /// const N: usize = 50;
    /// for i in 0..=N {
    ///     let v = (i as f64) / (N as f64);
    ///     assert_near2!(curve.subs(v), Vector2::new(0.5, 1.5 * v));
    /// }
    /// ```
    pub fn iso_curve(&self, direction: SurfaceDirection, t: f64) -> BSplineCurve<V> {
        match direction {
            SurfaceDirection::U => {
                let degree = self.udegree();
                let span = self.knot_vecs.0.span(degree, t);
                let basis = self.knot_vecs.0.basis_functions(degree, span, t);
                let vlen = self.control_points[0].len();
                let ctrl_pts = (0..vlen)
                    .map(|j| {
                        basis.iter().enumerate().fold(V::zero(), |sum, (i, b)| {
                            sum + self.control_points[span - degree + i][j] * *b
                        })
                    })
                    .collect();
                BSplineCurve::new_unchecked(self.knot_vecs.1.clone(), ctrl_pts)
            }
            SurfaceDirection::V => {
                let degree = self.vdegree();
                let span = self.knot_vecs.1.span(degree, t);
                let basis = self.knot_vecs.1.basis_functions(degree, span, t);
                let ctrl_pts = self
                    .control_points
                    .iter()
                    .map(|row| {
                        basis.iter().enumerate().fold(V::zero(), |sum, (j, b)| {
                            sum + row[span - degree + j] * *b
                        })
                    })
                    .collect();
                BSplineCurve::new_unchecked(self.knot_vecs.0.clone(), ctrl_pts)
            }
        }
    }

    pub(crate) fn sub_near_as_surface<F: Fn(&V, &V) -> bool>(
        &self,
        other: &BSplineSurface<V>,
        div_coef: usize,
        ord: F,
    ) -> bool {
        if !self.knot_vecs.0.same_range(&other.knot_vecs.0)
            || !self.knot_vecs.1.same_range(&other.knot_vecs.1)
        {
            return false;
        }
        let udivision = self.udegree().max(other.udegree()) * div_coef;
        let vdivision = self.vdegree().max(other.vdegree()) * div_coef;
        self.knot_vecs.0.windows(2).all(|uwindow| {
            let udelta = uwindow[1] - uwindow[0];
            if udelta.so_small() {
                return true;
            }
            self.knot_vecs.1.windows(2).all(|vwindow| {
                let vdelta = vwindow[1] - vwindow[0];
                if vdelta.so_small() {
                    return true;
                }
                (0..udivision).all(|a| {
                    let u = uwindow[0] + udelta * (a as f64) / (udivision as f64);
                    (0..vdivision).all(|b| {
                        let v = vwindow[0] + vdelta * (b as f64) / (vdivision as f64);
                        ord(&self.subs(u, v), &other.subs(u, v))
                    })
                })
            })
        })
    }
}

impl<V: VectorSpace<Scalar = f64> + Tolerance> BSplineSurface<V> {
    /// Decomposes the grid into the curves along the u direction, one per
    /// v-column of control points.
    fn u_curves(&self) -> Vec<BSplineCurve<V>> {
        let vlen = self.control_points[0].len();
        (0..vlen)
            .map(|j| {
                let ctrl_pts = self.control_points.iter().map(|row| row[j]).collect();
                BSplineCurve::new_unchecked(self.knot_vecs.0.clone(), ctrl_pts)
            })
            .collect()
    }

    /// Reassembles the grid from the curves along the u direction.
    fn assemble_u_curves(curves: &[BSplineCurve<V>]) -> Vec<Vec<V>> {
        let ulen = curves[0].control_points().len();
        (0..ulen)
            .map(|i| curves.iter().map(|curve| curve.control_points()[i]).collect())
            .collect()
    }

    /// Adds a u knot `x`, and do not change `self` as a surface.
    pub fn add_uknot(&mut self, x: f64) -> &mut Self {
        let mut curves = self.u_curves();
        curves.iter_mut().for_each(|curve| {
            curve.add_knot(x);
        });
        self.knot_vecs.0 = curves[0].knot_vec().clone();
        self.control_points = Self::assemble_u_curves(&curves);
        self
    }

    /// Adds a v knot `x`, and do not change `self` as a surface.
    pub fn add_vknot(&mut self, x: f64) -> &mut Self {
        self.swap_axes();
        self.add_uknot(x);
        self.swap_axes();
        self
    }

    /// Inserts the given knots in the given direction in turn, and does not
    /// change `self` as a surface. The opposite-direction knot vector is
    /// left untouched.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vecs = (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1));
    /// let ctrl_pts = vec![
    ///     vec![Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0)],
    ///     vec![Vector2::new(1.0, 0.0), Vector2::new(1.0, 2.0)],
    /// ];
    /// let bspsurface = BSplineSurface::new(knot_vecs, ctrl_pts);
    /// let mut refined = bspsurface.clone();
    /// refined.knot_refine(SurfaceDirection::V, &[0.25, 0.5]);
    /// assert_eq!(refined.vknot_vec().len(), bspsurface.vknot_vec().len() + 2);
    /// assert_eq!(refined.uknot_vec(), bspsurface.uknot_vec());
    /// assert!(refined.near2_as_surface(&bspsurface));
    /// ```
    pub fn knot_refine(&mut self, direction: SurfaceDirection, knots: &[f64]) -> &mut Self {
        match direction {
            SurfaceDirection::U => knots.iter().for_each(|x| {
                self.add_uknot(*x);
            }),
            SurfaceDirection::V => knots.iter().for_each(|x| {
                self.add_vknot(*x);
            }),
        }
        self
    }

    /// Cuts the surface into two surfaces at the parameter `u`.
    pub fn ucut(&mut self, u: f64) -> Self {
        let mut formers = self.u_curves();
        let latters: Vec<_> = formers.iter_mut().map(|curve| curve.cut(u)).collect();
        let latter_surface = BSplineSurface::new_unchecked(
            (latters[0].knot_vec().clone(), self.knot_vecs.1.clone()),
            Self::assemble_u_curves(&latters),
        );
        self.knot_vecs.0 = formers[0].knot_vec().clone();
        self.control_points = Self::assemble_u_curves(&formers);
        latter_surface
    }

    /// Cuts the surface into two surfaces at the parameter `v`.
    pub fn vcut(&mut self, v: f64) -> Self {
        self.swap_axes();
        let mut latter = self.ucut(v);
        self.swap_axes();
        latter.swap_axes();
        latter
    }

    /// Determine whether `self` and `other` is near as the B-spline surfaces or not.
    ///
    /// Divides each knot interval into the number of degree equal parts,
    /// and check `|self(u, v) - other(u, v)| < TOLERANCE` for each end points `(u, v)`.
    #[inline(always)]
    pub fn near_as_surface(&self, other: &BSplineSurface<V>) -> bool {
        self.sub_near_as_surface(other, 1, |x, y| x.near(y))
    }

    /// Determines `self` and `other` is near in square order as the B-spline surfaces or not.
    #[inline(always)]
    pub fn near2_as_surface(&self, other: &BSplineSurface<V>) -> bool {
        self.sub_near_as_surface(other, 1, |x, y| x.near2(y))
    }
}

impl<V> BSplineSurface<V>
where V: MetricSpace<Metric = f64> + std::ops::Index<usize, Output = f64> + Bounded<f64> + Copy
{
    /// Returns the bounding box including all control points.
    #[inline(always)]
    pub fn roughly_bounding_box(&self) -> BoundingBox<V> {
        self.control_points.iter().flatten().collect()
    }
}

impl<V: TangentSpace<f64>> ParametricSurface for BSplineSurface<V>
where V::Space: EuclideanSpace<Scalar = f64, Diff = V>
{
    type Point = V::Space;
    type Vector = V;
    #[inline(always)]
    fn subs(&self, u: f64, v: f64) -> Self::Point { Self::Point::from_vec(self.subs(u, v)) }
    #[inline(always)]
    fn uder(&self, u: f64, v: f64) -> Self::Vector { self.uder(u, v) }
    #[inline(always)]
    fn vder(&self, u: f64, v: f64) -> Self::Vector { self.vder(u, v) }
    #[inline(always)]
    fn uuder(&self, u: f64, v: f64) -> Self::Vector { self.ders(u, v, 2)[2][0] }
    #[inline(always)]
    fn uvder(&self, u: f64, v: f64) -> Self::Vector { self.ders(u, v, 2)[1][1] }
    #[inline(always)]
    fn vvder(&self, u: f64, v: f64) -> Self::Vector { self.ders(u, v, 2)[0][2] }
    #[inline(always)]
    fn parameter_range(&self) -> ((f64, f64), (f64, f64)) { self.parameter_range() }
}
