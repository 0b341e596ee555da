use crate::errors::Error;
use crate::*;
use std::ops::Index;

impl<V> BSplineCurve<V> {
    /// constructor.
    /// # Arguments
    /// * `knot_vec` - the knot vector
    /// * `control_points` - the vector of the control points
    /// # Panics
    /// Panics occurs if:
    /// * There are no control points.
    /// * The number of knots is not more than the one of control points.
    /// * The range of the knot vector is zero.
    pub fn new(knot_vec: KnotVec, control_points: Vec<V>) -> BSplineCurve<V> {
        BSplineCurve::try_new(knot_vec, control_points).unwrap_or_else(|e| panic!("{}", e))
    }

    /// constructor.
    /// # Failures
    /// * If there are no control points, returns [`Error::EmptyControlPoints`].
    /// * If the number of knots is not more than the one of control points, returns [`Error::TooShortKnotVector`].
    /// * If the range of the knot vector is zero, returns [`Error::ZeroRange`].
    pub fn try_new(knot_vec: KnotVec, control_points: Vec<V>) -> Result<BSplineCurve<V>> {
        if control_points.is_empty() {
            return Err(Error::EmptyControlPoints);
        }
        if knot_vec.len() <= control_points.len() {
            return Err(Error::TooShortKnotVector(
                knot_vec.len(),
                control_points.len(),
            ));
        }
        if knot_vec.range_length().so_small() {
            return Err(Error::ZeroRange);
        }
        Ok(BSplineCurve::new_unchecked(knot_vec, control_points))
    }

    /// constructor.
    /// # Remarks
    /// This method does NOT check the rules for constructing B-spline curve.
    /// The programmer must guarantee these conditions before using this method.
    #[inline(always)]
    pub const fn new_unchecked(knot_vec: KnotVec, control_points: Vec<V>) -> BSplineCurve<V> {
        BSplineCurve {
            knot_vec,
            control_points,
        }
    }

    /// constructor.
    /// # Remarks
    /// This method checks the rules for constructing B-spline curve in the debug mode.
    /// The programmer must guarantee these conditions before using this method.
    #[inline(always)]
    pub fn debug_new(knot_vec: KnotVec, control_points: Vec<V>) -> BSplineCurve<V> {
        match cfg!(debug_assertions) {
            true => Self::new(knot_vec, control_points),
            false => Self::new_unchecked(knot_vec, control_points),
        }
    }

    /// Returns the reference of the knot vector
    #[inline(always)]
    pub fn knot_vec(&self) -> &KnotVec { &self.knot_vec }

    /// Returns the `idx`th knot
    #[inline(always)]
    pub fn knot(&self, idx: usize) -> f64 { self.knot_vec[idx] }

    /// Returns the reference of the control points.
    #[inline(always)]
    pub fn control_points(&self) -> &Vec<V> { &self.control_points }

    /// Returns the reference of the control point corresponding to the index `idx`.
    #[inline(always)]
    pub fn control_point(&self, idx: usize) -> &V { &self.control_points[idx] }

    /// Returns the mutable reference of the control point corresponding to index `idx`.
    #[inline(always)]
    pub fn control_point_mut(&mut self, idx: usize) -> &mut V { &mut self.control_points[idx] }

    /// Returns the iterator on all control points
    #[inline(always)]
    pub fn control_points_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.control_points.iter_mut()
    }

    /// Apply the given transformation to all control points.
    #[inline(always)]
    pub fn transform_control_points<F: FnMut(&mut V)>(&mut self, f: F) {
        self.control_points.iter_mut().for_each(f)
    }

    /// Returns the degree of B-spline curve
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::uniform_knot(3, 2);
    /// let ctrl_pts = vec![Vector2::new(0.0, 0.0); 5];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// assert_eq!(bspcurve.degree(), 3);
    /// ```
    #[inline(always)]
    pub fn degree(&self) -> usize { self.knot_vec.len() - self.control_points.len() - 1 }

    /// Inverts a curve
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 2.0),
    ///     Vector2::new(2.0, -1.0),
    ///     Vector2::new(3.0, 0.0),
    /// ];
    /// let bspcurve0 = BSplineCurve::new(knot_vec, ctrl_pts);
    /// let mut bspcurve1 = bspcurve0.clone();
    /// bspcurve1.invert();
    ///
    /// const N: usize = 50; // sample size
    /// for i in 0..=N {
    ///     let t = (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve0.subs(t), bspcurve1.subs(1.0 - t));
    /// }
    /// ```
    #[inline(always)]
    pub fn invert(&mut self) -> &mut Self {
        self.knot_vec.invert();
        self.control_points.reverse();
        self
    }

    /// Returns whether the knot vector is clamped or not.
    #[inline(always)]
    pub fn is_clamped(&self) -> bool { self.knot_vec.is_clamped(self.degree()) }

    /// Normalizes the knot vector
    #[inline(always)]
    pub fn knot_normalize(&mut self) -> &mut Self {
        self.knot_vec.try_normalize().unwrap();
        self
    }

    /// Translates the knot vector
    #[inline(always)]
    pub fn knot_translate(&mut self, x: f64) -> &mut Self {
        self.knot_vec.translate(x);
        self
    }
}

impl<V: VectorSpace<Scalar = f64>> BSplineCurve<V> {
    /// Substitutes to B-spline curve.
    ///
    /// The span of `t` is looked up and only the `degree + 1` basis
    /// functions which do not vanish there are accumulated.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0 / 3.0, 0.0),
    ///     Vector2::new(2.0 / 3.0, 0.0),
    ///     Vector2::new(1.0, 1.0),
    /// ];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    ///
    /// // bspcurve coincides with (t, t^3)
    /// const N: usize = 50; // sample size
    /// for i in 0..=N {
    ///     let t = (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve.subs(t), Vector2::new(t, t * t * t));
    /// }
    /// ```
    pub fn subs(&self, t: f64) -> V {
        let degree = self.degree();
        let span = self.knot_vec.span(degree, t);
        let basis = self.knot_vec.basis_functions(degree, span, t);
        basis
            .into_iter()
            .enumerate()
            .fold(V::zero(), |sum, (i, basis)| {
                sum + self.control_points[span - degree + i] * basis
            })
    }

    /// Substitutes to the derived B-spline curve.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0 / 3.0, 0.0),
    ///     Vector2::new(2.0 / 3.0, 0.0),
    ///     Vector2::new(1.0, 1.0),
    /// ];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    ///
    /// // bspcurve = (t, t^3), derived = (1, 3t^2)
    /// const N: usize = 50; // sample size
    /// for i in 0..=N {
    ///     let t = (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve.der(t), Vector2::new(1.0, 3.0 * t * t));
    /// }
    /// ```
    #[inline(always)]
    pub fn der(&self, t: f64) -> V { self.der_n(t, 1) }

    /// Substitutes to the 2nd-order derived B-spline curve.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0 / 3.0, 0.0),
    ///     Vector2::new(2.0 / 3.0, 0.0),
    ///     Vector2::new(1.0, 1.0),
    /// ];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    ///
    /// // bspcurve = (t, t^3), 2nd derived = (0, 6t)
    /// const N: usize = 50; // sample size
    /// for i in 0..=N {
    ///     let t = (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve.der2(t), Vector2::new(0.0, 6.0 * t));
    /// }
    /// ```
    #[inline(always)]
    pub fn der2(&self, t: f64) -> V { self.der_n(t, 2) }

    /// Substitutes to all derived B-spline curves up to the order `order`.
    ///
    /// The 0th entry is the position, the `k`th entry the `k`-th derivative.
    /// Derivatives beyond the degree are zero.
    pub fn ders(&self, t: f64, order: usize) -> CurveDers<V> {
        let degree = self.degree();
        let span = self.knot_vec.span(degree, t);
        let basis_ders = self.knot_vec.basis_ders(degree, span, t, order);
        let mut ders = CurveDers::new(order);
        ders.iter_mut()
            .zip(&basis_ders)
            .for_each(|(der, basis_row)| {
                *der = basis_row
                    .iter()
                    .enumerate()
                    .fold(V::zero(), |sum, (i, basis)| {
                        sum + self.control_points[span - degree + i] * *basis
                    });
            });
        ders
    }

    /// Substitutes to the `n`th derived B-spline curve.
    #[inline(always)]
    pub fn der_n(&self, t: f64, n: usize) -> V { self.ders(t, n)[n] }

    pub(crate) fn sub_near_as_curve<F: Fn(&V, &V) -> bool>(
        &self,
        other: &BSplineCurve<V>,
        div_coef: usize,
        ord: F,
    ) -> bool {
        if !self.knot_vec.same_range(&other.knot_vec) {
            return false;
        }
        let division = self.degree().max(other.degree()) * div_coef;
        self.knot_vec.windows(2).all(|window| {
            let delta = window[1] - window[0];
            if delta.so_small() {
                return true;
            }
            (0..division).all(|i| {
                let t = window[0] + delta * (i as f64) / (division as f64);
                ord(&self.subs(t), &other.subs(t))
            })
        })
    }
}

impl<V: VectorSpace<Scalar = f64> + Tolerance> BSplineCurve<V> {
    /// Adds a knot `x`, and do not change `self` as a curve.
    ///
    /// The control points are rebuilt by the forward insertion formula: the
    /// window of `degree` points around the new knot is blended, everything
    /// outside the window is carried over.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0, 2.0),
    ///     Vector2::new(2.0, -2.0),
    ///     Vector2::new(3.0, 0.0),
    /// ];
    /// let mut bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// let org_curve = bspcurve.clone();
    ///
    /// bspcurve.add_knot(0.5).add_knot(0.75);
    /// assert_eq!(bspcurve.knot_vec().len(), org_curve.knot_vec().len() + 2);
    /// // bspcurve does not change as a curve
    /// assert!(bspcurve.near2_as_curve(&org_curve));
    /// ```
    /// # Remarks
    /// If the added knot `x` is out of the range of the knot vector, then the knot vector will be extended.
    pub fn add_knot(&mut self, x: f64) -> &mut Self {
        if x < self.knot_vec[0] {
            self.knot_vec.add_knot(x);
            self.control_points.insert(0, V::zero());
            return self;
        }

        let degree = self.degree();
        let n = self.control_points.len();
        let idx = self.knot_vec.add_knot(x);
        let new_points: Vec<V> = {
            let knot_vec = &self.knot_vec;
            let old_point = |i: isize| match 0 <= i && i < n as isize {
                true => self.control_points[i as usize],
                false => V::zero(),
            };
            (0..=n)
                .map(|i| {
                    if i + degree < idx {
                        old_point(i as isize)
                    } else if i < idx {
                        let denom = knot_vec[i + degree + 1] - knot_vec[i];
                        let ratio = (x - knot_vec[i]) * inv_or_zero(denom);
                        old_point(i as isize - 1) * (1.0 - ratio) + old_point(i as isize) * ratio
                    } else {
                        old_point(i as isize - 1)
                    }
                })
                .collect()
        };
        self.control_points = new_points;
        self
    }

    /// Inserts the given knots in turn, and does not change `self` as a curve.
    ///
    /// The iterator is expected to be sorted within the active domain, as
    /// produced by refinement drivers.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0, 1.0),
    ///     Vector2::new(2.0, -1.0),
    ///     Vector2::new(3.0, 0.0),
    /// ];
    /// let mut bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// let org_curve = bspcurve.clone();
    /// bspcurve.knot_refine(&[0.25, 0.5, 0.5, 0.75]);
    /// assert_eq!(bspcurve.knot_vec().len(), org_curve.knot_vec().len() + 4);
    /// assert!(bspcurve.near2_as_curve(&org_curve));
    /// ```
    pub fn knot_refine(&mut self, knots: &[f64]) -> &mut Self {
        knots.iter().for_each(|x| {
            self.add_knot(*x);
        });
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
    ///
    /// The control points the insertion would have blended are
    /// reconstructed from the front; the removal is refused when the
    /// reconstruction does not arrive at the stored control point.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0, 2.0),
    ///     Vector2::new(2.0, -2.0),
    ///     Vector2::new(3.0, 0.0),
    /// ];
    /// let mut bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// let org_curve = bspcurve.clone();
    /// bspcurve.add_knot(0.5);
    /// assert!(bspcurve.try_remove_knot(4).is_ok());
    /// assert!(bspcurve.near2_as_curve(&org_curve));
    /// // the knot of a minimal representation cannot be removed
    /// assert_eq!(bspcurve.try_remove_knot(4), Err(Error::CannotRemoveKnot(4)));
    /// ```
    pub fn try_remove_knot(&mut self, idx: usize) -> Result<&mut BSplineCurve<V>> {
        let degree = self.degree();
        let n = self.control_points.len();
        if idx <= degree || n <= idx {
            return Err(Error::CannotRemoveKnot(idx));
        }

        let knot = self.knot_vec[idx];
        let mut reconstructed = vec![self.control_points[idx - degree - 1]];
        for i in (idx - degree)..idx {
            let denom = self.knot_vec[i + degree + 1] - self.knot_vec[i];
            let ratio = (knot - self.knot_vec[i]) * inv_or_zero(denom);
            if ratio.so_small() {
                break;
            }
            let prev = *reconstructed.last().unwrap();
            reconstructed.push((self.control_points[i] - prev * (1.0 - ratio)) / ratio);
        }

        if !reconstructed.last().unwrap().near(&self.control_points[idx]) {
            return Err(Error::CannotRemoveKnot(idx));
        }

        for (offset, pt) in reconstructed.into_iter().skip(1).enumerate() {
            self.control_points[idx - degree + offset] = pt;
        }
        self.control_points.remove(idx);
        self.knot_vec.remove(idx);
        Ok(self)
    }

    /// elevate 1 degree for bezier curve.
    fn elevate_degree_bezier(&mut self) -> &mut Self {
        let degree = self.degree();
        let front = self.knot_vec[0];
        let back = self.knot_vec[self.knot_vec.len() - 1];
        let new_points: Vec<V> = {
            let pts = &self.control_points;
            (0..=degree + 1)
                .map(|i| {
                    let ratio = i as f64 / (degree + 1) as f64;
                    if i == 0 {
                        pts[0]
                    } else if i == degree + 1 {
                        pts[degree]
                    } else {
                        pts[i - 1] * ratio + pts[i] * (1.0 - ratio)
                    }
                })
                .collect()
        };
        let knot_vec =
            KnotVec::from_single_multi(vec![front, back], vec![degree + 2, degree + 2]).unwrap();
        *self = BSplineCurve::new_unchecked(knot_vec, new_points);
        self
    }

    /// elevate 1 degree.
    ///
    /// Decomposes into Bezier segments, elevates each, and concats the
    /// segments back together.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(1);
    /// let ctrl_pts = vec![Vector2::new(1.0, 0.0), Vector2::new(3.0, 2.0)];
    /// let mut bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// bspcurve.elevate_degree();
    /// assert_eq!(bspcurve.degree(), 2);
    /// assert_eq!(bspcurve.knot_vec(), &KnotVec::bezier_knot(2));
    /// assert_eq!(bspcurve.control_point(1), &Vector2::new(2.0, 1.0));
    /// ```
    pub fn elevate_degree(&mut self) -> &mut Self {
        let mut iter = self.bezier_decomposition().into_iter();
        let mut result = iter.next().unwrap();
        result.elevate_degree_bezier();
        for mut bezier in iter {
            result.concat(bezier.elevate_degree_bezier());
        }
        *self = result;
        self
    }

    /// Elevates the degree up to `degree`. If `degree` is not more than the
    /// current degree, the curve is left unchanged.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let ctrl_pts = vec![Vector2::new(-1.0, 1.0), Vector2::new(0.0, -1.0), Vector2::new(1.0, 1.0)];
    /// let mut bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// let org_curve = bspcurve.clone();
    /// bspcurve.elevate_degree_to(5);
    /// assert_eq!(bspcurve.degree(), 5);
    /// assert!(bspcurve.near2_as_curve(&org_curve));
    ///
    /// // a degree not more than the current one is a no-op
    /// let mut unchanged = org_curve.clone();
    /// unchanged.elevate_degree_to(1);
    /// assert_eq!(unchanged, org_curve);
    /// ```
    pub fn elevate_degree_to(&mut self, degree: usize) -> &mut Self {
        for _ in self.degree()..degree {
            self.elevate_degree();
        }
        self
    }

    /// Makes the B-spline curve clamped
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::from(vec![1.0, 1.5, 2.5, 4.0, 5.5, 6.0]);
    /// let ctrl_pts = vec![Vector2::new(0.0, 1.0), Vector2::new(1.0, 2.0), Vector2::new(2.0, 3.0)];
    /// let mut bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// assert!(!bspcurve.is_clamped());
    /// bspcurve.clamp();
    /// assert!(bspcurve.is_clamped());
    /// assert_eq!(bspcurve.knot_vec().len(), 10);
    /// ```
    #[inline(always)]
    pub fn clamp(&mut self) -> &mut Self {
        let degree = self.degree();

        let front = self.knot_vec[0];
        for _ in self.knot_vec.multiplicity(0)..=degree {
            self.add_knot(front);
        }

        let back = self.knot_vec[self.knot_vec.len() - 1];
        for _ in self.knot_vec.multiplicity(self.knot_vec.len() - 1)..=degree {
            self.add_knot(back);
        }
        self
    }

    /// Cuts the curve to two curves at the parameter `t`
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    ///
    /// let knot_vec = KnotVec::uniform_knot(3, 2);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0, 1.0),
    ///     Vector2::new(2.0, -1.0),
    ///     Vector2::new(3.0, 2.0),
    ///     Vector2::new(4.0, 0.0),
    /// ];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    ///
    /// let mut part0 = bspcurve.clone();
    /// let part1 = part0.cut(0.6);
    /// const N: usize = 50;
    /// for i in 0..=N {
    ///     let t = 0.6 * (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve.subs(t), part0.subs(t));
    /// }
    /// for i in 0..=N {
    ///     let t = 0.6 + 0.4 * (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve.subs(t), part1.subs(t));
    /// }
    /// ```
    pub fn cut(&mut self, mut t: f64) -> BSplineCurve<V> {
        let degree = self.degree();

        let Some(idx) = self.knot_vec.floor(t) else {
            // a parameter below the domain: everything goes to the latter half
            let front = self.knot_vec[0];
            let whole = self.clone();
            *self = BSplineCurve::new(KnotVec::from(vec![t, front]), vec![V::zero()]);
            return whole;
        };
        // snap to an existing knot to account for its multiplicity
        let mult = match t.near(&self.knot_vec[idx]) {
            true => {
                t = self.knot_vec[idx];
                self.knot_vec.multiplicity(idx)
            }
            false => 0,
        };
        (mult..=degree).for_each(|_| {
            self.add_knot(t);
        });

        let border = self.knot_vec.floor(t).unwrap();
        let latter_knot_vec = self.knot_vec.sub_vec(border - degree..);
        let latter_points = self.control_points.split_off(border - degree);
        self.knot_vec = self.knot_vec.sub_vec(..=border);
        BSplineCurve::new_unchecked(latter_knot_vec, latter_points)
    }

    /// Separates `self` into Bezier curves by each knots.
    ///
    /// The first segment is peeled off at every interior knot in turn.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    ///
    /// let knot_vec = KnotVec::uniform_knot(2, 2);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0, 2.0),
    ///     Vector2::new(2.0, -2.0),
    ///     Vector2::new(3.0, 1.0),
    /// ];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    /// let beziers = bspcurve.bezier_decomposition();
    /// assert_eq!(beziers.len(), 2);
    ///
    /// const N: usize = 50;
    /// for i in 0..=N {
    ///     let t = 0.5 * (i as f64) / (N as f64);
    ///     assert_near2!(bspcurve.subs(t), beziers[0].subs(t));
    ///     assert_near2!(bspcurve.subs(t + 0.5), beziers[1].subs(t + 0.5));
    /// }
    /// ```
    pub fn bezier_decomposition(&self) -> Vec<BSplineCurve<V>> {
        let mut rest = self.clone();
        rest.clamp();
        let (knots, _) = rest.knot_vec.to_single_multi();

        let mut segments: Vec<_> = knots[1..knots.len() - 1]
            .iter()
            .map(|t| {
                let latter = rest.cut(*t);
                std::mem::replace(&mut rest, latter)
            })
            .collect();
        segments.push(rest);
        segments
    }

    /// Concats two B-spline curves.
    ///
    /// The degrees are synchronized by elevation, both curves are clamped,
    /// and the knot vectors and control points are joined.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::uniform_knot(2, 3);
    /// let ctrl_pts = vec![
    ///     Vector2::new(0.0, 0.0),
    ///     Vector2::new(1.0, -1.0),
    ///     Vector2::new(2.0, 2.0),
    ///     Vector2::new(3.0, 0.0),
    ///     Vector2::new(4.0, 1.0),
    /// ];
    /// let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    ///
    /// let mut part0 = bspcurve.clone();
    /// let mut part1 = part0.cut(0.44);
    /// part0.try_concat(&mut part1).unwrap();
    /// assert!(bspcurve.near2_as_curve(&part0));
    /// ```
    /// # Failure
    /// If the back of the knot vector of `self` does not coincide with the front of the one of
    /// `other`, returns [`Error::DifferentBackFront`].
    pub fn try_concat(&mut self, other: &mut BSplineCurve<V>) -> Result<&mut Self> {
        let degree = self.degree().max(other.degree());
        self.elevate_degree_to(degree);
        other.elevate_degree_to(degree);
        self.clamp();
        other.clamp();
        self.knot_vec.try_concat(&other.knot_vec, degree)?;
        self.control_points.extend_from_slice(&other.control_points);
        Ok(self)
    }

    /// Concats two B-spline curves.
    /// # Panics
    /// Panic occurs if the back of the knot vector of `self` does not coincide
    /// with the front of the one of `other`
    #[inline(always)]
    pub fn concat(&mut self, other: &mut Self) -> &mut Self {
        self.try_concat(other)
            .unwrap_or_else(|error| panic!("{}", error))
    }

    /// Determine whether `self` and `other` is near as the B-spline curves or not.
    ///
    /// Divides each knot interval into the number of degree equal parts,
    /// and check `|self(t) - other(t)| < TOLERANCE` for each end points `t`.
    #[inline(always)]
    pub fn near_as_curve(&self, other: &BSplineCurve<V>) -> bool {
        self.sub_near_as_curve(other, 1, |x, y| x.near(y))
    }

    /// Determines `self` and `other` is near in square order as the B-spline curves or not.
    #[inline(always)]
    pub fn near2_as_curve(&self, other: &BSplineCurve<V>) -> bool {
        self.sub_near_as_curve(other, 1, |x, y| x.near2(y))
    }
}

impl<V> BSplineCurve<V>
where V: MetricSpace<Metric = f64> + Index<usize, Output = f64> + Bounded<f64> + Copy
{
    /// Returns the bounding box including all control points.
    #[inline(always)]
    pub fn roughly_bounding_box(&self) -> BoundingBox<V> { self.control_points.iter().collect() }
}

impl<V: TangentSpace<f64>> ParametricCurve for BSplineCurve<V>
where V::Space: EuclideanSpace<Scalar = f64, Diff = V>
{
    type Point = V::Space;
    type Vector = V;
    #[inline(always)]
    fn subs(&self, t: f64) -> Self::Point { Self::Point::from_vec(self.subs(t)) }
    #[inline(always)]
    fn der(&self, t: f64) -> Self::Vector { self.der(t) }
    #[inline(always)]
    fn der2(&self, t: f64) -> Self::Vector { self.der2(t) }
    #[inline(always)]
    fn parameter_range(&self) -> (f64, f64) {
        (self.knot_vec[0], self.knot_vec[self.knot_vec.len() - 1])
    }
}

impl<V: TangentSpace<f64> + Tolerance> Cut for BSplineCurve<V>
where V::Space: EuclideanSpace<Scalar = f64, Diff = V>
{
    #[inline(always)]
    fn cut(&mut self, t: f64) -> Self { self.cut(t) }
}

impl<V: Clone> Invertible for BSplineCurve<V> {
    #[inline(always)]
    fn invert(&mut self) { self.invert(); }
    #[inline(always)]
    fn inverse(&self) -> Self {
        let mut curve = self.clone();
        curve.invert();
        curve
    }
}
