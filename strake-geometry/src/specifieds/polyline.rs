use crate::*;

impl<P> PolylineCurve<P>
where P: EuclideanSpace<Scalar = f64>
{
    /// Returns the number of segments.
    #[inline(always)]
    pub fn segment_count(&self) -> usize { self.0.len().saturating_sub(1) }

    /// Returns the iterator on the segments as lines.
    #[inline(always)]
    pub fn segments(&self) -> impl Iterator<Item = Line<P>> + '_ {
        self.0.windows(2).map(|pts| Line(pts[0], pts[1]))
    }
}

impl PolylineCurve<Point3> {
    /// Returns the total length of the polyline.
    #[inline(always)]
    pub fn length(&self) -> f64 {
        self.0.windows(2).map(|pts| pts[0].distance(pts[1])).sum()
    }

    /// to a bspline curve of degree one, parameterized by the segment index
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let polyline = PolylineCurve(vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 0.0),
    ///     Point3::new(2.0, 0.0, 1.0),
    /// ]);
    /// let curve = polyline.to_nurbs();
    /// assert_eq!(curve.degree(), 1);
    /// const N: usize = 10;
    /// for i in 0..=N {
    ///     let t = 2.0 * (i as f64) / (N as f64);
    ///     assert_near!(curve.subs(t), ParametricCurve::subs(&polyline, t));
    /// }
    /// ```
    pub fn to_nurbs(&self) -> NurbsCurve<Vector4> {
        let n = self.segment_count();
        let mut knots = vec![0.0];
        knots.extend((0..=n).map(|i| i as f64));
        knots.push(n as f64);
        let ctrl_pts = self.0.iter().map(|pt| pt.to_homogeneous()).collect();
        NurbsCurve::new(BSplineCurve::new(KnotVec::try_from(knots).unwrap(), ctrl_pts))
    }
}

impl<P> ParametricCurve for PolylineCurve<P>
where P: EuclideanSpace<Scalar = f64>
{
    type Point = P;
    type Vector = P::Diff;
    fn subs(&self, t: f64) -> Self::Point {
        if self.0.is_empty() {
            P::origin()
        } else if t <= 0.0 {
            self.0[0]
        } else if t >= self.segment_count() as f64 {
            self.0[self.0.len() - 1]
        } else {
            let i = t.floor() as usize;
            self.0[i] + (self.0[i + 1] - self.0[i]) * (t - i as f64)
        }
    }
    fn der(&self, t: f64) -> Self::Vector {
        if self.0.len() < 2 || t < 0.0 || (self.segment_count() as f64) < t {
            P::Diff::zero()
        } else {
            let i = (t.floor() as usize).min(self.segment_count() - 1);
            self.0[i + 1] - self.0[i]
        }
    }
    fn der2(&self, _: f64) -> Self::Vector { P::Diff::zero() }
    #[inline(always)]
    fn parameter_range(&self) -> (f64, f64) { (0.0, self.segment_count() as f64) }
}

impl<P: Clone> Invertible for PolylineCurve<P> {
    #[inline(always)]
    fn invert(&mut self) { self.0.reverse(); }
}
