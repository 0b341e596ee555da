use crate::*;

impl<P: Copy> Line<P> {
    /// initialize line from vector
    #[inline]
    pub fn from_origin_direction<V>(origin: P, direction: V) -> Self
    where P: std::ops::Add<V, Output = P> {
        Self(origin, origin + direction)
    }
}

impl<P> Line<P>
where P: EuclideanSpace<Scalar = f64>
{
    /// Returns the direction vector, not normalized.
    #[inline]
    pub fn direction(&self) -> P::Diff { self.1 - self.0 }

    /// to a bspline curve
    #[inline]
    pub fn to_bspline(&self) -> BSplineCurve<P::Diff>
    where P::Diff: VectorSpace<Scalar = f64> {
        BSplineCurve::new(
            KnotVec::bezier_knot(1),
            vec![self.0.to_vec(), self.1.to_vec()],
        )
    }
}

impl Line<Point3> {
    /// Returns the length of the line.
    #[inline]
    pub fn length(&self) -> f64 { self.direction().magnitude() }

    /// to a rational curve
    #[inline]
    pub fn to_nurbs(&self) -> NurbsCurve<Vector4> {
        NurbsCurve::new(BSplineCurve::new(
            KnotVec::bezier_knot(1),
            vec![self.0.to_homogeneous(), self.1.to_homogeneous()],
        ))
    }
}

impl<P> ParametricCurve for Line<P>
where P: EuclideanSpace<Scalar = f64>
{
    type Point = P;
    type Vector = P::Diff;
    #[inline]
    fn subs(&self, t: f64) -> Self::Point { self.0 + (self.1 - self.0) * t }
    #[inline]
    fn der(&self, _: f64) -> Self::Vector { self.1 - self.0 }
    #[inline]
    fn der2(&self, _: f64) -> Self::Vector { Self::Vector::zero() }
    #[inline]
    fn parameter_range(&self) -> (f64, f64) { (0.0, 1.0) }
}

impl<P> Cut for Line<P>
where P: EuclideanSpace<Scalar = f64>
{
    #[inline]
    fn cut(&mut self, t: f64) -> Self {
        let r = ParametricCurve::subs(self, t);
        let res = Self(r, self.1);
        self.1 = r;
        res
    }
}

impl<P: Copy> Invertible for Line<P> {
    #[inline]
    fn invert(&mut self) {
        let r = self.0;
        self.0 = self.1;
        self.1 = r;
    }
    #[inline]
    fn inverse(&self) -> Self { Self(self.1, self.0) }
}

impl<P> SearchNearestParameter for Line<P>
where
    P: EuclideanSpace<Scalar = f64>,
    P::Diff: InnerSpace<Scalar = f64>,
{
    type Point = P;
    type Parameter = f64;
    #[inline]
    fn search_nearest_parameter(&self, pt: P, _: Option<f64>, _: usize) -> Option<f64> {
        let b = self.1 - self.0;
        Some((pt - self.0).dot(b) / b.dot(b))
    }
}

#[test]
fn line() {
    use strake_base::assert_near;
    let line = Line(Point2::new(1.0, 0.0), Point2::new(0.0, 1.0));

    // subs
    assert_near!(ParametricCurve::subs(&line, 0.4), Point2::new(0.6, 0.4));

    // inverse
    let line_inverse = line.inverse();
    assert_eq!(line.0, line_inverse.1);
    assert_eq!(line.1, line_inverse.0);

    // cut
    let mut line0 = line;
    let line1 = line0.cut(0.4);
    assert_eq!(line.0, line0.0);
    assert_near!(line0.1, ParametricCurve::subs(&line, 0.4));
    assert_eq!(line0.1, line1.0);
    assert_eq!(line1.1, line.1);

    // nearest parameter
    assert_near!(
        line.search_nearest_parameter(Point2::new(1.0, 1.0), None, 0)
            .unwrap(),
        0.5
    );
}
