use cgmath::*;

/// Tangent spaces of euclidean spaces
/// The inverse of [`EuclideanSpace::Diff`](../cgmath/trait.EuclideanSpace.html)
pub trait TangentSpace<S: BaseFloat>: VectorSpace<Scalar = S> {
    /// The Euclidean space whose tangent space is `Self`.
    type Space: EuclideanSpace<Scalar = S, Diff = Self>;
}
impl<S: BaseFloat> TangentSpace<S> for Vector1<S> {
    type Space = Point1<S>;
}
impl<S: BaseFloat> TangentSpace<S> for Vector2<S> {
    type Space = Point2<S>;
}
impl<S: BaseFloat> TangentSpace<S> for Vector3<S> {
    type Space = Point3<S>;
}

/// Homogeneous coordinate of an Euclidean space and a vector space.
/// # Examples
/// ```
/// use strake_base::cgmath64::*;
/// assert_eq!(Vector4::new(0.5, 1.0, 1.5, 2.0).truncate(), Vector3::new(0.5, 1.0, 1.5));
/// assert_eq!(Vector4::new(0.5, 1.0, 1.5, 2.0).weight(), 2.0);
/// assert_eq!(Vector4::new(0.5, 1.0, 1.5, 2.0).to_point(), Point3::new(0.25, 0.5, 0.75));
/// assert_eq!(
///     Vector4::from_point(Point3::new(0.25, 0.5, 0.75)),
///     Vector4::new(0.25, 0.5, 0.75, 1.0),
/// );
/// ```
pub trait Homogeneous<S: BaseFloat>: VectorSpace<Scalar = S> {
    /// The tangent vector of `Self::Point`
    type Vector: VectorSpace<Scalar = S>;
    /// The point expressed by homogeneous coordinate
    type Point: EuclideanSpace<Scalar = S, Diff = Self::Vector>;
    /// Returns the first dim - 1 components.
    fn truncate(self) -> Self::Vector;
    /// Returns the last component.
    fn weight(self) -> S;
    /// Returns homogeneous coordinate.
    fn from_point(point: Self::Point) -> Self;
    /// Returns homogeneous coordinate with the given weight.
    fn from_point_weight(point: Self::Point, weight: S) -> Self;
    /// Returns the projection to the plane whose the last component is `1.0`.
    #[inline(always)]
    fn to_point(self) -> Self::Point { Self::Point::from_vec(self.truncate() / self.weight()) }
    /// Returns the derivative of the projected curve.
    ///
    /// For a homogeneous curve c(t) with weight component w(t), the
    /// quotient rule for c / w is arranged as `(c' - c * (w' / w)) / w`.
    /// # Arguments
    /// * `self` - the point of the curve c(t)
    /// * `der` - the derivative c'(t) of the curve
    /// # Examples
    /// ```
    /// use strake_base::cgmath64::*;
    /// let t = 2.0;
    /// // the curve: c(t) = (t^3, t^2, t, t), the projection: (t^2, t, 1)
    /// let pt = Vector4::new(t * t * t, t * t, t, t);
    /// let der = Vector4::new(3.0 * t * t, 2.0 * t, 1.0, 1.0);
    /// // the derivative of the projected curve: (2t, 1, 0)
    /// assert_eq!(pt.rat_der(der), Vector3::new(2.0 * t, 1.0, 0.0));
    /// ```
    #[inline(always)]
    fn rat_der(self, der: Self) -> <Self::Point as EuclideanSpace>::Diff {
        let weight = self.weight();
        let res = (der - self * (der.weight() / weight)) / weight;
        res.truncate()
    }
    /// Returns the 2nd-order derivative of the projected curve.
    ///
    /// The second quotient rule in the same arrangement:
    /// `(c'' - c' * (2w'/w) + c * ((2w'^2/w - w'') / w)) / w`.
    /// # Arguments
    /// * `self` - the point of the curve c(t)
    /// * `der` - the derivative c'(t) of the curve
    /// * `der2` - the 2nd-order derivative c''(t) of the curve
    /// # Examples
    /// ```
    /// use strake_base::cgmath64::*;
    /// let t = 2.0;
    /// let pt = Vector4::new(t * t * t, t * t, t, t);
    /// let der = Vector4::new(3.0 * t * t, 2.0 * t, 1.0, 1.0);
    /// let der2 = Vector4::new(6.0 * t, 2.0, 0.0, 0.0);
    /// // the 2nd-order derivative of the projected curve (t^2, t, 1): (2, 0, 0)
    /// assert_eq!(pt.rat_der2(der, der2), Vector3::new(2.0, 0.0, 0.0));
    /// ```
    #[inline(always)]
    fn rat_der2(self, der: Self, der2: Self) -> <Self::Point as EuclideanSpace>::Diff {
        let two = S::one() + S::one();
        let weight = self.weight();
        let (w1, w2) = (der.weight(), der2.weight());
        let coef1 = two * w1 / weight;
        let coef2 = (two * w1 * w1 / weight - w2) / weight;
        let res = (der2 - der * coef1 + self * coef2) / weight;
        res.truncate()
    }
    /// Returns the cross derivative of the projected surface.
    ///
    /// For a homogeneous surface s(u, v) with weight component w(u, v), the
    /// mixed quotient rule in the same arrangement:
    /// `(s_uv - s_u * (w_v/w) - s_v * (w_u/w) + s * ((2 w_u w_v / w - w_uv) / w)) / w`.
    /// # Arguments
    /// * `self` - the point of the surface s(u, v)
    /// * `uder` - the u-derivative s_u(u, v) of the surface
    /// * `vder` - the v-derivative s_v(u, v) of the surface
    /// * `uvder` - the cross derivative s_{uv}(u, v) of the surface
    #[inline(always)]
    fn rat_cross_der(&self, uder: Self, vder: Self, uvder: Self) -> Self::Vector {
        let two = S::one() + S::one();
        let weight = self.weight();
        let (wu, wv, wuv) = (uder.weight(), vder.weight(), uvder.weight());
        let coef = (two * wu * wv / weight - wuv) / weight;
        let res = (uvder - uder * (wv / weight) - vder * (wu / weight) + *self * coef) / weight;
        res.truncate()
    }
}

impl<S: BaseFloat> Homogeneous<S> for Vector2<S> {
    type Vector = Vector1<S>;
    type Point = Point1<S>;
    #[inline(always)]
    fn truncate(self) -> Vector1<S> { Vector1::new(self[0]) }
    #[inline(always)]
    fn weight(self) -> S { self[1] }
    #[inline(always)]
    fn from_point(point: Self::Point) -> Self { Vector2::new(point[0], S::one()) }
    #[inline(always)]
    fn from_point_weight(point: Self::Point, weight: S) -> Self {
        Vector2::new(point[0] * weight, weight)
    }
}

impl<S: BaseFloat> Homogeneous<S> for Vector3<S> {
    type Vector = Vector2<S>;
    type Point = Point2<S>;
    #[inline(always)]
    fn truncate(self) -> Vector2<S> { self.truncate() }
    #[inline(always)]
    fn weight(self) -> S { self[2] }
    #[inline(always)]
    fn from_point(point: Self::Point) -> Self { Vector3::new(point[0], point[1], S::one()) }
    #[inline(always)]
    fn from_point_weight(point: Self::Point, weight: S) -> Self {
        Vector3::new(point[0] * weight, point[1] * weight, weight)
    }
}

impl<S: BaseFloat> Homogeneous<S> for Vector4<S> {
    type Vector = Vector3<S>;
    type Point = Point3<S>;
    #[inline(always)]
    fn truncate(self) -> Vector3<S> { self.truncate() }
    #[inline(always)]
    fn weight(self) -> S { self[3] }
    #[inline(always)]
    fn from_point(point: Self::Point) -> Self { point.to_homogeneous() }
    #[inline(always)]
    fn from_point_weight(point: Self::Point, weight: S) -> Self {
        Vector4::new(
            point[0] * weight,
            point[1] * weight,
            point[2] * weight,
            weight,
        )
    }
}
