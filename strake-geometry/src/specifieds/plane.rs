use crate::*;

impl Plane {
    /// Creates a new plane from an origin and a normal vector.
    #[inline(always)]
    pub const fn new(origin: Point3, normal: Vector3) -> Plane { Plane { origin, normal } }

    /// Returns the unitized normal vector.
    #[inline(always)]
    pub fn unit_normal(&self) -> Vector3 { self.normal.normalize() }

    /// Returns the signed distance of `pt` from the plane, positive on the
    /// side the normal points to.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 2.0));
    /// assert_near!(plane.signed_distance(Point3::new(5.0, -3.0, 4.0)), 3.0);
    /// assert_near!(plane.signed_distance(Point3::new(5.0, -3.0, 0.0)), -1.0);
    /// ```
    #[inline(always)]
    pub fn signed_distance(&self, pt: Point3) -> f64 { self.unit_normal().dot(pt - self.origin) }

    /// Returns the distance of `pt` from the plane.
    #[inline(always)]
    pub fn distance(&self, pt: Point3) -> f64 { self.signed_distance(pt).abs() }

    /// Returns the projection of `pt` onto the plane.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 2.0));
    /// assert_near!(plane.project(Point3::new(5.0, -3.0, 4.0)), Point3::new(5.0, -3.0, 1.0));
    /// ```
    #[inline(always)]
    pub fn project(&self, pt: Point3) -> Point3 {
        pt - self.unit_normal() * self.signed_distance(pt)
    }

    /// Returns whether `pt` lies on the plane within the general tolerance.
    #[inline(always)]
    pub fn contains(&self, pt: Point3) -> bool { self.distance(pt) < TOLERANCE }
}
