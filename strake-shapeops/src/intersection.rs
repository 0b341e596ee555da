use crate::subdivision::*;
use strake_geometry::prelude::*;

/// the intersection line of two planes
#[derive(Clone, Copy, Debug)]
pub struct IntersectionRay {
    /// a point of the line
    pub origin: Point3,
    /// the unitized direction of the line
    pub direction: Vector3,
}

/// the closest pair of points of two infinite lines
#[derive(Clone, Copy, Debug)]
pub struct LineLineIntersection {
    /// the point of the first line
    pub point0: Point3,
    /// the point of the second line
    pub point1: Point3,
    /// the parameter of the first line, in units of its direction vector
    pub parameter0: f64,
    /// the parameter of the second line, in units of its direction vector
    pub parameter1: f64,
}

/// an intersection point of a curve and a plane
#[derive(Clone, Copy, Debug)]
pub struct CurvePlaneIntersection {
    /// the parameter of the curve
    pub parameter: f64,
    /// the intersection point
    pub point: Point3,
}

/// an intersection point of two curves
#[derive(Clone, Copy, Debug)]
pub struct CurveIntersection {
    /// the parameter of the first curve
    pub parameter0: f64,
    /// the parameter of the second curve
    pub parameter1: f64,
    /// the point of the first curve
    pub point0: Point3,
    /// the point of the second curve
    pub point1: Point3,
}

/// Intersects two infinite planes.
///
/// Returns `None` if the planes are parallel. Otherwise the returned line
/// direction is the unitized cross product of the normals and the origin is
/// the solution of the two plane equations with the dominant direction
/// coordinate dropped.
/// # Examples
/// ```
/// use strake_geometry::prelude::*;
/// use strake_shapeops::plane_plane;
/// let xy = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
/// let xz = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
/// let ray = plane_plane(&xy, &xz).unwrap();
/// assert_near!(ray.direction.magnitude(), 1.0);
/// assert!(ray.direction.x.abs() > 0.99);
/// assert!(xy.contains(ray.origin) && xz.contains(ray.origin));
/// ```
pub fn plane_plane(plane0: &Plane, plane1: &Plane) -> Option<IntersectionRay> {
    let normal0 = plane0.unit_normal();
    let normal1 = plane1.unit_normal();
    let direction = normal0.cross(normal1);
    if direction.magnitude2() < EPSILON {
        return None;
    }

    let rhs0 = normal0.dot(plane0.origin.to_vec());
    let rhs1 = normal1.dot(plane1.origin.to_vec());
    let abs = [direction.x.abs(), direction.y.abs(), direction.z.abs()];
    let axis = if abs[0] >= abs[1] && abs[0] >= abs[2] {
        0
    } else if abs[1] >= abs[2] {
        1
    } else {
        2
    };
    let (i, j) = match axis {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    };
    let mat = Matrix2::new(normal0[i], normal1[i], normal0[j], normal1[j]);
    let sol = mat.invert()? * Vector2::new(rhs0, rhs1);
    let mut origin = Point3::origin();
    origin[i] = sol.x;
    origin[j] = sol.y;
    Some(IntersectionRay {
        origin,
        direction: direction.normalize(),
    })
}

/// Intersects a line, treated as infinite, with a plane.
///
/// Returns the intersection point and the parameter normalized by the
/// length of the line, so parameters in `[0, 1]` lie on the segment.
/// Returns `None` if the line is parallel to the plane or lies in it.
/// # Examples
/// ```
/// use strake_geometry::prelude::*;
/// use strake_shapeops::line_plane;
/// let line = Line(Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 3.0));
/// let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
/// let (pt, t) = line_plane(&line, &plane).unwrap();
/// assert_near!(pt, Point3::new(0.0, 0.0, 0.0));
/// assert_near!(t, 0.25);
/// ```
pub fn line_plane(line: &Line<Point3>, plane: &Plane) -> Option<(Point3, f64)> {
    let length = line.length();
    if length < EPSILON {
        return None;
    }
    let direction = line.direction() / length;
    let normal = plane.unit_normal();
    let denom = normal.dot(direction);
    if denom.abs() < EPSILON {
        return None;
    }
    let s = normal.dot(plane.origin - line.0) / denom;
    Some((line.0 + direction * s, s / length))
}

/// Returns the closest pair of points of two lines, treated as infinite.
///
/// Returns `None` if the lines are parallel.
/// # Examples
/// ```
/// use strake_geometry::prelude::*;
/// use strake_shapeops::line_line;
/// let line0 = Line(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
/// let line1 = Line(Point3::new(0.5, -2.0, 1.0), Point3::new(0.5, 2.0, 1.0));
/// let res = line_line(&line0, &line1).unwrap();
/// assert_near!(res.point0, Point3::new(0.5, 0.0, 0.0));
/// assert_near!(res.point1, Point3::new(0.5, 0.0, 1.0));
/// ```
pub fn line_line(line0: &Line<Point3>, line1: &Line<Point3>) -> Option<LineLineIntersection> {
    let dir0 = line0.direction();
    let dir1 = line1.direction();
    let diff = line0.0 - line1.0;
    let a = dir0.dot(dir0);
    let b = dir0.dot(dir1);
    let c = dir1.dot(dir1);
    let d = dir0.dot(diff);
    let e = dir1.dot(diff);
    let denom = a * c - b * b;
    if denom.abs() < EPSILON {
        return None;
    }
    let parameter0 = (b * e - c * d) / denom;
    let parameter1 = (a * e - b * d) / denom;
    Some(LineLineIntersection {
        point0: line0.0 + dir0 * parameter0,
        point1: line1.0 + dir1 * parameter1,
        parameter0,
        parameter1,
    })
}

/// Intersects a polyline with a plane.
///
/// Runs the line-plane intersection on every segment and keeps the hits
/// inside the segment. The returned parameter is in the polyline
/// parameterization by segment index; coincident hits on shared vertices
/// are reported once.
/// # Examples
/// ```
/// use strake_geometry::prelude::*;
/// use strake_shapeops::polyline_plane;
/// let polyline = PolylineCurve(vec![
///     Point3::new(0.0, 0.0, -1.0),
///     Point3::new(0.0, 1.0, 1.0),
///     Point3::new(0.0, 2.0, -1.0),
/// ]);
/// let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
/// let hits = polyline_plane(&polyline, &plane);
/// assert_eq!(hits.len(), 2);
/// assert_near!(hits[0].1, 0.5);
/// assert_near!(hits[1].1, 1.5);
/// ```
pub fn polyline_plane(polyline: &PolylineCurve<Point3>, plane: &Plane) -> Vec<(Point3, f64)> {
    let mut res: Vec<(Point3, f64)> = Vec::new();
    for (i, segment) in polyline.segments().enumerate() {
        let Some((pt, t)) = line_plane(&segment, plane) else {
            continue;
        };
        if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&t) {
            continue;
        }
        if res.iter().any(|(prev, _)| prev.near(&pt)) {
            continue;
        }
        res.push((pt, i as f64 + t.clamp(0.0, 1.0)));
    }
    res
}

fn accepts(termination: Termination) -> bool {
    matches!(
        termination,
        Termination::Converged | Termination::StepBelowTolerance | Termination::LineSearchFailed
    )
}

/// Intersects a curve with a plane, with an injected random source driving
/// the subdivision tree.
///
/// Near-planar sub-curves survive the plane traversal of the subdivision
/// tree; each survivor seeds a one-dimensional minimization of the squared
/// signed distance. Solutions are deduplicated by parameter proximity and
/// sorted by parameter. A tolerance not more than zero is replaced by
/// [`TOLERANCE`].
pub fn curve_plane_with(
    curve: &NurbsCurve<Vector4>,
    plane: &Plane,
    tol: f64,
    rng: &mut dyn rand::RngCore,
) -> Vec<CurvePlaneIntersection> {
    let tol = match tol <= 0.0 {
        true => TOLERANCE,
        false => tol,
    };
    let root = CurveNode::new(curve, 0.0);
    let dedup_tol = root.range().length() * LEAF_RATIO;
    let (t0, t1) = curve.parameter_range();
    let normal = plane.unit_normal();

    let f = |t: f64| {
        let dist = plane.signed_distance(curve.subs(t.clamp(t0, t1)));
        dist * dist
    };
    let grad = |t: f64| {
        let t = t.clamp(t0, t1);
        2.0 * plane.signed_distance(curve.subs(t)) * normal.dot(curve.der(t))
    };
    let minimizer = Minimizer::default();

    let mut res: Vec<CurvePlaneIntersection> = Vec::new();
    for node in traverse_plane(&root, plane, tol, rng) {
        let seed = node.range().center();
        let min_res = minimizer.minimize(&f, &grad, seed);
        if !accepts(min_res.termination) {
            continue;
        }
        let parameter = min_res.x.clamp(t0, t1);
        let point = curve.subs(parameter);
        if plane.distance(point) > tol {
            continue;
        }
        if res.iter().any(|s| (s.parameter - parameter).abs() < dedup_tol) {
            continue;
        }
        res.push(CurvePlaneIntersection { parameter, point });
    }
    res.sort_by(|x, y| x.parameter.partial_cmp(&y.parameter).unwrap());
    res
}

/// Intersects a curve with a plane with the default deterministic random
/// source.
#[inline(always)]
pub fn curve_plane(
    curve: &NurbsCurve<Vector4>,
    plane: &Plane,
    tol: f64,
) -> Vec<CurvePlaneIntersection> {
    curve_plane_with(curve, plane, tol, &mut default_rng())
}

/// Intersects two curves, with an injected random source driving the
/// subdivision trees.
///
/// The pair traversal of the subdivision trees produces candidate sub-curve
/// pairs; each candidate seeds a two-dimensional minimization of the
/// squared distance between the curves. Solutions are deduplicated by
/// parameter proximity and sorted by the parameter of the first curve. A
/// tolerance not more than zero is replaced by [`TOLERANCE`].
pub fn curve_curve_with(
    curve0: &NurbsCurve<Vector4>,
    curve1: &NurbsCurve<Vector4>,
    tol: f64,
    rng: &mut dyn rand::RngCore,
) -> Vec<CurveIntersection> {
    let tol = match tol <= 0.0 {
        true => TOLERANCE,
        false => tol,
    };
    let root0 = CurveNode::new(curve0, 0.0);
    let root1 = CurveNode::new(curve1, 0.0);
    let dedup_tol0 = root0.range().length() * LEAF_RATIO;
    let dedup_tol1 = root1.range().length() * LEAF_RATIO;
    let (s0, s1) = curve0.parameter_range();
    let (r0, r1) = curve1.parameter_range();

    let f = |x: Vector2| {
        curve0
            .subs(x.x.clamp(s0, s1))
            .distance2(curve1.subs(x.y.clamp(r0, r1)))
    };
    let grad = |x: Vector2| {
        let (t0, t1) = (x.x.clamp(s0, s1), x.y.clamp(r0, r1));
        let diff = curve0.subs(t0) - curve1.subs(t1);
        Vector2::new(
            2.0 * diff.dot(curve0.der(t0)),
            -2.0 * diff.dot(curve1.der(t1)),
        )
    };
    let minimizer = Minimizer::default();

    let mut res: Vec<CurveIntersection> = Vec::new();
    for (node0, node1) in traverse_pairs(&root0, &root1, tol, rng) {
        let seed = Vector2::new(node0.range().center(), node1.range().center());
        let min_res = minimizer.minimize(&f, &grad, seed);
        if !accepts(min_res.termination) {
            continue;
        }
        let parameter0 = min_res.x.x.clamp(s0, s1);
        let parameter1 = min_res.x.y.clamp(r0, r1);
        let point0 = curve0.subs(parameter0);
        let point1 = curve1.subs(parameter1);
        if point0.distance(point1) > tol {
            continue;
        }
        let duplicated = res.iter().any(|s| {
            (s.parameter0 - parameter0).abs() < dedup_tol0
                && (s.parameter1 - parameter1).abs() < dedup_tol1
        });
        if duplicated {
            continue;
        }
        res.push(CurveIntersection {
            parameter0,
            parameter1,
            point0,
            point1,
        });
    }
    res.sort_by(|x, y| x.parameter0.partial_cmp(&y.parameter0).unwrap());
    res
}

/// Intersects two curves with the default deterministic random source.
#[inline(always)]
pub fn curve_curve(
    curve0: &NurbsCurve<Vector4>,
    curve1: &NurbsCurve<Vector4>,
    tol: f64,
) -> Vec<CurveIntersection> {
    curve_curve_with(curve0, curve1, tol, &mut default_rng())
}
