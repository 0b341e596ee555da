use proptest::prelude::*;
use strake_geometry::prelude::*;
use strake_shapeops::*;

fn line_as_nurbs(p0: Point3, p1: Point3) -> NurbsCurve<Vector4> {
    Line(p0, p1).to_nurbs()
}

proptest! {
    #[test]
    fn line_line_feet_are_perpendicular(
        a in prop::array::uniform3(-10f64..=10.0),
        b in prop::array::uniform3(-10f64..=10.0),
        c in prop::array::uniform3(-10f64..=10.0),
        d in prop::array::uniform3(-10f64..=10.0),
    ) {
        let line0 = Line(Point3::from(a), Point3::from(b));
        let line1 = Line(Point3::from(c), Point3::from(d));
        prop_assume!(line0.length() > 0.1 && line1.length() > 0.1);
        let cross = line0.direction().cross(line1.direction());
        prop_assume!(cross.magnitude() > 0.1 * line0.length() * line1.length());
        let res = line_line(&line0, &line1).unwrap();
        // the segment between the closest points is orthogonal to both lines
        let foot = res.point1 - res.point0;
        let slack = 1.0e-6 * (1.0 + foot.magnitude());
        prop_assert!(foot.dot(line0.direction().normalize()).abs() < slack);
        prop_assert!(foot.dot(line1.direction().normalize()).abs() < slack);
    }
}

#[test]
fn plane_plane_canonical_axes() {
    let xy = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let xz = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    let ray = plane_plane(&xy, &xz).unwrap();
    assert_near!(ray.direction.magnitude(), 1.0);
    // the intersection is the x axis
    assert_near!(ray.direction.dot(Vector3::unit_x()).abs(), 1.0);
    assert!(xy.contains(ray.origin));
    assert!(xz.contains(ray.origin));
}

#[test]
fn plane_plane_generic() {
    let plane0 = Plane::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 0.5));
    let plane1 = Plane::new(Point3::new(-2.0, 0.0, 1.0), Vector3::new(0.0, -1.0, 2.0));
    let ray = plane_plane(&plane0, &plane1).unwrap();
    // every point of the returned ray lies on both planes
    for i in -3..=3 {
        let pt = ray.origin + ray.direction * (i as f64);
        assert!(plane0.distance(pt) < TOLERANCE);
        assert!(plane1.distance(pt) < TOLERANCE);
    }
}

#[test]
fn plane_plane_parallel() {
    let plane0 = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let plane1 = Plane::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -2.0));
    assert!(plane_plane(&plane0, &plane1).is_none());
}

#[test]
fn line_plane_hit_and_parallel() {
    let plane = Plane::new(Point3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 1.0));
    let line = Line(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 4.0));
    let (pt, t) = line_plane(&line, &plane).unwrap();
    assert_near!(pt, Point3::new(1.0, 1.0, 2.0));
    assert_near!(t, 0.5);

    // the line is treated as infinite: hits beyond the segment are reported
    let short = Line(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    let (pt, t) = line_plane(&short, &plane).unwrap();
    assert_near!(pt, Point3::new(1.0, 1.0, 2.0));
    assert_near!(t, 2.0);

    let parallel = Line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    assert!(line_plane(&parallel, &plane).is_none());
}

#[test]
fn line_line_skew_and_parallel() {
    let line0 = Line(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    let line1 = Line(Point3::new(0.5, -2.0, 1.0), Point3::new(0.5, 2.0, 1.0));
    let res = line_line(&line0, &line1).unwrap();
    assert_near!(res.point0, Point3::new(0.5, 0.0, 0.0));
    assert_near!(res.point1, Point3::new(0.5, 0.0, 1.0));
    assert_near!(res.parameter0, 0.75);
    assert_near!(res.parameter1, 0.5);

    // crossing lines report the common point twice
    let line2 = Line(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0));
    let res = line_line(&line0, &line2).unwrap();
    assert_near!(res.point0, res.point1);
    assert_near!(res.point0, Point3::new(0.0, 0.0, 0.0));

    let parallel = Line(Point3::new(0.0, 3.0, 0.0), Point3::new(2.0, 3.0, 0.0));
    assert!(line_line(&line0, &parallel).is_none());
}

#[test]
fn polyline_plane_keeps_segment_hits() {
    let polyline = PolylineCurve(vec![
        Point3::new(0.0, 0.0, -1.0),
        Point3::new(0.0, 1.0, 1.0),
        Point3::new(0.0, 2.0, -1.0),
        Point3::new(0.0, 3.0, -2.0),
    ]);
    let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let hits = polyline_plane(&polyline, &plane);
    assert_eq!(hits.len(), 2);
    assert_near!(hits[0].0, Point3::new(0.0, 0.5, 0.0));
    assert_near!(hits[0].1, 0.5);
    assert_near!(hits[1].0, Point3::new(0.0, 1.5, 0.0));
    assert_near!(hits[1].1, 1.5);

    // a polyline strictly on one side has no hit in its segments
    let above = Plane::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
    assert!(polyline_plane(&polyline, &above).is_empty());
}

#[test]
fn curve_plane_cubic() {
    // a cubic arch dipping below the plane z = 0 at both ends; its z
    // component is -1 + 12t - 12t^2, so the crossings are 1/2 ± √96/24
    let curve = NurbsCurve::try_from_elements(
        3,
        KnotVec::bezier_knot(3),
        &[
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 3.0),
            Point3::new(2.0, 0.0, 3.0),
            Point3::new(3.0, 0.0, -1.0),
        ],
        None,
    )
    .unwrap();
    let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let hits = curve_plane(&curve, &plane, TOLERANCE);
    assert_eq!(hits.len(), 2);
    let offset = f64::sqrt(96.0) / 24.0;
    assert!((hits[0].parameter - (0.5 - offset)).abs() < 1.0e-6);
    assert!((hits[1].parameter - (0.5 + offset)).abs() < 1.0e-6);
    for hit in &hits {
        assert!(plane.distance(hit.point) < TOLERANCE);
        assert_near!(curve.subs(hit.parameter), hit.point);
    }
}

#[test]
fn curve_plane_miss() {
    let curve = line_as_nurbs(Point3::new(0.0, 0.0, 1.0), Point3::new(5.0, 0.0, 2.0));
    let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    assert!(curve_plane(&curve, &plane, TOLERANCE).is_empty());
}

#[test]
fn curve_curve_single_crossing() {
    // a parabola-like quadratic against a straight line
    let curve0 = NurbsCurve::try_from_elements(
        2,
        KnotVec::bezier_knot(2),
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ],
        None,
    )
    .unwrap();
    let curve1 = line_as_nurbs(Point3::new(0.0, 0.5, 0.0), Point3::new(2.0, 0.5, 0.0));
    let hits = curve_curve(&curve0, &curve1, TOLERANCE);
    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert!(hit.point0.distance(hit.point1) < TOLERANCE);
        assert_near!(hit.point0.y, 0.5);
        assert_near!(curve0.subs(hit.parameter0), hit.point0);
        assert_near!(curve1.subs(hit.parameter1), hit.point1);
    }
    assert!(hits[0].parameter0 < hits[1].parameter0);
}

#[test]
fn curve_curve_disjoint() {
    let curve0 = line_as_nurbs(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
    let curve1 = line_as_nurbs(Point3::new(0.0, 5.0, 0.0), Point3::new(1.0, 5.0, 0.0));
    assert!(curve_curve(&curve0, &curve1, TOLERANCE).is_empty());
}

#[test]
fn curve_curve_is_deterministic() {
    let curve0 = NurbsCurve::try_from_elements(
        2,
        KnotVec::bezier_knot(2),
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ],
        None,
    )
    .unwrap();
    let curve1 = line_as_nurbs(Point3::new(0.0, 0.5, 0.0), Point3::new(2.0, 0.5, 0.0));
    let hits0 = curve_curve(&curve0, &curve1, TOLERANCE);
    let hits1 = curve_curve(&curve0, &curve1, TOLERANCE);
    assert_eq!(hits0.len(), hits1.len());
    for (hit0, hit1) in hits0.iter().zip(&hits1) {
        assert_eq!(hit0.parameter0, hit1.parameter0);
        assert_eq!(hit0.parameter1, hit1.parameter1);
    }
}
