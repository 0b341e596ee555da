use strake_geometry::prelude::*;

fn planar_cubic() -> NurbsCurve<Vector4> {
    // planar cubic polyline fit: degree 3, uniform clamped knots
    NurbsCurve::try_from_elements(
        3,
        KnotVec::uniform_knot(3, 3),
        &[
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(20.0, 15.0, 0.0),
            Point3::new(35.0, 15.0, 0.0),
            Point3::new(45.0, 10.0, 0.0),
            Point3::new(50.0, 5.0, 0.0),
        ],
        None,
    )
    .unwrap()
}

fn quadratic_rational() -> NurbsCurve<Vector4> {
    NurbsCurve::try_from_elements(
        2,
        KnotVec::bezier_knot(2),
        &[
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ],
        Some(&[1.0, 1.0, 2.0]),
    )
    .unwrap()
}

#[test]
fn quadratic_rational_regular_sample() {
    let curve = quadratic_rational();
    let (params, points) = curve.regular_sample(10);
    assert_eq!(params.len(), 10);
    assert_eq!(points.len(), 10);
    assert_near!(points[0], Point3::new(1.0, 0.0, 0.0));
    assert_near!(points[9], Point3::new(0.0, 2.0, 0.0));
    for pt in &points {
        assert!(pt.x.is_finite() && pt.y.is_finite() && pt.z.is_finite());
    }
}

#[test]
fn partition_of_unity() {
    let curve = planar_cubic();
    let knot_vec = curve.knot_vec();
    let degree = curve.degree();
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        let span = knot_vec.span(degree, t);
        let basis = knot_vec.basis_functions(degree, span, t);
        assert_eq!(basis.len(), degree + 1);
        let sum: f64 = basis.iter().sum();
        assert!((sum - 1.0).abs() < EPSILON);
        assert!(basis.iter().all(|b| *b >= -EPSILON));
    }
}

#[test]
fn endpoint_interpolation() {
    let curve = planar_cubic();
    assert_near!(curve.front(), Point3::new(5.0, 5.0, 0.0));
    assert_near!(curve.back(), Point3::new(50.0, 5.0, 0.0));
}

#[test]
fn planar_cubic_length() {
    let curve = planar_cubic();
    assert!((curve.length() - 50.334675).abs() < 1.0e-6);
}

#[test]
fn planar_cubic_parameter_at_length() {
    let curve = planar_cubic();
    assert!((curve.parameter_at_length(15.0) - 0.278127).abs() < 1.0e-6);
    // inverse consistency
    let t = curve.parameter_at_length(20.0);
    assert!((curve.length_at(t) - 20.0).abs() < 1.0e-6);
    // clamping
    assert_eq!(curve.parameter_at_length(-1.0), 0.0);
    assert_near!(curve.parameter_at_length(1000.0), 1.0);
}

#[test]
fn planar_cubic_divide_by_count() {
    let curve = planar_cubic();
    let (params, lengths) = curve.divide_by_count(7);
    let expected = [
        0.0, 0.122941, 0.265156, 0.420293, 0.579707, 0.734844, 0.877059, 1.0,
    ];
    assert_eq!(params.len(), 8);
    for (param, ans) in params.iter().zip(&expected) {
        assert!((param - ans).abs() < 1.0e-6, "{} != {}", param, ans);
    }
    // lengths are monotone and end at the total length
    for pair in lengths.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert!((lengths[7] - curve.length()).abs() < 1.0e-6);
}

#[test]
fn divide_by_length_consistency() {
    let curve = planar_cubic();
    let total = curve.length();
    let (params, lengths) = curve.divide_by_length(7.0);
    assert_eq!(params[0], 0.0);
    assert!((lengths[lengths.len() - 1] - total).abs() < 1.0e-6);
    for (pair_t, pair_l) in params.windows(2).zip(lengths.windows(2)) {
        assert!(pair_t[0] <= pair_t[1]);
        assert!(pair_l[0] <= pair_l[1]);
    }
    // segment lengths sum to the total length
    let sum: f64 = lengths.windows(2).map(|pair| pair[1] - pair[0]).sum();
    assert!((sum - total).abs() < 1.0e-6);

    // a step longer than the curve returns only the endpoints
    let (params, lengths) = curve.divide_by_length(2.0 * total);
    assert_eq!(params.len(), 2);
    assert_eq!(lengths.len(), 2);
    assert_eq!(params[0], 0.0);
    assert_near!(params[1], 1.0);
}

#[test]
fn quarter_circle_length() {
    // the rational quadratic quarter of the unit circle
    let curve = NurbsCurve::try_from_elements(
        2,
        KnotVec::bezier_knot(2),
        &[
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        Some(&[1.0, f64::sqrt(2.0) / 2.0, 1.0]),
    )
    .unwrap();
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near!(curve.subs(t).to_vec().magnitude(), 1.0);
    }
    assert!((curve.length() - std::f64::consts::FRAC_PI_2).abs() < 1.0e-6);
}

#[test]
fn weight_scaling_invariance() {
    let curve = quadratic_rational();
    let mut scaled = curve.clone();
    scaled.transform_control_points(|pt| *pt *= 3.5);
    assert!(scaled.near2_as_curve(&curve));
}

#[test]
fn split_at_half() {
    let curve = planar_cubic();
    let (left, right) = curve.try_split_at(0.5).unwrap();
    assert_eq!(left.degree(), 3);
    assert_eq!(right.degree(), 3);

    // the right curve starts with p + 1 copies of 0.5, the left ends with them
    let p = curve.degree();
    for i in 0..=p {
        assert_eq!(right.knot(i), 0.5);
        assert_eq!(left.knot(left.knot_vec().len() - 1 - i), 0.5);
    }
    assert_near!(left.back(), right.front());
    assert_near!(left.back(), curve.subs(0.5));

    // both halves reproduce the original geometry
    const N: usize = 50;
    for i in 0..=N {
        let t = 0.5 * (i as f64) / (N as f64);
        assert_near!(left.subs(t), curve.subs(t));
        assert_near!(right.subs(0.5 + t), curve.subs(0.5 + t));
    }
}

#[test]
fn split_requires_interior_parameter() {
    let curve = planar_cubic();
    assert_eq!(curve.try_split_at(0.0), Err(Error::OutOfDomain(0.0)));
    assert_eq!(curve.try_split_at(1.0), Err(Error::OutOfDomain(1.0)));
    assert_eq!(curve.try_split_at(-0.5), Err(Error::OutOfDomain(-0.5)));
}

#[test]
fn rational_knot_refinement_preserves_geometry() {
    let curve = quadratic_rational();
    let mut refined = curve.clone();
    refined.knot_refine(&[0.2, 0.5, 0.5, 0.8]);
    assert_eq!(refined.knot_vec().len(), curve.knot_vec().len() + 4);
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near!(refined.subs(t), curve.subs(t));
    }
}

#[test]
fn rational_degree_elevation_preserves_geometry() {
    let curve = quadratic_rational();
    let mut elevated = curve.clone();
    elevated.elevate_degree_to(4);
    assert_eq!(elevated.degree(), 4);
    assert!(elevated.near2_as_curve(&curve));
}

#[test]
fn bezier_decomposition_normalized() {
    let curve = planar_cubic();
    let beziers = curve.bezier_decomposition(true);
    assert_eq!(beziers.len(), 3);
    for bezier in &beziers {
        assert_eq!(bezier.parameter_range(), (0.0, 1.0));
        assert_eq!(bezier.degree(), 3);
    }
    // non-normalized segments cover the original domain
    let beziers = curve.bezier_decomposition(false);
    assert_eq!(beziers[0].parameter_range().0, 0.0);
    assert_near!(beziers[2].parameter_range().1, 1.0);
    for pair in beziers.windows(2) {
        assert_near!(pair[0].parameter_range().1, pair[1].parameter_range().0);
    }
}

#[test]
fn closest_point_recovers_on_curve_point() {
    let curve = planar_cubic();
    for &t in &[0.12, 0.34, 0.56, 0.78, 0.9] {
        let pt = curve.subs(t);
        let found = curve.closest_parameter(pt).unwrap();
        assert!((found - t).abs() < 1.0e-6, "{} != {}", found, t);
    }
}

#[test]
fn closest_point_of_external_point() {
    let curve = quadratic_rational();
    let pt = Point3::new(3.0, 3.0, 0.0);
    let t = curve.closest_parameter(pt).unwrap();
    let closest = curve.subs(t);
    // no sampled point is closer than the refined one
    const N: usize = 500;
    for i in 0..=N {
        let s = (i as f64) / (N as f64);
        assert!(curve.subs(s).distance(pt) >= closest.distance(pt) - 1.0e-8);
    }
}

#[test]
fn reverse_round_trip() {
    let curve = quadratic_rational();
    let mut inverted = curve.clone();
    inverted.invert().invert();
    assert_eq!(curve, inverted);

    let mut reversed = curve.clone();
    reversed.invert();
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near!(reversed.subs(t), curve.subs(1.0 - t));
    }
}

#[test]
fn invalid_elements_are_rejected() {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ];
    assert_eq!(
        NurbsCurve::try_from_elements(0, KnotVec::bezier_knot(2), &pts, None),
        Err(Error::ZeroDegree),
    );
    assert_eq!(
        NurbsCurve::try_from_elements(2, KnotVec::bezier_knot(3), &pts, None),
        Err(Error::TooShortKnotVector(8, 3)),
    );
    assert_eq!(
        NurbsCurve::try_from_elements(
            2,
            KnotVec::from(vec![0.0, 0.0, 0.3, 0.6, 1.0, 1.0]),
            &pts,
            None
        ),
        Err(Error::NotClampedKnotVector),
    );
    assert_eq!(
        NurbsCurve::try_from_elements(2, KnotVec::bezier_knot(2), &pts, Some(&[1.0, -1.0, 1.0])),
        Err(Error::NonPositiveWeight(-1.0)),
    );
    assert_eq!(
        NurbsCurve::try_from_elements(2, KnotVec::bezier_knot(2), &pts, Some(&[1.0, 1.0])),
        Err(Error::IrregularControlPoints),
    );
}

#[test]
fn tangent_is_unitized() {
    let curve = planar_cubic();
    for &t in &[0.1, 0.3, 0.5, 0.7, 0.9] {
        assert_near!(curve.tangent_at(t).magnitude(), 1.0);
    }
}
