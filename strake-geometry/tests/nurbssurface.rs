use strake_geometry::prelude::*;

fn rational_surface() -> NurbsSurface<Vector4> {
    // a bi-quadratic rational patch over the square [0, 1]^2
    NurbsSurface::try_from_elements(
        (2, 2),
        (KnotVec::bezier_knot(2), KnotVec::bezier_knot(2)),
        &[
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 5.0, 2.0),
                Point3::new(0.0, 10.0, 0.0),
            ],
            vec![
                Point3::new(5.0, 0.0, 3.0),
                Point3::new(5.0, 5.0, 5.0),
                Point3::new(5.0, 10.0, 3.0),
            ],
            vec![
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 5.0, 2.0),
                Point3::new(10.0, 10.0, 0.0),
            ],
        ],
        Some(&[
            vec![1.0, 1.0, 1.0],
            vec![1.0, 2.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ]),
    )
    .unwrap()
}

#[test]
fn corner_interpolation() {
    let surface = rational_surface();
    assert_near!(surface.subs(0.0, 0.0), Point3::new(0.0, 0.0, 0.0));
    assert_near!(surface.subs(0.0, 1.0), Point3::new(0.0, 10.0, 0.0));
    assert_near!(surface.subs(1.0, 0.0), Point3::new(10.0, 0.0, 0.0));
    assert_near!(surface.subs(1.0, 1.0), Point3::new(10.0, 10.0, 0.0));
}

#[test]
fn derivatives_match_finite_differences() {
    let surface = rational_surface();
    const EPS: f64 = 1.0e-5;
    for &(u, v) in &[(0.2, 0.3), (0.5, 0.5), (0.7, 0.2), (0.4, 0.8)] {
        let uder = surface.uder(u, v);
        let fd_uder = (surface.subs(u + EPS, v) - surface.subs(u - EPS, v)) / (2.0 * EPS);
        assert!((uder - fd_uder).magnitude() < 1.0e-4);

        let vder = surface.vder(u, v);
        let fd_vder = (surface.subs(u, v + EPS) - surface.subs(u, v - EPS)) / (2.0 * EPS);
        assert!((vder - fd_vder).magnitude() < 1.0e-4);

        let uvder = surface.uvder(u, v);
        let fd_uvder = (surface.uder(u, v + EPS) - surface.uder(u, v - EPS)) / (2.0 * EPS);
        assert!((uvder - fd_uvder).magnitude() < 1.0e-4);
    }
}

#[test]
fn derivative_block_is_consistent() {
    let surface = rational_surface();
    let (u, v) = (0.3, 0.6);
    let ders = surface.ders(u, v, 2);
    assert_near!(Point3::from_vec(ders[0][0]), surface.subs(u, v));
    assert_near!(ders[1][0], surface.uder(u, v));
    assert_near!(ders[0][1], surface.vder(u, v));
    assert_near!(ders[2][0], surface.uuder(u, v));
    assert_near!(ders[1][1], surface.uvder(u, v));
    assert_near!(ders[0][2], surface.vvder(u, v));
}

#[test]
fn normal_is_orthogonal_to_tangents() {
    let surface = rational_surface();
    for &(u, v) in &[(0.1, 0.1), (0.5, 0.5), (0.9, 0.3)] {
        let normal = surface.normal(u, v);
        assert_near!(normal.magnitude(), 1.0);
        assert!(normal.dot(surface.uder(u, v)).abs() < 1.0e-6);
        assert!(normal.dot(surface.vder(u, v)).abs() < 1.0e-6);
    }
}

#[test]
fn iso_curve_restricts_surface() {
    let surface = rational_surface();
    const N: usize = 50;

    // fixing u produces a curve in v
    let curve = surface.iso_curve(SurfaceDirection::U, 0.3);
    assert_eq!(curve.degree(), surface.vdegree());
    assert_eq!(curve.knot_vec(), surface.vknot_vec());
    for i in 0..=N {
        let v = (i as f64) / (N as f64);
        assert_near!(curve.subs(v), surface.subs(0.3, v));
    }

    // fixing v produces a curve in u
    let curve = surface.iso_curve(SurfaceDirection::V, 0.7);
    assert_eq!(curve.degree(), surface.udegree());
    assert_eq!(curve.knot_vec(), surface.uknot_vec());
    for i in 0..=N {
        let u = (i as f64) / (N as f64);
        assert_near!(curve.subs(u), surface.subs(u, 0.7));
    }
}

#[test]
fn directional_knot_refinement() {
    let surface = rational_surface();
    let mut refined = surface.clone();
    refined.knot_refine(SurfaceDirection::U, &[0.25, 0.5, 0.75]);
    assert_eq!(refined.uknot_vec().len(), surface.uknot_vec().len() + 3);
    assert_eq!(refined.vknot_vec(), surface.vknot_vec());
    assert!(refined.near2_as_surface(&surface));
}

#[test]
fn split_in_one_direction() {
    let surface = rational_surface();
    let halves = surface.try_split_at(0.4, SplitDirection::U).unwrap();
    assert_eq!(halves.len(), 2);
    let ((u0, u1), _) = halves[0].parameter_range();
    assert_eq!((u0, u1), (0.0, 0.4));
    let ((u0, u1), _) = halves[1].parameter_range();
    assert_eq!((u0, u1), (0.4, 1.0));

    const N: usize = 20;
    for i in 0..=N {
        let v = (i as f64) / (N as f64);
        for j in 0..=N {
            let u = 0.4 * (j as f64) / (N as f64);
            assert_near!(halves[0].subs(u, v), surface.subs(u, v));
            let u = 0.4 + 0.6 * (j as f64) / (N as f64);
            assert_near!(halves[1].subs(u, v), surface.subs(u, v));
        }
    }
}

#[test]
fn split_in_both_directions() {
    let surface = rational_surface();
    let quadrants = surface.try_split_at(0.5, SplitDirection::Both).unwrap();
    assert_eq!(quadrants.len(), 4);
    let expected = [
        ((0.0, 0.5), (0.0, 0.5)),
        ((0.0, 0.5), (0.5, 1.0)),
        ((0.5, 1.0), (0.0, 0.5)),
        ((0.5, 1.0), (0.5, 1.0)),
    ];
    for (quadrant, ans) in quadrants.iter().zip(&expected) {
        assert_eq!(quadrant.parameter_range(), *ans);
        let ((u0, u1), (v0, v1)) = *ans;
        const N: usize = 10;
        for i in 0..=N {
            for j in 0..=N {
                let u = u0 + (u1 - u0) * (i as f64) / (N as f64);
                let v = v0 + (v1 - v0) * (j as f64) / (N as f64);
                assert_near!(quadrant.subs(u, v), surface.subs(u, v));
            }
        }
    }
}

#[test]
fn split_requires_interior_parameter() {
    let surface = rational_surface();
    assert!(surface.try_split_at(0.0, SplitDirection::U).is_err());
    assert!(surface.try_split_at(1.0, SplitDirection::V).is_err());
    assert!(surface.try_split_at(-0.1, SplitDirection::Both).is_err());
}

#[test]
fn closest_parameter_recovers_on_surface_point() {
    let surface = rational_surface();
    for &(u, v) in &[(0.2, 0.3), (0.5087, 0.3601), (0.8, 0.8)] {
        let pt = surface.subs(u, v);
        let (found_u, found_v) = surface.closest_parameter(pt).unwrap();
        assert!((found_u - u).abs() < 1.0e-4, "{} != {}", found_u, u);
        assert!((found_v - v).abs() < 1.0e-4, "{} != {}", found_v, v);
    }
}

#[test]
fn closest_point_of_external_point() {
    let surface = rational_surface();
    let pt = Point3::new(5.0, 5.0, 8.0);
    let (u, v) = surface.closest_parameter(pt).unwrap();
    let closest = surface.subs(u, v);
    // no sampled point is closer than the refined one
    const N: usize = 60;
    for i in 0..=N {
        for j in 0..=N {
            let s = (i as f64) / (N as f64);
            let t = (j as f64) / (N as f64);
            assert!(surface.subs(s, t).distance(pt) >= closest.distance(pt) - 1.0e-8);
        }
    }
}

#[test]
fn evaluate_at_modes() {
    let surface = rational_surface();
    let (u, v) = (0.4, 0.6);
    let pt = surface.evaluate_at(u, v, EvaluateSurfaceDirection::Point);
    assert_near!(Point3::from_vec(pt), surface.subs(u, v));
    let udir = surface.evaluate_at(u, v, EvaluateSurfaceDirection::U);
    assert_near!(udir.magnitude(), 1.0);
    assert_near!(udir, surface.uder(u, v).normalize());
    let vdir = surface.evaluate_at(u, v, EvaluateSurfaceDirection::V);
    assert_near!(vdir.magnitude(), 1.0);
    let normal = surface.evaluate_at(u, v, EvaluateSurfaceDirection::Normal);
    assert_near!(normal, surface.normal(u, v));
}

#[test]
fn weight_grid_validation() {
    let points = vec![
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
        vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
    ];
    let knots = (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1));
    assert!(NurbsSurface::try_from_elements((1, 1), knots.clone(), &points, None).is_ok());
    assert_eq!(
        NurbsSurface::try_from_elements(
            (1, 1),
            knots.clone(),
            &points,
            Some(&[vec![1.0, 1.0], vec![1.0, 0.0]]),
        ),
        Err(Error::NonPositiveWeight(0.0)),
    );
    assert_eq!(
        NurbsSurface::try_from_elements((1, 1), knots, &points, Some(&[vec![1.0, 1.0]])),
        Err(Error::IrregularControlPoints),
    );
}
