use proptest::prelude::*;
use strake_geometry::prelude::*;

fn quadratic() -> BSplineCurve<Vector2> {
    // the curve (3t, t + t^2)
    BSplineCurve::new(
        KnotVec::bezier_knot(2),
        vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.5, 0.5),
            Vector2::new(3.0, 2.0),
        ],
    )
}

#[test]
fn test_substitution() {
    let bspcurve = quadratic();
    const N: usize = 100; // sample size
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near2!(bspcurve.subs(t), Vector2::new(3.0 * t, t + t * t));
    }
}

#[test]
fn test_derivation() {
    let bspcurve = quadratic();
    const N: usize = 100; // sample size
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near2!(bspcurve.der(t), Vector2::new(3.0, 1.0 + 2.0 * t));
        assert_near2!(bspcurve.der2(t), Vector2::new(0.0, 2.0));
    }
}

#[test]
fn ders_rows_match_analytic_derivatives() {
    let bspcurve = quadratic();
    const N: usize = 20;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        let ders = bspcurve.ders(t, 3);
        assert_near2!(ders[0], Vector2::new(3.0 * t, t + t * t));
        assert_near2!(ders[1], Vector2::new(3.0, 1.0 + 2.0 * t));
        assert_near2!(ders[2], Vector2::new(0.0, 2.0));
        // rows beyond the degree vanish
        assert_near2!(ders[3], Vector2::new(0.0, 0.0));
    }
}

proptest! {
    #[test]
    fn test_der_n(
        t in 0.01f64..=0.99,
        n in 0usize..=3,
        degree in 2usize..=6,
        div in 1usize..=8,
        pts in prop::array::uniform16(prop::array::uniform3(-10f64..=10.0))
    ) {
        prop_assume!(degree > n + 1);
        let knot_vec = KnotVec::uniform_knot(degree, div);
        let control_points = pts[0..degree + div]
            .iter()
            .map(|&p| Vector3::from(p))
            .collect::<Vec<_>>();
        let bsp = BSplineCurve::new(knot_vec, control_points);

        const EPS: f64 = 1.0e-4;
        let der0 = bsp.der_n(t, n + 1);
        let der1 = (bsp.der_n(t + EPS, n) - bsp.der_n(t - EPS, n)) / (2.0 * EPS);
        prop_assert!((der0 - der1).magnitude() < 0.01 * der0.magnitude() + 1.0e-2);
    }
}

#[test]
fn knot_refinement_preserves_geometry() {
    let knot_vec = KnotVec::uniform_knot(3, 2);
    let ctrl_pts = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 2.0, 0.0),
        Vector3::new(3.0, 1.0, -1.0),
        Vector3::new(4.0, 0.0, 2.0),
        Vector3::new(5.0, 2.0, 1.0),
    ];
    let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut refined = bspcurve.clone();
    refined.knot_refine(&[0.1, 0.25, 0.25, 0.7, 0.9]);

    assert_eq!(refined.knot_vec().len(), bspcurve.knot_vec().len() + 5);
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near2!(refined.subs(t), bspcurve.subs(t));
    }
}

#[test]
fn knot_removal_inverts_insertion() {
    let knot_vec = KnotVec::uniform_knot(3, 2);
    let ctrl_pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 3.0),
        Vector2::new(2.0, -2.0),
        Vector2::new(3.0, 1.0),
        Vector2::new(4.0, 0.0),
    ];
    let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut modified = bspcurve.clone();
    modified.add_knot(0.3);
    let idx = modified.knot_vec().floor(0.3).unwrap();
    assert!(modified.try_remove_knot(idx).is_ok());
    assert_eq!(modified.knot_vec().len(), bspcurve.knot_vec().len());
    assert!(modified.near2_as_curve(&bspcurve));
}

#[test]
fn bezier_decomposition_covers_curve() {
    let knot_vec = KnotVec::uniform_knot(2, 3);
    let ctrl_pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(2.0, 2.0),
        Vector2::new(4.0, 3.0),
        Vector2::new(5.0, 6.0),
    ];
    let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    let beziers = bspcurve.bezier_decomposition();
    assert_eq!(beziers.len(), 3);

    const N: usize = 30;
    for bezier in &beziers {
        let (t0, t1) = bezier.parameter_range();
        for i in 0..=N {
            let t = t0 + (t1 - t0) * (i as f64) / (N as f64);
            assert_near2!(bezier.subs(t), bspcurve.subs(t));
        }
    }
}

#[test]
fn cut_composition() {
    let knot_vec = KnotVec::uniform_knot(3, 3);
    let ctrl_pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(2.0, -1.0),
        Vector2::new(3.0, 1.0),
        Vector2::new(4.0, 0.0),
        Vector2::new(5.0, 1.0),
    ];
    let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut part0 = bspcurve.clone();
    let part1 = part0.cut(0.43);

    assert_eq!(part0.parameter_range(), (0.0, 0.43));
    assert_eq!(part1.parameter_range(), (0.43, 1.0));
    assert_near2!(part0.subs(0.43), part1.subs(0.43));
    assert_near2!(part0.subs(0.43), bspcurve.subs(0.43));
}

#[test]
fn concat_round_trip() {
    let knot_vec = KnotVec::uniform_knot(2, 2);
    let ctrl_pts = vec![
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, -1.0),
        Vector2::new(2.0, 2.0),
        Vector2::new(3.0, 0.0),
    ];
    let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut part0 = bspcurve.clone();
    let mut part1 = part0.cut(0.37);
    part0.try_concat(&mut part1).unwrap();
    assert!(part0.near2_as_curve(&bspcurve));
}

#[test]
fn elevate_degree_preserves_geometry() {
    let knot_vec = KnotVec::uniform_knot(2, 2);
    let ctrl_pts = vec![
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 2.0),
        Vector2::new(2.0, -1.0),
        Vector2::new(3.0, 4.0),
    ];
    let bspcurve = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut elevated = bspcurve.clone();
    elevated.elevate_degree_to(4);
    assert_eq!(elevated.degree(), 4);
    assert!(elevated.near2_as_curve(&bspcurve));
}

#[test]
fn invert_round_trip() {
    let knot_vec = KnotVec::uniform_knot(2, 2);
    let ctrl_pts = vec![
        Vector2::new(1.0, 2.0),
        Vector2::new(2.0, 3.0),
        Vector2::new(3.0, 4.0),
        Vector2::new(4.0, 5.0),
    ];
    let bspcurve0 = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut bspcurve1 = bspcurve0.clone();
    bspcurve1.invert().invert();
    assert_eq!(bspcurve0, bspcurve1);

    let mut inverted = bspcurve0.clone();
    inverted.invert();
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        assert_near2!(bspcurve0.subs(t), inverted.subs(1.0 - t));
    }
}

#[test]
fn refined_copy_is_near_the_original() {
    let knot_vec = KnotVec::uniform_knot(3, 2);
    let ctrl_pts = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 2.0),
        Vector2::new(2.0, -1.0),
        Vector2::new(3.0, 1.0),
        Vector2::new(4.0, 0.0),
    ];
    let bspcurve0 = BSplineCurve::new(knot_vec, ctrl_pts);
    let mut bspcurve1 = bspcurve0.clone();
    bspcurve1.knot_refine(&[0.2, 0.4, 0.6, 0.8]);
    assert!(bspcurve0.near_as_curve(&bspcurve1));

    // a perturbed control point breaks the equality
    *bspcurve1.control_point_mut(3) += Vector2::new(0.05, -0.02);
    assert!(!bspcurve0.near_as_curve(&bspcurve1));
}
