use strake_geometry::prelude::*;
use strake_shapeops::*;

fn quadratic_arch() -> NurbsCurve<Vector4> {
    NurbsCurve::try_from_elements(
        2,
        KnotVec::bezier_knot(2),
        &[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ],
        None,
    )
    .unwrap()
}

#[test]
fn curve_node_split_covers_domain() {
    let curve = quadratic_arch();
    let root = CurveNode::new(&curve, 0.0);
    let mut rng = default_rng();
    let (former, latter) = root.split(&mut rng);
    assert_eq!(former.range().t0(), 0.0);
    assert_near!(former.range().t1(), latter.range().t0());
    assert_eq!(latter.range().t1(), 1.0);
    // the split point is jittered around the midpoint
    let t = former.range().t1();
    assert!((0.45..0.55).contains(&t));
    // both children reproduce the original geometry on their halves
    assert_near!(former.payload().back(), curve.subs(t));
    assert_near!(latter.payload().front(), curve.subs(t));
}

#[test]
fn indivisible_below_tolerance() {
    let curve = quadratic_arch();
    let node = CurveNode::new(&curve, 2.0);
    assert!(node.is_indivisible());
    let node = CurveNode::new(&curve, 0.0);
    assert!(!node.is_indivisible());
}

#[test]
fn bounding_box_contains_curve() {
    let curve = quadratic_arch();
    let node = CurveNode::new(&curve, 0.0);
    let bdd_box = node.bounding_box();
    const N: usize = 100;
    for i in 0..=N {
        let t = (i as f64) / (N as f64);
        let pt = curve.subs(t);
        assert!(bdd_box.min().x <= pt.x && pt.x <= bdd_box.max().x);
        assert!(bdd_box.min().y <= pt.y && pt.y <= bdd_box.max().y);
        assert!(bdd_box.min().z <= pt.z && pt.z <= bdd_box.max().z);
    }
}

#[test]
fn pair_traversal_is_sound() {
    // every returned candidate pair has nearly touching bounding boxes
    let curve0 = quadratic_arch();
    let curve1 = NurbsCurve::try_from_elements(
        2,
        KnotVec::bezier_knot(2),
        &[
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(1.0, -2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        ],
        None,
    )
    .unwrap();
    let root0 = CurveNode::new(&curve0, 0.0);
    let root1 = CurveNode::new(&curve1, 0.0);
    let mut rng = default_rng();
    let tol = TOLERANCE;
    let pairs = traverse_pairs(&root0, &root1, tol, &mut rng);
    assert!(!pairs.is_empty());
    for (node0, node1) in &pairs {
        assert!(node0.is_indivisible());
        assert!(node1.is_indivisible());
        assert!(!node0.bounding_box().is_far(node1.bounding_box(), tol));
    }
}

#[test]
fn pair_traversal_of_distant_curves_is_empty() {
    let curve0 = quadratic_arch();
    let mut far = quadratic_arch();
    far.transform_control_points(|pt| pt.y += 100.0 * pt.w);
    let root0 = CurveNode::new(&curve0, 0.0);
    let root1 = CurveNode::new(&far, 0.0);
    let mut rng = default_rng();
    assert!(traverse_pairs(&root0, &root1, TOLERANCE, &mut rng).is_empty());
}

#[test]
fn plane_traversal_prunes_one_sided_nodes() {
    let curve = quadratic_arch();
    let root = CurveNode::new(&curve, 0.0);
    let mut rng = default_rng();

    // the curve lies in z = 0; a far plane prunes everything at the root
    let far = Plane::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
    assert!(traverse_plane(&root, &far, TOLERANCE, &mut rng).is_empty());

    // a plane cutting the arch leaves only near-planar sub-curves
    let cutting = Plane::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    let survivors = traverse_plane(&root, &cutting, TOLERANCE, &mut rng);
    assert!(!survivors.is_empty());
    for node in &survivors {
        assert!(node.is_indivisible());
    }
}

#[test]
fn surface_node_splits_longer_direction() {
    let surface = NurbsSurface::try_from_elements(
        (1, 1),
        (KnotVec::bezier_knot(1), KnotVec::bezier_knot(1)),
        &[
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![Point3::new(4.0, 0.0, 0.0), Point3::new(4.0, 1.0, 0.0)],
        ],
        None,
    )
    .unwrap();
    let root = SurfaceNode::new(&surface, 0.0);
    let mut rng = default_rng();
    let (former, latter) = root.split(&mut rng);
    // the longer direction is split first; both domains are equal here so
    // the u direction is chosen
    let (urange0, vrange0) = former.ranges();
    let (urange1, vrange1) = latter.ranges();
    assert_near!(urange0.t1(), urange1.t0());
    assert_eq!(vrange0, vrange1);
}
