use rand::Rng;
use strake_geometry::prelude::*;

/// ratio of the default leaf domain length to the whole domain length
pub(crate) const LEAF_RATIO: f64 = 1.0 / 64.0;
/// bound of node pops in one traversal
const TRAVERSAL_BUDGET: usize = 100_000;

/// A node of a lazy subdivision tree. Children exist only when [`split`]
/// is called.
///
/// [`split`]: SubdivisionNode::split
pub trait SubdivisionNode: Clone {
    /// Returns the bounding box of the payload.
    fn bounding_box(&self) -> &BoundingBox<Point3>;
    /// Returns whether the parameter domain of the payload is below the
    /// subdivision tolerance.
    fn is_indivisible(&self) -> bool;
    /// Returns whether the node has no extent.
    fn is_empty(&self) -> bool;
    /// Splits the payload near the middle of its domain. The split point
    /// is jittered to avoid knots coinciding with midpoints.
    fn split(&self, rng: &mut dyn rand::RngCore) -> (Self, Self);
}

#[inline(always)]
fn jitter(rng: &mut dyn rand::RngCore) -> f64 { 0.45 + 0.1 * rng.random::<f64>() }

/// lazy subdivision node over a rational curve
#[derive(Clone, Debug)]
pub struct CurveNode {
    curve: NurbsCurve<Vector4>,
    bdd_box: BoundingBox<Point3>,
    tol: f64,
}

impl CurveNode {
    /// Creates the root node over `curve`. A tolerance not more than zero
    /// is replaced by the 64th part of the parameter domain.
    pub fn new(curve: &NurbsCurve<Vector4>, tol: f64) -> Self {
        let tol = match tol <= 0.0 {
            true => curve.parameter_interval().length() * LEAF_RATIO,
            false => tol,
        };
        Self::from_owned(curve.clone(), tol)
    }

    fn from_owned(curve: NurbsCurve<Vector4>, tol: f64) -> Self {
        let bdd_box = curve.roughly_bounding_box();
        CurveNode {
            curve,
            bdd_box,
            tol,
        }
    }

    /// Returns the payload of the node.
    #[inline(always)]
    pub fn payload(&self) -> &NurbsCurve<Vector4> { &self.curve }

    /// Returns the payload of the node.
    #[inline(always)]
    pub fn into_payload(self) -> NurbsCurve<Vector4> { self.curve }

    /// Returns the parameter range of the payload.
    #[inline(always)]
    pub fn range(&self) -> Interval { self.curve.parameter_interval() }
}

impl SubdivisionNode for CurveNode {
    #[inline(always)]
    fn bounding_box(&self) -> &BoundingBox<Point3> { &self.bdd_box }
    #[inline(always)]
    fn is_indivisible(&self) -> bool { self.range().length() < self.tol }
    #[inline(always)]
    fn is_empty(&self) -> bool { self.bdd_box.is_empty() }
    fn split(&self, rng: &mut dyn rand::RngCore) -> (Self, Self) {
        let t = self.range().parameter_at(jitter(rng));
        let mut former = self.curve.clone();
        let latter = former.cut(t);
        (
            Self::from_owned(former, self.tol),
            Self::from_owned(latter, self.tol),
        )
    }
}

/// lazy subdivision node over a rational surface
#[derive(Clone, Debug)]
pub struct SurfaceNode {
    surface: NurbsSurface<Vector4>,
    bdd_box: BoundingBox<Point3>,
    tol: f64,
}

impl SurfaceNode {
    /// Creates the root node over `surface`. A tolerance not more than zero
    /// is replaced by the 64th part of the longer parameter domain.
    pub fn new(surface: &NurbsSurface<Vector4>, tol: f64) -> Self {
        let ((u0, u1), (v0, v1)) = surface.parameter_range();
        let tol = match tol <= 0.0 {
            true => f64::max(u1 - u0, v1 - v0) * LEAF_RATIO,
            false => tol,
        };
        Self::from_owned(surface.clone(), tol)
    }

    fn from_owned(surface: NurbsSurface<Vector4>, tol: f64) -> Self {
        let bdd_box = surface.roughly_bounding_box();
        SurfaceNode {
            surface,
            bdd_box,
            tol,
        }
    }

    /// Returns the payload of the node.
    #[inline(always)]
    pub fn payload(&self) -> &NurbsSurface<Vector4> { &self.surface }

    /// Returns the payload of the node.
    #[inline(always)]
    pub fn into_payload(self) -> NurbsSurface<Vector4> { self.surface }

    /// Returns the parameter ranges of the payload.
    #[inline(always)]
    pub fn ranges(&self) -> (Interval, Interval) {
        let (urange, vrange) = self.surface.parameter_range();
        (urange.into(), vrange.into())
    }
}

impl SubdivisionNode for SurfaceNode {
    #[inline(always)]
    fn bounding_box(&self) -> &BoundingBox<Point3> { &self.bdd_box }
    #[inline(always)]
    fn is_indivisible(&self) -> bool {
        let (urange, vrange) = self.ranges();
        f64::max(urange.length(), vrange.length()) < self.tol
    }
    #[inline(always)]
    fn is_empty(&self) -> bool { self.bdd_box.is_empty() }
    fn split(&self, rng: &mut dyn rand::RngCore) -> (Self, Self) {
        let (urange, vrange) = self.ranges();
        let mut former = self.surface.clone();
        let latter = if urange.length() >= vrange.length() {
            former.ucut(urange.parameter_at(jitter(rng)))
        } else {
            former.vcut(vrange.parameter_at(jitter(rng)))
        };
        (
            Self::from_owned(former, self.tol),
            Self::from_owned(latter, self.tol),
        )
    }
}

/// Traverses a pair of subdivision trees depth-first and returns the pairs
/// of indivisible nodes whose bounding boxes overlap within `tol`.
///
/// The traversal works on an explicit stack and discards a pair as soon as
/// the boxes are separated by more than `tol`, so every returned candidate
/// pair has nearly touching boxes.
pub fn traverse_pairs<A, B>(a: &A, b: &B, tol: f64, rng: &mut dyn rand::RngCore) -> Vec<(A, B)>
where
    A: SubdivisionNode,
    B: SubdivisionNode, {
    let tol = tol.max(TOLERANCE);
    let mut stack = vec![(a.clone(), b.clone())];
    let mut res = Vec::new();
    let mut budget = TRAVERSAL_BUDGET;
    while let Some((a, b)) = stack.pop() {
        budget -= 1;
        if budget == 0 {
            break;
        }
        if a.is_empty() || b.is_empty() {
            continue;
        }
        if a.bounding_box().is_far(b.bounding_box(), tol) {
            continue;
        }
        match (a.is_indivisible(), b.is_indivisible()) {
            (true, true) => res.push((a, b)),
            (true, false) => {
                let (b0, b1) = b.split(rng);
                stack.push((a.clone(), b0));
                stack.push((a, b1));
            }
            (false, true) => {
                let (a0, a1) = a.split(rng);
                stack.push((a0, b.clone()));
                stack.push((a1, b));
            }
            (false, false) => {
                let (a0, a1) = a.split(rng);
                let (b0, b1) = b.split(rng);
                stack.push((a0.clone(), b0.clone()));
                stack.push((a0, b1.clone()));
                stack.push((a1.clone(), b0));
                stack.push((a1, b1));
            }
        }
    }
    res
}

/// Traverses a subdivision tree against a plane and returns the indivisible
/// nodes which may touch the plane.
///
/// A node is discarded when the signed distances of the two diagonal corners
/// of its bounding box have the same sign and both exceed `tol` in
/// magnitude, i.e. when the box lies strictly on one side of the plane.
pub fn traverse_plane<N>(node: &N, plane: &Plane, tol: f64, rng: &mut dyn rand::RngCore) -> Vec<N>
where N: SubdivisionNode {
    let tol = tol.max(TOLERANCE);
    let mut stack = vec![node.clone()];
    let mut res = Vec::new();
    let mut budget = TRAVERSAL_BUDGET;
    while let Some(node) = stack.pop() {
        budget -= 1;
        if budget == 0 {
            break;
        }
        if node.is_empty() {
            continue;
        }
        let bdd_box = node.bounding_box();
        let dist0 = plane.signed_distance(*bdd_box.min());
        let dist1 = plane.signed_distance(*bdd_box.max());
        if dist0 * dist1 > 0.0 && dist0.abs() > tol && dist1.abs() > tol {
            continue;
        }
        if node.is_indivisible() {
            res.push(node);
        } else {
            let (former, latter) = node.split(rng);
            stack.push(former);
            stack.push(latter);
        }
    }
    res
}
