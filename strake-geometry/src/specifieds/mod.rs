use crate::*;
use serde::{Deserialize, Serialize};

/// line defined by its two end points
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Line<P>(pub P, pub P);

/// infinite plane defined by an origin and a normal vector
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Plane {
    /// a point of the plane
    pub origin: Point3,
    /// the normal vector, not necessarily normalized
    pub normal: Vector3,
}

/// polyline curve parameterized by the segment index
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PolylineCurve<P>(pub Vec<P>);

mod line;
mod plane;
mod polyline;
