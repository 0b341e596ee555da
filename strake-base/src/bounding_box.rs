use cgmath::*;
use serde::*;
use std::ops::Index;

/// bounding box
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoundingBox<V>(V, V);

/// The trait for defining the bounding box
pub trait Bounded<S> {
    /// the result of subtraction
    type Vector;
    #[doc(hidden)]
    fn infinity() -> Self;
    #[doc(hidden)]
    fn neg_infinity() -> Self;
    #[doc(hidden)]
    fn max(&self, other: &Self) -> Self;
    #[doc(hidden)]
    fn min(&self, other: &Self) -> Self;
    #[doc(hidden)]
    fn max_component(one: Self::Vector) -> S;
    #[doc(hidden)]
    fn diagonal(self, other: Self) -> Self::Vector;
    #[doc(hidden)]
    fn mid(self, other: Self) -> Self;
}

macro_rules! pr2 {
    ($a: expr, $b: expr) => {
        $b
    };
}
macro_rules! impl_bounded {
        ($typename: ident, $vectortype: ident, $($num: expr),*) => {
            impl<S: BaseFloat> Bounded<S> for $typename<S> {
                type Vector = $vectortype<S>;
                fn infinity() -> $typename<S> {
                    $typename::new($(pr2!($num, S::infinity())),*)
                }
                fn neg_infinity() -> $typename<S> {
                    $typename::new($(pr2!($num, S::neg_infinity())),*)
                }
                // `Float::max` and `Float::min` return the non-NaN operand,
                // so pushing a point with a NaN component leaves the box alone
                fn max(&self, other: &Self) -> Self {
                    $typename::new($(self[$num].max(other[$num])),*)
                }
                fn min(&self, other: &Self) -> Self {
                    $typename::new($(self[$num].min(other[$num])),*)
                }
                fn max_component(one: Self::Vector) -> S {
                    let mut res = S::neg_infinity();
                    $(res = res.max(one[$num]);)*
                    res
                }
                fn diagonal(self, other: Self) -> Self::Vector { self - other }
                fn mid(self, other: Self) -> Self {
                    self + (other - self) / (S::one() + S::one())
                }
            }
        };
    }
impl_bounded!(Vector1, Vector1, 0);
impl_bounded!(Point1, Vector1, 0);
impl_bounded!(Vector2, Vector2, 0, 1);
impl_bounded!(Point2, Vector2, 0, 1);
impl_bounded!(Vector3, Vector3, 0, 1, 2);
impl_bounded!(Point3, Vector3, 0, 1, 2);
impl_bounded!(Vector4, Vector4, 0, 1, 2, 3);

impl<F, V> Default for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Index<usize, Output = F> + Bounded<F> + Copy,
{
    #[inline(always)]
    fn default() -> Self { BoundingBox(V::infinity(), V::neg_infinity()) }
}

impl<F, V> BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Index<usize, Output = F> + Bounded<F> + Copy,
{
    /// Creates an empty bounding box
    #[inline(always)]
    pub fn new() -> Self { Self::default() }
    /// Adds a point to the bounding box.
    /// # Examples
    /// ```
    /// use strake_base::{cgmath64::*, bounding_box::*};
    /// let mut bdd_box = BoundingBox::new();
    /// bdd_box.push(&Point2::new(2.0, -3.0));
    /// bdd_box.push(&Point2::new(-1.0, 5.0));
    /// assert_eq!(bdd_box.min(), &Point2::new(-1.0, -3.0));
    /// assert_eq!(bdd_box.max(), &Point2::new(2.0, 5.0));
    /// ```
    /// # Remarks
    /// If the added point has a NaN component, then the point is not added.
    #[inline(always)]
    pub fn push(&mut self, point: &V) {
        self.0 = self.0.min(point);
        self.1 = self.1.max(point);
    }

    /// Returns the bounding box is empty or not. The empty box is the
    /// invalid sentinel: a union with it returns the other operand and an
    /// intersection with it stays empty.
    /// # Examples
    /// ```
    /// use strake_base::{cgmath64::*, bounding_box::*};
    /// let mut bdd_box = BoundingBox::new();
    /// assert!(bdd_box.is_empty());
    /// bdd_box.push(&Point2::new(4.0, 2.0));
    /// assert!(!bdd_box.is_empty());
    /// ```
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.0[0] > self.1[0] }
    /// Returns the reference to the maximum point.
    #[inline(always)]
    pub fn max(&self) -> &V { &self.1 }
    /// Returns the reference to the minimal point.
    #[inline(always)]
    pub fn min(&self) -> &V { &self.0 }
    /// Returns the diagonal vector.
    #[inline(always)]
    pub fn diagonal(&self) -> V::Vector { self.1.diagonal(self.0) }

    /// Returns the diameter of the bounding box.
    #[inline(always)]
    pub fn diameter(&self) -> F {
        match self.is_empty() {
            true => F::neg_infinity(),
            false => self.0.distance(self.1),
        }
    }

    /// Returns the maximum length of the edges of the bounding box.
    #[inline(always)]
    pub fn size(&self) -> F { V::max_component(self.diagonal()) }

    /// Returns the center of the bounding box.
    #[inline(always)]
    pub fn center(&self) -> V { self.0.mid(self.1) }

    /// Returns whether `self` and `other` are separated by more than `tol`
    /// along some axis. Empty boxes are far from everything.
    /// # Examples
    /// ```
    /// use strake_base::{cgmath64::*, bounding_box::*};
    /// let bdd_box0: BoundingBox<Point2> = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]
    ///     .into_iter()
    ///     .collect();
    /// let bdd_box1: BoundingBox<Point2> = vec![Point2::new(2.0, 0.0), Point2::new(3.0, 1.0)]
    ///     .into_iter()
    ///     .collect();
    /// assert!(bdd_box0.is_far(&bdd_box1, 0.5));
    /// assert!(!bdd_box0.is_far(&bdd_box1, 1.5));
    /// ```
    #[inline(always)]
    pub fn is_far(&self, other: &Self, tol: F) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        let gap0 = V::max_component(self.0.diagonal(other.1));
        let gap1 = V::max_component(other.0.diagonal(self.1));
        gap0 > tol || gap1 > tol
    }
}

impl<'a, F, V> FromIterator<&'a V> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    fn from_iter<I: IntoIterator<Item = &'a V>>(iter: I) -> BoundingBox<V> {
        iter.into_iter().copied().collect()
    }
}

impl<F, V> FromIterator<V> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> BoundingBox<V> {
        iter.into_iter().fold(BoundingBox::new(), |mut bdd_box, pt| {
            bdd_box.push(&pt);
            bdd_box
        })
    }
}

impl<F, V> std::ops::AddAssign<&BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    /// Puts the points in `other` into `self`.
    /// # Examples
    /// ```
    /// use strake_base::{cgmath64::*, bounding_box::*};
    /// let mut bdd_box = BoundingBox::from_iter(&[
    ///     Point2::new(1.0, -1.0), Point2::new(2.0, 4.0),
    /// ]);
    /// bdd_box += &BoundingBox::from_iter(&[
    ///     Point2::new(-2.0, 0.0), Point2::new(0.0, 6.0),
    /// ]);
    /// assert_eq!(bdd_box.min(), &Point2::new(-2.0, -1.0));
    /// assert_eq!(bdd_box.max(), &Point2::new(2.0, 6.0));
    ///
    /// // unioning the empty box is the identity
    /// bdd_box += &BoundingBox::new();
    /// assert_eq!(bdd_box.min(), &Point2::new(-2.0, -1.0));
    /// assert_eq!(bdd_box.max(), &Point2::new(2.0, 6.0));
    /// ```
    #[inline(always)]
    fn add_assign(&mut self, other: &BoundingBox<V>) {
        self.0 = self.0.min(&other.0);
        self.1 = self.1.max(&other.1);
    }
}

impl<F, V> std::ops::AddAssign<BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    #[inline(always)]
    fn add_assign(&mut self, other: BoundingBox<V>) { *self += &other; }
}

impl<F, V> std::ops::Add<&BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    type Output = BoundingBox<V>;
    /// Returns the union of `self` and `other`.
    #[inline(always)]
    fn add(mut self, other: &BoundingBox<V>) -> BoundingBox<V> {
        self += other;
        self
    }
}

impl<F, V> std::ops::Add<BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    type Output = BoundingBox<V>;
    #[inline(always)]
    fn add(self, other: BoundingBox<V>) -> BoundingBox<V> { self + &other }
}

impl<F, V> std::ops::BitXorAssign<&BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    /// Intersects `self` with `other`.
    /// # Examples
    /// ```
    /// use strake_base::{cgmath64::*, bounding_box::*};
    /// let mut bdd_box = BoundingBox::from_iter(&[
    ///     Point2::new(1.0, -1.0), Point2::new(2.0, 4.0),
    /// ]);
    /// bdd_box ^= &BoundingBox::from_iter(&[
    ///     Point2::new(0.0, 0.0), Point2::new(3.0, 2.0),
    /// ]);
    /// assert_eq!(bdd_box.min(), &Point2::new(1.0, 0.0));
    /// assert_eq!(bdd_box.max(), &Point2::new(2.0, 2.0));
    ///
    /// // intersecting the empty box kills the box
    /// bdd_box ^= &BoundingBox::new();
    /// assert!(bdd_box.is_empty());
    /// ```
    #[inline(always)]
    fn bitxor_assign(&mut self, other: &BoundingBox<V>) {
        self.0 = self.0.max(&other.0);
        self.1 = self.1.min(&other.1);
    }
}

impl<F, V> std::ops::BitXor<&BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    type Output = BoundingBox<V>;
    /// Returns the intersection of `self` and `other`.
    #[inline(always)]
    fn bitxor(mut self, other: &BoundingBox<V>) -> BoundingBox<V> {
        self ^= other;
        self
    }
}

impl<F, V> std::ops::BitXor<BoundingBox<V>> for BoundingBox<V>
where
    F: BaseFloat,
    V: MetricSpace<Metric = F> + Copy + Index<usize, Output = F> + Bounded<F>,
{
    type Output = BoundingBox<V>;
    #[inline(always)]
    fn bitxor(self, other: BoundingBox<V>) -> BoundingBox<V> { self ^ &other }
}
