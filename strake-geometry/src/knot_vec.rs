use crate::errors::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::slice::SliceIndex;
use strake_base::tolerance::*;

/// knot vector
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct KnotVec(Vec<f64>);

impl KnotVec {
    /// empty constructor
    pub const fn new() -> KnotVec { KnotVec(Vec::new()) }

    /// Returns the length of range.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![1.0, 2.5, 4.0]);
    /// assert_eq!(knot_vec.range_length(), 3.0);
    /// assert_eq!(KnotVec::new().range_length(), 0.0);
    /// ```
    #[inline(always)]
    pub fn range_length(&self) -> f64 {
        match (self.0.first(), self.0.last()) {
            (Some(front), Some(back)) => back - front,
            _ => 0.0,
        }
    }

    /// Returns whether two knot vectors have the same range.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec0 = KnotVec::from(vec![0.0, 0.5, 2.0]);
    /// let knot_vec1 = KnotVec::from(vec![0.0, 0.0, 2.0, 2.0]);
    /// let knot_vec2 = KnotVec::from(vec![0.0, 3.0]);
    /// assert!(knot_vec0.same_range(&knot_vec1));
    /// assert!(!knot_vec0.same_range(&knot_vec2));
    /// assert!(!knot_vec0.same_range(&KnotVec::new()));
    /// ```
    #[inline(always)]
    pub fn same_range(&self, other: &KnotVec) -> bool {
        match (self.0.first(), other.0.first()) {
            (Some(front0), Some(front1)) => {
                front0.near(front1) && self.range_length().near(&other.range_length())
            }
            (None, None) => true,
            _ => false,
        }
    }

    /// Removes one item.
    #[inline(always)]
    pub fn remove(&mut self, idx: usize) -> f64 { self.0.remove(idx) }

    /// Returns the maximum index `i` of `self[i] <= x`.
    /// Returns `None` if `x < self[0]` or `self` is empty.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![0.0, 0.0, 1.0, 2.0, 2.0, 3.0]);
    /// assert_eq!(knot_vec.floor(2.0), Some(4));
    /// assert_eq!(knot_vec.floor(0.7), Some(1));
    /// assert_eq!(knot_vec.floor(-1.0), None);
    /// ```
    #[inline(always)]
    pub fn floor(&self, x: f64) -> Option<usize> {
        self.0.partition_point(|knot| *knot <= x).checked_sub(1)
    }

    /// the multiplicity of the `i`th knot
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![0.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
    /// assert_eq!(knot_vec.multiplicity(0), 1);
    /// assert_eq!(knot_vec.multiplicity(2), 3);
    /// assert_eq!(knot_vec.multiplicity(5), 2);
    /// ```
    #[inline(always)]
    pub fn multiplicity(&self, i: usize) -> usize {
        let knot = self.0[i];
        self.0.iter().filter(|u| knot.near(u)).count()
    }

    /// add a knot and return the index of the added knot.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let mut knot_vec = KnotVec::from(vec![0.0, 1.0, 2.0]);
    /// assert_eq!(knot_vec.add_knot(1.5), 2);
    /// assert_eq!(knot_vec.add_knot(-1.0), 0);
    /// assert_eq!(knot_vec, KnotVec::from(vec![-1.0, 0.0, 1.0, 1.5, 2.0]));
    /// ```
    #[inline(always)]
    pub fn add_knot(&mut self, knot: f64) -> usize {
        let idx = self.0.partition_point(|u| *u <= knot);
        self.0.insert(idx, knot);
        idx
    }

    /// Returns the index of the knot span containing `t`, i.e. the unique
    /// `k` in `[degree, n]` with `self[k] <= t < self[k + 1]` where `n` is
    /// the maximum index of the basis functions. At the closed right
    /// endpoint `n` is returned; parameters outside the active range clamp
    /// to the boundary spans.
    /// # Failures
    /// - If the length of `self` is not more than `degree + 1`, returns [`Error::TooLargeDegree`].
    /// - If the range of the knot vector is zero, returns [`Error::ZeroRange`].
    pub fn try_span(&self, degree: usize, t: f64) -> Result<usize> {
        if self.len() < degree + 2 {
            return Err(Error::TooLargeDegree(self.len(), degree));
        }
        if self.range_length().so_small() {
            return Err(Error::ZeroRange);
        }
        let n = self.len() - degree - 2;
        if t >= self[n + 1] {
            return Ok(n);
        }
        if t <= self[degree] {
            return Ok(degree);
        }
        let (mut low, mut high) = (degree, n + 1);
        let mut mid = (low + high) / 2;
        while t < self[mid] || t >= self[mid + 1] {
            if t < self[mid] {
                high = mid;
            } else {
                low = mid;
            }
            mid = (low + high) / 2;
        }
        Ok(mid)
    }

    /// Returns the index of the knot span containing `t`.
    /// cf. [`KnotVec::try_span`]
    /// # Panics
    /// Panic occurs if the knot vector is too short or has zero range.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
    /// assert_eq!(knot_vec.span(2, 0.25), 2);
    /// assert_eq!(knot_vec.span(2, 0.75), 3);
    /// assert_eq!(knot_vec.span(2, 1.0), 3); // closed right endpoint
    /// ```
    #[inline(always)]
    pub fn span(&self, degree: usize, t: f64) -> usize {
        self.try_span(degree, t)
            .unwrap_or_else(|error| panic!("{}", error))
    }

    /// Calculates the `degree + 1` non-zero B-spline basis functions on the
    /// span `span` at `t` by the triangular Cox-de Boor recurrence.
    ///
    /// The results are non-negative and sum to one.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// let knot_vec = KnotVec::from(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    /// let degree = 3;
    /// let t = 0.3;
    /// let span = knot_vec.span(degree, t);
    /// let res = knot_vec.basis_functions(degree, span, t);
    /// let ans = [
    ///     (1.0 - t) * (1.0 - t) * (1.0 - t),
    ///     3.0 * t * (1.0 - t) * (1.0 - t),
    ///     3.0 * t * t * (1.0 - t),
    ///     t * t * t,
    /// ];
    /// for i in 0..4 { assert_near2!(res[i], ans[i]); }
    /// ```
    pub fn basis_functions(&self, degree: usize, span: usize, t: f64) -> Vec<f64> {
        let mut res = vec![0.0; degree + 1];
        let mut left = vec![0.0; degree + 1];
        let mut right = vec![0.0; degree + 1];
        res[0] = 1.0;
        for j in 1..=degree {
            left[j] = t - self[span + 1 - j];
            right[j] = self[span + j] - t;
            let mut saved = 0.0;
            for r in 0..j {
                let temp = res[r] / (right[r + 1] + left[j - r]);
                res[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            res[j] = saved;
        }
        res
    }

    /// Calculates the derivatives of the non-zero basis functions on the
    /// span `span` at `t` up to `order`.
    ///
    /// The row `k` of the returned table consists of the `k`-th derivatives
    /// of the `degree + 1` non-zero basis functions. Rows beyond the degree
    /// are zero.
    /// # Examples
    /// ```
    /// use strake_geometry::prelude::*;
    /// // cubic Bernstein basis
    /// let knot_vec = KnotVec::bezier_knot(3);
    /// let t = 0.4;
    /// let span = knot_vec.span(3, t);
    /// let ders = knot_vec.basis_ders(3, span, t, 1);
    /// // first derivatives of the Bernstein polynomials
    /// let ans = [
    ///     -3.0 * (1.0 - t) * (1.0 - t),
    ///     3.0 * (1.0 - t) * (1.0 - 3.0 * t),
    ///     3.0 * t * (2.0 - 3.0 * t),
    ///     3.0 * t * t,
    /// ];
    /// for i in 0..4 { assert_near2!(ders[1][i], ans[i]); }
    /// ```
    pub fn basis_ders(&self, degree: usize, span: usize, t: f64, order: usize) -> Vec<Vec<f64>> {
        let p = degree;
        let d = order.min(p);
        let mut ndu = vec![vec![0.0; p + 1]; p + 1];
        let mut left = vec![0.0; p + 1];
        let mut right = vec![0.0; p + 1];
        ndu[0][0] = 1.0;
        for j in 1..=p {
            left[j] = t - self[span + 1 - j];
            right[j] = self[span + j] - t;
            let mut saved = 0.0;
            for r in 0..j {
                ndu[j][r] = right[r + 1] + left[j - r];
                let temp = ndu[r][j - 1] / ndu[j][r];
                ndu[r][j] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            ndu[j][j] = saved;
        }

        let mut ders = vec![vec![0.0; p + 1]; order + 1];
        for j in 0..=p {
            ders[0][j] = ndu[j][p];
        }

        let mut a = vec![vec![0.0; p + 1]; 2];
        for r in 0..=p {
            let (mut s1, mut s2) = (0, 1);
            a[0][0] = 1.0;
            for k in 1..=d {
                let mut der = 0.0;
                let rk = r as isize - k as isize;
                let pk = p - k;
                if r >= k {
                    a[s2][0] = a[s1][0] / ndu[pk + 1][rk as usize];
                    der = a[s2][0] * ndu[rk as usize][pk];
                }
                let j1 = if rk >= -1 { 1 } else { (-rk) as usize };
                let j2 = if r <= pk + 1 { k - 1 } else { p - r };
                for j in j1..=j2 {
                    let idx = (rk + j as isize) as usize;
                    a[s2][j] = (a[s1][j] - a[s1][j - 1]) / ndu[pk + 1][idx];
                    der += a[s2][j] * ndu[idx][pk];
                }
                if r <= pk {
                    a[s2][k] = -a[s1][k - 1] / ndu[pk + 1][r];
                    der += a[s2][k] * ndu[r][pk];
                }
                ders[k][r] = der;
                std::mem::swap(&mut s1, &mut s2);
            }
        }

        let mut factor = p as f64;
        for k in 1..=d {
            ders[k].iter_mut().for_each(|x| *x *= factor);
            factor *= (p - k) as f64;
        }
        ders
    }

    /// Normalizes the knot vector i.e. makes the first value 0 and the last value 1.
    /// # Failures
    /// Returns [`Error::ZeroRange`] if the range of the knot vector is so small.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let mut knot_vec = KnotVec::from(vec![2.0, 2.0, 3.0, 6.0, 6.0]);
    /// knot_vec.try_normalize().unwrap();
    /// assert_eq!(knot_vec, KnotVec::from(vec![0.0, 0.0, 0.25, 1.0, 1.0]));
    /// ```
    pub fn try_normalize(&mut self) -> Result<&mut Self> {
        let range = self.range_length();
        if range.so_small() {
            return Err(Error::ZeroRange);
        }
        let front = self.0[0];
        self.0.iter_mut().for_each(|u| *u = (*u - front) / range);
        Ok(self)
    }

    /// Normalizes the knot vector i.e. makes the first value 0 and the last value 1.
    /// # Panics
    /// Panic occurs if the range of the knot vector is so small.
    #[inline(always)]
    pub fn normalize(&mut self) -> &mut Self {
        self.try_normalize()
            .unwrap_or_else(|error| panic!("{}", error))
    }

    /// translate the knot vector
    /// # Example
    /// ```
    /// use strake_geometry::KnotVec;
    /// let mut knot_vec = KnotVec::from(vec![0.0, 0.5, 1.0, 1.0]);
    /// knot_vec.translate(2.0);
    /// assert_eq!(knot_vec, KnotVec::from(vec![2.0, 2.5, 3.0, 3.0]));
    /// ```
    pub fn translate(&mut self, x: f64) -> &mut Self {
        self.0.iter_mut().for_each(|u| *u += x);
        self
    }

    /// Inverts the knot vector
    /// # Example
    /// ```
    /// use strake_geometry::KnotVec;
    /// let mut knot_vec = KnotVec::from(vec![0.0, 0.0, 1.0, 4.0, 4.0]);
    /// knot_vec.invert();
    /// assert_eq!(knot_vec, KnotVec::from(vec![0.0, 0.0, 3.0, 4.0, 4.0]));
    /// ```
    pub fn invert(&mut self) -> &mut Self {
        let (front, back) = match (self.0.first(), self.0.last()) {
            (Some(front), Some(back)) => (*front, *back),
            _ => return self,
        };
        let offset = front + back;
        let inverted: Vec<f64> = self.0.iter().rev().map(|u| offset - u).collect();
        self.0 = inverted;
        self
    }

    /// determine the knot vector is clamped for the given degree.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0]);
    /// assert!(knot_vec.is_clamped(2));
    /// assert!(!knot_vec.is_clamped(3));
    /// ```
    #[inline(always)]
    pub fn is_clamped(&self, degree: usize) -> bool {
        self.multiplicity(0) > degree && self.multiplicity(self.len() - 1) > degree
    }

    /// Concats two knot vectors.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let mut knot_vec0 = KnotVec::from(vec![0.0, 0.0, 0.5, 1.0, 1.0]);
    /// let knot_vec1 = KnotVec::from(vec![1.0, 1.0, 2.0, 2.0]);
    /// knot_vec0.try_concat(&knot_vec1, 1).unwrap();
    /// assert_eq!(knot_vec0.as_slice(), &[0.0, 0.0, 0.5, 1.0, 1.0, 2.0, 2.0]);
    /// ```
    /// # Failures
    /// * If at least one of `self` or `other` is not clamped, returns [`Error::NotClampedKnotVector`]
    /// * If the last knot of `self` and the first knot of `other` are different, returns
    ///   [`Error::DifferentBackFront`].
    pub fn try_concat(&mut self, other: &KnotVec, degree: usize) -> Result<&mut Self> {
        if !self.is_clamped(degree) || !other.is_clamped(degree) {
            return Err(Error::NotClampedKnotVector);
        }
        let back = *self.0.last().unwrap();
        let front = *other.0.first().unwrap();
        if front < back || !front.near(&back) {
            return Err(Error::DifferentBackFront(back, front));
        }
        self.0.truncate(self.len() - degree - 1);
        self.0.extend_from_slice(&other.0);
        Ok(self)
    }

    /// Concats two knot vectors.
    /// # Panics
    /// Panic occurs if:
    /// * At least one of `self` or `other` is not clamped.
    /// * The last knot of `self` and the first knot of `other` are different.
    #[inline(always)]
    pub fn concat(&mut self, other: &KnotVec, degree: usize) -> &mut Self {
        self.try_concat(other, degree)
            .unwrap_or_else(|error| panic!("{}", error))
    }

    /// Returns trimmed vector by the specified range.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![0.0, 0.0, 1.0, 2.0, 3.0, 3.0]);
    /// assert_eq!(knot_vec.sub_vec(2..5), KnotVec::from(vec![1.0, 2.0, 3.0]));
    /// ```
    #[inline(always)]
    pub fn sub_vec<I: SliceIndex<[f64], Output = [f64]>>(&self, range: I) -> KnotVec {
        KnotVec(self.0[range].to_vec())
    }

    /// To single-multi description. i.e. decompose the unique vector of knots and the vector of
    /// multiplicity of knots.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![0.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
    /// let (knots, mults) = knot_vec.to_single_multi();
    /// assert_eq!(knots, vec![0.0, 1.0, 2.0]);
    /// assert_eq!(mults, vec![2, 3, 1]);
    /// ```
    pub fn to_single_multi(&self) -> (Vec<f64>, Vec<usize>) {
        let mut knots: Vec<f64> = Vec::new();
        let mut mults: Vec<usize> = Vec::new();
        for u in &self.0 {
            match knots.last() {
                Some(last) if last.near(u) => *mults.last_mut().unwrap() += 1,
                _ => {
                    knots.push(*u);
                    mults.push(1);
                }
            }
        }
        (knots, mults)
    }

    /// construct from single-multi description.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from_single_multi(vec![0.0, 1.0, 2.0], vec![2, 3, 1]).unwrap();
    /// assert_eq!(knot_vec, KnotVec::from(vec![0.0, 0.0, 1.0, 1.0, 1.0, 2.0]));
    /// ```
    pub fn from_single_multi(knots: Vec<f64>, mults: Vec<usize>) -> Result<KnotVec> {
        if knots.windows(2).any(|window| window[0] > window[1]) {
            return Err(Error::NotSortedVector);
        }
        let vec = knots
            .iter()
            .zip(&mults)
            .flat_map(|(knot, mult)| std::iter::repeat(*knot).take(*mult))
            .collect();
        Ok(KnotVec(vec))
    }

    /// construct from `Vec<f64>`. do not sort, only check sorted.
    pub fn try_from(vec: Vec<f64>) -> Result<KnotVec> {
        match vec.windows(2).any(|window| window[0] > window[1]) {
            true => Err(Error::NotSortedVector),
            false => Ok(KnotVec(vec)),
        }
    }

    /// Constructs the knot vector for the bezier spline.
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// assert_eq!(
    ///     *KnotVec::bezier_knot(2),
    ///     vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    /// );
    /// ```
    pub fn bezier_knot(degree: usize) -> KnotVec {
        KnotVec::from_single_multi(vec![0.0, 1.0], vec![degree + 1, degree + 1]).unwrap()
    }

    /// Constructs the uniform knot vector
    /// # Examples
    /// ```
    /// use strake_geometry::KnotVec;
    /// assert_eq!(
    ///     *KnotVec::uniform_knot(2, 4),
    ///     vec![0.0, 0.0, 0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0],
    /// );
    /// ```
    pub fn uniform_knot(degree: usize, division: usize) -> KnotVec {
        let knots = (0..=division).map(|i| i as f64 / division as f64).collect();
        let mut mults = vec![1; division + 1];
        mults[0] = degree + 1;
        mults[division] = degree + 1;
        KnotVec::from_single_multi(knots, mults).unwrap()
    }
}

impl From<Vec<f64>> for KnotVec {
    /// construct from `Vec<f64>`. The vector will be sorted.
    /// ```
    /// use strake_geometry::KnotVec;
    /// let knot_vec = KnotVec::from(vec![3.0, 1.0, 0.0, 2.0]);
    /// let arr: Vec<f64> = knot_vec.into();
    /// assert_eq!(arr, vec![0.0, 1.0, 2.0, 3.0]);
    /// ```
    fn from(mut vec: Vec<f64>) -> KnotVec {
        vec.sort_by(|x, y| x.partial_cmp(y).unwrap());
        KnotVec(vec)
    }
}

impl From<&Vec<f64>> for KnotVec {
    /// construct by the reference of vector. The clone of the vector is sorted.
    #[inline(always)]
    fn from(vec: &Vec<f64>) -> KnotVec { KnotVec::from(vec.clone()) }
}

impl From<KnotVec> for Vec<f64> {
    /// KnotVec into Vec<f64>
    #[inline(always)]
    fn from(knotvec: KnotVec) -> Vec<f64> { knotvec.0 }
}

impl std::iter::FromIterator<f64> for KnotVec {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> KnotVec {
        KnotVec::try_from(iter.into_iter().collect::<Vec<_>>()).unwrap()
    }
}

impl<'a> IntoIterator for &'a KnotVec {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl std::ops::Deref for KnotVec {
    type Target = Vec<f64>;
    #[inline(always)]
    fn deref(&self) -> &Vec<f64> { &self.0 }
}

impl AsRef<[f64]> for KnotVec {
    #[inline(always)]
    fn as_ref(&self) -> &[f64] { &self.0 }
}
