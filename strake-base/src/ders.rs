use crate::cgmath_extend_traits::*;
use cgmath::*;

/// Maximum order that guarantees differential calculations
pub const MAX_DER_ORDER: usize = 31;

/// Calculation results of curve differentiation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveDers<V> {
    array: [V; MAX_DER_ORDER + 1],
    max_order: usize,
}

impl<V> CurveDers<V> {
    /// Construct zeroed `CurveDers` with maximum order = `max_order`.
    #[inline]
    pub fn new(max_order: usize) -> Self
    where V: Zero + Copy {
        Self {
            array: [V::zero(); MAX_DER_ORDER + 1],
            max_order,
        }
    }
    /// Returns the maximum order
    #[inline]
    pub const fn max_order(&self) -> usize { self.max_order }

    /// Returns the multi-order derivatives of the projected rational curve.
    ///
    /// With the homogeneous derivatives `A^(k)` and the weight derivatives
    /// `w^(k)` at hand, the Euclidean derivatives come from inverting the
    /// Leibniz expansion of `A = w * E`:
    /// `E^(k) = (A^(k) - sum_{j<k} C(k,j) w^(k-j) E^(j)) / w`.
    /// The binomial row is carried along as a Pascal-triangle update.
    /// # Examples
    /// ```
    /// use strake_base::{cgmath64::*, ders::*};
    /// let t = 2.0;
    ///
    /// // the curve: c(t) = (2t, 2t^2, 2t^3, 2)
    /// let raw_ders = [
    ///     Vector4::new(2.0 * t, 2.0 * t * t, 2.0 * t * t * t, 2.0),
    ///     Vector4::new(2.0, 4.0 * t, 6.0 * t * t, 0.0),
    ///     Vector4::new(0.0, 4.0, 12.0 * t, 0.0),
    ///     Vector4::new(0.0, 0.0, 12.0, 0.0),
    /// ];
    /// let ders = CurveDers::try_from(raw_ders).unwrap();
    ///
    /// // the projected curve: (t, t^2, t^3)
    /// let ans = [
    ///     Vector3::new(t, t * t, t * t * t),
    ///     Vector3::new(1.0, 2.0 * t, 3.0 * t * t),
    ///     Vector3::new(0.0, 2.0, 6.0 * t),
    ///     Vector3::new(0.0, 0.0, 6.0),
    /// ];
    /// let rat_ders = ders.rat_ders();
    /// assert_eq!(rat_ders, CurveDers::try_from(ans).unwrap());
    /// ```
    pub fn rat_ders<S>(&self) -> CurveDers<<V::Point as EuclideanSpace>::Diff>
    where
        S: BaseFloat,
        V: Homogeneous<S>,
        V::Point: EuclideanSpace<Scalar = V::Scalar>, {
        let weight = self[0].weight();
        let mut res = CurveDers::new(self.max_order);
        let mut binom = [S::zero(); MAX_DER_ORDER + 1];
        binom[0] = S::one();
        for k in 0..=self.max_order {
            for j in (1..=k).rev() {
                binom[j] = binom[j] + binom[j - 1];
            }
            let mut rest = self[k].truncate();
            for j in 0..k {
                rest = rest - res[j] * (binom[j] * self[k - j].weight());
            }
            res[k] = rest / weight;
        }
        res
    }
}

impl<V> std::ops::Deref for CurveDers<V> {
    type Target = [V];
    #[inline]
    fn deref(&self) -> &[V] { &self.array[..=self.max_order] }
}

impl<V> std::ops::DerefMut for CurveDers<V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [V] { &mut self.array[..=self.max_order] }
}

impl<V: Zero + Copy, const N: usize> TryFrom<[V; N]> for CurveDers<V> {
    type Error = &'static str;
    fn try_from(value: [V; N]) -> Result<Self, Self::Error> {
        if N == 0 {
            Err("empty array cannot convert to CurveDers.")
        } else if N > MAX_DER_ORDER + 1 {
            Err("the length of CurveDers must be less than MAX_DER_ORDER + 1.")
        } else {
            let mut array = [V::zero(); MAX_DER_ORDER + 1];
            array[..N].copy_from_slice(&value);
            Ok(Self {
                array,
                max_order: N - 1,
            })
        }
    }
}

impl<V: Zero + Copy> TryFrom<&[V]> for CurveDers<V> {
    type Error = &'static str;
    fn try_from(value: &[V]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err("empty slice cannot convert CurveDers.")
        } else if value.len() > MAX_DER_ORDER + 1 {
            Err("the length of CurveDers must be less than MAX_DER_ORDER + 1.")
        } else {
            let mut array = [V::zero(); MAX_DER_ORDER + 1];
            array[..value.len()].copy_from_slice(value);
            Ok(Self {
                array,
                max_order: value.len() - 1,
            })
        }
    }
}

/// Calculation results of surface differentiation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDers<V> {
    array: [[V; MAX_DER_ORDER + 1]; MAX_DER_ORDER + 1],
    max_order: usize,
}

impl<V> SurfaceDers<V> {
    /// Construct zeroed `SurfaceDers` with maximum order = `max_order`.
    #[inline]
    pub fn new(max_order: usize) -> Self
    where V: Zero + Copy {
        Self {
            array: [[V::zero(); MAX_DER_ORDER + 1]; MAX_DER_ORDER + 1],
            max_order,
        }
    }
    /// Returns maximum order
    #[inline]
    pub const fn max_order(&self) -> usize { self.max_order }

    /// Returns the multi-order derivatives of the projected rational surface.
    ///
    /// The entry `[m][n]` is the derivative of the projected surface by u of
    /// order `m` and by v of order `n`. Analogously to the curve case, the
    /// bivariate Leibniz expansion of `A = w * E` is inverted term by term:
    /// every lower-order Euclidean derivative weighted by its pair of
    /// binomial coefficients is subtracted from `A^(m,n)` and the rest is
    /// divided by the weight.
    pub fn rat_ders<S>(&self) -> SurfaceDers<<V::Point as EuclideanSpace>::Diff>
    where
        S: BaseFloat,
        V: Homogeneous<S>,
        V::Point: EuclideanSpace<Scalar = V::Scalar>, {
        let weight = self[0][0].weight();
        let mut binom = [[S::zero(); MAX_DER_ORDER + 1]; MAX_DER_ORDER + 1];
        for k in 0..=self.max_order {
            binom[k][0] = S::one();
            for j in 1..=k {
                binom[k][j] = binom[k - 1][j - 1] + binom[k - 1][j];
            }
        }
        let mut res = SurfaceDers::new(self.max_order);
        for m in 0..=self.max_order {
            for n in 0..=self.max_order - m {
                let mut rest = self[m][n].truncate();
                for i in 0..=m {
                    for j in 0..=n {
                        if (i, j) == (m, n) {
                            continue;
                        }
                        let coef = binom[m][i] * binom[n][j] * self[m - i][n - j].weight();
                        rest = rest - res[i][j] * coef;
                    }
                }
                res[m][n] = rest / weight;
            }
        }
        res
    }
}

impl<V> std::ops::Index<usize> for SurfaceDers<V> {
    type Output = [V];
    fn index(&self, index: usize) -> &[V] {
        if index > self.max_order {
            panic!("the index must be no more than {}.", self.max_order);
        }
        &self.array[index][..=self.max_order - index]
    }
}

impl<V> std::ops::IndexMut<usize> for SurfaceDers<V> {
    fn index_mut(&mut self, index: usize) -> &mut [V] {
        if index > self.max_order {
            panic!("the index must be no more than {}.", self.max_order);
        }
        &mut self.array[index][..=self.max_order - index]
    }
}

impl<V: Zero + Copy> TryFrom<&[&[V]]> for SurfaceDers<V> {
    type Error = &'static str;
    fn try_from(value: &[&[V]]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err("Empty array cannot convert to `SurfaceDers`.");
        }
        let mut array = [[V::zero(); MAX_DER_ORDER + 1]; MAX_DER_ORDER + 1];
        let max_order = value.len() - 1;

        let mut iter = value.iter().zip(&mut array).enumerate();
        iter.try_for_each(|(i, (&slice, subarray))| {
            if i + slice.len() != max_order + 1 {
                Err("Inconsistent slice length and order.")
            } else {
                subarray[..=max_order - i].copy_from_slice(slice);
                Ok(())
            }
        })?;

        Ok(Self { array, max_order })
    }
}

#[test]
fn surface_rat_ders() {
    use crate::cgmath64::*;
    let (u, v) = (1.0, 2.0);
    // s(u, v) = (u^2 v, u v^2, u v, u), the projection is (u v, v^2, v)
    let raw_ders: &[&[Vector4]] = &[
        &[
            (u * u * v, u * v * v, u * v, u).into(),
            (u * u, 2.0 * u * v, u, 0.0).into(),
            (0.0, 2.0 * u, 0.0, 0.0).into(),
        ],
        &[
            (2.0 * u * v, v * v, v, 1.0).into(),
            (2.0 * u, 2.0 * v, 1.0, 0.0).into(),
        ],
        &[(2.0 * v, 0.0, 0.0, 0.0).into()],
    ];
    let ders = SurfaceDers::try_from(raw_ders).unwrap();
    let rat_ders = ders.rat_ders();

    let raw_ans: &[&[Vector3]] = &[
        &[
            (u * v, v * v, v).into(),
            (u, 2.0 * v, 1.0).into(),
            (0.0, 2.0, 0.0).into(),
        ],
        &[(v, 0.0, 0.0).into(), (1.0, 0.0, 0.0).into()],
        &[(0.0, 0.0, 0.0).into()],
    ];
    let ans_ders = SurfaceDers::try_from(raw_ans).unwrap();

    assert_eq!(rat_ders, ans_ders);
}
