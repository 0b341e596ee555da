use serde::{Deserialize, Serialize};

/// closed parameter interval `[t0, t1]`
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Interval {
    t0: f64,
    t1: f64,
}

impl Interval {
    /// Creates the interval `[t0, t1]`. The bounds are reordered if reversed.
    /// # Examples
    /// ```
    /// use strake_base::interval::Interval;
    /// assert_eq!(Interval::new(3.0, 1.0), Interval::new(1.0, 3.0));
    /// ```
    #[inline(always)]
    pub fn new(t0: f64, t1: f64) -> Interval {
        match t0 <= t1 {
            true => Interval { t0, t1 },
            false => Interval { t0: t1, t1: t0 },
        }
    }
    /// Returns the lower bound.
    #[inline(always)]
    pub const fn t0(&self) -> f64 { self.t0 }
    /// Returns the upper bound.
    #[inline(always)]
    pub const fn t1(&self) -> f64 { self.t1 }
    /// Returns the length of the interval.
    #[inline(always)]
    pub fn length(&self) -> f64 { self.t1 - self.t0 }
    /// Returns the midpoint.
    #[inline(always)]
    pub fn center(&self) -> f64 { (self.t0 + self.t1) / 2.0 }
    /// Affine map of `[0, 1]` onto the interval.
    /// # Examples
    /// ```
    /// use strake_base::interval::Interval;
    /// let range = Interval::new(2.0, 6.0);
    /// assert_eq!(range.parameter_at(0.0), 2.0);
    /// assert_eq!(range.parameter_at(0.25), 3.0);
    /// assert_eq!(range.parameter_at(1.0), 6.0);
    /// ```
    #[inline(always)]
    pub fn parameter_at(&self, s: f64) -> f64 { (1.0 - s) * self.t0 + s * self.t1 }
    /// Returns whether the interval contains `t`.
    #[inline(always)]
    pub fn contains(&self, t: f64) -> bool { self.t0 <= t && t <= self.t1 }
}

impl From<(f64, f64)> for Interval {
    #[inline(always)]
    fn from((t0, t1): (f64, f64)) -> Interval { Interval::new(t0, t1) }
}

impl From<Interval> for (f64, f64) {
    #[inline(always)]
    fn from(range: Interval) -> (f64, f64) { (range.t0, range.t1) }
}
