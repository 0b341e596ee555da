//! Implementation of a quasi-Newton (BFGS) minimizer
//!
//! The solver drives closest-point and intersection refinement. It works on
//! small parameter vectors: `f64` for curve queries and `Vector2` for
//! surface and curve-pair queries.

use crate::cgmath64::*;
use crate::tolerance::EPSILON;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Parameter vectors the minimizer can descend on.
///
/// Ties the small vector type to its inverse-Hessian matrix type and
/// provides the algebra the BFGS update needs.
pub trait DescentVector:
    Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self> + Mul<f64, Output = Self> + Copy
{
    /// inverse-Hessian matrix type
    type Hessian: Add<Output = Self::Hessian>
        + Sub<Output = Self::Hessian>
        + Mul<f64, Output = Self::Hessian>
        + Mul<Self, Output = Self>
        + Copy;
    /// inner product
    fn dot(self, other: Self) -> f64;
    /// outer product `self ⊗ other`
    fn outer(self, other: Self) -> Self::Hessian;
    /// the identity matrix
    fn identity() -> Self::Hessian;
    /// every entry is finite
    fn is_finite(self) -> bool;
    /// Euclidean norm
    #[inline(always)]
    fn magnitude(self) -> f64 { self.dot(self).sqrt() }
}

impl DescentVector for f64 {
    type Hessian = f64;
    #[inline(always)]
    fn dot(self, other: Self) -> f64 { self * other }
    #[inline(always)]
    fn outer(self, other: Self) -> f64 { self * other }
    #[inline(always)]
    fn identity() -> f64 { 1.0 }
    #[inline(always)]
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

impl DescentVector for Vector2 {
    type Hessian = Matrix2;
    #[inline(always)]
    fn dot(self, other: Self) -> f64 { InnerSpace::dot(self, other) }
    #[inline(always)]
    fn outer(self, other: Self) -> Matrix2 { Matrix2::from_cols(self * other.x, self * other.y) }
    #[inline(always)]
    fn identity() -> Matrix2 { Matrix2::from_value(1.0) }
    #[inline(always)]
    fn is_finite(self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

/// Why the minimizer stopped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// the gradient norm fell below the tolerance
    Converged,
    /// the quasi-Newton step fell below the tolerance
    StepBelowTolerance,
    /// the search direction contained a non-finite entry
    SearchDirectionInvalid,
    /// the initial value or gradient was not finite
    NonFiniteInitialValue,
    /// the line search could not find a decreasing step
    LineSearchFailed,
    /// the iteration budget was exhausted
    IterationLimit,
}

impl Termination {
    /// Returns whether the run ended at a usable minimum.
    #[inline(always)]
    pub fn is_success(self) -> bool {
        matches!(self, Termination::Converged | Termination::StepBelowTolerance)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Termination::Converged => "converged",
            Termination::StepBelowTolerance => "step below tolerance",
            Termination::SearchDirectionInvalid => "search direction invalid",
            Termination::NonFiniteInitialValue => "non-finite initial value",
            Termination::LineSearchFailed => "line search failed",
            Termination::IterationLimit => "iteration limit exceeded",
        };
        f.pad(message)
    }
}

/// The final state of a minimizer run.
#[derive(Clone, Copy, Debug)]
pub struct MinimizeResult<V: DescentVector> {
    /// the argument of the found minimum
    pub x: V,
    /// the value at `x`
    pub value: f64,
    /// the gradient at `x`
    pub gradient: V,
    /// the final inverse-Hessian estimate
    pub hessian: V::Hessian,
    /// the number of outer iterations
    pub iterations: usize,
    /// why the run stopped
    pub termination: Termination,
}

/// Unconstrained quasi-Newton solver with backtracking line search and
/// BFGS inverse-Hessian update.
#[derive(Clone, Copy, Debug)]
pub struct Minimizer {
    /// termination tolerance on the gradient and step norms, clamped to at
    /// least [`EPSILON`]
    pub gradient_tolerance: f64,
    /// outer iteration budget
    pub max_iterations: usize,
}

impl Default for Minimizer {
    #[inline(always)]
    fn default() -> Self {
        Minimizer {
            gradient_tolerance: 1.0e-8,
            max_iterations: 1000,
        }
    }
}

impl Minimizer {
    /// Minimizes `f` from the initial guess `x0`.
    /// # Examples
    /// ```
    /// use strake_base::minimizer::*;
    ///
    /// let f = |x: f64| (x - 2.0) * (x - 2.0);
    /// let grad = |x: f64| 2.0 * (x - 2.0);
    /// let res = Minimizer::default().minimize(f, grad, 0.0);
    /// assert!(res.termination.is_success());
    /// assert!((res.x - 2.0).abs() < 1.0e-6);
    /// ```
    pub fn minimize<V, F, G>(&self, f: F, grad: G, x0: V) -> MinimizeResult<V>
    where
        V: DescentVector,
        F: Fn(V) -> f64,
        G: Fn(V) -> V, {
        let tol = self.gradient_tolerance.max(EPSILON);
        let mut hessian = V::identity();
        let mut x = x0;
        let mut value = f(x);
        let mut gradient = grad(x);
        let mut iterations = 0;

        if !value.is_finite() || !gradient.is_finite() {
            return MinimizeResult {
                x,
                value,
                gradient,
                hessian,
                iterations,
                termination: Termination::NonFiniteInitialValue,
            };
        }

        let termination = loop {
            if gradient.magnitude() < tol {
                break Termination::Converged;
            }
            if iterations >= self.max_iterations {
                break Termination::IterationLimit;
            }
            iterations += 1;

            let direction = -(hessian * gradient);
            if !direction.is_finite() {
                break Termination::SearchDirectionInvalid;
            }
            let direction_norm = direction.magnitude();
            if direction_norm < tol {
                break Termination::StepBelowTolerance;
            }

            // backtracking line search with the Armijo factor 0.1
            let slope = gradient.dot(direction);
            let mut t = 1.0;
            let accepted = loop {
                let candidate = x + direction * t;
                let candidate_value = f(candidate);
                if candidate_value.is_finite() && candidate_value - value < 0.1 * t * slope {
                    break Some((candidate, candidate_value));
                }
                t *= 0.5;
                if t * direction_norm < tol {
                    break None;
                }
            };
            let Some((next, next_value)) = accepted else {
                break Termination::LineSearchFailed;
            };

            let step = direction * t;
            let next_gradient = grad(next);
            if !next_gradient.is_finite() {
                break Termination::SearchDirectionInvalid;
            }
            let y = next_gradient - gradient;
            let ys = y.dot(step);
            x = next;
            value = next_value;
            gradient = next_gradient;
            // a degenerate curvature estimate would divide by zero below
            if ys.abs() <= EPSILON {
                break Termination::StepBelowTolerance;
            }
            let hy = hessian * y;
            hessian = hessian + step.outer(step) * ((ys + y.dot(hy)) / (ys * ys))
                - (hy.outer(step) + step.outer(hy)) * (1.0 / ys);
        };

        MinimizeResult {
            x,
            value,
            gradient,
            hessian,
            iterations,
            termination,
        }
    }
}
