use crate::*;
use rand::Rng;

/// quadrature refinement tolerance of the arc-length integrals
const LENGTH_TOLERANCE: f64 = 1.0e-9;
/// recursion bound of the adaptive quadrature
const MAX_QUADRATURE_DEPTH: usize = 10;
/// recursion bound of the adaptive sampler
const MAX_DIVISION_DEPTH: usize = 48;
/// iteration bound of the in-segment arc-length bisection
const BISECTION_TRIALS: usize = 64;

/// Divides the domain into equal parts, examines all the values, and returns `t` such that
/// `curve.subs(t)` is closest to `point`. This method is useful to get an efficient hint of
/// `search_nearest_parameter`.
pub fn presearch<C>(curve: &C, point: C::Point, range: (f64, f64), division: usize) -> f64
where
    C: ParametricCurve,
    C::Point: MetricSpace<Metric = f64> + Copy, {
    let (t0, t1) = range;
    (0..=division)
        .map(|i| t0 + (t1 - t0) * i as f64 / division as f64)
        .fold((t0, f64::INFINITY), |best, t| {
            let dist = curve.subs(t).distance2(point);
            match dist < best.1 {
                true => (t, dist),
                false => best,
            }
        })
        .0
}

/// Searches the parameter nearest to `point` by minimizing the squared
/// distance with the quasi-Newton solver, starting from `hint`.
///
/// Returns `None` if the minimizer reports a numerical failure or exhausts
/// the budget of `trials` iterations.
pub fn search_nearest_parameter<C: ParametricCurve3D>(
    curve: &C,
    point: Point3,
    hint: f64,
    trials: usize,
) -> Option<f64>
{
    let (t0, t1) = curve.parameter_range();
    let f = move |t: f64| curve.subs(t.clamp(t0, t1)).distance2(point);
    let grad = move |t: f64| {
        let t = t.clamp(t0, t1);
        2.0 * curve.der(t).dot(curve.subs(t) - point)
    };
    let minimizer = Minimizer {
        gradient_tolerance: 1.0e-8,
        max_iterations: trials,
    };
    let res = minimizer.minimize(f, grad, hint.clamp(t0, t1));
    match res.termination {
        Termination::Converged
        | Termination::StepBelowTolerance
        | Termination::LineSearchFailed => Some(res.x.clamp(t0, t1)),
        _ => None,
    }
}

/// Samples `n` points at parameters uniform in the raw knot domain.
pub fn regular_sample<C: ParametricCurve>(curve: &C, n: usize) -> (Vec<f64>, Vec<C::Point>) {
    let (t0, t1) = curve.parameter_range();
    if n <= 1 {
        return (vec![t0], vec![curve.subs(t0)]);
    }
    let params: Vec<f64> = (0..n)
        .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
        .collect();
    let points = params.iter().map(|t| curve.subs(*t)).collect();
    (params, points)
}

/// Creates the curve division adaptively. The recursion stops on a span
/// whose randomly probed interior point is collinear with the span ends
/// within `tol` and whose chord is longer than [`TOLERANCE`]; the split
/// point of a refined span is the exact midpoint. Tolerances not more than
/// zero are replaced by [`MAX_TOLERANCE`].
pub fn parameter_division<C>(
    curve: &C,
    range: (f64, f64),
    tol: f64,
    rng: &mut impl Rng,
) -> (Vec<f64>, Vec<C::Point>)
where
    C: ParametricCurve,
    C::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>,
{
    let tol = match tol <= 0.0 {
        true => MAX_TOLERANCE,
        false => tol,
    };
    let ends = (curve.subs(range.0), curve.subs(range.1));
    let mut params = vec![range.0];
    let mut points = vec![ends.0];
    sub_parameter_division(curve, range, ends, tol, rng, 0, &mut params, &mut points);
    (params, points)
}

#[allow(clippy::too_many_arguments)]
fn sub_parameter_division<C>(
    curve: &C,
    range: (f64, f64),
    ends: (C::Point, C::Point),
    tol: f64,
    rng: &mut impl Rng,
    depth: usize,
    params: &mut Vec<f64>,
    points: &mut Vec<C::Point>,
) where
    C: ParametricCurve,
    C::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>,
{
    let probe = 0.45 + 0.1 * rng.random::<f64>();
    let t = range.0 + (range.1 - range.0) * probe;
    let chord_point = ends.0 + (ends.1 - ends.0) * probe;
    let flat = curve.subs(t).distance(chord_point) < tol && ends.0.distance(ends.1) > TOLERANCE;
    if flat || depth >= MAX_DIVISION_DEPTH {
        params.push(range.1);
        points.push(ends.1);
    } else {
        let t = (range.0 + range.1) / 2.0;
        let pt = curve.subs(t);
        sub_parameter_division(
            curve,
            (range.0, t),
            (ends.0, pt),
            tol,
            rng,
            depth + 1,
            params,
            points,
        );
        sub_parameter_division(
            curve,
            (t, range.1),
            (pt, ends.1),
            tol,
            rng,
            depth + 1,
            params,
            points,
        );
    }
}

// 16-point Gauss-Legendre rule on [-1, 1], positive abscissae
const GAUSS_LEGENDRE_ABSCISSAE: [f64; 8] = [
    0.0950125098376374,
    0.2816035507792589,
    0.4580167776572274,
    0.6178762444026438,
    0.7554044083550030,
    0.8656312023878318,
    0.9445750230732326,
    0.9894009349916499,
];
const GAUSS_LEGENDRE_WEIGHTS: [f64; 8] = [
    0.1894506104550685,
    0.1826034150449236,
    0.1691565193950025,
    0.1495959888165767,
    0.1246289712555339,
    0.0951585116824928,
    0.0622535239386479,
    0.0271524594117541,
];

fn speed_integral<C: ParametricCurve3D>(curve: &C, t0: f64, t1: f64) -> f64 {
    let center = (t0 + t1) / 2.0;
    let half = (t1 - t0) / 2.0;
    let iter = GAUSS_LEGENDRE_ABSCISSAE.iter().zip(&GAUSS_LEGENDRE_WEIGHTS);
    iter.fold(0.0, |sum, (x, w)| {
        let speed0 = curve.der(center - half * x).magnitude();
        let speed1 = curve.der(center + half * x).magnitude();
        sum + w * (speed0 + speed1)
    }) * half
}

fn sub_length<C: ParametricCurve3D>(curve: &C, t0: f64, t1: f64, tol: f64, depth: usize) -> f64 {
    let whole = speed_integral(curve, t0, t1);
    let center = (t0 + t1) / 2.0;
    let halves = speed_integral(curve, t0, center) + speed_integral(curve, center, t1);
    if (whole - halves).abs() < tol || depth >= MAX_QUADRATURE_DEPTH {
        halves
    } else {
        sub_length(curve, t0, center, tol / 2.0, depth + 1)
            + sub_length(curve, center, t1, tol / 2.0, depth + 1)
    }
}

fn bezier_length(bezier: &NurbsCurve<Vector4>) -> f64 {
    let (t0, t1) = bezier.parameter_range();
    sub_length(bezier, t0, t1, LENGTH_TOLERANCE, 0)
}

/// Finds the parameter of the Bezier segment at which the arc length from
/// the front reaches `target`, by bisection.
fn bezier_parameter_at_length(bezier: &NurbsCurve<Vector4>, target: f64) -> f64 {
    let (front, back) = bezier.parameter_range();
    let (mut t0, mut t1) = (front, back);
    for _ in 0..BISECTION_TRIALS {
        if t1 - t0 < 1.0e-12 {
            break;
        }
        let center = (t0 + t1) / 2.0;
        let len = sub_length(bezier, front, center, LENGTH_TOLERANCE, 0);
        if len < target {
            t0 = center;
        } else {
            t1 = center;
        }
    }
    (t0 + t1) / 2.0
}

/// Returns the total arc length of the curve: the sum of the adaptive
/// Gauss-Legendre integrals over the Bezier segments.
pub fn length(curve: &NurbsCurve<Vector4>) -> f64 {
    curve
        .bezier_decomposition(false)
        .iter()
        .map(bezier_length)
        .sum()
}

/// Returns the arc length of the part of the curve from the front to `t`.
pub fn length_at(curve: &NurbsCurve<Vector4>, t: f64) -> f64 {
    let mut sum = 0.0;
    for bezier in curve.bezier_decomposition(false) {
        let (t0, t1) = bezier.parameter_range();
        if t >= t1 {
            sum += bezier_length(&bezier);
        } else if t > t0 {
            sum += sub_length(&bezier, t0, t, LENGTH_TOLERANCE, 0);
        }
    }
    sum
}

/// Returns the parameter `t` such that the arc length from the front to `t`
/// is `length`. Lengths outside `[0, length()]` clamp to the ends.
pub fn parameter_at_length(curve: &NurbsCurve<Vector4>, length: f64) -> f64 {
    let (t0, t1) = curve.parameter_range();
    if length <= 0.0 {
        return t0;
    }
    let mut rest = length;
    for bezier in curve.bezier_decomposition(false) {
        let seg_length = bezier_length(&bezier);
        if rest > seg_length {
            rest -= seg_length;
        } else {
            return bezier_parameter_at_length(&bezier, rest);
        }
    }
    t1
}

/// Divides the curve into `n` parts of equal arc length.
pub fn divide_by_count(curve: &NurbsCurve<Vector4>, n: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n.max(1);
    let total = length(curve);
    let targets: Vec<f64> = (0..=n).map(|i| total * i as f64 / n as f64).collect();
    divide_at_lengths(curve, &targets)
}

/// Divides the curve by the arc length `step`. The endpoints are always
/// included; a step longer than the whole curve returns only the endpoints.
pub fn divide_by_length(curve: &NurbsCurve<Vector4>, step: f64) -> (Vec<f64>, Vec<f64>) {
    let total = length(curve);
    let mut targets = vec![0.0];
    if step > 0.0 {
        let mut l = step;
        while l < total - TOLERANCE {
            targets.push(l);
            l += step;
        }
    }
    targets.push(total);
    divide_at_lengths(curve, &targets)
}

fn divide_at_lengths(curve: &NurbsCurve<Vector4>, targets: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let (t0, t1) = curve.parameter_range();
    let beziers = curve.bezier_decomposition(false);
    let seg_lengths: Vec<f64> = beziers.iter().map(bezier_length).collect();
    let total: f64 = seg_lengths.iter().sum();

    let mut params = Vec::with_capacity(targets.len());
    let mut lengths = Vec::with_capacity(targets.len());
    for &target in targets {
        let param = if target <= 0.0 {
            t0
        } else if target >= total {
            t1
        } else {
            let mut prefix = 0.0;
            let mut result = t1;
            for (bezier, seg_length) in beziers.iter().zip(&seg_lengths) {
                if prefix + seg_length >= target {
                    result = bezier_parameter_at_length(bezier, target - prefix);
                    break;
                }
                prefix += seg_length;
            }
            result
        };
        params.push(param);
        lengths.push(target.clamp(0.0, total));
    }
    (params, lengths)
}
