use crate::*;

/// Divides the domain into equal parts, examines all the values, and returns `(u, v)` such that
/// `surface.subs(u, v)` is closest to `point`. This method is useful to get an efficient hint of
/// `search_nearest_parameter`.
pub fn presearch<S>(
    surface: &S,
    point: S::Point,
    (urange, vrange): ((f64, f64), (f64, f64)),
    division: usize,
) -> (f64, f64)
where
    S: ParametricSurface,
    S::Point: MetricSpace<Metric = f64> + Copy,
{
    let ((u0, u1), (v0, v1)) = (urange, vrange);
    let mut best = ((u0, v0), f64::INFINITY);
    for i in 0..=division {
        let u = u0 + (u1 - u0) * i as f64 / division as f64;
        for j in 0..=division {
            let v = v0 + (v1 - v0) * j as f64 / division as f64;
            let dist = surface.subs(u, v).distance2(point);
            if dist < best.1 {
                best = ((u, v), dist);
            }
        }
    }
    best.0
}

/// Searches the parameters nearest to `point` by minimizing the squared
/// distance with the quasi-Newton solver, starting from `hint`.
///
/// Returns `None` if the minimizer reports a numerical failure or exhausts
/// the budget of `trials` iterations.
pub fn search_nearest_parameter<S: ParametricSurface3D>(
    surface: &S,
    point: Point3,
    hint: (f64, f64),
    trials: usize,
) -> Option<(f64, f64)> {
    let ((u0, u1), (v0, v1)) = surface.parameter_range();
    let clamp = move |x: Vector2| Vector2::new(x.x.clamp(u0, u1), x.y.clamp(v0, v1));
    let f = move |x: Vector2| {
        let x = clamp(x);
        surface.subs(x.x, x.y).distance2(point)
    };
    let grad = move |x: Vector2| {
        let x = clamp(x);
        let diff = surface.subs(x.x, x.y) - point;
        Vector2::new(
            2.0 * surface.uder(x.x, x.y).dot(diff),
            2.0 * surface.vder(x.x, x.y).dot(diff),
        )
    };
    let minimizer = Minimizer {
        gradient_tolerance: 1.0e-8,
        max_iterations: trials,
    };
    let res = minimizer.minimize(f, grad, clamp(Vector2::new(hint.0, hint.1)));
    match res.termination {
        Termination::Converged
        | Termination::StepBelowTolerance
        | Termination::LineSearchFailed => {
            let x = clamp(res.x);
            Some((x.x, x.y))
        }
        _ => None,
    }
}
