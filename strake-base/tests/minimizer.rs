use strake_base::cgmath64::*;
use strake_base::minimizer::*;

#[test]
fn quadratic_bowl_1d() {
    let f = |x: f64| (x - 3.0) * (x - 3.0) + 1.0;
    let grad = |x: f64| 2.0 * (x - 3.0);
    let res = Minimizer::default().minimize(f, grad, -5.0);
    assert!(res.termination.is_success(), "{}", res.termination);
    assert!((res.x - 3.0).abs() < 1.0e-6);
    assert!((res.value - 1.0).abs() < 1.0e-10);
}

#[test]
fn quadratic_bowl_2d() {
    let f = |x: Vector2| (x.x - 1.0).powi(2) + 2.0 * (x.y + 0.5).powi(2);
    let grad = |x: Vector2| Vector2::new(2.0 * (x.x - 1.0), 4.0 * (x.y + 0.5));
    let res = Minimizer::default().minimize(f, grad, Vector2::new(10.0, -7.0));
    assert!(res.termination.is_success(), "{}", res.termination);
    assert!(InnerSpace::magnitude(res.x - Vector2::new(1.0, -0.5)) < 1.0e-6);
}

#[test]
fn anisotropic_valley() {
    // narrow valley: the BFGS update has to reshape the metric
    let f = |x: Vector2| 100.0 * (x.x - 2.0).powi(2) + (x.y - 1.0).powi(2);
    let grad = |x: Vector2| Vector2::new(200.0 * (x.x - 2.0), 2.0 * (x.y - 1.0));
    let res = Minimizer::default().minimize(f, grad, Vector2::new(0.0, 0.0));
    assert!(res.termination.is_success(), "{}", res.termination);
    assert!(InnerSpace::magnitude(res.x - Vector2::new(2.0, 1.0)) < 1.0e-5);
}

#[test]
fn non_finite_initial_value() {
    let f = |_: f64| f64::NAN;
    let grad = |_: f64| 0.0;
    let res = Minimizer::default().minimize(f, grad, 0.0);
    assert_eq!(res.termination, Termination::NonFiniteInitialValue);
    assert_eq!(res.iterations, 0);
}

#[test]
fn iteration_budget_is_respected() {
    // two iterations are far too few to descend the narrow valley
    let f = |x: Vector2| 100.0 * (x.x - 2.0).powi(2) + (x.y - 1.0).powi(2);
    let grad = |x: Vector2| Vector2::new(200.0 * (x.x - 2.0), 2.0 * (x.y - 1.0));
    let minimizer = Minimizer {
        gradient_tolerance: 1.0e-8,
        max_iterations: 2,
    };
    let res = minimizer.minimize(f, grad, Vector2::new(0.0, 0.0));
    assert_eq!(res.termination, Termination::IterationLimit);
    assert_eq!(res.iterations, 2);
}

#[test]
fn degenerate_curvature_terminates() {
    // a linear objective leaves the gradient unchanged by any step, so the
    // curvature estimate degenerates after the first accepted step
    let f = |x: f64| 3.0 * x + 1.0;
    let grad = |_: f64| 3.0;
    let res = Minimizer::default().minimize(f, grad, 0.0);
    assert_eq!(res.termination, Termination::StepBelowTolerance);
    assert_eq!(res.iterations, 1);
    // the accepted descent step is kept in the result
    assert!(res.x < 0.0);
}

#[test]
fn reason_strings() {
    assert_eq!(Termination::Converged.to_string(), "converged");
    assert_eq!(
        Termination::StepBelowTolerance.to_string(),
        "step below tolerance"
    );
    assert_eq!(
        Termination::SearchDirectionInvalid.to_string(),
        "search direction invalid"
    );
}
