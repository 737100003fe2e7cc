use super::*;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn test_sum_and_mean_skip_missing() {
    let v = [1.0, f64::NAN, 3.0];
    assert_eq!(sum(&v), 4.0);
    assert_eq!(mean(&v), Some(2.0));
    assert_eq!(sum(&[f64::NAN]), 0.0);
    assert_eq!(mean(&[f64::NAN]), None);
    assert_eq!(mean(&[]), None);
}

#[test]
fn test_sample_sd_bessel() {
    let sd = sample_sd(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    assert!(close(sd, (32.0f64 / 7.0).sqrt(), 1e-12));
    assert_eq!(sample_sd(&[1.0, 3.0]), Some(2.0f64.sqrt()));
}

#[test]
fn test_sample_sd_undefined_below_two_values() {
    assert_eq!(sample_sd(&[5.0]), None);
    assert_eq!(sample_sd(&[5.0, f64::NAN]), None);
    assert_eq!(sd_or_zero(sample_sd(&[5.0])), 0.0);
    assert_eq!(sd_or_zero(Some(f64::NAN)), 0.0);
    assert_eq!(sd_or_zero(Some(1.5)), 1.5);
}

#[test]
fn test_min_max_ignores_non_finite() {
    assert_eq!(min_max(&[3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
    assert_eq!(min_max(&[f64::NAN]), None);
    assert_eq!(min_max(&[]), None);
}

#[test]
fn test_linspace_endpoints() {
    let xs = linspace(1.0, 3.0, 5);
    assert_eq!(xs, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    let xs = linspace(0.1, 0.7, 100);
    assert_eq!(xs.len(), 100);
    assert_eq!(xs[0], 0.1);
    assert_eq!(xs[99], 0.7);
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
}

#[test]
fn test_linregress_exact_line() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let fit = linregress(&x, &y).unwrap();
    assert!(close(fit.slope, 2.0, 1e-12));
    assert!(close(fit.intercept, 1.0, 1e-12));
    assert!(close(fit.r, 1.0, 1e-12));
    assert!(fit.p_value < 1e-6);
    assert!(close(fit.stderr, 0.0, 1e-9));
    assert!(close(fit.predict(10.0), 21.0, 1e-9));
}

#[test]
fn test_linregress_constant_x_is_undefined() {
    assert!(linregress(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
    assert!(linregress(&[1.0], &[1.0]).is_none());
    assert!(linregress(&[1.0, 2.0], &[1.0]).is_none());
    assert!(linregress(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_none());
}

#[test]
fn test_linregress_two_points() {
    let fit = linregress(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
    assert!(close(fit.slope, 2.0, 1e-12));
    assert_eq!(fit.p_value, 0.0);
    let flat = linregress(&[1.0, 2.0], &[3.0, 3.0]).unwrap();
    assert_eq!(flat.slope, 0.0);
    assert_eq!(flat.p_value, 1.0);
}

#[test]
fn test_linregress_constant_y_has_zero_r() {
    let fit = linregress(&[1.0, 2.0, 3.0, 4.0], &[5.0, 5.0, 5.0, 5.0]).unwrap();
    assert_eq!(fit.slope, 0.0);
    assert_eq!(fit.intercept, 5.0);
    assert_eq!(fit.r, 0.0);
    assert!(close(fit.p_value, 1.0, 1e-9));
    assert!(pearson(&[1.0, 2.0, 3.0, 4.0], &[5.0, 5.0, 5.0, 5.0]).is_none());
}

#[test]
fn test_pearson_known_value() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [2.0, 4.0, 5.0, 4.0, 5.0];
    let c = pearson(&x, &y).unwrap();
    assert!(close(c.r, 0.7745966692414834, 1e-12));
    // scipy.stats.pearsonr gives p = 0.1240270...
    assert!(close(c.p_value, 0.124027, 1e-5));
    let fit = linregress(&x, &y).unwrap();
    assert!(close(fit.slope, 0.6, 1e-12));
    assert!(close(fit.intercept, 2.2, 1e-12));
    assert!(close(fit.p_value, c.p_value, 1e-12));
}

#[test]
fn test_t_two_sided_p_reference_values() {
    assert!(close(t_two_sided_p(1.0, 1.0), 0.5, 1e-10));
    assert!(close(t_two_sided_p(0.0, 7.0), 1.0, 1e-12));
    assert!(close(t_two_sided_p(2.0, 10.0), 0.07338803, 1e-6));
    assert!(close(t_two_sided_p(-2.0, 10.0), 0.07338803, 1e-6));
    assert_eq!(t_two_sided_p(f64::INFINITY, 3.0), 0.0);
    assert!(t_two_sided_p(f64::NAN, 3.0).is_nan());
}

#[test]
fn test_ln_gamma_integers() {
    assert!(close(ln_gamma(1.0), 0.0, 1e-12));
    assert!(close(ln_gamma(5.0), 24.0f64.ln(), 1e-12));
    assert!(close(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), 1e-12));
}

#[test]
fn test_incomplete_beta_bounds_and_symmetry() {
    assert_eq!(regularized_incomplete_beta(2.0, 3.0, 0.0), 0.0);
    assert_eq!(regularized_incomplete_beta(2.0, 3.0, 1.0), 1.0);
    let a = regularized_incomplete_beta(2.0, 3.0, 0.3);
    let b = regularized_incomplete_beta(3.0, 2.0, 0.7);
    assert!(close(a + b, 1.0, 1e-12));
    // I_x(1, 1) = x
    assert!(close(regularized_incomplete_beta(1.0, 1.0, 0.42), 0.42, 1e-12));
}
