//! Descriptive and inferential statistics used by the aggregator and charts.
//!
//! Missing values are encoded as `NaN` and skipped, so a column with no
//! observations sums to zero and has no mean.

use std::f64::consts::PI;

pub fn sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| !v.is_nan()).sum()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    let (n, total) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    if n == 0 { None } else { Some(total / n as f64) }
}

/// Bessel-corrected sample standard deviation; undefined below two observations.
pub fn sample_sd(values: &[f64]) -> Option<f64> {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.len() < 2 {
        return None;
    }
    let m = present.iter().sum::<f64>() / present.len() as f64;
    let ss = present.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    Some((ss / (present.len() - 1) as f64).sqrt())
}

pub fn sd_or_zero(sd: Option<f64>) -> f64 {
    sd.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut it = values.iter().copied().filter(|v| v.is_finite());
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
    pub p_value: f64,
    pub stderr: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

struct Moments {
    n: usize,
    x_mean: f64,
    y_mean: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

fn paired_moments(x: &[f64], y: &[f64]) -> Option<Moments> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len();
    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if !(sxx.is_finite() && syy.is_finite() && sxy.is_finite()) {
        return None;
    }
    Some(Moments {
        n,
        x_mean,
        y_mean,
        sxx,
        syy,
        sxy,
    })
}

/// Pearson r with its two-sided p-value. Undefined when either series is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<Correlation> {
    let m = paired_moments(x, y)?;
    let den = (m.sxx * m.syy).sqrt();
    if den <= 0.0 {
        return None;
    }
    let r = (m.sxy / den).clamp(-1.0, 1.0);
    Some(Correlation {
        r,
        p_value: correlation_p_value(r, m.n),
    })
}

/// Ordinary least squares fit of `y = slope * x + intercept`.
///
/// Returns `None` with fewer than two distinct x values.
pub fn linregress(x: &[f64], y: &[f64]) -> Option<Regression> {
    let m = paired_moments(x, y)?;
    if m.sxx <= 0.0 {
        return None;
    }
    let slope = m.sxy / m.sxx;
    let intercept = m.y_mean - slope * m.x_mean;
    let den = (m.sxx * m.syy).sqrt();
    let r = if den <= 0.0 {
        0.0
    } else {
        (m.sxy / den).clamp(-1.0, 1.0)
    };
    let (p_value, stderr) = if m.n == 2 {
        // Two points always fit exactly.
        let p = if y[0] == y[1] { 1.0 } else { 0.0 };
        (p, 0.0)
    } else {
        let df = (m.n - 2) as f64;
        let stderr = ((1.0 - r * r).max(0.0) * m.syy / m.sxx / df).sqrt();
        (correlation_p_value(r, m.n), stderr)
    };
    Some(Regression {
        slope,
        intercept,
        r,
        p_value,
        stderr,
    })
}

fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    const TINY: f64 = 1.0e-20;
    let df = (n - 2) as f64;
    let t = r * (df / ((1.0 - r + TINY) * (1.0 + r + TINY))).sqrt();
    t_two_sided_p(t, df)
}

/// Two-sided tail probability of Student's t with `df` degrees of freedom.
pub fn t_two_sided_p(t: f64, df: f64) -> f64 {
    if t.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// I_x(a, b) by continued fraction (modified Lentz).
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 3.0e-16;
    const FP_MIN: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FP_MIN {
        d = FP_MIN;
    }
    d = 1.0 / d;
    let mut h = d;
    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FP_MIN {
            d = FP_MIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FP_MIN {
            c = FP_MIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FP_MIN {
            d = FP_MIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FP_MIN {
            c = FP_MIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Lanczos approximation (g = 7).
pub fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut acc = COEF[0];
    for (i, c) in COEF.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/stats.rs"]
mod tests;
