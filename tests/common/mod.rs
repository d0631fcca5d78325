#![allow(dead_code)]

/// One-sided Kolmogorov-Smirnov boundaries for `Pr[D_n <= d]`: the lower band
/// `X_(i) >= i/n - d` and the upper band `X_(i) <= (i-1)/n + d`.
pub fn ks_lower(n: usize, d: f64) -> Vec<f64> {
    let nf = n as f64;
    (0..n).map(|i| ((i as f64 + 1.0) / nf - d).max(0.0)).collect()
}

pub fn ks_upper(n: usize, d: f64) -> Vec<f64> {
    let nf = n as f64;
    (0..n).map(|i| (i as f64 / nf + d).min(1.0)).collect()
}

/// Birnbaum-Tingey closed form for `Pr[D+_n <= d]`.
pub fn birnbaum_tingey(n: usize, d: f64) -> f64 {
    let nf = n as f64;
    let jmax = (nf * (1.0 - d)).floor() as usize;
    let mut ln_binom = 0.0;
    let mut sum = 0.0;
    for j in 0..=jmax {
        if j > 0 {
            ln_binom += ((n - j + 1) as f64).ln() - (j as f64).ln();
        }
        let jf = j as f64;
        let a = 1.0 - d - jf / nf;
        let b = d + jf / nf;
        let term = if a <= 0.0 {
            if n == j { b.powf(jf - 1.0) * ln_binom.exp() } else { 0.0 }
        } else {
            (ln_binom + (nf - jf) * a.ln() + (jf - 1.0) * b.ln()).exp()
        };
        sum += term;
    }
    1.0 - d * sum
}
