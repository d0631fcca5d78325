// Lanczos approximation for the log-gamma function.
// Ported from statrs (MIT license), based on:
// "An Analysis of the Lanczos Gamma Approximation", Glendon Ralph Pugh, 2004 p. 116

const GAMMA_R: f64 = 10.900511;

const GAMMA_DK: &[f64] = &[
    2.48574089138753565546e-5,
    1.05142378581721974210,
    -3.45687097222016235469,
    4.51227709466894823700,
    -2.98285225323576655721,
    1.05639711577126713077,
    -1.95428773191645869583e-1,
    1.70970543404441224307e-2,
    -5.71926117404305781283e-4,
    4.63399473359905636708e-6,
    -2.71994908488607703910e-9,
];

const LN_2_SQRT_E_OVER_PI: f64 = 0.620_782_237_635_245_2;

const LN_PI: f64 = 1.144_729_885_849_400_2;

#[inline]
fn lanczos_sum(x: f64) -> f64 {
    GAMMA_DK
        .iter()
        .enumerate()
        .skip(1)
        .fold(GAMMA_DK[0], |s, (i, &dk)| s + dk / (x + i as f64 - 1.0))
}

/// Natural logarithm of the gamma function for `x > 0`.
///
/// Returns `+inf` at the pole `x == 0`, which keeps `ln(Γ(0))` table entries well defined.
pub fn ln_gamma(x: f64) -> f64 {
    if x == 0.0 {
        return f64::INFINITY;
    }
    if x < 0.5 {
        // Reflection; only used for fractional arguments in tests.
        let s = GAMMA_DK
            .iter()
            .enumerate()
            .skip(1)
            .fold(GAMMA_DK[0], |s, (i, &dk)| s + dk / (i as f64 - x));

        LN_PI
            - (std::f64::consts::PI * x).sin().abs().ln()
            - s.ln()
            - LN_2_SQRT_E_OVER_PI
            - (0.5 - x) * ((0.5 - x + GAMMA_R) / std::f64::consts::E).ln()
    } else {
        lanczos_sum(x).ln()
            + LN_2_SQRT_E_OVER_PI
            + (x - 0.5) * ((x - 0.5 + GAMMA_R) / std::f64::consts::E).ln()
    }
}

/// `ln(k!)` for a non-negative integer count.
#[inline]
pub fn ln_factorial(k: usize) -> f64 {
    if k < 2 { 0.0 } else { ln_gamma(k as f64 + 1.0) }
}
