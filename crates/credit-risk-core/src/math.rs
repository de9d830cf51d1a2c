//! Decimal-domain math kernels shared by the scoring modules.
//!
//! Pure `rust_decimal` arithmetic throughout — no f64. The normal CDF uses
//! the Abramowitz & Stegun 5-term rational approximation (|error| < 7.5e-8).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LN_2: Decimal = dec!(0.6931471805599453);

/// Natural logarithm. Reduces the argument into [0.5, 2] by powers of two,
/// then sums the atanh series 2 * (z + z^3/3 + z^5/5 + ...) with
/// z = (v - 1) / (v + 1).
///
/// Caller must ensure x > 0; non-positive arguments return zero.
pub(crate) fn ln(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut v = x;
    let mut shift = Decimal::ZERO;
    while v > dec!(2) {
        v /= dec!(2);
        shift += LN_2;
    }
    while v < dec!(0.5) {
        v *= dec!(2);
        shift -= LN_2;
    }
    let z = (v - Decimal::ONE) / (v + Decimal::ONE);
    let z2 = z * z;
    let mut term = z;
    let mut sum = z;
    for k in 1u32..40 {
        term *= z2;
        sum += term / Decimal::from(2 * k + 1);
    }
    dec!(2) * sum + shift
}

/// Taylor series exp(x) with recursive range reduction for |x| > 2:
/// exp(x) = exp(x/2)^2, then 25 Taylor terms on the reduced argument.
pub(crate) fn exp(x: Decimal) -> Decimal {
    let two = dec!(2);
    if x > two || x < -two {
        let half = exp(x / two);
        return half * half;
    }
    let mut sum = Decimal::ONE;
    let mut term = Decimal::ONE;
    for n in 1u32..=25 {
        term = term * x / Decimal::from(n);
        sum += term;
    }
    sum
}

/// Newton's method sqrt: y_{n+1} = (y_n + x/y_n) / 2, 25 iterations.
pub(crate) fn sqrt(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if x == Decimal::ONE {
        return Decimal::ONE;
    }
    let two = dec!(2);
    let mut guess = x / two;
    if x > dec!(100) {
        guess = dec!(10);
    } else if x < dec!(0.01) {
        guess = dec!(0.1);
    }
    for _ in 0..25 {
        guess = (guess + x / guess) / two;
    }
    guess
}

/// Standard normal PDF: phi(x) = exp(-x^2/2) / sqrt(2*pi)
fn norm_pdf(x: Decimal) -> Decimal {
    let sqrt_2pi = dec!(2.5066282746310002);
    exp(-(x * x) / dec!(2)) / sqrt_2pi
}

/// Standard normal CDF via Abramowitz & Stegun 26.2.17.
///
/// Phi(x) = 1 - phi(x) * (b1*t + b2*t^2 + b3*t^3 + b4*t^4 + b5*t^5)
/// with t = 1 / (1 + 0.2316419 * |x|); Phi(x) = 1 - Phi(-x) for x < 0.
/// Saturates to exactly 0/1 beyond |x| = 10.
pub(crate) fn norm_cdf(x: Decimal) -> Decimal {
    if x <= dec!(-10) {
        return Decimal::ZERO;
    }
    if x >= dec!(10) {
        return Decimal::ONE;
    }

    let b1 = dec!(0.319381530);
    let b2 = dec!(-0.356563782);
    let b3 = dec!(1.781477937);
    let b4 = dec!(-1.821255978);
    let b5 = dec!(1.330274429);
    let p = dec!(0.2316419);

    let abs_x = x.abs();
    let t = Decimal::ONE / (Decimal::ONE + p * abs_x);

    // Horner form: t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))))
    let poly = t * (b1 + t * (b2 + t * (b3 + t * (b4 + t * b5))));
    let cdf_pos = Decimal::ONE - norm_pdf(abs_x) * poly;

    if x < Decimal::ZERO {
        Decimal::ONE - cdf_pos
    } else {
        cdf_pos
    }
}
