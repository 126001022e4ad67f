//! Gaussian error function and its complement.
//!
//! Rational-polynomial approximations in the Cephes `ndtr` family:
//!
//! - `|x| <= 1`: `erf(x) = x · T(x²) / U(x²)`
//! - `1 <= |x| < 8`: `erfc(x) = exp(-x²) · P(|x|) / Q(|x|)`
//! - `|x| >= 8`: `erfc(x) = exp(-x²) · R(|x|) / S(|x|)`
//!
//! Outside its own range each function is derived from the other, so
//! `erf(x) + erfc(x) = 1` holds to rounding everywhere.

/// Largest argument accepted by `exp` before the result overflows, `ln(f64::MAX)`.
pub const MAX_LOG: f64 = 7.097_827_128_933_84e2;

/// Numerator of `erfc` for `1 <= |x| < 8`.
const P: [f64; 9] = [
    2.461_969_814_735_305e-10,
    0.564_189_564_831_068_9,
    7.463_210_564_422_699,
    48.637_197_098_568_14,
    196.520_832_956_077_1,
    526.445_194_995_477_3,
    934.528_527_171_957_6,
    1027.551_886_895_157_2,
    557.535_335_369_399_4,
];

/// Denominator of `erfc` for `1 <= |x| < 8` (leading coefficient 1 implied).
const Q: [f64; 8] = [
    13.228_195_115_474_499,
    86.707_214_088_598_97,
    354.937_778_887_819_9,
    975.708_501_743_205_5,
    1823.909_166_879_097_3,
    2246.337_608_187_109_7,
    1656.663_091_941_613_4,
    557.535_340_817_727_7,
];

/// Numerator of `erfc` for `|x| >= 8`.
const R: [f64; 6] = [
    0.564_189_583_547_755_1,
    1.275_366_707_599_781,
    5.019_050_422_511_805,
    6.160_210_979_930_536,
    7.409_742_699_504_489_5,
    2.978_866_653_721_002_2,
];

/// Denominator of `erfc` for `|x| >= 8` (leading coefficient 1 implied).
const S: [f64; 6] = [
    2.260_528_632_201_172_6,
    9.396_035_249_380_015,
    12.048_953_980_809_666,
    17.081_445_074_756_59,
    9.608_968_090_632_859,
    3.369_076_451_000_815,
];

/// Numerator of `erf` for `|x| <= 1`, evaluated at `x²`.
const T: [f64; 5] = [
    9.604_973_739_870_516,
    90.026_019_720_384_27,
    2232.005_345_946_843,
    7003.325_141_128_051,
    55592.301_301_039_49,
];

/// Denominator of `erf` for `|x| <= 1` (leading coefficient 1 implied).
const U: [f64; 5] = [
    33.561_714_164_750_31,
    521.357_949_780_152_7,
    4594.323_829_709_801,
    22629.000_061_389_095,
    49267.394_260_863_59,
];

/// Evaluates a polynomial with coefficients in descending order (Horner).
#[inline]
fn polevl(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Like [`polevl`], with an implied leading coefficient of 1.
#[inline]
fn p1evl(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().fold(1.0, |acc, &c| acc * x + c)
}

/// The Gaussian error function.
///
/// Odd, bounded in `[-1, 1]`, with `erf(0) = 0`.
///
/// # Example
///
/// ```rust
/// use solvency_math::special::erf;
///
/// assert_eq!(erf(0.0), 0.0);
/// assert!((erf(1.0) - 0.842_700_792_949_715).abs() < 1e-12);
/// assert_eq!(erf(-0.5), -erf(0.5));
/// ```
#[must_use]
pub fn erf(x: f64) -> f64 {
    if x.abs() > 1.0 {
        return 1.0 - erfc(x);
    }
    let z = x * x;
    x * polevl(z, &T) / p1evl(z, &U)
}

/// The complementary error function, `erfc(x) = 1 - erf(x)`.
///
/// Bounded in `[0, 2]`. When `exp(-x²)` would underflow the result
/// saturates at 0 (positive `x`) or 2 (negative `x`).
///
/// # Example
///
/// ```rust
/// use solvency_math::special::erfc;
///
/// assert_eq!(erfc(0.0), 1.0);
/// assert_eq!(erfc(40.0), 0.0);
/// assert_eq!(erfc(-40.0), 2.0);
/// ```
#[must_use]
pub fn erfc(x: f64) -> f64 {
    let a = x.abs();
    if a < 1.0 {
        return 1.0 - erf(x);
    }

    let z = -x * x;
    if z < -MAX_LOG {
        return if x < 0.0 { 2.0 } else { 0.0 };
    }

    let (num, den): (&[f64], &[f64]) = if a < 8.0 { (&P, &Q) } else { (&R, &S) };
    let y = z.exp() * polevl(a, num) / p1evl(a, den);

    if x < 0.0 {
        2.0 - y
    } else {
        y
    }
}
