//! Transcendental approximations over [`Fix`], computed purely with integer
//! arithmetic. Nothing here touches floating point: square roots use a
//! bit-guess integer algorithm, trigonometry uses a quarter-wave lookup table
//! with linear interpolation, and `pow` is built from binary `exp2`/`log2`.
//!
//! Angles are in degrees throughout the crate; the sine table has one entry
//! per degree.

#[allow(unused_imports)]
use crate::assert::*;
#[allow(unused_imports)]
use crate::prelude::*;

use crate::fix::Fix;

const ONE_RAW: i64 = 1 << 16;
const DEG_90: i64 = 90 * ONE_RAW;
const DEG_180: i64 = 180 * ONE_RAW;
const DEG_270: i64 = 270 * ONE_RAW;
const DEG_360: i64 = 360 * ONE_RAW;

/// sin(d) in Q16.16 for whole degrees d = 0..=90, rounded to nearest.
const SIN_TABLE: [i32; 91] = [
    0, 1144, 2287, 3430, 4572, 5712, 6850, 7987, 9121, 10252, 11380, 12505, 13626, 14742, 15855,
    16962, 18064, 19161, 20252, 21336, 22415, 23486, 24550, 25607, 26656, 27697, 28729, 29753,
    30767, 31772, 32768, 33754, 34729, 35693, 36647, 37590, 38521, 39441, 40348, 41243, 42126,
    42995, 43852, 44695, 45525, 46341, 47143, 47930, 48703, 49461, 50203, 50931, 51643, 52339,
    53020, 53684, 54332, 54963, 55578, 56175, 56756, 57319, 57865, 58393, 58903, 59396, 59870,
    60326, 60764, 61183, 61584, 61966, 62328, 62672, 62997, 63303, 63589, 63856, 64104, 64332,
    64540, 64729, 64898, 65048, 65177, 65287, 65376, 65446, 65496, 65526, 65536,
];

/// 2^(2^-(i+1)) in Q16.16 for i = 0..16, rounded to nearest. Entry `i`
/// corresponds to fractional bit `i` (most significant first) of an `exp2`
/// argument.
const EXP2_FRAC_TABLE: [u64; 16] = [
    92682, 77936, 71468, 68438, 66971, 66250, 65892, 65714, 65625, 65580, 65558, 65547, 65542,
    65539, 65537, 65537,
];

/// Integer square root: the largest `r` with `r * r <= n`.
///
/// # Examples
///
/// ```
/// use fixgeom::math::sqrt_u64;
/// assert_eq!(sqrt_u64(0), 0);
/// assert_eq!(sqrt_u64(144), 12);
/// assert_eq!(sqrt_u64(145), 12);
/// assert_eq!(sqrt_u64(u64::MAX), (1 << 32) - 1);
/// ```
#[must_use]
pub fn sqrt_u64(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut rem = n;
    let mut root: u64 = 0;
    let mut place: u64 = 1 << 62;
    while place > rem {
        place >>= 2;
    }
    while place != 0 {
        if rem >= root + place {
            rem -= root + place;
            root += place << 1;
        }
        root >>= 1;
        place >>= 2;
    }
    root
}

/// Integer square root rounded to nearest instead of truncated.
pub(crate) fn sqrt_u64_rounded(n: u64) -> u64 {
    let r = sqrt_u64(n);
    // Round up iff the remainder exceeds r, i.e. n > r(r + 1) = (r + 0.5)^2 - 0.25.
    if n - r * r > r { r + 1 } else { r }
}

/// Square root of a non-negative [`Fix`], rounded to nearest.
///
/// Zero is a valid argument and returns zero; a negative argument is a
/// contract violation and panics.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
/// assert_eq!(math::sqrt(Fix::from_int(9)), Fix::from_int(3));
/// assert_eq!(math::sqrt(Fix::ZERO), Fix::ZERO);
/// assert_eq!(math::sqrt(Fix::ratio(1, 4)), Fix::HALF);
/// ```
#[must_use]
pub fn sqrt(x: Fix) -> Fix {
    assert!(x >= Fix::ZERO, "sqrt of negative value");
    // sqrt(raw / 2^16) * 2^16 == sqrt(raw * 2^16), computed entirely on the
    // raw representation.
    let wide = (x.raw() as u64) << 16;
    Fix::from_raw(sqrt_u64_rounded(wide) as i32)
}

fn wrap_degrees(x: Fix) -> i64 {
    let d = (x.raw() as i64) % DEG_360;
    let d = if d < 0 { d + DEG_360 } else { d };
    check_ge!(d, 0);
    check_lt!(d, DEG_360);
    d
}

/// Looks up sin of a raw-degree argument in [0, 90 << 16], interpolating
/// linearly between whole-degree table entries.
fn sin_lookup(t: i64) -> i64 {
    let idx = (t >> 16) as usize;
    let frac = t & 0xFFFF;
    if idx >= 90 {
        return SIN_TABLE[90] as i64;
    }
    let a = SIN_TABLE[idx] as i64;
    let b = SIN_TABLE[idx + 1] as i64;
    a + (((b - a) * frac + 0x8000) >> 16)
}

fn sin_raw(d: i64) -> i64 {
    if d < DEG_90 {
        sin_lookup(d)
    } else if d < DEG_180 {
        sin_lookup(DEG_180 - d)
    } else if d < DEG_270 {
        -sin_lookup(d - DEG_180)
    } else {
        -sin_lookup(DEG_360 - d)
    }
}

/// Sine of an angle in degrees. Exact at whole degrees (to table precision),
/// linearly interpolated and monotonic within each quadrant in between.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
/// assert_eq!(math::sin(Fix::from_int(30)), Fix::HALF);
/// assert_eq!(math::sin(Fix::from_int(90)), Fix::ONE);
/// assert_eq!(math::sin(Fix::from_int(-30)), -Fix::HALF);
/// ```
#[must_use]
pub fn sin(degrees: Fix) -> Fix {
    Fix::from_raw(sin_raw(wrap_degrees(degrees)) as i32)
}

/// Cosine of an angle in degrees.
#[must_use]
pub fn cos(degrees: Fix) -> Fix {
    Fix::from_raw(sin_raw((wrap_degrees(degrees) + DEG_90) % DEG_360) as i32)
}

/// Arc-cosine, returning degrees in [0, 180].
///
/// Arguments outside [-1, 1] are clamped into the valid domain rather than
/// rejected: fixed-point rounding routinely produces dot products a few ulps
/// out of range, and there is no representable "invalid" value to return.
/// Computed by binary search over the monotone [`cos`] approximation, so
/// `acos` and `cos` are exactly consistent with each other.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
/// assert_eq!(math::acos(Fix::ONE), Fix::ZERO);
/// assert_eq!(math::acos(Fix::from_int(2)), Fix::ZERO); // clamped
/// assert_eq!(math::acos(-Fix::ONE), Fix::from_int(180));
/// ```
#[must_use]
pub fn acos(x: Fix) -> Fix {
    let target = x.clamp(-Fix::ONE, Fix::ONE).raw() as i64;
    let mut lo: i64 = 0;
    let mut hi: i64 = DEG_180;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if sin_raw((mid + DEG_90) % DEG_360) > target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    // Pick whichever endpoint lands closer to the requested cosine.
    let cos_lo = sin_raw((lo + DEG_90) % DEG_360);
    let cos_hi = sin_raw((hi + DEG_90) % DEG_360);
    if (cos_lo - target).abs() <= (cos_hi - target).abs() {
        Fix::from_raw(lo as i32)
    } else {
        Fix::from_raw(hi as i32)
    }
}

/// Four-quadrant arc-tangent of `y / x`, returning degrees in (-180, 180].
///
/// `atan2(0, 0)` returns zero.
#[must_use]
pub fn atan2(y: Fix, x: Fix) -> Fix {
    if y == Fix::ZERO && x == Fix::ZERO {
        return Fix::ZERO;
    }
    let n = (x.raw() as i64 * x.raw() as i64) as u64 + (y.raw() as i64 * y.raw() as i64) as u64;
    let m = Fix::from_raw(sqrt_u64_rounded(n).min(i32::MAX as u64) as i32);
    let angle = acos(x / m);
    if y < Fix::ZERO { -angle } else { angle }
}

/// Arc-tangent, returning degrees in (-90, 90).
#[must_use]
pub fn atan(v: Fix) -> Fix {
    atan2(v, Fix::ONE)
}

/// Base-2 exponential. Saturates to [`Fix::MAX`] for arguments >= 15 and
/// underflows to zero for very negative arguments.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
/// assert_eq!(math::exp2(Fix::from_int(3)), Fix::from_int(8));
/// assert_eq!(math::exp2(Fix::ZERO), Fix::ONE);
/// assert_eq!(math::exp2(Fix::from_int(-1)), Fix::HALF);
/// ```
#[must_use]
pub fn exp2(x: Fix) -> Fix {
    let n = x.raw() >> 16;
    let f = (x.raw() & 0xFFFF) as u32;
    let mut result: u64 = ONE_RAW as u64;
    for (i, &factor) in EXP2_FRAC_TABLE.iter().enumerate() {
        if f & (1 << (15 - i)) != 0 {
            result = (result * factor + 0x8000) >> 16;
        }
    }
    if n >= 15 {
        return Fix::MAX;
    }
    let raw: i64 = if n >= 0 {
        (result as i64) << n
    } else {
        let shift = -n;
        if shift >= 33 {
            0
        } else {
            ((result >> (shift - 1)) as i64 + 1) >> 1
        }
    };
    Fix::from_raw(raw.clamp(0, i32::MAX as i64) as i32)
}

/// Base-2 logarithm of a strictly positive value, computed by the classic
/// bit-by-bit mantissa-squaring algorithm.
///
/// Panics on zero or negative arguments.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
/// assert_eq!(math::log2(Fix::from_int(8)), Fix::from_int(3));
/// assert_eq!(math::log2(Fix::ONE), Fix::ZERO);
/// assert_eq!(math::log2(Fix::HALF), Fix::from_int(-1));
/// ```
#[must_use]
pub fn log2(x: Fix) -> Fix {
    assert!(x > Fix::ZERO, "log2 of non-positive value");
    let raw = x.raw() as u64;
    let msb = 63 - raw.leading_zeros() as i64;
    let int_part = msb - 16;
    // Mantissa normalized to Q32 in [2^32, 2^33); squaring in u128 keeps
    // every bit.
    let mut m: u64 = raw << (32 - msb);
    let mut frac: i64 = 0;
    for _ in 0..16 {
        m = ((m as u128 * m as u128) >> 32) as u64;
        frac <<= 1;
        if m >= 1 << 33 {
            frac |= 1;
            m >>= 1;
        }
    }
    Fix::from_raw(((int_part << 16) + frac) as i32)
}

/// Raises `base` to the power `exp`.
///
/// - `pow(x, 0) == 1` for every `x` (including zero);
/// - `pow(0, y) == 0` for `y > 0`, and panics for `y < 0`;
/// - a negative base requires an integer exponent (panics otherwise), and the
///   sign of the result follows the exponent's parity.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
/// assert_eq!(math::pow(Fix::from_int(2), Fix::from_int(10)), Fix::from_int(1024));
/// assert_eq!(math::pow(Fix::from_int(4), Fix::HALF), Fix::from_int(2));
/// assert_eq!(math::pow(Fix::from_int(-2), Fix::from_int(3)), Fix::from_int(-8));
/// ```
#[must_use]
pub fn pow(base: Fix, exp: Fix) -> Fix {
    if exp == Fix::ZERO {
        return Fix::ONE;
    }
    if base == Fix::ZERO {
        assert!(exp > Fix::ZERO, "pow(): zero base requires a positive exponent");
        return Fix::ZERO;
    }
    if base < Fix::ZERO {
        assert!(
            exp.fract() == Fix::ZERO,
            "pow(): negative base requires an integer exponent"
        );
        let magnitude = exp2(exp * log2(base.abs()));
        return if exp.to_int() & 1 == 1 { -magnitude } else { magnitude };
    }
    exp2(exp * log2(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Square root ====================

    #[test]
    fn sqrt_u64_exact_and_floor() {
        assert_eq!(sqrt_u64(1), 1);
        assert_eq!(sqrt_u64(4), 2);
        assert_eq!(sqrt_u64(15), 3);
        assert_eq!(sqrt_u64(16), 4);
        assert_eq!(sqrt_u64(1 << 40), 1 << 20);
    }

    #[test]
    fn sqrt_u64_rounds_to_nearest() {
        // 8 is between 2^2=4 and 3^2=9; sqrt(8)=2.83 rounds to 3.
        assert_eq!(sqrt_u64_rounded(8), 3);
        assert_eq!(sqrt_u64_rounded(6), 2);
        assert_eq!(sqrt_u64_rounded(2), 1);
    }

    #[test]
    fn sqrt_perfect_squares() {
        for n in 0..20 {
            assert_eq!(sqrt(Fix::from_int(n * n)), Fix::from_int(n));
        }
    }

    #[test]
    fn sqrt_fractional() {
        assert_eq!(sqrt(Fix::ratio(1, 4)), Fix::HALF);
        assert_eq!(sqrt(Fix::ratio(9, 4)), Fix::ratio(3, 2));
        // sqrt(2) = 1.41421..., raw 92682 to nearest
        assert_eq!(sqrt(Fix::from_int(2)), Fix::from_raw(92682));
    }

    #[test]
    #[should_panic(expected = "sqrt of negative")]
    fn sqrt_negative_panics() {
        let _ = sqrt(-Fix::ONE);
    }

    // ==================== Trigonometry ====================

    #[test]
    fn sin_key_angles() {
        assert_eq!(sin(Fix::ZERO), Fix::ZERO);
        assert_eq!(sin(Fix::from_int(30)), Fix::HALF);
        assert_eq!(sin(Fix::from_int(45)), Fix::from_raw(46341));
        assert_eq!(sin(Fix::from_int(90)), Fix::ONE);
        assert_eq!(sin(Fix::from_int(180)), Fix::ZERO);
        assert_eq!(sin(Fix::from_int(270)), -Fix::ONE);
    }

    #[test]
    fn sin_wraps_and_negates() {
        assert_eq!(sin(Fix::from_int(390)), sin(Fix::from_int(30)));
        assert_eq!(sin(Fix::from_int(-30)), -Fix::HALF);
        assert_eq!(sin(Fix::from_int(-360)), Fix::ZERO);
        assert_eq!(sin(Fix::from_int(150)), Fix::HALF);
    }

    #[test]
    fn sin_monotone_in_first_quadrant() {
        let mut prev = sin(Fix::ZERO);
        for raw in (0..=(90 << 16)).step_by(1 << 12) {
            let cur = sin(Fix::from_raw(raw));
            assert!(cur >= prev, "sin not monotone at raw {raw}");
            prev = cur;
        }
    }

    #[test]
    fn cos_key_angles() {
        assert_eq!(cos(Fix::ZERO), Fix::ONE);
        assert_eq!(cos(Fix::from_int(60)), Fix::HALF);
        assert_eq!(cos(Fix::from_int(90)), Fix::ZERO);
        assert_eq!(cos(Fix::from_int(180)), -Fix::ONE);
        assert_eq!(cos(Fix::from_int(-60)), Fix::HALF);
    }

    #[test]
    fn acos_inverts_cos() {
        assert_eq!(acos(Fix::ONE), Fix::ZERO);
        assert_eq!(acos(-Fix::ONE), Fix::from_int(180));
        let ninety = acos(Fix::ZERO);
        assert!((ninety - Fix::from_int(90)).abs() <= Fix::EPSILON * 2);
        let sixty = acos(Fix::HALF);
        assert!((sixty - Fix::from_int(60)).abs() <= Fix::EPSILON * 2);
    }

    #[test]
    fn acos_clamps_out_of_domain() {
        assert_eq!(acos(Fix::from_int(2)), acos(Fix::ONE));
        assert_eq!(acos(Fix::from_int(-2)), acos(-Fix::ONE));
    }

    #[test]
    fn atan2_quadrants() {
        // The acos-based formulation loses a little precision where the
        // cosine curve is flat; 0.02 degrees is ample.
        let eps = Fix::ratio(1, 50);
        assert_eq!(atan2(Fix::ZERO, Fix::ZERO), Fix::ZERO);
        assert_eq!(atan2(Fix::ZERO, Fix::ONE), Fix::ZERO);
        assert!((atan2(Fix::ONE, Fix::ZERO) - Fix::from_int(90)).abs() <= eps);
        assert!((atan2(-Fix::ONE, Fix::ZERO) + Fix::from_int(90)).abs() <= eps);
        assert!((atan2(Fix::ONE, Fix::ONE) - Fix::from_int(45)).abs() <= eps);
        assert_eq!(atan2(Fix::ZERO, -Fix::ONE), Fix::from_int(180));
    }

    // ==================== Powers ====================

    #[test]
    fn exp2_and_log2_exact_powers() {
        assert_eq!(exp2(Fix::from_int(10)), Fix::from_int(1024));
        assert_eq!(exp2(Fix::from_int(-2)), Fix::ratio(1, 4));
        assert_eq!(log2(Fix::from_int(1024)), Fix::from_int(10));
        assert_eq!(log2(Fix::ratio(1, 4)), Fix::from_int(-2));
    }

    #[test]
    fn exp2_saturates() {
        assert_eq!(exp2(Fix::from_int(20)), Fix::MAX);
        assert_eq!(exp2(Fix::from_int(-40)), Fix::ZERO);
    }

    #[test]
    fn log2_sqrt2() {
        // log2(sqrt(2)) = 0.5 within interpolation error
        let x = log2(Fix::from_raw(92682));
        assert!((x - Fix::HALF).abs() <= Fix::EPSILON * 2);
    }

    #[test]
    #[should_panic(expected = "non-positive")]
    fn log2_zero_panics() {
        let _ = log2(Fix::ZERO);
    }

    #[test]
    fn pow_basics() {
        assert_eq!(pow(Fix::from_int(2), Fix::from_int(10)), Fix::from_int(1024));
        assert_eq!(pow(Fix::from_int(7), Fix::ZERO), Fix::ONE);
        assert_eq!(pow(Fix::ZERO, Fix::from_int(3)), Fix::ZERO);
        assert_eq!(pow(Fix::ZERO, Fix::ZERO), Fix::ONE);
        assert_eq!(pow(Fix::from_int(4), Fix::HALF), Fix::from_int(2));
    }

    #[test]
    fn pow_negative_base_integer_exponent() {
        assert_eq!(pow(Fix::from_int(-2), Fix::from_int(3)), Fix::from_int(-8));
        assert_eq!(pow(Fix::from_int(-2), Fix::from_int(2)), Fix::from_int(4));
    }

    #[test]
    #[should_panic(expected = "integer exponent")]
    fn pow_negative_base_fractional_exponent_panics() {
        let _ = pow(Fix::from_int(-2), Fix::HALF);
    }

    #[test]
    fn pow_reciprocal() {
        let x = pow(Fix::from_int(2), -Fix::ONE);
        assert!((x - Fix::HALF).abs() <= Fix::EPSILON);
    }

    #[test]
    fn pow_cube_root_of_one() {
        // The rotation-matrix path computes pow(det, 1/3) with det == 1.
        assert_eq!(pow(Fix::ONE, Fix::ratio(1, 3)), Fix::ONE);
    }
}
