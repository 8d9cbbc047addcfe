#[allow(unused_imports)]
use crate::assert::*;
#[allow(unused_imports)]
use crate::prelude::*;

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Number of fractional bits in the [`Fix`] representation.
pub const FRACTIONAL_BITS: i32 = 16;

const ONE_RAW: i32 = 1 << FRACTIONAL_BITS;
const FRACTION_MASK: i32 = ONE_RAW - 1;

/// A Q16.16 fixed-point scalar.
///
/// The value is stored as a signed 32-bit integer scaled by 2^16, giving a
/// range of roughly ±32768 with a resolution of 1/65536. All arithmetic is
/// computed in 64-bit intermediates and rounded to nearest, so results are
/// bit-identical on every platform.
///
/// # Overflow policy
///
/// Every operation **saturates** to [`Fix::MIN`]/[`Fix::MAX`] on overflow.
/// Saturation keeps the sign of an overflowing result stable, which wrapping
/// does not, and it is applied uniformly: there is no operation in this crate
/// that wraps.
///
/// # Division
///
/// Division by zero is a programmer error and panics, exactly like integer
/// division. Use [`checked_div`](Fix::checked_div) where a zero divisor is an
/// expected runtime condition.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
///
/// let a = Fix::from_int(3) / 2;
/// assert_eq!(a, Fix::ONE + Fix::HALF);
/// assert_eq!(Fix::MAX + Fix::ONE, Fix::MAX); // saturates
/// ```
///
/// # Equality and ordering
///
/// Comparison is the total order of the underlying raw integer. There is no
/// epsilon tolerance: two values are equal iff their bits are equal.
#[derive(
    Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Fix {
    raw: i32,
}

impl Fix {
    pub const ZERO: Fix = Fix::from_raw(0);
    pub const ONE: Fix = Fix::from_raw(ONE_RAW);
    pub const HALF: Fix = Fix::from_raw(ONE_RAW / 2);
    /// Smallest representable increment (one raw ulp, 1/65536).
    pub const EPSILON: Fix = Fix::from_raw(1);
    pub const MIN: Fix = Fix::from_raw(i32::MIN);
    pub const MAX: Fix = Fix::from_raw(i32::MAX);
    /// π, rounded to the nearest representable value.
    pub const PI: Fix = Fix::from_raw(205_887);
    /// 2π, rounded to the nearest representable value.
    pub const TAU: Fix = Fix::from_raw(411_775);
    /// Euler's number, rounded to the nearest representable value.
    pub const E: Fix = Fix::from_raw(178_145);

    /// Reinterprets a raw scaled integer as a [`Fix`]. The raw representation
    /// is the stable layout exposed to serialization adapters.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Fix {
        Fix { raw }
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.raw
    }

    /// Converts an integer, saturating if it falls outside the representable
    /// range (±32767).
    ///
    /// # Examples
    ///
    /// ```
    /// use fixgeom::prelude::*;
    /// assert_eq!(Fix::from_int(2) * Fix::from_int(3), Fix::from_int(6));
    /// assert_eq!(Fix::from_int(1_000_000), Fix::MAX);
    /// ```
    #[must_use]
    pub fn from_int(n: i32) -> Fix {
        Fix::from_raw(saturate((n as i64) << FRACTIONAL_BITS))
    }

    /// Truncates to the integer part, rounding towards negative infinity.
    #[must_use]
    pub const fn to_int(self) -> i32 {
        self.raw >> FRACTIONAL_BITS
    }

    /// Constructs the closest representable value to `num / den`, rounding to
    /// nearest.
    ///
    /// Panics if `den` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixgeom::prelude::*;
    /// assert_eq!(Fix::ratio(1, 2), Fix::HALF);
    /// assert_eq!(Fix::ratio(-3, 2), -Fix::ONE - Fix::HALF);
    /// ```
    #[must_use]
    pub fn ratio(num: i32, den: i32) -> Fix {
        assert!(den != 0, "Fix::ratio(): zero denominator");
        let q = ((num as i64) << (FRACTIONAL_BITS + 1)) / den as i64;
        Fix::from_raw(saturate((q + 1) >> 1))
    }

    /// Absolute value, saturating at [`Fix::MAX`] for [`Fix::MIN`].
    #[must_use]
    pub const fn abs(self) -> Fix {
        Fix::from_raw(self.raw.saturating_abs())
    }

    /// Returns -1, 0 or 1 as a [`Fix`] according to the sign of `self`.
    #[must_use]
    pub const fn sign(self) -> Fix {
        if self.raw > 0 {
            Fix::ONE
        } else if self.raw < 0 {
            Fix::from_raw(-ONE_RAW)
        } else {
            Fix::ZERO
        }
    }

    /// Largest integral value less than or equal to `self`.
    #[must_use]
    pub const fn floor(self) -> Fix {
        Fix::from_raw(self.raw & !FRACTION_MASK)
    }

    /// Smallest integral value greater than or equal to `self`, saturating.
    #[must_use]
    pub fn ceil(self) -> Fix {
        Fix::from_raw(self.raw.saturating_add(FRACTION_MASK) & !FRACTION_MASK)
    }

    /// Nearest integral value, rounding half towards positive infinity,
    /// saturating.
    #[must_use]
    pub fn round(self) -> Fix {
        Fix::from_raw(self.raw.saturating_add(ONE_RAW / 2) & !FRACTION_MASK)
    }

    /// The fractional part, always non-negative: `self - self.floor()`.
    #[must_use]
    pub const fn fract(self) -> Fix {
        Fix::from_raw(self.raw & FRACTION_MASK)
    }

    /// Division that returns `None` instead of panicking on a zero divisor.
    #[must_use]
    pub fn checked_div(self, rhs: Fix) -> Option<Fix> {
        if rhs.raw == 0 { None } else { Some(self / rhs) }
    }

    /// Reciprocal, or `None` for zero.
    #[must_use]
    pub fn checked_recip(self) -> Option<Fix> {
        Fix::ONE.checked_div(self)
    }

    /// Clamps `self` into `[lo, hi]`.
    #[must_use]
    pub fn clamp(self, lo: Fix, hi: Fix) -> Fix {
        check_le!(lo, hi);
        match self.cmp(&lo) {
            Ordering::Less => lo,
            _ => {
                if self > hi {
                    hi
                } else {
                    self
                }
            }
        }
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Zero for Fix {
    fn zero() -> Self {
        Fix::ZERO
    }

    fn is_zero(&self) -> bool {
        self.raw == 0
    }
}

impl One for Fix {
    fn one() -> Self {
        Fix::ONE
    }
}

impl From<i16> for Fix {
    fn from(value: i16) -> Self {
        Fix::from_raw((value as i32) << FRACTIONAL_BITS)
    }
}

impl fmt::Display for Fix {
    /// Renders the exact decimal expansion of the stored value without going
    /// through floating point.
    ///
    /// ```
    /// use fixgeom::prelude::*;
    /// assert_eq!(format!("{}", Fix::ratio(-3, 2)), "-1.5");
    /// assert_eq!(format!("{}", Fix::from_int(7)), "7");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let raw = self.raw as i64;
        if raw < 0 {
            write!(f, "-")?;
        }
        let abs = raw.unsigned_abs();
        write!(f, "{}", abs >> FRACTIONAL_BITS)?;
        let mut frac = abs & FRACTION_MASK as u64;
        if frac != 0 {
            write!(f, ".")?;
            // One decimal digit per iteration; 5 digits are enough to
            // distinguish every raw value (1/65536 > 1/100000).
            for _ in 0..5 {
                frac *= 10;
                write!(f, "{}", frac >> FRACTIONAL_BITS)?;
                frac &= FRACTION_MASK as u64;
                if frac == 0 {
                    break;
                }
            }
        }
        Ok(())
    }
}

impl Add<Fix> for Fix {
    type Output = Fix;

    fn add(self, rhs: Fix) -> Self::Output {
        Fix::from_raw(self.raw.saturating_add(rhs.raw))
    }
}
impl AddAssign<Fix> for Fix {
    fn add_assign(&mut self, rhs: Fix) {
        *self = *self + rhs;
    }
}

impl Sub<Fix> for Fix {
    type Output = Fix;

    fn sub(self, rhs: Fix) -> Self::Output {
        Fix::from_raw(self.raw.saturating_sub(rhs.raw))
    }
}
impl SubAssign<Fix> for Fix {
    fn sub_assign(&mut self, rhs: Fix) {
        *self = *self - rhs;
    }
}

impl Mul<Fix> for Fix {
    type Output = Fix;

    /// Full-precision multiply: the 64-bit product is rescaled with
    /// round-to-nearest (ties towards positive infinity), then saturated.
    fn mul(self, rhs: Fix) -> Self::Output {
        let product = self.raw as i64 * rhs.raw as i64;
        Fix::from_raw(saturate((product + (ONE_RAW as i64 / 2)) >> FRACTIONAL_BITS))
    }
}
impl MulAssign<Fix> for Fix {
    fn mul_assign(&mut self, rhs: Fix) {
        *self = *self * rhs;
    }
}
impl Mul<i32> for Fix {
    type Output = Fix;

    fn mul(self, rhs: i32) -> Self::Output {
        Fix::from_raw(saturate(self.raw as i64 * rhs as i64))
    }
}
impl Mul<Fix> for i32 {
    type Output = Fix;

    fn mul(self, rhs: Fix) -> Self::Output {
        rhs * self
    }
}

impl Div<Fix> for Fix {
    type Output = Fix;

    /// Full-precision divide, rounding to nearest. Panics on a zero divisor.
    fn div(self, rhs: Fix) -> Self::Output {
        assert!(rhs.raw != 0, "Fix division by zero");
        let q = ((self.raw as i64) << (FRACTIONAL_BITS + 1)) / rhs.raw as i64;
        Fix::from_raw(saturate((q + 1) >> 1))
    }
}
impl DivAssign<Fix> for Fix {
    fn div_assign(&mut self, rhs: Fix) {
        *self = *self / rhs;
    }
}
impl Div<i32> for Fix {
    type Output = Fix;

    fn div(self, rhs: i32) -> Self::Output {
        assert!(rhs != 0, "Fix division by zero");
        let q = ((self.raw as i64) << 1) / rhs as i64;
        Fix::from_raw(saturate((q + 1) >> 1))
    }
}

impl Neg for Fix {
    type Output = Fix;

    fn neg(self) -> Self::Output {
        Fix::from_raw(self.raw.saturating_neg())
    }
}

impl Sum<Fix> for Fix {
    fn sum<I: Iterator<Item = Fix>>(iter: I) -> Self {
        iter.fold(Fix::ZERO, Fix::add)
    }
}
