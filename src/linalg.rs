#[allow(unused_imports)]
use crate::prelude::*;

use crate::fix::Fix;
use crate::math;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Rational coefficients of the critically-damped spring polynomial used by
/// `smooth_damp`: `1 / (1 + x + C2 x^2 + C3 x^3)` approximates `e^-x`. These
/// are fixed constants of the integrator, not tunables; changing them changes
/// the damping curve and therefore every replay.
const SMOOTH_DAMP_C2: (i32, i32) = (48, 100);
const SMOOTH_DAMP_C3: (i32, i32) = (235, 1000);
/// Lower bound applied to the smoothing time, preventing the `2/smooth_time`
/// term from blowing up the division.
const MIN_SMOOTH_TIME: (i32, i32) = (1, 10_000);

/// A 2D vector of [`Fix`] components.
///
/// An immutable value type: every operation returns a new vector. Equality is
/// exact component-wise comparison of the underlying raw integers; there is
/// no epsilon tolerance anywhere.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
///
/// let v = FixVec2::new(Fix::from_int(3), Fix::from_int(4));
/// assert_eq!(v.magnitude(), Fix::from_int(5));
/// assert_eq!(v.normalized().magnitude(), Fix::ONE);
/// ```
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct FixVec2 {
    pub x: Fix,
    pub y: Fix,
}

impl FixVec2 {
    pub const ZERO: FixVec2 = FixVec2 { x: Fix::ZERO, y: Fix::ZERO };
    pub const ONE: FixVec2 = FixVec2 { x: Fix::ONE, y: Fix::ONE };
    pub const UNIT_X: FixVec2 = FixVec2 { x: Fix::ONE, y: Fix::ZERO };
    pub const UNIT_Y: FixVec2 = FixVec2 { x: Fix::ZERO, y: Fix::ONE };

    #[must_use]
    pub const fn new(x: Fix, y: Fix) -> FixVec2 {
        FixVec2 { x, y }
    }

    /// A vector with both components set to the same value.
    #[must_use]
    pub const fn splat(v: Fix) -> FixVec2 {
        FixVec2 { x: v, y: v }
    }

    #[must_use]
    pub const fn with_x(self, x: Fix) -> FixVec2 {
        FixVec2 { x, y: self.y }
    }

    #[must_use]
    pub const fn with_y(self, y: Fix) -> FixVec2 {
        FixVec2 { x: self.x, y }
    }

    /// Extends into 3D with a zero z component.
    #[must_use]
    pub const fn extend(self) -> FixVec3 {
        FixVec3 { x: self.x, y: self.y, z: Fix::ZERO }
    }

    /// Reinterprets this 2D vector as a point on the 3D ground plane:
    /// `(x, y)` becomes `(x, 0, y)`.
    #[must_use]
    pub const fn on_xz_plane(self) -> FixVec3 {
        FixVec3 { x: self.x, y: Fix::ZERO, z: self.y }
    }

    #[must_use]
    pub fn dot(self, rhs: FixVec2) -> Fix {
        self.x * rhs.x + self.y * rhs.y
    }

    /// The 2D cross product: the signed area of the parallelogram spanned by
    /// the two vectors.
    #[must_use]
    pub fn cross(self, rhs: FixVec2) -> Fix {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Squared magnitude. Zero vectors short-circuit so no arithmetic (and no
    /// saturation) happens for them.
    #[must_use]
    pub fn sqr_magnitude(self) -> Fix {
        if self == FixVec2::ZERO {
            return Fix::ZERO;
        }
        self.dot(self)
    }

    /// Magnitude, computed on the widened raw representation so the
    /// intermediate sum of squares cannot saturate even where
    /// [`sqr_magnitude`](FixVec2::sqr_magnitude) would.
    #[must_use]
    pub fn magnitude(self) -> Fix {
        if self == FixVec2::ZERO {
            return Fix::ZERO;
        }
        let n = raw_sqr_sum2(self);
        Fix::from_raw(math::sqrt_u64_rounded(n).min(i32::MAX as u64) as i32)
    }

    /// Unit vector in the same direction, or [`FixVec2::ZERO`] for the zero
    /// vector. Never divides by a measured-zero magnitude.
    #[must_use]
    pub fn normalized(self) -> FixVec2 {
        self.normalized_with_magnitude().0
    }

    /// Like [`normalized`](FixVec2::normalized), additionally returning the
    /// pre-normalization magnitude for callers that need both.
    #[must_use]
    pub fn normalized_with_magnitude(self) -> (FixVec2, Fix) {
        if self == FixVec2::ZERO {
            return (FixVec2::ZERO, Fix::ZERO);
        }
        let m = self.magnitude();
        if m == Fix::ZERO {
            // Magnitude too small for fixed precision; approximate with a
            // zero-length vector.
            warn!("FixVec2::normalized(): magnitude underflow: {}", self);
            return (FixVec2::ZERO, Fix::ZERO);
        }
        (self / m, m)
    }

    /// Returns this vector unless its magnitude exceeds `max_length`, in
    /// which case it is scaled down onto that length. The common in-range
    /// path costs one multiply, no square root.
    #[must_use]
    pub fn clamp_magnitude(self, max_length: Fix) -> FixVec2 {
        if self.sqr_magnitude() > max_length * max_length {
            self.normalized() * max_length
        } else {
            self
        }
    }

    /// Steps from `self` towards `target` by at most `max_distance_delta`,
    /// snapping exactly onto the target once within range so no residual
    /// error accumulates.
    #[must_use]
    pub fn move_towards(self, target: FixVec2, max_distance_delta: Fix) -> FixVec2 {
        let delta = target - self;
        let magnitude = delta.magnitude();
        if magnitude > max_distance_delta && magnitude != Fix::ZERO {
            self + delta / magnitude * max_distance_delta
        } else {
            target
        }
    }

    /// Linear interpolation from `self` to `to`; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, to: FixVec2, t: Fix) -> FixVec2 {
        let t = t.clamp(Fix::ZERO, Fix::ONE);
        FixVec2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    /// Critically-damped spring step towards `target`; see
    /// [`FixVec3::smooth_damp`] for the contract. Returns the new position
    /// and the new velocity.
    #[must_use]
    pub fn smooth_damp(
        current: FixVec2,
        target: FixVec2,
        velocity: FixVec2,
        smooth_time: Fix,
        max_speed: Fix,
        delta_time: Fix,
    ) -> (FixVec2, FixVec2) {
        let (out, vel) = FixVec3::smooth_damp(
            current.extend(),
            target.extend(),
            velocity.extend(),
            smooth_time,
            max_speed,
            delta_time,
        );
        (out.truncate(), vel.truncate())
    }
}

fn raw_sqr_sum2(v: FixVec2) -> u64 {
    let x = v.x.raw() as i64;
    let y = v.y.raw() as i64;
    (x * x) as u64 + (y * y) as u64
}

impl Zero for FixVec2 {
    fn zero() -> Self {
        FixVec2::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == FixVec2::ZERO
    }
}

impl From<[Fix; 2]> for FixVec2 {
    fn from(value: [Fix; 2]) -> Self {
        FixVec2 { x: value[0], y: value[1] }
    }
}

impl From<FixVec2> for [Fix; 2] {
    fn from(value: FixVec2) -> Self {
        [value.x, value.y]
    }
}

impl fmt::Display for FixVec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {})", self.x, self.y)
    }
}

impl Add<FixVec2> for FixVec2 {
    type Output = FixVec2;

    fn add(self, rhs: FixVec2) -> Self::Output {
        FixVec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}
impl AddAssign<FixVec2> for FixVec2 {
    fn add_assign(&mut self, rhs: FixVec2) {
        *self = *self + rhs;
    }
}

impl Sub<FixVec2> for FixVec2 {
    type Output = FixVec2;

    fn sub(self, rhs: FixVec2) -> Self::Output {
        FixVec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}
impl SubAssign<FixVec2> for FixVec2 {
    fn sub_assign(&mut self, rhs: FixVec2) {
        *self = *self - rhs;
    }
}

impl Add<Fix> for FixVec2 {
    type Output = FixVec2;

    fn add(self, rhs: Fix) -> Self::Output {
        FixVec2 { x: self.x + rhs, y: self.y + rhs }
    }
}
impl Sub<Fix> for FixVec2 {
    type Output = FixVec2;

    fn sub(self, rhs: Fix) -> Self::Output {
        FixVec2 { x: self.x - rhs, y: self.y - rhs }
    }
}

impl Mul<Fix> for FixVec2 {
    type Output = FixVec2;

    fn mul(self, rhs: Fix) -> Self::Output {
        rhs * self
    }
}
impl Mul<FixVec2> for Fix {
    type Output = FixVec2;

    fn mul(self, rhs: FixVec2) -> Self::Output {
        FixVec2 { x: self * rhs.x, y: self * rhs.y }
    }
}
impl MulAssign<Fix> for FixVec2 {
    fn mul_assign(&mut self, rhs: Fix) {
        *self = *self * rhs;
    }
}
impl Mul<i32> for FixVec2 {
    type Output = FixVec2;

    fn mul(self, rhs: i32) -> Self::Output {
        FixVec2 { x: self.x * rhs, y: self.y * rhs }
    }
}
impl Mul<FixVec2> for i32 {
    type Output = FixVec2;

    fn mul(self, rhs: FixVec2) -> Self::Output {
        rhs * self
    }
}

impl Div<Fix> for FixVec2 {
    type Output = FixVec2;

    fn div(self, rhs: Fix) -> Self::Output {
        FixVec2 { x: self.x / rhs, y: self.y / rhs }
    }
}
impl DivAssign<Fix> for FixVec2 {
    fn div_assign(&mut self, rhs: Fix) {
        *self = *self / rhs;
    }
}
impl Div<i32> for FixVec2 {
    type Output = FixVec2;

    fn div(self, rhs: i32) -> Self::Output {
        FixVec2 { x: self.x / rhs, y: self.y / rhs }
    }
}

impl Neg for FixVec2 {
    type Output = FixVec2;

    fn neg(self) -> Self::Output {
        FixVec2 { x: -self.x, y: -self.y }
    }
}

impl Sum<FixVec2> for FixVec2 {
    fn sum<I: Iterator<Item = FixVec2>>(iter: I) -> Self {
        iter.fold(FixVec2::ZERO, FixVec2::add)
    }
}

/// A 3D vector of [`Fix`] components.
///
/// The 3D sibling of [`FixVec2`]; same exact-equality and degenerate-input
/// conventions.
#[derive(
    Default,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct FixVec3 {
    pub x: Fix,
    pub y: Fix,
    pub z: Fix,
}

impl FixVec3 {
    pub const ZERO: FixVec3 = FixVec3 { x: Fix::ZERO, y: Fix::ZERO, z: Fix::ZERO };
    pub const ONE: FixVec3 = FixVec3 { x: Fix::ONE, y: Fix::ONE, z: Fix::ONE };
    pub const UNIT_X: FixVec3 = FixVec3 { x: Fix::ONE, y: Fix::ZERO, z: Fix::ZERO };
    pub const UNIT_Y: FixVec3 = FixVec3 { x: Fix::ZERO, y: Fix::ONE, z: Fix::ZERO };
    pub const UNIT_Z: FixVec3 = FixVec3 { x: Fix::ZERO, y: Fix::ZERO, z: Fix::ONE };

    #[must_use]
    pub const fn new(x: Fix, y: Fix, z: Fix) -> FixVec3 {
        FixVec3 { x, y, z }
    }

    #[must_use]
    pub const fn splat(v: Fix) -> FixVec3 {
        FixVec3 { x: v, y: v, z: v }
    }

    #[must_use]
    pub const fn with_x(self, x: Fix) -> FixVec3 {
        FixVec3 { x, y: self.y, z: self.z }
    }

    #[must_use]
    pub const fn with_y(self, y: Fix) -> FixVec3 {
        FixVec3 { x: self.x, y, z: self.z }
    }

    #[must_use]
    pub const fn with_z(self, z: Fix) -> FixVec3 {
        FixVec3 { x: self.x, y: self.y, z }
    }

    /// Drops the z component.
    #[must_use]
    pub const fn truncate(self) -> FixVec2 {
        FixVec2 { x: self.x, y: self.y }
    }

    /// Projects a point on the 3D ground plane back to 2D: `(x, y, z)`
    /// becomes `(x, z)`. Inverse of [`FixVec2::on_xz_plane`].
    #[must_use]
    pub const fn xz(self) -> FixVec2 {
        FixVec2 { x: self.x, y: self.z }
    }

    #[must_use]
    pub fn dot(self, rhs: FixVec3) -> Fix {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub fn cross(self, rhs: FixVec3) -> FixVec3 {
        FixVec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Squared magnitude; see [`FixVec2::sqr_magnitude`].
    #[must_use]
    pub fn sqr_magnitude(self) -> Fix {
        if self == FixVec3::ZERO {
            return Fix::ZERO;
        }
        self.dot(self)
    }

    /// Magnitude via the widened raw representation; see
    /// [`FixVec2::magnitude`].
    #[must_use]
    pub fn magnitude(self) -> Fix {
        if self == FixVec3::ZERO {
            return Fix::ZERO;
        }
        let n = raw_sqr_sum3(self);
        Fix::from_raw(math::sqrt_u64_rounded(n).min(i32::MAX as u64) as i32)
    }

    /// Unit vector in the same direction, or [`FixVec3::ZERO`] for the zero
    /// vector.
    #[must_use]
    pub fn normalized(self) -> FixVec3 {
        self.normalized_with_magnitude().0
    }

    /// Like [`normalized`](FixVec3::normalized), additionally returning the
    /// pre-normalization magnitude.
    #[must_use]
    pub fn normalized_with_magnitude(self) -> (FixVec3, Fix) {
        if self == FixVec3::ZERO {
            return (FixVec3::ZERO, Fix::ZERO);
        }
        let m = self.magnitude();
        if m == Fix::ZERO {
            // Magnitude too small for fixed precision; approximate with a
            // zero-length vector.
            warn!("FixVec3::normalized(): magnitude underflow: {}", self);
            return (FixVec3::ZERO, Fix::ZERO);
        }
        (self / m, m)
    }

    /// See [`FixVec2::clamp_magnitude`].
    #[must_use]
    pub fn clamp_magnitude(self, max_length: Fix) -> FixVec3 {
        if self.sqr_magnitude() > max_length * max_length {
            self.normalized() * max_length
        } else {
            self
        }
    }

    /// See [`FixVec2::move_towards`].
    #[must_use]
    pub fn move_towards(self, target: FixVec3, max_distance_delta: Fix) -> FixVec3 {
        let delta = target - self;
        let magnitude = delta.magnitude();
        if magnitude > max_distance_delta && magnitude != Fix::ZERO {
            self + delta / magnitude * max_distance_delta
        } else {
            target
        }
    }

    /// Linear interpolation from `self` to `to`; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, to: FixVec3, t: Fix) -> FixVec3 {
        let t = t.clamp(Fix::ZERO, Fix::ONE);
        FixVec3 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            z: self.z + (to.z - self.z) * t,
        }
    }

    /// Advances `current` towards `target` with a critically-damped spring,
    /// returning the new position and velocity as a pair (no in/out
    /// parameter aliasing).
    ///
    /// `smooth_time` is clamped to at least 1/10000 so the `2/smooth_time`
    /// stiffness term cannot blow up; the implied velocity is clamped so the
    /// step never moves further than `max_speed * smooth_time`; and if the
    /// integration step would cross the target, the result snaps onto the
    /// target and the velocity is recomputed from the snap. The damping
    /// polynomial `1/(1 + x + 0.48 x^2 + 0.235 x^3)` uses fixed rational
    /// coefficients; see the constants at the top of this module.
    #[must_use]
    pub fn smooth_damp(
        current: FixVec3,
        target: FixVec3,
        velocity: FixVec3,
        smooth_time: Fix,
        max_speed: Fix,
        delta_time: Fix,
    ) -> (FixVec3, FixVec3) {
        let smooth_time = Fix::ratio(MIN_SMOOTH_TIME.0, MIN_SMOOTH_TIME.1).max(smooth_time);
        let omega = Fix::from_int(2) / smooth_time;
        let x = omega * delta_time;
        let d = Fix::ONE
            / (Fix::ONE
                + x
                + Fix::ratio(SMOOTH_DAMP_C2.0, SMOOTH_DAMP_C2.1) * x * x
                + Fix::ratio(SMOOTH_DAMP_C3.0, SMOOTH_DAMP_C3.1) * x * x * x);
        let original_target = target;
        let max_length = max_speed * smooth_time;
        let change = (current - target).clamp_magnitude(max_length);
        let target = current - change;
        let temp = (velocity + change * omega) * delta_time;
        let mut new_velocity = (velocity - temp * omega) * d;
        let mut out = target + (change + temp) * d;
        if (original_target - current).dot(out - original_target) > Fix::ZERO {
            out = original_target;
            new_velocity = (out - original_target) / delta_time;
        }
        (out, new_velocity)
    }
}

fn raw_sqr_sum3(v: FixVec3) -> u64 {
    let x = v.x.raw() as i64;
    let y = v.y.raw() as i64;
    let z = v.z.raw() as i64;
    (x * x) as u64 + (y * y) as u64 + (z * z) as u64
}

impl Zero for FixVec3 {
    fn zero() -> Self {
        FixVec3::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == FixVec3::ZERO
    }
}

impl From<FixVec2> for FixVec3 {
    fn from(value: FixVec2) -> Self {
        value.extend()
    }
}

impl From<[Fix; 3]> for FixVec3 {
    fn from(value: [Fix; 3]) -> Self {
        FixVec3 { x: value[0], y: value[1], z: value[2] }
    }
}

impl From<FixVec3> for [Fix; 3] {
    fn from(value: FixVec3) -> Self {
        [value.x, value.y, value.z]
    }
}

impl fmt::Display for FixVec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add<FixVec3> for FixVec3 {
    type Output = FixVec3;

    fn add(self, rhs: FixVec3) -> Self::Output {
        FixVec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}
impl AddAssign<FixVec3> for FixVec3 {
    fn add_assign(&mut self, rhs: FixVec3) {
        *self = *self + rhs;
    }
}

impl Sub<FixVec3> for FixVec3 {
    type Output = FixVec3;

    fn sub(self, rhs: FixVec3) -> Self::Output {
        FixVec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}
impl SubAssign<FixVec3> for FixVec3 {
    fn sub_assign(&mut self, rhs: FixVec3) {
        *self = *self - rhs;
    }
}

impl Add<Fix> for FixVec3 {
    type Output = FixVec3;

    fn add(self, rhs: Fix) -> Self::Output {
        FixVec3 { x: self.x + rhs, y: self.y + rhs, z: self.z + rhs }
    }
}
impl Sub<Fix> for FixVec3 {
    type Output = FixVec3;

    fn sub(self, rhs: Fix) -> Self::Output {
        FixVec3 { x: self.x - rhs, y: self.y - rhs, z: self.z - rhs }
    }
}

impl Mul<Fix> for FixVec3 {
    type Output = FixVec3;

    fn mul(self, rhs: Fix) -> Self::Output {
        rhs * self
    }
}
impl Mul<FixVec3> for Fix {
    type Output = FixVec3;

    fn mul(self, rhs: FixVec3) -> Self::Output {
        FixVec3 { x: self * rhs.x, y: self * rhs.y, z: self * rhs.z }
    }
}
impl MulAssign<Fix> for FixVec3 {
    fn mul_assign(&mut self, rhs: Fix) {
        *self = *self * rhs;
    }
}
impl Mul<i32> for FixVec3 {
    type Output = FixVec3;

    fn mul(self, rhs: i32) -> Self::Output {
        FixVec3 { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}
impl Mul<FixVec3> for i32 {
    type Output = FixVec3;

    fn mul(self, rhs: FixVec3) -> Self::Output {
        rhs * self
    }
}

impl Div<Fix> for FixVec3 {
    type Output = FixVec3;

    fn div(self, rhs: Fix) -> Self::Output {
        FixVec3 { x: self.x / rhs, y: self.y / rhs, z: self.z / rhs }
    }
}
impl DivAssign<Fix> for FixVec3 {
    fn div_assign(&mut self, rhs: Fix) {
        *self = *self / rhs;
    }
}
impl Div<i32> for FixVec3 {
    type Output = FixVec3;

    fn div(self, rhs: i32) -> Self::Output {
        FixVec3 { x: self.x / rhs, y: self.y / rhs, z: self.z / rhs }
    }
}

impl Neg for FixVec3 {
    type Output = FixVec3;

    fn neg(self) -> Self::Output {
        FixVec3 { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl Sum<FixVec3> for FixVec3 {
    fn sum<I: Iterator<Item = FixVec3>>(iter: I) -> Self {
        iter.fold(FixVec3::ZERO, FixVec3::add)
    }
}
