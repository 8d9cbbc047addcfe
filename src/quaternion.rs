#[allow(unused_imports)]
use crate::prelude::*;
#[allow(unused_imports)]
use crate::assert::*;

use crate::fix::Fix;
use crate::linalg::FixVec3;
use crate::math;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, Mul, Neg, Sub},
};

/// Below this cosine-of-half-angle the slerp arc is wide enough to use the
/// trigonometric blend; above it the rotations are so close that the arc
/// degenerates and plain linear blending is both safe and accurate.
const SLERP_LERP_THRESHOLD: (i32, i32) = (99, 100);

/// A rotation quaternion over [`Fix`], vector part first.
///
/// Multiplication composes rotations (Hamilton product); apply one to a
/// vector with [`rotate_vec`](FixQuat::rotate_vec). As everywhere in this
/// crate, identical inputs produce bit-identical results on every platform.
///
/// # Examples
///
/// ```
/// use fixgeom::prelude::*;
///
/// let q = FixQuat::from_axis_angle(FixVec3::UNIT_Y, Fix::from_int(90));
/// assert_eq!(q.rotate_vec(FixVec3::UNIT_X), -FixVec3::UNIT_Z);
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixQuat {
    pub xyz: FixVec3,
    pub w: Fix,
}

impl FixQuat {
    pub const IDENTITY: FixQuat = FixQuat { xyz: FixVec3::ZERO, w: Fix::ONE };

    #[must_use]
    pub const fn new(xyz: FixVec3, w: Fix) -> FixQuat {
        FixQuat { xyz, w }
    }

    #[must_use]
    pub const fn from_xyzw(x: Fix, y: Fix, z: Fix, w: Fix) -> FixQuat {
        FixQuat { xyz: FixVec3::new(x, y, z), w }
    }

    /// The rotation of `angle` degrees about `axis` (right-handed). The axis
    /// need not be unit length; a zero axis gives the identity.
    #[must_use]
    pub fn from_axis_angle(axis: FixVec3, angle: Fix) -> FixQuat {
        if axis.sqr_magnitude() == Fix::ZERO {
            return FixQuat::IDENTITY;
        }
        let half = angle / 2;
        let axis = axis.normalized() * math::sin(half);
        FixQuat { xyz: axis, w: math::cos(half) }.normalized()
    }

    /// Extracts the rotation from a rotation matrix (possibly carrying a
    /// uniform scale). Component magnitudes come from the diagonal, signs
    /// from the off-diagonal differences.
    #[must_use]
    pub fn from_rotation_matrix(m: &Mat3) -> FixQuat {
        let scale = math::pow(m.determinant(), Fix::ratio(1, 3));
        let half = |v: Fix| math::sqrt(v.max(Fix::ZERO)) / 2;
        let w = half(scale + m.m11 + m.m22 + m.m33);
        let mut x = half(scale + m.m11 - m.m22 - m.m33);
        let mut y = half(scale - m.m11 + m.m22 - m.m33);
        let mut z = half(scale - m.m11 - m.m22 + m.m33);
        if m.m32 - m.m23 < Fix::ZERO {
            x = -x;
        }
        if m.m13 - m.m31 < Fix::ZERO {
            y = -y;
        }
        if m.m21 - m.m12 < Fix::ZERO {
            z = -z;
        }
        FixQuat::from_xyzw(x, y, z, w)
    }

    #[must_use]
    pub fn sqr_length(self) -> Fix {
        self.xyz.sqr_magnitude() + self.w * self.w
    }

    #[must_use]
    pub fn length(self) -> Fix {
        math::sqrt(self.sqr_length())
    }

    #[must_use]
    pub fn conjugate(self) -> FixQuat {
        FixQuat { xyz: -self.xyz, w: self.w }
    }

    /// The inverse rotation. Zero quaternions have no inverse and are
    /// returned unchanged.
    #[must_use]
    pub fn invert(self) -> FixQuat {
        let sqr_length = self.sqr_length();
        if sqr_length == Fix::ZERO {
            return self;
        }
        let i = Fix::ONE / sqr_length;
        FixQuat { xyz: self.xyz * -i, w: self.w * i }
    }

    /// Scales to unit length.
    ///
    /// # Panics
    ///
    /// Zero quaternions cannot be normalized; the division panics.
    #[must_use]
    pub fn normalized(self) -> FixQuat {
        let scale = Fix::ONE / self.length();
        self * scale
    }

    /// Applies this rotation to a vector via `q * (v, 0) * q†`.
    #[must_use]
    pub fn rotate_vec(self, v: FixVec3) -> FixVec3 {
        (self * FixQuat::new(v, Fix::ZERO) * self.conjugate()).xyz
    }

    /// Spherical linear interpolation from `from` to `to` along the shorter
    /// arc. Degenerate (zero-length) endpoints fall back to the other
    /// endpoint, or to the identity if both are degenerate; nearly-parallel
    /// endpoints blend linearly.
    #[must_use]
    pub fn slerp(from: FixQuat, to: FixQuat, t: Fix) -> FixQuat {
        if from.sqr_length() == Fix::ZERO {
            if to.sqr_length() == Fix::ZERO {
                return FixQuat::IDENTITY;
            }
            return to;
        }
        if to.sqr_length() == Fix::ZERO {
            return from;
        }

        let mut cos_half_angle = from.w * to.w + from.xyz.dot(to.xyz);
        if cos_half_angle >= Fix::ONE || cos_half_angle <= -Fix::ONE {
            // Same orientation up to sign; any blend returns the endpoint.
            return from;
        }
        let mut to = to;
        if cos_half_angle < Fix::ZERO {
            // Take the shorter arc.
            to = -to;
            cos_half_angle = -cos_half_angle;
        }

        let (blend_from, blend_to) =
            if cos_half_angle < Fix::ratio(SLERP_LERP_THRESHOLD.0, SLERP_LERP_THRESHOLD.1) {
                let half_angle = math::acos(cos_half_angle);
                let one_over_sin = Fix::ONE / math::sin(half_angle);
                (
                    math::sin(half_angle * (Fix::ONE - t)) * one_over_sin,
                    math::sin(half_angle * t) * one_over_sin,
                )
            } else {
                (Fix::ONE - t, t)
            };

        let result = from * blend_from + to * blend_to;
        if result.sqr_length() > Fix::ZERO {
            result.normalized()
        } else {
            FixQuat::IDENTITY
        }
    }
}

impl fmt::Display for FixQuat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "quat({}, {}, {}; {})",
            self.xyz.x, self.xyz.y, self.xyz.z, self.w
        )
    }
}

impl Add<FixQuat> for FixQuat {
    type Output = FixQuat;

    fn add(self, rhs: FixQuat) -> Self::Output {
        FixQuat { xyz: self.xyz + rhs.xyz, w: self.w + rhs.w }
    }
}

impl Sub<FixQuat> for FixQuat {
    type Output = FixQuat;

    fn sub(self, rhs: FixQuat) -> Self::Output {
        FixQuat { xyz: self.xyz - rhs.xyz, w: self.w - rhs.w }
    }
}

impl Mul<FixQuat> for FixQuat {
    type Output = FixQuat;

    /// Hamilton product; `a * b` means "rotate by `b`, then by `a`".
    fn mul(self, rhs: FixQuat) -> Self::Output {
        FixQuat {
            xyz: rhs.w * self.xyz + self.w * rhs.xyz + self.xyz.cross(rhs.xyz),
            w: self.w * rhs.w - self.xyz.dot(rhs.xyz),
        }
    }
}

impl Mul<Fix> for FixQuat {
    type Output = FixQuat;

    fn mul(self, rhs: Fix) -> Self::Output {
        FixQuat { xyz: self.xyz * rhs, w: self.w * rhs }
    }
}
impl Mul<FixQuat> for Fix {
    type Output = FixQuat;

    fn mul(self, rhs: FixQuat) -> Self::Output {
        rhs * self
    }
}

impl Neg for FixQuat {
    type Output = FixQuat;

    fn neg(self) -> Self::Output {
        FixQuat { xyz: -self.xyz, w: -self.w }
    }
}

/// A row-major 3x3 matrix, used as a rotation-matrix source for
/// [`FixQuat::from_rotation_matrix`].
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mat3 {
    pub m11: Fix,
    pub m12: Fix,
    pub m13: Fix,
    pub m21: Fix,
    pub m22: Fix,
    pub m23: Fix,
    pub m31: Fix,
    pub m32: Fix,
    pub m33: Fix,
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m11: Fix::ONE,
        m12: Fix::ZERO,
        m13: Fix::ZERO,
        m21: Fix::ZERO,
        m22: Fix::ONE,
        m23: Fix::ZERO,
        m31: Fix::ZERO,
        m32: Fix::ZERO,
        m33: Fix::ONE,
    };

    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: Fix,
        m12: Fix,
        m13: Fix,
        m21: Fix,
        m22: Fix,
        m23: Fix,
        m31: Fix,
        m32: Fix,
        m33: Fix,
    ) -> Mat3 {
        Mat3 { m11, m12, m13, m21, m22, m23, m31, m32, m33 }
    }

    #[must_use]
    pub fn determinant(&self) -> Fix {
        self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            - self.m12 * (self.m21 * self.m33 - self.m23 * self.m31)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31)
    }
}
