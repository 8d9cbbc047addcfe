//! Conversions at the floating-point boundary.
//!
//! Floats exist only here: rendering, asset import and debug output may
//! speak `f32`, but nothing inside the deterministic core does. Conversions
//! in are rounded to the nearest representable value; non-finite inputs are
//! handled explicitly rather than being allowed to poison the simulation.

#[allow(unused_imports)]
use crate::prelude::*;

use crate::fix::{Fix, FRACTIONAL_BITS};
use crate::geometry::{Bounds, Ray, Rect};
use crate::linalg::{FixVec2, FixVec3};
use crate::quaternion::FixQuat;

const SCALE: f32 = (1 << FRACTIONAL_BITS) as f32;

impl Fix {
    #[must_use]
    pub fn to_f32(self) -> f32 {
        self.raw() as f32 / SCALE
    }

    /// Nearest representable value. Infinities saturate; NaN maps to zero
    /// with a warning, since there is no meaningful nearest value.
    #[must_use]
    pub fn from_f32(value: f32) -> Fix {
        if value.is_nan() {
            warn!("Fix::from_f32(): NaN input, substituting zero");
            return Fix::ZERO;
        }
        let scaled = (value * SCALE).round();
        if scaled >= i32::MAX as f32 {
            Fix::MAX
        } else if scaled <= i32::MIN as f32 {
            Fix::MIN
        } else {
            Fix::from_raw(scaled as i32)
        }
    }

    /// Strict variant of [`from_f32`](Fix::from_f32) for validating
    /// untrusted input: non-finite values are errors rather than being
    /// mapped to a substitute.
    pub fn try_from_f32(value: f32) -> Result<Fix> {
        if !value.is_finite() {
            bail!("cannot convert {value} to a fixed-point value");
        }
        Ok(Fix::from_f32(value))
    }
}

impl FixVec2 {
    #[must_use]
    pub fn to_f32(self) -> [f32; 2] {
        [self.x.to_f32(), self.y.to_f32()]
    }

    #[must_use]
    pub fn from_f32(value: [f32; 2]) -> FixVec2 {
        FixVec2::new(Fix::from_f32(value[0]), Fix::from_f32(value[1]))
    }
}

impl FixVec3 {
    #[must_use]
    pub fn to_f32(self) -> [f32; 3] {
        [self.x.to_f32(), self.y.to_f32(), self.z.to_f32()]
    }

    #[must_use]
    pub fn from_f32(value: [f32; 3]) -> FixVec3 {
        FixVec3::new(
            Fix::from_f32(value[0]),
            Fix::from_f32(value[1]),
            Fix::from_f32(value[2]),
        )
    }
}

impl FixQuat {
    #[must_use]
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.xyz.x.to_f32(),
            self.xyz.y.to_f32(),
            self.xyz.z.to_f32(),
            self.w.to_f32(),
        ]
    }

    #[must_use]
    pub fn from_f32(value: [f32; 4]) -> FixQuat {
        FixQuat::from_xyzw(
            Fix::from_f32(value[0]),
            Fix::from_f32(value[1]),
            Fix::from_f32(value[2]),
            Fix::from_f32(value[3]),
        )
    }
}

impl Bounds {
    #[must_use]
    pub fn to_f32(self) -> ([f32; 3], [f32; 3]) {
        (self.center().to_f32(), self.size().to_f32())
    }

    #[must_use]
    pub fn from_f32(center: [f32; 3], size: [f32; 3]) -> Bounds {
        Bounds::new(FixVec3::from_f32(center), FixVec3::from_f32(size))
    }
}

impl Rect {
    #[must_use]
    pub fn to_f32(self) -> ([f32; 2], [f32; 2]) {
        (self.position().to_f32(), self.size().to_f32())
    }

    #[must_use]
    pub fn from_f32(position: [f32; 2], size: [f32; 2]) -> Rect {
        Rect::new(FixVec2::from_f32(position), FixVec2::from_f32(size))
    }
}

impl Ray {
    #[must_use]
    pub fn to_f32(self) -> ([f32; 3], [f32; 3]) {
        (self.origin().to_f32(), self.direction().to_f32())
    }

    #[must_use]
    pub fn from_f32(origin: [f32; 3], direction: [f32; 3]) -> Ray {
        Ray::new(FixVec3::from_f32(origin), FixVec3::from_f32(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Scalar conversions ====================

    #[test]
    fn float_integer_values_are_exact() {
        assert_eq!(Fix::from_f32(0.0), Fix::ZERO);
        assert_eq!(Fix::from_f32(1.0), Fix::ONE);
        assert_eq!(Fix::from_f32(-3.0), Fix::from_int(-3));
        assert_eq!(Fix::ONE.to_f32(), 1.0);
        assert_eq!(Fix::from_int(-3).to_f32(), -3.0);
    }

    #[test]
    fn float_fractions_round_to_nearest() {
        assert_eq!(Fix::from_f32(0.5), Fix::HALF);
        assert_eq!(Fix::from_f32(-0.5), -Fix::HALF);
        // 0.1 is not representable; nearest raw value is 6554.
        assert_eq!(Fix::from_f32(0.1), Fix::from_raw(6554));
    }

    #[test]
    fn float_round_trip_within_one_ulp() {
        for v in [0.0f32, 1.5, -0.25, 3.14159, -123.456, 0.0001] {
            let restored = Fix::from_f32(v).to_f32();
            assert!(
                (restored - v).abs() <= 1.0 / 65536.0,
                "{v} round-tripped to {restored}"
            );
        }
    }

    #[test]
    fn float_fix_round_trip_is_exact_for_small_raw() {
        // Raw values within f32's 24-bit mantissa survive unchanged.
        for raw in [0, 1, -1, 6554, -98304, 1 << 20, -(1 << 23)] {
            let fix = Fix::from_raw(raw);
            assert_eq!(Fix::from_f32(fix.to_f32()), fix);
        }
    }

    #[test]
    fn float_non_finite_inputs() {
        assert_eq!(Fix::from_f32(f32::NAN), Fix::ZERO);
        assert_eq!(Fix::from_f32(f32::INFINITY), Fix::MAX);
        assert_eq!(Fix::from_f32(f32::NEG_INFINITY), Fix::MIN);
        assert_eq!(Fix::from_f32(1e10), Fix::MAX);
        assert_eq!(Fix::from_f32(-1e10), Fix::MIN);
    }

    #[test]
    fn float_try_from_rejects_non_finite() {
        assert!(Fix::try_from_f32(f32::NAN).is_err());
        assert!(Fix::try_from_f32(f32::INFINITY).is_err());
        assert!(Fix::try_from_f32(f32::NEG_INFINITY).is_err());
        assert_eq!(Fix::try_from_f32(2.5).unwrap(), Fix::from_int(2) + Fix::HALF);
    }

    // ==================== Composite conversions ====================

    #[test]
    fn float_vector_conversions() {
        let v = FixVec3::from_f32([1.0, -2.5, 0.0]);
        assert_eq!(
            v,
            FixVec3::new(Fix::ONE, -Fix::from_int(2) - Fix::HALF, Fix::ZERO)
        );
        assert_eq!(v.to_f32(), [1.0, -2.5, 0.0]);
        assert_eq!(FixVec2::from_f32([0.5, 2.0]).to_f32(), [0.5, 2.0]);
    }

    #[test]
    fn float_quat_conversion_preserves_layout() {
        let q = FixQuat::from_f32([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(q, FixQuat::IDENTITY);
        assert_eq!(q.to_f32(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn float_shape_conversions() {
        let b = Bounds::from_f32([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        assert_eq!(b.extents(), FixVec3::splat(Fix::ONE));
        let r = Rect::from_f32([1.0, 2.0], [3.0, 4.0]);
        assert_eq!(r.max(), FixVec2::new(Fix::from_int(4), Fix::from_int(6)));
        let ray = Ray::from_f32([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(ray.direction(), FixVec3::UNIT_X);
    }
}
