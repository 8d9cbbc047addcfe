//! Deterministic fixed-point math and geometry for lockstep simulation.
//!
//! Every operation in this crate is a pure function over Q16.16 fixed-point
//! values and produces bit-identical results on every platform: there is no
//! floating point anywhere in the core, no global state, and no dependence on
//! thread scheduling or wall-clock time. This is the property lockstep
//! networking and replay verification need; `f32`/`f64` cannot provide it
//! because their rounding is platform- and optimisation-dependent.
//!
//! Layering, bottom up:
//! - [`fix`]: the scalar type [`Fix`](fix::Fix) and its saturating arithmetic;
//! - [`math`]: integer square root, trigonometry and power functions;
//! - [`linalg`]: [`FixVec2`](linalg::FixVec2) and [`FixVec3`](linalg::FixVec3);
//! - [`quaternion`]: rotations and spherical interpolation;
//! - [`geometry`]: axis-aligned [`Bounds`](geometry::Bounds),
//!   [`Rect`](geometry::Rect) and [`Ray`](geometry::Ray) with ray-box
//!   intersection;
//! - [`float`]: `f32` conversions, for use at presentation boundaries only.

mod assert;

pub mod fix;
pub mod float;
pub mod geometry;
pub mod linalg;
pub mod math;
pub mod prelude;
pub mod quaternion;
