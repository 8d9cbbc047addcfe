//! Convenience re-exports for downstream simulation code.

#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    fix::Fix,
    geometry::{Bounds, Ray, Rect},
    linalg::{FixVec2, FixVec3},
    math,
    quaternion::{FixQuat, Mat3},
};
