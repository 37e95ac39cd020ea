use num_traits::{Float, FloatConst, NumAssign};
use std::fmt::{Debug, Display};
use std::iter::{Product, Sum};

/// The float precision of the simulation.
pub trait Precision:
    Default + NumAssign + Float + FloatConst + Sum + Send + Sync + Display + Product + Debug
{
}

impl Precision for f64 {}

impl Precision for f32 {}

/// Convert an `f64` constant into the working precision. Values which cannot be represented
/// become NaN and propagate through the arithmetic.
#[inline]
pub fn cast<P: Precision>(x: f64) -> P {
    P::from(x).unwrap_or_else(P::nan)
}

/// Convert a count or dimension into the working precision.
#[inline]
pub fn cast_usize<P: Precision>(x: usize) -> P {
    P::from(x).unwrap_or_else(P::nan)
}
