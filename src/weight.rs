//! Numeric policy for edge weights.
//!
//! Every addition on a path weight is checked. When a sum leaves the range of
//! the weight type the direction matters: falling below the minimum can only
//! come from a walk that loops a negative cycle (the type is assumed wide
//! enough for `n * max|w|`), while rising above the maximum means the type was
//! chosen too narrow for the graph.

use std::fmt::{Debug, Display};

use serde::Serialize;

/// Direction in which a checked operation left the representable range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Overflow {
    Below,
    Above,
}

pub trait Weight: Copy + PartialOrd + Debug + Display + Serialize + Send + Sync + 'static {
    const ZERO: Self;

    fn add_checked(self, rhs: Self) -> Result<Self, Overflow>;

    fn sub_checked(self, rhs: Self) -> Result<Self, Overflow>;

    /// Edge weights must be finite; integer types always are.
    fn is_finite_weight(self) -> bool {
        true
    }

    #[inline]
    fn is_negative(self) -> bool {
        self < Self::ZERO
    }
}

macro_rules! int_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;

            #[inline]
            fn add_checked(self, rhs: Self) -> Result<Self, Overflow> {
                // a + b can only overflow when both share a sign
                self.checked_add(rhs).ok_or(if rhs < 0 { Overflow::Below } else { Overflow::Above })
            }

            #[inline]
            fn sub_checked(self, rhs: Self) -> Result<Self, Overflow> {
                self.checked_sub(rhs).ok_or(if rhs > 0 { Overflow::Below } else { Overflow::Above })
            }
        }
    )*};
}

macro_rules! float_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0.0;

            #[inline]
            fn add_checked(self, rhs: Self) -> Result<Self, Overflow> {
                classify_float(self + rhs)
            }

            #[inline]
            fn sub_checked(self, rhs: Self) -> Result<Self, Overflow> {
                classify_float(self - rhs)
            }

            #[inline]
            fn is_finite_weight(self) -> bool {
                self.is_finite()
            }
        }
    )*};
}

#[inline]
fn classify_float<T: Into<f64> + Copy>(v: T) -> Result<T, Overflow> {
    let wide: f64 = v.into();
    if wide.is_finite() {
        Ok(v)
    } else if wide < 0.0 {
        Err(Overflow::Below)
    } else {
        Err(Overflow::Above)
    }
}

int_weight!(i32, i64);
float_weight!(f32, f64);
