//! Numeric representation contract.
//!
//! A [`Quantity`](crate::Quantity) stores its payload in any host numeric
//! type implementing [`Representation`]. The trait captures exactly what the
//! conversion engine needs to know: whether the type is floating-point
//! (which decides the truncation policy), how to widen it for overflow-free
//! intermediate arithmetic, and how to narrow results back with a range
//! check.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

/// A numeric type usable as a quantity payload.
///
/// Implementations are provided for the primitive integer and floating-point
/// types. The `MIN`/`MAX`/`ZERO`/`ONE` constants back the static constructors
/// of [`Quantity`](crate::Quantity).
pub trait Representation:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    /// Whether values are floating-point. Floating targets accept any unit
    /// conversion implicitly; integral targets reject truncating ones.
    const IS_FLOATING: bool;

    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;
    /// The smallest representable value.
    const MIN: Self;
    /// The largest representable value.
    const MAX: Self;

    /// Widens to the intermediate integer type used by exact conversions.
    ///
    /// Only called on integral representations; floating types implement it
    /// by truncation for trait completeness.
    fn to_i128(self) -> i128;

    /// Narrows from the widened intermediate with a range check.
    fn checked_from_i128(value: i128) -> Option<Self>;

    /// Widens to the intermediate floating type used by inexact conversions.
    fn to_f64(self) -> f64;

    /// Narrows from the floating intermediate, truncating toward zero for
    /// integral targets.
    fn from_f64_truncating(value: f64) -> Self;
}

macro_rules! impl_repr_int {
    ($($t:ty),*) => {$(
        impl Representation for $t {
            const IS_FLOATING: bool = false;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            fn to_i128(self) -> i128 {
                self as i128
            }

            fn checked_from_i128(value: i128) -> Option<Self> {
                <$t>::try_from(value).ok()
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64_truncating(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

macro_rules! impl_repr_float {
    ($($t:ty),*) => {$(
        impl Representation for $t {
            const IS_FLOATING: bool = true;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            fn to_i128(self) -> i128 {
                self as i128
            }

            fn checked_from_i128(value: i128) -> Option<Self> {
                Some(value as $t)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64_truncating(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_repr_int!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_repr_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_flag_matches_type() {
        assert!(f64::IS_FLOATING);
        assert!(f32::IS_FLOATING);
        assert!(!i64::IS_FLOATING);
        assert!(!u32::IS_FLOATING);
    }

    #[test]
    fn narrowing_is_range_checked() {
        assert_eq!(i32::checked_from_i128(42), Some(42));
        assert_eq!(i32::checked_from_i128(i128::from(i64::MAX)), None);
        assert_eq!(u32::checked_from_i128(-1), None);
    }

    #[test]
    fn float_narrowing_truncates_toward_zero() {
        assert_eq!(i64::from_f64_truncating(2.9), 2);
        assert_eq!(i64::from_f64_truncating(-2.9), -2);
    }
}
