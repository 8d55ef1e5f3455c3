//! The conversion engine.
//!
//! Applies an exact [`Magnitude`] unit ratio to a stored numeric value. The
//! ratio is split into an integer numerator, an integer denominator and an
//! irrational residue; each part is evaluated in a widened intermediate type
//! and the product is narrowed back with a range check, so a conversion never
//! silently overflows and only loses precision when the caller explicitly
//! asked for a truncating cast.

use crate::error::{Error, Result};
use crate::magnitude::Magnitude;
use crate::repr::Representation;

/// Whether a conversion was requested implicitly (ordinary construction or
/// arithmetic) or through an explicit cast entry point.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConversionKind {
    /// Rejects any value-truncating conversion into an integral target.
    Implicit,
    /// Permits truncation toward zero.
    Explicit,
}

/// The split of a unit ratio used to order the arithmetic.
struct SplitRatio {
    num: Magnitude,
    den: Magnitude,
    irrational: Magnitude,
}

impl SplitRatio {
    fn of(ratio: &Magnitude) -> Self {
        let num = ratio.numerator();
        let den = ratio.denominator();
        let irrational = &(ratio * &den) / &num;
        SplitRatio { num, den, irrational }
    }

    /// True when multiplying an integer by this ratio always yields an
    /// integer, i.e. the ratio is a harmonic (exact integer) multiple.
    fn is_harmonic(&self) -> bool {
        self.den.is_one() && self.irrational.is_one()
    }
}

/// Converts `value` across a unit ratio, enforcing the truncation policy.
///
/// Floating targets always convert implicitly. Integral targets convert
/// implicitly only across harmonic ratios; anything else requires
/// [`ConversionKind::Explicit`] and truncates toward zero, or fails with
/// [`Error::TruncatingConversionRejected`]. `target` names the destination
/// unit for the error message.
pub fn convert_value<R: Representation>(
    value: R,
    ratio: &Magnitude,
    kind: ConversionKind,
    target: &str,
) -> Result<R> {
    let split = SplitRatio::of(ratio);
    if !R::IS_FLOATING && !split.is_harmonic() && kind == ConversionKind::Implicit {
        return Err(Error::TruncatingConversionRejected { target: target.to_owned() });
    }
    if R::IS_FLOATING || !split.irrational.is_one() {
        convert_floating(value, &split)
    } else {
        convert_exact(value, &split)
    }
}

/// Widened floating path: each part is evaluated separately in `f64` so the
/// rational parts stay exact as long as they fit the mantissa.
fn convert_floating<R: Representation>(value: R, split: &SplitRatio) -> Result<R> {
    let wide = value.to_f64() * split.num.value_f64() / split.den.value_f64()
        * split.irrational.value_f64();
    if R::IS_FLOATING {
        return Ok(R::from_f64_truncating(wide));
    }
    let truncated = wide.trunc();
    if !truncated.is_finite()
        || truncated < i128::MIN as f64
        || truncated >= i128::MAX as f64
    {
        return Err(Error::MagnitudeOverflow);
    }
    R::checked_from_i128(truncated as i128).ok_or(Error::MagnitudeOverflow)
}

/// Widened integer path: multiply in `i128`, divide truncating toward zero
/// (reachable only through an explicit cast when the divisor is not one), and
/// narrow with a range check.
fn convert_exact<R: Representation>(value: R, split: &SplitRatio) -> Result<R> {
    let num = split.num.checked_value_i128()?;
    let den = split.den.checked_value_i128()?;
    let wide = value.to_i128().checked_mul(num).ok_or(Error::MagnitudeOverflow)? / den;
    R::checked_from_i128(wide).ok_or(Error::MagnitudeOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::Ratio;
    use approx::assert_relative_eq;

    fn mag(n: i64) -> Magnitude {
        Magnitude::from_int(n).unwrap()
    }

    #[test]
    fn harmonic_ratios_convert_implicitly() {
        let km_to_m = mag(1000);
        assert_eq!(convert_value(2i64, &km_to_m, ConversionKind::Implicit, "m"), Ok(2000));
        assert_eq!(convert_value(2u32, &km_to_m, ConversionKind::Implicit, "m"), Ok(2000));
    }

    #[test]
    fn non_harmonic_integral_conversions_need_a_cast() {
        let m_to_km = mag(1000).invert();
        let err = convert_value(2000i64, &m_to_km, ConversionKind::Implicit, "km").unwrap_err();
        assert_eq!(err, Error::TruncatingConversionRejected { target: "km".to_owned() });
        assert_eq!(convert_value(2000i64, &m_to_km, ConversionKind::Explicit, "km"), Ok(2));
        // Truncation is toward zero.
        assert_eq!(convert_value(2999i64, &m_to_km, ConversionKind::Explicit, "km"), Ok(2));
        assert_eq!(convert_value(-2999i64, &m_to_km, ConversionKind::Explicit, "km"), Ok(-2));
    }

    #[test]
    fn floating_targets_always_convert_implicitly() {
        let m_to_km = mag(1000).invert();
        assert_eq!(convert_value(2500.0f64, &m_to_km, ConversionKind::Implicit, "km"), Ok(2.5));
    }

    #[test]
    fn irrational_ratios_go_through_the_floating_path() {
        // degree to radian: pi / 180.
        let deg_to_rad = Magnitude::pi() / mag(180);
        let rad = convert_value(90.0f64, &deg_to_rad, ConversionKind::Implicit, "rad").unwrap();
        assert_relative_eq!(rad, core::f64::consts::FRAC_PI_2, max_relative = 1e-15);
        // Integral targets still truncate, explicitly only.
        let err = convert_value(90i64, &deg_to_rad, ConversionKind::Implicit, "rad").unwrap_err();
        assert!(matches!(err, Error::TruncatingConversionRejected { .. }));
        assert_eq!(convert_value(90i64, &deg_to_rad, ConversionKind::Explicit, "rad"), Ok(1));
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let big = mag(10).pow(Ratio::from_int(18));
        let err = convert_value(i64::MAX, &big, ConversionKind::Implicit, "x").unwrap_err();
        assert_eq!(err, Error::MagnitudeOverflow);
        // Narrow target overflow is caught at the final range check.
        let err = convert_value(1000i16, &mag(1000), ConversionKind::Implicit, "x").unwrap_err();
        assert_eq!(err, Error::MagnitudeOverflow);
    }

    #[test]
    fn rational_round_trips_are_exact_for_floats() {
        let ratio = Magnitude::from_ratio(Ratio::new(9144, 10000)).unwrap();
        let there = convert_value(3.0f64, &ratio, ConversionKind::Implicit, "m").unwrap();
        let back = convert_value(there, &ratio.invert(), ConversionKind::Implicit, "yd").unwrap();
        assert_relative_eq!(back, 3.0, max_relative = 1e-15);
    }
}
