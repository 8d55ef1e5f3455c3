//! Quantity values.
//!
//! A [`Quantity`] is a numeric payload tagged by a [`Reference`]. Arithmetic
//! legality and the reference of each result are derived from the symbolic
//! algebras: addition demands interconvertible references (with the right
//! operand converted into the left operand's unit), multiplication and
//! division derive a new reference by combining both sides symbolically.
//!
//! Every fallible operation has a `checked_*` form returning a [`Result`];
//! the operator impls forward to those and panic on a logic error, matching
//! the definition-time-failure policy of the whole algebra.
//!
//! ```rust
//! use symunit_core::{Character, Dimension, Magnitude, Quantity, QuantityKind, Reference, Unit};
//!
//! let length = QuantityKind::new("length", Dimension::base("L"), Character::Scalar);
//! let metre = Unit::base("m", Dimension::base("L"));
//! let km = Unit::scaled("km", Magnitude::from_int(1000).unwrap(), &metre);
//! let in_km = Reference::new(length.clone().into(), km).unwrap();
//! let in_m = Reference::new(length.into(), metre).unwrap();
//!
//! let trip = Quantity::new(2i64, in_km);
//! assert_eq!(trip.to(&in_m).unwrap().value(), 2000);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::convert::{convert_value, ConversionKind};
use crate::error::{Error, Result};
use crate::reference::Reference;
use crate::repr::Representation;
use crate::unit::Unit;

/// A numeric value tagged by a validated reference.
#[derive(Clone, Debug)]
pub struct Quantity<R: Representation = f64> {
    value: R,
    reference: Reference,
}

impl<R: Representation> Quantity<R> {
    /// Tags a value with a reference.
    pub fn new(value: R, reference: Reference) -> Self {
        Quantity { value, reference }
    }

    /// Tags a bare value with the dimensionless reference; equivalent to the
    /// `From` conversion.
    pub fn dimensionless(value: R) -> Self {
        Quantity { value, reference: Reference::one() }
    }

    /// The zero quantity of a reference.
    pub fn zero(reference: Reference) -> Self {
        Quantity { value: R::ZERO, reference }
    }

    /// The unit-valued quantity of a reference.
    pub fn one(reference: Reference) -> Self {
        Quantity { value: R::ONE, reference }
    }

    /// The smallest representable quantity of a reference.
    pub fn min(reference: Reference) -> Self {
        Quantity { value: R::MIN, reference }
    }

    /// The largest representable quantity of a reference.
    pub fn max(reference: Reference) -> Self {
        Quantity { value: R::MAX, reference }
    }

    /// The numeric payload, in this quantity's unit.
    pub fn value(&self) -> R {
        self.value
    }

    /// The reference tagging this quantity.
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// The unit this quantity is expressed in.
    pub fn unit(&self) -> &Unit {
        self.reference.unit()
    }

    /// Re-expresses the quantity in another reference, implicitly.
    ///
    /// Fails with [`Error::IncompatibleDimension`] across dimensions and with
    /// [`Error::TruncatingConversionRejected`] when an integral payload would
    /// lose precision; for the latter use [`Quantity::cast_to`].
    pub fn to(&self, target: &Reference) -> Result<Self> {
        self.convert(target, ConversionKind::Implicit)
    }

    /// Re-expresses the quantity in another reference, explicitly permitting
    /// truncation toward zero for integral payloads.
    pub fn cast_to(&self, target: &Reference) -> Result<Self> {
        self.convert(target, ConversionKind::Explicit)
    }

    /// Re-expresses the quantity in another unit of the same dimension,
    /// implicitly.
    pub fn in_unit(&self, unit: Unit) -> Result<Self> {
        self.to(&self.reference.in_unit(unit)?)
    }

    /// Re-expresses the quantity in another unit of the same dimension,
    /// explicitly permitting truncation.
    pub fn cast_in_unit(&self, unit: Unit) -> Result<Self> {
        self.cast_to(&self.reference.in_unit(unit)?)
    }

    /// Re-expresses the payload in another representation type, explicitly.
    ///
    /// Integral targets truncate toward zero and range-check the result
    /// ([`Error::MagnitudeOverflow`] when it does not fit).
    pub fn cast_repr<To: Representation>(&self) -> Result<Quantity<To>> {
        let value = if To::IS_FLOATING {
            To::from_f64_truncating(self.value.to_f64())
        } else if R::IS_FLOATING {
            let truncated = self.value.to_f64().trunc();
            if !truncated.is_finite()
                || truncated < i128::MIN as f64
                || truncated >= i128::MAX as f64
            {
                return Err(Error::MagnitudeOverflow);
            }
            To::checked_from_i128(truncated as i128).ok_or(Error::MagnitudeOverflow)?
        } else {
            To::checked_from_i128(self.value.to_i128()).ok_or(Error::MagnitudeOverflow)?
        };
        Ok(Quantity { value, reference: self.reference.clone() })
    }

    /// The shared comparison behind `PartialEq` and `PartialOrd`.
    ///
    /// Integral payloads across a rational unit ratio compare exactly by
    /// cross-multiplying in the widened `i128`. Irrational ratios, floating
    /// payloads and overflowing products fall back to the widened floating
    /// comparison. `None` for incompatible references.
    fn compare(&self, other: &Self) -> Option<Ordering> {
        if !self.reference.interconvertible_with(&other.reference) {
            return None;
        }
        let ratio = self.unit().conversion_factor(other.unit()).ok()?;
        if !R::IS_FLOATING && ratio.is_rational() {
            if let (Ok(num), Ok(den)) = (
                ratio.numerator().checked_value_i128(),
                ratio.denominator().checked_value_i128(),
            ) {
                if let (Some(lhs), Some(rhs)) = (
                    self.value.to_i128().checked_mul(num),
                    other.value.to_i128().checked_mul(den),
                ) {
                    return Some(lhs.cmp(&rhs));
                }
            }
        }
        (self.value.to_f64() * ratio.value_f64()).partial_cmp(&other.value.to_f64())
    }

    fn convert(&self, target: &Reference, kind: ConversionKind) -> Result<Self> {
        if !self.reference.interconvertible_with(target) {
            return Err(Error::IncompatibleDimension {
                left: self.reference.to_string(),
                right: target.to_string(),
            });
        }
        let ratio = self.reference.unit().conversion_factor(target.unit())?;
        let value = convert_value(self.value, &ratio, kind, &target.unit().to_string())?;
        Ok(Quantity { value, reference: target.clone() })
    }

    /// The sum of two interconvertible quantities, in the left operand's
    /// reference.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        let rhs = rhs.to(&self.reference)?;
        Ok(Quantity { value: self.value + rhs.value, reference: self.reference.clone() })
    }

    /// The difference of two interconvertible quantities, in the left
    /// operand's reference.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        let rhs = rhs.to(&self.reference)?;
        Ok(Quantity { value: self.value - rhs.value, reference: self.reference.clone() })
    }

    /// The product of two quantities, under the derived reference.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self> {
        Ok(Quantity {
            value: self.value * rhs.value,
            reference: &self.reference * &rhs.reference,
        })
    }

    /// The quotient of two quantities, under the derived reference.
    ///
    /// A zero-valued divisor is rejected with [`Error::DivisionByZero`].
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.value == R::ZERO {
            return Err(Error::DivisionByZero);
        }
        Ok(Quantity {
            value: self.value / rhs.value,
            reference: &self.reference / &rhs.reference,
        })
    }
}

/// Bare numbers become dimensionless quantities; the only implicit
/// construction from a raw representation value.
impl<R: Representation> From<R> for Quantity<R> {
    fn from(value: R) -> Self {
        Quantity { value, reference: Reference::one() }
    }
}

impl<R: Representation> Add for Quantity<R> {
    type Output = Quantity<R>;

    /// Panics when the operands are not interconvertible or the conversion
    /// would truncate; use [`Quantity::checked_add`] to handle the error.
    fn add(self, rhs: Quantity<R>) -> Quantity<R> {
        match self.checked_add(&rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("quantity addition failed: {err}"),
        }
    }
}

impl<R: Representation> Sub for Quantity<R> {
    type Output = Quantity<R>;

    /// Panics when the operands are not interconvertible or the conversion
    /// would truncate; use [`Quantity::checked_sub`] to handle the error.
    fn sub(self, rhs: Quantity<R>) -> Quantity<R> {
        match self.checked_sub(&rhs) {
            Ok(difference) => difference,
            Err(err) => panic!("quantity subtraction failed: {err}"),
        }
    }
}

impl<R: Representation> Mul for Quantity<R> {
    type Output = Quantity<R>;

    fn mul(self, rhs: Quantity<R>) -> Quantity<R> {
        Quantity { value: self.value * rhs.value, reference: &self.reference * &rhs.reference }
    }
}

impl<R: Representation> Div for Quantity<R> {
    type Output = Quantity<R>;

    /// Panics on a zero-valued divisor; use [`Quantity::checked_div`] to
    /// handle the error.
    fn div(self, rhs: Quantity<R>) -> Quantity<R> {
        match self.checked_div(&rhs) {
            Ok(quotient) => quotient,
            Err(err) => panic!("quantity division failed: {err}"),
        }
    }
}

impl<R: Representation> Mul<R> for Quantity<R> {
    type Output = Quantity<R>;

    fn mul(self, rhs: R) -> Quantity<R> {
        Quantity { value: self.value * rhs, reference: self.reference }
    }
}

impl<R: Representation> Div<R> for Quantity<R> {
    type Output = Quantity<R>;

    fn div(self, rhs: R) -> Quantity<R> {
        Quantity { value: self.value / rhs, reference: self.reference }
    }
}

impl<R: Representation + Neg<Output = R>> Neg for Quantity<R> {
    type Output = Quantity<R>;

    fn neg(self) -> Quantity<R> {
        Quantity { value: -self.value, reference: self.reference }
    }
}

impl<R: Representation> PartialEq for Quantity<R> {
    /// Unit-aware equality. Decided by the same comparison as
    /// [`PartialOrd::partial_cmp`], so `a == b` holds exactly when the
    /// ordering answers `Some(Equal)`. Incompatible quantities are simply
    /// unequal.
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl<R: Representation> PartialOrd for Quantity<R> {
    /// Ordered comparison across interconvertible references; `None` for
    /// incompatible ones. Exact for integral payloads across rational unit
    /// ratios, widened floating comparison otherwise.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl<R: Representation> fmt::Display for Quantity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reference.unit().is_one() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.reference.unit())
        }
    }
}

#[cfg(feature = "serde")]
impl<R: Representation + serde::Serialize> serde::Serialize for Quantity<R> {
    /// Serializes as `{ "value": ..., "unit": "..." }`; deserialization is
    /// intentionally absent since a unit symbol alone cannot be resolved
    /// back to a reference without a catalog.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Quantity", 2)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("unit", &self.reference.unit().to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::magnitude::Magnitude;
    use crate::quantity_spec::{Character, QuantityKind, QuantitySpec};
    use approx::assert_relative_eq;

    fn length() -> QuantitySpec {
        QuantityKind::new("length", Dimension::base("L"), Character::Scalar).into()
    }

    fn mass() -> QuantitySpec {
        QuantityKind::new("mass", Dimension::base("M"), Character::Scalar).into()
    }

    fn time() -> QuantitySpec {
        QuantityKind::new("time", Dimension::base("T"), Character::Scalar).into()
    }

    fn metre() -> Unit {
        Unit::base("m", Dimension::base("L"))
    }

    fn second() -> Unit {
        Unit::base("s", Dimension::base("T"))
    }

    fn gram() -> Unit {
        Unit::base("g", Dimension::base("M"))
    }

    fn kilometre() -> Unit {
        Unit::scaled("km", Magnitude::from_int(1000).unwrap(), &metre())
    }

    fn in_m() -> Reference {
        Reference::new(length(), metre()).unwrap()
    }

    fn in_km() -> Reference {
        Reference::new(length(), kilometre()).unwrap()
    }

    fn in_s() -> Reference {
        Reference::new(time(), second()).unwrap()
    }

    #[test]
    fn kilometres_widen_to_metres_implicitly() {
        let trip = Quantity::new(2i64, in_km());
        assert_eq!(trip.to(&in_m()).unwrap().value(), 2000);
    }

    #[test]
    fn metres_narrow_to_kilometres_only_by_cast() {
        let trip = Quantity::new(2000i64, in_m());
        let err = trip.to(&in_km()).unwrap_err();
        assert!(matches!(err, Error::TruncatingConversionRejected { .. }));
        assert_eq!(trip.cast_to(&in_km()).unwrap().value(), 2);
    }

    #[test]
    fn floating_payloads_convert_either_way() {
        let trip = Quantity::new(2500.0f64, in_m());
        assert_relative_eq!(trip.to(&in_km()).unwrap().value(), 2.5);
    }

    #[test]
    fn addition_requires_interconvertible_references() {
        let d = Quantity::new(1i64, in_m());
        let m = Quantity::new(1i64, Reference::new(mass(), gram()).unwrap());
        let err = d.checked_add(&m).unwrap_err();
        assert!(matches!(err, Error::IncompatibleDimension { .. }));
    }

    #[test]
    fn addition_converts_into_the_left_unit() {
        let a = Quantity::new(3i64, in_m());
        let b = Quantity::new(2i64, in_km());
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.value(), 2003);
        assert_eq!(sum.unit(), &metre());
        let diff = b.clone().to(&in_m()).unwrap().checked_sub(&a).unwrap();
        assert_eq!(diff.value(), 1997);
    }

    #[test]
    fn multiplication_derives_the_reference() {
        let speed_ref = &in_m() / &in_s();
        let speed = Quantity::new(5i64, speed_ref);
        let duration = Quantity::new(4i64, in_s());
        let distance = speed * duration;
        assert_eq!(distance.value(), 20);
        assert_eq!(distance.reference(), &in_m());
    }

    #[test]
    fn division_by_zero_quantity_is_rejected() {
        let d = Quantity::new(6i64, in_m());
        let t = Quantity::zero(in_s());
        assert_eq!(d.checked_div(&t).unwrap_err(), Error::DivisionByZero);
        let t = Quantity::new(3i64, in_s());
        assert_eq!(d.checked_div(&t).unwrap().value(), 2);
    }

    #[test]
    fn scalar_factors_keep_the_reference() {
        let d = Quantity::new(6i64, in_m());
        assert_eq!((d.clone() * 2).value(), 12);
        assert_eq!((d / 3).unit(), &metre());
    }

    #[test]
    fn comparison_is_unit_aware_and_symmetric() {
        let a = Quantity::new(2000i64, in_m());
        let b = Quantity::new(2i64, in_km());
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert!(Quantity::new(2999i64, in_m()) > b);
        assert!(Quantity::new(1999i64, in_m()) < b);
        let t = Quantity::new(2i64, in_s());
        assert_ne!(a, t);
        assert_eq!(a.partial_cmp(&t), None);
    }

    #[test]
    fn equality_and_ordering_agree_across_non_harmonic_ratios() {
        // 9144 m and 10000 yd denote the same length, yet neither integral
        // conversion is exact in either direction; the comparison still
        // resolves exactly through the rational unit ratio.
        let yard = Unit::scaled(
            "yd",
            Magnitude::from_ratio(crate::Ratio::new(9144, 10000)).unwrap(),
            &metre(),
        );
        let in_yd = Reference::new(length(), yard).unwrap();
        let a = Quantity::new(9144i64, in_m());
        let b = Quantity::new(10_000i64, in_yd);
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert!(Quantity::new(9143i64, in_m()) < b);
        assert!(Quantity::new(9145i64, in_m()) > b);
    }

    #[test]
    fn bare_values_are_dimensionless() {
        let two: Quantity<i64> = 2.into();
        assert!(two.reference().is_one());
        let d = Quantity::new(3i64, in_m());
        assert_eq!((d * two).value(), 6);
    }

    #[test]
    fn static_constructors_use_the_representation_limits() {
        assert_eq!(Quantity::<i64>::zero(in_m()).value(), 0);
        assert_eq!(Quantity::<i64>::one(in_m()).value(), 1);
        assert_eq!(Quantity::<i64>::max(in_m()).value(), i64::MAX);
        assert_eq!(Quantity::<i64>::min(in_m()).value(), i64::MIN);
    }

    #[test]
    fn representation_casts_are_explicit_and_checked() {
        let d = Quantity::new(2.9f64, in_m());
        assert_eq!(d.cast_repr::<i64>().unwrap().value(), 2);
        assert_eq!(d.cast_repr::<f32>().unwrap().value(), 2.9f32);
        let big = Quantity::new(1.0e30f64, in_m());
        assert_eq!(big.cast_repr::<i32>().unwrap_err(), Error::MagnitudeOverflow);
        let n = Quantity::new(70_000i64, in_m());
        assert_eq!(n.cast_repr::<i16>().unwrap_err(), Error::MagnitudeOverflow);
        assert_eq!(n.cast_repr::<u32>().unwrap().value(), 70_000u32);
    }

    #[test]
    fn display_includes_the_unit_symbol() {
        assert_eq!(Quantity::new(2i64, in_km()).to_string(), "2 km");
        let bare: Quantity<i64> = 7.into();
        assert_eq!(bare.to_string(), "7");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_value_with_unit_symbol() {
        let q = Quantity::new(2.5f64, in_km());
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"{"value":2.5,"unit":"km"}"#);
    }
}
