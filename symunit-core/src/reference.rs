//! Quantity references.
//!
//! A [`Reference`] is a validated pairing of a [`QuantitySpec`] with a
//! dimensionally matching [`Unit`]; it is the tag carried by every
//! [`Quantity`](crate::Quantity) value. Construction is the validation point:
//! a mismatched pair is rejected with
//! [`Error::IncompatibleDimension`](crate::Error::IncompatibleDimension)
//! instead of producing a reference that would later mislabel numbers.
//!
//! ```rust
//! use symunit_core::{Character, Dimension, QuantityKind, QuantitySpec, Reference, Unit};
//!
//! let length: QuantitySpec =
//!     QuantityKind::new("length", Dimension::base("L"), Character::Scalar).into();
//! let metre = Unit::base("m", Dimension::base("L"));
//! let second = Unit::base("s", Dimension::base("T"));
//! assert!(Reference::new(length.clone(), metre).is_ok());
//! assert!(Reference::new(length, second).is_err());
//! ```

use core::fmt;
use core::ops::{Div, Mul};

use crate::error::{Error, Result};
use crate::quantity_spec::QuantitySpec;
use crate::ratio::Ratio;
use crate::unit::Unit;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A validated (quantity specification, unit) pairing.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Reference {
    spec: QuantitySpec,
    unit: Unit,
}

impl Reference {
    /// Pairs a specification with a unit, verifying that the unit measures
    /// the specification's dimension.
    pub fn new(spec: QuantitySpec, unit: Unit) -> Result<Self> {
        let spec_dim = spec.dimension();
        let unit_dim = unit.dimension();
        if spec_dim != unit_dim {
            return Err(Error::IncompatibleDimension {
                left: spec_dim.to_string(),
                right: unit_dim.to_string(),
            });
        }
        Ok(Reference { spec, unit })
    }

    /// The dimensionless reference tagging bare numbers.
    pub fn one() -> Self {
        Reference { spec: QuantitySpec::one(), unit: Unit::one() }
    }

    /// The quantity specification.
    pub fn spec(&self) -> &QuantitySpec {
        &self.spec
    }

    /// The unit.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Whether this is the dimensionless reference.
    pub fn is_one(&self) -> bool {
        self.spec.is_one() && self.unit.is_one()
    }

    /// Whether values tagged by these two references may be converted into
    /// one another.
    pub fn interconvertible_with(&self, other: &Reference) -> bool {
        self.spec.interconvertible_with(&other.spec)
    }

    /// This reference re-expressed in another unit of the same dimension.
    pub fn in_unit(&self, unit: Unit) -> Result<Self> {
        Self::new(self.spec.clone(), unit)
    }

    /// Raises both sides to a rational power.
    pub fn pow(&self, p: Ratio) -> Self {
        Reference { spec: self.spec.pow(p), unit: self.unit.pow(p) }
    }

    /// The reciprocal reference.
    pub fn invert(&self) -> Self {
        Reference { spec: self.spec.invert(), unit: self.unit.invert() }
    }
}

impl Mul for &Reference {
    type Output = Reference;

    // Derivation keeps both sides consistent, so no re-validation is needed.
    fn mul(self, rhs: &Reference) -> Reference {
        Reference { spec: &self.spec * &rhs.spec, unit: &self.unit * &rhs.unit }
    }
}

impl Mul for Reference {
    type Output = Reference;

    fn mul(self, rhs: Reference) -> Reference {
        &self * &rhs
    }
}

impl Div for &Reference {
    type Output = Reference;

    fn div(self, rhs: &Reference) -> Reference {
        Reference { spec: &self.spec / &rhs.spec, unit: &self.unit / &rhs.unit }
    }
}

impl Div for Reference {
    type Output = Reference;

    fn div(self, rhs: Reference) -> Reference {
        &self / &rhs
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.spec, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::quantity_spec::{Character, QuantityKind};

    fn length() -> QuantitySpec {
        QuantityKind::new("length", Dimension::base("L"), Character::Scalar).into()
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

    #[test]
    fn pairing_validates_dimensions() {
        assert!(Reference::new(length(), metre()).is_ok());
        let err = Reference::new(length(), second()).unwrap_err();
        assert!(matches!(err, Error::IncompatibleDimension { .. }));
    }

    #[test]
    fn derived_references_stay_consistent() {
        let l = Reference::new(length(), metre()).unwrap();
        let t = Reference::new(time(), second()).unwrap();
        let speed = &l / &t;
        assert_eq!(speed.spec(), &(&length() / &time()));
        assert_eq!(speed.unit(), &(&metre() / &second()));
        assert_eq!(&speed * &t, l);
    }

    #[test]
    fn dimensionless_identity() {
        let one = Reference::one();
        assert!(one.is_one());
        let l = Reference::new(length(), metre()).unwrap();
        assert_eq!(&(&l / &l), &one);
    }

    #[test]
    fn interconvertibility_follows_dimension() {
        let km = Unit::scaled("km", crate::Magnitude::from_int(1000).unwrap(), &metre());
        let in_m = Reference::new(length(), metre()).unwrap();
        let in_km = in_m.in_unit(km).unwrap();
        assert!(in_m.interconvertible_with(&in_km));
        let t = Reference::new(time(), second()).unwrap();
        assert!(!in_m.interconvertible_with(&t));
    }
}
