//! Units of measurement.
//!
//! Leaf units are interned [`NamedUnit`] descriptors: either a *base* unit
//! that defines the coherent reference for one base dimension (metre for
//! length), or a *scaled* unit defined as an exact [`Magnitude`] times
//! another unit (kilometre is `1000 × metre`, degree is `π/180 × radian`).
//! A [`Unit`] is a canonical expression over named units; resolving it yields
//! a [`CanonicalUnit`], the pair of a base-units-only expression and the
//! accumulated scale magnitude, which is all the conversion engine needs.
//!
//! ```rust
//! use symunit_core::{Dimension, Magnitude, Ratio, Unit};
//!
//! let metre = Unit::base("m", Dimension::base("L"));
//! let km = Unit::scaled("km", Magnitude::from_int(1000).unwrap(), &metre);
//! let factor = km.conversion_factor(&metre).unwrap();
//! assert_eq!(factor.checked_value_i64().unwrap(), 1000);
//! ```

use core::fmt;
use core::ops::{Div, Mul};
use std::sync::Arc;

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::magnitude::Magnitude;
use crate::ratio::Ratio;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
enum UnitDef {
    /// The coherent reference unit of a base dimension.
    Base { dimension: Dimension },
    /// A named exact multiple of another unit.
    Scaled { magnitude: Magnitude, reference: Unit },
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct UnitInner {
    symbol: Box<str>,
    def: UnitDef,
}

/// An interned named unit, the leaf atom of the unit algebra. Cloning shares
/// the descriptor; equality and ordering are by content (symbol first).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NamedUnit(Arc<UnitInner>);

impl NamedUnit {
    /// The unit's symbol.
    pub fn symbol(&self) -> &str {
        &self.0.symbol
    }
}

impl fmt::Display for NamedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.symbol)
    }
}

/// A unit in canonical expression form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Unit(Expression<NamedUnit>);

/// The resolution of a unit: a base-units-only expression plus the exact
/// scale magnitude relating the unit to it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CanonicalUnit {
    /// The coherent reference, an expression over base units only.
    pub reference: Unit,
    /// The exact factor by which the unit exceeds its reference.
    pub magnitude: Magnitude,
}

impl Unit {
    /// Defines the coherent base unit of a base dimension.
    pub fn base(symbol: &str, dimension: Dimension) -> Self {
        Self::named(symbol, UnitDef::Base { dimension })
    }

    /// Defines a named unit as an exact magnitude times another unit.
    ///
    /// With the identity magnitude this names a coherent derived unit, e.g.
    /// newton for `kg·m/s²`.
    pub fn scaled(symbol: &str, magnitude: Magnitude, reference: &Unit) -> Self {
        Self::named(symbol, UnitDef::Scaled { magnitude, reference: reference.clone() })
    }

    fn named(symbol: &str, def: UnitDef) -> Self {
        let inner = Arc::new(UnitInner { symbol: Box::from(symbol), def });
        Unit(Expression::from_atom(NamedUnit(inner)))
    }

    /// The dimensionless unit "one".
    pub fn one() -> Self {
        Unit(Expression::one())
    }

    /// Whether this is the dimensionless unit.
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// The dimension this unit measures.
    pub fn dimension(&self) -> Dimension {
        Dimension::from_expr(self.0.map(|atom| match &atom.0.def {
            UnitDef::Base { dimension } => dimension.expr().clone(),
            UnitDef::Scaled { reference, .. } => reference.dimension().expr().clone(),
        }))
    }

    /// Raises the unit to a rational power.
    pub fn pow(&self, p: Ratio) -> Self {
        Unit(self.0.pow(p))
    }

    /// The reciprocal unit.
    pub fn invert(&self) -> Self {
        Unit(self.0.invert())
    }

    /// Resolves the unit to its coherent reference and exact scale.
    ///
    /// Scaled atoms are expanded recursively, so a chain like
    /// `mile → yard → foot → inch → metre` folds into a single magnitude.
    pub fn canonical(&self) -> CanonicalUnit {
        let mut reference = Expression::one();
        let mut magnitude = Magnitude::one();
        for (atom, power) in self.0.atom_powers() {
            match &atom.0.def {
                UnitDef::Base { .. } => {
                    reference = reference.multiply(&Expression::from_atom(atom.clone()).pow(power));
                }
                UnitDef::Scaled { magnitude: scale, reference: inner } => {
                    let resolved = inner.canonical();
                    reference = reference.multiply(&resolved.reference.0.pow(power));
                    magnitude = magnitude * (scale * &resolved.magnitude).pow(power);
                }
            }
        }
        CanonicalUnit { reference: Unit(reference), magnitude }
    }

    /// The exact magnitude ratio `self / target`.
    ///
    /// Fails with [`Error::IncompatibleDimension`] when the two units do not
    /// resolve to the same coherent reference.
    pub fn conversion_factor(&self, target: &Unit) -> Result<Magnitude> {
        let from = self.canonical();
        let to = target.canonical();
        if from.reference != to.reference {
            return Err(Error::IncompatibleDimension {
                left: self.to_string(),
                right: target.to_string(),
            });
        }
        Ok(from.magnitude / to.magnitude)
    }

    /// Every named unit with its signed rational exponent, for external
    /// formatting collaborators.
    pub fn symbol_powers(&self) -> impl Iterator<Item = (&str, Ratio)> {
        self.0.atom_powers().map(|(atom, power)| (atom.symbol(), power))
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        Unit(self.0.multiply(&rhs.0))
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        &self * &rhs
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        Unit(self.0.divide(&rhs.0))
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        &self / &rhs
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
