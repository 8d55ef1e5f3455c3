//! Physical dimensions.
//!
//! A [`Dimension`] is a canonical expression over base-dimension symbols
//! (length `L`, time `T`, mass `M`, ...). Derived dimensions are obtained by
//! multiplying, dividing and exponentiating base dimensions; the canonical
//! form guarantees that `L/T * T == L` and that any construction order yields
//! a structurally equal value.
//!
//! ```rust
//! use symunit_core::Dimension;
//!
//! let length = Dimension::base("L");
//! let time = Dimension::base("T");
//! let speed = &length / &time;
//! assert_eq!(&speed * &time, length);
//! assert!((&speed / &speed).is_one());
//! ```

use core::fmt;
use core::ops::{Div, Mul};
use std::sync::Arc;

use crate::expression::Expression;
use crate::ratio::Ratio;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A base-dimension symbol. Interned as a shared string; ordered and compared
/// by symbol content, so independently constructed equal symbols are the same
/// atom.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub(crate) struct DimAtom(Arc<str>);

impl fmt::Display for DimAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical dimension in canonical form.
///
/// The dimensionless "one" is the empty expression; equality is structural.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Dimension(Expression<DimAtom>);

impl Dimension {
    /// A base dimension identified by its symbolic code.
    pub fn base(symbol: &str) -> Self {
        Dimension(Expression::from_atom(DimAtom(Arc::from(symbol))))
    }

    /// The dimensionless identity.
    pub fn one() -> Self {
        Dimension(Expression::one())
    }

    /// Whether this is the dimensionless identity.
    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// Raises the dimension to a rational power.
    pub fn pow(&self, p: Ratio) -> Self {
        Dimension(self.0.pow(p))
    }

    /// The reciprocal dimension.
    pub fn invert(&self) -> Self {
        Dimension(self.0.invert())
    }

    /// Every base-dimension symbol with its signed rational exponent, for
    /// external formatting collaborators.
    pub fn symbol_powers(&self) -> impl Iterator<Item = (&str, Ratio)> {
        self.0.atom_powers().map(|(atom, power)| (&*atom.0, power))
    }

    pub(crate) fn expr(&self) -> &Expression<DimAtom> {
        &self.0
    }

    pub(crate) fn from_expr(expr: Expression<DimAtom>) -> Self {
        Dimension(expr)
    }
}

impl Mul for &Dimension {
    type Output = Dimension;

    fn mul(self, rhs: &Dimension) -> Dimension {
        Dimension(self.0.multiply(&rhs.0))
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        &self * &rhs
    }
}

impl Div for &Dimension {
    type Output = Dimension;

    fn div(self, rhs: &Dimension) -> Dimension {
        Dimension(self.0.divide(&rhs.0))
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        &self / &rhs
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_dimensions_compare_by_symbol() {
        assert_eq!(Dimension::base("L"), Dimension::base("L"));
        assert_ne!(Dimension::base("L"), Dimension::base("T"));
    }

    #[test]
    fn derived_dimensions_cancel() {
        let length = Dimension::base("L");
        let time = Dimension::base("T");
        let speed = &length / &time;
        assert_eq!(&speed * &time, length);
        assert!((&length / &length).is_one());
    }

    #[test]
    fn construction_order_is_irrelevant() {
        let l = Dimension::base("L");
        let m = Dimension::base("M");
        let t = Dimension::base("T");
        let force = &(&m * &l) / &(&t * &t);
        let force_permuted = &(&l * &m) / &t.pow(Ratio::from_int(2));
        assert_eq!(force, force_permuted);
    }

    #[test]
    fn symbol_powers_expose_signed_exponents() {
        let accel = &Dimension::base("L") / &Dimension::base("T").pow(Ratio::from_int(2));
        let powers: Vec<_> = accel.symbol_powers().collect();
        assert_eq!(powers, vec![("L", Ratio::ONE), ("T", Ratio::from_int(-2))]);
    }

    #[test]
    fn display_renders_fraction_form() {
        let accel = &Dimension::base("L") / &Dimension::base("T").pow(Ratio::from_int(2));
        assert_eq!(accel.to_string(), "L/T^(2)");
        assert_eq!(Dimension::one().to_string(), "1");
    }
}
