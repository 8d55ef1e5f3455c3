//! Quantity specifications.
//!
//! A [`QuantitySpec`] says *what* is being measured, more finely than a bare
//! dimension does: "length" and "width" share the dimension `L` but are
//! distinct named kinds. Leaf kinds are interned [`QuantityKind`] descriptors
//! carrying a [`Dimension`] and a [`Character`]; derived specifications are
//! canonical expressions over kinds, deriving their dimension and character
//! from their ingredients.
//!
//! ```rust
//! use symunit_core::{Character, Dimension, QuantityKind, QuantitySpec};
//!
//! let length = QuantityKind::new("length", Dimension::base("L"), Character::Scalar);
//! let time = QuantityKind::new("time", Dimension::base("T"), Character::Scalar);
//! let speed = &QuantitySpec::from(length.clone()) / &QuantitySpec::from(time.clone());
//! assert_eq!(speed.dimension(), &Dimension::base("L") / &Dimension::base("T"));
//! assert_eq!(&speed * &QuantitySpec::from(time), QuantitySpec::from(length));
//! ```

use core::fmt;
use core::ops::{Div, Mul};
use std::sync::Arc;

use crate::dimension::Dimension;
use crate::expression::Expression;
use crate::ratio::Ratio;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Whether a quantity behaves as a scalar, vector or tensor under arithmetic.
///
/// Ordered by restrictiveness: combining ingredients yields the most
/// restrictive (largest) character among them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Character {
    /// An ordinary magnitude-only quantity.
    #[default]
    Scalar,
    /// A quantity with direction, e.g. displacement or velocity.
    Vector,
    /// A rank-2 (or higher) tensor quantity, e.g. stress.
    Tensor,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct KindInner {
    name: Box<str>,
    character: Character,
    dimension: Dimension,
}

/// An interned named quantity kind, the leaf atom of the specification
/// algebra. Cloning shares the descriptor; equality and ordering are by
/// content (name first), so independently defined identical kinds coincide.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QuantityKind(Arc<KindInner>);

impl QuantityKind {
    /// Defines a named kind with its dimension and character.
    pub fn new(name: &str, dimension: Dimension, character: Character) -> Self {
        QuantityKind(Arc::new(KindInner { name: Box::from(name), character, dimension }))
    }

    /// The kind's name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The kind's dimension.
    pub fn dimension(&self) -> &Dimension {
        &self.0.dimension
    }

    /// The kind's character.
    pub fn character(&self) -> Character {
        self.0.character
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// A quantity specification: a canonical expression over named kinds, with an
/// optional character override recorded at definition time.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QuantitySpec {
    expr: Expression<QuantityKind>,
    character_override: Option<Character>,
}

impl QuantitySpec {
    /// The dimensionless identity specification.
    pub fn one() -> Self {
        QuantitySpec { expr: Expression::one(), character_override: None }
    }

    /// Whether this is the dimensionless identity.
    pub fn is_one(&self) -> bool {
        self.expr.is_one()
    }

    /// The dimension derived from the ingredient kinds.
    pub fn dimension(&self) -> Dimension {
        Dimension::from_expr(self.expr.map(|kind| kind.dimension().expr().clone()))
    }

    /// The character: the recorded override if one was supplied, otherwise
    /// the most restrictive character among the ingredient kinds. The
    /// identity specification is scalar.
    pub fn character(&self) -> Character {
        self.character_override.unwrap_or_else(|| {
            self.expr
                .atom_powers()
                .map(|(kind, _)| kind.character())
                .max()
                .unwrap_or(Character::Scalar)
        })
    }

    /// A copy of this specification with its character overridden, for
    /// definitions like "angular measure is scalar despite its vector
    /// ingredients".
    pub fn with_character(&self, character: Character) -> Self {
        QuantitySpec { expr: self.expr.clone(), character_override: Some(character) }
    }

    /// Raises the specification to a rational power. The override does not
    /// survive derivation.
    pub fn pow(&self, p: Ratio) -> Self {
        QuantitySpec { expr: self.expr.pow(p), character_override: None }
    }

    /// The reciprocal specification.
    pub fn invert(&self) -> Self {
        QuantitySpec { expr: self.expr.invert(), character_override: None }
    }

    /// Whether quantities of these two specifications may be converted into
    /// one another: true exactly when the derived dimensions coincide.
    pub fn interconvertible_with(&self, other: &QuantitySpec) -> bool {
        self.dimension() == other.dimension()
    }

    /// Every ingredient kind with its signed rational exponent, for external
    /// formatting collaborators.
    pub fn kind_powers(&self) -> impl Iterator<Item = (&QuantityKind, Ratio)> {
        self.expr.atom_powers()
    }
}

impl From<QuantityKind> for QuantitySpec {
    fn from(kind: QuantityKind) -> Self {
        QuantitySpec { expr: Expression::from_atom(kind), character_override: None }
    }
}

impl Mul for &QuantitySpec {
    type Output = QuantitySpec;

    fn mul(self, rhs: &QuantitySpec) -> QuantitySpec {
        QuantitySpec { expr: self.expr.multiply(&rhs.expr), character_override: None }
    }
}

impl Mul for QuantitySpec {
    type Output = QuantitySpec;

    fn mul(self, rhs: QuantitySpec) -> QuantitySpec {
        &self * &rhs
    }
}

impl Div for &QuantitySpec {
    type Output = QuantitySpec;

    fn div(self, rhs: &QuantitySpec) -> QuantitySpec {
        QuantitySpec { expr: self.expr.divide(&rhs.expr), character_override: None }
    }
}

impl Div for QuantitySpec {
    type Output = QuantitySpec;

    fn div(self, rhs: QuantitySpec) -> QuantitySpec {
        &self / &rhs
    }
}

impl fmt::Display for QuantitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}
