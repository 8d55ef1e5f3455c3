//! # symunit-core
//!
//! The symbolic algebra engine behind unit- and dimension-safe quantities.
//!
//! Everything here is an immutable value fully determined at definition time:
//! exact rationals with a power-of-ten exponent ([`Ratio`]), scale factors as
//! canonical products of prime and irrational bases ([`Magnitude`]), and one
//! generic canonical-expression algebra ([`expression`]) instantiated three
//! times, for [`Dimension`]s, [`QuantitySpec`]s and [`Unit`]s. A validated
//! ([`QuantitySpec`], [`Unit`]) pair is a [`Reference`], and a [`Reference`]
//! plus a numeric payload is a [`Quantity`].
//!
//! Because every derived entity is reduced to one canonical form, structural
//! equality answers all compatibility questions and unit conversion factors
//! are cancelled exactly before any floating-point arithmetic runs.
//!
//! ## Quick example
//!
//! ```rust
//! use symunit_core::{Character, Dimension, Magnitude, Quantity, QuantityKind, Reference, Unit};
//!
//! let length = QuantityKind::new("length", Dimension::base("L"), Character::Scalar);
//! let metre = Unit::base("m", Dimension::base("L"));
//! let km = Unit::scaled("km", Magnitude::from_int(1000).unwrap(), &metre);
//!
//! let in_km = Reference::new(length.clone().into(), km).unwrap();
//! let in_m = Reference::new(length.into(), metre).unwrap();
//!
//! let trip = Quantity::new(2i64, in_km);
//! assert_eq!(trip.to(&in_m).unwrap().value(), 2000);
//! ```
//!
//! Concrete SI and imperial definitions live in the `symunit` facade crate;
//! this crate only requires that leaf atoms expose a unique identity, a total
//! order and, for units, an intrinsic [`Magnitude`].
//!
//! ## Feature flags
//!
//! - `serde`: `Serialize` implementations for the symbolic types and for
//!   [`Quantity`].

#![deny(missing_docs)]

pub mod convert;
pub mod dimension;
pub mod error;
pub mod expression;
pub mod magnitude;
pub mod quantity;
pub mod quantity_spec;
pub mod ratio;
pub mod reference;
pub mod repr;
pub mod unit;

pub use convert::ConversionKind;
pub use dimension::Dimension;
pub use error::{Error, Result};
pub use expression::{AtomPower, Expression};
pub use magnitude::{BasePower, MagBase, Magnitude};
pub use quantity::Quantity;
pub use quantity_spec::{Character, QuantityKind, QuantitySpec};
pub use ratio::Ratio;
pub use reference::Reference;
pub use repr::Representation;
pub use unit::{CanonicalUnit, NamedUnit, Unit};
