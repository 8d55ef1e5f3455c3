//! Unit- and dimension-safe quantities.
//!
//! `symunit` is the user-facing crate in this workspace. It re-exports the
//! full symbolic algebra from `symunit-core` plus a curated catalog of SI
//! (and a few customary) definitions under [`si`].
//!
//! The core idea is: a value is always a [`Quantity`], tagged by a
//! [`Reference`] pairing *what* is measured (a [`QuantitySpec`]) with the
//! unit it is expressed in. All tags are immutable symbolic values reduced to
//! one canonical form, so compatibility checks and unit conversions are exact
//! symbolic computations, not floating-point guesswork.
//!
//! # What this crate solves
//!
//! - Prevents mixing incompatible dimensions (you can't add metres to
//!   seconds; the operation fails at binding time).
//! - Converts between units exactly wherever mathematically possible and
//!   refuses to silently truncate integral payloads.
//! - Simplifies arbitrary unit algebra canonically: `m/s · s` *is* `m`, and
//!   `A·B·C == C·B·A` structurally.
//!
//! # What this crate does not try to solve
//!
//! - Parsing units from run-time strings.
//! - An unlimited set of irrational scale bases (only π is built in).
//! - Polymorphic run-time dispatch between unit systems.
//!
//! # Quick start
//!
//! Convert kilometres to metres, exactly:
//!
//! ```rust
//! use symunit::si;
//! use symunit::{Quantity, Reference};
//!
//! let in_km = Reference::new(si::LENGTH.clone(), si::KILOMETRE.clone()).unwrap();
//! let in_m = Reference::new(si::LENGTH.clone(), si::METRE.clone()).unwrap();
//!
//! let trip = Quantity::new(2i64, in_km);
//! assert_eq!(trip.to(&in_m).unwrap().value(), 2000);
//! ```
//!
//! Compose derived quantities (speed × time = length):
//!
//! ```rust
//! use symunit::si;
//! use symunit::{Quantity, Reference};
//!
//! let mps = Reference::new(si::SPEED.clone(), &*si::METRE / &*si::SECOND).unwrap();
//! let s = Reference::new(si::TIME.clone(), si::SECOND.clone()).unwrap();
//!
//! let v = Quantity::new(5.0f64, mps);
//! let t = Quantity::new(4.0f64, s);
//! let d = v * t;
//! assert_eq!(d.unit(), &*si::METRE);
//! assert_eq!(d.value(), 20.0);
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize` implementations for the symbolic types and for
//!   [`Quantity`] (forwarded to `symunit-core`).

#![deny(missing_docs)]

pub mod si;

pub use symunit_core::{
    AtomPower, BasePower, CanonicalUnit, Character, ConversionKind, Dimension, Error, Expression,
    MagBase, Magnitude, NamedUnit, Quantity, QuantityKind, QuantitySpec, Ratio, Reference,
    Representation, Result, Unit,
};
