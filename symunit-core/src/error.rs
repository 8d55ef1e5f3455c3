//! Error types for symunit-core.

use thiserror::Error;

/// Result type for symunit-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when defining or converting quantities.
///
/// Every variant is a *definition-time* validation failure: it rejects the
/// offending construction outright instead of producing a degraded value.
/// None of them is retried or recovered locally; a program that triggers one
/// has a logic error, and the point of this crate is to make that error
/// impossible to observe as a silently wrong number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Arithmetic or conversion attempted between references whose dimensions
    /// differ and are not declared interconvertible.
    #[error("incompatible dimensions: `{left}` vs `{right}`")]
    IncompatibleDimension {
        /// Rendered dimension of the left-hand operand.
        left: String,
        /// Rendered dimension of the right-hand operand.
        right: String,
    },

    /// A non-unit magnitude raised to a non-integer power was requested for
    /// exact (non-floating) evaluation.
    #[error("magnitude has a fractional or irrational part and cannot be evaluated exactly")]
    FractionalPowerUnsupported,

    /// Numeric evaluation of a magnitude does not fit the requested
    /// representation type.
    #[error("magnitude value does not fit the requested representation type")]
    MagnitudeOverflow,

    /// An implicit (non-explicit) conversion would lose precision for an
    /// integral target representation.
    #[error("conversion to `{target}` would truncate; use an explicit cast")]
    TruncatingConversionRejected {
        /// Symbol of the target unit.
        target: String,
    },

    /// Ratio division by zero, or quantity division by a zero-valued divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A magnitude was requested for a non-positive number; magnitudes
    /// represent positive real scale factors only.
    #[error("magnitude of non-positive number {0}")]
    NotPositive(i64),

    /// A factorization hint that is not a prime factor of the input. An
    /// unvalidated hint would silently produce a wrong magnitude.
    #[error("known first factor {0} is not a prime factor of the input")]
    InvalidFactorHint(i64),
}
