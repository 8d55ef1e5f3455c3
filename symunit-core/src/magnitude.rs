//! Exact symbolic magnitudes.
//!
//! A [`Magnitude`] represents a positive real scale factor as a product of
//! basis values raised to rational powers. The basis values are prime numbers
//! plus a small curated set of irrational constants (currently just pi), so
//! the set is linearly independent: no product of basis powers equals one
//! unless every power is zero. Multiplying two magnitudes merges two sorted
//! factor lists; raising to a rational power scales every exponent. Both
//! operations are exact, so unit conversion factors can be cancelled
//! symbolically before any floating-point arithmetic happens.
//!
//! ```rust
//! use symunit_core::Magnitude;
//!
//! let twelve = Magnitude::from_int(12).unwrap(); // 2^2 * 3
//! let three = Magnitude::from_int(3).unwrap();
//! let four = twelve.clone() / three;
//! assert_eq!(four, Magnitude::from_int(4).unwrap());
//! assert_eq!(four.checked_value_i64().unwrap(), 4);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Div, Mul};

use crate::error::{Error, Result};
use crate::ratio::Ratio;
use crate::repr::Representation;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A basis value of the magnitude representation.
///
/// Prime bases carry the full rational content; irrational bases are a small
/// closed set chosen so that none of them is expressible as a product of
/// rational powers of the others (`sqrt(2)` is *not* a base; it is `2^(1/2)`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MagBase {
    /// A prime number.
    Prime(i64),
    /// The circle constant.
    Pi,
}

impl MagBase {
    /// The numeric value of this base.
    pub fn value_f64(&self) -> f64 {
        match self {
            MagBase::Prime(p) => *p as f64,
            MagBase::Pi => core::f64::consts::PI,
        }
    }

    fn is_prime_base(&self) -> bool {
        matches!(self, MagBase::Prime(_))
    }
}

impl PartialOrd for MagBase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MagBase {
    /// Total order by numeric base value; pi sorts between the primes 3
    /// and 5.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (MagBase::Prime(a), MagBase::Prime(b)) => a.cmp(b),
            (MagBase::Pi, MagBase::Pi) => Ordering::Equal,
            (MagBase::Prime(p), MagBase::Pi) => {
                if *p <= 3 {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (MagBase::Pi, MagBase::Prime(p)) => {
                if *p <= 3 {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
        }
    }
}

impl fmt::Display for MagBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagBase::Prime(p) => write!(f, "{p}"),
            MagBase::Pi => write!(f, "π"),
        }
    }
}

/// A basis value raised to a rational power. The unit of composition of the
/// magnitude algebra; `power` is never zero inside a canonical [`Magnitude`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BasePower {
    /// The basis value.
    pub base: MagBase,
    /// The rational exponent.
    pub power: Ratio,
}

impl BasePower {
    fn is_rational(&self) -> bool {
        self.base.is_prime_base() && self.power.is_integral()
    }

    fn is_integral(&self) -> bool {
        self.is_rational() && self.power > Ratio::ZERO
    }
}

/// A positive real scale factor in canonical symbolic form.
///
/// Invariants: the factor list is sorted by strictly increasing base, bases
/// are unique, and no power is zero. The identity (the number one) is the
/// empty list. Values are immutable once built; every operation returns a new
/// canonical magnitude, so no separate "simplify" pass ever runs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Magnitude {
    factors: Vec<BasePower>,
}

impl Magnitude {
    /// The identity magnitude (the number one).
    pub fn one() -> Self {
        Magnitude { factors: Vec::new() }
    }

    /// The magnitude of pi.
    pub fn pi() -> Self {
        Magnitude { factors: vec![BasePower { base: MagBase::Pi, power: Ratio::ONE }] }
    }

    /// Prime-factorizes a positive integer into a magnitude.
    ///
    /// Uses trial division; for awkwardly large primes see
    /// [`Magnitude::from_int_with_hint`].
    pub fn from_int(n: i64) -> Result<Self> {
        Self::from_int_with_hint(n, None)
    }

    /// Prime-factorizes a positive integer, optionally short-circuiting the
    /// search with a caller-supplied first factor.
    ///
    /// The hint bounds the factorization cost for numbers whose smallest
    /// factor is very large. It must be a prime factor of `n`; a non-factor
    /// or composite hint is rejected with [`Error::InvalidFactorHint`]
    /// instead of producing a wrong magnitude. Checking the hint's primality
    /// costs `O(sqrt(hint))`, still far below factorizing `n` unhinted.
    pub fn from_int_with_hint(n: i64, known_first_factor: Option<i64>) -> Result<Self> {
        if n <= 0 {
            return Err(Error::NotPositive(n));
        }
        if let Some(first) = known_first_factor {
            if first <= 1 || n % first != 0 || !is_prime(first) {
                return Err(Error::InvalidFactorHint(first));
            }
        }
        Ok(Magnitude { factors: factorize(n, known_first_factor) })
    }

    /// Converts an exact rational into a magnitude by factorizing its
    /// numerator and denominator and folding the power-of-ten exponent in as
    /// `2^exp * 5^exp`.
    pub fn from_ratio(r: Ratio) -> Result<Self> {
        if r.num() <= 0 {
            return Err(Error::NotPositive(r.num()));
        }
        let num = Self::from_int(r.num())?;
        let den = Self::from_int(r.den())?;
        let ten = Self::from_int(10)?.pow(Ratio::from_int(i64::from(r.exp())));
        Ok(num / den * ten)
    }

    /// The canonical factor list, sorted by strictly increasing base.
    pub fn factors(&self) -> &[BasePower] {
        &self.factors
    }

    /// Whether this is the identity magnitude.
    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// Whether this magnitude denotes a positive integer.
    pub fn is_integral(&self) -> bool {
        self.factors.iter().all(BasePower::is_integral)
    }

    /// Whether this magnitude denotes a rational number.
    pub fn is_rational(&self) -> bool {
        self.factors.iter().all(BasePower::is_rational)
    }

    /// The exponent of `base` in this magnitude, zero if absent.
    pub fn power_of(&self, base: MagBase) -> Ratio {
        self.factors
            .iter()
            .find(|bp| bp.base == base)
            .map(|bp| bp.power)
            .unwrap_or(Ratio::ZERO)
    }

    /// Raises every exponent by the rational factor `p`; a zero power yields
    /// the identity.
    pub fn pow(&self, p: Ratio) -> Self {
        if p.is_zero() {
            return Self::one();
        }
        Magnitude {
            factors: self
                .factors
                .iter()
                .map(|bp| BasePower { base: bp.base, power: bp.power * p })
                .collect(),
        }
    }

    /// The multiplicative inverse (every exponent negated).
    pub fn invert(&self) -> Self {
        self.pow(-Ratio::ONE)
    }

    /// The largest integer sub-magnitude: for every prime base whose power is
    /// at least one, the integer part of that power.
    pub fn numerator(&self) -> Self {
        let factors = self
            .factors
            .iter()
            .filter(|bp| bp.base.is_prime_base() && bp.power >= Ratio::ONE)
            .map(|bp| BasePower { base: bp.base, power: Ratio::from_int(bp.power.trunc()) })
            .collect();
        Magnitude { factors }
    }

    /// The largest integer sub-magnitude of the inverse.
    pub fn denominator(&self) -> Self {
        self.invert().numerator()
    }

    /// Evaluates the magnitude exactly as an `i64`.
    ///
    /// Only defined for integral magnitudes: any fractional power, negative
    /// power, or irrational base is rejected with
    /// [`Error::FractionalPowerUnsupported`]. Powers are computed by repeated
    /// squaring in a widened `i128` and the final result is narrowed with an
    /// explicit range check ([`Error::MagnitudeOverflow`] on failure).
    pub fn checked_value_i64(&self) -> Result<i64> {
        i64::try_from(self.checked_value_i128()?).map_err(|_| Error::MagnitudeOverflow)
    }

    /// Evaluates the magnitude in a caller-chosen representation type.
    ///
    /// Floating representations use the widened floating evaluation (which
    /// accepts fractional powers and irrational bases); integral ones use the
    /// exact path of [`Magnitude::checked_value_i64`].
    pub fn checked_value<R: Representation>(&self) -> Result<R> {
        if R::IS_FLOATING {
            Ok(R::from_f64_truncating(self.value_f64()))
        } else {
            R::checked_from_i128(self.checked_value_i128()?).ok_or(Error::MagnitudeOverflow)
        }
    }

    /// Approximate floating value of the magnitude.
    ///
    /// The only evaluation path available to fractional powers and irrational
    /// bases.
    pub fn value_f64(&self) -> f64 {
        self.factors
            .iter()
            .map(|bp| {
                let p = bp.power;
                if p.is_integral() {
                    let e = p.trunc();
                    if let Ok(e) = i32::try_from(e) {
                        return bp.base.value_f64().powi(e);
                    }
                }
                bp.base.value_f64().powf(p.to_f64())
            })
            .product()
    }

    /// The largest power of ten that divides this magnitude, i.e. the lesser
    /// of its 2-power and 5-power when both are positive.
    pub fn extract_power_of_10(&self) -> i64 {
        let two = self.power_of(MagBase::Prime(2));
        let five = self.power_of(MagBase::Prime(5));
        if two <= Ratio::ZERO || five <= Ratio::ZERO {
            return 0;
        }
        two.min(five).trunc()
    }

    pub(crate) fn checked_value_i128(&self) -> Result<i128> {
        let mut acc: i128 = 1;
        for bp in &self.factors {
            if !bp.is_integral() {
                return Err(Error::FractionalPowerUnsupported);
            }
            let MagBase::Prime(base) = bp.base else {
                return Err(Error::FractionalPowerUnsupported);
            };
            let value = int_power(i128::from(base), bp.power.trunc() as u64)?;
            acc = acc.checked_mul(value).ok_or(Error::MagnitudeOverflow)?;
        }
        Ok(acc)
    }

    /// Merges two canonical factor lists like a merge sort, summing exponents
    /// on base collision and dropping zero sums. O(n), and the result is
    /// canonical by construction.
    fn combine(&self, rhs: &Magnitude) -> Magnitude {
        let mut factors = Vec::with_capacity(self.factors.len() + rhs.factors.len());
        let mut lhs = self.factors.iter().peekable();
        let mut rhs = rhs.factors.iter().peekable();
        loop {
            let order = match (lhs.peek(), rhs.peek()) {
                (Some(l), Some(r)) => l.base.cmp(&r.base),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };
            match order {
                Ordering::Less => factors.push(*lhs.next().unwrap()),
                Ordering::Greater => factors.push(*rhs.next().unwrap()),
                Ordering::Equal => {
                    let l = lhs.next().unwrap();
                    let r = rhs.next().unwrap();
                    let power = l.power + r.power;
                    if !power.is_zero() {
                        factors.push(BasePower { base: l.base, power });
                    }
                }
            }
        }
        Magnitude { factors }
    }
}

impl Mul for Magnitude {
    type Output = Magnitude;

    fn mul(self, rhs: Magnitude) -> Magnitude {
        self.combine(&rhs)
    }
}

impl Mul for &Magnitude {
    type Output = Magnitude;

    fn mul(self, rhs: &Magnitude) -> Magnitude {
        self.combine(rhs)
    }
}

impl Div for Magnitude {
    type Output = Magnitude;

    fn div(self, rhs: Magnitude) -> Magnitude {
        self.combine(&rhs.invert())
    }
}

impl Div for &Magnitude {
    type Output = Magnitude;

    fn div(self, rhs: &Magnitude) -> Magnitude {
        self.combine(&rhs.invert())
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (i, bp) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, "·")?;
            }
            if bp.power.is_one() {
                write!(f, "{}", bp.base)?;
            } else {
                write!(f, "{}^({})", bp.base, bp.power)?;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Factorization and integer powers
// ─────────────────────────────────────────────────────────────────────────────

/// Raises `base` to a nonnegative integer power by repeated squaring in the
/// widened `i128`, with overflow detection at every step.
fn int_power(base: i128, mut exp: u64) -> Result<i128> {
    let mut result: i128 = 1;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square).ok_or(Error::MagnitudeOverflow)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square).ok_or(Error::MagnitudeOverflow)?;
        }
    }
    Ok(result)
}

/// The exponent of `factor` in `n`, removing it as it counts.
fn multiplicity(factor: i64, n: &mut i64) -> i64 {
    let mut m = 0;
    while *n % factor == 0 {
        *n /= factor;
        m += 1;
    }
    m
}

/// Trial-division primality test over the same 2/3 wheel as [`factorize`].
fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    for small in [2, 3] {
        if n % small == 0 {
            return n == small;
        }
    }
    let mut candidate: i64 = 5;
    while candidate.saturating_mul(candidate) <= n {
        for offset in [0, 2] {
            if n % (candidate + offset) == 0 {
                return false;
            }
        }
        candidate += 6;
    }
    true
}

/// Trial-division prime factorization over a 2/3 wheel. `n` must be positive.
fn factorize(mut n: i64, known_first_factor: Option<i64>) -> Vec<BasePower> {
    debug_assert!(n > 0);
    let mut factors = Vec::new();
    let mut push = |base: i64, power: i64| {
        factors.push(BasePower { base: MagBase::Prime(base), power: Ratio::from_int(power) });
    };
    if let Some(first) = known_first_factor {
        let m = multiplicity(first, &mut n);
        debug_assert!(m > 0, "known_first_factor does not divide the input");
        push(first, m);
    }
    for small in [2, 3] {
        let m = multiplicity(small, &mut n);
        if m > 0 {
            push(small, m);
        }
    }
    let mut candidate: i64 = 5;
    while candidate.saturating_mul(candidate) <= n {
        for offset in [0, 2] {
            let f = candidate + offset;
            let m = multiplicity(f, &mut n);
            if m > 0 {
                push(f, m);
            }
        }
        candidate += 6;
    }
    if n > 1 {
        push(n, 1);
    }
    factors.sort_by_key(|bp| bp.base);
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mag(n: i64) -> Magnitude {
        Magnitude::from_int(n).unwrap()
    }

    #[test]
    fn twelve_factorizes_to_two_squared_times_three() {
        let m = mag(12);
        assert_eq!(
            m.factors(),
            &[
                BasePower { base: MagBase::Prime(2), power: Ratio::from_int(2) },
                BasePower { base: MagBase::Prime(3), power: Ratio::ONE },
            ]
        );
        assert_eq!(m.checked_value_i64().unwrap(), 12);
    }

    #[test]
    fn products_of_prime_powers() {
        // 792 = 8 * 9 * 11
        let expected = mag(2).pow(Ratio::from_int(3)) * mag(3).pow(Ratio::from_int(2)) * mag(11);
        assert_eq!(mag(792), expected);
    }

    #[test]
    fn factorization_round_trip() {
        for n in [1, 2, 17, 360, 1024, 9973, 1_000_000, 600_851_475_143] {
            assert_eq!(mag(n).checked_value_i64().unwrap(), n);
        }
    }

    #[test]
    fn known_first_factor_hint() {
        // 10^9 + 7 is prime; the hint skips the whole trial division.
        let p = 1_000_000_007;
        let m = Magnitude::from_int_with_hint(p, Some(p)).unwrap();
        assert_eq!(m, mag(p));
    }

    #[test]
    fn wrong_hints_are_rejected_not_trusted() {
        // A non-factor.
        assert_eq!(
            Magnitude::from_int_with_hint(10, Some(7)),
            Err(Error::InvalidFactorHint(7))
        );
        // A composite factor.
        assert_eq!(
            Magnitude::from_int_with_hint(90, Some(9)),
            Err(Error::InvalidFactorHint(9))
        );
        assert_eq!(
            Magnitude::from_int_with_hint(10, Some(0)),
            Err(Error::InvalidFactorHint(0))
        );
    }

    #[test]
    fn generic_evaluation_follows_the_representation() {
        assert_eq!(mag(300).checked_value::<u16>(), Ok(300u16));
        assert_eq!(mag(1000).checked_value::<i8>(), Err(Error::MagnitudeOverflow));
        assert_eq!(mag(12).checked_value::<f64>(), Ok(12.0));
        let sqrt2 = mag(2).pow(Ratio::new(1, 2));
        assert!((sqrt2.checked_value::<f64>().unwrap() - 2f64.sqrt()).abs() < 1e-15);
        assert_eq!(sqrt2.checked_value::<i32>(), Err(Error::FractionalPowerUnsupported));
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        assert_eq!(Magnitude::from_int(0), Err(Error::NotPositive(0)));
        assert_eq!(Magnitude::from_int(-5), Err(Error::NotPositive(-5)));
    }

    #[test]
    fn multiply_divide_cancels() {
        let a = mag(360);
        let b = mag(42);
        assert_eq!(a.clone() * b.clone() / b.clone(), a);
        assert_eq!(a.clone() * a.invert(), Magnitude::one());
    }

    #[test]
    fn ratio_construction_folds_exponent() {
        let km = Magnitude::from_ratio(Ratio::new(1000, 1)).unwrap();
        assert_eq!(km, mag(1000));
        let milli = Magnitude::from_ratio(Ratio::new(1, 1000)).unwrap();
        assert_eq!(milli, mag(1000).invert());
    }

    #[test]
    fn numerator_and_denominator_split() {
        let r = mag(45) / mag(8); // 3^2 * 5 / 2^3
        assert_eq!(r.numerator(), mag(45));
        assert_eq!(r.denominator(), mag(8));
        // The irrational/fractional residue of a rational magnitude is one.
        let residue = &r * &(r.denominator() / r.numerator());
        assert!(residue.is_one());
    }

    #[test]
    fn pi_is_excluded_from_exact_evaluation() {
        let m = Magnitude::pi();
        assert!(!m.is_rational());
        assert_eq!(m.checked_value_i64(), Err(Error::FractionalPowerUnsupported));
        assert!((m.value_f64() - core::f64::consts::PI).abs() < 1e-15);
        // Pi sorts between 3 and 5.
        let product = mag(15) * m.clone();
        let bases: Vec<_> = product.factors().iter().map(|bp| bp.base).collect();
        assert_eq!(bases, vec![MagBase::Prime(3), MagBase::Pi, MagBase::Prime(5)]);
    }

    #[test]
    fn fractional_powers_reject_exact_evaluation() {
        let sqrt2 = mag(2).pow(Ratio::new(1, 2));
        assert_eq!(sqrt2.checked_value_i64(), Err(Error::FractionalPowerUnsupported));
        assert!((sqrt2.value_f64() - 2f64.sqrt()).abs() < 1e-15);
        // But squaring restores exactness.
        assert_eq!(sqrt2.pow(Ratio::from_int(2)).checked_value_i64().unwrap(), 2);
    }

    #[test]
    fn overflow_is_detected_not_wrapped() {
        let big = mag(2).pow(Ratio::from_int(200));
        assert_eq!(big.checked_value_i64(), Err(Error::MagnitudeOverflow));
    }

    #[test]
    fn zero_power_yields_identity() {
        assert!(mag(60).pow(Ratio::ZERO).is_one());
    }

    #[test]
    fn power_of_ten_extraction() {
        assert_eq!(mag(2000).extract_power_of_10(), 3);
        assert_eq!(mag(4).extract_power_of_10(), 0);
        assert_eq!(mag(50).extract_power_of_10(), 1);
    }
}
