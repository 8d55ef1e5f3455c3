//! Exact rational numbers with a power-of-ten exponent.
//!
//! [`Ratio`] stores `num / den * 10^exp`. The extra exponent field keeps very
//! large and very small ratios representable without overflowing `i64`:
//! normalization strips every factor of ten out of the numerator and
//! denominator and folds it into `exp`, so the stored integers stay small
//! across long chains of multiplications (e.g. metric prefix ladders).
//!
//! All operators return normalized values and perform their intermediate
//! arithmetic in a widened `i128` before an explicit, range-checked narrowing
//! back to `i64`.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact rational scale factor: `num / den * 10^exp`.
///
/// Invariants (maintained by every constructor and operator):
///
/// - `den > 0`; the sign lives on `num`.
/// - `num` and `den` are coprime.
/// - neither `num` nor `den` is divisible by ten (those factors live in
///   `exp`); zero is stored as `0/1 * 10^0`.
///
/// Equality is therefore structural: two ratios denote the same rational
/// number iff their fields are identical.
///
/// ```rust
/// use symunit_core::Ratio;
///
/// let half = Ratio::new(5, 10);
/// assert_eq!(half, Ratio::new(1, 2));
/// assert_eq!(Ratio::new(2000, 1), Ratio::new_scaled(2, 1, 3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Ratio {
    num: i64,
    den: i64,
    exp: i32,
}

impl Ratio {
    /// The zero ratio.
    pub const ZERO: Ratio = Ratio { num: 0, den: 1, exp: 0 };

    /// The unit ratio.
    pub const ONE: Ratio = Ratio { num: 1, den: 1, exp: 0 };

    /// Creates a normalized ratio `num / den`.
    ///
    /// # Panics
    ///
    /// Panics if `den == 0`; a zero denominator is a programming error, not a
    /// recoverable condition.
    pub fn new(num: i64, den: i64) -> Self {
        Self::new_scaled(num, den, 0)
    }

    /// Creates a normalized ratio `num / den * 10^exp`.
    ///
    /// # Panics
    ///
    /// Panics if `den == 0`.
    pub fn new_scaled(num: i64, den: i64, exp: i32) -> Self {
        assert!(den != 0, "ratio denominator must not be zero");
        normalize(i128::from(num), i128::from(den), exp)
    }

    /// Creates the integer ratio `n / 1`.
    pub fn from_int(n: i64) -> Self {
        Self::new(n, 1)
    }

    /// The normalized numerator.
    pub fn num(&self) -> i64 {
        self.num
    }

    /// The normalized denominator (always positive).
    pub fn den(&self) -> i64 {
        self.den
    }

    /// The power-of-ten exponent.
    pub fn exp(&self) -> i32 {
        self.exp
    }

    /// Whether this ratio is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Whether this ratio is exactly one.
    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    /// Whether this ratio denotes a (signed) integer.
    ///
    /// Exact and overflow-free: instead of expanding `num * 10^exp`, the check
    /// computes `gcd(num * 10^exp, den)` through modular exponentiation.
    pub fn is_integral(&self) -> bool {
        if self.num == 0 {
            return true;
        }
        if self.exp < 0 {
            // A normalized numerator carries no factor of ten, so a negative
            // exponent can never cancel back out.
            return false;
        }
        gcd_pow10(self.num.unsigned_abs(), self.exp as u32, self.den as u64) == self.den as u64
    }

    /// The integer part of this ratio, truncated toward zero.
    ///
    /// # Panics
    ///
    /// Panics if the integer part does not fit `i64`.
    pub fn trunc(&self) -> i64 {
        if self.num == 0 {
            return 0;
        }
        let n = i128::from(self.num);
        let d = i128::from(self.den);
        let q = if self.exp >= 0 {
            n.checked_mul(pow10_i128(self.exp as u32)).expect("ratio exponent out of range") / d
        } else {
            // A scale too large for i128 dwarfs any representable numerator.
            match 10i128
                .checked_pow(self.exp.unsigned_abs())
                .and_then(|p| d.checked_mul(p))
            {
                Some(scale) => n / scale,
                None => 0,
            }
        };
        i64::try_from(q).expect("ratio integer part out of range")
    }

    /// The absolute value.
    pub fn abs(&self) -> Self {
        Ratio { num: self.num.abs(), ..*self }
    }

    /// The multiplicative inverse.
    ///
    /// # Panics
    ///
    /// Panics on zero; use [`Ratio::checked_recip`] for a fallible form.
    pub fn recip(&self) -> Self {
        self.checked_recip().expect("reciprocal of zero ratio")
    }

    /// The multiplicative inverse, rejecting zero.
    pub fn checked_recip(&self) -> Result<Self> {
        if self.num == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(normalize(i128::from(self.den), i128::from(self.num), -self.exp))
    }

    /// Division that rejects a zero divisor instead of panicking.
    pub fn checked_div(&self, rhs: &Ratio) -> Result<Self> {
        Ok(*self * rhs.checked_recip()?)
    }

    /// Approximate floating value, for widened floating evaluation only.
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64 * 10f64.powi(self.exp)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ZERO
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalization helpers
// ─────────────────────────────────────────────────────────────────────────────

fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn pow10_i128(e: u32) -> i128 {
    10i128.checked_pow(e).expect("ratio exponent out of range")
}

/// Reduces a widened `num / den * 10^exp` and narrows it back to `i64` with an
/// explicit range check. This is the single narrowing point of the module;
/// widening never happens implicitly.
fn normalize(mut num: i128, mut den: i128, mut exp: i32) -> Ratio {
    debug_assert!(den != 0);
    if num == 0 {
        return Ratio::ZERO;
    }
    if den < 0 {
        num = -num;
        den = -den;
    }
    let g = gcd_u128(num.unsigned_abs(), den as u128) as i128;
    num /= g;
    den /= g;
    while num % 10 == 0 {
        num /= 10;
        exp += 1;
    }
    while den % 10 == 0 {
        den /= 10;
        exp -= 1;
    }
    let num = i64::try_from(num).expect("ratio numerator out of range");
    let den = i64::try_from(den).expect("ratio denominator out of range");
    Ratio { num, den, exp }
}

/// `gcd(a * 10^e, b)` without materializing `a * 10^e`, via
/// `(a * (10^e mod b)) mod b`.
fn gcd_pow10(a: u64, e: u32, b: u64) -> u64 {
    debug_assert!(a > 0 && b > 0);
    let m = u128::from(b);
    let mut pow: u128 = 1;
    let mut base = 10u128 % m;
    let mut e = e;
    while e > 0 {
        if e & 1 == 1 {
            pow = pow * base % m;
        }
        base = base * base % m;
        e >>= 1;
    }
    let rem = (u128::from(a) % m) * pow % m;
    gcd_u128(m, rem) as u64
}

/// Scales `r` down to the exponent `exp` (which must not exceed `r.exp`),
/// returning the widened numerator/denominator pair.
fn align_to_exp(r: &Ratio, exp: i32) -> (i128, i128) {
    debug_assert!(exp <= r.exp);
    let shift = (r.exp - exp) as u32;
    let num = i128::from(r.num)
        .checked_mul(pow10_i128(shift))
        .expect("ratio exponent spread out of range");
    (num, i128::from(r.den))
}

// ─────────────────────────────────────────────────────────────────────────────
// Operator implementations
// ─────────────────────────────────────────────────────────────────────────────

impl Add for Ratio {
    type Output = Ratio;

    fn add(self, rhs: Ratio) -> Ratio {
        if self.num == 0 {
            return rhs;
        }
        if rhs.num == 0 {
            return self;
        }
        let exp = self.exp.min(rhs.exp);
        let (ln, ld) = align_to_exp(&self, exp);
        let (rn, rd) = align_to_exp(&rhs, exp);
        normalize(ln * rd + rn * ld, ld * rd, exp)
    }
}

impl Sub for Ratio {
    type Output = Ratio;

    fn sub(self, rhs: Ratio) -> Ratio {
        self + (-rhs)
    }
}

impl Neg for Ratio {
    type Output = Ratio;

    fn neg(self) -> Ratio {
        Ratio { num: -self.num, ..self }
    }
}

impl Mul for Ratio {
    type Output = Ratio;

    fn mul(self, rhs: Ratio) -> Ratio {
        // Cross-reduce first so the widened products stay as small as possible.
        let g1 = gcd_u128(self.num.unsigned_abs() as u128, rhs.den as u128) as i64;
        let g2 = gcd_u128(rhs.num.unsigned_abs() as u128, self.den as u128) as i64;
        normalize(
            i128::from(self.num / g1) * i128::from(rhs.num / g2),
            i128::from(self.den / g2) * i128::from(rhs.den / g1),
            self.exp + rhs.exp,
        )
    }
}

impl Div for Ratio {
    type Output = Ratio;

    /// # Panics
    ///
    /// Panics on a zero divisor; use [`Ratio::checked_div`] for a fallible
    /// form.
    fn div(self, rhs: Ratio) -> Ratio {
        self * rhs.recip()
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let ls = self.num.signum();
        let rs = other.num.signum();
        if ls != rs {
            return ls.cmp(&rs);
        }
        if ls == 0 {
            return Ordering::Equal;
        }
        // Same nonzero sign: cross-multiply in i128 and shift the side with
        // the larger exponent. If the shifted product overflows, its
        // magnitude certainly exceeds the other side's, so the comparison is
        // decided by the shared sign.
        let shift10 = |v: i128, e: u32| 10i128.checked_pow(e).and_then(|p| v.checked_mul(p));
        let lhs = i128::from(self.num) * i128::from(other.den);
        let rhs = i128::from(other.num) * i128::from(self.den);
        let spread = self.exp - other.exp;
        if spread >= 0 {
            match shift10(lhs, spread as u32) {
                Some(l) => l.cmp(&rhs),
                None => if ls > 0 { Ordering::Greater } else { Ordering::Less },
            }
        } else {
            match shift10(rhs, spread.unsigned_abs()) {
                Some(r) => lhs.cmp(&r),
                None => if ls > 0 { Ordering::Less } else { Ordering::Greater },
            }
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.num)?;
        if self.den != 1 {
            write!(f, "/{}", self.den)?;
        }
        if self.exp != 0 {
            write!(f, "e{}", self.exp)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            num: i64,
            den: i64,
            #[serde(default)]
            exp: i32,
        }
        let raw = Raw::deserialize(deserializer)?;
        if raw.den == 0 {
            return Err(serde::de::Error::custom("ratio denominator must not be zero"));
        }
        Ok(Ratio::new_scaled(raw.num, raw.den, raw.exp))
    }
}
