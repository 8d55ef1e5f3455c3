//! Generic canonical expression algebra.
//!
//! Dimensions, quantity specifications and units are all products of named
//! leaf atoms raised to rational powers. This module implements that algebra
//! once, generically over the atom type: an [`Expression`] is a fully
//! cancelled numerator/denominator pair of [`AtomPower`]s kept sorted by the
//! atom's total order, so structurally equivalent products (`A*B*C` versus
//! `C*B*A`) compare equal by derived `==`.
//!
//! Canonical invariants, enforced by construction and never by a separate
//! simplification pass:
//! - each list is sorted by strictly increasing atom and holds unique atoms,
//! - every stored power is positive (negative powers live on the other side),
//! - no atom occurs in both lists,
//! - the identity (the "one" of the algebra) is the empty pair.

use core::cmp::Ordering;
use core::fmt;

use crate::ratio::Ratio;

#[cfg(feature = "serde")]
use serde::Serialize;

/// An atom raised to a rational power.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AtomPower<A> {
    /// The leaf atom.
    pub atom: A,
    /// The rational exponent; positive inside a canonical [`Expression`].
    pub power: Ratio,
}

/// A canonical product of atom-powers, split into numerator and denominator.
/// The derived ordering is an arbitrary total order used only to key interned
/// composite atoms; it has no numeric meaning.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Expression<A> {
    numerator: Vec<AtomPower<A>>,
    denominator: Vec<AtomPower<A>>,
}

impl<A> Default for Expression<A> {
    fn default() -> Self {
        Expression { numerator: Vec::new(), denominator: Vec::new() }
    }
}

impl<A: Ord + Clone> Expression<A> {
    /// The identity expression (dimensionless "one").
    pub fn one() -> Self {
        Self::default()
    }

    /// A bare atom to the first power.
    pub fn from_atom(atom: A) -> Self {
        Expression {
            numerator: vec![AtomPower { atom, power: Ratio::ONE }],
            denominator: Vec::new(),
        }
    }

    /// Builds a canonical expression from arbitrary (unsorted, duplicated,
    /// sign-mixed) numerator and denominator lists.
    pub fn from_parts(num: Vec<AtomPower<A>>, den: Vec<AtomPower<A>>) -> Self {
        let num = consolidate(num);
        let den = consolidate(den);
        let (num, den) = separate_signs(num, den);
        let (numerator, denominator) = simplify(num, den);
        Expression { numerator, denominator }
    }

    /// The cancelled numerator, sorted by atom.
    pub fn numerator(&self) -> &[AtomPower<A>] {
        &self.numerator
    }

    /// The cancelled denominator, sorted by atom.
    pub fn denominator(&self) -> &[AtomPower<A>] {
        &self.denominator
    }

    /// Whether this is the identity expression.
    pub fn is_one(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// Every atom with its signed exponent: numerator entries positive,
    /// denominator entries negative.
    pub fn atom_powers(&self) -> impl Iterator<Item = (&A, Ratio)> {
        let num = self.numerator.iter().map(|ap| (&ap.atom, ap.power));
        let den = self.denominator.iter().map(|ap| (&ap.atom, -ap.power));
        num.chain(den)
    }

    /// The product of two expressions.
    pub fn multiply(&self, rhs: &Self) -> Self {
        // Identity fast paths skip the consolidate/simplify machinery.
        if self.is_one() {
            return rhs.clone();
        }
        if rhs.is_one() {
            return self.clone();
        }
        let mut num = self.numerator.clone();
        num.extend(rhs.numerator.iter().cloned());
        let mut den = self.denominator.clone();
        den.extend(rhs.denominator.iter().cloned());
        Self::from_parts(num, den)
    }

    /// The quotient of two expressions.
    pub fn divide(&self, rhs: &Self) -> Self {
        self.multiply(&rhs.invert())
    }

    /// Swaps numerator and denominator.
    pub fn invert(&self) -> Self {
        Expression { numerator: self.denominator.clone(), denominator: self.numerator.clone() }
    }

    /// Raises the expression to a rational power; zero yields the identity,
    /// a negative power additionally inverts.
    pub fn pow(&self, p: Ratio) -> Self {
        if p.is_zero() {
            return Self::one();
        }
        let scale = |list: &[AtomPower<A>]| {
            list.iter()
                .map(|ap| AtomPower { atom: ap.atom.clone(), power: ap.power * p })
                .collect::<Vec<_>>()
        };
        Self::from_parts(scale(&self.numerator), scale(&self.denominator))
    }

    /// Projects every atom into another expression algebra and multiplies the
    /// images back together, preserving exponents.
    ///
    /// This is how a quantity-specification expression yields its dimension
    /// and how a unit expression yields the dimension it measures.
    pub fn map<B, F>(&self, mut projection: F) -> Expression<B>
    where
        B: Ord + Clone,
        F: FnMut(&A) -> Expression<B>,
    {
        let mut result = Expression::one();
        for (atom, power) in self.atom_powers() {
            result = result.multiply(&projection(atom).pow(power));
        }
        result
    }
}

impl<A: fmt::Display> fmt::Display for Expression<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_list<A: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            list: &[AtomPower<A>],
        ) -> fmt::Result {
            for (i, ap) in list.iter().enumerate() {
                if i > 0 {
                    write!(f, "·")?;
                }
                if ap.power.is_one() {
                    write!(f, "{}", ap.atom)?;
                } else {
                    write!(f, "{}^({})", ap.atom, ap.power)?;
                }
            }
            Ok(())
        }

        if self.numerator.is_empty() && self.denominator.is_empty() {
            return write!(f, "1");
        }
        if self.numerator.is_empty() {
            write!(f, "1")?;
        } else {
            write_list(f, &self.numerator)?;
        }
        if !self.denominator.is_empty() {
            write!(f, "/")?;
            write_list(f, &self.denominator)?;
        }
        Ok(())
    }
}

/// Sorts a flat list by atom and merges same-atom entries by summing their
/// exponents, dropping entries that sum to zero.
fn consolidate<A: Ord + Clone>(mut list: Vec<AtomPower<A>>) -> Vec<AtomPower<A>> {
    list.sort_by(|a, b| a.atom.cmp(&b.atom));
    let mut out: Vec<AtomPower<A>> = Vec::with_capacity(list.len());
    for ap in list {
        match out.last_mut() {
            Some(last) if last.atom == ap.atom => {
                last.power = last.power + ap.power;
                if last.power.is_zero() {
                    out.pop();
                }
            }
            _ => out.push(ap),
        }
    }
    out
}

/// Moves negative-power entries to the opposite side (negated), keeping both
/// lists sorted. Inputs must already be consolidated.
fn separate_signs<A: Ord + Clone>(
    num: Vec<AtomPower<A>>,
    den: Vec<AtomPower<A>>,
) -> (Vec<AtomPower<A>>, Vec<AtomPower<A>>) {
    fn split<A>(list: Vec<AtomPower<A>>) -> (Vec<AtomPower<A>>, Vec<AtomPower<A>>) {
        let (pos, neg): (Vec<_>, Vec<_>) =
            list.into_iter().partition(|ap| ap.power > Ratio::ZERO);
        let flipped =
            neg.into_iter().map(|ap| AtomPower { atom: ap.atom, power: -ap.power }).collect();
        (pos, flipped)
    }
    let (num_pos, num_flipped) = split(num);
    let (den_pos, den_flipped) = split(den);
    (merge_sorted(num_pos, den_flipped), merge_sorted(den_pos, num_flipped))
}

/// Merges two sorted, duplicate-free lists. Atoms shared between the two
/// inputs sum their exponents.
fn merge_sorted<A: Ord + Clone>(
    lhs: Vec<AtomPower<A>>,
    rhs: Vec<AtomPower<A>>,
) -> Vec<AtomPower<A>> {
    let mut out = Vec::with_capacity(lhs.len() + rhs.len());
    let mut lhs = lhs.into_iter().peekable();
    let mut rhs = rhs.into_iter().peekable();
    loop {
        let order = match (lhs.peek(), rhs.peek()) {
            (Some(l), Some(r)) => l.atom.cmp(&r.atom),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        match order {
            Ordering::Less => out.push(lhs.next().unwrap()),
            Ordering::Greater => out.push(rhs.next().unwrap()),
            Ordering::Equal => {
                let l = lhs.next().unwrap();
                let r = rhs.next().unwrap();
                let power = l.power + r.power;
                if !power.is_zero() {
                    out.push(AtomPower { atom: l.atom, power });
                }
            }
        }
    }
    out
}

/// Cancels atoms present in both lists by a lock-step merge-intersection.
///
/// For a shared atom the exponents are subtracted and the remainder goes back
/// to whichever side held the larger exponent. Both inputs must be
/// consolidated, sorted and all-positive; linear in the combined length.
fn simplify<A: Ord + Clone>(
    num: Vec<AtomPower<A>>,
    den: Vec<AtomPower<A>>,
) -> (Vec<AtomPower<A>>, Vec<AtomPower<A>>) {
    let mut out_num = Vec::with_capacity(num.len());
    let mut out_den = Vec::with_capacity(den.len());
    let mut num = num.into_iter().peekable();
    let mut den = den.into_iter().peekable();
    loop {
        let order = match (num.peek(), den.peek()) {
            (Some(n), Some(d)) => n.atom.cmp(&d.atom),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        match order {
            Ordering::Less => out_num.push(num.next().unwrap()),
            Ordering::Greater => out_den.push(den.next().unwrap()),
            Ordering::Equal => {
                let n = num.next().unwrap();
                let d = den.next().unwrap();
                match n.power.cmp(&d.power) {
                    Ordering::Greater => {
                        out_num.push(AtomPower { atom: n.atom, power: n.power - d.power });
                    }
                    Ordering::Less => {
                        out_den.push(AtomPower { atom: d.atom, power: d.power - n.power });
                    }
                    Ordering::Equal => {}
                }
            }
        }
    }
    (out_num, out_den)
}
