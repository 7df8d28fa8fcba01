//! Integers modulo a runtime modulus.
//!
//! Unlike a const-generic prime field, the modulus of a [`Residue`] is a value
//! chosen at runtime and carried by every bound element. The ring identities
//! returned by [`Ring::zero`] and [`Ring::one`] are *unbound*: they have no
//! modulus of their own and adopt the modulus of the bound residue they are
//! combined or compared with. This is what lets `Polynomial<Residue>` fill
//! absent coefficients without knowing the modulus up front.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use thiserror::Error;

use crate::algebra::ring::Ring;
use crate::utils::{egcd, is_prime};

/// Error type for modulus validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModulusError {
    /// Moduli 0 and 1 do not give a useful ring.
    #[error("modulus must be at least 2, got {0}")]
    TooSmall(u64),
    /// Representatives are stored as `i64`.
    #[error("modulus {0} exceeds the largest supported modulus {max}", max = Modulus::MAX)]
    TooLarge(u64),
}

/// A validated modulus `n >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modulus(u64);

impl Modulus {
    /// Largest supported modulus.
    pub const MAX: u64 = i64::MAX as u64;

    /// Create a new validated modulus.
    ///
    /// # Errors
    ///
    /// Returns `ModulusError::TooSmall` for 0 and 1, and
    /// `ModulusError::TooLarge` above [`Modulus::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::{Modulus, ModulusError};
    ///
    /// assert_eq!(Modulus::new(7).unwrap().get(), 7);
    /// assert_eq!(Modulus::new(1), Err(ModulusError::TooSmall(1)));
    /// ```
    pub const fn new(n: u64) -> Result<Self, ModulusError> {
        if n < 2 {
            return Err(ModulusError::TooSmall(n));
        }
        if n > Self::MAX {
            return Err(ModulusError::TooLarge(n));
        }
        Ok(Self(n))
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether `Z/nZ` is a field.
    pub const fn is_prime(self) -> bool {
        is_prime(self.0)
    }

    #[inline]
    const fn as_i128(self) -> i128 {
        self.0 as i128
    }

    /// Canonical representative of `k` in `[0, n)`.
    #[inline]
    const fn reduce(self, k: i128) -> i64 {
        k.rem_euclid(self.as_i128()) as i64
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy)]
enum Repr {
    /// An integer not yet reduced by any modulus.
    Unbound(i64),
    /// A representative in `[0, modulus)`.
    Bound { value: i64, modulus: Modulus },
}

/// Both operands of a binary operation, brought to a common modulus.
enum Operands {
    Unbound(i64, i64),
    Bound(i64, i64, Modulus),
}

/// An element of `Z/nZ`.
#[derive(Clone, Copy)]
pub struct Residue(Repr);

impl Residue {
    /// Create a residue, reducing `value` into `[0, n)`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::{Modulus, Residue};
    ///
    /// let z7 = Modulus::new(7).unwrap();
    /// assert_eq!(Residue::new(-1, z7).value(), 6);
    /// assert_eq!(Residue::new(15, z7).value(), 1);
    /// ```
    pub const fn new(value: i64, modulus: Modulus) -> Self {
        Self(Repr::Bound {
            value: modulus.reduce(value as i128),
            modulus,
        })
    }

    /// The canonical representative, or the plain integer of an unbound
    /// identity.
    pub const fn value(self) -> i64 {
        match self.0 {
            Repr::Unbound(v) => v,
            Repr::Bound { value, .. } => value,
        }
    }

    /// The modulus, or `None` for an unbound identity.
    pub const fn modulus(self) -> Option<Modulus> {
        match self.0 {
            Repr::Unbound(_) => None,
            Repr::Bound { modulus, .. } => Some(modulus),
        }
    }

    /// Multiplicative inverse, if `gcd(value, n) = 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::{Modulus, Residue};
    ///
    /// let z10 = Modulus::new(10).unwrap();
    /// assert_eq!(Residue::new(3, z10).inverse().map(Residue::value), Some(7));
    /// assert!(Residue::new(4, z10).inverse().is_none());
    /// ```
    pub fn inverse(self) -> Option<Self> {
        match self.0 {
            Repr::Unbound(v) if v == 1 || v == -1 => Some(self),
            Repr::Unbound(_) => None,
            Repr::Bound { value, modulus } => {
                let (g, x, _) = egcd(value as i128, modulus.as_i128());
                if g != 1 {
                    return None;
                }
                Some(Self(Repr::Bound {
                    value: modulus.reduce(x),
                    modulus,
                }))
            }
        }
    }

    /// A uniformly random element of `Z/nZ`.
    #[cfg(feature = "rand")]
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R, modulus: Modulus) -> Self {
        Self::new(rng.gen_range(0..modulus.get()) as i64, modulus)
    }

    const fn unbound(value: i64) -> Self {
        Self(Repr::Unbound(value))
    }

    const fn bound(value: i128, modulus: Modulus) -> Self {
        Self(Repr::Bound {
            value: modulus.reduce(value),
            modulus,
        })
    }

    /// Lift both operands to a shared modulus.
    ///
    /// Returns `None` when both are bound to different moduli.
    fn operands(self, rhs: Self) -> Option<Operands> {
        let ops = match (self.0, rhs.0) {
            (Repr::Unbound(a), Repr::Unbound(b)) => Operands::Unbound(a, b),
            (Repr::Bound { value, modulus }, Repr::Unbound(b)) => {
                Operands::Bound(value, modulus.reduce(b as i128), modulus)
            }
            (Repr::Unbound(a), Repr::Bound { value, modulus }) => {
                Operands::Bound(modulus.reduce(a as i128), value, modulus)
            }
            (
                Repr::Bound { value: a, modulus: m },
                Repr::Bound { value: b, modulus: n },
            ) => {
                if m != n {
                    return None;
                }
                Operands::Bound(a, b, m)
            }
        };
        Some(ops)
    }

    fn expect_operands(self, rhs: Self) -> Operands {
        match self.operands(rhs) {
            Some(ops) => ops,
            None => panic!(
                "residue arithmetic across different moduli: {:?} and {:?}",
                self, rhs
            ),
        }
    }
}

impl fmt::Debug for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Unbound(v) => write!(f, "Residue({})", v),
            Repr::Bound { value, modulus } => write!(f, "Residue<{}>({})", modulus, value),
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/* ---- comparisons ---- */

/// Equality of canonical representatives under a shared modulus.
///
/// Not an equivalence relation: an unbound identity equals a bound residue
/// of every modulus, so `0 == 0 mod 5` and `0 == 0 mod 7` while
/// `0 mod 5 != 0 mod 7`. For that reason `Residue` is not `Eq`.
impl PartialEq for Residue {
    fn eq(&self, other: &Self) -> bool {
        match self.operands(*other) {
            Some(Operands::Unbound(a, b)) | Some(Operands::Bound(a, b, _)) => a == b,
            None => false,
        }
    }
}

/// Residues are ordered by their canonical representatives.
impl PartialOrd for Residue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.operands(*other)? {
            Operands::Unbound(a, b) | Operands::Bound(a, b, _) => Some(a.cmp(&b)),
        }
    }
}

/* ---- standard arithmetic operators ---- */

impl Add for Residue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.expect_operands(rhs) {
            Operands::Unbound(a, b) => Self::unbound(a.wrapping_add(b)),
            Operands::Bound(a, b, m) => Self::bound(a as i128 + b as i128, m),
        }
    }
}

impl Sub for Residue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.expect_operands(rhs) {
            Operands::Unbound(a, b) => Self::unbound(a.wrapping_sub(b)),
            Operands::Bound(a, b, m) => Self::bound(a as i128 - b as i128, m),
        }
    }
}

impl Mul for Residue {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.expect_operands(rhs) {
            Operands::Unbound(a, b) => Self::unbound(a.wrapping_mul(b)),
            Operands::Bound(a, b, m) => Self::bound(a as i128 * b as i128, m),
        }
    }
}

impl Neg for Residue {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.0 {
            Repr::Unbound(v) => Self::unbound(v.wrapping_neg()),
            Repr::Bound { value, modulus } => Self::bound(-(value as i128), modulus),
        }
    }
}

/// Division implemented via multiplicative inverse.
impl Div for Residue {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Ring::checked_div(&self, &rhs).expect("residue divisor is not a unit")
    }
}

/* ---- implement Ring ---- */

impl Ring for Residue {
    #[inline]
    fn zero() -> Self {
        Self::unbound(0)
    }

    #[inline]
    fn one() -> Option<Self> {
        Some(Self::unbound(1))
    }

    fn negate(&self) -> Self {
        -*self
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        match self.operands(*rhs)? {
            Operands::Unbound(a, b) => Ring::checked_div(&a, &b).map(Self::unbound),
            Operands::Bound(a, b, m) => {
                let inv = Self::new(b, m).inverse()?;
                Some(Self::bound(a as i128 * inv.value() as i128, m))
            }
        }
    }
}

/* ---- serde ---- */

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ResidueRepr {
    value: i64,
    modulus: Option<u64>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Residue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ResidueRepr {
            value: self.value(),
            modulus: self.modulus().map(Modulus::get),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Residue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = ResidueRepr::deserialize(deserializer)?;
        match repr.modulus {
            None => Ok(Self::unbound(repr.value)),
            Some(n) => {
                let modulus = Modulus::new(n).map_err(serde::de::Error::custom)?;
                Ok(Self::new(repr.value, modulus))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(n: u64) -> Modulus {
        Modulus::new(n).unwrap()
    }

    #[test]
    fn modulus_validation() {
        assert_eq!(Modulus::new(0), Err(ModulusError::TooSmall(0)));
        assert_eq!(Modulus::new(1), Err(ModulusError::TooSmall(1)));
        assert_eq!(Modulus::new(u64::MAX), Err(ModulusError::TooLarge(u64::MAX)));
        assert_eq!(Modulus::new(2).unwrap().get(), 2);
        assert!(z(13).is_prime());
        assert!(!z(12).is_prime());
    }

    #[test]
    fn new_reduces() {
        assert_eq!(Residue::new(9, z(7)).value(), 2);
        assert_eq!(Residue::new(-9, z(7)).value(), 5);
        assert_eq!(Residue::new(0, z(7)).value(), 0);
    }

    #[test]
    fn arithmetic_mod_7() {
        let a = Residue::new(5, z(7));
        let b = Residue::new(4, z(7));
        assert_eq!((a + b).value(), 2);
        assert_eq!((a - b).value(), 1);
        assert_eq!((b - a).value(), 6);
        assert_eq!((a * b).value(), 6);
        assert_eq!((-a).value(), 2);
        assert_eq!(((a / b) * b), a);
    }

    #[test]
    fn arithmetic_mod_2() {
        let one = Residue::new(1, z(2));
        assert_eq!((one + one).value(), 0);
        assert_eq!((one - one - one).value(), 1);
        assert!((one + one).is_zero());
    }

    #[test]
    fn unbound_identities_adopt_modulus() {
        let a = Residue::new(3, z(5));
        let zero = Residue::zero();
        let one = Residue::one().unwrap();

        assert_eq!(zero.modulus(), None);
        assert_eq!((a + zero).modulus(), Some(z(5)));
        assert_eq!(a + zero, a);
        assert_eq!(a * one, a);
        assert_eq!((zero - a).value(), 2);
        assert_eq!(Residue::new(5, z(5)), zero);
        assert_eq!(Residue::new(6, z(5)), one);
    }

    #[test]
    fn different_moduli_are_unequal() {
        assert_ne!(Residue::new(1, z(3)), Residue::new(1, z(5)));
        assert_eq!(
            Residue::new(1, z(3)).partial_cmp(&Residue::new(1, z(5))),
            None
        );
    }

    #[test]
    fn unbound_equality_is_not_transitive() {
        let zero = Residue::zero();
        let five = Residue::new(0, z(5));
        let seven = Residue::new(0, z(7));
        assert_eq!(zero, five);
        assert_eq!(zero, seven);
        assert_ne!(five, seven);
    }

    #[test]
    #[should_panic(expected = "different moduli")]
    fn mixing_moduli_panics() {
        let _ = Residue::new(1, z(3)) + Residue::new(1, z(5));
    }

    #[test]
    fn inverse_in_prime_modulus() {
        for v in 1..13 {
            let a = Residue::new(v, z(13));
            let inv = a.inverse().expect("units mod a prime are invertible");
            assert_eq!((a * inv).value(), 1);
        }
        assert!(Residue::new(0, z(13)).inverse().is_none());
    }

    #[test]
    fn checked_div_rejects_non_units() {
        let six = Residue::new(6, z(9));
        let three = Residue::new(3, z(9));
        assert_eq!(Ring::checked_div(&six, &three), None);
        let two = Residue::new(2, z(9));
        assert_eq!(Ring::checked_div(&six, &two).map(Residue::value), Some(3));
    }

    #[test]
    #[should_panic(expected = "not a unit")]
    fn division_by_zero_panics() {
        let _ = Residue::new(1, z(7)) / Residue::new(0, z(7));
    }

    #[test]
    fn ordering_by_representative() {
        assert!(Residue::new(2, z(7)) < Residue::new(5, z(7)));
        assert!(Residue::new(9, z(7)) < Residue::new(5, z(7)));
        assert!(!(Residue::new(3, z(7)) < Residue::zero()));
    }

    #[test]
    fn display_and_debug() {
        let a = Residue::new(12, z(7));
        assert_eq!(format!("{}", a), "5");
        assert_eq!(format!("{:?}", a), "Residue<7>(5)");
        assert_eq!(format!("{:?}", Residue::zero()), "Residue(0)");
    }

    #[cfg(feature = "rand")]
    #[test]
    fn random_is_bound_and_reduced() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(5);
        for n in [2, 7, Modulus::MAX] {
            for _ in 0..64 {
                let r = Residue::random(&mut rng, z(n));
                assert_eq!(r.modulus(), Some(z(n)));
                assert!(r.value() >= 0 && (r.value() as u64) < n);
            }
        }
    }
}
