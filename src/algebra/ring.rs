use core::ops::{Add, Div, Mul, Sub};

/// A commutative ring usable as the coefficient type of a [`Polynomial`].
///
/// This trait assumes:
/// - (R, +) is an abelian group with identity `zero()`
/// - multiplication is associative and distributes over addition
/// - `/` is defined at least for the divisors the caller actually uses
///
/// The multiplicative identity and the absolute value are optional
/// capabilities. Implementors that have them override [`Ring::one`] and
/// [`Ring::abs`]; rendering is the only consumer.
///
/// [`Polynomial`]: crate::Polynomial
pub trait Ring:
    Sized
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity, if the ring has one.
    #[inline]
    fn one() -> Option<Self> {
        None
    }

    /// Absolute value, if it is meaningful for this ring.
    #[inline]
    fn abs(&self) -> Option<Self> {
        None
    }

    /// Ring equality.
    ///
    /// Exact for every ring except approximate numeric types, which compare
    /// within an epsilon.
    #[inline]
    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.approx_eq(&Self::zero())
    }

    /// Additive inverse, computed as `zero() - self`.
    #[inline]
    fn negate(&self) -> Self {
        Self::zero() - self.clone()
    }

    /// Exact division: `Some(q)` with `q * rhs == self`, or `None` when no
    /// such quotient exists in the ring.
    #[inline]
    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            None
        } else {
            Some(self.clone() / rhs.clone())
        }
    }
}

macro_rules! impl_ring_for_int {
    ($($t:ty),*) => {$(
        impl Ring for $t {
            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Option<Self> {
                Some(1)
            }

            /// `None` for `MIN`, whose magnitude does not fit.
            #[inline]
            fn abs(&self) -> Option<Self> {
                <$t>::checked_abs(*self)
            }

            /// Integers are not a field: only exact quotients are accepted.
            #[inline]
            fn checked_div(&self, rhs: &Self) -> Option<Self> {
                match <$t>::checked_rem(*self, *rhs) {
                    Some(0) => <$t>::checked_div(*self, *rhs),
                    _ => None,
                }
            }
        }
    )*};
}

impl_ring_for_int!(i32, i64, i128);

macro_rules! impl_ring_for_float {
    ($($t:ident),*) => {$(
        impl Ring for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Option<Self> {
                Some(1.0)
            }

            #[inline]
            fn abs(&self) -> Option<Self> {
                Some(<$t>::abs(*self))
            }

            /// Absolute difference below the type's machine epsilon.
            #[inline]
            fn approx_eq(&self, other: &Self) -> bool {
                <$t>::abs(*self - *other) < $t::EPSILON
            }
        }
    )*};
}

impl_ring_for_float!(f32, f64);
