use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};
use std::collections::BTreeMap;

use thiserror::Error;
use tracing::trace;

use crate::algebra::ring::Ring;

/// Errors that can occur during polynomial division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// The divisor is the zero polynomial.
    #[error("division by the zero polynomial")]
    DivisionByZero,
    /// The divisor's leading coefficient does not divide the running
    /// dividend's leading coefficient in the coefficient ring.
    #[error("leading coefficient of the divisor does not divide the term of degree {exponent}")]
    NotDivisible { exponent: usize },
    /// The operation needs a multiplicative identity the ring lacks.
    #[error("coefficient ring has no multiplicative identity")]
    NoIdentity,
}

/// Sparse univariate polynomial over a ring `T`.
///
/// Only non-zero coefficients are stored, keyed by exponent. The zero
/// polynomial has no stored terms and degree 0.
///
/// # Example
///
/// ```
/// use polyeuclid::Polynomial;
///
/// // x^2 - x + 6
/// let p = Polynomial::from_coeffs(vec![6i64, -1, 1]);
/// assert_eq!(p.degree(), 2);
/// assert_eq!(p.get_member(1), -1);
/// assert_eq!(p.to_string(), "x^2 - x + 6");
/// ```
#[derive(Clone)]
pub struct Polynomial<T> {
    coefficients: BTreeMap<usize, T>,
    degree: usize,
}

impl<T: Ring> Polynomial<T> {
    /// Create the zero polynomial.
    pub fn zero() -> Self {
        Self {
            coefficients: BTreeMap::new(),
            degree: 0,
        }
    }

    /// Create a constant polynomial.
    ///
    /// A zero constant gives the zero polynomial.
    pub fn constant(c: T) -> Self {
        Self::monomial(c, 0)
    }

    /// Create a monomial `c * x^n`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::Polynomial;
    ///
    /// let m = Polynomial::monomial(3i64, 2);
    /// assert_eq!(m.degree(), 2);
    /// assert_eq!(m.at(2), 12);
    /// ```
    pub fn monomial(c: T, n: usize) -> Self {
        let mut poly = Self::zero();
        poly.set_member(n, c);
        poly
    }

    /// Create a polynomial from coefficients in ascending order.
    ///
    /// `coeffs[i]` is the coefficient of `x^i`. Zero coefficients are
    /// dropped.
    pub fn from_coeffs(coeffs: Vec<T>) -> Self {
        let mut poly = Self::zero();
        for (i, c) in coeffs.into_iter().enumerate() {
            poly.set_member(i, c);
        }
        poly
    }

    /// Create a polynomial from `(exponent, coefficient)` pairs.
    ///
    /// Pairs sharing an exponent are summed.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let mut poly = Self::zero();
        for (exponent, c) in terms {
            let sum = poly.get_member(exponent) + c;
            poly.set_member(exponent, sum);
        }
        poly
    }

    /// The coefficient of `x^index`, or zero when there is no such term.
    pub fn get_member(&self, index: usize) -> T {
        self.coefficients
            .get(&index)
            .cloned()
            .unwrap_or_else(T::zero)
    }

    /// Set the coefficient of `x^index`.
    ///
    /// Assigning zero erases the term. The degree is re-derived afterwards.
    pub fn set_member(&mut self, index: usize, coefficient: T) {
        if coefficient.is_zero() {
            self.coefficients.remove(&index);
        } else {
            self.coefficients.insert(index, coefficient);
        }
        self.degree = self.coefficients.keys().next_back().copied().unwrap_or(0);
    }

    /// The highest exponent with a non-zero coefficient; 0 for the zero
    /// polynomial.
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn leading_coefficient(&self) -> T {
        self.get_member(self.degree)
    }

    /// True for the zero polynomial.
    pub fn is_null(&self) -> bool {
        self.degree == 0 && self.get_member(0).is_zero()
    }

    /// True for a non-zero polynomial of degree 0.
    pub fn is_constant(&self) -> bool {
        self.degree == 0 && !self.get_member(0).is_zero()
    }

    /// Stored terms as `(exponent, coefficient)`, highest exponent first.
    pub fn terms(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.coefficients.iter().rev().map(|(&e, c)| (e, c))
    }

    /// Number of non-zero terms.
    pub fn term_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: &T) -> Self {
        let mut scaled = Self::zero();
        if c.is_zero() {
            return scaled;
        }
        for (&exponent, coeff) in &self.coefficients {
            scaled.set_member(exponent, coeff.clone() * c.clone());
        }
        scaled
    }

    /// Evaluate the polynomial at `t` using Horner's method.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::Polynomial;
    ///
    /// // x^4 - 3x^3 - x + 6 at -1
    /// let p = Polynomial::from_coeffs(vec![6i64, -1, 0, -3, 1]);
    /// assert_eq!(p.at(-1), 11);
    /// ```
    pub fn at(&self, t: T) -> T {
        let mut terms = self.terms();
        let Some((mut power, lead)) = terms.next() else {
            return T::zero();
        };

        // Horner's rule, jumping over runs of absent terms with t^gap.
        let mut result = lead.clone();
        for (exponent, c) in terms {
            result = result * pow(&t, power - exponent) + c.clone();
            power = exponent;
        }
        if power > 0 {
            result = result * pow(&t, power);
        }
        result
    }

    /// Algebraic derivative.
    ///
    /// The coefficient `(p + 1) * a` of `x^p` is a sum of `p + 1` copies of
    /// `a` (formed by doubling), so no integer-to-ring conversion is
    /// required of `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::Polynomial;
    ///
    /// // d/dx (x^3 + 2x) = 3x^2 + 2
    /// let p = Polynomial::from_coeffs(vec![0i64, 2, 0, 1]);
    /// assert_eq!(p.derive(), Polynomial::from_coeffs(vec![2, 0, 3]));
    /// ```
    pub fn derive(&self) -> Self {
        if self.is_null() || self.is_constant() {
            return Self::zero();
        }

        let mut derivative = Self::zero();
        for (&exponent, coeff) in self.coefficients.range(1..) {
            derivative.set_member(exponent - 1, times(coeff, exponent));
        }
        derivative
    }

    /// Euclidean division: compute quotient and remainder.
    ///
    /// Returns `(q, r)` such that `self = q * divisor + r` and either `r` is
    /// zero or `deg(r) < deg(divisor)`.
    ///
    /// # Errors
    ///
    /// `PolynomialError::DivisionByZero` if the divisor is zero, and
    /// `PolynomialError::NotDivisible` if some leading coefficient of the
    /// running dividend is not divisible by the divisor's leading
    /// coefficient (this cannot happen over a field).
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::{Polynomial, PolynomialError};
    ///
    /// // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
    /// let dividend = Polynomial::from_coeffs(vec![1i64, 2, 1]);
    /// let divisor = Polynomial::from_coeffs(vec![1i64, 1]);
    /// let (q, r) = dividend.divide(&divisor).unwrap();
    ///
    /// assert_eq!(q, divisor);
    /// assert!(r.is_null());
    ///
    /// assert_eq!(
    ///     dividend.divide(&Polynomial::zero()),
    ///     Err(PolynomialError::DivisionByZero)
    /// );
    /// ```
    pub fn divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        if divisor.is_null() {
            return Err(PolynomialError::DivisionByZero);
        }

        if divisor.degree > self.degree {
            return Ok((Self::zero(), self.clone()));
        }

        let divisor_lc = divisor.leading_coefficient();
        let mut quotient = Self::zero();
        let mut dividend = self.clone();

        // Every pass removes the running dividend's leading term, so the
        // degree strictly drops.
        for _ in 0..=(self.degree - divisor.degree) {
            if dividend.is_null() || dividend.degree < divisor.degree {
                break;
            }

            let lead = dividend.degree;
            let exponent = lead - divisor.degree;
            let coeff = dividend
                .leading_coefficient()
                .checked_div(&divisor_lc)
                .ok_or(PolynomialError::NotDivisible { exponent })?;
            trace!(exponent, "long division step");

            quotient.set_member(exponent, coeff.clone());
            dividend -= &(divisor * &Self::monomial(coeff, exponent));
            dividend.set_member(lead, T::zero());
        }

        debug_assert!(dividend.is_null() || dividend.degree < divisor.degree);
        Ok((quotient, dividend))
    }

    /// The quotient of [`divide`](Self::divide).
    pub fn quotient(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        self.divide(divisor).map(|(q, _)| q)
    }

    /// The remainder of [`divide`](Self::divide).
    pub fn remainder(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        self.divide(divisor).map(|(_, r)| r)
    }

    /// Make the polynomial monic (leading coefficient = 1).
    ///
    /// The zero polynomial is returned unchanged.
    ///
    /// # Errors
    ///
    /// `PolynomialError::NoIdentity` if the ring has no one, and
    /// `PolynomialError::NotDivisible` if the leading coefficient is not a
    /// unit.
    pub fn monic(&self) -> Result<Self, PolynomialError> {
        if self.is_null() {
            return Ok(self.clone());
        }
        let inverse = self.leading_coefficient_inverse()?;
        Ok(self.scale(&inverse))
    }

    /// The inverse of the leading coefficient.
    pub(crate) fn leading_coefficient_inverse(&self) -> Result<T, PolynomialError> {
        T::one()
            .ok_or(PolynomialError::NoIdentity)?
            .checked_div(&self.leading_coefficient())
            .ok_or(PolynomialError::NotDivisible {
                exponent: self.degree,
            })
    }

    /// View that compares polynomials by degree alone.
    ///
    /// Degree is the Euclidean size function of `T[x]`; two different
    /// polynomials of the same degree compare as equal through this view.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::Polynomial;
    ///
    /// let a = Polynomial::from_coeffs(vec![1i64, 1]);
    /// let b = Polynomial::from_coeffs(vec![5i64, 0, 2]);
    /// let c = Polynomial::from_coeffs(vec![9i64, 3]);
    /// assert!(a.by_degree() < b.by_degree());
    /// assert!(a.by_degree() == c.by_degree());
    /// assert!(a != c);
    /// ```
    pub fn by_degree(&self) -> ByDegree<'_, T> {
        ByDegree(self)
    }

    /// A random polynomial of degree at most `degree`.
    #[cfg(feature = "rand")]
    pub fn random<R, F>(rng: &mut R, degree: usize, mut sample: F) -> Self
    where
        R: rand::Rng + ?Sized,
        F: FnMut(&mut R) -> T,
    {
        let mut poly = Self::zero();
        for exponent in 0..=degree {
            let c = sample(rng);
            poly.set_member(exponent, c);
        }
        poly
    }

    /// Combine with `rhs` term by term. `op(a, zero)` must be `a`, so
    /// exponents absent from `rhs` are left untouched.
    fn add_member_wise(&mut self, rhs: &Self, op: impl Fn(T, T) -> T) {
        for (&p, c) in &rhs.coefficients {
            let combined = op(self.get_member(p), c.clone());
            self.set_member(p, combined);
        }
    }
}

/// `base^exponent` by square-and-multiply; `exponent >= 1`.
fn pow<T: Ring>(base: &T, exponent: usize) -> T {
    debug_assert!(exponent >= 1);
    let mut result = base.clone();
    for bit in (0..usize::BITS - 1 - exponent.leading_zeros()).rev() {
        result = result.clone() * result;
        if (exponent >> bit) & 1 == 1 {
            result = result * base.clone();
        }
    }
    result
}

/// Sum of `n` copies of `a` by double-and-add; `n >= 1`.
fn times<T: Ring>(a: &T, n: usize) -> T {
    debug_assert!(n >= 1);
    let mut result = a.clone();
    for bit in (0..usize::BITS - 1 - n.leading_zeros()).rev() {
        result = result.clone() + result;
        if (n >> bit) & 1 == 1 {
            result = result + a.clone();
        }
    }
    result
}

impl<T: Ring> Default for Polynomial<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Ring> From<T> for Polynomial<T> {
    fn from(c: T) -> Self {
        Self::constant(c)
    }
}

impl<T: Ring> FromIterator<(usize, T)> for Polynomial<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

/// Degree-only ordering of polynomials; see [`Polynomial::by_degree`].
pub struct ByDegree<'a, T>(&'a Polynomial<T>);

impl<T> Clone for ByDegree<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ByDegree<'_, T> {}

impl<T> fmt::Debug for ByDegree<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByDegree").field(&self.0.degree).finish()
    }
}

impl<T> ByDegree<'_, T> {
    pub fn degree(&self) -> usize {
        self.0.degree
    }
}

impl<T> PartialEq for ByDegree<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.degree == other.0.degree
    }
}

impl<T> Eq for ByDegree<'_, T> {}

impl<T> PartialOrd for ByDegree<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ByDegree<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.degree.cmp(&other.0.degree)
    }
}

/* ---- Equality ---- */

impl<T: Ring> PartialEq for Polynomial<T> {
    /// Equal degree and ring-equal coefficients at every exponent.
    fn eq(&self, other: &Self) -> bool {
        self.degree == other.degree
            && self
                .coefficients
                .keys()
                .chain(other.coefficients.keys())
                .all(|&i| self.get_member(i).approx_eq(&other.get_member(i)))
    }
}

/* ---- Arithmetic operators ---- */

impl<T: Ring> AddAssign<&Polynomial<T>> for Polynomial<T> {
    fn add_assign(&mut self, rhs: &Polynomial<T>) {
        self.add_member_wise(rhs, |a, b| a + b);
    }
}

impl<T: Ring> AddAssign for Polynomial<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl<T: Ring> SubAssign<&Polynomial<T>> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: &Polynomial<T>) {
        self.add_member_wise(rhs, |a, b| a - b);
    }
}

impl<T: Ring> SubAssign for Polynomial<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self -= &rhs;
    }
}

/// Polynomial product.
///
/// # Panics
///
/// Panics if the degree of the product does not fit in `usize`, the same
/// way integer overflow does. Polynomials read by
/// [`Polynomial::parse_with`] never reach that bound.
impl<T: Ring> MulAssign<&Polynomial<T>> for Polynomial<T> {
    fn mul_assign(&mut self, rhs: &Polynomial<T>) {
        if self.is_null() || rhs.is_null() {
            *self = Self::zero();
        } else if self.is_constant() && rhs.is_constant() {
            let product = self.leading_coefficient() * rhs.leading_coefficient();
            *self = Self::constant(product);
        } else if self.is_constant() || rhs.is_constant() {
            let (constant, other) = if self.is_constant() {
                (self.leading_coefficient(), &*rhs)
            } else {
                (rhs.leading_coefficient(), &*self)
            };
            *self = other.scale(&constant);
        } else {
            let mut sums: BTreeMap<usize, T> = BTreeMap::new();

            // Absent terms are zero and contribute nothing.
            for (&i, left) in &self.coefficients {
                for (&j, right) in &rhs.coefficients {
                    let exponent = i
                        .checked_add(j)
                        .expect("polynomial degree overflows usize");
                    let term = left.clone() * right.clone();
                    let sum = match sums.remove(&exponent) {
                        Some(acc) => acc + term,
                        None => term,
                    };
                    sums.insert(exponent, sum);
                }
            }

            let mut product = Self::zero();
            for (exponent, c) in sums {
                product.set_member(exponent, c);
            }
            *self = product;
        }
    }
}

impl<T: Ring> MulAssign for Polynomial<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self *= &rhs;
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        impl<T: Ring> $imp for Polynomial<T> {
            type Output = Polynomial<T>;

            fn $method(mut self, rhs: Polynomial<T>) -> Polynomial<T> {
                $assign::$assign_method(&mut self, &rhs);
                self
            }
        }

        impl<T: Ring> $imp<&Polynomial<T>> for Polynomial<T> {
            type Output = Polynomial<T>;

            fn $method(mut self, rhs: &Polynomial<T>) -> Polynomial<T> {
                $assign::$assign_method(&mut self, rhs);
                self
            }
        }

        impl<T: Ring> $imp<&Polynomial<T>> for &Polynomial<T> {
            type Output = Polynomial<T>;

            fn $method(self, rhs: &Polynomial<T>) -> Polynomial<T> {
                let mut result = self.clone();
                $assign::$assign_method(&mut result, rhs);
                result
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

impl<T: Ring> Neg for Polynomial<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let mut negated = Self::zero();
        for (exponent, c) in self.coefficients {
            negated.set_member(exponent, c.negate());
        }
        negated
    }
}

impl<T: Ring> Neg for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

/// Quotient of Euclidean division.
///
/// # Panics
///
/// Panics when [`Polynomial::divide`] fails, e.g. on a zero divisor, the same
/// way integer division does. Use [`Polynomial::quotient`] to handle the
/// error instead.
impl<T: Ring> Div<&Polynomial<T>> for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn div(self, rhs: &Polynomial<T>) -> Polynomial<T> {
        match self.quotient(rhs) {
            Ok(q) => q,
            Err(e) => panic!("polynomial division failed: {}", e),
        }
    }
}

impl<T: Ring> Div for Polynomial<T> {
    type Output = Polynomial<T>;

    fn div(self, rhs: Polynomial<T>) -> Polynomial<T> {
        &self / &rhs
    }
}

/// Remainder of Euclidean division.
///
/// # Panics
///
/// Panics when [`Polynomial::divide`] fails. Use [`Polynomial::remainder`]
/// to handle the error instead.
impl<T: Ring> Rem<&Polynomial<T>> for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn rem(self, rhs: &Polynomial<T>) -> Polynomial<T> {
        match self.remainder(rhs) {
            Ok(r) => r,
            Err(e) => panic!("polynomial division failed: {}", e),
        }
    }
}

impl<T: Ring> Rem for Polynomial<T> {
    type Output = Polynomial<T>;

    fn rem(self, rhs: Polynomial<T>) -> Polynomial<T> {
        &self % &rhs
    }
}

/* ---- Formatting ---- */

impl<T: Ring + fmt::Display> fmt::Display for Polynomial<T> {
    /// Renders terms highest exponent first, e.g. `- 5x^2 + 3x - 2`.
    ///
    /// A negative coefficient is preceded by `- ` and printed through its
    /// absolute value when the ring has one. A coefficient equal to one is
    /// omitted in front of `x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0");
        }
        if self.is_constant() {
            return write!(f, "{}", self.get_member(0));
        }

        let zero = T::zero();
        let one = T::one();
        let mut first = true;

        for (power, coeff) in self.terms() {
            if !first {
                write!(f, " ")?;
            }

            let negative = *coeff < zero;
            if negative {
                write!(f, "- ")?;
            } else if *coeff > zero && !first {
                write!(f, "+ ")?;
            }

            // A negative coefficient without a known magnitude is printed
            // from its own text with the sign already written dropped.
            let shown = match coeff.abs() {
                Some(magnitude) => Some(magnitude),
                None if negative => None,
                None => Some(coeff.clone()),
            };
            let unit = matches!((&one, &shown), (Some(one), Some(v)) if v.approx_eq(one));
            if power == 0 || !unit {
                match shown {
                    Some(v) => write!(f, "{}", v)?,
                    None => {
                        let text = coeff.to_string();
                        write!(f, "{}", text.strip_prefix('-').unwrap_or(&text))?;
                    }
                }
            }

            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", power)?,
            }

            first = false;
        }

        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.coefficients.iter().rev())
            .finish()
    }
}

/* ---- serde ---- */

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Polynomial<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Exponent -> coefficient, only the stored terms.
        self.coefficients.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Polynomial<T>
where
    T: Ring + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let terms = BTreeMap::<usize, T>::deserialize(deserializer)?;
        Ok(terms.into_iter().collect())
    }
}
