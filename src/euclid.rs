//! Extended Euclidean algorithm over `T[x]`.
//!
//! Given `g` and `h`, computes `d = gcd(g, h)` together with Bézout
//! coefficients `s`, `t` such that `s*g + t*h = d`. Every division must
//! succeed in the coefficient ring, which is always the case over a field
//! such as `Z/pZ`.

use core::mem;

use tracing::debug;

use crate::algebra::ring::Ring;
use crate::structures::poly::{Polynomial, PolynomialError};

/// The result of the extended Euclidean algorithm: `s*g + t*h = gcd`.
#[derive(Debug, Clone)]
pub struct Bezout<T> {
    pub gcd: Polynomial<T>,
    pub s: Polynomial<T>,
    pub t: Polynomial<T>,
}

impl<T: Ring> PartialEq for Bezout<T> {
    fn eq(&self, other: &Self) -> bool {
        self.gcd == other.gcd && self.s == other.s && self.t == other.t
    }
}

impl<T: Ring> Bezout<T> {
    /// Check `s*g + t*h = gcd`.
    pub fn verify(&self, g: &Polynomial<T>, h: &Polynomial<T>) -> bool {
        &(&self.s * g) + &(&self.t * h) == self.gcd
    }

    /// Scale the gcd to be monic, together with `s` and `t` so the identity
    /// still holds. A zero gcd is left unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the gcd's leading coefficient is not a unit.
    pub fn monic(self) -> Result<Self, PolynomialError> {
        if self.gcd.is_null() {
            return Ok(self);
        }
        let inverse = self.gcd.leading_coefficient_inverse()?;
        Ok(Self {
            gcd: self.gcd.scale(&inverse),
            s: self.s.scale(&inverse),
            t: self.t.scale(&inverse),
        })
    }
}

/// State of one iteration, captured before the shift.
#[derive(Debug, Clone)]
pub struct EuclidStep<T> {
    /// 1-based iteration number.
    pub iteration: usize,
    pub g: Polynomial<T>,
    pub h: Polynomial<T>,
    pub s2: Polynomial<T>,
    pub s1: Polynomial<T>,
    pub t2: Polynomial<T>,
    pub t1: Polynomial<T>,
    /// Quotient of `g / h`.
    pub q: Polynomial<T>,
    /// Remainder of `g / h`.
    pub r: Polynomial<T>,
    /// `s2 - q*s1`.
    pub s: Polynomial<T>,
    /// `t2 - q*t1`.
    pub t: Polynomial<T>,
}

/// Step-wise extended Euclidean algorithm.
///
/// Invariants kept across steps, for the starting inputs `g0` and `h0`:
/// `s2*g0 + t2*h0 = g` and `s1*g0 + t1*h0 = h`.
///
/// # Example
///
/// ```
/// use polyeuclid::{ExtendedEuclid, Modulus, Polynomial, Residue};
///
/// let z2 = Modulus::new(2).unwrap();
/// let lift = |c| Residue::new(c, z2);
/// let g = Polynomial::parse_with("x^2 + 1", lift).unwrap();
/// let h = Polynomial::parse_with("x + 1", lift).unwrap();
///
/// let mut euclid = ExtendedEuclid::new(g.clone(), h.clone()).unwrap();
/// let steps = euclid.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
/// assert_eq!(steps.len(), 1);
///
/// let bezout = euclid.finish();
/// assert_eq!(bezout.gcd, h);
/// assert!(bezout.verify(&g, &h));
/// ```
#[derive(Debug, Clone)]
pub struct ExtendedEuclid<T> {
    g: Polynomial<T>,
    h: Polynomial<T>,
    s2: Polynomial<T>,
    s1: Polynomial<T>,
    t2: Polynomial<T>,
    t1: Polynomial<T>,
    iteration: usize,
    failed: bool,
}

impl<T: Ring> ExtendedEuclid<T> {
    /// Start the algorithm on `g` and `h`.
    ///
    /// # Errors
    ///
    /// `PolynomialError::NoIdentity` if `T` has no multiplicative identity.
    pub fn new(g: Polynomial<T>, h: Polynomial<T>) -> Result<Self, PolynomialError> {
        let one = T::one().ok_or(PolynomialError::NoIdentity)?;
        Ok(Self {
            g,
            h,
            s2: Polynomial::constant(one.clone()),
            s1: Polynomial::zero(),
            t2: Polynomial::zero(),
            t1: Polynomial::constant(one),
            iteration: 0,
            failed: false,
        })
    }

    /// True once the remainder reached zero.
    pub fn is_done(&self) -> bool {
        self.h.is_null()
    }

    /// Iterations performed so far.
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// Perform one iteration, or return `Ok(None)` when already done.
    pub fn step(&mut self) -> Result<Option<EuclidStep<T>>, PolynomialError> {
        if self.is_done() {
            return Ok(None);
        }

        let (q, r) = self.g.divide(&self.h)?;
        let s = &self.s2 - &(&q * &self.s1);
        let t = &self.t2 - &(&q * &self.t1);
        self.iteration += 1;

        debug!(
            iteration = self.iteration,
            g_degree = self.g.degree(),
            h_degree = self.h.degree(),
            quotient_degree = q.degree(),
            remainder_null = r.is_null(),
            "euclidean step"
        );

        let record = EuclidStep {
            iteration: self.iteration,
            g: self.g.clone(),
            h: self.h.clone(),
            s2: self.s2.clone(),
            s1: self.s1.clone(),
            t2: self.t2.clone(),
            t1: self.t1.clone(),
            q,
            r: r.clone(),
            s: s.clone(),
            t: t.clone(),
        };

        self.g = mem::replace(&mut self.h, r);
        self.s2 = mem::replace(&mut self.s1, s);
        self.t2 = mem::replace(&mut self.t1, t);

        Ok(Some(record))
    }

    /// The Bézout triple for the current state. Meaningful once
    /// [`is_done`](Self::is_done) holds.
    pub fn finish(self) -> Bezout<T> {
        Bezout {
            gcd: self.g,
            s: self.s2,
            t: self.t2,
        }
    }

    /// Run to completion.
    pub fn run(mut self) -> Result<Bezout<T>, PolynomialError> {
        while self.step()?.is_some() {}
        debug!(iterations = self.iteration, "euclid finished");
        Ok(self.finish())
    }
}

/// Yields one [`EuclidStep`] per iteration. Stops after the first error.
impl<T: Ring> Iterator for ExtendedEuclid<T> {
    type Item = Result<EuclidStep<T>, PolynomialError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.step().transpose();
        self.failed = matches!(item, Some(Err(_)));
        item
    }
}

/// Extended gcd of `g` and `h`.
///
/// If `h` is zero the result is `(g, 1, 0)`.
///
/// # Example
///
/// ```
/// use polyeuclid::{extended_gcd, Polynomial};
///
/// // gcd(x^2 - 1, x^2 + 2x + 1) over Q is a multiple of x + 1
/// let g = Polynomial::from_coeffs(vec![-1.0, 0.0, 1.0]);
/// let h = Polynomial::from_coeffs(vec![1.0, 2.0, 1.0]);
/// let bezout = extended_gcd(&g, &h).unwrap().monic().unwrap();
///
/// assert_eq!(bezout.gcd, Polynomial::from_coeffs(vec![1.0, 1.0]));
/// assert!(bezout.verify(&g, &h));
/// ```
pub fn extended_gcd<T: Ring>(
    g: &Polynomial<T>,
    h: &Polynomial<T>,
) -> Result<Bezout<T>, PolynomialError> {
    ExtendedEuclid::new(g.clone(), h.clone())?.run()
}
