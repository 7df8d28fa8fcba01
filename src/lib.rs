//! Sparse univariate polynomials over a generic coefficient ring, with
//! Euclidean division and the extended Euclidean algorithm.
//!
//! # Example
//!
//! ```
//! use polyeuclid::{extended_gcd, Modulus, Polynomial, Residue};
//!
//! let z2 = Modulus::new(2).unwrap();
//! let lift = |c| Residue::new(c, z2);
//! let g = Polynomial::parse_with("x^10 + x^9 + x^8 + x^6 + x^5 + x^4 + 1", lift).unwrap();
//! let h = Polynomial::parse_with("x^9 + x^6 + x^5 + x^3 + x^2 + 1", lift).unwrap();
//!
//! let bezout = extended_gcd(&g, &h).unwrap();
//! assert_eq!(&(&bezout.s * &g) + &(&bezout.t * &h), bezout.gcd);
//! ```

pub mod algebra;
pub mod euclid;
pub mod structures;
pub mod utils;

pub use algebra::ring::Ring;

pub use euclid::{extended_gcd, Bezout, EuclidStep, ExtendedEuclid};
pub use structures::parse::{ParseError, MAX_EXPONENT};
pub use structures::poly::{ByDegree, Polynomial, PolynomialError};
pub use structures::residue::{Modulus, ModulusError, Residue};
pub use utils::is_prime;
