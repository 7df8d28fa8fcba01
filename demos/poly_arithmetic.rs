//! Polynomial Arithmetic
//!
//! This example demonstrates `Polynomial<T>` over several coefficient rings:
//! - Basic arithmetic over the integers
//! - Division with remainder over Z/7
//! - Derivatives and evaluation
//! - The extended Euclidean algorithm over the rationals (as f64)
//!
//! Run with: cargo run --example poly_arithmetic

use polyeuclid::{extended_gcd, Modulus, Polynomial, PolynomialError, Residue};

fn main() -> Result<(), PolynomialError> {
    println!("=== Polynomial Arithmetic ===\n");

    integer_operations();
    residue_division()?;
    derivatives_and_eval();
    rational_gcd()?;

    Ok(())
}

/// Demonstrate basic polynomial operations over Z
fn integer_operations() {
    println!("--- Integer Coefficients ---\n");

    // p(x) = x^2 + 2x + 1, q(x) = x + 1
    let p = Polynomial::from_coeffs(vec![1i64, 2, 1]);
    let q: Polynomial<i64> = "x + 1".parse().expect("valid polynomial");

    println!("p(x) = {}", p);
    println!("q(x) = {}", q);
    println!("degree(p) = {}", p.degree());
    println!();

    println!("p + q = {}", &p + &q);
    println!("p - q = {}", &p - &q);
    println!("p * q = {}", &p * &q);
    println!("-p    = {}", -&p);
    println!("3 * p = {}", p.scale(&3));

    // Sparse storage: only non-zero terms are kept
    let sparse = Polynomial::from_terms([(1000, 1i64), (0, -1)]);
    println!("\nsparse = {}  ({} terms)", sparse, sparse.term_count());

    // Integers are not a field: 2x does not divide x^2 exactly
    let err = Polynomial::monomial(1i64, 2).divide(&Polynomial::monomial(2, 1));
    println!("x^2 / 2x over Z: {:?}", err);
    println!();
}

/// Demonstrate division over Z/7
fn residue_division() -> Result<(), PolynomialError> {
    println!("--- Division over Z/7 ---\n");

    let z7 = Modulus::new(7).expect("7 is a valid modulus");
    let lift = |c| Residue::new(c, z7);

    // x^3 - 1 = (x - 1)(x^2 + x + 1)
    let p = Polynomial::parse_with("x^3 - 1", lift).expect("valid polynomial");
    let d = Polynomial::parse_with("x - 1", lift).expect("valid polynomial");

    println!("p(x) = {}", p);
    println!("d(x) = {}", d);

    let (q, r) = p.divide(&d)?;
    println!("  quotient  = {}", q);
    println!("  remainder = {}", r);
    println!("  q*d + r   = {}", &(&q * &d) + &r);

    let odd = Polynomial::parse_with("3x^4 + 2x + 5", lift).expect("valid polynomial");
    let (q, r) = odd.divide(&d)?;
    println!("\n{} = ({}) * ({}) + {}", odd, q, d, r);

    println!("zero divisor: {:?}", p.divide(&Polynomial::zero()));
    println!();
    Ok(())
}

/// Demonstrate derivatives and evaluation
fn derivatives_and_eval() {
    println!("--- Derivatives and Evaluation ---\n");

    // x^4 - 3x^3 - x + 6
    let p = Polynomial::from_coeffs(vec![6i64, -1, 0, -3, 1]);
    println!("p(x)   = {}", p);
    println!("p'(x)  = {}", p.derive());
    println!("p''(x) = {}", p.derive().derive());

    for t in [-1, 0, 2] {
        println!("p({}) = {}", t, p.at(t));
    }

    let a = Polynomial::from_coeffs(vec![0i64, 1, 1]);
    let b = Polynomial::from_coeffs(vec![5i64, 4]);
    println!(
        "\ndeg({}) > deg({}): {}",
        a,
        b,
        a.by_degree() > b.by_degree()
    );
    println!();
}

/// Demonstrate the extended Euclidean algorithm over Q
fn rational_gcd() -> Result<(), PolynomialError> {
    println!("--- Extended GCD over Q ---\n");

    // (x - 1)(x + 2) and (x - 1)(x + 3)
    let g = Polynomial::from_coeffs(vec![-2.0, 1.0, 1.0]);
    let h = Polynomial::from_coeffs(vec![-3.0, 2.0, 1.0]);

    let bezout = extended_gcd(&g, &h)?.monic()?;
    println!("g(x) = {}", g);
    println!("h(x) = {}", h);
    println!("gcd  = {}", bezout.gcd);
    println!("s(x) = {}", bezout.s);
    println!("t(x) = {}", bezout.t);
    println!("s*g + t*h = {}", &(&bezout.s * &g) + &(&bezout.t * &h));

    Ok(())
}
