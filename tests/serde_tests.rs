//! Serde serialization/deserialization tests
//!
//! Run with: cargo test --features serde --test serde_tests

#![cfg(feature = "serde")]

use polyeuclid::{Modulus, Polynomial, Residue, Ring};

fn z(n: u64) -> Modulus {
    Modulus::new(n).unwrap()
}

#[test]
fn residue_roundtrip() {
    let a = Residue::new(10, z(7));
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, r#"{"value":3,"modulus":7}"#);
    let b: Residue = serde_json::from_str(&json).unwrap();
    assert_eq!(a, b);
    assert_eq!(b.modulus(), Some(z(7)));
}

#[test]
fn residue_unbound_identity_roundtrip() {
    let one = Residue::one().unwrap();
    let json = serde_json::to_string(&one).unwrap();
    assert_eq!(json, r#"{"value":1,"modulus":null}"#);
    let back: Residue = serde_json::from_str(&json).unwrap();
    assert_eq!(back.modulus(), None);
    assert_eq!(back.value(), 1);
}

#[test]
fn residue_deserialize_reduces() {
    let a: Residue = serde_json::from_str(r#"{"value":-1,"modulus":5}"#).unwrap();
    assert_eq!(a.value(), 4);
}

#[test]
fn residue_invalid_modulus_fails() {
    let result: Result<Residue, _> = serde_json::from_str(r#"{"value":0,"modulus":1}"#);
    assert!(result.is_err());
}

#[test]
fn poly_roundtrip() {
    // x^2 - x + 6
    let p = Polynomial::from_coeffs(vec![6i64, -1, 1]);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, r#"{"0":6,"1":-1,"2":1}"#);
    let q: Polynomial<i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(p, q);
}

#[test]
fn poly_zero_roundtrip() {
    let p = Polynomial::<i64>::zero();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "{}");
    let q: Polynomial<i64> = serde_json::from_str(&json).unwrap();
    assert!(q.is_null());
}

#[test]
fn poly_sparse_keeps_only_terms() {
    let p = Polynomial::monomial(1i64, 1000);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, r#"{"1000":1}"#);
}

#[test]
fn poly_deserialize_drops_zero_coefficients() {
    let p: Polynomial<i64> = serde_json::from_str(r#"{"0":5,"1":2,"3":0}"#).unwrap();
    assert_eq!(p.degree(), 1);
    assert_eq!(p.term_count(), 2);
    assert_eq!(p, Polynomial::from_coeffs(vec![5, 2]));
}

#[test]
fn poly_over_residues_roundtrip() {
    let lift = |c| Residue::new(c, z(2));
    let p = Polynomial::parse_with("x^3 + x + 1", lift).unwrap();
    let json = serde_json::to_string(&p).unwrap();
    assert!(json.contains(r#""3":{"value":1,"modulus":2}"#));

    let q: Polynomial<Residue> = serde_json::from_str(&json).unwrap();
    assert_eq!(p, q);
    assert_eq!(q.to_string(), "x^3 + x + 1");
}

#[test]
fn poly_over_residues_drops_reduced_zeros() {
    let json = r#"{"0":{"value":1,"modulus":3},"2":{"value":3,"modulus":3}}"#;
    let p: Polynomial<Residue> = serde_json::from_str(json).unwrap();
    assert!(p.is_constant());
}
