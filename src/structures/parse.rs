//! Reading polynomials back from their rendered text form.
//!
//! Accepted input is what [`Polynomial`]'s `Display` produces, plus a few
//! conveniences: `x^10 + x^9 - 3x + 1`, `- 2*x^2 + 7`, `0`. Whitespace is
//! ignored and terms sharing an exponent are summed.

use core::str::FromStr;

use thiserror::Error;

use crate::algebra::ring::Ring;
use crate::structures::poly::Polynomial;

/// Largest exponent accepted by the parser. The product of two parsed
/// polynomials always has a degree that fits in `usize`.
pub const MAX_EXPONENT: usize = usize::MAX / 2;

/// Error type for polynomial parsing. Positions are byte offsets into the
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty polynomial")]
    Empty,
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("invalid number at position {position}")]
    InvalidNumber { position: usize },
    #[error("expected a term at position {position}")]
    MissingTerm { position: usize },
    #[error("exponent at position {position} exceeds {max}", max = MAX_EXPONENT)]
    ExponentTooLarge { position: usize },
}

struct Cursor<'a> {
    chars: &'a [(usize, char)],
    index: usize,
    end: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|&(_, c)| c)
    }

    fn bump(&mut self) {
        self.index += 1;
    }

    fn position(&self) -> usize {
        self.chars.get(self.index).map_or(self.end, |&(p, _)| p)
    }

    fn digits(&mut self) -> Option<String> {
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.bump();
        }
        (!digits.is_empty()).then_some(digits)
    }

    fn unexpected(&self) -> ParseError {
        let position = self.position();
        match self.peek() {
            Some(found) => ParseError::UnexpectedChar { found, position },
            None => ParseError::MissingTerm { position },
        }
    }

    /// One unsigned term: `c`, `cx`, `c*x`, `cx^p`, `x` or `x^p`.
    fn term(&mut self) -> Result<(i64, usize), ParseError> {
        let start = self.position();
        let coefficient = match self.digits() {
            Some(digits) => Some(
                digits
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidNumber { position: start })?,
            ),
            None => None,
        };

        let starred = coefficient.is_some() && self.peek() == Some('*');
        if starred {
            self.bump();
        }

        if self.peek() != Some('x') {
            return match coefficient {
                Some(c) if !starred => Ok((c, 0)),
                _ => Err(self.unexpected()),
            };
        }
        self.bump();

        let exponent = if self.peek() == Some('^') {
            self.bump();
            let position = self.position();
            let exponent = match self.digits() {
                Some(digits) => digits
                    .parse::<usize>()
                    .map_err(|_| ParseError::ExponentTooLarge { position })?,
                None => return Err(self.unexpected()),
            };
            if exponent > MAX_EXPONENT {
                return Err(ParseError::ExponentTooLarge { position });
            }
            exponent
        } else {
            1
        };

        Ok((coefficient.unwrap_or(1), exponent))
    }
}

impl<T: Ring> Polynomial<T> {
    /// Parse a polynomial, mapping each integer coefficient into `T` with
    /// `lift`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyeuclid::{Modulus, Polynomial, Residue};
    ///
    /// let z2 = Modulus::new(2).unwrap();
    /// let p = Polynomial::parse_with("x^3 + 3x + 1", |c| Residue::new(c, z2)).unwrap();
    /// assert_eq!(p.to_string(), "x^3 + x + 1");
    /// ```
    pub fn parse_with<F>(text: &str, lift: F) -> Result<Self, ParseError>
    where
        F: Fn(i64) -> T,
    {
        let chars: Vec<(usize, char)> = text
            .char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .collect();
        if chars.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut cursor = Cursor {
            chars: &chars,
            index: 0,
            end: text.len(),
        };
        let mut poly = Self::zero();
        let mut first = true;

        while cursor.peek().is_some() {
            let sign_at = cursor.position();
            let negative = match cursor.peek() {
                Some('+') => {
                    cursor.bump();
                    false
                }
                Some('-') => {
                    cursor.bump();
                    true
                }
                _ if !first => return Err(cursor.unexpected()),
                _ => false,
            };
            first = false;

            let (magnitude, exponent) = cursor.term()?;
            let coefficient = if negative {
                magnitude
                    .checked_neg()
                    .ok_or(ParseError::InvalidNumber { position: sign_at })?
            } else {
                magnitude
            };

            let sum = poly.get_member(exponent) + lift(coefficient);
            poly.set_member(exponent, sum);
        }

        Ok(poly)
    }
}

impl<T: Ring + From<i64>> FromStr for Polynomial<T> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, T::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::residue::{Modulus, Residue};

    type PZ = Polynomial<i64>;

    fn parse(text: &str) -> Result<PZ, ParseError> {
        text.parse()
    }

    #[test]
    fn parse_rendered_form() {
        let p = parse("x^2 - x + 6").unwrap();
        assert_eq!(p, PZ::from_coeffs(vec![6, -1, 1]));
    }

    #[test]
    fn parse_zero_and_constants() {
        assert!(parse("0").unwrap().is_null());
        assert_eq!(parse("5").unwrap(), PZ::constant(5));
        assert_eq!(parse("-5").unwrap(), PZ::constant(-5));
        assert_eq!(parse("- 5").unwrap(), PZ::constant(-5));
    }

    #[test]
    fn parse_leading_sign_and_star() {
        let p = parse("- 2*x^2 + 7").unwrap();
        assert_eq!(p, PZ::from_coeffs(vec![7, 0, -2]));
        assert_eq!(parse("+x").unwrap(), PZ::monomial(1, 1));
    }

    #[test]
    fn parse_ignores_whitespace() {
        assert_eq!(parse(" 3 x ^ 4  -  x ").unwrap(), parse("3x^4-x").unwrap());
    }

    #[test]
    fn parse_accumulates_repeated_exponents() {
        assert_eq!(parse("x + x + 1").unwrap(), PZ::from_coeffs(vec![1, 2]));
        assert!(parse("x^3 - x^3").unwrap().is_null());
    }

    #[test]
    fn parse_round_trips_display() {
        for text in ["x^10 + x^9 + x^8 + x^6 + x^5 + x^4 + 1", "- 5x^2 + 3x - 2", "2x^3 + 1"] {
            assert_eq!(parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(
            parse("x + y"),
            Err(ParseError::UnexpectedChar { found: 'y', position: 4 })
        );
        assert_eq!(
            parse("2x3"),
            Err(ParseError::UnexpectedChar { found: '3', position: 2 })
        );
        assert_eq!(parse("x +"), Err(ParseError::MissingTerm { position: 3 }));
        assert_eq!(parse("x^"), Err(ParseError::MissingTerm { position: 2 }));
        assert_eq!(
            parse("2*"),
            Err(ParseError::MissingTerm { position: 2 })
        );
        assert_eq!(
            parse("99999999999999999999x"),
            Err(ParseError::InvalidNumber { position: 0 })
        );
    }

    #[test]
    fn parse_rejects_overflowing_exponents() {
        let text = format!("x^{} + 1", MAX_EXPONENT + 1);
        assert_eq!(parse(&text), Err(ParseError::ExponentTooLarge { position: 2 }));
        assert_eq!(
            parse("x^99999999999999999999999"),
            Err(ParseError::ExponentTooLarge { position: 2 })
        );

        let top = parse(&format!("x^{} + 1", MAX_EXPONENT)).unwrap();
        let square = &top * &top;
        assert_eq!(square.degree(), 2 * MAX_EXPONENT);
        assert_eq!(square.get_member(MAX_EXPONENT), 2);
    }

    #[test]
    fn parse_with_residues() {
        let z7 = Modulus::new(7).unwrap();
        let p = Polynomial::parse_with("8x^2 - 1", |c| Residue::new(c, z7)).unwrap();
        assert_eq!(p.get_member(2).value(), 1);
        assert_eq!(p.get_member(0).value(), 6);
        assert_eq!(p.to_string(), "x^2 + 6");

        let q = Polynomial::parse_with("7x + 2", |c| Residue::new(c, z7)).unwrap();
        assert!(q.is_constant());
    }
}
