//! Extended Euclidean algorithm for polynomials over Z/nZ.
//!
//! Prints every iteration of the algorithm (g, h, s2, s1, t2, t1, q, r, s, t)
//! followed by the gcd and its Bézout coefficients.
//!
//! Built with the `cli` feature: `cargo run --features cli -- --modulus 2`.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use polyeuclid::{EuclidStep, ExtendedEuclid, Modulus, Polynomial, Residue};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_G: &str = "x^10 + x^9 + x^8 + x^6 + x^5 + x^4 + 1";
const DEFAULT_H: &str = "x^9 + x^6 + x^5 + x^3 + x^2 + 1";

const PROMPT: &str = "Para el anillo Zn, indique el valor (entero positivo) de \"n\": ";
const RULE: &str = "_-_-_-_-_-_-_-_-_-_-_-_";

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Extended Euclidean algorithm for polynomials with coefficients in Z/nZ."
)]
struct Args {
    /// Modulus n of the coefficient ring; read from stdin when omitted
    #[arg(long)]
    modulus: Option<u64>,

    /// First polynomial g(x)
    #[arg(long, default_value = DEFAULT_G)]
    g: String,

    /// Second polynomial h(x)
    #[arg(long, default_value = DEFAULT_H)]
    h: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    banner(&mut out)?;

    let modulus = match args.modulus {
        Some(n) => Modulus::new(n).context("invalid --modulus")?,
        None => read_modulus(io::stdin().lock(), &mut out)?,
    };
    if !modulus.is_prime() {
        warn!(%modulus, "Z/nZ is not a field; division fails on non-unit leading coefficients");
    }

    let lift = |c| Residue::new(c, modulus);
    let g = Polynomial::parse_with(&args.g, lift)
        .with_context(|| format!("invalid g(x): {:?}", args.g))?;
    let h = Polynomial::parse_with(&args.h, lift)
        .with_context(|| format!("invalid h(x): {:?}", args.h))?;

    info!(%modulus, g_degree = g.degree(), h_degree = h.degree(), "starting");
    run(&g, &h, &mut out)
}

/// Prompt until a valid modulus is entered.
fn read_modulus<R: BufRead, W: Write>(mut input: R, out: &mut W) -> Result<Modulus> {
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("no modulus given on standard input");
        }

        match line.trim().parse::<u64>().map(Modulus::new) {
            Ok(Ok(modulus)) => {
                writeln!(out)?;
                return Ok(modulus);
            }
            Ok(Err(e)) => warn!("{}", e),
            Err(_) => warn!(input = line.trim(), "not a positive integer"),
        }
    }
}

fn run<W: Write>(
    g: &Polynomial<Residue>,
    h: &Polynomial<Residue>,
    out: &mut W,
) -> Result<()> {
    let mut euclid = ExtendedEuclid::new(g.clone(), h.clone())?;

    for step in euclid.by_ref() {
        let step = step.context("euclidean iteration failed")?;
        print_step(&step, out)?;
    }

    let bezout = euclid.finish();
    debug_assert!(bezout.verify(g, h));

    writeln!(out, "{} RESULTADO FINAL {}", RULE, RULE)?;
    writeln!(out)?;
    writeln!(out, "GCD({}, {}) = d(x)", g, h)?;
    writeln!(out, "d(x)= {}", bezout.gcd)?;
    writeln!(out, "s(x)= {}", bezout.s)?;
    writeln!(out, "t(x)= {}", bezout.t)?;
    Ok(())
}

fn print_step<W: Write>(step: &EuclidStep<Residue>, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} ITERACION {} {}", RULE, step.iteration, RULE)?;
    writeln!(out)?;
    writeln!(out, "g(x)= {}", step.g)?;
    writeln!(out, "h(x)= {}", step.h)?;
    writeln!(out, "s2(x)= {}", step.s2)?;
    writeln!(out, "s1(x)= {}", step.s1)?;
    writeln!(out, "t2(x)= {}", step.t2)?;
    writeln!(out, "t1(x)= {}", step.t1)?;
    writeln!(out, "q(x)= {}", step.q)?;
    writeln!(out, "r(x)= {}", step.r)?;
    writeln!(out, "s(x)= {}", step.s)?;
    writeln!(out, "t(x)= {}", step.t)?;
    writeln!(out)
}

fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        r"
   ____  ____  ____
  / ___|/ ___||  _ \
 | |  _| |    | | | |
 | |_| | |___ | |_| |
  \____|\____||____/
"
    )?;
    writeln!(out, "ALGORITMO EXTENDIDO DE EUCLIDES PARA POLINOMIOS")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(n: u64) -> Modulus {
        Modulus::new(n).unwrap()
    }

    #[test]
    fn read_modulus_retries_until_valid() {
        let input = io::Cursor::new("abc\n1\n-3\n7\n");
        let mut out = Vec::new();
        let modulus = read_modulus(input, &mut out).unwrap();
        assert_eq!(modulus, z(7));

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches(PROMPT).count(), 4);
    }

    #[test]
    fn read_modulus_fails_on_eof() {
        let mut out = Vec::new();
        assert!(read_modulus(io::Cursor::new("x\n"), &mut out).is_err());
    }

    #[test]
    fn default_polynomials_parse() {
        Args::try_parse_from(["polyeuclid", "--modulus", "2"]).unwrap();
        let lift = |c| Residue::new(c, z(2));
        let g = Polynomial::parse_with(DEFAULT_G, lift).unwrap();
        let h = Polynomial::parse_with(DEFAULT_H, lift).unwrap();
        assert_eq!(g.degree(), 10);
        assert_eq!(h.degree(), 9);
    }

    #[test]
    fn run_prints_trace_and_result() {
        let lift = |c| Residue::new(c, z(2));
        let g = Polynomial::parse_with("x^2 + 1", lift).unwrap();
        let h = Polynomial::parse_with("x + 1", lift).unwrap();

        let mut out = Vec::new();
        run(&g, &h, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains("ITERACION 1"));
        assert!(!printed.contains("ITERACION 2"));
        assert!(printed.contains("q(x)= x + 1"));
        assert!(printed.contains("RESULTADO FINAL"));
        assert!(printed.contains("d(x)= x + 1"));
        assert!(printed.contains("s(x)= 0"));
        assert!(printed.contains("t(x)= 1"));
    }

    #[test]
    fn run_with_zero_h_skips_iterations() {
        let lift = |c| Residue::new(c, z(3));
        let g = Polynomial::parse_with("2x + 1", lift).unwrap();

        let mut out = Vec::new();
        run(&g, &Polynomial::zero(), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(!printed.contains("ITERACION"));
        assert!(printed.contains("GCD(2x + 1, 0) = d(x)"));
        assert!(printed.contains("s(x)= 1"));
        assert!(printed.contains("t(x)= 0"));
    }

    #[test]
    fn run_fails_on_non_unit_divisor() {
        let lift = |c| Residue::new(c, z(4));
        let g = Polynomial::parse_with("x^2 + 1", lift).unwrap();
        let h = Polynomial::parse_with("2x + 1", lift).unwrap();

        let mut out = Vec::new();
        assert!(run(&g, &h, &mut out).is_err());
    }
}
