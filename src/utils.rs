/// Check if `n` is a prime number.
///
/// Deterministic Miller-Rabin: the first twelve primes as witnesses are
/// enough for every `u64`, so the cost is a few hundred modular
/// multiplications regardless of `n`.
pub const fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }

    let mut i = 0;
    while i < WITNESSES.len() {
        if n % WITNESSES[i] == 0 {
            return n == WITNESSES[i];
        }
        i += 1;
    }

    // n - 1 = d * 2^s with d odd
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    let mut i = 0;
    'witness: while i < WITNESSES.len() {
        let mut x = pow_mod(WITNESSES[i], d, n);
        i += 1;
        if x == 1 || x == n - 1 {
            continue;
        }

        let mut r = 1;
        while r < s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
            r += 1;
        }
        return false;
    }
    true
}

#[inline]
const fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

const fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Returns `(g, x, y)` such that `g = gcd(a, b)` and `a*x + b*y = g`.
pub(crate) fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1i128, 0i128);
    let (mut old_y, mut y) = (0i128, 1i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }

    (old_r, old_x, old_y)
}
