//! Number theory primitives behind the RSA computations.
//!
//! All values are `u64`; products are formed in `u128` so no intermediate
//! result can overflow.

use crate::error::CryptoError;

/// Greatest common divisor by the Euclidean algorithm.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// `base^exponent mod modulus` by square-and-multiply.
///
/// Returns `0` when `modulus == 1`.
///
/// # Errors
///
/// [`CryptoError::ZeroModulus`] if `modulus == 0`.
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> Result<u64, CryptoError> {
    if modulus == 0 {
        return Err(CryptoError::ZeroModulus);
    }
    if modulus == 1 {
        return Ok(0);
    }

    let m = u128::from(modulus);
    let mut result: u128 = 1;
    let mut base = u128::from(base) % m;
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % m;
        }
        exponent >>= 1;
        base = base * base % m;
    }

    // result < modulus, so it fits back into u64
    Ok(result as u64)
}

/// Modular multiplicative inverse of `e` modulo `phi`.
///
/// Returns `0` when `phi == 1`, otherwise the unique `x` in `[0, phi)` with
/// `e * x ≡ 1 (mod phi)`.
///
/// # Errors
///
/// [`CryptoError::ZeroModulus`] if `phi == 0`, and
/// [`CryptoError::NotInvertible`] if `e` and `phi` are not coprime.
pub fn mod_inverse(e: u64, phi: u64) -> Result<u64, CryptoError> {
    if phi == 0 {
        return Err(CryptoError::ZeroModulus);
    }
    if phi == 1 {
        return Ok(0);
    }
    if gcd(e, phi) != 1 {
        return Err(CryptoError::NotInvertible {
            value: e,
            modulus: phi,
        });
    }

    let (mut old_r, mut r) = (i128::from(e % phi), i128::from(phi));
    let (mut old_s, mut s) = (1_i128, 0_i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    Ok(old_s.rem_euclid(i128::from(phi)) as u64)
}

/// Deterministic primality test by trial division over a 6k±1 wheel.
pub fn is_prime(num: u64) -> bool {
    if num <= 1 {
        return false;
    }
    if num <= 3 {
        return true;
    }
    if num % 2 == 0 || num % 3 == 0 {
        return false;
    }

    let mut i = 5;
    while i <= num / i {
        if num % i == 0 || num % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}
