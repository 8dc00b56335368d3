//! Textbook RSA over `u64`: key derivation from two primes, block
//! encryption and decryption with a per-block calculation trace, and the
//! standalone modular exponentiation calculator.
//!
//! Blocks are taken from the decimal ASCII encoding of the message (see
//! [`crate::codec`]), not from the raw characters. A block whose numeric
//! value is not below `n` cannot be recovered; such blocks are logged but
//! still encrypted.

use crate::codec::{CODE_WIDTH, ascii_to_text, split_into_blocks, text_to_ascii};
use crate::error::CryptoError;
use crate::math::{gcd, is_prime, mod_inverse, mod_pow};
use crate::models::{
    DecryptResponse, DecryptionStep, EncryptResponse, EncryptionStep, KeyResponse,
    ModularResponse, PrivateKey, PublicKey,
};

/// Block size used when the caller does not pick one.
pub const DEFAULT_BLOCK_SIZE: usize = CODE_WIDTH;

/// Widest block whose decimal value always fits in a `u64`.
pub const MAX_BLOCK_SIZE: usize = 19;

/// An RSA key pair derived from two primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    pub p: u64,
    pub q: u64,
    pub n: u64,
    pub phi: u64,
    pub e: u64,
    pub d: u64,
}

impl KeyPair {
    /// Derives `n`, `phi`, the smallest odd public exponent `e >= 3` coprime
    /// with `phi`, and `d = e^-1 mod phi`.
    pub fn generate(p: u64, q: u64) -> Result<Self, CryptoError> {
        // Checked before primality so oversized inputs skip trial division
        let n = p.checked_mul(q).ok_or(CryptoError::Overflow("n = p * q"))?;

        if !is_prime(p) || !is_prime(q) {
            return Err(CryptoError::NotPrime);
        }

        let phi = (p - 1)
            .checked_mul(q - 1)
            .ok_or(CryptoError::Overflow("phi = (p - 1) * (q - 1)"))?;

        if phi < 2 {
            return Err(CryptoError::NoPublicExponent { phi });
        }

        let mut e = 3;
        while e < phi && gcd(e, phi) != 1 {
            e += 2;
        }
        if gcd(e, phi) != 1 {
            return Err(CryptoError::NoPublicExponent { phi });
        }

        let d = mod_inverse(e, phi)?;

        tracing::debug!(p, q, n, phi, e, d, "derived key pair");

        Ok(Self { p, q, n, phi, e, d })
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            e: self.e,
            n: self.n,
        }
    }

    pub fn private_key(&self) -> PrivateKey {
        PrivateKey {
            d: self.d,
            n: self.n,
        }
    }
}

impl From<KeyPair> for KeyResponse {
    fn from(keys: KeyPair) -> Self {
        Self {
            p: keys.p,
            q: keys.q,
            n: keys.n,
            phi: keys.phi,
            e: keys.e,
            d: keys.d,
            public_key: keys.public_key(),
            private_key: keys.private_key(),
        }
    }
}

/// Encrypts `message` block by block with `c = m^e mod n`.
pub fn encrypt(
    message: &str,
    key: PublicKey,
    block_size: usize,
) -> Result<EncryptResponse, CryptoError> {
    if !(1..=MAX_BLOCK_SIZE).contains(&block_size) {
        return Err(CryptoError::InvalidBlockSize(block_size));
    }

    let ascii_text = text_to_ascii(message)?;
    let blocks = split_into_blocks(&ascii_text, block_size)?;

    let mut encrypted_blocks = Vec::with_capacity(blocks.len());
    let mut encryption_steps = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.iter().enumerate() {
        let value: u64 = block
            .parse()
            .map_err(|_| CryptoError::InvalidDigits(block.clone()))?;
        if value >= key.n {
            tracing::warn!(
                block = index + 1,
                value,
                n = key.n,
                "block is not below the modulus and will not decrypt correctly"
            );
        }

        let encrypted = mod_pow(value, key.e, key.n)?;
        encrypted_blocks.push(encrypted);
        encryption_steps.push(EncryptionStep {
            block: index + 1,
            original: block.clone(),
            calculation: format!("{}^{} mod {}", block, key.e, key.n),
            result: encrypted,
        });
    }

    let ciphertext = join_blocks(&encrypted_blocks);

    Ok(EncryptResponse {
        original_message: message.to_string(),
        ascii_text,
        blocks,
        encrypted_blocks,
        encryption_steps,
        ciphertext,
    })
}

/// Decrypts whitespace-separated ciphertext blocks with `m = c^d mod n`,
/// reading each result as one three-digit character code.
pub fn decrypt(cipher_text: &str, key: PrivateKey) -> Result<DecryptResponse, CryptoError> {
    let blocks = cipher_text
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|_| CryptoError::InvalidCiphertext(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut decrypted_blocks = Vec::with_capacity(blocks.len());
    let mut decryption_steps = Vec::with_capacity(blocks.len());

    for (index, &block) in blocks.iter().enumerate() {
        let decrypted = mod_pow(block, key.d, key.n)?;
        decrypted_blocks.push(format!("{decrypted:0width$}", width = CODE_WIDTH));
        decryption_steps.push(DecryptionStep {
            block: index + 1,
            original: block,
            calculation: format!("{}^{} mod {}", block, key.d, key.n),
            result: decrypted,
        });
    }

    let ascii_text = decrypted_blocks.concat();
    let original_message = ascii_to_text(&ascii_text)?;

    Ok(DecryptResponse {
        cipher_text: join_blocks(&blocks),
        decrypted_blocks,
        ascii_text,
        original_message,
        decryption_steps,
    })
}

/// Evaluates `base^exponent mod modulus` for the calculator endpoint.
pub fn modular(base: u64, exponent: u64, modulus: u64) -> Result<ModularResponse, CryptoError> {
    let result = mod_pow(base, exponent, modulus)?;

    Ok(ModularResponse {
        calculation: format!("{base}^{exponent} mod {modulus}"),
        result,
    })
}

fn join_blocks(blocks: &[u64]) -> String {
    blocks
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
