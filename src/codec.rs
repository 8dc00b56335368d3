//! Fixed-width decimal encoding of text.
//!
//! Each character becomes its code point written as exactly [`CODE_WIDTH`]
//! decimal digits, so `"Hi"` encodes to `"072105"`.

use crate::error::CryptoError;

/// Digits per encoded character.
pub const CODE_WIDTH: usize = 3;

/// Exclusive upper bound on encodable code points.
pub const MAX_CODE_POINT: u32 = 1000;

pub fn text_to_ascii(text: &str) -> Result<String, CryptoError> {
    let mut encoded = String::with_capacity(text.len() * CODE_WIDTH);
    for ch in text.chars() {
        let code = u32::from(ch);
        if code >= MAX_CODE_POINT {
            return Err(CryptoError::CodePointOutOfRange { ch, code });
        }
        encoded.push_str(&format!("{code:0width$}", width = CODE_WIDTH));
    }
    Ok(encoded)
}

/// Inverse of [`text_to_ascii`]. A trailing chunk shorter than
/// [`CODE_WIDTH`] is decoded as it stands.
pub fn ascii_to_text(ascii: &str) -> Result<String, CryptoError> {
    split_into_blocks(ascii, CODE_WIDTH)?
        .into_iter()
        .map(|chunk| {
            chunk
                .parse::<u32>()
                .ok()
                .filter(|_| chunk.bytes().all(|b| b.is_ascii_digit()))
                .and_then(char::from_u32)
                .ok_or(CryptoError::InvalidDigits(chunk))
        })
        .collect()
}

/// Splits `text` into consecutive chunks of `block_size` characters; the
/// last chunk may be shorter.
pub fn split_into_blocks(text: &str, block_size: usize) -> Result<Vec<String>, CryptoError> {
    if block_size == 0 {
        return Err(CryptoError::InvalidBlockSize(block_size));
    }

    let chars: Vec<char> = text.chars().collect();
    Ok(chars
        .chunks(block_size)
        .map(|chunk| chunk.iter().collect())
        .collect())
}
