//! Base32 codec for shared secrets (RFC 4648 alphabet, `=` padding).
//!
//! Decoding is lenient in two ways that authenticator apps rely on: lowercase input is accepted
//! and trailing bits that don't fill a whole byte are dropped instead of being rejected.

use tracing::trace;

use crate::Error;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const PAD: char = '=';

/// Decode a Base32 string into raw bytes.
///
/// Trailing `=` padding is stripped and the remaining characters are matched case-insensitively
/// against `A-Z2-7`. Leftover bits at the end that don't form a complete byte are discarded, so
/// the output is always `floor(5 * chars / 8)` bytes long.
pub fn decode(text: &str) -> Result<Vec<u8>, Error> {
    let text = text.trim_end_matches(PAD);
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer = 0_u32;
    let mut bits = 0_u8;

    for (position, character) in text.chars().enumerate() {
        let value = index(character.to_ascii_uppercase())
            .ok_or(Error::InvalidEncoding {
                character,
                position,
            })?;

        buffer = (buffer << 5) | u32::from(value);
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    trace!(chars = text.len(), bytes = out.len(), discarded_bits = bits, "decoded base32");

    Ok(out)
}

/// Encode raw bytes as padded Base32 string.
///
/// The output length is always a multiple of 8, see [`encoded_len`].
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    let mut buffer = 0_u32;
    let mut bits = 0_u8;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            out.push(symbol(buffer >> bits));
        }

        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        out.push(symbol(buffer << (5 - bits)));
    }

    while out.len() % 8 != 0 {
        out.push(PAD);
    }

    out
}

/// Exact length of the padded Base32 text for `len` raw bytes.
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(5) * 8
}

fn index(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

fn symbol(value: u32) -> char {
    char::from(ALPHABET[(value & 0x1f) as usize])
}
