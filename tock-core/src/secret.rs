//! Creation of new random secrets and clean up of user provided ones.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;

use crate::{Error, Key};

/// Default secret length in bytes. 160 bits match the output size of HMAC-SHA1, as recommended
/// by RFC 4226.
pub const DEFAULT_SECRET_LEN: usize = 20;

/// Generate a new random secret of `len` bytes and return it as Base32 text.
///
/// The bytes come from the operating system's secure random source.
pub fn generate(len: usize) -> Result<String, Error> {
    generate_with(&mut OsRng, len)
}

/// Same as [`generate`] but with a custom random source.
///
/// Only cryptographically secure generators are accepted. A failure of the source is reported as
/// [`Error::EntropyUnavailable`] and never replaced with weaker randomness.
pub fn generate_with<R>(rng: &mut R, len: usize) -> Result<String, Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if len == 0 {
        return Err(Error::InvalidLength);
    }

    let mut key = Key::new(vec![0; len]);
    rng.try_fill_bytes(key.as_mut_bytes())
        .map_err(Error::EntropyUnavailable)?;

    debug!(len, "generated new secret");

    Ok(key.to_base32())
}

/// Clean up a secret as typed or pasted by a user.
///
/// Removes all whitespace (authenticator apps often show secrets in groups of four) and converts
/// the rest to uppercase. Validation is left to [`crate::base32::decode`].
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
