//! # Tock Gen(erator)
//!
//! Generator component of **Tock**. It creates HOTP ([RFC 4226]) and TOTP ([RFC 6238]) codes from
//! the secrets handled by [`tock_core`].
//!
//! All functions are pure. The current time is always passed in by the caller, with
//! [`unix_time`] as the single place that reads the system clock.
//!
//! [RFC 4226]: https://www.rfc-editor.org/rfc/rfc4226
//! [RFC 6238]: https://www.rfc-editor.org/rfc/rfc6238

#![deny(rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::cast_possible_truncation)]

use std::{
    fmt::{self, Display},
    time::{SystemTimeError, UNIX_EPOCH},
};

use hmac::{digest::KeyInit, Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
pub use tock_core::{Algorithm, Key};
use tock_core::ExposeSecret;
use tracing::trace;

/// Most common amount of digits for OTPs.
pub const DEFAULT_DIGITS: u8 = 6;
/// Most common length of a TOTP window in seconds.
pub const DEFAULT_PERIOD: u64 = 30;
/// Upper bound for the digit count. The truncated HMAC value has 31 bits, so anything above
/// `10^9` would no longer produce evenly distributed codes.
pub const MAX_DIGITS: u8 = 9;

/// Errors that can occur when generating an OTP.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to get a timestamp from the system.
    #[error("failed to get time since unix epoch")]
    Time(#[from] SystemTimeError),
    /// The secret was empty or its Base32 form couldn't be decoded.
    #[error("the secret is empty or not valid Base32")]
    InvalidSecret(#[source] Option<tock_core::Error>),
    /// The requested amount of digits is outside of `1..=9`.
    #[error("digit count must be between 1 and 9, got {0}")]
    InvalidDigitCount(u8),
    /// A TOTP period of zero seconds was given.
    #[error("the period must be at least one second")]
    InvalidPeriod,
}

/// Settings that control how a TOTP is derived from a secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Seconds that a single code stays valid.
    pub period: u64,
    /// Amount of digits in the final code.
    pub digits: u8,
    /// HMAC algorithm to use.
    pub algorithm: Algorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            digits: DEFAULT_DIGITS,
            algorithm: Algorithm::Sha1,
        }
    }
}

/// Create a counter based OTP from the raw `key` bytes.
pub fn hotp(key: &[u8], counter: u64, digits: u8, algorithm: Algorithm) -> Result<OtpCode, Error> {
    if !(1..=MAX_DIGITS).contains(&digits) {
        return Err(Error::InvalidDigitCount(digits));
    }
    if key.is_empty() {
        return Err(Error::InvalidSecret(None));
    }

    let digest = mac(algorithm, key, counter)?;
    let code = truncate(&digest) % 10_u32.pow(u32::from(digits));

    trace!(counter, digits, ?algorithm, "generated HOTP");

    Ok(OtpCode { code, digits })
}

/// Create a time based OTP from a Base32 encoded `secret`, for the unix timestamp `now`.
///
/// The code stays the same for every `now` within the same window of `config.period` seconds.
pub fn totp(secret: &str, now: u64, config: &Config) -> Result<OtpCode, Error> {
    let key = Key::from_base32(secret).map_err(|e| Error::InvalidSecret(Some(e)))?;
    let counter = counter(now, config.period)?;

    hotp(key.expose_secret(), counter, config.digits, config.algorithm)
}

/// Number of whole `period` windows that passed between the unix epoch and `now`.
pub fn counter(now: u64, period: u64) -> Result<u64, Error> {
    if period == 0 {
        return Err(Error::InvalidPeriod);
    }

    Ok(now / period)
}

/// Seconds left until the window containing `now` ends, in the range `1..=period`.
pub fn remaining(now: u64, period: u64) -> Result<u64, Error> {
    if period == 0 {
        return Err(Error::InvalidPeriod);
    }

    Ok(period - now % period)
}

/// Current unix timestamp in seconds, as read from the system clock.
pub fn unix_time() -> Result<u64, Error> {
    Ok(UNIX_EPOCH.elapsed()?.as_secs())
}

fn mac(algorithm: Algorithm, key: &[u8], counter: u64) -> Result<Vec<u8>, Error> {
    let message = counter.to_be_bytes();

    match algorithm {
        Algorithm::Sha1 => sign::<Hmac<Sha1>>(key, &message),
        Algorithm::Sha256 => sign::<Hmac<Sha256>>(key, &message),
        Algorithm::Sha512 => sign::<Hmac<Sha512>>(key, &message),
    }
}

fn sign<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_e| Error::InvalidSecret(None))?;
    mac.update(message);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Dynamic truncation: the low nibble of the last byte selects 4 bytes, read as big-endian
/// integer without its sign bit.
fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0xf) as usize;

    u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ])
}

/// A generated OTP code that can be used to verify identity against a service.
///
/// The numeric `code` may have fewer digits than required. Call `to_string()` on an instance to
/// get the final code, shifted with `0`es to exactly `digits` characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpCode {
    /// Truncated value, already reduced modulo `10^digits`.
    pub code: u32,
    /// The desired amount of digits of the OTP.
    pub digits: u8,
}

impl Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0>1$}", self.code, self.digits as usize)
    }
}
