//! # Tock Core
//!
//! Core component of **Tock** that is shared between all other components and serves as building
//! block. It holds the secret [`Key`] type, the Base32 codec that moves secrets between their raw
//! and textual form, and the generator for new random secrets.

#![deny(rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::cast_possible_truncation)]

pub use key::Key;
pub use secrecy::ExposeSecret;

pub mod base32;
mod key;
pub mod secret;

/// Errors that can occur when decoding, encoding or generating secrets.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A character outside the Base32 alphabet was found in the input.
    #[error("invalid Base32 character `{character}` at position {position}")]
    InvalidEncoding {
        /// The offending character, as it appeared in the input.
        character: char,
        /// Zero-based character position in the input, after padding was stripped.
        position: usize,
    },
    /// The input was empty or consisted of padding only.
    #[error("no Base32 characters to decode")]
    EmptyInput,
    /// The secure random source of the host failed to deliver bytes.
    #[error("no secure random source available")]
    EntropyUnavailable(#[source] rand::Error),
    /// A secret of zero bytes was requested.
    #[error("secret length must be at least one byte")]
    InvalidLength,
}

/// Algorithm used in the OTP generation to create the final code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// SHA-1 algorithm, most common.
    #[default]
    Sha1,
    /// SHA(2)-256 algorithm.
    Sha256,
    /// SHA(2)-512 algorithm.
    Sha512,
}
