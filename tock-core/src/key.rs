use std::fmt;

use secrecy::{ExposeSecret, Zeroize};

use crate::{base32, Error};

/// The shared secret of a **Tock** account that should be kept private as much as possible.
///
/// The content is wiped from memory when the key is dropped and never shows up in debug output.
pub struct Key(Vec<u8>);

impl Key {
    #[must_use]
    pub fn new(content: Vec<u8>) -> Self {
        Self(content)
    }

    /// Decode a key from its Base32 text form.
    ///
    /// Fails if the text contains characters outside the Base32 alphabet or nothing at all.
    pub fn from_base32(text: &str) -> Result<Self, Error> {
        base32::decode(text).map(Self)
    }

    /// Encode the key as padded Base32 text.
    #[must_use]
    pub fn to_base32(&self) -> String {
        base32::encode(&self.0)
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for Key {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ExposeSecret<Vec<u8>> for Key {
    fn expose_secret(&self) -> &Vec<u8> {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key([REDACTED; {}])", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_base32() {
        let key = Key::from_base32("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(
            &vec![72, 101, 108, 108, 111, 33, 222, 173, 190, 239],
            key.expose_secret()
        );
        assert_eq!("JBSWY3DPEHPK3PXP", key.to_base32());
    }

    #[test]
    fn debug_hides_content() {
        let key = Key::new(b"hunter2".to_vec());
        assert_eq!("Key([REDACTED; 7])", format!("{key:?}"));
    }
}
