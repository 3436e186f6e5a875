//! Key type for the 128-bit cipher.

/// 128-bit cipher key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CipherKey(pub [u8; 16]);

impl From<[u8; 16]> for CipherKey {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8; 16]> for CipherKey {
    fn as_ref(&self) -> &[u8; 16] {
        &self.0
    }
}
