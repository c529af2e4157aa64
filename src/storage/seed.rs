//! The 32-byte seed value shared by the accumulator, generator and store.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Seed length in bytes.
pub const SEED_SIZE: usize = 32;

/// A 32-byte seed.
///
/// Used both as the value persisted across restarts and as generator key
/// material. The bytes are wiped when the value is dropped, and `Debug`
/// never prints them.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_SIZE]);

impl Seed {
    /// Wraps raw seed bytes.
    pub fn from_bytes(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }
}

impl From<[u8; SEED_SIZE]> for Seed {
    fn from(bytes: [u8; SEED_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = usize;

    /// Fails with the offending length unless `bytes` is exactly 32 bytes.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; SEED_SIZE] = bytes.try_into().map_err(|_| bytes.len())?;
        Ok(Self(array))
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_exact_length() {
        let seed = Seed::try_from(&[7u8; SEED_SIZE][..]).unwrap();
        assert_eq!(seed.as_bytes(), &[7u8; SEED_SIZE]);
    }

    #[test]
    fn test_try_from_wrong_length() {
        assert_eq!(Seed::try_from(&[0u8; 31][..]), Err(31));
        assert_eq!(Seed::try_from(&[0u8; 33][..]), Err(33));
        assert_eq!(Seed::try_from(&[][..]), Err(0));
    }

    #[test]
    fn test_debug_redacts_bytes() {
        let seed = Seed::from_bytes([0xAB; SEED_SIZE]);
        let rendered = format!("{:?}", seed);
        assert!(!rendered.contains("171"));
        assert!(!rendered.to_lowercase().contains("ab"));
    }
}
