//! Digest helpers used by the reference VM and the P2SH tests.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

pub fn ripemd160(data: &[u8]) -> Vec<u8> {
    Ripemd160::digest(data).to_vec()
}

/// RIPEMD-160 of SHA-256: the 20-byte digest P2SH commits to.
pub fn hash160(data: &[u8]) -> Vec<u8> {
    ripemd160(&sha256(data))
}

/// Double SHA-256.
pub fn hash256(data: &[u8]) -> Vec<u8> {
    sha256(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lengths() {
        assert_eq!(sha256(b"abc").len(), 32);
        assert_eq!(ripemd160(b"abc").len(), 20);
        assert_eq!(hash160(b"abc").len(), 20);
        assert_eq!(hash256(b"abc").len(), 32);
    }

    #[test]
    fn test_hash160_of_empty() {
        // RIPEMD160(SHA256("")), a fixed well-known vector
        assert_eq!(
            hex::encode(hash160(b"")),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
    }

    #[test]
    fn test_sha256_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
