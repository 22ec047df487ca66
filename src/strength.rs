//! AES strength parameter table and WinZip AES format constants.
//!
//! The WinZip AE specification fixes every value here; none of them is
//! configurable. The strength code is what a ZIP entry declares in its AES
//! extra field, and it determines the AES key size and the salt size used
//! for key derivation.

use crate::error::{Result, ZipAesError};

/// Length in bytes of the password verifier stored at the end of the
/// per-entry encryption header.
pub const VERIFIER_LEN: usize = 2;

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Length in bytes of the HMAC-SHA1 authentication code that trails the
/// encrypted payload.
///
/// This crate neither writes nor checks the code, but callers must account
/// for these bytes when framing an entry.
pub const AUTH_CODE_LEN: usize = 10;

/// PBKDF2 iteration count fixed by the WinZip AE specification.
pub const PBKDF2_ROUNDS: u32 = 1000;

/// AES encryption strength declared by a ZIP entry.
///
/// The discriminants are the on-disk strength codes from the AES extra
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AesStrength {
    /// AES-128: 16-byte key, 8-byte salt.
    Aes128 = 1,
    /// AES-192: 24-byte key, 12-byte salt.
    Aes192 = 2,
    /// AES-256: 32-byte key, 16-byte salt.
    Aes256 = 3,
}

impl AesStrength {
    /// Look up a strength by its on-disk code.
    ///
    /// This is the single place an out-of-range code is rejected; entry
    /// ciphers store the declared code verbatim and call this when the
    /// parameters are first needed.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(AesStrength::Aes128),
            2 => Ok(AesStrength::Aes192),
            3 => Ok(AesStrength::Aes256),
            _ => Err(ZipAesError::unsupported_encryption(code)),
        }
    }

    /// The on-disk strength code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// AES key size in bits.
    #[must_use]
    pub fn bits(self) -> u16 {
        match self {
            AesStrength::Aes128 => 128,
            AesStrength::Aes192 => 192,
            AesStrength::Aes256 => 256,
        }
    }

    /// AES key length in bytes.
    #[must_use]
    pub fn key_len(self) -> usize {
        match self {
            AesStrength::Aes128 => 16,
            AesStrength::Aes192 => 24,
            AesStrength::Aes256 => 32,
        }
    }

    /// Salt length in bytes for PBKDF2 derivation.
    #[must_use]
    pub fn salt_len(self) -> usize {
        match self {
            AesStrength::Aes128 => 8,
            AesStrength::Aes192 => 12,
            AesStrength::Aes256 => 16,
        }
    }

    /// Total derived key material length: encryption key, authentication
    /// key and the two verifier bytes.
    #[must_use]
    pub fn derived_key_len(self) -> usize {
        2 * self.key_len() + VERIFIER_LEN
    }

    /// Length of the per-entry encryption header (salt followed by the
    /// verifier).
    #[must_use]
    pub fn header_len(self) -> usize {
        self.salt_len() + VERIFIER_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_table() {
        let table = [
            (AesStrength::Aes128, 1u8, 128u16, 16usize, 8usize),
            (AesStrength::Aes192, 2, 192, 24, 12),
            (AesStrength::Aes256, 3, 256, 32, 16),
        ];
        for (strength, code, bits, key_len, salt_len) in table {
            assert_eq!(strength.code(), code);
            assert_eq!(strength.bits(), bits);
            assert_eq!(strength.key_len(), key_len);
            assert_eq!(strength.salt_len(), salt_len);
            assert_eq!(strength.derived_key_len(), 2 * key_len + 2);
            assert_eq!(strength.header_len(), salt_len + 2);
        }
    }

    #[test]
    fn test_from_code_roundtrip() {
        for code in 1..=3u8 {
            assert_eq!(AesStrength::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        for code in [0u8, 4, 0x80, 0xFF] {
            let err = AesStrength::from_code(code).unwrap_err();
            assert!(
                matches!(err, ZipAesError::UnsupportedEncryption { strength } if strength == code)
            );
        }
    }
}
