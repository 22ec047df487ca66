//! Error types for WinZip AES entry encryption.
//!
//! All fallible operations in this crate return [`Result<T>`]. The two
//! failure kinds a caller is expected to act on are
//! [`ZipAesError::BadPassword`] (surface as "incorrect password") and
//! [`ZipAesError::UnsupportedEncryption`] (treat the archive as corrupt or
//! unsupported). Everything else indicates a caller contract violation or
//! an environment failure and is not retried internally.

use std::io;
use thiserror::Error;

/// The error type for WinZip AES entry encryption operations.
#[derive(Debug, Error)]
pub enum ZipAesError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The entry declares an AES strength code outside the supported set.
    ///
    /// Valid codes are 1 (AES-128), 2 (AES-192) and 3 (AES-256); the raw
    /// declared code is carried for diagnostics.
    #[error("Unsupported encryption: strength code {strength:#04x}")]
    UnsupportedEncryption {
        /// The strength code found in the entry metadata.
        strength: u8,
    },

    /// The derived password verifier does not match the one stored in the
    /// entry header.
    ///
    /// Raised before any cipher state is installed; no plaintext is ever
    /// produced from a wrong password.
    #[error("Bad password: verifier mismatch")]
    BadPassword,

    /// The entry header is shorter than the declared strength requires.
    #[error("Encryption header too short: need {needed} bytes, have {available}")]
    HeaderTooShort {
        /// Number of header bytes required by the declared strength.
        needed: usize,
        /// Number of bytes actually supplied.
        available: usize,
    },

    /// A caller-supplied salt does not match the strength's salt length.
    #[error("Invalid salt length: expected {expected} bytes, got {actual}")]
    InvalidSaltLength {
        /// Salt length required by the declared strength.
        expected: usize,
        /// Length of the salt actually supplied.
        actual: usize,
    },

    /// A transform or key accessor was used before a successful reset.
    #[error("Cipher not ready: reset with an entry header first")]
    CipherNotReady,

    /// A WinZip AES extra field record is malformed.
    #[error("Invalid AES extra field: {message}")]
    InvalidExtraField {
        /// Description of the malformation.
        message: String,
    },

    /// The operating system random source failed while drawing a salt.
    #[error("Random source failure: {message}")]
    RandomSource {
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for WinZip AES operations.
pub type Result<T> = std::result::Result<T, ZipAesError>;

impl ZipAesError {
    /// Create an unsupported encryption error.
    pub fn unsupported_encryption(strength: u8) -> Self {
        Self::UnsupportedEncryption { strength }
    }

    /// Create a header-too-short error.
    pub fn header_too_short(needed: usize, available: usize) -> Self {
        Self::HeaderTooShort { needed, available }
    }

    /// Create an invalid salt length error.
    pub fn invalid_salt_length(expected: usize, actual: usize) -> Self {
        Self::InvalidSaltLength { expected, actual }
    }

    /// Create an invalid extra field error.
    pub fn invalid_extra_field(message: impl Into<String>) -> Self {
        Self::InvalidExtraField {
            message: message.into(),
        }
    }

    /// Create a random source error.
    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSource {
            message: message.into(),
        }
    }
}
