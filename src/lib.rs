//! # zipaes
//!
//! WinZip AES (AE-1/AE-2) entry encryption for ZIP archives.
//!
//! This crate implements the per-entry encryption scheme WinZip layered on
//! the ZIP format: PBKDF2-HMAC-SHA1 key derivation from a password and a
//! random salt, cheap password verification before any payload byte is
//! trusted, and streaming AES-CTR with the format's block-index counter
//! convention. It is the cipher layer only: the archive container,
//! compression and the authentication-code trailer are the caller's
//! collaborators.
//!
//! ## Entry layout
//!
//! ```text
//! ┌───────────────────────┬──────────────────────┬──────────────────┐
//! │ salt (8|12|16 bytes)  │                      │ authentication   │
//! │ verifier (2 bytes)    │ encrypted payload    │ code (10 bytes)  │
//! └───────────────────────┴──────────────────────┴──────────────────┘
//!   written/consumed here   transformed here       caller's MAC layer
//! ```
//!
//! The salt length follows the declared strength (code 1 = AES-128,
//! 2 = AES-192, 3 = AES-256); key derivation always runs 1000 PBKDF2
//! iterations, fixed by the format.
//!
//! ## Example
//!
//! ```rust
//! use zipaes::{decrypt_entry, encrypt_entry};
//!
//! let (header, ciphertext) = encrypt_entry(b"swordfish", 3, b"attack at dawn").unwrap();
//! let plaintext = decrypt_entry(b"swordfish", 3, &header, &ciphertext).unwrap();
//! assert_eq!(plaintext, b"attack at dawn");
//! ```
//!
//! For streaming use, [`AesEncryptor`] and [`AesDecryptor`] accept chunks
//! of any size and may be reset once per entry across a whole archive;
//! [`AesReader`]/[`AesWriter`] adapt them to `std::io`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod cipher;
mod ctr;
mod decryptor;
mod encryptor;
mod error;
mod extra;
mod io;
mod kdf;
mod strength;

pub use cipher::{EntryCipher, FLAG_AES_ENCRYPTED};
pub use decryptor::AesDecryptor;
pub use encryptor::AesEncryptor;
pub use error::{Result, ZipAesError};
pub use extra::{AeVersion, AesExtraField, EXTRA_FIELD_ID, VENDOR_ID};
pub use io::{AesReader, AesWriter};
pub use strength::{AesStrength, AUTH_CODE_LEN, BLOCK_LEN, PBKDF2_ROUNDS, VERIFIER_LEN};

/// Encrypt one entry payload in a single call.
///
/// Draws a fresh salt and returns `(header, ciphertext)`: the header goes
/// immediately before the ciphertext in the archive. Equivalent to an
/// [`AesEncryptor`] reset followed by one `encrypt` call.
///
/// # Errors
///
/// See [`AesEncryptor::reset`].
pub fn encrypt_entry(
    password: &[u8],
    strength: u8,
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut cipher = AesEncryptor::new(password, strength);
    let header = cipher.reset()?;
    let mut data = plaintext.to_vec();
    cipher.encrypt(&mut data)?;
    Ok((header, data))
}

/// Decrypt one entry payload in a single call.
///
/// `header` is the `salt || verifier` sequence preceding the payload;
/// `ciphertext` must not include the 10-byte authentication code.
/// Equivalent to an [`AesDecryptor`] reset followed by one `decrypt` call.
///
/// # Errors
///
/// See [`AesDecryptor::reset`].
pub fn decrypt_entry(
    password: &[u8],
    strength: u8,
    header: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let mut cipher = AesDecryptor::new(password, strength);
    cipher.reset(header)?;
    let mut data = ciphertext.to_vec();
    cipher.decrypt(&mut data)?;
    Ok(data)
}
