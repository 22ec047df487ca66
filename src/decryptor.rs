//! Streaming decryption of WinZip AES entry payloads.

use crate::cipher::{CipherConfig, EntryCipher, EntryState};
use crate::error::{Result, ZipAesError};
use crate::kdf::DerivedKeys;
use crate::strength::VERIFIER_LEN;

/// Decrypting half of the WinZip AES entry cipher pair.
///
/// One instance is reusable across every entry sharing a password: call
/// [`reset`](Self::reset) with an entry's encryption header, then feed
/// successive ciphertext chunks to [`decrypt`](Self::decrypt). Chunk
/// boundaries are free; the keystream resumes exactly where the previous
/// chunk stopped, and each `reset` restarts the block counter for the
/// next entry.
///
/// # Example
///
/// ```rust
/// use zipaes::AesDecryptor;
///
/// let mut cipher = AesDecryptor::new(b"password", 3);
/// cipher
///     .reset(&[
///         125, 138, 163, 42, 19, 1, 155, 66, 203, 174, 183, 235, 197, 122, 232, 68, 252, 225,
///     ])
///     .unwrap();
///
/// let mut data = [161];
/// cipher.decrypt(&mut data).unwrap();
/// assert_eq!(&data, b"a");
/// ```
pub struct AesDecryptor {
    config: CipherConfig,
    state: Option<EntryState>,
}

impl AesDecryptor {
    /// Create a decryptor for `password` and a declared strength code.
    ///
    /// Both are stored verbatim; the strength code is validated by
    /// [`reset`](Self::reset), where an unsupported declaration surfaces as
    /// [`ZipAesError::UnsupportedEncryption`].
    #[must_use]
    pub fn new(password: &[u8], strength: u8) -> Self {
        Self {
            config: CipherConfig::new(password, strength),
            state: None,
        }
    }

    /// Derive this entry's keys from `header` and verify the password.
    ///
    /// `header` is the `salt || verifier` sequence read from the start of
    /// the encrypted payload; it must hold at least
    /// [`header_len`](EntryCipher::header_len) bytes. On success the block
    /// counter restarts at zero and the instance is ready to decrypt.
    ///
    /// # Errors
    ///
    /// - [`ZipAesError::UnsupportedEncryption`]: declared strength code is
    ///   not 1, 2 or 3.
    /// - [`ZipAesError::HeaderTooShort`]: fewer header bytes than the
    ///   strength requires.
    /// - [`ZipAesError::BadPassword`]: derived verifier does not match the
    ///   stored one. No cipher state is installed; a prior entry's state is
    ///   already discarded.
    pub fn reset(&mut self, header: &[u8]) -> Result<()> {
        self.state = None;

        let strength = self.config.strength()?;
        let needed = strength.header_len();
        if header.len() < needed {
            return Err(ZipAesError::header_too_short(needed, header.len()));
        }

        let salt = &header[..strength.salt_len()];
        let stored_verifier = &header[header.len() - VERIFIER_LEN..];

        let keys = DerivedKeys::derive(&self.config.password, salt, strength);
        if keys.verifier() != stored_verifier {
            return Err(ZipAesError::BadPassword);
        }

        self.state = Some(EntryState::install(strength, &keys));
        Ok(())
    }

    /// Decrypt a ciphertext chunk in place, continuing the entry keystream.
    ///
    /// Output length always equals input length; the trailing
    /// authentication code must not be fed through here.
    ///
    /// # Errors
    ///
    /// [`ZipAesError::CipherNotReady`] if no successful
    /// [`reset`](Self::reset) preceded this call.
    pub fn decrypt(&mut self, data: &mut [u8]) -> Result<()> {
        let state = self.state.as_mut().ok_or(ZipAesError::CipherNotReady)?;
        state.keystream.apply(data);
        Ok(())
    }

    /// The HMAC-SHA1 key derived for this entry's authentication code.
    ///
    /// This crate does not compute the code; the key is exposed for the
    /// collaborator that verifies the 10-byte trailer.
    ///
    /// # Errors
    ///
    /// [`ZipAesError::CipherNotReady`] if no successful
    /// [`reset`](Self::reset) preceded this call.
    pub fn auth_key(&self) -> Result<&[u8]> {
        self.state
            .as_ref()
            .map(|state| state.auth_key.as_slice())
            .ok_or(ZipAesError::CipherNotReady)
    }
}

impl EntryCipher for AesDecryptor {
    fn header_len(&self) -> Result<usize> {
        Ok(self.config.strength()?.header_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Entry headers produced by WinZip-compatible tooling, password
    // "password" throughout.
    const HEADER_256_A: [u8; 18] = [
        125, 138, 163, 42, 19, 1, 155, 66, 203, 174, 183, 235, 197, 122, 232, 68, 252, 225,
    ];
    const HEADER_256_B: [u8; 18] = [
        118, 221, 166, 27, 165, 141, 24, 122, 227, 197, 52, 135, 222, 67, 221, 92, 231, 117,
    ];
    const HEADER_128: [u8; 10] = [127, 254, 117, 113, 255, 209, 171, 131, 179, 106];

    #[test]
    fn test_decrypt_aes_256() {
        let mut cipher = AesDecryptor::new(b"password", 3);
        cipher.reset(&HEADER_256_A).unwrap();
        let mut data = [161];
        cipher.decrypt(&mut data).unwrap();
        assert_eq!(&data, b"a");
    }

    #[test]
    fn test_decrypt_aes_128() {
        let mut cipher = AesDecryptor::new(b"password", 1);
        cipher.reset(&HEADER_128).unwrap();
        let mut data = [34, 33, 106];
        cipher.decrypt(&mut data).unwrap();
        assert_eq!(data, [75, 4, 0]);
    }

    #[test]
    fn test_reset_restarts_counter_between_entries() {
        let mut cipher = AesDecryptor::new(b"password", 3);

        cipher.reset(&HEADER_256_A).unwrap();
        let mut data = [161];
        cipher.decrypt(&mut data).unwrap();
        assert_eq!(&data, b"a");

        cipher.reset(&HEADER_256_B).unwrap();
        let mut data = [135];
        cipher.decrypt(&mut data).unwrap();
        assert_eq!(&data, b"b");
    }

    #[test]
    fn test_header_len() {
        let cipher = AesDecryptor::new(b"password", 3);
        assert_eq!(cipher.header_len().unwrap(), 18);
        let cipher = AesDecryptor::new(b"password", 1);
        assert_eq!(cipher.header_len().unwrap(), 10);
    }

    #[test]
    fn test_general_purpose_flag_is_fixed() {
        for code in [1u8, 2, 3, 9] {
            let cipher = AesDecryptor::new(b"password", code);
            assert_eq!(cipher.general_purpose_flag(), 0x0001);
        }
    }

    #[test]
    fn test_wrong_password_is_rejected_before_any_output() {
        let mut cipher = AesDecryptor::new(b"not the password", 3);
        let err = cipher.reset(&HEADER_256_A).unwrap_err();
        assert!(matches!(err, ZipAesError::BadPassword));

        // The failed reset must leave nothing usable behind.
        let mut data = [161];
        let err = cipher.decrypt(&mut data).unwrap_err();
        assert!(matches!(err, ZipAesError::CipherNotReady));
        assert_eq!(data, [161]);
    }

    #[test]
    fn test_failed_reset_discards_previous_entry_state() {
        let mut cipher = AesDecryptor::new(b"password", 3);
        cipher.reset(&HEADER_256_A).unwrap();

        let mut bad_header = HEADER_256_B;
        bad_header[17] ^= 0xFF;
        assert!(cipher.reset(&bad_header).is_err());

        let mut data = [135];
        let err = cipher.decrypt(&mut data).unwrap_err();
        assert!(matches!(err, ZipAesError::CipherNotReady));
    }

    #[test]
    fn test_unsupported_strength_surfaces_at_reset() {
        let mut cipher = AesDecryptor::new(b"password", 7);
        let err = cipher.reset(&HEADER_256_A).unwrap_err();
        assert!(matches!(
            err,
            ZipAesError::UnsupportedEncryption { strength: 7 }
        ));
        assert!(cipher.header_len().is_err());
    }

    #[test]
    fn test_short_header_fails_fast() {
        let mut cipher = AesDecryptor::new(b"password", 3);
        let err = cipher.reset(&HEADER_256_A[..17]).unwrap_err();
        assert!(matches!(
            err,
            ZipAesError::HeaderTooShort {
                needed: 18,
                available: 17
            }
        ));
    }

    #[test]
    fn test_auth_key_requires_reset() {
        let mut cipher = AesDecryptor::new(b"password", 3);
        assert!(matches!(
            cipher.auth_key().unwrap_err(),
            ZipAesError::CipherNotReady
        ));

        cipher.reset(&HEADER_256_A).unwrap();
        assert_eq!(cipher.auth_key().unwrap().len(), 32);
    }
}
