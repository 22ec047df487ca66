//! Streaming encryption of WinZip AES entry payloads.

use crate::cipher::{CipherConfig, EntryCipher, EntryState};
use crate::error::{Result, ZipAesError};
use crate::kdf::DerivedKeys;
use crate::strength::VERIFIER_LEN;

/// Encrypting half of the WinZip AES entry cipher pair.
///
/// Runs the same key schedule and keystream as
/// [`AesDecryptor`](crate::AesDecryptor), in the opposite direction: each
/// [`reset`](Self::reset) starts a new entry by drawing a fresh salt and
/// returning the `salt || verifier` header the caller writes before the
/// payload, after which plaintext chunks go through
/// [`encrypt`](Self::encrypt).
///
/// The caller also reserves the 10-byte authentication code after the
/// payload ([`AUTH_CODE_LEN`](crate::AUTH_CODE_LEN)); computing it belongs
/// to the MAC collaborator fed by [`auth_key`](Self::auth_key).
pub struct AesEncryptor {
    config: CipherConfig,
    state: Option<EntryState>,
}

impl AesEncryptor {
    /// Create an encryptor for `password` and a declared strength code.
    ///
    /// Both are stored verbatim; the strength code is validated by
    /// [`reset`](Self::reset).
    #[must_use]
    pub fn new(password: &[u8], strength: u8) -> Self {
        Self {
            config: CipherConfig::new(password, strength),
            state: None,
        }
    }

    /// Start a new entry with a fresh random salt.
    ///
    /// Returns the encryption header (`salt || verifier`) to write
    /// immediately before the encrypted payload. The block counter
    /// restarts at zero.
    ///
    /// # Errors
    ///
    /// - [`ZipAesError::UnsupportedEncryption`]: declared strength code is
    ///   not 1, 2 or 3.
    /// - [`ZipAesError::RandomSource`]: the OS random source failed.
    pub fn reset(&mut self) -> Result<Vec<u8>> {
        let strength = self.config.strength()?;
        let mut salt = vec![0u8; strength.salt_len()];
        getrandom::fill(&mut salt)
            .map_err(|err| ZipAesError::random_source(err.to_string()))?;
        self.reset_with_salt(&salt)
    }

    /// Start a new entry with a caller-provided salt.
    ///
    /// Deterministic variant of [`reset`](Self::reset) for callers that
    /// manage their own randomness (or need reproducible output for
    /// interoperability checks). The salt must be exactly
    /// `salt_len` bytes for the declared strength.
    ///
    /// # Errors
    ///
    /// - [`ZipAesError::UnsupportedEncryption`]: declared strength code is
    ///   not 1, 2 or 3.
    /// - [`ZipAesError::InvalidSaltLength`]: salt does not match the
    ///   strength's salt length.
    pub fn reset_with_salt(&mut self, salt: &[u8]) -> Result<Vec<u8>> {
        self.state = None;

        let strength = self.config.strength()?;
        if salt.len() != strength.salt_len() {
            return Err(ZipAesError::invalid_salt_length(
                strength.salt_len(),
                salt.len(),
            ));
        }

        let keys = DerivedKeys::derive(&self.config.password, salt, strength);
        let mut header = Vec::with_capacity(strength.header_len());
        header.extend_from_slice(salt);
        header.extend_from_slice(&keys.verifier());
        debug_assert_eq!(header.len(), strength.salt_len() + VERIFIER_LEN);

        self.state = Some(EntryState::install(strength, &keys));
        Ok(header)
    }

    /// Encrypt a plaintext chunk in place, continuing the entry keystream.
    ///
    /// Output length always equals input length.
    ///
    /// # Errors
    ///
    /// [`ZipAesError::CipherNotReady`] if no successful
    /// [`reset`](Self::reset) preceded this call.
    pub fn encrypt(&mut self, data: &mut [u8]) -> Result<()> {
        let state = self.state.as_mut().ok_or(ZipAesError::CipherNotReady)?;
        state.keystream.apply(data);
        Ok(())
    }

    /// The HMAC-SHA1 key derived for this entry's authentication code.
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

impl EntryCipher for AesEncryptor {
    fn header_len(&self) -> Result<usize> {
        Ok(self.config.strength()?.header_len())
    }
}
