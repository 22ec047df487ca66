//! PBKDF2 key derivation for WinZip AES entries.
//!
//! One derivation per entry: PBKDF2-HMAC-SHA1 over (password, salt) with
//! 1000 iterations, producing `2 * key_len + 2` bytes that split into the
//! encryption key, the authentication key and the two-byte password
//! verifier. The split offsets must match the WinZip AE layout exactly or
//! nothing downstream interoperates.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::strength::{AesStrength, PBKDF2_ROUNDS, VERIFIER_LEN};

/// Key material derived from (password, salt) for a single entry.
///
/// Wiped on drop.
pub(crate) struct DerivedKeys {
    material: Zeroizing<Vec<u8>>,
    key_len: usize,
}

impl DerivedKeys {
    /// Run the fixed-parameter PBKDF2 derivation for `strength`.
    pub(crate) fn derive(password: &[u8], salt: &[u8], strength: AesStrength) -> Self {
        let mut material = Zeroizing::new(vec![0u8; strength.derived_key_len()]);
        pbkdf2_hmac::<Sha1>(password, salt, PBKDF2_ROUNDS, material.as_mut_slice());
        Self {
            material,
            key_len: strength.key_len(),
        }
    }

    /// The AES encryption key (first `key_len` bytes).
    pub(crate) fn encryption_key(&self) -> &[u8] {
        &self.material[..self.key_len]
    }

    /// The HMAC-SHA1 authentication key (middle `key_len` bytes).
    ///
    /// Consumed by the MAC collaborator, not by this crate.
    pub(crate) fn auth_key(&self) -> &[u8] {
        &self.material[self.key_len..2 * self.key_len]
    }

    /// The two-byte password verifier (last bytes of the material).
    pub(crate) fn verifier(&self) -> [u8; VERIFIER_LEN] {
        let mut verifier = [0u8; VERIFIER_LEN];
        verifier.copy_from_slice(&self.material[2 * self.key_len..]);
        verifier
    }
}
