//! Behavior shared by the encrypting and decrypting entry ciphers.

use zeroize::Zeroizing;

use crate::ctr::CtrKeystream;
use crate::error::Result;
use crate::kdf::DerivedKeys;
use crate::strength::AesStrength;

/// General-purpose bit flag a ZIP entry must set when it is AES-encrypted.
pub const FLAG_AES_ENCRYPTED: u16 = 0x0001;

/// Operations common to [`AesEncryptor`](crate::AesEncryptor) and
/// [`AesDecryptor`](crate::AesDecryptor).
///
/// Both directions share the key schedule and the entry framing; they
/// differ only in which side of the transform they run and whether they
/// produce or consume the header.
pub trait EntryCipher {
    /// Number of bytes occupying the start of the encrypted payload: the
    /// salt followed by the two-byte password verifier.
    ///
    /// Callers read or reserve exactly this many bytes before the payload.
    /// Fails with [`ZipAesError::UnsupportedEncryption`] when the declared
    /// strength code is not one of the supported values.
    ///
    /// [`ZipAesError::UnsupportedEncryption`]: crate::ZipAesError::UnsupportedEncryption
    fn header_len(&self) -> Result<usize>;

    /// The general-purpose bit flag value this encryption scheme requires.
    ///
    /// Always [`FLAG_AES_ENCRYPTED`], independent of strength.
    fn general_purpose_flag(&self) -> u16 {
        FLAG_AES_ENCRYPTED
    }
}

/// Password and declared strength shared by both cipher directions.
///
/// The strength code is stored verbatim and validated lazily, when the
/// parameters are first needed.
pub(crate) struct CipherConfig {
    pub(crate) password: Zeroizing<Vec<u8>>,
    pub(crate) strength_code: u8,
}

impl CipherConfig {
    pub(crate) fn new(password: &[u8], strength_code: u8) -> Self {
        Self {
            password: Zeroizing::new(password.to_vec()),
            strength_code,
        }
    }

    pub(crate) fn strength(&self) -> Result<AesStrength> {
        AesStrength::from_code(self.strength_code)
    }
}

/// Per-entry cipher state: the keystream plus the derived authentication
/// key held for the MAC collaborator.
///
/// Installed by a successful reset, discarded by the next one.
pub(crate) struct EntryState {
    pub(crate) keystream: CtrKeystream,
    pub(crate) auth_key: Zeroizing<Vec<u8>>,
}

impl EntryState {
    pub(crate) fn install(strength: AesStrength, keys: &DerivedKeys) -> Self {
        Self {
            keystream: CtrKeystream::new(strength, keys.encryption_key()),
            auth_key: Zeroizing::new(keys.auth_key().to_vec()),
        }
    }
}
