//! Block-indexed AES-CTR keystream for WinZip entry payloads.
//!
//! WinZip's counter convention differs from generic CTR mode: the IV for
//! payload block `n` (0-based) is the 1-based block index `n + 1` encoded
//! as a 4-byte little-endian integer followed by 12 zero bytes. It is not
//! a byte offset, it is not zero-based, and the upper 12 bytes never
//! increment; the index wraps at 2^32 like the format's 32-bit field.
//!
//! The keystream is resumable mid-block so callers may pass chunks of any
//! size: a partially consumed block is continued by the next call instead
//! of being regenerated or skipped.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128Enc, Aes192Enc, Aes256Enc, Block};
use zeroize::Zeroize;

use crate::strength::{AesStrength, BLOCK_LEN};

/// Encrypt-only AES cores for the three supported strengths.
///
/// CTR mode only ever runs the forward block transform, for decryption too.
enum AesCore {
    Aes128(Aes128Enc),
    Aes192(Aes192Enc),
    Aes256(Aes256Enc),
}

impl AesCore {
    fn new(strength: AesStrength, key: &[u8]) -> Self {
        match strength {
            AesStrength::Aes128 => {
                let mut k = [0u8; 16];
                k.copy_from_slice(key);
                let core = AesCore::Aes128(Aes128Enc::new(&k.into()));
                k.zeroize();
                core
            }
            AesStrength::Aes192 => {
                let mut k = [0u8; 24];
                k.copy_from_slice(key);
                let core = AesCore::Aes192(Aes192Enc::new(&k.into()));
                k.zeroize();
                core
            }
            AesStrength::Aes256 => {
                let mut k = [0u8; 32];
                k.copy_from_slice(key);
                let core = AesCore::Aes256(Aes256Enc::new(&k.into()));
                k.zeroize();
                core
            }
        }
    }

    fn encrypt(&self, block: &mut Block) {
        match self {
            AesCore::Aes128(core) => core.encrypt_block(block),
            AesCore::Aes192(core) => core.encrypt_block(block),
            AesCore::Aes256(core) => core.encrypt_block(block),
        }
    }
}

/// Keystream generator with the WinZip block-index counter convention.
///
/// The transform is symmetric: XOR-ing with the keystream encrypts and
/// decrypts alike.
pub(crate) struct CtrKeystream {
    core: AesCore,
    /// Blocks consumed since construction; the next block's IV encodes
    /// `block_index + 1`.
    block_index: u64,
    keystream: [u8; BLOCK_LEN],
    pos: usize,
}

impl CtrKeystream {
    /// Key the cipher and position the stream before block 0.
    ///
    /// `key` must be exactly `strength.key_len()` bytes; the KDF split
    /// guarantees this for all internal callers.
    pub(crate) fn new(strength: AesStrength, key: &[u8]) -> Self {
        debug_assert_eq!(key.len(), strength.key_len());
        Self {
            core: AesCore::new(strength, key),
            block_index: 0,
            keystream: [0u8; BLOCK_LEN],
            // Forces a refill on first use.
            pos: BLOCK_LEN,
        }
    }

    /// XOR the keystream into `data`, resuming exactly where the previous
    /// call stopped.
    pub(crate) fn apply(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            if self.pos == BLOCK_LEN {
                self.refill();
            }
            *byte ^= self.keystream[self.pos];
            self.pos += 1;
        }
    }

    fn refill(&mut self) {
        let mut iv = [0u8; BLOCK_LEN];
        iv[..4].copy_from_slice(&((self.block_index + 1) as u32).to_le_bytes());
        let mut block = Block::from(iv);
        self.core.encrypt(&mut block);
        self.keystream.copy_from_slice(block.as_slice());
        self.pos = 0;
        self.block_index += 1;
    }
}

impl Drop for CtrKeystream {
    fn drop(&mut self) {
        self.keystream.zeroize();
    }
}
