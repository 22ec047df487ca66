//! The WinZip AES extra field (header id `0x9901`).
//!
//! AES-encrypted entries carry one of these records in their extra data to
//! declare the scheme version, the encryption strength and the real
//! compression method (the header's own method field is set to 99). This
//! module owns only this record; all other extra fields and the containing
//! headers are the archive layer's concern.

use crate::error::{Result, ZipAesError};
use crate::strength::AesStrength;

/// Extra field header id assigned to WinZip AES encryption.
pub const EXTRA_FIELD_ID: u16 = 0x9901;

/// Vendor id carried by every WinZip AES extra field.
pub const VENDOR_ID: [u8; 2] = *b"AE";

/// Payload length of the record (version + vendor + strength + method).
const PAYLOAD_LEN: usize = 7;

/// Encoded length of the full record including id and size fields.
const RECORD_LEN: usize = 4 + PAYLOAD_LEN;

/// WinZip AES scheme version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum AeVersion {
    /// AE-1: the entry keeps its real CRC-32 alongside the MAC.
    Ae1 = 0x0001,
    /// AE-2: the CRC-32 field is zeroed; integrity rests on the MAC alone.
    Ae2 = 0x0002,
}

impl AeVersion {
    /// Look up a version by its on-disk code.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            0x0001 => Ok(AeVersion::Ae1),
            0x0002 => Ok(AeVersion::Ae2),
            _ => Err(ZipAesError::invalid_extra_field(format!(
                "unknown AE version {code:#06x}"
            ))),
        }
    }

    /// The on-disk version code.
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Metadata record declaring AES encryption parameters for one entry.
///
/// # Example
///
/// ```rust
/// use zipaes::{AeVersion, AesExtraField, AesStrength};
///
/// let field = AesExtraField::new(AeVersion::Ae2, AesStrength::Aes256, 8);
/// let bytes = field.encode();
/// assert_eq!(AesExtraField::parse(&bytes).unwrap(), field);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesExtraField {
    /// Scheme version (AE-1 or AE-2).
    pub version: AeVersion,
    /// Declared encryption strength.
    pub strength: AesStrength,
    /// Compression method applied before encryption.
    pub compression_method: u16,
}

impl AesExtraField {
    /// Create a record for one entry.
    #[must_use]
    pub fn new(version: AeVersion, strength: AesStrength, compression_method: u16) -> Self {
        Self {
            version,
            strength,
            compression_method,
        }
    }

    /// Encode the record, id and size fields included.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(RECORD_LEN);
        bytes.extend_from_slice(&EXTRA_FIELD_ID.to_le_bytes());
        bytes.extend_from_slice(&(PAYLOAD_LEN as u16).to_le_bytes());
        bytes.extend_from_slice(&self.version.code().to_le_bytes());
        bytes.extend_from_slice(&VENDOR_ID);
        bytes.push(self.strength.code());
        bytes.extend_from_slice(&self.compression_method.to_le_bytes());
        bytes
    }

    /// Parse a record starting at the beginning of `data`.
    ///
    /// # Errors
    ///
    /// [`ZipAesError::InvalidExtraField`] for a wrong id, truncated record
    /// or foreign vendor; [`ZipAesError::UnsupportedEncryption`] for an
    /// out-of-range strength code.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < RECORD_LEN {
            return Err(ZipAesError::invalid_extra_field(format!(
                "record truncated: {} of {RECORD_LEN} bytes",
                data.len()
            )));
        }

        let id = u16::from_le_bytes([data[0], data[1]]);
        if id != EXTRA_FIELD_ID {
            return Err(ZipAesError::invalid_extra_field(format!(
                "wrong header id {id:#06x}"
            )));
        }

        let size = u16::from_le_bytes([data[2], data[3]]) as usize;
        if size < PAYLOAD_LEN || data.len() < 4 + size {
            return Err(ZipAesError::invalid_extra_field(format!(
                "declared size {size} does not fit"
            )));
        }

        let vendor = [data[6], data[7]];
        if vendor != VENDOR_ID {
            return Err(ZipAesError::invalid_extra_field(format!(
                "unknown vendor id {vendor:02x?}"
            )));
        }

        Ok(Self {
            version: AeVersion::from_code(u16::from_le_bytes([data[4], data[5]]))?,
            strength: AesStrength::from_code(data[8])?,
            compression_method: u16::from_le_bytes([data[9], data[10]]),
        })
    }

    /// Walk an entry's extra data and parse the AES record if present.
    ///
    /// Returns `Ok(None)` when no `0x9901` record exists; a present but
    /// malformed record is an error.
    pub fn find(extra: &[u8]) -> Result<Option<Self>> {
        let mut offset = 0;
        while offset + 4 <= extra.len() {
            let id = u16::from_le_bytes([extra[offset], extra[offset + 1]]);
            let size = u16::from_le_bytes([extra[offset + 2], extra[offset + 3]]) as usize;

            if id == EXTRA_FIELD_ID {
                return Self::parse(&extra[offset..]).map(Some);
            }

            offset += 4 + size;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let field = AesExtraField::new(AeVersion::Ae2, AesStrength::Aes256, 8);
        assert_eq!(
            field.encode(),
            [0x01, 0x99, 0x07, 0x00, 0x02, 0x00, b'A', b'E', 0x03, 0x08, 0x00]
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        for version in [AeVersion::Ae1, AeVersion::Ae2] {
            for strength in [AesStrength::Aes128, AesStrength::Aes192, AesStrength::Aes256] {
                let field = AesExtraField::new(version, strength, 99);
                assert_eq!(AesExtraField::parse(&field.encode()).unwrap(), field);
            }
        }
    }

    #[test]
    fn test_parse_rejects_malformed_records() {
        let good = AesExtraField::new(AeVersion::Ae2, AesStrength::Aes192, 0).encode();

        assert!(AesExtraField::parse(&good[..10]).is_err());

        let mut wrong_id = good.clone();
        wrong_id[0] = 0x02;
        assert!(AesExtraField::parse(&wrong_id).is_err());

        let mut wrong_vendor = good.clone();
        wrong_vendor[6] = b'X';
        assert!(AesExtraField::parse(&wrong_vendor).is_err());

        let mut bad_strength = good.clone();
        bad_strength[8] = 9;
        assert!(matches!(
            AesExtraField::parse(&bad_strength).unwrap_err(),
            ZipAesError::UnsupportedEncryption { strength: 9 }
        ));

        let mut bad_version = good;
        bad_version[4] = 3;
        assert!(matches!(
            AesExtraField::parse(&bad_version).unwrap_err(),
            ZipAesError::InvalidExtraField { .. }
        ));
    }

    #[test]
    fn test_find_skips_foreign_records() {
        let field = AesExtraField::new(AeVersion::Ae1, AesStrength::Aes128, 8);

        // A Zip64 record (0x0001) ahead of the AES record.
        let mut extra = vec![0x01, 0x00, 0x04, 0x00, 0xAA, 0xBB, 0xCC, 0xDD];
        extra.extend_from_slice(&field.encode());

        assert_eq!(AesExtraField::find(&extra).unwrap(), Some(field));
        assert_eq!(AesExtraField::find(&extra[..8]).unwrap(), None);
        assert_eq!(AesExtraField::find(&[]).unwrap(), None);
    }
}
