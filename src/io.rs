//! Read/Write adapters over the entry ciphers.
//!
//! Thin wrappers for callers that stream entry payloads through
//! `std::io`. The cipher must already be reset for the entry; framing
//! stays with the caller, who reads or writes the encryption header
//! before attaching the adapter and handles the 10-byte authentication
//! code after detaching it.

use std::io::{self, Read, Write};

use crate::decryptor::AesDecryptor;
use crate::encryptor::AesEncryptor;

/// A reader that decrypts every byte pulled through it.
pub struct AesReader<R> {
    inner: R,
    cipher: AesDecryptor,
}

impl<R: Read> AesReader<R> {
    /// Wrap `inner` with a decryptor already reset for this entry.
    pub fn new(inner: R, cipher: AesDecryptor) -> Self {
        Self { inner, cipher }
    }

    /// Get a reference to the decryptor (e.g. for its auth key).
    pub fn cipher(&self) -> &AesDecryptor {
        &self.cipher
    }

    /// Consume the adapter and return the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for AesReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.cipher
            .decrypt(&mut buf[..n])
            .map_err(io::Error::other)?;
        Ok(n)
    }
}

/// A writer that encrypts every byte pushed through it.
pub struct AesWriter<W> {
    inner: W,
    cipher: AesEncryptor,
}

impl<W: Write> AesWriter<W> {
    /// Wrap `inner` with an encryptor already reset for this entry.
    pub fn new(inner: W, cipher: AesEncryptor) -> Self {
        Self { inner, cipher }
    }

    /// Get a reference to the encryptor (e.g. for its auth key).
    pub fn cipher(&self) -> &AesEncryptor {
        &self.cipher
    }

    /// Consume the adapter and return the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for AesWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut encrypted = buf.to_vec();
        self.cipher
            .encrypt(&mut encrypted)
            .map_err(io::Error::other)?;
        self.inner.write_all(&encrypted)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_requires_reset_cipher() {
        let cipher = AesDecryptor::new(b"password", 3);
        let mut reader = AesReader::new(Cursor::new(vec![0u8; 4]), cipher);
        let mut buf = [0u8; 4];
        assert!(reader.read(&mut buf).is_err());
    }

    #[test]
    fn test_writer_roundtrip_through_reader() {
        let mut encryptor = AesEncryptor::new(b"password", 1);
        let header = encryptor.reset().unwrap();
        let plaintext = b"streamed entry payload";

        let mut writer = AesWriter::new(Vec::new(), encryptor);
        writer.write_all(&plaintext[..10]).unwrap();
        writer.write_all(&plaintext[10..]).unwrap();
        writer.flush().unwrap();
        let ciphertext = writer.into_inner();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_ne!(&ciphertext, plaintext);

        let mut decryptor = AesDecryptor::new(b"password", 1);
        decryptor.reset(&header).unwrap();
        let mut reader = AesReader::new(Cursor::new(ciphertext), decryptor);
        let mut decrypted = Vec::new();
        reader.read_to_end(&mut decrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}
