//! Flat byte-addressable memory seeded from a raw binary image.
//!
//! The backing store is sized exactly to the loaded image: the file *is* the
//! memory image, loaded verbatim at address 0. Every access is bounds-checked
//! against the backing store; nothing is ever read past the logical end, and
//! word accesses must be 4-byte aligned.

use crate::error::ExecutorError;
use serde::{Deserialize, Serialize};

/// Memory subsystem for the executor.
#[derive(Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Flat byte-addressable memory.
    data: Vec<u8>,
}

impl Memory {
    /// Create memory holding a copy of the given image at address 0.
    pub fn from_image(image: &[u8]) -> Self {
        Self {
            data: image.to_vec(),
        }
    }

    /// Get the memory size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Read a byte from memory.
    #[inline]
    pub fn read_u8(&self, addr: u32) -> Result<u8, ExecutorError> {
        let idx = addr as usize;
        if idx >= self.data.len() {
            return Err(ExecutorError::AddressOutOfRange { addr });
        }
        Ok(self.data[idx])
    }

    /// Read a word (32-bit) from memory (little-endian).
    ///
    /// # Errors
    /// Returns `Unaligned` if addr is not 4-byte aligned, and
    /// `AddressOutOfRange` if any of the four bytes is unbacked.
    #[inline]
    pub fn read_u32(&self, addr: u32) -> Result<u32, ExecutorError> {
        if addr & 3 != 0 {
            return Err(ExecutorError::Unaligned { addr, required: 4 });
        }
        let idx = addr as usize;
        if idx + 3 >= self.data.len() {
            return Err(ExecutorError::AddressOutOfRange { addr });
        }
        Ok(u32::from_le_bytes([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]))
    }

    /// Write a byte to memory.
    #[inline]
    pub fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), ExecutorError> {
        let idx = addr as usize;
        if idx >= self.data.len() {
            return Err(ExecutorError::AddressOutOfRange { addr });
        }
        self.data[idx] = val;
        Ok(())
    }

    /// Write a word (32-bit) to memory (little-endian).
    ///
    /// # Errors
    /// Returns `Unaligned` if addr is not 4-byte aligned, and
    /// `AddressOutOfRange` if any of the four bytes is unbacked.
    #[inline]
    pub fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), ExecutorError> {
        if addr & 3 != 0 {
            return Err(ExecutorError::Unaligned { addr, required: 4 });
        }
        let idx = addr as usize;
        if idx + 3 >= self.data.len() {
            return Err(ExecutorError::AddressOutOfRange { addr });
        }
        let bytes = val.to_le_bytes();
        self.data[idx] = bytes[0];
        self.data[idx + 1] = bytes[1];
        self.data[idx + 2] = bytes[2];
        self.data[idx + 3] = bytes[3];
        Ok(())
    }
}
