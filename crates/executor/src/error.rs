//! Executor errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("address out of range: {addr:#010x}")]
    AddressOutOfRange { addr: u32 },

    #[error("unaligned word access at address {addr:#010x} (requires {required}-byte alignment)")]
    Unaligned { addr: u32, required: u32 },
}
