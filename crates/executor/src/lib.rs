//! minirv-executor: minimal RISC-V RV32I-subset interpreter core.
//!
//! This crate provides:
//! - A flat byte-addressable memory seeded from a raw binary image
//! - A 32-register CPU with a sequential fetch-decode-execute loop
//! - A closed decoded-instruction enum as the extension point for new opcodes

pub mod cpu;
pub mod decode;
pub mod error;
pub mod memory;

pub use cpu::{Cpu, DEFAULT_MEMORY_CAPACITY};
pub use decode::Instr;
pub use error::ExecutorError;
pub use memory::Memory;
