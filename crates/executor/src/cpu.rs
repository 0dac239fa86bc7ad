//! RV32I-subset CPU implementation.
//!
//! # Execution Model
//!
//! A single sequential fetch-decode-execute loop over one register file and
//! one flat memory, both exclusively owned by the [`Cpu`]:
//!
//! - Fetch the 32-bit little-endian word at `pc`
//! - Advance `pc` by 4 *before* executing
//! - Decode into an [`Instr`] and execute it
//!
//! The loop ends when `pc` runs past the end of loaded memory; there is no
//! halt instruction, trap, or exception state. Unimplemented opcodes are
//! reported on stderr and skipped, so only bounds and alignment violations
//! abort a run.

use crate::decode::Instr;
use crate::error::ExecutorError;
use crate::memory::Memory;
use serde::{Deserialize, Serialize};

/// Default address-space ceiling, used to seed the stack pointer: 128 MiB.
pub const DEFAULT_MEMORY_CAPACITY: u32 = 128 * 1024 * 1024;

/// Stack pointer register index (x2 by convention).
const REG_SP: usize = 2;

/// RV32I-subset CPU state.
#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    /// General-purpose registers x0..x31.
    pub regs: [u32; 32],
    /// Program counter (byte offset into memory).
    pub pc: u32,
    /// Memory subsystem, seeded from the loaded image.
    pub memory: Memory,
}

impl Cpu {
    /// Create a new CPU with the given image loaded at address 0 and the
    /// default memory capacity seeded into the stack pointer.
    pub fn new(image: &[u8]) -> Self {
        Self::with_capacity(image, DEFAULT_MEMORY_CAPACITY)
    }

    /// Create a new CPU with an explicit memory capacity.
    ///
    /// `capacity` is the address-space ceiling seeded into x2; it does not
    /// allocate backing store. Memory is sized to the image itself.
    pub fn with_capacity(image: &[u8], capacity: u32) -> Self {
        let mut regs = [0u32; 32];
        regs[REG_SP] = capacity;
        Self {
            regs,
            pc: 0,
            memory: Memory::from_image(image),
        }
    }

    /// Set a register value (x0 writes are ignored).
    #[inline]
    pub fn set_reg(&mut self, rd: u8, val: u32) {
        if rd != 0 {
            self.regs[rd as usize] = val;
        }
    }

    /// Get a register value.
    #[inline]
    pub fn get_reg(&self, rs: u8) -> u32 {
        self.regs[rs as usize]
    }

    /// Fetch the 32-bit little-endian word at the current program counter.
    ///
    /// A fetch whose four bytes are not fully backed by loaded memory fails
    /// with `AddressOutOfRange` rather than reading undefined bytes.
    pub fn fetch(&self) -> Result<u32, ExecutorError> {
        self.memory.read_u32(self.pc)
    }

    /// Execute a single instruction, returning the decoded form.
    ///
    /// The pc is advanced before execution so that a future jump or branch
    /// instruction writing pc directly is not clobbered by the sequential
    /// advance. This ordering is a hard invariant, not incidental.
    pub fn step(&mut self) -> Result<Instr, ExecutorError> {
        let word = self.fetch()?;
        self.pc = self.pc.wrapping_add(4);
        let instr = Instr::decode(word);
        self.execute(instr);
        Ok(instr)
    }

    /// Apply one decoded instruction to the register file.
    fn execute(&mut self, instr: Instr) {
        // x0 is hard-wired to zero; reapplied every cycle, not just on write.
        self.regs[0] = 0;

        match instr {
            Instr::Addi { rd, rs1, imm } => {
                let val = self.get_reg(rs1).wrapping_add(imm as u32);
                self.set_reg(rd, val);
            }
            Instr::Add { rd, rs1, rs2 } => {
                let val = self.get_reg(rs1).wrapping_add(self.get_reg(rs2));
                self.set_reg(rd, val);
            }
            Instr::Unknown { opcode } => {
                eprintln!("not implemented: opcode {:#04x}", opcode);
            }
        }
    }

    /// Run until the program counter passes the end of loaded memory.
    ///
    /// Terminates successfully once `pc >= memory.size()`; an empty image
    /// executes zero cycles. Aborts with the first fetch error otherwise.
    pub fn run(&mut self) -> Result<(), ExecutorError> {
        while (self.pc as usize) < self.memory.size() {
            self.step()?;
        }
        Ok(())
    }

    /// Snapshot of all 32 general-purpose registers.
    pub fn registers(&self) -> [u32; 32] {
        self.regs
    }

    /// Format the register file, four registers per line, `x<i>=<hex>`.
    pub fn dump_registers(&self) -> String {
        let mut out = String::new();
        for i in (0..self.regs.len()).step_by(4) {
            out.push_str(&format!(
                "x{}={:x} x{}={:x} x{}={:x} x{}={:x}\n",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1],
                i + 2,
                self.regs[i + 2],
                i + 3,
                self.regs[i + 3],
            ));
        }
        out
    }
}
