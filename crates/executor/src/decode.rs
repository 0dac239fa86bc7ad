//! RISC-V instruction decoder for the RV32I subset.
//!
//! Decoding produces a closed [`Instr`] enum rather than raw field bundles,
//! so the executor matches instructions exhaustively: adding an opcode means
//! adding a variant here plus one dispatch arm, and the compiler flags every
//! match that has not been updated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opcode constants for the implemented subset.
pub mod opcode {
    /// ALU with immediate (ADDI).
    pub const OP_IMM: u8 = 0b0010011;
    /// Register-register ALU (ADD).
    pub const OP: u8 = 0b0110011;
}

/// A decoded instruction.
///
/// Produced fresh each cycle by [`Instr::decode`] and consumed immediately;
/// it has no lifetime beyond one fetch-decode-execute cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instr {
    /// ADDI: I-type add-immediate. `imm` is sign-extended from bit 11.
    Addi { rd: u8, rs1: u8, imm: i32 },
    /// ADD: R-type register-register add.
    Add { rd: u8, rs1: u8, rs2: u8 },
    /// Any opcode outside the implemented subset.
    Unknown { opcode: u8 },
}

impl Instr {
    /// Decode a 32-bit instruction word.
    ///
    /// Field layout per the base instruction formats: opcode = bits [6:0],
    /// rd = [11:7], rs1 = [19:15], rs2 = [24:20], I-type imm = [31:20].
    /// funct3/funct7 are ignored; the subset has one instruction per opcode.
    pub fn decode(bits: u32) -> Self {
        let op = (bits & 0x7F) as u8;
        let rd = ((bits >> 7) & 0x1F) as u8;
        let rs1 = ((bits >> 15) & 0x1F) as u8;
        let rs2 = ((bits >> 20) & 0x1F) as u8;

        match op {
            opcode::OP_IMM => {
                // I-type: imm[11:0], arithmetically sign-extended from bit 11.
                // Sign extension is a per-format rule; each future I/S/B-type
                // variant applies its own extraction here.
                let imm = (bits as i32) >> 20;
                Instr::Addi { rd, rs1, imm }
            }
            opcode::OP => Instr::Add { rd, rs1, rs2 },
            _ => Instr::Unknown { opcode: op },
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Addi { rd, rs1, imm } => write!(f, "addi x{}, x{}, {}", rd, rs1, imm),
            Instr::Add { rd, rs1, rs2 } => write!(f, "add x{}, x{}, x{}", rd, rs1, rs2),
            Instr::Unknown { opcode } => write!(f, "unknown (opcode {:#04x})", opcode),
        }
    }
}
