//! Integration tests for the fetch-decode-execute run loop.

use minirv_executor::{Cpu, ExecutorError, Instr, DEFAULT_MEMORY_CAPACITY};

fn assemble_addi(rd: u8, rs1: u8, imm: i32) -> u32 {
    let imm = (imm as u32) & 0xFFF;
    (imm << 20) | ((rs1 as u32) << 15) | (0b000 << 12) | ((rd as u32) << 7) | 0b0010011
}

fn assemble_add(rd: u8, rs1: u8, rs2: u8) -> u32 {
    ((rs2 as u32) << 20) | ((rs1 as u32) << 15) | (0b000 << 12) | ((rd as u32) << 7) | 0b0110011
}

fn image(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

#[test]
fn test_fetch_is_little_endian() {
    let cpu = Cpu::new(&[0x93, 0x00, 0x10, 0x00, 0xEF, 0xBE, 0xAD, 0xDE]);
    assert_eq!(cpu.fetch().unwrap(), 0x00100093);
    assert_eq!(cpu.memory.read_u32(4).unwrap(), 0xDEADBEEF);
}

#[test]
fn test_addi_sign_extension() {
    // x1 = 5, then x3 = x1 + (-1); the raw immediate field is 0xFFF.
    let mut cpu = Cpu::new(&image(&[
        assemble_addi(1, 0, 5),
        assemble_addi(3, 1, -1),
    ]));
    cpu.run().unwrap();
    assert_eq!(cpu.get_reg(3), 4);
}

#[test]
fn test_add_registers() {
    let mut cpu = Cpu::new(&image(&[
        assemble_addi(1, 0, 2),
        assemble_addi(2, 0, 3),
        assemble_add(3, 1, 2),
    ]));
    cpu.run().unwrap();
    assert_eq!(cpu.get_reg(3), 5);
}

#[test]
fn test_overflow_wraps() {
    let mut cpu = Cpu::new(&image(&[assemble_addi(3, 1, 1)]));
    cpu.set_reg(1, 0xFFFF_FFFF);
    cpu.run().unwrap();
    assert_eq!(cpu.get_reg(3), 0);
}

#[test]
fn test_single_instruction_halts_at_end() {
    let mut cpu = Cpu::new(&image(&[assemble_addi(1, 0, 7)]));
    cpu.run().unwrap();
    assert_eq!(cpu.pc, 4);
    assert_eq!(cpu.get_reg(1), 7);
}

#[test]
fn test_unknown_opcode_is_not_fatal() {
    // An unimplemented opcode word followed by a real instruction: the loop
    // logs a diagnostic, skips the word, and keeps executing.
    let mut cpu = Cpu::new(&image(&[0x0000007F, assemble_addi(1, 0, 9)]));
    let before = cpu.registers();
    let instr = cpu.step().unwrap();
    assert_eq!(instr, Instr::Unknown { opcode: 0x7F });
    assert_eq!(cpu.registers(), before);

    cpu.run().unwrap();
    assert_eq!(cpu.pc, 8);
    assert_eq!(cpu.get_reg(1), 9);
}

#[test]
fn test_empty_image_runs_zero_cycles() {
    let mut cpu = Cpu::new(&[]);
    cpu.run().unwrap();
    assert_eq!(cpu.pc, 0);
    assert_eq!(cpu.get_reg(2), DEFAULT_MEMORY_CAPACITY);
}

#[test]
fn test_partial_trailing_word_is_fatal() {
    // 6-byte image: the second fetch would read past the end of memory.
    let mut bytes = image(&[assemble_addi(1, 0, 1)]);
    bytes.extend_from_slice(&[0x13, 0x00]);
    let mut cpu = Cpu::new(&bytes);
    let err = cpu.run().unwrap_err();
    assert!(matches!(err, ExecutorError::AddressOutOfRange { addr: 4 }));
    // The first instruction still executed before the loop aborted.
    assert_eq!(cpu.get_reg(1), 1);
}

#[test]
fn test_run_accumulates() {
    // x1 counts up by one per instruction.
    let program: Vec<u32> = (0..100).map(|_| assemble_addi(1, 1, 1)).collect();
    let mut cpu = Cpu::new(&image(&program));
    cpu.run().unwrap();
    assert_eq!(cpu.get_reg(1), 100);
    assert_eq!(cpu.pc, 400);
}
