//! Decode/re-encode round-trip checks.
//!
//! Re-assembling an encoding from the decoded descriptor must reproduce
//! the original bits for every instruction format.

use rv32sim_core::isa::{decode, Instr, Opcode};

use crate::common::builder::{self, InstructionBuilder};

/// Re-assembles the 32-bit encoding from a decoded descriptor.
fn reencode(instr: &Instr) -> u32 {
    let op = instr.opcode.to_bits();
    let rd = instr.rd as u32;
    let rs1 = instr.rs1 as u32;
    let rs2 = instr.rs2 as u32;
    let f3 = instr.func3;
    let f7 = instr.func7;
    let imm = instr.imm;

    match instr.opcode {
        Opcode::R => (f7 << 25) | (rs2 << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | op,
        Opcode::I if f3 == 1 || f3 == 5 => {
            // Shift immediates: the shamt lives in the rs2 field next to func7.
            (f7 << 25) | ((imm & 0x1F) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | op
        }
        Opcode::I | Opcode::L | Opcode::Jalr | Opcode::Sys => {
            ((imm & 0xFFF) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | op
        }
        Opcode::S => {
            (((imm >> 5) & 0x7F) << 25)
                | (rs2 << 20)
                | (rs1 << 15)
                | (f3 << 12)
                | ((imm & 0x1F) << 7)
                | op
        }
        Opcode::B => {
            (((imm >> 12) & 0x1) << 31)
                | (((imm >> 5) & 0x3F) << 25)
                | (rs2 << 20)
                | (rs1 << 15)
                | (f3 << 12)
                | (((imm >> 1) & 0xF) << 8)
                | (((imm >> 11) & 0x1) << 7)
                | op
        }
        Opcode::Lui | Opcode::Auipc => (imm & 0xFFFF_F000) | (rd << 7) | op,
        Opcode::Jal => {
            (((imm >> 20) & 0x1) << 31)
                | (((imm >> 1) & 0x3FF) << 21)
                | (((imm >> 11) & 0x1) << 20)
                | (((imm >> 12) & 0xFF) << 12)
                | (rd << 7)
                | op
        }
        Opcode::Fence => op,
    }
}

fn assert_roundtrip(word: u32) {
    let instr = decode(word, 0, 0)
        .unwrap_or_else(|| panic!("0x{:08x} did not decode", word));
    assert_eq!(
        reencode(&instr),
        word,
        "0x{:08x} did not survive the round trip",
        word
    );
}

#[test]
fn test_roundtrip_r_type() {
    assert_roundtrip(builder::add(3, 1, 2));
    assert_roundtrip(InstructionBuilder::new().sub(31, 30, 29).encode());
}

#[test]
fn test_roundtrip_i_type() {
    assert_roundtrip(builder::addi(1, 2, 5));
    assert_roundtrip(builder::addi(1, 2, -1));
    assert_roundtrip(InstructionBuilder::new().slli(4, 5, 31).encode());
    assert_roundtrip(InstructionBuilder::new().srai(4, 5, 1).encode());
}

#[test]
fn test_roundtrip_loads_stores() {
    assert_roundtrip(builder::lw(7, 8, 64));
    assert_roundtrip(builder::lw(7, 8, -64));
    assert_roundtrip(builder::sw(8, 7, 64));
    assert_roundtrip(builder::sw(8, 7, -4));
}

#[test]
fn test_roundtrip_branches() {
    assert_roundtrip(InstructionBuilder::new().beq(1, 2, 16).encode());
    assert_roundtrip(InstructionBuilder::new().bne(1, 2, -16).encode());
    assert_roundtrip(InstructionBuilder::new().beq(1, 2, 4094).encode());
}

#[test]
fn test_roundtrip_upper_and_jumps() {
    assert_roundtrip(builder::lui(5, 0x12345));
    assert_roundtrip(builder::lui(5, 0xFFFFF));
    assert_roundtrip(builder::auipc(6, 0x1));
    assert_roundtrip(builder::jal(1, 8));
    assert_roundtrip(builder::jal(1, -8));
    assert_roundtrip(InstructionBuilder::new().jalr(1, 2, 12).encode());
}

#[test]
fn test_roundtrip_system() {
    assert_roundtrip(builder::ecall());
    assert_roundtrip(0x00100073); // EBREAK
    assert_roundtrip(0x30200073); // MRET
    assert_roundtrip(InstructionBuilder::new().csrrw(1, 0x340, 2).encode());
    assert_roundtrip(InstructionBuilder::new().csrrs(3, 0xC00, 0).encode());
}

#[test]
fn test_fence_decodes() {
    // FENCE carries no captured immediate; decode-only.
    let instr = decode(0x0000000F, 0, 0).unwrap();
    assert_eq!(instr.opcode, Opcode::Fence);
    assert_eq!(reencode(&instr), 0x0000000F);
}
