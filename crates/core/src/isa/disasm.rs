//! Instruction rendering for debug traces.
//!
//! Converts a decoded [`Instr`] into a human-readable line for stage tracing
//! and test diagnostics: the mnemonic, then the operands the instruction
//! actually uses (in rd, rs1, rs2, imm order), then the program counter and
//! the instruction's unique id.
//!
//! ```
//! use rv32sim_core::isa::decode;
//!
//! let instr = decode(0x00500093, 0, 3).unwrap(); // ADDI x1, x0, 5
//! assert_eq!(instr.to_string(), "ADDI x1, x0, 0x5, PC=0x0 (#3)");
//! ```

use std::fmt;

use crate::isa::instruction::{Instr, Opcode};

/// Returns the mnemonic for a decoded instruction.
///
/// The decoder has already rejected unreachable func3/func7/imm
/// combinations, so the fallback arms render as `???` only for
/// descriptors built by hand.
pub fn mnemonic(instr: &Instr) -> &'static str {
    let func3 = instr.func3;
    let func7 = instr.func7;
    let imm = instr.imm;

    match instr.opcode {
        Opcode::Lui => "LUI",
        Opcode::Auipc => "AUIPC",
        Opcode::R => match func3 {
            0 => {
                if func7 & 0x20 != 0 {
                    "SUB"
                } else {
                    "ADD"
                }
            }
            1 => "SLL",
            2 => "SLT",
            3 => "SLTU",
            4 => "XOR",
            5 => {
                if func7 & 0x20 != 0 {
                    "SRA"
                } else {
                    "SRL"
                }
            }
            6 => "OR",
            7 => "AND",
            _ => "???",
        },
        Opcode::I => match func3 {
            0 => "ADDI",
            1 => "SLLI",
            2 => "SLTI",
            3 => "SLTIU",
            4 => "XORI",
            5 => {
                if func7 & 0x20 != 0 {
                    "SRAI"
                } else {
                    "SRLI"
                }
            }
            6 => "ORI",
            7 => "ANDI",
            _ => "???",
        },
        Opcode::B => match func3 {
            0 => "BEQ",
            1 => "BNE",
            4 => "BLT",
            5 => "BGE",
            6 => "BLTU",
            7 => "BGEU",
            _ => "???",
        },
        Opcode::Jal => "JAL",
        Opcode::Jalr => "JALR",
        Opcode::L => match func3 {
            0 => "LB",
            1 => "LH",
            2 => "LW",
            4 => "LBU",
            5 => "LHU",
            _ => "???",
        },
        Opcode::S => match func3 {
            0 => "SB",
            1 => "SH",
            2 => "SW",
            _ => "???",
        },
        Opcode::Sys => match func3 {
            0 => match imm {
                0x000 => "ECALL",
                0x001 => "EBREAK",
                0x002 => "URET",
                0x102 => "SRET",
                0x302 => "MRET",
                _ => "???",
            },
            1 => "CSRRW",
            2 => "CSRRS",
            3 => "CSRRC",
            5 => "CSRRWI",
            6 => "CSRRSI",
            7 => "CSRRCI",
            _ => "???",
        },
        Opcode::Fence => "FENCE",
    }
}

impl fmt::Display for Instr {
    /// Renders the instruction as `MNEM x<rd>, x<rs1>, x<rs2>, 0x<imm>,
    /// PC=0x<pc> (#<uuid>)`, including only the operands whose use flags
    /// are set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mnemonic(self))?;

        let mut sep = 0;
        let lead = |f: &mut fmt::Formatter<'_>, sep: &mut u32| -> fmt::Result {
            if *sep == 0 {
                write!(f, " ")?;
            } else {
                write!(f, ", ")?;
            }
            *sep += 1;
            Ok(())
        };

        if self.exe_flags.use_rd() {
            lead(f, &mut sep)?;
            write!(f, "x{}", self.rd)?;
        }
        if self.exe_flags.use_rs1() {
            lead(f, &mut sep)?;
            write!(f, "x{}", self.rs1)?;
        }
        if self.exe_flags.use_rs2() {
            lead(f, &mut sep)?;
            write!(f, "x{}", self.rs2)?;
        }
        if self.exe_flags.use_imm() {
            lead(f, &mut sep)?;
            write!(f, "0x{:x}", self.imm)?;
        }

        write!(f, ", PC=0x{:x}", self.pc)?;
        write!(f, " (#{})", self.uuid)
    }
}
