//! Arithmetic Logic Unit (ALU).
//!
//! Executes the RV32I integer operations: add/subtract, shifts, signed and
//! unsigned comparisons, and bitwise logic. Operand sourcing (PC, immediate,
//! rs1 literal, inversion) follows the instruction's execution flags.

use crate::isa::{AluOp, Instr};

use super::{select_op1, select_op2, FuLatch, FuOutput, FunctionalUnit};

/// Single-cycle execute latency.
const ALU_LATENCY: u64 = 1;

/// Computes an integer ALU operation on already-selected operands.
///
/// Shift amounts use the low five bits of operand 2. Comparisons produce
/// 0 or 1. `AluOp::None` (FENCE) produces 0.
pub fn compute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::None => 0,
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a.wrapping_shl(b & 0x1F),
        AluOp::Srl => a.wrapping_shr(b & 0x1F),
        AluOp::Sra => ((a as i32).wrapping_shr(b & 0x1F)) as u32,
        AluOp::Lti => ((a as i32) < (b as i32)) as u32,
        AluOp::Ltu => (a < b) as u32,
        AluOp::Xor => a ^ b,
        AluOp::Or => a | b,
        AluOp::And => a & b,
    }
}

/// Arithmetic logic unit.
#[derive(Default)]
pub struct Alu {
    latch: Option<FuLatch>,
}

impl Alu {
    /// Creates an idle ALU.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FunctionalUnit for Alu {
    fn issue(&mut self, instr: &Instr, rob_index: usize, rs_index: usize, op1: u32, op2: u32) {
        let s1 = select_op1(instr, op1);
        let s2 = select_op2(instr, op2);
        let result = compute(instr.alu_op, s1, s2);

        self.latch = Some(FuLatch {
            output: FuOutput {
                result,
                rob_index,
                rs_index,
            },
            cycles_remaining: ALU_LATENCY,
        });
    }

    fn execute(&mut self) {
        if let Some(latch) = self.latch.as_mut() {
            latch.tick();
        }
    }

    fn done(&self) -> bool {
        self.latch.map_or(false, |latch| latch.is_done())
    }

    fn output(&self) -> Option<FuOutput> {
        self.latch.filter(|latch| latch.is_done()).map(|l| l.output)
    }

    fn clear(&mut self) {
        self.latch = None;
    }

    fn busy(&self) -> bool {
        self.latch.is_some()
    }
}
