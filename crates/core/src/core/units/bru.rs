//! Branch Resolution Unit (BRU).
//!
//! Resolves conditional branches and unconditional jumps. The unit produces
//! two things:
//! 1. **Result:** The link value (PC + 4), written to rd for JAL/JALR.
//! 2. **Redirect:** The address the front-end must continue fetching from —
//!    the branch target when taken, the fall-through otherwise.
//!
//! The front-end stalls from the moment it hands a branch over until the
//! redirect is published, so at most one branch is in flight at a time.

use crate::isa::{BrOp, Instr};

use super::{alu, select_op1, select_op2, FuLatch, FuOutput, FunctionalUnit};

/// Single-cycle resolve latency.
const BRU_LATENCY: u64 = 1;

/// Branch resolution unit.
#[derive(Default)]
pub struct Bru {
    latch: Option<FuLatch>,
    redirect: Option<u32>,
}

impl Bru {
    /// Creates an idle BRU.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the resolved fetch redirect, if one is pending.
    pub fn take_redirect(&mut self) -> Option<u32> {
        self.redirect.take()
    }

    /// Evaluates the branch condition on the register operands.
    fn taken(op: BrOp, lhs: u32, rhs: u32) -> bool {
        match op {
            BrOp::None => false,
            BrOp::Beq => lhs == rhs,
            BrOp::Bne => lhs != rhs,
            BrOp::Blt => (lhs as i32) < (rhs as i32),
            BrOp::Bge => (lhs as i32) >= (rhs as i32),
            BrOp::Bltu => lhs < rhs,
            BrOp::Bgeu => lhs >= rhs,
            BrOp::Jal | BrOp::Jalr => true,
        }
    }
}

impl FunctionalUnit for Bru {
    fn issue(&mut self, instr: &Instr, rob_index: usize, rs_index: usize, op1: u32, op2: u32) {
        // Target address from the flagged operand sources: PC + imm for
        // JAL and conditional branches, rs1 + imm for JALR (bit 0 cleared).
        let mut target = alu::compute(instr.alu_op, select_op1(instr, op1), select_op2(instr, op2));
        if instr.br_op == BrOp::Jalr {
            target &= !1;
        }

        let link = instr.pc.wrapping_add(4);
        let taken = Self::taken(instr.br_op, op1, op2);

        self.redirect = Some(if taken { target } else { link });
        self.latch = Some(FuLatch {
            output: FuOutput {
                result: link,
                rob_index,
                rs_index,
            },
            cycles_remaining: BRU_LATENCY,
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
