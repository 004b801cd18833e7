//! Special Function Unit (SFU).
//!
//! Executes the CSR read-modify-write family. The immediate carries the CSR
//! number; the result delivered to rd is the CSR value before modification.
//! The new CSR value follows the decoded micro-op:
//! - write form (CSRRW/CSRRWI): the selected operand replaces the CSR;
//! - set form (CSRRS/CSRRSI): old | operand;
//! - clear form (CSRRC/CSRRCI): old & operand, the operand arriving
//!   pre-inverted through the operand-1 flags.
//!
//! The operand is the rs1 register value, or the 5-bit rs1 field literal
//! for the immediate forms.

use crate::core::arch::CsrFile;
use crate::isa::{AluOp, Instr};

use super::{select_op1, FuLatch, FuOutput, FunctionalUnit};

/// Single-cycle CSR access latency.
const SFU_LATENCY: u64 = 1;

/// Special function unit owning the CSR file.
#[derive(Default)]
pub struct Sfu {
    csrs: CsrFile,
    latch: Option<FuLatch>,
}

impl Sfu {
    /// Creates an idle SFU with an empty CSR file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the CSR file.
    pub fn csrs(&self) -> &CsrFile {
        &self.csrs
    }

    /// Mutable access to the CSR file.
    pub fn csrs_mut(&mut self) -> &mut CsrFile {
        &mut self.csrs
    }
}

impl FunctionalUnit for Sfu {
    fn issue(&mut self, instr: &Instr, rob_index: usize, rs_index: usize, op1: u32, _op2: u32) {
        let addr = instr.imm;
        let old = self.csrs.read(addr);
        let s1 = select_op1(instr, op1);

        let new = match instr.alu_op {
            AluOp::Add => s1,
            AluOp::Or => old | s1,
            AluOp::And => old & s1,
            _ => old,
        };
        self.csrs.write(addr, new);

        self.latch = Some(FuLatch {
            output: FuOutput {
                result: old,
                rob_index,
                rs_index,
            },
            cycles_remaining: SFU_LATENCY,
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
