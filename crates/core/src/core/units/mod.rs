//! Functional units.
//!
//! This module defines the uniform contract every functional unit exposes to
//! the pipeline controller, and the four implementations:
//! 1. **ALU:** Integer arithmetic and logic.
//! 2. **BRU:** Branch resolution (condition, target, link value).
//! 3. **LSU:** Loads and stores against the flat data memory.
//! 4. **SFU:** CSR read-modify-write operations.
//!
//! A unit accepts one operation at a time. The controller issues into an
//! idle unit, ticks every unit once per cycle, publishes the first completed
//! result on the common data bus, and clears the unit back to idle.

/// Arithmetic logic unit.
pub mod alu;

/// Branch resolution unit.
pub mod bru;

/// Load/store unit.
pub mod lsu;

/// Special function unit (CSR operations).
pub mod sfu;

use crate::config::Config;
use crate::core::pipeline::CdbPacket;
use crate::isa::{FuType, Instr};

pub use self::alu::Alu;
pub use self::bru::Bru;
pub use self::lsu::Lsu;
pub use self::sfu::Sfu;

/// A completed result, ready for the common data bus.
pub type FuOutput = CdbPacket;

/// In-flight operation latch shared by the unit implementations.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FuLatch {
    /// The result to publish when the latency elapses.
    pub output: FuOutput,
    /// Remaining execute cycles before the result is visible.
    pub cycles_remaining: u64,
}

impl FuLatch {
    /// Advances the latch by one cycle.
    pub fn tick(&mut self) {
        if self.cycles_remaining > 0 {
            self.cycles_remaining -= 1;
        }
    }

    /// Returns true once the latency has elapsed.
    pub fn is_done(&self) -> bool {
        self.cycles_remaining == 0
    }
}

/// Uniform per-cycle contract between the pipeline controller and a
/// functional unit.
pub trait FunctionalUnit {
    /// Accepts one operation. Must only be called when the unit is idle.
    fn issue(&mut self, instr: &Instr, rob_index: usize, rs_index: usize, op1: u32, op2: u32);

    /// Advances the unit's internal latency by one cycle.
    fn execute(&mut self);

    /// Returns true when a result is available for broadcast.
    fn done(&self) -> bool;

    /// Returns the completed result, or `None` if not done.
    fn output(&self) -> Option<FuOutput>;

    /// Discards any held operation and becomes idle.
    fn clear(&mut self);

    /// Returns true while the unit holds an operation.
    fn busy(&self) -> bool;
}

/// Selects ALU operand 1 per the instruction's execution flags: the PC, the
/// 5-bit rs1 field literal, or the rs1 register value — optionally inverted.
pub(crate) fn select_op1(instr: &Instr, op1: u32) -> u32 {
    let flags = instr.exe_flags;
    let mut s1 = if flags.alu_s1_pc() {
        instr.pc
    } else if flags.alu_s1_rs1() {
        instr.rs1 as u32
    } else {
        op1
    };
    if flags.alu_s1_inv() {
        s1 = !s1;
    }
    s1
}

/// Selects ALU operand 2 per the instruction's execution flags: the
/// immediate or the rs2 register value. The CSR source is resolved inside
/// the SFU.
pub(crate) fn select_op2(instr: &Instr, op2: u32) -> u32 {
    if instr.exe_flags.alu_s2_imm() {
        instr.imm
    } else {
        op2
    }
}

/// The pool of four functional units, indexed by [`FuType`].
pub struct FuPool {
    /// Arithmetic logic unit.
    pub alu: Alu,
    /// Branch resolution unit.
    pub bru: Bru,
    /// Load/store unit.
    pub lsu: Lsu,
    /// Special function unit.
    pub sfu: Sfu,
}

impl FuPool {
    /// Creates the unit pool from the configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            alu: Alu::new(),
            bru: Bru::new(),
            lsu: Lsu::new(config.memory.mem_size, config.pipeline.lsu_latency),
            sfu: Sfu::new(),
        }
    }

    /// Returns the unit an instruction is routed to.
    pub fn get_mut(&mut self, fu_type: FuType) -> &mut dyn FunctionalUnit {
        match fu_type {
            FuType::Alu | FuType::None => &mut self.alu,
            FuType::Bru => &mut self.bru,
            FuType::Lsu => &mut self.lsu,
            FuType::Sfu => &mut self.sfu,
        }
    }

    /// Returns all units in pool order (ALU, BRU, LSU, SFU).
    pub fn units_mut(&mut self) -> [&mut dyn FunctionalUnit; 4] {
        let FuPool { alu, bru, lsu, sfu } = self;
        [alu, bru, lsu, sfu]
    }
}
