//! Out-of-order core.
//!
//! This module contains the backend of the simulator:
//! 1. **Arch:** Committed register state (GPR file, CSR file).
//! 2. **Mem:** Flat data memory behind the load/store unit.
//! 3. **Pipeline:** RAT, ROB, reservation stations, CDB/RST, issue queue.
//! 4. **Units:** The four functional units (ALU, BRU, LSU, SFU).
//! 5. **Core:** The controller driving issue, execute, writeback, and commit
//!    once per cycle.

/// Architectural register state (GPR and CSR files).
pub mod arch;

/// Flat data memory.
pub mod mem;

/// Pipeline bookkeeping structures.
pub mod pipeline;

/// Functional units and their shared contract.
pub mod units;

use crate::config::Config;
use crate::core::arch::{CsrFile, RegFile};
use crate::core::mem::Memory;
use crate::core::pipeline::{Cdb, IssueQueue, Operand, Rat, Rob, RsTable, RsTracker};
use crate::core::units::{FuPool, FunctionalUnit};
use crate::isa::{BrOp, FuType, Instr, Opcode};
use crate::stats::SimStats;

/// The out-of-order backend: issue, execute, writeback, and commit over the
/// shared pipeline state.
///
/// Each simulated cycle runs the four stages in reverse pipeline order —
/// commit, writeback, execute, issue — so a value produced by one stage is
/// observed downstream exactly one cycle later. Every piece of shared state
/// is mutated by one stage per cycle:
/// - RAT: set at issue, cleared at commit;
/// - ROB: allocated at issue, updated at writeback, popped at commit;
/// - RS: filled at issue, dispatched at execute, updated/released at
///   writeback;
/// - CDB: pushed at execute, drained at writeback;
/// - register file: written only at commit.
pub struct Core {
    reg_file: RegFile,
    rat: Rat,
    rob: Rob,
    rs: RsTable,
    cdb: Cdb,
    rst: RsTracker,
    fus: FuPool,
    issue_queue: IssueQueue,
    /// Resolved branch redirect for the front-end.
    redirect: Option<u32>,
    trace: bool,
    /// Performance statistics, updated as instructions retire.
    pub stats: SimStats,
    /// Number of instructions retired so far.
    pub retired_instrs: u64,
    /// Set when an exit instruction (ECALL/EBREAK) retires.
    pub exited: bool,
}

impl Core {
    /// Creates a core from the configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            reg_file: RegFile::new(),
            rat: Rat::new(),
            rob: Rob::new(config.pipeline.rob_capacity),
            rs: RsTable::new(config.pipeline.rs_count),
            cdb: Cdb::new(),
            rst: RsTracker::new(config.pipeline.rob_capacity),
            fus: FuPool::new(config),
            issue_queue: IssueQueue::new(config.pipeline.issue_queue_capacity),
            redirect: None,
            trace: config.general.trace,
            stats: SimStats::new(),
            retired_instrs: 0,
            exited: false,
        }
    }

    /// Runs one simulated cycle: commit, writeback, execute, issue.
    pub fn do_cycle(&mut self) {
        self.stats.cycles += 1;
        self.commit();
        self.writeback();
        self.execute();
        self.issue();
    }

    /// Enqueues a decoded instruction from the front-end. Fails (returns
    /// false) when the issue queue is full.
    pub fn enqueue(&mut self, instr: Instr) -> bool {
        self.issue_queue.push(instr)
    }

    /// Returns true when the issue queue cannot accept another instruction.
    pub fn queue_full(&self) -> bool {
        self.issue_queue.is_full()
    }

    /// Consumes the pending front-end redirect, if a branch has resolved.
    pub fn take_redirect(&mut self) -> Option<u32> {
        self.redirect.take()
    }

    /// Returns true once every queue, buffer, and unit is empty.
    pub fn is_drained(&self) -> bool {
        self.issue_queue.is_empty() && self.rob.is_empty() && self.rs.is_empty()
            && self.cdb.is_empty()
    }

    /// Reads a committed register value.
    pub fn reg(&self, idx: usize) -> u32 {
        self.reg_file.read(idx)
    }

    /// Writes a committed register value (test and driver setup).
    pub fn set_reg(&mut self, idx: usize, val: u32) {
        self.reg_file.write(idx, val);
    }

    /// Read access to the data memory.
    pub fn memory(&self) -> &Memory {
        self.fus.lsu.memory()
    }

    /// Mutable access to the data memory (program loading).
    pub fn memory_mut(&mut self) -> &mut Memory {
        self.fus.lsu.memory_mut()
    }

    /// Read access to the CSR file.
    pub fn csrs(&self) -> &CsrFile {
        self.fus.sfu.csrs()
    }

    /// Mutable access to the CSR file.
    pub fn csrs_mut(&mut self) -> &mut CsrFile {
        self.fus.sfu.csrs_mut()
    }

    /// Read access to the register alias table.
    pub fn rat(&self) -> &Rat {
        &self.rat
    }

    /// Read access to the reorder buffer.
    pub fn rob(&self) -> &Rob {
        &self.rob
    }

    /// Read access to the reservation stations.
    pub fn rs(&self) -> &RsTable {
        &self.rs
    }

    /// Issue stage: moves at most one instruction from the issue queue into
    /// a reservation station and a reorder-buffer slot.
    pub fn issue(&mut self) {
        if self.issue_queue.is_empty() || self.rs.is_full() || self.rob.is_full() {
            return;
        }

        let instr = self.issue_queue.data().unwrap().clone();
        let flags = instr.exe_flags;

        // Source operands are read before the RAT is updated for rd, so an
        // instruction reading its own destination sees the previous producer.
        let rs1 = if flags.use_rs1() {
            self.read_operand(instr.rs1)
        } else {
            Operand::Ready(0)
        };
        let rs2 = if flags.use_rs2() {
            self.read_operand(instr.rs2)
        } else {
            Operand::Ready(0)
        };

        let rob_index = self.rob.allocate(instr.clone()).unwrap();

        if flags.use_rd() {
            self.rat.set(instr.rd, rob_index);
        }

        let rs_index = self.rs.issue(rob_index, rs1, rs2, instr.clone()).unwrap();
        self.rst.set(rob_index, rs_index);

        if self.trace {
            eprintln!("IS  [rob={} rs={}] {}", rob_index, rs_index, instr);
        }

        self.issue_queue.pop();
    }

    /// Resolves a source register: committed register file value, a ready
    /// reorder-buffer result, or a tag naming the producing reservation
    /// station.
    fn read_operand(&self, reg: usize) -> Operand {
        match self.rat.get(reg) {
            Some(rob_index) => {
                let entry = self.rob.get(rob_index).unwrap();
                if entry.ready {
                    Operand::Ready(entry.result)
                } else {
                    // A not-yet-ready producer always has a live reservation
                    // station; its slot is the wakeup tag.
                    Operand::Waiting(self.rst.get(rob_index).unwrap())
                }
            }
            None => Operand::Ready(self.reg_file.read(reg)),
        }
    }

    /// Execute stage: ticks every functional unit, publishes at most one
    /// completed result on the CDB, and dispatches ready reservation
    /// stations to idle units.
    pub fn execute(&mut self) {
        for fu in self.fus.units_mut() {
            fu.execute();
        }

        // The CDB serves one functional unit per cycle; a unit that misses
        // its turn holds its result until the bus is free again.
        let mut resolved_branch = false;
        for (index, fu) in self.fus.units_mut().into_iter().enumerate() {
            if !fu.done() {
                continue;
            }
            let output = fu.output().unwrap();
            if self.cdb.push(output) {
                fu.clear();
                resolved_branch = index == FuType::Bru.index();
            }
            break;
        }
        if resolved_branch {
            self.redirect = self.fus.bru.take_redirect();
        }

        for rs_index in 0..self.rs.capacity() {
            let (instr, rob_index, op1, op2) = match self.rs.get(rs_index) {
                Some(entry) if !entry.running && entry.operands_ready() => (
                    entry.instr.clone(),
                    entry.rob_index,
                    entry.rs1.value(),
                    entry.rs2.value(),
                ),
                _ => continue,
            };

            if instr.fu_type == FuType::Lsu && self.lsu_locked(rob_index) {
                continue;
            }

            let fu = self.fus.get_mut(instr.fu_type);
            if fu.busy() {
                continue;
            }
            fu.issue(&instr, rob_index, rs_index, op1, op2);
            self.rs.get_mut(rs_index).unwrap().running = true;

            if self.trace {
                eprintln!("EX  [rob={} rs={}] {}", rob_index, rs_index, instr);
            }
        }
    }

    /// Memory-ordering lock: an LSU operation may not dispatch while any
    /// older store is still in the reorder buffer.
    fn lsu_locked(&self, rob_index: usize) -> bool {
        let seq = match self.rob.get(rob_index) {
            Some(entry) => entry.seq,
            None => return false,
        };
        self.rob
            .iter()
            .any(|(_, entry)| entry.instr.exe_flags.is_store() && entry.seq < seq)
    }

    /// Writeback stage: drains the CDB into every waiting reservation
    /// station and the reorder buffer, and frees the producing station.
    pub fn writeback(&mut self) {
        let cdb_data = match self.cdb.data() {
            Some(data) => *data,
            None => return,
        };

        self.rs.update_operands(&cdb_data);
        self.rs.release(cdb_data.rs_index);
        self.rob.update(&cdb_data);
        self.rst.clear(cdb_data.rob_index);

        if self.trace {
            if let Some(entry) = self.rob.get(cdb_data.rob_index) {
                eprintln!(
                    "WB  [rob={} rs={}] result=0x{:x} {}",
                    cdb_data.rob_index, cdb_data.rs_index, cdb_data.result, entry.instr
                );
            }
        }

        self.cdb.pop();
    }

    /// Commit stage: retires the reorder-buffer head in program order once
    /// its result is ready.
    pub fn commit(&mut self) {
        if self.rob.is_empty() {
            return;
        }

        let head_index = self.rob.head_index();
        let ready = self.rob.get(head_index).map_or(false, |entry| entry.ready);
        if !ready {
            return;
        }

        let entry = self.rob.pop().unwrap();
        let instr = &entry.instr;
        let flags = instr.exe_flags;

        if flags.use_rd() {
            self.reg_file.write(instr.rd, entry.result);
            // A younger in-flight writer owns the mapping now; only clear
            // the RAT when it still names this entry.
            if self.rat.get(instr.rd) == Some(head_index) {
                self.rat.clear(instr.rd);
            }
        }

        self.retired_instrs += 1;
        self.stats.instructions_retired += 1;
        if flags.is_load() {
            self.stats.inst_load += 1;
        } else if flags.is_store() {
            self.stats.inst_store += 1;
        } else if instr.br_op != BrOp::None {
            self.stats.inst_branch += 1;
        } else if instr.opcode == Opcode::Sys {
            self.stats.inst_system += 1;
        } else {
            self.stats.inst_alu += 1;
        }

        if self.trace {
            eprintln!("CM  [rob={}] {}", head_index, instr);
        }

        if flags.is_exit() {
            self.exited = true;
        }
    }
}
