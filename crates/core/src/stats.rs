//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, system).
//! 3. **Reporting:** A human-readable summary for the CLI.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of ALU (non-load/store/branch/system) instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of system (CSR, ECALL, etc.) instructions retired.
    pub inst_system: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
        }
    }
}

impl SimStats {
    /// Creates a new statistics collector with the clock started now.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions retired per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Wall-clock seconds since the collector was created.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Renders a multi-line summary of the collected statistics.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str("==== Simulation statistics ====\n");
        out.push_str(&format!("cycles:        {}\n", self.cycles));
        out.push_str(&format!("retired:       {}\n", self.instructions_retired));
        out.push_str(&format!("IPC:           {:.3}\n", self.ipc()));
        out.push_str(&format!(
            "mix:           alu={} load={} store={} branch={} system={}\n",
            self.inst_alu, self.inst_load, self.inst_store, self.inst_branch, self.inst_system
        ));
        out.push_str(&format!("host seconds:  {:.3}\n", self.elapsed_secs()));
        out
    }
}
