//! Simulator: owns the core and the front-end side-by-side.
//!
//! Each tick runs the backend stages first (commit through issue), then the
//! front-end, so a freshly fetched instruction issues no earlier than the
//! following cycle. The run loop stops when an exit instruction retires,
//! when the pipeline drains after the program image ends, or at the cycle
//! limit.

use crate::config::Config;
use crate::core::Core;
use crate::sim::frontend::Frontend;
use crate::sim::SimError;

/// Why a simulation run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// An exit instruction (ECALL/EBREAK) retired.
    Exited,
    /// The program image ran out and the pipeline drained.
    ProgramEnd,
    /// The cycle limit was reached.
    MaxCycles,
}

/// Top-level simulator: backend core plus fetch front-end.
pub struct Simulator {
    /// The out-of-order backend.
    pub core: Core,
    frontend: Frontend,
}

impl Simulator {
    /// Creates a simulator for a program image.
    ///
    /// The image is visible both to the front-end (as instruction words)
    /// and to the load/store unit's data memory (as bytes at the start PC),
    /// so programs can read their own data sections.
    pub fn new(config: &Config, image: &[u8]) -> Self {
        let mut core = Core::new(config);
        core.memory_mut().load_at(image, config.general.start_pc);

        let words = crate::sim::loader::words_from_bytes(image);
        let frontend = Frontend::new(words, config.general.start_pc, config.general.trace);

        Self { core, frontend }
    }

    /// Creates a simulator directly from instruction words (test programs).
    pub fn from_words(config: &Config, words: &[u32]) -> Self {
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for word in words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        Self::new(config, &bytes)
    }

    /// Number of instructions fetched by the front-end so far.
    pub fn fetched_instrs(&self) -> u64 {
        self.frontend.fetched_instrs()
    }

    /// Advances the simulation by one clock cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.core.do_cycle();
        self.frontend.tick(&mut self.core)
    }

    /// Runs until exit, drain, or `max_cycles`.
    pub fn run(&mut self, max_cycles: u64) -> Result<ExitReason, SimError> {
        for _ in 0..max_cycles {
            self.tick()?;

            if self.core.exited {
                return Ok(ExitReason::Exited);
            }
            if self.frontend.halted() && self.core.is_drained() {
                return Ok(ExitReason::ProgramEnd);
            }
        }
        Ok(ExitReason::MaxCycles)
    }
}
