//! Simulation driver.
//!
//! This module wires the core to a program:
//! 1. **Frontend:** Non-speculative fetch and decode into the issue queue.
//! 2. **Loader:** Flat binary images from disk.
//! 3. **Simulator:** Owns the core and the front-end; runs the cycle loop.

use std::fmt;

/// Front-end fetch and decode.
pub mod frontend;

/// Flat binary loader.
pub mod loader;

/// Top-level simulator driver.
pub mod simulator;

pub use self::frontend::Frontend;
pub use self::simulator::{ExitReason, Simulator};

/// Fatal simulation errors.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// The front-end fetched an encoding the decoder rejects.
    IllegalInstruction {
        /// The offending 32-bit encoding.
        word: u32,
        /// The program counter it was fetched from.
        pc: u32,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::IllegalInstruction { word, pc } => {
                write!(f, "illegal instruction 0x{:08x} at PC=0x{:x}", word, pc)
            }
        }
    }
}

impl std::error::Error for SimError {}
