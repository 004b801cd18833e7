//! RV32I out-of-order core simulator library.
//!
//! This crate implements a cycle-level RV32I simulator with Tomasulo-style
//! out-of-order execution and in-order commit. It provides:
//! 1. **ISA:** Instruction decoding, descriptor model, and disassembly for the
//!    RV32I base integer subset.
//! 2. **Core:** The out-of-order backend — Register Alias Table, Reservation
//!    Stations, Reorder Buffer, Common Data Bus, and four functional units
//!    (ALU, BRU, LSU, SFU) driven by a per-cycle pipeline controller.
//! 3. **Simulation:** Front-end fetch, binary loader, simulator driver, and
//!    statistics collection.

/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (pipeline controller, architectural state, functional units).
pub mod core;
/// Instruction set (decode, instruction descriptor, disassembly).
pub mod isa;
/// Simulation driver (front-end, loader, simulator).
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The out-of-order backend; drives one cycle per `do_cycle` call.
pub use crate::core::Core;
/// Top-level driver; owns the core and the front-end.
pub use crate::sim::Simulator;
