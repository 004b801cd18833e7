//! Configuration system for the out-of-order simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (reservation stations, reorder
//!    buffer, issue queue, memory).
//! 2. **Structures:** Hierarchical config for general, pipeline, and memory
//!    settings.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or via
//! `Config::default()` for the CLI.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Number of reservation-station slots.
    pub const RS_COUNT: usize = 16;

    /// Reorder buffer capacity in entries.
    pub const ROB_CAPACITY: usize = 32;

    /// Capacity of the issue queue between the front-end and the backend.
    pub const ISSUE_QUEUE_CAPACITY: usize = 8;

    /// Load/store unit latency in cycles.
    pub const LSU_LATENCY: u64 = 1;

    /// Size of the flat data memory in bytes (64 KiB).
    pub const MEM_SIZE: usize = 64 * 1024;

    /// Initial program counter value.
    pub const START_PC: u32 = 0;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.rs_count, 16);
/// assert_eq!(config.pipeline.rob_capacity, 32);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true, "start_pc": 256 },
///     "pipeline": { "rs_count": 8, "rob_capacity": 16 },
///     "memory": { "mem_size": 4096 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.pipeline.rs_count, 8);
/// assert_eq!(config.memory.mem_size, 4096);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Backend pipeline sizing
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Config> {
        serde_json::from_str(json)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Enable per-cycle stage tracing to stderr
    #[serde(default)]
    pub trace: bool,

    /// Initial PC value
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            start_pc: defaults::START_PC,
        }
    }
}

/// Backend pipeline sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of reservation-station slots
    #[serde(default = "PipelineConfig::default_rs_count")]
    pub rs_count: usize,

    /// Reorder buffer capacity
    #[serde(default = "PipelineConfig::default_rob_capacity")]
    pub rob_capacity: usize,

    /// Issue queue capacity
    #[serde(default = "PipelineConfig::default_issue_queue_capacity")]
    pub issue_queue_capacity: usize,

    /// Load/store unit latency in cycles
    #[serde(default = "PipelineConfig::default_lsu_latency")]
    pub lsu_latency: u64,
}

impl PipelineConfig {
    /// Returns the default reservation-station count.
    fn default_rs_count() -> usize {
        defaults::RS_COUNT
    }

    /// Returns the default reorder buffer capacity.
    fn default_rob_capacity() -> usize {
        defaults::ROB_CAPACITY
    }

    /// Returns the default issue queue capacity.
    fn default_issue_queue_capacity() -> usize {
        defaults::ISSUE_QUEUE_CAPACITY
    }

    /// Returns the default load/store unit latency.
    fn default_lsu_latency() -> u64 {
        defaults::LSU_LATENCY
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rs_count: defaults::RS_COUNT,
            rob_capacity: defaults::ROB_CAPACITY,
            issue_queue_capacity: defaults::ISSUE_QUEUE_CAPACITY,
            lsu_latency: defaults::LSU_LATENCY,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Data memory size in bytes
    #[serde(default = "MemoryConfig::default_mem_size")]
    pub mem_size: usize,
}

impl MemoryConfig {
    /// Returns the default data memory size.
    fn default_mem_size() -> usize {
        defaults::MEM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            mem_size: defaults::MEM_SIZE,
        }
    }
}
