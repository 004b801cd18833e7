//! RV32I out-of-order simulator CLI.
//!
//! Runs a flat binary image through the cycle-level core and prints the
//! statistics report. Configuration comes from an optional JSON file; the
//! built-in defaults match a 16-slot reservation pool and a 32-entry
//! reorder buffer.

use clap::{Parser, Subcommand};
use std::fs;
use std::process;

use rv32sim_core::config::Config;
use rv32sim_core::sim::{loader, ExitReason, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "RV32I cycle-level out-of-order simulator",
    long_about = "Run a flat RV32I binary through a Tomasulo-style out-of-order core.\n\nExamples:\n  sim run -f prog.bin\n  sim run -f prog.bin --trace --max-cycles 10000\n  sim run -f prog.bin --config cfg.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a flat binary image.
    Run {
        /// Binary image to execute.
        #[arg(short, long)]
        file: String,

        /// JSON configuration file (defaults apply when omitted).
        #[arg(long)]
        config: Option<String>,

        /// Enable per-cycle stage tracing to stderr.
        #[arg(long)]
        trace: bool,

        /// Stop after this many cycles.
        #[arg(long, default_value_t = 1_000_000)]
        max_cycles: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            trace,
            max_cycles,
        } => cmd_run(&file, config.as_deref(), trace, max_cycles),
    }
}

/// Loads the binary and configuration, runs the simulation, and prints the
/// statistics report.
fn cmd_run(file: &str, config_path: Option<&str>, trace: bool, max_cycles: u64) {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("error: could not read config '{}': {}", path, e);
                process::exit(1);
            });
            Config::from_json(&text).unwrap_or_else(|e| {
                eprintln!("error: could not parse config '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };
    if trace {
        config.general.trace = true;
    }

    let image = loader::load_binary(file).unwrap_or_else(|e| {
        eprintln!("error: could not read binary '{}': {}", file, e);
        process::exit(1);
    });

    let mut sim = Simulator::new(&config, &image);
    match sim.run(max_cycles) {
        Ok(reason) => {
            print!("{}", sim.core.stats.report());
            match reason {
                ExitReason::Exited => println!("exit: program terminated"),
                ExitReason::ProgramEnd => println!("exit: end of program image"),
                ExitReason::MaxCycles => println!("exit: cycle limit reached"),
            }
        }
        Err(e) => {
            eprintln!("fatal: {}", e);
            process::exit(1);
        }
    }
}
