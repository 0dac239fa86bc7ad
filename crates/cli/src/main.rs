//! minirv CLI: load raw RV32I binary images and execute them.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process;

use minirv_executor::{Cpu, Instr, DEFAULT_MEMORY_CAPACITY};

/// minirv: minimal RISC-V (RV32I subset) interpreter
#[derive(Parser)]
#[command(name = "minirv")]
#[command(version = "0.1.0")]
#[command(about = "Execute raw RV32I binary images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a raw binary image
    Run {
        /// Path to the raw binary image
        bin: PathBuf,

        /// Address-space ceiling seeded into the stack pointer (x2)
        #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MEMORY_CAPACITY)]
        memory_size: u32,

        /// Write the final machine state as JSON
        #[arg(long, value_name = "PATH")]
        dump_state: Option<PathBuf>,
    },

    /// Show information about a binary image
    Info {
        /// Path to the raw binary image
        bin: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { bin, memory_size, dump_state } => {
            run_command(&bin, memory_size, dump_state.as_ref());
        }
        Commands::Info { bin } => {
            info_command(&bin);
        }
    }
}

fn run_command(bin_path: &PathBuf, memory_size: u32, dump_state: Option<&PathBuf>) {
    let image = match fs::read(bin_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading binary: {}", e);
            process::exit(1);
        }
    };

    println!("read {} bytes", image.len());

    let mut cpu = Cpu::with_capacity(&image, memory_size);
    if let Err(e) = cpu.run() {
        eprintln!("Execution stopped: {}", e);
        process::exit(1);
    }

    print!("{}", cpu.dump_registers());

    if let Some(out_path) = dump_state {
        let json = match serde_json::to_string_pretty(&cpu) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error serializing state: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = fs::write(out_path, json) {
            eprintln!("Error writing state: {}", e);
            process::exit(1);
        }
        println!("state saved to {}", out_path.display());
    }
}

fn info_command(bin_path: &PathBuf) {
    let image = match fs::read(bin_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading binary: {}", e);
            process::exit(1);
        }
    };

    println!("File: {}", bin_path.display());
    println!("Size: {} bytes ({} words)", image.len(), image.len() / 4);
    if image.len() % 4 != 0 {
        println!("Warning: image length is not a multiple of 4; the trailing bytes cannot be fetched");
    }

    println!();
    for (i, chunk) in image.chunks_exact(4).enumerate() {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        println!("{:#010x}: {:08x}  {}", i * 4, word, Instr::decode(word));
    }
}
