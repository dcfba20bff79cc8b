//! qbtm: a self-contained executor for typed quantum circuits over
//! C*-algebra block structures. Circuits are morphisms in FdC*_CP
//! (finite-dimensional C*-algebras, completely positive maps), stored by
//! content address and shipped as .qmb binaries.

use clap::{Parser, Subcommand};
use qbtm_algebra::Matrix;
use qbtm_runner::{Container, Runner};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(
    name = "qbtm",
    version,
    about = "Quantum Block Type Morphisms runtime",
    long_about = "A self-contained executor for typed quantum circuits over C*-algebra \
                  block structures. Circuits are morphisms in FdC*_CP (finite-dimensional \
                  C*-algebras, CP maps)."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a .qmb binary
    Run {
        /// Path to the .qmb file
        file: PathBuf,
    },
    /// Inspect a .qmb file structure without executing it
    Inspect {
        /// Path to the .qmb file
        file: PathBuf,
    },
    /// Show information about the runtime
    Info,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; only usage mistakes are
            // errors
            let is_error = err.use_stderr();
            let _ = err.print();
            process::exit(if is_error { 1 } else { 0 });
        }
    };

    let result = match cli.command {
        Command::Run { file } => cmd_run(&file),
        Command::Inspect { file } => cmd_inspect(&file),
        Command::Info => cmd_info(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn read_binary(file: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(file).map_err(|err| format!("failed to read {}: {err}", file.display()))
}

fn cmd_run(file: &Path) -> Result<(), String> {
    let bytes = read_binary(file)?;
    let runner = Runner::load(&bytes).map_err(|err| err.to_string())?;

    println!("Loaded: {}", runner.name());
    println!("Version: {}", runner.version());
    println!("Entrypoint: {}", runner.entrypoint());

    let input = Matrix::identity(1);
    let result = runner.run(&input).map_err(|err| err.to_string())?;

    println!();
    println!("Execution result:");
    println!("  Output matrix: {}x{}", result.rows(), result.cols());
    if let Ok(trace) = result.trace() {
        println!("  Trace: {trace}");
    }
    Ok(())
}

fn cmd_inspect(file: &Path) -> Result<(), String> {
    let bytes = read_binary(file)?;
    let container = Container::decode(&bytes).map_err(|err| err.to_string())?;

    println!("QMB Binary: {}", file.display());
    println!("  Name: {}", container.name);
    println!("  Version: {}", container.version);
    println!("  Entrypoint: {}", container.entrypoint);
    println!("  Store size: {} bytes", container.store_data.len());
    println!("  Total size: {} bytes", bytes.len());
    Ok(())
}

fn cmd_info() -> Result<(), String> {
    println!("QBTM Runtime Information");
    println!("========================");
    println!();
    println!("Architecture:");
    println!("  - Self-contained runtime for .qmb circuit binaries");
    println!("  - Exact rational arithmetic (no floating point)");
    println!("  - Gaussian rationals Q(i) for complex numbers");
    println!("  - Content-addressed storage via QGID (SHA-256)");
    println!();
    println!("Supported Primitives:");
    println!("  Structural: Id, Compose, Tensor, Swap");
    println!("  Quantum:    Unitary, Choi, Prepare, Discard");
    println!("  Arithmetic: Add, Scale, Zero");
    println!();
    println!("Type System:");
    println!("  Objects are C*-algebras: ⊕ᵢ M_nᵢ(ℂ)");
    println!("  Q(n) = single block M_n(ℂ) (n-dimensional quantum)");
    println!("  C(k) = k copies of ℂ (k-level classical)");
    println!("  I    = unit object (trivial)");
    println!();
    println!("File Format:");
    println!("  .qmb = Quantum Model Binary");
    println!("  Magic: QMB\\x01");
    println!("  Contains: entrypoint QGID + serialized store");
    Ok(())
}
