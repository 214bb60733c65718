//! opgen CLI
//!
//! Compiles an SM83 instruction table into the interpreter's dispatch entries.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use opgen_core::{compile, emit, render_entry, render_table, InstructionTable, OutputFormat};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Default output file, next to where the table is usually kept.
const DEFAULT_OUTPUT: &str = "parsed_instructions.txt";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output globally (for troubleshooting and development)
    #[arg(
        long,
        global = true,
        help = "Enable debug output globally (for troubleshooting and development)"
    )]
    debug: bool,
    /// Enable verbose output globally (logs every compiled entry)
    #[arg(
        long,
        global = true,
        help = "Enable verbose output globally (logs every compiled entry)"
    )]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a whole instruction table
    Compile {
        /// Path to the YAML instruction table
        #[arg(value_name = "TABLE")]
        table: PathBuf,
        /// Where to write the entries ("-" for stdout)
        #[arg(short, long, value_name = "OUT", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Output syntax
        #[arg(long, value_enum, default_value_t = OutputFormat::Rust)]
        format: OutputFormat,
    },
    /// Print the compiled entry for one opcode
    Show {
        /// Path to the YAML instruction table
        #[arg(value_name = "TABLE")]
        table: PathBuf,
        /// Opcode, hex (0x20) or decimal (32)
        #[arg(value_name = "CODE", value_parser = parse_code)]
        code: u8,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.verbose);
    debug!(debug = cli.debug, verbose = cli.verbose, "Starting opgen");
    match &cli.command {
        Commands::Compile {
            table,
            output,
            format,
        } => compile_table(table, output, *format),
        Commands::Show { table, code } => show_entry(table, *code),
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(debug: bool, verbose: bool) {
    let level = if verbose {
        "trace"
    } else if debug {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse an opcode given as `0x20`, `0X20` or `32`.
fn parse_code(text: &str) -> Result<u8, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid opcode '{text}': {e}"))
}

fn load_table(table_path: &Path) -> anyhow::Result<InstructionTable> {
    if !table_path.exists() {
        anyhow::bail!("instruction table not found: {}", table_path.display());
    }
    InstructionTable::from_path(table_path)
        .with_context(|| format!("Failed to load instruction table from {}", table_path.display()))
}

/// Compile the table at `table_path` and write it to `output`.
fn compile_table(table_path: &Path, output: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let records = compile(&load_table(table_path)?);
    let text = render_table(&records, format).context("Failed to render compiled table")?;

    if output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").context("Failed to write to stdout")?;
    } else {
        std::fs::write(output, text)
            .with_context(|| format!("Failed to write entries to {}", output.display()))?;
        info!(entries = records.len(), output = %output.display(), "Wrote dispatch entries");
    }
    Ok(())
}

/// Print every entry compiled for `code`; duplicates are all shown.
fn show_entry(table_path: &Path, code: u8) -> anyhow::Result<()> {
    let table = load_table(table_path)?;
    let matching: Vec<String> = table
        .find(code)
        .map(|record| render_entry(&emit(record)))
        .collect();
    if matching.is_empty() {
        anyhow::bail!(
            "no instruction with code {code:#04X} in {}",
            table_path.display()
        );
    }
    debug!(code, entries = matching.len(), "Compiled matching entries");
    println!("{}", matching.join(",\n"));
    Ok(())
}
