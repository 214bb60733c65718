//! Text rendering of compiled entries.
//!
//! The Rust form is a list of `match` arms for the interpreter's
//! `get_unprefixed_instruction`, joined with `",\n"` so it can be pasted
//! straight between the braces.
use thiserror::Error;

use super::OutputRecord;

/// Errors that can occur while rendering a compiled table
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialise table as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output syntax for a compiled table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// `match` arms building `Instruction` values
    #[default]
    Rust,
    /// A JSON array of entries
    Json,
}

/// Render one entry as a `match` arm.
pub fn render_entry(record: &OutputRecord) -> String {
    let conditional = record
        .cycles
        .conditional
        .map_or_else(|| "None".to_owned(), |cycles| format!("Some({cycles})"));
    format!(
        "0x{:02X} => Some(&Instruction {{\n    c_cycles: {},\n    conditional_c_cycles: {},\n    mnemonic: {:?},\n    execute: |cpu: &mut Cpu| {}\n}})",
        record.code, record.cycles.base, conditional, record.mnemonic, record.dispatch
    )
}

/// Render a whole compiled table.
pub fn render_table(records: &[OutputRecord], format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Rust => Ok(records
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join(",\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}
