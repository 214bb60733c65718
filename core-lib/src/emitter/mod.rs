//! Table emission.
//!
//! Turns each table row into an [`OutputRecord`]: cycle costs, display
//! mnemonic and dispatch expression. Records keep the table's order and
//! duplicated opcodes are emitted twice; the consumer's `match` rejects them.
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, instrument, trace};

use crate::dispatch::{self, Dispatch};
use crate::mnemonic;
use crate::table::{CycleSpec, InstructionRecord, InstructionTable};

pub mod render;

pub use render::{render_entry, render_table, OutputFormat, RenderError};

/// Cycle costs of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleCost {
    /// Cost when no condition is taken, or the only cost.
    #[serde(rename = "c_cycles")]
    pub base: u8,
    /// Cost when the branch is taken. Present only for `[taken, not_taken]`.
    #[serde(rename = "conditional_c_cycles")]
    pub conditional: Option<u8>,
}

impl From<CycleSpec> for CycleCost {
    fn from(spec: CycleSpec) -> Self {
        match spec {
            CycleSpec::Fixed(base) => Self {
                base,
                conditional: None,
            },
            CycleSpec::Branching(taken, not_taken) => Self {
                base: not_taken,
                conditional: Some(taken),
            },
        }
    }
}

/// One compiled dispatch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub code: u8,
    #[serde(flatten)]
    pub cycles: CycleCost,
    pub mnemonic: String,
    #[serde(rename = "execute", serialize_with = "as_text")]
    pub dispatch: Dispatch,
}

fn as_text<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Compile one table row.
pub fn emit(record: &InstructionRecord) -> OutputRecord {
    let out = OutputRecord {
        code: record.code,
        cycles: record.time.into(),
        mnemonic: mnemonic::format(record),
        dispatch: dispatch::synthesize(record),
    };
    trace!(code = out.code, mnemonic = %out.mnemonic, dispatch = %out.dispatch, "Emitted entry");
    out
}

/// Compile every row, in table order.
#[instrument(skip(table), fields(records = table.len()), level = "debug")]
pub fn compile(table: &InstructionTable) -> Vec<OutputRecord> {
    let records: Vec<OutputRecord> = table.iter().map(emit).collect();
    let conditional = records
        .iter()
        .filter(|r| r.cycles.conditional.is_some())
        .count();
    debug!(
        entries = records.len(),
        conditional, "Compiled instruction table"
    );
    records
}
