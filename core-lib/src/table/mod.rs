//! Instruction table model and loader.
//!
//! The table is a YAML sequence with one mapping per opcode:
//!
//! ```yaml
//! - code: 0x20
//!   operator: jr
//!   operands: [nz, r8]
//!   time: [12, 8]
//! ```
//!
//! Loading is all-or-nothing: one malformed record rejects the whole table.
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub mod error;

pub use error::TableError;

/// Cycle cost as written in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CycleSpec {
    /// A single cost that never depends on a condition.
    Fixed(u8),
    /// `[taken, not_taken]` for instructions that evaluate a condition.
    Branching(u8, u8),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Text(String),
    Number(i64),
}

/// One operand descriptor, e.g. `bc`, `(hl)` or `d8`.
///
/// Bare integers in the table (`bit 0, b`) are kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "RawToken", into = "String")]
pub struct OperandToken(String);

impl From<RawToken> for OperandToken {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Text(text) => Self(text),
            RawToken::Number(n) => Self(n.to_string()),
        }
    }
}

impl From<OperandToken> for String {
    fn from(token: OperandToken) -> Self {
        token.0
    }
}

impl From<&str> for OperandToken {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl OperandToken {
    /// The token exactly as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the token is wrapped in (or merely touches) a parenthesis.
    pub fn is_indirect(&self) -> bool {
        self.0.contains(['(', ')'])
    }

    /// The token with every parenthesis removed.
    pub fn stripped(&self) -> String {
        self.0.replace(['(', ')'], "")
    }
}

impl fmt::Display for OperandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single row of the instruction table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstructionRecord {
    pub code: u8,
    pub operator: String,
    pub operands: Vec<OperandToken>,
    pub time: CycleSpec,
}

impl InstructionRecord {
    pub fn new(code: u8, operator: &str, operands: &[&str], time: CycleSpec) -> Self {
        Self {
            code,
            operator: operator.to_owned(),
            operands: operands.iter().copied().map(OperandToken::from).collect(),
            time,
        }
    }
}

/// The full instruction table, in source order.
///
/// Opcode uniqueness is not checked; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct InstructionTable {
    records: Vec<InstructionRecord>,
}

impl InstructionTable {
    pub const fn new(records: Vec<InstructionRecord>) -> Self {
        Self { records }
    }

    /// Parse a table from YAML text.
    #[instrument(skip(text), level = "debug")]
    pub fn from_yaml_str(text: &str) -> Result<Self, TableError> {
        let table: Self = serde_yaml::from_str(text)?;
        debug!(records = table.len(), "Parsed instruction table");
        Ok(table)
    }

    /// Read and parse a table from a YAML file.
    #[instrument(level = "debug")]
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn records(&self) -> &[InstructionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records carrying `code`, in source order.
    pub fn find(&self, code: u8) -> impl Iterator<Item = &InstructionRecord> {
        self.records.iter().filter(move |r| r.code == code)
    }
}

impl<'a> IntoIterator for &'a InstructionTable {
    type Item = &'a InstructionRecord;
    type IntoIter = std::slice::Iter<'a, InstructionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
