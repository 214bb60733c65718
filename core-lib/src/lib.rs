//! Compiles an SM83 instruction table (YAML) into the dispatch entries of an
//! interpreter's opcode `match`.
//!
//! Pipeline: [`table`] loads the rows, [`operand`] and [`mnemonic`] resolve
//! each row's operands, [`dispatch`] builds the handler call and [`emitter`]
//! assembles and renders the final entries.
pub mod dispatch;
pub mod emitter;
pub mod mnemonic;
pub mod operand;
pub mod table;

// Re-export common types
pub use dispatch::Dispatch;
pub use emitter::{compile, emit, render_entry, render_table, CycleCost, OutputFormat, OutputRecord};
pub use operand::{Condition, Operand, Reg16, Reg8, ResolvedOperand};
pub use table::{CycleSpec, InstructionRecord, InstructionTable, OperandToken, TableError};
