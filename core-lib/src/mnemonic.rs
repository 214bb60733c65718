//! Display mnemonics for disassembly and debugging.
//!
//! Deliberately coarser than [`crate::operand`]: only the immediate classes
//! are replaced (`N` for 8-bit, `NN` for 16-bit), registers and conditions are
//! shown as written, parentheses included.
use crate::table::{InstructionRecord, OperandToken};

/// Immediate operand classes and their display placeholder.
const PLACEHOLDERS: [(&str, &str); 4] = [("r8", "N"), ("d8", "N"), ("d16", "NN"), ("a16", "NN")];

/// Immediates are matched without parentheses; everything else keeps them.
fn placeholder(token: &OperandToken) -> &str {
    let stripped = token.stripped();
    PLACEHOLDERS
        .iter()
        .find(|(class, _)| *class == stripped)
        .map_or(token.as_str(), |(_, shown)| *shown)
}

/// Build the upper-cased mnemonic, e.g. `LD BC,NN` or `NOP`.
pub fn format(record: &InstructionRecord) -> String {
    let operands: Vec<String> = record
        .operands
        .iter()
        .map(|token| placeholder(token).to_owned())
        .collect();
    let text = if operands.is_empty() {
        record.operator.clone()
    } else {
        format!("{} {}", record.operator, operands.join(","))
    };
    text.to_uppercase()
}
