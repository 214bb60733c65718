//! Dispatch-call synthesis.
//!
//! Produces the expression the interpreter's instruction table runs for an
//! opcode, e.g. `jr(cpu, Condition::NotZero, Imem8)`. Handlers share one
//! calling convention: the CPU first, then the resolved operands, with
//! control-flow handlers always taking a condition as their first operand.
//!
//! Three cases deviate from a plain `operator(cpu, operands..)` call:
//!
//! 1. `stop` ignores its operands and becomes a fixed block.
//! 2. `inc`, `dec` and `add` switch to their `16` handler when the first
//!    argument renders as a 16-bit entity.
//! 3. `jr`, `jp`, `ret` and `reti` get `Condition::Unconditional` when the
//!    table does not name a condition.
use std::fmt;

use crate::operand::{resolve, Condition, Operand, ResolvedOperand};
use crate::table::InstructionRecord;

/// Name of the implicit first argument of every handler.
pub const CONTEXT_ARG: &str = "cpu";

/// Operators with a separate 16-bit handler.
pub const ARITHMETIC16: [&str; 3] = ["inc", "dec", "add"];

/// Control-flow operators whose handler always takes a condition.
pub const JUMP: [&str; 4] = ["jr", "jp", "ret", "reti"];

const STOP: &str = "stop";

/// Text whose presence in the first argument selects the 16-bit handler.
const WIDE_MARKER: &str = "16";

const STOP_BLOCK: &str = "{cpu.stop(); Timing::Normal}";

/// A synthesized dispatch expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// `stop` halts the CPU and reports normal timing, whatever its operands.
    Stop,
    /// `handler(cpu, args..)`
    Call {
        handler: String,
        args: Vec<ResolvedOperand>,
    },
}

impl Dispatch {
    /// Handler name, `None` for the stop block.
    pub fn handler(&self) -> Option<&str> {
        match self {
            Self::Stop => None,
            Self::Call { handler, .. } => Some(handler.as_str()),
        }
    }

    /// Operand arguments after the CPU context, empty for the stop block.
    pub fn args(&self) -> &[ResolvedOperand] {
        match self {
            Self::Stop => &[],
            Self::Call { args, .. } => args,
        }
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => f.write_str(STOP_BLOCK),
            Self::Call { handler, args } => {
                write!(f, "{handler}({CONTEXT_ARG}")?;
                for arg in args {
                    write!(f, ", {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

const fn unconditional() -> ResolvedOperand {
    ResolvedOperand::direct(Operand::Condition(Condition::Unconditional))
}

/// Selecting on rendered text means `inc (hl)` picks `inc16` as well, since
/// `Mem(Reg16::HL)` carries the marker. Only the first argument is inspected.
fn selects_wide_handler(args: &[ResolvedOperand]) -> bool {
    args.first()
        .is_some_and(|first| first.to_string().contains(WIDE_MARKER))
}

/// Build the dispatch expression for one table record.
pub fn synthesize(record: &InstructionRecord) -> Dispatch {
    let operator = record.operator.as_str();
    if operator == STOP {
        return Dispatch::Stop;
    }

    let mut args: Vec<ResolvedOperand> = record.operands.iter().map(resolve).collect();
    let mut handler = operator.to_owned();

    if ARITHMETIC16.contains(&operator) && selects_wide_handler(&args) {
        handler.push_str(WIDE_MARKER);
    } else if JUMP.contains(&operator) {
        if args.is_empty() {
            args.push(unconditional());
        } else if !args.iter().any(ResolvedOperand::is_condition) {
            // First operand is the target; the condition still goes first.
            args.insert(0, unconditional());
        }
    }

    Dispatch::Call { handler, args }
}

#[cfg(test)]
mod tests;
