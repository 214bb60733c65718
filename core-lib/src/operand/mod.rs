//! Operand resolution.
//!
//! Maps a table operand token to the symbolic reference the interpreter's
//! handlers take as an argument: a register, a branch condition or one of the
//! two immediate placeholders. The vocabulary is fixed; anything outside it is
//! handed through verbatim so operator-specific literals (`rst 08H`,
//! `bit 7, h`) still compile.
use std::fmt;

use crate::table::OperandToken;

/// 16-bit register pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

/// 8-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// Branch conditions understood by `jr`, `jp`, `call` and `ret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Never appears in the table; inserted for unconditional control flow.
    Unconditional,
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

/// A resolved operand, before any memory indirection is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Reg16(Reg16),
    Reg8(Reg8),
    Condition(Condition),
    /// 8-bit value read from the instruction stream (`d8`, `r8`).
    Imem8,
    /// 16-bit value read from the instruction stream (`d16`, `a16`).
    Imem16,
    /// Any token outside the fixed vocabulary, kept as written.
    Literal(String),
}

/// Token spellings and what they resolve to.
const VOCABULARY: [(&str, Operand); 21] = [
    ("af", Operand::Reg16(Reg16::AF)),
    ("bc", Operand::Reg16(Reg16::BC)),
    ("de", Operand::Reg16(Reg16::DE)),
    ("hl", Operand::Reg16(Reg16::HL)),
    ("sp", Operand::Reg16(Reg16::SP)),
    ("pc", Operand::Reg16(Reg16::PC)),
    ("a", Operand::Reg8(Reg8::A)),
    ("b", Operand::Reg8(Reg8::B)),
    ("c", Operand::Reg8(Reg8::C)),
    ("d", Operand::Reg8(Reg8::D)),
    ("e", Operand::Reg8(Reg8::E)),
    ("h", Operand::Reg8(Reg8::H)),
    ("l", Operand::Reg8(Reg8::L)),
    ("r8", Operand::Imem8),
    ("d8", Operand::Imem8),
    ("d16", Operand::Imem16),
    ("a16", Operand::Imem16),
    ("nc", Operand::Condition(Condition::NotCarry)),
    ("cf", Operand::Condition(Condition::Carry)),
    ("nz", Operand::Condition(Condition::NotZero)),
    ("z", Operand::Condition(Condition::Zero)),
];

impl Operand {
    /// Look up a parenthesis-free token. Matching is exact and case-sensitive.
    pub fn lookup(token: &str) -> Self {
        VOCABULARY
            .iter()
            .find(|(name, _)| *name == token)
            .map_or_else(|| Self::Literal(token.to_owned()), |(_, op)| op.clone())
    }

    pub const fn is_condition(&self) -> bool {
        matches!(self, Self::Condition(_))
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reg16::{self:?}")
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reg8::{self:?}")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition::{self:?}")
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg16(r) => fmt::Display::fmt(r, f),
            Self::Reg8(r) => fmt::Display::fmt(r, f),
            Self::Condition(c) => fmt::Display::fmt(c, f),
            Self::Imem8 => f.write_str("Imem8"),
            Self::Imem16 => f.write_str("Imem16"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

/// An operand plus whether it addresses memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedOperand {
    pub operand: Operand,
    pub indirect: bool,
}

impl ResolvedOperand {
    pub const fn direct(operand: Operand) -> Self {
        Self {
            operand,
            indirect: false,
        }
    }

    /// A bare condition. `Mem(Condition::..)` does not count.
    pub const fn is_condition(&self) -> bool {
        !self.indirect && self.operand.is_condition()
    }
}

/// Renders as the handler argument, `Mem(..)`-wrapped when indirect.
impl fmt::Display for ResolvedOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.indirect {
            write!(f, "Mem({})", self.operand)
        } else {
            fmt::Display::fmt(&self.operand, f)
        }
    }
}

/// Resolve one table token.
pub fn resolve(token: &OperandToken) -> ResolvedOperand {
    ResolvedOperand {
        operand: Operand::lookup(&token.stripped()),
        indirect: token.is_indirect(),
    }
}
