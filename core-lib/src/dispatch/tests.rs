/// core-lib/src/dispatch/tests.rs
use super::{synthesize, Dispatch, ARITHMETIC16, JUMP};
use crate::table::{CycleSpec, InstructionRecord, OperandToken};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use test_case::test_case;

fn expr(operator: &str, operands: &[&str]) -> String {
    synthesize(&InstructionRecord::new(0, operator, operands, CycleSpec::Fixed(4))).to_string()
}

#[test_case("nop", &[], "nop(cpu)")]
#[test_case("ld", &["bc", "d16"], "ld(cpu, Reg16::BC, Imem16)")]
#[test_case("ld", &["(bc)", "a"], "ld(cpu, Mem(Reg16::BC), Reg8::A)")]
#[test_case("ld", &["a", "(a16)"], "ld(cpu, Reg8::A, Mem(Imem16))")]
#[test_case("ld", &["(c)", "a"], "ld(cpu, Mem(Reg8::C), Reg8::A)")]
#[test_case("push", &["af"], "push(cpu, Reg16::AF)")]
#[test_case("rst", &["38H"], "rst(cpu, 38H)")]
#[test_case("bit", &["7", "(hl)"], "bit(cpu, 7, Mem(Reg16::HL))")]
#[test_case("call", &["nz", "a16"], "call(cpu, Condition::NotZero, Imem16)")]
#[test_case("call", &["a16"], "call(cpu, Imem16)" ; "call is not in the jump set")]
fn test_plain_calls(operator: &str, operands: &[&str], expected: &str) {
    assert_eq!(expr(operator, operands), expected);
}

#[test_case("inc", &["bc"], "inc16(cpu, Reg16::BC)")]
#[test_case("dec", &["sp"], "dec16(cpu, Reg16::SP)")]
#[test_case("add", &["hl", "de"], "add16(cpu, Reg16::HL, Reg16::DE)")]
#[test_case("add", &["sp", "r8"], "add16(cpu, Reg16::SP, Imem8)")]
#[test_case("inc", &["(hl)"], "inc16(cpu, Mem(Reg16::HL))" ; "indirect 16 bit first operand")]
#[test_case("inc", &["b"], "inc(cpu, Reg8::B)")]
#[test_case("dec", &["a"], "dec(cpu, Reg8::A)")]
#[test_case("add", &["a", "d8"], "add(cpu, Reg8::A, Imem8)")]
#[test_case("add", &["a", "hl"], "add(cpu, Reg8::A, Reg16::HL)" ; "only first operand inspected")]
#[test_case("inc", &[], "inc(cpu)" ; "no operands no suffix")]
fn test_arithmetic_width_selection(operator: &str, operands: &[&str], expected: &str) {
    assert_eq!(expr(operator, operands), expected);
}

#[test_case("ret", &[], "ret(cpu, Condition::Unconditional)")]
#[test_case("reti", &[], "reti(cpu, Condition::Unconditional)")]
#[test_case("jr", &["r8"], "jr(cpu, Condition::Unconditional, Imem8)")]
#[test_case("jp", &["a16"], "jp(cpu, Condition::Unconditional, Imem16)")]
#[test_case("jp", &["(hl)"], "jp(cpu, Condition::Unconditional, Mem(Reg16::HL))")]
#[test_case("jp", &["hl"], "jp(cpu, Condition::Unconditional, Reg16::HL)")]
#[test_case("jr", &["nz", "r8"], "jr(cpu, Condition::NotZero, Imem8)")]
#[test_case("jr", &["cf", "r8"], "jr(cpu, Condition::Carry, Imem8)")]
#[test_case("jp", &["nc", "a16"], "jp(cpu, Condition::NotCarry, Imem16)")]
#[test_case("ret", &["z"], "ret(cpu, Condition::Zero)")]
fn test_jump_conditions(operator: &str, operands: &[&str], expected: &str) {
    assert_eq!(expr(operator, operands), expected);
}

#[test]
fn test_condition_later_in_list_suppresses_insertion() {
    assert_eq!(expr("jp", &["a16", "z"]), "jp(cpu, Imem16, Condition::Zero)");
}

#[test]
fn test_indirect_condition_still_gets_default() {
    assert_eq!(
        expr("jp", &["(z)"]),
        "jp(cpu, Condition::Unconditional, Mem(Condition::Zero))"
    );
}

#[test_case(&[])]
#[test_case(&["0"])]
#[test_case(&["bc", "d16"])]
fn test_stop_ignores_operands(operands: &[&str]) {
    let dispatch = synthesize(&InstructionRecord::new(0x10, "stop", operands, CycleSpec::Fixed(4)));
    assert_eq!(dispatch, Dispatch::Stop);
    assert_eq!(dispatch.to_string(), "{cpu.stop(); Timing::Normal}");
    assert_eq!(dispatch.handler(), None);
    assert!(dispatch.args().is_empty());
}

#[test]
fn test_special_sets_are_disjoint() {
    assert!(ARITHMETIC16.iter().all(|op| !JUMP.contains(op)));
}

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "af", "bc", "de", "hl", "sp", "pc", "a", "b", "c", "d", "e", "h", "l", "r8", "d8",
            "d16", "a16", "nc", "cf", "nz", "z", "00H", "7",
        ])
        .prop_map(str::to_owned),
        "[a-z0-9]{1,3}",
    ]
    .prop_flat_map(|t| prop_oneof![Just(t.clone()), Just(format!("({t})"))])
}

fn operands() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token(), 0..=2)
}

fn record(operator: &str, operands: &[String]) -> InstructionRecord {
    InstructionRecord {
        code: 0,
        operator: operator.to_owned(),
        operands: operands.iter().map(|t| OperandToken::from(t.as_str())).collect(),
        time: CycleSpec::Fixed(4),
    }
}

fn arg_list(text: &str) -> Vec<String> {
    let open = text.find('(').unwrap_or(0);
    text[open + 1..text.len() - 1]
        .split(", ")
        .map(str::to_owned)
        .collect()
}

proptest! {
    #[test]
    fn test_plain_operator_keeps_arity_and_order(
        operator in "[a-z]{2,4}".prop_filter("special operator", |op| {
            op != "stop" && !ARITHMETIC16.contains(&op.as_str()) && !JUMP.contains(&op.as_str())
        }),
        operands in operands(),
    ) {
        let text = synthesize(&record(&operator, &operands)).to_string();
        let args = arg_list(&text);
        prop_assert_eq!(args.len(), operands.len() + 1);
        prop_assert_eq!(args[0].as_str(), "cpu");
        let head = format!("{operator}(");
        prop_assert!(text.starts_with(&head));
    }

    #[test]
    fn test_jump_without_operands_ends_unconditional(operator in prop::sample::select(JUMP.to_vec())) {
        let text = synthesize(&record(operator, &[])).to_string();
        prop_assert!(text.ends_with(", Condition::Unconditional)"));
    }

    #[test]
    fn test_jump_without_condition_puts_unconditional_first(
        operator in prop::sample::select(JUMP.to_vec()),
        target in prop::sample::select(vec!["r8", "a16", "hl", "(hl)", "38H"]),
    ) {
        let text = synthesize(&record(operator, &[target.to_owned()])).to_string();
        let args = arg_list(&text);
        prop_assert_eq!(args[1].as_str(), "Condition::Unconditional");
        prop_assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_jump_with_condition_is_left_alone(
        operator in prop::sample::select(JUMP.to_vec()),
        cond in prop::sample::select(vec!["nc", "cf", "nz", "z"]),
    ) {
        let dispatch = synthesize(&record(operator, &[cond.to_owned(), "r8".to_owned()]));
        prop_assert_eq!(dispatch.args().len(), 2);
        prop_assert!(!dispatch.to_string().contains("Unconditional"));
    }

    #[test]
    fn test_stop_is_always_the_fixed_block(operands in operands()) {
        prop_assert_eq!(synthesize(&record("stop", &operands)), Dispatch::Stop);
    }
}
