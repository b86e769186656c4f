use minterp::builtins::reserved_words;
use minterp::environment::validate_name;
use minterp::interpreter::{parse_program, Interpreter};
use minterp::normalize::logical_lines;
use proptest::prelude::*;

fn empty() -> Interpreter {
    Interpreter::new("").expect("empty script runs")
}

proptest! {
    /// Arbitrary input is either accepted or rejected with an error, never a
    /// panic.
    #[test]
    fn parser_does_not_panic(s in "\\PC*") {
        let _ = parse_program(&s);
    }

    #[test]
    fn normalized_lines_have_no_blanks_or_separators(s in "\\PC*") {
        for line in logical_lines(&s) {
            prop_assert!(!line.text.contains(' '));
            prop_assert!(!line.text.contains('\t'));
            prop_assert!(!line.text.contains(';'));
            prop_assert!(!line.text.contains('\n'));
        }
    }
}

proptest! {
    #[test]
    fn valid_names_round_trip(name in "[a-z][a-z0-9_]{0,8}", value in -1.0e6f32..1.0e6f32) {
        prop_assume!(validate_name(&name, false).is_ok());
        let mut interpreter = empty();
        prop_assert!(interpreter.set_variable(&name, value));
        prop_assert_eq!(interpreter.get_variable(&name), value);
    }

    #[test]
    fn names_containing_reserved_words_are_refused(
        prefix in "[a-z]{0,3}",
        word in prop::sample::select(reserved_words().collect::<Vec<_>>()),
        suffix in "[a-z0-9]{0,3}",
    ) {
        let name = format!("{}{}{}", prefix, word, suffix);
        let mut interpreter = empty();
        prop_assert!(!interpreter.set_variable(&name, 1.0));
        prop_assert!(!interpreter.environment().contains(&name));
    }

    #[test]
    fn array_elements_round_trip(index in 0usize..10_000, value in -1.0e6f32..1.0e6f32) {
        let mut interpreter = empty();
        prop_assert!(interpreter.update_array("A", index, value));
        prop_assert_eq!(interpreter.get_array_item("A", index), value);
        prop_assert_eq!(interpreter.get_variable(&format!("A${}", index)), value);
    }
}

proptest! {
    #[test]
    fn subtraction_chains_associate_left(a in 0u16..1000, b in 0u16..1000, c in 0u16..1000) {
        let mut interpreter = empty();
        let result = interpreter.evaluate(&format!("{}-{}-{}", a, b, c)).unwrap();
        prop_assert_eq!(result, a as f32 - b as f32 - c as f32);
    }

    #[test]
    fn counting_loop_runs_exactly_n_times(n in 0u32..50) {
        let source = format!("i = 0\nwhile (i < {}) {{\n i = i + 1\n}}", n);
        let mut interpreter = Interpreter::new(&source).unwrap();
        prop_assert_eq!(interpreter.get_variable("i"), n as f32);
    }

    #[test]
    fn scripts_are_deterministic(values in prop::collection::vec(-100i32..100, 1..8)) {
        let source: String = values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("A[{}] = {} * 2\nx{} = A[{}] - 1\n", i, v, i, i))
            .collect();
        let first = Interpreter::new(&source).unwrap();
        let second = Interpreter::new(&source).unwrap();
        prop_assert_eq!(first.environment().variables(), second.environment().variables());
        prop_assert_eq!(first.environment().arrays(), second.environment().arrays());
    }
}
