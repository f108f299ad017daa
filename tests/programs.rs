use std::path::Path;
use pretty_assertions::assert_eq;
use when_lang::{interpret, Config, Error, Outcome};

fn run(source: &str) -> Outcome<Vec<u8>> {
    match interpret(source, Path::new("test.wl"), Vec::new()) {
        Ok(outcome) => outcome,
        Err(err) => panic!("program failed to parse: {}", err),
    }
}

fn output(source: &str) -> String {
    String::from_utf8(run(source).output).unwrap()
}

#[test]
fn assignment_and_arithmetic() {
    assert_eq!("8\n", output(include_str!("../demos/sum.wl")));
}

#[test]
fn when_takes_then_branch() {
    assert_eq!("1\n", output("x = 0; when (x < 1) { out 1; } else { out 2; }"));
}

#[test]
fn loop_prints_successive_values() {
    assert_eq!("0\n1\n2\n100\n", output(include_str!("../demos/countdown.wl")));
}

#[test]
fn division_by_zero_is_contained() {
    let outcome = run(include_str!("../demos/fault.wl"));

    assert_eq!("99\n", String::from_utf8(outcome.output).unwrap());
    assert_eq!(1, outcome.runtime_errors);
}

#[test]
fn modulo_by_zero_is_contained() {
    let outcome = run("x = 7 % 0; out x; out 1;");

    assert_eq!("0\n1\n", String::from_utf8(outcome.output).unwrap());
    assert_eq!(1, outcome.runtime_errors);
}

#[test]
fn collatz() {
    assert_eq!("111\n", output(include_str!("../demos/collatz.wl")));
}

#[test]
fn gcd_uses_truthy_loop_condition() {
    assert_eq!("21\n", output(include_str!("../demos/gcd.wl")));
}

#[test]
fn truncating_division_and_remainder() {
    assert_eq!("-3\n-1\n3\n1\n", output("out -7 / 2; out -7 % 2; out 7 / 2; out 7 % -2;"));
}

#[test]
fn unset_variables_read_as_zero() {
    let outcome = run("out ghost; when (ghost) out 1; else out 2;");

    assert_eq!("0\n2\n", String::from_utf8(outcome.output).unwrap());
    assert!(outcome.symbols.exists("ghost"));
}

#[test]
fn then_only_conditional_with_false_condition() {
    let outcome = run("when (1 > 2) { x = 5; out x; }");

    assert_eq!("", String::from_utf8(outcome.output).unwrap());
    assert!(!outcome.symbols.exists("x"));
}

#[test]
fn loop_with_initially_false_condition() {
    assert_eq!("", output("loop (0) { out 1; }"));
}

#[test]
fn boolean_operators() {
    assert_eq!("1\n2\n3\n", output("
        a = 1; b = 0;
        when (a and not b) out 1;
        when (b or a = 1) out 2;
        when (!(a && b) || b) out 3;
    "));
}

#[test]
fn failing_iteration_does_not_stop_the_loop() {
    let outcome = run("
        loop (i < 4) {
            i = i + 1;
            out 12 / (i - 2);
        }
        out i;
    ");

    assert_eq!("-12\n12\n6\n4\n", String::from_utf8(outcome.output).unwrap());
    assert_eq!(1, outcome.runtime_errors);
}

#[test]
fn syntax_errors_prevent_execution() {
    let result = interpret("out 1; out (2;", Path::new("broken.wl"), Vec::new());

    match result {
        Err(Error::Syntax { count, .. }) => assert_eq!(1, count),
        Err(err) => panic!("expected syntax error, got {}", err),
        Ok(outcome) => panic!("expected syntax error, program printed {:?}", outcome.output),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let config = Config { input: "does/not/exist.wl".into(), print_ast: false, verbose: false };

    match when_lang::run(&config) {
        Err(err @ Error::Io { .. }) => assert!(err.to_string().starts_with("Could not open file does/not/exist.wl")),
        Err(err) => panic!("expected io error, got {}", err),
        Ok(()) => panic!("expected io error, program ran"),
    }
}

#[test]
fn overlong_expression_is_a_syntax_error() {
    let source = format!("out 0{};", " + 1".repeat(200_000));

    match interpret(&source, Path::new("long.wl"), Vec::new()) {
        Err(Error::Syntax { count, .. }) => assert_eq!(1, count),
        Err(err) => panic!("expected syntax error, got {}", err),
        Ok(outcome) => panic!("expected syntax error, program printed {:?}", outcome.output),
    }
}

#[test]
fn long_expression_within_limits_runs() {
    assert_eq!("400\n", output(&format!("out 0{};", " + 1".repeat(400))));
}
