use super::*;
use pretty_assertions::assert_eq;
use crate::interpreter::ast::{ArithmeticOperator, ComparisonOperator, NodeKind};

fn execute(program: &Node) -> (String, usize, SymbolTable) {
    let mut symbols = SymbolTable::new();
    let mut executor = Executor::new(Vec::new());
    executor.run(Some(program), &mut symbols);

    let error_count = executor.error_count();
    let output = String::from_utf8(executor.into_output()).unwrap();
    (output, error_count, symbols)
}

fn less(name: &str, bound: i32) -> Node {
    Node::comparison(ComparisonOperator::Less, Node::variable(name), Node::number(bound))
}

fn increment(name: &str) -> Node {
    Node::assign(name, Node::arithmetic(ArithmeticOperator::Add, Node::variable(name), Node::number(1)))
}

fn divide_by_zero() -> Node {
    Node::arithmetic(ArithmeticOperator::Divide, Node::number(10), Node::number(0))
}

#[test]
fn absent_root_is_a_no_op() {
    let mut symbols = SymbolTable::new();
    let mut executor = Executor::new(Vec::new());
    executor.run(None, &mut symbols);

    assert!(!executor.had_error());
    assert!(executor.into_output().is_empty());
    assert!(symbols.is_empty());
}

#[test]
fn assignment_then_output() {
    let program = Node::Sequence(vec![
        Node::assign("x", Node::number(5)),
        Node::assign("y", Node::arithmetic(ArithmeticOperator::Add, Node::variable("x"), Node::number(3))),
        Node::out(Node::variable("y")),
    ]);

    let (output, errors, mut symbols) = execute(&program);
    assert_eq!("8\n", output);
    assert_eq!(0, errors);
    assert_eq!(5, symbols.read("x"));
}

#[test]
fn when_takes_the_matching_branch() {
    let program = |start: i32| Node::Sequence(vec![
        Node::assign("x", Node::number(start)),
        Node::when(less("x", 1), Node::out(Node::number(1)), Some(Node::out(Node::number(2)))),
    ]);

    assert_eq!("1\n", execute(&program(0)).0);
    assert_eq!("2\n", execute(&program(1)).0);
}

#[test]
fn when_without_else_does_nothing_on_false() {
    let program = Node::when(less("x", 0), Node::assign("y", Node::number(1)), None);

    let (output, errors, symbols) = execute(&program);
    assert_eq!("", output);
    assert_eq!(0, errors);
    assert!(!symbols.exists("y"));
}

#[test]
fn loop_counts() {
    let program = Node::Sequence(vec![
        Node::assign("i", Node::number(0)),
        Node::looping(less("i", 3), Node::Sequence(vec![
            Node::out(Node::variable("i")),
            increment("i"),
        ])),
    ]);

    assert_eq!("0\n1\n2\n", execute(&program).0);
}

#[test]
fn loop_with_false_condition_never_runs() {
    let program = Node::looping(Node::coerce(Node::number(0)), Node::out(Node::number(7)));

    assert_eq!("", execute(&program).0);
}

#[test]
fn failing_statement_does_not_stop_siblings() {
    let program = Node::Sequence(vec![
        Node::out(divide_by_zero()),
        Node::out(Node::number(99)),
    ]);

    let (output, errors, _) = execute(&program);
    assert_eq!("99\n", output);
    assert_eq!(1, errors);
}

#[test]
fn failed_assignment_leaves_target_untouched() {
    let program = Node::Sequence(vec![
        Node::assign("x", Node::number(4)),
        Node::assign("x", divide_by_zero()),
        Node::out(Node::variable("x")),
    ]);

    assert_eq!("4\n", execute(&program).0);
}

#[test]
fn failing_body_statement_does_not_stop_the_loop() {
    let program = Node::Sequence(vec![
        Node::looping(less("i", 3), Node::Sequence(vec![
            increment("i"),
            Node::out(Node::arithmetic(ArithmeticOperator::Modulo, Node::variable("i"), Node::number(0))),
        ])),
        Node::out(Node::variable("i")),
    ]);

    let (output, errors, _) = execute(&program);
    assert_eq!("3\n", output);
    assert_eq!(3, errors);
}

#[test]
fn failing_loop_condition_ends_the_loop() {
    let program = Node::Sequence(vec![
        Node::looping(Node::coerce(divide_by_zero()), Node::out(Node::number(1))),
        Node::out(Node::number(2)),
    ]);

    let (output, errors, _) = execute(&program);
    assert_eq!("2\n", output);
    assert_eq!(1, errors);
}

#[test]
fn unknown_statement_is_reported() {
    let mut symbols = SymbolTable::new();
    let mut executor = Executor::new(Vec::new());

    let result = executor.execute(Some(&Node::number(3)), &mut symbols);
    assert!(matches!(result, Err(RuntimeError::UnknownStatementType(NodeKind::Number))));

    let program = Node::Sequence(vec![Node::variable("x"), Node::out(Node::number(1))]);
    executor.run(Some(&program), &mut symbols);

    assert_eq!(1, executor.error_count());
    assert_eq!("1\n", String::from_utf8(executor.into_output()).unwrap());
}

#[test]
fn nested_failure_is_reported_once() {
    let program = Node::when(
        Node::coerce(Node::number(1)),
        Node::Sequence(vec![Node::out(divide_by_zero()), Node::out(Node::number(5))]),
        None,
    );

    let (output, errors, _) = execute(&program);
    assert_eq!("5\n", output);
    assert_eq!(1, errors);
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[test]
fn output_failures_are_contained() {
    let program = Node::Sequence(vec![
        Node::out(Node::number(1)),
        Node::assign("x", Node::number(5)),
        Node::out(Node::number(2)),
    ]);

    let mut symbols = SymbolTable::new();
    let mut executor = Executor::new(BrokenPipe);
    executor.run(Some(&program), &mut symbols);

    // One per failed `out`, plus the final flush
    assert_eq!(3, executor.error_count());
    assert_eq!(5, symbols.read("x"));
}

#[test]
fn output_failure_is_an_output_error() {
    let mut symbols = SymbolTable::new();
    let mut executor = Executor::new(BrokenPipe);

    match executor.execute(Some(&Node::out(Node::number(1))), &mut symbols) {
        Err(RuntimeError::Output(err)) => assert_eq!(std::io::ErrorKind::BrokenPipe, err.kind()),
        other => panic!("expected output error, got {:?}", other),
    }
}
