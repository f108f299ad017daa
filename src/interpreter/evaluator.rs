use crate::interpreter::ast::{ArithmeticOperator, Node};
use crate::interpreter::error::{RuntimeError, RuntimeResult};
use crate::interpreter::symbol_table::SymbolTable;


/// Reduces an expression to an integer. An absent node is `0`.
pub fn evaluate_expression(node: Option<&Node>, symbols: &mut SymbolTable) -> RuntimeResult<i32> {
    match node {
        Some(node) => expression(node, symbols),
        None => Ok(0),
    }
}

/// Reduces a condition to a boolean. An absent node is `false`.
pub fn evaluate_condition(node: Option<&Node>, symbols: &mut SymbolTable) -> RuntimeResult<bool> {
    match node {
        Some(node) => condition(node, symbols),
        None => Ok(false),
    }
}

fn expression(node: &Node, symbols: &mut SymbolTable) -> RuntimeResult<i32> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Variable(name) => Ok(symbols.read(name)),
        Node::Arithmetic { operator, left, right } => {
            let left = expression(left, symbols)?;
            let right = expression(right, symbols)?;

            arithmetic(*operator, left, right)
        },
        Node::Negate(operand) => Ok(expression(operand, symbols)?.wrapping_neg()),
        _ => Err(RuntimeError::UnknownExpressionType(node.kind())),
    }
}

// Integers are 32-bit two's complement; overflow wraps.
fn arithmetic(operator: ArithmeticOperator, left: i32, right: i32) -> RuntimeResult<i32> {
    match operator {
        ArithmeticOperator::Add => Ok(left.wrapping_add(right)),
        ArithmeticOperator::Subtract => Ok(left.wrapping_sub(right)),
        ArithmeticOperator::Multiply => Ok(left.wrapping_mul(right)),
        ArithmeticOperator::Divide | ArithmeticOperator::Modulo if right == 0 => Err(RuntimeError::DivisionByZero),
        ArithmeticOperator::Divide => Ok(left.wrapping_div(right)),
        ArithmeticOperator::Modulo => Ok(left.wrapping_rem(right)),
    }
}

fn condition(node: &Node, symbols: &mut SymbolTable) -> RuntimeResult<bool> {
    match node {
        Node::Comparison { operator, left, right } => {
            let left = expression(left, symbols)?;
            let right = expression(right, symbols)?;

            Ok(operator.compare(left, right))
        },
        // Both sides are always evaluated, no short-circuiting
        Node::And(left, right) => {
            let left = condition(left, symbols)?;
            let right = condition(right, symbols)?;

            Ok(left && right)
        },
        Node::Or(left, right) => {
            let left = condition(left, symbols)?;
            let right = condition(right, symbols)?;

            Ok(left || right)
        },
        Node::Not(operand) => Ok(!condition(operand, symbols)?),
        Node::Bool(expr) => Ok(expression(expr, symbols)? != 0),
        _ => Err(RuntimeError::UnknownConditionType(node.kind())),
    }
}
