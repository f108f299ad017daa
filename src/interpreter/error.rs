use thiserror::Error;
use crate::interpreter::ast::NodeKind;

/// Failures raised while evaluating or executing a single statement.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Unknown expression type: {0}")]
    UnknownExpressionType(NodeKind),
    #[error("Unknown condition type: {0}")]
    UnknownConditionType(NodeKind),
    #[error("Unknown statement type: {0}")]
    UnknownStatementType(NodeKind),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
