use std::io::Write;
use crate::interpreter::ast::Node;
use crate::interpreter::error::{RuntimeError, RuntimeResult};
use crate::interpreter::evaluator::{evaluate_condition, evaluate_expression};
use crate::interpreter::symbol_table::SymbolTable;

#[cfg(test)]
mod tests;

/// Walks statement trees, writing `out` values to `output`.
///
/// Every statement runs behind its own failure boundary: a failing statement is reported
/// on stderr and abandoned, and execution carries on with whatever follows it.
pub struct Executor<W: Write> {
    output: W,
    error_count: usize,
}

impl<W: Write> Executor<W> {
    pub fn new(output: W) -> Executor<W> {
        Executor {
            output,
            error_count: 0,
        }
    }

    pub fn run(&mut self, root: Option<&Node>, symbols: &mut SymbolTable) {
        tracing::debug!("executing program");
        self.execute_contained(root, symbols);

        if let Err(err) = self.output.flush() {
            self.report(&RuntimeError::Output(err));
        }

        tracing::debug!(errors = self.error_count, variables = symbols.len(), "program finished");
    }

    /// Executes one statement, reporting and swallowing its failure.
    pub fn execute_contained(&mut self, node: Option<&Node>, symbols: &mut SymbolTable) {
        if let Err(err) = self.execute(node, symbols) {
            if let Some(node) = node {
                tracing::debug!(statement = %node.kind(), "statement abandoned");
            }

            self.report(&err);
        }
    }

    /// Executes one statement. The returned error belongs to this statement only;
    /// failures inside nested statements have already been reported.
    pub fn execute(&mut self, node: Option<&Node>, symbols: &mut SymbolTable) -> RuntimeResult<()> {
        let node = match node {
            Some(node) => node,
            None => return Ok(()),
        };

        tracing::trace!(statement = %node.kind(), "execute");

        match node {
            Node::Sequence(statements) => {
                for stmt in statements {
                    self.execute_contained(Some(stmt), symbols);
                }
            },
            Node::Assign { target, value } => {
                let value = evaluate_expression(Some(value.as_ref()), symbols)?;
                symbols.write(target, value);
            },
            Node::When { condition, then, otherwise } => {
                if evaluate_condition(Some(condition.as_ref()), symbols)? {
                    self.execute_contained(Some(then.as_ref()), symbols);
                } else {
                    self.execute_contained(otherwise.as_deref(), symbols);
                }
            },
            Node::Loop { condition, body } => {
                while evaluate_condition(Some(condition.as_ref()), symbols)? {
                    self.execute_contained(Some(body.as_ref()), symbols);
                }
            },
            Node::Out(expr) => {
                let value = evaluate_expression(Some(expr.as_ref()), symbols)?;
                writeln!(self.output, "{}", value)?;
                self.output.flush()?;
            },
            _ => return Err(RuntimeError::UnknownStatementType(node.kind())),
        }

        Ok(())
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn had_error(&self) -> bool {
        self.error_count > 0
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn report(&mut self, error: &RuntimeError) {
        eprintln!("Error: {}", error);
        self.error_count += 1;
    }
}
