use std::path::{Path, PathBuf};
use crate::interpreter::ast::{ArithmeticOperator, ComparisonOperator, Node};
use crate::interpreter::lexer::{Lexer, LexerError, Token, TokenPos, TokenType};


// Past either limit the parse is abandoned; deeper trees would exhaust the stack
// of the recursive evaluator, `Display` and `Drop`.
pub const MAX_NESTING: usize = 128;
pub const MAX_OPERATORS: usize = 512;

/// Recursive-descent parser producing a single [`Node::Sequence`] for a whole program.
///
/// Expressions and conditions share one precedence ladder: an arithmetic result used where a
/// condition is expected is wrapped in [`Node::Bool`], and a condition used where an integer
/// is expected is a syntax error. After any error the returned tree must not be executed.
///
/// Statements, parenthesized groups and prefix operators may nest at most [`MAX_NESTING`]
/// levels, and one expression or condition may hold at most [`MAX_OPERATORS`] operators.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    previous: Token, current: Token,

    path: PathBuf,

    depth: usize,
    operators: usize,

    error_count: usize,
    panic_mode: bool,
    aborted: bool,
}

impl<'source> Parser<'source> {
    pub fn new(lexer: Lexer<'source>, path: PathBuf) -> Parser<'source> {
        Parser {
            lexer,
            path,
            previous: Token::empty(), current: Token::empty(),
            depth: 0, operators: 0,
            error_count: 0, panic_mode: false, aborted: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    // Statement parsing

    pub fn parse(&mut self) -> Node {
        self.consume();

        let mut statements = Vec::new();

        while !self.is_eof() {
            statements.push(self.parse_declaration());
        }

        Node::Sequence(statements)
    }

    fn parse_declaration(&mut self) -> Node {
        let stmt = self.parse_statement();

        if self.panic_mode {
            self.synchronize();
        }

        stmt
    }

    fn parse_statement(&mut self) -> Node {
        if !self.enter() {
            return Node::Sequence(vec![]);
        }

        let stmt = self.parse_statement_kind();
        self.depth -= 1;

        stmt
    }

    fn parse_statement_kind(&mut self) -> Node {
        if self.matches(TokenType::When) {
            return self.parse_when_statement();
        } else if self.matches(TokenType::Loop) {
            return self.parse_loop_statement();
        } else if self.matches(TokenType::Out) {
            return self.parse_out_statement();
        } else if self.matches(TokenType::BracketLeft) {
            return self.parse_block();
        } else if self.matches(TokenType::Identifier) {
            return self.parse_assignment();
        }

        self.consume();
        self.error("Expected statement", true);
        Node::Sequence(vec![])
    }

    fn parse_assignment(&mut self) -> Node {
        let name = self.previous.clone();
        self.expect(TokenType::Assign, "Expected '=' after variable name");

        let value = self.parse_expression();
        self.expect_statement_end();

        Node::assign(name.source(), value)
    }

    fn parse_out_statement(&mut self) -> Node {
        let expr = self.parse_expression();
        self.expect_statement_end();

        Node::out(expr)
    }

    fn parse_when_statement(&mut self) -> Node {
        self.expect(TokenType::ParenthesisLeft, "Expected '(' after 'when'");
        let condition = self.parse_condition();
        self.expect(TokenType::ParenthesisRight, "Expected ')' after 'when' condition");

        let then = self.parse_statement();

        let otherwise = if self.matches(TokenType::Else) {
            Some(self.parse_statement())
        } else {
            None
        };

        Node::when(condition, then, otherwise)
    }

    fn parse_loop_statement(&mut self) -> Node {
        self.expect(TokenType::ParenthesisLeft, "Expected '(' after 'loop'");
        let condition = self.parse_condition();
        self.expect(TokenType::ParenthesisRight, "Expected ')' after 'loop' condition");

        let body = self.parse_statement();
        Node::looping(condition, body)
    }

    fn parse_block(&mut self) -> Node {
        let mut statements = Vec::new();

        while !self.check(TokenType::BracketRight) && !self.is_eof() {
            statements.push(self.parse_declaration());
        }

        self.expect(TokenType::BracketRight, "Expected '}' after statements in block");
        Node::Sequence(statements)
    }

    // Expression parsing

    fn parse_expression(&mut self) -> Node {
        self.operators = 0;
        let node = self.parse_or();

        if is_condition(&node) {
            self.error("Expected expression, found condition", true);
        }

        node
    }

    fn parse_condition(&mut self) -> Node {
        self.operators = 0;
        let node = self.parse_or();
        into_condition(node)
    }

    fn parse_or(&mut self) -> Node {
        if !self.enter() {
            return Node::number(0);
        }

        let mut node = self.parse_and();

        while self.matches(TokenType::Or) {
            if !self.count_operator() {
                break;
            }

            let right = self.parse_and();
            node = Node::or(into_condition(node), into_condition(right));
        }

        self.depth -= 1;
        node
    }

    fn parse_and(&mut self) -> Node {
        let mut node = self.parse_not();

        while self.matches(TokenType::And) {
            if !self.count_operator() {
                break;
            }

            let right = self.parse_not();
            node = Node::and(into_condition(node), into_condition(right));
        }

        node
    }

    fn parse_not(&mut self) -> Node {
        if self.matches(TokenType::Not) {
            if !self.count_operator() || !self.enter() {
                return Node::number(0);
            }

            let operand = self.parse_not();
            self.depth -= 1;

            return Node::not(into_condition(operand));
        }

        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Node {
        let left = self.parse_term();

        let operator = match self.current.token_type() {
            TokenType::Equal | TokenType::Assign => ComparisonOperator::Equal,
            TokenType::Less => ComparisonOperator::Less,
            TokenType::Greater => ComparisonOperator::Greater,
            TokenType::LessEqual => ComparisonOperator::LessEqual,
            TokenType::GreaterEqual => ComparisonOperator::GreaterEqual,
            _ => return left,
        };

        self.consume();

        if !self.count_operator() {
            return left;
        }

        let left = self.arithmetic_operand(left);
        let right = self.parse_term();
        let right = self.arithmetic_operand(right);

        Node::comparison(operator, left, right)
    }

    fn parse_term(&mut self) -> Node {
        let mut node = self.parse_factor();

        loop {
            let operator = match self.current.token_type() {
                TokenType::Plus => ArithmeticOperator::Add,
                TokenType::Minus => ArithmeticOperator::Subtract,
                _ => return node,
            };

            self.consume();

            if !self.count_operator() {
                return node;
            }

            let left = self.arithmetic_operand(node);
            let right = self.parse_factor();
            let right = self.arithmetic_operand(right);

            node = Node::arithmetic(operator, left, right);
        }
    }

    fn parse_factor(&mut self) -> Node {
        let mut node = self.parse_unary();

        loop {
            let operator = match self.current.token_type() {
                TokenType::Multiply => ArithmeticOperator::Multiply,
                TokenType::Divide => ArithmeticOperator::Divide,
                TokenType::Modulo => ArithmeticOperator::Modulo,
                _ => return node,
            };

            self.consume();

            if !self.count_operator() {
                return node;
            }

            let left = self.arithmetic_operand(node);
            let right = self.parse_unary();
            let right = self.arithmetic_operand(right);

            node = Node::arithmetic(operator, left, right);
        }
    }

    fn parse_unary(&mut self) -> Node {
        if self.matches(TokenType::Minus) {
            if !self.count_operator() || !self.enter() {
                return Node::number(0);
            }

            let operand = self.parse_unary();
            self.depth -= 1;
            let operand = self.arithmetic_operand(operand);

            return Node::negate(operand);
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Node {
        if self.matches(TokenType::Int) {
            let number = self.previous.clone();
            let parsed: Result<i32, _> = number.source().parse();

            return match parsed {
                Ok(number) => Node::number(number),
                Err(err) => {
                    self.error(&format!("Failed to parse int literal: {}", err), true);
                    Node::number(0)
                },
            }
        } else if self.matches(TokenType::Identifier) {
            return Node::variable(self.previous.source());
        } else if self.matches(TokenType::ParenthesisLeft) {
            let node = self.parse_or();
            self.expect(TokenType::ParenthesisRight, "Expected ')' after expression");

            return node;
        }

        self.consume();
        self.error("Expected expression", true);

        Node::number(0)
    }

    fn arithmetic_operand(&mut self, node: Node) -> Node {
        if is_condition(&node) {
            self.error("Expected integer operand, found condition", true);
        }

        node
    }

    fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            self.abort(&format!("Nesting deeper than {} levels", MAX_NESTING));
            return false;
        }

        self.depth += 1;
        true
    }

    fn count_operator(&mut self) -> bool {
        self.operators += 1;

        if self.operators > MAX_OPERATORS {
            self.abort(&format!("More than {} operators in one expression", MAX_OPERATORS));
            return false;
        }

        true
    }

    fn consume(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current); // self.previous = self.current; self.current gets replaced below

        loop {
            match self.lexer.scan_token() {
                Ok(token) => {
                    self.current = token;
                    break;
                },
                Err(LexerError::UnexpectedEof) => {
                    self.current = Token::new(TokenType::Eof, String::new(), TokenPos::begin(), TokenPos::begin());
                    break
                },

                Err(err) => self.error_from_lexer(&err),
            }
        }
    }

    fn expect(&mut self, token_type: TokenType, message: &str) {
        if self.current.token_type() == token_type {
            self.consume();
            return;
        }

        self.error_at_current(message, true);
    }

    #[inline]
    fn expect_statement_end(&mut self) {
        self.expect(TokenType::Semicolon, "Expected ';' after statement");
    }

    fn matches(&mut self, token_type: TokenType) -> bool { // Should be called "match", but that's a keyword
        if !self.check(token_type) {
            return false;
        }

        self.consume();
        true
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type() == token_type
    }

    fn is_eof(&self) -> bool {
        self.current.token_type() == TokenType::Eof
    }

    // Error handling

    fn synchronize(&mut self) {
        // Stays in panic mode, nothing after the abort point is reported
        if self.aborted {
            return;
        }

        self.panic_mode = false;

        while self.current.token_type() != TokenType::Eof {
            if self.previous.token_type() == TokenType::Semicolon {
                return;
            }

            match self.current.token_type() {
                TokenType::When => return,
                TokenType::Loop => return,
                TokenType::Out => return,
                TokenType::BracketLeft => return,
                // A stray '}' outside any block belongs to the broken statement
                TokenType::BracketRight if self.depth > 0 => return,
                _ => {},
            };

            self.consume();
        }
    }

    fn abort(&mut self, message: &str) {
        self.error_at_current(message, true);
        self.aborted = true;

        while !self.is_eof() {
            self.consume();
        }
    }

    fn error_at_current(&mut self, message: &str, panic: bool) {
        Self::error_at_impl(&self.path, &mut self.error_count, &mut self.panic_mode, Some(&self.current), message, panic);
    }

    fn error(&mut self, message: &str, panic: bool) {
        Self::error_at_impl(&self.path, &mut self.error_count, &mut self.panic_mode, Some(&self.previous), message, panic);
    }

    fn error_from_lexer(&mut self, error: &LexerError) {
        if self.panic_mode {
            return;
        }

        self.panic_mode = true;
        self.error_count += 1;
        eprintln!("{}", format_error(&self.path, None, error.get_pos(), &error.to_string()));
    }

    fn error_at_impl(path: &Path, error_count: &mut usize, panic_mode: &mut bool, token: Option<&Token>, message: &str, panic: bool) {
        if *panic_mode {
            return;
        } else if panic {
            *panic_mode = true;
        }

        eprintln!("{}", format_error(path, token, None, message));
        *error_count += 1;
    }
}

/// `[<path>:<line>:<column>] Error at '<token>': <message>`, located at `token` or else `pos`.
fn format_error(path: &Path, token: Option<&Token>, pos: Option<TokenPos>, message: &str) -> String {
    let mut text = match token.map(|token| *token.start()).or(pos) {
        Some(pos) => format!("[{}:{}:{}] Error", path.to_string_lossy(), pos.line, pos.column),
        None => String::from("Error"),
    };

    match token {
        Some(token) if token.token_type() == TokenType::Eof => text.push_str(" at EOF"),
        Some(token) => text.push_str(&format!(" at {}", token)),
        None => {},
    }

    text.push_str(": ");
    text.push_str(message);
    text
}

fn is_condition(node: &Node) -> bool {
    matches!(node, Node::Comparison { .. } | Node::And(..) | Node::Or(..) | Node::Not(_) | Node::Bool(_))
}

fn into_condition(node: Node) -> Node {
    if is_condition(&node) {
        node
    } else {
        Node::coerce(node)
    }
}
