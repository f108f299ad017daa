use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Display for ArithmeticOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticOperator::Add => write!(f, "+"),
            ArithmeticOperator::Subtract => write!(f, "-"),
            ArithmeticOperator::Multiply => write!(f, "*"),
            ArithmeticOperator::Divide => write!(f, "/"),
            ArithmeticOperator::Modulo => write!(f, "%"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl ComparisonOperator {
    pub fn compare(self, left: i32, right: i32) -> bool {
        match self {
            ComparisonOperator::Equal => left == right,
            ComparisonOperator::Less => left < right,
            ComparisonOperator::Greater => left > right,
            ComparisonOperator::LessEqual => left <= right,
            ComparisonOperator::GreaterEqual => left >= right,
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonOperator::Equal => write!(f, "="),
            ComparisonOperator::Less => write!(f, "<"),
            ComparisonOperator::Greater => write!(f, ">"),
            ComparisonOperator::LessEqual => write!(f, "<="),
            ComparisonOperator::GreaterEqual => write!(f, ">="),
        }
    }
}

/// Bare discriminant of a [`Node`], without payload or children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Number,
    Variable,
    Arithmetic(ArithmeticOperator),
    Negate,
    Comparison(ComparisonOperator),
    And,
    Or,
    Not,
    Bool,
    Assign,
    When,
    Loop,
    Out,
    Sequence,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Number => write!(f, "number"),
            NodeKind::Variable => write!(f, "variable"),
            NodeKind::Arithmetic(operator) => write!(f, "'{}'", operator),
            NodeKind::Negate => write!(f, "negation"),
            NodeKind::Comparison(operator) => write!(f, "'{}'", operator),
            NodeKind::And => write!(f, "and"),
            NodeKind::Or => write!(f, "or"),
            NodeKind::Not => write!(f, "not"),
            NodeKind::Bool => write!(f, "boolean coercion"),
            NodeKind::Assign => write!(f, "assignment"),
            NodeKind::When => write!(f, "when"),
            NodeKind::Loop => write!(f, "loop"),
            NodeKind::Out => write!(f, "out"),
            NodeKind::Sequence => write!(f, "statement list"),
        }
    }
}

/// One syntactic construct. Every variant owns exactly the children its tag needs,
/// so a tree is always well-formed with respect to arity.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number(i32),
    Variable(String),

    Arithmetic {
        operator: ArithmeticOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    Negate(Box<Node>),

    Comparison {
        operator: ComparisonOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Not(Box<Node>),
    /// Nonzero-is-true bridge from an expression to a condition.
    Bool(Box<Node>),

    Assign {
        target: String,
        value: Box<Node>,
    },
    When {
        condition: Box<Node>,
        then: Box<Node>,
        otherwise: Option<Box<Node>>,
    },
    Loop {
        condition: Box<Node>,
        body: Box<Node>,
    },
    Out(Box<Node>),
    Sequence(Vec<Node>),
}

impl Node {
    pub fn number(value: i32) -> Node {
        Node::Number(value)
    }

    pub fn variable(name: impl Into<String>) -> Node {
        Node::Variable(name.into())
    }

    pub fn arithmetic(operator: ArithmeticOperator, left: Node, right: Node) -> Node {
        Node::Arithmetic { operator, left: Box::new(left), right: Box::new(right) }
    }

    pub fn negate(operand: Node) -> Node {
        Node::Negate(Box::new(operand))
    }

    pub fn comparison(operator: ComparisonOperator, left: Node, right: Node) -> Node {
        Node::Comparison { operator, left: Box::new(left), right: Box::new(right) }
    }

    pub fn and(left: Node, right: Node) -> Node {
        Node::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Node, right: Node) -> Node {
        Node::Or(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Node) -> Node {
        Node::Not(Box::new(operand))
    }

    pub fn coerce(expression: Node) -> Node {
        Node::Bool(Box::new(expression))
    }

    pub fn assign(target: impl Into<String>, value: Node) -> Node {
        Node::Assign { target: target.into(), value: Box::new(value) }
    }

    pub fn when(condition: Node, then: Node, otherwise: Option<Node>) -> Node {
        Node::When { condition: Box::new(condition), then: Box::new(then), otherwise: otherwise.map(Box::new) }
    }

    pub fn looping(condition: Node, body: Node) -> Node {
        Node::Loop { condition: Box::new(condition), body: Box::new(body) }
    }

    pub fn out(expression: Node) -> Node {
        Node::Out(Box::new(expression))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number(_) => NodeKind::Number,
            Node::Variable(_) => NodeKind::Variable,
            Node::Arithmetic { operator, .. } => NodeKind::Arithmetic(*operator),
            Node::Negate(_) => NodeKind::Negate,
            Node::Comparison { operator, .. } => NodeKind::Comparison(*operator),
            Node::And(..) => NodeKind::And,
            Node::Or(..) => NodeKind::Or,
            Node::Not(_) => NodeKind::Not,
            Node::Bool(_) => NodeKind::Bool,
            Node::Assign { .. } => NodeKind::Assign,
            Node::When { .. } => NodeKind::When,
            Node::Loop { .. } => NodeKind::Loop,
            Node::Out(_) => NodeKind::Out,
            Node::Sequence(_) => NodeKind::Sequence,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),
            Node::Variable(name) => write!(f, "{}", name),
            Node::Arithmetic { operator, left, right } => write!(f, "({} {} {})", operator, left, right),
            Node::Negate(operand) => write!(f, "(- {})", operand),
            Node::Comparison { operator, left, right } => write!(f, "({} {} {})", operator, left, right),
            Node::And(left, right) => write!(f, "(and {} {})", left, right),
            Node::Or(left, right) => write!(f, "(or {} {})", left, right),
            Node::Not(operand) => write!(f, "(not {})", operand),
            Node::Bool(expression) => write!(f, "(bool {})", expression),
            Node::Assign { target, value } => write!(f, "(= {} {})", target, value),
            Node::When { condition, then, otherwise } => match otherwise {
                Some(otherwise) => write!(f, "(when {} {} {})", condition, then, otherwise),
                None => write!(f, "(when {} {})", condition, then),
            },
            Node::Loop { condition, body } => write!(f, "(loop {} {})", condition, body),
            Node::Out(expression) => write!(f, "(out {})", expression),
            Node::Sequence(statements) => {
                write!(f, "{{")?;

                for stmt in statements {
                    write!(f, " {}", stmt)?;
                }

                if !statements.is_empty() {
                    write!(f, " ")?;
                }

                write!(f, "}}")
            },
        }
    }
}
