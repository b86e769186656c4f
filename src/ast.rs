use crate::builtins::Function;
use crate::error::Span;

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign {
        target: Target,
        value: Expr,
        span: Span,
    },
    /// A `{ ... }` block with no header; runs its body once.
    Block {
        statements: Vec<Stmt>,
        span: Span,
    },
    /// A whole `if` / `elif` / `else` chain. The first branch whose
    /// condition holds runs; later conditions are not evaluated.
    If {
        branches: Vec<Branch>,
        else_branch: Option<Vec<Stmt>>,
        span: Span,
    },
    While {
        condition: Condition,
        body: Vec<Stmt>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Assign { span, .. } => span,
            Stmt::Block { span, .. } => span,
            Stmt::If { span, .. } => span,
            Stmt::While { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Branch {
    pub condition: Condition,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Target {
    Variable { name: String, span: Span },
    Element { name: String, index: Expr, span: Span },
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number {
        value: f32,
        span: Span,
    },
    Variable {
        name: String,
        span: Span,
    },
    Element {
        name: String,
        index: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    Negate {
        operand: Box<Expr>,
        span: Span,
    },
    Call {
        function: Function,
        argument: Box<Expr>,
        span: Span,
    },
    Grouping {
        expr: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Number { span, .. } => span,
            Expr::Variable { span, .. } => span,
            Expr::Element { span, .. } => span,
            Expr::Binary { span, .. } => span,
            Expr::Negate { span, .. } => span,
            Expr::Call { span, .. } => span,
            Expr::Grouping { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, Clone)]
pub enum Condition {
    Compare {
        left: Expr,
        operator: CompareOp,
        right: Expr,
        span: Span,
    },
    /// Both sides are always evaluated; there is no short-circuiting.
    Logical {
        left: Box<Condition>,
        operator: LogicalOp,
        right: Box<Condition>,
        span: Span,
    },
}

impl Condition {
    pub fn span(&self) -> &Span {
        match self {
            Condition::Compare { span, .. } => span,
            Condition::Logical { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Less,
    Greater,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}
