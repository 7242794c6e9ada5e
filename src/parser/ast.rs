//! Abstract Syntax Tree definitions for the tutor language
//!
//! All AST nodes include:
//! - Unique node ID
//! - Source span
//! - Node-specific data
//!
//! The tutor language is statement-oriented: function bodies are statement
//! lists and values leave a function only through `return`. That shape is
//! what the structural analyser inspects (declarations, argument counts,
//! reachable return statements).

use crate::diagnostics::Span;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Generate a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete tutor-language program: a flat list of top-level statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: NodeId,
    pub span: Span,
    pub body: Vec<Stmt>,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FnDef {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    /// Function definition (top-level or nested)
    Fn(FnDef),
    /// Let binding
    Let {
        id: NodeId,
        span: Span,
        name: String,
        value: Box<Expr>,
    },
    /// Assignment to an existing binding
    Assign {
        id: NodeId,
        span: Span,
        target: String,
        value: Box<Expr>,
    },
    /// Expression statement
    Expr {
        id: NodeId,
        span: Span,
        expr: Box<Expr>,
    },
    /// Return statement
    Return {
        id: NodeId,
        span: Span,
        value: Option<Box<Expr>>,
    },
    /// If statement with optional else branch
    If {
        id: NodeId,
        span: Span,
        cond: Box<Expr>,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    /// While loop
    While {
        id: NodeId,
        span: Span,
        cond: Box<Expr>,
        body: Vec<Stmt>,
    },
    /// For-in loop over a list or range
    For {
        id: NodeId,
        span: Span,
        binding: String,
        iter: Box<Expr>,
        body: Vec<Stmt>,
    },
    /// Break out of the innermost loop
    Break { id: NodeId, span: Span },
    /// Continue the innermost loop
    Continue { id: NodeId, span: Span },
}

impl Stmt {
    /// Get the span of a statement
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Fn(def) => &def.span,
            Stmt::Let { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::For { span, .. }
            | Stmt::Break { span, .. }
            | Stmt::Continue { span, .. } => span,
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    // Literals
    IntLit {
        id: NodeId,
        span: Span,
        value: i64,
    },
    BoolLit {
        id: NodeId,
        span: Span,
        value: bool,
    },
    StrLit {
        id: NodeId,
        span: Span,
        value: String,
    },
    ListLit {
        id: NodeId,
        span: Span,
        elements: Vec<Expr>,
    },

    // Identifiers
    Ident {
        id: NodeId,
        span: Span,
        name: String,
    },

    // Operations
    Binary {
        id: NodeId,
        span: Span,
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        id: NodeId,
        span: Span,
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Call {
        id: NodeId,
        span: Span,
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        id: NodeId,
        span: Span,
        target: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    /// Get the span of an expression
    pub fn span(&self) -> &Span {
        match self {
            Expr::IntLit { span, .. }
            | Expr::BoolLit { span, .. }
            | Expr::StrLit { span, .. }
            | Expr::ListLit { span, .. }
            | Expr::Ident { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Call { span, .. }
            | Expr::Index { span, .. } => span,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}
