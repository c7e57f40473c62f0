use std::fmt;

use crate::token::SourceLocation;

/// A parsed source unit: an ordered sequence of function declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub functions: Vec<Function>,
}

/// Function declaration: `def` prototype plus body block.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub prototype: Prototype,
    /// Ordered expression list of the body block.
    pub body: Vec<Expr>,
}

/// Function name and parameter names.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
    pub location: SourceLocation,
}

/// Expression node. Every child slot is exclusively owned; the tree is
/// acyclic by construction and nodes never point back at their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: SourceLocation,
}

/// The closed set of expression and declaration variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal.
    Number(f64),
    /// Reference to a named value.
    Variable(String),
    /// `var` declaration. A missing annotation means the type is
    /// inferred downstream.
    VarDecl {
        name: String,
        ty: Option<VarType>,
        init: Box<Expr>,
    },
    /// Call to a named function with arbitrary arity.
    Call { callee: String, args: Vec<Expr> },
    /// Built-in `print` with exactly one argument.
    Print(Box<Expr>),
    /// Binary operation, carrying its operator character.
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `return` with an optional value.
    Return(Option<Box<Expr>>),
}

/// Bracketed type annotation: a named type (`<Number>`) or a shape list
/// (`<2, 3>`). An empty annotation (`<>`) constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarType {
    pub name: Option<String>,
    pub shape: Vec<i64>,
}

impl Expr {
    #[must_use]
    pub const fn new(kind: ExprKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Bracketed rendering: `<Number>`, `<2, 3>`, or `<>`.
impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        let mut first = true;
        if let Some(name) = &self.name {
            write!(f, "{name}")?;
            first = false;
        }
        for dim in &self.shape {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
            first = false;
        }
        write!(f, ">")
    }
}
