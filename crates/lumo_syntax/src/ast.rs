//! Abstract Syntax Tree definitions for Lua.
//!
//! The node shapes follow the Lua 5.2 reference grammar. Two departures worth knowing
//! about:
//! - `a.b` is kept as a dedicated [`Expr::Dot`] (rather than desugared to an indexed
//!   access with a string key) so downstream tooling keeps the field name span.
//! - [`Stat::Error`] / [`Expr::Error`] are marker nodes inserted during error
//!   recovery; a chunk containing them is still a well-formed tree.

use std::fmt;

use lumo_core::lang::operators::OperatorId;
use serde::Serialize;

/// Source location span (byte offsets, end-exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier spelling.
pub type Name = String;

/// A whole compilation unit (one Lua file).
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub block: Block,
}

/// A sequence of statements.
///
/// Lua constrains `return` to be the last statement of a block; the parser enforces
/// that, so a `Stat::Return` can only appear in the final position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stats: Vec<Spanned<Stat>>,
}

/// Statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat {
    /// `a, b.c = e1, e2`
    Assign {
        targets: Vec<Spanned<Expr>>,
        values: Vec<Spanned<Expr>>,
    },
    /// `local a, b = e1, e2` (values may be empty)
    Local {
        names: Vec<Spanned<Name>>,
        values: Vec<Spanned<Expr>>,
    },
    /// A call used as a statement. The inner expression is always
    /// [`Expr::Call`] or [`Expr::MethodCall`].
    Call(Spanned<Expr>),
    /// `do ... end`
    Do(Block),
    /// `while cond do ... end`
    While { cond: Spanned<Expr>, body: Block },
    /// `repeat ... until cond` — `cond` is scoped to the body (it can see body locals).
    Repeat { body: Block, cond: Spanned<Expr> },
    /// `if/elseif/else/end`
    If {
        arms: Vec<IfArm>,
        else_body: Option<Block>,
    },
    /// `for i = start, limit [, step] do ... end`
    NumericFor {
        var: Spanned<Name>,
        start: Spanned<Expr>,
        limit: Spanned<Expr>,
        step: Option<Spanned<Expr>>,
        body: Block,
    },
    /// `for a, b in exprs do ... end`
    GenericFor {
        names: Vec<Spanned<Name>>,
        exprs: Vec<Spanned<Expr>>,
        body: Block,
    },
    /// `function a.b.c:m() ... end`
    Function { name: FuncName, body: FuncBody },
    /// `local function f() ... end`
    LocalFunction { name: Spanned<Name>, body: FuncBody },
    /// `return [exprs]`
    Return(Vec<Spanned<Expr>>),
    Break,
    /// `goto label`
    Goto(Spanned<Name>),
    /// `::label::`
    Label(Spanned<Name>),
    /// Error-marker node covering a region the parser could not make sense of.
    Error,
}

/// One `if`/`elseif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct IfArm {
    pub cond: Spanned<Expr>,
    pub body: Block,
}

/// The name part of a `function` statement: `base.p1.p2:method`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncName {
    pub base: Spanned<Name>,
    pub path: Vec<Spanned<Name>>,
    pub method: Option<Spanned<Name>>,
}

impl FuncName {
    /// Span covering the whole dotted name.
    pub fn span(&self) -> Span {
        let mut span = self.base.span;
        if let Some(last) = self.path.last() {
            span = span.merge(last.span);
        }
        if let Some(method) = &self.method {
            span = span.merge(method.span);
        }
        span
    }

    /// `true` for `function t:m()` style declarations (implicit `self` parameter).
    pub fn is_method(&self) -> bool {
        self.method.is_some()
    }
}

impl fmt::Display for FuncName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.node)?;
        for part in &self.path {
            write!(f, ".{}", part.node)?;
        }
        if let Some(method) = &self.method {
            write!(f, ":{}", method.node)?;
        }
        Ok(())
    }
}

/// Parameter list and body of a function literal or declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncBody {
    pub params: Vec<Spanned<Name>>,
    pub is_vararg: bool,
    pub body: Block,
    /// Span from `function` to the matching `end`.
    pub span: Span,
}

/// Expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Nil,
    True,
    False,
    Int(i64),
    Float(f64),
    Str(String),
    /// `...`
    VarArg,
    /// `function(...) ... end`
    Function(FuncBody),
    /// Bare name reference.
    Name(Name),
    /// `object.field`
    Dot {
        object: Box<Spanned<Expr>>,
        field: Spanned<Name>,
    },
    /// `object[index]`
    Index {
        object: Box<Spanned<Expr>>,
        index: Box<Spanned<Expr>>,
    },
    /// `callee(args)` — also covers the `f "s"` and `f {t}` sugar forms.
    Call {
        callee: Box<Spanned<Expr>>,
        args: Vec<Spanned<Expr>>,
    },
    /// `object:method(args)`
    MethodCall {
        object: Box<Spanned<Expr>>,
        method: Spanned<Name>,
        args: Vec<Spanned<Expr>>,
    },
    /// `{ ... }`
    Table(Vec<TableField>),
    BinOp {
        op: OperatorId,
        lhs: Box<Spanned<Expr>>,
        rhs: Box<Spanned<Expr>>,
    },
    UnOp {
        op: OperatorId,
        operand: Box<Spanned<Expr>>,
    },
    /// Parenthesized expression (`(f())` truncates multiple results, so parens are
    /// semantically meaningful in Lua and must be preserved).
    Paren(Box<Spanned<Expr>>),
    /// Error-marker node inserted during recovery.
    Error,
}

/// One field of a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// `name = expr`
    Named {
        key: Spanned<Name>,
        value: Spanned<Expr>,
    },
    /// `[expr] = expr`
    Indexed {
        key: Spanned<Expr>,
        value: Spanned<Expr>,
    },
    /// Positional item.
    Item(Spanned<Expr>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 10);
        let b = Span::new(8, 20);
        assert_eq!(a.merge(b), Span::new(4, 20));
        assert_eq!(b.merge(a), Span::new(4, 20));
    }

    #[test]
    fn test_funcname_display() {
        let name = FuncName {
            base: Spanned::new("a".to_string(), Span::new(0, 1)),
            path: vec![Spanned::new("b".to_string(), Span::new(2, 3))],
            method: Some(Spanned::new("m".to_string(), Span::new(4, 5))),
        };
        assert_eq!(name.to_string(), "a.b:m");
        assert!(name.is_method());
        assert_eq!(name.span(), Span::new(0, 5));
    }
}
