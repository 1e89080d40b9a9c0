//! Semantic source model for one Lua file.
//!
//! The model is what editor and indexing tooling consumes: a nested declaration
//! outline, a flat reference list, the set of user-defined globals, and recorded
//! `require` calls. It is produced by walking the syntax tree ([`builder`]) with a
//! scope table ([`scopes`]) tracking Lua's visibility rules.
//!
//! ## Modules
//!
//! - `builder` - AST walker producing the model
//! - `scopes` - Symbol table with parented scopes

pub mod builder;
pub mod scopes;

use lumo_syntax::ast::Span;
use serde::Serialize;
use std::path::PathBuf;

/// What kind of declaration an outline item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// `function a.b.c(...)` — global or field function.
    Function,
    /// `function a.b:m(...)` — declared with implicit `self`.
    Method,
    /// `local function f(...)`.
    LocalFunction,
    /// `local x` binding (including `local f = function() end`).
    Local,
    /// Assignment to an unresolved simple name at any level.
    Global,
}

/// One item of the declaration outline.
///
/// Function-valued declarations carry their parameter list and nest the
/// declarations made inside their body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Span of just the name.
    pub name_span: Span,
    /// Span of the whole declaring construct.
    pub span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_vararg: bool,
    /// Doc block from the comment run immediately above the declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Declaration>,
}

/// How a name is used at a reference site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Read,
    Write,
    Call,
}

/// What a reference resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefTarget {
    /// A local binding in scope.
    Local,
    /// A global not predefined by the interpreter.
    Global,
    /// A global from the builtin registry (`print`, `string`, ...).
    Builtin,
}

/// One use of a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub name: String,
    pub span: Span,
    pub kind: RefKind,
    pub target: RefTarget,
}

/// A recorded `require("mod")` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequireRef {
    /// Module name as written (`"a.b.c"`).
    pub module: String,
    pub span: Span,
    /// Filesystem path the module resolved to, when a configured search path
    /// contains it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<PathBuf>,
}

/// The complete semantic model of one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceModel {
    pub declarations: Vec<Declaration>,
    pub references: Vec<Reference>,
    /// Distinct user-defined global names, in first-appearance order.
    pub globals: Vec<String>,
    pub requires: Vec<RequireRef>,
}

impl SourceModel {
    /// Iterate the outline depth-first.
    pub fn all_declarations(&self) -> impl Iterator<Item = &Declaration> {
        fn walk<'a>(decls: &'a [Declaration], out: &mut Vec<&'a Declaration>) {
            for d in decls {
                out.push(d);
                walk(&d.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.declarations, &mut out);
        out.into_iter()
    }
}
