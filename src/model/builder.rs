//! AST walker that produces the [`SourceModel`].
//!
//! One pass over the chunk with a [`ScopeTable`] tracking local visibility. The
//! walker records:
//!
//! - declarations (functions, locals, global assignments) into a nested outline,
//! - every name use as a [`Reference`] classified local/global/builtin,
//! - `require("mod")` calls, resolved against the configured search paths,
//! - doc blocks from comment runs directly above function declarations.
//!
//! Error-marker nodes from parser recovery are simply skipped; the model covers
//! whatever parsed.

use std::collections::HashSet;
use std::path::PathBuf;

use lumo_core::lang::builtins;
use lumo_syntax::ast::{Block, Chunk, Expr, FuncBody, Span, Spanned, Stat, TableField};
use lumo_syntax::diagnostics::LineIndex;
use lumo_syntax::lexer::Comment;

use super::scopes::{ScopeKind, ScopeTable};
use super::{Declaration, DeclarationKind, RefKind, RefTarget, Reference, RequireRef, SourceModel};

/// Build the semantic model for one parsed chunk.
///
/// ## Parameters
/// - `source`: the text the chunk was parsed from (doc-block attachment needs it).
/// - `comments`: comment side list from the lexer (doc-block attachment).
/// - `line_index`: line table for the same source the chunk was parsed from.
/// - `search_paths`: roots used to resolve `require` targets to files.
#[tracing::instrument(skip_all, fields(stats = chunk.block.stats.len()))]
pub fn build_model(
    source: &str,
    chunk: &Chunk,
    comments: &[Comment],
    line_index: &LineIndex,
    search_paths: &[PathBuf],
) -> SourceModel {
    let mut walker = Walker {
        source,
        comments,
        line_index,
        search_paths,
        scopes: ScopeTable::new(),
        model: SourceModel::default(),
        seen_globals: HashSet::new(),
        decl_stack: vec![Vec::new()],
    };

    walker.visit_block(&chunk.block);

    walker.model.declarations = walker.decl_stack.pop().unwrap_or_default();
    walker.model
}

struct Walker<'a> {
    source: &'a str,
    comments: &'a [Comment],
    line_index: &'a LineIndex,
    search_paths: &'a [PathBuf],
    scopes: ScopeTable,
    model: SourceModel,
    seen_globals: HashSet<String>,
    /// Child collectors; the top of the stack receives declarations made at the
    /// current outline level.
    decl_stack: Vec<Vec<Declaration>>,
}

impl<'a> Walker<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn visit_block(&mut self, block: &Block) {
        for stat in &block.stats {
            self.visit_stat(stat);
        }
    }

    fn visit_stat(&mut self, stat: &Spanned<Stat>) {
        match &stat.node {
            Stat::Local { names, values } => self.visit_local(names, values, stat.span),
            Stat::LocalFunction { name, body } => {
                // Unlike `local f = function()`, the name is visible inside its own
                // body (recursion works).
                self.scopes.define(name.node.clone(), name.span);
                let children = self.visit_func_body(body, false);
                self.emit(Declaration {
                    name: name.node.clone(),
                    kind: DeclarationKind::LocalFunction,
                    name_span: name.span,
                    span: stat.span,
                    params: body.params.iter().map(|p| p.node.clone()).collect(),
                    is_vararg: body.is_vararg,
                    doc: self.doc_before(stat.span.start),
                    children,
                });
            }
            Stat::Function { name, body } => {
                // `function a.b:m()` reads `a`; a bare `function a()` writes the
                // global (or local) `a`.
                let is_plain = name.path.is_empty() && name.method.is_none();
                let kind = if is_plain { RefKind::Write } else { RefKind::Read };
                self.record_ref(&name.base.node, name.base.span, kind);

                let children = self.visit_func_body(body, name.is_method());
                let decl_kind = if name.is_method() {
                    DeclarationKind::Method
                } else if is_plain && self.scopes.lookup(&name.base.node).is_none() {
                    DeclarationKind::Global
                } else {
                    DeclarationKind::Function
                };
                self.emit(Declaration {
                    name: name.to_string(),
                    kind: decl_kind,
                    name_span: name.span(),
                    span: stat.span,
                    params: body.params.iter().map(|p| p.node.clone()).collect(),
                    is_vararg: body.is_vararg,
                    doc: self.doc_before(stat.span.start),
                    children,
                });
            }
            Stat::Assign { targets, values } => self.visit_assign(targets, values, stat.span),
            Stat::Call(expr) => self.visit_expr(expr),
            Stat::Do(body) => {
                self.scopes.enter_scope(ScopeKind::Block);
                self.visit_block(body);
                self.scopes.exit_scope();
            }
            Stat::While { cond, body } => {
                self.visit_expr(cond);
                self.scopes.enter_scope(ScopeKind::Loop);
                self.visit_block(body);
                self.scopes.exit_scope();
            }
            Stat::Repeat { body, cond } => {
                // The until condition sees the body's locals.
                self.scopes.enter_scope(ScopeKind::Repeat);
                self.visit_block(body);
                self.visit_expr(cond);
                self.scopes.exit_scope();
            }
            Stat::If { arms, else_body } => {
                for arm in arms {
                    self.visit_expr(&arm.cond);
                    self.scopes.enter_scope(ScopeKind::Block);
                    self.visit_block(&arm.body);
                    self.scopes.exit_scope();
                }
                if let Some(body) = else_body {
                    self.scopes.enter_scope(ScopeKind::Block);
                    self.visit_block(body);
                    self.scopes.exit_scope();
                }
            }
            Stat::NumericFor {
                var,
                start,
                limit,
                step,
                body,
            } => {
                // Bounds are evaluated before the control variable exists.
                self.visit_expr(start);
                self.visit_expr(limit);
                if let Some(step) = step {
                    self.visit_expr(step);
                }
                self.scopes.enter_scope(ScopeKind::Loop);
                self.scopes.define(var.node.clone(), var.span);
                self.visit_block(body);
                self.scopes.exit_scope();
            }
            Stat::GenericFor { names, exprs, body } => {
                for expr in exprs {
                    self.visit_expr(expr);
                }
                self.scopes.enter_scope(ScopeKind::Loop);
                for name in names {
                    self.scopes.define(name.node.clone(), name.span);
                }
                self.visit_block(body);
                self.scopes.exit_scope();
            }
            Stat::Return(values) => {
                for value in values {
                    self.visit_expr(value);
                }
            }
            Stat::Break | Stat::Goto(_) | Stat::Label(_) | Stat::Error => {}
        }
    }

    /// `local a, b = e1, e2`: values are evaluated in the *enclosing* scope, so
    /// `local x = x` reads the outer `x`.
    fn visit_local(&mut self, names: &[Spanned<String>], values: &[Spanned<Expr>], span: Span) {
        // Function literals paired with a single name nest their declarations
        // under that name's outline item.
        let mut func_info: Vec<Option<(Vec<String>, bool, Vec<Declaration>)>> = Vec::new();
        for (i, value) in values.iter().enumerate() {
            match &value.node {
                Expr::Function(body) if i < names.len() => {
                    let children = self.visit_func_body(body, false);
                    func_info.push(Some((
                        body.params.iter().map(|p| p.node.clone()).collect(),
                        body.is_vararg,
                        children,
                    )));
                }
                _ => {
                    self.visit_expr(value);
                    func_info.push(None);
                }
            }
        }

        for (i, name) in names.iter().enumerate() {
            self.scopes.define(name.node.clone(), name.span);
            let (params, is_vararg, children) = func_info
                .get_mut(i)
                .and_then(Option::take)
                .unwrap_or_default();
            self.emit(Declaration {
                name: name.node.clone(),
                kind: DeclarationKind::Local,
                name_span: name.span,
                span,
                params,
                is_vararg,
                doc: self.doc_before(span.start),
                children,
            });
        }
    }

    fn visit_assign(&mut self, targets: &[Spanned<Expr>], values: &[Spanned<Expr>], span: Span) {
        // Values first (right-hand side sees the pre-assignment world).
        let mut func_info: Vec<Option<(Vec<String>, bool, Vec<Declaration>)>> = Vec::new();
        for (i, value) in values.iter().enumerate() {
            let pairs_simple_name = matches!(
                targets.get(i).map(|t| &t.node),
                Some(Expr::Name(_))
            );
            match &value.node {
                Expr::Function(body) if pairs_simple_name => {
                    let children = self.visit_func_body(body, false);
                    func_info.push(Some((
                        body.params.iter().map(|p| p.node.clone()).collect(),
                        body.is_vararg,
                        children,
                    )));
                }
                _ => {
                    self.visit_expr(value);
                    func_info.push(None);
                }
            }
        }

        for (i, target) in targets.iter().enumerate() {
            match &target.node {
                Expr::Name(name) => {
                    self.record_ref(name, target.span, RefKind::Write);

                    // First assignment to an unresolved simple name becomes an
                    // outline item.
                    let is_global =
                        self.scopes.lookup(name).is_none() && !builtins::is_builtin(name);
                    let already_declared = self
                        .decl_stack
                        .iter()
                        .flatten()
                        .any(|d| d.kind == DeclarationKind::Global && d.name == *name);
                    if is_global && !already_declared {
                        let (params, is_vararg, children) = func_info
                            .get_mut(i)
                            .and_then(Option::take)
                            .unwrap_or_default();
                        self.emit(Declaration {
                            name: name.clone(),
                            kind: DeclarationKind::Global,
                            name_span: target.span,
                            span,
                            params,
                            is_vararg,
                            doc: self.doc_before(span.start),
                            children,
                        });
                    }
                }
                Expr::Dot { object, .. } => self.visit_expr(object),
                Expr::Index { object, index } => {
                    self.visit_expr(object);
                    self.visit_expr(index);
                }
                // Parser already rejected anything else as an assignment target.
                _ => {}
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        match &expr.node {
            Expr::Name(name) => self.record_ref(name, expr.span, RefKind::Read),
            Expr::Dot { object, .. } => self.visit_expr(object),
            Expr::Index { object, index } => {
                self.visit_expr(object);
                self.visit_expr(index);
            }
            Expr::Call { callee, args } => {
                if let Expr::Name(name) = &callee.node {
                    self.record_ref(name, callee.span, RefKind::Call);
                    self.maybe_record_require(name, args, expr.span);
                } else {
                    self.visit_expr(callee);
                }
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Expr::MethodCall { object, args, .. } => {
                self.visit_expr(object);
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Expr::Function(body) => {
                // Anonymous function: its declarations surface at the current
                // outline level.
                let children = self.visit_func_body(body, false);
                self.extend_current(children);
            }
            Expr::Table(fields) => {
                for field in fields {
                    match field {
                        TableField::Named { value, .. } => self.visit_expr(value),
                        TableField::Indexed { key, value } => {
                            self.visit_expr(key);
                            self.visit_expr(value);
                        }
                        TableField::Item(value) => self.visit_expr(value),
                    }
                }
            }
            Expr::BinOp { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::UnOp { operand, .. } => self.visit_expr(operand),
            Expr::Paren(inner) => self.visit_expr(inner),
            Expr::Nil
            | Expr::True
            | Expr::False
            | Expr::Int(_)
            | Expr::Float(_)
            | Expr::Str(_)
            | Expr::VarArg
            | Expr::Error => {}
        }
    }

    /// Walk a function body in its own scope; returns the declarations made inside.
    fn visit_func_body(&mut self, body: &FuncBody, implicit_self: bool) -> Vec<Declaration> {
        self.scopes.enter_scope(ScopeKind::Function);
        if implicit_self {
            self.scopes.define("self", body.span);
        }
        for param in &body.params {
            self.scopes.define(param.node.clone(), param.span);
        }

        self.decl_stack.push(Vec::new());
        self.visit_block(&body.body);
        let children = self.decl_stack.pop().unwrap_or_default();

        self.scopes.exit_scope();
        children
    }

    // ========================================================================
    // Recording
    // ========================================================================

    fn emit(&mut self, decl: Declaration) {
        if let Some(top) = self.decl_stack.last_mut() {
            top.push(decl);
        }
    }

    fn extend_current(&mut self, decls: Vec<Declaration>) {
        if let Some(top) = self.decl_stack.last_mut() {
            top.extend(decls);
        }
    }

    fn record_ref(&mut self, name: &str, span: Span, kind: RefKind) {
        let target = if self.scopes.lookup(name).is_some() {
            RefTarget::Local
        } else if builtins::is_builtin(name) {
            RefTarget::Builtin
        } else {
            if self.seen_globals.insert(name.to_string()) {
                self.model.globals.push(name.to_string());
            }
            RefTarget::Global
        };
        self.model.references.push(Reference {
            name: name.to_string(),
            span,
            kind,
            target,
        });
    }

    fn maybe_record_require(&mut self, callee: &str, args: &[Spanned<Expr>], span: Span) {
        if callee != "require" || self.scopes.lookup(callee).is_some() {
            return;
        }
        if let Some(Expr::Str(module)) = args.first().map(|a| &a.node) {
            let resolved = resolve_module(module, self.search_paths);
            self.model.requires.push(RequireRef {
                module: module.clone(),
                span,
                resolved,
            });
        }
    }

    // ========================================================================
    // Doc comments
    // ========================================================================

    /// Doc block from the comment run ending on the line directly above `start`.
    ///
    /// Only comments that stand on their own line join the run; a comment trailing
    /// code (`local x = 1 -- note`) documents nothing.
    fn doc_before(&self, start: usize) -> Option<String> {
        let start_line = self.line_index.line_col(start).0;
        if start_line <= 1 {
            return None;
        }

        let mut expect = start_line - 1;
        let mut run: Vec<&Comment> = Vec::new();
        for comment in self.comments.iter().rev() {
            let end_line = self.line_index.line_col(comment.span.end).0;
            if end_line > expect {
                continue;
            }
            if end_line < expect || !self.owns_its_line(comment) {
                break;
            }
            run.push(comment);
            let first_line = self.line_index.line_col(comment.span.start).0;
            if first_line <= 1 {
                break;
            }
            expect = first_line - 1;
        }

        if run.is_empty() {
            return None;
        }

        let mut lines: Vec<String> = run
            .iter()
            .rev()
            .map(|c| clean_doc_text(&c.text))
            .collect();
        // Drop blank leading/trailing lines but keep interior structure.
        while lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// `true` if nothing but whitespace precedes the comment on its line.
    fn owns_its_line(&self, comment: &Comment) -> bool {
        let line_start = self.source[..comment.span.start]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        self.source[line_start..comment.span.start]
            .chars()
            .all(|c| c.is_ascii_whitespace())
    }
}

/// Strip the doc-marker dashes (`--- text` lexes with text `"- text"`) and one
/// leading space.
fn clean_doc_text(text: &str) -> String {
    let stripped = text.trim_start_matches('-');
    stripped.strip_prefix(' ').unwrap_or(stripped).trim_end().to_string()
}

/// Resolve a module name against the search paths, Lua-style: `a.b.c` maps to
/// `a/b/c.lua` or `a/b/c/init.lua` under each root.
fn resolve_module(module: &str, search_paths: &[PathBuf]) -> Option<PathBuf> {
    let relative: PathBuf = module.split('.').collect();
    for root in search_paths {
        let direct = root.join(&relative).with_extension("lua");
        if direct.is_file() {
            return Some(direct);
        }
        let init = root.join(&relative).join("init.lua");
        if init.is_file() {
            return Some(init);
        }
    }
    None
}
