/// Statement parsing methods.
///
/// Each statement form maps to one method. Statement parsing is where error
/// recovery happens: a failed statement is recorded as [`Stat::Error`] and parsing
/// resumes at the next statement boundary, so one typo never hides the rest of the
/// file.
impl<'a> Parser<'a> {
    // ========================================================================
    // Blocks and statements
    // ========================================================================

    /// Parse statements until the enclosing block ends.
    fn block(&mut self) -> Block {
        let mut stats = Vec::new();

        while !self.is_block_end() {
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }

            // `return` must be the last statement of its block.
            if self.check_keyword(KeywordId::Return) {
                let start = self.current_span().start;
                let start_pos = self.pos;
                match self.return_stat() {
                    Ok(stat) => stats.push(stat),
                    Err(e) => {
                        self.errors.push(e);
                        let end = self.synchronize(start_pos);
                        stats.push(Spanned::new(Stat::Error, Span::new(start, end)));
                    }
                }
                break;
            }

            let start = self.current_span().start;
            let start_pos = self.pos;
            match self.statement() {
                Ok(stat) => stats.push(stat),
                Err(e) => {
                    self.errors.push(e);
                    let end = self.synchronize(start_pos);
                    stats.push(Spanned::new(Stat::Error, Span::new(start, end)));
                }
            }
        }

        Block { stats }
    }

    fn statement(&mut self) -> Result<Spanned<Stat>, Diagnostic> {
        let start = self.current_span().start;

        if self.match_keyword(KeywordId::If) {
            return self.if_stat(start);
        }
        if self.match_keyword(KeywordId::While) {
            return self.while_stat(start);
        }
        if self.match_keyword(KeywordId::Do) {
            let body = self.block();
            let end = self.expect_keyword(KeywordId::End, "'end'")?;
            return Ok(Spanned::new(Stat::Do(body), Span::new(start, end.end)));
        }
        if self.match_keyword(KeywordId::For) {
            return self.for_stat(start);
        }
        if self.match_keyword(KeywordId::Repeat) {
            return self.repeat_stat(start);
        }
        if self.match_keyword(KeywordId::Function) {
            return self.function_stat(start);
        }
        if self.match_keyword(KeywordId::Local) {
            return self.local_stat(start);
        }
        if self.match_keyword(KeywordId::Break) {
            return Ok(Spanned::new(Stat::Break, self.previous_span()));
        }
        if self.match_keyword(KeywordId::Goto) {
            let name = self.expect_name("label name")?;
            let span = Span::new(start, name.span.end);
            return Ok(Spanned::new(Stat::Goto(name), span));
        }
        if self.match_punct(PunctuationId::DoubleColon) {
            let name = self.expect_name("label name")?;
            let end = self.expect_punct(PunctuationId::DoubleColon, "'::'")?;
            return Ok(Spanned::new(Stat::Label(name), Span::new(start, end.end)));
        }

        self.expr_stat(start)
    }

    /// `return [explist] [';']` — the block terminator.
    fn return_stat(&mut self) -> Result<Spanned<Stat>, Diagnostic> {
        let start = self.expect_keyword(KeywordId::Return, "'return'")?.start;

        let values = if self.is_block_end() || self.check_punct(PunctuationId::Semicolon) {
            Vec::new()
        } else {
            self.explist()?
        };
        self.match_punct(PunctuationId::Semicolon);

        let span = Span::new(start, self.previous_span().end);
        Ok(Spanned::new(Stat::Return(values), span))
    }

    fn if_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        let mut arms = Vec::new();

        let cond = self.expression()?;
        self.expect_keyword(KeywordId::Then, "'then'")?;
        arms.push(IfArm {
            cond,
            body: self.block(),
        });

        while self.match_keyword(KeywordId::Elseif) {
            let cond = self.expression()?;
            self.expect_keyword(KeywordId::Then, "'then'")?;
            arms.push(IfArm {
                cond,
                body: self.block(),
            });
        }

        let else_body = if self.match_keyword(KeywordId::Else) {
            Some(self.block())
        } else {
            None
        };

        let end = self.expect_keyword(KeywordId::End, "'end'")?;
        Ok(Spanned::new(
            Stat::If { arms, else_body },
            Span::new(start, end.end),
        ))
    }

    fn while_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        let cond = self.expression()?;
        self.expect_keyword(KeywordId::Do, "'do'")?;
        let body = self.block();
        let end = self.expect_keyword(KeywordId::End, "'end'")?;
        Ok(Spanned::new(
            Stat::While { cond, body },
            Span::new(start, end.end),
        ))
    }

    fn repeat_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        let body = self.block();
        self.expect_keyword(KeywordId::Until, "'until'")?;
        let cond = self.expression()?;
        let span = Span::new(start, cond.span.end);
        Ok(Spanned::new(Stat::Repeat { body, cond }, span))
    }

    /// Both `for` forms; which one is decided by the token after the first name.
    fn for_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        let first = self.expect_name("name")?;

        if self.match_punct(PunctuationId::Assign) {
            // for i = start, limit [, step] do ... end
            let start_expr = self.expression()?;
            self.expect_punct(PunctuationId::Comma, "','")?;
            let limit = self.expression()?;
            let step = if self.match_punct(PunctuationId::Comma) {
                Some(self.expression()?)
            } else {
                None
            };
            self.expect_keyword(KeywordId::Do, "'do'")?;
            let body = self.block();
            let end = self.expect_keyword(KeywordId::End, "'end'")?;
            return Ok(Spanned::new(
                Stat::NumericFor {
                    var: first,
                    start: start_expr,
                    limit,
                    step,
                    body,
                },
                Span::new(start, end.end),
            ));
        }

        // for a, b in exprs do ... end
        let mut names = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            names.push(self.expect_name("name")?);
        }
        self.expect_keyword(KeywordId::In, "'=' or 'in'")?;
        let exprs = self.explist()?;
        self.expect_keyword(KeywordId::Do, "'do'")?;
        let body = self.block();
        let end = self.expect_keyword(KeywordId::End, "'end'")?;
        Ok(Spanned::new(
            Stat::GenericFor { names, exprs, body },
            Span::new(start, end.end),
        ))
    }

    /// `function a.b.c:m(...) ... end`
    fn function_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        let base = self.expect_name("function name")?;
        let mut path = Vec::new();
        while self.match_punct(PunctuationId::Dot) {
            path.push(self.expect_name("field name")?);
        }
        let method = if self.match_punct(PunctuationId::Colon) {
            Some(self.expect_name("method name")?)
        } else {
            None
        };

        let name = FuncName { base, path, method };
        let body = self.func_body(start)?;
        let span = body.span;
        Ok(Spanned::new(Stat::Function { name, body }, span))
    }

    fn local_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        if self.match_keyword(KeywordId::Function) {
            let name = self.expect_name("function name")?;
            let body = self.func_body(start)?;
            let span = body.span;
            return Ok(Spanned::new(Stat::LocalFunction { name, body }, span));
        }

        let mut names = vec![self.expect_name("name")?];
        while self.match_punct(PunctuationId::Comma) {
            names.push(self.expect_name("name")?);
        }

        let values = if self.match_punct(PunctuationId::Assign) {
            self.explist()?
        } else {
            Vec::new()
        };

        let span = Span::new(start, self.previous_span().end);
        Ok(Spanned::new(Stat::Local { names, values }, span))
    }

    /// Parameter list and body, through the matching `end`.
    ///
    /// `start` is the offset of the `function` (or `local`) keyword so the recorded
    /// span covers the whole declaration.
    fn func_body(&mut self, start: usize) -> Result<FuncBody, Diagnostic> {
        self.expect_punct(PunctuationId::LParen, "'('")?;

        let mut params = Vec::new();
        let mut is_vararg = false;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                if self.match_punct(PunctuationId::Ellipsis) {
                    is_vararg = true;
                    break;
                }
                params.push(self.expect_name("parameter name")?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "')'")?;

        let body = self.block();
        let end = self.expect_keyword(KeywordId::End, "'end'")?;

        Ok(FuncBody {
            params,
            is_vararg,
            body,
            span: Span::new(start, end.end),
        })
    }

    /// A statement that starts with an expression: either an assignment or a call.
    fn expr_stat(&mut self, start: usize) -> Result<Spanned<Stat>, Diagnostic> {
        let first = self.suffixed_expr()?;

        if self.check_punct(PunctuationId::Assign) || self.check_punct(PunctuationId::Comma) {
            let mut targets = vec![first];
            while self.match_punct(PunctuationId::Comma) {
                targets.push(self.suffixed_expr()?);
            }
            for target in &targets {
                if !matches!(
                    target.node,
                    Expr::Name(_) | Expr::Dot { .. } | Expr::Index { .. }
                ) {
                    return Err(Diagnostic::error(
                        "cannot assign to this expression",
                        target.span,
                    ));
                }
            }
            self.expect_punct(PunctuationId::Assign, "'='")?;
            let values = self.explist()?;
            let span = Span::new(start, self.previous_span().end);
            return Ok(Spanned::new(Stat::Assign { targets, values }, span));
        }

        // Only calls may stand alone as statements.
        if matches!(first.node, Expr::Call { .. } | Expr::MethodCall { .. }) {
            let span = first.span;
            Ok(Spanned::new(Stat::Call(first), span))
        } else {
            Err(Diagnostic::error("syntax error: expression is not a statement", first.span))
        }
    }

    /// Comma-separated expression list (at least one expression).
    fn explist(&mut self) -> Result<Vec<Spanned<Expr>>, Diagnostic> {
        let mut exprs = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }
}
