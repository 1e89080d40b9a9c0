/// Expression parsing methods.
///
/// This chunk implements the expression grammar with the binding-priority scheme
/// from the operator registry: `sub_expr(limit)` consumes operators whose left
/// priority exceeds `limit`, which handles both precedence and associativity
/// (right-associative operators carry a lower right priority).
///
/// ## Notes
/// - Operator identities are carried by [`TokenKind::Operator`] / [`OperatorId`];
///   word operators (`and`, `or`, `not`) arrive as keyword tokens and are mapped
///   back to operator IDs here.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        self.sub_expr(0)
    }

    /// Parse an expression whose operators all bind tighter than `limit`.
    fn sub_expr(&mut self, limit: u8) -> Result<Spanned<Expr>, Diagnostic> {
        let start = self.current_span().start;

        let mut left = if let Some(op) = self.unary_op_ahead() {
            self.advance();
            let operand = self.sub_expr(UNARY_PRIORITY)?;
            let span = Span::new(start, operand.span.end);
            Spanned::new(
                Expr::UnOp {
                    op,
                    operand: Box::new(operand),
                },
                span,
            )
        } else {
            self.simple_expr()?
        };

        while let Some(op) = self.binary_op_ahead() {
            let info = operators::info_for(op);
            if info.left_priority <= limit {
                break;
            }
            self.advance();
            let right = self.sub_expr(info.right_priority)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(
                Expr::BinOp {
                    op,
                    lhs: Box::new(left),
                    rhs: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// Unary operator at the current position, if any.
    fn unary_op_ahead(&self) -> Option<OperatorId> {
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Not) => Some(OperatorId::Not),
            TokenKind::Operator(OperatorId::Sub) => Some(OperatorId::Sub),
            TokenKind::Operator(OperatorId::Len) => Some(OperatorId::Len),
            _ => None,
        }
    }

    /// Binary operator at the current position, if any.
    fn binary_op_ahead(&self) -> Option<OperatorId> {
        match &self.peek().kind {
            TokenKind::Operator(id) if operators::is_infix(*id) => Some(*id),
            TokenKind::Keyword(KeywordId::And) => Some(OperatorId::And),
            TokenKind::Keyword(KeywordId::Or) => Some(OperatorId::Or),
            _ => None,
        }
    }

    /// Literals, `...`, function literals, table constructors, and suffixed
    /// expressions.
    fn simple_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Int(v) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::Int(v), span))
            }
            TokenKind::Float(v) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::Float(v), span))
            }
            TokenKind::Str(s) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::Str(s), span))
            }
            TokenKind::Keyword(KeywordId::Nil) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::Nil, span))
            }
            TokenKind::Keyword(KeywordId::True) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::True, span))
            }
            TokenKind::Keyword(KeywordId::False) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::False, span))
            }
            TokenKind::Punctuation(PunctuationId::Ellipsis) => {
                let span = self.advance().span;
                Ok(Spanned::new(Expr::VarArg, span))
            }
            TokenKind::Keyword(KeywordId::Function) => {
                let start = self.advance().span.start;
                let body = self.func_body(start)?;
                let span = body.span;
                Ok(Spanned::new(Expr::Function(body), span))
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => self.table_constructor(),
            _ => self.suffixed_expr(),
        }
    }

    /// A primary expression followed by any chain of `.name`, `[expr]`, `:m(args)`,
    /// and call suffixes.
    fn suffixed_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let mut expr = self.primary_expr()?;

        loop {
            if self.match_punct(PunctuationId::Dot) {
                let field = self.expect_name("field name")?;
                let span = expr.span.merge(field.span);
                expr = Spanned::new(
                    Expr::Dot {
                        object: Box::new(expr),
                        field,
                    },
                    span,
                );
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                let end = self.expect_punct(PunctuationId::RBracket, "']'")?;
                let span = Span::new(expr.span.start, end.end);
                expr = Spanned::new(
                    Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else if self.match_punct(PunctuationId::Colon) {
                let method = self.expect_name("method name")?;
                let args = self.call_args()?;
                let span = Span::new(expr.span.start, self.previous_span().end);
                expr = Spanned::new(
                    Expr::MethodCall {
                        object: Box::new(expr),
                        method,
                        args,
                    },
                    span,
                );
            } else if self.check_punct(PunctuationId::LParen)
                || self.check_punct(PunctuationId::LBrace)
                || matches!(self.peek().kind, TokenKind::Str(_))
            {
                let args = self.call_args()?;
                let span = Span::new(expr.span.start, self.previous_span().end);
                expr = Spanned::new(
                    Expr::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary_expr(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        if let TokenKind::Name(name) = &self.peek().kind {
            let name = name.clone();
            let span = self.advance().span;
            return Ok(Spanned::new(Expr::Name(name), span));
        }

        if self.match_punct(PunctuationId::LParen) {
            let start = self.previous_span().start;
            let inner = self.expression()?;
            let end = self.expect_punct(PunctuationId::RParen, "')'")?;
            return Ok(Spanned::new(
                Expr::Paren(Box::new(inner)),
                Span::new(start, end.end),
            ));
        }

        Err(Diagnostic::error(
            format!("unexpected symbol near {}", self.peek().kind.describe()),
            self.current_span(),
        ))
    }

    /// Call arguments: `(explist)`, a single string literal, or a single table
    /// constructor (the `f "s"` / `f {t}` sugar forms).
    fn call_args(&mut self) -> Result<Vec<Spanned<Expr>>, Diagnostic> {
        if let TokenKind::Str(s) = &self.peek().kind {
            let s = s.clone();
            let span = self.advance().span;
            return Ok(vec![Spanned::new(Expr::Str(s), span)]);
        }

        if self.check_punct(PunctuationId::LBrace) {
            return Ok(vec![self.table_constructor()?]);
        }

        self.expect_punct(PunctuationId::LParen, "function arguments")?;
        let args = if self.check_punct(PunctuationId::RParen) {
            Vec::new()
        } else {
            self.explist()?
        };
        self.expect_punct(PunctuationId::RParen, "')'")?;
        Ok(args)
    }

    /// `{ [expr] = expr, name = expr, expr, ... }` with `,` or `;` separators.
    fn table_constructor(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let start = self.expect_punct(PunctuationId::LBrace, "'{'")?.start;
        let mut fields = Vec::new();

        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            if self.match_punct(PunctuationId::LBracket) {
                let key = self.expression()?;
                self.expect_punct(PunctuationId::RBracket, "']'")?;
                self.expect_punct(PunctuationId::Assign, "'='")?;
                let value = self.expression()?;
                fields.push(TableField::Indexed { key, value });
            } else if matches!(self.peek().kind, TokenKind::Name(_))
                && self.peek_next().kind.is_punctuation(PunctuationId::Assign)
            {
                let key = self.expect_name("field name")?;
                self.expect_punct(PunctuationId::Assign, "'='")?;
                let value = self.expression()?;
                fields.push(TableField::Named { key, value });
            } else {
                fields.push(TableField::Item(self.expression()?));
            }

            if !self.match_punct(PunctuationId::Comma) && !self.match_punct(PunctuationId::Semicolon)
            {
                break;
            }
        }

        let end = self.expect_punct(PunctuationId::RBrace, "'}'")?;
        Ok(Spanned::new(Expr::Table(fields), Span::new(start, end.end)))
    }
}
