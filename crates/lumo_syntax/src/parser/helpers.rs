/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords and punctuation
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, what: &str) -> Result<Span, Diagnostic> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.expected_here(what))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, what: &str) -> Result<Span, Diagnostic> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.expected_here(what))
        }
    }

    /// Consume a `Name` token, or fail with a positioned diagnostic.
    fn expect_name(&mut self, what: &str) -> Result<Spanned<Name>, Diagnostic> {
        if let TokenKind::Name(name) = &self.peek().kind {
            let name = name.clone();
            let span = self.advance().span;
            Ok(Spanned::new(name, span))
        } else {
            Err(self.expected_here(what))
        }
    }

    /// Build an "X expected near Y" diagnostic at the current token.
    fn expected_here(&self, what: &str) -> Diagnostic {
        Diagnostic::error(
            format!("{} expected near {}", what, self.peek().kind.describe()),
            self.current_span(),
        )
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    /// Return `true` if the current token ends the enclosing block.
    ///
    /// `return` only appears as the last statement of a block, so block parsing
    /// also stops right after one.
    fn is_block_end(&self) -> bool {
        self.is_at_end()
            || self.check_keyword(KeywordId::End)
            || self.check_keyword(KeywordId::Else)
            || self.check_keyword(KeywordId::Elseif)
            || self.check_keyword(KeywordId::Until)
    }

    /// Return `true` if the current token can begin a statement.
    fn is_stat_start(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Name(_))
            || self.check_keyword(KeywordId::If)
            || self.check_keyword(KeywordId::While)
            || self.check_keyword(KeywordId::Do)
            || self.check_keyword(KeywordId::For)
            || self.check_keyword(KeywordId::Repeat)
            || self.check_keyword(KeywordId::Function)
            || self.check_keyword(KeywordId::Local)
            || self.check_keyword(KeywordId::Return)
            || self.check_keyword(KeywordId::Break)
            || self.check_keyword(KeywordId::Goto)
            || self.check_punct(PunctuationId::DoubleColon)
            || self.check_punct(PunctuationId::Semicolon)
    }

    /// Skip forward to the next plausible statement boundary.
    ///
    /// `stat_start_pos` is the token position where the failed statement began;
    /// if the statement consumed nothing, one token is skipped to guarantee
    /// progress. Returns the byte offset where skipping stopped, so the caller
    /// can give the error-marker statement a span covering everything discarded.
    fn synchronize(&mut self, stat_start_pos: usize) -> usize {
        if self.pos == stat_start_pos && !self.is_at_end() {
            self.advance();
        }
        while !self.is_at_end() && !self.is_block_end() && !self.is_stat_start() {
            self.advance();
        }
        self.previous_span().end
    }
}
