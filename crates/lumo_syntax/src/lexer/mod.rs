//! Lexer for Lua source text.
//!
//! Handles tokenization including:
//! - Keywords (`local`, `function`, `end`, ...) and identifiers
//! - Numeric literals (decimal, hex, floats with exponents, hex floats)
//! - Short strings with Lua escapes and long-bracket strings (`[[...]]`, `[=[...]=]`)
//! - Line and long comments (collected separately, never emitted as tokens)
//! - Operators and punctuation (`..`, `...`, `::`, `~=`, ...)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Comment)
//! - `strings` - Short-string and long-bracket scanning
//! - `numbers` - Numeric literal scanning
//!
//! The lexer never aborts: malformed input produces a [`Diagnostic`] and scanning
//! continues at the next character, so the token stream is always usable.

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Comment, Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::Diagnostic;
use lumo_core::lang::operators::OperatorId;
use lumo_core::lang::punctuation::PunctuationId;

/// Everything the lexer produces for one source.
///
/// `tokens` always ends with an `Eof` token, even when `errors` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
    pub errors: Vec<Diagnostic>,
}

/// Lexer for Lua source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    errors: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            comments: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token; problems are reported via
    /// [`Lexed::errors`] rather than by aborting.
    pub fn tokenize(mut self) -> Lexed {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        Lexed {
            tokens: self.tokens,
            comments: self.comments,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Remaining source, starting at the current position.
    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Skip whitespace (Lua is free-form; newlines carry no structure)
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '+' => self.add_op(OperatorId::Add, start),
            '-' => {
                if self.match_char('-') {
                    self.scan_comment(start);
                } else {
                    self.add_op(OperatorId::Sub, start);
                }
            }
            '*' => self.add_op(OperatorId::Mul, start),
            '/' => self.add_op(OperatorId::Div, start),
            '%' => self.add_op(OperatorId::Mod, start),
            '^' => self.add_op(OperatorId::Pow, start),
            '#' => self.add_op(OperatorId::Len, start),

            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::Eq, start);
                } else {
                    self.add_punct(PunctuationId::Assign, start);
                }
            }
            '~' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.errors.push(Diagnostic::error(
                        "unexpected symbol near '~'",
                        Span::new(start, self.current_pos),
                    ));
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::LtEq, start);
                } else {
                    self.add_op(OperatorId::Lt, start);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start);
                } else {
                    self.add_op(OperatorId::Gt, start);
                }
            }

            '.' => {
                if self.match_char('.') {
                    if self.match_char('.') {
                        self.add_punct(PunctuationId::Ellipsis, start);
                    } else {
                        self.add_op(OperatorId::Concat, start);
                    }
                } else if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number_after_dot(start);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }
            ':' => {
                if self.match_char(':') {
                    self.add_punct(PunctuationId::DoubleColon, start);
                } else {
                    self.add_punct(PunctuationId::Colon, start);
                }
            }
            ',' => self.add_punct(PunctuationId::Comma, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '[' => {
                // `[[` / `[=[` open a long string; a plain `[` is an index bracket.
                if let Some(level) = self.long_bracket_level_ahead() {
                    self.consume_long_bracket_opening(level);
                    self.scan_long_string(start, level);
                } else {
                    self.add_punct(PunctuationId::LBracket, start);
                }
            }

            // Strings
            '"' => self.scan_string(start, '"'),
            '\'' => self.scan_string(start, '\''),

            // Numbers
            '0'..='9' => self.scan_number(start, c),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors.push(Diagnostic::error(
                    format!("unexpected symbol near '{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Reserved-word lookup via the registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Name(spelling.to_string()), start);
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Scan a comment; `start` points at the first `-`, both dashes already consumed.
    fn scan_comment(&mut self, start: usize) {
        if self.peek() == Some('[') {
            let after_bracket = &self.source[self.current_pos + 1..];
            let level = after_bracket.bytes().take_while(|b| *b == b'=').count();
            if after_bracket.as_bytes().get(level) == Some(&b'[') {
                self.advance(); // '['
                self.consume_long_bracket_opening(level);
                let text = self.scan_long_bracket_body(start, level, "comment");
                self.comments.push(Comment {
                    text,
                    span: Span::new(start, self.current_pos),
                    is_long: true,
                });
                return;
            }
        }

        let text_start = self.current_pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        self.comments.push(Comment {
            text: self.source[text_start..self.current_pos].to_string(),
            span: Span::new(start, self.current_pos),
            is_long: false,
        });
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only, per the Lua manual).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let lexed = lex(source);
        assert!(lexed.errors.is_empty(), "unexpected lex errors: {:?}", lexed.errors);
        lexed.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        use lumo_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let lexed = lex(k.canonical);
            assert!(lexed.errors.is_empty(), "lex({:?}) failed: {:?}", k.canonical, lexed.errors);
            assert_eq!(lexed.tokens.len(), 2, "expected token + EOF for {:?}", k.canonical);
            assert!(lexed.tokens[0].kind.is_keyword(k.id));
            assert!(matches!(lexed.tokens[1].kind, TokenKind::Eof));
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        use lumo_core::lang::operators;

        for o in operators::OPERATORS {
            let lexed = lex(o.canonical);
            assert!(lexed.errors.is_empty(), "lex({:?}) failed: {:?}", o.canonical, lexed.errors);
            let tokens = &lexed.tokens[..lexed.tokens.len() - 1];
            assert_eq!(tokens.len(), 1, "expected single token for {:?}", o.canonical);

            if o.is_keyword_spelling {
                // Word operators lex as keywords; the parser maps them back.
                assert!(matches!(tokens[0].kind, TokenKind::Keyword(_)));
            } else {
                assert!(tokens[0].kind.is_operator(o.id));
            }
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        use lumo_core::lang::punctuation;

        for p in punctuation::PUNCTUATION {
            let lexed = lex(p.canonical);
            assert!(lexed.errors.is_empty(), "lex({:?}) failed: {:?}", p.canonical, lexed.errors);
            let tokens = &lexed.tokens[..lexed.tokens.len() - 1];
            assert_eq!(tokens.len(), 1, "expected single token for {:?}", p.canonical);
            assert!(tokens[0].kind.is_punctuation(p.id), "got {:?}", tokens[0].kind);
        }
    }

    #[test]
    fn test_keywords_and_names() {
        let tokens = kinds("local function End");
        assert!(tokens[0].is_keyword(KeywordId::Local));
        assert!(tokens[1].is_keyword(KeywordId::Function));
        // Reserved words are case-sensitive; `End` is a plain name.
        assert!(matches!(&tokens[2], TokenKind::Name(n) if n == "End"));
    }

    #[test]
    fn test_dots() {
        let tokens = kinds("a.b .. c ...");
        assert!(matches!(&tokens[0], TokenKind::Name(n) if n == "a"));
        assert!(tokens[1].is_punctuation(PunctuationId::Dot));
        assert!(matches!(&tokens[2], TokenKind::Name(n) if n == "b"));
        assert!(tokens[3].is_operator(OperatorId::Concat));
        assert!(matches!(&tokens[4], TokenKind::Name(n) if n == "c"));
        assert!(tokens[5].is_punctuation(PunctuationId::Ellipsis));
    }

    #[test]
    fn test_not_equals_and_relational() {
        let tokens = kinds("~= <= >= < > ==");
        assert!(tokens[0].is_operator(OperatorId::NotEq));
        assert!(tokens[1].is_operator(OperatorId::LtEq));
        assert!(tokens[2].is_operator(OperatorId::GtEq));
        assert!(tokens[3].is_operator(OperatorId::Lt));
        assert!(tokens[4].is_operator(OperatorId::Gt));
        assert!(tokens[5].is_operator(OperatorId::Eq));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("42 3.5 0x10 1e2 .5");
        assert!(matches!(tokens[0], TokenKind::Int(42)));
        assert!(matches!(tokens[1], TokenKind::Float(f) if (f - 3.5).abs() < 1e-9));
        assert!(matches!(tokens[2], TokenKind::Int(16)));
        assert!(matches!(tokens[3], TokenKind::Float(f) if (f - 100.0).abs() < 1e-9));
        assert!(matches!(tokens[4], TokenKind::Float(f) if (f - 0.5).abs() < 1e-9));
    }

    #[test]
    fn test_int_overflow_becomes_float() {
        let tokens = kinds("99999999999999999999");
        assert!(matches!(tokens[0], TokenKind::Float(_)));
    }

    #[test]
    fn test_strings() {
        let tokens = kinds(r#""hello" 'world' "a\nb""#);
        assert!(matches!(&tokens[0], TokenKind::Str(s) if s == "hello"));
        assert!(matches!(&tokens[1], TokenKind::Str(s) if s == "world"));
        assert!(matches!(&tokens[2], TokenKind::Str(s) if s == "a\nb"));
    }

    #[test]
    fn test_long_strings() {
        let tokens = kinds("[[raw ]] [==[ nested ]] here ]==]");
        assert!(matches!(&tokens[0], TokenKind::Str(s) if s == "raw "));
        assert!(matches!(&tokens[1], TokenKind::Str(s) if s == " nested ]] here "));
    }

    #[test]
    fn test_long_string_skips_leading_newline() {
        let tokens = kinds("[[\nline]]");
        assert!(matches!(&tokens[0], TokenKind::Str(s) if s == "line"));
    }

    #[test]
    fn test_index_bracket_is_not_long_string() {
        let tokens = kinds("t[1]");
        assert!(tokens[1].is_punctuation(PunctuationId::LBracket));
        assert!(matches!(tokens[2], TokenKind::Int(1)));
        assert!(tokens[3].is_punctuation(PunctuationId::RBracket));
    }

    #[test]
    fn test_line_comment() {
        let lexed = lex("x = 1 -- trailing note\ny = 2");
        assert!(lexed.errors.is_empty());
        assert_eq!(lexed.comments.len(), 1);
        assert_eq!(lexed.comments[0].text, " trailing note");
        assert!(!lexed.comments[0].is_long);
        // Comments never become tokens.
        assert!(!lexed.tokens.iter().any(|t| matches!(t.kind, TokenKind::Str(_))));
    }

    #[test]
    fn test_long_comment() {
        let lexed = lex("--[[ spans\nlines ]] x = 1");
        assert!(lexed.errors.is_empty());
        assert_eq!(lexed.comments.len(), 1);
        assert!(lexed.comments[0].is_long);
        assert!(matches!(&lexed.tokens[0].kind, TokenKind::Name(n) if n == "x"));
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let lexed = lex("x = \"oops");
        assert_eq!(lexed.errors.len(), 1);
        assert!(lexed.errors[0].message.contains("unfinished string"));
        // Stream still ends with Eof and remains usable.
        assert!(matches!(lexed.tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)));
    }

    #[test]
    fn test_unexpected_symbol_recovers() {
        let lexed = lex("x = 1 ? y = 2");
        assert_eq!(lexed.errors.len(), 1);
        // Lexing continued past the bad character.
        assert!(lexed.tokens.iter().any(|t| matches!(&t.kind, TokenKind::Name(n) if n == "y")));
    }

    #[test]
    fn test_empty_source() {
        let lexed = lex("");
        assert!(lexed.errors.is_empty());
        assert_eq!(lexed.tokens.len(), 1);
        assert!(matches!(lexed.tokens[0].kind, TokenKind::Eof));
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "local answer = 42";
        let lexed = lex(source);
        for t in &lexed.tokens {
            assert!(t.span.start <= t.span.end);
            assert!(t.span.end <= source.len());
        }
        assert_eq!(lexed.tokens[1].span, crate::ast::Span::new(6, 12));
    }
}
