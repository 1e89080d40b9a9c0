//! Short-string and long-bracket scanning.
//!
//! Short strings support the full Lua 5.2 escape set (`\n`, `\ddd`, `\x41`, `\z`, a
//! backslash-newline continuation, ...). Long brackets (`[[...]]`, `[=[...]=]`) are
//! shared between long strings and long comments, so the body scanner lives here and
//! takes a `what` label for diagnostics.

use super::Lexer;
use crate::ast::Span;
use crate::diagnostics::Diagnostic;
use crate::lexer::tokens::TokenKind;

impl<'a> Lexer<'a> {
    // ========================================================================
    // Short strings
    // ========================================================================

    /// Scan a quoted string; the opening quote is already consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) {
        let mut value = String::new();

        loop {
            let Some(c) = self.peek() else {
                self.errors.push(Diagnostic::error(
                    "unfinished string",
                    Span::new(start, self.current_pos),
                ));
                break;
            };

            if c == '\n' {
                // An unescaped newline terminates the literal with an error; the
                // newline itself is left for normal whitespace handling.
                self.errors.push(Diagnostic::error(
                    "unfinished string",
                    Span::new(start, self.current_pos),
                ));
                break;
            }

            self.advance();

            if c == quote {
                self.add_token(TokenKind::Str(value), start);
                return;
            }

            if c == '\\' {
                self.scan_escape(start, &mut value);
            } else {
                value.push(c);
            }
        }

        // Unterminated: still emit what we collected so the parser can continue.
        self.add_token(TokenKind::Str(value), start);
    }

    /// Scan one escape sequence; the backslash is already consumed.
    fn scan_escape(&mut self, start: usize, value: &mut String) {
        let Some(c) = self.advance() else {
            self.errors.push(Diagnostic::error(
                "unfinished string",
                Span::new(start, self.current_pos),
            ));
            return;
        };

        match c {
            'a' => value.push('\x07'),
            'b' => value.push('\x08'),
            'f' => value.push('\x0c'),
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'v' => value.push('\x0b'),
            '\\' => value.push('\\'),
            '"' => value.push('"'),
            '\'' => value.push('\''),
            // Backslash-newline continues the string onto the next line.
            '\n' => value.push('\n'),
            '\r' => {
                value.push('\n');
                let _ = self.match_char('\n');
            }
            // `\z` skips following whitespace, including newlines.
            'z' => {
                while let Some(c) = self.peek() {
                    if c.is_ascii_whitespace() {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            'x' => {
                let mut code: u32 = 0;
                let mut digits = 0;
                while digits < 2 {
                    match self.peek().and_then(|c| c.to_digit(16)) {
                        Some(d) => {
                            code = code * 16 + d;
                            digits += 1;
                            self.advance();
                        }
                        None => break,
                    }
                }
                if digits < 2 {
                    self.errors.push(Diagnostic::error(
                        "hexadecimal digit expected",
                        Span::new(start, self.current_pos),
                    ));
                } else {
                    value.push(code as u8 as char);
                }
            }
            '0'..='9' => {
                // `\ddd`: up to three decimal digits.
                let mut code: u32 = c.to_digit(10).unwrap_or(0);
                let mut digits = 1;
                while digits < 3 {
                    match self.peek().and_then(|c| c.to_digit(10)) {
                        Some(d) => {
                            code = code * 10 + d;
                            digits += 1;
                            self.advance();
                        }
                        None => break,
                    }
                }
                if code > 255 {
                    self.errors.push(Diagnostic::error(
                        "decimal escape too large",
                        Span::new(start, self.current_pos),
                    ));
                } else {
                    value.push(code as u8 as char);
                }
            }
            _ => {
                self.errors.push(Diagnostic::error(
                    format!("invalid escape sequence '\\{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Long brackets
    // ========================================================================

    /// Check for a long-bracket opening at the current position, right after a `[` was
    /// consumed. Returns the level (number of `=` signs) without consuming anything.
    pub(super) fn long_bracket_level_ahead(&self) -> Option<usize> {
        let rest = self.rest().as_bytes();
        let level = rest.iter().take_while(|b| **b == b'=').count();
        if rest.get(level) == Some(&b'[') { Some(level) } else { None }
    }

    /// Consume the `=`* `[` tail of a long-bracket opening.
    pub(super) fn consume_long_bracket_opening(&mut self, level: usize) {
        for _ in 0..=level {
            let _ = self.advance();
        }
    }

    /// Scan a long string; the full opening bracket is already consumed.
    pub(super) fn scan_long_string(&mut self, start: usize, level: usize) {
        let value = self.scan_long_bracket_body(start, level, "string");
        self.add_token(TokenKind::Str(value), start);
    }

    /// Scan the body of a long string or long comment up to the matching closing
    /// bracket, returning the content between the brackets.
    pub(super) fn scan_long_bracket_body(&mut self, start: usize, level: usize, what: &str) -> String {
        // Per the Lua manual, a newline immediately after the opening bracket is
        // not part of the content.
        if self.peek() == Some('\r') {
            self.advance();
        }
        if self.peek() == Some('\n') {
            self.advance();
        }

        let content_start = self.current_pos;

        loop {
            if self.peek().is_none() {
                self.errors.push(Diagnostic::error(
                    format!("unfinished long {}", what),
                    Span::new(start, self.current_pos),
                ));
                return self.source[content_start..self.current_pos].to_string();
            }

            if self.peek() == Some(']') {
                let rest = self.rest().as_bytes();
                let eq_count = rest[1..].iter().take_while(|b| **b == b'=').count();
                if eq_count == level && rest.get(1 + level) == Some(&b']') {
                    let content = self.source[content_start..self.current_pos].to_string();
                    for _ in 0..level + 2 {
                        let _ = self.advance();
                    }
                    return content;
                }
            }

            self.advance();
        }
    }
}
