//! Numeric literal scanning.
//!
//! Lua 5.2 accepts decimal integers and floats (with `e` exponents), hex integers,
//! and hex floats with a binary `p` exponent. Integers that do not fit in an `i64`
//! fall back to a float, which matches how oversized literals behave at runtime
//! (every Lua 5.2 number is a double).

use super::Lexer;
use crate::ast::Span;
use crate::diagnostics::Diagnostic;
use crate::lexer::tokens::TokenKind;

impl<'a> Lexer<'a> {
    /// Scan a number; the first digit is already consumed.
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' && matches!(self.peek(), Some('x') | Some('X')) {
            self.advance();
            self.scan_hex_number(start);
            return;
        }

        let mut is_float = false;

        self.consume_digits();

        // A fraction only begins with a single dot; `1..2` must lex as a concat.
        if self.peek() == Some('.') && self.second() != Some('.') {
            self.advance();
            self.consume_digits();
            is_float = true;
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            if !self.consume_digits() {
                self.errors.push(Diagnostic::error(
                    "malformed number",
                    Span::new(start, self.current_pos),
                ));
                return;
            }
            is_float = true;
        }

        let slice = &self.source[start..self.current_pos];

        if is_float {
            match slice.parse::<f64>() {
                Ok(value) => self.add_token(TokenKind::Float(value), start),
                Err(_) => self.errors.push(Diagnostic::error(
                    format!("malformed number near '{}'", slice),
                    Span::new(start, self.current_pos),
                )),
            }
        } else {
            match slice.parse::<i64>() {
                Ok(value) => self.add_token(TokenKind::Int(value), start),
                // Larger than i64: keep the value as a float.
                Err(_) => match slice.parse::<f64>() {
                    Ok(value) => self.add_token(TokenKind::Float(value), start),
                    Err(_) => self.errors.push(Diagnostic::error(
                        format!("malformed number near '{}'", slice),
                        Span::new(start, self.current_pos),
                    )),
                },
            }
        }
    }

    /// Scan a number that began with `.` (e.g. `.5`); the dot is already consumed
    /// and the next character is known to be a digit.
    pub(super) fn scan_number_after_dot(&mut self, start: usize) {
        self.consume_digits();

        if matches!(self.peek(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            if !self.consume_digits() {
                self.errors.push(Diagnostic::error(
                    "malformed number",
                    Span::new(start, self.current_pos),
                ));
                return;
            }
        }

        let slice = &self.source[start..self.current_pos];
        match slice.parse::<f64>() {
            Ok(value) => self.add_token(TokenKind::Float(value), start),
            Err(_) => self.errors.push(Diagnostic::error(
                format!("malformed number near '{}'", slice),
                Span::new(start, self.current_pos),
            )),
        }
    }

    /// Scan the digits of a hex literal; `0x` is already consumed.
    fn scan_hex_number(&mut self, start: usize) {
        let mut int_value: u64 = 0;
        let mut int_float = 0.0f64;
        let mut int_digits = 0usize;
        let mut overflow = false;

        while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
            let (shifted, mul_over) = int_value.overflowing_mul(16);
            let (added, add_over) = shifted.overflowing_add(u64::from(d));
            overflow |= mul_over || add_over;
            int_value = added;
            int_float = int_float * 16.0 + f64::from(d);
            int_digits += 1;
            self.advance();
        }

        let mut is_float = false;
        let mut frac_value = 0.0f64;
        let mut frac_digits = 0usize;

        if self.peek() == Some('.') {
            self.advance();
            let mut scale = 1.0 / 16.0;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                frac_value += f64::from(d) * scale;
                scale /= 16.0;
                frac_digits += 1;
                self.advance();
            }
            is_float = true;
        }

        let mut exponent = 0i32;
        if matches!(self.peek(), Some('p') | Some('P')) {
            self.advance();
            let negative = match self.peek() {
                Some('-') => {
                    self.advance();
                    true
                }
                Some('+') => {
                    self.advance();
                    false
                }
                _ => false,
            };
            let mut digits = 0usize;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
                exponent = exponent.saturating_mul(10).saturating_add(d as i32);
                digits += 1;
                self.advance();
            }
            if digits == 0 {
                self.errors.push(Diagnostic::error(
                    "malformed number",
                    Span::new(start, self.current_pos),
                ));
                return;
            }
            if negative {
                exponent = -exponent;
            }
            is_float = true;
        }

        if int_digits == 0 && frac_digits == 0 {
            self.errors.push(Diagnostic::error(
                format!("malformed number near '{}'", &self.source[start..self.current_pos]),
                Span::new(start, self.current_pos),
            ));
            return;
        }

        if is_float {
            let value = (int_float + frac_value) * 2.0f64.powi(exponent);
            self.add_token(TokenKind::Float(value), start);
        } else if overflow || int_value > i64::MAX as u64 {
            // Larger than i64: keep the value as a float, like the decimal path.
            self.add_token(TokenKind::Float(int_float), start);
        } else {
            self.add_token(TokenKind::Int(int_value as i64), start);
        }
    }

    /// Consume a run of decimal digits; returns whether any were consumed.
    fn consume_digits(&mut self) -> bool {
        let mut any = false;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            any = true;
        }
        any
    }

    /// The character after the next one, without consuming anything.
    fn second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn single(source: &str) -> TokenKind {
        let lexed = lex(source);
        assert!(lexed.errors.is_empty(), "lex({:?}) failed: {:?}", source, lexed.errors);
        assert_eq!(lexed.tokens.len(), 2, "expected one token for {:?}", source);
        lexed.tokens[0].kind.clone()
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(single("0"), TokenKind::Int(0));
        assert_eq!(single("3"), TokenKind::Int(3));
        assert!(matches!(single("3."), TokenKind::Float(f) if f == 3.0));
        assert!(matches!(single("3.1416"), TokenKind::Float(f) if (f - 3.1416).abs() < 1e-12));
        assert!(matches!(single("314.16e-2"), TokenKind::Float(f) if (f - 3.1416).abs() < 1e-12));
        assert!(matches!(single("0.31416E1"), TokenKind::Float(f) if (f - 3.1416).abs() < 1e-12));
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(single("0xff"), TokenKind::Int(255));
        assert_eq!(single("0xBEBADA"), TokenKind::Int(0xBEBADA));
        assert!(matches!(single("0x0.1E"), TokenKind::Float(f) if (f - 0.1171875).abs() < 1e-12));
        assert!(matches!(single("0xA23p-4"), TokenKind::Float(f) if (f - 162.1875).abs() < 1e-9));
        assert!(matches!(single("0x1p4"), TokenKind::Float(f) if f == 16.0));
    }

    #[test]
    fn test_oversized_hex_becomes_float() {
        assert_eq!(single("0x7FFFFFFFFFFFFFFF"), TokenKind::Int(i64::MAX));
        assert!(matches!(
            single("0xFFFFFFFFFFFFFFFF"),
            TokenKind::Float(f) if f == u64::MAX as f64
        ));
        assert!(matches!(
            single("0x10000000000000000"),
            TokenKind::Float(f) if f > 1.8e19
        ));
    }

    #[test]
    fn test_concat_after_int_is_not_a_fraction() {
        let lexed = lex("1..2");
        assert!(lexed.errors.is_empty());
        assert_eq!(lexed.tokens.len(), 4);
        assert_eq!(lexed.tokens[0].kind, TokenKind::Int(1));
        assert_eq!(lexed.tokens[2].kind, TokenKind::Int(2));
    }

    #[test]
    fn test_malformed_exponent_reports_error() {
        let lexed = lex("1e");
        assert_eq!(lexed.errors.len(), 1);
        assert!(lexed.errors[0].message.contains("malformed number"));
    }

    #[test]
    fn test_bare_hex_prefix_reports_error() {
        let lexed = lex("0x");
        assert_eq!(lexed.errors.len(), 1);
    }
}
