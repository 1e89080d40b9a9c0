/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".

/// Everything the parser produces for one token stream.
///
/// `chunk` is always present; when `errors` is non-empty the tree contains
/// [`Stat::Error`] / [`Expr::Error`] markers covering the regions the parser
/// could not make sense of.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub chunk: Chunk,
    pub errors: Vec<Diagnostic>,
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at
///   statement boundaries; recovery inserts an error-marker statement so spans
///   stay contiguous for downstream consumers.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by [`crate::lexer`]; must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Parsed`] result.
    ///
    /// Never fails: problems are reported via [`Parsed::errors`] and marked in the
    /// tree, and parsing always consumes the whole stream.
    pub fn parse(mut self) -> Parsed {
        let mut block = self.block();

        // A well-formed chunk ends at EOF. Anything left over (a stray `end`, an
        // unmatched `until`, ...) is reported and parsing resumes after it so the
        // rest of the file still contributes statements.
        while !self.is_at_end() {
            let span = self.current_span();
            self.errors.push(Diagnostic::error(
                format!("'<eof>' expected near {}", self.peek().kind.describe()),
                span,
            ));
            self.advance();
            block.stats.push(Spanned::new(Stat::Error, span));
            let more = self.block();
            block.stats.extend(more.stats);
        }

        Parsed {
            chunk: Chunk { block },
            errors: self.errors,
        }
    }
}
