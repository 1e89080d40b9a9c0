/// Parse a token stream into a [`Parsed`] chunk.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by [`crate::lexer::lex`]; must end with `Eof`.
///
/// ## Notes
/// Never fails: syntax problems are reported via [`Parsed::errors`] alongside a tree
/// containing error-marker nodes.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Parsed {
    Parser::new(tokens).parse()
}
