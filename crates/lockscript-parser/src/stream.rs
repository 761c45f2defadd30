//! Token stream wrapper for the hand-written parser.

use lockscript_lexer::Token;
use std::ops::Range as ByteSpan;

/// Token stream with lookahead and byte-span tracking.
///
/// Each entry pairs a lex result with its byte span from the source, so
/// failure positions stay accurate. Lexer errors are kept in the stream and
/// reported at the point the parser reaches them.
pub struct TokenStream {
    tokens: Vec<(Result<Token, ()>, ByteSpan<usize>)>,
    pos: usize,
    source_len: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<(Result<Token, ()>, ByteSpan<usize>)>, source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source_len,
        }
    }

    /// Peek at the current lex result without consuming it.
    pub fn peek(&self) -> Option<&(Result<Token, ()>, ByteSpan<usize>)> {
        self.tokens.get(self.pos)
    }

    /// Advance past the current token.
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Byte span of the current token, or an empty span at end of input.
    pub fn current_span(&self) -> ByteSpan<usize> {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.clone(),
            None => self.source_len..self.source_len,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
